use thiserror::Error;

pub type Result<T> = std::result::Result<T, HrError>;

#[derive(Error, Debug)]
pub enum HrError {
    #[error("The draw pool is empty")]
    EmptyPool,

    #[error("The roster is empty, import some names first")]
    EmptyRoster,

    #[error("Nothing to add: the input contains no names")]
    EmptyInput,

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("No winner record at position {0}")]
    WinnerNotFound(usize),

    #[error("This reveal was cancelled or replaced by a newer draw")]
    StaleReveal,

    #[error("Storage error: {0}")]
    Storage(#[from] rusqlite::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Dialog error: {0}")]
    Dialog(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl HrError {
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }

    pub fn dialog(msg: impl Into<String>) -> Self {
        Self::Dialog(msg.into())
    }

    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }

    /// Advisories are reported to the operator and leave state untouched.
    pub fn is_advisory(&self) -> bool {
        matches!(
            self,
            Self::EmptyPool
                | Self::EmptyRoster
                | Self::EmptyInput
                | Self::InvalidInput(_)
                | Self::WinnerNotFound(_)
                | Self::StaleReveal
        )
    }
}
