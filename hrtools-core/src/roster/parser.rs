use crate::types::Participant;
use chrono::Utc;
use uuid::Uuid;

const BYTE_ORDER_MARK: char = '\u{FEFF}';

/// Split free text on newlines and half-width or full-width commas, keeping
/// non-blank trimmed tokens in order of appearance.
pub fn parse_names(raw: &str) -> Vec<Participant> {
    raw.trim_start_matches(BYTE_ORDER_MARK)
        .split(|c: char| matches!(c, '\n' | ',' | '，'))
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(|name| Participant::new(generate_id("person"), name))
        .collect()
}

/// `<prefix>-<unix millis>-<random suffix>`
pub fn generate_id(prefix: &str) -> String {
    let suffix = Uuid::new_v4().simple().to_string();
    format!("{}-{}-{}", prefix, Utc::now().timestamp_millis(), &suffix[..12])
}
