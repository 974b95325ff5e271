//! Text and CSV renderings of a grouping result.

use crate::types::Group;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Prepended to CSV output so spreadsheet tools detect UTF-8.
pub const BYTE_ORDER_MARK: &str = "\u{FEFF}";

pub const CSV_HEADER: [&str; 3] = ["Group", "Name", "ID"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ExportFormat {
    Text,
    Csv,
}

impl ExportFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Text => "txt",
            ExportFormat::Csv => "csv",
        }
    }

    pub fn render(&self, groups: &[Group]) -> String {
        match self {
            ExportFormat::Text => export_text(groups),
            ExportFormat::Csv => export_csv(groups),
        }
    }
}

impl std::str::FromStr for ExportFormat {
    type Err = crate::HrError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "txt" | "text" => Ok(ExportFormat::Text),
            "csv" => Ok(ExportFormat::Csv),
            _ => Err(crate::HrError::invalid_input(format!(
                "Unknown export format: {}. Supported formats: txt, csv",
                s
            ))),
        }
    }
}

/// One `(group, member)` row of the tabular export.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TabularRow {
    pub group: String,
    pub name: String,
    pub id: String,
}

impl TabularRow {
    pub fn fields(&self) -> [&str; 3] {
        [&self.group, &self.name, &self.id]
    }
}

pub fn group_label(ordinal: usize) -> String {
    format!("Group {}", ordinal)
}

/// `Group N: a, b, c`, one line per group.
pub fn export_text(groups: &[Group]) -> String {
    groups
        .iter()
        .map(|g| format!("{}: {}", group_label(g.ordinal), g.member_names().join(", ")))
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn tabular_rows(groups: &[Group]) -> Vec<TabularRow> {
    groups
        .iter()
        .flat_map(|g| {
            g.members.iter().map(move |m| TabularRow {
                group: group_label(g.ordinal),
                name: m.name.clone(),
                id: m.id.clone(),
            })
        })
        .collect()
}

fn quote_field(field: &str) -> String {
    format!("\"{}\"", field.replace('"', "\"\""))
}

fn csv_line(fields: [&str; 3]) -> String {
    fields
        .iter()
        .map(|f| quote_field(f))
        .collect::<Vec<_>>()
        .join(",")
}

/// Header plus one row per member, every field quoted, BOM-prefixed.
pub fn export_csv(groups: &[Group]) -> String {
    let rows = tabular_rows(groups);
    let mut lines = Vec::with_capacity(rows.len() + 1);
    lines.push(csv_line(CSV_HEADER));
    lines.extend(rows.iter().map(|row| csv_line(row.fields())));

    format!("{}{}", BYTE_ORDER_MARK, lines.join("\n"))
}

/// `<prefix>_<YYYY-MM-DD>_<unix millis>.<ext>`
pub fn export_filename(prefix: &str, format: ExportFormat, at: DateTime<Utc>) -> String {
    format!(
        "{}_{}_{}.{}",
        prefix,
        at.format("%Y-%m-%d"),
        at.timestamp_millis(),
        format.extension()
    )
}
