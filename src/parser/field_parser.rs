use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Salutation tokens that mark the line carrying the employee name.
const COURTESY_TITLES: &[&str] = &["sr.", "sra.", "srta."];

/// Phrases indicating the employee answered the record.
const RESPONSE_PHRASES: &[&str] = &["contesta", "descargo presentado", "responde"];

const DATE_FORMAT: &str = "%d/%m/%Y";

pub const SUMMARY_TOKEN_LIMIT: usize = 40;
const SUMMARY_ELLIPSIS: &str = "...";

/// Record category, decided by a fixed-priority keyword ladder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Category {
    LlamadoDeAtencion,
    Apercibimiento,
    SolicitudDeDescargo,
    Otro,
}

impl Category {
    /// Ladder order matters: the first matching keyword wins, regardless of
    /// where later keywords appear in the text.
    fn classify(text: &str) -> Self {
        if text.contains("llamado de atención") {
            Category::LlamadoDeAtencion
        } else if text.contains("apercibimiento") {
            Category::Apercibimiento
        } else if text.contains("descargo") {
            Category::SolicitudDeDescargo
        } else {
            Category::Otro
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Category::LlamadoDeAtencion => "Llamado de Atención",
            Category::Apercibimiento => "Apercibimiento",
            Category::SolicitudDeDescargo => "Solicitud de Descargo",
            Category::Otro => "Otro",
        }
    }
}

impl Default for Category {
    fn default() -> Self {
        Category::Otro
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One processed file's extracted field set. Built once, never mutated.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Record {
    pub name: String,
    pub issue_date: String,
    pub category: Category,
    pub responded: bool,
    pub summary: String,
}

impl Record {
    pub fn responded_label(&self) -> &'static str {
        if self.responded {
            "Sí"
        } else {
            "No"
        }
    }
}

/// Parses the fixed record fields out of extracted text. The text must
/// already be lowercased by the caller. Pure and deterministic.
pub fn parse_record(text: &str) -> Record {
    Record {
        name: extract_name(text),
        issue_date: extract_issue_date(text),
        category: Category::classify(text),
        responded: RESPONSE_PHRASES.iter().any(|phrase| text.contains(phrase)),
        summary: build_summary(text),
    }
}

/// First line containing a courtesy title, titles stripped, title-cased.
/// A weak heuristic kept on purpose; no line means no name.
fn extract_name(text: &str) -> String {
    for line in text.lines() {
        if COURTESY_TITLES.iter().any(|title| line.contains(title)) {
            let mut stripped = line.to_string();
            for title in COURTESY_TITLES {
                stripped = stripped.replace(title, "");
            }
            return title_case(stripped.trim());
        }
    }

    String::new()
}

/// First whitespace token containing '/' or '-'. A strict %d/%m/%Y candidate
/// is re-formatted in that pattern; anything else passes through verbatim.
fn extract_issue_date(text: &str) -> String {
    let candidate = text
        .split_whitespace()
        .find(|token| token.contains('/') || token.contains('-'));

    match candidate {
        Some(token) => match NaiveDate::parse_from_str(token, DATE_FORMAT) {
            Ok(date) => date.format(DATE_FORMAT).to_string(),
            Err(_) => token.to_string(),
        },
        None => String::new(),
    }
}

/// First 40 tokens joined with spaces, always ellipsis-terminated.
fn build_summary(text: &str) -> String {
    let tokens: Vec<&str> = text.split_whitespace().take(SUMMARY_TOKEN_LIMIT).collect();
    let mut summary = tokens.join(" ");
    summary.push_str(SUMMARY_ELLIPSIS);
    summary
}

/// Word-initial capitalization, remainder lowercased.
fn title_case(text: &str) -> String {
    text.split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => {
                    first.to_uppercase().collect::<String>() + &chars.as_str().to_lowercase()
                }
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
