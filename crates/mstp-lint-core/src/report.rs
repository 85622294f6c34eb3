//! Violations log export.
//!
//! One CSV row per issue across the whole run, in the order issues were
//! found: `Type, Issue, Suggestion, Original Text`.

use std::borrow::Cow;

use crate::issue::IssueRecord;

/// Column header row for the violations log.
pub const CSV_HEADER: &str = "Type,Issue,Suggestion,Original Text";

/// Default file name for the exported violations log.
pub const DEFAULT_LOG_FILE: &str = "violations_log.csv";

/// Render issue records as CSV text, header included.
pub fn violations_csv(records: &[IssueRecord]) -> String {
    let mut out = String::with_capacity(records.len() * 64 + CSV_HEADER.len() + 1);
    out.push_str(CSV_HEADER);
    out.push('\n');
    for record in records {
        out.push_str(&field(record.issue.kind.as_str()));
        out.push(',');
        out.push_str(&field(&record.issue.original));
        out.push(',');
        out.push_str(&field(record.issue.suggestion.as_str()));
        out.push(',');
        out.push_str(&field(&record.source));
        out.push('\n');
    }
    out
}

/// Quote a field when it contains a delimiter, quote, or line break.
fn field(value: &str) -> Cow<'_, str> {
    if value.contains([',', '"', '\n', '\r']) {
        Cow::Owned(format!("\"{}\"", value.replace('"', "\"\"")))
    } else {
        Cow::Borrowed(value)
    }
}
