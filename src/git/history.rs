//! Commit history listing
//!
//! History comes from `git log` with a custom field template: fields are
//! joined with the ASCII unit separator and records with the record
//! separator, so free-text subjects and author names can never be confused
//! with the framing.

use crate::exec::CommandRunner;
use log::warn;

const FIELD_SEP: char = '\u{1f}';
const RECORD_SEP: char = '\u{1e}';
const LOG_FORMAT: &str = "%h\u{1f}%ad\u{1f}%ar\u{1f}%an\u{1f}%s\u{1e}";
const DATE_FORMAT: &str = "format:%m/%d %H:%M";

/// One commit as shown in the history window.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryEntry {
    pub hash: String,
    pub date: String,
    pub relative_date: String,
    pub author: String,
    pub subject: String,
}

/// Returns the `count` most recent commits, oldest first.
///
/// A repository without commits (or a failed `git log`) yields an empty list.
pub fn recent_commits<R: CommandRunner + ?Sized>(runner: &R, count: u32) -> Vec<HistoryEntry> {
    let format_arg = format!("--pretty=format:{LOG_FORMAT}");
    let date_arg = format!("--date={DATE_FORMAT}");
    let count_arg = count.to_string();

    let output = runner.run("git", &["log", "-n", &count_arg, &format_arg, &date_arg]);

    let mut entries = parse_log(&output);
    entries.reverse();
    entries
}

fn parse_log(output: &str) -> Vec<HistoryEntry> {
    output
        .split(RECORD_SEP)
        .map(str::trim)
        .filter(|record| !record.is_empty())
        .filter_map(|record| {
            let fields: Vec<&str> = record.split(FIELD_SEP).collect();
            let [hash, date, relative_date, author, subject] = fields.as_slice() else {
                warn!("Skipping malformed history record: {record:?}");
                return None;
            };
            Some(HistoryEntry {
                hash: (*hash).to_string(),
                date: (*date).to_string(),
                relative_date: (*relative_date).to_string(),
                author: (*author).to_string(),
                subject: (*subject).to_string(),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(hash: &str, subject: &str) -> String {
        format!("{hash}\u{1f}08/27 10:15\u{1f}2 hours ago\u{1f}Ada\u{1f}{subject}\u{1e}")
    }

    #[test]
    fn parses_fields_in_order() {
        let output = record("abc1234", "add widget support");
        let entries = parse_log(&output);

        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].hash, "abc1234");
        assert_eq!(entries[0].date, "08/27 10:15");
        assert_eq!(entries[0].relative_date, "2 hours ago");
        assert_eq!(entries[0].author, "Ada");
        assert_eq!(entries[0].subject, "add widget support");
    }

    #[test]
    fn malformed_records_are_skipped() {
        let output = format!("{}garbage-without-separators\u{1e}", record("abc1234", "ok"));
        let entries = parse_log(&output);

        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].subject, "ok");
    }

    #[test]
    fn empty_output_yields_no_entries() {
        assert!(parse_log("").is_empty());
    }

    #[test]
    fn subjects_keep_their_punctuation() {
        let output = record("abc1234", "fix: handle / and :: in paths");
        let entries = parse_log(&output);

        assert_eq!(entries[0].subject, "fix: handle / and :: in paths");
    }
}
