use crate::prelude::{CoreError, CoreResult};
use crate::processing::RepCount;
use chrono::NaiveDateTime;

/// `chrono` format of the timestamp prefix. Sorts lexicographically in
/// chronological order and never contains the `_` delimiter.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H-%M-%S";
pub const DELIMITER: char = '_';
pub const EXTENSION: &str = ".png";

/// A history file name split into its timestamp and count parts.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct HistoryEntry {
    file_name: String,
    timestamp: String,
    count: String,
}

impl HistoryEntry {
    /// Builds the entry for a session finished at `finished_at`.
    pub fn new(finished_at: &NaiveDateTime, count: RepCount) -> Self {
        let timestamp = finished_at.format(TIMESTAMP_FORMAT).to_string();
        let count = count.to_string();
        Self {
            file_name: format!("{timestamp}{DELIMITER}{count}{EXTENSION}"),
            timestamp,
            count,
        }
    }

    /// Splits `<timestamp>_<count>.png`. The timestamp is everything before
    /// the first delimiter; the count is the remainder minus the extension.
    pub fn parse(file_name: &str) -> CoreResult<Self> {
        let invalid = || CoreError::InvalidEntryName(file_name.to_string());
        let stem = file_name.strip_suffix(EXTENSION).ok_or_else(invalid)?;
        let (timestamp, count) = stem.split_once(DELIMITER).ok_or_else(invalid)?;
        if timestamp.is_empty() || count.is_empty() {
            return Err(invalid());
        }
        Ok(Self {
            file_name: file_name.to_string(),
            timestamp: timestamp.to_string(),
            count: count.to_string(),
        })
    }

    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    pub fn timestamp(&self) -> &str {
        &self.timestamp
    }

    pub fn count(&self) -> &str {
        &self.count
    }

    /// The count as a number, if it is one.
    pub fn rep_count(&self) -> Option<RepCount> {
        self.count.parse().ok()
    }

    pub fn finished_at(&self) -> Option<NaiveDateTime> {
        NaiveDateTime::parse_from_str(&self.timestamp, TIMESTAMP_FORMAT).ok()
    }

    pub fn caption(&self) -> String {
        format!("Time : {} | Total Curls : {}", self.timestamp, self.count)
    }
}
