//! Record line format
//!
//! One record is one line of the backing file:
//!
//! ```text
//! DD.MM.YYYY,<h0>,<h1>,...,<h23>
//! ```
//!
//! Fields may be empty, and trailing fields may be absent entirely.
//! Every piece of byte arithmetic the store needs (how long a line is,
//! where field *i* starts, how many bytes a scan consumed) lives here so
//! the bootstrap scan and the write path can never disagree about it.

use crate::store::error::{StoreError, StoreResult};
use crate::store::level::Level;
use chrono::NaiveDate;

/// On-disk date prefix format (`21.01.2025`)
pub const DATE_FORMAT: &str = "%d.%m.%Y";

/// Hourly slots per record
pub const HOURS_PER_DAY: usize = 24;

/// Format a date as a record prefix
pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

/// Parse a date prefix, tolerating non-graphic padding bytes
/// (stray NULs left by historical fixed-width writers).
pub fn parse_date(raw: &str) -> StoreResult<NaiveDate> {
    let cleaned: String = raw.chars().filter(|c| c.is_ascii_graphic()).collect();
    NaiveDate::parse_from_str(&cleaned, DATE_FORMAT)
        .map_err(|e| StoreError::Corrupt(format!("bad date prefix {raw:?}: {e}")))
}

/// Bytes a line-by-line scan consumes for this line: the line itself
/// plus its newline separator. Computed from the parsed text, never from
/// the file cursor, so a buffered scan stays exact.
pub fn consumed_len(line: &str) -> u64 {
    line.len() as u64 + 1
}

/// A parsed record: its date plus the raw hourly fields as read.
///
/// Fields stay raw strings until decoded so a parse-then-serialize
/// round trip of a well-formed line is byte-identical.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    pub date: NaiveDate,
    fields: Vec<String>,
}

impl Record {
    /// A record with no hourly fields yet (a freshly appended date)
    pub fn empty(date: NaiveDate) -> Self {
        Self {
            date,
            fields: Vec::new(),
        }
    }

    /// Parse one line into date + fields. The line must not contain the
    /// trailing newline.
    pub fn parse(line: &str) -> StoreResult<Record> {
        let mut parts = line.split(',');
        let raw_date = parts
            .next()
            .ok_or_else(|| StoreError::Corrupt("empty record line".into()))?;
        let date = parse_date(raw_date)?;
        let fields = parts.map(str::to_string).collect();
        Ok(Record { date, fields })
    }

    /// Number of hourly fields actually present on the line
    pub fn field_count(&self) -> usize {
        self.fields.len()
    }

    /// Decode all 24 hourly slots; absent trailing fields are `None`
    pub fn levels(&self) -> StoreResult<[Level; HOURS_PER_DAY]> {
        let mut out = [Level::None; HOURS_PER_DAY];
        for (hour, slot) in out.iter_mut().enumerate() {
            if let Some(field) = self.fields.get(hour) {
                *slot = Level::decode(field)?;
            }
        }
        Ok(out)
    }

    /// Decode a single hour; a record shorter than `hour + 1` fields
    /// yields `None`, not an error.
    pub fn level_at(&self, hour: usize) -> StoreResult<Level> {
        match self.fields.get(hour) {
            Some(field) => Level::decode(field),
            None => Ok(Level::None),
        }
    }

    /// Set the level for an hour, padding any skipped slots with empty
    /// fields (bare commas on disk).
    pub fn set(&mut self, hour: usize, level: Level) {
        while self.fields.len() <= hour {
            self.fields.push(String::new());
        }
        self.fields[hour] = level.encode();
    }

    /// Serialize back to its on-disk line form (no trailing newline)
    pub fn to_line(&self) -> String {
        let mut line = format_date(self.date);
        for field in &self.fields {
            line.push(',');
            line.push_str(field);
        }
        line
    }
}

/// Byte offset within `line` where the value of hourly field `hour`
/// starts, or `None` if the line has fewer fields than that. Counts raw
/// comma separators, so it matches the file exactly even when the date
/// prefix carries padding bytes.
pub fn field_offset(line: &str, hour: usize) -> Option<usize> {
    let mut commas = 0;
    for (i, b) in line.bytes().enumerate() {
        if b == b',' {
            commas += 1;
            if commas == hour + 1 {
                return Some(i + 1);
            }
        }
    }
    None
}
