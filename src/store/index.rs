//! Offset index
//!
//! In-memory map from calendar date to the byte offset where that
//! date's record begins in the backing file. Built once by scanning the
//! file at open, then kept consistent by shift propagation: any write
//! that changes a record's byte length moves every later record, and
//! [`OffsetIndex::update`] re-derives those offsets in one pass.
//!
//! The index is never persisted; it is always derivable from the file.

use crate::store::error::{StoreError, StoreResult};
use crate::store::record;
use chrono::NaiveDate;
use std::collections::HashMap;
use std::io::BufRead;

/// True if `date` is strictly after today (local time). Future dates
/// are categorically rejected by every read and write path.
pub fn is_future(date: NaiveDate) -> bool {
    date > chrono::Local::now().date_naive()
}

/// Date → start-of-record byte offset
#[derive(Debug, Default)]
pub struct OffsetIndex {
    positions: HashMap<NaiveDate, u64>,
}

impl OffsetIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Byte offset of `date`'s record, if one is indexed
    pub fn position(&self, date: NaiveDate) -> Option<u64> {
        self.positions.get(&date).copied()
    }

    /// Number of indexed records
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Register a record at `offset`, or, if `date` is already indexed,
    /// propagate a `delta`-byte length change at its record instead.
    /// Future dates are rejected defensively; callers validate first.
    pub fn put(&mut self, date: NaiveDate, offset: u64, delta: i64) -> StoreResult<()> {
        if is_future(date) {
            return Err(StoreError::InvalidDate);
        }
        if self.positions.contains_key(&date) {
            return self.update(date, delta);
        }
        self.positions.insert(date, offset);
        Ok(())
    }

    /// Shift every record after `date`'s by `delta` bytes. The date must
    /// already be indexed: there is nothing to shift relative to
    /// otherwise.
    pub fn update(&mut self, date: NaiveDate, delta: i64) -> StoreResult<()> {
        let anchor = self
            .position(date)
            .ok_or(StoreError::NotFound(date))?;
        if delta == 0 {
            return Ok(());
        }
        for (_, pos) in self.positions.iter_mut() {
            if *pos > anchor {
                *pos = pos.saturating_add_signed(delta);
            }
        }
        Ok(())
    }

    /// Build the index by scanning the whole file line by line.
    ///
    /// The running offset is accumulated from the bytes each line
    /// consumes, never read back from the file cursor, so it stays exact
    /// under buffered reads. A trailing row whose date parses but lies
    /// in the future ends the scan cleanly (an in-progress or sentinel
    /// row); a date that does not parse at all is corruption.
    pub fn scan<R: BufRead>(reader: &mut R) -> StoreResult<OffsetIndex> {
        let mut index = OffsetIndex::new();
        let mut offset = 0u64;
        let mut buf = String::new();

        loop {
            buf.clear();
            if reader.read_line(&mut buf)? == 0 {
                break;
            }
            let line = buf.strip_suffix('\n').unwrap_or(&buf);

            let prefix = line.split(',').next().unwrap_or("");
            let date = record::parse_date(prefix)?;

            match index.put(date, offset, 0) {
                Ok(()) => {}
                Err(StoreError::InvalidDate) => break,
                Err(e) => return Err(e),
            }

            offset += record::consumed_len(line);
        }

        Ok(index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_put_and_position() {
        let mut index = OffsetIndex::new();
        index.put(date(2025, 1, 21), 0, 0).unwrap();
        index.put(date(2025, 1, 22), 13, 0).unwrap();

        assert_eq!(index.position(date(2025, 1, 21)), Some(0));
        assert_eq!(index.position(date(2025, 1, 22)), Some(13));
        assert_eq!(index.position(date(2025, 1, 23)), None);
    }

    #[test]
    fn test_put_rejects_future_date() {
        let mut index = OffsetIndex::new();
        let tomorrow = chrono::Local::now().date_naive() + chrono::Days::new(1);
        assert!(matches!(
            index.put(tomorrow, 0, 0),
            Err(StoreError::InvalidDate)
        ));
    }

    #[test]
    fn test_put_on_existing_entry_shifts_later_records() {
        let mut index = OffsetIndex::new();
        index.put(date(2025, 1, 21), 0, 0).unwrap();
        index.put(date(2025, 1, 22), 13, 0).unwrap();
        index.put(date(2025, 1, 23), 26, 0).unwrap();

        // Three bytes inserted into the first record.
        index.put(date(2025, 1, 21), 0, 3).unwrap();

        assert_eq!(index.position(date(2025, 1, 21)), Some(0));
        assert_eq!(index.position(date(2025, 1, 22)), Some(16));
        assert_eq!(index.position(date(2025, 1, 23)), Some(29));
    }

    #[test]
    fn test_update_shifts_only_later_records() {
        let mut index = OffsetIndex::new();
        index.put(date(2025, 1, 21), 0, 0).unwrap();
        index.put(date(2025, 1, 22), 13, 0).unwrap();

        index.update(date(2025, 1, 22), 5).unwrap();

        // Nothing lies after the anchor, so nothing moves.
        assert_eq!(index.position(date(2025, 1, 21)), Some(0));
        assert_eq!(index.position(date(2025, 1, 22)), Some(13));
    }

    #[test]
    fn test_update_unknown_date_fails() {
        let mut index = OffsetIndex::new();
        assert!(matches!(
            index.update(date(2025, 1, 21), 3),
            Err(StoreError::NotFound(_))
        ));
    }

    #[test]
    fn test_scan_accumulates_offsets() {
        let data = "21.01.2025,3,4\n22.01.2025,1\n23.01.2025";
        let mut cursor = Cursor::new(data);
        let index = OffsetIndex::scan(&mut cursor).unwrap();

        assert_eq!(index.len(), 3);
        assert_eq!(index.position(date(2025, 1, 21)), Some(0));
        assert_eq!(index.position(date(2025, 1, 22)), Some(15));
        assert_eq!(index.position(date(2025, 1, 23)), Some(27));
    }

    #[test]
    fn test_scan_empty_file() {
        let mut cursor = Cursor::new("");
        let index = OffsetIndex::scan(&mut cursor).unwrap();
        assert!(index.is_empty());
    }

    #[test]
    fn test_scan_stops_at_future_trailing_row() {
        let tomorrow = chrono::Local::now().date_naive() + chrono::Days::new(1);
        let data = format!("21.01.2025,3\n{},", tomorrow.format(record::DATE_FORMAT));
        let mut cursor = Cursor::new(data);

        let index = OffsetIndex::scan(&mut cursor).unwrap();
        assert_eq!(index.len(), 1);
        assert_eq!(index.position(date(2025, 1, 21)), Some(0));
    }

    #[test]
    fn test_scan_rejects_corrupt_date() {
        let mut cursor = Cursor::new("garbage,3\n");
        assert!(matches!(
            OffsetIndex::scan(&mut cursor),
            Err(StoreError::Corrupt(_))
        ));
    }
}
