//! Focus record store
//!
//! Owns the backing CSV file and the offset index, and translates the
//! date-keyed API (read a day, write one hour) into byte-level reads and
//! writes. All state lives behind one exclusive lock: seeks, reads and
//! writes are not atomic with respect to each other, and the index's
//! offsets are only valid while no concurrent write is shifting them.
//!
//! Write strategy: a value whose serialized length matches the bytes
//! already on disk is overwritten in place; any length change rewrites
//! the record and shifts the entire file tail after it, then propagates
//! the byte delta to the index in the same pass. A longer value is never
//! written over a shorter field, so neighbouring records cannot be
//! corrupted.

use crate::store::error::{StoreError, StoreResult};
use crate::store::index::{is_future, OffsetIndex};
use crate::store::level::Level;
use crate::store::record::{self, Record, HOURS_PER_DAY};
use chrono::NaiveDate;
use std::fs::{File, OpenOptions};
use std::io::{BufRead, BufReader, Read, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};

struct StoreInner {
    file: File,
    index: OffsetIndex,
}

/// The per-day, per-hour focus level store
pub struct FocusStore {
    inner: Mutex<StoreInner>,
    path: PathBuf,
}

impl FocusStore {
    /// Open (or create) the backing file and build the offset index by
    /// scanning it. The store owns the handle for its lifetime.
    pub fn open(path: impl AsRef<Path>) -> StoreResult<FocusStore> {
        let path = path.as_ref().to_path_buf();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let mut file = OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .open(&path)?;

        file.seek(SeekFrom::Start(0))?;
        let index = {
            let mut reader = BufReader::new(&mut file);
            OffsetIndex::scan(&mut reader)?
        };
        file.seek(SeekFrom::Start(0))?;

        tracing::debug!(records = index.len(), path = %path.display(), "focus store opened");

        Ok(FocusStore {
            inner: Mutex::new(StoreInner { file, index }),
            path,
        })
    }

    /// Path of the backing file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// All 24 hourly levels for a date
    pub fn read_day(&self, date: NaiveDate) -> StoreResult<[Level; HOURS_PER_DAY]> {
        if is_future(date) {
            return Err(StoreError::DateInFuture(date));
        }

        let mut inner = self.lock()?;
        let record = Self::read_record(&mut inner, date)?;
        inner.file.seek(SeekFrom::Start(0))?;
        record.levels()
    }

    /// The level recorded for one hour of a date. A record shorter than
    /// `hour + 1` fields yields `Level::None`, not an error.
    pub fn read_hour(&self, date: NaiveDate, hour: u8) -> StoreResult<Level> {
        check_hour(hour)?;
        if is_future(date) {
            return Err(StoreError::DateInFuture(date));
        }

        let mut inner = self.lock()?;
        let record = Self::read_record(&mut inner, date)?;
        inner.file.seek(SeekFrom::Start(0))?;
        record.level_at(hour as usize)
    }

    /// Record the level for one hour of a date, creating the day's
    /// record if it does not exist yet.
    pub fn write_hour(&self, date: NaiveDate, hour: u8, level: Level) -> StoreResult<()> {
        check_hour(hour)?;
        if is_future(date) {
            return Err(StoreError::DateInFuture(date));
        }

        let mut inner = self.lock()?;
        match inner.index.position(date) {
            Some(offset) => Self::write_existing(&mut inner, date, offset, hour, level)?,
            None => Self::append_new(&mut inner, date, hour, level)?,
        }
        inner.file.seek(SeekFrom::Start(0))?;
        Ok(())
    }

    /// Flush and release the backing file
    pub fn close(self) -> StoreResult<()> {
        let inner = self
            .inner
            .into_inner()
            .map_err(|e| StoreError::Lock(e.to_string()))?;
        inner.file.sync_all()?;
        Ok(())
    }

    /// Record count and on-disk size
    pub fn stats(&self) -> StoreResult<StoreStats> {
        let inner = self.lock()?;
        let file_size_bytes = inner.file.metadata()?.len();
        Ok(StoreStats {
            records: inner.index.len(),
            file_size_bytes,
        })
    }

    fn lock(&self) -> StoreResult<MutexGuard<'_, StoreInner>> {
        self.inner
            .lock()
            .map_err(|e| StoreError::Lock(e.to_string()))
    }

    /// Seek to the date's indexed offset and parse its line
    fn read_record(inner: &mut StoreInner, date: NaiveDate) -> StoreResult<Record> {
        let offset = inner
            .index
            .position(date)
            .ok_or(StoreError::NotFound(date))?;
        let line = read_line_at(&mut inner.file, offset)?;
        Record::parse(&line)
    }

    /// Append a brand-new record at end-of-file: the date prefix, then
    /// `hour` padding commas, then the value. Nothing sits after it, so
    /// no offsets shift.
    fn append_new(
        inner: &mut StoreInner,
        date: NaiveDate,
        hour: u8,
        level: Level,
    ) -> StoreResult<()> {
        let end = inner.file.seek(SeekFrom::End(0))?;

        let mut data = String::new();
        if end > 0 {
            data.push('\n');
        }
        let start = end + data.len() as u64;
        data.push_str(&record::format_date(date));
        data.push_str(&",".repeat(hour as usize + 1));
        data.push_str(&level.encode());

        inner.file.write_all(data.as_bytes())?;
        inner.index.put(date, start, 0)?;

        tracing::debug!(%date, hour, %level, "appended new record");
        Ok(())
    }

    /// Mutate an existing record. Equal serialized length overwrites the
    /// field bytes directly; otherwise the record is rewritten and the
    /// file tail after it shifted by the delta, which is then propagated
    /// to the index.
    fn write_existing(
        inner: &mut StoreInner,
        date: NaiveDate,
        offset: u64,
        hour: u8,
        level: Level,
    ) -> StoreResult<()> {
        let old_line = read_line_at(&mut inner.file, offset)?;
        let old_len = old_line.len();

        let mut rec = Record::parse(&old_line)?;
        rec.set(hour as usize, level);
        let new_line = rec.to_line();

        if new_line.len() == old_len {
            // Field already holds a value of the same width.
            let rel = record::field_offset(&old_line, hour as usize).ok_or_else(|| {
                StoreError::Corrupt(format!("field {hour} missing from unchanged-length record"))
            })?;
            inner.file.seek(SeekFrom::Start(offset + rel as u64))?;
            inner.file.write_all(level.encode().as_bytes())?;
            return Ok(());
        }

        // Length changed: rewrite the line and shift everything after it.
        let tail_start = offset + old_len as u64;
        inner.file.seek(SeekFrom::Start(tail_start))?;
        let mut tail = Vec::new();
        inner.file.read_to_end(&mut tail)?;

        inner.file.seek(SeekFrom::Start(offset))?;
        inner.file.write_all(new_line.as_bytes())?;
        inner.file.write_all(&tail)?;
        inner
            .file
            .set_len(offset + new_line.len() as u64 + tail.len() as u64)?;

        let delta = new_line.len() as i64 - old_len as i64;
        inner.index.update(date, delta)?;

        tracing::debug!(%date, hour, %level, delta, "rewrote record with tail shift");
        Ok(())
    }
}

/// Read one record line starting at `offset` (newline excluded)
fn read_line_at(file: &mut File, offset: u64) -> StoreResult<String> {
    file.seek(SeekFrom::Start(offset))?;
    let mut reader = BufReader::new(file);
    let mut line = String::new();
    reader.read_line(&mut line)?;
    if line.ends_with('\n') {
        line.pop();
    }
    Ok(line)
}

fn check_hour(hour: u8) -> StoreResult<()> {
    if hour as usize >= HOURS_PER_DAY {
        return Err(StoreError::InvalidHour(hour));
    }
    Ok(())
}

/// Store statistics
#[derive(Debug, Clone)]
pub struct StoreStats {
    pub records: usize,
    pub file_size_bytes: u64,
}

impl std::fmt::Display for StoreStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Records: {}, Size: {} bytes",
            self.records, self.file_size_bytes
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn create_test_store() -> (FocusStore, tempfile::TempDir) {
        let dir = tempfile::tempdir().unwrap();
        let store = FocusStore::open(dir.path().join("focus.csv")).unwrap();
        (store, dir)
    }

    fn file_contents(store: &FocusStore) -> String {
        std::fs::read_to_string(store.path()).unwrap()
    }

    #[test]
    fn test_write_then_read_exact_bytes() {
        let (store, _dir) = create_test_store();
        let d = date(2025, 1, 21);

        store.write_hour(d, 0, Level::Medium).unwrap();
        assert_eq!(file_contents(&store), "21.01.2025,3");

        store.write_hour(d, 1, Level::High).unwrap();
        assert_eq!(file_contents(&store), "21.01.2025,3,4");

        let day = store.read_day(d).unwrap();
        assert_eq!(day[0], Level::Medium);
        assert_eq!(day[1], Level::High);
        assert!(day[2..].iter().all(|&l| l == Level::None));
    }

    #[test]
    fn test_round_trip_all_levels() {
        let (store, _dir) = create_test_store();
        let d = date(2024, 12, 21);

        for (hour, &level) in Level::all().iter().enumerate() {
            let hour = hour as u8;
            store.write_hour(d, hour, level).unwrap();
            assert_eq!(store.read_hour(d, hour).unwrap(), level);
        }
    }

    #[test]
    fn test_overwrite_same_hour_in_place() {
        let (store, _dir) = create_test_store();
        let d = date(2025, 1, 21);

        store.write_hour(d, 3, Level::Low).unwrap();
        let len_before = file_contents(&store).len();

        store.write_hour(d, 3, Level::Flow).unwrap();
        assert_eq!(store.read_hour(d, 3).unwrap(), Level::Flow);
        assert_eq!(file_contents(&store).len(), len_before);
    }

    #[test]
    fn test_writing_one_hour_leaves_others_alone() {
        let (store, _dir) = create_test_store();
        let d = date(2025, 1, 21);

        store.write_hour(d, 0, Level::Medium).unwrap();
        store.write_hour(d, 5, Level::Flow).unwrap();
        store.write_hour(d, 2, Level::VeryLow).unwrap();

        let day = store.read_day(d).unwrap();
        assert_eq!(day[0], Level::Medium);
        assert_eq!(day[2], Level::VeryLow);
        assert_eq!(day[5], Level::Flow);
        assert_eq!(day[1], Level::None);
        assert_eq!(day[3], Level::None);
    }

    #[test]
    fn test_record_growth_does_not_corrupt_later_dates() {
        let (store, _dir) = create_test_store();
        let d1 = date(2025, 1, 21);
        let d2 = date(2025, 1, 22);
        let d3 = date(2025, 1, 23);

        store.write_hour(d1, 0, Level::Medium).unwrap();
        store.write_hour(d2, 0, Level::High).unwrap();
        store.write_hour(d3, 0, Level::VeryLow).unwrap();

        // Grows the first record and shifts both later records; their
        // indexed offsets must follow.
        store.write_hour(d1, 6, Level::Flow).unwrap();

        assert_eq!(store.read_hour(d1, 0).unwrap(), Level::Medium);
        assert_eq!(store.read_hour(d1, 6).unwrap(), Level::Flow);
        assert_eq!(store.read_hour(d2, 0).unwrap(), Level::High);
        assert_eq!(store.read_hour(d3, 0).unwrap(), Level::VeryLow);

        assert_eq!(
            file_contents(&store),
            "21.01.2025,3,,,,,,5\n22.01.2025,4\n23.01.2025,1"
        );
    }

    #[test]
    fn test_filling_an_empty_field_shifts_tail() {
        let (store, _dir) = create_test_store();
        let d1 = date(2025, 1, 21);
        let d2 = date(2025, 1, 22);

        store.write_hour(d1, 2, Level::Medium).unwrap();
        store.write_hour(d2, 0, Level::High).unwrap();

        // Hour 0 of the first record is an empty field; filling it
        // lengthens the record by one byte.
        store.write_hour(d1, 0, Level::Flow).unwrap();

        assert_eq!(file_contents(&store), "21.01.2025,5,,3\n22.01.2025,4");
        assert_eq!(store.read_hour(d1, 0).unwrap(), Level::Flow);
        assert_eq!(store.read_hour(d1, 2).unwrap(), Level::Medium);
        assert_eq!(store.read_hour(d2, 0).unwrap(), Level::High);
    }

    #[test]
    fn test_unknown_date_is_not_found() {
        let (store, _dir) = create_test_store();
        assert!(matches!(
            store.read_day(date(2025, 1, 21)),
            Err(StoreError::NotFound(_))
        ));
        assert!(matches!(
            store.read_hour(date(2025, 1, 21), 0),
            Err(StoreError::NotFound(_))
        ));
    }

    #[test]
    fn test_future_date_rejected_without_mutation() {
        let (store, _dir) = create_test_store();
        let tomorrow = chrono::Local::now().date_naive() + chrono::Days::new(1);

        assert!(matches!(
            store.write_hour(tomorrow, 0, Level::Medium),
            Err(StoreError::DateInFuture(_))
        ));
        assert!(matches!(
            store.read_day(tomorrow),
            Err(StoreError::DateInFuture(_))
        ));
        assert_eq!(file_contents(&store), "");
    }

    #[test]
    fn test_invalid_hour_rejected() {
        let (store, _dir) = create_test_store();
        assert!(matches!(
            store.write_hour(date(2025, 1, 21), 24, Level::Medium),
            Err(StoreError::InvalidHour(24))
        ));
        assert!(matches!(
            store.read_hour(date(2025, 1, 21), 99),
            Err(StoreError::InvalidHour(99))
        ));
    }

    #[test]
    fn test_reopen_rebuilds_identical_index() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("focus.csv");

        let dates = [
            (date(2025, 2, 28), 4, Level::High),
            (date(2025, 1, 21), 0, Level::VeryLow),
            (date(2024, 12, 21), 23, Level::Flow),
            (date(2001, 2, 11), 12, Level::Low),
        ];

        {
            let store = FocusStore::open(&path).unwrap();
            for &(d, h, l) in &dates {
                store.write_hour(d, h, l).unwrap();
            }
            store.close().unwrap();
        }

        let store = FocusStore::open(&path).unwrap();
        for &(d, h, l) in &dates {
            assert_eq!(store.read_hour(d, h).unwrap(), l);
        }
        assert_eq!(store.stats().unwrap().records, dates.len());
    }

    #[test]
    fn test_reopen_then_grow_then_read() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("focus.csv");
        let d1 = date(2025, 1, 21);
        let d2 = date(2025, 1, 22);

        {
            let store = FocusStore::open(&path).unwrap();
            store.write_hour(d1, 0, Level::Medium).unwrap();
            store.write_hour(d2, 0, Level::High).unwrap();
        }

        // The rebuilt index must place d2 correctly even after d1 grows.
        let store = FocusStore::open(&path).unwrap();
        store.write_hour(d1, 10, Level::Flow).unwrap();
        assert_eq!(store.read_hour(d2, 0).unwrap(), Level::High);
    }

    #[test]
    fn test_open_on_corrupt_file_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("focus.csv");
        std::fs::write(&path, "this is not a record\n").unwrap();

        assert!(matches!(
            FocusStore::open(&path),
            Err(StoreError::Corrupt(_))
        ));
    }

    #[test]
    fn test_stats() {
        let (store, _dir) = create_test_store();
        store.write_hour(date(2025, 1, 21), 0, Level::Medium).unwrap();
        store.write_hour(date(2025, 1, 22), 0, Level::High).unwrap();

        let stats = store.stats().unwrap();
        assert_eq!(stats.records, 2);
        assert_eq!(stats.file_size_bytes, file_contents(&store).len() as u64);
    }
}
