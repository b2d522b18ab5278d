use crate::history::entry::{HistoryEntry, EXTENSION};
use crate::prelude::CoreResult;
use crate::processing::RepCount;
use crate::telemetry::LogManager;
use chrono::{Duration, NaiveDateTime};
use image::{ImageFormat, RgbImage};
use std::fs::{self, File, OpenOptions};
use std::io::{BufWriter, ErrorKind, Write};
use std::path::{Path, PathBuf};

/// Flat directory of `<timestamp>_<count>.png` session charts.
#[derive(Debug, Clone)]
pub struct HistoryStore {
    dir: PathBuf,
    logger: LogManager,
}

impl HistoryStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            logger: LogManager::new("history"),
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn path_of(&self, entry: &HistoryEntry) -> PathBuf {
        self.dir.join(entry.file_name())
    }

    /// Writes `chart` as a new entry for a session finished at `finished_at`,
    /// creating the directory if needed. Existing entries are never
    /// replaced: when the name is taken the timestamp moves forward one
    /// second at a time until a free name is found.
    pub fn save(&self, finished_at: &NaiveDateTime, count: RepCount, chart: &RgbImage) -> CoreResult<PathBuf> {
        fs::create_dir_all(&self.dir)?;
        let mut finished_at = *finished_at;
        loop {
            let entry = HistoryEntry::new(&finished_at, count);
            let path = self.path_of(&entry);
            let file = match OpenOptions::new().write(true).create_new(true).open(&path) {
                Ok(file) => file,
                Err(err) if err.kind() == ErrorKind::AlreadyExists => {
                    self.logger
                        .warn(&format!("{} already exists, trying the next second", entry.file_name()));
                    finished_at += Duration::seconds(1);
                    continue;
                }
                Err(err) => return Err(err.into()),
            };
            if let Err(err) = write_png(file, chart) {
                if let Err(cleanup) = fs::remove_file(&path) {
                    self.logger
                        .warn(&format!("could not remove partial {}: {cleanup}", path.display()));
                }
                return Err(err);
            }
            self.logger.record(&format!("saved {}", path.display()));
            return Ok(path);
        }
    }

    /// Entries sorted by file name. A missing directory is an empty history;
    /// `.png` files that do not follow the naming contract are skipped.
    pub fn list(&self) -> CoreResult<Vec<HistoryEntry>> {
        let read_dir = match fs::read_dir(&self.dir) {
            Ok(read_dir) => read_dir,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(err) => return Err(err.into()),
        };

        let mut entries = Vec::new();
        for dir_entry in read_dir {
            let dir_entry = match dir_entry {
                Ok(dir_entry) => dir_entry,
                Err(err) => {
                    self.logger.warn(&format!("skipping unreadable entry: {err}"));
                    continue;
                }
            };
            match dir_entry.file_type() {
                Ok(file_type) if file_type.is_file() => {}
                Ok(_) => continue,
                Err(err) => {
                    self.logger
                        .warn(&format!("skipping {}: {err}", dir_entry.path().display()));
                    continue;
                }
            }
            let Some(name) = dir_entry.file_name().to_str().map(str::to_owned) else {
                continue;
            };
            if !name.ends_with(EXTENSION) {
                continue;
            }
            match HistoryEntry::parse(&name) {
                Ok(entry) => entries.push(entry),
                Err(err) => self.logger.warn(&format!("skipping {name}: {err}")),
            }
        }
        entries.sort_by(|a, b| a.file_name().cmp(b.file_name()));
        Ok(entries)
    }
}

fn write_png(file: File, chart: &RgbImage) -> CoreResult<()> {
    let mut writer = BufWriter::new(file);
    chart.write_to(&mut writer, ImageFormat::Png)?;
    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use tempfile::tempdir;

    fn at(minute: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 1, 2)
            .unwrap()
            .and_hms_opt(10, minute, 0)
            .unwrap()
    }

    #[test]
    fn missing_directory_lists_empty() {
        let dir = tempdir().unwrap();
        let store = HistoryStore::new(dir.path().join("absent"));
        assert!(store.list().unwrap().is_empty());
    }

    #[test]
    fn save_creates_directory_and_file() {
        let dir = tempdir().unwrap();
        let store = HistoryStore::new(dir.path().join("training_data"));
        let path = store
            .save(&at(0), RepCount::from_half_reps(6), &RgbImage::new(4, 4))
            .unwrap();
        assert!(path.exists());
        assert_eq!(path.file_name().unwrap(), "2024-01-02T10-00-00_3.png");
        assert_eq!(image::open(&path).unwrap().width(), 4);
    }

    #[test]
    fn list_sorts_and_skips_foreign_files() {
        let dir = tempdir().unwrap();
        let store = HistoryStore::new(dir.path());
        let chart = RgbImage::new(2, 2);
        store.save(&at(30), RepCount::from_half_reps(2), &chart).unwrap();
        store.save(&at(5), RepCount::from_half_reps(9), &chart).unwrap();
        fs::write(dir.path().join("readme.txt"), "notes").unwrap();
        fs::write(dir.path().join("stray.png"), "not a chart").unwrap();
        fs::create_dir(dir.path().join("nested_1.png")).unwrap();

        let names: Vec<_> = store
            .list()
            .unwrap()
            .iter()
            .map(|entry| entry.file_name().to_string())
            .collect();
        assert_eq!(
            names,
            vec!["2024-01-02T10-05-00_4.5.png", "2024-01-02T10-30-00_1.png"]
        );
    }

    #[test]
    fn same_second_sessions_keep_both_charts() {
        let dir = tempdir().unwrap();
        let store = HistoryStore::new(dir.path());
        let first = store
            .save(&at(7), RepCount::from_half_reps(2), &RgbImage::new(3, 3))
            .unwrap();
        let second = store
            .save(&at(7), RepCount::from_half_reps(2), &RgbImage::new(5, 5))
            .unwrap();
        assert_ne!(first, second);
        assert_eq!(second.file_name().unwrap(), "2024-01-02T10-07-01_1.png");
        assert_eq!(image::open(&first).unwrap().width(), 3);
        assert_eq!(image::open(&second).unwrap().width(), 5);
        assert_eq!(store.list().unwrap().len(), 2);
    }

    #[test]
    fn a_different_count_in_the_same_second_is_its_own_entry() {
        let dir = tempdir().unwrap();
        let store = HistoryStore::new(dir.path());
        store.save(&at(9), RepCount::from_half_reps(2), &RgbImage::new(2, 2)).unwrap();
        let path = store
            .save(&at(9), RepCount::from_half_reps(3), &RgbImage::new(2, 2))
            .unwrap();
        assert_eq!(path.file_name().unwrap(), "2024-01-02T10-09-00_1.5.png");
    }

    #[cfg(unix)]
    #[test]
    fn list_skips_entries_that_are_not_regular_files() {
        let dir = tempdir().unwrap();
        let store = HistoryStore::new(dir.path());
        store.save(&at(1), RepCount::from_half_reps(2), &RgbImage::new(2, 2)).unwrap();
        std::os::unix::fs::symlink(
            dir.path().join("gone.png"),
            dir.path().join("2024-01-02T10-02-00_1.png"),
        )
        .unwrap();

        let entries = store.list().unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].file_name(), "2024-01-02T10-01-00_1.png");
    }
}
