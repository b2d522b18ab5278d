use crate::history::entry::HistoryEntry;
use crate::history::store::HistoryStore;
use crate::prelude::{CoreResult, FrameSize};
use crate::telemetry::LogManager;
use image::{imageops::FilterType, RgbImage};

pub const NO_HISTORY_MESSAGE: &str = "No training history available.";

/// What the history pane shows.
#[derive(Debug, Clone)]
pub enum HistoryView {
    /// Nothing has been archived yet.
    Empty,
    Entry {
        image: RgbImage,
        caption: String,
        position: usize,
        total: usize,
    },
}

/// Cursor over the sorted history listing.
#[derive(Debug, Clone)]
pub struct HistoryBrowser {
    store: HistoryStore,
    display_size: FrameSize,
    entries: Vec<HistoryEntry>,
    cursor: Option<usize>,
    logger: LogManager,
}

impl HistoryBrowser {
    pub fn new(store: HistoryStore, display_size: FrameSize) -> Self {
        Self {
            store,
            display_size,
            entries: Vec::new(),
            cursor: None,
            logger: LogManager::new("browser"),
        }
    }

    /// Reloads the listing and selects the oldest entry, if any.
    pub fn open(&mut self) -> CoreResult<()> {
        self.entries = self.store.list()?;
        self.cursor = if self.entries.is_empty() { None } else { Some(0) };
        self.logger
            .record(&format!("opened history with {} entries", self.entries.len()));
        Ok(())
    }

    pub fn close(&mut self) {
        self.entries.clear();
        self.cursor = None;
    }

    /// Moves to the next entry; a no-op at the end. Returns whether the
    /// cursor moved.
    pub fn next(&mut self) -> bool {
        match self.cursor {
            Some(index) if index + 1 < self.entries.len() => {
                self.cursor = Some(index + 1);
                true
            }
            _ => false,
        }
    }

    /// Moves to the previous entry; a no-op at the start.
    pub fn previous(&mut self) -> bool {
        match self.cursor {
            Some(index) if index > 0 => {
                self.cursor = Some(index - 1);
                true
            }
            _ => false,
        }
    }

    pub fn cursor(&self) -> Option<usize> {
        self.cursor
    }

    pub fn entries(&self) -> &[HistoryEntry] {
        &self.entries
    }

    pub fn selected(&self) -> Option<&HistoryEntry> {
        self.cursor.and_then(|index| self.entries.get(index))
    }

    /// Loads the selected chart scaled to the display size.
    pub fn render(&self) -> CoreResult<HistoryView> {
        let Some(entry) = self.selected() else {
            return Ok(HistoryView::Empty);
        };
        let image = image::open(self.store.path_of(entry))?
            .resize_exact(
                self.display_size.width,
                self.display_size.height,
                FilterType::Triangle,
            )
            .to_rgb8();
        Ok(HistoryView::Entry {
            image,
            caption: entry.caption(),
            position: self.cursor.unwrap_or_default(),
            total: self.entries.len(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::processing::RepCount;
    use chrono::NaiveDate;
    use tempfile::{tempdir, TempDir};

    const DISPLAY: FrameSize = FrameSize {
        width: 640,
        height: 480,
    };

    fn seeded(counts: &[u32]) -> (TempDir, HistoryBrowser) {
        let dir = tempdir().unwrap();
        let store = HistoryStore::new(dir.path());
        for (minute, half_reps) in counts.iter().enumerate() {
            let at = NaiveDate::from_ymd_opt(2024, 5, 1)
                .unwrap()
                .and_hms_opt(9, minute as u32, 0)
                .unwrap();
            store
                .save(&at, RepCount::from_half_reps(*half_reps), &RgbImage::new(32, 24))
                .unwrap();
        }
        (dir, HistoryBrowser::new(store, DISPLAY))
    }

    #[test]
    fn open_on_empty_directory_leaves_selection_unset() {
        let (_dir, mut browser) = seeded(&[]);
        browser.open().unwrap();
        assert_eq!(browser.cursor(), None);
        assert!(matches!(browser.render().unwrap(), HistoryView::Empty));
    }

    #[test]
    fn open_selects_first_entry() {
        let (_dir, mut browser) = seeded(&[2, 4, 6]);
        browser.open().unwrap();
        assert_eq!(browser.cursor(), Some(0));
        assert_eq!(browser.selected().unwrap().count(), "1");
    }

    #[test]
    fn navigation_is_clamped_at_both_ends() {
        let (_dir, mut browser) = seeded(&[2, 4]);
        browser.open().unwrap();
        assert!(!browser.previous());
        assert_eq!(browser.cursor(), Some(0));
        assert!(browser.next());
        assert!(!browser.next());
        assert_eq!(browser.cursor(), Some(1));
        assert!(browser.previous());
        assert_eq!(browser.cursor(), Some(0));
    }

    #[test]
    fn navigation_without_entries_is_a_no_op() {
        let (_dir, mut browser) = seeded(&[]);
        browser.open().unwrap();
        assert!(!browser.next());
        assert!(!browser.previous());
        assert_eq!(browser.cursor(), None);
    }

    #[test]
    fn render_scales_and_captions_the_selection() {
        let (_dir, mut browser) = seeded(&[3, 8]);
        browser.open().unwrap();
        browser.next();
        match browser.render().unwrap() {
            HistoryView::Entry {
                image,
                caption,
                position,
                total,
            } => {
                assert_eq!(image.dimensions(), (640, 480));
                assert_eq!(caption, "Time : 2024-05-01T09-01-00 | Total Curls : 4");
                assert_eq!((position, total), (1, 2));
            }
            HistoryView::Empty => panic!("expected an entry"),
        }
    }

    #[test]
    fn close_forgets_the_listing() {
        let (_dir, mut browser) = seeded(&[2]);
        browser.open().unwrap();
        browser.close();
        assert!(browser.entries().is_empty());
        assert_eq!(browser.selected(), None);
    }
}
