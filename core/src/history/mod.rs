//! Archived session charts, one PNG per finished session.

pub mod browser;
pub mod entry;
pub mod store;

pub use browser::{HistoryBrowser, HistoryView};
pub use entry::{HistoryEntry, TIMESTAMP_FORMAT};
pub use store::HistoryStore;
