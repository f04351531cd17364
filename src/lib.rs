//! In-memory library lending engine.
//!
//! This crate keeps a catalog of books and readers with genre and author
//! indexes, lends books out through an append-only ledger, answers filtered
//! queries through one-shot cursors, ranks books and readers by activity,
//! and saves/loads the whole store as a JSON snapshot.

pub mod book;
pub mod borrowing;
pub mod catalog;
pub mod clock;
pub mod config;
pub mod cursor;
pub mod error;
pub mod events;
pub mod library;
pub mod observers;
pub mod ordering;
pub mod persistence;
pub mod reader;
pub mod report;
pub mod statistics;
pub mod tabular;

pub use book::{Book, Genre};
pub use borrowing::Borrowing;
pub use clock::{Clock, FixedClock, SystemClock};
pub use config::LibraryConfig;
pub use cursor::Cursor;
pub use error::{LibraryError, Result};
pub use library::Library;
pub use reader::{Reader, ReaderCategory};
pub use report::LibraryReport;

#[cfg(test)]
pub(crate) mod fixtures;
