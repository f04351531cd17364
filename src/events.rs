//! Change notifications emitted by the store.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Successful mutations of the store, reported to observers
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize, Serialize)]
pub enum LendingEvent {
    /// A book entered the catalog
    BookAdded(String),
    /// A book left the catalog
    BookRemoved(String),
    /// A reader was registered
    ReaderAdded(String),
    /// A reader was unregistered
    ReaderRemoved(String),
    /// A book was lent out
    Borrowed {
        /// Book that was lent
        isbn: String,
        /// Reader who took it
        reader_id: String,
        /// When it is due back
        due: NaiveDate,
    },
    /// A book came back
    Returned {
        /// Book that was returned
        isbn: String,
        /// Reader who returned it
        reader_id: String,
        /// Day of the return
        on: NaiveDate,
    },
    /// A due date was pushed back
    Extended {
        /// Book whose loan was extended
        isbn: String,
        /// Reader holding the loan
        reader_id: String,
        /// New due date
        due: NaiveDate,
    },
}
