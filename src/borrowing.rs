//! Entries of the lending ledger.

use std::{
    fmt,
    hash::{Hash, Hasher},
};

use chrono::{NaiveDate, TimeDelta};
use serde::{Deserialize, Serialize};

/// One entry of the lending ledger.
///
/// Identity is `(isbn, reader_id, borrow_date)`. A borrowing without a
/// return date is *open*.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Borrowing {
    /// Borrowed book
    isbn: String,
    /// Borrowing reader
    reader_id: String,
    /// Day the book was lent out
    borrow_date: NaiveDate,
    /// Day the book is due back
    due_date: NaiveDate,
    /// Day the book came back, if it has
    return_date: Option<NaiveDate>,
}

impl Borrowing {
    /// Start an open borrowing
    pub(crate) fn open(
        isbn: impl Into<String>,
        reader_id: impl Into<String>,
        borrow_date: NaiveDate,
        due_date: NaiveDate,
    ) -> Self {
        Self {
            isbn: isbn.into(),
            reader_id: reader_id.into(),
            borrow_date,
            due_date,
            return_date: None,
        }
    }

    /// Borrowed book
    #[must_use]
    pub fn isbn(&self) -> &str {
        &self.isbn
    }

    /// Borrowing reader
    #[must_use]
    pub fn reader_id(&self) -> &str {
        &self.reader_id
    }

    /// Day the book was lent out
    #[must_use]
    pub fn borrow_date(&self) -> NaiveDate {
        self.borrow_date
    }

    /// Day the book is due back
    #[must_use]
    pub fn due_date(&self) -> NaiveDate {
        self.due_date
    }

    /// Day the book came back, if it has
    #[must_use]
    pub fn return_date(&self) -> Option<NaiveDate> {
        self.return_date
    }

    /// Whether the book has not been returned yet
    #[must_use]
    pub fn is_open(&self) -> bool {
        self.return_date.is_none()
    }

    /// Open and past its due date as of `today`
    #[must_use]
    pub fn is_overdue(&self, today: NaiveDate) -> bool {
        self.is_open() && self.due_date < today
    }

    /// Whether this record belongs to the given book and reader
    #[must_use]
    pub fn matches(&self, isbn: &str, reader_id: &str) -> bool {
        self.isbn == isbn && self.reader_id == reader_id
    }

    /// Mark the book as returned on `today`
    pub(crate) fn close(&mut self, today: NaiveDate) {
        self.return_date = Some(today);
    }

    /// Push the due date back by `extra_days`; `None` on date overflow
    pub(crate) fn extend(&mut self, extra_days: i64) -> Option<NaiveDate> {
        let due = self.due_date.checked_add_signed(TimeDelta::try_days(extra_days)?)?;
        self.due_date = due;
        Some(due)
    }
}

impl PartialEq for Borrowing {
    fn eq(&self, other: &Self) -> bool {
        self.isbn == other.isbn
            && self.reader_id == other.reader_id
            && self.borrow_date == other.borrow_date
    }
}

impl Eq for Borrowing {}

impl Hash for Borrowing {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.isbn.hash(state);
        self.reader_id.hash(state);
        self.borrow_date.hash(state);
    }
}

impl fmt::Display for Borrowing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} -> {} (borrowed {}, due {}",
            self.isbn, self.reader_id, self.borrow_date, self.due_date
        )?;
        match self.return_date {
            Some(returned) => write!(f, ", returned {returned})"),
            None => f.write_str(", open)"),
        }
    }
}
