//! Borrow / return / extend transitions over the ledger.
//!
//! A book is either available or lent out. Lending it appends an open
//! [`Borrowing`] to the ledger; returning it closes the first matching open
//! record. None of these operations fail loudly: a rejected request returns
//! `false` and leaves the store untouched.

use chrono::TimeDelta;

use super::Library;
use crate::{borrowing::Borrowing, events::LendingEvent};

impl Library {
    /// Lend `isbn` to `reader_id` for `days` days starting today.
    ///
    /// `days` may be negative, which yields a record that is already overdue.
    /// Returns `false` if the book does not exist or is already lent out.
    pub fn borrow(&mut self, isbn: &str, reader_id: &str, days: i64) -> bool {
        let today = self.today();
        let Some(book) = self.catalog.book_mut(isbn) else {
            tracing::debug!(%isbn, "borrow rejected: unknown book");
            return false;
        };
        if !book.is_available() {
            tracing::debug!(%isbn, %reader_id, "borrow rejected: book already lent out");
            return false;
        }
        let Some(due) = TimeDelta::try_days(days).and_then(|d| today.checked_add_signed(d)) else {
            tracing::warn!(%isbn, days, "borrow rejected: due date out of range");
            return false;
        };

        book.set_available(false);
        self.ledger.push(Borrowing::open(isbn, reader_id, today, due));
        self.notify(&LendingEvent::Borrowed {
            isbn: isbn.to_owned(),
            reader_id: reader_id.to_owned(),
            due,
        });
        true
    }

    /// Close the first open borrowing of `isbn` by `reader_id`.
    ///
    /// Returns `false` if there is no such open borrowing.
    pub fn return_book(&mut self, isbn: &str, reader_id: &str) -> bool {
        let today = self.today();
        let Some(record) =
            self.ledger.iter_mut().find(|b| b.is_open() && b.matches(isbn, reader_id))
        else {
            tracing::debug!(%isbn, %reader_id, "return rejected: no open borrowing");
            return false;
        };

        record.close(today);
        if let Some(book) = self.catalog.book_mut(isbn) {
            book.set_available(true);
        }
        self.notify(&LendingEvent::Returned {
            isbn: isbn.to_owned(),
            reader_id: reader_id.to_owned(),
            on: today,
        });
        true
    }

    /// Push back the due date of the first ledger record for
    /// `(isbn, reader_id)` by `extra_days`.
    ///
    /// The first match is taken whether or not it is still open; extending a
    /// closed record is allowed but logged as a warning.
    pub fn extend_borrowing_period(
        &mut self,
        isbn: &str,
        reader_id: &str,
        extra_days: i64,
    ) -> bool {
        let Some(record) = self.ledger.iter_mut().find(|b| b.matches(isbn, reader_id)) else {
            tracing::debug!(%isbn, %reader_id, "extend rejected: no borrowing");
            return false;
        };
        if !record.is_open() {
            tracing::warn!(%isbn, %reader_id, "extending a borrowing that was already returned");
        }
        let Some(due) = record.extend(extra_days) else {
            tracing::warn!(%isbn, extra_days, "extend rejected: due date out of range");
            return false;
        };

        self.notify(&LendingEvent::Extended {
            isbn: isbn.to_owned(),
            reader_id: reader_id.to_owned(),
            due,
        });
        true
    }

    /// Open borrowings whose due date has passed
    #[must_use]
    pub fn get_overdue_borrowings(&self) -> Vec<&Borrowing> {
        let today = self.today();
        self.ledger.iter().filter(|b| b.is_overdue(today)).collect()
    }

    /// The open borrowing of `isbn`, if it is lent out
    #[must_use]
    pub fn open_borrowing(&self, isbn: &str) -> Option<&Borrowing> {
        self.ledger.iter().find(|b| b.is_open() && b.isbn() == isbn)
    }

    /// Id of the reader currently holding `isbn`
    #[must_use]
    pub fn current_borrower(&self, isbn: &str) -> Option<&str> {
        self.open_borrowing(isbn).map(Borrowing::reader_id)
    }

    /// Every ledger record of one reader, oldest first
    #[must_use]
    pub fn borrowings_of_reader(&self, reader_id: &str) -> Vec<&Borrowing> {
        self.ledger.iter().filter(|b| b.reader_id() == reader_id).collect()
    }
}
