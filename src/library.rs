//! The lending store and its catalog operations.

use std::fmt;

use chrono::NaiveDate;

use crate::{
    book::{Book, Genre},
    borrowing::Borrowing,
    catalog::Catalog,
    clock::{Clock, SystemClock},
    events::LendingEvent,
    observers::LendingObserver,
    ordering::BookOrdering,
    reader::Reader,
};

mod lending;

/// The whole lending store: catalog, indexes, ledger and clock.
///
/// Every mutation goes through this type so that the secondary indexes and
/// the availability flags never drift from the primary data.
pub struct Library {
    /// Books, readers and their indexes
    catalog: Catalog,
    /// Append-only record of every borrowing
    ledger: Vec<Borrowing>,
    /// Source of today's date
    clock: Box<dyn Clock>,
    /// Registered change observers
    observers: Vec<Box<dyn LendingObserver>>,
}

// Manual implementation of Debug for Library
impl fmt::Debug for Library {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Library")
            .field("catalog", &self.catalog)
            .field("ledger", &self.ledger)
            .field("today", &self.today())
            .field("observers_count", &self.observers.len())
            .finish()
    }
}

impl Default for Library {
    fn default() -> Self {
        Self::new()
    }
}

impl Library {
    /// Create an empty library using the system date
    #[must_use]
    pub fn new() -> Self {
        Self::with_clock(SystemClock)
    }

    /// Create an empty library with a custom clock
    #[must_use]
    pub fn with_clock(clock: impl Clock + 'static) -> Self {
        Self::from_parts(Catalog::new(), Vec::new(), Box::new(clock))
    }

    /// Assemble a library from loaded records
    pub(crate) fn from_parts(
        catalog: Catalog,
        ledger: Vec<Borrowing>,
        clock: Box<dyn Clock>,
    ) -> Self {
        Self { catalog, ledger, clock, observers: Vec::new() }
    }

    /// Replace the clock, e.g. after loading a snapshot in a test
    pub fn set_clock(&mut self, clock: impl Clock + 'static) {
        self.clock = Box::new(clock);
    }

    /// Current date according to the clock
    #[must_use]
    pub fn today(&self) -> NaiveDate {
        self.clock.today()
    }

    /// Register an observer to be notified of successful mutations
    pub fn register_observer(&mut self, observer: Box<dyn LendingObserver>) {
        self.observers.push(observer);
    }

    /// Forward `event` to every observer
    fn notify(&self, event: &LendingEvent) {
        for observer in &self.observers {
            observer.on_event(event);
        }
    }

    /// Read-only view of books, readers and indexes
    #[must_use]
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Add a book to the catalog and its indexes.
    ///
    /// Returns `false` if a book with the same ISBN exists.
    pub fn add_book(&mut self, book: Book) -> bool {
        let isbn = book.isbn().to_owned();
        if !self.catalog.add_book(book) {
            tracing::debug!(%isbn, "duplicate isbn rejected");
            return false;
        }
        // A book removed while lent out and added again is still lent out.
        if self.open_borrowing(&isbn).is_some() {
            if let Some(book) = self.catalog.book_mut(&isbn) {
                book.set_available(false);
            }
        }
        self.notify(&LendingEvent::BookAdded(isbn));
        true
    }

    /// Remove a book from the catalog and every index.
    ///
    /// Returns `false` if no such book exists. The ledger keeps its records.
    pub fn remove_book(&mut self, isbn: &str) -> bool {
        if self.catalog.remove_book(isbn).is_none() {
            return false;
        }
        self.notify(&LendingEvent::BookRemoved(isbn.to_owned()));
        true
    }

    /// Register a reader; `false` if the id is taken
    pub fn add_reader(&mut self, reader: Reader) -> bool {
        let id = reader.id().to_owned();
        if !self.catalog.add_reader(reader) {
            tracing::debug!(reader_id = %id, "duplicate reader rejected");
            return false;
        }
        self.notify(&LendingEvent::ReaderAdded(id));
        true
    }

    /// Unregister a reader; `false` if unknown
    pub fn remove_reader(&mut self, id: &str) -> bool {
        if self.catalog.remove_reader(id).is_none() {
            return false;
        }
        self.notify(&LendingEvent::ReaderRemoved(id.to_owned()));
        true
    }

    /// Recompute the genre and author indexes from the book catalog.
    ///
    /// Must be called after [`Library::load`](crate::Library::load) before
    /// querying by genre or author.
    pub fn rebuild_indexes(&mut self) {
        self.catalog.rebuild_indexes();
        tracing::debug!(books = self.catalog.book_count(), "secondary indexes rebuilt");
    }

    /// Look up a book by ISBN
    #[must_use]
    pub fn book(&self, isbn: &str) -> Option<&Book> {
        self.catalog.book(isbn)
    }

    /// Look up a reader by id
    #[must_use]
    pub fn reader(&self, id: &str) -> Option<&Reader> {
        self.catalog.reader(id)
    }

    /// All books in ISBN order
    pub fn books(&self) -> impl Iterator<Item = &Book> {
        self.catalog.books()
    }

    /// All readers in id order
    pub fn readers(&self) -> impl Iterator<Item = &Reader> {
        self.catalog.readers()
    }

    /// Books of `genre` via the genre index
    #[must_use]
    pub fn get_books_by_genre(&self, genre: Genre) -> Vec<&Book> {
        self.catalog.books_by_genre(genre)
    }

    /// Books by `author` via the author index
    #[must_use]
    pub fn get_books_by_author(&self, author: &str) -> Vec<&Book> {
        self.catalog.books_by_author(author)
    }

    /// Every borrowing ever made, oldest first
    #[must_use]
    pub fn ledger(&self) -> &[Borrowing] {
        &self.ledger
    }

    /// All books, stably sorted by `ordering`
    #[must_use]
    pub fn sorted_books(&self, ordering: &dyn BookOrdering) -> Vec<&Book> {
        let mut books: Vec<&Book> = self.catalog.books().collect();
        books.sort_by(|a, b| ordering.compare(a, b));
        books
    }
}

#[cfg(test)]
mod tests;
