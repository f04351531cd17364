//! One-shot filtered cursors over the store.
//!
//! A cursor evaluates its filter once, when it is created, and walks the
//! resulting snapshot. Later changes to the store do not alter what the
//! cursor yields. [`Cursor::remove`] deletes the element most recently
//! yielded from the store itself, through the same path as a direct removal.

use crate::{
    book::{Book, Genre},
    borrowing::Borrowing,
    error::{LibraryError, Result},
    library::Library,
};

/// Elements a cursor can yield, and how to delete one from the store
pub trait CursorItem: Clone {
    /// Remove `self` from `library`; `Ok(false)` if it was already gone
    ///
    /// # Errors
    ///
    /// Returns `LibraryError::RemovalUnsupported` for element types the store
    /// never deletes.
    fn remove_from(&self, library: &mut Library) -> Result<bool>;
}

impl CursorItem for Book {
    fn remove_from(&self, library: &mut Library) -> Result<bool> {
        Ok(library.remove_book(self.isbn()))
    }
}

impl CursorItem for Borrowing {
    fn remove_from(&self, _library: &mut Library) -> Result<bool> {
        Err(LibraryError::RemovalUnsupported("borrowing"))
    }
}

/// Finite, non-restartable walk over a snapshot of matching elements
#[derive(Debug)]
pub struct Cursor<'a, T> {
    /// Store the snapshot was taken from
    library: &'a mut Library,
    /// Elements that matched the filter at creation time
    snapshot: Vec<T>,
    /// Index of the next element to yield
    position: usize,
    /// Index of the element `remove` would delete
    last_yielded: Option<usize>,
}

impl<'a, T: CursorItem> Cursor<'a, T> {
    /// Wrap a snapshot taken from `library`
    fn new(library: &'a mut Library, snapshot: Vec<T>) -> Self {
        Self { library, snapshot, position: 0, last_yielded: None }
    }

    /// Whether `try_next` would yield an element
    #[must_use]
    pub fn has_next(&self) -> bool {
        self.position < self.snapshot.len()
    }

    /// Number of elements not yet yielded
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.snapshot.len().saturating_sub(self.position)
    }

    /// Yield the next element.
    ///
    /// # Errors
    ///
    /// Returns `LibraryError::Exhausted` once every element has been yielded.
    pub fn try_next(&mut self) -> Result<&T> {
        let index = self.position;
        let item = self.snapshot.get(index).ok_or(LibraryError::Exhausted)?;
        self.position = index.saturating_add(1);
        self.last_yielded = Some(index);
        Ok(item)
    }

    /// Delete the most recently yielded element from the store.
    ///
    /// Returns `Ok(false)` if the element had already left the store.
    ///
    /// # Errors
    ///
    /// Returns `LibraryError::NoCurrentElement` if nothing has been yielded
    /// since the last removal, or `LibraryError::RemovalUnsupported` if the
    /// element type cannot be deleted.
    pub fn remove(&mut self) -> Result<bool> {
        let index = self.last_yielded.ok_or(LibraryError::NoCurrentElement)?;
        let item = self.snapshot.get(index).ok_or(LibraryError::NoCurrentElement)?;
        let removed = item.remove_from(self.library)?;
        self.last_yielded = None;
        Ok(removed)
    }

    /// Read access to the underlying store while the cursor is alive
    #[must_use]
    pub fn library(&self) -> &Library {
        &*self.library
    }

    /// The elements not yet yielded
    #[must_use]
    pub fn into_remaining(self) -> Vec<T> {
        self.snapshot.into_iter().skip(self.position).collect()
    }
}

impl Library {
    /// Books of `genre` published in `year`, by ISBN.
    ///
    /// Uses the genre index, so it sees nothing until the indexes have been
    /// rebuilt after a load.
    pub fn books_by_genre_and_year(&mut self, genre: Genre, year: i32) -> Cursor<'_, Book> {
        let snapshot: Vec<Book> = self
            .get_books_by_genre(genre)
            .into_iter()
            .filter(|book| book.year() == year)
            .cloned()
            .collect();
        Cursor::new(self, snapshot)
    }

    /// Books with at least `min_authors` authors, by ISBN
    pub fn books_with_min_authors(&mut self, min_authors: usize) -> Cursor<'_, Book> {
        let snapshot: Vec<Book> =
            self.books().filter(|book| book.authors().len() >= min_authors).cloned().collect();
        Cursor::new(self, snapshot)
    }

    /// Open borrowings past their due date, in ledger order
    pub fn overdue_borrowings(&mut self) -> Cursor<'_, Borrowing> {
        let snapshot: Vec<Borrowing> = self.get_overdue_borrowings().into_iter().cloned().collect();
        Cursor::new(self, snapshot)
    }
}
