//! Primary catalogs and the secondary indexes derived from them.
//!
//! Books are stored by ISBN and readers by id. Two secondary indexes map a
//! genre to the set of ISBNs filed under it and an author name to the ISBNs
//! of the books they wrote. The indexes are never persisted: they are kept
//! in step with every add/remove and can be recomputed from the books alone
//! with [`Catalog::rebuild_indexes`].

use std::collections::{BTreeMap, BTreeSet};

use crate::{
    book::{Book, Genre},
    reader::Reader,
};

/// Books, readers and the indexes over the books
#[derive(Debug, Default)]
pub struct Catalog {
    /// Primary book catalog keyed by ISBN
    books: BTreeMap<String, Book>,
    /// Reader registry keyed by id
    readers: BTreeMap<String, Reader>,
    /// Genre to ISBNs
    by_genre: BTreeMap<Genre, BTreeSet<String>>,
    /// Author name to ISBNs, each bucket sorted by ISBN
    by_author: BTreeMap<String, Vec<String>>,
}

impl Catalog {
    /// Create an empty catalog
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a catalog from raw records without touching the indexes
    pub(crate) fn from_records(books: Vec<Book>, readers: Vec<Reader>) -> Self {
        Self {
            books: books.into_iter().map(|b| (b.isbn().to_owned(), b)).collect(),
            readers: readers.into_iter().map(|r| (r.id().to_owned(), r)).collect(),
            by_genre: BTreeMap::new(),
            by_author: BTreeMap::new(),
        }
    }

    /// Insert a book and index it. Returns `false` if the ISBN is taken.
    pub fn add_book(&mut self, mut book: Book) -> bool {
        if self.books.contains_key(book.isbn()) {
            return false;
        }
        book.set_available(true);
        self.index_book(&book);
        self.books.insert(book.isbn().to_owned(), book);
        true
    }

    /// Remove a book and every index entry pointing at it
    pub fn remove_book(&mut self, isbn: &str) -> Option<Book> {
        let book = self.books.remove(isbn)?;
        self.unindex_book(&book);
        Some(book)
    }

    /// Register a reader. Returns `false` if the id is taken.
    pub fn add_reader(&mut self, reader: Reader) -> bool {
        if self.readers.contains_key(reader.id()) {
            return false;
        }
        self.readers.insert(reader.id().to_owned(), reader);
        true
    }

    /// Unregister a reader; the ledger is not touched
    pub fn remove_reader(&mut self, id: &str) -> Option<Reader> {
        self.readers.remove(id)
    }

    /// Discard both secondary indexes and recompute them from the books
    pub fn rebuild_indexes(&mut self) {
        self.by_genre.clear();
        self.by_author.clear();
        let Self { books, by_genre, by_author, .. } = self;
        for book in books.values() {
            Self::insert_into(by_genre, by_author, book);
        }
    }

    /// Look up a book by ISBN
    #[must_use]
    pub fn book(&self, isbn: &str) -> Option<&Book> {
        self.books.get(isbn)
    }

    /// Mutable access for availability updates
    pub(crate) fn book_mut(&mut self, isbn: &str) -> Option<&mut Book> {
        self.books.get_mut(isbn)
    }

    /// Look up a reader by id
    #[must_use]
    pub fn reader(&self, id: &str) -> Option<&Reader> {
        self.readers.get(id)
    }

    /// All books in ISBN order
    pub fn books(&self) -> impl Iterator<Item = &Book> {
        self.books.values()
    }

    /// All readers in id order
    pub fn readers(&self) -> impl Iterator<Item = &Reader> {
        self.readers.values()
    }

    /// Number of catalogued books
    #[must_use]
    pub fn book_count(&self) -> usize {
        self.books.len()
    }

    /// Number of registered readers
    #[must_use]
    pub fn reader_count(&self) -> usize {
        self.readers.len()
    }

    /// Books filed under `genre`, by ISBN
    #[must_use]
    pub fn books_by_genre(&self, genre: Genre) -> Vec<&Book> {
        self.by_genre
            .get(&genre)
            .map(|isbns| self.resolve(isbns.iter()))
            .unwrap_or_default()
    }

    /// Books listing `author` among their authors, by ISBN
    #[must_use]
    pub fn books_by_author(&self, author: &str) -> Vec<&Book> {
        self.by_author
            .get(author)
            .map(|isbns| self.resolve(isbns.iter()))
            .unwrap_or_default()
    }

    /// Every author that currently has a bucket in the author index
    pub fn authors(&self) -> impl Iterator<Item = &str> {
        self.by_author.keys().map(String::as_str)
    }

    /// Look up indexed ISBNs in the primary catalog
    fn resolve<'a>(&'a self, isbns: impl Iterator<Item = &'a String>) -> Vec<&'a Book> {
        isbns.filter_map(|isbn| self.books.get(isbn)).collect()
    }

    /// Add `book` to both secondary indexes
    fn index_book(&mut self, book: &Book) {
        Self::insert_into(&mut self.by_genre, &mut self.by_author, book);
    }

    /// Add `book` to its genre bucket and to each of its author buckets
    fn insert_into(
        by_genre: &mut BTreeMap<Genre, BTreeSet<String>>,
        by_author: &mut BTreeMap<String, Vec<String>>,
        book: &Book,
    ) {
        by_genre.entry(book.genre()).or_default().insert(book.isbn().to_owned());
        for author in book.authors() {
            let bucket = by_author.entry(author.clone()).or_default();
            let pos = bucket.partition_point(|isbn| isbn.as_str() < book.isbn());
            if bucket.get(pos).is_none_or(|isbn| isbn != book.isbn()) {
                bucket.insert(pos, book.isbn().to_owned());
            }
        }
    }

    /// Drop `book` from every bucket, pruning buckets that become empty
    fn unindex_book(&mut self, book: &Book) {
        if let Some(bucket) = self.by_genre.get_mut(&book.genre()) {
            bucket.remove(book.isbn());
            if bucket.is_empty() {
                self.by_genre.remove(&book.genre());
            }
        }
        for author in book.authors() {
            if let Some(bucket) = self.by_author.get_mut(author) {
                bucket.retain(|isbn| isbn != book.isbn());
                if bucket.is_empty() {
                    self.by_author.remove(author);
                }
            }
        }
    }
}
