//! Catalogued books and the genres they are filed under.

use std::{
    collections::BTreeSet,
    fmt,
    hash::{Hash, Hasher},
};

use serde::{Deserialize, Serialize};

/// Closed set of genres a book can be filed under.
///
/// The declaration order is the natural order used by
/// [`ByGenreThenTitle`](crate::ordering::ByGenreThenTitle).
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Deserialize, Serialize,
)]
pub enum Genre {
    /// Novels and short stories
    #[default]
    Fiction,
    /// Essays, journalism and other factual prose
    NonFiction,
    /// Natural and formal sciences
    Science,
    /// History and historical studies
    History,
    /// Biographies and memoirs
    Biography,
    /// Fantasy and speculative fiction
    Fantasy,
    /// Crime and mystery
    Mystery,
    /// Poetry collections
    Poetry,
}

impl Genre {
    /// Every genre, in natural order
    pub const ALL: [Self; 8] = [
        Self::Fiction,
        Self::NonFiction,
        Self::Science,
        Self::History,
        Self::Biography,
        Self::Fantasy,
        Self::Mystery,
        Self::Poetry,
    ];

    /// Get a human-readable label for the genre
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Fiction => "Fiction",
            Self::NonFiction => "Non-fiction",
            Self::Science => "Science",
            Self::History => "History",
            Self::Biography => "Biography",
            Self::Fantasy => "Fantasy",
            Self::Mystery => "Mystery",
            Self::Poetry => "Poetry",
        }
    }
}

impl fmt::Display for Genre {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A catalogued book, identified by its ISBN.
///
/// Equality and hashing only look at the ISBN. The `available` flag is owned
/// by the lending engine and cannot be changed from outside the crate.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Book {
    /// Unique, immutable identifier
    isbn: String,
    /// Title, if the book has one
    title: Option<String>,
    /// Author names
    authors: BTreeSet<String>,
    /// Genre the book is filed under
    genre: Genre,
    /// Year of publication
    year: i32,
    /// Number of pages
    pages: u32,
    /// Whether the book can currently be borrowed
    available: bool,
}

impl Book {
    /// Create an available book with a title and no authors
    #[must_use]
    pub fn new(isbn: impl Into<String>, title: impl Into<String>, genre: Genre, year: i32) -> Self {
        Self {
            isbn: isbn.into(),
            title: Some(title.into()),
            authors: BTreeSet::new(),
            genre,
            year,
            pages: 0,
            available: true,
        }
    }

    /// Add one author
    #[must_use]
    pub fn with_author(mut self, author: impl Into<String>) -> Self {
        self.authors.insert(author.into());
        self
    }

    /// Add several authors
    #[must_use]
    pub fn with_authors<I, S>(mut self, authors: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.authors.extend(authors.into_iter().map(Into::into));
        self
    }

    /// Set the page count
    #[must_use]
    pub fn with_pages(mut self, pages: u32) -> Self {
        self.pages = pages;
        self
    }

    /// Drop the title
    #[must_use]
    pub fn without_title(mut self) -> Self {
        self.title = None;
        self
    }

    /// Unique identifier
    #[must_use]
    pub fn isbn(&self) -> &str {
        &self.isbn
    }

    /// Title, if any
    #[must_use]
    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    /// Author names, sorted
    #[must_use]
    pub fn authors(&self) -> &BTreeSet<String> {
        &self.authors
    }

    /// Genre the book is filed under
    #[must_use]
    pub fn genre(&self) -> Genre {
        self.genre
    }

    /// Year of publication
    #[must_use]
    pub fn year(&self) -> i32 {
        self.year
    }

    /// Page count, zero when unknown
    #[must_use]
    pub fn pages(&self) -> u32 {
        self.pages
    }

    /// Whether no open borrowing exists for this book
    #[must_use]
    pub fn is_available(&self) -> bool {
        self.available
    }

    /// Flip the lending flag
    pub(crate) fn set_available(&mut self, available: bool) {
        self.available = available;
    }
}

impl PartialEq for Book {
    fn eq(&self, other: &Self) -> bool {
        self.isbn == other.isbn
    }
}

impl Eq for Book {}

impl Hash for Book {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.isbn.hash(state);
    }
}

impl fmt::Display for Book {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let title = self.title.as_deref().unwrap_or("<untitled>");
        write!(f, "{title} [{}] ({}, {})", self.isbn, self.genre, self.year)
    }
}
