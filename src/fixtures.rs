//! Shared builders for unit tests.
#![allow(clippy::expect_used)]

use chrono::NaiveDate;

use crate::{
    book::{Book, Genre},
    clock::FixedClock,
    library::Library,
    reader::{Reader, ReaderCategory},
};

/// Build a date, panicking on invalid input
pub(crate) fn day(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("valid test date")
}

/// The date every fixture library considers "today"
pub(crate) fn today() -> NaiveDate {
    day(2024, 3, 15)
}

/// Empty library pinned to [`today`]
pub(crate) fn empty_library() -> Library {
    Library::with_clock(FixedClock(today()))
}

/// Library with four books and three readers:
///
/// - `A`: Science 2020 by X
/// - `B`: Science 2020 by X and Y
/// - `C`: History 1999 by Y, Z and W
/// - `D`: Fiction 2020, untitled, no authors
pub(crate) fn sample_library() -> Library {
    let mut library = empty_library();
    let books = [
        Book::new("A", "Alpha", Genre::Science, 2020).with_author("X"),
        Book::new("B", "beta", Genre::Science, 2020).with_authors(["X", "Y"]),
        Book::new("C", "Gamma", Genre::History, 1999).with_authors(["Y", "Z", "W"]),
        Book::new("D", "ignored", Genre::Fiction, 2020).without_title(),
    ];
    for book in books {
        assert!(library.add_book(book));
    }
    for (id, name, category) in [
        ("R1", "Alice", ReaderCategory::Student),
        ("R2", "Bob", ReaderCategory::Teacher),
        ("R3", "Carol", ReaderCategory::Vip),
    ] {
        let email = format!("{}@example.org", name.to_lowercase());
        assert!(library.add_reader(Reader::new(id, name, email, category)));
    }
    library
}
