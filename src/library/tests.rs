use proptest::prelude::*;

use crate::{
    book::{Book, Genre},
    borrowing::Borrowing,
    events::LendingEvent,
    fixtures::{day, empty_library, sample_library, today},
    library::Library,
    observers::EventRecorder,
    ordering::ByYearDesc,
    reader::{Reader, ReaderCategory},
};

/// Every book is unavailable exactly when the ledger holds an open record for it
fn assert_availability_invariant(library: &Library) {
    for book in library.books() {
        let open =
            library.ledger().iter().filter(|b| b.is_open() && b.isbn() == book.isbn()).count();
        assert!(open <= 1, "{} has {open} open borrowings", book.isbn());
        assert_eq!(book.is_available(), open == 0, "availability mismatch for {}", book.isbn());
    }
}

/// ISBNs of a list of books
fn isbns<'a>(books: impl IntoIterator<Item = &'a Book>) -> Vec<&'a str> {
    books.into_iter().map(Book::isbn).collect()
}

#[test]
fn test_get_books_by_genre_returns_added_book() {
    let mut library = empty_library();
    assert!(library.add_book(Book::new("A", "Alpha", Genre::Science, 2020)));
    assert_eq!(isbns(library.get_books_by_genre(Genre::Science)), ["A"]);
}

#[test]
fn test_add_reader_rejects_duplicate_id() {
    let mut library = sample_library();
    let impostor = Reader::new("R1", "Other", "o@example.org", ReaderCategory::Regular);
    assert!(!library.add_reader(impostor));
    assert_eq!(library.reader("R1").map(Reader::name), Some("Alice"));
    assert!(library.remove_reader("R1"));
    assert!(!library.remove_reader("R1"));
    assert!(library.reader("R1").is_none());
}

#[test]
fn test_borrow_marks_book_unavailable() {
    let mut library = sample_library();
    assert!(library.borrow("A", "R1", 14));

    assert!(!library.book("A").is_some_and(Book::is_available));
    let record = library.open_borrowing("A");
    assert!(record.is_some_and(|r| r.borrow_date() == today() && r.due_date() == day(2024, 3, 29)));
    assert_eq!(library.ledger().len(), 1);
    assert_availability_invariant(&library);
}

#[test]
fn test_second_borrow_of_lent_book_fails() {
    let mut library = sample_library();
    assert!(library.borrow("A", "R1", 14));
    assert!(!library.borrow("A", "R2", 14));

    assert_eq!(library.current_borrower("A"), Some("R1"));
    assert_eq!(library.ledger().len(), 1);
}

#[test]
fn test_borrow_unknown_book_fails_without_side_effects() {
    let mut library = sample_library();
    assert!(!library.borrow("missing", "R1", 14));
    assert!(library.ledger().is_empty());
}

#[test]
fn test_borrow_with_unrepresentable_due_date_fails() {
    let mut library = sample_library();
    assert!(!library.borrow("A", "R1", i64::MAX));
    assert!(library.book("A").is_some_and(Book::is_available));
    assert!(library.ledger().is_empty());
}

#[test]
fn test_overdue_borrowing_listed_until_returned() {
    let mut library = sample_library();
    assert!(library.borrow("A", "R1", -1));

    let overdue = library.get_overdue_borrowings();
    assert_eq!(overdue.len(), 1);
    let first = overdue.first();
    assert!(first.is_some_and(|r| r.matches("A", "R1") && r.due_date() == day(2024, 3, 14)));

    assert!(library.return_book("A", "R1"));
    assert!(library.get_overdue_borrowings().is_empty());
    assert!(library.book("A").is_some_and(Book::is_available));
    assert_availability_invariant(&library);
}

#[test]
fn test_return_requires_matching_open_borrowing() {
    let mut library = sample_library();
    assert!(!library.return_book("A", "R1"));

    assert!(library.borrow("A", "R1", 7));
    assert!(!library.return_book("A", "R2"));
    assert!(library.return_book("A", "R1"));
    assert!(!library.return_book("A", "R1"));

    let record = library.ledger().first();
    assert!(record.is_some_and(|r| r.return_date() == Some(today())));
}

#[test]
fn test_ledger_keeps_history_across_loans() {
    let mut library = sample_library();
    assert!(library.borrow("A", "R1", 7));
    assert!(library.return_book("A", "R1"));
    assert!(library.borrow("A", "R2", 7));

    assert_eq!(library.ledger().len(), 2);
    assert_eq!(library.current_borrower("A"), Some("R2"));
    assert_eq!(library.borrowings_of_reader("R1").len(), 1);
    assert_availability_invariant(&library);
}

#[test]
fn test_extend_borrowing_period_moves_due_date() {
    let mut library = sample_library();
    assert!(library.borrow("B", "R2", 14));
    assert!(library.extend_borrowing_period("B", "R2", 7));

    assert!(library.open_borrowing("B").is_some_and(|r| r.due_date() == day(2024, 4, 5)));
    assert!(!library.extend_borrowing_period("B", "R3", 7));
    assert!(!library.extend_borrowing_period("missing", "R2", 7));
}

#[test]
fn test_extend_matches_first_record_even_when_closed() {
    let mut library = sample_library();
    assert!(library.borrow("B", "R2", 14));
    assert!(library.return_book("B", "R2"));
    assert!(library.borrow("B", "R2", 14));

    assert!(library.extend_borrowing_period("B", "R2", 3));
    let dues: Vec<_> = library.ledger().iter().map(Borrowing::due_date).collect();
    assert_eq!(dues, [day(2024, 4, 1), day(2024, 3, 29)]);
}

#[test]
fn test_removed_book_excluded_from_indexes() {
    let mut library = empty_library();
    assert!(library.add_book(Book::new("A", "Alpha", Genre::Science, 2020).with_author("X")));
    assert!(library.remove_book("A"));

    assert!(library.get_books_by_genre(Genre::Science).is_empty());
    assert!(library.get_books_by_author("X").is_empty());
    assert!(!library.remove_book("A"));
}

#[test]
fn test_book_re_added_while_lent_stays_unavailable() {
    let mut library = sample_library();
    assert!(library.borrow("A", "R1", 14));
    assert!(library.remove_book("A"));
    assert!(library.add_book(Book::new("A", "Alpha", Genre::Science, 2020)));

    assert!(!library.book("A").is_some_and(Book::is_available));
    assert_availability_invariant(&library);
    assert!(library.return_book("A", "R1"));
    assert!(library.book("A").is_some_and(Book::is_available));
}

#[test]
fn test_observers_receive_successful_mutations_only() {
    let mut library = sample_library();
    let recorder = EventRecorder::new();
    library.register_observer(Box::new(recorder.clone()));

    assert!(library.borrow("A", "R1", 1));
    assert!(!library.borrow("A", "R2", 1));
    assert!(library.return_book("A", "R1"));
    assert!(library.remove_book("C"));

    assert_eq!(
        recorder.events(),
        [
            LendingEvent::Borrowed {
                isbn: "A".into(),
                reader_id: "R1".into(),
                due: day(2024, 3, 16),
            },
            LendingEvent::Returned { isbn: "A".into(), reader_id: "R1".into(), on: today() },
            LendingEvent::BookRemoved("C".into()),
        ]
    );
}

#[test]
fn test_sorted_books_uses_ordering() {
    let library = sample_library();
    let sorted = library.sorted_books(&ByYearDesc);
    assert_eq!(sorted.first().map(|b| b.year()), Some(2020));
    assert_eq!(sorted.last().map(|b| b.isbn()), Some("C"));
}

/// Random lending request against the sample library
#[derive(Debug, Clone)]
enum Request {
    /// Borrow book `isbn` for reader `reader` for `days` days
    Borrow { isbn: usize, reader: usize, days: i64 },
    /// Return book `isbn` held by reader `reader`
    Return { isbn: usize, reader: usize },
    /// Extend the loan of book `isbn` held by `reader`
    Extend { isbn: usize, reader: usize, days: i64 },
}

/// Requests over the sample books plus one unknown ISBN
fn request_strategy() -> impl Strategy<Value = Request> {
    prop_oneof![
        (0usize..5, 0usize..3, -5i64..30)
            .prop_map(|(isbn, reader, days)| Request::Borrow { isbn, reader, days }),
        (0usize..5, 0usize..3).prop_map(|(isbn, reader)| Request::Return { isbn, reader }),
        (0usize..5, 0usize..3, 0i64..10)
            .prop_map(|(isbn, reader, days)| Request::Extend { isbn, reader, days }),
    ]
}

proptest! {
    #[test]
    fn prop_availability_tracks_open_borrowings(
        requests in prop::collection::vec(request_strategy(), 0..60)
    ) {
        const ISBNS: [&str; 5] = ["A", "B", "C", "D", "missing"];
        const READERS: [&str; 3] = ["R1", "R2", "R3"];
        let mut library = sample_library();
        let mut ledger_len = 0;

        for request in requests {
            match request {
                Request::Borrow { isbn, reader, days } => {
                    let (Some(isbn), Some(reader)) = (ISBNS.get(isbn), READERS.get(reader)) else {
                        continue;
                    };
                    library.borrow(isbn, reader, days);
                }
                Request::Return { isbn, reader } => {
                    let (Some(isbn), Some(reader)) = (ISBNS.get(isbn), READERS.get(reader)) else {
                        continue;
                    };
                    library.return_book(isbn, reader);
                }
                Request::Extend { isbn, reader, days } => {
                    let (Some(isbn), Some(reader)) = (ISBNS.get(isbn), READERS.get(reader)) else {
                        continue;
                    };
                    library.extend_borrowing_period(isbn, reader, days);
                }
            }
            assert_availability_invariant(&library);
            prop_assert!(library.ledger().len() >= ledger_len);
            ledger_len = library.ledger().len();
        }
    }
}
