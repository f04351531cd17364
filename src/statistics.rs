//! Rankings and counts derived from the catalog and the ledger.

use std::collections::{BTreeMap, HashSet};

use crate::{
    book::{Book, Genre},
    borrowing::Borrowing,
    library::Library,
    reader::Reader,
};

/// Count ledger entries per key, then order by count descending.
///
/// Counting into a `BTreeMap` and sorting stably means equal counts end up in
/// ascending key order.
fn rank_by<'a>(
    ledger: &'a [Borrowing],
    key: impl Fn(&'a Borrowing) -> &'a str,
) -> Vec<(&'a str, usize)> {
    let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
    for record in ledger {
        let count = counts.entry(key(record)).or_default();
        *count = count.saturating_add(1);
    }
    let mut ranked: Vec<(&str, usize)> = counts.into_iter().collect();
    ranked.sort_by(|(_, a), (_, b)| b.cmp(a));
    ranked
}

impl Library {
    /// Number of catalogued books per genre, zero counts included
    #[must_use]
    pub fn genre_statistics(&self) -> BTreeMap<Genre, usize> {
        let mut stats: BTreeMap<Genre, usize> = Genre::ALL.iter().map(|g| (*g, 0)).collect();
        for book in self.books() {
            let count = stats.entry(book.genre()).or_default();
            *count = count.saturating_add(1);
        }
        stats
    }

    /// The `n` most borrowed books still in the catalog, with their counts.
    ///
    /// Ties are broken by ISBN.
    #[must_use]
    pub fn top_popular_books(&self, n: usize) -> Vec<(&Book, usize)> {
        rank_by(self.ledger(), Borrowing::isbn)
            .into_iter()
            .filter_map(|(isbn, count)| self.book(isbn).map(|book| (book, count)))
            .take(n)
            .collect()
    }

    /// The `n` readers with the most borrowings, with their counts.
    ///
    /// Ties are broken by reader id. Unregistered reader ids are skipped.
    #[must_use]
    pub fn top_active_readers(&self, n: usize) -> Vec<(&Reader, usize)> {
        rank_by(self.ledger(), Borrowing::reader_id)
            .into_iter()
            .filter_map(|(id, count)| self.reader(id).map(|reader| (reader, count)))
            .take(n)
            .collect()
    }

    /// Registered readers holding at least one overdue book, in the order
    /// they first appear in the ledger
    #[must_use]
    pub fn readers_with_overdue_books(&self) -> Vec<&Reader> {
        let mut seen = HashSet::new();
        self.get_overdue_borrowings()
            .into_iter()
            .filter(|record| seen.insert(record.reader_id()))
            .filter_map(|record| self.reader(record.reader_id()))
            .collect()
    }
}
