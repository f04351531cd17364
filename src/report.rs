//! Markdown and plain-text renderings of the store.

use crate::{book::Book, borrowing::Borrowing, library::Library, ordering::BookOrdering};

/// Plain-text renderings of the store
#[derive(Debug)]
pub struct LibraryReport;

impl LibraryReport {
    /// Markdown table of every book, sorted by `ordering`
    #[must_use]
    pub fn catalog_table(library: &Library, ordering: &dyn BookOrdering) -> String {
        let books = library.sorted_books(ordering);
        if books.is_empty() {
            return "The catalog is empty.".to_string();
        }

        let mut table = String::from("| ISBN | Title | Authors | Genre | Year | Status |\n");
        table.push_str("|------|-------|---------|-------|------|--------|\n");
        for book in books {
            table.push_str(&format!(
                "| {} | {} | {} | {} | {} | {} |\n",
                book.isbn(),
                book.title().unwrap_or("-"),
                Self::format_authors(book),
                book.genre(),
                book.year(),
                Self::format_status(library, book)
            ));
        }
        table
    }

    /// Markdown table of ledger records, oldest first
    #[must_use]
    #[allow(clippy::arithmetic_side_effects)]
    pub fn ledger_table(library: &Library) -> String {
        let ledger = library.ledger();
        if ledger.is_empty() {
            return "No borrowings recorded yet.".to_string();
        }

        let today = library.today();
        let mut table = String::from("| # | ISBN | Reader | Borrowed | Due | Returned |\n");
        table.push_str("|---|------|--------|----------|-----|----------|\n");
        for (i, record) in ledger.iter().enumerate() {
            table.push_str(&format!(
                "| {} | {} | {} | {} | {}{} | {} |\n",
                i + 1,
                record.isbn(),
                record.reader_id(),
                record.borrow_date(),
                record.due_date(),
                if record.is_overdue(today) { " (overdue)" } else { "" },
                Self::format_return(record)
            ));
        }
        table
    }

    /// Genre counts followed by the top `n` books and readers
    #[must_use]
    #[allow(clippy::arithmetic_side_effects)]
    pub fn rankings(library: &Library, n: usize) -> String {
        let mut out = String::from("Books per genre:\n");
        for (genre, count) in library.genre_statistics() {
            out.push_str(&format!("  {genre}: {count}\n"));
        }

        out.push_str(&format!("Top {n} books:\n"));
        for (rank, (book, count)) in library.top_popular_books(n).into_iter().enumerate() {
            out.push_str(&format!("  {}. {book} - {count} loans\n", rank + 1));
        }

        out.push_str(&format!("Top {n} readers:\n"));
        for (rank, (reader, count)) in library.top_active_readers(n).into_iter().enumerate() {
            out.push_str(&format!("  {}. {} - {count} loans\n", rank + 1, reader.name()));
        }

        let overdue = library.readers_with_overdue_books();
        if !overdue.is_empty() {
            out.push_str("Readers with overdue books:\n");
            for reader in overdue {
                out.push_str(&format!("  {reader}\n"));
            }
        }
        out
    }

    /// Comma-separated author list
    fn format_authors(book: &Book) -> String {
        if book.authors().is_empty() {
            return "-".to_string();
        }
        book.authors().iter().map(String::as_str).collect::<Vec<_>>().join(", ")
    }

    /// "available" or "lent to <reader>"
    fn format_status(library: &Library, book: &Book) -> String {
        match library.current_borrower(book.isbn()) {
            Some(reader_id) if !book.is_available() => format!("lent to {reader_id}"),
            _ if book.is_available() => "available".to_string(),
            _ => "lent out".to_string(),
        }
    }

    /// Return date or a dash while open
    fn format_return(record: &Borrowing) -> String {
        record.return_date().map_or_else(|| "-".to_string(), |d| d.to_string())
    }
}
