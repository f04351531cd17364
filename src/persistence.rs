//! Saving and loading the store as a JSON snapshot.
//!
//! Only the primary data is written: books, readers and the ledger. The
//! genre and author indexes are derived state and are left empty by a load;
//! callers rebuild them with [`Library::rebuild_indexes`].

use std::{
    fs::File,
    io::{BufReader, BufWriter, ErrorKind, Write},
    path::Path,
};

use serde::{Deserialize, Serialize};

use crate::{
    book::Book,
    borrowing::Borrowing,
    catalog::Catalog,
    clock::SystemClock,
    error::{LibraryError, Result},
    library::Library,
    reader::Reader,
};

/// Version written into every snapshot
pub const FORMAT_VERSION: u32 = 1;

/// Serialized form of a store, owned data
#[derive(Debug, Deserialize)]
struct Snapshot {
    /// Layout version of this file
    format_version: u32,
    /// Every catalogued book
    books: Vec<Book>,
    /// Every registered reader
    readers: Vec<Reader>,
    /// The full ledger, oldest first
    ledger: Vec<Borrowing>,
}

/// Serialized form of a store, borrowed from a live library
#[derive(Debug, Serialize)]
struct SnapshotRef<'a> {
    /// Layout version of this file
    format_version: u32,
    /// Every catalogued book
    books: Vec<&'a Book>,
    /// Every registered reader
    readers: Vec<&'a Reader>,
    /// The full ledger, oldest first
    ledger: &'a [Borrowing],
}

impl Library {
    /// Write the books, readers and ledger to `path`, replacing the file.
    ///
    /// # Errors
    ///
    /// Returns a `LibraryError::Io` if the file cannot be created or written,
    /// or a `LibraryError::Serialization` if encoding fails. Failures are
    /// also logged.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let result = self.write_snapshot(path);
        match &result {
            Ok(()) => tracing::debug!(path = %path.display(), "library saved"),
            Err(e) => tracing::error!(path = %path.display(), error = %e, "failed to save library"),
        }
        result
    }

    /// Serialize the store to `path`
    fn write_snapshot(&self, path: &Path) -> Result<()> {
        let snapshot = SnapshotRef {
            format_version: FORMAT_VERSION,
            books: self.books().collect(),
            readers: self.readers().collect(),
            ledger: self.ledger(),
        };
        let file = File::create(path).map_err(|e| LibraryError::io(path, e))?;
        let mut writer = BufWriter::new(file);
        serde_json::to_writer_pretty(&mut writer, &snapshot)?;
        writer.flush().map_err(|e| LibraryError::io(path, e))?;
        Ok(())
    }

    /// Load a snapshot from `path`.
    ///
    /// Returns `None` if the file does not exist or cannot be decoded; the
    /// reason is logged. The returned library has empty secondary indexes
    /// until [`Library::rebuild_indexes`] is called.
    #[must_use]
    pub fn load(path: impl AsRef<Path>) -> Option<Self> {
        let path = path.as_ref();
        match Self::try_load(path) {
            Ok(Some(library)) => Some(library),
            Ok(None) => {
                tracing::info!(path = %path.display(), "no saved library found");
                None
            }
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "saved library is unreadable");
                None
            }
        }
    }

    /// Load a snapshot, distinguishing a missing file from a broken one.
    ///
    /// # Errors
    ///
    /// Returns a `LibraryError::Io` if the file exists but cannot be read,
    /// a `LibraryError::Serialization` if it is not a valid snapshot, or a
    /// `LibraryError::UnsupportedFormat` if it was written by another format
    /// version.
    pub fn try_load(path: impl AsRef<Path>) -> Result<Option<Self>> {
        let path = path.as_ref();
        let file = match File::open(path) {
            Ok(file) => file,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(LibraryError::io(path, e)),
        };

        let snapshot: Snapshot = serde_json::from_reader(BufReader::new(file))?;
        if snapshot.format_version != FORMAT_VERSION {
            return Err(LibraryError::UnsupportedFormat {
                found: snapshot.format_version,
                expected: FORMAT_VERSION,
            });
        }

        tracing::debug!(
            path = %path.display(),
            books = snapshot.books.len(),
            readers = snapshot.readers.len(),
            borrowings = snapshot.ledger.len(),
            "library loaded"
        );
        let catalog = Catalog::from_records(snapshot.books, snapshot.readers);
        Ok(Some(Self::from_parts(catalog, snapshot.ledger, Box::new(SystemClock))))
    }
}
