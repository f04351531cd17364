use std::path::PathBuf;

use clap::Parser;
use colored::Colorize;
use library_lending::{
    Book, Genre, Library, LibraryConfig, LibraryReport, Reader, ReaderCategory,
    observers::LendingLogger,
    ordering::{ByAvailability, ByGenreThenTitle, CompositeOrdering},
};
use tracing_subscriber::EnvFilter;

/// Command-line arguments for the lending demo
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// JSON config file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Snapshot file, overrides the config
    #[arg(short, long)]
    data_file: Option<PathBuf>,

    /// Extra `key=value` config overrides
    #[arg(long = "set", value_name = "KEY=VALUE")]
    overrides: Vec<String>,

    /// Ignore any saved snapshot and start from the sample catalog
    #[arg(long)]
    fresh: bool,
}

/// Resolve the effective configuration from file, flags and overrides
fn load_config(args: &Args) -> library_lending::Result<LibraryConfig> {
    let mut config = match &args.config {
        Some(path) => LibraryConfig::from_file(path)?,
        None => LibraryConfig::default(),
    };
    if let Some(path) = &args.data_file {
        config.data_file.clone_from(path);
    }
    for assignment in &args.overrides {
        config.apply_override(assignment)?;
    }
    Ok(config)
}

/// Fill an empty library with a few books and readers
fn seed_library(library: &mut Library) {
    let books = [
        Book::new("978-0-00-000001-1", "The Left Hand of Darkness", Genre::Fiction, 1969)
            .with_author("Ursula K. Le Guin")
            .with_pages(304),
        Book::new("978-0-00-000002-8", "A Brief History of Time", Genre::Science, 1988)
            .with_author("Stephen Hawking")
            .with_pages(212),
        Book::new("978-0-00-000003-5", "The Feynman Lectures", Genre::Science, 1964)
            .with_authors(["Richard Feynman", "Robert Leighton", "Matthew Sands"])
            .with_pages(1552),
        Book::new("978-0-00-000004-2", "SPQR", Genre::History, 2015)
            .with_author("Mary Beard")
            .with_pages(608),
        Book::new("978-0-00-000005-9", "The Dispossessed", Genre::Fiction, 1974)
            .with_author("Ursula K. Le Guin")
            .with_pages(387),
    ];
    for book in books {
        library.add_book(book);
    }

    let readers = [
        Reader::new("R1", "Alice", "alice@example.org", ReaderCategory::Student),
        Reader::new("R2", "Bob", "bob@example.org", ReaderCategory::Teacher),
        Reader::new("R3", "Carol", "carol@example.org", ReaderCategory::Vip),
    ];
    for reader in readers {
        library.add_reader(reader);
    }
}

/// Run the scripted demo session
fn main() -> library_lending::Result<()> {
    let args = Args::parse();
    let config = load_config(&args)?;

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.log_filter))
        .unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).with_target(false).init();

    println!("{}", "Library Lending Demo".green().bold());
    println!("=====================================\n");

    let mut library = match Library::load(&config.data_file) {
        Some(mut loaded) if !args.fresh => {
            println!(
                "Loaded {} books from {}",
                loaded.catalog().book_count(),
                config.data_file.display()
            );
            loaded.rebuild_indexes();
            loaded
        }
        _ => {
            let mut library = Library::new();
            seed_library(&mut library);
            library
        }
    };
    library.register_observer(Box::new(LendingLogger));

    println!("{}", "\nLending a few books...".yellow().bold());
    let days = config.default_loan_days;
    library.borrow("978-0-00-000001-1", "R1", days);
    library.borrow("978-0-00-000003-5", "R2", days);
    if !library.borrow("978-0-00-000001-1", "R3", days) {
        println!("R3 could not borrow 978-0-00-000001-1: it is lent out");
    }
    library.extend_borrowing_period("978-0-00-000003-5", "R2", config.extension_days);
    library.return_book("978-0-00-000001-1", "R1");
    library.borrow("978-0-00-000001-1", "R3", -1);

    let ordering = CompositeOrdering::new().then(ByAvailability).then(ByGenreThenTitle);
    println!("{}", "\nCatalog".yellow().bold());
    println!("{}", LibraryReport::catalog_table(&library, &ordering));
    println!("{}", "Ledger".yellow().bold());
    println!("{}", LibraryReport::ledger_table(&library));
    println!("{}", "Statistics".yellow().bold());
    println!("{}", LibraryReport::rankings(&library, config.ranking_size));

    println!("{}", "Books with two or more authors".yellow().bold());
    let mut cursor = library.books_with_min_authors(2);
    while cursor.has_next() {
        println!("  {}", cursor.try_next()?);
    }

    library.save(&config.data_file)?;
    println!("\n{} {}", "Saved to".green().bold(), config.data_file.display());
    Ok(())
}
