use std::{error::Error, path::PathBuf, process::ExitCode};

use clap::Parser;
use colored::Colorize;
use library_catalog::{BookFilter, BookId, Catalog, CatalogConfig, LibraryError, seed};
use rand::{SeedableRng, rngs::StdRng};
use tracing_subscriber::EnvFilter;

/// Command-line arguments for the library catalog demo
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Number of random books to seed the catalog with
    #[arg(short, long, default_value_t = 30)]
    books: usize,

    /// Seed for the random generator (random when omitted)
    #[arg(short, long)]
    seed: Option<u64>,

    /// JSON file with the catalog configuration
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Filter as `field=value`; repeat to combine
    #[arg(short, long = "filter", default_value = "author=Author 1")]
    filters: Vec<BookFilter>,

    /// Print found books as JSON
    #[arg(long)]
    json: bool,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();
    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!(error = %err, "Demo failed");
            ExitCode::FAILURE
        }
    }
}

/// Walk through every catalog operation
fn run(args: &Args) -> Result<(), Box<dyn Error>> {
    let config = match &args.config {
        Some(path) => CatalogConfig::from_json_file(path)?,
        None => CatalogConfig::default(),
    };
    let mut catalog = Catalog::with_config(config);
    let mut rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };

    println!("{}", "Library Catalog Demonstration".green().bold());
    println!("=====================================\n");

    let disallowed: Vec<&str> =
        catalog.config().disallowed_categories.iter().map(String::as_str).collect();
    println!("Disallowed categories: {}", disallowed.join(", "));

    let ids = seed::populate(&mut catalog, &mut rng, args.books)?;
    println!("Total books: {}", catalog.count());

    // A disallowed category is rejected without touching the catalog
    match catalog.add("Clean Architecture", "Uncle Bob", 2012, &["romance"]) {
        Ok(id) => println!("Added book {id}"),
        Err(err @ LibraryError::CategoryUnavailable { .. }) => println!("{}", err.to_string().red()),
        Err(err) => return Err(err.into()),
    }

    println!("\n{}", "Find books".yellow().bold());
    let filter_text: Vec<String> = args.filters.iter().map(ToString::to_string).collect();
    println!("Filters: {}", filter_text.join(", "));
    for book in catalog.find(&args.filters) {
        if args.json {
            println!("{}", serde_json::to_string(book)?);
        } else {
            println!("Found book: {book}");
        }
    }

    let Some(&target) = ids.first() else {
        println!("\nCatalog is empty, nothing to borrow");
        return Ok(());
    };

    println!("\n{}", "Borrow a book".yellow().bold());
    borrow_walkthrough(&mut catalog, target)
}

/// Show the borrow state of `id` before and after borrowing it
fn borrow_walkthrough(catalog: &mut Catalog, id: BookId) -> Result<(), Box<dyn Error>> {
    println!("Book {id} borrowed: {}", catalog.is_borrowed(id, false)?);
    catalog.borrow(id)?;
    println!("Book {id} borrowed: {}", catalog.is_borrowed(id, false)?);

    match catalog.is_borrowed(id, true) {
        Ok(borrowed) => println!("Book {id} borrowed: {borrowed}"),
        Err(err) => println!("{}", err.to_string().red()),
    }

    let missing = BookId::new(u64::MAX);
    if let Err(err) = catalog.is_borrowed(missing, false) {
        println!("{}", err.to_string().red());
    }

    Ok(())
}
