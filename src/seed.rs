//! Random catalog population for demos.

use rand::{Rng, seq::IndexedRandom};

use crate::{book::BookId, catalog::Catalog, error::LibraryError};

/// Number of distinct titles and authors to draw from
const NAME_POOL: usize = 5;
/// Number of distinct categories to draw from
const CATEGORY_POOL: usize = 10;
/// Categories assigned to every seeded book, drawn with replacement
const CATEGORIES_PER_BOOK: usize = 2;

/// Add `count` randomly generated books to `catalog`
///
/// Titles, authors and categories come from small fixed pools
/// (`Title 0`, `Author 3`, `Category 7`, ...) so that filters have
/// something to match. Years fall in `1900..=2025`.
///
/// # Errors
///
/// Returns the catalog's error if a generated book is rejected, which only
/// happens when the configuration disallows one of the pool categories.
pub fn populate<R: Rng + ?Sized>(
    catalog: &mut Catalog,
    rng: &mut R,
    count: usize,
) -> Result<Vec<BookId>, LibraryError> {
    let titles = pool("Title", NAME_POOL);
    let authors = pool("Author", NAME_POOL);
    let categories = pool("Category", CATEGORY_POOL);

    let mut ids = Vec::with_capacity(count);
    for _ in 0..count {
        let title = titles.choose(rng).map_or("Untitled", String::as_str);
        let author = authors.choose(rng).map_or("Anonymous", String::as_str);
        let year = rng.random_range(1900..=2025);
        let picked: Vec<&str> = (0..CATEGORIES_PER_BOOK)
            .filter_map(|_| categories.choose(rng).map(String::as_str))
            .collect();

        ids.push(catalog.add(title, author, year, &picked)?);
    }

    tracing::debug!(count, "Seeded catalog");
    Ok(ids)
}

/// `prefix 0` .. `prefix (size - 1)`
fn pool(prefix: &str, size: usize) -> Vec<String> {
    (0..size).map(|i| format!("{prefix} {i}")).collect()
}
