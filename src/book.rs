use std::{collections::BTreeSet, fmt};

use serde::{Deserialize, Serialize};

use crate::error::LibraryError;

/// Sequential identity assigned to a book when it enters the catalog
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Deserialize, Serialize)]
#[serde(transparent)]
pub struct BookId(u64);

impl BookId {
    /// Wrap a raw id
    #[must_use]
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// The raw numeric value
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }

    /// The id following this one
    #[allow(clippy::arithmetic_side_effects)]
    pub(crate) const fn next(self) -> Self {
        Self(self.0 + 1)
    }
}

impl fmt::Display for BookId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A book record owned by the catalog
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Book {
    /// Identity assigned by the catalog
    id: BookId,
    /// Book title
    title: String,
    /// Book author
    author: String,
    /// Publication year
    year: i32,
    /// False while the book is borrowed
    available: bool,
    /// Category labels in submission order
    categories: Vec<String>,
}

impl Book {
    /// Build a book from already validated parts
    pub(crate) fn new(
        id: BookId,
        title: String,
        author: String,
        year: i32,
        categories: Vec<String>,
    ) -> Self {
        Self { id, title, author, year, available: true, categories }
    }

    #[must_use]
    pub fn id(&self) -> BookId {
        self.id
    }

    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    #[must_use]
    pub fn author(&self) -> &str {
        &self.author
    }

    #[must_use]
    pub fn year(&self) -> i32 {
        self.year
    }

    #[must_use]
    pub fn is_available(&self) -> bool {
        self.available
    }

    #[must_use]
    pub fn categories(&self) -> &[String] {
        &self.categories
    }

    /// Mark the book as borrowed
    pub(crate) fn mark_borrowed(&mut self) {
        self.available = false;
    }
}

impl fmt::Display for Book {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "id={} title='{}' author='{}' year={} available={} categories={:?}",
            self.id, self.title, self.author, self.year, self.available, self.categories
        )
    }
}

/// Check every category against the disallowed set
///
/// # Errors
///
/// Returns `LibraryError::CategoryUnavailable` naming the first category
/// found in `disallowed`.
pub fn validate_categories<S: AsRef<str>>(
    categories: &[S],
    disallowed: &BTreeSet<String>,
) -> Result<(), LibraryError> {
    match categories.iter().map(AsRef::as_ref).find(|c| disallowed.contains(*c)) {
        Some(category) => {
            Err(LibraryError::CategoryUnavailable { category: category.to_string() })
        }
        None => Ok(()),
    }
}

/// Reject empty titles and authors
///
/// # Errors
///
/// Returns `LibraryError::EmptyField` naming the empty field.
pub fn validate_text_fields(title: &str, author: &str) -> Result<(), LibraryError> {
    if title.is_empty() {
        return Err(LibraryError::EmptyField { field: "title" });
    }
    if author.is_empty() {
        return Err(LibraryError::EmptyField { field: "author" });
    }
    Ok(())
}
