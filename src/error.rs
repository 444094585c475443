use thiserror::Error;

use crate::book::BookId;

/// Errors raised by catalog operations
///
/// Every variant is recoverable; the catalog is left untouched when one is
/// returned.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LibraryError {
    /// A book was submitted with a category from the disallowed set
    #[error("Category `{category}` unavailable")]
    CategoryUnavailable { category: String },
    /// No book carries the requested id
    #[error("Book with id `{id}` not found")]
    BookNotFound { id: BookId },
    /// The book exists but is currently borrowed
    #[error("Book with id `{id}` unavailable")]
    BookNotAvailable { id: BookId },
    /// A required text field was empty
    #[error("Book {field} must not be empty")]
    EmptyField { field: &'static str },
}
