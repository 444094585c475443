use std::{fmt, iter::FusedIterator, slice};

use crate::{
    book::{Book, BookId, validate_categories, validate_text_fields},
    config::CatalogConfig,
    error::LibraryError,
    filter::{BookFilter, matches_all},
    observers::{CatalogObserver, Operation, OperationLogger},
    user::User,
};

/// In-memory book catalog
///
/// Books are appended in insertion order and never removed. Identities are
/// handed out sequentially starting at 0; a rejected `add` does not consume
/// one.
pub struct Catalog {
    /// Books in insertion order
    books: Vec<Book>,
    /// Registered library members
    users: Vec<User>,
    /// Identity the next successful `add` will assign
    next_id: BookId,
    /// Validation and borrowing rules
    config: CatalogConfig,
    /// Observers notified around instrumented operations
    observers: Vec<Box<dyn CatalogObserver>>,
}

// Manual implementation of Debug for Catalog
impl fmt::Debug for Catalog {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Catalog")
            .field("books", &self.books)
            .field("users", &self.users)
            .field("next_id", &self.next_id)
            .field("config", &self.config)
            .field("observers_count", &self.observers.len())
            .finish()
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::new()
    }
}

impl Catalog {
    /// Create an empty catalog with the default configuration
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(CatalogConfig::default())
    }

    /// Create an empty catalog with the given configuration
    ///
    /// An `OperationLogger` is registered so instrumented operations show
    /// up in the log.
    #[must_use]
    pub fn with_config(config: CatalogConfig) -> Self {
        let mut catalog = Self {
            books: Vec::new(),
            users: Vec::new(),
            next_id: BookId::default(),
            config,
            observers: Vec::new(),
        };
        catalog.register_observer(Box::new(OperationLogger));
        catalog
    }

    /// Register an observer to be notified around instrumented operations
    pub fn register_observer(&mut self, observer: Box<dyn CatalogObserver>) {
        self.observers.push(observer);
    }

    /// Validation and borrowing rules in effect
    #[must_use]
    pub fn config(&self) -> &CatalogConfig {
        &self.config
    }

    /// Add a book and return its assigned id
    ///
    /// # Errors
    ///
    /// Returns `LibraryError::CategoryUnavailable` if any category is
    /// disallowed, otherwise `LibraryError::EmptyField` if the title or author
    /// is empty. The catalog is unchanged on error.
    pub fn add(
        &mut self,
        title: &str,
        author: &str,
        year: i32,
        categories: &[&str],
    ) -> Result<BookId, LibraryError> {
        if let Err(err) = validate_categories(categories, &self.config.disallowed_categories) {
            tracing::warn!(title, error = %err, "Rejected book");
            return Err(err);
        }
        validate_text_fields(title, author)?;

        let id = self.next_id;
        let categories = categories.iter().map(|c| (*c).to_string()).collect();
        self.books.push(Book::new(id, title.to_string(), author.to_string(), year, categories));
        self.next_id = id.next();

        tracing::debug!(%id, title, author, year, "Added book");
        Ok(id)
    }

    /// Number of books held
    ///
    /// Observers are told when the count begins and ends.
    pub fn count(&self) -> usize {
        self.notify_begin(Operation::Count);
        let count = self.books.len();
        self.notify_end(Operation::Count);
        count
    }

    /// Lazily yield the books matching every filter, in insertion order
    ///
    /// Each call starts a fresh traversal; an empty filter list yields every
    /// book.
    #[must_use]
    pub fn find<'f>(&self, filters: &'f [BookFilter]) -> Matches<'_, 'f> {
        Matches { books: self.books.iter(), filters }
    }

    /// Look up a single book by id
    #[must_use]
    pub fn get(&self, id: BookId) -> Option<&Book> {
        let filters = [BookFilter::Id(id)];
        self.find(&filters).next()
    }

    /// Whether the book with `id` is currently borrowed
    ///
    /// # Errors
    ///
    /// Returns `LibraryError::BookNotFound` if no book has `id`, and
    /// `LibraryError::BookNotAvailable` if `fail_if_unavailable` is set and the
    /// book is borrowed.
    pub fn is_borrowed(&self, id: BookId, fail_if_unavailable: bool) -> Result<bool, LibraryError> {
        let book = self.get(id).ok_or(LibraryError::BookNotFound { id })?;

        if fail_if_unavailable && !book.is_available() {
            return Err(LibraryError::BookNotAvailable { id });
        }

        Ok(!book.is_available())
    }

    /// Mark the book with `id` as borrowed
    ///
    /// Borrowing an already borrowed book succeeds unless
    /// `CatalogConfig::strict_borrow` is set.
    ///
    /// # Errors
    ///
    /// Returns `LibraryError::BookNotFound` if no book has `id`, and
    /// `LibraryError::BookNotAvailable` for a repeated borrow under strict
    /// borrowing.
    pub fn borrow(&mut self, id: BookId) -> Result<(), LibraryError> {
        let strict = self.config.strict_borrow;
        let filters = [BookFilter::Id(id)];
        let book = self
            .books
            .iter_mut()
            .find(|book| matches_all(book, &filters))
            .ok_or(LibraryError::BookNotFound { id })?;

        if strict && !book.is_available() {
            return Err(LibraryError::BookNotAvailable { id });
        }

        book.mark_borrowed();
        tracing::debug!(%id, "Borrowed book");
        Ok(())
    }

    /// All books in insertion order
    #[must_use]
    pub fn books(&self) -> &[Book] {
        &self.books
    }

    /// Register a library member
    pub fn add_user(&mut self, user: User) {
        self.users.push(user);
    }

    /// Registered library members
    #[must_use]
    pub fn users(&self) -> &[User] {
        &self.users
    }

    /// Tell every observer that `operation` is starting
    fn notify_begin(&self, operation: Operation) {
        for observer in &self.observers {
            observer.on_begin(operation);
        }
    }

    /// Tell every observer that `operation` has finished
    fn notify_end(&self, operation: Operation) {
        for observer in &self.observers {
            observer.on_end(operation);
        }
    }
}

/// Lazy iterator over the books matching a filter list
///
/// Cloning yields an independent traversal from the current position.
#[derive(Debug, Clone)]
pub struct Matches<'c, 'f> {
    /// Remaining books to test
    books: slice::Iter<'c, Book>,
    /// Filters every yielded book satisfies
    filters: &'f [BookFilter],
}

impl<'c> Iterator for Matches<'c, '_> {
    type Item = &'c Book;

    fn next(&mut self) -> Option<Self::Item> {
        let filters = self.filters;
        self.books.find(|book| matches_all(book, filters))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, self.books.size_hint().1)
    }
}

impl FusedIterator for Matches<'_, '_> {}

impl DoubleEndedIterator for Matches<'_, '_> {
    fn next_back(&mut self) -> Option<Self::Item> {
        let filters = self.filters;
        self.books.rfind(|book| matches_all(book, filters))
    }
}

#[cfg(test)]
mod tests;
