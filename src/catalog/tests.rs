use std::{cell::RefCell, rc::Rc};

use proptest::prelude::*;

use crate::{
    book::BookId,
    catalog::Catalog,
    config::CatalogConfig,
    error::LibraryError,
    filter::BookFilter,
    observers::{CatalogObserver, Operation},
    user::User,
};

/// Observer that records every notification as a string
#[derive(Debug, Default, Clone)]
struct RecordingObserver {
    /// Shared log of received notifications
    events: Rc<RefCell<Vec<String>>>,
}

impl CatalogObserver for RecordingObserver {
    fn on_begin(&self, operation: Operation) {
        self.events.borrow_mut().push(format!("begin {operation}"));
    }

    fn on_end(&self, operation: Operation) {
        self.events.borrow_mut().push(format!("end {operation}"));
    }
}

/// Helper function to set up a catalog with three books
#[allow(clippy::unwrap_used)]
fn setup_test_catalog() -> Catalog {
    let mut catalog = Catalog::new();
    catalog.add("Dune", "Frank Herbert", 1965, &["scifi"]).unwrap();
    catalog.add("Emma", "Jane Austen", 1815, &["classic"]).unwrap();
    catalog.add("Children of Dune", "Frank Herbert", 1976, &["scifi", "sequel"]).unwrap();
    catalog
}

/// Titles yielded by a `find` call
fn titles(catalog: &Catalog, filters: &[BookFilter]) -> Vec<String> {
    catalog.find(filters).map(|book| book.title().to_string()).collect()
}

#[test]
fn test_ids_start_at_zero() {
    let mut catalog = Catalog::new();
    assert_eq!(catalog.add("A", "X", 2000, &[]), Ok(BookId::new(0)));
    assert_eq!(catalog.add("B", "Y", 2001, &[]), Ok(BookId::new(1)));
}

#[test]
fn test_added_book_is_found_by_id() {
    let mut catalog = setup_test_catalog();
    let before = catalog.count();

    let id = catalog.add("Persuasion", "Jane Austen", 1817, &["classic", "drama"]);
    assert_eq!(id, Ok(BookId::new(3)));
    assert_eq!(catalog.count(), before + 1);

    let found: Vec<_> = catalog.find(&[BookFilter::Id(BookId::new(3))]).collect();
    assert_eq!(found.len(), 1);
    let book = found.first().copied();
    assert!(matches!(book, Some(b) if b.title() == "Persuasion"
        && b.author() == "Jane Austen"
        && b.year() == 1817
        && b.is_available()
        && b.categories() == ["classic", "drama"]));
}

#[test]
fn test_disallowed_category_leaves_catalog_unchanged() {
    let mut catalog = setup_test_catalog();

    let result = catalog.add("Clean Architecture", "Uncle Bob", 2012, &["software", "romance"]);
    assert_eq!(result, Err(LibraryError::CategoryUnavailable { category: "romance".to_string() }));
    assert_eq!(catalog.count(), 3);

    // The failed add did not consume an id
    assert_eq!(catalog.add("Refactoring", "Martin Fowler", 1999, &[]), Ok(BookId::new(3)));
}

#[test]
fn test_empty_title_rejected() {
    let mut catalog = Catalog::new();
    assert_eq!(catalog.add("", "X", 2000, &[]), Err(LibraryError::EmptyField { field: "title" }));
    assert_eq!(catalog.add("A", "", 2000, &[]), Err(LibraryError::EmptyField { field: "author" }));
    assert_eq!(catalog.count(), 0);
}

#[test]
fn test_whitespace_title_is_accepted() {
    let mut catalog = Catalog::new();
    assert_eq!(catalog.add(" ", "X", 2000, &[]), Ok(BookId::new(0)));
    assert_eq!(catalog.count(), 1);
    assert!(matches!(catalog.get(BookId::new(0)), Some(book) if book.title() == " "));
}

#[test]
fn test_disallowed_category_reported_before_empty_title() {
    let mut catalog = Catalog::new();
    assert_eq!(
        catalog.add("", "X", 2000, &["romance"]),
        Err(LibraryError::CategoryUnavailable { category: "romance".to_string() })
    );
    assert_eq!(catalog.count(), 0);
}

#[test]
fn test_configured_disallowed_set() {
    let config = CatalogConfig::default().with_disallowed(["horror"]);
    let mut catalog = Catalog::with_config(config.clone());
    assert_eq!(*catalog.config(), config);

    assert!(catalog.add("Emma", "Jane Austen", 1815, &["romance"]).is_ok());
    assert_eq!(
        catalog.add("It", "Stephen King", 1986, &["horror"]),
        Err(LibraryError::CategoryUnavailable { category: "horror".to_string() })
    );
}

#[test]
fn test_empty_filter_list_yields_everything_in_order() {
    let catalog = setup_test_catalog();
    assert_eq!(titles(&catalog, &[]), ["Dune", "Emma", "Children of Dune"]);
}

#[test]
fn test_filters_are_conjunctive() {
    let catalog = setup_test_catalog();

    let herbert = [BookFilter::Author("Frank Herbert".to_string())];
    assert_eq!(titles(&catalog, &herbert), ["Dune", "Children of Dune"]);

    let herbert_1976 = [BookFilter::Author("Frank Herbert".to_string()), BookFilter::Year(1976)];
    assert_eq!(titles(&catalog, &herbert_1976), ["Children of Dune"]);

    let impossible = [BookFilter::Author("Jane Austen".to_string()), BookFilter::Year(1965)];
    assert_eq!(catalog.find(&impossible).count(), 0);
}

#[test]
fn test_find_is_multi_shot() {
    let catalog = setup_test_catalog();
    let filters = [BookFilter::Author("Frank Herbert".to_string())];

    let mut first = catalog.find(&filters);
    assert!(matches!(first.next(), Some(book) if book.title() == "Dune"));

    // A second call starts over regardless of the first traversal
    assert_eq!(catalog.find(&filters).count(), 2);
    assert_eq!(catalog.find(&filters).count(), 2);

    // The partially consumed traversal continues where it stopped
    assert!(matches!(first.next(), Some(book) if book.title() == "Children of Dune"));
    assert!(first.next().is_none());
}

#[test]
fn test_find_is_lazy() {
    let mut catalog = Catalog::new();
    for year in 0..100 {
        assert!(catalog.add("Same", "Author", year, &[]).is_ok());
    }

    let filters = [BookFilter::Title("Same".to_string())];
    let first_five: Vec<i32> = catalog.find(&filters).take(5).map(|book| book.year()).collect();
    assert_eq!(first_five, [0, 1, 2, 3, 4]);

    let last = catalog.find(&filters).next_back();
    assert!(matches!(last, Some(book) if book.year() == 99));
}

#[test]
fn test_count_notifies_observers() {
    let mut catalog = setup_test_catalog();
    let recorder = RecordingObserver::default();
    catalog.register_observer(Box::new(recorder.clone()));

    assert_eq!(catalog.count(), 3);
    assert_eq!(*recorder.events.borrow(), ["begin count", "end count"]);
}

#[test]
fn test_only_count_is_instrumented() {
    let mut catalog = Catalog::new();
    let recorder = RecordingObserver::default();
    catalog.register_observer(Box::new(recorder.clone()));

    assert!(catalog.add("A", "X", 2000, &[]).is_ok());
    assert!(catalog.borrow(BookId::new(0)).is_ok());
    assert_eq!(catalog.is_borrowed(BookId::new(0), false), Ok(true));
    assert_eq!(catalog.find(&[]).count(), 1);
    assert!(recorder.events.borrow().is_empty());
}

#[test]
fn test_borrow_lifecycle() {
    let mut catalog = setup_test_catalog();
    let id = BookId::new(1);

    assert_eq!(catalog.is_borrowed(id, false), Ok(false));
    assert_eq!(catalog.is_borrowed(id, true), Ok(false));

    assert_eq!(catalog.borrow(id), Ok(()));
    assert_eq!(catalog.is_borrowed(id, false), Ok(true));
    assert_eq!(catalog.is_borrowed(id, true), Err(LibraryError::BookNotAvailable { id }));

    // Other books are untouched
    assert_eq!(catalog.is_borrowed(BookId::new(0), false), Ok(false));
    assert!(matches!(catalog.get(id), Some(book) if !book.is_available()));
}

#[test]
fn test_reborrow_is_permissive_by_default() {
    let mut catalog = setup_test_catalog();
    assert_eq!(catalog.borrow(BookId::new(0)), Ok(()));
    assert_eq!(catalog.borrow(BookId::new(0)), Ok(()));
    assert_eq!(catalog.is_borrowed(BookId::new(0), false), Ok(true));
}

#[test]
fn test_strict_borrow_rejects_reborrow() {
    let mut catalog = Catalog::with_config(CatalogConfig::default().with_strict_borrow(true));
    assert!(catalog.add("A", "X", 2000, &[]).is_ok());

    assert_eq!(catalog.borrow(BookId::new(0)), Ok(()));
    assert_eq!(
        catalog.borrow(BookId::new(0)),
        Err(LibraryError::BookNotAvailable { id: BookId::new(0) })
    );
}

#[test]
fn test_unknown_id_not_found() {
    let mut catalog = setup_test_catalog();
    let missing = BookId::new(99);

    assert_eq!(catalog.is_borrowed(missing, false), Err(LibraryError::BookNotFound { id: missing }));
    assert_eq!(catalog.is_borrowed(missing, true), Err(LibraryError::BookNotFound { id: missing }));
    assert_eq!(catalog.borrow(missing), Err(LibraryError::BookNotFound { id: missing }));
    assert!(catalog.get(missing).is_none());
}

#[test]
fn test_users_are_kept() {
    let mut catalog = Catalog::new();
    catalog.add_user(User::new("Ada", "ada@example.org", 1));
    assert_eq!(catalog.users(), [User::new("Ada", "ada@example.org", 1)]);
    assert_eq!(catalog.count(), 0);
}

#[test]
fn test_library_walkthrough() {
    let mut catalog = Catalog::new();

    assert_eq!(catalog.add("A", "X", 2000, &[]), Ok(BookId::new(0)));
    assert_eq!(
        catalog.add("B", "Y", 2001, &["romance"]),
        Err(LibraryError::CategoryUnavailable { category: "romance".to_string() })
    );
    assert_eq!(catalog.count(), 1);

    assert_eq!(catalog.borrow(BookId::new(0)), Ok(()));
    assert_eq!(catalog.is_borrowed(BookId::new(0), false), Ok(true));
    assert_eq!(
        catalog.is_borrowed(BookId::new(0), true),
        Err(LibraryError::BookNotAvailable { id: BookId::new(0) })
    );
    assert_eq!(
        catalog.is_borrowed(BookId::new(99), false),
        Err(LibraryError::BookNotFound { id: BookId::new(99) })
    );
}

proptest! {
    #[test]
    fn failed_adds_do_not_consume_ids(plan in prop::collection::vec(any::<bool>(), 0..40)) {
        let mut catalog = Catalog::new();
        let mut expected: u64 = 0;

        for valid in plan {
            let categories: &[&str] = if valid { &["fiction"] } else { &["fiction", "romance"] };
            match catalog.add("Title", "Author", 2000, categories) {
                Ok(id) => {
                    prop_assert!(valid);
                    prop_assert_eq!(id, BookId::new(expected));
                    expected += 1;
                }
                Err(err) => {
                    prop_assert!(!valid);
                    prop_assert_eq!(
                        err,
                        LibraryError::CategoryUnavailable { category: "romance".to_string() }
                    );
                }
            }
        }

        prop_assert_eq!(catalog.books().len(), usize::try_from(expected).unwrap_or(usize::MAX));
    }

    #[test]
    fn valid_add_is_found_by_id(
        title in "[A-Za-z][A-Za-z ]{0,15}",
        author in "[A-Za-z][A-Za-z .]{0,15}",
        year in -3000i32..3000,
        categories in prop::collection::vec("[a-q]{1,8}", 0..4),
    ) {
        let mut catalog = setup_test_catalog();
        let before = catalog.count();
        let category_refs: Vec<&str> = categories.iter().map(String::as_str).collect();

        let id = catalog.add(&title, &author, year, &category_refs);
        prop_assert!(id.is_ok());
        prop_assert_eq!(catalog.count(), before + 1);

        let filters = id.map(BookFilter::Id).into_iter().collect::<Vec<_>>();
        let found: Vec<_> = catalog.find(&filters).collect();
        prop_assert_eq!(found.len(), 1);
        for book in found {
            prop_assert_eq!(book.title(), title.as_str());
            prop_assert_eq!(book.author(), author.as_str());
            prop_assert_eq!(book.year(), year);
            prop_assert_eq!(book.categories(), categories.as_slice());
            prop_assert!(book.is_available());
        }
    }
}
