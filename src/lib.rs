//! In-memory library catalog.
//!
//! This crate keeps a catalog of books with sequential identities,
//! field equality filters and borrow tracking, plus the configuration and
//! observer hooks around it.

pub mod book;
pub mod catalog;
pub mod config;
pub mod error;
pub mod filter;
pub mod observers;
pub mod seed;
pub mod user;

pub use book::{Book, BookId};
pub use catalog::{Catalog, Matches};
pub use config::{CatalogConfig, ConfigError};
pub use error::LibraryError;
pub use filter::{BookFilter, FieldValue, FilterField, FilterParseError};
pub use observers::{CatalogObserver, Operation, OperationLogger};
pub use user::User;
