//! Equality filters over book fields.
//!
//! A filter list is a conjunction: a book matches when every filter in the
//! list matches, and the empty list matches everything.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::book::{Book, BookId};

/// The book fields a filter can compare against
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FilterField {
    Id,
    Title,
    Author,
    Year,
}

impl FilterField {
    /// All filterable fields
    pub const ALL: [Self; 4] = [Self::Id, Self::Title, Self::Author, Self::Year];

    /// Read this field from a book
    #[must_use]
    pub fn value_of(self, book: &Book) -> FieldValue<'_> {
        match self {
            Self::Id => FieldValue::Id(book.id()),
            Self::Title => FieldValue::Text(book.title()),
            Self::Author => FieldValue::Text(book.author()),
            Self::Year => FieldValue::Year(book.year()),
        }
    }

    /// Lowercase field name
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Id => "id",
            Self::Title => "title",
            Self::Author => "author",
            Self::Year => "year",
        }
    }
}

impl fmt::Display for FilterField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FilterField {
    type Err = FilterParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|field| field.as_str() == s)
            .ok_or_else(|| FilterParseError::UnknownField(s.to_string()))
    }
}

/// A comparable view of a single book field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldValue<'a> {
    Id(BookId),
    Text(&'a str),
    Year(i32),
}

/// A single field/value equality predicate
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(tag = "field", content = "value", rename_all = "lowercase")]
pub enum BookFilter {
    Id(BookId),
    Title(String),
    Author(String),
    Year(i32),
}

impl BookFilter {
    /// The field this filter reads
    #[must_use]
    pub fn field(&self) -> FilterField {
        match self {
            Self::Id(_) => FilterField::Id,
            Self::Title(_) => FilterField::Title,
            Self::Author(_) => FilterField::Author,
            Self::Year(_) => FilterField::Year,
        }
    }

    /// The expected value
    #[must_use]
    pub fn value(&self) -> FieldValue<'_> {
        match self {
            Self::Id(id) => FieldValue::Id(*id),
            Self::Title(title) => FieldValue::Text(title),
            Self::Author(author) => FieldValue::Text(author),
            Self::Year(year) => FieldValue::Year(*year),
        }
    }

    /// Whether `book` satisfies this filter
    #[must_use]
    pub fn matches(&self, book: &Book) -> bool {
        self.field().value_of(book) == self.value()
    }
}

/// Whether `book` satisfies every filter in `filters`
#[must_use]
pub fn matches_all(book: &Book, filters: &[BookFilter]) -> bool {
    filters.iter().all(|filter| filter.matches(book))
}

impl fmt::Display for BookFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Id(id) => write!(f, "id={id}"),
            Self::Title(title) => write!(f, "title={title}"),
            Self::Author(author) => write!(f, "author={author}"),
            Self::Year(year) => write!(f, "year={year}"),
        }
    }
}

/// Errors produced when parsing `field=value` filter text
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FilterParseError {
    #[error("expected `field=value`, got `{0}`")]
    MissingSeparator(String),
    #[error("unknown filter field `{0}`")]
    UnknownField(String),
    #[error("invalid value `{value}` for field `{field}`")]
    InvalidValue { field: FilterField, value: String },
}

impl FromStr for BookFilter {
    type Err = FilterParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (field, value) =
            s.split_once('=').ok_or_else(|| FilterParseError::MissingSeparator(s.to_string()))?;
        let field: FilterField = field.trim().parse()?;
        let invalid = || FilterParseError::InvalidValue { field, value: value.to_string() };

        match field {
            FilterField::Id => value
                .trim()
                .parse::<u64>()
                .map(|raw| Self::Id(BookId::new(raw)))
                .map_err(|_| invalid()),
            FilterField::Title => Ok(Self::Title(value.to_string())),
            FilterField::Author => Ok(Self::Author(value.to_string())),
            FilterField::Year => value.trim().parse().map(Self::Year).map_err(|_| invalid()),
        }
    }
}
