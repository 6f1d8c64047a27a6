//! Business logic for the catalog, free of any HTTP concerns.
//!
//! Each service module exposes async functions over a `DatabaseConnection`:
//! plain lookups plus the guarded write commands that enforce the catalog
//! invariants (isbn uniqueness, publisher name uniqueness, cascade of the
//! detail record, delete-blocking of publishers with books).

pub mod book_service;
pub mod publisher_service;

use std::fmt;

/// Error type for service operations.
#[derive(Debug)]
pub enum ServiceError {
    /// An entity could not be found by the given key.
    NotFound {
        entity: &'static str,
        key: &'static str,
        value: String,
    },
    /// A uniqueness or dependency invariant was violated.
    Conflict(ConflictKind),
    /// Malformed input rejected before touching the store.
    Validation(String),
    /// Database/persistence error.
    Database(String),
}

#[derive(Debug)]
pub enum ConflictKind {
    DuplicateIsbn(String),
    DuplicatePublisherName(String),
    PublisherHasBooks { id: i32, count: u64 },
}

impl fmt::Display for ServiceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ServiceError::NotFound { entity, key, value } => {
                write!(f, "{} not found with {}: {}", entity, key, value)
            }
            ServiceError::Conflict(ConflictKind::DuplicateIsbn(isbn)) => {
                write!(f, "Book with ISBN {} already exists", isbn)
            }
            ServiceError::Conflict(ConflictKind::DuplicatePublisherName(name)) => {
                write!(f, "Publisher with name {} already exists", name)
            }
            ServiceError::Conflict(ConflictKind::PublisherHasBooks { id, count }) => {
                write!(
                    f,
                    "Cannot delete publisher {}: {} book(s) still reference it",
                    id, count
                )
            }
            ServiceError::Validation(msg) => write!(f, "Validation error: {}", msg),
            ServiceError::Database(msg) => write!(f, "Database error: {}", msg),
        }
    }
}

impl std::error::Error for ServiceError {}

impl From<sea_orm::DbErr> for ServiceError {
    fn from(e: sea_orm::DbErr) -> Self {
        ServiceError::Database(e.to_string())
    }
}

/// The unique index on `books.isbn` is the authoritative guard; when a write
/// loses the race against the pre-check, the constraint violation from the
/// store is surfaced as the same conflict the pre-check would have produced.
pub(crate) fn map_isbn_conflict(e: sea_orm::DbErr, isbn: &str) -> ServiceError {
    if e.to_string().contains("UNIQUE constraint failed: books.isbn") {
        ServiceError::Conflict(ConflictKind::DuplicateIsbn(isbn.to_string()))
    } else {
        e.into()
    }
}

/// Same treatment for `publishers.name`.
pub(crate) fn map_publisher_name_conflict(e: sea_orm::DbErr, name: &str) -> ServiceError {
    if e.to_string().contains("UNIQUE constraint failed: publishers.name") {
        ServiceError::Conflict(ConflictKind::DuplicatePublisherName(name.to_string()))
    } else {
        e.into()
    }
}
