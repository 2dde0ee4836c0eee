//! Data models for Booky

pub mod author;
pub mod book;
pub mod catalog;
pub mod publication;
pub mod query;

// Re-export commonly used types
pub use author::{Author, AuthorField, CreateAuthor};
pub use book::{Book, BookField, CreateBook};
pub use catalog::{AuthorLink, CatalogSnapshot, PublicationLink, Violation};
pub use publication::{CreatePublication, Publication, PublicationField};
pub use query::{Key, Predicate, Record};
