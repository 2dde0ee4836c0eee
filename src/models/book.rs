//! Book model and related types

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use super::query::{Key, Record};

/// Book record, keyed by ISBN
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Book {
    /// Primary identifier, immutable once created
    #[serde(alias = "ISBN")]
    pub isbn: String,
    pub title: String,
    /// Category tags
    #[serde(default, alias = "category")]
    pub categories: Vec<String>,
    /// Language tags
    #[serde(default, alias = "language")]
    pub languages: Vec<String>,
    /// Ids of the credited authors, mirrored by `Author::books`
    #[serde(default)]
    pub authors: Vec<i32>,
    /// Publication id, mirrored by `Publication::books`
    #[serde(default)]
    pub publication: Option<i32>,
}

/// Fields a book lookup can target
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BookField {
    Isbn,
    Title,
    Categories,
    Languages,
    Authors,
    Publication,
}

impl Record for Book {
    type Id = String;
    type Field = BookField;

    const KIND: &'static str = "Book";

    fn id(&self) -> &String {
        &self.isbn
    }

    fn field_equals(&self, field: BookField, key: &Key) -> bool {
        match (field, key) {
            (BookField::Isbn, Key::Text(value)) => self.isbn == *value,
            (BookField::Title, Key::Text(value)) => self.title == *value,
            (BookField::Publication, Key::Id(value)) => self.publication == Some(*value),
            _ => false,
        }
    }

    fn field_contains(&self, field: BookField, key: &Key) -> bool {
        match (field, key) {
            (BookField::Categories, Key::Text(value)) => self.categories.contains(value),
            (BookField::Languages, Key::Text(value)) => self.languages.contains(value),
            (BookField::Authors, Key::Id(value)) => self.authors.contains(value),
            _ => false,
        }
    }
}

/// Create book request
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct CreateBook {
    #[serde(default, alias = "ISBN")]
    #[validate(length(min = 1, message = "ISBN is required"))]
    pub isbn: String,
    #[serde(default)]
    #[validate(length(min = 1, message = "Title is required"))]
    pub title: String,
    #[serde(default, alias = "category")]
    pub categories: Vec<String>,
    #[serde(default, alias = "language")]
    pub languages: Vec<String>,
    /// Must be empty: authors are attached through the book's author routes
    #[serde(default)]
    pub authors: Vec<i32>,
    /// Must be unset: publications are attached through the book's publication routes
    #[serde(default)]
    pub publication: Option<i32>,
}
