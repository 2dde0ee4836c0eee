//! Author model and related types

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use super::query::{Key, Record};

/// Author record, keyed by numeric id
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Author {
    pub id: i32,
    pub name: String,
    /// ISBNs of the books the author is credited on, mirrored by `Book::authors`
    #[serde(default)]
    pub books: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthorField {
    Id,
    Name,
    Books,
}

impl Record for Author {
    type Id = i32;
    type Field = AuthorField;

    const KIND: &'static str = "Author";

    fn id(&self) -> &i32 {
        &self.id
    }

    fn field_equals(&self, field: AuthorField, key: &Key) -> bool {
        match (field, key) {
            (AuthorField::Id, Key::Id(value)) => self.id == *value,
            (AuthorField::Name, Key::Text(value)) => self.name == *value,
            _ => false,
        }
    }

    fn field_contains(&self, field: AuthorField, key: &Key) -> bool {
        match (field, key) {
            (AuthorField::Books, Key::Text(value)) => self.books.contains(value),
            _ => false,
        }
    }
}

/// Create author request
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct CreateAuthor {
    #[validate(required(message = "Author id is required"))]
    pub id: Option<i32>,
    #[serde(default)]
    #[validate(length(min = 1, message = "Name is required"))]
    pub name: String,
    /// Must be empty: books are attached through the book's author routes
    #[serde(default)]
    pub books: Vec<String>,
}
