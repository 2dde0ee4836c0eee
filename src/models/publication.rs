//! Publication model and related types

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use super::query::{Key, Record};

/// Publication record, keyed by numeric id
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Publication {
    pub id: i32,
    pub name: String,
    /// ISBNs of the books whose `publication` points here
    #[serde(default)]
    pub books: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PublicationField {
    Id,
    Name,
    Books,
}

impl Record for Publication {
    type Id = i32;
    type Field = PublicationField;

    const KIND: &'static str = "Publication";

    fn id(&self) -> &i32 {
        &self.id
    }

    fn field_equals(&self, field: PublicationField, key: &Key) -> bool {
        match (field, key) {
            (PublicationField::Id, Key::Id(value)) => self.id == *value,
            (PublicationField::Name, Key::Text(value)) => self.name == *value,
            _ => false,
        }
    }

    fn field_contains(&self, field: PublicationField, key: &Key) -> bool {
        match (field, key) {
            (PublicationField::Books, Key::Text(value)) => self.books.contains(value),
            _ => false,
        }
    }
}

/// Create publication request
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct CreatePublication {
    #[validate(required(message = "Publication id is required"))]
    pub id: Option<i32>,
    #[serde(default)]
    #[validate(length(min = 1, message = "Name is required"))]
    pub name: String,
    /// Must be empty: books are attached through the book's publication routes
    #[serde(default)]
    pub books: Vec<String>,
}
