//! Cross-entity views: relationship results, whole-catalog snapshots and
//! consistency findings.

use std::fmt;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::{author::Author, book::Book, publication::Publication};

/// Both sides of a book/author relationship after an attach or detach
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct AuthorLink {
    pub book: Book,
    pub author: Author,
}

/// Both sides of a book/publication relationship after an attach or detach
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct PublicationLink {
    pub book: Book,
    pub publication: Publication,
}

/// Every record of every collection, as read in one consistent view.
/// Also the layout of the seed file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogSnapshot {
    #[serde(default)]
    pub books: Vec<Book>,
    #[serde(default, alias = "author")]
    pub authors: Vec<Author>,
    #[serde(default, alias = "publication")]
    pub publications: Vec<Publication>,
}

/// A broken relationship invariant found by the catalog audit
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Violation {
    /// A book lists an author that does not list the book back
    AuthorMirror { isbn: String, author_id: i32 },
    /// An author lists a book that does not list the author back
    BookMirror { author_id: i32, isbn: String },
    /// A book points at a publication that does not list it
    PublicationMirror { isbn: String, publication_id: i32 },
    /// A publication lists a book that points somewhere else
    PublicationMembership { publication_id: i32, isbn: String },
    /// A relationship entry names an entity that does not exist
    Dangling { owner: String, reference: String },
    /// A relationship sequence holds the same entry more than once
    Duplicate { owner: String, reference: String },
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Violation::AuthorMirror { isbn, author_id } => {
                write!(f, "book {} lists author {} which does not list it back", isbn, author_id)
            }
            Violation::BookMirror { author_id, isbn } => {
                write!(f, "author {} lists book {} which does not list it back", author_id, isbn)
            }
            Violation::PublicationMirror { isbn, publication_id } => write!(
                f,
                "book {} points at publication {} which does not list it",
                isbn, publication_id
            ),
            Violation::PublicationMembership { publication_id, isbn } => write!(
                f,
                "publication {} lists book {} which points elsewhere",
                publication_id, isbn
            ),
            Violation::Dangling { owner, reference } => {
                write!(f, "{} references missing {}", owner, reference)
            }
            Violation::Duplicate { owner, reference } => {
                write!(f, "{} lists {} more than once", owner, reference)
            }
        }
    }
}
