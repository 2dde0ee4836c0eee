//! Repository layer: the entity store contract and its access discipline.
//!
//! Every caller reaches the store through [`Repository::read`] or
//! [`Repository::write`]. Writers hold one global lock for the whole of a
//! multi-entity operation, so readers either see all of a cascade or none
//! of it.

pub mod memory;
pub mod seed;

use std::{ops::Deref, sync::Arc};

use async_trait::async_trait;
use tokio::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::{
    error::AppResult,
    models::{
        Author, AuthorField, Book, BookField, Predicate, Publication, PublicationField,
    },
};

/// Persistence primitives for the three catalog collections.
///
/// `find_*` with `None` returns the whole collection in insertion order.
/// `insert_*` fails with `DuplicateKey` when the primary id is taken,
/// `replace_*` fails with `NotFound` when it is absent, and `remove_*`
/// returns the removed record if there was one.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait EntityStore: Send + Sync {
    async fn find_books(&self, predicate: Option<Predicate<BookField>>) -> AppResult<Vec<Book>>;
    async fn get_book(&self, isbn: &str) -> AppResult<Option<Book>>;
    async fn insert_book(&self, book: Book) -> AppResult<Book>;
    async fn replace_book(&self, book: Book) -> AppResult<Book>;
    async fn remove_book(&self, isbn: &str) -> AppResult<Option<Book>>;

    async fn find_authors(&self, predicate: Option<Predicate<AuthorField>>) -> AppResult<Vec<Author>>;
    async fn get_author(&self, id: i32) -> AppResult<Option<Author>>;
    async fn insert_author(&self, author: Author) -> AppResult<Author>;
    async fn replace_author(&self, author: Author) -> AppResult<Author>;
    async fn remove_author(&self, id: i32) -> AppResult<Option<Author>>;

    async fn find_publications(
        &self,
        predicate: Option<Predicate<PublicationField>>,
    ) -> AppResult<Vec<Publication>>;
    async fn get_publication(&self, id: i32) -> AppResult<Option<Publication>>;
    async fn insert_publication(&self, publication: Publication) -> AppResult<Publication>;
    async fn replace_publication(&self, publication: Publication) -> AppResult<Publication>;
    async fn remove_publication(&self, id: i32) -> AppResult<Option<Publication>>;
}

/// Store access held together with the shared or exclusive side of the catalog lock
pub struct StoreGuard<G> {
    store: Arc<dyn EntityStore>,
    _lock: G,
}

impl<G> Deref for StoreGuard<G> {
    type Target = dyn EntityStore;

    fn deref(&self) -> &Self::Target {
        self.store.as_ref()
    }
}

pub type ReadGuard<'a> = StoreGuard<RwLockReadGuard<'a, ()>>;
pub type WriteGuard<'a> = StoreGuard<RwLockWriteGuard<'a, ()>>;

/// Main repository struct holding the entity store
#[derive(Clone)]
pub struct Repository {
    store: Arc<dyn EntityStore>,
    lock: Arc<RwLock<()>>,
}

impl Repository {
    /// Create a new repository over the given store
    pub fn new(store: Arc<dyn EntityStore>) -> Self {
        Self {
            store,
            lock: Arc::new(RwLock::new(())),
        }
    }

    /// Create a repository over an empty in-memory store
    pub fn in_memory() -> Self {
        Self::new(Arc::new(memory::InMemoryStore::new()))
    }

    /// Shared access; any number of readers run together
    pub async fn read(&self) -> ReadGuard<'_> {
        StoreGuard {
            store: self.store.clone(),
            _lock: self.lock.read().await,
        }
    }

    /// Exclusive access for mutations; held for the whole operation
    pub async fn write(&self) -> WriteGuard<'_> {
        StoreGuard {
            store: self.store.clone(),
            _lock: self.lock.write().await,
        }
    }
}
