//! In-memory entity store

use std::{borrow::Borrow, hash::Hash};

use async_trait::async_trait;
use indexmap::IndexMap;
use tokio::sync::RwLock;

use super::EntityStore;
use crate::{
    error::{AppError, AppResult},
    models::{
        Author, AuthorField, Book, BookField, CatalogSnapshot, Predicate, Publication,
        PublicationField, Record,
    },
};

/// One collection, keyed by primary id, iterated in insertion order
#[derive(Debug)]
struct Table<R: Record> {
    rows: IndexMap<R::Id, R>,
}

impl<R: Record> Default for Table<R> {
    fn default() -> Self {
        Self { rows: IndexMap::new() }
    }
}

impl<R: Record> Table<R> {
    fn find(&self, predicate: Option<&Predicate<R::Field>>) -> Vec<R> {
        self.rows
            .values()
            .filter(|row| predicate.map_or(true, |p| p.matches(*row)))
            .cloned()
            .collect()
    }

    fn get<Q>(&self, id: &Q) -> Option<R>
    where
        R::Id: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.rows.get(id).cloned()
    }

    fn insert(&mut self, record: R) -> AppResult<R> {
        let id = record.id().clone();
        if self.rows.contains_key(&id) {
            return Err(AppError::DuplicateKey(format!("{} {} already exists", R::KIND, id)));
        }
        self.rows.insert(id, record.clone());
        Ok(record)
    }

    fn replace(&mut self, record: R) -> AppResult<R> {
        match self.rows.get_mut(record.id()) {
            Some(row) => {
                *row = record.clone();
                Ok(record)
            }
            None => Err(AppError::NotFound(format!("{} {} not found", R::KIND, record.id()))),
        }
    }

    fn remove<Q>(&mut self, id: &Q) -> Option<R>
    where
        R::Id: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.rows.shift_remove(id)
    }
}

/// Entity store keeping every collection in process memory
#[derive(Debug, Default)]
pub struct InMemoryStore {
    books: RwLock<Table<Book>>,
    authors: RwLock<Table<Author>>,
    publications: RwLock<Table<Publication>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a store holding the given records. Duplicate primary ids are rejected;
    /// relationship fields are taken as-is.
    pub fn from_snapshot(snapshot: CatalogSnapshot) -> AppResult<Self> {
        let mut books = Table::default();
        for book in snapshot.books {
            books.insert(book)?;
        }
        let mut authors = Table::default();
        for author in snapshot.authors {
            authors.insert(author)?;
        }
        let mut publications = Table::default();
        for publication in snapshot.publications {
            publications.insert(publication)?;
        }

        Ok(Self {
            books: RwLock::new(books),
            authors: RwLock::new(authors),
            publications: RwLock::new(publications),
        })
    }
}

#[async_trait]
impl EntityStore for InMemoryStore {
    async fn find_books(&self, predicate: Option<Predicate<BookField>>) -> AppResult<Vec<Book>> {
        Ok(self.books.read().await.find(predicate.as_ref()))
    }

    async fn get_book(&self, isbn: &str) -> AppResult<Option<Book>> {
        Ok(self.books.read().await.get(isbn))
    }

    async fn insert_book(&self, book: Book) -> AppResult<Book> {
        self.books.write().await.insert(book)
    }

    async fn replace_book(&self, book: Book) -> AppResult<Book> {
        self.books.write().await.replace(book)
    }

    async fn remove_book(&self, isbn: &str) -> AppResult<Option<Book>> {
        Ok(self.books.write().await.remove(isbn))
    }

    async fn find_authors(&self, predicate: Option<Predicate<AuthorField>>) -> AppResult<Vec<Author>> {
        Ok(self.authors.read().await.find(predicate.as_ref()))
    }

    async fn get_author(&self, id: i32) -> AppResult<Option<Author>> {
        Ok(self.authors.read().await.get(&id))
    }

    async fn insert_author(&self, author: Author) -> AppResult<Author> {
        self.authors.write().await.insert(author)
    }

    async fn replace_author(&self, author: Author) -> AppResult<Author> {
        self.authors.write().await.replace(author)
    }

    async fn remove_author(&self, id: i32) -> AppResult<Option<Author>> {
        Ok(self.authors.write().await.remove(&id))
    }

    async fn find_publications(
        &self,
        predicate: Option<Predicate<PublicationField>>,
    ) -> AppResult<Vec<Publication>> {
        Ok(self.publications.read().await.find(predicate.as_ref()))
    }

    async fn get_publication(&self, id: i32) -> AppResult<Option<Publication>> {
        Ok(self.publications.read().await.get(&id))
    }

    async fn insert_publication(&self, publication: Publication) -> AppResult<Publication> {
        self.publications.write().await.insert(publication)
    }

    async fn replace_publication(&self, publication: Publication) -> AppResult<Publication> {
        self.publications.write().await.replace(publication)
    }

    async fn remove_publication(&self, id: i32) -> AppResult<Option<Publication>> {
        Ok(self.publications.write().await.remove(&id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn book(isbn: &str) -> Book {
        Book {
            isbn: isbn.to_string(),
            title: format!("Book {}", isbn),
            categories: vec!["fiction".to_string()],
            languages: vec![],
            authors: vec![],
            publication: None,
        }
    }

    fn author(id: i32, books: &[&str]) -> Author {
        Author {
            id,
            name: format!("Author {}", id),
            books: books.iter().map(|isbn| isbn.to_string()).collect(),
        }
    }

    #[tokio::test]
    async fn test_insert_rejects_duplicate_key() {
        let store = InMemoryStore::new();
        store.insert_book(book("001")).await.unwrap();

        let err = store.insert_book(book("001")).await.unwrap_err();
        assert!(matches!(err, AppError::DuplicateKey(_)));
        assert_eq!(store.find_books(None).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_replace_requires_existing_record() {
        let store = InMemoryStore::new();
        let err = store.replace_author(author(7, &[])).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
        assert!(store.get_author(7).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_remove_keeps_insertion_order() {
        let store = InMemoryStore::new();
        for isbn in ["001", "002", "003"] {
            store.insert_book(book(isbn)).await.unwrap();
        }

        let removed = store.remove_book("002").await.unwrap();
        assert_eq!(removed.map(|b| b.isbn), Some("002".to_string()));
        assert!(store.remove_book("002").await.unwrap().is_none());

        let isbns: Vec<String> = store
            .find_books(None)
            .await
            .unwrap()
            .into_iter()
            .map(|b| b.isbn)
            .collect();
        assert_eq!(isbns, vec!["001", "003"]);
    }

    #[tokio::test]
    async fn test_find_with_membership_predicate() {
        let store = InMemoryStore::new();
        store.insert_author(author(1, &["001", "002"])).await.unwrap();
        store.insert_author(author(2, &["002"])).await.unwrap();
        store.insert_author(author(3, &[])).await.unwrap();

        let found = store
            .find_authors(Some(Predicate::contains(AuthorField::Books, "002")))
            .await
            .unwrap();
        assert_eq!(found.iter().map(|a| a.id).collect::<Vec<_>>(), vec![1, 2]);

        let none = store
            .find_authors(Some(Predicate::contains(AuthorField::Books, "404")))
            .await
            .unwrap();
        assert!(none.is_empty());
    }

    #[test]
    fn test_from_snapshot_rejects_duplicates() {
        let snapshot = CatalogSnapshot {
            books: vec![book("001"), book("001")],
            ..Default::default()
        };
        assert!(matches!(
            InMemoryStore::from_snapshot(snapshot),
            Err(AppError::DuplicateKey(_))
        ));
    }
}
