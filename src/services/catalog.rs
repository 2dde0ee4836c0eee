//! Catalog query service
//!
//! Read-only lookups over the three collections. A lookup that matches
//! nothing returns an empty result; deciding whether that is "not found" is
//! left to the caller.

use crate::{
    error::AppResult,
    models::{
        Author, AuthorField, Book, BookField, CatalogSnapshot, Predicate, Publication,
        PublicationField, Violation,
    },
    repository::Repository,
};

use super::audit;

/// Entity counts reported by the readiness probe
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CatalogCounts {
    pub books: usize,
    pub authors: usize,
    pub publications: usize,
}

#[derive(Clone)]
pub struct CatalogService {
    repository: Repository,
}

impl CatalogService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// Books matching an exact-match or membership predicate (`None` for all)
    pub async fn find_books(&self, predicate: Option<Predicate<BookField>>) -> AppResult<Vec<Book>> {
        tracing::debug!("Book lookup: {:?}", predicate);
        self.repository.read().await.find_books(predicate).await
    }

    pub async fn find_authors(&self, predicate: Option<Predicate<AuthorField>>) -> AppResult<Vec<Author>> {
        tracing::debug!("Author lookup: {:?}", predicate);
        self.repository.read().await.find_authors(predicate).await
    }

    pub async fn find_publications(
        &self,
        predicate: Option<Predicate<PublicationField>>,
    ) -> AppResult<Vec<Publication>> {
        tracing::debug!("Publication lookup: {:?}", predicate);
        self.repository.read().await.find_publications(predicate).await
    }

    pub async fn all_books(&self) -> AppResult<Vec<Book>> {
        self.find_books(None).await
    }

    pub async fn all_authors(&self) -> AppResult<Vec<Author>> {
        self.find_authors(None).await
    }

    pub async fn all_publications(&self) -> AppResult<Vec<Publication>> {
        self.find_publications(None).await
    }

    pub async fn book_by_isbn(&self, isbn: &str) -> AppResult<Option<Book>> {
        Ok(self
            .find_books(Some(Predicate::equals(BookField::Isbn, isbn)))
            .await?
            .into_iter()
            .next())
    }

    pub async fn books_by_category(&self, category: &str) -> AppResult<Vec<Book>> {
        self.find_books(Some(Predicate::contains(BookField::Categories, category)))
            .await
    }

    pub async fn books_by_language(&self, language: &str) -> AppResult<Vec<Book>> {
        self.find_books(Some(Predicate::contains(BookField::Languages, language)))
            .await
    }

    pub async fn books_by_author(&self, author_id: i32) -> AppResult<Vec<Book>> {
        self.find_books(Some(Predicate::contains(BookField::Authors, author_id)))
            .await
    }

    pub async fn books_by_publication(&self, publication_id: i32) -> AppResult<Vec<Book>> {
        self.find_books(Some(Predicate::equals(BookField::Publication, publication_id)))
            .await
    }

    pub async fn author_by_id(&self, id: i32) -> AppResult<Option<Author>> {
        Ok(self
            .find_authors(Some(Predicate::equals(AuthorField::Id, id)))
            .await?
            .into_iter()
            .next())
    }

    pub async fn authors_by_book(&self, isbn: &str) -> AppResult<Vec<Author>> {
        self.find_authors(Some(Predicate::contains(AuthorField::Books, isbn)))
            .await
    }

    pub async fn publication_by_id(&self, id: i32) -> AppResult<Option<Publication>> {
        Ok(self
            .find_publications(Some(Predicate::equals(PublicationField::Id, id)))
            .await?
            .into_iter()
            .next())
    }

    pub async fn publications_by_book(&self, isbn: &str) -> AppResult<Vec<Publication>> {
        self.find_publications(Some(Predicate::contains(PublicationField::Books, isbn)))
            .await
    }

    /// Read every collection under one shared lock
    pub async fn snapshot(&self) -> AppResult<CatalogSnapshot> {
        let store = self.repository.read().await;
        Ok(CatalogSnapshot {
            books: store.find_books(None).await?,
            authors: store.find_authors(None).await?,
            publications: store.find_publications(None).await?,
        })
    }

    pub async fn counts(&self) -> AppResult<CatalogCounts> {
        let snapshot = self.snapshot().await?;
        Ok(CatalogCounts {
            books: snapshot.books.len(),
            authors: snapshot.authors.len(),
            publications: snapshot.publications.len(),
        })
    }

    /// Check every relationship invariant over a consistent snapshot
    pub async fn audit(&self) -> AppResult<Vec<Violation>> {
        let snapshot = self.snapshot().await?;
        Ok(audit::audit(&snapshot))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CreateAuthor, CreateBook, CreatePublication};
    use crate::services::Services;

    async fn seeded() -> Services {
        let services = Services::new(Repository::in_memory());
        for (isbn, categories, languages) in [
            ("001", vec!["tech", "space"], vec!["en"]),
            ("002", vec!["fiction"], vec!["en", "fr"]),
        ] {
            services
                .ingestion
                .create_book(CreateBook {
                    isbn: isbn.to_string(),
                    title: format!("Book {}", isbn),
                    categories: categories.into_iter().map(String::from).collect(),
                    languages: languages.into_iter().map(String::from).collect(),
                    ..Default::default()
                })
                .await
                .unwrap();
        }
        services
            .ingestion
            .create_author(CreateAuthor {
                id: Some(1),
                name: "pavan".to_string(),
                ..Default::default()
            })
            .await
            .unwrap();
        services
            .ingestion
            .create_publication(CreatePublication {
                id: Some(10),
                name: "writex".to_string(),
                ..Default::default()
            })
            .await
            .unwrap();
        services.relations.attach_author_to_book("001", 1).await.unwrap();
        services
            .relations
            .attach_book_to_publication("002", 10)
            .await
            .unwrap();
        services
    }

    #[tokio::test]
    async fn test_exact_match_lookups() {
        let services = seeded().await;
        let catalog = &services.catalog;

        assert_eq!(catalog.book_by_isbn("001").await.unwrap().unwrap().title, "Book 001");
        assert!(catalog.book_by_isbn("404").await.unwrap().is_none());
        assert_eq!(catalog.author_by_id(1).await.unwrap().unwrap().name, "pavan");
        assert!(catalog.publication_by_id(11).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_membership_lookups() {
        let services = seeded().await;
        let catalog = &services.catalog;

        let en: Vec<String> = catalog
            .books_by_language("en")
            .await
            .unwrap()
            .into_iter()
            .map(|b| b.isbn)
            .collect();
        assert_eq!(en, vec!["001", "002"]);
        assert_eq!(catalog.books_by_category("space").await.unwrap().len(), 1);
        assert_eq!(catalog.authors_by_book("001").await.unwrap().len(), 1);
        assert_eq!(catalog.publications_by_book("002").await.unwrap()[0].id, 10);
        assert_eq!(catalog.books_by_author(1).await.unwrap()[0].isbn, "001");
        assert_eq!(catalog.books_by_publication(10).await.unwrap()[0].isbn, "002");
    }

    #[tokio::test]
    async fn test_no_match_is_empty_not_error() {
        let services = seeded().await;
        let catalog = &services.catalog;

        assert!(catalog.books_by_category("cooking").await.unwrap().is_empty());
        assert!(catalog.authors_by_book("404").await.unwrap().is_empty());
        assert!(catalog.publications_by_book("001").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_counts_and_clean_audit() {
        let services = seeded().await;
        let counts = services.catalog.counts().await.unwrap();
        assert_eq!(
            counts,
            CatalogCounts {
                books: 2,
                authors: 1,
                publications: 1
            }
        );
        assert!(services.catalog.audit().await.unwrap().is_empty());
    }
}
