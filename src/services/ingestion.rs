//! Entity creation service
//!
//! New records always start without relationships. A payload that tries to
//! carry `authors`, `publication` or `books` entries is rejected instead of
//! being stored unmirrored; relationships go through `RelationsService`.

use indexmap::IndexSet;
use validator::Validate;

use crate::{
    error::{AppError, AppResult},
    models::{Author, Book, CreateAuthor, CreateBook, CreatePublication, Publication},
    repository::Repository,
};

#[derive(Clone)]
pub struct IngestionService {
    repository: Repository,
}

impl IngestionService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    pub async fn create_book(&self, data: CreateBook) -> AppResult<Book> {
        data.validate()?;

        let isbn = data.isbn.trim();
        if isbn.is_empty() {
            return Err(AppError::Validation("ISBN is required".to_string()));
        }
        if !data.authors.is_empty() || data.publication.is_some() {
            return Err(AppError::Validation(
                "Authors and publication cannot be set when creating a book; attach them once the book exists"
                    .to_string(),
            ));
        }

        let book = Book {
            isbn: isbn.to_string(),
            title: data.title.trim().to_string(),
            categories: normalize_tags(data.categories),
            languages: normalize_tags(data.languages),
            authors: Vec::new(),
            publication: None,
        };

        let created = self.repository.write().await.insert_book(book).await?;
        tracing::info!("Created book {}", created.isbn);
        Ok(created)
    }

    pub async fn create_author(&self, data: CreateAuthor) -> AppResult<Author> {
        data.validate()?;

        let Some(id) = data.id else {
            return Err(AppError::Validation("Author id is required".to_string()));
        };
        if !data.books.is_empty() {
            return Err(AppError::Validation(
                "Books cannot be set when creating an author; attach the author to each book".to_string(),
            ));
        }

        let author = Author {
            id,
            name: data.name.trim().to_string(),
            books: Vec::new(),
        };

        let created = self.repository.write().await.insert_author(author).await?;
        tracing::info!("Created author {}", created.id);
        Ok(created)
    }

    pub async fn create_publication(&self, data: CreatePublication) -> AppResult<Publication> {
        data.validate()?;

        let Some(id) = data.id else {
            return Err(AppError::Validation("Publication id is required".to_string()));
        };
        if !data.books.is_empty() {
            return Err(AppError::Validation(
                "Books cannot be set when creating a publication; attach each book to it".to_string(),
            ));
        }

        let publication = Publication {
            id,
            name: data.name.trim().to_string(),
            books: Vec::new(),
        };

        let created = self
            .repository
            .write()
            .await
            .insert_publication(publication)
            .await?;
        tracing::info!("Created publication {}", created.id);
        Ok(created)
    }
}

/// Trim, drop blanks and deduplicate, keeping first-seen order
fn normalize_tags(tags: Vec<String>) -> Vec<String> {
    tags.into_iter()
        .map(|tag| tag.trim().to_string())
        .filter(|tag| !tag.is_empty())
        .collect::<IndexSet<_>>()
        .into_iter()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service() -> IngestionService {
        IngestionService::new(Repository::in_memory())
    }

    fn book_payload(isbn: &str) -> CreateBook {
        CreateBook {
            isbn: isbn.to_string(),
            title: "Tesla!!!".to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_normalize_tags() {
        let tags = vec![" tech ".to_string(), "space".to_string(), "".to_string(), "tech".to_string()];
        assert_eq!(normalize_tags(tags), vec!["tech", "space"]);
    }

    #[tokio::test]
    async fn test_create_book_starts_without_relationships() {
        let service = service();
        let mut payload = book_payload(" 12345Book ");
        payload.categories = vec!["tech".to_string(), "tech".to_string()];

        let book = service.create_book(payload).await.unwrap();
        assert_eq!(book.isbn, "12345Book");
        assert_eq!(book.categories, vec!["tech"]);
        assert!(book.authors.is_empty());
        assert_eq!(book.publication, None);
    }

    #[tokio::test]
    async fn test_create_book_rejects_duplicate_isbn() {
        let service = service();
        service.create_book(book_payload("001")).await.unwrap();

        let err = service.create_book(book_payload("001")).await.unwrap_err();
        assert!(matches!(err, AppError::DuplicateKey(_)));
    }

    #[tokio::test]
    async fn test_create_book_requires_isbn() {
        let service = service();
        for isbn in ["", "   "] {
            let err = service.create_book(book_payload(isbn)).await.unwrap_err();
            assert!(matches!(err, AppError::Validation(_)), "isbn {:?}", isbn);
        }
    }

    #[tokio::test]
    async fn test_create_book_rejects_embedded_relationships() {
        let service = service();

        let mut with_authors = book_payload("001");
        with_authors.authors = vec![1];
        assert!(matches!(
            service.create_book(with_authors).await,
            Err(AppError::Validation(_))
        ));

        let mut with_publication = book_payload("001");
        with_publication.publication = Some(10);
        assert!(matches!(
            service.create_book(with_publication).await,
            Err(AppError::Validation(_))
        ));

        // nothing was stored by the rejected attempts
        assert!(service.create_book(book_payload("001")).await.is_ok());
    }

    #[tokio::test]
    async fn test_create_author_requires_id() {
        let service = service();
        let err = service
            .create_author(CreateAuthor {
                id: None,
                name: "pavan".to_string(),
                books: vec![],
            })
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[tokio::test]
    async fn test_create_author_and_publication_duplicates() {
        let service = service();
        let author = CreateAuthor {
            id: Some(1),
            name: "pavan".to_string(),
            books: vec![],
        };
        service.create_author(author.clone()).await.unwrap();
        assert!(matches!(
            service.create_author(author).await,
            Err(AppError::DuplicateKey(_))
        ));

        let publication = CreatePublication {
            id: Some(1),
            name: "writex".to_string(),
            books: vec![],
        };
        // ids are per collection
        service.create_publication(publication.clone()).await.unwrap();
        assert!(matches!(
            service.create_publication(publication).await,
            Err(AppError::DuplicateKey(_))
        ));
    }

    #[tokio::test]
    async fn test_create_publication_rejects_embedded_books() {
        let service = service();
        let err = service
            .create_publication(CreatePublication {
                id: Some(1),
                name: "writex".to_string(),
                books: vec!["001".to_string()],
            })
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }
}
