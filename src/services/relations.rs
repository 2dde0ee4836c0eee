//! Relationship maintenance service
//!
//! Owns every mutation of `Book::authors`, `Author::books`,
//! `Book::publication` and `Publication::books`, and every delete that has to
//! clean up references to the removed entity.
//!
//! # Invariants
//! - `author.id ∈ book.authors ⇔ book.isbn ∈ author.books`, without duplicates.
//! - `book.publication == Some(p.id) ⇔ book.isbn ∈ p.books`.
//!
//! Each operation runs under the repository write lock. Existence checks and
//! all reads happen before the first write, so a failed precondition changes
//! nothing. If a write fails after another write of the same operation was
//! applied, the error is reported as `AppError::Integrity`.

use crate::{
    error::{AppError, AppResult},
    models::{
        Author, AuthorField, AuthorLink, Book, BookField, Predicate, Publication,
        PublicationField, PublicationLink,
    },
    repository::Repository,
};

#[derive(Clone)]
pub struct RelationsService {
    repository: Repository,
}

impl RelationsService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// Bind a book to a publication, releasing it from any previous publication
    pub async fn attach_book_to_publication(
        &self,
        isbn: &str,
        publication_id: i32,
    ) -> AppResult<PublicationLink> {
        let store = self.repository.write().await;
        let mut book = store.get_book(isbn).await?.ok_or_else(|| book_not_found(isbn))?;
        let mut publication = store
            .get_publication(publication_id)
            .await?
            .ok_or_else(|| publication_not_found(publication_id))?;

        let previous = match book.publication {
            Some(previous_id) if previous_id != publication_id => {
                store.get_publication(previous_id).await?
            }
            _ => None,
        };

        let mut writes = WriteLog::new("attach_book_to_publication");

        if let Some(mut previous) = previous {
            if remove_all(&mut previous.books, isbn) {
                tracing::info!("Releasing book {} from publication {}", isbn, previous.id);
                writes.record(store.replace_publication(previous).await)?;
            }
        }
        if book.publication != Some(publication_id) {
            book.publication = Some(publication_id);
            book = writes.record(store.replace_book(book).await)?;
        }
        if push_unique(&mut publication.books, isbn.to_string()) {
            publication = writes.record(store.replace_publication(publication).await)?;
        }

        tracing::info!("Book {} attached to publication {}", isbn, publication_id);
        Ok(PublicationLink { book, publication })
    }

    /// Unbind a book from a publication; a no-op when they are not linked
    pub async fn detach_book_from_publication(
        &self,
        isbn: &str,
        publication_id: i32,
    ) -> AppResult<PublicationLink> {
        let store = self.repository.write().await;
        let mut book = store.get_book(isbn).await?.ok_or_else(|| book_not_found(isbn))?;
        let mut publication = store
            .get_publication(publication_id)
            .await?
            .ok_or_else(|| publication_not_found(publication_id))?;

        let mut writes = WriteLog::new("detach_book_from_publication");

        if book.publication == Some(publication_id) {
            book.publication = None;
            book = writes.record(store.replace_book(book).await)?;
        }
        if remove_all(&mut publication.books, isbn) {
            publication = writes.record(store.replace_publication(publication).await)?;
        }

        if writes.is_empty() {
            tracing::debug!("Book {} was not linked to publication {}", isbn, publication_id);
        } else {
            tracing::info!("Book {} detached from publication {}", isbn, publication_id);
        }
        Ok(PublicationLink { book, publication })
    }

    /// Credit an author on a book, on both sides
    pub async fn attach_author_to_book(&self, isbn: &str, author_id: i32) -> AppResult<AuthorLink> {
        let store = self.repository.write().await;
        let mut book = store.get_book(isbn).await?.ok_or_else(|| book_not_found(isbn))?;
        let mut author = store
            .get_author(author_id)
            .await?
            .ok_or_else(|| author_not_found(author_id))?;

        let mut writes = WriteLog::new("attach_author_to_book");

        if push_unique(&mut book.authors, author_id) {
            book = writes.record(store.replace_book(book).await)?;
        }
        if push_unique(&mut author.books, isbn.to_string()) {
            author = writes.record(store.replace_author(author).await)?;
        }

        tracing::info!("Author {} attached to book {}", author_id, isbn);
        Ok(AuthorLink { book, author })
    }

    /// Remove an author credit from a book, on both sides; a no-op when not linked
    pub async fn detach_book_from_author(&self, isbn: &str, author_id: i32) -> AppResult<AuthorLink> {
        let store = self.repository.write().await;
        let mut book = store.get_book(isbn).await?.ok_or_else(|| book_not_found(isbn))?;
        let mut author = store
            .get_author(author_id)
            .await?
            .ok_or_else(|| author_not_found(author_id))?;

        let mut writes = WriteLog::new("detach_book_from_author");

        if remove_all(&mut book.authors, &author_id) {
            book = writes.record(store.replace_book(book).await)?;
        }
        if remove_all(&mut author.books, isbn) {
            author = writes.record(store.replace_author(author).await)?;
        }

        if writes.is_empty() {
            tracing::debug!("Author {} was not linked to book {}", author_id, isbn);
        } else {
            tracing::info!("Author {} detached from book {}", author_id, isbn);
        }
        Ok(AuthorLink { book, author })
    }

    /// Delete a book and drop its ISBN from every author and publication
    pub async fn delete_book(&self, isbn: &str) -> AppResult<Book> {
        let store = self.repository.write().await;
        let book = store.get_book(isbn).await?.ok_or_else(|| book_not_found(isbn))?;
        let authors = store
            .find_authors(Some(Predicate::contains(AuthorField::Books, isbn)))
            .await?;
        let publications = store
            .find_publications(Some(Predicate::contains(PublicationField::Books, isbn)))
            .await?;

        let mut writes = WriteLog::new("delete_book");
        writes.record(store.remove_book(isbn).await)?;

        for mut author in authors {
            remove_all(&mut author.books, isbn);
            writes.record(store.replace_author(author).await)?;
        }
        for mut publication in publications {
            remove_all(&mut publication.books, isbn);
            writes.record(store.replace_publication(publication).await)?;
        }

        tracing::info!("Deleted book {} ({} writes)", isbn, writes.applied);
        Ok(book)
    }

    /// Delete an author and drop its id from every book; the books remain
    pub async fn delete_author(&self, author_id: i32) -> AppResult<Author> {
        let store = self.repository.write().await;
        let author = store
            .get_author(author_id)
            .await?
            .ok_or_else(|| author_not_found(author_id))?;
        let books = store
            .find_books(Some(Predicate::contains(BookField::Authors, author_id)))
            .await?;

        let mut writes = WriteLog::new("delete_author");
        writes.record(store.remove_author(author_id).await)?;

        for mut book in books {
            remove_all(&mut book.authors, &author_id);
            writes.record(store.replace_book(book).await)?;
        }

        tracing::info!("Deleted author {} ({} writes)", author_id, writes.applied);
        Ok(author)
    }

    /// Delete a publication and unset it on every book pointing to it
    pub async fn delete_publication(&self, publication_id: i32) -> AppResult<Publication> {
        let store = self.repository.write().await;
        let publication = store
            .get_publication(publication_id)
            .await?
            .ok_or_else(|| publication_not_found(publication_id))?;
        let books = store
            .find_books(Some(Predicate::equals(BookField::Publication, publication_id)))
            .await?;

        let mut writes = WriteLog::new("delete_publication");
        writes.record(store.remove_publication(publication_id).await)?;

        for mut book in books {
            book.publication = None;
            writes.record(store.replace_book(book).await)?;
        }

        tracing::info!("Deleted publication {} ({} writes)", publication_id, writes.applied);
        Ok(publication)
    }
}

/// Counts the writes one operation has applied, so that a later failure can
/// be told apart from a failure that left the store untouched.
struct WriteLog {
    operation: &'static str,
    applied: usize,
}

impl WriteLog {
    fn new(operation: &'static str) -> Self {
        Self { operation, applied: 0 }
    }

    fn is_empty(&self) -> bool {
        self.applied == 0
    }

    fn record<T>(&mut self, result: AppResult<T>) -> AppResult<T> {
        match result {
            Ok(value) => {
                self.applied += 1;
                Ok(value)
            }
            Err(err) if self.applied == 0 => Err(err),
            Err(err) => {
                tracing::error!(
                    "{} stopped after {} applied write(s): {}",
                    self.operation,
                    self.applied,
                    err
                );
                Err(AppError::Integrity(format!(
                    "{} left the catalog partially updated after {} write(s): {}",
                    self.operation, self.applied, err
                )))
            }
        }
    }
}

/// Append `value` unless already present; true when appended
fn push_unique<T: PartialEq>(items: &mut Vec<T>, value: T) -> bool {
    if items.contains(&value) {
        return false;
    }
    items.push(value);
    true
}

/// Filter out every entry equal to `target`; true when anything was removed
fn remove_all<T, Q>(items: &mut Vec<T>, target: &Q) -> bool
where
    T: PartialEq<Q>,
    Q: ?Sized,
{
    let before = items.len();
    items.retain(|item| item != target);
    items.len() != before
}

fn book_not_found(isbn: &str) -> AppError {
    AppError::NotFound(format!("Book {} not found", isbn))
}

fn author_not_found(id: i32) -> AppError {
    AppError::NotFound(format!("Author {} not found", id))
}

fn publication_not_found(id: i32) -> AppError {
    AppError::NotFound(format!("Publication {} not found", id))
}
