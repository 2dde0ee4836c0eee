//! Book endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::Serialize;
use utoipa::ToSchema;

use crate::{
    error::{AppError, AppResult},
    models::book::{Book, CreateBook},
};

#[derive(Serialize, ToSchema)]
pub struct BooksResponse {
    pub books: Vec<Book>,
}

#[derive(Serialize, ToSchema)]
pub struct BookResponse {
    pub book: Book,
}

/// Turn an empty lookup into a 404
fn non_empty(books: Vec<Book>, message: impl FnOnce() -> String) -> AppResult<Json<BooksResponse>> {
    if books.is_empty() {
        return Err(AppError::NotFound(message()));
    }
    Ok(Json(BooksResponse { books }))
}

/// List all books
#[utoipa::path(
    get,
    path = "/books",
    tag = "books",
    responses(
        (status = 200, description = "All books", body = BooksResponse)
    )
)]
pub async fn list_books(State(state): State<crate::AppState>) -> AppResult<Json<BooksResponse>> {
    let books = state.services.catalog.all_books().await?;
    Ok(Json(BooksResponse { books }))
}

/// Get a book by ISBN
#[utoipa::path(
    get,
    path = "/books/{isbn}",
    tag = "books",
    params(("isbn" = String, Path, description = "Book ISBN")),
    responses(
        (status = 200, description = "Book details", body = BookResponse),
        (status = 404, description = "Book not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn get_book(
    State(state): State<crate::AppState>,
    Path(isbn): Path<String>,
) -> AppResult<Json<BookResponse>> {
    let book = state
        .services
        .catalog
        .book_by_isbn(&isbn)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("No book found for the ISBN of {}", isbn)))?;
    Ok(Json(BookResponse { book }))
}

/// List books tagged with a category
#[utoipa::path(
    get,
    path = "/categories/{category}/books",
    tag = "books",
    params(("category" = String, Path, description = "Category tag")),
    responses(
        (status = 200, description = "Matching books", body = BooksResponse),
        (status = 404, description = "No book in this category", body = crate::error::ErrorResponse)
    )
)]
pub async fn list_books_by_category(
    State(state): State<crate::AppState>,
    Path(category): Path<String>,
) -> AppResult<Json<BooksResponse>> {
    let books = state.services.catalog.books_by_category(&category).await?;
    non_empty(books, || format!("No book found for the category of {}", category))
}

/// List books available in a language
#[utoipa::path(
    get,
    path = "/languages/{language}/books",
    tag = "books",
    params(("language" = String, Path, description = "Language tag")),
    responses(
        (status = 200, description = "Matching books", body = BooksResponse),
        (status = 404, description = "No book in this language", body = crate::error::ErrorResponse)
    )
)]
pub async fn list_books_by_language(
    State(state): State<crate::AppState>,
    Path(language): Path<String>,
) -> AppResult<Json<BooksResponse>> {
    let books = state.services.catalog.books_by_language(&language).await?;
    non_empty(books, || format!("No book found for the language of {}", language))
}

/// List books credited to an author
#[utoipa::path(
    get,
    path = "/authors/{id}/books",
    tag = "books",
    params(("id" = i32, Path, description = "Author ID")),
    responses(
        (status = 200, description = "Matching books", body = BooksResponse),
        (status = 404, description = "No book for this author", body = crate::error::ErrorResponse)
    )
)]
pub async fn list_books_by_author(
    State(state): State<crate::AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<BooksResponse>> {
    let books = state.services.catalog.books_by_author(id).await?;
    non_empty(books, || format!("No book found for the author of {}", id))
}

/// List books belonging to a publication
#[utoipa::path(
    get,
    path = "/publications/{id}/books",
    tag = "books",
    params(("id" = i32, Path, description = "Publication ID")),
    responses(
        (status = 200, description = "Matching books", body = BooksResponse),
        (status = 404, description = "No book in this publication", body = crate::error::ErrorResponse)
    )
)]
pub async fn list_books_by_publication(
    State(state): State<crate::AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<BooksResponse>> {
    let books = state.services.catalog.books_by_publication(id).await?;
    non_empty(books, || format!("No book found for the publication of {}", id))
}

/// Create a book (without authors or publication)
#[utoipa::path(
    post,
    path = "/books",
    tag = "books",
    request_body = CreateBook,
    responses(
        (status = 201, description = "Book created", body = BookResponse),
        (status = 400, description = "Invalid input", body = crate::error::ErrorResponse),
        (status = 409, description = "ISBN already in use", body = crate::error::ErrorResponse)
    )
)]
pub async fn create_book(
    State(state): State<crate::AppState>,
    Json(data): Json<CreateBook>,
) -> AppResult<(StatusCode, Json<BookResponse>)> {
    let book = state.services.ingestion.create_book(data).await?;
    Ok((StatusCode::CREATED, Json(BookResponse { book })))
}

/// Delete a book and every reference to it
#[utoipa::path(
    delete,
    path = "/books/{isbn}",
    tag = "books",
    params(("isbn" = String, Path, description = "Book ISBN")),
    responses(
        (status = 204, description = "Book deleted"),
        (status = 404, description = "Book not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn delete_book(
    State(state): State<crate::AppState>,
    Path(isbn): Path<String>,
) -> AppResult<StatusCode> {
    state.services.relations.delete_book(&isbn).await?;
    Ok(StatusCode::NO_CONTENT)
}
