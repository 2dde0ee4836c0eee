//! Author endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::Serialize;
use utoipa::ToSchema;

use crate::{
    error::{AppError, AppResult},
    models::author::{Author, CreateAuthor},
};

#[derive(Serialize, ToSchema)]
pub struct AuthorsResponse {
    pub authors: Vec<Author>,
}

#[derive(Serialize, ToSchema)]
pub struct AuthorResponse {
    pub author: Author,
}

/// List all authors
#[utoipa::path(
    get,
    path = "/authors",
    tag = "authors",
    responses(
        (status = 200, description = "All authors", body = AuthorsResponse)
    )
)]
pub async fn list_authors(State(state): State<crate::AppState>) -> AppResult<Json<AuthorsResponse>> {
    let authors = state.services.catalog.all_authors().await?;
    Ok(Json(AuthorsResponse { authors }))
}

/// Get an author by ID
#[utoipa::path(
    get,
    path = "/authors/{id}",
    tag = "authors",
    params(("id" = i32, Path, description = "Author ID")),
    responses(
        (status = 200, description = "Author details", body = AuthorResponse),
        (status = 404, description = "Author not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn get_author(
    State(state): State<crate::AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<AuthorResponse>> {
    let author = state
        .services
        .catalog
        .author_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("No author found for the id of {}", id)))?;
    Ok(Json(AuthorResponse { author }))
}

/// List the authors credited on a book
#[utoipa::path(
    get,
    path = "/books/{isbn}/authors",
    tag = "authors",
    params(("isbn" = String, Path, description = "Book ISBN")),
    responses(
        (status = 200, description = "Matching authors", body = AuthorsResponse),
        (status = 404, description = "No author for this book", body = crate::error::ErrorResponse)
    )
)]
pub async fn list_authors_by_book(
    State(state): State<crate::AppState>,
    Path(isbn): Path<String>,
) -> AppResult<Json<AuthorsResponse>> {
    let authors = state.services.catalog.authors_by_book(&isbn).await?;
    if authors.is_empty() {
        return Err(AppError::NotFound(format!(
            "No author found for the book of {}",
            isbn
        )));
    }
    Ok(Json(AuthorsResponse { authors }))
}

/// Create an author (without books)
#[utoipa::path(
    post,
    path = "/authors",
    tag = "authors",
    request_body = CreateAuthor,
    responses(
        (status = 201, description = "Author created", body = AuthorResponse),
        (status = 400, description = "Invalid input", body = crate::error::ErrorResponse),
        (status = 409, description = "Author id already in use", body = crate::error::ErrorResponse)
    )
)]
pub async fn create_author(
    State(state): State<crate::AppState>,
    Json(data): Json<CreateAuthor>,
) -> AppResult<(StatusCode, Json<AuthorResponse>)> {
    let author = state.services.ingestion.create_author(data).await?;
    Ok((StatusCode::CREATED, Json(AuthorResponse { author })))
}

/// Delete an author and remove it from every book
#[utoipa::path(
    delete,
    path = "/authors/{id}",
    tag = "authors",
    params(("id" = i32, Path, description = "Author ID")),
    responses(
        (status = 204, description = "Author deleted"),
        (status = 404, description = "Author not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn delete_author(
    State(state): State<crate::AppState>,
    Path(id): Path<i32>,
) -> AppResult<StatusCode> {
    state.services.relations.delete_author(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
