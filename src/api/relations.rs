//! Relationship endpoints

use axum::{
    extract::{Path, State},
    Json,
};

use crate::{
    error::AppResult,
    models::catalog::{AuthorLink, PublicationLink},
};

/// Credit an author on a book
#[utoipa::path(
    put,
    path = "/books/{isbn}/authors/{author_id}",
    tag = "relations",
    params(
        ("isbn" = String, Path, description = "Book ISBN"),
        ("author_id" = i32, Path, description = "Author ID")
    ),
    responses(
        (status = 200, description = "Updated book and author", body = AuthorLink),
        (status = 404, description = "Book or author not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn attach_author(
    State(state): State<crate::AppState>,
    Path((isbn, author_id)): Path<(String, i32)>,
) -> AppResult<Json<AuthorLink>> {
    let link = state
        .services
        .relations
        .attach_author_to_book(&isbn, author_id)
        .await?;
    Ok(Json(link))
}

/// Remove an author credit from a book
#[utoipa::path(
    delete,
    path = "/books/{isbn}/authors/{author_id}",
    tag = "relations",
    params(
        ("isbn" = String, Path, description = "Book ISBN"),
        ("author_id" = i32, Path, description = "Author ID")
    ),
    responses(
        (status = 200, description = "Updated book and author", body = AuthorLink),
        (status = 404, description = "Book or author not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn detach_author(
    State(state): State<crate::AppState>,
    Path((isbn, author_id)): Path<(String, i32)>,
) -> AppResult<Json<AuthorLink>> {
    let link = state
        .services
        .relations
        .detach_book_from_author(&isbn, author_id)
        .await?;
    Ok(Json(link))
}

/// Bind a book to a publication
#[utoipa::path(
    put,
    path = "/books/{isbn}/publication/{publication_id}",
    tag = "relations",
    params(
        ("isbn" = String, Path, description = "Book ISBN"),
        ("publication_id" = i32, Path, description = "Publication ID")
    ),
    responses(
        (status = 200, description = "Updated book and publication", body = PublicationLink),
        (status = 404, description = "Book or publication not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn attach_publication(
    State(state): State<crate::AppState>,
    Path((isbn, publication_id)): Path<(String, i32)>,
) -> AppResult<Json<PublicationLink>> {
    let link = state
        .services
        .relations
        .attach_book_to_publication(&isbn, publication_id)
        .await?;
    Ok(Json(link))
}

/// Unbind a book from a publication
#[utoipa::path(
    delete,
    path = "/books/{isbn}/publication/{publication_id}",
    tag = "relations",
    params(
        ("isbn" = String, Path, description = "Book ISBN"),
        ("publication_id" = i32, Path, description = "Publication ID")
    ),
    responses(
        (status = 200, description = "Updated book and publication", body = PublicationLink),
        (status = 404, description = "Book or publication not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn detach_publication(
    State(state): State<crate::AppState>,
    Path((isbn, publication_id)): Path<(String, i32)>,
) -> AppResult<Json<PublicationLink>> {
    let link = state
        .services
        .relations
        .detach_book_from_publication(&isbn, publication_id)
        .await?;
    Ok(Json(link))
}
