//! Publication endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::Serialize;
use utoipa::ToSchema;

use crate::{
    error::{AppError, AppResult},
    models::publication::{CreatePublication, Publication},
};

#[derive(Serialize, ToSchema)]
pub struct PublicationsResponse {
    pub publications: Vec<Publication>,
}

#[derive(Serialize, ToSchema)]
pub struct PublicationResponse {
    pub publication: Publication,
}

/// List all publications
#[utoipa::path(
    get,
    path = "/publications",
    tag = "publications",
    responses(
        (status = 200, description = "All publications", body = PublicationsResponse)
    )
)]
pub async fn list_publications(
    State(state): State<crate::AppState>,
) -> AppResult<Json<PublicationsResponse>> {
    let publications = state.services.catalog.all_publications().await?;
    Ok(Json(PublicationsResponse { publications }))
}

/// Get a publication by ID
#[utoipa::path(
    get,
    path = "/publications/{id}",
    tag = "publications",
    params(("id" = i32, Path, description = "Publication ID")),
    responses(
        (status = 200, description = "Publication details", body = PublicationResponse),
        (status = 404, description = "Publication not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn get_publication(
    State(state): State<crate::AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<PublicationResponse>> {
    let publication = state
        .services
        .catalog
        .publication_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("No publication found for the id of {}", id)))?;
    Ok(Json(PublicationResponse { publication }))
}

/// List the publications holding a book
#[utoipa::path(
    get,
    path = "/books/{isbn}/publications",
    tag = "publications",
    params(("isbn" = String, Path, description = "Book ISBN")),
    responses(
        (status = 200, description = "Matching publications", body = PublicationsResponse),
        (status = 404, description = "No publication for this book", body = crate::error::ErrorResponse)
    )
)]
pub async fn list_publications_by_book(
    State(state): State<crate::AppState>,
    Path(isbn): Path<String>,
) -> AppResult<Json<PublicationsResponse>> {
    let publications = state.services.catalog.publications_by_book(&isbn).await?;
    if publications.is_empty() {
        return Err(AppError::NotFound(format!(
            "No publication found for the book of {}",
            isbn
        )));
    }
    Ok(Json(PublicationsResponse { publications }))
}

/// Create a publication (without books)
#[utoipa::path(
    post,
    path = "/publications",
    tag = "publications",
    request_body = CreatePublication,
    responses(
        (status = 201, description = "Publication created", body = PublicationResponse),
        (status = 400, description = "Invalid input", body = crate::error::ErrorResponse),
        (status = 409, description = "Publication id already in use", body = crate::error::ErrorResponse)
    )
)]
pub async fn create_publication(
    State(state): State<crate::AppState>,
    Json(data): Json<CreatePublication>,
) -> AppResult<(StatusCode, Json<PublicationResponse>)> {
    let publication = state.services.ingestion.create_publication(data).await?;
    Ok((StatusCode::CREATED, Json(PublicationResponse { publication })))
}

/// Delete a publication and unset it on its books
#[utoipa::path(
    delete,
    path = "/publications/{id}",
    tag = "publications",
    params(("id" = i32, Path, description = "Publication ID")),
    responses(
        (status = 204, description = "Publication deleted"),
        (status = 404, description = "Publication not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn delete_publication(
    State(state): State<crate::AppState>,
    Path(id): Path<i32>,
) -> AppResult<StatusCode> {
    state.services.relations.delete_publication(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
