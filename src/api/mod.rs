//! API handlers for Booky REST endpoints

pub mod authors;
pub mod books;
pub mod catalog;
pub mod health;
pub mod openapi;
pub mod publications;
pub mod relations;

use axum::{
    routing::{get, put},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::AppState;

/// Create the application router with all routes
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let api_v1 = Router::new()
        // Health check
        .route("/health", get(health::health_check))
        .route("/ready", get(health::readiness_check))
        // Books
        .route("/books", get(books::list_books).post(books::create_book))
        .route("/books/:isbn", get(books::get_book).delete(books::delete_book))
        .route("/books/:isbn/authors", get(authors::list_authors_by_book))
        .route("/books/:isbn/publications", get(publications::list_publications_by_book))
        .route("/categories/:category/books", get(books::list_books_by_category))
        .route("/languages/:language/books", get(books::list_books_by_language))
        // Authors
        .route("/authors", get(authors::list_authors).post(authors::create_author))
        .route("/authors/:id", get(authors::get_author).delete(authors::delete_author))
        .route("/authors/:id/books", get(books::list_books_by_author))
        // Publications
        .route(
            "/publications",
            get(publications::list_publications).post(publications::create_publication),
        )
        .route(
            "/publications/:id",
            get(publications::get_publication).delete(publications::delete_publication),
        )
        .route("/publications/:id/books", get(books::list_books_by_publication))
        // Relationships
        .route(
            "/books/:isbn/authors/:author_id",
            put(relations::attach_author).delete(relations::detach_author),
        )
        .route(
            "/books/:isbn/publication/:publication_id",
            put(relations::attach_publication).delete(relations::detach_publication),
        )
        // Consistency
        .route("/catalog/audit", get(catalog::audit))
        .with_state(state);

    Router::new()
        .nest("/api/v1", api_v1)
        .merge(openapi::create_openapi_router())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}
