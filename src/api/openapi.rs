//! OpenAPI documentation

use axum::Router;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::api::{authors, books, catalog, health, publications, relations};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Booky API",
        version = "1.0.0",
        description = "Book, author and publication catalog REST API",
        license(name = "AGPL-3.0", url = "https://www.gnu.org/licenses/agpl-3.0.html")
    ),
    servers(
        (url = "/api/v1", description = "API v1")
    ),
    paths(
        // Health
        health::health_check,
        health::readiness_check,
        // Books
        books::list_books,
        books::get_book,
        books::list_books_by_category,
        books::list_books_by_language,
        books::list_books_by_author,
        books::list_books_by_publication,
        books::create_book,
        books::delete_book,
        // Authors
        authors::list_authors,
        authors::get_author,
        authors::list_authors_by_book,
        authors::create_author,
        authors::delete_author,
        // Publications
        publications::list_publications,
        publications::get_publication,
        publications::list_publications_by_book,
        publications::create_publication,
        publications::delete_publication,
        // Relationships
        relations::attach_author,
        relations::detach_author,
        relations::attach_publication,
        relations::detach_publication,
        // Catalog
        catalog::audit,
    ),
    components(
        schemas(
            // Books
            crate::models::book::Book,
            crate::models::book::CreateBook,
            books::BooksResponse,
            books::BookResponse,
            // Authors
            crate::models::author::Author,
            crate::models::author::CreateAuthor,
            authors::AuthorsResponse,
            authors::AuthorResponse,
            // Publications
            crate::models::publication::Publication,
            crate::models::publication::CreatePublication,
            publications::PublicationsResponse,
            publications::PublicationResponse,
            // Relationships
            crate::models::catalog::AuthorLink,
            crate::models::catalog::PublicationLink,
            // Catalog
            crate::models::catalog::Violation,
            catalog::AuditResponse,
            // Health
            health::HealthResponse,
            health::ReadinessResponse,
            // Errors
            crate::error::ErrorResponse,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "books", description = "Book catalog"),
        (name = "authors", description = "Author catalog"),
        (name = "publications", description = "Publication catalog"),
        (name = "relations", description = "Book/author and book/publication relationships"),
        (name = "catalog", description = "Catalog consistency")
    )
)]
pub struct ApiDoc;

/// Create the OpenAPI documentation router
pub fn create_openapi_router() -> Router {
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
}
