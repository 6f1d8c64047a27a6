pub mod book_details;
pub mod books;
pub mod health;
pub mod publishers;

use axum::{
    Json, Router,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
};
use sea_orm::DatabaseConnection;
use serde_json::json;

use crate::services::{ConflictKind, ServiceError};

pub fn api_router(db: DatabaseConnection) -> Router {
    Router::new()
        // Health check
        .route("/health", get(health::health_check))
        // Simple book management (no publisher/detail cross-checks)
        .route("/books", get(books::list_books).post(books::create_book))
        .route("/books/isbn/:isbn", get(books::get_book_by_isbn))
        .route(
            "/books/:id",
            get(books::get_book)
                .put(books::update_book)
                .delete(books::delete_book),
        )
        // Catalog path: books with detail and publisher consistency rules
        .route(
            "/books/details",
            get(book_details::list_books).post(book_details::create_book),
        )
        .route(
            "/books/details/search/author",
            get(book_details::search_by_author),
        )
        .route(
            "/books/details/search/title",
            get(book_details::search_by_title),
        )
        .route(
            "/books/details/isbn/:isbn",
            get(book_details::get_book_by_isbn),
        )
        .route(
            "/books/details/:id",
            get(book_details::get_book)
                .put(book_details::update_book)
                .delete(book_details::delete_book),
        )
        // Publishers
        .route(
            "/publishers",
            get(publishers::list_publishers).post(publishers::create_publisher),
        )
        .route(
            "/publishers/name/:name",
            get(publishers::get_publisher_by_name),
        )
        .route("/publishers/:id/books", get(publishers::get_publisher_books))
        .route(
            "/publishers/:id",
            get(publishers::get_publisher)
                .put(publishers::update_publisher)
                .delete(publishers::delete_publisher),
        )
        .with_state(db)
}

// Transport mapping for service failures; the services themselves stay
// framework-free.
impl IntoResponse for ServiceError {
    fn into_response(self) -> Response {
        let status = match &self {
            ServiceError::NotFound { .. } => StatusCode::NOT_FOUND,
            ServiceError::Conflict(_) => StatusCode::CONFLICT,
            ServiceError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ServiceError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        if status == StatusCode::INTERNAL_SERVER_ERROR {
            tracing::error!("request failed: {}", self);
        }

        let body = match &self {
            ServiceError::Conflict(ConflictKind::PublisherHasBooks { id, count }) => json!({
                "error": self.to_string(),
                "publisher_id": id,
                "book_count": count,
            }),
            _ => json!({ "error": self.to_string() }),
        };

        (status, Json(body)).into_response()
    }
}
