use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use sea_orm::DatabaseConnection;
use serde_json::{Value, json};

use crate::models::{Book, Publisher};
use crate::services::ServiceError;
use crate::services::publisher_service::{self, PublisherRequest};
use crate::services::book_service;

pub async fn list_publishers(
    State(db): State<DatabaseConnection>,
) -> Result<Json<Vec<Publisher>>, ServiceError> {
    Ok(Json(publisher_service::list_publishers(&db).await?))
}

pub async fn get_publisher(
    State(db): State<DatabaseConnection>,
    Path(id): Path<i32>,
) -> Result<Json<Publisher>, ServiceError> {
    Ok(Json(publisher_service::get_publisher(&db, id).await?))
}

pub async fn get_publisher_by_name(
    State(db): State<DatabaseConnection>,
    Path(name): Path<String>,
) -> Result<Json<Publisher>, ServiceError> {
    Ok(Json(
        publisher_service::get_publisher_by_name(&db, &name).await?,
    ))
}

/// Books of one publisher. The publisher is validated first; the book query
/// itself would silently return an empty list for an unknown id.
pub async fn get_publisher_books(
    State(db): State<DatabaseConnection>,
    Path(id): Path<i32>,
) -> Result<Json<Vec<Book>>, ServiceError> {
    publisher_service::get_publisher(&db, id).await?;
    Ok(Json(book_service::find_books_by_publisher(&db, id).await?))
}

pub async fn create_publisher(
    State(db): State<DatabaseConnection>,
    Json(payload): Json<PublisherRequest>,
) -> Result<impl IntoResponse, ServiceError> {
    let publisher = publisher_service::create_publisher(&db, payload).await?;
    Ok((StatusCode::CREATED, Json(publisher)))
}

pub async fn update_publisher(
    State(db): State<DatabaseConnection>,
    Path(id): Path<i32>,
    Json(payload): Json<PublisherRequest>,
) -> Result<Json<Publisher>, ServiceError> {
    Ok(Json(
        publisher_service::update_publisher(&db, id, payload).await?,
    ))
}

pub async fn delete_publisher(
    State(db): State<DatabaseConnection>,
    Path(id): Path<i32>,
) -> Result<Json<Value>, ServiceError> {
    publisher_service::delete_publisher(&db, id).await?;
    Ok(Json(json!({ "message": "Publisher deleted successfully" })))
}
