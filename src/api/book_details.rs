//! Catalog endpoints: books with their detail record and publisher, behind
//! the full consistency rules of the book service.

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use sea_orm::DatabaseConnection;
use serde::Deserialize;
use serde_json::{Value, json};

use crate::models::Book;
use crate::services::ServiceError;
use crate::services::book_service::{self, BookRequest};

#[derive(Debug, Deserialize)]
pub struct AuthorQuery {
    pub author: String,
}

#[derive(Debug, Deserialize)]
pub struct TitleQuery {
    pub title: String,
}

pub async fn list_books(
    State(db): State<DatabaseConnection>,
) -> Result<Json<Vec<Book>>, ServiceError> {
    Ok(Json(book_service::list_books(&db).await?))
}

pub async fn get_book(
    State(db): State<DatabaseConnection>,
    Path(id): Path<i32>,
) -> Result<Json<Book>, ServiceError> {
    Ok(Json(book_service::get_book(&db, id).await?))
}

pub async fn get_book_by_isbn(
    State(db): State<DatabaseConnection>,
    Path(isbn): Path<String>,
) -> Result<Json<Book>, ServiceError> {
    Ok(Json(book_service::get_book_by_isbn(&db, &isbn).await?))
}

pub async fn search_by_author(
    State(db): State<DatabaseConnection>,
    Query(params): Query<AuthorQuery>,
) -> Result<Json<Vec<Book>>, ServiceError> {
    Ok(Json(
        book_service::search_books_by_author(&db, &params.author).await?,
    ))
}

pub async fn search_by_title(
    State(db): State<DatabaseConnection>,
    Query(params): Query<TitleQuery>,
) -> Result<Json<Vec<Book>>, ServiceError> {
    Ok(Json(
        book_service::search_books_by_title(&db, &params.title).await?,
    ))
}

pub async fn create_book(
    State(db): State<DatabaseConnection>,
    Json(payload): Json<BookRequest>,
) -> Result<impl IntoResponse, ServiceError> {
    let book = book_service::create_book(&db, payload).await?;
    Ok((StatusCode::CREATED, Json(book)))
}

pub async fn update_book(
    State(db): State<DatabaseConnection>,
    Path(id): Path<i32>,
    Json(payload): Json<BookRequest>,
) -> Result<Json<Book>, ServiceError> {
    Ok(Json(book_service::update_book(&db, id, payload).await?))
}

pub async fn delete_book(
    State(db): State<DatabaseConnection>,
    Path(id): Path<i32>,
) -> Result<Json<Value>, ServiceError> {
    book_service::delete_book(&db, id).await?;
    Ok(Json(json!({ "message": "Book deleted successfully" })))
}
