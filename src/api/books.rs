//! Simple book management endpoints: plain CRUD on the book record alone,
//! no publisher or detail handling.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter};
use serde_json::{Value, json};

use crate::models::Book;
use crate::models::book::{Column, Entity as BookEntity};
use crate::services::ServiceError;
use crate::services::book_service::{self, SimpleBookRequest};

#[utoipa::path(
    get,
    path = "/api/books",
    responses(
        (status = 200, description = "All books, without nested associations")
    )
)]
pub async fn list_books(
    State(db): State<DatabaseConnection>,
) -> Result<Json<Value>, ServiceError> {
    let books = BookEntity::find().all(&db).await.map_err(ServiceError::from)?;
    let book_dtos: Vec<Book> = books.into_iter().map(Book::from).collect();

    Ok(Json(json!({
        "books": book_dtos,
        "total": book_dtos.len()
    })))
}

pub async fn get_book(
    State(db): State<DatabaseConnection>,
    Path(id): Path<i32>,
) -> Result<Json<Book>, ServiceError> {
    let book = BookEntity::find_by_id(id)
        .one(&db)
        .await
        .map_err(ServiceError::from)?
        .ok_or(ServiceError::NotFound {
            entity: "Book",
            key: "id",
            value: id.to_string(),
        })?;

    Ok(Json(Book::from(book)))
}

pub async fn get_book_by_isbn(
    State(db): State<DatabaseConnection>,
    Path(isbn): Path<String>,
) -> Result<Json<Book>, ServiceError> {
    let book = BookEntity::find()
        .filter(Column::Isbn.eq(&isbn))
        .one(&db)
        .await
        .map_err(ServiceError::from)?
        .ok_or(ServiceError::NotFound {
            entity: "Book",
            key: "isbn",
            value: isbn,
        })?;

    Ok(Json(Book::from(book)))
}

#[utoipa::path(
    post,
    path = "/api/books",
    responses(
        (status = 201, description = "Book created"),
        (status = 409, description = "ISBN already in use")
    )
)]
pub async fn create_book(
    State(db): State<DatabaseConnection>,
    Json(payload): Json<SimpleBookRequest>,
) -> Result<impl IntoResponse, ServiceError> {
    let book = book_service::create_book_simple(&db, payload).await?;
    Ok((StatusCode::CREATED, Json(book)))
}

pub async fn update_book(
    State(db): State<DatabaseConnection>,
    Path(id): Path<i32>,
    Json(payload): Json<SimpleBookRequest>,
) -> Result<Json<Book>, ServiceError> {
    let book = book_service::update_book_simple(&db, id, payload).await?;
    Ok(Json(book))
}

pub async fn delete_book(
    State(db): State<DatabaseConnection>,
    Path(id): Path<i32>,
) -> Result<Json<Value>, ServiceError> {
    book_service::delete_book_simple(&db, id).await?;
    Ok(Json(json!({ "message": "Book deleted successfully" })))
}
