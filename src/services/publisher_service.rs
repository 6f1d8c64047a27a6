//! Publisher service - lookups and guarded writes for publishers.
//!
//! Publishers own books but never hold a materialized book collection;
//! back-references are computed on demand through the book service's
//! publisher queries. Deletion is blocked while any book references the
//! publisher.

use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, ModelTrait, PaginatorTrait,
    QueryFilter, QueryOrder, Set,
};
use serde::Deserialize;

use super::{ConflictKind, ServiceError, map_publisher_name_conflict};
use crate::models::Publisher;
use crate::models::book::{Book, Entity as BookEntity};
use crate::models::publisher::{ActiveModel as PublisherActiveModel, Column, Entity as PublisherEntity};
use crate::services::book_service::count_books_by_publisher;

#[derive(Debug, Clone, Deserialize)]
pub struct PublisherRequest {
    pub name: String,
    pub established_date: Option<String>,
    pub address: Option<String>,
}

fn validate(request: &PublisherRequest) -> Result<(), ServiceError> {
    if request.name.trim().is_empty() {
        return Err(ServiceError::Validation("name is required".to_owned()));
    }
    if let Some(date) = &request.established_date
        && chrono::NaiveDate::parse_from_str(date, "%Y-%m-%d").is_err()
    {
        return Err(ServiceError::Validation(
            "established date must be formatted as YYYY-MM-DD".to_owned(),
        ));
    }
    Ok(())
}

fn publisher_not_found(key: &'static str, value: String) -> ServiceError {
    ServiceError::NotFound {
        entity: "Publisher",
        key,
        value,
    }
}

/// List all publishers as summaries, each carrying its live book count.
/// Counts are computed per publisher rather than by loading book rows.
pub async fn list_publishers(db: &DatabaseConnection) -> Result<Vec<Publisher>, ServiceError> {
    let publishers = PublisherEntity::find()
        .order_by_asc(Column::Id)
        .all(db)
        .await?;

    let mut publisher_dtos = Vec::with_capacity(publishers.len());
    for model in publishers {
        let count = count_books_by_publisher(db, model.id).await?;
        let mut dto = Publisher::from(model);
        dto.book_count = Some(count);
        publisher_dtos.push(dto);
    }
    Ok(publisher_dtos)
}

/// Get a publisher by ID with its books eagerly populated (possibly empty).
pub async fn get_publisher(db: &DatabaseConnection, id: i32) -> Result<Publisher, ServiceError> {
    let model = PublisherEntity::find_by_id(id)
        .one(db)
        .await?
        .ok_or_else(|| publisher_not_found("id", id.to_string()))?;

    let books = model.find_related(BookEntity).all(db).await?;

    let mut dto = Publisher::from(model);
    dto.book_count = Some(books.len() as u64);
    dto.books = Some(books.into_iter().map(Book::from).collect());
    Ok(dto)
}

/// Get a publisher by its unique name.
pub async fn get_publisher_by_name(
    db: &DatabaseConnection,
    name: &str,
) -> Result<Publisher, ServiceError> {
    let model = PublisherEntity::find()
        .filter(Column::Name.eq(name))
        .one(db)
        .await?
        .ok_or_else(|| publisher_not_found("name", name.to_owned()))?;

    let count = count_books_by_publisher(db, model.id).await?;
    let mut dto = Publisher::from(model);
    dto.book_count = Some(count);
    Ok(dto)
}

async fn name_in_use(db: &DatabaseConnection, name: &str) -> Result<bool, ServiceError> {
    let count = PublisherEntity::find()
        .filter(Column::Name.eq(name))
        .count(db)
        .await?;
    Ok(count > 0)
}

/// Create a publisher. The name must be unused.
pub async fn create_publisher(
    db: &DatabaseConnection,
    request: PublisherRequest,
) -> Result<Publisher, ServiceError> {
    validate(&request)?;

    if name_in_use(db, &request.name).await? {
        return Err(ServiceError::Conflict(ConflictKind::DuplicatePublisherName(
            request.name,
        )));
    }

    let now = chrono::Utc::now().to_rfc3339();
    let new_publisher = PublisherActiveModel {
        name: Set(request.name.clone()),
        established_date: Set(request.established_date),
        address: Set(request.address),
        created_at: Set(now.clone()),
        updated_at: Set(now),
        ..Default::default()
    };

    let model = new_publisher
        .insert(db)
        .await
        .map_err(|e| map_publisher_name_conflict(e, &request.name))?;

    tracing::info!("created publisher {} ({})", model.id, model.name);

    let mut dto = Publisher::from(model);
    dto.book_count = Some(0);
    Ok(dto)
}

/// Update a publisher. The name uniqueness check only runs when the name
/// actually changes; all scalar fields are overwritten.
pub async fn update_publisher(
    db: &DatabaseConnection,
    id: i32,
    request: PublisherRequest,
) -> Result<Publisher, ServiceError> {
    validate(&request)?;

    let existing = PublisherEntity::find_by_id(id)
        .one(db)
        .await?
        .ok_or_else(|| publisher_not_found("id", id.to_string()))?;

    if existing.name != request.name && name_in_use(db, &request.name).await? {
        return Err(ServiceError::Conflict(ConflictKind::DuplicatePublisherName(
            request.name,
        )));
    }

    let mut publisher: PublisherActiveModel = existing.into();
    publisher.name = Set(request.name.clone());
    publisher.established_date = Set(request.established_date);
    publisher.address = Set(request.address);
    publisher.updated_at = Set(chrono::Utc::now().to_rfc3339());

    let model = publisher
        .update(db)
        .await
        .map_err(|e| map_publisher_name_conflict(e, &request.name))?;

    let count = count_books_by_publisher(db, model.id).await?;
    let mut dto = Publisher::from(model);
    dto.book_count = Some(count);
    Ok(dto)
}

/// Delete a publisher. Blocked while it still owns books; the error carries
/// the exact dependent count.
pub async fn delete_publisher(db: &DatabaseConnection, id: i32) -> Result<(), ServiceError> {
    let publisher = PublisherEntity::find_by_id(id)
        .one(db)
        .await?
        .ok_or_else(|| publisher_not_found("id", id.to_string()))?;

    let count = count_books_by_publisher(db, id).await?;
    if count > 0 {
        return Err(ServiceError::Conflict(ConflictKind::PublisherHasBooks {
            id,
            count,
        }));
    }

    publisher.delete(db).await?;
    tracing::info!("deleted publisher {}", id);
    Ok(())
}
