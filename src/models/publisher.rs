use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "publishers")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(unique)]
    pub name: String,
    pub established_date: Option<String>,
    pub address: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::book::Entity")]
    Books,
}

impl Related<super::book::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Books.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

/// Compact publisher view nested inside book responses and list views.
/// The book count is computed per publisher with a COUNT query instead of
/// loading the owned book rows.
#[derive(Debug, Clone, Serialize)]
pub struct PublisherSummary {
    pub id: i32,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub established_date: Option<String>,
    pub book_count: u64,
}

impl PublisherSummary {
    pub fn from_model_with_count(model: Model, book_count: u64) -> Self {
        Self {
            id: model.id,
            name: model.name,
            established_date: model.established_date,
            book_count,
        }
    }
}

// DTO for API responses. `books` is only populated by single-item lookups.
#[derive(Debug, Clone, Serialize)]
pub struct Publisher {
    pub id: Option<i32>,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub established_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub book_count: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub books: Option<Vec<super::book::Book>>,
}

impl From<Model> for Publisher {
    fn from(model: Model) -> Self {
        Self {
            id: Some(model.id),
            name: model.name,
            established_date: model.established_date,
            address: model.address,
            book_count: None,
            books: None,
        }
    }
}
