use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Extended description record owned by exactly one book.
///
/// `publisher` here is the imprint name printed on the book, a plain text
/// field. The Publisher entity proper is referenced from the book itself.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "book_details")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(unique)]
    pub book_id: i32,
    pub description: Option<String>,
    pub language: Option<String>,
    pub page_count: Option<i32>,
    pub publisher: Option<String>,
    pub cover_image_url: Option<String>,
    pub edition: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::book::Entity",
        from = "Column::BookId",
        to = "super::book::Column::Id"
    )]
    Book,
}

impl Related<super::book::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Book.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

// DTO used both as the optional `detail` payload on book requests (the id
// is ignored on input) and as the nested detail in book responses.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookDetail {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i32>,
    pub description: Option<String>,
    pub language: Option<String>,
    pub page_count: Option<i32>,
    pub publisher: Option<String>,
    pub cover_image_url: Option<String>,
    pub edition: Option<String>,
}

impl From<Model> for BookDetail {
    fn from(model: Model) -> Self {
        Self {
            id: Some(model.id),
            description: model.description,
            language: model.language,
            page_count: model.page_count,
            publisher: model.publisher,
            cover_image_url: model.cover_image_url,
            edition: model.edition,
        }
    }
}
