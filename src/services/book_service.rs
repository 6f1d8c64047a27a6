//! Book service - lookups and guarded writes for the book catalog.
//!
//! The full write path (`create_book`/`update_book`/`delete_book`) enforces
//! the cross-entity rules: the referenced publisher must exist, the isbn must
//! stay unique, and the optional detail record lives and dies with its book.
//! The `*_simple` functions are the narrower path used for plain book
//! management; they check nothing beyond isbn uniqueness.

use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, ModelTrait, PaginatorTrait,
    QueryFilter, QueryOrder, Set, TransactionTrait,
};
use serde::Deserialize;

use super::{ConflictKind, ServiceError, map_isbn_conflict};
use crate::models::book::{ActiveModel as BookActiveModel, Column, Entity as BookEntity};
use crate::models::book_detail::{
    ActiveModel as DetailActiveModel, Column as DetailColumn, Entity as DetailEntity,
};
use crate::models::publisher::{Entity as PublisherEntity, PublisherSummary};
use crate::models::{Book, BookDetail};

/// Payload for the full catalog path. The publisher reference is mandatory
/// here; the detail sub-record is optional.
#[derive(Debug, Clone, Deserialize)]
pub struct BookRequest {
    pub title: String,
    pub author: String,
    pub isbn: String,
    pub price: Option<i32>,
    pub publish_date: Option<String>,
    pub publisher_id: i32,
    pub detail: Option<BookDetail>,
}

/// Payload for the simple path: scalar book fields only.
#[derive(Debug, Clone, Deserialize)]
pub struct SimpleBookRequest {
    pub title: String,
    pub author: String,
    pub isbn: String,
    pub price: Option<i32>,
    pub publish_date: Option<String>,
}

fn validate_scalars(
    title: &str,
    author: &str,
    isbn: &str,
    price: Option<i32>,
    publish_date: Option<&str>,
) -> Result<(), ServiceError> {
    if title.trim().is_empty() {
        return Err(ServiceError::Validation("title is required".to_owned()));
    }
    if author.trim().is_empty() {
        return Err(ServiceError::Validation("author is required".to_owned()));
    }
    let digits = isbn.chars().filter(|c| c.is_ascii_digit()).count();
    if !(digits == 10 || digits == 13) || !isbn.chars().all(|c| c.is_ascii_digit() || c == '-') {
        return Err(ServiceError::Validation(
            "isbn must contain 10 or 13 digits, with or without hyphens".to_owned(),
        ));
    }
    if let Some(p) = price
        && p < 0
    {
        return Err(ServiceError::Validation(
            "price must be positive or zero".to_owned(),
        ));
    }
    if let Some(date) = publish_date {
        match chrono::NaiveDate::parse_from_str(date, "%Y-%m-%d") {
            Ok(d) if d > chrono::Utc::now().date_naive() => {
                return Err(ServiceError::Validation(
                    "publish date cannot be in the future".to_owned(),
                ));
            }
            Ok(_) => {}
            Err(_) => {
                return Err(ServiceError::Validation(
                    "publish date must be formatted as YYYY-MM-DD".to_owned(),
                ));
            }
        }
    }
    Ok(())
}

fn validate(request: &BookRequest) -> Result<(), ServiceError> {
    validate_scalars(
        &request.title,
        &request.author,
        &request.isbn,
        request.price,
        request.publish_date.as_deref(),
    )?;
    if let Some(detail) = &request.detail
        && let Some(pages) = detail.page_count
        && pages < 0
    {
        return Err(ServiceError::Validation(
            "page count must be positive or zero".to_owned(),
        ));
    }
    Ok(())
}

fn book_not_found(key: &'static str, value: String) -> ServiceError {
    ServiceError::NotFound {
        entity: "Book",
        key,
        value,
    }
}

fn publisher_not_found(publisher_id: i32) -> ServiceError {
    ServiceError::NotFound {
        entity: "Publisher",
        key: "id",
        value: publisher_id.to_string(),
    }
}

/// Build the response snapshot for a book: detail and publisher populated
/// when present, the publisher summary enriched with its live book count.
async fn to_response(
    db: &DatabaseConnection,
    model: crate::models::book::Model,
) -> Result<Book, ServiceError> {
    let mut dto = Book::from(model.clone());

    if let Some(detail) = model.find_related(DetailEntity).one(db).await? {
        dto.detail = Some(BookDetail::from(detail));
    }

    if let Some(publisher) = model.find_related(PublisherEntity).one(db).await? {
        let count = count_books_by_publisher(db, publisher.id).await?;
        dto.publisher = Some(PublisherSummary::from_model_with_count(publisher, count));
    }

    Ok(dto)
}

/// List all books with their associations populated where present.
pub async fn list_books(db: &DatabaseConnection) -> Result<Vec<Book>, ServiceError> {
    let books = BookEntity::find().order_by_asc(Column::Id).all(db).await?;

    tracing::debug!("list_books returned {} rows", books.len());

    let mut book_dtos = Vec::with_capacity(books.len());
    for model in books {
        book_dtos.push(to_response(db, model).await?);
    }
    Ok(book_dtos)
}

/// Get a single book by ID, with detail and publisher populated when present.
pub async fn get_book(db: &DatabaseConnection, id: i32) -> Result<Book, ServiceError> {
    let model = BookEntity::find_by_id(id)
        .one(db)
        .await?
        .ok_or_else(|| book_not_found("id", id.to_string()))?;

    to_response(db, model).await
}

/// Get a single book by ISBN.
pub async fn get_book_by_isbn(db: &DatabaseConnection, isbn: &str) -> Result<Book, ServiceError> {
    let model = BookEntity::find()
        .filter(Column::Isbn.eq(isbn))
        .one(db)
        .await?
        .ok_or_else(|| book_not_found("isbn", isbn.to_owned()))?;

    to_response(db, model).await
}

/// Case-insensitive substring search on the author field. No match is an
/// empty list, never an error.
pub async fn search_books_by_author(
    db: &DatabaseConnection,
    author: &str,
) -> Result<Vec<Book>, ServiceError> {
    let books = BookEntity::find()
        .filter(Column::Author.contains(author))
        .order_by_asc(Column::Id)
        .all(db)
        .await?;

    let mut book_dtos = Vec::with_capacity(books.len());
    for model in books {
        book_dtos.push(to_response(db, model).await?);
    }
    Ok(book_dtos)
}

/// Case-insensitive substring search on the title field.
pub async fn search_books_by_title(
    db: &DatabaseConnection,
    title: &str,
) -> Result<Vec<Book>, ServiceError> {
    let books = BookEntity::find()
        .filter(Column::Title.contains(title))
        .order_by_asc(Column::Id)
        .all(db)
        .await?;

    let mut book_dtos = Vec::with_capacity(books.len());
    for model in books {
        book_dtos.push(to_response(db, model).await?);
    }
    Ok(book_dtos)
}

/// All books owned by a publisher, as plain snapshots without nested
/// associations. An unknown publisher id yields an empty list; callers that
/// need existence validation do it separately.
pub async fn find_books_by_publisher(
    db: &DatabaseConnection,
    publisher_id: i32,
) -> Result<Vec<Book>, ServiceError> {
    let books = BookEntity::find()
        .filter(Column::PublisherId.eq(publisher_id))
        .order_by_asc(Column::Id)
        .all(db)
        .await?;

    Ok(books.into_iter().map(Book::from).collect())
}

/// Live count of books owned by a publisher.
pub async fn count_books_by_publisher(
    db: &DatabaseConnection,
    publisher_id: i32,
) -> Result<u64, ServiceError> {
    let count = BookEntity::find()
        .filter(Column::PublisherId.eq(publisher_id))
        .count(db)
        .await?;
    Ok(count)
}

async fn isbn_in_use(db: &DatabaseConnection, isbn: &str) -> Result<bool, ServiceError> {
    let count = BookEntity::find()
        .filter(Column::Isbn.eq(isbn))
        .count(db)
        .await?;
    Ok(count > 0)
}

/// Create a book on the full catalog path.
///
/// The publisher must exist and the isbn must be unused. Book and optional
/// detail are written in one transaction so a failure leaves no partial
/// record behind.
pub async fn create_book(
    db: &DatabaseConnection,
    request: BookRequest,
) -> Result<Book, ServiceError> {
    validate(&request)?;

    PublisherEntity::find_by_id(request.publisher_id)
        .one(db)
        .await?
        .ok_or_else(|| publisher_not_found(request.publisher_id))?;

    // Pre-check for a clean error message; the unique index stays the
    // authoritative guard if a concurrent create slips past this.
    if isbn_in_use(db, &request.isbn).await? {
        return Err(ServiceError::Conflict(ConflictKind::DuplicateIsbn(
            request.isbn,
        )));
    }

    let now = chrono::Utc::now().to_rfc3339();
    let txn = db.begin().await?;

    let new_book = BookActiveModel {
        title: Set(request.title.clone()),
        author: Set(request.author.clone()),
        isbn: Set(request.isbn.clone()),
        price: Set(request.price),
        publish_date: Set(request.publish_date.clone()),
        publisher_id: Set(Some(request.publisher_id)),
        created_at: Set(now.clone()),
        updated_at: Set(now),
        ..Default::default()
    };

    let model = new_book
        .insert(&txn)
        .await
        .map_err(|e| map_isbn_conflict(e, &request.isbn))?;

    if let Some(detail) = request.detail {
        let new_detail = DetailActiveModel {
            book_id: Set(model.id),
            description: Set(detail.description),
            language: Set(detail.language),
            page_count: Set(detail.page_count),
            publisher: Set(detail.publisher),
            cover_image_url: Set(detail.cover_image_url),
            edition: Set(detail.edition),
            ..Default::default()
        };
        new_detail.insert(&txn).await?;
    }

    txn.commit().await?;

    tracing::info!("created book {} (isbn {})", model.id, model.isbn);
    get_book(db, model.id).await
}

/// Update a book on the full catalog path.
///
/// Scalar fields are overwritten unconditionally. The isbn uniqueness check
/// only runs when the isbn actually changes. A supplied detail payload
/// creates or fully overwrites the detail record; omitting it leaves an
/// existing detail untouched.
pub async fn update_book(
    db: &DatabaseConnection,
    id: i32,
    request: BookRequest,
) -> Result<Book, ServiceError> {
    validate(&request)?;

    let existing = BookEntity::find_by_id(id)
        .one(db)
        .await?
        .ok_or_else(|| book_not_found("id", id.to_string()))?;

    PublisherEntity::find_by_id(request.publisher_id)
        .one(db)
        .await?
        .ok_or_else(|| publisher_not_found(request.publisher_id))?;

    if existing.isbn != request.isbn && isbn_in_use(db, &request.isbn).await? {
        return Err(ServiceError::Conflict(ConflictKind::DuplicateIsbn(
            request.isbn,
        )));
    }

    let now = chrono::Utc::now().to_rfc3339();
    let txn = db.begin().await?;

    let mut book: BookActiveModel = existing.into();
    book.title = Set(request.title.clone());
    book.author = Set(request.author.clone());
    book.isbn = Set(request.isbn.clone());
    book.price = Set(request.price);
    book.publish_date = Set(request.publish_date.clone());
    book.publisher_id = Set(Some(request.publisher_id));
    book.updated_at = Set(now);

    book.update(&txn)
        .await
        .map_err(|e| map_isbn_conflict(e, &request.isbn))?;

    if let Some(detail) = request.detail {
        let current = DetailEntity::find()
            .filter(DetailColumn::BookId.eq(id))
            .one(&txn)
            .await?;

        match current {
            Some(model) => {
                let mut active: DetailActiveModel = model.into();
                active.description = Set(detail.description);
                active.language = Set(detail.language);
                active.page_count = Set(detail.page_count);
                active.publisher = Set(detail.publisher);
                active.cover_image_url = Set(detail.cover_image_url);
                active.edition = Set(detail.edition);
                active.update(&txn).await?;
            }
            None => {
                let new_detail = DetailActiveModel {
                    book_id: Set(id),
                    description: Set(detail.description),
                    language: Set(detail.language),
                    page_count: Set(detail.page_count),
                    publisher: Set(detail.publisher),
                    cover_image_url: Set(detail.cover_image_url),
                    edition: Set(detail.edition),
                    ..Default::default()
                };
                new_detail.insert(&txn).await?;
            }
        }
    }

    txn.commit().await?;
    get_book(db, id).await
}

/// Delete a book and, with it, its detail record. Both rows go in one
/// transaction; the publisher association is simply released.
pub async fn delete_book(db: &DatabaseConnection, id: i32) -> Result<(), ServiceError> {
    let book = BookEntity::find_by_id(id)
        .one(db)
        .await?
        .ok_or_else(|| book_not_found("id", id.to_string()))?;

    let txn = db.begin().await?;

    DetailEntity::delete_many()
        .filter(DetailColumn::BookId.eq(id))
        .exec(&txn)
        .await?;
    book.delete(&txn).await?;

    txn.commit().await?;

    tracing::info!("deleted book {}", id);
    Ok(())
}

/// Simple-path create: no publisher or detail handling, isbn uniqueness is
/// left to the unique index.
pub async fn create_book_simple(
    db: &DatabaseConnection,
    request: SimpleBookRequest,
) -> Result<Book, ServiceError> {
    validate_scalars(
        &request.title,
        &request.author,
        &request.isbn,
        request.price,
        request.publish_date.as_deref(),
    )?;

    let now = chrono::Utc::now().to_rfc3339();
    let new_book = BookActiveModel {
        title: Set(request.title),
        author: Set(request.author),
        isbn: Set(request.isbn.clone()),
        price: Set(request.price),
        publish_date: Set(request.publish_date),
        created_at: Set(now.clone()),
        updated_at: Set(now),
        ..Default::default()
    };

    let model = new_book
        .insert(db)
        .await
        .map_err(|e| map_isbn_conflict(e, &request.isbn))?;

    Ok(Book::from(model))
}

/// Simple-path update: overwrite the scalar fields only. The publisher link
/// and detail record are untouched.
pub async fn update_book_simple(
    db: &DatabaseConnection,
    id: i32,
    request: SimpleBookRequest,
) -> Result<Book, ServiceError> {
    validate_scalars(
        &request.title,
        &request.author,
        &request.isbn,
        request.price,
        request.publish_date.as_deref(),
    )?;

    let existing = BookEntity::find_by_id(id)
        .one(db)
        .await?
        .ok_or_else(|| book_not_found("id", id.to_string()))?;

    let mut book: BookActiveModel = existing.into();
    book.title = Set(request.title);
    book.author = Set(request.author);
    book.isbn = Set(request.isbn.clone());
    book.price = Set(request.price);
    book.publish_date = Set(request.publish_date);
    book.updated_at = Set(chrono::Utc::now().to_rfc3339());

    let model = book
        .update(db)
        .await
        .map_err(|e| map_isbn_conflict(e, &request.isbn))?;

    Ok(Book::from(model))
}

/// Simple-path delete. Still removes the owned detail record: no path may
/// leave an orphaned detail behind.
pub async fn delete_book_simple(db: &DatabaseConnection, id: i32) -> Result<(), ServiceError> {
    delete_book(db, id).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::publisher_service::{self, PublisherRequest};

    async fn setup_db() -> DatabaseConnection {
        crate::db::init_db("sqlite::memory:")
            .await
            .expect("Failed to init db")
    }

    async fn make_publisher(db: &DatabaseConnection, name: &str) -> i32 {
        let publisher = publisher_service::create_publisher(
            db,
            PublisherRequest {
                name: name.to_owned(),
                established_date: None,
                address: None,
            },
        )
        .await
        .expect("Failed to create publisher");
        publisher.id.expect("Publisher id missing")
    }

    fn request(title: &str, isbn: &str, publisher_id: i32) -> BookRequest {
        BookRequest {
            title: title.to_owned(),
            author: "Robert C. Martin".to_owned(),
            isbn: isbn.to_owned(),
            price: Some(3200),
            publish_date: Some("2008-08-01".to_owned()),
            publisher_id,
            detail: None,
        }
    }

    fn detail(description: &str) -> BookDetail {
        BookDetail {
            id: None,
            description: Some(description.to_owned()),
            language: Some("English".to_owned()),
            page_count: Some(464),
            publisher: Some("Prentice Hall".to_owned()),
            cover_image_url: None,
            edition: Some("1st Edition".to_owned()),
        }
    }

    #[tokio::test]
    async fn create_then_fetch_populates_publisher_with_count() {
        let db = setup_db().await;
        let publisher_id = make_publisher(&db, "Acme").await;

        let created = create_book(&db, request("T", "978-0000000000", publisher_id))
            .await
            .expect("create failed");
        let id = created.id.expect("generated id missing");

        let fetched = get_book(&db, id).await.expect("fetch failed");
        let nested = fetched.publisher.expect("publisher should be populated");
        assert_eq!(nested.name, "Acme");
        assert_eq!(nested.book_count, 1);
        assert!(fetched.detail.is_none());
    }

    #[tokio::test]
    async fn duplicate_isbn_rejected_and_store_unchanged() {
        let db = setup_db().await;
        let publisher_id = make_publisher(&db, "Acme").await;

        create_book(&db, request("First", "111-111-111-1", publisher_id))
            .await
            .expect("first create failed");

        let err = create_book(&db, request("Second", "111-111-111-1", publisher_id))
            .await
            .expect_err("duplicate isbn must fail");
        assert!(matches!(
            err,
            ServiceError::Conflict(ConflictKind::DuplicateIsbn(_))
        ));

        let count = BookEntity::find().count(&db).await.unwrap();
        assert_eq!(count, 1);
    }

    #[tokio::test]
    async fn create_requires_existing_publisher() {
        let db = setup_db().await;

        let err = create_book(&db, request("T", "978-0000000001", 42))
            .await
            .expect_err("missing publisher must fail");
        assert!(matches!(
            err,
            ServiceError::NotFound {
                entity: "Publisher",
                ..
            }
        ));

        // Nothing written
        assert_eq!(BookEntity::find().count(&db).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn create_with_detail_is_atomic_and_cascade_deleted() {
        let db = setup_db().await;
        let publisher_id = make_publisher(&db, "Acme").await;

        let mut req = request("T", "978-0000000002", publisher_id);
        req.detail = Some(detail("A handbook of agile software craftsmanship"));

        let created = create_book(&db, req).await.expect("create failed");
        let id = created.id.unwrap();
        let nested = created.detail.expect("detail should be populated");
        assert_eq!(nested.language.as_deref(), Some("English"));

        delete_book(&db, id).await.expect("delete failed");

        let orphan = DetailEntity::find()
            .filter(DetailColumn::BookId.eq(id))
            .one(&db)
            .await
            .unwrap();
        assert!(orphan.is_none(), "detail must not outlive its book");

        let err = get_book(&db, id).await.expect_err("book must be gone");
        assert!(matches!(err, ServiceError::NotFound { entity: "Book", .. }));
    }

    #[tokio::test]
    async fn update_skips_isbn_check_when_unchanged() {
        let db = setup_db().await;
        let publisher_id = make_publisher(&db, "Acme").await;

        let created = create_book(&db, request("Old title", "978-0000000003", publisher_id))
            .await
            .unwrap();
        let id = created.id.unwrap();

        // Same isbn, new title: must not trip the uniqueness check.
        let updated = update_book(&db, id, request("New title", "978-0000000003", publisher_id))
            .await
            .expect("update with unchanged isbn failed");
        assert_eq!(updated.title, "New title");
    }

    #[tokio::test]
    async fn update_to_taken_isbn_conflicts() {
        let db = setup_db().await;
        let publisher_id = make_publisher(&db, "Acme").await;

        create_book(&db, request("A", "978-0000000004", publisher_id))
            .await
            .unwrap();
        let b = create_book(&db, request("B", "978-0000000005", publisher_id))
            .await
            .unwrap();

        let err = update_book(
            &db,
            b.id.unwrap(),
            request("B", "978-0000000004", publisher_id),
        )
        .await
        .expect_err("stealing an isbn must fail");
        assert!(matches!(
            err,
            ServiceError::Conflict(ConflictKind::DuplicateIsbn(_))
        ));
    }

    #[tokio::test]
    async fn update_with_missing_publisher_leaves_book_unchanged() {
        let db = setup_db().await;
        let publisher_id = make_publisher(&db, "Acme").await;

        let created = create_book(&db, request("Original", "978-0000000006", publisher_id))
            .await
            .unwrap();
        let id = created.id.unwrap();

        let err = update_book(&db, id, request("Changed", "978-0000000006", 999))
            .await
            .expect_err("unknown publisher must fail");
        assert!(matches!(
            err,
            ServiceError::NotFound {
                entity: "Publisher",
                ..
            }
        ));

        let unchanged = get_book(&db, id).await.unwrap();
        assert_eq!(unchanged.title, "Original");
    }

    #[tokio::test]
    async fn update_creates_or_overwrites_detail_but_never_removes_by_omission() {
        let db = setup_db().await;
        let publisher_id = make_publisher(&db, "Acme").await;

        let created = create_book(&db, request("T", "978-0000000007", publisher_id))
            .await
            .unwrap();
        let id = created.id.unwrap();
        assert!(created.detail.is_none());

        // Supplying a detail payload creates the record.
        let mut req = request("T", "978-0000000007", publisher_id);
        req.detail = Some(detail("first version"));
        let updated = update_book(&db, id, req).await.unwrap();
        assert_eq!(
            updated.detail.as_ref().unwrap().description.as_deref(),
            Some("first version")
        );

        // Supplying it again overwrites in place.
        let mut req = request("T", "978-0000000007", publisher_id);
        req.detail = Some(detail("second version"));
        let updated = update_book(&db, id, req).await.unwrap();
        assert_eq!(
            updated.detail.as_ref().unwrap().description.as_deref(),
            Some("second version")
        );

        // Omitting the payload leaves the existing detail alone.
        let updated = update_book(&db, id, request("T", "978-0000000007", publisher_id))
            .await
            .unwrap();
        assert_eq!(
            updated.detail.as_ref().unwrap().description.as_deref(),
            Some("second version")
        );
    }

    #[tokio::test]
    async fn title_search_is_case_insensitive_substring() {
        let db = setup_db().await;
        let publisher_id = make_publisher(&db, "Acme").await;

        create_book(&db, request("Clean Code", "978-0132350884", publisher_id))
            .await
            .unwrap();

        let hits = search_books_by_title(&db, "clean").await.unwrap();
        assert_eq!(hits.len(), 1);
        let hits = search_books_by_title(&db, "CODE").await.unwrap();
        assert_eq!(hits.len(), 1);
        let hits = search_books_by_title(&db, "xyz").await.unwrap();
        assert!(hits.is_empty());
    }

    #[tokio::test]
    async fn author_search_is_case_insensitive_substring() {
        let db = setup_db().await;
        let publisher_id = make_publisher(&db, "Acme").await;

        create_book(&db, request("Clean Code", "978-0132350884", publisher_id))
            .await
            .unwrap();

        let hits = search_books_by_author(&db, "martin").await.unwrap();
        assert_eq!(hits.len(), 1);
        assert!(search_books_by_author(&db, "tolkien").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn publisher_book_count_tracks_creates_and_deletes() {
        let db = setup_db().await;
        let publisher_id = make_publisher(&db, "Acme").await;

        let mut ids = Vec::new();
        for i in 0..4 {
            let book = create_book(
                &db,
                request(&format!("Book {}", i), &format!("978-00000010{:02}", i), publisher_id),
            )
            .await
            .unwrap();
            ids.push(book.id.unwrap());
        }
        assert_eq!(count_books_by_publisher(&db, publisher_id).await.unwrap(), 4);

        delete_book(&db, ids[0]).await.unwrap();
        delete_book(&db, ids[1]).await.unwrap();
        assert_eq!(count_books_by_publisher(&db, publisher_id).await.unwrap(), 2);

        // Unknown publisher: empty result, not an error.
        assert!(find_books_by_publisher(&db, 12345).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn simple_path_checks_only_isbn_uniqueness() {
        let db = setup_db().await;

        let simple = SimpleBookRequest {
            title: "Standalone".to_owned(),
            author: "Anon".to_owned(),
            isbn: "978-0000002000".to_owned(),
            price: None,
            publish_date: None,
        };

        // No publisher required on this path.
        let created = create_book_simple(&db, simple.clone()).await.unwrap();
        assert!(created.publisher.is_none());

        let err = create_book_simple(&db, simple.clone())
            .await
            .expect_err("duplicate isbn must fail even on the simple path");
        assert!(matches!(
            err,
            ServiceError::Conflict(ConflictKind::DuplicateIsbn(_))
        ));

        let mut renamed = simple.clone();
        renamed.title = "Renamed".to_owned();
        let updated = update_book_simple(&db, created.id.unwrap(), renamed)
            .await
            .unwrap();
        assert_eq!(updated.title, "Renamed");

        let err = delete_book_simple(&db, 9999)
            .await
            .expect_err("missing book must fail");
        assert!(matches!(err, ServiceError::NotFound { entity: "Book", .. }));
    }

    #[tokio::test]
    async fn validation_rejects_malformed_input() {
        let db = setup_db().await;
        let publisher_id = make_publisher(&db, "Acme").await;

        let mut bad_isbn = request("T", "not-an-isbn", publisher_id);
        bad_isbn.isbn = "abc".to_owned();
        assert!(matches!(
            create_book(&db, bad_isbn).await,
            Err(ServiceError::Validation(_))
        ));

        let mut negative_price = request("T", "978-0000003000", publisher_id);
        negative_price.price = Some(-1);
        assert!(matches!(
            create_book(&db, negative_price).await,
            Err(ServiceError::Validation(_))
        ));

        let mut future_date = request("T", "978-0000003001", publisher_id);
        future_date.publish_date = Some("2999-01-01".to_owned());
        assert!(matches!(
            create_book(&db, future_date).await,
            Err(ServiceError::Validation(_))
        ));
    }
}
