//! Demo data: a couple of publishers and books with details, inserted once.

use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait,
    PaginatorTrait, QueryFilter, Set};

use crate::models::{book, book_detail, publisher};

pub async fn seed_demo_data(db: &DatabaseConnection) -> Result<(), DbErr> {
    if book::Entity::find().count(db).await? > 0 {
        tracing::info!("Books already present, skipping demo seed");
        return Ok(());
    }

    let now = chrono::Utc::now().to_rfc3339();

    // 1. Publishers
    for (name, established, address) in [
        ("O'Reilly Media", "1978-01-01", "Sebastopol, CA"),
        ("Addison-Wesley", "1942-01-01", "Boston, MA"),
    ] {
        let new_publisher = publisher::ActiveModel {
            name: Set(name.to_owned()),
            established_date: Set(Some(established.to_owned())),
            address: Set(Some(address.to_owned())),
            created_at: Set(now.clone()),
            updated_at: Set(now.clone()),
            ..Default::default()
        };
        publisher::Entity::insert(new_publisher)
            .on_conflict(
                sea_orm::sea_query::OnConflict::column(publisher::Column::Name)
                    .do_nothing()
                    .to_owned(),
            )
            .exec(db)
            .await?;
    }

    let oreilly = publisher::Entity::find()
        .filter(publisher::Column::Name.eq("O'Reilly Media"))
        .one(db)
        .await?
        .map(|p| p.id);
    let addison = publisher::Entity::find()
        .filter(publisher::Column::Name.eq("Addison-Wesley"))
        .one(db)
        .await?
        .map(|p| p.id);

    // 2. Books, some with details, one without a publisher
    let books: [(&str, &str, &str, Option<i32>, &str, Option<i32>, Option<(&str, &str, i32, &str)>); 4] = [
        (
            "Python Cookbook",
            "David Beazley",
            "978-1449340377",
            Some(4200),
            "2013-05-20",
            oreilly,
            Some(("Recipes for mastering Python 3", "English", 706, "3rd Edition")),
        ),
        (
            "Programming Rust",
            "Jim Blandy",
            "978-1492052593",
            Some(5500),
            "2021-06-22",
            oreilly,
            Some(("Fast, safe systems development", "English", 738, "2nd Edition")),
        ),
        (
            "The Pragmatic Programmer",
            "David Thomas",
            "978-0135957059",
            Some(4400),
            "2019-09-13",
            addison,
            Some(("Your journey to mastery", "English", 352, "20th Anniversary Edition")),
        ),
        (
            "Self-Published Notes",
            "Jane Doe",
            "978-0000000099",
            None,
            "2024-01-01",
            None,
            None,
        ),
    ];

    for (title, author, isbn, price, publish_date, publisher_id, detail) in books {
        let new_book = book::ActiveModel {
            title: Set(title.to_owned()),
            author: Set(author.to_owned()),
            isbn: Set(isbn.to_owned()),
            price: Set(price),
            publish_date: Set(Some(publish_date.to_owned())),
            publisher_id: Set(publisher_id),
            created_at: Set(now.clone()),
            updated_at: Set(now.clone()),
            ..Default::default()
        };
        let model = new_book.insert(db).await?;

        if let Some((description, language, page_count, edition)) = detail {
            let new_detail = book_detail::ActiveModel {
                book_id: Set(model.id),
                description: Set(Some(description.to_owned())),
                language: Set(Some(language.to_owned())),
                page_count: Set(Some(page_count)),
                publisher: Set(None),
                cover_image_url: Set(None),
                edition: Set(Some(edition.to_owned())),
                ..Default::default()
            };
            new_detail.insert(db).await?;
        }
    }

    tracing::info!("Seeded {} demo books", books.len());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn seed_is_idempotent() {
        let db = crate::db::init_db("sqlite::memory:")
            .await
            .expect("Failed to init db");

        seed_demo_data(&db).await.expect("first seed failed");
        let count = book::Entity::find().count(&db).await.unwrap();
        assert!(count > 0);

        seed_demo_data(&db).await.expect("second seed failed");
        assert_eq!(book::Entity::find().count(&db).await.unwrap(), count);
    }
}
