#![cfg(feature = "sea-orm")]
//! SeaORM adapter tests against a mock database.

use std::collections::BTreeMap;

use sea_orm::{
    Condition, ColumnTrait, DatabaseBackend, MockDatabase, MockExecResult, Set, Value,
};

use generic_repository::{
    DeleteRepository, Pagination, ReadRepository, RepoError, SeaOrmRepository, WriteRepository,
};

mod article {
    use sea_orm::entity::prelude::*;

    #[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
    #[sea_orm(table_name = "articles")]
    pub struct Model {
        #[sea_orm(primary_key)]
        pub id: i32,
        pub title: String,
        pub published: bool,
    }

    #[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
    pub enum Relation {}

    impl ActiveModelBehavior for ActiveModel {}
}

type ArticleRepo = SeaOrmRepository<article::Entity, article::ActiveModel>;

fn model(id: i32, title: &str) -> article::Model {
    article::Model {
        id,
        title: title.to_string(),
        published: false,
    }
}

#[tokio::test]
async fn find_returns_row() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![model(1, "One")]])
        .into_connection();
    let repo = ArticleRepo::new(db);

    let found = repo.find(1).await.unwrap().unwrap();

    assert_eq!(found.title, "One");
}

#[tokio::test]
async fn find_missing_is_none() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([Vec::<article::Model>::new()])
        .into_connection();
    let repo = ArticleRepo::new(db);

    assert!(repo.find(9).await.unwrap().is_none());
}

#[tokio::test]
async fn get_missing_is_not_found() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([Vec::<article::Model>::new()])
        .into_connection();
    let repo = ArticleRepo::new(db);

    assert!(matches!(
        repo.get(9).await.unwrap_err(),
        RepoError::NotFound
    ));
}

#[tokio::test]
async fn add_returns_inserted_row() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![model(7, "Fresh")]])
        .into_connection();
    let repo = ArticleRepo::new(db);

    let created = repo
        .add(article::ActiveModel {
            title: Set("Fresh".to_string()),
            published: Set(false),
            ..Default::default()
        })
        .await
        .unwrap();

    assert_eq!(created.id, 7);
}

#[tokio::test]
async fn update_checks_existence_then_writes() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([
            vec![model(1, "Old")],     // existence check
            vec![model(1, "Renamed")], // UPDATE .. RETURNING
        ])
        .into_connection();
    let repo = ArticleRepo::new(db);

    let updated = repo
        .update(
            1,
            article::ActiveModel {
                title: Set("Renamed".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    assert_eq!(updated.title, "Renamed");
}

#[tokio::test]
async fn update_missing_is_not_found() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([Vec::<article::Model>::new()])
        .into_connection();
    let repo = ArticleRepo::new(db);

    let result = repo
        .update(
            9,
            article::ActiveModel {
                title: Set("Ghost".to_string()),
                ..Default::default()
            },
        )
        .await;

    assert!(matches!(result.unwrap_err(), RepoError::NotFound));
}

#[tokio::test]
async fn replace_shares_the_write_path() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([
            vec![model(1, "Old")],
            vec![article::Model {
                id: 1,
                title: "Whole".to_string(),
                published: true,
            }],
        ])
        .into_connection();
    let repo = ArticleRepo::new(db);

    let replaced = repo
        .replace(
            1,
            article::ActiveModel {
                title: Set("Whole".to_string()),
                published: Set(true),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    assert!(replaced.published);
}

#[tokio::test]
async fn remove_deletes_row() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_exec_results([MockExecResult {
            last_insert_id: 0,
            rows_affected: 1,
        }])
        .into_connection();
    let repo = ArticleRepo::new(db);

    repo.remove(1).await.unwrap();
}

#[tokio::test]
async fn remove_missing_is_not_found() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_exec_results([MockExecResult {
            last_insert_id: 0,
            rows_affected: 0,
        }])
        .into_connection();
    let repo = ArticleRepo::new(db);

    assert!(matches!(
        repo.remove(9).await.unwrap_err(),
        RepoError::NotFound
    ));
}

#[tokio::test]
async fn list_returns_rows_for_condition() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![model(1, "One"), model(2, "Two")]])
        .into_connection();
    let repo = ArticleRepo::new(db);

    let filter = Condition::all().add(article::Column::Published.eq(false));
    let listed = repo.list(&Pagination::new(0, 10), &filter).await.unwrap();

    assert_eq!(listed.len(), 2);
}

#[tokio::test]
async fn count_reads_num_items() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![BTreeMap::from([(
            "num_items",
            Into::<Value>::into(2i64),
        )])]])
        .into_connection();
    let repo = ArticleRepo::new(db);

    let count = repo.count(&Condition::all()).await.unwrap();

    assert_eq!(count, 2);
}
