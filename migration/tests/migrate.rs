use migration::{Migrator, MigratorTrait};
use sea_orm_migration::sea_orm::{ConnectionTrait, Database, Statement};

async fn table_count(db: &impl ConnectionTrait) -> i64 {
    let row = db
        .query_one(Statement::from_string(
            db.get_database_backend(),
            "SELECT COUNT(*) AS n FROM sqlite_master WHERE type = 'table' \
             AND name NOT LIKE 'sqlite_%' AND name <> 'seaql_migrations'",
        ))
        .await
        .unwrap()
        .unwrap();
    row.try_get("", "n").unwrap()
}

#[tokio::test]
async fn up_and_down_on_sqlite() {
    let db = Database::connect("sqlite::memory:").await.unwrap();

    Migrator::up(&db, None).await.unwrap();
    assert_eq!(Migrator::get_applied_migrations(&db).await.unwrap().len(), 6);
    assert!(Migrator::get_pending_migrations(&db).await.unwrap().is_empty());
    assert_eq!(table_count(&db).await, 45);

    Migrator::down(&db, None).await.unwrap();
    assert_eq!(table_count(&db).await, 0);
}
