//! Integration tests for schema initialization using in-memory SurrealDB.

use surrealdb::Surreal;
use surrealdb::engine::local::Mem;

#[tokio::test]
async fn schema_migration_applies_successfully() {
    let db = Surreal::new::<Mem>(()).await.unwrap();
    db.use_ns("test").use_db("test").await.unwrap();

    innkeep_db::run_migrations(&db).await.unwrap();

    let mut result = db.query("INFO FOR DB").await.unwrap();
    let info: Option<surrealdb_types::Value> = result.take(0).unwrap();
    let info = info.expect("INFO FOR DB should return a value");
    let info_str = format!("{:?}", info);

    assert!(info_str.contains("user"), "missing user table");
    assert!(info_str.contains("hotel"), "missing hotel table");
    assert!(info_str.contains("_migration"), "missing _migration table");
}

#[tokio::test]
async fn migrations_are_idempotent() {
    let db = Surreal::new::<Mem>(()).await.unwrap();
    db.use_ns("test").use_db("test").await.unwrap();

    innkeep_db::run_migrations(&db).await.unwrap();
    innkeep_db::run_migrations(&db).await.unwrap();

    let mut result = db.query("SELECT version FROM _migration").await.unwrap();
    let applied: Vec<surrealdb_types::Value> = result.take(0).unwrap();
    assert_eq!(applied.len(), 2);
}

#[tokio::test]
async fn hotel_star_rating_is_asserted() {
    let db = Surreal::new::<Mem>(()).await.unwrap();
    db.use_ns("test").use_db("test").await.unwrap();
    innkeep_db::run_migrations(&db).await.unwrap();

    let result = db
        .query(
            "CREATE hotel SET user_id = 'u', name = 'n', city = 'c', \
             country = 'x', description = 'd', hotel_type = 'Budget', \
             adult_count = 1, child_count = 0, facilities = ['wifi'], \
             price_per_night = 10.0, star_rating = 9, image_urls = [], \
             last_updated = time::now()",
        )
        .await
        .unwrap();

    assert!(result.check().is_err(), "star_rating 9 should be rejected");
}
