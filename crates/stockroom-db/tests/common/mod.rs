// Backend-agnostic integration tests for the Database trait.
//
// Each public async function accepts `&dyn Database` so the same assertions
// can be pointed at any backend.

use stockroom_core::Item;
use stockroom_db::{Database, DbError};

/// Create, get, list, update and delete a single item.
pub async fn test_item_crud(db: &dyn Database) {
    let created = db.create_item(&Item::new("widget", "blue")).await.unwrap();
    assert_eq!(created, Item::new("widget", "blue"));

    let fetched = db.get_item("widget").await.unwrap();
    assert_eq!(fetched, created);

    let all = db.list_items().await.unwrap();
    assert_eq!(all, vec![Item::new("widget", "blue")]);

    let updated = db
        .update_item("widget", &Item::new("widget", "red"))
        .await
        .unwrap();
    assert_eq!(updated.name, "widget");
    assert_eq!(db.get_item("widget").await.unwrap().description, "red");

    let deleted = db.delete_item("widget").await.unwrap();
    assert_eq!(deleted.description, "red");
    assert!(db.list_items().await.unwrap().is_empty());
}

/// A second create under the same name must not produce a second row.
pub async fn test_duplicate_create(db: &dyn Database) {
    db.create_item(&Item::new("widget", "blue")).await.unwrap();
    let err = db
        .create_item(&Item::new("widget", "blue"))
        .await
        .unwrap_err();
    assert!(matches!(err, DbError::Conflict(_)));

    let matching: Vec<_> = db
        .list_items()
        .await
        .unwrap()
        .into_iter()
        .filter(|i| i.name == "widget")
        .collect();
    assert_eq!(matching.len(), 1);
}

/// Operations on a name that was never created.
pub async fn test_missing_item(db: &dyn Database) {
    assert!(matches!(
        db.get_item("ghost").await,
        Err(DbError::NotFound(_))
    ));
    assert!(matches!(
        db.update_item("ghost", &Item::new("ghost", "x")).await,
        Err(DbError::NotFound(_))
    ));
    assert!(matches!(
        db.delete_item("ghost").await,
        Err(DbError::NotFound(_))
    ));
}

/// Deleting twice: the second attempt is an error, not a silent success.
pub async fn test_delete_is_not_idempotent(db: &dyn Database) {
    db.create_item(&Item::new("widget", "blue")).await.unwrap();
    db.delete_item("widget").await.unwrap();
    assert!(matches!(
        db.delete_item("widget").await,
        Err(DbError::NotFound(_))
    ));
}
