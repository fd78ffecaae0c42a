//! Integration tests for HttpService + BlockingHttpService against a real server.
//!
//! Each test spawns an in-process axum server on 127.0.0.1:0 with in-memory SQLite,
//! then exercises the HTTP client layer through the full request/response cycle.

use stockroom_core::Item;
use stockroom_service::{BlockingHttpService, HttpService, ItemService, ServiceError};

async fn spawn_server() -> String {
    let server = stockroom_server::test_helpers::spawn_test_server().await;
    server.base_url
}

// ---- Async HttpService tests ----

#[tokio::test]
async fn health_check_via_http() {
    let url = spawn_server().await;
    let svc = HttpService::new(&url);
    svc.health_check().await.unwrap();
}

#[tokio::test]
async fn item_crud_via_http() {
    let url = spawn_server().await;
    let svc = HttpService::new(&url);

    // Create
    let created = svc.create_item(&Item::new("widget", "blue")).await.unwrap();
    assert_eq!(created, Item::new("widget", "blue"));

    // List
    let all = svc.list_items().await.unwrap();
    assert_eq!(all, vec![Item::new("widget", "blue")]);

    // Update
    let updated = svc
        .update_item("widget", &Item::new("widget", "red"))
        .await
        .unwrap();
    assert_eq!(updated.name, "widget");

    // Get
    let fetched = svc.get_item("widget").await.unwrap();
    assert_eq!(fetched, Item::new("widget", "red"));

    // Delete
    let deleted = svc.delete_item("widget").await.unwrap();
    assert_eq!(deleted.name, "widget");
    assert!(svc.list_items().await.unwrap().is_empty());
}

#[tokio::test]
async fn create_then_list_has_exactly_one_match() {
    let url = spawn_server().await;
    let svc = HttpService::new(&url);

    svc.create_item(&Item::new("bolt", "m6")).await.unwrap();
    svc.create_item(&Item::new("widget", "blue")).await.unwrap();
    let _ = svc.create_item(&Item::new("widget", "blue")).await;

    let matching: Vec<_> = svc
        .list_items()
        .await
        .unwrap()
        .into_iter()
        .filter(|i| i.name == "widget")
        .collect();
    assert_eq!(matching, vec![Item::new("widget", "blue")]);
}

#[tokio::test]
async fn duplicate_create_is_conflict() {
    let url = spawn_server().await;
    let svc = HttpService::new(&url);

    svc.create_item(&Item::new("widget", "blue")).await.unwrap();
    let err = svc
        .create_item(&Item::new("widget", "green"))
        .await
        .unwrap_err();
    match err {
        ServiceError::Conflict(msg) => assert_eq!(msg, "Item with this name already exists"),
        other => panic!("expected conflict, got {other:?}"),
    }
}

#[tokio::test]
async fn unknown_name_is_not_found() {
    let url = spawn_server().await;
    let svc = HttpService::new(&url);

    match svc.get_item("ghost").await.unwrap_err() {
        ServiceError::NotFound(msg) => assert_eq!(msg, "Item not found"),
        other => panic!("expected not found, got {other:?}"),
    }
    assert!(matches!(
        svc.delete_item("ghost").await,
        Err(ServiceError::NotFound(_))
    ));
    assert!(matches!(
        svc.update_item("ghost", &Item::new("ghost", "x")).await,
        Err(ServiceError::NotFound(_))
    ));
}

#[tokio::test]
async fn delete_twice_errors_second_time() {
    let url = spawn_server().await;
    let svc = HttpService::new(&url);

    svc.create_item(&Item::new("widget", "blue")).await.unwrap();
    svc.delete_item("widget").await.unwrap();
    assert!(matches!(
        svc.delete_item("widget").await,
        Err(ServiceError::NotFound(_))
    ));
}

#[tokio::test]
async fn names_with_reserved_characters_round_trip() {
    let url = spawn_server().await;
    let svc = HttpService::new(&url);

    let name = "bin 7/shelf #2?";
    svc.create_item(&Item::new(name, "odd")).await.unwrap();
    assert_eq!(svc.get_item(name).await.unwrap().description, "odd");
    svc.delete_item(name).await.unwrap();
}

#[tokio::test]
async fn blank_name_is_invalid_input() {
    let url = spawn_server().await;
    let svc = HttpService::new(&url);

    assert!(matches!(
        svc.create_item(&Item::new("", "x")).await,
        Err(ServiceError::InvalidInput(_))
    ));
}

#[tokio::test]
async fn update_with_other_name_renames() {
    let url = spawn_server().await;
    let svc = HttpService::new(&url);

    svc.create_item(&Item::new("widget", "blue")).await.unwrap();
    let renamed = svc
        .update_item("widget", &Item::new("gadget", "blue"))
        .await
        .unwrap();
    assert_eq!(renamed.name, "gadget");
    assert!(matches!(
        svc.get_item("widget").await,
        Err(ServiceError::NotFound(_))
    ));
}

// ---- BlockingHttpService tests ----
//
// The blocking client owns its own runtime, so the server lives on a
// separate thread with its own runtime.

fn spawn_server_thread() -> String {
    let (tx, rx) = std::sync::mpsc::sync_channel(1);
    std::thread::spawn(move || {
        let rt = tokio::runtime::Runtime::new().unwrap();
        rt.block_on(async {
            let server = stockroom_server::test_helpers::spawn_test_server().await;
            tx.send(server.base_url.clone()).unwrap();
            std::future::pending::<()>().await;
        });
    });
    rx.recv().unwrap()
}

#[test]
fn blocking_item_crud() {
    let url = spawn_server_thread();
    let svc = BlockingHttpService::new(&url).unwrap();

    svc.health_check().unwrap();
    svc.create_item(&Item::new("widget", "blue")).unwrap();
    assert_eq!(svc.list_items().unwrap().len(), 1);
    svc.update_item("widget", &Item::new("widget", "red"))
        .unwrap();
    assert_eq!(svc.get_item("widget").unwrap().description, "red");
    svc.delete_item("widget").unwrap();
    assert!(svc.list_items().unwrap().is_empty());
}
