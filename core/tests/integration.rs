//! End-to-end tests against the live mock server.
//!
//! # Design
//! Each test starts its own mock server on a random port, then drives the
//! real `ReqwestTransport` through `RemoteStore` and `TodoStore`. This checks
//! request building and response parsing against the server's actual schema.

use todo_client::{
    ActionError, ApiError, ClientConfig, Filter, ListQuery, RemoteStore, ReqwestTransport, TodoId,
    TodoCreate, TodoStore, TodoUpdate,
};

async fn spawn_server() -> ClientConfig {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(mock_server::run(listener));
    ClientConfig::new(format!("http://{addr}/api/v1"))
}

fn yes(_: &str) -> bool {
    true
}

fn session(config: &ClientConfig) -> TodoStore<ReqwestTransport, fn(&str) -> bool> {
    TodoStore::new(RemoteStore::connect(config), yes as fn(&str) -> bool)
}

#[tokio::test]
async fn remote_crud_lifecycle() {
    let config = spawn_server().await;
    let remote = RemoteStore::connect(&config);

    let health = remote.health().await.unwrap();
    assert_eq!(health.status, "healthy");

    let page = remote.list(&ListQuery::default()).await.unwrap();
    assert!(page.items.is_empty(), "expected empty list");

    let created = remote
        .create(&TodoCreate::new("Integration test").with_description("over http"))
        .await
        .unwrap();
    assert_eq!(created.title, "Integration test");
    assert_eq!(created.description.as_deref(), Some("over http"));
    assert_eq!(created.created_at, created.updated_at);
    let id = created.id;

    let fetched = remote.get(id).await.unwrap();
    assert_eq!(fetched, created);

    let updated = remote
        .update(id, &TodoUpdate { title: Some("Updated title".into()), ..TodoUpdate::default() })
        .await
        .unwrap();
    assert_eq!(updated.title, "Updated title");
    assert!(!updated.completed);
    assert!(updated.updated_at >= updated.created_at);

    let updated = remote.update(id, &TodoUpdate::completed(true)).await.unwrap();
    assert_eq!(updated.title, "Updated title");
    assert!(updated.completed);

    let done = remote
        .list(&ListQuery::for_filter(Filter::Completed))
        .await
        .unwrap();
    assert_eq!(done.total, 1);
    let open = remote.list(&ListQuery::for_filter(Filter::Active)).await.unwrap();
    assert_eq!(open.total, 0);

    remote.delete(id).await.unwrap();
    let err = remote.get(id).await.unwrap_err();
    assert!(matches!(err, ApiError::NotFound));

    // Deleting again is not an error for the caller.
    remote.delete(id).await.unwrap();
}

#[tokio::test]
async fn update_of_unknown_id_reports_404() {
    let config = spawn_server().await;
    let remote = RemoteStore::connect(&config);
    let err = remote
        .update(TodoId(999), &TodoUpdate::completed(true))
        .await
        .unwrap_err();
    assert_eq!(err.status(), Some(404));
}

#[tokio::test]
async fn server_side_validation_surfaces_as_http_error() {
    let config = spawn_server().await;
    let remote = RemoteStore::connect(&config);
    let err = remote
        .create(&TodoCreate::new("x".repeat(300)))
        .await
        .unwrap_err();
    assert!(matches!(err, ApiError::Http { status: 422, .. }));
}

#[tokio::test]
async fn write_report_scenario() {
    let config = spawn_server().await;
    let mut store = session(&config);
    store.fetch_all().await.unwrap();
    assert!(store.todos().is_empty());

    let todo = store.add("Write report", None).await.unwrap();
    assert_eq!(store.todos().len(), 1);
    assert_eq!(store.todos()[0].title, "Write report");
    assert!(!store.todos()[0].completed);
    assert!(store.success_message().unwrap().contains("Write report"));

    store.clear_completed().await.unwrap();
    assert_eq!(store.todos().len(), 1);

    store.toggle_complete(todo.id, true).await.unwrap();
    assert!(store.todos()[0].completed);

    store.clear_completed().await.unwrap();
    assert!(store.todos().is_empty());

    store.fetch_all().await.unwrap();
    assert!(store.todos().is_empty());
}

#[tokio::test]
async fn buy_milk_round_trip() {
    let config = spawn_server().await;
    let mut store = session(&config);

    let todo = store.add("Buy milk", None).await.unwrap();
    store.toggle_complete(todo.id, true).await.unwrap();
    store.fetch_all().await.unwrap();

    assert_eq!(store.todos().len(), 1);
    assert_eq!(store.todos()[0].title, "Buy milk");
    assert!(store.todos()[0].completed);
}

#[tokio::test]
async fn stats_stay_consistent_through_a_session() {
    let config = spawn_server().await;
    let mut store = session(&config);

    let mut ids = Vec::new();
    for title in ["a", "b", "c", "d"] {
        ids.push(store.add(title, None).await.unwrap().id);
        let s = store.stats();
        assert_eq!(s.completed + s.active, s.total);
    }
    store.toggle_complete(ids[1], true).await.unwrap();
    store.toggle_complete(ids[3], true).await.unwrap();
    store.remove(ids[0]).await.unwrap();

    let s = store.stats();
    assert_eq!((s.total, s.completed, s.active), (3, 2, 1));

    store.set_filter(Filter::Completed);
    let titles: Vec<&str> = store.filtered_todos().iter().map(|t| t.title.as_str()).collect();
    assert_eq!(titles, vec!["b", "d"]);
}

#[tokio::test]
async fn clear_all_honours_the_prompt() {
    let config = spawn_server().await;
    let mut declined = TodoStore::new(RemoteStore::connect(&config), |_: &str| false);
    declined.add("keep", None).await.unwrap();
    assert!(matches!(declined.clear_all().await, Err(ActionError::Cancelled)));

    let mut store = session(&config);
    store.fetch_all().await.unwrap();
    assert_eq!(store.todos().len(), 1);
    store.clear_all().await.unwrap();
    assert!(store.todos().is_empty());

    store.fetch_all().await.unwrap();
    assert!(store.todos().is_empty());
}

#[tokio::test]
async fn unreachable_server_sets_error_and_keeps_cache() {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let config = ClientConfig::new(format!("http://{addr}/api/v1"));
    let mut store = session(&config);
    let err = store.fetch_all().await.unwrap_err();
    assert!(matches!(err, ActionError::Remote(ApiError::Network(_))));
    assert!(store.error().is_some());
    assert!(!store.is_loading());
    assert!(store.todos().is_empty());
}
