use calendar_events::components::event_store::{self, EventStore, NewEvent};
use calendar_events::error::Error;

fn new_event(title: &str) -> NewEvent {
    NewEvent {
        title: title.to_string(),
        start: "2024-01-01".to_string(),
        end: "2024-01-02".to_string(),
        all_day: true,
    }
}

/// Ids handed out by the store keep growing, even across deletes
#[tokio::test]
async fn test_ids_strictly_increase() {
    let store = event_store::open_in_memory().unwrap();

    let first = store.insert_event(new_event("first")).await.unwrap();
    let second = store.insert_event(new_event("second")).await.unwrap();
    store.delete_event(&second.to_string()).await.unwrap();
    let third = store.insert_event(new_event("third")).await.unwrap();

    assert!(first < second);
    assert!(second < third);

    store.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_list_after_creates_and_deletes() {
    let store = event_store::open_in_memory().unwrap();

    let mut ids = Vec::new();
    for i in 0..5 {
        ids.push(store.insert_event(new_event(&format!("event {i}"))).await.unwrap());
    }
    store.delete_event(&ids[1].to_string()).await.unwrap();
    store.delete_event(&ids[3].to_string()).await.unwrap();

    let events = store.list_events().await.unwrap();
    assert_eq!(events.len(), 3);
    assert!(events.iter().all(|e| e.id != ids[1] && e.id != ids[3]));
}

#[tokio::test]
async fn test_delete_missing_id_is_a_no_op() {
    let store = event_store::open_in_memory().unwrap();
    let id = store.insert_event(new_event("keep me")).await.unwrap();

    store.delete_event("9999").await.unwrap();
    store.delete_event("not-a-number").await.unwrap();

    let events = store.list_events().await.unwrap();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].id, id);
}

#[tokio::test]
async fn test_get_matches_string_id() {
    let store = event_store::open_in_memory().unwrap();
    let id = store.insert_event(new_event("lookup")).await.unwrap();

    let event = store.get_event(&id.to_string()).await.unwrap().unwrap();
    assert_eq!(event.id, id);
    assert_eq!(event.title, "lookup");
    assert!(event.all_day);

    assert!(store.get_event("424242").await.unwrap().is_none());
}

#[tokio::test]
async fn test_update_overwrites_all_fields() {
    let store = event_store::open_in_memory().unwrap();
    let id = store.insert_event(new_event("before")).await.unwrap();

    let changed = NewEvent {
        title: "after".to_string(),
        start: "2024-02-01T09:00:00".to_string(),
        end: "2024-02-01T10:00:00".to_string(),
        all_day: false,
    };
    store.update_event(&id.to_string(), changed.clone()).await.unwrap();

    let event = store.get_event(&id.to_string()).await.unwrap().unwrap();
    assert_eq!(event, changed.with_id(id));
}

#[tokio::test]
async fn test_update_missing_row_succeeds_silently() {
    let store = event_store::open_in_memory().unwrap();
    store.update_event("77", new_event("ghost")).await.unwrap();
    assert!(store.list_events().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_calls_after_shutdown_fail() {
    let store = event_store::open_in_memory().unwrap();
    store.shutdown().await.unwrap();

    let result = store.list_events().await;
    assert!(matches!(result, Err(Error::StoreUnavailable(_))));

    // A second shutdown is harmless
    store.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_events_survive_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("schedule.sqlite3");

    let store = event_store::open(&path).unwrap();
    let id = store.insert_event(new_event("persisted")).await.unwrap();
    store.shutdown().await.unwrap();

    let store = event_store::open(&path).unwrap();
    let events = store.list_events().await.unwrap();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].id, id);
    assert_eq!(events[0].title, "persisted");
    store.shutdown().await.unwrap();
}
