mod actor;
pub mod models;
pub mod schema;

pub use actor::{EventStoreActor, EventStoreHandle, StoreCommand};
pub use models::{Event, EventPayload, NewEvent};

use crate::error::AppResult;
use async_trait::async_trait;
use std::path::Path;

/// Persistent storage for calendar events
#[async_trait]
pub trait EventStore: Send + Sync + 'static {
    /// All events in storage order
    async fn list_events(&self) -> AppResult<Vec<Event>>;

    /// Look up one event; the id is handed to storage uncoerced
    async fn get_event(&self, id: &str) -> AppResult<Option<Event>>;

    /// Insert a new row and return the id storage assigned to it
    async fn insert_event(&self, event: NewEvent) -> AppResult<i64>;

    /// Overwrite all fields of the row with this id; a missing row is not an error.
    ///
    /// Like lookups, the id is handed to storage uncoerced.
    async fn update_event(&self, id: &str, event: NewEvent) -> AppResult<()>;

    /// Remove the row with this id; a missing row is not an error
    async fn delete_event(&self, id: &str) -> AppResult<()>;

    /// Close the underlying storage
    async fn shutdown(&self) -> AppResult<()>;
}

/// Open the database file and start the store actor on it
pub fn open(path: impl AsRef<Path>) -> AppResult<EventStoreHandle> {
    let conn = schema::open_db(path)?;
    EventStoreHandle::spawn(conn)
}

/// Start a store actor on a fresh in-memory database
pub fn open_in_memory() -> AppResult<EventStoreHandle> {
    let conn = schema::open_db_in_memory()?;
    EventStoreHandle::spawn(conn)
}
