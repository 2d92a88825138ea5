use super::models::{Event, NewEvent};
use super::EventStore;
use crate::error::{store_error, AppResult};
use async_trait::async_trait;
use rusqlite::{params, Connection, OptionalExtension, Row};
use std::thread;
use tokio::sync::{mpsc, oneshot};
use tracing::{error, info};

const EVENT_SELECT_SQL: &str = r#"SELECT id, title, start, "end", allDay FROM event"#;

/// Capacity of the actor mailbox
const MAILBOX_SIZE: usize = 32;

/// The event store actor; sole owner of the SQLite connection
pub struct EventStoreActor {
    conn: Connection,
    command_rx: mpsc::Receiver<StoreCommand>,
}

/// Commands that can be sent to the event store actor
pub enum StoreCommand {
    List(oneshot::Sender<AppResult<Vec<Event>>>),
    Get(String, oneshot::Sender<AppResult<Option<Event>>>),
    Insert(NewEvent, oneshot::Sender<AppResult<i64>>),
    Update(String, NewEvent, oneshot::Sender<AppResult<()>>),
    Delete(String, oneshot::Sender<AppResult<()>>),
    Shutdown(oneshot::Sender<()>),
}

/// Handle for communicating with the event store actor
#[derive(Clone)]
pub struct EventStoreHandle {
    command_tx: mpsc::Sender<StoreCommand>,
}

impl EventStoreHandle {
    /// Start the actor on its own thread and return a handle to it
    pub fn spawn(conn: Connection) -> AppResult<Self> {
        let (actor, handle) = EventStoreActor::new(conn);
        thread::Builder::new()
            .name("event-store".to_string())
            .spawn(move || actor.run())?;
        Ok(handle)
    }

    async fn request<T>(
        &self,
        command: impl FnOnce(oneshot::Sender<AppResult<T>>) -> StoreCommand,
    ) -> AppResult<T> {
        let (response_tx, response_rx) = oneshot::channel();
        self.command_tx
            .send(command(response_tx))
            .await
            .map_err(|e| store_error(&format!("Actor mailbox error: {}", e)))?;

        response_rx
            .await
            .map_err(|_| store_error("Response channel closed"))?
    }
}

#[async_trait]
impl EventStore for EventStoreHandle {
    async fn list_events(&self) -> AppResult<Vec<Event>> {
        self.request(StoreCommand::List).await
    }

    async fn get_event(&self, id: &str) -> AppResult<Option<Event>> {
        let id = id.to_string();
        self.request(|tx| StoreCommand::Get(id, tx)).await
    }

    async fn insert_event(&self, event: NewEvent) -> AppResult<i64> {
        self.request(|tx| StoreCommand::Insert(event, tx)).await
    }

    async fn update_event(&self, id: &str, event: NewEvent) -> AppResult<()> {
        let id = id.to_string();
        self.request(|tx| StoreCommand::Update(id, event, tx)).await
    }

    async fn delete_event(&self, id: &str) -> AppResult<()> {
        let id = id.to_string();
        self.request(|tx| StoreCommand::Delete(id, tx)).await
    }

    async fn shutdown(&self) -> AppResult<()> {
        let (done_tx, done_rx) = oneshot::channel();
        if self
            .command_tx
            .send(StoreCommand::Shutdown(done_tx))
            .await
            .is_err()
        {
            // Already stopped
            return Ok(());
        }
        let _ = done_rx.await;
        Ok(())
    }
}

impl EventStoreActor {
    /// Create a new actor and return its handle
    pub fn new(conn: Connection) -> (Self, EventStoreHandle) {
        let (command_tx, command_rx) = mpsc::channel(MAILBOX_SIZE);

        let actor = Self { conn, command_rx };
        let handle = EventStoreHandle { command_tx };

        (actor, handle)
    }

    /// Process commands until shutdown or until every handle is dropped.
    ///
    /// Blocks the calling thread.
    pub fn run(mut self) {
        info!("Event store actor started");

        let mut shutdown_ack = None;
        while let Some(cmd) = self.command_rx.blocking_recv() {
            match cmd {
                StoreCommand::List(response_tx) => {
                    let _ = response_tx.send(self.list_events());
                }
                StoreCommand::Get(id, response_tx) => {
                    let _ = response_tx.send(self.get_event(&id));
                }
                StoreCommand::Insert(event, response_tx) => {
                    let _ = response_tx.send(self.insert_event(&event));
                }
                StoreCommand::Update(id, event, response_tx) => {
                    let _ = response_tx.send(self.update_event(&id, &event));
                }
                StoreCommand::Delete(id, response_tx) => {
                    let _ = response_tx.send(self.delete_event(&id));
                }
                StoreCommand::Shutdown(done_tx) => {
                    info!("Event store actor shutting down");
                    shutdown_ack = Some(done_tx);
                    break;
                }
            }
        }

        self.command_rx.close();
        if let Err((_, e)) = self.conn.close() {
            error!("Failed to close event database: {}", e);
        }
        info!("Event store actor shut down");

        if let Some(done_tx) = shutdown_ack {
            let _ = done_tx.send(());
        }
    }

    fn list_events(&self) -> AppResult<Vec<Event>> {
        let mut stmt = self.conn.prepare_cached(EVENT_SELECT_SQL)?;
        let events = stmt
            .query_map([], map_event_row)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(events)
    }

    /// `id` is bound as given; column affinity lets "5" match row 5
    fn get_event(&self, id: &str) -> AppResult<Option<Event>> {
        let sql = format!("{} WHERE id = ?1", EVENT_SELECT_SQL);
        let event = self
            .conn
            .query_row(&sql, params![id], map_event_row)
            .optional()?;
        Ok(event)
    }

    fn insert_event(&self, event: &NewEvent) -> AppResult<i64> {
        self.conn.execute(
            r#"INSERT INTO event (title, start, "end", allDay) VALUES (?1, ?2, ?3, ?4)"#,
            params![event.title, event.start, event.end, event.all_day],
        )?;

        let id: i64 = self.conn.query_row(
            "SELECT id FROM event WHERE id = last_insert_rowid()",
            [],
            |row| row.get(0),
        )?;

        info!("Created event {} ({})", id, event.title);
        Ok(id)
    }

    fn update_event(&self, id: &str, event: &NewEvent) -> AppResult<()> {
        let changed = self.conn.execute(
            r#"UPDATE event SET title = ?1, start = ?2, "end" = ?3, allDay = ?4 WHERE id = ?5"#,
            params![event.title, event.start, event.end, event.all_day, id],
        )?;

        info!("Updated event {} ({} row(s))", id, changed);
        Ok(())
    }

    fn delete_event(&self, id: &str) -> AppResult<()> {
        let changed = self
            .conn
            .execute("DELETE FROM event WHERE id = ?1", params![id])?;

        info!("Deleted event {} ({} row(s))", id, changed);
        Ok(())
    }
}

fn map_event_row(row: &Row<'_>) -> rusqlite::Result<Event> {
    Ok(Event {
        id: row.get(0)?,
        title: row.get(1)?,
        start: row.get(2)?,
        end: row.get(3)?,
        all_day: row.get(4)?,
    })
}
