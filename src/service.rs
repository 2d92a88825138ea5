//! Event CRUD rules on top of an [`EventStore`].
//!
//! Request validation is limited to presence checks. Ids are forwarded to
//! storage as strings; on update the path id and the body id must first
//! agree as integers.

use crate::components::event_store::models::{column_text, flag_value};
use crate::components::event_store::{Event, EventPayload, EventStore, NewEvent};
use crate::error::{validation_error, AppResult, Error};
use serde_json::Value;
use std::sync::Arc;
use tracing::warn;

pub const MISSING_FIELDS_MESSAGE: &str = "Missing required fields in event object";
pub const ID_MISMATCH_MESSAGE: &str =
    "Event Id query parameter does not match the Id of the passed event object";

/// CRUD operations over calendar events
#[derive(Clone)]
pub struct EventService {
    store: Arc<dyn EventStore>,
}

impl EventService {
    pub fn new(store: Arc<dyn EventStore>) -> Self {
        Self { store }
    }

    pub async fn list(&self) -> AppResult<Vec<Event>> {
        self.store.list_events().await
    }

    /// Fetch a single event, `NotFound` if no row matches
    pub async fn get(&self, id: &str) -> AppResult<Event> {
        self.store
            .get_event(id)
            .await?
            .ok_or_else(|| Error::NotFound(id.to_string()))
    }

    /// Validate and insert; returns the id assigned by storage
    pub async fn create(&self, payload: EventPayload) -> AppResult<i64> {
        let event = payload.into_new_event()?;
        self.store.insert_event(event).await
    }

    /// Overwrite the event named by the body id.
    ///
    /// Presence is checked first, then the path id and the body id must
    /// agree under `parseInt` rules. The body id goes to storage as sent.
    pub async fn update(&self, path_id: &str, mut payload: EventPayload) -> AppResult<()> {
        if !payload.has_required_fields() {
            return Err(validation_error(MISSING_FIELDS_MESSAGE));
        }

        let body_id = payload.id.take();
        let row_id = match (parse_int(path_id), body_id.as_ref().and_then(json_to_int)) {
            (Some(path), Some(body)) if path == body => body_id.clone().map(column_text),
            _ => None,
        };
        let Some(row_id) = row_id else {
            warn!(
                "Rejected update: path id {:?} does not match body id {:?}",
                path_id, body_id
            );
            return Err(Error::Mismatch(ID_MISMATCH_MESSAGE.to_string()));
        };

        let event = payload.into_new_event()?;
        self.store.update_event(&row_id, event).await
    }

    pub async fn delete(&self, id: &str) -> AppResult<()> {
        self.store.delete_event(id).await
    }

    /// Close the underlying store
    pub async fn shutdown(&self) -> AppResult<()> {
        self.store.shutdown().await
    }
}

impl EventPayload {
    /// Require all four business fields and turn them into column values
    pub fn into_new_event(self) -> AppResult<NewEvent> {
        match (self.title, self.start, self.end, self.all_day) {
            (Some(title), Some(start), Some(end), Some(all_day)) => {
                let all_day = flag_value(&all_day).ok_or_else(|| {
                    Error::Constraint(format!("allDay IN (0, 1), got {}", all_day))
                })?;
                Ok(NewEvent {
                    title: column_text(title),
                    start: column_text(start),
                    end: column_text(end),
                    all_day,
                })
            }
            _ => Err(validation_error(MISSING_FIELDS_MESSAGE)),
        }
    }
}

/// Integer prefix of `raw`, read like JavaScript's `parseInt(raw, 10)`.
///
/// Leading whitespace and a sign are allowed and trailing garbage is
/// ignored; `None` when no digit follows. The result is a double, so digit
/// runs past the integer range still compare equal to themselves.
pub fn parse_int(raw: &str) -> Option<f64> {
    let trimmed = raw.trim_start();
    let (negative, rest) = match trimmed.as_bytes().first().copied() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };

    let digits_len = rest.bytes().take_while(u8::is_ascii_digit).count();
    if digits_len == 0 {
        return None;
    }

    let magnitude: f64 = rest[..digits_len].parse().ok()?;
    Some(if negative { -magnitude } else { magnitude })
}

fn json_to_int(value: &Value) -> Option<f64> {
    match value {
        Value::Number(number) => parse_int(&number.to_string()),
        Value::String(raw) => parse_int(raw),
        _ => None,
    }
}
