use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A stored calendar event
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    pub id: i64,
    pub title: String,
    pub start: String,
    pub end: String,
    #[serde(rename = "allDay")]
    pub all_day: bool,
}

/// The four business fields of an event, without an id
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewEvent {
    pub title: String,
    pub start: String,
    pub end: String,
    #[serde(rename = "allDay")]
    pub all_day: bool,
}

impl NewEvent {
    /// Attach a storage id
    pub fn with_id(self, id: i64) -> Event {
        Event {
            id,
            title: self.title,
            start: self.start,
            end: self.end,
            all_day: self.all_day,
        }
    }
}

impl From<Event> for NewEvent {
    fn from(event: Event) -> Self {
        Self {
            title: event.title,
            start: event.start,
            end: event.end,
            all_day: event.all_day,
        }
    }
}

/// Body of create and update requests.
///
/// Fields are kept as raw JSON: a missing or `null` field reaches the
/// presence check instead of failing deserialization, and present values
/// of any type are stored the way the column affinity would store them.
/// `id` may arrive either as a number or as a string.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct EventPayload {
    #[serde(default)]
    pub id: Option<Value>,
    #[serde(default)]
    pub title: Option<Value>,
    #[serde(default)]
    pub start: Option<Value>,
    #[serde(default)]
    pub end: Option<Value>,
    #[serde(rename = "allDay", default)]
    pub all_day: Option<Value>,
}

impl EventPayload {
    /// All four business fields are present and not `null`
    pub fn has_required_fields(&self) -> bool {
        self.title.is_some() && self.start.is_some() && self.end.is_some() && self.all_day.is_some()
    }
}

/// Text stored in a TEXT column for a JSON value
pub fn column_text(value: Value) -> String {
    match value {
        Value::String(text) => text,
        Value::Bool(flag) => u8::from(flag).to_string(),
        other => other.to_string(),
    }
}

/// Reads an `allDay` value the way the BOOLEAN column's numeric affinity does.
///
/// `None` when the stored value could not satisfy `allDay IN (0, 1)`.
pub fn flag_value(value: &Value) -> Option<bool> {
    let number = match value {
        Value::Bool(flag) => return Some(*flag),
        Value::Number(number) => number.as_f64()?,
        Value::String(text) => text.trim().parse::<f64>().ok()?,
        _ => return None,
    };

    if number == 0.0 {
        Some(false)
    } else if number == 1.0 {
        Some(true)
    } else {
        None
    }
}
