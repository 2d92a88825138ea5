//! Calendar client: drives a calendar widget from user gestures and keeps
//! it in sync with the event service.

mod api;
mod controller;
mod dropdown;
mod widget;

pub use api::{EventApi, HttpEventApi};
pub use controller::{CalendarController, TITLE_PROMPT};
pub use dropdown::DropdownState;
pub use widget::{CalendarWidget, ContextClick, DropdownMenu, Selection, TitlePrompt};
