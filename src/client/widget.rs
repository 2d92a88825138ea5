//! Contracts of the UI collaborators the controller drives.
//!
//! The month grid, gesture recognition and the dropdown itself live outside
//! this crate; they only have to implement these traits.

use crate::components::event_store::Event;
use crate::error::Error;

/// A date range picked on the calendar grid
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    pub start: String,
    pub end: String,
    pub all_day: bool,
}

/// Where a right-click landed: the target's bounding box origin plus the
/// pointer offset inside the target
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ContextClick {
    pub rect_left: f64,
    pub rect_top: f64,
    pub offset_x: f64,
    pub offset_y: f64,
}

impl ContextClick {
    /// Page coordinates of the click
    pub fn position(&self) -> (f64, f64) {
        (
            self.rect_left + self.offset_x,
            self.rect_top + self.offset_y,
        )
    }
}

/// The calendar rendering widget
pub trait CalendarWidget {
    /// Drop every event the widget has cached
    fn remove_all_events(&mut self);

    /// Success path of an event fetch
    fn load_events(&mut self, events: Vec<Event>);

    /// Failure path of an event fetch
    fn fetch_failed(&mut self, error: &Error);

    fn add_event(&mut self, event: Event);

    fn remove_event(&mut self, id: i64);

    /// Clear the current range selection
    fn unselect(&mut self);
}

/// The context dropdown shown over an event
pub trait DropdownMenu {
    fn show(&mut self);
    fn hide(&mut self);
    fn move_to(&mut self, left: f64, top: f64);
}

/// Blocking free-text prompt; `None` when cancelled
pub trait TitlePrompt {
    fn prompt(&mut self, message: &str) -> Option<String>;
}
