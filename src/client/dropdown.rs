use crate::components::event_store::Event;

/// UI state behind the event context dropdown.
///
/// Owned by the controller; position is in page pixels.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DropdownState {
    current: Option<Event>,
    open: bool,
    just_opened: bool,
    left: f64,
    top: f64,
    last_scroll_y: f64,
}

impl DropdownState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Open over `event` at the given position
    pub fn open_at(&mut self, event: Event, left: f64, top: f64) {
        self.current = Some(event);
        self.open = true;
        self.just_opened = true;
        self.left = left;
        self.top = top;
    }

    pub fn close(&mut self) {
        self.current = None;
        self.open = false;
        self.just_opened = false;
    }

    /// Pointer left the hovered event. Returns `true` when the dropdown
    /// was opened by that same hover and must stay visible.
    pub fn leave(&mut self) -> bool {
        if self.open && self.just_opened {
            self.just_opened = false;
            return true;
        }
        false
    }

    /// Page scrolled to `scroll_y`; shifts the dropdown by the scroll delta
    /// and returns the new top
    pub fn scroll_to(&mut self, scroll_y: f64) -> f64 {
        let scrolled = scroll_y - self.last_scroll_y;
        self.last_scroll_y = scroll_y;
        self.top -= scrolled;
        self.top
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    /// Event the dropdown actions apply to
    pub fn current(&self) -> Option<&Event> {
        self.current.as_ref()
    }

    pub fn position(&self) -> (f64, f64) {
        (self.left, self.top)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn event() -> Event {
        Event {
            id: 1,
            title: "Dentist".to_string(),
            start: "2024-03-04T10:00:00".to_string(),
            end: "2024-03-04T11:00:00".to_string(),
            all_day: false,
        }
    }

    #[test]
    fn test_scroll_shifts_by_delta() {
        let mut state = DropdownState::new();
        state.open_at(event(), 100.0, 400.0);

        assert_eq!(state.scroll_to(50.0), 350.0);
        assert_eq!(state.scroll_to(80.0), 320.0);
        assert_eq!(state.scroll_to(20.0), 380.0);
        assert_eq!(state.position(), (100.0, 380.0));
    }

    #[test]
    fn test_leave_keeps_menu_opened_by_same_hover_once() {
        let mut state = DropdownState::new();
        state.open_at(event(), 0.0, 0.0);

        assert!(state.leave());
        assert!(!state.leave());
    }

    #[test]
    fn test_leave_on_closed_menu() {
        let mut state = DropdownState::new();
        assert!(!state.leave());
        assert!(!state.is_open());
    }

    #[test]
    fn test_close_forgets_current_event() {
        let mut state = DropdownState::new();
        state.open_at(event(), 0.0, 0.0);
        assert_eq!(state.current().map(|e| e.id), Some(1));

        state.close();
        assert!(state.current().is_none());
        assert!(!state.is_open());
    }
}
