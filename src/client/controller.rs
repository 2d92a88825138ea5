use super::api::EventApi;
use super::dropdown::DropdownState;
use super::widget::{CalendarWidget, ContextClick, DropdownMenu, Selection, TitlePrompt};
use crate::components::event_store::{Event, NewEvent};
use crate::error::AppResult;
use tracing::{error, info, warn};

/// Text shown when asking for a new event's title
pub const TITLE_PROMPT: &str = "Please give this event a title";

/// Keeps a calendar widget in sync with the event service.
///
/// Every gesture handler runs to completion before the next one; network
/// calls are awaited in place with no timeout and no retry.
pub struct CalendarController<A, W, D, P> {
    api: A,
    widget: W,
    menu: D,
    prompt: P,
    dropdown: DropdownState,
    hovered: Option<Event>,
}

impl<A, W, D, P> CalendarController<A, W, D, P>
where
    A: EventApi,
    W: CalendarWidget,
    D: DropdownMenu,
    P: TitlePrompt,
{
    pub fn new(api: A, widget: W, menu: D, prompt: P) -> Self {
        Self {
            api,
            widget,
            menu,
            prompt,
            dropdown: DropdownState::new(),
            hovered: None,
        }
    }

    pub fn widget(&self) -> &W {
        &self.widget
    }

    pub fn menu(&self) -> &D {
        &self.menu
    }

    pub fn dropdown(&self) -> &DropdownState {
        &self.dropdown
    }

    /// Reload every event from the service into the widget
    pub async fn refresh(&mut self) -> AppResult<()> {
        match self.api.list_events().await {
            Ok(events) => {
                self.widget.remove_all_events();
                self.widget.load_events(events);
                Ok(())
            }
            Err(e) => {
                error!("Failed to fetch events: {}", e);
                self.widget.fetch_failed(&e);
                Err(e)
            }
        }
    }

    /// Range selected on the grid: ask for a title and create the event.
    ///
    /// Returns the created event, or `None` when no title was given.
    pub async fn select(&mut self, selection: Selection) -> AppResult<Option<Event>> {
        if self.dropdown.is_open() {
            self.close_menu();
        }

        let title = self.prompt.prompt(TITLE_PROMPT);
        self.widget.unselect();

        let Some(title) = title.filter(|t| !t.is_empty()) else {
            return Ok(None);
        };

        let event = NewEvent {
            title,
            start: selection.start,
            end: selection.end,
            all_day: selection.all_day,
        };

        let id = self.api.create_event(&event).await.map_err(|e| {
            error!("Failed to create event: {}", e);
            e
        })?;

        let event = event.with_id(id);
        info!("Created event {}", id);
        self.widget.add_event(event.clone());
        Ok(Some(event))
    }

    /// Event dragged or resized. The widget already shows the new state,
    /// so the service response is not applied back.
    pub async fn event_changed(&mut self, event: &Event) -> AppResult<()> {
        self.api.update_event(event).await.map_err(|e| {
            error!("Failed to update event {}: {}", event.id, e);
            e
        })
    }

    /// Pointer entered an event: arm its context menu
    pub fn mouse_enter(&mut self, event: Event) {
        self.hovered = Some(event);
    }

    /// Right-click over the hovered event.
    ///
    /// Returns `true` when the native context menu must be suppressed.
    pub fn context_menu(&mut self, click: ContextClick) -> bool {
        let Some(event) = self.hovered.clone() else {
            return false;
        };

        let (left, top) = click.position();
        self.menu.move_to(left, top);
        self.menu.show();
        self.dropdown.open_at(event, left, top);
        true
    }

    /// Pointer left the hovered event: disarm its context menu
    pub fn mouse_leave(&mut self) {
        self.hovered = None;
        if !self.dropdown.leave() {
            self.close_menu();
        }
    }

    /// "Delete" picked in the dropdown
    pub async fn delete_current(&mut self) -> AppResult<()> {
        let Some(event) = self.dropdown.current().cloned() else {
            warn!("Delete requested with no event selected");
            return Ok(());
        };
        self.close_menu();

        self.api.delete_event(event.id).await.map_err(|e| {
            error!("Failed to delete event {}: {}", event.id, e);
            e
        })?;

        info!("Deleted event {}", event.id);
        self.widget.remove_event(event.id);
        Ok(())
    }

    /// "Duplicate" picked in the dropdown: copy the event under a new id
    pub async fn duplicate_current(&mut self) -> AppResult<Option<Event>> {
        let Some(event) = self.dropdown.current().cloned() else {
            warn!("Duplicate requested with no event selected");
            return Ok(None);
        };
        self.close_menu();

        let source_id = event.id;
        let copy = NewEvent::from(event);
        let id = self.api.create_event(&copy).await.map_err(|e| {
            error!("Failed to duplicate event {}: {}", source_id, e);
            e
        })?;

        let copy = copy.with_id(id);
        info!("Duplicated event {} as {}", source_id, id);
        self.widget.add_event(copy.clone());
        Ok(Some(copy))
    }

    /// Page scrolled to `scroll_y`
    pub fn scroll(&mut self, scroll_y: f64) {
        let top = self.dropdown.scroll_to(scroll_y);
        let (left, _) = self.dropdown.position();
        self.menu.move_to(left, top);
    }

    fn close_menu(&mut self) {
        self.menu.hide();
        self.dropdown.close();
    }
}
