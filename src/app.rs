use crate::config::ExplorerConfig;
use crate::fetch::{FetchMessage, FetchRequest};
use crate::handlers::{HandlerRegistry, Intent};
use crate::overlay::{DetailOverlay, LookupOutcome};
use crate::registry::{ButtonStrip, ElementRegistry, RegistryError, SelectorKind};
use crate::render::ListRenderer;
use crate::search::{FilterError, FilterState, SearchController};
use thiserror::Error;

/// Input mode for the search bar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputMode {
    Normal,
    Editing,
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Invalid initial search: {0}")]
    Filter(#[from] FilterError),

    #[error("Screen layout error: {0}")]
    Registry(#[from] RegistryError),
}

/// Application context: all controller state for one browsing session.
///
/// Nothing here touches the terminal or the network. User actions return
/// the fetches they need, and finished fetches come back through `apply`.
pub struct App {
    pub should_quit: bool,
    pub show_help: bool,
    pub input_mode: InputMode,
    pub status_msg: String,

    search: SearchController,
    list: ListRenderer,
    overlay: DetailOverlay,
    handlers: HandlerRegistry,
    buttons: ButtonStrip,

    /// Filter value the rendered cards belong to.
    shown_name: Option<String>,
}

impl App {
    pub fn new(config: &ExplorerConfig) -> Result<Self, AppError> {
        let filter = FilterState::new(&config.initial_query)?;
        // Every screen region must resolve before the first frame is drawn.
        ElementRegistry::resolve(SelectorKind::RegionId, &ElementRegistry::region_ids())?;
        let buttons = ElementRegistry::resolve(SelectorKind::ShowNameButton, &config.presets)?;

        Ok(Self {
            should_quit: false,
            show_help: false,
            input_mode: InputMode::Normal,
            status_msg: "Loading shows...".to_string(),

            search: SearchController::new(filter),
            list: ListRenderer::new(),
            overlay: DetailOverlay::new(),
            handlers: HandlerRegistry::new(),
            buttons: ButtonStrip::from_resolved(&buttons),

            shown_name: None,
        })
    }

    /// First search, issued once the loop is running.
    pub fn start(&mut self) -> FetchRequest {
        self.search.trigger_cycle()
    }

    // ── Accessors for the UI ──

    pub fn filter(&self) -> &FilterState {
        self.search.filter()
    }

    pub fn search(&self) -> &SearchController {
        &self.search
    }

    pub fn list(&self) -> &ListRenderer {
        &self.list
    }

    pub fn overlay(&self) -> &DetailOverlay {
        &self.overlay
    }

    pub fn handlers(&self) -> &HandlerRegistry {
        &self.handlers
    }

    pub fn buttons(&self) -> &ButtonStrip {
        &self.buttons
    }

    pub fn shown_name(&self) -> Option<&str> {
        self.shown_name.as_deref()
    }

    pub fn page_scroll_locked(&self) -> bool {
        self.overlay.scroll_locked()
    }

    // ── Filter buttons and free text ──

    pub fn press_button(&mut self, key: char) -> Option<FetchRequest> {
        let name = self.buttons.name_for_key(key)?.to_string();
        self.search.select_from_button(&name)
    }

    pub fn begin_editing(&mut self) {
        self.input_mode = InputMode::Editing;
    }

    pub fn cancel_editing(&mut self) {
        self.input_mode = InputMode::Normal;
    }

    pub fn type_char(&mut self, c: char) {
        self.search.input_mut().push(c);
    }

    pub fn backspace(&mut self) {
        self.search.input_mut().pop();
    }

    /// Enter in the search bar. A blank entry keeps the bar open and marked.
    pub fn submit_input(&mut self) -> Option<FetchRequest> {
        let raw = self.search.input().value().to_string();
        match self.search.select_from_text(&raw) {
            Ok(request) => {
                self.input_mode = InputMode::Normal;
                Some(request)
            }
            Err(_) => {
                self.status_msg = "Type a show name first".to_string();
                None
            }
        }
    }

    // ── Results list ──

    pub fn list_next(&mut self) {
        if !self.page_scroll_locked() {
            self.list.select_next();
        }
    }

    pub fn list_prev(&mut self) {
        if !self.page_scroll_locked() {
            self.list.select_prev();
        }
    }

    pub fn list_first(&mut self) {
        if !self.page_scroll_locked() {
            self.list.select_first();
        }
    }

    pub fn list_last(&mut self) {
        if !self.page_scroll_locked() {
            self.list.select_last();
        }
    }

    /// Fire the "Show details" control of the selected card.
    pub fn activate_selected(&mut self) -> Option<FetchRequest> {
        let handler = self.list.selected_card()?.handler;
        let intent = self.handlers.dispatch(handler)?;
        self.handle_intent(intent)
    }

    /// Fire the overlay's "Close details" control.
    pub fn activate_close(&mut self) {
        let Some(handler) = self.overlay.close_handler() else {
            return;
        };
        if let Some(intent) = self.handlers.dispatch(handler) {
            self.handle_intent(intent);
        }
    }

    pub fn handle_intent(&mut self, intent: Intent) -> Option<FetchRequest> {
        match intent {
            Intent::OpenDetails(id) => {
                let request = self.overlay.open(id);
                if request.is_some() {
                    self.status_msg = format!("Loading details for show {}...", id);
                }
                request
            }
            Intent::CloseDetails(id) => {
                if self.overlay.close(&mut self.handlers, id) {
                    self.status_msg.clear();
                }
                None
            }
        }
    }

    pub fn overlay_scroll_down(&mut self, lines: u16) {
        self.overlay.scroll_body_down(lines);
    }

    pub fn overlay_scroll_up(&mut self, lines: u16) {
        self.overlay.scroll_body_up(lines);
    }

    // ── Fetch completions ──

    pub fn apply(&mut self, message: FetchMessage) {
        match message {
            FetchMessage::SearchResolved { generation, name, result } => {
                if !self.search.is_current(generation) {
                    tracing::debug!(
                        generation,
                        latest = self.search.latest_generation(),
                        name = %name,
                        "dropping stale search result"
                    );
                    return;
                }
                match result {
                    Ok(hits) => {
                        let report = self.list.render(&mut self.handlers, &hits);
                        tracing::info!(
                            generation,
                            name = %name,
                            cards = report.attached,
                            "search applied"
                        );
                        self.status_msg = format!("{} shows for \"{}\"", hits.len(), name);
                        self.shown_name = Some(name);
                    }
                    Err(e) => {
                        tracing::warn!(
                            generation,
                            name = %name,
                            error = %e,
                            retryable = e.is_retryable(),
                            "search failed"
                        );
                        self.status_msg = e.user_message();
                    }
                }
            }
            FetchMessage::LookupResolved { generation, id, result } => {
                match self.overlay.apply_lookup(&mut self.handlers, generation, result) {
                    LookupOutcome::Opened(shown) => {
                        tracing::debug!(
                            id = %shown,
                            handlers = self.handlers.attached_count(),
                            "detail card attached"
                        );
                        self.status_msg.clear();
                    }
                    LookupOutcome::Stale => {
                        tracing::debug!(generation, id = %id, "dropping stale lookup");
                    }
                    LookupOutcome::Failed(e) => {
                        tracing::warn!(
                            generation,
                            id = %id,
                            error = %e,
                            retryable = e.is_retryable(),
                            "detail lookup failed"
                        );
                        self.status_msg = e.user_message();
                    }
                }
            }
        }
    }
}
