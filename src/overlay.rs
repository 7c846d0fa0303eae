use crate::card::{Card, CardBuilder, CardKind};
use crate::fetch::{FetchError, FetchRequest};
use crate::handlers::{HandlerId, HandlerRegistry, Owner};
use crate::model::{ShowId, ShowSummary};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverlayState {
    Closed,
    Open(ShowId),
}

/// What happened to a finished detail lookup.
#[derive(Debug)]
pub enum LookupOutcome {
    Opened(ShowId),
    /// A newer lookup was issued after this one.
    Stale,
    Failed(FetchError),
}

/// Single detailed-card overlay.
///
/// While the overlay is open it holds exactly one detailed card and one
/// close handler, and the page scroll is locked. While closed it holds
/// nothing and is hidden.
#[derive(Debug)]
pub struct DetailOverlay {
    state: OverlayState,
    content: Option<Card>,
    close_handler: Option<HandlerId>,
    visible: bool,
    scroll_locked: bool,
    body_scroll: u16,
    generation: u64,
    pending: Option<ShowId>,
}

impl DetailOverlay {
    pub fn new() -> Self {
        Self {
            state: OverlayState::Closed,
            content: None,
            close_handler: None,
            visible: false,
            scroll_locked: false,
            body_scroll: 0,
            generation: 0,
            pending: None,
        }
    }

    /// Request the full record for `id`. Ignored unless the overlay is closed.
    pub fn open(&mut self, id: ShowId) -> Option<FetchRequest> {
        if let OverlayState::Open(current) = self.state {
            tracing::debug!(requested = %id, open = %current, "overlay already open");
            return None;
        }
        self.generation += 1;
        self.pending = Some(id);
        tracing::info!(generation = self.generation, id = %id, "detail lookup issued");
        Some(FetchRequest::Lookup {
            generation: self.generation,
            id,
        })
    }

    /// Apply a finished lookup. Only the most recent request may open the
    /// overlay; a failure leaves it closed.
    pub fn apply_lookup(
        &mut self,
        registry: &mut HandlerRegistry,
        generation: u64,
        result: Result<ShowSummary, FetchError>,
    ) -> LookupOutcome {
        if generation != self.generation || self.pending.is_none() {
            return LookupOutcome::Stale;
        }
        self.pending = None;

        let show = match result {
            Ok(show) => show,
            Err(e) => return LookupOutcome::Failed(e),
        };

        if self.state != OverlayState::Closed {
            self.teardown(registry);
        }

        let card = CardBuilder::build(&show, CardKind::Detailed);
        self.close_handler = Some(registry.attach(Owner::Overlay, card.action.intent));
        self.content = Some(card);
        self.visible = true;
        self.body_scroll = 0;
        self.state = OverlayState::Open(show.id);
        self.scroll_locked = true;
        tracing::info!(id = %show.id, "overlay opened");
        LookupOutcome::Opened(show.id)
    }

    /// Close the overlay showing `id`. Returns false if it was not showing `id`.
    pub fn close(&mut self, registry: &mut HandlerRegistry, id: ShowId) -> bool {
        if self.state != OverlayState::Open(id) {
            tracing::debug!(id = %id, state = ?self.state, "close ignored");
            return false;
        }
        self.teardown(registry);
        tracing::info!(id = %id, "overlay closed");
        true
    }

    fn teardown(&mut self, registry: &mut HandlerRegistry) {
        let detached = registry.detach_owned_by(|owner| owner == Owner::Overlay);
        debug_assert_eq!(detached, usize::from(self.close_handler.is_some()));
        self.close_handler = None;
        self.visible = false;
        self.content = None;
        self.body_scroll = 0;
        self.scroll_locked = false;
        self.state = OverlayState::Closed;
    }

    pub fn state(&self) -> OverlayState {
        self.state
    }

    pub fn is_open(&self) -> bool {
        matches!(self.state, OverlayState::Open(_))
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn content(&self) -> Option<&Card> {
        self.content.as_ref()
    }

    pub fn close_handler(&self) -> Option<HandlerId> {
        self.close_handler
    }

    pub fn scroll_locked(&self) -> bool {
        self.scroll_locked
    }

    pub fn body_scroll(&self) -> u16 {
        self.body_scroll
    }

    pub fn scroll_body_down(&mut self, lines: u16) {
        if self.is_open() {
            self.body_scroll = self.body_scroll.saturating_add(lines);
        }
    }

    pub fn scroll_body_up(&mut self, lines: u16) {
        self.body_scroll = self.body_scroll.saturating_sub(lines);
    }
}

impl Default for DetailOverlay {
    fn default() -> Self {
        Self::new()
    }
}
