use crate::card::{Card, CardBuilder, CardKind};
use crate::handlers::{HandlerId, HandlerRegistry, Owner};
use crate::model::SearchHit;

/// A card currently shown in the results region, paired with the handler it owns.
#[derive(Debug, Clone)]
pub struct RenderedCard {
    pub card: Card,
    pub handler: HandlerId,
}

/// Handler bookkeeping for one render cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderReport {
    pub detached: usize,
    pub attached: usize,
}

/// Owns the results region. Every render replaces the whole card set.
#[derive(Debug, Default)]
pub struct ListRenderer {
    cards: Vec<RenderedCard>,
    selected: usize,
}

impl ListRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the region with summary cards for `hits`, in the order given.
    ///
    /// Handlers of the previous cards are detached before those cards are
    /// dropped. An empty `hits` leaves the region empty.
    pub fn render(&mut self, registry: &mut HandlerRegistry, hits: &[SearchHit]) -> RenderReport {
        let detached = registry.detach_owned_by(|owner| matches!(owner, Owner::Card { .. }));
        debug_assert_eq!(detached, self.cards.len());
        self.cards.clear();
        self.selected = 0;

        for (index, hit) in hits.iter().enumerate() {
            let card = CardBuilder::build(&hit.show, CardKind::Summary);
            let handler = registry.attach(Owner::Card { index }, card.action.intent);
            self.cards.push(RenderedCard { card, handler });
        }

        let report = RenderReport {
            detached,
            attached: self.cards.len(),
        };
        tracing::debug!(
            detached = report.detached,
            attached = report.attached,
            lifetime_attached = registry.total_attached(),
            lifetime_detached = registry.total_detached(),
            "results region re-rendered"
        );
        report
    }

    pub fn cards(&self) -> &[RenderedCard] {
        &self.cards
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn selected(&self) -> usize {
        self.selected
    }

    pub fn selected_card(&self) -> Option<&RenderedCard> {
        self.cards.get(self.selected)
    }

    pub fn select_next(&mut self) {
        if self.selected + 1 < self.cards.len() {
            self.selected += 1;
        }
    }

    pub fn select_prev(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    pub fn select_first(&mut self) {
        self.selected = 0;
    }

    pub fn select_last(&mut self) {
        self.selected = self.cards.len().saturating_sub(1);
    }
}
