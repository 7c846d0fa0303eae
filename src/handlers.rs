use crate::model::ShowId;
use std::collections::HashMap;

/// Opaque handle for one attached control handler.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HandlerId(u64);

/// Which UI instance owns a handler.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Owner {
    /// A summary card in the results region, by position.
    Card { index: usize },
    /// The close control of the detail overlay.
    Overlay,
}

/// What firing a handler asks the controller to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Intent {
    OpenDetails(ShowId),
    CloseDetails(ShowId),
}

#[derive(Debug, Clone, Copy)]
struct Binding {
    owner: Owner,
    intent: Intent,
}

/// Explicit registry of attached handlers.
///
/// Every control that can fire is recorded here together with its owner, so
/// teardown is a direct lookup instead of a search through rendered output.
/// Once detached, a handle never dispatches again.
#[derive(Debug, Default)]
pub struct HandlerRegistry {
    bindings: HashMap<HandlerId, Binding>,
    next_id: u64,
    total_attached: u64,
    total_detached: u64,
}

impl HandlerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn attach(&mut self, owner: Owner, intent: Intent) -> HandlerId {
        let id = HandlerId(self.next_id);
        self.next_id += 1;
        self.bindings.insert(id, Binding { owner, intent });
        self.total_attached += 1;
        id
    }

    /// Returns false if the handle was not attached.
    pub fn detach(&mut self, id: HandlerId) -> bool {
        if self.bindings.remove(&id).is_some() {
            self.total_detached += 1;
            true
        } else {
            false
        }
    }

    /// Detach every handle whose owner matches, returning how many were removed.
    pub fn detach_owned_by(&mut self, matches: impl Fn(Owner) -> bool) -> usize {
        let doomed: Vec<HandlerId> = self
            .bindings
            .iter()
            .filter(|(_, b)| matches(b.owner))
            .map(|(id, _)| *id)
            .collect();
        for id in &doomed {
            self.detach(*id);
        }
        doomed.len()
    }

    pub fn dispatch(&self, id: HandlerId) -> Option<Intent> {
        self.bindings.get(&id).map(|b| b.intent)
    }

    pub fn attached_count(&self) -> usize {
        self.bindings.len()
    }

    pub fn total_attached(&self) -> u64 {
        self.total_attached
    }

    pub fn total_detached(&self) -> u64 {
        self.total_detached
    }
}
