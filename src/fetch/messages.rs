use super::FetchError;
use crate::model::{SearchHit, ShowId, ShowSummary};
use tokio::sync::mpsc::{UnboundedReceiver, UnboundedSender};

pub type FetchSender = UnboundedSender<FetchMessage>;
pub type FetchReceiver = UnboundedReceiver<FetchMessage>;

/// Completions posted from fetch tasks back to the UI loop.
#[derive(Debug)]
pub enum FetchMessage {
    /// A name search finished
    SearchResolved {
        generation: u64,
        name: String,
        result: Result<Vec<SearchHit>, FetchError>,
    },

    /// A detail lookup finished
    LookupResolved {
        generation: u64,
        id: ShowId,
        result: Result<ShowSummary, FetchError>,
    },
}

/// Both ends of the completion channel.
pub struct FetchChannels {
    /// Cloned into every fetch task
    pub sender: FetchSender,

    /// Drained by the UI loop
    pub receiver: FetchReceiver,
}

impl FetchChannels {
    pub fn new() -> Self {
        let (sender, receiver) = tokio::sync::mpsc::unbounded_channel();
        Self { sender, receiver }
    }
}

impl Default for FetchChannels {
    fn default() -> Self {
        Self::new()
    }
}
