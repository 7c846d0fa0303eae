mod messages;
mod tvmaze;

pub use messages::{FetchChannels, FetchMessage, FetchReceiver, FetchSender};
pub use tvmaze::TvMazeClient;

use crate::model::{SearchHit, ShowId, ShowSummary};
use std::future::Future;
use std::sync::Arc;
use thiserror::Error;

/// Errors from the show database.
#[derive(Error, Debug)]
pub enum FetchError {
    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Show database returned HTTP {status} for {url}")]
    Status { status: u16, url: String },

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Malformed response: {0}")]
    Decode(#[from] serde_json::Error),
}

impl FetchError {
    pub fn is_retryable(&self) -> bool {
        match self {
            FetchError::Http(e) => e.is_timeout() || e.is_connect(),
            FetchError::Status { status, .. } => *status == 429 || *status >= 500,
            FetchError::NotFound(_) | FetchError::Decode(_) => false,
        }
    }

    /// Short text for the status bar.
    pub fn user_message(&self) -> String {
        match self {
            FetchError::Http(e) if e.is_timeout() => "Show database timed out".to_string(),
            FetchError::Http(_) => "Could not reach the show database".to_string(),
            FetchError::Status { status, .. } => format!("Show database error ({})", status),
            FetchError::NotFound(what) => format!("Not found: {}", what),
            FetchError::Decode(_) => "Show database sent an unexpected response".to_string(),
        }
    }
}

/// Remote lookups against a show database.
pub trait ShowFetcher: Send + Sync + 'static {
    /// Shows matching `name`, in the order the service ranks them.
    fn search_by_name(
        &self,
        name: &str,
    ) -> impl Future<Output = Result<Vec<SearchHit>, FetchError>> + Send;

    /// A single fully populated show.
    fn get_by_id(&self, id: ShowId) -> impl Future<Output = Result<ShowSummary, FetchError>> + Send;
}

/// A lookup the controller wants performed, tagged with its generation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchRequest {
    Search { generation: u64, name: String },
    Lookup { generation: u64, id: ShowId },
}

/// Run `request` on its own task and post the outcome to `sender`.
///
/// The caller's loop keeps handling input while the request is in flight.
pub fn dispatch<F: ShowFetcher>(
    fetcher: Arc<F>,
    request: FetchRequest,
    sender: FetchSender,
) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        let message = match request {
            FetchRequest::Search { generation, name } => {
                tracing::debug!(generation, name = %name, "search started");
                let result = fetcher.search_by_name(&name).await;
                FetchMessage::SearchResolved { generation, name, result }
            }
            FetchRequest::Lookup { generation, id } => {
                tracing::debug!(generation, id = %id, "lookup started");
                let result = fetcher.get_by_id(id).await;
                FetchMessage::LookupResolved { generation, id, result }
            }
        };
        // The receiver only disappears during shutdown.
        let _ = sender.send(message);
    })
}


#[cfg(test)]
mod tests {
    use super::testing::ScriptedFetcher;
    use super::*;

    fn show(id: u64) -> ShowSummary {
        ShowSummary {
            id: ShowId(id),
            name: format!("Show {id}"),
            image: None,
            summary: None,
        }
    }

    #[tokio::test]
    async fn test_dispatch_search_posts_result() {
        let mut fetcher = ScriptedFetcher::default();
        fetcher.searches.insert(
            "harry".to_string(),
            vec![SearchHit { score: 1.0, show: show(1) }],
        );
        let FetchChannels { sender, mut receiver } = FetchChannels::new();

        dispatch(
            Arc::new(fetcher),
            FetchRequest::Search { generation: 3, name: "harry".to_string() },
            sender,
        )
        .await
        .unwrap();

        match receiver.recv().await {
            Some(FetchMessage::SearchResolved { generation, name, result }) => {
                assert_eq!(generation, 3);
                assert_eq!(name, "harry");
                assert_eq!(result.unwrap().len(), 1);
            }
            other => panic!("unexpected message: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_dispatch_lookup_reports_not_found() {
        let fetcher = Arc::new(ScriptedFetcher::default());
        let FetchChannels { sender, mut receiver } = FetchChannels::new();

        dispatch(
            fetcher.clone(),
            FetchRequest::Lookup { generation: 1, id: ShowId(5) },
            sender,
        )
        .await
        .unwrap();

        match receiver.recv().await {
            Some(FetchMessage::LookupResolved { id, result, .. }) => {
                assert_eq!(id, ShowId(5));
                assert!(matches!(result, Err(FetchError::NotFound(_))));
            }
            other => panic!("unexpected message: {other:?}"),
        }
        assert_eq!(*fetcher.calls.lock().unwrap(), vec!["lookup:5".to_string()]);
    }

    #[test]
    fn test_fetch_error_user_message() {
        let err = FetchError::Status { status: 503, url: "https://x".to_string() };
        assert!(err.is_retryable());
        assert!(err.user_message().contains("503"));

        let err = FetchError::NotFound("show 5".to_string());
        assert!(!err.is_retryable());
        assert_eq!(err.user_message(), "Not found: show 5");
    }
}
