//! Remote option lookup for searchable selects.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tracing::debug;

use crate::error::FlockResult;
use crate::field::SelectOption;
use crate::render::Widget;

/// Default pause before a query is sent.
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(300);

/// Anything that can answer "which options match this text" for an endpoint.
#[async_trait]
pub trait OptionSource: Send + Sync {
    async fn search(&self, endpoint: &str, query: &str) -> FlockResult<Vec<SelectOption>>;
}

/// Debounced, latest-query-wins option search for one remote select.
#[derive(Clone)]
pub struct OptionLookup {
    endpoint: Option<String>,
    seed: Vec<SelectOption>,
    debounce: Duration,
    latest: Arc<AtomicU64>,
    source: Arc<dyn OptionSource>,
}

impl OptionLookup {
    /// Build a lookup for a widget; `None` unless it is a remote select.
    pub fn for_widget(widget: &Widget, source: Arc<dyn OptionSource>, debounce: Duration) -> Option<Self> {
        match widget {
            Widget::RemoteSelect { endpoint, seed } => Some(Self {
                endpoint: endpoint.clone(),
                seed: seed.clone(),
                debounce,
                latest: Arc::new(AtomicU64::new(0)),
                source,
            }),
            _ => None,
        }
    }

    /// Options shown before the user types.
    pub fn seed(&self) -> &[SelectOption] {
        &self.seed
    }

    /// Search for `query`. Returns `Ok(None)` when a newer query was issued
    /// on this lookup before this one finished.
    ///
    /// Without an endpoint the seed options are filtered locally.
    pub async fn query(&self, query: &str) -> FlockResult<Option<Vec<SelectOption>>> {
        let ticket = self.latest.fetch_add(1, Ordering::SeqCst) + 1;

        if !self.debounce.is_zero() {
            tokio::time::sleep(self.debounce).await;
        }
        if self.superseded(ticket) {
            debug!(query, "Option query superseded during debounce");
            return Ok(None);
        }

        let options = match &self.endpoint {
            Some(endpoint) => self.source.search(endpoint, query).await?,
            None => filter_options(&self.seed, query),
        };

        if self.superseded(ticket) {
            debug!(query, "Option query superseded during fetch");
            return Ok(None);
        }
        Ok(Some(options))
    }

    fn superseded(&self, ticket: u64) -> bool {
        self.latest.load(Ordering::SeqCst) != ticket
    }
}

/// Case-insensitive label match; an empty query keeps everything.
pub fn filter_options(options: &[SelectOption], query: &str) -> Vec<SelectOption> {
    let needle = query.trim().to_lowercase();
    options
        .iter()
        .filter(|o| needle.is_empty() || o.label.to_lowercase().contains(&needle))
        .cloned()
        .collect()
}
