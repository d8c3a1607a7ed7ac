//! Search controller: drives a [`SearchSession`] against a [`MovieCatalog`].

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Mutex;
use tracing::{debug, error, info, warn};

use super::debounce::Debouncer;
use super::state::{SearchSession, SearchTicket, SessionPhase, SessionSnapshot, Settled};
use crate::config::SearchConfig;
use crate::metrics::SEARCH_OUTCOMES;
use crate::movies::MovieCatalog;

/// What happened to a search request.
#[derive(Debug, Clone)]
pub enum SearchOutcome {
    /// The response was applied; the snapshot reflects it.
    Applied(SessionSnapshot),
    /// A newer request replaced this one before it settled.
    Stale,
    /// The request was not started (blank query, overlap, or nothing to load).
    Dropped,
}

/// Owns the search session and performs the network calls it asks for.
pub struct SearchController {
    catalog: Arc<dyn MovieCatalog>,
    session: Arc<Mutex<SearchSession>>,
    debouncer: Debouncer,
}

impl SearchController {
    pub fn new(catalog: Arc<dyn MovieCatalog>, config: &SearchConfig) -> Self {
        Self {
            catalog,
            session: Arc::new(Mutex::new(SearchSession::new(config.overlap_policy))),
            debouncer: Debouncer::new(Duration::from_millis(config.debounce_ms)),
        }
    }

    /// Submit a new query, replacing displayed results.
    pub async fn submit(&self, query: &str) -> SearchOutcome {
        let ticket = self.session.lock().await.begin_search(query);
        match ticket {
            Some(ticket) => self.run(ticket).await,
            None => {
                debug!("Search for '{}' dropped", query.trim());
                SEARCH_OUTCOMES.with_label_values(&["dropped"]).inc();
                SearchOutcome::Dropped
            }
        }
    }

    /// Fetch the next page, appending to displayed results.
    pub async fn load_more(&self) -> SearchOutcome {
        let ticket = self.session.lock().await.begin_load_more();
        match ticket {
            Some(ticket) => self.run(ticket).await,
            None => {
                SEARCH_OUTCOMES.with_label_values(&["dropped"]).inc();
                SearchOutcome::Dropped
            }
        }
    }

    /// Schedule a debounced search for `query`.
    ///
    /// Blank input is ignored but still cancels the pending timer.
    pub fn live_search(self: &Arc<Self>, query: &str) {
        let query = query.trim().to_string();
        if query.is_empty() {
            self.debouncer.cancel();
            return;
        }

        let controller = Arc::clone(self);
        self.debouncer.schedule(async move {
            controller.submit(&query).await;
        });
    }

    /// Current session state.
    pub async fn snapshot(&self) -> SessionSnapshot {
        self.session.lock().await.snapshot()
    }

    pub fn debounce_period(&self) -> Duration {
        self.debouncer.quiet_period()
    }

    /// Run the started request to completion.
    ///
    /// The fetch runs in its own task so that dropping the caller never
    /// leaves the session in `Loading`.
    async fn run(&self, ticket: SearchTicket) -> SearchOutcome {
        info!(
            "Searching '{}' page {} (seq {})",
            ticket.query, ticket.page, ticket.seq
        );

        let catalog = Arc::clone(&self.catalog);
        let session = Arc::clone(&self.session);
        let task_ticket = ticket.clone();

        let handle = tokio::spawn(async move {
            let result = catalog.search(&task_ticket.query, task_ticket.page).await;
            if let Err(e) = &result {
                warn!("Search for '{}' failed: {}", task_ticket.query, e);
            }
            let mut session = session.lock().await;
            match session.settle(&task_ticket, result) {
                Settled::Applied => Some(session.snapshot()),
                Settled::Stale => None,
            }
        });

        match handle.await {
            Ok(Some(snapshot)) => {
                let outcome = match snapshot.phase {
                    SessionPhase::Populated => "populated",
                    SessionPhase::Empty => "empty",
                    SessionPhase::Failed => "failed",
                    SessionPhase::Idle | SessionPhase::Loading => "other",
                };
                SEARCH_OUTCOMES.with_label_values(&[outcome]).inc();
                SearchOutcome::Applied(snapshot)
            }
            Ok(None) => {
                debug!("Discarded stale response for seq {}", ticket.seq);
                SEARCH_OUTCOMES.with_label_values(&["stale"]).inc();
                SearchOutcome::Stale
            }
            Err(e) => {
                error!("Search task for seq {} failed: {}", ticket.seq, e);
                self.session.lock().await.abandon(&ticket);
                SEARCH_OUTCOMES.with_label_values(&["dropped"]).inc();
                SearchOutcome::Dropped
            }
        }
    }
}
