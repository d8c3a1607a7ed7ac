//! Search session state machine.
//!
//! `Idle -> Loading -> {Populated | Empty | Failed}`. Each started request
//! gets a sequence number; only the response carrying the current in-flight
//! sequence is applied, anything else is stale and discarded.

use serde::{Deserialize, Serialize};

use crate::movies::{total_pages, ApiError, MovieSummary, SearchResultPage, PAGE_SIZE};

/// What to do with a new search submitted while another is loading.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OverlapPolicy {
    /// Ignore the new search until the current one settles.
    DropWhileLoading,
    /// Start the new search; the older response is discarded when it lands.
    #[default]
    Supersede,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionPhase {
    Idle,
    Loading,
    Populated,
    Empty,
    Failed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchMode {
    /// New query: results replace what is displayed.
    Replace,
    /// Next page: results are appended.
    Append,
}

/// A started request. Pass it back to [`SearchSession::settle`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchTicket {
    pub seq: u64,
    pub query: String,
    pub page: u32,
    pub mode: FetchMode,
}

/// Whether a settled response changed the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Settled {
    Applied,
    Stale,
}

/// Read-only copy of the session for rendering.
#[derive(Debug, Clone, Serialize)]
pub struct SessionSnapshot {
    pub phase: SessionPhase,
    pub query: Option<String>,
    pub page: u32,
    pub total_pages: u32,
    pub total_count: u64,
    pub has_more: bool,
    pub items: Vec<MovieSummary>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug)]
pub struct SearchSession {
    policy: OverlapPolicy,
    phase: SessionPhase,
    /// Query of the displayed results.
    query: Option<String>,
    /// Last page successfully displayed.
    page: u32,
    total_count: u64,
    items: Vec<MovieSummary>,
    error: Option<String>,
    /// Phase to return to if an in-flight request is abandoned.
    settled_phase: SessionPhase,
    in_flight: Option<SearchTicket>,
    next_seq: u64,
}

impl SearchSession {
    pub fn new(policy: OverlapPolicy) -> Self {
        Self {
            policy,
            phase: SessionPhase::Idle,
            query: None,
            page: 0,
            total_count: 0,
            items: Vec::new(),
            error: None,
            settled_phase: SessionPhase::Idle,
            in_flight: None,
            next_seq: 1,
        }
    }

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    pub fn is_loading(&self) -> bool {
        self.in_flight.is_some()
    }

    pub fn total_pages(&self) -> u32 {
        total_pages(self.total_count, PAGE_SIZE)
    }

    /// Load-more is offered iff results are shown and pages remain.
    pub fn has_more(&self) -> bool {
        self.phase == SessionPhase::Populated && self.page < self.total_pages()
    }

    /// Start a new search for `query` at page 1.
    ///
    /// Returns `None` when the query is blank, or when a request is in
    /// flight and the policy is [`OverlapPolicy::DropWhileLoading`].
    pub fn begin_search(&mut self, query: &str) -> Option<SearchTicket> {
        let query = query.trim();
        if query.is_empty() {
            return None;
        }
        if self.is_loading() && self.policy == OverlapPolicy::DropWhileLoading {
            return None;
        }
        Some(self.start(query.to_string(), 1, FetchMode::Replace))
    }

    /// Start fetching the next page of the displayed query.
    ///
    /// Returns `None` while loading or when no further page exists.
    pub fn begin_load_more(&mut self) -> Option<SearchTicket> {
        if self.is_loading() || !self.has_more() {
            return None;
        }
        let query = self.query.clone()?;
        Some(self.start(query, self.page + 1, FetchMode::Append))
    }

    fn start(&mut self, query: String, page: u32, mode: FetchMode) -> SearchTicket {
        let ticket = SearchTicket {
            seq: self.next_seq,
            query,
            page,
            mode,
        };
        self.next_seq += 1;
        if self.in_flight.is_none() {
            self.settled_phase = self.phase;
        }
        self.in_flight = Some(ticket.clone());
        self.phase = SessionPhase::Loading;
        ticket
    }

    /// Apply the response for `ticket`, unless a newer request replaced it.
    pub fn settle(
        &mut self,
        ticket: &SearchTicket,
        result: Result<SearchResultPage, ApiError>,
    ) -> Settled {
        match &self.in_flight {
            Some(current) if current.seq == ticket.seq => {}
            _ => return Settled::Stale,
        }
        self.in_flight = None;

        match result {
            Ok(page) => match ticket.mode {
                FetchMode::Replace => {
                    self.query = Some(ticket.query.clone());
                    self.error = None;
                    if page.items.is_empty() {
                        self.phase = SessionPhase::Empty;
                        self.items.clear();
                        self.page = ticket.page;
                        self.total_count = 0;
                    } else {
                        self.phase = SessionPhase::Populated;
                        self.items = page.items;
                        self.page = ticket.page;
                        self.total_count = page.total_count;
                    }
                }
                FetchMode::Append => {
                    self.error = None;
                    self.phase = SessionPhase::Populated;
                    if page.items.is_empty() {
                        // Upstream ran out early: stop offering more pages.
                        self.total_count = u64::from(self.page) * u64::from(PAGE_SIZE);
                    } else {
                        self.items.extend(page.items);
                        self.page = ticket.page;
                        self.total_count = page.total_count;
                    }
                }
            },
            Err(e) => {
                if ticket.mode == FetchMode::Replace {
                    self.query = Some(ticket.query.clone());
                }
                self.phase = SessionPhase::Failed;
                self.error = Some(e.to_string());
            }
        }

        Settled::Applied
    }

    /// Forget the in-flight request (its response will be stale).
    pub fn abandon(&mut self, ticket: &SearchTicket) {
        if self.in_flight.as_ref().map(|t| t.seq) == Some(ticket.seq) {
            self.in_flight = None;
            self.phase = self.settled_phase;
        }
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            phase: self.phase,
            query: self
                .in_flight
                .as_ref()
                .filter(|t| t.mode == FetchMode::Replace)
                .map(|t| t.query.clone())
                .or_else(|| self.query.clone()),
            page: self.page,
            total_pages: self.total_pages(),
            total_count: self.total_count,
            has_more: self.has_more(),
            items: self.items.clone(),
            error: self.error.clone(),
        }
    }
}
