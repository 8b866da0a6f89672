//! One list page: table state, the rows on screen, debounced search and
//! last-request-wins fetch bookkeeping.

use std::time::Duration;

use roster_api::types::PaginatedResponse;
use roster_api::ListQuery;
use tokio::time::Instant;

use crate::client::RecordSource;
use crate::config::Config;
use crate::debounce::Debouncer;
use crate::error::RosterError;
use crate::table::TableState;
use crate::tracker::{RequestTicket, RequestTracker};

/// What [`ListView::complete_fetch`] did with a response.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FetchOutcome {
    /// Rows and total were replaced.
    Applied,
    /// A newer request was issued since; the response was dropped.
    Stale,
    /// The fetch failed; rows and state are unchanged and the message is in
    /// [`ListView::error`].
    Failed,
}

/// Controller for one list page.
///
/// The raw search box content is kept as typed, but it only reaches the
/// [`TableState`] (and so the request parameters) once the debounce interval
/// has passed without further input.
pub struct ListView<T> {
    state: TableState,
    rows: Vec<T>,
    search_input: String,
    search: Debouncer<String>,
    tracker: RequestTracker,
    error: Option<String>,
}

impl<T> ListView<T> {
    pub fn new(page_size: i64, search_debounce: Duration) -> Self {
        Self {
            state: TableState::new(page_size),
            rows: Vec::new(),
            search_input: String::new(),
            search: Debouncer::new(search_debounce),
            tracker: RequestTracker::new(),
            error: None,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.page_size, config.search_debounce)
    }

    pub fn state(&self) -> &TableState {
        &self.state
    }

    /// Mutable access for sort, filter and navigation changes. Call
    /// [`ListView::pending_query`] afterwards to learn whether to fetch.
    pub fn state_mut(&mut self) -> &mut TableState {
        &mut self.state
    }

    pub fn rows(&self) -> &[T] {
        &self.rows
    }

    /// Search box content as typed, possibly ahead of the applied search term.
    pub fn search_input(&self) -> &str {
        &self.search_input
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn is_loading(&self) -> bool {
        self.tracker.in_flight()
    }

    /// Records a keystroke in the search box.
    pub fn on_search_input(&mut self, term: &str, now: Instant) {
        self.search_input = term.to_string();
        self.search.push(term.to_string(), now);
    }

    fn apply_search(&mut self, term: Option<String>) -> bool {
        match term {
            Some(term) => {
                tracing::debug!("search settled on {:?}", term);
                self.state.set_search_term(term);
                true
            }
            None => false,
        }
    }

    /// Applies the typed search term once input has been quiet long enough.
    /// Returns whether the search term was applied.
    pub fn tick(&mut self, now: Instant) -> bool {
        let term = self.search.poll(now);
        self.apply_search(term)
    }

    /// Applies the typed search term immediately, e.g. on Enter.
    pub fn submit_search(&mut self) -> bool {
        let term = self.search.flush();
        self.apply_search(term)
    }

    /// Sleeps until the typed search term settles, then applies it. Returns
    /// `false` straight away when nothing is waiting.
    pub async fn settle_search(&mut self) -> bool {
        let term = self.search.settled().await;
        self.apply_search(term)
    }

    /// When the next debounced search term is due, if one is waiting.
    pub fn search_deadline(&self) -> Option<Instant> {
        self.search.deadline()
    }

    /// Empties the search box and the filters.
    pub fn clear_filters(&mut self) {
        self.search_input.clear();
        self.search.flush();
        self.state.clear_filters();
    }

    /// The parameters to fetch, if they differ from the last request issued.
    pub fn pending_query(&self) -> Option<ListQuery> {
        let query = self.state.query_params();
        if self.tracker.latest_query() == Some(&query) {
            None
        } else {
            Some(query)
        }
    }

    /// Snapshots the current parameters for a new request.
    pub fn begin_fetch(&mut self) -> RequestTicket {
        let ticket = self.tracker.issue(self.state.query_params());
        tracing::debug!("fetch #{} issued", ticket.seq());
        ticket
    }

    /// Applies the response for `ticket` unless a newer request was issued.
    pub fn complete_fetch(
        &mut self,
        ticket: RequestTicket,
        result: Result<PaginatedResponse<T>, RosterError>,
    ) -> FetchOutcome {
        if !self.tracker.settle(&ticket) {
            tracing::debug!("discarding stale response for fetch #{}", ticket.seq());
            return FetchOutcome::Stale;
        }
        let result = result.and_then(|resp| {
            let total = resp.total_items();
            if total < 0 {
                return Err(RosterError::InvalidArgument(format!(
                    "server reported a negative total of {}",
                    total
                )));
            }
            Ok((resp.data, total))
        });
        match result {
            Ok((rows, total)) => {
                self.rows = rows;
                self.state.apply_total(total);
                self.error = None;
                FetchOutcome::Applied
            }
            Err(err) => {
                tracing::warn!("fetch #{} failed: {}", ticket.seq(), err);
                self.error = Some(err.to_string());
                FetchOutcome::Failed
            }
        }
    }

    /// Fetches the current parameters from `source` and applies the result.
    pub async fn refresh<S>(&mut self, source: &S) -> FetchOutcome
    where
        S: RecordSource<T>,
    {
        let ticket = self.begin_fetch();
        let result = source.fetch_page(ticket.query()).await;
        self.complete_fetch(ticket, result)
    }
}
