//! Last-request-wins bookkeeping for list fetches.

use roster_api::ListQuery;

/// A fetch that has been issued, tagged with the parameters it was built from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RequestTicket {
    seq: u64,
    query: ListQuery,
}

impl RequestTicket {
    pub fn seq(&self) -> u64 {
        self.seq
    }

    pub fn query(&self) -> &ListQuery {
        &self.query
    }
}

/// Issues [`RequestTicket`]s and decides which responses may still be applied.
///
/// Only the most recently issued ticket is current; a response for any older
/// ticket arrived after fresher parameters were requested and must be dropped.
#[derive(Clone, Debug, Default)]
pub struct RequestTracker {
    issued: u64,
    settled: u64,
    latest: Option<ListQuery>,
}

impl RequestTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn issue(&mut self, query: ListQuery) -> RequestTicket {
        self.issued += 1;
        self.latest = Some(query.clone());
        RequestTicket {
            seq: self.issued,
            query,
        }
    }

    pub fn is_current(&self, ticket: &RequestTicket) -> bool {
        ticket.seq == self.issued && self.latest.as_ref() == Some(&ticket.query)
    }

    /// Marks `ticket` as answered. Returns `false`, and changes nothing, when
    /// the ticket is stale.
    pub fn settle(&mut self, ticket: &RequestTicket) -> bool {
        if !self.is_current(ticket) {
            return false;
        }
        self.settled = ticket.seq;
        true
    }

    /// Whether the latest issued request is still unanswered.
    pub fn in_flight(&self) -> bool {
        self.issued > self.settled
    }

    /// Parameters of the latest issued request.
    pub fn latest_query(&self) -> Option<&ListQuery> {
        self.latest.as_ref()
    }
}
