//! Search lifecycle: query, loading, error and result states.
//!
//! Every accepted submission gets the next sequence number and puts the
//! session into [`SearchStatus::Loading`]. A response is applied only when it
//! carries the latest sequence number, so a slow response to an earlier query
//! can never overwrite the outcome of a newer one. Superseded requests are not
//! cancelled; their responses are dropped on arrival.

use crate::catalog::{CatalogConfig, CatalogRequest};
use crate::domain::{BookRecord, LookupError, SharedBook};
use std::rc::Rc;

/// State of the live search session.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum SearchStatus {
    /// Nothing has been submitted yet.
    #[default]
    Idle,

    /// A lookup for the active query is in flight.
    Loading,

    /// The last lookup failed. Prior results are discarded.
    Failed {
        /// User-facing description of the failure.
        message: String,
    },

    /// The last lookup succeeded. An empty list means "no results".
    Loaded {
        /// Results in catalog order.
        books: Vec<SharedBook>,
    },
}

/// Owns the active query and the outcome of its lookup.
#[derive(Debug, Clone)]
pub struct SearchController {
    catalog: CatalogConfig,
    query: String,
    status: SearchStatus,
    latest_seq: u64,
}

impl SearchController {
    /// Creates an idle controller issuing requests against `catalog`.
    #[must_use]
    pub fn new(catalog: CatalogConfig) -> Self {
        Self {
            catalog,
            query: String::new(),
            status: SearchStatus::Idle,
            latest_seq: 0,
        }
    }

    /// Starts a lookup for `query`.
    ///
    /// Blank or whitespace-only queries are ignored and leave the session
    /// untouched. Otherwise the session moves to `Loading`, the trimmed query
    /// becomes the active query, and the request to issue is returned.
    ///
    /// # Examples
    ///
    /// ```
    /// use bookfinder::app::search::{SearchController, SearchStatus};
    /// use bookfinder::catalog::CatalogConfig;
    ///
    /// let mut search = SearchController::new(CatalogConfig::default());
    /// assert!(search.submit("   ").is_none());
    ///
    /// let request = search.submit("dune").unwrap();
    /// assert_eq!(request.seq(), 1);
    /// assert_eq!(search.status(), &SearchStatus::Loading);
    /// ```
    pub fn submit(&mut self, query: &str) -> Option<CatalogRequest> {
        let query = query.trim();
        if query.is_empty() {
            tracing::debug!("ignoring blank query");
            return None;
        }

        self.latest_seq += 1;
        query.clone_into(&mut self.query);
        self.status = SearchStatus::Loading;

        tracing::debug!(seq = self.latest_seq, query = %self.query, "search submitted");
        Some(CatalogRequest::new(self.latest_seq, &self.query, &self.catalog))
    }

    /// The query to re-run, present only while the session is failed.
    #[must_use]
    pub fn retry_query(&self) -> Option<&str> {
        matches!(self.status, SearchStatus::Failed { .. }).then_some(self.query.as_str())
    }

    /// Applies the outcome of submission `seq`.
    ///
    /// Returns `false` without touching the session when `seq` is not the
    /// latest submission or no lookup is pending.
    pub fn apply(&mut self, seq: u64, outcome: Result<Vec<BookRecord>, LookupError>) -> bool {
        if seq != self.latest_seq {
            tracing::debug!(seq, latest_seq = self.latest_seq, "discarding stale catalog response");
            return false;
        }
        if self.status != SearchStatus::Loading {
            tracing::debug!(seq, "discarding duplicate catalog response");
            return false;
        }

        self.status = match outcome {
            Ok(books) => {
                tracing::debug!(seq, count = books.len(), "search succeeded");
                SearchStatus::Loaded {
                    books: books.into_iter().map(Rc::new).collect(),
                }
            }
            Err(e) => {
                tracing::debug!(seq, error = %e, "search failed");
                SearchStatus::Failed {
                    message: e.to_string(),
                }
            }
        };
        true
    }

    /// The active query (empty before the first submission).
    #[must_use]
    pub fn query(&self) -> &str {
        &self.query
    }

    /// Current session state.
    #[must_use]
    pub const fn status(&self) -> &SearchStatus {
        &self.status
    }

    /// Results of the last successful lookup, empty in every other state.
    #[must_use]
    pub fn results(&self) -> &[SharedBook] {
        match &self.status {
            SearchStatus::Loaded { books } => books,
            _ => &[],
        }
    }

    /// Sequence number of the most recent submission.
    #[must_use]
    pub const fn latest_seq(&self) -> u64 {
        self.latest_seq
    }
}
