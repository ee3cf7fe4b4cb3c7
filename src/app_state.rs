//! Implements a struct that holds the state of the REST server.

use axum::extract::FromRef;

use crate::analytics::TransactionAnalytics;

/// The state of the REST server.
#[derive(Debug, Clone)]
pub struct AppState {
    /// The transaction log loaded at start up, unfiltered.
    pub analytics: TransactionAnalytics,
}

impl AppState {
    /// Create a new [AppState] serving `analytics`.
    pub fn new(analytics: TransactionAnalytics) -> Self {
        Self { analytics }
    }
}

impl FromRef<AppState> for TransactionAnalytics {
    fn from_ref(state: &AppState) -> Self {
        state.analytics.clone()
    }
}
