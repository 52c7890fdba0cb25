//! View state machine
//!
//! All UI phases live in one tagged union and change only through
//! [`SearchSession`] transitions: submit, complete, fail. Completions carry
//! the token handed out at submit time, and only the latest token is
//! authoritative. A slow response that lands after a newer submit is dropped
//! instead of overwriting fresher state.

use crate::api::SearchHit;

/// Fixed user-facing message for any request failure.
pub const ERROR_MESSAGE: &str =
    "Cannot reach the search server. Check that the backend is running.";

/// The mutually exclusive UI phases.
#[derive(Debug, Clone, Default)]
pub enum ViewState {
    /// Nothing searched yet.
    #[default]
    Idle,
    /// A request is in flight.
    Loading,
    /// The last request resolved; the hit list may be empty.
    Success(Vec<SearchHit>),
    /// The last request failed.
    Error(String),
}

impl ViewState {
    pub fn is_loading(&self) -> bool {
        matches!(self, ViewState::Loading)
    }

    /// Hits to render, empty for every non-Success phase.
    pub fn hits(&self) -> &[SearchHit] {
        match self {
            ViewState::Success(hits) => hits,
            _ => &[],
        }
    }
}

/// Token identifying one issued request.
pub type RequestToken = u64;

/// Owns the view state and the request token counter.
#[derive(Debug, Default)]
pub struct SearchSession {
    state: ViewState,
    latest_token: RequestToken,
}

impl SearchSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &ViewState {
        &self.state
    }

    /// Handle a submit.
    ///
    /// An empty (post-trim) query resets to Idle without issuing a request
    /// and returns `None`. Otherwise the session enters Loading and returns
    /// the trimmed query together with the token the eventual response must
    /// present.
    pub fn submit(&mut self, query: &str) -> Option<(String, RequestToken)> {
        let trimmed = query.trim();
        if trimmed.is_empty() {
            self.state = ViewState::Idle;
            return None;
        }

        self.latest_token += 1;
        self.state = ViewState::Loading;
        Some((trimmed.to_string(), self.latest_token))
    }

    /// Apply a successful response. Stale tokens are dropped.
    pub fn complete(&mut self, token: RequestToken, hits: Vec<SearchHit>) -> bool {
        if token != self.latest_token {
            log::debug!(
                "dropping stale search response (token {} < {})",
                token,
                self.latest_token
            );
            return false;
        }
        self.state = ViewState::Success(hits);
        true
    }

    /// Apply a failed response. Stale tokens are dropped; the stored message
    /// is the fixed one regardless of cause.
    pub fn fail(&mut self, token: RequestToken) -> bool {
        if token != self.latest_token {
            log::debug!(
                "dropping stale search failure (token {} < {})",
                token,
                self.latest_token
            );
            return false;
        }
        self.state = ViewState::Error(ERROR_MESSAGE.to_string());
        true
    }
}
