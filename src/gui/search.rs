//! Search form state

use crate::config::DEFAULT_K;

/// State of the search bar widgets
pub struct SearchState {
    /// Current query text
    pub query: String,
    /// Requested result count, kept within [1, 50] by the widget
    pub k: u32,
    /// Whether a submit is pending
    pub needs_search: bool,
    /// First frame flag (for auto-focus)
    pub first_frame: bool,
}

impl Default for SearchState {
    fn default() -> Self {
        Self {
            query: String::new(),
            k: DEFAULT_K,
            needs_search: false,
            first_frame: true,
        }
    }
}
