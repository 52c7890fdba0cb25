//! SnapFind - Desktop client for semantic image search
//!
//! Talks to a vector-search backend over a single HTTP endpoint and renders
//! matching images with similarity scores.
//!
//! # Example
//!
//! ```no_run
//! use snapfind::{SearchClient, similarity_percent};
//!
//! fn main() -> snapfind::Result<()> {
//!     let client = SearchClient::new("http://localhost:8000")?;
//!     let hits = client.search("파란색 모자", 10)?;
//!
//!     for hit in &hits {
//!         println!(
//!             "{:>3}% {}",
//!             similarity_percent(hit.distance),
//!             hit.item_name.as_deref().unwrap_or("?")
//!         );
//!     }
//!
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod config;
pub mod display;
pub mod error;
pub mod gui;
pub mod state;

// Re-export main types
pub use api::{SearchClient, SearchHit};
pub use config::{clamp_k, DEFAULT_K, K_MAX, K_MIN};
pub use display::{display_name, resolve_image_src, similarity_percent, TileInfo};
pub use error::{Result, SnapFindError};
pub use state::{SearchSession, ViewState};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
