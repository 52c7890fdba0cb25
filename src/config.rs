//! Client configuration
//!
//! The API base is baked in at build time via `SNAPFIND_API_BASE` (falling
//! back to a local loopback backend) and can be overridden at runtime with
//! `--api-base` or the same environment variable.

use std::time::Duration;

/// Fallback when no base URL is configured anywhere.
pub const DEFAULT_API_BASE: &str = "http://localhost:8000";

/// Client-side timeout for the search request.
pub const REQUEST_TIMEOUT: Duration = Duration::from_millis(15_000);

/// Bounds for the result count `k`.
pub const K_MIN: u32 = 1;
pub const K_MAX: u32 = 50;

/// Default result count.
pub const DEFAULT_K: u32 = 10;

/// Resolve the compiled-in API base.
///
/// Runtime overrides (flag or env var) are layered on top by the CLI.
pub fn compiled_api_base() -> &'static str {
    option_env!("SNAPFIND_API_BASE").unwrap_or(DEFAULT_API_BASE)
}

/// Normalize a base URL: strip trailing slashes so joins stay predictable.
pub fn normalize_base(base: &str) -> String {
    base.trim_end_matches('/').to_string()
}

/// Clamp a requested result count into [K_MIN, K_MAX].
pub fn clamp_k(k: i64) -> u32 {
    k.clamp(K_MIN as i64, K_MAX as i64) as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clamp_k_bounds() {
        assert_eq!(clamp_k(0), 1);
        assert_eq!(clamp_k(-3), 1);
        assert_eq!(clamp_k(1), 1);
        assert_eq!(clamp_k(10), 10);
        assert_eq!(clamp_k(50), 50);
        assert_eq!(clamp_k(75), 50);
    }

    #[test]
    fn normalize_strips_trailing_slashes() {
        assert_eq!(normalize_base("http://localhost:8000/"), "http://localhost:8000");
        assert_eq!(normalize_base("http://localhost:8000"), "http://localhost:8000");
        assert_eq!(normalize_base("https://api.example.com///"), "https://api.example.com");
    }
}
