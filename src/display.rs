//! Per-result presentation helpers
//!
//! The backend reports a distance metric (smaller = more similar) and a set
//! of optional descriptive fields. These pure functions turn a raw hit into
//! what the tiles actually show, substituting defaults for anything missing.

use crate::api::SearchHit;

/// Shown when a hit carries no label text.
pub const NO_DESCRIPTION: &str = "no description";

/// Convert a backend distance into an integer percent match in [0, 100].
///
/// A missing or non-finite distance counts as 1.0 (worst case). The distance
/// is inverted and clamped so values outside [0, 1] still land in range.
pub fn similarity_percent(distance: Option<f64>) -> u8 {
    let safe = match distance {
        Some(d) if d.is_finite() => d,
        _ => 1.0,
    };
    let similarity = (1.0 - safe).clamp(0.0, 1.0);
    (similarity * 100.0).round() as u8
}

/// Pick the display name for a hit.
///
/// Precedence: explicit item name, then the last path segment of the file
/// path with its extension stripped, then the identifier, then "unknown".
pub fn display_name(
    item_name: Option<&str>,
    filepath: Option<&str>,
    fallback_id: Option<&str>,
) -> String {
    if let Some(name) = item_name {
        if !name.is_empty() {
            return name.to_string();
        }
    }

    let source = match filepath {
        Some(path) if !path.is_empty() => path.rsplit('/').next().unwrap_or(path),
        _ => return fallback_id.unwrap_or("unknown").to_string(),
    };

    strip_extension(source).to_string()
}

/// Resolve a hit's image URL against the API base.
///
/// A missing URL resolves to the empty string. Absolute URLs (http scheme)
/// pass through unchanged. Anything else is treated as a path relative to
/// the API base.
pub fn resolve_image_src(image_url: Option<&str>, api_base: &str) -> String {
    match image_url {
        None | Some("") => String::new(),
        Some(url) if url.starts_with("http") => url.to_string(),
        Some(path) => format!("{}{}", api_base, path),
    }
}

/// All three derivations for one hit, bundled for rendering.
pub struct TileInfo {
    pub name: String,
    pub label: String,
    pub similarity: u8,
    pub image_src: String,
}

impl TileInfo {
    pub fn from_hit(hit: &SearchHit, api_base: &str) -> Self {
        let id = hit.id_text();
        Self {
            name: display_name(
                hit.item_name.as_deref(),
                hit.filepath.as_deref(),
                id.as_deref(),
            ),
            label: hit
                .label
                .clone()
                .filter(|l| !l.is_empty())
                .unwrap_or_else(|| NO_DESCRIPTION.to_string()),
            similarity: similarity_percent(hit.distance),
            image_src: resolve_image_src(hit.image_url.as_deref(), api_base),
        }
    }
}

/// Strip a trailing `.ext` from a file name, leaving dotless names alone.
fn strip_extension(name: &str) -> &str {
    match name.rfind('.') {
        Some(0) | None => name,
        Some(idx) => &name[..idx],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn similarity_inverts_and_clamps() {
        assert_eq!(similarity_percent(Some(0.0)), 100);
        assert_eq!(similarity_percent(Some(1.0)), 0);
        assert_eq!(similarity_percent(Some(-5.0)), 100);
        assert_eq!(similarity_percent(Some(3.5)), 0);
        assert_eq!(similarity_percent(Some(0.25)), 75);
        assert_eq!(similarity_percent(Some(0.333)), 67);
    }

    #[test]
    fn similarity_worst_cases_missing_distance() {
        assert_eq!(similarity_percent(None), 0);
        assert_eq!(similarity_percent(Some(f64::NAN)), 0);
        assert_eq!(similarity_percent(Some(f64::INFINITY)), 0);
    }

    #[test]
    fn name_prefers_item_name() {
        assert_eq!(
            display_name(Some("Red Hat"), Some("a/b/cape.png"), Some("item-1")),
            "Red Hat"
        );
    }

    #[test]
    fn name_falls_back_to_filepath_stem() {
        assert_eq!(display_name(None, Some("a/b/cape.png"), Some("item-1")), "cape");
        assert_eq!(display_name(Some(""), Some("hat.blue.webp"), None), "hat.blue");
        assert_eq!(display_name(None, Some("noext"), None), "noext");
    }

    #[test]
    fn name_falls_back_to_id_then_unknown() {
        assert_eq!(display_name(None, None, Some("item-42")), "item-42");
        assert_eq!(display_name(None, Some(""), Some("item-42")), "item-42");
        assert_eq!(display_name(None, None, None), "unknown");
    }

    #[test]
    fn image_src_resolution() {
        let base = "http://localhost:8000";
        assert_eq!(
            resolve_image_src(Some("http://x/y.png"), base),
            "http://x/y.png"
        );
        assert_eq!(
            resolve_image_src(Some("https://cdn.example.com/y.png"), base),
            "https://cdn.example.com/y.png"
        );
        assert_eq!(
            resolve_image_src(Some("/static/y.png"), base),
            "http://localhost:8000/static/y.png"
        );
        assert_eq!(resolve_image_src(None, base), "");
        assert_eq!(resolve_image_src(Some(""), base), "");
    }

    #[test]
    fn tile_info_substitutes_defaults() {
        let hit: SearchHit = serde_json::from_value(json!({"id": "x"})).unwrap();
        let tile = TileInfo::from_hit(&hit, "http://localhost:8000");
        assert_eq!(tile.name, "x");
        assert_eq!(tile.label, NO_DESCRIPTION);
        assert_eq!(tile.similarity, 0);
        assert_eq!(tile.image_src, "");
    }
}
