//! Main SnapFind Application

use crate::api::{SearchClient, SearchHit};
use crate::display::resolve_image_src;
use crate::gui::colors;
use crate::gui::grid::{ResultGrid, ThumbState};
use crate::gui::search::SearchState;
use crate::state::{RequestToken, SearchSession, ViewState};
use crate::{K_MAX, K_MIN};
use eframe::egui;
use std::collections::{HashMap, HashSet};
use std::sync::mpsc::{channel, Receiver, Sender};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

/// Message types for background operations
pub enum BackgroundMessage {
    SearchComplete(RequestToken, Vec<SearchHit>),
    SearchFailed(RequestToken),
    ThumbnailLoaded(String, Arc<[u8]>),
    ThumbnailFailed(String),
}

/// Main application state
pub struct SnapFindApp {
    /// Search form state
    search: SearchState,
    /// View state machine, the only holder of result/loading/error state
    session: SearchSession,
    /// Backend client, cloned into worker threads
    client: SearchClient,
    /// Result grid layout
    grid: ResultGrid,
    /// Tile image fetches, keyed by resolved URL
    thumbs: HashMap<String, ThumbState>,
    /// Channel for background messages
    bg_receiver: Receiver<BackgroundMessage>,
    /// Sender handed to worker threads
    bg_sender: Sender<BackgroundMessage>,
    /// When the in-flight request started
    search_started: Option<Instant>,
    /// How long the last applied search took
    last_elapsed: Option<Duration>,
    /// Show about dialog
    show_about: bool,
}

impl SnapFindApp {
    /// Create a new SnapFindApp
    pub fn new(cc: &eframe::CreationContext<'_>, client: SearchClient) -> Self {
        egui_extras::install_image_loaders(&cc.egui_ctx);

        let (tx, rx) = channel();
        Self {
            search: SearchState::default(),
            session: SearchSession::new(),
            client,
            grid: ResultGrid::default(),
            thumbs: HashMap::new(),
            bg_receiver: rx,
            bg_sender: tx,
            search_started: None,
            last_elapsed: None,
            show_about: false,
        }
    }

    /// Handle a submit: empty queries reset to Idle, anything else issues
    /// exactly one request on a worker thread.
    fn submit_search(&mut self) {
        let Some((query, token)) = self.session.submit(&self.search.query) else {
            self.search_started = None;
            self.last_elapsed = None;
            return;
        };

        self.search_started = Some(Instant::now());
        let client = self.client.clone();
        let k = self.search.k;
        let tx = self.bg_sender.clone();

        thread::spawn(move || match client.search(&query, k) {
            Ok(hits) => {
                let _ = tx.send(BackgroundMessage::SearchComplete(token, hits));
            }
            Err(e) => {
                log::error!("search failed: {}", e);
                let _ = tx.send(BackgroundMessage::SearchFailed(token));
            }
        });
    }

    /// Kick off fetches for tile images the grid asked for.
    fn request_thumbnails(&mut self, urls: Vec<String>) {
        for url in urls {
            if self.thumbs.contains_key(&url) {
                continue;
            }
            self.thumbs.insert(url.clone(), ThumbState::Pending);

            let client = self.client.clone();
            let tx = self.bg_sender.clone();
            thread::spawn(move || match client.fetch_image(&url) {
                Ok(bytes) => {
                    let _ = tx.send(BackgroundMessage::ThumbnailLoaded(url, Arc::from(bytes)));
                }
                Err(e) => {
                    log::warn!("thumbnail fetch failed for {}: {}", url, e);
                    let _ = tx.send(BackgroundMessage::ThumbnailFailed(url));
                }
            });
        }
    }

    /// Process background messages
    fn process_messages(&mut self, ctx: &egui::Context) {
        while let Ok(msg) = self.bg_receiver.try_recv() {
            match msg {
                BackgroundMessage::SearchComplete(token, hits) => {
                    let keep = resolved_srcs(&hits, self.client.base_url());
                    if self.session.complete(token, hits) {
                        self.last_elapsed = self.search_started.take().map(|t| t.elapsed());
                        // Thumbnails from earlier result sets are no longer
                        // reachable; evict them from the map and the loader.
                        for url in prune_thumbs(&mut self.thumbs, &keep) {
                            ctx.forget_image(&format!("bytes://{}", url));
                        }
                    }
                }
                BackgroundMessage::SearchFailed(token) => {
                    if self.session.fail(token) {
                        self.search_started = None;
                        self.last_elapsed = None;
                    }
                }
                BackgroundMessage::ThumbnailLoaded(url, bytes) => {
                    apply_thumbnail(&mut self.thumbs, url, ThumbState::Ready(bytes));
                }
                BackgroundMessage::ThumbnailFailed(url) => {
                    apply_thumbnail(&mut self.thumbs, url, ThumbState::Failed);
                }
            }
        }
    }

    /// Render menu bar
    fn render_menu(&mut self, ctx: &egui::Context) {
        egui::TopBottomPanel::top("menu_bar").show(ctx, |ui| {
            egui::menu::bar(ui, |ui| {
                ui.menu_button("File", |ui| {
                    if ui.button("Exit").clicked() {
                        ctx.send_viewport_cmd(egui::ViewportCommand::Close);
                    }
                });

                ui.menu_button("Help", |ui| {
                    if ui.button("About SnapFind").clicked() {
                        self.show_about = true;
                        ui.close_menu();
                    }
                });
            });
        });
    }

    /// Render search bar
    fn render_search_bar(&mut self, ctx: &egui::Context) {
        egui::TopBottomPanel::top("search_bar").show(ctx, |ui| {
            ui.add_space(4.0);
            ui.horizontal(|ui| {
                ui.label("Search:");

                let response = ui.add(
                    egui::TextEdit::singleline(&mut self.search.query)
                        .desired_width(ui.available_width() - 180.0)
                        .hint_text("e.g. 파란색 모자, pink wings, rainbow star"),
                );

                if self.search.first_frame {
                    response.request_focus();
                    self.search.first_frame = false;
                }

                let submitted =
                    response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter));

                ui.label("k");
                ui.add(
                    egui::DragValue::new(&mut self.search.k)
                        .range(K_MIN..=K_MAX)
                        .speed(1),
                );

                if ui.button("Search").clicked() || submitted {
                    self.search.needs_search = true;
                }
            });
            ui.add_space(4.0);
        });
    }

    /// Render status bar
    fn render_status_bar(&mut self, ctx: &egui::Context) {
        egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                match self.session.state() {
                    ViewState::Idle => {
                        ui.label("Ready");
                    }
                    ViewState::Loading => {
                        ui.spinner();
                        ui.label("Searching...");
                    }
                    ViewState::Success(hits) => {
                        ui.label(format!("{} results", hits.len()));
                        if let Some(elapsed) = self.last_elapsed {
                            ui.separator();
                            ui.label(format!("{:.2}s", elapsed.as_secs_f64()));
                        }
                    }
                    ViewState::Error(_) => {
                        ui.label("Search failed");
                    }
                }

                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    ui.label(self.client.base_url());
                });
            });
        });
    }

    /// Render about dialog
    fn render_about_dialog(&mut self, ctx: &egui::Context) {
        if self.show_about {
            egui::Window::new("About SnapFind")
                .collapsible(false)
                .resizable(false)
                .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
                .show(ctx, |ui| {
                    ui.vertical_centered(|ui| {
                        ui.heading("SnapFind");
                        ui.label(format!("Version {}", crate::VERSION));
                        ui.add_space(10.0);
                        ui.label("Semantic image search client");
                        ui.label("Text → Vector → ANN Search");
                        ui.add_space(10.0);
                        if ui.button("OK").clicked() {
                            self.show_about = false;
                        }
                    });
                });
        }
    }

    /// Render the central panel for the current view state.
    fn render_results(&mut self, ui: &mut egui::Ui) {
        match self.session.state() {
            ViewState::Idle => {
                ui.centered_and_justified(|ui| {
                    ui.label("Type a search term to find matching images");
                });
            }
            ViewState::Loading => {
                ui.vertical_centered(|ui| {
                    ui.add_space(8.0);
                    ui.spinner();
                    ui.label("Searching...");
                    ui.add_space(8.0);
                });
                let placeholders = (self.search.k as usize).min(10);
                self.grid.show_placeholders(ui, placeholders);
            }
            ViewState::Success(hits) if hits.is_empty() => {
                ui.centered_and_justified(|ui| {
                    ui.label("No results. Try a different keyword.");
                });
            }
            ViewState::Success(hits) => {
                let hits = hits.to_vec();
                let wanted = egui::ScrollArea::vertical()
                    .auto_shrink([false, false])
                    .show(ui, |ui| {
                        self.grid
                            .show(ui, &hits, self.client.base_url(), &self.thumbs)
                    })
                    .inner;
                self.request_thumbnails(wanted);
            }
            ViewState::Error(message) => {
                let (fill, border, text) = colors::alert_colors();
                ui.add_space(12.0);
                egui::Frame::new()
                    .fill(fill)
                    .stroke(egui::Stroke::new(1.0, border))
                    .corner_radius(6)
                    .inner_margin(10)
                    .show(ui, |ui| {
                        ui.label(egui::RichText::new(format!("⚠ {}", message)).color(text));
                    });
            }
        }
    }

    fn any_thumb_pending(&self) -> bool {
        self.thumbs
            .values()
            .any(|t| matches!(t, ThumbState::Pending))
    }
}

/// Resolved, non-empty image URLs for a hit set.
fn resolved_srcs(hits: &[SearchHit], api_base: &str) -> HashSet<String> {
    hits.iter()
        .filter_map(|hit| {
            let src = resolve_image_src(hit.image_url.as_deref(), api_base);
            if src.is_empty() {
                None
            } else {
                Some(src)
            }
        })
        .collect()
}

/// Drop every cached thumbnail whose URL is not in `keep`.
///
/// Returns the dropped URLs so the caller can evict their `bytes://` entries
/// from the egui image loader.
fn prune_thumbs(thumbs: &mut HashMap<String, ThumbState>, keep: &HashSet<String>) -> Vec<String> {
    let dropped: Vec<String> = thumbs
        .keys()
        .filter(|url| !keep.contains(*url))
        .cloned()
        .collect();
    for url in &dropped {
        thumbs.remove(url);
    }
    dropped
}

/// Record a finished fetch, but only for URLs still being tracked.
///
/// A fetch whose entry was pruned while it was in flight is discarded, so
/// old result sets cannot repopulate the cache.
fn apply_thumbnail(thumbs: &mut HashMap<String, ThumbState>, url: String, state: ThumbState) {
    if let Some(entry) = thumbs.get_mut(&url) {
        *entry = state;
    } else {
        log::debug!("discarding thumbnail for pruned url {}", url);
    }
}

impl eframe::App for SnapFindApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.process_messages(ctx);

        if self.search.needs_search {
            self.submit_search();
            self.search.needs_search = false;
        }

        self.render_menu(ctx);
        self.render_search_bar(ctx);
        self.render_status_bar(ctx);
        self.render_about_dialog(ctx);

        egui::CentralPanel::default().show(ctx, |ui| {
            self.render_results(ui);
        });

        if self.session.state().is_loading() || self.any_thumb_pending() {
            ctx.request_repaint_after(Duration::from_millis(100));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const BASE: &str = "http://localhost:8000";

    fn hit_with_image(id: &str, image_url: &str) -> SearchHit {
        serde_json::from_value(json!({"id": id, "image_url": image_url})).unwrap()
    }

    fn ready() -> ThumbState {
        ThumbState::Ready(Arc::from(vec![0u8; 64]))
    }

    #[test]
    fn resolved_srcs_skips_hits_without_images() {
        let hits = vec![
            hit_with_image("a", "/static/a.png"),
            hit_with_image("b", "http://cdn/b.png"),
            serde_json::from_value(json!({"id": "c"})).unwrap(),
        ];
        let srcs = resolved_srcs(&hits, BASE);
        assert_eq!(srcs.len(), 2);
        assert!(srcs.contains("http://localhost:8000/static/a.png"));
        assert!(srcs.contains("http://cdn/b.png"));
    }

    #[test]
    fn prune_drops_urls_missing_from_new_results() {
        let mut thumbs = HashMap::new();
        thumbs.insert("http://cdn/old.png".to_string(), ready());
        thumbs.insert("http://cdn/kept.png".to_string(), ready());
        thumbs.insert("http://cdn/pending.png".to_string(), ThumbState::Pending);

        let keep: HashSet<String> = ["http://cdn/kept.png".to_string()].into();
        let mut dropped = prune_thumbs(&mut thumbs, &keep);
        dropped.sort();

        assert_eq!(dropped, vec!["http://cdn/old.png", "http://cdn/pending.png"]);
        assert_eq!(thumbs.len(), 1);
        assert!(thumbs.contains_key("http://cdn/kept.png"));
    }

    #[test]
    fn repeated_searches_do_not_accumulate_thumbnails() {
        let mut thumbs = HashMap::new();

        // Many searches, each with its own k unique image URLs.
        for search in 0..20 {
            let hits: Vec<SearchHit> = (0..10)
                .map(|i| hit_with_image(&format!("{search}-{i}"), &format!("/img/{search}/{i}.png")))
                .collect();
            let keep = resolved_srcs(&hits, BASE);
            prune_thumbs(&mut thumbs, &keep);
            for url in &keep {
                thumbs.insert(url.clone(), ready());
            }
        }

        // Only the latest result set is retained.
        assert_eq!(thumbs.len(), 10);
        assert!(thumbs.contains_key("http://localhost:8000/img/19/0.png"));
        assert!(!thumbs.contains_key("http://localhost:8000/img/0/0.png"));
    }

    #[test]
    fn late_fetch_for_pruned_url_is_discarded() {
        let mut thumbs = HashMap::new();
        thumbs.insert("http://cdn/a.png".to_string(), ThumbState::Pending);

        // New result set no longer references the URL; the entry goes away
        // while the fetch is still in flight.
        prune_thumbs(&mut thumbs, &HashSet::new());
        assert!(thumbs.is_empty());

        // The fetch lands afterwards and must not repopulate the cache.
        apply_thumbnail(&mut thumbs, "http://cdn/a.png".to_string(), ready());
        assert!(thumbs.is_empty());
    }

    #[test]
    fn tracked_fetch_is_applied() {
        let mut thumbs = HashMap::new();
        thumbs.insert("http://cdn/a.png".to_string(), ThumbState::Pending);

        apply_thumbnail(&mut thumbs, "http://cdn/a.png".to_string(), ready());
        assert!(matches!(
            thumbs.get("http://cdn/a.png"),
            Some(ThumbState::Ready(_))
        ));
    }
}
