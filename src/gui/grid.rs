//! Result grid rendering
//!
//! Each hit renders as a fixed-width tile: image area, similarity badge,
//! derived name, label text. Tile images are fetched off-thread; this module
//! only reports which resolved URLs still need fetching.

use crate::api::SearchHit;
use crate::display::TileInfo;
use crate::gui::colors;
use eframe::egui::{self, Color32, RichText, Vec2};
use std::collections::HashMap;
use std::sync::Arc;

/// Fetch state of one tile image, keyed by resolved URL.
pub enum ThumbState {
    /// Fetch in flight.
    Pending,
    /// Raw encoded bytes, decoded by the egui image loader.
    Ready(Arc<[u8]>),
    /// Fetch or decode failed; tile shows a placeholder, never an error state.
    Failed,
}

/// Result grid layout parameters
pub struct ResultGrid {
    pub tile_width: f32,
    pub image_height: f32,
}

impl Default for ResultGrid {
    fn default() -> Self {
        Self {
            tile_width: 180.0,
            image_height: 140.0,
        }
    }
}

impl ResultGrid {
    fn columns(&self, ui: &egui::Ui) -> usize {
        let spacing = ui.spacing().item_spacing.x;
        let per_row = (ui.available_width() + spacing) / (self.tile_width + spacing);
        (per_row.floor() as usize).max(1)
    }

    /// Placeholder tiles shown while a search is in flight.
    pub fn show_placeholders(&self, ui: &mut egui::Ui, count: usize) {
        let columns = self.columns(ui);
        egui::Grid::new("placeholder_grid")
            .spacing([12.0, 12.0])
            .show(ui, |ui| {
                for index in 0..count {
                    let (rect, _) = ui.allocate_exact_size(
                        Vec2::new(self.tile_width, self.image_height + 48.0),
                        egui::Sense::hover(),
                    );
                    ui.painter()
                        .rect_filled(rect, 6, colors::placeholder_fill(index));
                    if (index + 1) % columns == 0 {
                        ui.end_row();
                    }
                }
            });
    }

    /// Render the result tiles.
    ///
    /// Returns the resolved image URLs that have no entry in `thumbs` yet so
    /// the app can kick off fetches.
    pub fn show(
        &self,
        ui: &mut egui::Ui,
        hits: &[SearchHit],
        api_base: &str,
        thumbs: &HashMap<String, ThumbState>,
    ) -> Vec<String> {
        let mut wanted = Vec::new();
        let columns = self.columns(ui);

        egui::Grid::new("results_grid")
            .spacing([12.0, 12.0])
            .show(ui, |ui| {
                for (index, hit) in hits.iter().enumerate() {
                    let tile = TileInfo::from_hit(hit, api_base);
                    self.show_tile(ui, index, &tile, thumbs, &mut wanted);
                    if (index + 1) % columns == 0 {
                        ui.end_row();
                    }
                }
            });

        wanted
    }

    fn show_tile(
        &self,
        ui: &mut egui::Ui,
        index: usize,
        tile: &TileInfo,
        thumbs: &HashMap<String, ThumbState>,
        wanted: &mut Vec<String>,
    ) {
        let frame = egui::Frame::group(ui.style())
            .inner_margin(8)
            .show(ui, |ui| {
                ui.set_width(self.tile_width);
                ui.vertical(|ui| {
                    self.show_image_area(ui, index, tile, thumbs, wanted);

                    ui.horizontal(|ui| {
                        ui.label(
                            RichText::new(format!("{}%", tile.similarity))
                                .strong()
                                .color(Color32::WHITE)
                                .background_color(colors::similarity_color(tile.similarity)),
                        );
                        ui.add(
                            egui::Label::new(RichText::new(&tile.name).strong()).truncate(),
                        );
                    });
                    ui.add(egui::Label::new(RichText::new(&tile.label).small().weak()).truncate());
                });
            });

        let response = ui.interact(
            frame.response.rect,
            ui.id().with(("tile", index)),
            egui::Sense::click(),
        );
        response.context_menu(|ui| {
            if !tile.image_src.is_empty() {
                if ui.button("Copy image URL").clicked() {
                    if let Ok(mut clipboard) = arboard::Clipboard::new() {
                        let _ = clipboard.set_text(&tile.image_src);
                    }
                    ui.close_menu();
                }
                if ui.button("Open image").clicked() {
                    if let Err(e) = open::that(&tile.image_src) {
                        log::warn!("failed to open {}: {}", tile.image_src, e);
                    }
                    ui.close_menu();
                }
                ui.separator();
            }
            if ui.button("Copy name").clicked() {
                if let Ok(mut clipboard) = arboard::Clipboard::new() {
                    let _ = clipboard.set_text(&tile.name);
                }
                ui.close_menu();
            }
        });
    }

    fn show_image_area(
        &self,
        ui: &mut egui::Ui,
        index: usize,
        tile: &TileInfo,
        thumbs: &HashMap<String, ThumbState>,
        wanted: &mut Vec<String>,
    ) {
        let image_size = Vec2::new(self.tile_width - 16.0, self.image_height);

        if tile.image_src.is_empty() {
            self.empty_image(ui, index, image_size, "no image");
            return;
        }

        match thumbs.get(&tile.image_src) {
            Some(ThumbState::Ready(bytes)) => {
                let uri = format!("bytes://{}", tile.image_src);
                ui.add_sized(
                    image_size,
                    egui::Image::from_bytes(uri, egui::load::Bytes::Shared(bytes.clone()))
                        .max_size(image_size),
                );
            }
            Some(ThumbState::Failed) => {
                self.empty_image(ui, index, image_size, "image unavailable");
            }
            Some(ThumbState::Pending) => {
                self.loading_image(ui, image_size);
            }
            None => {
                wanted.push(tile.image_src.clone());
                self.loading_image(ui, image_size);
            }
        }
    }

    fn empty_image(&self, ui: &mut egui::Ui, index: usize, size: Vec2, caption: &str) {
        let (rect, _) = ui.allocate_exact_size(size, egui::Sense::hover());
        ui.painter()
            .rect_filled(rect, 4, colors::placeholder_fill(index));
        ui.painter().text(
            rect.center(),
            egui::Align2::CENTER_CENTER,
            caption,
            egui::FontId::proportional(12.0),
            ui.visuals().weak_text_color(),
        );
    }

    fn loading_image(&self, ui: &mut egui::Ui, size: Vec2) {
        let (rect, _) = ui.allocate_exact_size(size, egui::Sense::hover());
        let spinner_rect = egui::Rect::from_center_size(rect.center(), Vec2::splat(20.0));
        egui::Spinner::new().paint_at(ui, spinner_rect);
    }
}
