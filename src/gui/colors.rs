use eframe::egui::Color32;

/// Badge colour for a similarity percent: red through amber to green.
pub fn similarity_color(percent: u8) -> Color32 {
    match percent {
        90..=u8::MAX => Color32::from_rgb(45, 165, 65),
        70..=89 => Color32::from_rgb(120, 175, 45),
        50..=69 => Color32::from_rgb(200, 175, 35),
        30..=49 => Color32::from_rgb(210, 120, 40),
        _ => Color32::from_rgb(200, 55, 55),
    }
}

/// Background for the empty placeholder tiles shown while loading.
pub fn placeholder_fill(index: usize) -> Color32 {
    if index % 2 == 0 {
        Color32::from_rgb(38, 38, 42)
    } else {
        Color32::from_rgb(32, 32, 36)
    }
}

/// Inline alert palette (background, border, text).
pub fn alert_colors() -> (Color32, Color32, Color32) {
    (
        Color32::from_rgb(45, 18, 18),
        Color32::from_rgb(140, 50, 50),
        Color32::from_rgb(240, 180, 180),
    )
}
