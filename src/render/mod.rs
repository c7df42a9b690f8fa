//! Rendering layer: world-space scene recording, perspective projection,
//! and replay onto an egui painter.

pub mod paint;
pub mod projection;
pub mod scene;

use egui::Color32;

// Palette shared by the scene emitters and the document view. CSS names
// from the original design, frozen as RGB.
pub const DARK_RED: Color32 = Color32::from_rgb(139, 0, 0);
pub const RED: Color32 = Color32::from_rgb(255, 0, 0);
pub const DARK_GREEN: Color32 = Color32::from_rgb(0, 100, 0);
pub const LIGHT_GREEN: Color32 = Color32::from_rgb(144, 238, 144);
pub const DARK_BLUE: Color32 = Color32::from_rgb(0, 0, 139);
pub const LIGHT_BLUE: Color32 = Color32::from_rgb(173, 216, 230);
pub const ORANGE: Color32 = Color32::from_rgb(255, 165, 0);
pub const DARK_GREY: Color32 = Color32::from_rgb(169, 169, 169);
pub const GREY: Color32 = Color32::from_rgb(128, 128, 128);
pub const LIGHT_GREY: Color32 = Color32::from_rgb(211, 211, 211);

/// Tiered text/label magnification by viewport width, narrowest first.
pub fn responsive_scale(viewport_width: f32) -> f32 {
    if viewport_width < 450.0 {
        0.4
    } else if viewport_width < 1300.0 {
        0.6
    } else {
        1.0
    }
}
