use egui::{Align2, Color32, FontFamily, FontId, Pos2, Rect, Stroke, Vec2};

use crate::render::projection::Projection;
use crate::render::scene::{DrawCmd, Scene};

/// Head opening half-angle of an arrowhead.
const HEAD_ANGLE: f32 = std::f32::consts::PI / 12.0;
/// Base arrowhead length before depth scaling.
const HEAD_LEN: f32 = 12.0;
/// Clearance between the arrow tip and the node disc it points at.
const NODE_CLEARANCE: f32 = 10.0;
/// Screen-space offset of a node label from its disc.
const LABEL_OFFSET_X: f32 = 30.0;
/// Rings used to fake the radial disc gradient.
const GRADIENT_RINGS: usize = 4;

fn blend(a: Color32, b: Color32, t: f32) -> Color32 {
    let lerp = |x: u8, y: u8| (x as f32 + (y as f32 - x as f32) * t) as u8;
    Color32::from_rgb(lerp(a.r(), b.r()), lerp(a.g(), b.g()), lerp(a.b(), b.b()))
}

fn bold(size: f32) -> FontId {
    // Proportional bold is not a separate family in the default egui
    // fonts; a slight size bump stands in for the weight.
    FontId::new(size, FontFamily::Proportional)
}

/// Replay a recorded scene into the given rect. The projection is rebuilt
/// from the rect dimensions each call, so resizing just works; `mob` is
/// the responsive magnification for widths and font sizes.
pub fn paint_scene(painter: &egui::Painter, rect: Rect, scene: &Scene, mob: f32) {
    let proj = Projection::new(rect.width() as f64, rect.height() as f64);
    let origin = rect.min.to_vec2();

    for cmd in &scene.cmds {
        match cmd {
            DrawCmd::Line { from, to, color, width } => {
                if let (Some(a), Some(b)) = (proj.project(*from), proj.project(*to)) {
                    painter.line_segment(
                        [a + origin, b + origin],
                        Stroke::new(width * mob, *color),
                    );
                }
            }
            DrawCmd::Arrow { from, to, color, width } => {
                if let (Some(a), Some(b)) = (proj.project(*from), proj.project(*to)) {
                    paint_arrow(
                        painter,
                        a + origin,
                        b + origin,
                        to.z as f32,
                        *color,
                        width * mob,
                    );
                }
            }
            DrawCmd::Disc { center, radius, rim, core } => {
                if let Some(c) = proj.project(*center) {
                    let r = (radius * mob as f64 * 1.6 / proj.horizon(*center)) as f32;
                    paint_disc(painter, c + origin, r, *rim, *core);
                }
            }
            DrawCmd::Label { at, text, size, color } => {
                if let Some(p) = proj.project(*at) {
                    painter.text(
                        p + origin + Vec2::new(LABEL_OFFSET_X, 0.0),
                        Align2::LEFT_CENTER,
                        text,
                        bold(size * mob),
                        *color,
                    );
                }
            }
        }
    }
}

/// Disc with a radial rim-to-core blend, approximated as concentric rings.
fn paint_disc(painter: &egui::Painter, center: Pos2, radius: f32, rim: Color32, core: Color32) {
    painter.circle_filled(center, radius, rim);
    for ring in 1..=GRADIENT_RINGS {
        let t = ring as f32 / GRADIENT_RINGS as f32;
        painter.circle_filled(center, radius * (1.0 - t * 0.6), blend(rim, core, t));
    }
}

/// Shaft plus a two-stroke head. The head shrinks with the depth of the
/// target point so distant arrows read as distant.
fn paint_arrow(painter: &egui::Painter, from: Pos2, to: Pos2, to_z: f32, color: Color32, width: f32) {
    let stroke = Stroke::new(width, color);
    painter.line_segment([from, to], stroke);

    let depth = 1.1 - to_z;
    let angle = (to.y - from.y).atan2(to.x - from.x);
    let head_len = HEAD_LEN * depth;
    let clearance = NODE_CLEARANCE * depth;

    let tip = Pos2::new(to.x - clearance * angle.cos(), to.y - clearance * angle.sin());
    let left = Pos2::new(
        to.x - head_len * (angle - HEAD_ANGLE).cos(),
        to.y - head_len * (angle - HEAD_ANGLE).sin(),
    );
    let right = Pos2::new(
        to.x - head_len * (angle + HEAD_ANGLE).cos(),
        to.y - head_len * (angle + HEAD_ANGLE).sin(),
    );
    painter.line_segment([tip, left], stroke);
    painter.line_segment([tip, right], stroke);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blend_endpoints_return_inputs() {
        let a = Color32::from_rgb(10, 20, 30);
        let b = Color32::from_rgb(200, 100, 0);
        assert_eq!(blend(a, b, 0.0), a);
        assert_eq!(blend(a, b, 1.0), b);
    }

    #[test]
    fn blend_midpoint_is_between() {
        let a = Color32::from_rgb(0, 0, 0);
        let b = Color32::from_rgb(200, 100, 50);
        let mid = blend(a, b, 0.5);
        assert_eq!(mid, Color32::from_rgb(100, 50, 25));
    }
}
