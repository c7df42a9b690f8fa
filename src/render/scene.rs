use egui::Color32;

use crate::model::Coords;
use crate::render::{
    DARK_BLUE, DARK_GREEN, DARK_GREY, DARK_RED, LIGHT_BLUE, LIGHT_GREEN, LIGHT_GREY, ORANGE, RED,
};

/// One recorded draw in world space. Radii, widths and font sizes are base
/// values; the responsive scale is applied when the scene is painted.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCmd {
    Disc {
        center: Coords,
        radius: f64,
        rim: Color32,
        core: Color32,
    },
    Label {
        at: Coords,
        text: String,
        size: f32,
        color: Color32,
    },
    Line {
        from: Coords,
        to: Coords,
        color: Color32,
        width: f32,
    },
    Arrow {
        from: Coords,
        to: Coords,
        color: Color32,
        width: f32,
    },
}

/// Recorded world-space draw list for one panel's canvas.
///
/// Builders append typed primitives; the paint layer replays the list
/// through a projection each frame. Order matters: later commands draw on
/// top.
#[derive(Debug, Clone, Default)]
pub struct Scene {
    pub cmds: Vec<DrawCmd>,
}

impl Scene {
    pub fn new() -> Scene {
        Scene::default()
    }

    pub fn line(&mut self, from: Coords, to: Coords, color: Color32, width: f32) {
        self.cmds.push(DrawCmd::Line { from, to, color, width });
    }

    pub fn arrow(&mut self, from: Coords, to: Coords, color: Color32, width: f32) {
        self.cmds.push(DrawCmd::Arrow { from, to, color, width });
    }

    pub fn label(&mut self, at: Coords, text: &str, size: f32, color: Color32) {
        self.cmds.push(DrawCmd::Label {
            at,
            text: text.to_string(),
            size,
            color,
        });
    }

    fn disc(&mut self, center: Coords, radius: f64, rim: Color32, core: Color32) {
        self.cmds.push(DrawCmd::Disc { center, radius, rim, core });
    }

    // ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
    //  Node kinds
    // ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

    pub fn event(&mut self, at: Coords) {
        self.disc(at, 6.0, DARK_RED, RED);
    }

    pub fn thing(&mut self, at: Coords) {
        self.disc(at, 4.0, DARK_GREEN, LIGHT_GREEN);
    }

    pub fn concept(&mut self, at: Coords) {
        self.disc(at, 4.0, DARK_BLUE, LIGHT_BLUE);
    }

    // ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
    //  Relation arrows
    // ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

    pub fn leads_to(&mut self, from: Coords, to: Coords) {
        self.arrow(from, to, DARK_RED, 3.0);
    }

    pub fn contains(&mut self, from: Coords, to: Coords) {
        self.arrow(from, to, LIGHT_BLUE, 2.0);
    }

    pub fn expresses(&mut self, from: Coords, to: Coords) {
        self.arrow(from, to, ORANGE, 2.0);
    }

    pub fn near(&mut self, from: Coords, to: Coords) {
        self.arrow(from, to, DARK_GREY, 1.0);
    }

    /// Link the current point back to the previous one according to the
    /// signed relation offset of the arrow between them. Negative offsets
    /// point backward, so the arrow is drawn toward the previous point.
    /// The origin sentinel means "no previous point": nothing is drawn.
    pub fn connect(&mut self, st_offset: i64, this: Coords, last: Coords) {
        if last.is_origin() {
            return;
        }
        match st_offset {
            -3 => self.expresses(this, last),
            -2 => self.contains(this, last),
            -1 | 0 => self.leads_to(this, last),
            1 => self.leads_to(last, this),
            2 => self.contains(last, this),
            3 => self.expresses(last, this),
            other => log::warn!("bad relation offset {} in path link", other),
        }
    }

    /// Ground plane and half-axes under the graph.
    pub fn grid(&mut self) {
        let length = 1.0;
        let mut xi = -length;
        while xi <= length {
            self.line(
                Coords::new(xi, 0.0, -length),
                Coords::new(xi, 0.0, length),
                LIGHT_GREY,
                1.0,
            );
            xi += 0.1;
        }
        let mut zi = -length;
        while zi <= length {
            self.line(
                Coords::new(-length, 0.0, zi),
                Coords::new(length, 0.0, zi),
                LIGHT_GREY,
                1.0,
            );
            zi += 0.1;
        }
        self.line(
            Coords::new(-length / 2.0, 0.0, 0.0),
            Coords::ORIGIN,
            LIGHT_GREY,
            1.0,
        );
        self.line(
            Coords::new(0.0, 0.0, -length / 2.0),
            Coords::ORIGIN,
            LIGHT_GREY,
            1.0,
        );
        self.line(
            Coords::new(0.0, -length / 2.0, 0.0),
            Coords::new(0.0, length, 0.0),
            LIGHT_GREY,
            1.0,
        );
    }

    /// One entry of the arrow-directory fan: a forward/backward pair of
    /// arrows radiating from the origin at the given angle, labelled at
    /// both tips. The offset picks the arrow style by relation axis.
    pub fn arrow_pair(&mut self, angle: f64, st_offset: i64, fwd: &str, bwd: &str) {
        let tip = Coords::new(0.5 * angle.cos(), 0.5 * angle.sin(), 0.0);
        let back = Coords::new(-tip.x, -tip.y, 0.0);
        match st_offset {
            0 => {
                self.near(Coords::ORIGIN, tip);
                self.near(Coords::ORIGIN, back);
            }
            1 | -1 => {
                self.leads_to(Coords::ORIGIN, tip);
                self.leads_to(Coords::ORIGIN, back);
            }
            2 | -2 => {
                self.contains(Coords::ORIGIN, tip);
                self.contains(Coords::ORIGIN, back);
            }
            3 | -3 => {
                self.expresses(Coords::ORIGIN, tip);
                self.expresses(Coords::ORIGIN, back);
            }
            other => log::warn!("bad relation offset {} in arrow directory", other),
        }
        self.label(tip, fwd, 12.0, Color32::BLACK);
        self.label(back, bwd, 12.0, Color32::BLACK);
    }
}
