use egui::Pos2;

use crate::model::Coords;

/// Fixed observer position in world space.
pub const OBSERVER: Coords = Coords::new(1.0, 0.5, -1.0);
/// Tilt of the viewing plane around the depth axis.
pub const TILT: f64 = std::f64::consts::PI / 9.0;
/// Azimuthal rotation of the depth axis into the screen plane.
pub const AZIMUTH: f64 = std::f64::consts::PI / 9.0;
/// Base magnification before depth falloff.
pub const GLOBAL_SCALE: f64 = 0.9;
/// Depth falloff rate along the horizontal screen axis.
pub const DEPTH_FACTOR_X: f64 = 1.2;
/// Depth falloff rate along the vertical screen axis. Deliberately steeper
/// than the horizontal rate: the anisotropy is part of the look.
pub const DEPTH_FACTOR_Y: f64 = 1.5;

/// Pure 3D-to-2D perspective mapping for one canvas.
///
/// Depends only on the canvas dimensions; two projections with equal
/// dimensions map every point identically.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projection {
    pub width: f64,
    pub height: f64,
    org_x: f64,
    org_y: f64,
}

impl Projection {
    pub fn new(width: f64, height: f64) -> Projection {
        Projection {
            width,
            height,
            org_x: width / 2.0,
            org_y: height / 2.0,
        }
    }

    /// Euclidean distance from the point to the observer. Scales both
    /// perspective shrink and disc radii.
    pub fn horizon(&self, p: Coords) -> f64 {
        let dx = p.x - OBSERVER.x;
        let dy = p.y - OBSERVER.y;
        let dz = p.z - OBSERVER.z;
        (dx * dx + dy * dy + dz * dz).sqrt()
    }

    /// Map a world point to canvas coordinates. A point coinciding with
    /// the observer has no finite image; `None` means skip the draw.
    pub fn project(&self, p: Coords) -> Option<Pos2> {
        let h = self.horizon(p);
        if h == 0.0 {
            return None;
        }
        let sx = (GLOBAL_SCALE * self.width) / (1.0 + DEPTH_FACTOR_X * h);
        let sy = (GLOBAL_SCALE * self.width) / (1.0 + DEPTH_FACTOR_Y * h);
        let x = self.org_x + sx * (p.x * TILT.cos() + p.z * AZIMUTH.cos());
        let y = self.height - self.org_y - sy * (p.y + p.z * AZIMUTH.sin() - p.x * TILT.sin());
        Some(Pos2::new(x as f32, y as f32))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn projection_is_deterministic() {
        let a = Projection::new(1200.0, 800.0);
        let b = Projection::new(1200.0, 800.0);
        let p = Coords::new(0.3, -0.2, 0.7);
        assert_eq!(a.project(p), b.project(p));
    }

    #[test]
    fn observer_coincidence_has_no_image() {
        let proj = Projection::new(1200.0, 800.0);
        assert_eq!(proj.horizon(OBSERVER), 0.0);
        assert!(proj.project(OBSERVER).is_none());
    }

    #[test]
    fn horizon_grows_with_distance_from_observer() {
        let proj = Projection::new(1200.0, 800.0);
        let near = proj.horizon(Coords::new(0.9, 0.5, -0.9));
        let far = proj.horizon(Coords::new(-1.0, -1.0, 5.0));
        assert!(near < far);
        assert!(near > 0.0);
    }

    #[test]
    fn depth_falloff_is_anisotropic() {
        // The same depth step moves the image less vertically than the
        // horizontal factor alone would predict.
        assert!(DEPTH_FACTOR_Y > DEPTH_FACTOR_X);
        let proj = Projection::new(1000.0, 1000.0);
        let p = Coords::new(0.5, 0.5, 0.5);
        let img = proj.project(p).unwrap();
        // Recompute by hand to pin the formula.
        let h = proj.horizon(p);
        let sx = (GLOBAL_SCALE * 1000.0) / (1.0 + DEPTH_FACTOR_X * h);
        let expect_x = 500.0 + sx * (p.x * TILT.cos() + p.z * AZIMUTH.cos());
        assert!((img.x - expect_x as f32).abs() < 1e-3);
    }
}
