//! Mirror Rays - interactive spherical mirror ray diagrams
//!
//! Core modules:
//! - `optics`: Pure paraxial geometry (mirror model, principal rays, image locator, drag state)
//! - `renderer`: Draw intents for one frame and the Canvas 2D sink
//! - `platform`: Pointer sampling and DOM polling
//! - `settings`: Data-driven scene configuration

pub mod error;
pub mod optics;
pub mod platform;
pub mod renderer;
pub mod settings;

pub use error::{Degeneracy, OpticsError, OpticsResult};
pub use settings::{Settings, Theme};

/// Scene configuration constants
pub mod consts {
    /// Default canvas dimensions
    pub const CANVAS_WIDTH: f32 = 1100.0;
    pub const CANVAS_HEIGHT: f32 = 500.0;

    /// Handle grab tolerance (screen units)
    pub const DRAG_RADIUS: f32 = 16.0;

    /// Margin keeping the object clear of the mirror surface before rays are drawn
    pub const DRAW_MARGIN: f32 = 4.0;

    /// Default dash + gap unit length for construction lines
    pub const DASH_SPACING: f32 = 8.0;

    /// Finer dash spacing than this is rejected at load time
    pub const MIN_DASH_SPACING: f32 = 1.0;

    /// Every draggable quantity stays within this fraction of its canvas dimension
    pub const CLAMP_MIN: f32 = 0.05;
    pub const CLAMP_MAX: f32 = 0.95;

    /// Mirror arc sweeps (degrees, screen space with y pointing down)
    pub const CONCAVE_ARC_DEG: (f32, f32) = (120.0, 240.0);
    pub const CONVEX_ARC_DEG: (f32, f32) = (300.0, 60.0);

    /// Offset of the wide highlight stroke drawn behind the mirror core
    pub const MIRROR_HIGHLIGHT_OFFSET: f32 = 3.0;

    /// Marker diameters for handles
    pub const HANDLE_DIAMETER: f32 = 8.0;
    pub const HANDLE_DIAMETER_ACTIVE: f32 = 16.0;
}

/// Normalized angle to [-π, π)
#[inline]
pub fn normalize_angle(mut angle: f32) -> f32 {
    use std::f32::consts::PI;
    while angle >= PI {
        angle -= 2.0 * PI;
    }
    while angle < -PI {
        angle += 2.0 * PI;
    }
    angle
}

/// Clamp `value` so that `value / extent` stays within [CLAMP_MIN, CLAMP_MAX]
#[inline]
pub fn clamp_fraction(value: f32, extent: f32) -> f32 {
    value.clamp(consts::CLAMP_MIN * extent, consts::CLAMP_MAX * extent)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::PI;

    #[test]
    fn test_normalize_angle_wraps() {
        assert!((normalize_angle(2.5 * PI) - 0.5 * PI).abs() < 1e-5);
        assert!((normalize_angle(-1.5 * PI) - 0.5 * PI).abs() < 1e-5);
        assert!((normalize_angle(0.25) - 0.25).abs() < 1e-6);
    }

    #[test]
    fn test_clamp_fraction() {
        assert_eq!(clamp_fraction(-20.0, 1000.0), 50.0);
        assert_eq!(clamp_fraction(2000.0, 1000.0), 950.0);
        assert_eq!(clamp_fraction(400.0, 1000.0), 400.0);
    }
}
