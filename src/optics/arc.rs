//! Mirror arc geometry
//!
//! The mirror is drawn as a circular arc around its center of curvature:
//! - radius: the mirror's radius of curvature
//! - theta_start, theta_end: angular sweep, measured clockwise on screen
//!   (y points down), normalized to [-π, π)

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::normalize_angle;

/// Circular arc in screen space
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MirrorArc {
    /// Center of curvature
    pub center: Vec2,
    pub radius: f32,
    /// Start angle (radians, normalized to [-π, π))
    pub theta_start: f32,
    /// End angle (radians, normalized to [-π, π))
    pub theta_end: f32,
}

impl MirrorArc {
    pub fn new(center: Vec2, radius: f32, theta_start: f32, theta_end: f32) -> Self {
        Self {
            center,
            radius,
            theta_start: normalize_angle(theta_start),
            theta_end: normalize_angle(theta_end),
        }
    }

    /// Build from a sweep given in degrees
    pub fn from_degrees(center: Vec2, radius: f32, (start, end): (f32, f32)) -> Self {
        Self::new(center, radius, start.to_radians(), end.to_radians())
    }

    /// Angular span of the arc (handles wraparound)
    pub fn angular_span(&self) -> f32 {
        let mut span = self.theta_end - self.theta_start;
        if span < 0.0 {
            span += std::f32::consts::TAU;
        }
        span
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::PI;

    #[test]
    fn test_concave_sweep_wraps_through_pi() {
        let arc = MirrorArc::from_degrees(Vec2::ZERO, 100.0, (120.0, 240.0));
        assert!((arc.theta_start - 2.0 * PI / 3.0).abs() < 1e-5);
        // 240° normalizes to -120°, so the end sits below the start
        assert!((arc.theta_end + 2.0 * PI / 3.0).abs() < 1e-5);
    }

    #[test]
    fn test_convex_sweep_runs_through_zero() {
        let arc = MirrorArc::from_degrees(Vec2::ZERO, 100.0, (300.0, 60.0));
        assert!((arc.theta_start + PI / 3.0).abs() < 1e-5);
        assert!((arc.theta_end - PI / 3.0).abs() < 1e-5);
    }

    #[test]
    fn test_angular_span() {
        let concave = MirrorArc::from_degrees(Vec2::ZERO, 100.0, (120.0, 240.0));
        assert!((concave.angular_span() - 2.0 * PI / 3.0).abs() < 1e-4);

        let convex = MirrorArc::from_degrees(Vec2::ZERO, 100.0, (300.0, 60.0));
        assert!((convex.angular_span() - 2.0 * PI / 3.0).abs() < 1e-4);
    }
}
