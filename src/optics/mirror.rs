//! Spherical mirror model
//!
//! Single source of truth for mirror geometry. Concave and convex mirrors
//! differ only by the orientation sign baked into [`MirrorKind::sign`]:
//! the object always sits on the `+x` side, a concave mirror curves around
//! it and a convex mirror bulges toward it.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::arc::MirrorArc;
use crate::consts::{CONCAVE_ARC_DEG, CONVEX_ARC_DEG};
use crate::error::{Degeneracy, OpticsResult};

/// Mirror curvature
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum MirrorKind {
    #[default]
    Concave,
    Convex,
}

impl MirrorKind {
    /// +1 for concave, -1 for convex
    #[inline]
    pub fn sign(self) -> f32 {
        match self {
            MirrorKind::Concave => 1.0,
            MirrorKind::Convex => -1.0,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            MirrorKind::Concave => "concave",
            MirrorKind::Convex => "convex",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "concave" | "cc" => Some(MirrorKind::Concave),
            "convex" | "cv" => Some(MirrorKind::Convex),
            _ => None,
        }
    }

    /// Heading shown above the canvas
    pub fn title(&self) -> &'static str {
        match self {
            MirrorKind::Concave => "Concave mirror",
            MirrorKind::Convex => "Convex mirror",
        }
    }

    /// Drawn sweep around the center of curvature (degrees)
    pub fn arc_degrees(self) -> (f32, f32) {
        match self {
            MirrorKind::Concave => CONCAVE_ARC_DEG,
            MirrorKind::Convex => CONVEX_ARC_DEG,
        }
    }
}

/// Mirror geometry in screen space
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MirrorModel {
    pub kind: MirrorKind,
    /// Center of curvature (x)
    pub center_x: f32,
    /// Optical axis height, shared by the whole scene
    pub axis_y: f32,
    /// Radius of curvature (> 0)
    pub radius: f32,
}

impl MirrorModel {
    pub fn new(kind: MirrorKind, center_x: f32, axis_y: f32, radius: f32) -> Self {
        debug_assert!(radius > 0.0, "mirror radius must be positive");
        Self {
            kind,
            center_x,
            axis_y,
            radius,
        }
    }

    #[inline]
    pub fn sign(&self) -> f32 {
        self.kind.sign()
    }

    /// Center of curvature
    pub fn center(&self) -> Vec2 {
        Vec2::new(self.center_x, self.axis_y)
    }

    /// Pole: where the optical axis meets the arc on the object side
    #[inline]
    pub fn vertex_x(&self) -> f32 {
        self.center_x - self.sign() * self.radius
    }

    pub fn vertex(&self) -> Vec2 {
        Vec2::new(self.vertex_x(), self.axis_y)
    }

    /// Paraxial focal length, positive for a real (concave) focus
    #[inline]
    pub fn focal_length(&self) -> f32 {
        self.sign() * self.radius / 2.0
    }

    #[inline]
    pub fn focus_x(&self) -> f32 {
        self.vertex_x() + self.focal_length()
    }

    pub fn focus(&self) -> Vec2 {
        Vec2::new(self.focus_x(), self.axis_y)
    }

    /// Signed distance of `x` in front of the vertex
    #[inline]
    pub fn object_distance(&self, x: f32) -> f32 {
        x - self.vertex_x()
    }

    /// Where a horizontal ray at height `ray_y` strikes the arc
    ///
    /// Fails when the ray passes above or below the whole circle.
    pub fn reflection_point_x(&self, ray_y: f32) -> OpticsResult<f32> {
        let offset = self.axis_y - ray_y;
        if !offset.is_finite() || offset.abs() > self.radius {
            return Err(Degeneracy::RayMissesMirror {
                offset,
                radius: self.radius,
            }
            .into());
        }

        let triangle_base = (self.radius * self.radius - offset * offset).max(0.0).sqrt();
        Ok(self.center_x - self.sign() * triangle_base)
    }

    pub fn reflection_point(&self, ray_y: f32) -> OpticsResult<Vec2> {
        Ok(Vec2::new(self.reflection_point_x(ray_y)?, ray_y))
    }

    /// The drawn mirror surface
    pub fn arc(&self) -> MirrorArc {
        MirrorArc::from_degrees(self.center(), self.radius, self.kind.arc_degrees())
    }
}
