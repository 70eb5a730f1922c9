//! Image locator
//!
//! Paraxial mirror equation `1/u + 1/v = 1/f` solved directly in screen
//! space. `u` is the object's distance in front of the vertex, `v` the
//! image distance (positive = real image in front, negative = virtual image
//! behind the mirror), `f = ±radius/2`.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::mirror::MirrorModel;
use super::state::ObjectPoint;
use crate::error::{Degeneracy, OpticsResult};

/// Relative slack on `1/f - 1/u` before the image is treated as at infinity
const INFINITY_TOLERANCE: f32 = 1e-5;

/// Image cross-point and magnification
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ImagePoint {
    pub x: f32,
    pub y: f32,
    /// Signed magnification: negative = inverted, |scale| > 1 = magnified
    pub scale: f32,
    /// Signed image distance from the vertex (negative = virtual)
    pub distance: f32,
}

impl ImagePoint {
    #[inline]
    pub fn position(&self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }

    /// Foot of the image arrow on the optical axis
    #[inline]
    pub fn base(&self, axis_y: f32) -> Vec2 {
        Vec2::new(self.x, axis_y)
    }

    pub fn is_inverted(&self) -> bool {
        self.scale < 0.0
    }

    pub fn is_virtual(&self) -> bool {
        self.distance < 0.0
    }
}

/// Locate the image of `object` formed by `mirror`
///
/// Fails when the object sits on the vertex (zero object distance) or on
/// the focal point (image at infinity).
pub fn locate_image(mirror: &MirrorModel, object: &ObjectPoint) -> OpticsResult<ImagePoint> {
    let u = mirror.object_distance(object.x);
    if u.abs() <= f32::EPSILON * mirror.radius {
        return Err(Degeneracy::ObjectAtVertex.into());
    }

    let inv_f = 1.0 / mirror.focal_length();
    let denominator = inv_f - 1.0 / u;
    if denominator.abs() <= inv_f.abs() * INFINITY_TOLERANCE {
        return Err(Degeneracy::ImageAtInfinity.into());
    }

    let v = 1.0 / denominator;
    if !v.is_finite() {
        return Err(Degeneracy::ImageAtInfinity.into());
    }

    let scale = -v / u;
    Ok(ImagePoint {
        x: mirror.vertex_x() + v,
        y: mirror.axis_y + scale * (object.y - mirror.axis_y),
        scale,
        distance: v,
    })
}
