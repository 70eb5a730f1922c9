//! Geometry primitives
//!
//! Distance comparisons, dashed-line discretization, slope-form line
//! intersection and scene-edge extension. Everything works in screen space
//! (x to the right, y down).

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::DRAG_RADIUS;
use crate::error::{Degeneracy, OpticsResult};

/// Below this horizontal extent a line is treated as vertical
const VERTICAL_EPSILON: f32 = 1e-6;

/// Upper bound on dash + gap units for one dashed line
pub const MAX_DASH_UNITS: u32 = 100_000;

/// Squared euclidean distance (for comparisons only)
#[inline]
pub fn distance_squared(p: Vec2, q: Vec2) -> f32 {
    let d = q - p;
    d.x * d.x + d.y * d.y
}

/// Whether the pointer is close enough to grab a handle
#[inline]
pub fn is_in_drag_range(handle: Vec2, pointer: Vec2) -> bool {
    distance_squared(handle, pointer) <= DRAG_RADIUS * DRAG_RADIUS
}

/// Reflect a direction off a surface with given unit normal
#[inline]
pub fn reflect(dir: Vec2, normal: Vec2) -> Vec2 {
    dir - 2.0 * dir.dot(normal) * normal
}

/// Lazy sequence of drawn sub-segments along `start..end`
///
/// The line is cut into `ceil(length / spacing)` units that alternate
/// drawn/gap, starting drawn at `start`. The last drawn unit always runs
/// through to `end`. Clone it (or call [`DashedSegment::restart`]) to walk
/// the dashes again.
#[derive(Debug, Clone)]
pub struct DashedSegment {
    start: Vec2,
    end: Vec2,
    step: Vec2,
    units: u32,
    next_unit: u32,
}

/// Discretize `p1..p2` into dashes of length `spacing`
pub fn dashed_segment(p1: Vec2, p2: Vec2, spacing: f32) -> OpticsResult<DashedSegment> {
    if !(spacing.is_finite() && spacing > 0.0) {
        return Err(Degeneracy::InvalidSpacing(spacing).into());
    }

    let length = (p2 - p1).length();
    if length <= f32::EPSILON {
        return Err(Degeneracy::ZeroLengthSegment { x: p1.x, y: p1.y }.into());
    }

    let units = (length / spacing).ceil();
    if !(units <= MAX_DASH_UNITS as f32) {
        return Err(Degeneracy::TooManyDashes { length, spacing }.into());
    }

    Ok(DashedSegment {
        start: p1,
        end: p2,
        step: (p2 - p1) / length * spacing,
        units: units as u32,
        next_unit: 0,
    })
}

impl DashedSegment {
    /// Total dash + gap units covering the line
    pub fn units(&self) -> u32 {
        self.units
    }

    /// Rewind to the first dash
    pub fn restart(&mut self) {
        self.next_unit = 0;
    }
}

impl Iterator for DashedSegment {
    type Item = (Vec2, Vec2);

    fn next(&mut self) -> Option<Self::Item> {
        if self.next_unit >= self.units {
            return None;
        }

        let unit = self.next_unit;
        self.next_unit += 2;

        let from = self.start + self.step * unit as f32;
        let to = if self.next_unit >= self.units {
            self.end
        } else {
            self.start + self.step * (unit + 1) as f32
        };

        Some((from, to))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = (self.units.saturating_sub(self.next_unit) as usize).div_ceil(2);
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for DashedSegment {}

/// Infinite line through two points
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Line {
    pub a: Vec2,
    pub b: Vec2,
}

impl Line {
    pub fn through(a: Vec2, b: Vec2) -> Self {
        Self { a, b }
    }

    pub fn from_direction(origin: Vec2, dir: Vec2) -> Self {
        Self {
            a: origin,
            b: origin + dir,
        }
    }

    #[inline]
    pub fn is_vertical(&self) -> bool {
        (self.b.x - self.a.x).abs() < VERTICAL_EPSILON
    }

    /// dy/dx, `None` for vertical lines
    pub fn slope(&self) -> Option<f32> {
        if self.is_vertical() {
            None
        } else {
            Some((self.b.y - self.a.y) / (self.b.x - self.a.x))
        }
    }

    /// Height of the line at `x` (`None` for vertical lines)
    pub fn y_at(&self, x: f32) -> Option<f32> {
        self.slope().map(|m| self.a.y + m * (x - self.a.x))
    }

    /// Crossing point of two lines, `None` when parallel
    pub fn intersection(&self, other: &Line) -> Option<Vec2> {
        match (self.slope(), other.slope()) {
            (Some(m1), Some(m2)) => {
                if (m1 - m2).abs() < f32::EPSILON {
                    return None;
                }
                // a1.y + m1 (x - a1.x) = a2.y + m2 (x - a2.x)
                let x = (m1 * self.a.x - m2 * other.a.x + other.a.y - self.a.y) / (m1 - m2);
                Some(Vec2::new(x, self.a.y + m1 * (x - self.a.x)))
            }
            (None, Some(_)) => {
                let x = self.a.x;
                other.y_at(x).map(|y| Vec2::new(x, y))
            }
            (Some(_), None) => {
                let x = other.a.x;
                self.y_at(x).map(|y| Vec2::new(x, y))
            }
            (None, None) => None,
        }
    }
}

/// Scene rectangle `[0, width] x [0, height]`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub width: f32,
    pub height: f32,
}

impl Bounds {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Where a ray from `origin` along `dir` reaches the scene edge
    ///
    /// Rays leave through the left or right edge; (near-)vertical rays
    /// leave through the top or bottom. An edge that lies behind the origin
    /// yields the origin itself.
    pub fn extend(&self, origin: Vec2, dir: Vec2) -> OpticsResult<Vec2> {
        let dir = dir.try_normalize().ok_or(Degeneracy::ZeroDirection)?;
        let ray = Line::from_direction(origin, dir);

        let edge_x = if dir.x > 0.0 { self.width } else { 0.0 };
        let edge = Line::through(Vec2::new(edge_x, 0.0), Vec2::new(edge_x, self.height));

        let exit = ray.intersection(&edge).unwrap_or_else(|| {
            let edge_y = if dir.y > 0.0 { self.height } else { 0.0 };
            Vec2::new(origin.x, edge_y)
        });

        if (exit - origin).dot(dir) < 0.0 {
            Ok(origin)
        } else {
            Ok(exit)
        }
    }
}
