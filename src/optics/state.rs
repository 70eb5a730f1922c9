//! Scene state and drag handles
//!
//! `MirrorModel` and `ObjectPoint` are the only persistent mutable state.
//! Everything else (rays, image, handle positions) is derived from an
//! immutable [`Snapshot`] taken at the start of each tick.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::geometry::{Bounds, is_in_drag_range};
use super::mirror::MirrorModel;
use crate::settings::Settings;

/// Tip of the object arrow (its base sits on the optical axis)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ObjectPoint {
    pub x: f32,
    pub y: f32,
}

impl ObjectPoint {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    #[inline]
    pub fn tip(&self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }

    /// Foot of the arrow on the optical axis
    #[inline]
    pub fn base(&self, axis_y: f32) -> Vec2 {
        Vec2::new(self.x, axis_y)
    }
}

/// Immutable per-tick view of the scene fed to all geometry functions
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub mirror: MirrorModel,
    pub object: ObjectPoint,
    pub bounds: Bounds,
}

impl Snapshot {
    pub fn new(mirror: MirrorModel, object: ObjectPoint, bounds: Bounds) -> Self {
        Self {
            mirror,
            object,
            bounds,
        }
    }
}

/// Grabbable control points
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DragHandle {
    /// Object arrow tip
    Object,
    /// Center of curvature, moves the whole mirror
    Center,
    /// Mirror vertex, changes the radius
    Radius,
}

impl DragHandle {
    /// Hit-test priority order
    pub const ALL: [DragHandle; 3] = [DragHandle::Object, DragHandle::Center, DragHandle::Radius];

    pub fn as_str(&self) -> &'static str {
        match self {
            DragHandle::Object => "object",
            DragHandle::Center => "center",
            DragHandle::Radius => "radius",
        }
    }

    /// Screen point this handle is bound to
    pub fn position(self, snapshot: &Snapshot) -> Vec2 {
        match self {
            DragHandle::Object => snapshot.object.tip(),
            DragHandle::Center => snapshot.mirror.center(),
            DragHandle::Radius => snapshot.mirror.vertex(),
        }
    }
}

/// A handle with its current screen position
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HandlePoint {
    pub handle: DragHandle,
    pub position: Vec2,
}

/// Pointer capture state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum DragState {
    #[default]
    Idle,
    /// Handle follows the pointer until the button is released
    Capturing(DragHandle),
}

/// Complete scene state, owned by the frame loop
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Scene {
    pub mirror: MirrorModel,
    pub object: ObjectPoint,
    pub bounds: Bounds,
    pub drag: DragState,
    /// Center and radius handles are offered
    pub editable_mirror: bool,
    /// Handle under the pointer (or captured) for highlighting
    pub hovered: Option<DragHandle>,
    /// Button state sampled on the previous tick
    pub pointer_was_held: bool,
}

impl Scene {
    /// Default layout with a seeded object position
    pub fn new(seed: u64, settings: &Settings) -> Self {
        let bounds = settings.bounds();
        let axis_y = bounds.height / 2.0;
        let mirror = MirrorModel::new(
            settings.mirror_kind,
            0.3 * bounds.width,
            axis_y,
            0.25 * bounds.width,
        );

        // Object range sits in front of the vertex for both mirror kinds
        let mut rng = Pcg32::seed_from_u64(seed);
        let x = rng.random_range(0.6..=0.9) * bounds.width;
        let lift = rng.random_range(0.1..=0.25) * bounds.height;

        let mut scene = Self::with_geometry(mirror, ObjectPoint::new(x, axis_y - lift), bounds);
        scene.editable_mirror = settings.editable_mirror;
        scene
    }

    pub fn with_geometry(mirror: MirrorModel, object: ObjectPoint, bounds: Bounds) -> Self {
        Self {
            mirror,
            object,
            bounds,
            drag: DragState::Idle,
            editable_mirror: true,
            hovered: None,
            pointer_was_held: false,
        }
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot::new(self.mirror, self.object, self.bounds)
    }

    /// Offered handles in hit-test order
    pub fn handles(&self) -> Vec<HandlePoint> {
        let snapshot = self.snapshot();
        DragHandle::ALL
            .into_iter()
            .filter(|h| self.editable_mirror || *h == DragHandle::Object)
            .map(|handle| HandlePoint {
                handle,
                position: handle.position(&snapshot),
            })
            .collect()
    }

    /// First handle within grab range of the pointer
    pub fn hit_test(&self, pointer: Vec2) -> Option<DragHandle> {
        self.handles()
            .into_iter()
            .find(|h| is_in_drag_range(h.position, pointer))
            .map(|h| h.handle)
    }

    /// Captured handle, or the hovered one
    pub fn active_handle(&self) -> Option<DragHandle> {
        match self.drag {
            DragState::Capturing(handle) => Some(handle),
            DragState::Idle => self.hovered,
        }
    }
}
