//! Frame tick
//!
//! Applies one sampled input to the scene: polls the mirror kind, advances
//! the drag state machine and writes the captured handle's clamped value.

use glam::Vec2;

use super::mirror::MirrorKind;
use super::state::{DragHandle, DragState, Scene};
use crate::clamp_fraction;

/// Input sampled once per tick
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct TickInput {
    /// Pointer position in canvas coordinates
    pub pointer: Vec2,
    /// Pointer button (or touch) held down
    pub button_held: bool,
    /// Currently selected mirror kind
    pub mirror_kind: MirrorKind,
}

/// Advance the scene by one frame
///
/// A handle is captured only on the tick the button goes down. Sweeping a
/// held pointer onto a handle does not grab it.
pub fn tick(scene: &mut Scene, input: &TickInput) {
    if scene.mirror.kind != input.mirror_kind {
        log::info!(
            "Mirror switched: {} -> {}",
            scene.mirror.kind.as_str(),
            input.mirror_kind.as_str()
        );
        scene.mirror.kind = input.mirror_kind;
    }

    let pressed = input.button_held && !scene.pointer_was_held;
    scene.pointer_was_held = input.button_held;

    scene.drag = match (scene.drag, input.button_held) {
        (DragState::Idle, true) if pressed => match scene.hit_test(input.pointer) {
            Some(handle) => {
                log::info!("Captured {} handle", handle.as_str());
                DragState::Capturing(handle)
            }
            None => DragState::Idle,
        },
        (DragState::Capturing(handle), true) => DragState::Capturing(handle),
        (DragState::Capturing(handle), false) => {
            log::info!("Released {} handle", handle.as_str());
            DragState::Idle
        }
        (DragState::Idle, _) => DragState::Idle,
    };

    if let DragState::Capturing(handle) = scene.drag {
        apply_drag(scene, handle, input.pointer);
    }

    scene.hovered = match scene.drag {
        DragState::Capturing(handle) => Some(handle),
        DragState::Idle => scene.hit_test(input.pointer),
    };
}

/// Overwrite the captured handle's state field from the pointer
fn apply_drag(scene: &mut Scene, handle: DragHandle, pointer: Vec2) {
    let bounds = scene.bounds;

    match handle {
        DragHandle::Object => {
            scene.object.x = clamp_fraction(pointer.x, bounds.width);
            scene.object.y = clamp_fraction(pointer.y, bounds.height);
        }
        DragHandle::Center => {
            scene.mirror.center_x = clamp_fraction(pointer.x, bounds.width);
        }
        DragHandle::Radius => {
            // Handle sits on the vertex, one radius from the center
            let radius = scene.mirror.sign() * (scene.mirror.center_x - pointer.x);
            scene.mirror.radius = clamp_fraction(radius, bounds.width);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::optics::geometry::Bounds;
    use crate::optics::mirror::MirrorModel;
    use crate::optics::state::ObjectPoint;

    fn scene(kind: MirrorKind) -> Scene {
        Scene::with_geometry(
            MirrorModel::new(kind, 600.0, 250.0, 300.0),
            ObjectPoint::new(800.0, 180.0),
            Bounds::new(1100.0, 500.0),
        )
    }

    fn held(kind: MirrorKind, x: f32, y: f32) -> TickInput {
        TickInput {
            pointer: Vec2::new(x, y),
            button_held: true,
            mirror_kind: kind,
        }
    }

    fn released(kind: MirrorKind, x: f32, y: f32) -> TickInput {
        TickInput {
            button_held: false,
            ..held(kind, x, y)
        }
    }

    #[test]
    fn test_drag_object_lifecycle() {
        let kind = MirrorKind::Concave;
        let mut s = scene(kind);

        tick(&mut s, &held(kind, 805.0, 185.0));
        assert_eq!(s.drag, DragState::Capturing(DragHandle::Object));
        assert_eq!(s.object, ObjectPoint::new(805.0, 185.0));

        // Fast pointer motion leaves grab range but capture persists
        tick(&mut s, &held(kind, 900.0, 100.0));
        assert_eq!(s.drag, DragState::Capturing(DragHandle::Object));
        assert_eq!(s.object, ObjectPoint::new(900.0, 100.0));

        tick(&mut s, &released(kind, 900.0, 100.0));
        assert_eq!(s.drag, DragState::Idle);

        // Released pointer no longer moves the object
        tick(&mut s, &released(kind, 100.0, 100.0));
        assert_eq!(s.object, ObjectPoint::new(900.0, 100.0));
    }

    #[test]
    fn test_press_away_from_handles_stays_idle() {
        let kind = MirrorKind::Concave;
        let mut s = scene(kind);
        tick(&mut s, &held(kind, 50.0, 50.0));
        assert_eq!(s.drag, DragState::Idle);
        assert_eq!(s.hovered, None);
    }

    #[test]
    fn test_held_pointer_sweeping_onto_handle_stays_idle() {
        let kind = MirrorKind::Concave;
        let mut s = scene(kind);
        tick(&mut s, &held(kind, 50.0, 50.0));
        tick(&mut s, &held(kind, 800.0, 180.0));
        assert_eq!(s.drag, DragState::Idle);
        assert_eq!(s.object, ObjectPoint::new(800.0, 180.0));

        // A fresh press on the handle captures it
        tick(&mut s, &released(kind, 800.0, 180.0));
        tick(&mut s, &held(kind, 800.0, 180.0));
        assert_eq!(s.drag, DragState::Capturing(DragHandle::Object));
    }

    #[test]
    fn test_object_drag_is_clamped() {
        let kind = MirrorKind::Concave;
        let mut s = scene(kind);
        tick(&mut s, &held(kind, 800.0, 180.0));
        tick(&mut s, &held(kind, 2000.0, -40.0));
        assert_eq!(s.object, ObjectPoint::new(1045.0, 25.0));
    }

    #[test]
    fn test_center_drag() {
        let kind = MirrorKind::Concave;
        let mut s = scene(kind);
        tick(&mut s, &held(kind, 600.0, 250.0));
        assert_eq!(s.drag, DragState::Capturing(DragHandle::Center));
        tick(&mut s, &held(kind, 700.0, 300.0));
        assert_eq!(s.mirror.center_x, 700.0);
        tick(&mut s, &held(kind, 5.0, 300.0));
        assert_eq!(s.mirror.center_x, 55.0);
        // Axis height never moves
        assert_eq!(s.mirror.axis_y, 250.0);
    }

    #[test]
    fn test_radius_drag_concave() {
        let kind = MirrorKind::Concave;
        let mut s = scene(kind);
        // Vertex at 300
        tick(&mut s, &held(kind, 300.0, 250.0));
        assert_eq!(s.drag, DragState::Capturing(DragHandle::Radius));
        tick(&mut s, &held(kind, 400.0, 250.0));
        assert_eq!(s.mirror.radius, 200.0);
        assert_eq!(s.mirror.vertex_x(), 400.0);

        // Crossing the center clamps to the minimum radius
        tick(&mut s, &held(kind, 650.0, 250.0));
        assert_eq!(s.mirror.radius, 55.0);
    }

    #[test]
    fn test_radius_drag_convex() {
        let kind = MirrorKind::Convex;
        let mut s = scene(kind);
        s.object = ObjectPoint::new(1000.0, 180.0);
        // Vertex at 900
        tick(&mut s, &held(kind, 900.0, 250.0));
        assert_eq!(s.drag, DragState::Capturing(DragHandle::Radius));
        tick(&mut s, &held(kind, 750.0, 250.0));
        assert_eq!(s.mirror.radius, 150.0);
    }

    #[test]
    fn test_mirror_kind_polled_without_reset() {
        let mut s = scene(MirrorKind::Concave);
        let before = (s.object, s.mirror.center_x, s.mirror.radius);
        tick(&mut s, &released(MirrorKind::Convex, 0.0, 0.0));
        assert_eq!(s.mirror.kind, MirrorKind::Convex);
        assert_eq!(before, (s.object, s.mirror.center_x, s.mirror.radius));
    }

    #[test]
    fn test_hover_tracks_pointer() {
        let kind = MirrorKind::Concave;
        let mut s = scene(kind);
        tick(&mut s, &released(kind, 598.0, 252.0));
        assert_eq!(s.hovered, Some(DragHandle::Center));
        assert_eq!(s.drag, DragState::Idle);
        tick(&mut s, &released(kind, 0.0, 0.0));
        assert_eq!(s.hovered, None);
    }
}
