//! Paraxial optics module
//!
//! All geometry lives here. This module must stay pure:
//! - Every derived quantity is a function of one `Snapshot`
//! - Degenerate inputs fail fast with `OpticsError`, never NaN or infinity
//! - No rendering or platform dependencies

pub mod arc;
pub mod geometry;
pub mod image;
pub mod mirror;
pub mod rays;
pub mod state;
pub mod tick;

pub use arc::MirrorArc;
pub use geometry::{Bounds, DashedSegment, Line, dashed_segment, distance_squared, is_in_drag_range};
pub use image::{ImagePoint, locate_image};
pub use mirror::{MirrorKind, MirrorModel};
pub use rays::{
    PrincipalRay, RayFan, RayPath, RaySegment, SegmentRole, StrokeStyle, can_draw, trace_focus,
    trace_parallel, trace_symmetrical,
};
pub use state::{DragHandle, DragState, HandlePoint, ObjectPoint, Scene, Snapshot};
pub use tick::{TickInput, tick};
