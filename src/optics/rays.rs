//! Principal ray construction
//!
//! Three canonical rays per object point:
//! - Parallel: travels parallel to the axis, reflects through the focus
//! - Symmetrical: hits the vertex, reflects mirrored about the axis
//! - Focus: heads for the focus, reflects parallel to the axis
//!
//! Outgoing (reflected) segments are solid and reach the scene boundary.
//! Geometric extensions that justify the construction are dashed.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::geometry::{Line, reflect};
use super::image::{ImagePoint, locate_image};
use super::mirror::MirrorKind;
use super::state::Snapshot;
use crate::consts::DRAW_MARGIN;
use crate::error::{Degeneracy, OpticsResult};

/// The three canonical rays
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PrincipalRay {
    Parallel,
    /// Pivots on the vertex (pole), where the surface normal is the axis
    Symmetrical,
    Focus,
}

impl PrincipalRay {
    pub const ALL: [PrincipalRay; 3] = [
        PrincipalRay::Parallel,
        PrincipalRay::Symmetrical,
        PrincipalRay::Focus,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            PrincipalRay::Parallel => "parallel",
            PrincipalRay::Symmetrical => "symmetrical",
            PrincipalRay::Focus => "focus",
        }
    }

    /// Construct this ray for the snapshot (locates the image when needed)
    pub fn trace(self, snapshot: &Snapshot) -> OpticsResult<RayPath> {
        match self {
            PrincipalRay::Parallel => trace_parallel(snapshot),
            PrincipalRay::Symmetrical => trace_symmetrical(snapshot),
            PrincipalRay::Focus => {
                let image = locate_image(&snapshot.mirror, &snapshot.object)?;
                trace_focus(snapshot, &image)
            }
        }
    }
}

/// How a segment must be stroked
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StrokeStyle {
    Solid,
    Dashed,
}

/// What a segment stands for in the construction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SegmentRole {
    /// Object to reflection point
    Incoming,
    /// Reflection point to scene boundary
    Reflected,
    /// Reflected ray continued backward behind the mirror
    Extension,
    /// Helper line to the virtual focus
    Construction,
}

impl SegmentRole {
    pub fn stroke(self) -> StrokeStyle {
        match self {
            SegmentRole::Incoming | SegmentRole::Reflected => StrokeStyle::Solid,
            SegmentRole::Extension | SegmentRole::Construction => StrokeStyle::Dashed,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RaySegment {
    pub from: Vec2,
    pub to: Vec2,
    pub role: SegmentRole,
}

impl RaySegment {
    fn new(from: Vec2, to: Vec2, role: SegmentRole) -> Self {
        Self { from, to, role }
    }

    #[inline]
    pub fn stroke(&self) -> StrokeStyle {
        self.role.stroke()
    }
}

/// One constructed principal ray
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RayPath {
    pub ray: PrincipalRay,
    /// Where the ray meets the mirror
    pub reflection: Vec2,
    /// Segments in drawing order
    pub segments: Vec<RaySegment>,
}

impl RayPath {
    pub fn segment(&self, role: SegmentRole) -> Option<&RaySegment> {
        self.segments.iter().find(|s| s.role == role)
    }

    /// Infinite line carrying the reflected ray
    pub fn outgoing_line(&self) -> Option<Line> {
        self.segment(SegmentRole::Reflected)
            .map(|s| Line::through(s.from, s.to))
    }
}

/// Validity gate: rays and image are only constructed when this holds
///
/// Keeps the object clear of the mirror surface by `DRAW_MARGIN` and inside
/// the mirror's aperture, away from every division-by-zero path.
pub fn can_draw(snapshot: &Snapshot) -> bool {
    let mirror = &snapshot.mirror;
    let object = &snapshot.object;

    if (mirror.axis_y - object.y).abs() > mirror.radius {
        return false;
    }

    match mirror.kind {
        MirrorKind::Concave => mirror
            .reflection_point_x(object.y)
            .map(|surface_x| object.x > surface_x + DRAW_MARGIN)
            .unwrap_or(false),
        MirrorKind::Convex => object.x >= mirror.vertex_x() + DRAW_MARGIN,
    }
}

/// Horizontal in, through (or away from) the focus out
pub fn trace_parallel(snapshot: &Snapshot) -> OpticsResult<RayPath> {
    let mirror = &snapshot.mirror;
    let object = snapshot.object.tip();
    let reflection = mirror.reflection_point(object.y)?;

    // Toward the real focus (concave), away from the virtual one (convex)
    let outgoing = mirror.sign() * (mirror.focus() - reflection);

    Ok(RayPath {
        ray: PrincipalRay::Parallel,
        reflection,
        segments: vec![
            RaySegment::new(object, reflection, SegmentRole::Incoming),
            RaySegment::new(
                reflection,
                snapshot.bounds.extend(reflection, outgoing)?,
                SegmentRole::Reflected,
            ),
            RaySegment::new(
                reflection,
                snapshot.bounds.extend(reflection, -outgoing)?,
                SegmentRole::Extension,
            ),
        ],
    })
}

/// Aimed at the vertex, mirrored about the optical axis
pub fn trace_symmetrical(snapshot: &Snapshot) -> OpticsResult<RayPath> {
    let vertex = snapshot.mirror.vertex();
    let object = snapshot.object.tip();

    let incoming = vertex - object;
    if incoming.length_squared() <= f32::EPSILON {
        return Err(Degeneracy::ZeroDirection.into());
    }
    // Surface normal at the vertex is the axis itself
    let outgoing = reflect(incoming, Vec2::X);

    Ok(RayPath {
        ray: PrincipalRay::Symmetrical,
        reflection: vertex,
        segments: vec![
            RaySegment::new(object, vertex, SegmentRole::Incoming),
            RaySegment::new(
                vertex,
                snapshot.bounds.extend(vertex, outgoing)?,
                SegmentRole::Reflected,
            ),
            RaySegment::new(
                vertex,
                snapshot.bounds.extend(vertex, -outgoing)?,
                SegmentRole::Extension,
            ),
        ],
    })
}

/// Through the focus in, parallel to the axis out at the image height
pub fn trace_focus(snapshot: &Snapshot, image: &ImagePoint) -> OpticsResult<RayPath> {
    let mirror = &snapshot.mirror;
    let object = snapshot.object.tip();
    let reflection = mirror.reflection_point(image.y)?;

    let mut segments = vec![
        RaySegment::new(object, reflection, SegmentRole::Incoming),
        RaySegment::new(
            reflection,
            snapshot.bounds.extend(reflection, Vec2::X)?,
            SegmentRole::Reflected,
        ),
        RaySegment::new(
            reflection,
            snapshot.bounds.extend(reflection, -Vec2::X)?,
            SegmentRole::Extension,
        ),
    ];

    if mirror.kind == MirrorKind::Convex {
        segments.push(RaySegment::new(
            reflection,
            mirror.focus(),
            SegmentRole::Construction,
        ));
    }

    Ok(RayPath {
        ray: PrincipalRay::Focus,
        reflection,
        segments,
    })
}

/// All principal rays for one snapshot
///
/// Rays that cannot be constructed are listed in `skipped` with their cause
/// instead of aborting the whole fan.
#[derive(Debug, Clone, Default)]
pub struct RayFan {
    pub image: Option<ImagePoint>,
    pub paths: Vec<RayPath>,
    pub skipped: Vec<(PrincipalRay, Degeneracy)>,
}

impl RayFan {
    /// Construct every principal ray; call only when [`can_draw`] holds
    pub fn construct(snapshot: &Snapshot) -> Self {
        let mut fan = RayFan::default();

        match locate_image(&snapshot.mirror, &snapshot.object) {
            Ok(image) => fan.image = Some(image),
            Err(err) => {
                log::debug!("No image: {}", err);
                if let Some(cause) = err.degeneracy() {
                    fan.skipped.push((PrincipalRay::Focus, cause));
                }
            }
        }

        for ray in PrincipalRay::ALL {
            let traced = match (ray, fan.image.as_ref()) {
                (PrincipalRay::Parallel, _) => trace_parallel(snapshot),
                (PrincipalRay::Symmetrical, _) => trace_symmetrical(snapshot),
                (PrincipalRay::Focus, Some(image)) => trace_focus(snapshot, image),
                (PrincipalRay::Focus, None) => continue,
            };

            match traced {
                Ok(path) => fan.paths.push(path),
                Err(err) => {
                    log::debug!("Skipped {} ray: {}", ray.as_str(), err);
                    if let Some(cause) = err.degeneracy() {
                        fan.skipped.push((ray, cause));
                    }
                }
            }
        }

        fan
    }

    pub fn get(&self, ray: PrincipalRay) -> Option<&RayPath> {
        self.paths.iter().find(|p| p.ray == ray)
    }

    /// Image point found by intersecting the parallel and symmetrical rays
    ///
    /// Agrees with the image locator in the paraxial limit.
    pub fn traced_crossing(&self) -> Option<Vec2> {
        let parallel = self.get(PrincipalRay::Parallel)?.outgoing_line()?;
        let symmetrical = self.get(PrincipalRay::Symmetrical)?.outgoing_line()?;
        parallel.intersection(&symmetrical)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::optics::geometry::Bounds;
    use crate::optics::mirror::MirrorModel;
    use crate::optics::state::ObjectPoint;
    use proptest::prelude::*;

    fn snapshot(kind: MirrorKind, center_x: f32, object: (f32, f32)) -> Snapshot {
        Snapshot::new(
            MirrorModel::new(kind, center_x, 250.0, 300.0),
            ObjectPoint::new(object.0, object.1),
            Bounds::new(1100.0, 500.0),
        )
    }

    fn concave_scenario() -> Snapshot {
        snapshot(MirrorKind::Concave, 600.0, (500.0, 180.0))
    }

    fn convex_scenario() -> Snapshot {
        snapshot(MirrorKind::Convex, 300.0, (700.0, 200.0))
    }

    fn on_boundary(bounds: &Bounds, p: Vec2) -> bool {
        p.x.abs() < 1e-2
            || (p.x - bounds.width).abs() < 1e-2
            || p.y.abs() < 1e-2
            || (p.y - bounds.height).abs() < 1e-2
    }

    #[test]
    fn test_gate_regression_scenarios() {
        assert!(can_draw(&concave_scenario()));
        assert!(can_draw(&convex_scenario()));
    }

    #[test]
    fn test_gate_closes_near_concave_surface() {
        // Surface at height 180 sits at x ≈ 308.28
        assert!(!can_draw(&snapshot(MirrorKind::Concave, 600.0, (310.0, 180.0))));
        assert!(!can_draw(&snapshot(MirrorKind::Concave, 600.0, (250.0, 180.0))));
        assert!(can_draw(&snapshot(MirrorKind::Concave, 600.0, (313.0, 180.0))));
    }

    #[test]
    fn test_gate_closes_near_convex_vertex() {
        // Vertex at 600
        assert!(!can_draw(&snapshot(MirrorKind::Convex, 300.0, (603.9, 200.0))));
        assert!(can_draw(&snapshot(MirrorKind::Convex, 300.0, (604.0, 200.0))));
    }

    #[test]
    fn test_gate_closes_outside_aperture() {
        let mut s = concave_scenario();
        s.mirror.radius = 50.0;
        s.mirror.center_x = 350.0;
        assert!(!can_draw(&s));
    }

    #[test]
    fn test_parallel_ray_concave() {
        let s = concave_scenario();
        let path = trace_parallel(&s).unwrap();
        assert!((path.reflection.x - 308.281).abs() < 1e-2);
        assert_eq!(path.reflection.y, 180.0);

        // Reflected ray passes through the focus
        let line = path.outgoing_line().unwrap();
        let y = line.y_at(s.mirror.focus_x()).unwrap();
        assert!((y - s.mirror.axis_y).abs() < 1e-2);

        let reflected = path.segment(SegmentRole::Reflected).unwrap();
        assert!((reflected.to.x - 1100.0).abs() < 1e-2);
    }

    #[test]
    fn test_parallel_ray_convex_diverges_from_focus() {
        let s = convex_scenario();
        let path = trace_parallel(&s).unwrap();
        let reflected = path.segment(SegmentRole::Reflected).unwrap();
        // Heads right and away from the axis
        assert!(reflected.to.x > reflected.from.x);
        assert!(reflected.to.y < reflected.from.y);

        // Backward extension passes through the virtual focus
        let extension = path.segment(SegmentRole::Extension).unwrap();
        let line = Line::through(extension.from, extension.to);
        let y = line.y_at(s.mirror.focus_x()).unwrap();
        assert!((y - s.mirror.axis_y).abs() < 1e-2);
    }

    #[test]
    fn test_symmetrical_ray_mirrors_about_axis() {
        let s = concave_scenario();
        let path = trace_symmetrical(&s).unwrap();
        assert_eq!(path.reflection, s.mirror.vertex());

        // Incoming from (500,180) hits (300,250): outgoing slope is +70/200
        let slope = path.outgoing_line().unwrap().slope().unwrap();
        assert!((slope - 0.35).abs() < 1e-4);
    }

    #[test]
    fn test_focus_ray_leaves_parallel_at_image_height() {
        let s = concave_scenario();
        let path = PrincipalRay::Focus.trace(&s).unwrap();
        let reflected = path.segment(SegmentRole::Reflected).unwrap();
        assert!((reflected.from.y - 460.0).abs() < 1e-2);
        assert!((reflected.to.y - 460.0).abs() < 1e-2);
        assert!((reflected.to.x - 1100.0).abs() < 1e-2);
        assert!(path.segment(SegmentRole::Construction).is_none());
    }

    #[test]
    fn test_convex_focus_ray_has_construction_line() {
        let s = convex_scenario();
        let path = PrincipalRay::Focus.trace(&s).unwrap();
        let construction = path.segment(SegmentRole::Construction).unwrap();
        assert_eq!(construction.to, s.mirror.focus());
        assert_eq!(construction.stroke(), StrokeStyle::Dashed);
    }

    #[test]
    fn test_stroke_styles_by_role() {
        for s in [concave_scenario(), convex_scenario()] {
            let fan = RayFan::construct(&s);
            assert_eq!(fan.paths.len(), 3);
            for path in &fan.paths {
                for segment in &path.segments {
                    match segment.role {
                        SegmentRole::Reflected => {
                            assert_eq!(segment.stroke(), StrokeStyle::Solid);
                            assert!(on_boundary(&s.bounds, segment.to));
                        }
                        SegmentRole::Incoming => {
                            assert_eq!(segment.stroke(), StrokeStyle::Solid)
                        }
                        SegmentRole::Extension | SegmentRole::Construction => {
                            assert_eq!(segment.stroke(), StrokeStyle::Dashed)
                        }
                    }
                }
            }
        }
    }

    #[test]
    fn test_fan_skips_focus_ray_at_infinity() {
        let s = snapshot(MirrorKind::Concave, 600.0, (450.0, 200.0));
        assert!(can_draw(&s));
        let fan = RayFan::construct(&s);
        assert!(fan.image.is_none());
        assert_eq!(fan.paths.len(), 2);
        assert_eq!(
            fan.skipped,
            vec![(PrincipalRay::Focus, Degeneracy::ImageAtInfinity)]
        );
    }

    #[test]
    fn test_fan_skips_focus_ray_above_aperture() {
        // Object inside the focus: m = 3, image height 250 + 3 * -110 = -80
        let s = snapshot(MirrorKind::Concave, 600.0, (400.0, 140.0));
        let fan = RayFan::construct(&s);
        assert!(fan.image.is_some());
        assert!(fan.get(PrincipalRay::Focus).is_none());
        assert!(matches!(
            fan.skipped.as_slice(),
            [(PrincipalRay::Focus, Degeneracy::RayMissesMirror { .. })]
        ));
    }

    #[test]
    fn test_traced_crossing_matches_image_near_axis() {
        let s = snapshot(MirrorKind::Concave, 600.0, (500.0, 245.0));
        let fan = RayFan::construct(&s);
        let image = fan.image.unwrap();
        let crossing = fan.traced_crossing().unwrap();
        assert!((crossing.x - image.x).abs() < 3.0, "{crossing} vs {image:?}");
        assert!((crossing.y - image.y).abs() < 0.5, "{crossing} vs {image:?}");
    }

    #[test]
    fn test_gated_bypass_fails_fast() {
        // Object on the concave vertex: gate is closed and every path errors
        let s = snapshot(MirrorKind::Concave, 600.0, (300.0, 250.0));
        assert!(!can_draw(&s));
        assert!(PrincipalRay::Focus.trace(&s).is_err());
        assert!(PrincipalRay::Symmetrical.trace(&s).is_err());
    }

    proptest! {
        #[test]
        fn prop_reflection_points_on_mirror(
            convex in any::<bool>(),
            center_x in 200.0f32..700.0,
            radius in 80.0f32..400.0,
            gap in 10.0f32..400.0,
            lift in 0.0f32..0.5,
        ) {
            let kind = if convex { MirrorKind::Convex } else { MirrorKind::Concave };
            let mirror = MirrorModel::new(kind, center_x, 250.0, radius);
            let object = ObjectPoint::new(mirror.vertex_x() + gap, 250.0 - lift * radius);
            let s = Snapshot::new(mirror, object, Bounds::new(1100.0, 500.0));
            prop_assume!(can_draw(&s));

            let fan = RayFan::construct(&s);
            for path in &fan.paths {
                let d = (path.reflection - mirror.center()).length();
                prop_assert!((d - radius).abs() < 1e-2 * radius.max(1.0),
                    "{} ray at distance {} from center, radius {}", path.ray.as_str(), d, radius);
            }
        }

        #[test]
        fn prop_gate_closes_before_vertex(
            convex in any::<bool>(),
            radius in 50.0f32..400.0,
            approach in 0.0f32..3.9,
        ) {
            let kind = if convex { MirrorKind::Convex } else { MirrorKind::Concave };
            let mirror = MirrorModel::new(kind, 500.0, 250.0, radius);
            let object = ObjectPoint::new(mirror.vertex_x() + approach, 250.0);
            let s = Snapshot::new(mirror, object, Bounds::new(1100.0, 500.0));
            prop_assert!(!can_draw(&s));
        }
    }
}
