//! Frame building from scene state
//!
//! Shape helpers return draw commands; [`build_frame`] stacks them in
//! painter's order: background, mirror, axis, rays, arrows and markers,
//! handles.

use glam::Vec2;
use serde::Serialize;

use super::commands::{Color, DrawCommand, Palette, RenderSink, Stroke};
use crate::consts::{HANDLE_DIAMETER, HANDLE_DIAMETER_ACTIVE, MIRROR_HIGHLIGHT_OFFSET};
use crate::optics::{
    MirrorArc, RayFan, Scene, SegmentRole, Snapshot, StrokeStyle, can_draw, dashed_segment,
};
use crate::settings::Settings;

const MIRROR_HIGHLIGHT_WEIGHT: f32 = 6.0;
const MIRROR_CORE_WEIGHT: f32 = 2.0;
const AXIS_WEIGHT: f32 = 1.0;
const RAY_WEIGHT: f32 = 1.5;
const ARROW_WEIGHT: f32 = 3.0;
const ARROW_HEAD_LENGTH: f32 = 10.0;
const ARROW_HEAD_HALF_WIDTH: f32 = 5.0;
const MARKER_DIAMETER: f32 = 6.0;
const LABEL_SIZE: f32 = 14.0;
const LABEL_OFFSET: Vec2 = Vec2::new(-4.0, 20.0);

/// Ordered draw commands for one frame
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Frame {
    pub commands: Vec<DrawCommand>,
}

impl Frame {
    /// Replay every command into a sink
    pub fn submit<S: RenderSink + ?Sized>(&self, sink: &mut S) {
        for command in &self.commands {
            sink.draw(command);
        }
    }

    fn extend(&mut self, commands: impl IntoIterator<Item = DrawCommand>) {
        self.commands.extend(commands);
    }

    fn push(&mut self, command: DrawCommand) {
        self.commands.push(command);
    }
}

/// Two-tone mirror: wide highlight just outside the core arc
pub fn mirror_arc(arc: &MirrorArc, palette: &Palette) -> Vec<DrawCommand> {
    let start = arc.theta_start;
    let end = start + arc.angular_span();

    [
        (
            arc.radius + MIRROR_HIGHLIGHT_OFFSET,
            Stroke::new(palette.mirror_highlight, MIRROR_HIGHLIGHT_WEIGHT),
        ),
        (arc.radius, Stroke::new(palette.mirror_core, MIRROR_CORE_WEIGHT)),
    ]
    .into_iter()
    .map(|(radius, stroke)| DrawCommand::Arc {
        center: arc.center,
        radius_x: radius,
        radius_y: radius,
        start,
        end,
        stroke,
    })
    .collect()
}

/// Line as a solid stroke or a run of dashes
///
/// A dashed line that cannot be discretized (zero length) is dropped.
pub fn styled_line(
    from: Vec2,
    to: Vec2,
    stroke: Stroke,
    style: StrokeStyle,
    spacing: f32,
) -> Vec<DrawCommand> {
    match style {
        StrokeStyle::Solid => vec![DrawCommand::Line { from, to, stroke }],
        StrokeStyle::Dashed => match dashed_segment(from, to, spacing) {
            Ok(dashes) => dashes
                .map(|(from, to)| DrawCommand::Line { from, to, stroke })
                .collect(),
            Err(e) => {
                log::debug!("Dropped dashed line: {}", e);
                Vec::new()
            }
        },
    }
}

/// Arrow from `base` to `tip` with a two-stroke head
pub fn arrow(
    base: Vec2,
    tip: Vec2,
    stroke: Stroke,
    style: StrokeStyle,
    spacing: f32,
) -> Vec<DrawCommand> {
    let mut commands = styled_line(base, tip, stroke, style, spacing);

    let shaft = tip - base;
    if shaft.length() <= ARROW_HEAD_LENGTH {
        return commands;
    }

    let dir = shaft.normalize();
    let perp = Vec2::new(-dir.y, dir.x);
    let back = tip - dir * ARROW_HEAD_LENGTH;
    for side in [1.0, -1.0] {
        commands.push(DrawCommand::Line {
            from: tip,
            to: back + perp * ARROW_HEAD_HALF_WIDTH * side,
            stroke,
        });
    }

    commands
}

/// Point marker with an optional label beneath it
pub fn marker(center: Vec2, label: Option<&str>, palette: &Palette) -> Vec<DrawCommand> {
    let mut commands = vec![DrawCommand::Circle {
        center,
        diameter: MARKER_DIAMETER,
        fill: palette.marker,
    }];
    if let Some(text) = label {
        commands.push(text_label(center, text, palette.label));
    }
    commands
}

fn text_label(anchor: Vec2, text: &str, fill: Color) -> DrawCommand {
    DrawCommand::Text {
        position: anchor + LABEL_OFFSET,
        text: text.to_string(),
        size: LABEL_SIZE,
        fill,
    }
}

/// Every segment of every constructed ray
pub fn ray_fan(fan: &RayFan, palette: &Palette, spacing: f32) -> Vec<DrawCommand> {
    fan.paths
        .iter()
        .flat_map(|path| path.segments.iter())
        .flat_map(|segment| {
            let color = match segment.role {
                SegmentRole::Incoming | SegmentRole::Reflected => palette.ray,
                SegmentRole::Extension | SegmentRole::Construction => palette.construction,
            };
            styled_line(
                segment.from,
                segment.to,
                Stroke::new(color, RAY_WEIGHT),
                segment.stroke(),
                spacing,
            )
        })
        .collect()
}

/// Build the full frame for the current scene
pub fn build_frame(scene: &Scene, settings: &Settings) -> Frame {
    let palette = settings.theme.palette();
    let spacing = settings.dash_spacing;
    let snapshot: Snapshot = scene.snapshot();
    let mirror = &snapshot.mirror;
    let label = |text: &'static str| settings.show_labels.then_some(text);

    let mut frame = Frame::default();
    frame.push(DrawCommand::Background {
        color: palette.background,
    });
    frame.extend(mirror_arc(&mirror.arc(), &palette));
    frame.push(DrawCommand::Line {
        from: Vec2::new(0.0, mirror.axis_y),
        to: Vec2::new(snapshot.bounds.width, mirror.axis_y),
        stroke: Stroke::new(palette.axis, AXIS_WEIGHT),
    });

    let fan = if can_draw(&snapshot) {
        Some(RayFan::construct(&snapshot))
    } else {
        log::debug!(
            "Gate closed for object at ({:.1}, {:.1})",
            snapshot.object.x,
            snapshot.object.y
        );
        None
    };

    if let Some(fan) = &fan {
        frame.extend(ray_fan(fan, &palette, spacing));
    }

    let object = &snapshot.object;
    frame.extend(arrow(
        object.base(mirror.axis_y),
        object.tip(),
        Stroke::new(palette.object, ARROW_WEIGHT),
        StrokeStyle::Solid,
        spacing,
    ));
    if let Some(text) = label("O") {
        frame.push(text_label(object.tip(), text, palette.label));
    }

    if let Some(fan) = &fan {
        if let Some(image) = &fan.image {
            let style = if image.is_virtual() {
                StrokeStyle::Dashed
            } else {
                StrokeStyle::Solid
            };
            frame.extend(arrow(
                image.base(mirror.axis_y),
                image.position(),
                Stroke::new(palette.image, ARROW_WEIGHT),
                style,
                spacing,
            ));
            if let Some(text) = label("I") {
                frame.push(text_label(image.position(), text, palette.label));
            }
        }

        frame.extend(marker(mirror.focus(), label("F"), &palette));
        frame.extend(marker(mirror.vertex(), label("V"), &palette));
        frame.extend(marker(mirror.center(), label("C"), &palette));
    }

    let active = scene.active_handle();
    for handle in scene.handles() {
        let is_active = active == Some(handle.handle);
        frame.push(DrawCommand::Circle {
            center: handle.position,
            diameter: if is_active {
                HANDLE_DIAMETER_ACTIVE
            } else {
                HANDLE_DIAMETER
            },
            fill: if is_active {
                palette.handle_active
            } else {
                palette.handle
            },
        });
    }

    frame
}
