//! Draw intents for 2D rendering
//!
//! The frame builder never touches pixels. It emits an ordered list of
//! these primitives and any surface implementing [`RenderSink`] replays it.

use glam::Vec2;
use serde::Serialize;

/// RGBA color, components in [0, 1]
pub type Color = [f32; 4];

/// Outline pen
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Stroke {
    pub color: Color,
    pub weight: f32,
}

impl Stroke {
    pub const fn new(color: Color, weight: f32) -> Self {
        Self { color, weight }
    }
}

/// One primitive draw operation
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum DrawCommand {
    /// Fill the whole surface
    Background { color: Color },
    Line { from: Vec2, to: Vec2, stroke: Stroke },
    /// Elliptical arc swept clockwise on screen from `start` to `end` (radians, `end > start`)
    Arc {
        center: Vec2,
        radius_x: f32,
        radius_y: f32,
        start: f32,
        end: f32,
        stroke: Stroke,
    },
    /// Filled circular marker
    Circle { center: Vec2, diameter: f32, fill: Color },
    Text {
        position: Vec2,
        text: String,
        size: f32,
        fill: Color,
    },
}

/// Anything that can replay draw commands
pub trait RenderSink {
    fn draw(&mut self, command: &DrawCommand);
}

/// Recording sink (headless output and tests)
impl RenderSink for Vec<DrawCommand> {
    fn draw(&mut self, command: &DrawCommand) {
        self.push(command.clone());
    }
}

/// CSS `rgba()` string for a color
pub fn css_color(color: Color) -> String {
    let channel = |c: f32| (c.clamp(0.0, 1.0) * 255.0).round() as u8;
    format!(
        "rgba({}, {}, {}, {})",
        channel(color[0]),
        channel(color[1]),
        channel(color[2]),
        color[3].clamp(0.0, 1.0)
    )
}

/// Per-theme colors for scene elements
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Palette {
    pub background: Color,
    pub mirror_highlight: Color,
    pub mirror_core: Color,
    pub axis: Color,
    pub ray: Color,
    pub construction: Color,
    pub object: Color,
    pub image: Color,
    pub marker: Color,
    pub label: Color,
    pub handle: Color,
    pub handle_active: Color,
}

impl Palette {
    pub fn light() -> Self {
        Self {
            background: colors::BACKGROUND,
            mirror_highlight: colors::MIRROR_HIGHLIGHT,
            mirror_core: colors::MIRROR_CORE,
            axis: colors::AXIS,
            ray: colors::RAY,
            construction: colors::CONSTRUCTION,
            object: colors::OBJECT,
            image: colors::IMAGE,
            marker: colors::MARKER,
            label: colors::LABEL,
            handle: colors::HANDLE,
            handle_active: colors::HANDLE_ACTIVE,
        }
    }

    pub fn high_contrast() -> Self {
        Self {
            background: [1.0, 1.0, 1.0, 1.0],
            mirror_highlight: [0.6, 0.6, 0.6, 1.0],
            mirror_core: [0.0, 0.0, 0.0, 1.0],
            axis: [0.0, 0.0, 0.0, 1.0],
            ray: [0.8, 0.0, 0.0, 1.0],
            construction: [0.8, 0.0, 0.0, 1.0],
            object: [0.0, 0.0, 0.6, 1.0],
            image: [0.0, 0.45, 0.0, 1.0],
            marker: [0.0, 0.0, 0.0, 1.0],
            label: [0.0, 0.0, 0.0, 1.0],
            handle: [0.0, 0.0, 0.0, 0.6],
            handle_active: [0.9, 0.5, 0.0, 1.0],
        }
    }
}

/// Colors for scene elements (light theme)
pub mod colors {
    pub const BACKGROUND: [f32; 4] = [0.812, 0.847, 0.863, 1.0]; // #cfd8dc
    pub const MIRROR_HIGHLIGHT: [f32; 4] = [0.392, 0.710, 0.965, 1.0]; // #64b5f6
    pub const MIRROR_CORE: [f32; 4] = [0.082, 0.396, 0.753, 1.0]; // #1565c0
    pub const AXIS: [f32; 4] = [0.3, 0.3, 0.35, 1.0];
    pub const RAY: [f32; 4] = [0.9, 0.3, 0.1, 1.0];
    pub const CONSTRUCTION: [f32; 4] = [0.9, 0.3, 0.1, 0.7];
    pub const OBJECT: [f32; 4] = [0.15, 0.2, 0.6, 1.0];
    pub const IMAGE: [f32; 4] = [0.2, 0.55, 0.3, 1.0];
    pub const MARKER: [f32; 4] = [0.1, 0.1, 0.1, 1.0];
    pub const LABEL: [f32; 4] = [0.1, 0.1, 0.1, 1.0];
    pub const HANDLE: [f32; 4] = [0.1, 0.1, 0.1, 0.5];
    pub const HANDLE_ACTIVE: [f32; 4] = [0.95, 0.6, 0.1, 1.0];
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_css_color() {
        assert_eq!(css_color([1.0, 0.0, 0.5, 1.0]), "rgba(255, 0, 128, 1)");
        assert_eq!(css_color([2.0, -1.0, 0.0, 0.5]), "rgba(255, 0, 0, 0.5)");
    }

    #[test]
    fn test_vec_sink_records_in_order() {
        let mut sink: Vec<DrawCommand> = Vec::new();
        sink.draw(&DrawCommand::Background {
            color: colors::BACKGROUND,
        });
        sink.draw(&DrawCommand::Circle {
            center: Vec2::ZERO,
            diameter: 8.0,
            fill: colors::HANDLE,
        });
        assert_eq!(sink.len(), 2);
        assert!(matches!(sink[0], DrawCommand::Background { .. }));
    }

    #[test]
    fn test_command_json_is_tagged() {
        let json = serde_json::to_value(DrawCommand::Line {
            from: Vec2::new(1.0, 2.0),
            to: Vec2::new(3.0, 4.0),
            stroke: Stroke::new(colors::RAY, 1.0),
        })
        .unwrap();
        assert_eq!(json["op"], "line");
        assert_eq!(json["from"][0], 1.0);
    }
}
