//! Scene settings
//!
//! Loaded once at startup from JSON (the canvas `data-settings` attribute
//! on the web, an optional file natively). Missing fields fall back to
//! defaults.

use serde::{Deserialize, Serialize};

use crate::consts::{CANVAS_HEIGHT, CANVAS_WIDTH, DASH_SPACING, MIN_DASH_SPACING};
use crate::error::{OpticsError, OpticsResult};
use crate::optics::{Bounds, MirrorKind};
use crate::renderer::commands::Palette;

/// Color theme presets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Theme {
    #[default]
    Light,
    HighContrast,
}

impl Theme {
    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Light => "Light",
            Theme::HighContrast => "High contrast",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().replace(['-', '_', ' '], "").as_str() {
            "light" => Some(Theme::Light),
            "highcontrast" | "contrast" | "hc" => Some(Theme::HighContrast),
            _ => None,
        }
    }

    /// Colors used by the frame builder
    pub fn palette(&self) -> Palette {
        match self {
            Theme::Light => Palette::light(),
            Theme::HighContrast => Palette::high_contrast(),
        }
    }
}

/// Scene settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Canvas ===
    pub canvas_width: f32,
    pub canvas_height: f32,

    // === Mirror ===
    /// Mirror kind selected at startup
    pub mirror_kind: MirrorKind,
    /// Offer the center and radius handles (off = object-only variant)
    pub editable_mirror: bool,

    // === Drawing ===
    /// Dash + gap unit length for dashed lines
    pub dash_spacing: f32,
    /// Draw F, V, C, O and I labels
    pub show_labels: bool,
    pub theme: Theme,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            canvas_width: CANVAS_WIDTH,
            canvas_height: CANVAS_HEIGHT,

            mirror_kind: MirrorKind::Concave,
            editable_mirror: true,

            dash_spacing: DASH_SPACING,
            show_labels: true,
            theme: Theme::Light,
        }
    }
}

impl Settings {
    /// Parse and validate settings JSON
    pub fn from_json(json: &str) -> OpticsResult<Self> {
        let settings: Settings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Reject dimensions and spacing that would make geometry degenerate
    pub fn validate(&self) -> OpticsResult<()> {
        for (name, value) in [
            ("canvas_width", self.canvas_width),
            ("canvas_height", self.canvas_height),
            ("dash_spacing", self.dash_spacing),
        ] {
            if !(value.is_finite() && value > 0.0) {
                return Err(OpticsError::InvalidSettings(format!(
                    "{name} must be positive, got {value}"
                )));
            }
        }
        if self.dash_spacing < MIN_DASH_SPACING {
            return Err(OpticsError::InvalidSettings(format!(
                "dash_spacing must be at least {MIN_DASH_SPACING}, got {}",
                self.dash_spacing
            )));
        }
        Ok(())
    }

    /// Scene extents
    pub fn bounds(&self) -> Bounds {
        Bounds::new(self.canvas_width, self.canvas_height)
    }

    /// Parse settings, falling back to defaults on error
    pub fn from_json_or_default(json: &str) -> Self {
        match Self::from_json(json) {
            Ok(settings) => {
                log::info!("Loaded settings");
                settings
            }
            Err(e) => {
                log::warn!("Rejected settings, using defaults: {e}");
                Self::default()
            }
        }
    }
}
