//! Error types
//!
//! Geometry only fails when user-adjustable parameters combine into a shape
//! the paraxial construction cannot express. The `can_draw` gate keeps the
//! frame loop out of these states; these errors surface a bypassed gate.

/// Specific cause of a degenerate construction
#[derive(Debug, Clone, Copy, PartialEq, thiserror::Error)]
pub enum Degeneracy {
    #[error("horizontal ray at offset {offset} from the axis misses a mirror of radius {radius}")]
    RayMissesMirror { offset: f32, radius: f32 },
    #[error("dashed segment endpoints coincide at ({x}, {y})")]
    ZeroLengthSegment { x: f32, y: f32 },
    #[error("dash spacing must be positive, got {0}")]
    InvalidSpacing(f32),
    #[error("a {length} long line at dash spacing {spacing} needs too many dashes")]
    TooManyDashes { length: f32, spacing: f32 },
    #[error("object sits on the mirror vertex")]
    ObjectAtVertex,
    #[error("object sits on the focal point, image forms at infinity")]
    ImageAtInfinity,
    #[error("ray direction has zero length")]
    ZeroDirection,
}

/// Crate error type
#[derive(Debug, thiserror::Error)]
pub enum OpticsError {
    #[error("degenerate geometry: {0}")]
    DegenerateGeometry(#[from] Degeneracy),
    #[error("settings parse error: {0}")]
    Settings(#[from] serde_json::Error),
    #[error("invalid settings: {0}")]
    InvalidSettings(String),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl OpticsError {
    /// The degenerate-geometry cause, if this is a geometry error
    pub fn degeneracy(&self) -> Option<Degeneracy> {
        match self {
            OpticsError::DegenerateGeometry(cause) => Some(*cause),
            _ => None,
        }
    }
}

pub type OpticsResult<T> = Result<T, OpticsError>;
