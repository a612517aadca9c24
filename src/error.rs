use core::fmt;

/// Errors reported by the light registry and its lights
///
/// None of them is fatal: a failed command leaves the light untouched and
/// the next tick still drives every light.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LightError {
    /// No light is registered under the requested name
    NotFound,
    /// Parameter index outside the parameter set
    InvalidParameter { index: usize },
    /// Registry has no free light slots
    TooManyLights,
    /// Another light already uses this name
    DuplicateName,
    /// Name does not fit the fixed-size name buffer
    NameTooLong,
    /// Cell range exceeds the framebuffer
    RangeOutOfBounds,
    /// Cell range shares cells with an existing light
    OverlappingRange,
    /// Command queue has no free slots
    QueueFull,
}

impl fmt::Display for LightError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotFound => f.write_str("light not found"),
            Self::InvalidParameter { index } => {
                write!(f, "parameter index {} out of range", index)
            }
            Self::TooManyLights => f.write_str("too many lights"),
            Self::DuplicateName => f.write_str("duplicate light name"),
            Self::NameTooLong => f.write_str("light name too long"),
            Self::RangeOutOfBounds => f.write_str("cell range out of bounds"),
            Self::OverlappingRange => f.write_str("cell range overlaps another light"),
            Self::QueueFull => f.write_str("command queue full"),
        }
    }
}

impl core::error::Error for LightError {}
