//! Error types for agent construction

use thiserror::Error;

/// Configuration errors, raised only while building agents or worlds
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    /// Parameter must be strictly positive
    #[error("`{field}` must be positive, got {value}")]
    NonPositive { field: &'static str, value: f32 },

    /// Parameter must be a finite number
    #[error("`{field}` must be finite")]
    NonFinite { field: &'static str },

    /// Parameter outside its allowed range
    #[error("`{field}` must lie in [{min}, {max}], got {value}")]
    OutOfRange {
        field: &'static str,
        value: f32,
        min: f32,
        max: f32,
    },

    /// Any other invalid combination of parameters
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Result type for configuration checks
pub type Result<T> = std::result::Result<T, ConfigError>;

/// Require a finite, strictly positive value
pub(crate) fn positive(field: &'static str, value: f32) -> Result<()> {
    finite(field, value)?;
    if value <= 0.0 {
        return Err(ConfigError::NonPositive { field, value });
    }
    Ok(())
}

/// Require a finite, non-negative value
pub(crate) fn non_negative(field: &'static str, value: f32) -> Result<()> {
    finite(field, value)?;
    if value < 0.0 {
        return Err(ConfigError::OutOfRange { field, value, min: 0.0, max: f32::INFINITY });
    }
    Ok(())
}

/// Require a finite value within `[min, max]`
pub(crate) fn in_range(field: &'static str, value: f32, min: f32, max: f32) -> Result<()> {
    finite(field, value)?;
    if value < min || value > max {
        return Err(ConfigError::OutOfRange { field, value, min, max });
    }
    Ok(())
}

pub(crate) fn finite(field: &'static str, value: f32) -> Result<()> {
    if value.is_finite() { Ok(()) } else { Err(ConfigError::NonFinite { field }) }
}
