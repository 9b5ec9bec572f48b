//! Terrain configuration error types.

/// Errors raised while validating terrain settings.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum TerrainError {
    /// A noise layer (or the field itself) carries an out-of-range value.
    #[error("invalid terrain parameter in layer {layer}: {reason}")]
    InvalidParameter {
        /// Index of the offending layer in declaration order.
        layer: usize,
        /// Human-readable description of the violated bound.
        reason: String,
    },
    /// A field-wide setting is not usable.
    #[error("invalid terrain setting `{name}`: {reason}")]
    InvalidSetting {
        /// Name of the offending setting.
        name: &'static str,
        /// Human-readable description of the violated bound.
        reason: String,
    },
}
