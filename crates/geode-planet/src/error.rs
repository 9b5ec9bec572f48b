//! Planet generation error types.

use geode_cubesphere::MeshError;
use geode_terrain::TerrainError;

/// Errors that abort a planet build. No partial artifacts are published
/// when one of these is returned.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum GenerationError {
    /// A scalar setting is outside its accepted range.
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    /// Required configuration is absent (e.g. no enabled noise layers under
    /// [`crate::MissingLayerPolicy::Abort`]).
    #[error("missing configuration: {0}")]
    MissingConfiguration(String),

    /// The cube-sphere mesher rejected its parameters.
    #[error(transparent)]
    Mesh(#[from] MeshError),

    /// The terrain settings failed validation.
    #[error(transparent)]
    Terrain(#[from] TerrainError),
}

impl GenerationError {
    /// Whether this error stems from an out-of-range parameter, whichever
    /// stage detected it.
    pub fn is_invalid_parameter(&self) -> bool {
        !matches!(self, GenerationError::MissingConfiguration(_))
    }
}
