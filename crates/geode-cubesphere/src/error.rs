//! Mesh construction error types.

/// Errors raised when a mesh request violates the mesher contract.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum MeshError {
    /// A build parameter is outside its accepted range.
    #[error("invalid mesh parameter `{name}`: {reason}")]
    InvalidParameter {
        /// Name of the offending parameter.
        name: &'static str,
        /// Human-readable description of the violated bound.
        reason: String,
    },
}
