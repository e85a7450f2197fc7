//! Error types for the replication core.

use thiserror::Error;

use crate::components::NetEntityId;

/// Result type alias using [`CoreError`].
pub type Result<T> = std::result::Result<T, CoreError>;

/// Top-level error type for the replication core.
///
/// Gameplay-level failures (non-owner mutation attempts, out-of-range
/// damage, missing kill attribution) are not errors: they degrade to
/// no-ops by design. Only codec and configuration problems surface here.
#[derive(Debug, Error)]
pub enum CoreError {
    /// A snapshot payload failed to encode or decode.
    #[error("snapshot codec failure: {0}")]
    SnapshotCodec(#[from] bincode::Error),

    /// Referenced entity does not exist in the registry.
    #[error("entity not found: {0}")]
    EntityNotFound(NetEntityId),

    /// A spawn command referenced an id already present in the registry.
    #[error("duplicate entity id: {0}")]
    DuplicateEntity(NetEntityId),

    /// Match configuration failed to parse.
    #[error("failed to parse match config: {0}")]
    ConfigParse(String),

    /// Match configuration is unusable.
    #[error("invalid match config: {0}")]
    ConfigInvalid(String),
}
