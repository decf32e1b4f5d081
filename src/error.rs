//! # Errors
//!
//! Failure modes of the sandbox core. Nothing here is transient: configuration
//! errors are reported once at start-up, and world errors mean the controlling
//! code asked for something the World Store cannot honour.

use crate::engine_state::voxels::spatial::BlockCoordinate;

/// A configuration value that the engine cannot run with.
#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error("Texture atlas size must be at least one tile per edge.")]
    ZeroAtlasSize,
    #[error("Sector size must be at least one block.")]
    ZeroSectorSize,
    #[error("Inventory must hold at least one block type.")]
    EmptyInventory,
    #[error("Configuration field \"{field}\" must be positive, got {value}.")]
    NonPositive {
        /// Name of the offending field as it appears in the config file.
        field: &'static str,
        value: f64,
    },
    #[error("Configuration field \"{field}\" must be at most {max}, got {value}.")]
    OutOfRange {
        field: &'static str,
        value: u64,
        max: u64,
    },
    #[error("Failed to parse engine configuration: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("Failed to read engine configuration: {0}")]
    Io(#[from] std::io::Error),
}

/// A precondition violated by a caller of the World Store or Visibility Engine.
///
/// These are programmer errors. They are surfaced instead of ignored because
/// silently skipping them would let the Shown Set drift out of sync with the
/// World Store.
#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum WorldError {
    #[error("No block exists at {0:?}.")]
    BlockMissing(BlockCoordinate),
    #[error("Block at {0:?} is not currently shown.")]
    BlockNotShown(BlockCoordinate),
}

/// Any error the session layer can produce.
#[derive(thiserror::Error, Debug)]
pub enum EngineError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    World(#[from] WorldError),
}
