// src/error.rs

use thiserror::Error;

/// Everything that can abort a generation run.
///
/// None of these are expected with a validated [`GeneratorConfig`]; they mark a
/// misconfiguration or a broken size invariant, and the run is discarded.
///
/// [`GeneratorConfig`]: crate::bsp::GeneratorConfig
#[derive(Debug, Error)]
pub enum GenerationError {
    #[error("invalid random range: max {max} is below min {min}")]
    InvalidRange { min: i32, max: i32 },

    #[error("invalid generator configuration: {0}")]
    InvalidConfig(String),

    #[error("terminal node {id} is {width}x{height}, too small to hold a room")]
    LeafTooSmall { id: usize, width: i32, height: i32 },

    #[error("corridor endpoints coincide at ({x}, {y})")]
    CoincidentEndpoints { x: i32, y: i32 },

    #[error("failed to parse configuration: {0}")]
    Config(#[from] serde_json::Error),

    #[error("failed to read configuration: {0}")]
    Io(#[from] std::io::Error),
}
