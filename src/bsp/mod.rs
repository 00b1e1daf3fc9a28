// src/bsp/mod.rs
pub mod bsp_corridor;
pub mod bsp_level;
pub mod bsp_node;
pub mod bsp_procedural;
pub mod bsp_rooms;
mod bsp_util; // Geometry only, re-exported below
pub use bsp_level::BspLevel;
pub use bsp_node::{NodeId, PartitionNode, SplitPlan};
pub use bsp_procedural::{GenerationStats, GeneratorConfig, ProceduralGenerator};
pub use bsp_util::{Point2D, Rect}; // Re-export geometry types

// Default configuration, matching the classic 160x80 layout.
pub const DEFAULT_MAP_WIDTH: i32 = 160;
pub const DEFAULT_MAP_HEIGHT: i32 = 80;
pub const DEFAULT_MIN_LEAF_SIZE: i32 = 6;
pub const DEFAULT_MAX_LEAF_SIZE: i32 = 20;
pub const MAX_MAP_EXTENT: i32 = 4096; // Upper bound for any configured size

// Splitting
pub const SPLIT_RATIO: f64 = 1.25; // Aspect ratio that forces the cut across the long side
pub const SPLIT_CHANCE: f64 = 0.5; // Per-pass chance for a node at or under the max size

// Rooms
pub const MIN_ROOM_SIZE: i32 = 3;
pub const ROOM_MARGIN: i32 = 1;
pub const MIN_LEAF_EXTENT: i32 = MIN_ROOM_SIZE + 2 * ROOM_MARGIN; // Smallest node that fits a room
pub const ROOM_LABEL_MAX: i32 = 9;

/// Direction of the cut through a node.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SplitAxis {
    Horizontal, // Top and bottom halves, cut along the height
    Vertical,   // Left and right halves, cut along the width
}
