// src/map/mod.rs

pub mod tile_map;

pub use tile_map::{Tile, TileMap};
