#![warn(non_snake_case)]
//! # bsp_dungeon Entry Point
//!
//! Generates one dungeon and prints it to stdout, `#` for wall and `.` for floor.
//!
//! ```text
//! bsp_dungeon [CONFIG.json | -] [SEED]
//! ```
//!
//! Without a config file (or with `-`) the 160x80 defaults are used. Without a seed
//! the generator is seeded from the operating system. Set `RUST_LOG=info` to see
//! generation statistics.
//!
//! ## License
//! Licensed under the MIT License.

use std::env;
use std::error::Error;

use bsp_dungeon::map::TileMap;
use bsp_dungeon::{GeneratorConfig, ProceduralGenerator};
use log::info;

fn main() -> Result<(), Box<dyn Error>> {
    // Initialize logging.
    env_logger::init();
    info!("bsp_dungeon starting...");

    let mut args = env::args().skip(1);
    let config = match args.next().as_deref() {
        None | Some("-") => GeneratorConfig::default(),
        Some(path) => GeneratorConfig::from_file(path)?,
    };
    let mut generator = match args.next() {
        Some(seed) => {
            let seed: u64 = seed.parse()?;
            info!("Using seed {}", seed);
            ProceduralGenerator::with_seed(config, seed)
        }
        None => ProceduralGenerator::new(config),
    };

    let level = generator.generate()?;
    print!("{}", TileMap::from_level(&level));

    if let Some(stats) = generator.stats() {
        info!(
            "{} nodes, max depth {}, {} rooms, {} corridor segments",
            stats.node_count, stats.max_depth, stats.room_count, stats.corridor_count
        );
    }
    Ok(())
}
