// src/bsp/bsp_rooms.rs
// Room placement and corridor assignment over a finished partition tree.

use rand::Rng;

use crate::bsp::bsp_corridor;
use crate::bsp::{BspLevel, NodeId, Rect, MIN_ROOM_SIZE, ROOM_MARGIN};
use crate::error::GenerationError;
use crate::utils::RandomSource;

/// Place a room in every terminal node and join sibling subtrees with corridors.
///
/// Children are handled before their parent. Each internal node then gets the
/// corridor between its left and right representative rooms, and picks one of the
/// two by coin flip as its own representative. The choice is stored on the node, so
/// ancestors all see the same room.
pub fn create_rooms<R: Rng>(
    level: &mut BspLevel,
    rng: &mut RandomSource<R>,
) -> Result<(), GenerationError> {
    let root = level.root();
    place(level, root, rng)?;
    Ok(())
}

/// Returns the representative room of the subtree at `id`.
fn place<R: Rng>(
    level: &mut BspLevel,
    id: NodeId,
    rng: &mut RandomSource<R>,
) -> Result<Rect, GenerationError> {
    let representative = match level.node(id).children() {
        Some((left, right)) => {
            let left_room = place(level, left, rng)?;
            let right_room = place(level, right, rng)?;
            let corridors = bsp_corridor::connect(&left_room, &right_room, rng)?;
            level.node_mut(id).corridors = corridors;
            if rng.flip_coin() {
                left_room
            } else {
                right_room
            }
        }
        None => {
            let room = place_room(&level.node(id).bounds(), rng)?;
            level.node_mut(id).room = Some(room);
            room
        }
    };
    level.node_mut(id).representative = Some(representative);
    Ok(representative)
}

/// A random room inside `bounds`, keeping a wall of [`ROOM_MARGIN`] on every side.
///
/// `bounds` must be at least `MIN_ROOM_SIZE + 2 * ROOM_MARGIN` on both axes.
pub fn place_room<R: Rng>(
    bounds: &Rect,
    rng: &mut RandomSource<R>,
) -> Result<Rect, GenerationError> {
    let room_width = rng.int_in_range(MIN_ROOM_SIZE, bounds.width() - 2 * ROOM_MARGIN)?;
    let room_height = rng.int_in_range(MIN_ROOM_SIZE, bounds.height() - 2 * ROOM_MARGIN)?;
    let room_x = rng.int_in_range(ROOM_MARGIN, bounds.width() - room_width - ROOM_MARGIN)?;
    let room_y = rng.int_in_range(ROOM_MARGIN, bounds.height() - room_height - ROOM_MARGIN)?;
    Ok(Rect::new(
        bounds.x() + room_x,
        bounds.y() + room_y,
        room_width,
        room_height,
    ))
}
