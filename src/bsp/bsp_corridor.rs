// src/bsp/bsp_corridor.rs
// Corridor routing between two rooms.

use std::cmp::Ordering;

use rand::Rng;

use crate::bsp::{Point2D, Rect};
use crate::error::GenerationError;
use crate::utils::RandomSource;

/// Join `left` and `right` with one straight segment or an L of two segments.
///
/// One endpoint is drawn from the interior of each room (never on its outer ring),
/// then [`route`] lays the path between them.
pub fn connect<R: Rng>(
    left: &Rect,
    right: &Rect,
    rng: &mut RandomSource<R>,
) -> Result<Vec<Rect>, GenerationError> {
    let start = interior_point(left, rng)?;
    let end = interior_point(right, rng)?;
    route(start, end, rng)
}

/// A cell of `room` at least one cell away from each of its edges.
pub fn interior_point<R: Rng>(
    room: &Rect,
    rng: &mut RandomSource<R>,
) -> Result<Point2D, GenerationError> {
    let x = rng.int_in_range(room.x() + 1, room.right() - 2)?;
    let y = rng.int_in_range(room.y() + 1, room.bottom() - 2)?;
    Ok(Point2D::new(x, y))
}

/// Lay 1-cell-wide segments from `start` to `end`.
///
/// Aligned points get a single segment. Otherwise a coin picks which of the two
/// L-bends to use. Every variant carves a 4-connected run of cells that begins at
/// or beside `start` and ends at or beside `end`.
pub fn route<R: Rng>(
    start: Point2D,
    end: Point2D,
    rng: &mut RandomSource<R>,
) -> Result<Vec<Rect>, GenerationError> {
    let Point2D { x: lx, y: ly } = start;
    let Point2D { x: rx, y: ry } = end;
    let dx = rx - lx;
    let dy = ry - ly;
    let (w, h) = (dx.abs(), dy.abs());

    let segments = match (dx.cmp(&0), dy.cmp(&0)) {
        (Ordering::Equal, Ordering::Equal) => {
            return Err(GenerationError::CoincidentEndpoints { x: lx, y: ly });
        }
        (Ordering::Less, Ordering::Less) => {
            if rng.flip_coin() {
                vec![Rect::new(rx, ly, w, 1), Rect::new(rx, ry, 1, h)]
            } else {
                vec![Rect::new(rx, ry, w, 1), Rect::new(lx, ry, 1, h)]
            }
        }
        (Ordering::Less, Ordering::Greater) => {
            if rng.flip_coin() {
                vec![Rect::new(rx, ly, w, 1), Rect::new(rx, ly, 1, h)]
            } else {
                // Runs through the elbow at (lx, ry) so the legs share an edge.
                vec![Rect::new(rx, ry, w + 1, 1), Rect::new(lx, ly, 1, h)]
            }
        }
        (Ordering::Less, Ordering::Equal) => vec![Rect::new(rx, ry, w, 1)],
        (Ordering::Greater, Ordering::Less) => {
            if rng.flip_coin() {
                vec![Rect::new(lx, ry, w, 1), Rect::new(lx, ry, 1, h)]
            } else {
                vec![Rect::new(lx, ly, w + 1, 1), Rect::new(rx, ry, 1, h)]
            }
        }
        (Ordering::Greater, Ordering::Greater) => {
            if rng.flip_coin() {
                vec![Rect::new(lx, ly, w, 1), Rect::new(rx, ly, 1, h)]
            } else {
                vec![Rect::new(lx, ry, w, 1), Rect::new(lx, ly, 1, h)]
            }
        }
        (Ordering::Greater, Ordering::Equal) => vec![Rect::new(lx, ly, w, 1)],
        (Ordering::Equal, Ordering::Less) => vec![Rect::new(rx, ry, 1, h)],
        (Ordering::Equal, Ordering::Greater) => vec![Rect::new(lx, ly, 1, h)],
    };

    Ok(segments)
}
