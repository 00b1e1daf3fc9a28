//! src/map/tile_map.rs
//!
//! Rasterizes a finished [`BspLevel`] into a wall/floor grid. This is the hand-off
//! point for renderers: the generator itself never looks at tiles.

use std::fmt;

use union_find::{QuickUnionUf, UnionByRank, UnionFind};

use crate::bsp::{BspLevel, Point2D, Rect};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tile {
    Wall,
    Floor,
}

impl Tile {
    pub fn glyph(self) -> char {
        match self {
            Tile::Wall => '#',
            Tile::Floor => '.',
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TileMap {
    width: usize,
    height: usize,
    tiles: Vec<Tile>,
}

impl TileMap {
    /// A map of solid wall.
    pub fn new(width: usize, height: usize) -> Self {
        TileMap {
            width,
            height,
            tiles: vec![Tile::Wall; width * height],
        }
    }

    /// Carve every room, then every corridor segment, out of solid wall.
    pub fn from_level(level: &BspLevel) -> Self {
        let bounds = level.bounds();
        let mut map = TileMap::new(bounds.right().max(0) as usize, bounds.bottom().max(0) as usize);
        for room in level.rooms() {
            map.carve(&room);
        }
        for segment in level.corridors() {
            map.carve(segment);
        }
        map
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    fn index(&self, point: Point2D) -> Option<usize> {
        let (x, y) = (usize::try_from(point.x).ok()?, usize::try_from(point.y).ok()?);
        (x < self.width && y < self.height).then_some(y * self.width + x)
    }

    /// `None` outside the map.
    pub fn get(&self, x: i32, y: i32) -> Option<Tile> {
        self.index(Point2D::new(x, y)).map(|index| self.tiles[index])
    }

    /// Turn the cells of `rect` into floor, ignoring any part outside the map.
    pub fn carve(&mut self, rect: &Rect) {
        for cell in rect.cells() {
            if let Some(index) = self.index(cell) {
                self.tiles[index] = Tile::Floor;
            }
        }
    }

    pub fn floor_count(&self) -> usize {
        self.tiles.iter().filter(|tile| **tile == Tile::Floor).count()
    }

    /// Whether every floor tile can reach every other one through orthogonal steps.
    ///
    /// A map without floor counts as connected.
    pub fn is_connected(&self) -> bool {
        let mut sets: QuickUnionUf<UnionByRank> = QuickUnionUf::new(self.tiles.len());
        for y in 0..self.height {
            for x in 0..self.width {
                let index = y * self.width + x;
                if self.tiles[index] != Tile::Floor {
                    continue;
                }
                if x + 1 < self.width && self.tiles[index + 1] == Tile::Floor {
                    sets.union(index, index + 1);
                }
                if y + 1 < self.height && self.tiles[index + self.width] == Tile::Floor {
                    sets.union(index, index + self.width);
                }
            }
        }

        let mut floors = (0..self.tiles.len()).filter(|index| self.tiles[*index] == Tile::Floor);
        let Some(first) = floors.next() else {
            return true;
        };
        let root = sets.find(first);
        floors.all(|index| sets.find(index) == root)
    }
}

/// One line of glyphs per row.
impl fmt::Display for TileMap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.tiles.chunks(self.width.max(1)) {
            let line: String = row.iter().map(|tile| tile.glyph()).collect();
            writeln!(f, "{}", line)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bsp::{GeneratorConfig, ProceduralGenerator};

    #[test]
    fn test_carve_and_render() {
        let mut map = TileMap::new(5, 3);
        map.carve(&Rect::new(1, 1, 3, 1));
        assert_eq!(map.to_string(), "#####\n#...#\n#####\n");
        assert_eq!(map.floor_count(), 3);
        assert_eq!(map.get(2, 1), Some(Tile::Floor));
        assert_eq!(map.get(0, 0), Some(Tile::Wall));
        assert_eq!(map.get(5, 0), None);
        assert_eq!(map.get(-1, 0), None);
    }

    #[test]
    fn test_carve_clips_to_map() {
        let mut map = TileMap::new(4, 4);
        map.carve(&Rect::new(-2, 2, 10, 5));
        assert_eq!(map.floor_count(), 8);
    }

    #[test]
    fn test_connectivity() {
        let mut map = TileMap::new(10, 5);
        assert!(map.is_connected());

        map.carve(&Rect::new(1, 1, 2, 2));
        map.carve(&Rect::new(6, 1, 3, 3));
        assert!(!map.is_connected());

        // Diagonal contact does not count.
        map.carve(&Rect::new(3, 3, 3, 1));
        assert!(!map.is_connected());

        map.carve(&Rect::new(3, 2, 3, 1));
        assert!(map.is_connected());
    }

    #[test]
    fn test_generated_maps_are_connected() {
        for seed in 0..100 {
            let mut generator = ProceduralGenerator::with_seed(GeneratorConfig::default(), seed);
            let level = generator.generate().unwrap();
            let map = TileMap::from_level(&level);
            assert_eq!((map.width(), map.height()), (160, 80));
            assert!(map.is_connected(), "seed {seed} produced a split map:\n{map}");

            for room in level.rooms() {
                assert!(room.cells().all(|cell| map.get(cell.x, cell.y) == Some(Tile::Floor)));
            }
        }
    }

    #[test]
    fn test_map_border_stays_wall() {
        let mut generator = ProceduralGenerator::with_seed(GeneratorConfig::default(), 8);
        let map = TileMap::from_level(&generator.generate().unwrap());
        for x in 0..160 {
            assert_eq!(map.get(x, 0), Some(Tile::Wall));
            assert_eq!(map.get(x, 79), Some(Tile::Wall));
        }
        for y in 0..80 {
            assert_eq!(map.get(0, y), Some(Tile::Wall));
            assert_eq!(map.get(159, y), Some(Tile::Wall));
        }
    }
}
