// src/bsp/bsp_level.rs

use log::{debug, trace};
use rand::Rng;

use crate::bsp::{NodeId, PartitionNode, Rect, MIN_LEAF_EXTENT, SPLIT_CHANCE};
use crate::error::GenerationError;
use crate::utils::RandomSource;

/// The partition tree of one generated map.
///
/// Nodes live in a flat arena in creation order, so the root is always the first
/// entry and children always come after their parent. Every node is reachable from
/// the root, and the terminal nodes together tile the root bounds exactly.
#[derive(Debug, Clone)]
pub struct BspLevel {
    nodes: Vec<PartitionNode>,
}

impl BspLevel {
    /// A level holding only an unsplit root covering `bounds`.
    pub fn new<R: Rng>(bounds: Rect, rng: &mut RandomSource<R>) -> Result<Self, GenerationError> {
        let root = PartitionNode::new(bounds, 0, rng)?;
        Ok(BspLevel { nodes: vec![root] })
    }

    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    /// Bounds of the whole map.
    pub fn bounds(&self) -> Rect {
        self.nodes[0].bounds
    }

    pub fn node(&self, id: NodeId) -> &PartitionNode {
        &self.nodes[id.0]
    }

    pub(crate) fn node_mut(&mut self, id: NodeId) -> &mut PartitionNode {
        &mut self.nodes[id.0]
    }

    /// All nodes in creation order.
    pub fn nodes(&self) -> &[PartitionNode] {
        &self.nodes
    }

    /// Always at least one: the root.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn ids(&self) -> impl Iterator<Item = NodeId> {
        (0..self.nodes.len()).map(NodeId)
    }

    pub fn terminal_ids(&self) -> Vec<NodeId> {
        self.ids().filter(|id| self.node(*id).is_leaf()).collect()
    }

    /// Nodes without children, in creation order.
    pub fn terminals(&self) -> impl Iterator<Item = &PartitionNode> {
        self.nodes.iter().filter(|node| node.is_leaf())
    }

    pub fn rooms(&self) -> impl Iterator<Item = Rect> + '_ {
        self.terminals().filter_map(|node| node.room)
    }

    /// Every corridor segment, from every internal node.
    pub fn corridors(&self) -> impl Iterator<Item = &Rect> {
        self.nodes.iter().flat_map(|node| node.corridors.iter())
    }

    pub fn max_depth(&self) -> u32 {
        self.nodes.iter().map(|node| node.depth).max().unwrap_or(0)
    }

    /// Split one terminal node, appending its two children to the arena.
    ///
    /// Returns `Ok(false)` without touching the arena if the node is already split or
    /// too small to split.
    pub fn try_split<R: Rng>(
        &mut self,
        id: NodeId,
        min_leaf_size: i32,
        rng: &mut RandomSource<R>,
    ) -> Result<bool, GenerationError> {
        let Some(plan) = self.node(id).plan_split(min_leaf_size, rng)? else {
            return Ok(false);
        };

        let depth = self.node(id).depth + 1;
        let left = NodeId(self.nodes.len());
        let right = NodeId(self.nodes.len() + 1);
        let first = PartitionNode::new(plan.first, depth, rng)?;
        let second = PartitionNode::new(plan.second, depth, rng)?;
        self.nodes.push(first);
        self.nodes.push(second);
        self.node_mut(id).children = Some((left, right));

        trace!(
            "split node {} {:?} at {} into {:?} / {:?}",
            id.0, plan.axis, plan.split_at, plan.first, plan.second
        );
        Ok(true)
    }

    /// Keep splitting terminal nodes until a full pass splits nothing.
    ///
    /// Returns the number of passes taken, including the final idle one.
    pub fn split_all<R: Rng>(
        &mut self,
        min_leaf_size: i32,
        max_leaf_size: i32,
        rng: &mut RandomSource<R>,
    ) -> Result<usize, GenerationError> {
        let mut passes = 0;
        loop {
            passes += 1;
            let splits = self.split_pass(min_leaf_size, max_leaf_size, rng)?;
            debug!("split pass {}: {} splits, {} nodes", passes, splits, self.nodes.len());
            if splits == 0 {
                return Ok(passes);
            }
        }
    }

    /// One pass over the arena, returning how many nodes were split.
    ///
    /// The pass walks the arena by index while it grows, so children created here
    /// are considered later in this same pass. A terminal node larger than
    /// `max_leaf_size` on either axis always attempts a split; any other terminal
    /// node attempts one with probability [`SPLIT_CHANCE`].
    pub fn split_pass<R: Rng>(
        &mut self,
        min_leaf_size: i32,
        max_leaf_size: i32,
        rng: &mut RandomSource<R>,
    ) -> Result<usize, GenerationError> {
        let mut splits = 0;
        let mut index = 0;
        while index < self.nodes.len() {
            let node = &self.nodes[index];
            if node.is_leaf() {
                let bounds = node.bounds;
                if (bounds.width() > max_leaf_size
                    || bounds.height() > max_leaf_size
                    || rng.flip_coin_biased(SPLIT_CHANCE))
                    && self.try_split(NodeId(index), min_leaf_size, rng)?
                {
                    splits += 1;
                }
            }
            index += 1;
        }
        Ok(splits)
    }

    /// Every terminal node must be able to hold a room with its margin.
    pub fn check_leaf_extents(&self) -> Result<(), GenerationError> {
        for id in self.terminal_ids() {
            let bounds = self.node(id).bounds;
            if bounds.width() < MIN_LEAF_EXTENT || bounds.height() < MIN_LEAF_EXTENT {
                return Err(GenerationError::LeafTooSmall {
                    id: id.0,
                    width: bounds.width(),
                    height: bounds.height(),
                });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn split_level(width: i32, height: i32, seed: u64) -> BspLevel {
        let mut rng = RandomSource::from_seed(seed);
        let mut level = BspLevel::new(Rect::new(0, 0, width, height), &mut rng).unwrap();
        level.split_all(6, 20, &mut rng).unwrap();
        level
    }

    #[test]
    fn test_try_split_appends_two_children() {
        let mut rng = RandomSource::from_seed(7);
        let mut level = BspLevel::new(Rect::new(0, 0, 40, 40), &mut rng).unwrap();
        assert!(level.try_split(level.root(), 6, &mut rng).unwrap());
        assert_eq!(level.node_count(), 3);
        assert_eq!(level.node(level.root()).children(), Some((NodeId(1), NodeId(2))));
        assert_eq!(level.node(NodeId(1)).depth(), 1);

        // A split node stays split.
        assert!(!level.try_split(level.root(), 6, &mut rng).unwrap());
        assert_eq!(level.node_count(), 3);
    }

    #[test]
    fn test_children_tile_their_parent() {
        for seed in 0..30 {
            let level = split_level(160, 80, seed);
            for node in level.nodes() {
                let Some((left, right)) = node.children() else {
                    continue;
                };
                let (left, right) = (level.node(left), level.node(right));
                assert_eq!(left.depth(), node.depth() + 1);
                assert!(node.bounds().contains_rect(&left.bounds()));
                assert!(node.bounds().contains_rect(&right.bounds()));
                assert!(!left.bounds().intersects(&right.bounds()));
                assert_eq!(left.bounds().area() + right.bounds().area(), node.bounds().area());
            }
        }
    }

    #[test]
    fn test_terminals_cover_the_map() {
        for seed in 0..30 {
            let level = split_level(160, 80, seed);
            let area: i64 = level.terminals().map(|node| node.bounds().area()).sum();
            assert_eq!(area, 160 * 80);
            level.check_leaf_extents().unwrap();
        }
    }

    #[test]
    fn test_oversized_nodes_never_survive() {
        for seed in 0..30 {
            let level = split_level(160, 80, seed);
            for node in level.terminals() {
                let bounds = node.bounds();
                assert!(bounds.width() <= 20 && bounds.height() <= 20, "{bounds:?}");
                assert!(bounds.width() >= 6 && bounds.height() >= 6, "{bounds:?}");
            }
        }
    }

    #[test]
    fn test_split_all_terminates_quickly() {
        for seed in 0..30 {
            let mut rng = RandomSource::from_seed(seed);
            let mut level = BspLevel::new(Rect::new(0, 0, 160, 80), &mut rng).unwrap();
            let passes = level.split_all(6, 20, &mut rng).unwrap();
            assert!(passes < 50, "seed {seed} took {passes} passes");
        }
    }

    #[test]
    fn test_children_split_in_the_pass_that_created_them() {
        for seed in 0..20 {
            let mut rng = RandomSource::from_seed(seed);
            let mut level = BspLevel::new(Rect::new(0, 0, 160, 80), &mut rng).unwrap();
            let splits = level.split_pass(6, 20, &mut rng).unwrap();

            // Every depth-1 node is 80 tall, so it must split before the pass ends.
            assert!(splits >= 3, "seed {seed}: only {splits} splits");
            assert!(level.max_depth() >= 2);
            for node in level.nodes().iter().filter(|node| node.depth() == 1) {
                assert!(!node.is_leaf(), "seed {seed}: {:?} left for a later pass", node.bounds());
            }
        }
    }

    #[test]
    fn test_unsplittable_map_stays_single_node() {
        let level = split_level(12, 12, 3);
        assert_eq!(level.node_count(), 1);
        assert_eq!(level.terminal_ids(), vec![level.root()]);
    }

    #[test]
    fn test_thin_leaf_is_rejected() {
        let mut rng = RandomSource::from_seed(0);
        let level = BspLevel::new(Rect::new(0, 0, 4, 30), &mut rng).unwrap();
        let err = level.check_leaf_extents().unwrap_err();
        assert!(matches!(err, GenerationError::LeafTooSmall { id: 0, width: 4, height: 30 }));
    }
}
