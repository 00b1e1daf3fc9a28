//! src/bsp/bsp_node.rs

use rand::Rng;

use crate::bsp::{Rect, SplitAxis, ROOM_LABEL_MAX, SPLIT_RATIO};
use crate::error::GenerationError;
use crate::utils::RandomSource;

/// Index of a node inside its [`BspLevel`](crate::bsp::BspLevel) arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub(crate) usize);

impl NodeId {
    pub fn index(self) -> usize {
        self.0
    }
}

/// The outcome of a successful split decision, before the children exist.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SplitPlan {
    pub axis: SplitAxis,
    pub split_at: i32,
    pub first: Rect,
    pub second: Rect,
}

/// A node in the partition tree. Each node has:
/// - Its `bounds` and `depth` (the root is depth 0).
/// - Either no children (terminal) or exactly two (internal).
/// - A `room` if it's terminal.
/// - The `corridors` joining its two subtrees if it's internal.
#[derive(Debug, Clone)]
pub struct PartitionNode {
    pub(crate) bounds: Rect,
    pub(crate) depth: u32,
    pub(crate) room_id: i32,
    pub(crate) children: Option<(NodeId, NodeId)>,
    pub(crate) room: Option<Rect>,
    pub(crate) corridors: Vec<Rect>,
    pub(crate) representative: Option<Rect>,
}

impl PartitionNode {
    /// Create an unsplit node. The room label is cosmetic and drawn from `[1, 9]`.
    pub fn new<R: Rng>(
        bounds: Rect,
        depth: u32,
        rng: &mut RandomSource<R>,
    ) -> Result<Self, GenerationError> {
        Ok(PartitionNode {
            bounds,
            depth,
            room_id: rng.int_in_range(1, ROOM_LABEL_MAX)?,
            children: None,
            room: None,
            corridors: Vec::new(),
            representative: None,
        })
    }

    pub fn bounds(&self) -> Rect {
        self.bounds
    }

    pub fn depth(&self) -> u32 {
        self.depth
    }

    pub fn room_id(&self) -> i32 {
        self.room_id
    }

    /// `(left, right)` for an internal node.
    pub fn children(&self) -> Option<(NodeId, NodeId)> {
        self.children
    }

    pub fn room(&self) -> Option<Rect> {
        self.room
    }

    pub fn corridors(&self) -> &[Rect] {
        &self.corridors
    }

    /// The room standing in for this whole subtree when an ancestor routes a corridor.
    pub fn representative(&self) -> Option<Rect> {
        self.representative
    }

    /// Returns `true` if `self` has no children.
    pub fn is_leaf(&self) -> bool {
        self.children.is_none()
    }

    /// Decide how this node would split, consuming draws from `rng`.
    ///
    /// Returns `Ok(None)` if the node is already split or too small along the chosen
    /// axis: a cut needs `min_leaf_size` cells on both sides plus at least one more,
    /// so the smallest splittable extent is `2 * min_leaf_size + 1`.
    pub fn plan_split<R: Rng>(
        &self,
        min_leaf_size: i32,
        rng: &mut RandomSource<R>,
    ) -> Result<Option<SplitPlan>, GenerationError> {
        if !self.is_leaf() {
            return Ok(None);
        }

        let (width, height) = (self.bounds.width(), self.bounds.height());

        let mut axis = if rng.flip_coin() {
            SplitAxis::Horizontal
        } else {
            SplitAxis::Vertical
        };
        if width as f64 / height as f64 >= SPLIT_RATIO {
            axis = SplitAxis::Vertical;
        } else if height as f64 / width as f64 >= SPLIT_RATIO {
            axis = SplitAxis::Horizontal;
        }

        let extent = match axis {
            SplitAxis::Horizontal => height,
            SplitAxis::Vertical => width,
        };
        let bound = extent - min_leaf_size;
        if bound <= min_leaf_size {
            return Ok(None);
        }

        let split_at = rng.int_in_range(min_leaf_size, bound)?;
        let (x, y) = (self.bounds.x(), self.bounds.y());
        let (first, second) = match axis {
            SplitAxis::Horizontal => (
                Rect::new(x, y, width, split_at),
                Rect::new(x, y + split_at, width, height - split_at),
            ),
            SplitAxis::Vertical => (
                Rect::new(x, y, split_at, height),
                Rect::new(x + split_at, y, width - split_at, height),
            ),
        };

        Ok(Some(SplitPlan {
            axis,
            split_at,
            first,
            second,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn node(width: i32, height: i32, rng: &mut RandomSource) -> PartitionNode {
        PartitionNode::new(Rect::new(0, 0, width, height), 0, rng).unwrap()
    }

    #[test]
    fn test_tall_node_always_splits_horizontally() {
        for seed in 0..200 {
            let mut rng = RandomSource::from_seed(seed);
            let plan = node(6, 40, &mut rng).plan_split(6, &mut rng).unwrap().unwrap();
            assert_eq!(plan.axis, SplitAxis::Horizontal);
            assert!((6..=34).contains(&plan.split_at));
            assert_eq!(plan.first, Rect::new(0, 0, 6, plan.split_at));
            assert_eq!(plan.second, Rect::new(0, plan.split_at, 6, 40 - plan.split_at));
        }
    }

    #[test]
    fn test_wide_node_always_splits_vertically() {
        for seed in 0..200 {
            let mut rng = RandomSource::from_seed(seed);
            let plan = node(40, 20, &mut rng).plan_split(6, &mut rng).unwrap().unwrap();
            assert_eq!(plan.axis, SplitAxis::Vertical);
            assert_eq!(plan.first.width() + plan.second.width(), 40);
            assert_eq!(plan.second.x(), plan.split_at);
        }
    }

    #[test]
    fn test_square_node_uses_both_axes() {
        let mut horizontal = 0;
        for seed in 0..200 {
            let mut rng = RandomSource::from_seed(seed);
            let plan = node(20, 20, &mut rng).plan_split(6, &mut rng).unwrap().unwrap();
            if plan.axis == SplitAxis::Horizontal {
                horizontal += 1;
            }
        }
        assert!(horizontal > 50 && horizontal < 150, "{horizontal} of 200 horizontal");
    }

    #[test]
    fn test_split_needs_more_than_twice_min_leaf() {
        for seed in 0..50 {
            let mut rng = RandomSource::from_seed(seed);
            // 12 wide is forced vertical; 12 - 6 = 6 is not above the minimum.
            assert!(node(12, 8, &mut rng).plan_split(6, &mut rng).unwrap().is_none());

            let plan = node(13, 8, &mut rng).plan_split(6, &mut rng).unwrap().unwrap();
            assert!((6..=7).contains(&plan.split_at));
            assert!(plan.first.width() >= 6 && plan.second.width() >= 6);
        }
    }

    #[test]
    fn test_split_node_does_not_plan_again() {
        let mut rng = RandomSource::from_seed(9);
        let mut parent = node(30, 30, &mut rng);
        parent.children = Some((NodeId(1), NodeId(2)));
        assert!(parent.plan_split(6, &mut rng).unwrap().is_none());
    }

    #[test]
    fn test_room_label_in_range() {
        let mut rng = RandomSource::from_seed(11);
        for _ in 0..100 {
            let label = node(10, 10, &mut rng).room_id();
            assert!((1..=ROOM_LABEL_MAX).contains(&label));
        }
    }
}
