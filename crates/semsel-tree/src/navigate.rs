//! Sibling and ancestor traversal across subtree boundaries.

use std::fmt;

use crate::tree::{ConstituentNode, SENTENCE_LABEL};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Left,
    Right,
}

impl Direction {
    pub fn reversed(self) -> Self {
        match self {
            Self::Left => Self::Right,
            Self::Right => Self::Left,
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Left => "left",
            Self::Right => "right",
        })
    }
}

impl ConstituentNode<'_> {
    /// The adjacent sibling in `direction`, or the nearest ancestor's one.
    pub fn neighbour(self, direction: Direction) -> Option<Self> {
        let parent = self.parent()?;
        let index = match direction {
            Direction::Left => self.index().checked_sub(1),
            Direction::Right => Some(self.index() + 1),
        };
        index.and_then(|index| parent.child(index)).or_else(|| parent.neighbour(direction))
    }

    /// Descends along the first (`Left`) or last (`Right`) child until
    /// reaching `depth` or a leaf.
    pub fn slide(self, depth: u32, side: Direction) -> Self {
        let mut node = self;
        while node.depth() < depth {
            let child = match side {
                Direction::Left => node.first_child(),
                Direction::Right => node.last_child(),
            };
            let Some(child) = child else { break };
            node = child;
        }
        node
    }

    /// The neighbour in `direction`, realigned so that its edge facing this
    /// node sits at `depth`.
    pub fn neighbour_at(self, direction: Direction, depth: u32) -> Option<Self> {
        Some(self.neighbour(direction)?.slide(depth, direction.reversed()))
    }

    pub fn left_neighbour(self) -> Option<Self> {
        self.left_neighbour_at(self.depth())
    }

    pub fn left_neighbour_at(self, depth: u32) -> Option<Self> {
        self.neighbour_at(Direction::Left, depth)
    }

    pub fn right_neighbour(self) -> Option<Self> {
        self.right_neighbour_at(self.depth())
    }

    pub fn right_neighbour_at(self, depth: u32) -> Option<Self> {
        self.neighbour_at(Direction::Right, depth)
    }

    /// The enclosing sentence root (`TOP`), which may be this node.
    pub fn sentence_ancestor(self) -> Option<Self> {
        self.ancestors().find(|node| node.label() == Some(SENTENCE_LABEL))
    }
}
