//! Range lookups: which node a selection falls in or is bounded by.

use text_size::{TextRange, TextSize};

use crate::navigate::Direction;
use crate::tree::{ConstituentNode, ConstituentTree};

impl ConstituentTree {
    /// Deepest node whose span contains `range`; see
    /// [`ConstituentNode::descendant_containing`].
    pub fn smallest_enclosing(&self, range: TextRange) -> Option<ConstituentNode<'_>> {
        self.root().descendant_containing(range)
    }

    /// See [`ConstituentNode::find_at_level`].
    pub fn find_at_level(
        &self,
        range: TextRange,
        level: u32,
    ) -> Option<(ConstituentNode<'_>, TextSize)> {
        self.root().find_at_level(range, level)
    }

    /// See [`ConstituentNode::boundary_nodes`].
    pub fn boundary_nodes(
        &self,
        range: TextRange,
    ) -> Option<(ConstituentNode<'_>, ConstituentNode<'_>)> {
        self.root().boundary_nodes(range)
    }
}

impl ConstituentNode<'_> {
    /// Finds the smallest constituent that fully contains `range`, given in
    /// the parent's frame (absolute for the root).
    ///
    /// Returns `None` if `range` is not inside this node.
    pub fn descendant_containing(self, range: TextRange) -> Option<Self> {
        let range = range.checked_sub(self.range().start())?;
        if !TextRange::up_to(self.len()).contains_range(range) {
            return None;
        }
        self.children().find_map(|child| child.descendant_containing(range)).or(Some(self))
    }

    /// Like [`Self::descendant_containing`], with `range` in absolute offsets.
    pub fn smallest_enclosing(self, range: TextRange) -> Option<Self> {
        let parent_start = self.absolute_start() - self.range().start();
        self.descendant_containing(range.checked_sub(parent_start)?)
    }

    /// Finds a descendant containing the absolute `range`, descending at most
    /// `level` times.
    ///
    /// Passing through a node with a single child is free. Returns the node
    /// with its absolute start.
    pub fn find_at_level(self, range: TextRange, level: u32) -> Option<(Self, TextSize)> {
        let start = self.absolute_start();
        let (node, offset) = self.find_at_level_local(range.checked_sub(start)?, level)?;
        Some((node, start + offset))
    }

    fn find_at_level_local(self, range: TextRange, level: u32) -> Option<(Self, TextSize)> {
        if !TextRange::up_to(self.len()).contains_range(range) {
            return None;
        }
        if level > 0 {
            let level = if self.children().len() > 1 { level - 1 } else { level };
            for child in self.children() {
                let offset = child.range().start();
                let Some(range) = range.checked_sub(offset) else { continue };
                if let Some((found, found_offset)) = child.find_at_level_local(range, level) {
                    return Some((found, found_offset + offset));
                }
            }
        }
        Some((self, TextSize::new(0)))
    }

    /// Finds the nodes at the edges of the absolute `range`.
    ///
    /// Among this node and its descendants lying inside `range`, `left` is the
    /// first (depth-first) whose span starts at `range.start()` and `right` the
    /// first whose span ends at `range.end()`. Both are searched
    /// independently, so they need not be siblings.
    pub fn boundary_nodes(self, range: TextRange) -> Option<(Self, Self)> {
        let start = self.absolute_start();
        let left = self.first_boundary(start, range, Direction::Left)?;
        let right = self.first_boundary(start, range, Direction::Right)?;
        Some((left, right))
    }

    fn first_boundary(self, start: TextSize, range: TextRange, side: Direction) -> Option<Self> {
        let span = TextRange::at(start, self.len());
        let (edge, target) = match side {
            Direction::Left => (span.start(), range.start()),
            Direction::Right => (span.end(), range.end()),
        };
        if edge == target && range.contains_range(span) {
            return Some(self);
        }
        self.children().find_map(|child| {
            let child_start = start + child.range().start();
            let child_span = TextRange::at(child_start, child.len());
            if child_span.start() <= target && target <= child_span.end() {
                child.first_boundary(child_start, range, side)
            } else {
                None
            }
        })
    }
}
