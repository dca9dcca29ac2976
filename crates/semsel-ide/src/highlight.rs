//! Depth-based emphasis for rendering the leaves of a sentence.

use semsel_tree::{ConstituentNode, ConstituentTree, TextRange};

/// Levels beyond this many share the strongest emphasis.
const MAX_LEVELS: usize = 6;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LeafEmphasis {
    pub range: TextRange,
    pub depth: u32,
    /// 0 for the shallowest active level, rising to 1 with depth.
    pub emphasis: f32,
}

/// Sorted distinct depths of the non-punctuation leaves under `sentence`.
pub fn active_levels(sentence: ConstituentNode<'_>) -> Vec<u32> {
    let mut levels: Vec<u32> = leaves(sentence)
        .filter(|leaf| !leaf.is_punctuation())
        .map(|leaf| leaf.depth())
        .collect();
    levels.sort_unstable();
    levels.dedup();
    levels
}

/// Emphasis for every leaf under `sentence`, in document order.
///
/// A leaf's emphasis is the rank of its depth among the active levels.
/// Punctuation ranks as the shallowest level.
pub fn leaf_emphasis(sentence: ConstituentNode<'_>) -> Vec<LeafEmphasis> {
    let levels = active_levels(sentence);
    let steps = (levels.len().saturating_sub(1)).min(MAX_LEVELS);

    leaves(sentence)
        .map(|leaf| {
            let rank = levels.iter().position(|&level| level == leaf.depth()).unwrap_or(0);
            let emphasis = if levels.len() > 1 {
                (rank as f32 / steps as f32).clamp(0.0, 1.0)
            } else {
                0.5
            };
            LeafEmphasis { range: leaf.absolute_range(), depth: leaf.depth(), emphasis }
        })
        .collect()
}

/// [`leaf_emphasis`] for every sentence of the document.
pub fn document_emphasis(tree: &ConstituentTree) -> Vec<LeafEmphasis> {
    tree.root().children().flat_map(leaf_emphasis).collect()
}

fn leaves(node: ConstituentNode<'_>) -> impl Iterator<Item = ConstituentNode<'_>> {
    let mut stack = vec![node];
    std::iter::from_fn(move || {
        loop {
            let node = stack.pop()?;
            if node.is_leaf() {
                return Some(node);
            }
            stack.extend(node.children().rev());
        }
    })
}
