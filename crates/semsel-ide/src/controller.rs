//! Selection gestures over a constituency tree.
//!
//! Each gesture maps the current selection to the next one. Gestures that
//! land on a node remember the path to it, so that a later
//! [`Gesture::Focus`] can drill back down the way an [`Gesture::Expand`]
//! came up.

use std::cmp;

use semsel_tree::{ConstituentNode, ConstituentTree, Direction, NodeId, TextRange, TextSize};

/// Depth budget for pointer tracking before any node has been selected.
pub const DEFAULT_LEVEL: u32 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Selection {
    pub range: TextRange,
    /// Direction the selection extends away from its fixed edge: `Right`
    /// holds the start in place, `Left` holds the end.
    pub anchor: Direction,
    /// Depth budget for [`Gesture::PointerTrack`].
    pub level: u32,
}

impl Selection {
    pub fn new(range: TextRange) -> Self {
        Self { range, anchor: Direction::Right, level: DEFAULT_LEVEL }
    }

    pub fn with_anchor(self, anchor: Direction) -> Self {
        Self { anchor, ..self }
    }
}

impl Default for Selection {
    fn default() -> Self {
        Self::new(TextRange::empty(TextSize::new(0)))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Gesture {
    /// Grow to the enclosing constituent.
    Expand,
    /// Shrink to the child under `cursor`, or the child last expanded from.
    Focus { cursor: TextSize, ignore_history: bool },
    SelectSentence,
    /// Jump to the adjacent constituent; the selection must cover a whole one.
    MoveToNeighbour(Direction),
    /// Grow or trim one constituent at a time, depending on the anchor.
    Resize(Direction),
    /// Resize until the selection contains `offset`, trimming if it already does.
    ResizeToInclude(TextSize),
    /// Select the constituent under `cursor` within the selection's level
    /// budget, then lower the budget to just above it.
    PointerTrack { cursor: TextSize },
}

/// Why a gesture left the selection unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum Rejected {
    #[error("selection {0:?} is outside the parsed text")]
    OutOfRange(TextRange),
    #[error("selection edges do not line up with constituent boundaries")]
    NoBoundaryMatch,
    #[error("selection does not cover a whole constituent")]
    Unaligned,
    #[error("there is no constituent to the {0}")]
    NoNeighbour(Direction),
    #[error("no child constituent to select")]
    NoChild,
    #[error("selection is not inside a sentence")]
    NoSentence,
    #[error("resizing would move one edge past the other")]
    GuardFailed,
    #[error("offset {0:?} cannot be brought into the selection")]
    NotIncluded(TextSize),
    #[error("no parse is available for the current text")]
    NoTree,
}

/// Applies `gesture` to `selection`.
///
/// On success the returned selection replaces the current one; on rejection
/// the caller keeps its selection.
pub fn apply(
    tree: &mut ConstituentTree,
    selection: &Selection,
    gesture: Gesture,
) -> Result<Selection, Rejected> {
    let target = match gesture {
        Gesture::Expand => expand(tree, selection.range)?.id(),
        Gesture::Focus { cursor, ignore_history } => {
            focus(tree, selection.range, cursor, ignore_history)?.id()
        }
        Gesture::SelectSentence => select_sentence(tree, selection.range)?.id(),
        Gesture::MoveToNeighbour(direction) => {
            move_to_neighbour(tree, selection.range, direction)?.id()
        }
        Gesture::Resize(movement) => {
            let range = resize(tree, selection, movement)?;
            return Ok(Selection { range, ..*selection });
        }
        Gesture::ResizeToInclude(offset) => return resize_to_include(tree, selection, offset),
        Gesture::PointerTrack { cursor } => return pointer_track(tree, selection, cursor),
    };
    Ok(select(tree, selection, target))
}

fn select(tree: &mut ConstituentTree, selection: &Selection, target: NodeId) -> Selection {
    tree.record_focus_path(target);
    let node = tree.node(target);
    Selection { range: node.absolute_range(), anchor: selection.anchor, level: node.depth() }
}

fn enclosing(tree: &ConstituentTree, range: TextRange) -> Result<ConstituentNode<'_>, Rejected> {
    tree.smallest_enclosing(range).ok_or(Rejected::OutOfRange(range))
}

/// The constituent an expand from `range` selects: the smallest one
/// enclosing it, or that one's parent if `range` already covers it exactly.
///
/// Sentence and document roots are never replaced by their parent.
pub fn expand(tree: &ConstituentTree, range: TextRange) -> Result<ConstituentNode<'_>, Rejected> {
    let node = enclosing(tree, range)?;
    if range.len() == node.len() && !node.is_root_marker() {
        return Ok(node.parent().unwrap_or(node));
    }
    Ok(node)
}

/// The child of the constituent enclosing `range` to drill into.
///
/// Prefers the child under `cursor`, then the remembered focus unless
/// `ignore_history` is set, then the child nearest to `cursor`.
pub fn focus(
    tree: &ConstituentTree,
    range: TextRange,
    cursor: TextSize,
    ignore_history: bool,
) -> Result<ConstituentNode<'_>, Rejected> {
    let node = enclosing(tree, range)?;
    let span = node.absolute_range();

    let start = i64::from(u32::from(span.start()));
    let local = i64::from(u32::from(cursor)) - start;
    let clamped = cmp::min(
        i64::from(u32::from(cursor.clamp(span.start(), span.end()))) - start,
        i64::from(u32::from(node.len())) - 1,
    );

    let child_at = |offset: i64| {
        node.children().find(|child| {
            let range = child.range();
            i64::from(u32::from(range.start())) <= offset
                && offset < i64::from(u32::from(range.end()))
        })
    };

    child_at(local)
        .or_else(|| node.last_focus().filter(|_| !ignore_history))
        .or_else(|| child_at(clamped))
        .ok_or(Rejected::NoChild)
}

pub fn select_sentence(
    tree: &ConstituentTree,
    range: TextRange,
) -> Result<ConstituentNode<'_>, Rejected> {
    enclosing(tree, range)?.sentence_ancestor().ok_or(Rejected::NoSentence)
}

pub fn move_to_neighbour(
    tree: &ConstituentTree,
    range: TextRange,
    direction: Direction,
) -> Result<ConstituentNode<'_>, Rejected> {
    let node = enclosing(tree, range)?;
    if range.len() != node.len() {
        return Err(Rejected::Unaligned);
    }
    let neighbour = match direction {
        Direction::Left => node.left_neighbour(),
        Direction::Right => node.right_neighbour(),
    };
    neighbour.ok_or(Rejected::NoNeighbour(direction))
}

/// Moves one edge of the selection by one constituent.
///
/// Moving toward the anchor direction grows the selection at its free edge;
/// moving against it trims the free edge back. The new edge is aligned at
/// the depth of the deeper boundary node.
pub fn resize(
    tree: &ConstituentTree,
    selection: &Selection,
    movement: Direction,
) -> Result<TextRange, Rejected> {
    let range = selection.range;
    let (left, right) = tree.boundary_nodes(range).ok_or(Rejected::NoBoundaryMatch)?;
    let level = cmp::max(left.depth(), right.depth());
    let neighbour = |node: Option<ConstituentNode<'_>>, direction| {
        node.map(|it| it.absolute_range()).ok_or(Rejected::NoNeighbour(direction))
    };
    let child = |node: Option<ConstituentNode<'_>>| {
        node.map(|it| it.absolute_range()).ok_or(Rejected::NoChild)
    };

    match (movement, selection.anchor, left == right) {
        // Grow the start.
        (Direction::Left, Direction::Left, _) => {
            let next = neighbour(left.left_neighbour_at(level), Direction::Left)?;
            Ok(TextRange::new(next.start(), range.end()))
        }
        // Grow the end.
        (Direction::Right, Direction::Right, _) => {
            let next = neighbour(right.right_neighbour_at(level), Direction::Right)?;
            Ok(TextRange::new(range.start(), next.end()))
        }
        // Trim the end back to the previous constituent.
        (Direction::Left, Direction::Right, false) => {
            let end = neighbour(right.left_neighbour_at(level), Direction::Left)?.end();
            trimmed(range.start(), end)
        }
        // Drop the last child of the single selected constituent.
        (Direction::Left, Direction::Right, true) => {
            let end = child(right.children().rev().nth(1))?.end();
            trimmed(range.start(), end)
        }
        // Trim the start forward to the next constituent.
        (Direction::Right, Direction::Left, false) => {
            let start = neighbour(left.right_neighbour_at(level), Direction::Right)?.start();
            trimmed(start, range.end())
        }
        // Drop the first child of the single selected constituent.
        (Direction::Right, Direction::Left, true) => {
            let start = child(left.child(1))?.start();
            trimmed(start, range.end())
        }
    }
}

fn trimmed(start: TextSize, end: TextSize) -> Result<TextRange, Rejected> {
    if start <= end { Ok(TextRange::new(start, end)) } else { Err(Rejected::GuardFailed) }
}

/// Repeats [`resize`] until the selection contains `offset`.
///
/// A selection that already contains `offset` is trimmed against its anchor
/// as far as it keeps containing it. Otherwise the anchor turns toward
/// `offset` and the selection grows until it reaches it.
pub fn resize_to_include(
    tree: &ConstituentTree,
    selection: &Selection,
    offset: TextSize,
) -> Result<Selection, Rejected> {
    let mut current = *selection;

    if current.range.contains(offset) {
        let movement = current.anchor.reversed();
        while let Ok(next) = resize(tree, &current, movement) {
            if next == current.range || !next.contains(offset) {
                break;
            }
            current.range = next;
        }
        return Ok(current);
    }

    current.anchor =
        if offset < current.range.start() { Direction::Left } else { Direction::Right };
    while !current.range.contains(offset) {
        match resize(tree, &current, current.anchor) {
            Ok(next) if next != current.range => current.range = next,
            _ => return Err(Rejected::NotIncluded(offset)),
        }
    }
    Ok(current)
}

/// Selects the constituent under `cursor`, descending at most
/// `selection.level` branching levels, and lowers the level past it.
pub fn pointer_track(
    tree: &ConstituentTree,
    selection: &Selection,
    cursor: TextSize,
) -> Result<Selection, Rejected> {
    let probe = TextRange::at(cursor, TextSize::new(1));
    let (node, start) =
        tree.find_at_level(probe, selection.level).ok_or(Rejected::OutOfRange(probe))?;
    Ok(Selection {
        range: TextRange::at(start, node.len()),
        anchor: selection.anchor,
        level: node.depth().saturating_sub(1),
    })
}
