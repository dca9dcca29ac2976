use semsel_tree::{Direction, TextRange, TextSize};

/// Follows raw selection changes from a text view to tell which edge of the
/// selection is anchored.
///
/// A collapsed caret drops the anchor where it lands. A selection that
/// starts before the anchor, without ending on it, has been reversed by
/// keyboard input after a pointer drag, so the anchor jumps to the edge that
/// stayed put.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnchorTracker {
    anchor: TextSize,
    direction: Direction,
}

impl Default for AnchorTracker {
    fn default() -> Self {
        Self { anchor: TextSize::new(0), direction: Direction::Right }
    }
}

impl AnchorTracker {
    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn anchor(&self) -> TextSize {
        self.anchor
    }

    /// Records a selection change from `old` to `new` and returns the
    /// resulting anchor direction.
    pub fn selection_changed(&mut self, old: TextRange, new: TextRange) -> Direction {
        if new.is_empty() {
            self.anchor = new.start();
            return self.direction;
        }

        if self.anchor > new.start() && self.anchor - new.start() != new.len() {
            self.anchor = if old.start() == new.start() { new.start() } else { new.end() };
        }
        self.direction = if self.anchor == new.start() { Direction::Right } else { Direction::Left };
        self.direction
    }

    /// Overrides the direction, e.g. after a gesture turned the selection.
    pub fn set_direction(&mut self, direction: Direction) {
        self.direction = direction;
    }
}

#[cfg(test)]
mod tests {
    use semsel_tree::{Direction, TextRange, TextSize};

    use super::AnchorTracker;

    fn range(start: u32, end: u32) -> TextRange {
        TextRange::new(start.into(), end.into())
    }

    /// Places a caret at `caret`, then feeds each selection in turn.
    fn track(caret: u32, selections: &[(u32, u32)]) -> Vec<Direction> {
        let mut tracker = AnchorTracker::default();
        let mut current = range(caret, caret);
        tracker.selection_changed(current, current);
        selections
            .iter()
            .map(|&(start, end)| {
                let next = range(start, end);
                let direction = tracker.selection_changed(current, next);
                current = next;
                direction
            })
            .collect()
    }

    #[test]
    fn dragging_sets_the_direction() {
        assert_eq!(track(10, &[(10, 12), (10, 15)]), [Direction::Right, Direction::Right]);
        assert_eq!(track(15, &[(13, 15), (10, 15)]), [Direction::Left, Direction::Left]);
    }

    #[test]
    fn extending_past_a_left_drag_flips_the_anchor() {
        let directions = track(15, &[(10, 15), (10, 17)]);
        assert_eq!(directions, [Direction::Left, Direction::Right]);
    }

    #[test]
    fn moving_the_start_past_a_right_drag_flips_the_anchor() {
        let mut tracker = AnchorTracker::default();
        tracker.selection_changed(range(0, 0), range(10, 10));
        tracker.selection_changed(range(10, 10), range(10, 15));
        assert_eq!(tracker.selection_changed(range(10, 15), range(8, 15)), Direction::Left);
        assert_eq!(tracker.anchor(), TextSize::new(15));
    }

    #[test]
    fn caret_keeps_the_last_direction() {
        let mut tracker = AnchorTracker::default();
        tracker.selection_changed(range(0, 0), range(5, 5));
        tracker.selection_changed(range(5, 5), range(2, 5));
        assert_eq!(tracker.selection_changed(range(2, 5), range(7, 7)), Direction::Left);
        assert_eq!(tracker.anchor(), TextSize::new(7));
        assert_eq!(tracker.direction(), Direction::Left);
    }
}
