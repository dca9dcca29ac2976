use std::ops::Range;

use semsel_tree::{TextRange, TextSize};

/// Shrinks `range` past whitespace at both ends.
///
/// An all-whitespace selection collapses at its trimmed start. Ranges that
/// do not slice `text` on character boundaries are returned unchanged.
pub fn trim_whitespace(text: &str, range: TextRange) -> TextRange {
    let Some(selected) = text.get(Range::<usize>::from(range)) else { return range };
    let leading = TextSize::of(selected) - TextSize::of(selected.trim_start());
    let trailing = TextSize::of(selected) - TextSize::of(selected.trim_end());

    let start = range.start() + leading;
    let end = (range.end() - trailing).max(start);
    TextRange::new(start, end)
}

#[cfg(test)]
mod tests {
    use semsel_tree::TextRange;

    use super::trim_whitespace;

    fn trim(text: &str, start: u32, end: u32) -> TextRange {
        trim_whitespace(text, TextRange::new(start.into(), end.into()))
    }

    #[test]
    fn trims_both_ends() {
        assert_eq!(trim("a  fox \n b", 1, 9), TextRange::new(3.into(), 6.into()));
        assert_eq!(trim("fox", 0, 3), TextRange::new(0.into(), 3.into()));
    }

    #[test]
    fn blank_selection_collapses() {
        assert_eq!(trim("a \t b", 1, 4), TextRange::empty(4.into()));
    }

    #[test]
    fn unicode_whitespace_is_trimmed() {
        assert_eq!(trim("\u{a0}né\u{2003}", 0, 8), TextRange::new(2.into(), 5.into()));
    }

    #[test]
    fn out_of_bounds_ranges_pass_through() {
        assert_eq!(trim("né", 2, 3), TextRange::new(2.into(), 3.into()));
        assert_eq!(trim("ab", 1, 9), TextRange::new(1.into(), 9.into()));
    }
}
