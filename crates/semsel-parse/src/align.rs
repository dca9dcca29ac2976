use semsel_tree::Token;

use crate::ParseError;

/// Treebank escapes and the spellings they stand for in running text.
const ESCAPES: &[(&str, &[&str])] = &[
    ("-LRB-", &["("]),
    ("-RRB-", &[")"]),
    ("-LSB-", &["["]),
    ("-RSB-", &["]"]),
    ("-LCB-", &["{"]),
    ("-RCB-", &["}"]),
    ("``", &["\"", "``", "\u{201c}"]),
    ("''", &["\"", "''", "\u{201d}"]),
];

/// Finds each leaf spelling in `text`, in order, starting at byte offset
/// `from` and skipping whitespace between tokens.
///
/// Returns byte-offset tokens, one per leaf.
pub fn align_tokens(text: &str, leaves: &[&str], from: usize) -> Result<Vec<Token>, ParseError> {
    if !text.is_char_boundary(from) {
        return Err(ParseError::OffsetOutOfBounds { offset: from, len: text.len() });
    }

    let mut pos = from;
    leaves
        .iter()
        .map(|&leaf| {
            let rest = &text[pos..];
            pos += rest.len() - rest.trim_start().len();
            let len = spellings(leaf)
                .find(|spelling| text[pos..].starts_with(spelling))
                .map(str::len)
                .ok_or_else(|| ParseError::Unaligned { leaf: leaf.to_owned(), offset: pos })?;
            let start = pos;
            pos += len;
            Ok(Token::new(start as u32, pos as u32))
        })
        .collect()
}

fn spellings(leaf: &str) -> impl Iterator<Item = &str> {
    let escaped: &[&str] = ESCAPES
        .iter()
        .find(|(escape, _)| *escape == leaf)
        .map(|&(_, spellings)| spellings)
        .unwrap_or_default();
    escaped.iter().copied().chain(std::iter::once(leaf))
}
