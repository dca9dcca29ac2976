//! Seam between raw text and the sentences a constituency tree is built from.
//!
//! The natural-language parser itself lives outside this workspace. A
//! [`Parser`] either replays bracketed trees aligned against the text or
//! runs an external bridge process that reports trees and token offsets.

mod align;
pub mod bracket;
mod command;
mod cursor;
mod error;

#[cfg(test)]
mod tests;

pub use align::align_tokens;
pub use command::{CommandParser, OffsetUnit};
pub use error::ParseError;
use semsel_tree::{BracketTree, Sentence};

pub trait Parser {
    /// Splits `text` into sentences, each with its tree and the byte offsets
    /// of its tokens.
    fn parse(&self, text: &str) -> Result<Vec<Sentence>, ParseError>;
}

/// Parser over trees that were bracketed ahead of time.
///
/// Tokens are recovered by aligning each tree's leaves against the text.
#[derive(Debug, Clone, Default)]
pub struct BracketParser {
    trees: Vec<BracketTree>,
}

impl BracketParser {
    pub fn new(trees: Vec<BracketTree>) -> Self {
        Self { trees }
    }

    /// Reads the trees from bracket notation; see [`bracket::read`].
    pub fn from_brackets(source: &str) -> Result<Self, ParseError> {
        bracket::read(source).map(Self::new)
    }

    pub fn trees(&self) -> &[BracketTree] {
        &self.trees
    }
}

impl Parser for BracketParser {
    fn parse(&self, text: &str) -> Result<Vec<Sentence>, ParseError> {
        let mut from = 0;
        self.trees
            .iter()
            .map(|tree| {
                let tokens = align_tokens(text, &tree.leaves(), from)?;
                if let Some(last) = tokens.last() {
                    from = last.end as usize;
                }
                Ok(Sentence::new(tree.clone(), tokens))
            })
            .collect()
    }
}
