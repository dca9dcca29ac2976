//! Parser output consumed by the tree builder.

use std::fmt;

use serde::Deserialize;
use text_size::{TextRange, TextSize};

/// Labeled bracket tree for one sentence, as produced by a constituency parser.
///
/// Leaves carry the token spelling as their label.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct BracketTree {
    pub label: String,
    #[serde(default)]
    pub children: Vec<BracketTree>,
}

impl BracketTree {
    pub fn leaf(label: impl Into<String>) -> Self {
        Self { label: label.into(), children: Vec::new() }
    }

    pub fn node(label: impl Into<String>, children: Vec<Self>) -> Self {
        Self { label: label.into(), children }
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    pub fn leaf_count(&self) -> usize {
        if self.is_leaf() { 1 } else { self.children.iter().map(Self::leaf_count).sum() }
    }

    /// Leaf spellings in document order.
    pub fn leaves(&self) -> Vec<&str> {
        let mut leaves = Vec::with_capacity(self.leaf_count());
        let mut stack = vec![self];
        while let Some(tree) = stack.pop() {
            if tree.is_leaf() {
                leaves.push(tree.label.as_str());
            } else {
                stack.extend(tree.children.iter().rev());
            }
        }
        leaves
    }
}

impl fmt::Display for BracketTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_leaf() {
            return f.write_str(&self.label);
        }
        write!(f, "({}", self.label)?;
        for child in &self.children {
            write!(f, " {child}")?;
        }
        f.write_str(")")
    }
}

/// Absolute `start..end` offsets of one token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct Token {
    pub start: u32,
    pub end: u32,
}

impl Token {
    pub fn new(start: u32, end: u32) -> Self {
        Self { start, end }
    }

    /// `None` when the token is inverted.
    pub fn range(self) -> Option<TextRange> {
        (self.start <= self.end)
            .then(|| TextRange::new(TextSize::new(self.start), TextSize::new(self.end)))
    }
}

/// One parsed sentence: its bracket tree and the tokens its leaves consume.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(from = "(BracketTree, Vec<Token>)")]
pub struct Sentence {
    pub tree: BracketTree,
    pub tokens: Vec<Token>,
}

impl Sentence {
    pub fn new(tree: BracketTree, tokens: Vec<Token>) -> Self {
        Self { tree, tokens }
    }
}

impl From<(BracketTree, Vec<Token>)> for Sentence {
    fn from((tree, tokens): (BracketTree, Vec<Token>)) -> Self {
        Self { tree, tokens }
    }
}
