//! Builds a [`ConstituentTree`] from per-sentence parser output.
//!
//! Construction happens in two passes: sentences are first walked into an
//! owned tree of absolute spans (collapsing unary chains on the way up), and
//! that tree is then flattened into the arena with parent-relative offsets.

use la_arena::Arena;
use text_size::{TextRange, TextSize};

use crate::input::{BracketTree, Sentence, Token};
use crate::tree::{ConstituentTree, DOCUMENT_LABEL, Node, NodeId, SENTENCE_LABEL};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BuildError {
    #[error("sentence {sentence}: parse tree has {leaves} leaves but {tokens} tokens were supplied")]
    StructureMismatch { sentence: usize, leaves: usize, tokens: usize },
    #[error("sentence {sentence}: token {token} has an inverted span {start}..{end}")]
    InvalidToken { sentence: usize, token: usize, start: u32, end: u32 },
    #[error("sentence {sentence}: token {token} starts before the previous token ends")]
    UnorderedTokens { sentence: usize, token: usize },
    #[error("sentence {sentence} starts before the previous sentence ends")]
    UnorderedSentences { sentence: usize },
}

/// Constituent with an absolute span, before it is placed in the arena.
struct Pending {
    label: Option<Box<str>>,
    range: TextRange,
    depth: u32,
    children: Vec<Self>,
}

struct SentenceBuilder<'s> {
    sentence: usize,
    tokens: &'s [Token],
    next_token: usize,
    last_end: TextSize,
}

impl<'s> SentenceBuilder<'s> {
    fn new(sentence: usize, tokens: &'s [Token]) -> Self {
        Self { sentence, tokens, next_token: 0, last_end: TextSize::new(0) }
    }

    fn mismatch(&self, leaves: usize) -> BuildError {
        BuildError::StructureMismatch { sentence: self.sentence, leaves, tokens: self.tokens.len() }
    }

    fn build(mut self, tree: &BracketTree) -> Result<Pending, BuildError> {
        let leaves = tree.leaf_count();
        if leaves != self.tokens.len() {
            return Err(self.mismatch(leaves));
        }
        self.subtree(tree, 1)
    }

    fn subtree(&mut self, tree: &BracketTree, depth: u32) -> Result<Pending, BuildError> {
        if tree.is_leaf() {
            let range = self.consume_token(tree)?;
            return Ok(Pending { label: label(&tree.label), range, depth, children: Vec::new() });
        }

        let mut children = tree
            .children
            .iter()
            .map(|child| self.subtree(child, depth + 1))
            .collect::<Result<Vec<_>, _>>()?;

        let range = children
            .iter()
            .map(|child| child.range)
            .reduce(TextRange::cover)
            .expect("inner node has children");

        let mut label = label(&tree.label);
        if children.len() == 1 {
            let child = children.pop().expect("exactly one child");
            if child.children.is_empty() && label.as_deref() != Some(SENTENCE_LABEL) {
                label = child.label.or(label);
            }
            children = child.children;
        }

        Ok(Pending { label, range, depth, children })
    }

    fn consume_token(&mut self, tree: &BracketTree) -> Result<TextRange, BuildError> {
        let token_index = self.next_token;
        let token =
            *self.tokens.get(token_index).ok_or_else(|| self.mismatch(tree.leaf_count()))?;
        let range = token.range().ok_or(BuildError::InvalidToken {
            sentence: self.sentence,
            token: token_index,
            start: token.start,
            end: token.end,
        })?;
        if token_index > 0 && range.start() < self.last_end {
            return Err(BuildError::UnorderedTokens { sentence: self.sentence, token: token_index });
        }
        self.next_token += 1;
        self.last_end = range.end();
        Ok(range)
    }
}

fn label(text: &str) -> Option<Box<str>> {
    (!text.is_empty()).then(|| text.into())
}

impl ConstituentTree {
    /// Builds a document tree whose `DOC` root has one `TOP` child per sentence.
    pub fn build(sentences: &[Sentence]) -> Result<Self, BuildError> {
        let sentences = sentences
            .iter()
            .enumerate()
            .map(|(index, sentence)| {
                SentenceBuilder::new(index, &sentence.tokens).build(&sentence.tree)
            })
            .collect::<Result<Vec<_>, _>>()?;
        if let Some(index) =
            sentences.windows(2).position(|pair| pair[1].range.start() < pair[0].range.end())
        {
            return Err(BuildError::UnorderedSentences { sentence: index + 1 });
        }

        let range = sentences
            .iter()
            .map(|sentence| sentence.range)
            .reduce(TextRange::cover)
            .unwrap_or_else(|| TextRange::empty(TextSize::new(0)));
        let document =
            Pending { label: Some(DOCUMENT_LABEL.into()), range, depth: 0, children: sentences };

        let mut nodes = Arena::new();
        flatten(&mut nodes, document, None, 0);
        Ok(Self { nodes })
    }
}

fn flatten(
    nodes: &mut Arena<Node>,
    pending: Pending,
    parent: Option<(NodeId, TextSize)>,
    index: u32,
) -> NodeId {
    let Pending { label, range, depth, children } = pending;
    let parent_start = parent.map_or(TextSize::new(0), |(_, start)| start);
    let id = nodes.alloc(Node {
        label,
        offset: range.start() - parent_start,
        len: range.len(),
        depth,
        index,
        parent: parent.map(|(id, _)| id),
        children: Vec::with_capacity(children.len()),
        last_focus: None,
    });
    for (child_index, child) in children.into_iter().enumerate() {
        let child = flatten(nodes, child, Some((id, range.start())), child_index as u32);
        nodes[id].children.push(child);
    }
    id
}
