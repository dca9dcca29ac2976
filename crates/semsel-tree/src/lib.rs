//! Constituency tree with parent links, built once per parse and navigated by
//! lifetime-bound handles.
//!
//! Nodes live in an arena; parent, child and focus links are arena indices.
//! The only state that changes after construction is each node's memory of
//! the child it was last drilled into.

mod builder;
mod input;
mod locate;
mod navigate;
mod tree;


pub use builder::BuildError;
pub use input::{BracketTree, Sentence, Token};
pub use navigate::Direction;
pub use text_size::{TextRange, TextSize};
pub use tree::{ConstituentNode, ConstituentTree, DOCUMENT_LABEL, Node, NodeId, SENTENCE_LABEL};
