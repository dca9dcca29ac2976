//! Immutable constituency tree with parent links and per-node focus memory.

use std::fmt;

use text_size::{TextRange, TextSize};

use la_arena::{Arena, Idx, RawIdx};

/// Label of a sentence root.
pub const SENTENCE_LABEL: &str = "TOP";
/// Label of the synthetic document root.
pub const DOCUMENT_LABEL: &str = "DOC";

const PUNCTUATION: &[&str] = &[".", ",", "!", "?"];

pub type NodeId = Idx<Node>;

/// Raw node stored in the tree arena.
#[derive(Debug)]
pub struct Node {
    pub(crate) label: Option<Box<str>>,
    /// Start relative to the parent's start.
    pub(crate) offset: TextSize,
    pub(crate) len: TextSize,
    pub(crate) depth: u32,
    pub(crate) index: u32,
    pub(crate) parent: Option<NodeId>,
    pub(crate) children: Vec<NodeId>,
    pub(crate) last_focus: Option<NodeId>,
}

/// Owned constituency tree for one parsed document.
///
/// The root is always the `DOC` node at index 0.
pub struct ConstituentTree {
    pub(crate) nodes: Arena<Node>,
}

impl ConstituentTree {
    /// Returns the document root.
    #[inline]
    pub fn root(&self) -> ConstituentNode<'_> {
        ConstituentNode { tree: self, id: NodeId::from_raw(RawIdx::from(0)) }
    }

    /// Returns the node for `id`.
    ///
    /// Panics if `id` does not belong to this tree; see [`Self::get`].
    #[inline]
    #[track_caller]
    pub fn node(&self, id: NodeId) -> ConstituentNode<'_> {
        self.get(id).unwrap_or_else(|| panic!("{id:?} is not a node of this tree"))
    }

    /// Returns the node for `id`, if it is in bounds.
    #[inline]
    pub fn get(&self, id: NodeId) -> Option<ConstituentNode<'_>> {
        self.lookup(id).map(|_| ConstituentNode { tree: self, id })
    }

    #[allow(clippy::len_without_is_empty)]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Iterates all nodes in preorder.
    pub fn preorder(&self) -> impl Iterator<Item = ConstituentNode<'_>> {
        let mut stack = vec![self.root()];
        std::iter::from_fn(move || {
            let node = stack.pop()?;
            stack.extend(node.children().rev());
            Some(node)
        })
    }

    /// Iterates leaves in document order.
    pub fn leaves(&self) -> impl Iterator<Item = ConstituentNode<'_>> {
        self.preorder().filter(|node| node.is_leaf())
    }

    fn lookup(&self, id: NodeId) -> Option<&Node> {
        let index = u32::from(id.into_raw()) as usize;
        (index < self.nodes.len()).then(|| &self.nodes[id])
    }

    /// Remembers `child` as the last focused child of `parent`.
    ///
    /// Returns `false` and leaves the tree untouched if `child` is not a
    /// child of `parent`.
    pub fn set_last_focus(&mut self, parent: NodeId, child: NodeId) -> bool {
        let is_child = self.lookup(child).is_some_and(|node| node.parent == Some(parent));
        if is_child {
            self.nodes[parent].last_focus = Some(child);
        }
        is_child
    }

    /// Walks from `id` to the root, recording each step as the parent's last focus.
    pub fn record_focus_path(&mut self, id: NodeId) {
        let mut node = id;
        while let Some(parent) = self.lookup(node).and_then(|it| it.parent) {
            self.nodes[parent].last_focus = Some(node);
            node = parent;
        }
    }
}

impl fmt::Debug for ConstituentTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConstituentTree")
            .field("nodes", &self.len())
            .field("range", &self.root().absolute_range())
            .finish_non_exhaustive()
    }
}

/// One line per node: label and absolute range, indented by nesting.
impl fmt::Display for ConstituentTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fn go(node: ConstituentNode<'_>, indent: usize, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            let label = node.label().unwrap_or("?");
            writeln!(f, "{:indent$}{label} {:?}", "", node.absolute_range(), indent = indent * 2)?;
            node.children().try_for_each(|child| go(child, indent + 1, f))
        }
        go(self.root(), 0, f)
    }
}

/// Node handle tied to the lifetime of the tree.
#[derive(Clone, Copy)]
pub struct ConstituentNode<'a> {
    pub(crate) tree: &'a ConstituentTree,
    pub(crate) id: NodeId,
}

impl<'a> ConstituentNode<'a> {
    #[inline]
    fn raw(self) -> &'a Node {
        &self.tree.nodes[self.id]
    }

    #[inline]
    fn wrap(self, id: NodeId) -> Self {
        Self { tree: self.tree, id }
    }

    #[inline]
    pub fn id(self) -> NodeId {
        self.id
    }

    #[inline]
    pub fn tree(self) -> &'a ConstituentTree {
        self.tree
    }

    #[inline]
    pub fn label(self) -> Option<&'a str> {
        self.raw().label.as_deref()
    }

    /// Number of ancestors in the collapsed tree.
    #[inline]
    pub fn depth(self) -> u32 {
        self.raw().depth
    }

    /// Position among the parent's children.
    #[inline]
    pub fn index(self) -> usize {
        self.raw().index as usize
    }

    #[inline]
    pub fn len(self) -> TextSize {
        self.raw().len
    }

    #[inline]
    pub fn is_empty(self) -> bool {
        self.len() == TextSize::new(0)
    }

    /// Span in the parent's frame.
    #[inline]
    pub fn range(self) -> TextRange {
        TextRange::at(self.raw().offset, self.raw().len)
    }

    /// Absolute start of this node's span.
    pub fn absolute_start(self) -> TextSize {
        self.ancestors().map(|node| node.raw().offset).sum()
    }

    /// Span in the document.
    pub fn absolute_range(self) -> TextRange {
        TextRange::at(self.absolute_start(), self.len())
    }

    #[inline]
    pub fn parent(self) -> Option<Self> {
        self.raw().parent.map(|id| self.wrap(id))
    }

    /// Returns an iterator of ancestors starting from this node.
    #[inline]
    pub fn ancestors(self) -> impl Iterator<Item = Self> + Clone {
        std::iter::successors(Some(self), |it| it.parent())
    }

    #[inline]
    pub fn children(self) -> impl DoubleEndedIterator<Item = Self> + ExactSizeIterator + Clone {
        self.raw().children.iter().map(move |&id| self.wrap(id))
    }

    #[inline]
    pub fn child(self, index: usize) -> Option<Self> {
        self.raw().children.get(index).map(|&id| self.wrap(id))
    }

    #[inline]
    pub fn first_child(self) -> Option<Self> {
        self.raw().children.first().map(|&id| self.wrap(id))
    }

    #[inline]
    pub fn last_child(self) -> Option<Self> {
        self.raw().children.last().map(|&id| self.wrap(id))
    }

    #[inline]
    pub fn is_leaf(self) -> bool {
        self.raw().children.is_empty()
    }

    pub fn is_punctuation(self) -> bool {
        self.is_leaf() && self.label().is_some_and(|label| PUNCTUATION.contains(&label))
    }

    /// `TOP` or `DOC`.
    pub fn is_root_marker(self) -> bool {
        matches!(self.label(), Some(SENTENCE_LABEL | DOCUMENT_LABEL))
    }

    /// The child most recently drilled into, if it is still a child of this node.
    pub fn last_focus(self) -> Option<Self> {
        let focus = self.raw().last_focus?;
        self.tree
            .lookup(focus)
            .filter(|node| node.parent == Some(self.id))
            .map(|_| self.wrap(focus))
    }
}

impl PartialEq for ConstituentNode<'_> {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.tree, other.tree) && self.id == other.id
    }
}

impl Eq for ConstituentNode<'_> {}

impl fmt::Debug for ConstituentNode<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConstituentNode")
            .field("label", &self.label())
            .field("range", &self.absolute_range())
            .field("depth", &self.depth())
            .finish()
    }
}
