use std::hash::BuildHasher as _;

use rustc_hash::FxBuildHasher;
use semsel_parse::{ParseError, Parser};
use semsel_tree::{BuildError, ConstituentTree, Direction, Sentence, TextRange};

use crate::anchor::AnchorTracker;
use crate::controller::{self, Gesture, Rejected, Selection};
use crate::trim::trim_whitespace;

/// Identifies a text version; parses carry the fingerprint of the text they
/// were started on.
pub fn fingerprint(text: &str) -> u64 {
    FxBuildHasher.hash_one(text)
}

#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("parse result belongs to an outdated text")]
    Stale,
    #[error(transparent)]
    Build(#[from] BuildError),
    #[error(transparent)]
    Parse(#[from] ParseError),
}

/// One document: its text, the latest tree parsed from it and the selection.
///
/// The tree is replaced wholesale on each successful parse. Gestures only
/// run while the tree matches the current text.
#[derive(Debug)]
pub struct Session {
    text: String,
    fingerprint: u64,
    tree: Option<(u64, ConstituentTree)>,
    selection: Selection,
    anchor: AnchorTracker,
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

impl Session {
    pub fn new() -> Self {
        Self {
            text: String::new(),
            fingerprint: fingerprint(""),
            tree: None,
            selection: Selection::default(),
            anchor: AnchorTracker::default(),
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Tree for the current text, if its parse has been installed.
    pub fn tree(&self) -> Option<&ConstituentTree> {
        self.tree.as_ref().filter(|(version, _)| *version == self.fingerprint).map(|(_, tree)| tree)
    }

    pub fn selection(&self) -> Selection {
        self.selection
    }

    /// Records new document text and returns its fingerprint.
    pub fn text_changed(&mut self, text: impl Into<String>) -> u64 {
        self.text = text.into();
        self.fingerprint = fingerprint(&self.text);
        self.fingerprint
    }

    /// Installs a parse of the text with `version`.
    ///
    /// Parses of outdated text are discarded. If the tree cannot be built the
    /// previous one is kept.
    pub fn install(&mut self, version: u64, sentences: &[Sentence]) -> Result<(), SessionError> {
        if version != self.fingerprint {
            log::debug!("discarding parse of outdated text {version:#x}");
            return Err(SessionError::Stale);
        }
        match ConstituentTree::build(sentences) {
            Ok(tree) => {
                log::debug!("installed {tree:?}");
                self.tree = Some((version, tree));
                Ok(())
            }
            Err(err) => {
                log::warn!("keeping previous tree: {err}");
                Err(err.into())
            }
        }
    }

    /// Sets the text, parses it with `parser` and installs the result.
    pub fn reparse(&mut self, parser: &dyn Parser, text: &str) -> Result<(), SessionError> {
        let version = self.text_changed(text);
        let sentences = parser.parse(text)?;
        self.install(version, &sentences)
    }

    /// Applies `gesture` and returns the new selection range.
    ///
    /// A rejected gesture leaves the selection as it was.
    pub fn apply(&mut self, gesture: Gesture) -> Result<TextRange, Rejected> {
        let Some((version, tree)) = self.tree.as_mut() else { return Err(Rejected::NoTree) };
        if *version != self.fingerprint {
            return Err(Rejected::NoTree);
        }

        let mut selection = self.selection;
        if matches!(
            gesture,
            Gesture::MoveToNeighbour(_) | Gesture::Resize(_) | Gesture::ResizeToInclude(_)
        ) {
            selection.range = trim_whitespace(&self.text, selection.range);
        }

        match controller::apply(tree, &selection, gesture) {
            Ok(next) => {
                self.anchor.set_direction(next.anchor);
                self.selection = next;
                Ok(next.range)
            }
            Err(rejected) => {
                log::debug!("{gesture:?} on {:?} rejected: {rejected}", selection.range);
                Err(rejected)
            }
        }
    }

    /// Takes a selection made outside of gestures, updating the anchor the
    /// way a text view would.
    pub fn set_selection(&mut self, range: TextRange) {
        let anchor = self.anchor.selection_changed(self.selection.range, range);
        self.selection = Selection { range, anchor, ..self.selection };
    }

    pub fn set_anchor(&mut self, anchor: Direction) {
        self.anchor.set_direction(anchor);
        self.selection.anchor = anchor;
    }
}
