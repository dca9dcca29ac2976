//! Reader for Penn Treebank style bracketed trees.
//!
//! ```text
//! (TOP (NP (DT The) (NN dog)) (VP (VBD barked)) (. .))
//! ```
//!
//! Any number of trees may follow each other. An unlabeled outermost
//! bracket, as in `( (S ...) )`, is read as a sentence root.

use semsel_tree::{BracketTree, SENTENCE_LABEL};

use crate::ParseError;
use crate::cursor::Cursor;

pub fn read(source: &str) -> Result<Vec<BracketTree>, ParseError> {
    let mut reader = Reader { cursor: Cursor::new(source) };
    let mut trees = Vec::new();
    loop {
        reader.cursor.skip_whitespace();
        if reader.cursor.is_eof() {
            return Ok(trees);
        }
        let mut tree = reader.tree()?;
        if tree.label.is_empty() {
            tree.label = SENTENCE_LABEL.to_owned();
        }
        trees.push(tree);
    }
}

struct Reader<'a> {
    cursor: Cursor<'a>,
}

impl Reader<'_> {
    fn error(&self, expected: &'static str) -> ParseError {
        ParseError::Malformed { offset: self.cursor.offset(), expected }
    }

    fn expect(&mut self, c: char, expected: &'static str) -> Result<(), ParseError> {
        if self.cursor.peek() != c || self.cursor.is_eof() {
            return Err(self.error(expected));
        }
        self.cursor.advance();
        Ok(())
    }

    fn tree(&mut self) -> Result<BracketTree, ParseError> {
        self.expect('(', "`(`")?;
        self.cursor.skip_whitespace();
        let label = self.cursor.advance_while(is_atom).to_owned();

        let mut children = Vec::new();
        loop {
            self.cursor.skip_whitespace();
            match self.cursor.peek() {
                _ if self.cursor.is_eof() => return Err(self.error("`)`")),
                ')' => break,
                '(' => children.push(self.tree()?),
                _ => children.push(BracketTree::leaf(self.cursor.advance_while(is_atom))),
            }
        }

        if children.is_empty() {
            return Err(self.error("a child constituent or word"));
        }
        self.expect(')', "`)`")?;
        Ok(BracketTree::node(label, children))
    }
}

fn is_atom(c: char) -> bool {
    !c.is_whitespace() && c != '(' && c != ')'
}
