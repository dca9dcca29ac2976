mod render;
mod step;

use anyhow::Context;
use camino::Utf8PathBuf;
use clap::{Args, Parser, ValueEnum};
use line_index::{LineIndex, WideEncoding, WideLineCol};
use semsel_ide::Session;
use semsel_ide::highlight::document_emphasis;
use semsel_parse::{BracketParser, CommandParser, OffsetUnit};
use semsel_tree::{ConstituentTree, Direction, TextRange, TextSize};
use step::Step;

/// Select text along the constituents of its parse.
#[derive(Parser)]
enum Options {
    /// Print the constituency tree of a text.
    Tree {
        #[command(flatten)]
        input: Input,
    },
    /// Print every word with its depth and emphasis.
    Levels {
        #[command(flatten)]
        input: Input,
    },
    /// Apply gestures to a selection and show each result.
    Select {
        #[command(flatten)]
        input: Input,
        /// Byte offset where the selection starts.
        #[arg(long, default_value_t = 0)]
        start: u32,
        /// Byte offset where the selection ends; defaults to `start`.
        #[arg(long)]
        end: Option<u32>,
        /// Which way the selection extends from its fixed edge.
        #[arg(long, value_enum, default_value_t = Anchor::Right)]
        anchor: Anchor,
        /// expand, focus:N, focus!:N, sentence, left, right, resize-left,
        /// resize-right, include:N or track:N.
        #[arg(required = true)]
        steps: Vec<Step>,
    },
}

#[derive(Args)]
struct Input {
    /// Text file to parse.
    path: Utf8PathBuf,
    /// Bracketed trees for the text, one per sentence.
    #[arg(long, conflicts_with = "command", required_unless_present = "command")]
    brackets: Option<Utf8PathBuf>,
    /// Parser bridge that reads text on stdin and prints `[[tree, tokens], ...]`.
    #[arg(long, env = "SEMSEL_PARSER")]
    command: Option<String>,
    /// Argument passed to the parser bridge.
    #[arg(long = "arg", value_name = "ARG", allow_hyphen_values = true)]
    args: Vec<String>,
    /// The bridge reports character offsets instead of byte offsets.
    #[arg(long)]
    char_offsets: bool,
}

#[derive(Clone, Copy, ValueEnum)]
enum Anchor {
    Left,
    Right,
}

impl From<Anchor> for Direction {
    fn from(anchor: Anchor) -> Self {
        match anchor {
            Anchor::Left => Self::Left,
            Anchor::Right => Self::Right,
        }
    }
}

impl Input {
    fn read(&self) -> anyhow::Result<String> {
        std::fs::read_to_string(&self.path).with_context(|| format!("failed to read `{}`", self.path))
    }

    fn parser(&self) -> anyhow::Result<Box<dyn semsel_parse::Parser>> {
        if let Some(path) = &self.brackets {
            let source = std::fs::read_to_string(path)
                .with_context(|| format!("failed to read `{path}`"))?;
            let parser = BracketParser::from_brackets(&source)
                .with_context(|| format!("failed to read trees from `{path}`"))?;
            return Ok(Box::new(parser));
        }

        let program = self.command.as_deref().context("no parser given")?;
        let unit = if self.char_offsets { OffsetUnit::Chars } else { OffsetUnit::Bytes };
        Ok(Box::new(CommandParser::new(program).args(self.args.iter().cloned()).offsets(unit)))
    }

    fn session(&self) -> anyhow::Result<Session> {
        let text = self.read()?;
        let parser = self.parser()?;
        let mut session = Session::new();
        session.reparse(parser.as_ref(), &text).with_context(|| format!("failed to parse `{}`", self.path))?;
        Ok(session)
    }
}

fn tree(session: &Session) -> anyhow::Result<&ConstituentTree> {
    session.tree().context("no parse is available")
}

/// Checks user-supplied offsets before they reach the selection machinery.
fn selection_range(text: &str, start: u32, end: u32) -> anyhow::Result<TextRange> {
    anyhow::ensure!(start <= end, "selection start {start} is after its end {end}");
    for offset in [start, end] {
        anyhow::ensure!(
            text.is_char_boundary(offset as usize),
            "offset {offset} is not on a character boundary of the {}-byte text",
            text.len()
        );
    }
    Ok(TextRange::new(TextSize::new(start), TextSize::new(end)))
}

/// Line and character column of `offset`, both zero-based.
fn position(line_index: &LineIndex, offset: TextSize) -> WideLineCol {
    let line_col = line_index.line_col(offset);
    line_index
        .to_wide(WideEncoding::Utf32, line_col)
        .unwrap_or(WideLineCol { line: line_col.line, col: line_col.col })
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::new().filter_or("SEMSEL_LOG", "warn")).init();

    match Options::parse() {
        Options::Tree { input } => {
            let session = input.session()?;
            print!("{}", tree(&session)?);
        }
        Options::Levels { input } => {
            let session = input.session()?;
            let text = session.text();
            let line_index = LineIndex::new(text);
            for leaf in document_emphasis(tree(&session)?) {
                let position = position(&line_index, leaf.range.start());
                println!(
                    "{}:{}\t{}\tdepth {}\temphasis {:.2}",
                    position.line + 1,
                    position.col + 1,
                    &text[leaf.range],
                    leaf.depth,
                    leaf.emphasis,
                );
            }
        }
        Options::Select { input, start, end, anchor, steps } => {
            let mut session = input.session()?;
            let range = selection_range(session.text(), start, end.unwrap_or(start))
                .with_context(|| format!("invalid selection in `{}`", input.path))?;
            session.set_selection(range);
            session.set_anchor(anchor.into());

            let renderer = render::renderer();
            let path = input.path.as_str();
            for step in steps {
                let (title, rejected) = match session.apply(step.0) {
                    Ok(_) => (step.to_string(), false),
                    Err(rejected) => {
                        log::info!("{step} rejected: {rejected}");
                        (format!("{step}: {rejected}"), true)
                    }
                };
                let range = session.selection().range;
                let text = session.text();
                println!("{}", render::selection(&renderer, path, text, &title, range, rejected));
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use line_index::LineIndex;
    use semsel_tree::{TextRange, TextSize};

    use super::{position, selection_range};

    #[test]
    fn selection_offsets_are_validated() {
        let text = "né fox.";
        assert_eq!(
            selection_range(text, 4, 7).unwrap(),
            TextRange::new(TextSize::new(4), TextSize::new(7))
        );
        assert_eq!(
            selection_range(text, 5, 2).unwrap_err().to_string(),
            "selection start 5 is after its end 2"
        );
        assert_eq!(
            selection_range(text, 2, 2).unwrap_err().to_string(),
            "offset 2 is not on a character boundary of the 8-byte text"
        );
        assert!(selection_range(text, 0, 9).is_err());
    }

    #[test]
    fn positions_count_characters() {
        let text = "né fox.\nthe dog";
        let line_index = LineIndex::new(text);
        let fox = position(&line_index, TextSize::new(4));
        assert_eq!((fox.line, fox.col), (0, 3));
        let dog = position(&line_index, TextSize::new(13));
        assert_eq!((dog.line, dog.col), (1, 4));
    }
}
