use std::io::{self, Write as _};
use std::process::{Command, Stdio};
use std::thread;

use semsel_tree::{Sentence, Token};

use crate::{ParseError, Parser};

/// Unit of the offsets a bridge reports.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OffsetUnit {
    #[default]
    Bytes,
    /// Unicode scalar values, as reported by most Python tokenizers.
    Chars,
}

/// Runs an external bridge process per parse.
///
/// The text is written to the bridge's stdin; it must print a JSON list of
/// `[tree, tokens]` pairs, where `tree` is `{"label": .., "children": [..]}`
/// and `tokens` is a list of `[start, end]` offsets into the text.
#[derive(Debug, Clone)]
pub struct CommandParser {
    program: String,
    args: Vec<String>,
    unit: OffsetUnit,
}

impl CommandParser {
    pub fn new(program: impl Into<String>) -> Self {
        Self { program: program.into(), args: Vec::new(), unit: OffsetUnit::default() }
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    pub fn offsets(mut self, unit: OffsetUnit) -> Self {
        self.unit = unit;
        self
    }

    fn unavailable(&self, source: io::Error) -> ParseError {
        ParseError::Unavailable { program: self.program.clone(), source }
    }
}

impl Parser for CommandParser {
    fn parse(&self, text: &str) -> Result<Vec<Sentence>, ParseError> {
        log::debug!("running parser `{}` on {} bytes", self.program, text.len());
        let mut child = Command::new(&self.program)
            .args(&self.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|err| self.unavailable(err))?;

        // Stdin is fed on its own thread while the output pipes drain.
        let stdin = child.stdin.take();
        let (written, output) = thread::scope(|scope| {
            let writer = scope.spawn(move || match stdin {
                Some(mut stdin) => stdin.write_all(text.as_bytes()),
                None => Ok(()),
            });
            let output = child.wait_with_output();
            (writer.join().expect("stdin writer panicked"), output)
        });

        // A bridge that exits early is reported through its status below.
        if let Err(err) = written
            && err.kind() != io::ErrorKind::BrokenPipe
        {
            return Err(self.unavailable(err));
        }
        let output = output.map_err(|err| self.unavailable(err))?;
        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_owned();
            return Err(ParseError::Failed { status: output.status, stderr });
        }

        let mut sentences: Vec<Sentence> = serde_json::from_slice(&output.stdout)?;
        convert_offsets(text, &mut sentences, self.unit)?;
        Ok(sentences)
    }
}

/// Rewrites token offsets in `unit` into byte offsets, checking that each
/// lands on a character boundary of `text`.
pub(crate) fn convert_offsets(
    text: &str,
    sentences: &mut [Sentence],
    unit: OffsetUnit,
) -> Result<(), ParseError> {
    let tokens = sentences.iter_mut().flat_map(|sentence| sentence.tokens.iter_mut());
    match unit {
        OffsetUnit::Bytes => {
            for token in tokens {
                for offset in [token.start, token.end] {
                    if !text.is_char_boundary(offset as usize) {
                        return Err(ParseError::OffsetOutOfBounds {
                            offset: offset as usize,
                            len: text.len(),
                        });
                    }
                }
            }
        }
        OffsetUnit::Chars => {
            let boundaries: Vec<usize> =
                text.char_indices().map(|(offset, _)| offset).chain([text.len()]).collect();
            let to_bytes = |offset: u32| {
                boundaries.get(offset as usize).map(|&byte| byte as u32).ok_or(
                    ParseError::OffsetOutOfBounds {
                        offset: offset as usize,
                        len: boundaries.len() - 1,
                    },
                )
            };
            for token in tokens {
                *token = Token::new(to_bytes(token.start)?, to_bytes(token.end)?);
            }
        }
    }
    Ok(())
}
