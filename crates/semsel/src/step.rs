use std::fmt;
use std::num::ParseIntError;
use std::str::FromStr;

use semsel_ide::Gesture;
use semsel_tree::{Direction, TextSize};

/// A gesture as written on the command line, e.g. `expand` or `focus:12`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Step(pub(crate) Gesture);

#[derive(Debug, thiserror::Error)]
pub(crate) enum StepError {
    #[error(
        "unknown gesture `{0}`; expected expand, focus:N, focus!:N, sentence, left, right, \
         resize-left, resize-right, include:N or track:N"
    )]
    Unknown(String),
    #[error("`{0}` needs a byte offset, e.g. `{0}:12`")]
    MissingOffset(String),
    #[error("invalid offset in `{step}`")]
    InvalidOffset {
        step: String,
        #[source]
        source: ParseIntError,
    },
}

impl FromStr for Step {
    type Err = StepError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (name, offset) = match s.split_once(':') {
            Some((name, offset)) => {
                let offset = offset
                    .parse::<u32>()
                    .map_err(|source| StepError::InvalidOffset { step: s.to_owned(), source })?;
                (name, Some(TextSize::new(offset)))
            }
            None => (s, None),
        };
        let offset = || offset.ok_or_else(|| StepError::MissingOffset(name.to_owned()));

        let gesture = match name {
            "expand" => Gesture::Expand,
            "focus" => Gesture::Focus { cursor: offset()?, ignore_history: false },
            "focus!" => Gesture::Focus { cursor: offset()?, ignore_history: true },
            "sentence" => Gesture::SelectSentence,
            "left" => Gesture::MoveToNeighbour(Direction::Left),
            "right" => Gesture::MoveToNeighbour(Direction::Right),
            "resize-left" => Gesture::Resize(Direction::Left),
            "resize-right" => Gesture::Resize(Direction::Right),
            "include" => Gesture::ResizeToInclude(offset()?),
            "track" => Gesture::PointerTrack { cursor: offset()? },
            _ => return Err(StepError::Unknown(s.to_owned())),
        };
        Ok(Self(gesture))
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Gesture::Expand => f.write_str("expand"),
            Gesture::Focus { cursor, ignore_history: false } => write!(f, "focus:{cursor:?}"),
            Gesture::Focus { cursor, ignore_history: true } => write!(f, "focus!:{cursor:?}"),
            Gesture::SelectSentence => f.write_str("sentence"),
            Gesture::MoveToNeighbour(direction) => write!(f, "{direction}"),
            Gesture::Resize(direction) => write!(f, "resize-{direction}"),
            Gesture::ResizeToInclude(offset) => write!(f, "include:{offset:?}"),
            Gesture::PointerTrack { cursor } => write!(f, "track:{cursor:?}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use semsel_ide::Gesture;
    use semsel_tree::{Direction, TextSize};

    use super::Step;

    #[track_caller]
    fn check(input: &str, gesture: Gesture) {
        let step: Step = input.parse().unwrap();
        assert_eq!(step.0, gesture);
        assert_eq!(step.to_string(), input);
    }

    #[test]
    fn parses_every_gesture() {
        check("expand", Gesture::Expand);
        check("focus:12", Gesture::Focus { cursor: TextSize::new(12), ignore_history: false });
        check("focus!:3", Gesture::Focus { cursor: TextSize::new(3), ignore_history: true });
        check("sentence", Gesture::SelectSentence);
        check("left", Gesture::MoveToNeighbour(Direction::Left));
        check("right", Gesture::MoveToNeighbour(Direction::Right));
        check("resize-left", Gesture::Resize(Direction::Left));
        check("resize-right", Gesture::Resize(Direction::Right));
        check("include:0", Gesture::ResizeToInclude(TextSize::new(0)));
        check("track:7", Gesture::PointerTrack { cursor: TextSize::new(7) });
    }

    #[test]
    fn rejects_malformed_steps() {
        let error = |input: &str| input.parse::<Step>().unwrap_err().to_string();
        assert_eq!(error("focus"), "`focus` needs a byte offset, e.g. `focus:12`");
        assert_eq!(error("track:-1"), "invalid offset in `track:-1`");
        assert!(error("shrink").starts_with("unknown gesture `shrink`"));
    }
}
