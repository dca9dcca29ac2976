use std::fmt::Display;
use std::io::IsTerminal as _;

use annotate_snippets::{Level, Renderer, Snippet};
use semsel_tree::TextRange;

pub(crate) fn renderer() -> Renderer {
    if std::io::stdout().is_terminal() { Renderer::styled() } else { Renderer::plain() }
}

/// Shows `range` in `text` under `title`; rejected gestures render as warnings.
pub(crate) fn selection<'a>(
    renderer: &'a Renderer,
    path: &'a str,
    text: &'a str,
    title: &'a str,
    range: TextRange,
    rejected: bool,
) -> impl Display + 'a {
    let (level, label) = if rejected { (Level::Warning, "kept") } else { (Level::Info, "selected") };
    let message = level.title(title).snippet(
        Snippet::source(text)
            .origin(path)
            .annotation(level.span(range.into()).label(label))
            .fold(true),
    );
    renderer.render(message)
}
