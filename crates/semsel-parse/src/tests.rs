use expect_test::{Expect, expect};
use semsel_tree::{ConstituentTree, Sentence, Token};

use crate::command::convert_offsets;
use crate::{BracketParser, OffsetUnit, ParseError, Parser, align_tokens, bracket};

#[track_caller]
fn check_read(source: &str, expect: Expect) {
    let actual = match bracket::read(source) {
        Ok(trees) => trees.iter().map(ToString::to_string).collect::<Vec<_>>().join("\n"),
        Err(err) => format!("error: {err}"),
    };
    expect.assert_eq(&actual);
}

/// Parses `text` with `brackets` and renders each token with its spelling.
#[track_caller]
fn check_align(brackets: &str, text: &str, expect: Expect) {
    let parser = BracketParser::from_brackets(brackets).unwrap();
    let actual = match parser.parse(text) {
        Ok(sentences) => sentences
            .iter()
            .enumerate()
            .flat_map(|(index, sentence)| {
                sentence.tokens.iter().map(move |token| {
                    let word = &text[token.start as usize..token.end as usize];
                    format!("{index} {}..{} {word}", token.start, token.end)
                })
            })
            .collect::<Vec<_>>()
            .join("\n"),
        Err(err) => format!("error: {err}"),
    };
    expect.assert_eq(&actual);
}

#[test]
fn reads_nested_trees() {
    check_read(
        "(TOP (NP (DT The) (NN dog)) (VP (VBD barked)) (. .))",
        expect!["(TOP (NP (DT The) (NN dog)) (VP (VBD barked)) (. .))"],
    );
}

#[test]
fn reads_a_sequence_of_trees() {
    check_read(
        "
(TOP (S (NP (PRP It)) (VP (VBZ works)) (. .)))

(TOP (INTJ (UH Hi)))
",
        expect![[r#"
            (TOP (S (NP (PRP It)) (VP (VBZ works)) (. .)))
            (TOP (INTJ (UH Hi)))"#]],
    );
}

#[test]
fn unlabeled_outer_bracket_is_a_sentence_root() {
    check_read("( (S (NN Go) (. !)) )", expect!["(TOP (S (NN Go) (. !)))"]);
}

#[test]
fn reads_nothing_from_blank_input() {
    check_read("  \n ", expect![""]);
}

#[test]
fn malformed_brackets() {
    check_read("(TOP (NN dog)", expect!["error: malformed bracket tree at offset 13: expected `)`"]);
    check_read("dog", expect!["error: malformed bracket tree at offset 0: expected `(`"]);
    check_read(
        "(TOP (NN))",
        expect!["error: malformed bracket tree at offset 8: expected a child constituent or word"],
    );
    check_read("(TOP (NN a)) )", expect!["error: malformed bracket tree at offset 13: expected `(`"]);
}

#[test]
fn aligns_leaves_across_whitespace() {
    check_align(
        "(TOP (NP (DT The) (NN dog)) (VP (VBD barked)) (. .))",
        "  The dog\n barked.",
        expect![[r#"
            0 2..5 The
            0 6..9 dog
            0 11..17 barked
            0 17..18 ."#]],
    );
}

#[test]
fn aligns_treebank_escapes() {
    check_align(
        "(TOP (`` ``) (NN hi) ('' '') (-LRB- -LRB-) (CD 1) (-RRB- -RRB-) (. .))",
        "\"hi\" (1).",
        expect![[r#"
            0 0..1 "
            0 1..3 hi
            0 3..4 "
            0 5..6 (
            0 6..7 1
            0 7..8 )
            0 8..9 ."#]],
    );
}

#[test]
fn aligns_split_contractions_and_sentences() {
    check_align(
        "(TOP (S (NP (PRP I)) (VP (VBP do) (RB n't)) (. .))) (TOP (INTJ (UH Ok) (. .)))",
        "I don't. Ok.",
        expect![[r#"
            0 0..1 I
            0 2..4 do
            0 4..7 n't
            0 7..8 .
            1 9..11 Ok
            1 11..12 ."#]],
    );
}

#[test]
fn missing_leaf_is_unaligned() {
    check_align(
        "(TOP (NN cat) (NN dog))",
        "cat bird",
        expect!["error: token `dog` does not occur in the text at offset 4"],
    );
}

#[test]
fn alignment_starts_at_a_char_boundary() {
    assert!(matches!(
        align_tokens("é", &["é"], 1),
        Err(ParseError::OffsetOutOfBounds { offset: 1, len: 2 })
    ));
    assert_eq!(align_tokens("aé b", &["b"], 3).unwrap(), [Token::new(4, 5)]);
}

#[test]
fn aligned_sentences_build_a_tree() {
    let parser = BracketParser::from_brackets(
        "(TOP (NP (DT The) (JJ quick) (JJ brown) (NN fox)) (VP (VBD jumped)) (. .))",
    )
    .unwrap();
    let sentences = parser.parse("The quick brown fox jumped.").unwrap();
    let tree = ConstituentTree::build(&sentences).unwrap();
    expect![[r#"
        DOC 0..27
          TOP 0..27
            NP 0..19
              The 0..3
              quick 4..9
              brown 10..15
              fox 16..19
            jumped 20..26
            . 26..27
    "#]]
    .assert_eq(&tree.to_string());
}

fn bridge_output(json: &str) -> Vec<Sentence> {
    serde_json::from_str(json).unwrap()
}

#[test]
fn char_offsets_become_byte_offsets() {
    let text = "Café ok.";
    let mut sentences = bridge_output(
        r#"[[{"label": "TOP", "children": [
                {"label": "NN", "children": [{"label": "Café"}]},
                {"label": "JJ", "children": [{"label": "ok"}]},
                {"label": ".", "children": [{"label": "."}]}
            ]}, [[0, 4], [5, 7], [7, 8]]]]"#,
    );
    convert_offsets(text, &mut sentences, OffsetUnit::Chars).unwrap();
    assert_eq!(sentences[0].tokens, [Token::new(0, 5), Token::new(6, 8), Token::new(8, 9)]);

    let mut past_end = bridge_output(r#"[[{"label": "TOP"}, [[0, 9]]]]"#);
    assert!(matches!(
        convert_offsets(text, &mut past_end, OffsetUnit::Chars),
        Err(ParseError::OffsetOutOfBounds { offset: 9, len: 8 })
    ));
}

#[test]
fn byte_offsets_must_fall_on_char_boundaries() {
    let mut inside = bridge_output(r#"[[{"label": "TOP"}, [[0, 4]]]]"#);
    assert!(matches!(
        convert_offsets("Café", &mut inside, OffsetUnit::Bytes),
        Err(ParseError::OffsetOutOfBounds { offset: 4, len: 5 })
    ));

    let mut whole = bridge_output(r#"[[{"label": "TOP"}, [[0, 5]]]]"#);
    convert_offsets("Café", &mut whole, OffsetUnit::Bytes).unwrap();
    assert_eq!(whole[0].tokens, [Token::new(0, 5)]);
}

#[cfg(unix)]
mod bridge {
    use crate::{CommandParser, OffsetUnit, ParseError, Parser};

    fn shell(script: &str) -> CommandParser {
        CommandParser::new("sh").args(["-c", script])
    }

    #[test]
    fn decodes_bridge_output() {
        let parser = shell(
            r#"cat > /dev/null; echo '[[{"label": "TOP", "children": [{"label": "hi"}]}, [[0, 2]]]]'"#,
        );
        let sentences = parser.parse("hi").unwrap();
        assert_eq!(sentences.len(), 1);
        assert_eq!(sentences[0].tree.to_string(), "(TOP hi)");
    }

    #[test]
    fn converts_char_offsets_from_the_bridge() {
        let parser = shell(
            r#"cat > /dev/null; echo '[[{"label": "TOP", "children": [{"label": "né"}]}, [[0, 2]]]]'"#,
        )
        .offsets(OffsetUnit::Chars);
        let sentences = parser.parse("né").unwrap();
        assert_eq!(sentences[0].tokens[0].end, 3);
    }

    #[test]
    fn bridge_may_answer_while_reading() {
        // `cat` echoes the input, which is itself an empty result padded
        // well past the size of a pipe buffer.
        let text = format!("[]{}", " ".repeat(1 << 20));
        let sentences = CommandParser::new("cat").parse(&text).unwrap();
        assert!(sentences.is_empty());
    }

    #[test]
    fn reports_failing_bridge() {
        let err = shell("echo 'model not found' >&2; exit 3").parse("text").unwrap_err();
        match err {
            ParseError::Failed { status, stderr } => {
                assert_eq!(status.code(), Some(3));
                assert_eq!(stderr, "model not found");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn reports_garbage_output() {
        let err = shell("cat > /dev/null; echo 'Parser loaded successfully'").parse("x").unwrap_err();
        assert!(matches!(err, ParseError::Decode(_)), "{err}");
    }

    #[test]
    fn reports_missing_program() {
        let err = CommandParser::new("semsel-no-such-bridge").parse("x").unwrap_err();
        assert!(matches!(err, ParseError::Unavailable { .. }), "{err}");
    }
}
