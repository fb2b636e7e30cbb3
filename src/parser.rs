use std::str::FromStr;

use winnow::prelude::*;
use winnow::combinator::alt;
use winnow::error::ParserError;
use winnow::token::{rest, take_while};

use crate::ast::*;
use crate::error::Error;

/// A non-blank line that matched neither the message nor the note grammar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedLine {
    pub line_no: usize,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ParseOutcome {
    pub model: Model,
    pub skipped: Vec<SkippedLine>,
}

impl ParseOutcome {
    /// Rejects the outcome if any line was skipped.
    pub fn into_strict(self) -> Result<Model, Error> {
        match self.skipped.into_iter().next() {
            Some(line) => Err(Error::UnrecognizedLine {
                line_no: line.line_no,
                text: line.text,
            }),
            None => Ok(self.model),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
enum UmlLine<'s> {
    Message {
        from: &'s str,
        arrow: Arrow,
        to: &'s str,
        text: String,
    },
    Note {
        position: NotePosition,
        actor: &'s str,
        text: String,
    },
}

pub fn parse_uml_text(input: &str) -> Model {
    parse_uml(input).model
}

/// Rebuilds a model from UML text. Lines are independent; unmatched lines are
/// dropped and, unless blank, listed in [`ParseOutcome::skipped`].
pub fn parse_uml(input: &str) -> ParseOutcome {
    let mut actors: Vec<String> = Vec::new();
    let mut items = Vec::new();
    let mut skipped = Vec::new();

    for (index, raw) in input.split('\n').enumerate() {
        let line = raw.strip_suffix('\r').unwrap_or(raw);
        match uml_line.parse(line) {
            Ok(UmlLine::Message {
                from,
                arrow,
                to,
                text,
            }) => {
                let from = intern(&mut actors, from);
                let to = intern(&mut actors, to);
                items.push(Item {
                    id: ItemId(format!("m{index}")),
                    kind: ItemKind::Message(Message {
                        from,
                        to,
                        text,
                        style: Some(arrow),
                    }),
                });
            }
            Ok(UmlLine::Note {
                position,
                actor,
                text,
            }) => {
                let actor = intern(&mut actors, actor);
                items.push(Item {
                    id: ItemId(format!("n{index}")),
                    kind: ItemKind::Note(Note {
                        actor,
                        position,
                        text,
                    }),
                });
            }
            Err(_) if line.trim().is_empty() => {}
            Err(_) => {
                tracing::debug!(line_no = index + 1, line, "line matches no grammar");
                skipped.push(SkippedLine {
                    line_no: index + 1,
                    text: line.to_string(),
                });
            }
        }
    }

    ParseOutcome {
        model: Model { actors, items },
        skipped,
    }
}

/// Index of `label`, appending it on first sight.
fn intern(actors: &mut Vec<String>, label: &str) -> usize {
    match actors.iter().position(|a| a == label) {
        Some(index) => index,
        None => {
            actors.push(label.to_string());
            actors.len() - 1
        }
    }
}

fn uml_line<'s>(input: &mut &'s str) -> winnow::Result<UmlLine<'s>> {
    alt((message_line, note_line)).parse_next(input)
}

fn message_line<'s>(input: &mut &'s str) -> winnow::Result<UmlLine<'s>> {
    let from = identifier.parse_next(input)?;
    let arrow = arrow.parse_next(input)?;
    let to = identifier.parse_next(input)?;
    ":".parse_next(input)?;
    let text = free_text.parse_next(input)?;

    Ok(UmlLine::Message {
        from,
        arrow,
        to,
        text,
    })
}

fn note_line<'s>(input: &mut &'s str) -> winnow::Result<UmlLine<'s>> {
    "Note".parse_next(input)?;
    whitespace1.parse_next(input)?;
    let position = note_position.parse_next(input)?;
    whitespace1.parse_next(input)?;
    "of".parse_next(input)?;
    whitespace1.parse_next(input)?;
    let actor = identifier.parse_next(input)?;
    ":".parse_next(input)?;
    let text = free_text.parse_next(input)?;

    Ok(UmlLine::Note {
        position,
        actor,
        text,
    })
}

fn note_position(input: &mut &str) -> winnow::Result<NotePosition> {
    alt((
        "right".value(NotePosition::Right),
        "left".value(NotePosition::Left),
    ))
    .parse_next(input)
}

fn arrow(input: &mut &str) -> winnow::Result<Arrow> {
    let dashes = take_while(1.., '-').parse_next(input)?;
    let heads = take_while(1.., '>').parse_next(input)?;
    Ok(Arrow {
        dashes: dashes.len(),
        heads: heads.len(),
    })
}

/// Everything after the colon, minus leading whitespace. At least one
/// character is kept, so a whitespace-only tail yields its last character.
/// Line terminators other than `\n` may lead the tail but never appear in
/// the kept text.
fn free_text(input: &mut &str) -> winnow::Result<String> {
    let tail = rest.parse_next(input)?;
    let text = tail.trim_start();
    if !text.is_empty() && !text.contains(is_line_terminator) {
        return Ok(text.to_string());
    }
    match tail.chars().last() {
        Some(last) if text.is_empty() && !is_line_terminator(last) => Ok(last.to_string()),
        _ => Err(ParserError::from_input(input)),
    }
}

fn is_line_terminator(c: char) -> bool {
    matches!(c, '\r' | '\u{2028}' | '\u{2029}')
}

fn whitespace1<'s>(input: &mut &'s str) -> winnow::Result<&'s str> {
    take_while(1.., |c: char| c.is_whitespace()).parse_next(input)
}

fn identifier<'s>(input: &mut &'s str) -> winnow::Result<&'s str> {
    take_while(1.., |c: char| c.is_ascii_alphanumeric() || c == '_').parse_next(input)
}

impl FromStr for Arrow {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        arrow.parse(s).map_err(|_| Error::InvalidArrow(s.to_string()))
    }
}

impl FromStr for NotePosition {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        note_position
            .parse(s)
            .map_err(|_| Error::InvalidPosition(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn message(from: usize, to: usize, text: &str, style: Arrow) -> ItemKind {
        ItemKind::Message(Message {
            from,
            to,
            text: text.to_string(),
            style: Some(style),
        })
    }

    // --- identifier ---

    #[test]
    fn parse_identifier_stops_at_arrow() {
        let mut input = "Alice->>Bob";
        assert_eq!(identifier(&mut input).unwrap(), "Alice");
        assert_eq!(input, "->>Bob");
    }

    #[test]
    fn parse_identifier_rejects_non_ascii() {
        let mut input = "Ünal";
        assert!(identifier(&mut input).is_err());
    }

    // --- arrow ---

    #[test]
    fn parse_arrow_menu_styles() {
        assert_eq!("->".parse::<Arrow>().unwrap(), Arrow::SOLID);
        assert_eq!("-->".parse::<Arrow>().unwrap(), Arrow::DOTTED);
        assert_eq!("->>".parse::<Arrow>().unwrap(), Arrow::ASYNC);
    }

    #[test]
    fn parse_arrow_accepts_longer_runs() {
        let a: Arrow = "--->>".parse().unwrap();
        assert_eq!(a, Arrow { dashes: 3, heads: 2 });
    }

    #[test]
    fn parse_arrow_rejects_malformed_tokens() {
        assert!("-".parse::<Arrow>().is_err());
        assert!(">".parse::<Arrow>().is_err());
        assert!("->-".parse::<Arrow>().is_err());
        assert_eq!(
            "=>".parse::<Arrow>().unwrap_err(),
            Error::InvalidArrow("=>".to_string())
        );
    }

    #[test]
    fn parse_note_position_tokens() {
        assert_eq!("left".parse::<NotePosition>().unwrap(), NotePosition::Left);
        assert_eq!("right".parse::<NotePosition>().unwrap(), NotePosition::Right);
        assert!("over".parse::<NotePosition>().is_err());
    }

    // --- free text ---

    #[test]
    fn free_text_strips_leading_whitespace_only() {
        let mut input = "   Hello there  ";
        assert_eq!(free_text(&mut input).unwrap(), "Hello there  ");
    }

    #[test]
    fn free_text_keeps_one_char_of_blank_tail() {
        let mut input = "   ";
        assert_eq!(free_text(&mut input).unwrap(), " ");
    }

    #[test]
    fn free_text_rejects_embedded_line_terminators() {
        for tail in ["hi\rthere", "a\u{2028}b", "end\u{2029}", "  \r"] {
            let mut input = tail;
            assert!(free_text(&mut input).is_err(), "accepted {tail:?}");
        }
    }

    #[test]
    fn free_text_skips_leading_line_separator() {
        let mut input = "\u{2028}hi";
        assert_eq!(free_text(&mut input).unwrap(), "hi");
    }

    #[test]
    fn free_text_requires_something() {
        let mut input = "";
        assert!(free_text(&mut input).is_err());
    }

    // --- lines ---

    #[test]
    fn parse_single_message() {
        let model = parse_uml_text("Alice->Bob: Hi");
        assert_eq!(model.actors, vec!["Alice", "Bob"]);
        assert_eq!(model.items.len(), 1);
        assert_eq!(model.items[0].kind, message(0, 1, "Hi", Arrow::SOLID));
        assert_eq!(model.items[0].id.as_str(), "m0");
    }

    #[test]
    fn parse_message_then_note() {
        let model = parse_uml_text("Alice->>Bob: Hi\nNote right of Alice: thinking");
        assert_eq!(model.actors, vec!["Alice", "Bob"]);
        assert_eq!(model.items[0].kind, message(0, 1, "Hi", Arrow::ASYNC));
        assert_eq!(
            model.items[1].kind,
            ItemKind::Note(Note {
                actor: 0,
                position: NotePosition::Right,
                text: "thinking".to_string(),
            })
        );
        assert_eq!(model.items[1].id.as_str(), "n1");
    }

    #[test]
    fn parse_text_keeps_embedded_colons() {
        let model = parse_uml_text("A->B: time: 10:30");
        assert_eq!(model.items[0].kind, message(0, 1, "time: 10:30", Arrow::SOLID));
    }

    #[test]
    fn parse_random_text_yields_nothing() {
        let outcome = parse_uml("random text");
        assert!(outcome.model.is_empty());
        assert_eq!(
            outcome.skipped,
            vec![SkippedLine {
                line_no: 1,
                text: "random text".to_string()
            }]
        );
    }

    #[test]
    fn parse_empty_input_yields_empty_model() {
        let outcome = parse_uml("");
        assert!(outcome.model.is_empty());
        assert!(outcome.skipped.is_empty());
    }

    #[test]
    fn parse_blank_lines_are_not_reported_but_count_for_ids() {
        let outcome = parse_uml("A->B: one\n\n   \nB-->A: two");
        assert!(outcome.skipped.is_empty());
        let ids: Vec<&str> = outcome.model.items.iter().map(|i| i.id.as_str()).collect();
        assert_eq!(ids, vec!["m0", "m3"]);
    }

    #[test]
    fn parse_rejects_spaces_around_arrow_and_indentation() {
        let outcome = parse_uml("A -> B: spaced\n  A->B: indented\nA->B : before colon");
        assert!(outcome.model.is_empty());
        let lines: Vec<usize> = outcome.skipped.iter().map(|s| s.line_no).collect();
        assert_eq!(lines, vec![1, 2, 3]);
    }

    #[test]
    fn parse_requires_text_after_colon() {
        let outcome = parse_uml("A->B:");
        assert!(outcome.model.is_empty());
        assert_eq!(outcome.skipped.len(), 1);
    }

    #[test]
    fn parse_note_with_tabs() {
        let model = parse_uml_text("Note\tleft\tof\tBob:\tsleepy");
        assert_eq!(model.actors, vec!["Bob"]);
        assert_eq!(
            model.items[0].kind,
            ItemKind::Note(Note {
                actor: 0,
                position: NotePosition::Left,
                text: "sleepy".to_string(),
            })
        );
    }

    #[test]
    fn parse_note_over_is_not_supported() {
        let outcome = parse_uml("Note over Alice: centered");
        assert!(outcome.model.items.is_empty());
        assert_eq!(outcome.skipped.len(), 1);
    }

    #[test]
    fn message_grammar_wins_over_note_grammar() {
        let model = parse_uml_text("Note->Bob: hello");
        assert_eq!(model.actors, vec!["Note", "Bob"]);
        assert_eq!(model.items[0].id.as_str(), "m0");
    }

    #[test]
    fn parse_actor_order_is_first_occurrence() {
        let input = "\
C->B: one
B->A: two
A->C: three
C->C: four";
        let model = parse_uml_text(input);
        assert_eq!(model.actors, vec!["C", "B", "A"]);
        assert_eq!(model.items[1].kind, message(1, 2, "two", Arrow::SOLID));
        assert_eq!(model.items[3].kind, message(0, 0, "four", Arrow::SOLID));
    }

    #[test]
    fn parse_tolerates_crlf() {
        let model = parse_uml_text("A->B: one\r\nB->A: two\r\n");
        assert_eq!(model.items.len(), 2);
        assert_eq!(model.items[0].kind, message(0, 1, "one", Arrow::SOLID));
    }

    #[test]
    fn parse_drops_line_with_inner_carriage_return() {
        let outcome = parse_uml("A->B: hi\rthere\nA->B: ok");
        assert_eq!(outcome.model.items.len(), 1);
        assert_eq!(outcome.model.items[0].kind, message(0, 1, "ok", Arrow::SOLID));
        assert_eq!(outcome.skipped[0].line_no, 1);
    }

    #[test]
    fn into_strict_reports_first_skipped_line() {
        let err = parse_uml("A->B: ok\n%% comment\nnope")
            .into_strict()
            .unwrap_err();
        assert_eq!(
            err,
            Error::UnrecognizedLine {
                line_no: 2,
                text: "%% comment".to_string()
            }
        );
    }

    #[test]
    fn into_strict_accepts_clean_input() {
        let model = parse_uml("A->B: ok").into_strict().unwrap();
        assert_eq!(model.actors, vec!["A", "B"]);
    }
}
