use crate::ast::*;
use crate::display_width::{max_width, pad_right};

const HANDLE: char = '≡';
const STYLE_COLUMN: usize = 3;
const POSITION_COLUMN: usize = 5;
const MISSING: &str = "?";

/// Text rendition of the editing form: actor chips on the first line, then
/// one draggable row per item with actor columns aligned by display width.
pub fn render(model: &Model) -> String {
    let mut lines = vec![actor_chips(&model.actors)];

    let label_width = max_width(model.actors.iter().map(String::as_str).chain([MISSING]));
    let index_width = model.items.len().saturating_sub(1).to_string().len();
    let label = |index: usize| pad_right(model.actor(index).unwrap_or(MISSING), label_width);

    for (k, item) in model.items.iter().enumerate() {
        let row = match &item.kind {
            ItemKind::Message(m) => format!(
                "{HANDLE} {k:>index_width$}  {} {} {}  {}",
                label(m.from),
                pad_right(&m.effective_style().to_string(), STYLE_COLUMN),
                label(m.to),
                one_line(&m.text)
            ),
            ItemKind::Note(n) => format!(
                "{HANDLE} {k:>index_width$}  {} note {}  {}",
                label(n.actor),
                pad_right(&n.position.to_string(), POSITION_COLUMN),
                one_line(&n.text)
            ),
        };
        lines.push(row.trim_end().to_string());
    }

    lines.join("\n")
}

fn actor_chips(actors: &[String]) -> String {
    if actors.is_empty() {
        return "(no actors)".to_string();
    }
    actors
        .iter()
        .enumerate()
        .map(|(i, label)| format!("[{i}] {label}"))
        .collect::<Vec<_>>()
        .join("  ")
}

fn one_line(text: &str) -> String {
    text.replace('\n', "\\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::display_width::display_width;
    use crate::parser::parse_uml_text;
    use pretty_assertions::assert_eq;

    #[test]
    fn panel_empty_model() {
        assert_eq!(render(&Model::default()), "(no actors)");
    }

    #[test]
    fn panel_aligns_wide_labels() {
        let mut model = parse_uml_text("A->Bob: hi\nNote right of Bob: thinking");
        model.actors[0] = "テスト".to_string();
        let expected = "\
[0] テスト  [1] Bob
≡ 0  テスト ->  Bob     hi
≡ 1  Bob    note right  thinking";
        assert_eq!(render(&model), expected);
    }

    #[test]
    fn panel_text_column_lines_up_across_messages() {
        let model = parse_uml_text("Alice->Bob: one\nBob-->>Alice: two\nAlice->>Alice: three");
        let output = render(&model);
        let columns: Vec<usize> = output
            .lines()
            .skip(1)
            .map(|line| {
                let at = line.rfind(' ').unwrap();
                display_width(&line[..at])
            })
            .collect();
        assert_eq!(columns, vec![columns[0]; 3]);
    }

    #[test]
    fn panel_pads_index_column() {
        let text = (0..11)
            .map(|i| format!("A->B: m{i}"))
            .collect::<Vec<_>>()
            .join("\n");
        let output = render(&parse_uml_text(&text));
        let rows: Vec<&str> = output.lines().skip(1).collect();
        assert!(rows[0].starts_with("≡  0  A"));
        assert!(rows[10].starts_with("≡ 10  A"));
    }

    #[test]
    fn panel_marks_missing_actor_and_flattens_newlines() {
        let mut model = parse_uml_text("Note left of A: x");
        if let ItemKind::Note(n) = &mut model.items[0].kind {
            n.actor = 4;
            n.text = "a\nb".to_string();
        }
        let output = render(&model);
        assert_eq!(output.lines().nth(1), Some("≡ 0  ? note left   a\\nb"));
    }
}
