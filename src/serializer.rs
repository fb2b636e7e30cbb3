use crate::ast::*;

/// Writes one UML line per item, joined by `\n`. Inverse of
/// [`crate::parser::parse_uml`] for labels and text that stay clear of the
/// grammar's delimiters.
pub fn to_uml(model: &Model) -> String {
    model
        .items
        .iter()
        .map(|item| item_line(&model.actors, item))
        .collect::<Vec<_>>()
        .join("\n")
}

/// An item whose actor indices dangle renders as an empty line.
pub fn item_line(actors: &[String], item: &Item) -> String {
    let label = |index: usize| actors.get(index).map(String::as_str);

    match &item.kind {
        ItemKind::Message(m) => match (label(m.from), label(m.to)) {
            (Some(from), Some(to)) => {
                format!("{from}{}{to}: {}", m.effective_style(), m.text)
            }
            _ => dangling(item, actors.len()),
        },
        ItemKind::Note(n) => match label(n.actor) {
            Some(actor) => format!("Note {} of {actor}: {}", n.position, n.text),
            None => dangling(item, actors.len()),
        },
    }
}

fn dangling(item: &Item, len: usize) -> String {
    tracing::warn!(item = %item.id, actors = len, "item references a missing actor");
    String::new()
}
