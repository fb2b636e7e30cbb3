pub mod ast;
pub mod display_width;
pub mod editor;
pub mod error;
pub mod layout;
pub mod panel;
pub mod parser;
pub mod renderer;
pub mod serializer;

pub use ast::{Arrow, Item, ItemId, ItemKind, Message, Model, Note, NotePosition};
pub use editor::{Editor, ItemUpdate};
pub use error::Error;
pub use layout::SvgOptions;
pub use parser::{ParseOutcome, SkippedLine, parse_uml, parse_uml_text};
pub use serializer::to_uml;

pub fn render_svg(input: &str) -> String {
    render_svg_with_options(input, &SvgOptions::default())
}

/// Parses UML text and draws it; unrecognized lines are left out.
pub fn render_svg_with_options(input: &str, options: &SvgOptions) -> String {
    let model = parse_uml_text(input);
    render_model_svg(&model, options)
}

pub fn render_model_svg(model: &Model, options: &SvgOptions) -> String {
    renderer::render(&layout::compute(model, options))
}
