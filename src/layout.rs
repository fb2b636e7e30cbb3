use crate::ast::*;
use crate::error::Error;

/// Rendering knobs for the SVG diagram.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SvgOptions {
    pub width: f64,
}

impl SvgOptions {
    pub fn with_width(width: f64) -> Result<Self, Error> {
        if width.is_finite() && width > 0.0 {
            Ok(Self { width })
        } else {
            Err(Error::InvalidWidth(width.to_string()))
        }
    }
}

impl Default for SvgOptions {
    fn default() -> Self {
        Self { width: 800.0 }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Layout {
    pub width: f64,
    pub height: f64,
    pub actors: Vec<ActorLayout>,
    pub rows: Vec<Row>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ActorLayout {
    pub label: String,
    pub box_x: f64,
    pub center_x: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Row {
    Message(MessageRow),
    Note(NoteRow),
}

#[derive(Debug, Clone, PartialEq)]
pub struct MessageRow {
    pub y: f64,
    pub start_x: f64,
    pub end_x: f64,
    pub text: String,
    pub arrow: Arrow,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NoteRow {
    pub y: f64,
    pub center_x: f64,
    pub lines: Vec<String>,
}

pub const BOX_TOP: f64 = 10.0;
pub const BOX_INSET: f64 = 10.0;
pub const BOX_WIDTH: f64 = 80.0;
pub const BOX_HEIGHT: f64 = 40.0;
pub const LABEL_Y: f64 = 35.0;
pub const LIFELINE_TOP: f64 = 50.0;
pub const NOTE_WIDTH: f64 = 80.0;
pub const NOTE_HEIGHT: f64 = 40.0;
pub const TEXT_RAISE: f64 = 10.0;

const HEADER_HEIGHT: f64 = 100.0;
const ROW_PITCH: f64 = 50.0;
const FIRST_ROW_Y: f64 = 75.0;
const CENTER_OFFSET: f64 = 50.0;
const NOTE_OFFSET: f64 = 70.0;

/// Fixed-pitch placement: actors share the width evenly, items stack one row
/// each in model order.
pub fn compute(model: &Model, options: &SvgOptions) -> Layout {
    let height = HEADER_HEIGHT + model.items.len() as f64 * ROW_PITCH;
    let actor_width = if model.actors.is_empty() {
        options.width
    } else {
        options.width / model.actors.len() as f64
    };
    let center = |index: usize| index as f64 * actor_width + CENTER_OFFSET;

    let actors = model
        .actors
        .iter()
        .enumerate()
        .map(|(i, label)| ActorLayout {
            label: label.clone(),
            box_x: i as f64 * actor_width + BOX_INSET,
            center_x: center(i),
        })
        .collect();

    let mut rows = Vec::new();
    for (k, item) in model.items.iter().enumerate() {
        let y = FIRST_ROW_Y + k as f64 * ROW_PITCH;
        let in_range = item
            .kind
            .actor_refs()
            .iter()
            .all(|&i| i < model.actors.len());
        if !in_range {
            tracing::warn!(item = %item.id, "not drawing item with a missing actor");
            continue;
        }

        match &item.kind {
            ItemKind::Message(m) => rows.push(Row::Message(MessageRow {
                y,
                start_x: center(m.from),
                end_x: center(m.to),
                text: m.text.clone(),
                arrow: m.effective_style(),
            })),
            ItemKind::Note(n) => {
                let offset = match n.position {
                    NotePosition::Right => NOTE_OFFSET,
                    NotePosition::Left => -NOTE_OFFSET,
                };
                rows.push(Row::Note(NoteRow {
                    y,
                    center_x: n.actor as f64 * actor_width + offset,
                    lines: n.text.split('\n').map(str::to_string).collect(),
                }));
            }
        }
    }

    Layout {
        width: options.width,
        height,
        actors,
        rows,
    }
}
