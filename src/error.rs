use crate::ast::ItemId;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    #[error("actor index {index} out of range ({len} actors)")]
    ActorOutOfRange { index: usize, len: usize },

    #[error("item index {index} out of range ({len} items)")]
    ItemOutOfRange { index: usize, len: usize },

    #[error("`{field}` does not apply to a {kind} item")]
    FieldMismatch {
        field: &'static str,
        kind: &'static str,
    },

    #[error("diagram has no actors")]
    NoActors,

    #[error("item {item} references actor {index}, but there are only {len} actors")]
    DanglingReference { item: ItemId, index: usize, len: usize },

    #[error("invalid arrow `{0}`, expected dashes followed by `>`")]
    InvalidArrow(String),

    #[error("invalid note position `{0}`, expected `left` or `right`")]
    InvalidPosition(String),

    #[error("diagram width must be a positive finite number, got `{0}`")]
    InvalidWidth(String),

    #[error("line {line_no} is neither a message nor a note: `{text}`")]
    UnrecognizedLine { line_no: usize, text: String },
}
