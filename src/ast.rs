use std::fmt;

use crate::error::Error;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Model {
    pub actors: Vec<String>,
    pub items: Vec<Item>,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ItemId(pub String);

impl ItemId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Item {
    pub id: ItemId,
    pub kind: ItemKind,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ItemKind {
    Message(Message),
    Note(Note),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    pub from: usize,
    pub to: usize,
    pub text: String,
    /// `None` is an unspecified style; it serializes as [`Arrow::ASYNC`].
    pub style: Option<Arrow>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Note {
    pub actor: usize,
    pub position: NotePosition,
    pub text: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotePosition {
    Left,
    Right,
}

/// Arrow token shape: a run of dashes followed by a run of closing angle brackets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Arrow {
    pub dashes: usize,
    pub heads: usize,
}

impl Arrow {
    pub const SOLID: Arrow = Arrow { dashes: 1, heads: 1 };
    pub const DOTTED: Arrow = Arrow { dashes: 2, heads: 1 };
    pub const ASYNC: Arrow = Arrow { dashes: 1, heads: 2 };

    /// Styles offered by the editor, in menu order.
    pub const MENU: [Arrow; 3] = [Arrow::SOLID, Arrow::DOTTED, Arrow::ASYNC];

    pub fn is_dotted(&self) -> bool {
        self.dashes >= 2
    }

    pub fn is_filled(&self) -> bool {
        self.heads >= 2
    }
}

impl Default for Arrow {
    fn default() -> Self {
        Arrow::ASYNC
    }
}

impl fmt::Display for Arrow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for _ in 0..self.dashes {
            f.write_str("-")?;
        }
        for _ in 0..self.heads {
            f.write_str(">")?;
        }
        Ok(())
    }
}

impl fmt::Display for NotePosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NotePosition::Left => f.write_str("left"),
            NotePosition::Right => f.write_str("right"),
        }
    }
}

impl Message {
    pub fn effective_style(&self) -> Arrow {
        self.style.unwrap_or_default()
    }
}

impl ItemKind {
    pub fn name(&self) -> &'static str {
        match self {
            ItemKind::Message(_) => "message",
            ItemKind::Note(_) => "note",
        }
    }

    /// Actor indices this item points at.
    pub fn actor_refs(&self) -> Vec<usize> {
        match self {
            ItemKind::Message(m) => vec![m.from, m.to],
            ItemKind::Note(n) => vec![n.actor],
        }
    }
}

impl Model {
    pub fn new(actors: Vec<String>, items: Vec<Item>) -> Self {
        Self { actors, items }
    }

    /// The diagram a fresh editor starts with.
    pub fn seed() -> Self {
        let message = |id: &str, from, to, text: &str, style| Item {
            id: ItemId::new(id),
            kind: ItemKind::Message(Message {
                from,
                to,
                text: text.to_string(),
                style,
            }),
        };
        Self {
            actors: vec!["Man 👨🏻‍🦱".to_string(), "Woman 👩🏼‍🦰".to_string()],
            items: vec![
                message("1", 0, 1, "Hi, how are you?", None),
                Item {
                    id: ItemId::new("2"),
                    kind: ItemKind::Note(Note {
                        actor: 1,
                        position: NotePosition::Right,
                        text: "Woman thinks...".to_string(),
                    }),
                },
                message("3", 1, 0, "I am fine, How are you?", Some(Arrow::DOTTED)),
                message("4", 0, 1, "I am good thanks!", Some(Arrow::ASYNC)),
            ],
        }
    }

    pub fn is_empty(&self) -> bool {
        self.actors.is_empty() && self.items.is_empty()
    }

    pub fn actor(&self, index: usize) -> Option<&str> {
        self.actors.get(index).map(String::as_str)
    }

    /// Checks that every item references an existing actor.
    pub fn validate(&self) -> Result<(), Error> {
        for item in &self.items {
            if let Some(&index) = item
                .kind
                .actor_refs()
                .iter()
                .find(|&&i| i >= self.actors.len())
            {
                return Err(Error::DanglingReference {
                    item: item.id.clone(),
                    index,
                    len: self.actors.len(),
                });
            }
        }
        Ok(())
    }

    /// Same actors and item contents in the same order, ignoring item ids.
    pub fn equivalent(&self, other: &Model) -> bool {
        self.actors == other.actors
            && self.items.len() == other.items.len()
            && self
                .items
                .iter()
                .zip(&other.items)
                .all(|(a, b)| kinds_equivalent(&a.kind, &b.kind))
    }
}

fn kinds_equivalent(a: &ItemKind, b: &ItemKind) -> bool {
    match (a, b) {
        (ItemKind::Message(a), ItemKind::Message(b)) => {
            a.from == b.from
                && a.to == b.to
                && a.text == b.text
                && a.effective_style() == b.effective_style()
        }
        (ItemKind::Note(a), ItemKind::Note(b)) => a == b,
        _ => false,
    }
}
