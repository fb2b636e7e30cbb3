use crate::ast::*;
use crate::error::Error;
use crate::parser::{SkippedLine, parse_uml};
use crate::serializer::to_uml;

/// One field change on an existing item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ItemUpdate {
    From(usize),
    To(usize),
    Style(Arrow),
    Actor(usize),
    Position(NotePosition),
    Text(String),
}

impl ItemUpdate {
    fn field(&self) -> &'static str {
        match self {
            ItemUpdate::From(_) => "from",
            ItemUpdate::To(_) => "to",
            ItemUpdate::Style(_) => "style",
            ItemUpdate::Actor(_) => "actor",
            ItemUpdate::Position(_) => "position",
            ItemUpdate::Text(_) => "text",
        }
    }
}

/// Owns the diagram and applies user actions to it.
#[derive(Debug, Clone)]
pub struct Editor {
    model: Model,
    next_id: u64,
    dragged: Option<usize>,
}

impl Default for Editor {
    fn default() -> Self {
        Self::new()
    }
}

impl Editor {
    pub fn new() -> Self {
        let model = Model::seed();
        Self {
            next_id: next_free_id(&model),
            model,
            dragged: None,
        }
    }

    pub fn with_model(model: Model) -> Result<Self, Error> {
        model.validate()?;
        Ok(Self {
            next_id: next_free_id(&model),
            model,
            dragged: None,
        })
    }

    pub fn model(&self) -> &Model {
        &self.model
    }

    pub fn into_model(self) -> Model {
        self.model
    }

    pub fn uml_text(&self) -> String {
        to_uml(&self.model)
    }

    /// Replaces the whole model with the parse of `text`.
    pub fn apply_uml(&mut self, text: &str) -> Vec<SkippedLine> {
        let outcome = parse_uml(text);
        for line in &outcome.skipped {
            tracing::warn!(line_no = line.line_no, text = %line.text, "skipped unrecognized UML line");
        }
        tracing::debug!(
            actors = outcome.model.actors.len(),
            items = outcome.model.items.len(),
            "model replaced from UML text"
        );
        self.model = outcome.model;
        self.dragged = None;
        outcome.skipped
    }

    pub fn add_actor(&mut self) -> usize {
        let label = format!("Actor{}", self.model.actors.len() + 1);
        tracing::debug!(%label, "add actor");
        self.model.actors.push(label);
        self.model.actors.len() - 1
    }

    /// Removes an actor, dropping the items that reference it and shifting
    /// higher indices down by one.
    pub fn remove_actor(&mut self, index: usize) -> Result<String, Error> {
        self.check_actor(index)?;
        let removed = self.model.actors.remove(index);
        let shift = |i: usize| if i > index { i - 1 } else { i };

        self.model.items.retain(|item| !item.kind.actor_refs().contains(&index));
        for item in &mut self.model.items {
            match &mut item.kind {
                ItemKind::Message(m) => {
                    m.from = shift(m.from);
                    m.to = shift(m.to);
                }
                ItemKind::Note(n) => n.actor = shift(n.actor),
            }
        }
        self.dragged = None;
        tracing::debug!(index, label = %removed, items = self.model.items.len(), "remove actor");
        Ok(removed)
    }

    pub fn rename_actor(&mut self, index: usize, label: impl Into<String>) -> Result<(), Error> {
        self.check_actor(index)?;
        self.model.actors[index] = label.into();
        tracing::debug!(index, "rename actor");
        Ok(())
    }

    pub fn add_message(&mut self) -> Result<ItemId, Error> {
        if self.model.actors.is_empty() {
            return Err(Error::NoActors);
        }
        let to = usize::from(self.model.actors.len() > 1);
        let kind = ItemKind::Message(Message {
            from: 0,
            to,
            text: "New Message".to_string(),
            style: Some(Arrow::SOLID),
        });
        Ok(self.push_item(kind))
    }

    pub fn add_note(&mut self) -> Result<ItemId, Error> {
        if self.model.actors.is_empty() {
            return Err(Error::NoActors);
        }
        let kind = ItemKind::Note(Note {
            actor: 0,
            position: NotePosition::Right,
            text: "New Note".to_string(),
        });
        Ok(self.push_item(kind))
    }

    pub fn update_item(&mut self, index: usize, update: ItemUpdate) -> Result<(), Error> {
        self.check_item(index)?;
        if let ItemUpdate::From(a) | ItemUpdate::To(a) | ItemUpdate::Actor(a) = update {
            self.check_actor(a)?;
        }

        let field = update.field();
        let kind = &mut self.model.items[index].kind;
        let kind_name = kind.name();
        match (kind, update) {
            (ItemKind::Message(m), ItemUpdate::From(a)) => m.from = a,
            (ItemKind::Message(m), ItemUpdate::To(a)) => m.to = a,
            (ItemKind::Message(m), ItemUpdate::Style(s)) => m.style = Some(s),
            (ItemKind::Message(m), ItemUpdate::Text(t)) => m.text = t,
            (ItemKind::Note(n), ItemUpdate::Actor(a)) => n.actor = a,
            (ItemKind::Note(n), ItemUpdate::Position(p)) => n.position = p,
            (ItemKind::Note(n), ItemUpdate::Text(t)) => n.text = t,
            _ => {
                return Err(Error::FieldMismatch {
                    field,
                    kind: kind_name,
                });
            }
        }
        tracing::debug!(index, field, "update item");
        Ok(())
    }

    pub fn delete_item(&mut self, index: usize) -> Result<Item, Error> {
        self.check_item(index)?;
        let item = self.model.items.remove(index);
        self.dragged = None;
        tracing::debug!(index, id = %item.id, "delete item");
        Ok(item)
    }

    pub fn move_item(&mut self, from: usize, to: usize) -> Result<(), Error> {
        self.check_item(from)?;
        self.check_item(to)?;
        if from != to {
            let item = self.model.items.remove(from);
            self.model.items.insert(to, item);
            tracing::debug!(from, to, "move item");
        }
        Ok(())
    }

    pub fn begin_drag(&mut self, index: usize) -> Result<(), Error> {
        self.check_item(index)?;
        self.dragged = Some(index);
        Ok(())
    }

    /// Moves the dragged item onto `index`. Returns whether the order changed.
    pub fn drag_over(&mut self, index: usize) -> Result<bool, Error> {
        let Some(dragged) = self.dragged else {
            return Ok(false);
        };
        if dragged == index {
            return Ok(false);
        }
        self.move_item(dragged, index)?;
        self.dragged = Some(index);
        Ok(true)
    }

    pub fn end_drag(&mut self) {
        self.dragged = None;
    }

    pub fn dragged(&self) -> Option<usize> {
        self.dragged
    }

    fn push_item(&mut self, kind: ItemKind) -> ItemId {
        let id = loop {
            let candidate = ItemId(self.next_id.to_string());
            self.next_id = self.next_id.checked_add(1).unwrap_or(1);
            if !self.model.items.iter().any(|item| item.id == candidate) {
                break candidate;
            }
        };
        tracing::debug!(%id, kind = kind.name(), "add item");
        self.model.items.push(Item {
            id: id.clone(),
            kind,
        });
        id
    }

    fn check_actor(&self, index: usize) -> Result<(), Error> {
        let len = self.model.actors.len();
        if index < len {
            Ok(())
        } else {
            Err(Error::ActorOutOfRange { index, len })
        }
    }

    fn check_item(&self, index: usize) -> Result<(), Error> {
        let len = self.model.items.len();
        if index < len {
            Ok(())
        } else {
            Err(Error::ItemOutOfRange { index, len })
        }
    }
}

/// First counter value above every numeric id already in `model`. Ids at
/// `u64::MAX` have no successor and are left to the collision check in
/// `push_item`.
fn next_free_id(model: &Model) -> u64 {
    model
        .items
        .iter()
        .filter_map(|item| item.id.as_str().parse::<u64>().ok())
        .filter_map(|n| n.checked_add(1))
        .max()
        .unwrap_or(1)
}
