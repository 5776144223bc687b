use crate::domain::{id::Id, item::Item, lane::Lane, ordered::OrderedList};
use crate::error::Result;
use serde::{Deserialize, Serialize};

/// Copy of the entity being dragged.
///
/// Held by value so an overlay can keep rendering it while the live
/// sequences are being rearranged underneath.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "entity", rename_all = "lowercase")]
pub enum ActiveDrag {
    Lane(Lane),
    Item(Item),
}

impl ActiveDrag {
    pub fn id(&self) -> Id {
        match self {
            Self::Lane(lane) => lane.id,
            Self::Item(item) => item.id,
        }
    }
}

/// What an id on the board refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    Lane,
    Item,
}

/// Authoritative board state.
///
/// Sequences are only ever replaced wholesale through the crate-internal
/// setters, so a reader never sees a half-applied change. Replacing one
/// sequence leaves the other (and its allocation) untouched.
#[derive(Debug, Clone, Default)]
pub struct BoardState {
    lanes: OrderedList<Lane>,
    items: OrderedList<Item>,
    active: Option<ActiveDrag>,
    editing: Option<Id>,
    revision: u64,
}

impl BoardState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lanes(&self) -> &OrderedList<Lane> {
        &self.lanes
    }

    pub fn items(&self) -> &OrderedList<Item> {
        &self.items
    }

    pub fn active(&self) -> Option<&ActiveDrag> {
        self.active.as_ref()
    }

    /// Entity currently in inline-edit mode
    pub fn editing(&self) -> Option<Id> {
        self.editing
    }

    /// Incremented on every change
    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn lane(&self, id: Id) -> Option<&Lane> {
        self.lanes.find(id)
    }

    pub fn item(&self, id: Id) -> Option<&Item> {
        self.items.find(id)
    }

    pub fn kind_of(&self, id: Id) -> Option<EntityKind> {
        if self.lanes.contains(id) {
            Some(EntityKind::Lane)
        } else if self.items.contains(id) {
            Some(EntityKind::Item)
        } else {
            None
        }
    }

    /// True when `id` is taken by a lane or an item
    pub fn contains(&self, id: Id) -> bool {
        self.kind_of(id).is_some()
    }

    pub fn snapshot(&self) -> BoardSnapshot {
        BoardSnapshot {
            revision: self.revision,
            lanes: self.lanes.clone(),
            items: self.items.clone(),
            active: self.active.clone(),
            editing: self.editing,
        }
    }

    pub(crate) fn set_lanes(&mut self, lanes: OrderedList<Lane>) {
        self.lanes = lanes;
        self.bump();
    }

    pub(crate) fn set_items(&mut self, items: OrderedList<Item>) {
        self.items = items;
        self.bump();
    }

    pub(crate) fn set_active(&mut self, active: Option<ActiveDrag>) {
        if self.active != active {
            self.active = active;
            self.bump();
        }
    }

    pub(crate) fn set_editing(&mut self, editing: Option<Id>) {
        if self.editing != editing {
            self.editing = editing;
            self.bump();
        }
    }

    fn bump(&mut self) {
        self.revision += 1;
    }
}

/// Read-only view of the board handed to the render layer
#[derive(Debug, Clone, Serialize)]
pub struct BoardSnapshot {
    pub revision: u64,
    pub lanes: OrderedList<Lane>,
    pub items: OrderedList<Item>,
    pub active: Option<ActiveDrag>,
    pub editing: Option<Id>,
}

impl BoardSnapshot {
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}

impl Default for BoardSnapshot {
    fn default() -> Self {
        BoardState::default().snapshot()
    }
}
