use crate::config::BoardConfig;
use crate::domain::{
    drag::{DragController, DragOutcome, DragPhase, DragSubject, GestureEvent},
    id::{Id, IdGenerator},
    item::Item,
    lane::Lane,
    state::{BoardSnapshot, BoardState},
};
use std::fmt;
use tracing::{debug, warn};

/// Kanban board: the state store plus everything allowed to change it.
///
/// Lanes and items are created, edited and deleted through the methods
/// below; ordering and lane membership change only through gesture events.
/// None of these operations fail. An unknown id makes the call a no-op and
/// the return value says whether anything changed.
pub struct Board {
    config: BoardConfig,
    state: BoardState,
    ids: Box<dyn IdGenerator>,
    drag: DragController,
}

impl Board {
    pub fn new(config: BoardConfig) -> Self {
        let ids = config.ids.generator();
        Self::with_id_generator(config, ids)
    }

    /// Builds a board drawing ids from `ids` instead of the configured strategy
    pub fn with_id_generator(config: BoardConfig, ids: Box<dyn IdGenerator>) -> Self {
        let initial_lanes = config.initial_lanes.clone();
        let mut board = Self {
            drag: DragController::new(config.lane_drop),
            config,
            state: BoardState::new(),
            ids,
        };
        for title in initial_lanes {
            let id = board.create_lane();
            board.rename_lane(id, title);
        }
        board
    }

    pub fn config(&self) -> &BoardConfig {
        &self.config
    }

    pub fn state(&self) -> &BoardState {
        &self.state
    }

    pub fn snapshot(&self) -> BoardSnapshot {
        self.state.snapshot()
    }

    pub fn drag_phase(&self) -> &DragPhase {
        self.drag.phase()
    }

    fn next_id(&mut self) -> Id {
        let state = &self.state;
        self.ids.next_id(&|id| state.contains(id))
    }

    /// Appends a lane titled `"<prefix> N"` where N is the lane count plus one
    pub fn create_lane(&mut self) -> Id {
        let id = self.next_id();
        let title = format!(
            "{} {}",
            self.config.lane_title_prefix,
            self.state.lanes().len() + 1
        );
        debug!(%id, %title, "lane created");

        let lanes = self.state.lanes().pushed(Lane::new(id, title));
        self.state.set_lanes(lanes);
        id
    }

    /// Removes the lane and every item in it
    pub fn delete_lane(&mut self, id: Id) -> bool {
        let Some(lanes) = self.state.lanes().retained(|lane| lane.id != id) else {
            return false;
        };
        let cascaded = self.state.items().retained(|item| !item.belongs_to(id));

        if let Some(editing) = self.state.editing() {
            let orphaned = editing == id
                || self
                    .state
                    .item(editing)
                    .is_some_and(|item| item.belongs_to(id));
            if orphaned {
                self.state.set_editing(None);
            }
        }

        let removed_items = cascaded
            .as_ref()
            .map(|items| self.state.items().len() - items.len())
            .unwrap_or(0);
        debug!(%id, removed_items, "lane deleted");

        self.state.set_lanes(lanes);
        if let Some(items) = cascaded {
            self.state.set_items(items);
        }
        true
    }

    pub fn rename_lane(&mut self, id: Id, title: impl Into<String>) -> bool {
        let title = title.into();
        let Some(lanes) = self.state.lanes().replaced(id, |lane| lane.with_title(title)) else {
            return false;
        };
        debug!(%id, "lane renamed");
        self.state.set_lanes(lanes);
        true
    }

    /// Appends an item titled `"<prefix> N"` where N is the total item count
    /// plus one.
    ///
    /// Returns `None` only when `validate_item_lane` is set and `lane_id` is
    /// not on the board.
    pub fn create_item(&mut self, lane_id: Id) -> Option<Id> {
        if !self.state.lanes().contains(lane_id) {
            if self.config.validate_item_lane {
                warn!(%lane_id, "item not created, lane does not exist");
                return None;
            }
            warn!(%lane_id, "creating item for a lane that does not exist");
        }

        let id = self.next_id();
        let content = format!(
            "{} {}",
            self.config.item_content_prefix,
            self.state.items().len() + 1
        );
        debug!(%id, %lane_id, %content, "item created");

        let items = self.state.items().pushed(Item::new(id, lane_id, content));
        self.state.set_items(items);
        Some(id)
    }

    pub fn delete_item(&mut self, id: Id) -> bool {
        let Some(items) = self.state.items().retained(|item| item.id != id) else {
            return false;
        };
        if self.state.editing() == Some(id) {
            self.state.set_editing(None);
        }
        debug!(%id, "item deleted");
        self.state.set_items(items);
        true
    }

    pub fn edit_item(&mut self, id: Id, content: impl Into<String>) -> bool {
        let content = content.into();
        let Some(items) = self.state.items().replaced(id, |item| item.with_content(content)) else {
            return false;
        };
        debug!(%id, "item edited");
        self.state.set_items(items);
        true
    }

    /// Puts a lane or item into inline-edit mode, which makes it undraggable
    pub fn begin_edit(&mut self, id: Id) -> bool {
        if !self.state.contains(id) {
            return false;
        }
        self.state.set_editing(Some(id));
        true
    }

    /// Leaves inline-edit mode (blur or Enter)
    pub fn end_edit(&mut self) -> bool {
        let was_editing = self.state.editing().is_some();
        self.state.set_editing(None);
        was_editing
    }

    pub fn apply(&mut self, event: GestureEvent) -> DragOutcome {
        self.drag.handle(&mut self.state, event)
    }

    pub fn drag_start(&mut self, subject: DragSubject) -> DragOutcome {
        self.drag.drag_start(&mut self.state, subject)
    }

    pub fn drag_over(&mut self, active: Id, over: Option<Id>) -> DragOutcome {
        self.drag.drag_over(&mut self.state, active, over)
    }

    pub fn drag_end(&mut self, active: Id, over: Option<Id>) -> DragOutcome {
        self.drag.drag_end(&mut self.state, active, over)
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new(BoardConfig::default())
    }
}

impl fmt::Debug for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Board")
            .field("config", &self.config)
            .field("state", &self.state)
            .field("drag", &self.drag)
            .finish_non_exhaustive()
    }
}
