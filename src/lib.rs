//! # Laneboard Core
//!
//! State and reordering logic for a kanban board whose lanes and items are
//! rearranged by pointer drag.
//!
//! The crate owns the ordered lane and item sequences, the CRUD operations
//! over them and the drag lifecycle that rewrites ordering and lane
//! membership while a gesture is in progress. Rendering and pointer input
//! stay outside: the gesture source feeds [`GestureEvent`]s in and the render
//! layer reads [`BoardSnapshot`]s out.

pub mod config;
pub mod domain;
pub mod error;
pub mod runtime;

// Re-export commonly used types
pub use config::{BoardConfig, IdStrategy};
pub use domain::{
    board::Board,
    drag::{DragOutcome, DragSubject, GestureEvent, LaneDropPolicy},
    id::Id,
    item::Item,
    lane::Lane,
    state::{ActiveDrag, BoardSnapshot},
    view::BoardView,
};
pub use error::{BoardError, Result};
pub use runtime::{BoardCommand, BoardDriver, BoardHandle};
