pub mod board;
pub mod drag;
pub mod id;
pub mod item;
pub mod lane;
pub mod ordered;
pub mod state;
pub mod view;

pub use board::Board;
pub use drag::{
    DragController, DragOutcome, DragPhase, DragSubject, Gesture, GestureEvent, IgnoreReason,
    LaneDropPolicy, Relocation,
};
pub use id::{Id, IdGenerator, RandomIds, SequentialIds};
pub use item::Item;
pub use lane::Lane;
pub use ordered::{relocate, Keyed, OrderedList};
pub use state::{ActiveDrag, BoardSnapshot, BoardState, EntityKind};
pub use view::{item_ids, BoardView, LaneView, Overlay};
