use crate::domain::{drag::GestureEvent, id::Id};
use async_trait::async_trait;
use tokio::sync::{mpsc, oneshot};

pub mod driver;

pub use driver::{BoardDriver, BoardHandle};

/// One unit of work for the board driver.
///
/// Create commands may carry a reply channel that receives the new id once
/// the change is visible to snapshot subscribers.
#[derive(Debug)]
pub enum BoardCommand {
    CreateLane {
        reply: Option<oneshot::Sender<Id>>,
    },
    DeleteLane(Id),
    RenameLane {
        id: Id,
        title: String,
    },
    CreateItem {
        lane_id: Id,
        reply: Option<oneshot::Sender<Option<Id>>>,
    },
    DeleteItem(Id),
    EditItem {
        id: Id,
        content: String,
    },
    BeginEdit(Id),
    EndEdit,
    Gesture(GestureEvent),
}

impl From<GestureEvent> for BoardCommand {
    fn from(event: GestureEvent) -> Self {
        Self::Gesture(event)
    }
}

/// Where the driver pulls commands from
#[async_trait]
pub trait CommandSource: Send {
    /// Next command, or `None` once the source is exhausted
    async fn next_command(&mut self) -> Option<BoardCommand>;
}

#[async_trait]
impl CommandSource for mpsc::Receiver<BoardCommand> {
    async fn next_command(&mut self) -> Option<BoardCommand> {
        self.recv().await
    }
}

#[async_trait]
impl CommandSource for mpsc::UnboundedReceiver<BoardCommand> {
    async fn next_command(&mut self) -> Option<BoardCommand> {
        self.recv().await
    }
}
