use crate::{
    domain::{
        board::Board,
        drag::{DragOutcome, GestureEvent},
        id::Id,
        state::BoardSnapshot,
    },
    error::{BoardError, Result},
    runtime::{BoardCommand, CommandSource},
};
use tokio::{
    sync::{mpsc, oneshot, watch},
    task::JoinHandle,
};
use tracing::{debug, trace};

/// Single writer for a [`Board`] shared with async callers.
///
/// Commands are applied strictly one after another, so the board itself
/// needs no locking. After every command that changed something the new
/// snapshot is published to all subscribers.
pub struct BoardDriver {
    board: Board,
    snapshots: watch::Sender<BoardSnapshot>,
}

impl BoardDriver {
    pub fn new(board: Board) -> Self {
        let (snapshots, _) = watch::channel(board.snapshot());
        Self { board, snapshots }
    }

    /// Starts a driver task fed by a bounded command channel
    pub fn spawn(board: Board, capacity: usize) -> (BoardHandle, JoinHandle<Board>) {
        let driver = Self::new(board);
        let (commands, receiver) = mpsc::channel(capacity);
        let handle = BoardHandle {
            commands,
            snapshots: driver.subscribe(),
        };
        (handle, tokio::spawn(driver.run(receiver)))
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn subscribe(&self) -> watch::Receiver<BoardSnapshot> {
        self.snapshots.subscribe()
    }

    /// Applies commands until the source is exhausted, then hands the
    /// board back
    pub async fn run<S: CommandSource>(mut self, mut source: S) -> Board {
        while let Some(command) = source.next_command().await {
            self.apply(command);
        }
        debug!("command source closed, board driver stopping");
        self.board
    }

    /// Applies one command; returns whether the board changed
    pub fn apply(&mut self, command: BoardCommand) -> bool {
        let before = self.board.state().revision();

        match command {
            BoardCommand::CreateLane { reply } => {
                let id = self.board.create_lane();
                let changed = self.publish(before);
                if let Some(reply) = reply {
                    let _ = reply.send(id);
                }
                return changed;
            }
            BoardCommand::CreateItem { lane_id, reply } => {
                let id = self.board.create_item(lane_id);
                let changed = self.publish(before);
                if let Some(reply) = reply {
                    let _ = reply.send(id);
                }
                return changed;
            }
            BoardCommand::DeleteLane(id) => {
                self.board.delete_lane(id);
            }
            BoardCommand::RenameLane { id, title } => {
                self.board.rename_lane(id, title);
            }
            BoardCommand::DeleteItem(id) => {
                self.board.delete_item(id);
            }
            BoardCommand::EditItem { id, content } => {
                self.board.edit_item(id, content);
            }
            BoardCommand::BeginEdit(id) => {
                self.board.begin_edit(id);
            }
            BoardCommand::EndEdit => {
                self.board.end_edit();
            }
            BoardCommand::Gesture(event) => {
                let outcome = self.board.apply(event);
                trace!(?outcome, "gesture applied");
            }
        }

        self.publish(before)
    }

    /// Applies a gesture directly and reports what it did
    pub fn apply_gesture(&mut self, event: GestureEvent) -> DragOutcome {
        let before = self.board.state().revision();
        let outcome = self.board.apply(event);
        self.publish(before);
        outcome
    }

    fn publish(&self, before: u64) -> bool {
        let revision = self.board.state().revision();
        if revision == before {
            return false;
        }
        trace!(revision, "publishing snapshot");
        self.snapshots.send_replace(self.board.snapshot());
        true
    }
}

/// Cloneable client of a running [`BoardDriver`]
#[derive(Debug, Clone)]
pub struct BoardHandle {
    commands: mpsc::Sender<BoardCommand>,
    snapshots: watch::Receiver<BoardSnapshot>,
}

impl BoardHandle {
    /// Receiver that wakes whenever a new snapshot is published
    pub fn subscribe(&self) -> watch::Receiver<BoardSnapshot> {
        self.snapshots.clone()
    }

    /// Latest published snapshot
    pub fn snapshot(&self) -> BoardSnapshot {
        self.snapshots.borrow().clone()
    }

    pub async fn send(&self, command: BoardCommand) -> Result<()> {
        self.commands
            .send(command)
            .await
            .map_err(|_| BoardError::DriverClosed)
    }

    pub async fn create_lane(&self) -> Result<Id> {
        let (reply, id) = oneshot::channel();
        self.send(BoardCommand::CreateLane { reply: Some(reply) })
            .await?;
        id.await.map_err(|_| BoardError::DriverClosed)
    }

    pub async fn create_item(&self, lane_id: Id) -> Result<Option<Id>> {
        let (reply, id) = oneshot::channel();
        self.send(BoardCommand::CreateItem {
            lane_id,
            reply: Some(reply),
        })
        .await?;
        id.await.map_err(|_| BoardError::DriverClosed)
    }

    pub async fn delete_lane(&self, id: Id) -> Result<()> {
        self.send(BoardCommand::DeleteLane(id)).await
    }

    pub async fn rename_lane(&self, id: Id, title: impl Into<String>) -> Result<()> {
        self.send(BoardCommand::RenameLane {
            id,
            title: title.into(),
        })
        .await
    }

    pub async fn delete_item(&self, id: Id) -> Result<()> {
        self.send(BoardCommand::DeleteItem(id)).await
    }

    pub async fn edit_item(&self, id: Id, content: impl Into<String>) -> Result<()> {
        self.send(BoardCommand::EditItem {
            id,
            content: content.into(),
        })
        .await
    }

    pub async fn begin_edit(&self, id: Id) -> Result<()> {
        self.send(BoardCommand::BeginEdit(id)).await
    }

    pub async fn end_edit(&self) -> Result<()> {
        self.send(BoardCommand::EndEdit).await
    }

    pub async fn gesture(&self, event: GestureEvent) -> Result<()> {
        self.send(event.into()).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::BoardConfig;
    use crate::domain::{drag::DragSubject, view::BoardView};

    #[tokio::test]
    async fn test_crud_through_handle() {
        let (handle, task) = BoardDriver::spawn(Board::default(), 16);

        let lane = handle.create_lane().await.unwrap();
        let item = handle.create_item(lane).await.unwrap().unwrap();

        let snapshot = handle.snapshot();
        assert_eq!(snapshot.lane_ids(), vec![lane]);
        assert_eq!(snapshot.items_of_lane(lane)[0].id, item);

        drop(handle);
        let board = task.await.unwrap();
        assert_eq!(board.state().items().len(), 1);
    }

    #[tokio::test]
    async fn test_subscribers_see_gesture_reorder() {
        let (handle, task) = BoardDriver::spawn(Board::default(), 16);
        let first = handle.create_lane().await.unwrap();
        let second = handle.create_lane().await.unwrap();

        let mut updates = handle.subscribe();
        updates.borrow_and_update();

        handle
            .gesture(GestureEvent::DragOver {
                active: second,
                over: Some(first),
            })
            .await
            .unwrap();
        updates.changed().await.unwrap();

        assert_eq!(updates.borrow().lane_ids(), vec![second, first]);

        drop(handle);
        drop(updates);
        task.await.unwrap();
    }

    #[tokio::test]
    async fn test_run_returns_board_when_source_closes() {
        let driver = BoardDriver::new(Board::default());
        let (tx, rx) = mpsc::unbounded_channel();

        tx.send(BoardCommand::CreateLane { reply: None }).unwrap();
        tx.send(BoardCommand::CreateLane { reply: None }).unwrap();
        drop(tx);

        let board = driver.run(rx).await;
        assert_eq!(board.state().lanes().len(), 2);
    }

    #[tokio::test]
    async fn test_handle_reports_closed_driver() {
        let (handle, task) = BoardDriver::spawn(Board::default(), 4);
        task.abort();
        let _ = task.await;

        assert!(matches!(
            handle.create_lane().await,
            Err(BoardError::DriverClosed)
        ));
        assert!(matches!(
            handle.delete_lane(Id::new(1)).await,
            Err(BoardError::DriverClosed)
        ));
    }

    #[test]
    fn test_apply_publishes_only_on_change() {
        let mut driver = BoardDriver::new(Board::new(BoardConfig {
            initial_lanes: vec!["Todo".to_string()],
            ..BoardConfig::default()
        }));
        let mut updates = driver.subscribe();
        updates.borrow_and_update();

        assert!(!driver.apply(BoardCommand::DeleteLane(Id::new(999))));
        assert!(!updates.has_changed().unwrap());

        let lane = driver.board().state().lane_ids()[0];
        assert!(driver.apply(BoardCommand::RenameLane {
            id: lane,
            title: "Inbox".to_string(),
        }));
        assert!(updates.has_changed().unwrap());
        assert_eq!(updates.borrow_and_update().lanes[0].title, "Inbox");
    }

    #[test]
    fn test_apply_gesture_reports_outcome() {
        let mut driver = BoardDriver::new(Board::new(BoardConfig {
            initial_lanes: vec!["Todo".to_string()],
            ..BoardConfig::default()
        }));
        let lane = driver.board().state().lane_ids()[0];

        let outcome = driver.apply_gesture(GestureEvent::DragStart {
            subject: DragSubject::Lane(lane),
        });

        assert_eq!(outcome, DragOutcome::Captured(DragSubject::Lane(lane)));
        assert!(driver.board().snapshot().active.is_some());
    }
}
