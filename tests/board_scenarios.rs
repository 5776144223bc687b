use laneboard_core::domain::{IdGenerator, IgnoreReason, Relocation};
use laneboard_core::{
    Board, BoardConfig, BoardView, DragOutcome, DragSubject, GestureEvent, Id, IdStrategy,
};
use std::collections::{HashSet, VecDeque};

/// Hands out a fixed list of ids, then counts upward from 1000
struct PresetIds(VecDeque<u32>);

impl IdGenerator for PresetIds {
    fn next_id(&mut self, in_use: &dyn Fn(Id) -> bool) -> Id {
        while let Some(next) = self.0.pop_front() {
            if !in_use(Id::new(next)) {
                return Id::new(next);
            }
        }
        (1000..).map(Id::new).find(|id| !in_use(*id)).unwrap()
    }
}

fn board_with_ids(ids: &[u32]) -> Board {
    Board::with_id_generator(
        BoardConfig::default(),
        Box::new(PresetIds(ids.iter().copied().collect())),
    )
}

fn ids(values: &[u32]) -> Vec<Id> {
    values.iter().copied().map(Id::new).collect()
}

#[test]
fn drag_item_onto_empty_lane_body() {
    let mut board = board_with_ids(&[1, 101, 102, 2]);
    let lane_one = board.create_lane();
    board.create_item(lane_one);
    board.create_item(lane_one);
    let lane_two = board.create_lane();

    assert_eq!(lane_two, Id::new(2));
    assert_eq!(board.state().lane(lane_two).unwrap().title, "Column 2");
    assert_eq!(board.state().item(Id::new(102)).unwrap().content, "Task 2");

    board.apply(GestureEvent::DragOver {
        active: Id::new(101),
        over: Some(Id::new(2)),
    });
    let outcome = board.apply(GestureEvent::DragEnd {
        active: Id::new(101),
        over: None,
    });

    assert_eq!(outcome, DragOutcome::Released(None));
    assert_eq!(board.state().item(Id::new(101)).unwrap().lane_id, Id::new(2));
    assert_eq!(board.state().item(Id::new(102)).unwrap().lane_id, Id::new(1));
    assert_eq!(board.state().lane_ids(), ids(&[1, 2]));
    assert_eq!(item_ids_of(&board, 1), ids(&[102]));
    assert_eq!(item_ids_of(&board, 2), ids(&[101]));
}

#[test]
fn drag_lane_over_lane() {
    let mut board = board_with_ids(&[1, 2]);
    board.create_lane();
    board.create_lane();

    board.apply(GestureEvent::DragOver {
        active: Id::new(2),
        over: Some(Id::new(1)),
    });

    assert_eq!(board.state().lane_ids(), ids(&[2, 1]));
}

#[test]
fn cross_lane_item_takes_target_slot() {
    let mut board = board_with_ids(&[1, 2, 11, 12, 21, 22]);
    let x = board.create_lane();
    let y = board.create_lane();
    board.create_item(x);
    board.create_item(x);
    board.create_item(y);
    board.create_item(y);
    let target_slot = board.state().items().position(Id::new(22)).unwrap();

    board.drag_start(DragSubject::Item(Id::new(11)));
    let outcome = board.drag_over(Id::new(11), Some(Id::new(22)));

    assert_eq!(
        outcome,
        DragOutcome::Moved(Relocation::Item {
            item: Id::new(11),
            from: 0,
            to: target_slot,
            lane: y,
            lane_changed: true,
        })
    );
    assert_eq!(board.state().item(Id::new(11)).unwrap().lane_id, y);
    assert_eq!(board.state().items().position(Id::new(11)), Some(target_slot));
    assert_eq!(item_ids_of(&board, 2), ids(&[21, 22, 11]));
    assert_eq!(item_ids_of(&board, 1), ids(&[12]));

    // Overlay still shows the copy taken at drag start
    match board.state().active() {
        Some(laneboard_core::ActiveDrag::Item(item)) => assert_eq!(item.lane_id, x),
        other => panic!("unexpected active drag: {:?}", other),
    }

    board.drag_end(Id::new(11), Some(Id::new(11)));
    assert!(board.state().active().is_none());
}

#[test]
fn same_id_hover_changes_nothing() {
    let mut board = board_with_ids(&[1, 101, 102]);
    let lane = board.create_lane();
    board.create_item(lane);
    board.create_item(lane);
    let before = board.snapshot();

    let outcome = board.drag_over(Id::new(101), Some(Id::new(101)));

    assert_eq!(outcome, DragOutcome::Ignored(IgnoreReason::SameEntity));
    assert_eq!(board.snapshot().items, before.items);
    assert_eq!(board.snapshot().lanes, before.lanes);
    assert_eq!(board.snapshot().revision, before.revision);
}

#[test]
fn deleting_dragged_item_mid_gesture() {
    let mut board = board_with_ids(&[1, 2, 101, 102]);
    let lane = board.create_lane();
    let other = board.create_lane();
    board.create_item(lane);
    board.create_item(lane);

    board.drag_start(DragSubject::Item(Id::new(101)));
    assert!(board.delete_item(Id::new(101)));

    assert!(matches!(
        board.drag_over(Id::new(101), Some(Id::new(102))),
        DragOutcome::Ignored(_)
    ));
    assert!(matches!(
        board.drag_over(Id::new(101), Some(other)),
        DragOutcome::Ignored(_)
    ));
    assert_eq!(
        board.drag_end(Id::new(101), Some(Id::new(102))),
        DragOutcome::Released(None)
    );
    assert_eq!(board.state().items().ids(), ids(&[102]));
    assert!(board.drag_phase().is_idle());
}

#[test]
fn cascade_delete_removes_every_member() {
    let mut board = Board::default();
    let lanes: Vec<Id> = (0..3).map(|_| board.create_lane()).collect();
    for (n, lane) in lanes.iter().enumerate() {
        for _ in 0..=n {
            board.create_item(*lane);
        }
    }
    let doomed: HashSet<Id> = board
        .state()
        .items_of_lane(lanes[2])
        .iter()
        .map(|item| item.id)
        .collect();
    assert_eq!(doomed.len(), 3);

    board.delete_lane(lanes[2]);

    assert_eq!(board.state().lane_ids(), lanes[..2].to_vec());
    assert!(board
        .state()
        .items()
        .iter()
        .all(|item| !doomed.contains(&item.id)));
    assert!(board
        .state()
        .items()
        .iter()
        .all(|item| board.state().lane(item.lane_id).is_some()));
}

#[test]
fn generated_ids_are_distinct() {
    for strategy in [IdStrategy::Sequential, IdStrategy::Random { max: 10_000 }] {
        let mut board = Board::new(BoardConfig {
            ids: strategy,
            ..BoardConfig::default()
        });
        let mut seen = HashSet::new();
        for _ in 0..200 {
            let lane = board.create_lane();
            assert!(seen.insert(lane));
            for _ in 0..5 {
                assert!(seen.insert(board.create_item(lane).unwrap()));
            }
        }
    }
}

#[test]
fn gesture_sequence_from_json() {
    let mut board = board_with_ids(&[1, 2, 3]);
    board.create_lane();
    board.create_lane();
    board.create_lane();

    let script = [
        r#"{"type":"drag_start","subject":{"kind":"lane","id":3}}"#,
        r#"{"type":"drag_over","active":3,"over":2}"#,
        r#"{"type":"drag_over","active":3,"over":1}"#,
        r#"{"type":"drag_over","active":3,"over":3}"#,
        r#"{"type":"drag_end","active":3,"over":null}"#,
    ];
    for payload in script {
        board.apply(GestureEvent::from_json(payload).unwrap());
    }

    assert_eq!(board.state().lane_ids(), ids(&[3, 1, 2]));
    assert!(board.state().active().is_none());
}

fn item_ids_of(board: &Board, lane: u32) -> Vec<Id> {
    laneboard_core::domain::item_ids(&board.state().items_of_lane(Id::new(lane)))
}
