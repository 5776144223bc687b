//! Drag lifecycle: capture on start, live reordering while the pointer
//! moves, commit on release.
//!
//! Every handler is total. Stale ids, missing targets and same-id hovers
//! all come back as [`DragOutcome::Ignored`] and leave the board as it was.

use crate::domain::{
    id::Id,
    item::Item,
    state::{ActiveDrag, BoardState, EntityKind},
};
use crate::error::Result;
use serde::{Deserialize, Serialize};
use tracing::{debug, info_span, trace, Span};
use uuid::Uuid;

/// Entity picked up by a gesture, decided once when the gesture starts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "id", rename_all = "lowercase")]
pub enum DragSubject {
    Lane(Id),
    Item(Id),
}

impl DragSubject {
    pub fn id(&self) -> Id {
        match self {
            Self::Lane(id) | Self::Item(id) => *id,
        }
    }

    fn of_kind(kind: EntityKind, id: Id) -> Self {
        match kind {
            EntityKind::Lane => Self::Lane(id),
            EntityKind::Item => Self::Item(id),
        }
    }
}

/// Events reported by the pointer gesture source
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum GestureEvent {
    DragStart {
        subject: DragSubject,
    },
    DragOver {
        active: Id,
        #[serde(default)]
        over: Option<Id>,
    },
    DragEnd {
        active: Id,
        #[serde(default)]
        over: Option<Id>,
    },
}

impl GestureEvent {
    pub fn from_json(payload: &str) -> Result<Self> {
        Ok(serde_json::from_str(payload)?)
    }
}

/// Placement of an item dropped on a lane body instead of on another item
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LaneDropPolicy {
    /// Only the lane changes; the item keeps its index in the flat sequence
    #[default]
    KeepPosition,
    /// Directly after the last item already in the target lane
    Append,
    /// Directly before the first item already in the target lane
    Prepend,
}

/// One gesture in flight
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Gesture {
    pub id: Uuid,
    pub subject: DragSubject,
}

impl Gesture {
    fn new(subject: DragSubject) -> Self {
        Self {
            id: Uuid::new_v4(),
            subject,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DragPhase {
    #[default]
    Idle,
    /// Entity captured, nothing moved yet
    Capturing(Gesture),
    /// At least one relocation happened during this gesture
    LiveReorder(Gesture),
}

impl DragPhase {
    pub fn gesture(&self) -> Option<&Gesture> {
        match self {
            Self::Idle => None,
            Self::Capturing(gesture) | Self::LiveReorder(gesture) => Some(gesture),
        }
    }

    pub fn is_idle(&self) -> bool {
        matches!(self, Self::Idle)
    }
}

/// A change applied to the ordering or lane membership
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Relocation {
    Lane {
        lane: Id,
        from: usize,
        to: usize,
    },
    Item {
        item: Id,
        from: usize,
        to: usize,
        lane: Id,
        lane_changed: bool,
    },
    /// Item dropped on a lane body
    Reassigned {
        item: Id,
        from_lane: Id,
        to_lane: Id,
        from: usize,
        to: usize,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IgnoreReason {
    NoTarget,
    SameEntity,
    UnknownActive,
    UnknownTarget,
    LaneOverItem,
    AlreadyInLane,
    BeingEdited,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragOutcome {
    Captured(DragSubject),
    Moved(Relocation),
    /// Gesture finished; carries the final relocation if one was applied
    Released(Option<Relocation>),
    Ignored(IgnoreReason),
}

impl DragOutcome {
    pub fn relocation(&self) -> Option<Relocation> {
        match self {
            Self::Moved(relocation) | Self::Released(Some(relocation)) => Some(*relocation),
            _ => None,
        }
    }
}

/// Drives [`BoardState`] from gesture events
#[derive(Debug, Clone, Default)]
pub struct DragController {
    phase: DragPhase,
    lane_drop: LaneDropPolicy,
}

impl DragController {
    pub fn new(lane_drop: LaneDropPolicy) -> Self {
        Self {
            phase: DragPhase::Idle,
            lane_drop,
        }
    }

    pub fn phase(&self) -> &DragPhase {
        &self.phase
    }

    pub fn lane_drop(&self) -> LaneDropPolicy {
        self.lane_drop
    }

    pub fn handle(&mut self, state: &mut BoardState, event: GestureEvent) -> DragOutcome {
        match event {
            GestureEvent::DragStart { subject } => self.drag_start(state, subject),
            GestureEvent::DragOver { active, over } => self.drag_over(state, active, over),
            GestureEvent::DragEnd { active, over } => self.drag_end(state, active, over),
        }
    }

    /// Copies the picked-up entity into the active-drag slot
    pub fn drag_start(&mut self, state: &mut BoardState, subject: DragSubject) -> DragOutcome {
        if state.editing() == Some(subject.id()) {
            trace!(?subject, "drag start ignored, entity is being edited");
            return DragOutcome::Ignored(IgnoreReason::BeingEdited);
        }

        let copy = match subject {
            DragSubject::Lane(id) => state.lane(id).cloned().map(ActiveDrag::Lane),
            DragSubject::Item(id) => state.item(id).cloned().map(ActiveDrag::Item),
        };
        let Some(copy) = copy else {
            trace!(?subject, "drag start ignored, entity not on board");
            return DragOutcome::Ignored(IgnoreReason::UnknownActive);
        };

        let gesture = Gesture::new(subject);
        let _span = gesture_span(Some(&gesture)).entered();
        debug!("drag started");

        state.set_active(Some(copy));
        self.phase = DragPhase::Capturing(gesture);
        DragOutcome::Captured(subject)
    }

    /// Live reorder while the pointer hovers over `over`
    pub fn drag_over(&mut self, state: &mut BoardState, active: Id, over: Option<Id>) -> DragOutcome {
        let _span = gesture_span(self.phase.gesture()).entered();

        let outcome = self.resolve(state, active, over, true);
        match outcome {
            DragOutcome::Moved(relocation) => {
                debug!(?relocation, "live reorder");
                if let DragPhase::Capturing(gesture) = self.phase {
                    self.phase = DragPhase::LiveReorder(gesture);
                }
            }
            DragOutcome::Ignored(reason) => trace!(%active, ?over, ?reason, "drag over ignored"),
            _ => {}
        }
        outcome
    }

    /// Clears the active drag and commits a final same-kind move
    pub fn drag_end(&mut self, state: &mut BoardState, active: Id, over: Option<Id>) -> DragOutcome {
        let _span = gesture_span(self.phase.gesture()).entered();

        // Resolve before dropping the phase so the gesture's subject still
        // decides the kind of the active id.
        let relocation = self.resolve(state, active, over, false).relocation();

        self.phase = DragPhase::Idle;
        state.set_active(None);

        debug!(%active, ?over, ?relocation, "drag ended");
        DragOutcome::Released(relocation)
    }

    fn resolve(
        &self,
        state: &mut BoardState,
        active: Id,
        over: Option<Id>,
        allow_lane_drop: bool,
    ) -> DragOutcome {
        let Some(over) = over else {
            return DragOutcome::Ignored(IgnoreReason::NoTarget);
        };
        if active == over {
            return DragOutcome::Ignored(IgnoreReason::SameEntity);
        }
        let Some(subject) = self.subject_for(state, active) else {
            return DragOutcome::Ignored(IgnoreReason::UnknownActive);
        };
        let Some(target) = state.kind_of(over) else {
            return DragOutcome::Ignored(IgnoreReason::UnknownTarget);
        };

        match (subject, target) {
            (DragSubject::Item(item), EntityKind::Item) => move_item(state, item, over),
            (DragSubject::Item(item), EntityKind::Lane) if allow_lane_drop => {
                reassign_item(state, item, over, self.lane_drop)
            }
            (DragSubject::Lane(lane), EntityKind::Lane) => move_lane(state, lane, over),
            (DragSubject::Lane(_), EntityKind::Item) => {
                DragOutcome::Ignored(IgnoreReason::LaneOverItem)
            }
            // Release over a lane body: the hover already moved the item
            (DragSubject::Item(_), EntityKind::Lane) => {
                DragOutcome::Ignored(IgnoreReason::AlreadyInLane)
            }
        }
    }

    fn subject_for(&self, state: &BoardState, active: Id) -> Option<DragSubject> {
        match self.phase.gesture() {
            Some(gesture) if gesture.subject.id() == active => Some(gesture.subject),
            _ => state
                .kind_of(active)
                .map(|kind| DragSubject::of_kind(kind, active)),
        }
    }
}

fn gesture_span(gesture: Option<&Gesture>) -> Span {
    match gesture {
        Some(gesture) => info_span!("gesture", id = %gesture.id, subject = ?gesture.subject),
        None => Span::none(),
    }
}

fn move_lane(state: &mut BoardState, lane: Id, over: Id) -> DragOutcome {
    let lanes = state.lanes();
    let (Some(from), Some(to)) = (lanes.position(lane), lanes.position(over)) else {
        return DragOutcome::Ignored(IgnoreReason::UnknownActive);
    };
    let Some(next) = lanes.relocated(from, to) else {
        return DragOutcome::Ignored(IgnoreReason::SameEntity);
    };

    state.set_lanes(next);
    DragOutcome::Moved(Relocation::Lane { lane, from, to })
}

/// Item over item: adopt the target's lane and take its slot in one step
fn move_item(state: &mut BoardState, item: Id, over: Id) -> DragOutcome {
    let items = state.items();
    let (Some(from), Some(to)) = (items.position(item), items.position(over)) else {
        return DragOutcome::Ignored(IgnoreReason::UnknownActive);
    };
    let lane = items[to].lane_id;
    let lane_changed = items[from].lane_id != lane;

    let next = if lane_changed {
        items.moved_with(from, to, |moving| moving.with_lane(lane))
    } else {
        items.relocated(from, to)
    };
    let Some(next) = next else {
        return DragOutcome::Ignored(IgnoreReason::SameEntity);
    };

    state.set_items(next);
    DragOutcome::Moved(Relocation::Item {
        item,
        from,
        to,
        lane,
        lane_changed,
    })
}

/// Item over a lane body: change membership, place per `policy`
fn reassign_item(state: &mut BoardState, item: Id, lane: Id, policy: LaneDropPolicy) -> DragOutcome {
    let items = state.items();
    let Some(from) = items.position(item) else {
        return DragOutcome::Ignored(IgnoreReason::UnknownActive);
    };
    let from_lane = items[from].lane_id;
    if from_lane == lane {
        return DragOutcome::Ignored(IgnoreReason::AlreadyInLane);
    }

    let to = drop_index(items, from, lane, policy);
    let Some(next) = items.moved_with(from, to, |moving| moving.with_lane(lane)) else {
        return DragOutcome::Ignored(IgnoreReason::UnknownActive);
    };

    state.set_items(next);
    DragOutcome::Moved(Relocation::Reassigned {
        item,
        from_lane,
        to_lane: lane,
        from,
        to,
    })
}

/// Destination index (after removal of `from`) for a lane-body drop
fn drop_index(items: &[Item], from: usize, lane: Id, policy: LaneDropPolicy) -> usize {
    let mut members = items
        .iter()
        .enumerate()
        .filter(|(_, item)| item.belongs_to(lane))
        .map(|(index, _)| index);

    match policy {
        LaneDropPolicy::KeepPosition => from,
        LaneDropPolicy::Append => match members.last() {
            Some(last) if last > from => last,
            Some(last) => last + 1,
            None => from,
        },
        LaneDropPolicy::Prepend => match members.next() {
            Some(first) if first > from => first - 1,
            Some(first) => first,
            None => from,
        },
    }
}
