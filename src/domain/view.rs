use crate::domain::{
    id::Id,
    item::Item,
    lane::Lane,
    ordered::OrderedList,
    state::{ActiveDrag, BoardSnapshot, BoardState},
};

/// Ids of `items` in order, for the sortable context of one lane
pub fn item_ids(items: &[Item]) -> Vec<Id> {
    items.iter().map(|item| item.id).collect()
}

/// A lane together with the items it currently holds
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LaneView<'a> {
    pub lane: &'a Lane,
    pub items: Vec<&'a Item>,
}

/// What the drag overlay draws
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Overlay<'a> {
    Lane { lane: &'a Lane, items: Vec<Item> },
    Item(&'a Item),
}

/// Derived views over the flat lane and item sequences.
///
/// Intra-lane order is the order of the flat item sequence, so every
/// projection here is a filter over it.
pub trait BoardView {
    fn lanes(&self) -> &OrderedList<Lane>;
    fn items(&self) -> &OrderedList<Item>;
    fn active(&self) -> Option<&ActiveDrag>;

    fn items_of_lane(&self, lane_id: Id) -> Vec<Item> {
        self.items()
            .iter()
            .filter(|item| item.belongs_to(lane_id))
            .cloned()
            .collect()
    }

    fn lane_ids(&self) -> Vec<Id> {
        self.lanes().ids()
    }

    /// Number shown on the lane's counter badge
    fn item_count(&self, lane_id: Id) -> usize {
        self.items()
            .iter()
            .filter(|item| item.belongs_to(lane_id))
            .count()
    }

    /// Every lane in display order with its items, grouped in one pass
    fn lanes_with_items(&self) -> Vec<LaneView<'_>> {
        let mut views: Vec<LaneView<'_>> = self
            .lanes()
            .iter()
            .map(|lane| LaneView {
                lane,
                items: Vec::new(),
            })
            .collect();

        for item in self.items().iter() {
            if let Some(view) = views.iter_mut().find(|view| view.lane.id == item.lane_id) {
                view.items.push(item);
            }
        }
        views
    }

    /// A dragged lane is drawn with its live items; a dragged item as the
    /// copy captured at drag start
    fn overlay(&self) -> Option<Overlay<'_>> {
        match self.active()? {
            ActiveDrag::Lane(lane) => Some(Overlay::Lane {
                lane,
                items: self.items_of_lane(lane.id),
            }),
            ActiveDrag::Item(item) => Some(Overlay::Item(item)),
        }
    }
}

impl BoardView for BoardState {
    fn lanes(&self) -> &OrderedList<Lane> {
        BoardState::lanes(self)
    }

    fn items(&self) -> &OrderedList<Item> {
        BoardState::items(self)
    }

    fn active(&self) -> Option<&ActiveDrag> {
        BoardState::active(self)
    }
}

impl BoardView for BoardSnapshot {
    fn lanes(&self) -> &OrderedList<Lane> {
        &self.lanes
    }

    fn items(&self) -> &OrderedList<Item> {
        &self.items
    }

    fn active(&self) -> Option<&ActiveDrag> {
        self.active.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot(active: Option<ActiveDrag>) -> BoardSnapshot {
        let lanes = vec![
            Lane::new(Id::new(1), "Column 1".to_string()),
            Lane::new(Id::new(2), "Column 2".to_string()),
        ];
        let items = vec![
            Item::new(Id::new(103), Id::new(1), "Task 3".to_string()),
            Item::new(Id::new(201), Id::new(2), "Task 1".to_string()),
            Item::new(Id::new(101), Id::new(1), "Task 2".to_string()),
        ];
        BoardSnapshot {
            revision: 0,
            lanes: OrderedList::from(lanes),
            items: OrderedList::from(items),
            active,
            editing: None,
        }
    }

    #[test]
    fn test_items_of_lane_preserve_flat_order() {
        let view = snapshot(None);
        let lane_one = view.items_of_lane(Id::new(1));

        assert_eq!(item_ids(&lane_one), vec![Id::new(103), Id::new(101)]);
        assert!(view.items_of_lane(Id::new(9)).is_empty());
    }

    #[test]
    fn test_lane_ids_and_counts() {
        let view = snapshot(None);
        assert_eq!(view.lane_ids(), vec![Id::new(1), Id::new(2)]);
        assert_eq!(view.item_count(Id::new(1)), 2);
        assert_eq!(view.item_count(Id::new(2)), 1);
        assert_eq!(view.item_count(Id::new(3)), 0);
    }

    #[test]
    fn test_lanes_with_items() {
        let view = snapshot(None);
        let grouped = view.lanes_with_items();

        assert_eq!(grouped.len(), 2);
        assert_eq!(grouped[0].lane.id, Id::new(1));
        assert_eq!(
            grouped[0].items.iter().map(|i| i.id).collect::<Vec<_>>(),
            vec![Id::new(103), Id::new(101)]
        );
        assert_eq!(grouped[1].items.len(), 1);
    }

    #[test]
    fn test_overlay() {
        assert!(snapshot(None).overlay().is_none());

        let lane = Lane::new(Id::new(1), "Column 1".to_string());
        let view = snapshot(Some(ActiveDrag::Lane(lane)));
        match view.overlay() {
            Some(Overlay::Lane { lane, items }) => {
                assert_eq!(lane.id, Id::new(1));
                assert_eq!(items.len(), 2);
            }
            other => panic!("unexpected overlay: {:?}", other),
        }

        let item = Item::new(Id::new(201), Id::new(2), "Task 1".to_string());
        let view = snapshot(Some(ActiveDrag::Item(item)));
        assert!(matches!(view.overlay(), Some(Overlay::Item(item)) if item.id == Id::new(201)));
    }
}
