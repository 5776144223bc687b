use crate::domain::{id::Id, ordered::Keyed};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A work item living in exactly one lane
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    pub id: Id,
    pub lane_id: Id,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Item {
    pub fn new(id: Id, lane_id: Id, content: String) -> Self {
        let now = Utc::now();
        Self {
            id,
            lane_id,
            content,
            created_at: now,
            updated_at: now,
        }
    }

    /// Returns a copy carrying the new content
    pub fn with_content(&self, content: String) -> Self {
        Self {
            content,
            updated_at: Utc::now(),
            ..self.clone()
        }
    }

    /// Returns a copy assigned to another lane.
    ///
    /// Cross-lane moves build the reassigned copy first and only then
    /// relocate it, so the stored sequence is never edited in place.
    pub fn with_lane(&self, lane_id: Id) -> Self {
        Self {
            lane_id,
            updated_at: Utc::now(),
            ..self.clone()
        }
    }

    pub fn belongs_to(&self, lane_id: Id) -> bool {
        self.lane_id == lane_id
    }
}

impl Keyed for Item {
    fn key(&self) -> Id {
        self.id
    }
}
