use crate::domain::{id::Id, ordered::Keyed};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A named column on the board
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Lane {
    pub id: Id,
    pub title: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Lane {
    pub fn new(id: Id, title: String) -> Self {
        let now = Utc::now();
        Self {
            id,
            title,
            created_at: now,
            updated_at: now,
        }
    }

    /// Returns a copy carrying the new title
    pub fn with_title(&self, title: String) -> Self {
        Self {
            title,
            updated_at: Utc::now(),
            ..self.clone()
        }
    }
}

impl Keyed for Lane {
    fn key(&self) -> Id {
        self.id
    }
}
