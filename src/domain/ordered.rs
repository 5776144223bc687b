//! Ordered sequences of lanes and items.
//!
//! Storage order is the only ordering: a lane's position is its index in the
//! lane list and an item's position within its lane is its index among the
//! items sharing that `lane_id`. There are no separate position fields to
//! keep in sync.

use crate::domain::id::Id;
use serde::{Serialize, Serializer};
use std::{fmt, ops::Deref, sync::Arc};

/// Entities stored in an [`OrderedList`]
pub trait Keyed {
    fn key(&self) -> Id;
}

/// Moves the element at `from` so that it ends up at index `to`.
///
/// Elements between the two indices shift by one and everything else keeps
/// its relative order. Returns `false` and leaves `seq` untouched when either
/// index is out of range.
pub fn relocate<T>(seq: &mut Vec<T>, from: usize, to: usize) -> bool {
    if from >= seq.len() || to >= seq.len() {
        return false;
    }
    if from != to {
        let element = seq.remove(from);
        seq.insert(to, element);
    }
    true
}

/// Immutable, cheaply cloneable ordered sequence.
///
/// Every change produces a new list; the old one stays valid for whoever
/// still holds it. Transforms return `None` when nothing would change so the
/// caller keeps the existing allocation and observers can compare lists with
/// [`OrderedList::ptr_eq`].
pub struct OrderedList<T> {
    entries: Arc<[T]>,
}

impl<T> OrderedList<T> {
    pub fn new() -> Self {
        Self {
            entries: Arc::from(Vec::new()),
        }
    }

    /// True when both lists share the same storage
    pub fn ptr_eq(a: &Self, b: &Self) -> bool {
        Arc::ptr_eq(&a.entries, &b.entries)
    }
}

impl<T: Keyed> OrderedList<T> {
    pub fn position(&self, id: Id) -> Option<usize> {
        self.entries.iter().position(|entry| entry.key() == id)
    }

    pub fn find(&self, id: Id) -> Option<&T> {
        self.entries.iter().find(|entry| entry.key() == id)
    }

    pub fn contains(&self, id: Id) -> bool {
        self.position(id).is_some()
    }

    pub fn ids(&self) -> Vec<Id> {
        self.entries.iter().map(Keyed::key).collect()
    }
}

impl<T: Keyed + Clone> OrderedList<T> {
    /// Appends `entry` at the end
    pub fn pushed(&self, entry: T) -> Self {
        let mut next = self.entries.to_vec();
        next.push(entry);
        Self::from(next)
    }

    /// Keeps the entries matching `keep`, or `None` if all of them match
    pub fn retained(&self, keep: impl Fn(&T) -> bool) -> Option<Self> {
        let next: Vec<T> = self.entries.iter().filter(|e| keep(*e)).cloned().collect();
        (next.len() != self.entries.len()).then(|| Self::from(next))
    }

    /// Replaces the entry with key `id` by `update(entry)`
    pub fn replaced(&self, id: Id, update: impl FnOnce(&T) -> T) -> Option<Self> {
        let index = self.position(id)?;
        let mut next = self.entries.to_vec();
        next[index] = update(&next[index]);
        Some(Self::from(next))
    }

    /// Single-element move from `from` to `to`; `None` when out of range or
    /// when the indices are equal
    pub fn relocated(&self, from: usize, to: usize) -> Option<Self> {
        if from == to {
            return None;
        }
        let mut next = self.entries.to_vec();
        relocate(&mut next, from, to).then(|| Self::from(next))
    }

    /// Replaces the entry at `from` and moves it to `to` in one step
    pub fn moved_with(&self, from: usize, to: usize, update: impl FnOnce(&T) -> T) -> Option<Self> {
        if from >= self.entries.len() || to >= self.entries.len() {
            return None;
        }
        let mut next = self.entries.to_vec();
        next[from] = update(&next[from]);
        relocate(&mut next, from, to);
        Some(Self::from(next))
    }
}

impl<T> From<Vec<T>> for OrderedList<T> {
    fn from(entries: Vec<T>) -> Self {
        Self {
            entries: Arc::from(entries),
        }
    }
}

impl<T> Deref for OrderedList<T> {
    type Target = [T];

    fn deref(&self) -> &[T] {
        &self.entries
    }
}

impl<T> Clone for OrderedList<T> {
    fn clone(&self) -> Self {
        Self {
            entries: Arc::clone(&self.entries),
        }
    }
}

impl<T> Default for OrderedList<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: fmt::Debug> fmt::Debug for OrderedList<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.entries.iter()).finish()
    }
}

impl<T: PartialEq> PartialEq for OrderedList<T> {
    fn eq(&self, other: &Self) -> bool {
        self.entries[..] == other.entries[..]
    }
}

impl<T: Serialize> Serialize for OrderedList<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.entries.iter())
    }
}
