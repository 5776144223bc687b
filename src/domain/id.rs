use rand::Rng;
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

/// Identifier shared by lanes and items.
///
/// Both kinds draw from one id space, so a bare id reported by the gesture
/// source resolves to at most one entity on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Id(u32);

impl Id {
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    pub const fn get(self) -> u32 {
        self.0
    }
}

impl From<u32> for Id {
    fn from(value: u32) -> Self {
        Self(value)
    }
}

impl FromStr for Id {
    type Err = crate::error::BoardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .parse::<u32>()
            .map(Self)
            .map_err(|_| crate::error::BoardError::InvalidId(s.to_string()))
    }
}

impl fmt::Display for Id {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Source of fresh identifiers for new lanes and items
pub trait IdGenerator: Send {
    /// Returns an id for which `in_use` is false at call time
    fn next_id(&mut self, in_use: &dyn Fn(Id) -> bool) -> Id;
}

/// Monotonic counter starting at 1
#[derive(Debug, Clone)]
pub struct SequentialIds {
    next: u32,
}

impl SequentialIds {
    pub fn new() -> Self {
        Self::starting_at(1)
    }

    pub fn starting_at(first: u32) -> Self {
        Self { next: first }
    }
}

impl Default for SequentialIds {
    fn default() -> Self {
        Self::new()
    }
}

impl IdGenerator for SequentialIds {
    fn next_id(&mut self, in_use: &dyn Fn(Id) -> bool) -> Id {
        loop {
            let candidate = Id(self.next);
            self.next = self.next.wrapping_add(1);
            if !in_use(candidate) {
                return candidate;
            }
        }
    }
}

/// Random ids drawn from `0..=max`, checked against the board before use.
///
/// A handful of random draws is tried first. When those all collide the
/// range is probed linearly from a random start, and once the range is
/// exhausted ids continue past `max`.
#[derive(Debug, Clone)]
pub struct RandomIds {
    max: u32,
}

impl RandomIds {
    const RANDOM_ATTEMPTS: usize = 16;

    pub fn new(max: u32) -> Self {
        Self { max }
    }

    pub fn max(&self) -> u32 {
        self.max
    }
}

impl Default for RandomIds {
    fn default() -> Self {
        Self::new(10_000)
    }
}

impl IdGenerator for RandomIds {
    fn next_id(&mut self, in_use: &dyn Fn(Id) -> bool) -> Id {
        let mut rng = rand::rng();

        for _ in 0..Self::RANDOM_ATTEMPTS {
            let candidate = Id(rng.random_range(0..=self.max));
            if !in_use(candidate) {
                return candidate;
            }
        }

        tracing::debug!(max = self.max, "random ids colliding, probing range");
        let span = u64::from(self.max) + 1;
        let start = u64::from(rng.random_range(0..=self.max));
        for offset in 0..span {
            let candidate = Id(((start + offset) % span) as u32);
            if !in_use(candidate) {
                return candidate;
            }
        }

        let mut overflow = self.max.wrapping_add(1);
        while in_use(Id(overflow)) {
            overflow = overflow.wrapping_add(1);
        }
        Id(overflow)
    }
}
