#![forbid(unsafe_code)]

//! Per-field ordering metadata.
//!
//! Every field a state exposes for copying carries an [`Order`]. The rank
//! decides the sequence in which fields are written during an ordered copy;
//! fields without an explicit rank fall back to their declaration position,
//! so declaration order is the natural default.
//!
//! # Invariants
//!
//! 1. `rank()` is total: a missing explicit rank resolves to the position.
//! 2. Sorting by [`Order::sort_key`] is deterministic: equal ranks are
//!    broken by declaration position.
//! 3. Positions are assigned monotonically by the descriptor builder, so two
//!    fields of one state never share a position.

use std::cmp::Ordering;
use std::fmt;
use std::panic::Location;

/// Ordering metadata attached to one field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Order {
    rank: Option<i64>,
    position: u32,
}

impl Order {
    /// Metadata with no explicit rank: the field sorts by `position`.
    #[must_use]
    pub const fn declared(position: u32) -> Self {
        Self {
            rank: None,
            position,
        }
    }

    /// Metadata with an explicit rank. `position` still breaks ties.
    #[must_use]
    pub const fn ranked(rank: i64, position: u32) -> Self {
        Self {
            rank: Some(rank),
            position,
        }
    }

    /// Rank taken from the caller's source line.
    ///
    /// Useful when fields are described one per line and the file layout is
    /// the intended order. The position is left at zero; the descriptor
    /// builder overwrites it with [`Order::at_position`].
    #[must_use]
    #[track_caller]
    pub fn here() -> Self {
        Self::ranked(i64::from(Location::caller().line()), 0)
    }

    /// Same rank, new declaration position.
    #[must_use]
    pub const fn at_position(self, position: u32) -> Self {
        Self {
            rank: self.rank,
            position,
        }
    }

    /// Same position, explicit rank.
    #[must_use]
    pub const fn with_rank(self, rank: i64) -> Self {
        Self {
            rank: Some(rank),
            position: self.position,
        }
    }

    /// Effective rank: the explicit one, else the declaration position.
    #[must_use]
    pub const fn rank(&self) -> i64 {
        match self.rank {
            Some(rank) => rank,
            None => self.position as i64,
        }
    }

    /// Whether the rank was supplied explicitly.
    #[must_use]
    pub const fn is_explicit(&self) -> bool {
        self.rank.is_some()
    }

    /// Declaration position within the owning state.
    #[must_use]
    pub const fn position(&self) -> u32 {
        self.position
    }

    /// Key used to sort fields: rank first, declaration position second.
    #[must_use]
    pub const fn sort_key(&self) -> (i64, u32) {
        (self.rank(), self.position)
    }
}

impl PartialOrd for Order {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Order {
    fn cmp(&self, other: &Self) -> Ordering {
        self.sort_key().cmp(&other.sort_key())
    }
}

impl fmt::Display for Order {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.rank {
            Some(rank) => write!(f, "rank {rank} (pos {})", self.position),
            None => write!(f, "pos {}", self.position),
        }
    }
}
