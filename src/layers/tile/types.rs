//! Core data types for tile layer functionality

use crate::{core::geo::QuadKey, MapError};
use std::cmp::Ordering;

/// Lifecycle of a tile layer against its scene
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SyncState {
    /// No pass has run yet, or the layer was cleared
    #[default]
    Uninitialized,
    /// The visible set reflects the last resolved set
    Synced,
}

/// Which collaborator call a failure belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TileAction {
    Add,
    Remove,
}

/// A single tile the scene could not add or remove
#[derive(Debug)]
pub struct TileFailure {
    pub key: QuadKey,
    pub action: TileAction,
    pub error: MapError,
}

/// Outcome of one synchronisation pass
#[derive(Debug, Default)]
pub struct SyncReport {
    /// Keys attached during the pass, in key order
    pub added: Vec<QuadKey>,
    /// Keys detached during the pass, in key order
    pub removed: Vec<QuadKey>,
    pub failures: Vec<TileFailure>,
}

impl SyncReport {
    /// True when the scene was not touched at all
    pub fn is_noop(&self) -> bool {
        self.added.is_empty() && self.removed.is_empty() && self.failures.is_empty()
    }

    pub fn has_failures(&self) -> bool {
        !self.failures.is_empty()
    }
}

/// Keys to detach and keys to attach to move from one tile set to another
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TileDiff {
    pub to_remove: Vec<QuadKey>,
    pub to_add: Vec<QuadKey>,
}

impl TileDiff {
    pub fn is_empty(&self) -> bool {
        self.to_remove.is_empty() && self.to_add.is_empty()
    }
}

/// `current − next` to remove and `next − current` to add. Both inputs must
/// yield keys in ascending order (as `BTreeSet` and `BTreeMap` keys do); both
/// lists come out sorted and never share a key.
pub fn diff_tile_sets<'a, C, N>(current: C, next: N) -> TileDiff
where
    C: IntoIterator<Item = &'a QuadKey>,
    N: IntoIterator<Item = &'a QuadKey>,
{
    let mut current = current.into_iter().peekable();
    let mut next = next.into_iter().peekable();
    let mut diff = TileDiff::default();

    loop {
        match (current.peek().copied(), next.peek().copied()) {
            (Some(old), Some(new)) => match old.cmp(new) {
                Ordering::Less => {
                    diff.to_remove.push(old.clone());
                    current.next();
                }
                Ordering::Greater => {
                    diff.to_add.push(new.clone());
                    next.next();
                }
                Ordering::Equal => {
                    current.next();
                    next.next();
                }
            },
            (Some(old), None) => {
                diff.to_remove.push(old.clone());
                current.next();
            }
            (None, Some(new)) => {
                diff.to_add.push(new.clone());
                next.next();
            }
            (None, None) => break,
        }
    }

    diff
}
