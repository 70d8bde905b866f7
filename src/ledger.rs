//! Pending-move intake between turn resolutions.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::field::{Faction, Field, RegionId};

/// A queued intent to shift strength from one region to an adjacent one.
///
/// The issuing faction is recorded at submit time, so resolution credits a
/// capture to the side that ordered it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Move {
    pub source: RegionId,
    pub target: RegionId,
    pub faction: Faction,
}

/// At most one pending move per source region.
///
/// Keyed by source id, so resubmitting from the same source replaces the
/// previous target and draining yields ascending source order — the
/// documented deterministic resolution order.
#[derive(Debug, Clone, Default)]
pub struct MoveLedger {
    pending: BTreeMap<RegionId, Move>,
}

impl MoveLedger {
    pub fn new() -> MoveLedger {
        MoveLedger::default()
    }

    /// Queues a move, validating it against the current field.
    ///
    /// Rejected (returning false, ledger unchanged) if source and target are
    /// the same region, either id is unknown, the source is not controlled
    /// by the acting faction, or the target is not adjacent to the source.
    /// Invalid submissions are routine user input, not errors.
    pub fn submit(
        &mut self,
        field: &Field,
        source: RegionId,
        target: RegionId,
        faction: Faction,
    ) -> bool {
        if source == target {
            return false;
        }
        let src = match field.region(source) {
            Some(r) => r,
            None => return false,
        };
        if field.region(target).is_none() {
            return false;
        }
        if src.owner() != faction || !src.is_neighbor(target) {
            return false;
        }

        self.pending.insert(
            source,
            Move {
                source,
                target,
                faction,
            },
        );
        true
    }

    /// Queued moves in ascending source order, for drawing move arrows.
    pub fn pending(&self) -> impl Iterator<Item = &Move> {
        self.pending.values()
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Removes and returns all pending moves in ascending source order.
    pub fn drain(&mut self) -> Vec<Move> {
        let pending = std::mem::take(&mut self.pending);
        pending.into_values().collect()
    }
}
