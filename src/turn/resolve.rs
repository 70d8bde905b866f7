//! Application of drained moves and per-turn reinforcement.
//!
//! Moves apply sequentially against live state in their drain order
//! (ascending source id). Every source leaves a garrison of one behind, so
//! strength can never go negative and no region is ever left empty.

use serde::Serialize;
use tracing::trace;

use crate::field::{Faction, Field, RegionId};
use crate::ledger::Move;

/// The outcome of applying one drained move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum MoveOutcome {
    /// Strength shifted between two regions of the same owner.
    Transferred,
    /// The attack overwhelmed the defense; the target changed hands.
    Captured,
    /// The defense held; the target keeps its owner.
    Repelled,
    /// Invalidated by an earlier move in the same batch (source lost or
    /// emptied before this move applied).
    Void,
}

/// A drained move paired with its outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ResolvedMove {
    pub source: RegionId,
    pub target: RegionId,
    pub faction: Faction,
    pub outcome: MoveOutcome,
}

/// Applies drained moves in order, returning each move's outcome.
pub fn apply_moves(field: &mut Field, moves: &[Move]) -> Vec<ResolvedMove> {
    moves
        .iter()
        .map(|mv| {
            let outcome = apply_move(field, mv);
            trace!(source = %mv.source, target = %mv.target, ?outcome, "move applied");
            ResolvedMove {
                source: mv.source,
                target: mv.target,
                faction: mv.faction,
                outcome,
            }
        })
        .collect()
}

fn apply_move(field: &mut Field, mv: &Move) -> MoveOutcome {
    // Re-validate against live state: an earlier move in this batch may have
    // taken the source.
    let (source_owner, source_strength) = match field.region(mv.source) {
        Some(r) => (r.owner(), r.strength()),
        None => return MoveOutcome::Void,
    };
    if source_owner != mv.faction || source_strength == 0 {
        return MoveOutcome::Void;
    }
    let (target_owner, target_strength) = match field.region(mv.target) {
        Some(r) => (r.owner(), r.strength()),
        None => return MoveOutcome::Void,
    };

    if target_owner == source_owner {
        // Friendly transfer: everything but the garrison moves over.
        let moving = guarded_sub(source_strength, 1);
        if let Some(source) = field.region_mut(mv.source) {
            source.set_strength(1);
        }
        if let Some(target) = field.region_mut(mv.target) {
            target.add_strength(moving);
        }
        return MoveOutcome::Transferred;
    }

    let attack = guarded_sub(source_strength, 1);
    if let Some(source) = field.region_mut(mv.source) {
        source.set_strength(1);
    }
    if let Some(target) = field.region_mut(mv.target) {
        if attack > target_strength {
            target.set_owner(mv.faction);
            target.set_strength(guarded_sub(attack, target_strength));
            return MoveOutcome::Captured;
        }
        // Exactly zero is allowed; the defender keeps the region.
        target.set_strength(guarded_sub(target_strength, attack));
    }
    MoveOutcome::Repelled
}

/// Grants the flat per-turn bonus to every region the faction controls.
/// Returns the number of regions reinforced.
pub fn reinforce(field: &mut Field, faction: Faction, bonus: u32) -> usize {
    let ids: Vec<_> = field.owned_by(faction).map(|r| r.id()).collect();
    for &id in &ids {
        if let Some(region) = field.region_mut(id) {
            region.add_strength(bonus);
        }
    }
    ids.len()
}

/// Subtraction with the strength invariant guard: the resolution formulas
/// can never drive strength negative, so a violation is an internal defect.
/// Debug builds fail loudly; release builds clamp to zero.
fn guarded_sub(lhs: u32, rhs: u32) -> u32 {
    debug_assert!(lhs >= rhs, "strength underflow: {} - {}", lhs, rhs);
    lhs.saturating_sub(rhs)
}
