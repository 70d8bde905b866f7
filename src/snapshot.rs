//! Serializable read view of a session for the render collaborator.
//!
//! The display never holds authoritative state; it redraws from a snapshot
//! captured after each tick or resolution.

use serde::Serialize;

use crate::field::{Bounds, Faction, Point, RegionId};
use crate::ledger::Move;
use crate::session::GameSession;

/// One region as the renderer needs it: polygon, label anchor, colors.
#[derive(Debug, Clone, Serialize)]
pub struct RegionView {
    pub id: RegionId,
    pub boundary: Vec<Point>,
    pub centroid: Point,
    pub owner: Faction,
    pub strength: u32,
    pub is_border: bool,
}

/// Full render view: field geometry, ownership, pending move arrows, and
/// the turn clock.
#[derive(Debug, Clone, Serialize)]
pub struct Snapshot {
    pub bounds: Bounds,
    pub turn: u64,
    pub countdown: u32,
    pub regions: Vec<RegionView>,
    pub moves: Vec<Move>,
}

impl Snapshot {
    pub fn capture(session: &GameSession) -> Snapshot {
        Snapshot {
            bounds: session.field().bounds(),
            turn: session.turn(),
            countdown: session.countdown(),
            regions: session
                .field()
                .regions()
                .map(|r| RegionView {
                    id: r.id(),
                    boundary: r.boundary().to_vec(),
                    centroid: r.centroid(),
                    owner: r.owner(),
                    strength: r.strength(),
                    is_border: r.is_border(),
                })
                .collect(),
            moves: session.ledger().pending().copied().collect(),
        }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::{generate_from_sites, FieldConfig};
    use crate::session::GameConfig;

    fn grid_session() -> GameSession {
        let step = 100.0 / 3.0;
        let mut sites = Vec::new();
        for row in 0..3 {
            for col in 0..3 {
                sites.push(Point::new(
                    (col as f64 + 0.5) * step,
                    (row as f64 + 0.5) * step,
                ));
            }
        }
        let config = GameConfig::default();
        let field = generate_from_sites(&FieldConfig::default(), sites).unwrap();
        GameSession::from_field(config, field).unwrap()
    }

    #[test]
    fn capture_mirrors_the_session() {
        let mut session = grid_session();
        session.submit(RegionId(1), RegionId(0), Faction::Red);

        let snapshot = session.snapshot();
        assert_eq!(snapshot.regions.len(), 9);
        assert_eq!(snapshot.moves.len(), 1);
        assert_eq!(snapshot.countdown, 6);
        assert_eq!(snapshot.turn, 0);
        assert_eq!(snapshot.regions[1].owner, Faction::Red);
        assert_eq!(snapshot.regions[1].strength, 200);
        assert_eq!(snapshot.regions[1].boundary.len(), 4);
    }

    #[test]
    fn json_exposes_the_structural_facts() {
        let session = grid_session();
        let json = session.snapshot().to_json().unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["regions"].as_array().unwrap().len(), 9);
        assert_eq!(value["moves"].as_array().unwrap().len(), 0);
        assert_eq!(value["countdown"], 6);
        assert_eq!(value["bounds"]["width"], 100.0);
        assert_eq!(value["regions"][1]["owner"], "Red");
        assert_eq!(value["regions"][7]["owner"], "Blue");
        assert_eq!(value["regions"][0]["owner"], "Neutral");
    }
}
