//! The field data model: factions, regions, and the generated map.
//!
//! Regions live in an arena owned by the `Field`, addressed by stable dense
//! ids; neighbors are stored as sorted id lists rather than references.
//! Geometry is immutable after generation; only ownership and strength
//! mutate, and only through turn resolution inside the crate.

pub mod centroid;
pub mod generate;
pub mod geom;
pub mod graph;
pub mod partition;

use std::fmt;

use serde::Serialize;

pub use centroid::{polygon_centroid, CentroidError};
pub use generate::{generate, generate_from_sites, FieldConfig, GenerateError};
pub use geom::{Bounds, Point};
pub use partition::PartitionError;

/// A competing controller of regions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Faction {
    /// The unclaimed default.
    Neutral,
    /// Faction A, the human side unless configured otherwise.
    Red,
    /// Faction B.
    Blue,
}

impl Faction {
    /// Returns the lowercase display name of this faction.
    pub const fn name(self) -> &'static str {
        match self {
            Faction::Neutral => "neutral",
            Faction::Red => "red",
            Faction::Blue => "blue",
        }
    }

    /// Returns the single-character protocol code.
    pub const fn code(self) -> char {
        match self {
            Faction::Neutral => 'N',
            Faction::Red => 'R',
            Faction::Blue => 'B',
        }
    }

    /// Parses a faction from its lowercase name.
    pub fn from_name(name: &str) -> Option<Faction> {
        match name {
            "neutral" => Some(Faction::Neutral),
            "red" => Some(Faction::Red),
            "blue" => Some(Faction::Blue),
            _ => None,
        }
    }

    /// Parses a faction from its single-character code.
    pub fn from_code(c: char) -> Option<Faction> {
        match c {
            'N' => Some(Faction::Neutral),
            'R' => Some(Faction::Red),
            'B' => Some(Faction::Blue),
            _ => None,
        }
    }
}

/// Stable index of a region within its field, assigned densely at
/// generation and never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct RegionId(pub u32);

impl RegionId {
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for RegionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One polygonal cell of the map; the unit of ownership and strength.
#[derive(Debug, Clone)]
pub struct Region {
    id: RegionId,
    site: Point,
    boundary: Vec<Point>,
    centroid: Point,
    area: f64,
    neighbors: Vec<RegionId>,
    is_border: bool,
    owner: Faction,
    strength: u32,
}

impl Region {
    #[allow(clippy::too_many_arguments)]
    pub(crate) fn new(
        id: RegionId,
        site: Point,
        boundary: Vec<Point>,
        centroid: Point,
        area: f64,
        neighbors: Vec<RegionId>,
        is_border: bool,
        owner: Faction,
        strength: u32,
    ) -> Region {
        Region {
            id,
            site,
            boundary,
            centroid,
            area,
            neighbors,
            is_border,
            owner,
            strength,
        }
    }

    pub fn id(&self) -> RegionId {
        self.id
    }

    /// The seed point this region grew from.
    pub fn site(&self) -> Point {
        self.site
    }

    /// Ordered vertex loop of the polygon, implicitly closed.
    pub fn boundary(&self) -> &[Point] {
        &self.boundary
    }

    /// Area-weighted center, precomputed at generation.
    pub fn centroid(&self) -> Point {
        self.centroid
    }

    /// Unsigned polygon area.
    pub fn area(&self) -> f64 {
        self.area
    }

    /// Sorted ids of regions sharing a boundary edge.
    pub fn neighbors(&self) -> &[RegionId] {
        &self.neighbors
    }

    /// True if any boundary edge lies on the outer bounds.
    pub fn is_border(&self) -> bool {
        self.is_border
    }

    pub fn owner(&self) -> Faction {
        self.owner
    }

    /// Armies present; never negative.
    pub fn strength(&self) -> u32 {
        self.strength
    }

    /// Membership test against the sorted neighbor list.
    pub fn is_neighbor(&self, other: RegionId) -> bool {
        self.neighbors.binary_search(&other).is_ok()
    }

    pub(crate) fn set_owner(&mut self, owner: Faction) {
        self.owner = owner;
    }

    pub(crate) fn set_strength(&mut self, strength: u32) {
        self.strength = strength;
    }

    pub(crate) fn add_strength(&mut self, amount: u32) {
        self.strength += amount;
    }
}

/// The full set of regions plus the bounds they were generated in.
///
/// Created once at session start and never regenerated; only region owners
/// and strengths change afterwards.
#[derive(Debug, Clone)]
pub struct Field {
    bounds: Bounds,
    regions: Vec<Region>,
}

impl Field {
    pub(crate) fn new(bounds: Bounds, regions: Vec<Region>) -> Field {
        Field { bounds, regions }
    }

    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    pub fn len(&self) -> usize {
        self.regions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }

    pub fn region(&self, id: RegionId) -> Option<&Region> {
        self.regions.get(id.index())
    }

    pub(crate) fn region_mut(&mut self, id: RegionId) -> Option<&mut Region> {
        self.regions.get_mut(id.index())
    }

    pub fn regions(&self) -> impl Iterator<Item = &Region> {
        self.regions.iter()
    }

    /// Regions currently controlled by the given faction.
    pub fn owned_by(&self, faction: Faction) -> impl Iterator<Item = &Region> {
        self.regions.iter().filter(move |r| r.owner == faction)
    }
}
