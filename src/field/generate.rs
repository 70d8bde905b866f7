//! Field generation: sites -> partition -> centroids -> graph -> regions.

use rand::rngs::SmallRng;
use rand::SeedableRng;
use thiserror::Error;
use tracing::{debug, warn};

use super::centroid::polygon_centroid;
use super::geom::{Bounds, Point};
use super::graph::{link_regions, RegionLinks};
use super::partition::{partition, sample_sites, verify_coverage, Cell, PartitionError};
use super::{Faction, Field, Region, RegionId};

/// Configuration for field generation, with the design defaults.
#[derive(Debug, Clone)]
pub struct FieldConfig {
    /// Extent of the field plane.
    pub bounds: Bounds,
    /// Number of seed points, one region each.
    pub region_count: usize,
    /// Initial strength of neutral regions.
    pub base_strength: u32,
    /// Initial strength of the two faction start regions.
    pub start_strength: u32,
    /// Anchor point whose nearest region starts as Red.
    pub red_anchor: Point,
    /// Anchor point whose nearest region starts as Blue.
    pub blue_anchor: Point,
    /// Random seed (0 = use entropy).
    pub seed: u64,
}

impl Default for FieldConfig {
    fn default() -> Self {
        FieldConfig {
            bounds: Bounds::new(100.0, 100.0),
            region_count: 100,
            base_strength: 50,
            start_strength: 200,
            red_anchor: Point::new(50.0, 0.0),
            blue_anchor: Point::new(50.0, 100.0),
            seed: 0,
        }
    }
}

/// A fatal failure while generating the field. The session must not start
/// on corrupt geometry.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum GenerateError {
    #[error("a field needs at least 2 regions, got {0}")]
    TooFewRegions(usize),
    #[error(transparent)]
    Partition(#[from] PartitionError),
    #[error("faction anchors both resolve to region {0}")]
    AnchorCollision(RegionId),
}

/// Generates a field from the configured random seed.
pub fn generate(config: &FieldConfig) -> Result<Field, GenerateError> {
    if config.region_count < 2 {
        return Err(GenerateError::TooFewRegions(config.region_count));
    }
    let mut rng = if config.seed == 0 {
        SmallRng::from_entropy()
    } else {
        SmallRng::seed_from_u64(config.seed)
    };
    let sites = sample_sites(&mut rng, config.bounds, config.region_count)?;
    generate_from_sites(config, sites)
}

/// Generates a field from explicit seed points.
///
/// This is the deterministic seam for tests and for embedders that bring
/// their own site source; the site list takes precedence over
/// `config.region_count`.
pub fn generate_from_sites(
    config: &FieldConfig,
    sites: Vec<Point>,
) -> Result<Field, GenerateError> {
    if sites.len() < 2 {
        return Err(GenerateError::TooFewRegions(sites.len()));
    }

    let cells = partition(config.bounds, &sites)?;
    verify_coverage(config.bounds, &cells)?;
    let links = link_regions(&cells);

    let mut regions = Vec::with_capacity(cells.len());
    for (i, (cell, link)) in cells.into_iter().zip(links).enumerate() {
        regions.push(build_region(i, cell, link, config.base_strength));
    }

    let red_start = nearest_region(&regions, config.red_anchor);
    let blue_start = nearest_region(&regions, config.blue_anchor);
    if red_start == blue_start {
        return Err(GenerateError::AnchorCollision(red_start));
    }
    for (id, faction) in [(red_start, Faction::Red), (blue_start, Faction::Blue)] {
        let start = &mut regions[id.index()];
        start.set_owner(faction);
        start.set_strength(config.start_strength);
    }

    debug!(
        regions = regions.len(),
        red_start = %red_start,
        blue_start = %blue_start,
        "field generated"
    );
    Ok(Field::new(config.bounds, regions))
}

/// Builds one neutral region from its cell and adjacency links. A cell
/// whose centroid cannot be computed keeps its site as the centroid and
/// reports zero area.
fn build_region(index: usize, cell: Cell, links: RegionLinks, base_strength: u32) -> Region {
    let (centroid, signed_area) = match polygon_centroid(&cell.vertices) {
        Ok(result) => result,
        Err(e) => {
            warn!(region = index, error = %e, "centroid failed, falling back to site");
            (cell.site, 0.0)
        }
    };
    Region::new(
        RegionId(index as u32),
        cell.site,
        cell.vertices,
        centroid,
        signed_area.abs(),
        links.neighbors,
        links.is_border,
        Faction::Neutral,
        base_strength,
    )
}

/// The region whose site is nearest the anchor by squared distance.
fn nearest_region(regions: &[Region], anchor: Point) -> RegionId {
    let mut best = RegionId(0);
    let mut best_distance = f64::INFINITY;
    for region in regions {
        let distance = region.site().distance_sq(anchor);
        if distance < best_distance {
            best_distance = distance;
            best = region.id();
        }
    }
    best
}
