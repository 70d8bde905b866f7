//! Bounded Voronoi partition of the field rectangle.
//!
//! Each seed site gets the convex cell of points closer to it than to any
//! other site, clipped to the bounds: the bounds rectangle cut against the
//! perpendicular-bisector half-plane of every other site, nearest first with
//! an early exit once no remaining bisector can reach the cell. Every cell
//! edge is labeled with the site across it, which is exactly the adjacency
//! record the region graph builder consumes.

use rand::Rng;
use thiserror::Error;

use super::geom::{convex_contains, Bounds, Point};

/// Tolerance for the half-plane membership test during clipping.
const CLIP_EPSILON: f64 = 1e-9;

/// Squared distance under which two clip vertices collapse into one.
const DEDUPE_EPSILON_SQ: f64 = 1e-12;

/// Candidate attempts allowed per requested site before giving up.
const SITE_ATTEMPTS_PER_SITE: usize = 64;

/// Side length of the sample grid used by the coverage check.
const COVERAGE_GRID: usize = 16;

/// Slack admitted when testing loose (gap) coverage membership.
const COVERAGE_SLACK: f64 = 1e-6;

/// A failure while building or verifying the partition.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum PartitionError {
    #[error("placed {placed} of {requested} sites after {attempts} attempts")]
    SitePlacement {
        requested: usize,
        placed: usize,
        attempts: usize,
    },
    #[error("cell for site {site} degenerated to {vertices} vertices")]
    DegenerateCell { site: usize, vertices: usize },
    #[error("sample point ({x:.3}, {y:.3}) is covered by no cell")]
    CoverageGap { x: f64, y: f64 },
    #[error("sample point ({x:.3}, {y:.3}) lies strictly inside {count} cells")]
    CoverageOverlap { x: f64, y: f64, count: usize },
}

/// One convex polygon of the partition, tied to its generating site.
#[derive(Debug, Clone)]
pub struct Cell {
    /// The generating seed point.
    pub site: Point,
    /// Counter-clockwise vertex loop, implicitly closed.
    pub vertices: Vec<Point>,
    /// For edge `i` (from `vertices[i]` to the next vertex): the index of the
    /// site across that edge, or `None` when the edge lies on the bounds.
    pub edge_neighbors: Vec<Option<usize>>,
}

/// Draws `count` seed points uniformly at random within the bounds.
///
/// Candidates closer than a minimum separation to an already-placed site are
/// rejected and redrawn, so duplicate or near-duplicate placement cannot
/// produce a degenerate cell. Exhausting the retry budget is an error.
pub fn sample_sites<R: Rng>(
    rng: &mut R,
    bounds: Bounds,
    count: usize,
) -> Result<Vec<Point>, PartitionError> {
    let separation = 0.25 * (bounds.area() / count.max(1) as f64).sqrt();
    let min_sep_sq = separation * separation;
    let budget = count * SITE_ATTEMPTS_PER_SITE;

    let mut sites: Vec<Point> = Vec::with_capacity(count);
    let mut attempts = 0;
    while sites.len() < count {
        if attempts >= budget {
            return Err(PartitionError::SitePlacement {
                requested: count,
                placed: sites.len(),
                attempts,
            });
        }
        attempts += 1;
        let candidate = Point::new(
            rng.gen::<f64>() * bounds.width,
            rng.gen::<f64>() * bounds.height,
        );
        // Strict comparison: with a zero separation (degenerate bounds) an
        // exact duplicate must still be rejected.
        if sites.iter().all(|s| s.distance_sq(candidate) > min_sep_sq) {
            sites.push(candidate);
        }
    }
    Ok(sites)
}

/// Builds one cell per site, exactly tiling the bounds.
pub fn partition(bounds: Bounds, sites: &[Point]) -> Result<Vec<Cell>, PartitionError> {
    (0..sites.len())
        .map(|i| cell_for_site(bounds, sites, i))
        .collect()
}

fn cell_for_site(bounds: Bounds, sites: &[Point], index: usize) -> Result<Cell, PartitionError> {
    let site = sites[index];

    // Start from the bounds rectangle; every edge is initially an outer edge.
    let mut poly: Vec<(Point, Option<usize>)> =
        bounds.corners().iter().map(|&p| (p, None)).collect();

    let mut others: Vec<usize> = (0..sites.len()).filter(|&j| j != index).collect();
    others.sort_by(|&a, &b| {
        site.distance_sq(sites[a])
            .total_cmp(&site.distance_sq(sites[b]))
    });

    for j in others {
        // A bisector at distance d cuts the cell only while some vertex is
        // farther than d/2 from the site; sites are sorted, so stop there.
        let max_radius_sq = poly
            .iter()
            .map(|(p, _)| site.distance_sq(*p))
            .fold(0.0, f64::max);
        if site.distance_sq(sites[j]) > 4.0 * max_radius_sq {
            break;
        }

        poly = clip_bisector(&poly, site, sites[j], j);
        dedupe(&mut poly);
        if poly.len() < 3 {
            return Err(PartitionError::DegenerateCell {
                site: index,
                vertices: poly.len(),
            });
        }
    }

    let (vertices, edge_neighbors) = poly.into_iter().unzip();
    Ok(Cell {
        site,
        vertices,
        edge_neighbors,
    })
}

/// Clips `poly` to the half-plane of points closer to `site` than `other`,
/// labeling the newly created edge with `other_idx`.
fn clip_bisector(
    poly: &[(Point, Option<usize>)],
    site: Point,
    other: Point,
    other_idx: usize,
) -> Vec<(Point, Option<usize>)> {
    let mid = site.midpoint(other);
    let nx = other.x - site.x;
    let ny = other.y - site.y;
    // Signed coordinate along the bisector normal; the kept side is <= 0.
    let side = |p: Point| (p.x - mid.x) * nx + (p.y - mid.y) * ny;

    let mut out = Vec::with_capacity(poly.len() + 1);
    for k in 0..poly.len() {
        let (cur, label) = poly[k];
        let (next, _) = poly[(k + 1) % poly.len()];
        let side_cur = side(cur);
        let side_next = side(next);
        let cur_in = side_cur <= CLIP_EPSILON;
        let next_in = side_next <= CLIP_EPSILON;

        if cur_in {
            out.push((cur, label));
            if !next_in {
                // Leaving the half-plane: the cut edge starts here.
                out.push((intersect(cur, next, side_cur, side_next), Some(other_idx)));
            }
        } else if next_in {
            // Re-entering: the surviving tail of this edge keeps its label.
            out.push((intersect(cur, next, side_cur, side_next), label));
        }
    }
    out
}

fn intersect(a: Point, b: Point, side_a: f64, side_b: f64) -> Point {
    let t = side_a / (side_a - side_b);
    Point::new(a.x + t * (b.x - a.x), a.y + t * (b.y - a.y))
}

/// Drops zero-length edges left behind when a bisector grazes a vertex, so a
/// corner where cells merely touch never reads as a shared edge.
fn dedupe(poly: &mut Vec<(Point, Option<usize>)>) {
    let mut k = 0;
    while poly.len() > 1 && k < poly.len() {
        let next = (k + 1) % poly.len();
        if poly[k].0.distance_sq(poly[next].0) < DEDUPE_EPSILON_SQ {
            poly.remove(k);
        } else {
            k += 1;
        }
    }
}

/// Verifies the exactly-once tiling invariant on a deterministic sample grid:
/// every sample point lies inside at least one cell (with outward tolerance)
/// and strictly inside at most one.
pub fn verify_coverage(bounds: Bounds, cells: &[Cell]) -> Result<(), PartitionError> {
    for row in 0..COVERAGE_GRID {
        for col in 0..COVERAGE_GRID {
            let p = Point::new(
                (col as f64 + 0.5) * bounds.width / COVERAGE_GRID as f64,
                (row as f64 + 0.5) * bounds.height / COVERAGE_GRID as f64,
            );
            let covered = cells
                .iter()
                .filter(|c| convex_contains(&c.vertices, p, COVERAGE_SLACK))
                .count();
            if covered == 0 {
                return Err(PartitionError::CoverageGap { x: p.x, y: p.y });
            }
            let strict = cells
                .iter()
                .filter(|c| convex_contains(&c.vertices, p, -COVERAGE_SLACK))
                .count();
            if strict > 1 {
                return Err(PartitionError::CoverageOverlap {
                    x: p.x,
                    y: p.y,
                    count: strict,
                });
            }
        }
    }
    Ok(())
}
