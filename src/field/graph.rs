//! Region adjacency derived from the partitioner's edge labels.

use super::partition::Cell;
use super::RegionId;

/// Neighbor list and border flag for one region.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RegionLinks {
    /// Sorted, deduplicated ids of regions sharing a boundary edge.
    pub neighbors: Vec<RegionId>,
    /// True if any boundary edge lies on the outer bounds.
    pub is_border: bool,
}

/// Re-indexes per-edge neighbor labels into a symmetric neighbor relation.
///
/// Each observed edge is inserted in both directions, so a sliver edge that
/// survived clipping on only one side still links both regions. A single pass
/// over the edge records; no pairwise polygon comparison.
pub fn link_regions(cells: &[Cell]) -> Vec<RegionLinks> {
    let mut links = vec![RegionLinks::default(); cells.len()];
    for (i, cell) in cells.iter().enumerate() {
        for neighbor in &cell.edge_neighbors {
            match neighbor {
                Some(j) => insert_edge(&mut links, i, *j),
                None => links[i].is_border = true,
            }
        }
    }
    links
}

/// Adds a bidirectional edge, keeping both neighbor lists sorted.
fn insert_edge(links: &mut [RegionLinks], a: usize, b: usize) {
    let id_a = RegionId(a as u32);
    let id_b = RegionId(b as u32);
    if let Err(pos) = links[a].neighbors.binary_search(&id_b) {
        links[a].neighbors.insert(pos, id_b);
    }
    if let Err(pos) = links[b].neighbors.binary_search(&id_a) {
        links[b].neighbors.insert(pos, id_a);
    }
}
