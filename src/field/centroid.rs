//! Polygon centroid and signed area via the shoelace formula.

use thiserror::Error;

use super::geom::Point;

/// Signed areas smaller than this are treated as zero.
const AREA_EPSILON: f64 = 1e-9;

/// A polygon whose centroid cannot be computed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum CentroidError {
    #[error("polygon has {0} vertices, need at least 3")]
    TooFewVertices(usize),
    #[error("polygon area is approximately zero")]
    ZeroArea,
}

/// Computes the area-weighted centroid and signed area of a vertex loop.
///
/// The loop is implicitly closed (last vertex connects to first). The signed
/// area is positive for counter-clockwise loops. Degenerate input returns an
/// error rather than dividing by a near-zero area; the field generator falls
/// back to the seed point in that case.
pub fn polygon_centroid(vertices: &[Point]) -> Result<(Point, f64), CentroidError> {
    if vertices.len() < 3 {
        return Err(CentroidError::TooFewVertices(vertices.len()));
    }

    let n = vertices.len();
    let mut area = 0.0;
    let mut cx = 0.0;
    let mut cy = 0.0;
    for i in 0..n {
        let a = vertices[i];
        let b = vertices[(i + 1) % n];
        let cross = a.x * b.y - b.x * a.y;
        area += 0.5 * cross;
        cx += (a.x + b.x) * cross;
        cy += (a.y + b.y) * cross;
    }

    if area.abs() < AREA_EPSILON {
        return Err(CentroidError::ZeroArea);
    }

    let scale = 1.0 / (6.0 * area);
    Ok((Point::new(cx * scale, cy * scale), area))
}
