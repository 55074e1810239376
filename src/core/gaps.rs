use geo::{Area, Centroid, Contains, Coord, Intersects, Line, LineString, Point, Polygon};

use crate::core::tessellation::Tessellation;
use crate::error::{GeometryError, SanitationError};
use crate::models::{FacilityDataset, GapCandidate};

/// Minimum number of facilities for a meaningful tessellation
pub const MIN_FACILITIES: usize = 3;

/// Cells smaller than this (square degrees) count as zero-area
const MIN_CELL_AREA: f64 = 1e-12;

/// Outcome of one gap analysis run
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GapAnalysis {
    pub candidates: Vec<GapCandidate>,
    /// Cells skipped because their polygon could not be built or measured
    pub warnings: Vec<GeometryError>,
    pub cells_total: usize,
    pub cells_bounded: usize,
}

/// Suggests installation sites from the Voronoi cells of existing facilities
///
/// # Pipeline Stages
/// 1. Tessellate facility positions in the (latitude, longitude) plane
/// 2. Keep bounded cells and close them into polygons
/// 3. Drop invalid polygons; flag those with no facility strictly inside
/// 4. Emit the centroid of each flagged polygon
///
/// The occupancy test in stage 3 looks at every facility in the dataset, not
/// only the cell's own generator.
#[derive(Debug, Clone, Copy, Default)]
pub struct SpatialGapAnalyzer;

impl SpatialGapAnalyzer {
    pub fn new() -> Self {
        Self
    }

    /// Run the analysis over the whole dataset
    ///
    /// Fails only when the dataset has fewer than three facilities. Geometry
    /// problems in individual cells are logged, returned in
    /// [`GapAnalysis::warnings`], and do not stop the run.
    pub fn analyze(&self, dataset: &FacilityDataset) -> Result<GapAnalysis, SanitationError> {
        if dataset.len() < MIN_FACILITIES {
            return Err(SanitationError::InsufficientPoints { found: dataset.len() });
        }

        let coordinates = dataset.coordinates();
        let tessellation = Tessellation::build(&coordinates)?;

        let occupants: Vec<Point<f64>> = coordinates.iter().map(|c| Point::from(c.to_planar())).collect();
        let facilities = dataset.as_slice();

        let mut analysis = GapAnalysis {
            cells_total: tessellation.cells().len(),
            ..GapAnalysis::default()
        };

        for cell in tessellation.bounded_cells() {
            analysis.cells_bounded += 1;
            let facility_id = facilities[cell.generator_index].id;

            let outcome = cell_polygon(&cell.vertices, facility_id)
                .and_then(|polygon| gap_candidate(&polygon, &occupants, facility_id));

            match outcome {
                Ok(Some(candidate)) => analysis.candidates.push(candidate),
                Ok(None) => {}
                Err(e) => {
                    tracing::warn!("Skipping Voronoi cell: {}", e);
                    analysis.warnings.push(e);
                }
            }
        }

        tracing::info!(
            "Gap analysis: {} facilities, {} cells ({} bounded), {} candidates, {} warnings",
            dataset.len(),
            analysis.cells_total,
            analysis.cells_bounded,
            analysis.candidates.len(),
            analysis.warnings.len()
        );

        Ok(analysis)
    }
}

/// Close a cell's vertex ring into a simple polygon
pub fn cell_polygon(vertices: &[Coord<f64>], facility_id: usize) -> Result<Polygon<f64>, GeometryError> {
    if vertices.len() < 3 {
        return Err(GeometryError::Degenerate { facility_id });
    }

    // Polygon::new closes the ring
    let polygon = Polygon::new(LineString::from(vertices.to_vec()), vec![]);

    if polygon.unsigned_area() < MIN_CELL_AREA {
        return Err(GeometryError::ZeroArea { facility_id });
    }
    if is_self_intersecting(polygon.exterior()) {
        return Err(GeometryError::SelfIntersecting { facility_id });
    }

    Ok(polygon)
}

/// Classify a valid cell polygon
///
/// Returns the centroid candidate when no occupant lies strictly inside the
/// polygon (points on the boundary do not count), `None` otherwise.
pub fn gap_candidate(
    polygon: &Polygon<f64>,
    occupants: &[Point<f64>],
    facility_id: usize,
) -> Result<Option<GapCandidate>, GeometryError> {
    if occupants.iter().any(|point| polygon.contains(point)) {
        return Ok(None);
    }

    let centroid = polygon
        .centroid()
        .filter(|c| c.x().is_finite() && c.y().is_finite())
        .ok_or(GeometryError::NoCentroid { facility_id })?;

    Ok(Some(GapCandidate {
        latitude: centroid.x(),
        longitude: centroid.y(),
        facility_id,
        cell_area: polygon.unsigned_area(),
    }))
}

/// Check a closed ring for crossings between non-adjacent edges
fn is_self_intersecting(ring: &LineString<f64>) -> bool {
    let edges: Vec<Line<f64>> = ring.lines().collect();
    let n = edges.len();

    for i in 0..n {
        for j in (i + 2)..n {
            // First and last edges share the closing vertex
            if i == 0 && j == n - 1 {
                continue;
            }
            if edges[i].intersects(&edges[j]) {
                return true;
            }
        }
    }
    false
}
