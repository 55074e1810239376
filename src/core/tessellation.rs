//! Planar Voronoi tessellation over facility positions.
//!
//! Generators are placed at (latitude, longitude) used directly as (x, y).
//! Earth curvature is ignored, so cell shapes distort as the analysed area
//! grows or moves away from the equator.
//!
//! The diagram is the dual of a Delaunay triangulation: every finite Voronoi
//! vertex is the circumcenter of a Delaunay triangle, and a generator on the
//! convex hull owns an unbounded cell.

use geo::Coord;
use spade::{DelaunayTriangulation, HasPosition, Point2, Triangulation};

use crate::error::SanitationError;
use crate::models::Coordinate;

/// Vertices closer than this (in degrees) are treated as one
const VERTEX_EPSILON: f64 = 1e-9;

/// Delaunay vertex carrying the index of the input point it came from
#[derive(Debug, Clone, Copy)]
struct Site {
    position: Point2<f64>,
    index: usize,
}

impl HasPosition for Site {
    type Scalar = f64;

    fn position(&self) -> Point2<f64> {
        self.position
    }
}

/// A single Voronoi cell.
#[derive(Debug, Clone, PartialEq)]
pub struct VoronoiCell {
    /// Index of the generator point in the input slice.
    pub generator_index: usize,
    /// Finite cell vertices ordered counter-clockwise around the generator.
    /// For unbounded cells only the finite part is listed.
    pub vertices: Vec<Coord<f64>>,
    /// False when the cell reaches the outer face of the diagram.
    pub bounded: bool,
}

/// A planar Voronoi diagram.
#[derive(Debug, Clone)]
pub struct Tessellation {
    generators: Vec<Coord<f64>>,
    vertices: Vec<Coord<f64>>,
    cells: Vec<VoronoiCell>,
}

impl Tessellation {
    /// Compute the diagram for the given positions.
    ///
    /// Points sharing an exact position collapse into one generator (the last
    /// one supplied wins), so there can be fewer cells than inputs. Collinear
    /// input is accepted and yields only unbounded cells.
    pub fn build(points: &[Coordinate]) -> Result<Self, SanitationError> {
        let mut triangulation: DelaunayTriangulation<Site> = DelaunayTriangulation::new();

        for (index, point) in points.iter().enumerate() {
            let planar = point.to_planar();
            triangulation
                .insert(Site {
                    position: Point2::new(planar.x, planar.y),
                    index,
                })
                .map_err(|e| {
                    SanitationError::InvalidCoordinate(format!("{} rejected by triangulation: {:?}", point, e))
                })?;
        }

        let vertices: Vec<Coord<f64>> = triangulation
            .inner_faces()
            .map(|face| to_coord(face.circumcenter()))
            .collect();

        let mut cells: Vec<VoronoiCell> = triangulation
            .voronoi_faces()
            .map(|face| {
                let site = *face.as_delaunay_vertex().data();

                let mut bounded = true;
                let mut ring = Vec::new();
                for edge in face.adjacent_edges() {
                    match edge.from().position() {
                        Some(position) => ring.push(to_coord(position)),
                        None => bounded = false,
                    }
                }

                // A lone generator owns the whole plane
                if ring.is_empty() {
                    bounded = false;
                }

                let generator = to_coord(site.position);
                VoronoiCell {
                    generator_index: site.index,
                    vertices: order_vertices_ccw(generator, ring),
                    bounded,
                }
            })
            .collect();

        cells.sort_by_key(|cell| cell.generator_index);

        tracing::debug!(
            "Tessellated {} points into {} cells ({} bounded, {} finite vertices)",
            points.len(),
            cells.len(),
            cells.iter().filter(|c| c.bounded).count(),
            vertices.len()
        );

        Ok(Self {
            generators: points.iter().map(|p| p.to_planar()).collect(),
            vertices,
            cells,
        })
    }

    /// Input positions in planar (latitude, longitude) form
    pub fn generators(&self) -> &[Coord<f64>] {
        &self.generators
    }

    /// Finite Voronoi vertices (Delaunay circumcenters)
    pub fn vertices(&self) -> &[Coord<f64>] {
        &self.vertices
    }

    /// Cells sorted by generator index
    pub fn cells(&self) -> &[VoronoiCell] {
        &self.cells
    }

    pub fn bounded_cells(&self) -> impl Iterator<Item = &VoronoiCell> {
        self.cells.iter().filter(|cell| cell.bounded)
    }
}

#[inline]
fn to_coord(point: Point2<f64>) -> Coord<f64> {
    Coord { x: point.x, y: point.y }
}

/// Order vertices counter-clockwise around a generator and merge coincident ones.
///
/// Cocircular generators produce several Delaunay triangles with the same
/// circumcenter; those show up here as repeated vertices.
fn order_vertices_ccw(generator: Coord<f64>, mut ring: Vec<Coord<f64>>) -> Vec<Coord<f64>> {
    let angle = |c: &Coord<f64>| (c.y - generator.y).atan2(c.x - generator.x);
    ring.sort_by(|a, b| angle(a).total_cmp(&angle(b)));

    let mut ordered: Vec<Coord<f64>> = Vec::with_capacity(ring.len());
    for vertex in ring {
        if ordered.last().map_or(true, |last| !coincident(*last, vertex)) {
            ordered.push(vertex);
        }
    }
    if ordered.len() > 1 && coincident(ordered[0], ordered[ordered.len() - 1]) {
        ordered.pop();
    }
    ordered
}

#[inline]
fn coincident(a: Coord<f64>, b: Coord<f64>) -> bool {
    (a.x - b.x).abs() <= VERTEX_EPSILON && (a.y - b.y).abs() <= VERTEX_EPSILON
}
