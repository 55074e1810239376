use geo::GeodesicDistance;

use crate::models::Coordinate;

/// Lower bound on the length of one degree of latitude, in meters.
/// Kept below the true minimum (~110 574 m) so the box never undershoots.
const METERS_PER_DEGREE_LOWER: f64 = 110_000.0;

/// Extra slack applied to the pre-filter box
const BBOX_MARGIN: f64 = 1.05;

/// Geospatial bounding box in degrees
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub min_lat: f64,
    pub max_lat: f64,
    pub min_lon: f64,
    pub max_lon: f64,
}

/// Geodesic distance between two points in meters
///
/// Uses Karney's algorithm on the WGS84 ellipsoid, so identical points give
/// exactly zero and the result is symmetric.
#[inline]
pub fn geodesic_distance(from: Coordinate, to: Coordinate) -> f64 {
    from.to_point().geodesic_distance(&to.to_point())
}

/// Calculate a bounding box that contains every point within `radius_m`
///
/// This is much cheaper than the geodesic and is only used as a pre-filter,
/// so it is deliberately loose: a point inside the radius is always inside
/// the box. Boxes that would cross a pole or the antimeridian fall back to
/// the full longitude range.
pub fn calculate_bounding_box(center: Coordinate, radius_m: f64) -> BoundingBox {
    let lat_delta = radius_m * BBOX_MARGIN / METERS_PER_DEGREE_LOWER;

    // Longitude degrees shrink towards the poles; size the box for its widest row
    let widest_lat = (center.latitude().abs() + lat_delta).min(90.0);
    let cos = widest_lat.to_radians().cos();

    let (min_lon, max_lon) = if cos <= f64::EPSILON {
        (-180.0, 180.0)
    } else {
        let lon_delta = lat_delta / cos;
        let min_lon = center.longitude() - lon_delta;
        let max_lon = center.longitude() + lon_delta;
        if min_lon < -180.0 || max_lon > 180.0 {
            (-180.0, 180.0)
        } else {
            (min_lon, max_lon)
        }
    };

    BoundingBox {
        min_lat: (center.latitude() - lat_delta).max(-90.0),
        max_lat: (center.latitude() + lat_delta).min(90.0),
        min_lon,
        max_lon,
    }
}

/// Check if a point is within a bounding box
#[inline]
pub fn is_within_bounding_box(point: Coordinate, bbox: &BoundingBox) -> bool {
    point.latitude() >= bbox.min_lat
        && point.latitude() <= bbox.max_lat
        && point.longitude() >= bbox.min_lon
        && point.longitude() <= bbox.max_lon
}

#[cfg(test)]
mod tests {
    use super::*;

    fn coord(lat: f64, lon: f64) -> Coordinate {
        Coordinate::new(lat, lon).unwrap()
    }

    #[test]
    fn test_geodesic_distance() {
        // London to Paris, roughly 343.5 km
        let london = coord(51.5074, -0.1278);
        let paris = coord(48.8566, 2.3522);

        let distance = geodesic_distance(london, paris);
        assert!((distance - 343_500.0).abs() < 2_000.0, "got {}", distance);
    }

    #[test]
    fn test_zero_and_symmetric() {
        let a = coord(48.8584, 2.2945);
        let b = coord(48.8606, 2.3376);

        assert_eq!(geodesic_distance(a, a), 0.0);
        assert!(geodesic_distance(a, b) > 0.0);
        assert!((geodesic_distance(a, b) - geodesic_distance(b, a)).abs() < 1e-6);
    }

    #[test]
    fn test_bounding_box_contains_radius() {
        let center = coord(48.8566, 2.3522);
        let bbox = calculate_bounding_box(center, 1_000.0);

        // Points exactly 1 km north and east must fall inside
        let north = coord(48.8566 + 1_000.0 / 111_000.0, 2.3522);
        let east = coord(48.8566, 2.3522 + 1_000.0 / (111_320.0 * 48.8566_f64.to_radians().cos()));
        assert!(is_within_bounding_box(north, &bbox));
        assert!(is_within_bounding_box(east, &bbox));
        assert!(!is_within_bounding_box(coord(48.9, 2.3522), &bbox));
    }

    #[test]
    fn test_bounding_box_near_pole_and_antimeridian() {
        let polar = calculate_bounding_box(coord(89.99, 0.0), 5_000.0);
        assert_eq!((polar.min_lon, polar.max_lon), (-180.0, 180.0));
        assert_eq!(polar.max_lat, 90.0);

        let dateline = calculate_bounding_box(coord(0.0, 179.999), 5_000.0);
        assert!(is_within_bounding_box(coord(0.0, -179.999), &dateline));
    }
}
