//! Sanimap - public toilet proximity search and coverage-gap analysis
//!
//! This library provides the two engines behind the Sanimap service:
//! a geodesic, attribute-filtered proximity search and a Voronoi-based
//! analysis that proposes sites for new facilities.

pub mod config;
pub mod core;
pub mod error;
pub mod models;
pub mod routes;
pub mod services;

// Re-export commonly used types
pub use self::core::{AttributeFilters, CategoryFilter, GapAnalysis, ProximitySearchEngine, SpatialGapAnalyzer, geodesic_distance};
pub use error::{GeometryError, SanitationError};
pub use models::{Coordinate, Facility, FacilityDataset, GapCandidate, MapMarker, QueryPoint, SearchHit, SearchResult};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_library_exports() {
        // Verify that the library exports work correctly
        let point: Coordinate = "[48.8566,2.3522]".parse().unwrap();
        assert_eq!(geodesic_distance(point, point), 0.0);
    }
}
