use crate::core::{
    distance::{calculate_bounding_box, geodesic_distance, is_within_bounding_box},
    filters::AttributeFilters,
};
use crate::error::SanitationError;
use crate::models::{Coordinate, FacilityDataset, QueryPoint, SearchHit, SearchResult};

/// Distance-ranked, attribute-filtered facility lookup
///
/// # Pipeline Stages
/// 1. Attribute filtering (AND across dimensions, OR within one)
/// 2. Bounding box pre-filter
/// 3. Geodesic distance with an inclusive upper bound
/// 4. Stable ascending sort, optional truncation
///
/// The engine holds no per-request state and never touches the dataset, so a
/// single instance can serve concurrent callers.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProximitySearchEngine {
    max_results: Option<usize>,
}

impl ProximitySearchEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cap the number of hits returned by every search
    pub fn with_max_results(max_results: usize) -> Self {
        Self {
            max_results: Some(max_results),
        }
    }

    /// Find facilities within `max_distance_m` of `query`
    ///
    /// # Arguments
    /// * `query` - Search origin
    /// * `dataset` - Facilities to search
    /// * `max_distance_m` - Inclusive distance bound in meters, must be > 0
    /// * `filters` - Attribute predicates applied before distances are computed
    ///
    /// # Returns
    /// Hits sorted by ascending distance; ties keep dataset order. An empty
    /// result is not an error.
    pub fn search<'a>(
        &self,
        query: QueryPoint,
        dataset: &'a FacilityDataset,
        max_distance_m: f64,
        filters: &AttributeFilters,
    ) -> Result<SearchResult<'a>, SanitationError> {
        if !max_distance_m.is_finite() || max_distance_m <= 0.0 {
            return Err(SanitationError::InvalidDistance(max_distance_m));
        }

        let bbox = calculate_bounding_box(query, max_distance_m);

        let mut hits: Vec<SearchHit<'a>> = dataset
            .iter()
            // Stage 1: Attribute filtering
            .filter(|facility| filters.matches(facility))
            // Stage 2: Cheap geospatial pre-filter
            .filter(|facility| is_within_bounding_box(facility.coordinate, &bbox))
            // Stage 3: Exact distance bound
            .filter_map(|facility| {
                let distance_m = geodesic_distance(query, facility.coordinate);
                (distance_m <= max_distance_m).then_some(SearchHit { facility, distance_m })
            })
            .collect();

        // Stable sort keeps insertion order for equal distances
        hits.sort_by(|a, b| a.distance_m.total_cmp(&b.distance_m));

        if let Some(limit) = self.max_results {
            hits.truncate(limit);
        }

        tracing::debug!(
            "Search at {}: {} hits within {}m ({} facilities)",
            query,
            hits.len(),
            max_distance_m,
            dataset.len()
        );

        Ok(hits)
    }

    /// Search from raw degrees, validating the origin first
    pub fn search_at<'a>(
        &self,
        latitude: f64,
        longitude: f64,
        dataset: &'a FacilityDataset,
        max_distance_m: f64,
        filters: &AttributeFilters,
    ) -> Result<SearchResult<'a>, SanitationError> {
        let query = Coordinate::new(latitude, longitude)?;
        self.search(query, dataset, max_distance_m, filters)
    }

    /// Search from an origin that may not have been resolved
    ///
    /// A missing origin is a precondition failure, never a default location.
    pub fn search_from<'a>(
        &self,
        query: Option<QueryPoint>,
        dataset: &'a FacilityDataset,
        max_distance_m: f64,
        filters: &AttributeFilters,
    ) -> Result<SearchResult<'a>, SanitationError> {
        let query = query.ok_or(SanitationError::MissingQueryPoint)?;
        self.search(query, dataset, max_distance_m, filters)
    }
}
