// Core algorithm exports
pub mod distance;
pub mod filters;
pub mod gaps;
pub mod search;
pub mod tessellation;

pub use distance::{calculate_bounding_box, geodesic_distance, is_within_bounding_box, BoundingBox};
pub use filters::{AttributeFilters, CategoryFilter};
pub use gaps::{GapAnalysis, SpatialGapAnalyzer};
pub use search::ProximitySearchEngine;
pub use tessellation::{Tessellation, VoronoiCell};
