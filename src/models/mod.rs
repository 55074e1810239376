// Model exports
pub mod dataset;
pub mod domain;
pub mod requests;
pub mod responses;

pub use dataset::{DatasetStats, FacilityDataset, ObservedCategories};
pub use domain::{Availability, Coordinate, Facility, GapCandidate, MapMarker, QueryPoint, SearchHit, SearchResult, Tariff};
pub use requests::SearchRequest;
pub use responses::{ErrorResponse, GapsResponse, HealthResponse, SearchResponse, StatsResponse};
