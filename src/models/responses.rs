use serde::{Deserialize, Serialize};

use crate::models::dataset::{DatasetStats, ObservedCategories};
use crate::models::domain::{GapCandidate, MapMarker, SearchHit};

/// Response for the search endpoint
#[derive(Debug, Clone, Serialize)]
pub struct SearchResponse<'a> {
    pub results: Vec<SearchHit<'a>>,
    pub markers: Vec<MapMarker>,
    #[serde(rename = "totalResults")]
    pub total_results: usize,
}

/// Response for the gap analysis endpoint
#[derive(Debug, Clone, Serialize)]
pub struct GapsResponse {
    pub candidates: Vec<GapCandidate>,
    pub markers: Vec<MapMarker>,
    pub warnings: Vec<String>,
    #[serde(rename = "cellsTotal")]
    pub cells_total: usize,
    #[serde(rename = "cellsBounded")]
    pub cells_bounded: usize,
}

/// Dataset overview
#[derive(Debug, Clone, Serialize)]
pub struct StatsResponse {
    pub stats: DatasetStats,
    pub categories: ObservedCategories,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub timestamp: chrono::DateTime<chrono::Utc>,
    pub facilities: usize,
}

/// Error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    #[serde(rename = "statusCode")]
    pub status_code: u16,
}
