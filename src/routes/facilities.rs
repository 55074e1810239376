use actix_web::{web, HttpResponse, Responder};
use std::sync::Arc;
use validator::Validate;

use crate::core::{AttributeFilters, CategoryFilter, ProximitySearchEngine, SpatialGapAnalyzer};
use crate::error::SanitationError;
use crate::models::{
    Coordinate, ErrorResponse, FacilityDataset, GapsResponse, HealthResponse, SearchRequest, SearchResponse,
    StatsResponse,
};

/// Search limits applied by the HTTP layer
#[derive(Debug, Clone, Copy)]
pub struct SearchLimits {
    pub default_max_distance_m: f64,
    pub max_distance_limit_m: f64,
    pub max_results: usize,
}

impl Default for SearchLimits {
    fn default() -> Self {
        Self {
            default_max_distance_m: 1_000.0,
            max_distance_limit_m: 2_000.0,
            max_results: 100,
        }
    }
}

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub dataset: Arc<FacilityDataset>,
    pub analyzer: SpatialGapAnalyzer,
    pub limits: SearchLimits,
}

impl AppState {
    pub fn new(dataset: Arc<FacilityDataset>, limits: SearchLimits) -> Self {
        Self {
            dataset,
            analyzer: SpatialGapAnalyzer::new(),
            limits,
        }
    }
}

/// Configure all facility-related routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        .route("/health", web::get().to(health_check))
        .route("/facilities/stats", web::get().to(dataset_stats))
        .route("/facilities/search", web::post().to(search_facilities))
        .route("/gaps", web::get().to(find_gaps));
}

fn error_response(err: &SanitationError) -> HttpResponse {
    let (status, error) = match err {
        SanitationError::InsufficientPoints { .. } => (422, "Insufficient facilities"),
        SanitationError::NotFound(_) => (404, "Address not found"),
        SanitationError::MissingQueryPoint => (400, "Missing query point"),
        SanitationError::UnknownCategory { .. } => (400, "Unknown category"),
        _ => (400, "Invalid request"),
    };

    let body = ErrorResponse {
        error: error.to_string(),
        message: err.to_string(),
        status_code: status,
    };

    match status {
        422 => HttpResponse::UnprocessableEntity().json(body),
        404 => HttpResponse::NotFound().json(body),
        _ => HttpResponse::BadRequest().json(body),
    }
}

/// Health check endpoint
async fn health_check(state: web::Data<AppState>) -> impl Responder {
    let status = if state.dataset.is_empty() { "degraded" } else { "healthy" };

    HttpResponse::Ok().json(HealthResponse {
        status: status.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: chrono::Utc::now(),
        facilities: state.dataset.len(),
    })
}

/// Dataset overview endpoint
///
/// GET /api/v1/facilities/stats
async fn dataset_stats(state: web::Data<AppState>) -> impl Responder {
    HttpResponse::Ok().json(StatsResponse {
        stats: state.dataset.stats(),
        categories: state.dataset.categories(),
    })
}

/// Proximity search endpoint
///
/// POST /api/v1/facilities/search
///
/// Request body:
/// ```json
/// {
///   "latitude": 48.8584,
///   "longitude": 2.2945,
///   "maxDistanceM": 1000,
///   "tariff": ["free"],
///   "pmr": ["yes"],
///   "babyChanging": ["yes", "no"],
///   "limit": 20
/// }
/// ```
/// Omitted filters accept every category.
async fn search_facilities(
    state: web::Data<AppState>,
    req: web::Json<SearchRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        tracing::info!("Validation failed for search request: {:?}", errors);
        return HttpResponse::BadRequest().json(ErrorResponse {
            error: "Validation failed".to_string(),
            message: errors.to_string(),
            status_code: 400,
        });
    }

    let query = match (req.latitude, req.longitude) {
        (Some(lat), Some(lon)) => match Coordinate::new(lat, lon) {
            Ok(point) => Some(point),
            Err(e) => return error_response(&e),
        },
        _ => None,
    };

    // Cap distance and result count at the configured limits
    let max_distance_m = req
        .max_distance_m
        .unwrap_or(state.limits.default_max_distance_m)
        .min(state.limits.max_distance_limit_m);
    let limit = req
        .limit
        .unwrap_or(state.limits.max_results)
        .min(state.limits.max_results);

    let filters = AttributeFilters {
        tariff: CategoryFilter::from_selection(req.tariff.as_deref()),
        pmr: CategoryFilter::from_selection(req.pmr.as_deref()),
        baby_changing: CategoryFilter::from_selection(req.baby_changing.as_deref()),
    };

    if let Err(e) = filters.validate(&state.dataset) {
        return error_response(&e);
    }

    let engine = ProximitySearchEngine::with_max_results(limit);
    let hits = match engine.search_from(query, &state.dataset, max_distance_m, &filters) {
        Ok(hits) => hits,
        Err(e) => return error_response(&e),
    };

    tracing::info!(
        "Returning {} facilities within {}m of {:?}",
        hits.len(),
        max_distance_m,
        query
    );

    HttpResponse::Ok().json(SearchResponse {
        markers: hits.iter().map(|hit| hit.to_marker()).collect(),
        total_results: hits.len(),
        results: hits,
    })
}

/// Installation gap analysis endpoint
///
/// GET /api/v1/gaps
///
/// Recomputed on every call; nothing is cached.
async fn find_gaps(state: web::Data<AppState>) -> impl Responder {
    let analysis = match state.analyzer.analyze(&state.dataset) {
        Ok(analysis) => analysis,
        Err(e) => {
            tracing::warn!("Gap analysis skipped: {}", e);
            return error_response(&e);
        }
    };

    HttpResponse::Ok().json(GapsResponse {
        markers: analysis.candidates.iter().map(|c| c.to_marker()).collect(),
        warnings: analysis.warnings.iter().map(|w| w.to_string()).collect(),
        candidates: analysis.candidates,
        cells_total: analysis.cells_total,
        cells_bounded: analysis.cells_bounded,
    })
}
