use thiserror::Error;

/// Errors surfaced by the search and gap-analysis engines
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SanitationError {
    #[error("Invalid coordinate: {0}")]
    InvalidCoordinate(String),

    #[error("Voronoi analysis needs at least 3 facilities, found {found}")]
    InsufficientPoints { found: usize },

    #[error("Invalid max distance: {0} (must be finite and > 0)")]
    InvalidDistance(f64),

    #[error("Duplicate facility id: {0}")]
    DuplicateFacility(usize),

    #[error("Unknown {dimension} category: {value}")]
    UnknownCategory { dimension: &'static str, value: String },

    #[error("A query point is required")]
    MissingQueryPoint,

    #[error("Address not found: {0}")]
    NotFound(String),
}

/// Per-cell geometry failure during gap analysis
///
/// These never abort an analysis run; the affected cell is skipped and the
/// error is returned to the caller as a warning.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GeometryError {
    #[error("Cell of facility {facility_id}: fewer than 3 distinct vertices")]
    Degenerate { facility_id: usize },

    #[error("Cell of facility {facility_id}: zero-area polygon")]
    ZeroArea { facility_id: usize },

    #[error("Cell of facility {facility_id}: self-intersecting polygon")]
    SelfIntersecting { facility_id: usize },

    #[error("Cell of facility {facility_id}: centroid could not be computed")]
    NoCentroid { facility_id: usize },
}

impl GeometryError {
    /// Id of the facility that generated the offending cell
    pub fn facility_id(&self) -> usize {
        match self {
            GeometryError::Degenerate { facility_id }
            | GeometryError::ZeroArea { facility_id }
            | GeometryError::SelfIntersecting { facility_id }
            | GeometryError::NoCentroid { facility_id } => *facility_id,
        }
    }
}
