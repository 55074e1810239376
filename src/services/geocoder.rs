use thiserror::Error;

use crate::error::SanitationError;
use crate::models::QueryPoint;

/// Errors a geocoding backend can report
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GeocodeError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Geocoder unavailable: {0}")]
    Unavailable(String),
}

/// Address-to-coordinate lookup
///
/// No implementation ships with this crate; callers plug in their own
/// backend (Nominatim, a fixture table, ...).
pub trait Geocoder {
    fn geocode(&self, address: &str) -> Result<QueryPoint, GeocodeError>;
}

/// Turn a free-text address into a search origin
///
/// A blank address is a missing query point; an address the backend cannot
/// place is `NotFound`. Neither falls back to a default location.
pub fn resolve_query_point<G: Geocoder + ?Sized>(
    geocoder: &G,
    address: &str,
) -> Result<QueryPoint, SanitationError> {
    let address = address.trim();
    if address.is_empty() {
        return Err(SanitationError::MissingQueryPoint);
    }

    match geocoder.geocode(address) {
        Ok(point) => Ok(point),
        Err(GeocodeError::NotFound(_)) => {
            tracing::info!("Address could not be geocoded: {}", address);
            Err(SanitationError::NotFound(address.to_string()))
        }
        Err(GeocodeError::Unavailable(reason)) => {
            tracing::warn!("Geocoder unavailable for {}: {}", address, reason);
            Err(SanitationError::NotFound(address.to_string()))
        }
    }
}
