// Service exports
pub mod geocoder;
pub mod loader;

pub use geocoder::{resolve_query_point, GeocodeError, Geocoder};
pub use loader::{DatasetLoader, LoaderError};
