use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::domain::{Availability, Tariff};

/// Request to search facilities around a point
///
/// Filter fields left out accept every category.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct SearchRequest {
    #[serde(default)]
    pub latitude: Option<f64>,
    #[serde(default)]
    pub longitude: Option<f64>,
    #[serde(rename = "maxDistanceM", alias = "max_distance_m", default)]
    #[validate(range(exclusive_min = 0.0))]
    pub max_distance_m: Option<f64>,
    #[serde(default)]
    pub tariff: Option<Vec<Tariff>>,
    #[serde(default)]
    pub pmr: Option<Vec<Availability>>,
    #[serde(rename = "babyChanging", alias = "baby_changing", default)]
    pub baby_changing: Option<Vec<Availability>>,
    #[serde(default)]
    #[validate(range(min = 1, max = 500))]
    pub limit: Option<usize>,
}
