use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::SanitationError;

/// A validated WGS84 position in degrees
///
/// Latitude is in [-90, 90], longitude in [-180, 180], both finite.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Coordinate {
    latitude: f64,
    longitude: f64,
}

/// A search origin. Same invariants as any facility position.
pub type QueryPoint = Coordinate;

impl Coordinate {
    pub fn new(latitude: f64, longitude: f64) -> Result<Self, SanitationError> {
        if !latitude.is_finite() || !longitude.is_finite() {
            return Err(SanitationError::InvalidCoordinate(format!(
                "non-finite value ({}, {})",
                latitude, longitude
            )));
        }
        if !(-90.0..=90.0).contains(&latitude) {
            return Err(SanitationError::InvalidCoordinate(format!(
                "latitude {} out of range",
                latitude
            )));
        }
        if !(-180.0..=180.0).contains(&longitude) {
            return Err(SanitationError::InvalidCoordinate(format!(
                "longitude {} out of range",
                longitude
            )));
        }

        Ok(Self { latitude, longitude })
    }

    #[inline]
    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    #[inline]
    pub fn longitude(&self) -> f64 {
        self.longitude
    }

    /// Geographic point for geodesic math (x = longitude, y = latitude)
    #[inline]
    pub fn to_point(self) -> geo::Point<f64> {
        geo::Point::new(self.longitude, self.latitude)
    }

    /// Planar coordinate used by the tessellation (x = latitude, y = longitude)
    #[inline]
    pub fn to_planar(self) -> geo::Coord<f64> {
        geo::Coord {
            x: self.latitude,
            y: self.longitude,
        }
    }
}

/// Parses the `"[lat,lon]"` form used by the open-data export.
/// Brackets are optional and whitespace around each number is ignored.
impl FromStr for Coordinate {
    type Err = SanitationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim().trim_start_matches('[').trim_end_matches(']');
        let mut parts = trimmed.split(',');

        let (Some(lat), Some(lon), None) = (parts.next(), parts.next(), parts.next()) else {
            return Err(SanitationError::InvalidCoordinate(format!(
                "expected \"[lat,lon]\", got {:?}",
                s
            )));
        };

        let parse = |part: &str| {
            part.trim().parse::<f64>().map_err(|_| {
                SanitationError::InvalidCoordinate(format!("unparsable number {:?} in {:?}", part, s))
            })
        };

        Coordinate::new(parse(lat)?, parse(lon)?)
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{},{}]", self.latitude, self.longitude)
    }
}

/// Tariff category of a facility
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tariff {
    #[serde(alias = "Gratuit", alias = "gratuit")]
    Free,
    #[serde(alias = "Payant", alias = "payant")]
    Paid,
    Unknown,
}

impl Tariff {
    /// Map a raw dataset label to a category. Unrecognised labels are `Unknown`.
    pub fn from_label(label: &str) -> Self {
        match label.trim().to_lowercase().as_str() {
            "gratuit" | "free" => Tariff::Free,
            "payant" | "paid" => Tariff::Paid,
            _ => Tariff::Unknown,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Tariff::Free => "free",
            Tariff::Paid => "paid",
            Tariff::Unknown => "unknown",
        }
    }
}

impl fmt::Display for Tariff {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Yes/no attribute (PMR access, baby-changing table)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Availability {
    #[serde(alias = "Oui", alias = "oui")]
    Yes,
    #[serde(alias = "Non", alias = "non")]
    No,
    Unknown,
}

impl Availability {
    pub fn from_label(label: &str) -> Self {
        match label.trim().to_lowercase().as_str() {
            "oui" | "yes" => Availability::Yes,
            "non" | "no" => Availability::No,
            _ => Availability::Unknown,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Availability::Yes => "yes",
            Availability::No => "no",
            Availability::Unknown => "unknown",
        }
    }
}

impl fmt::Display for Availability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A public toilet with its fixed attribute set
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Facility {
    pub id: usize,
    #[serde(flatten)]
    pub coordinate: Coordinate,
    pub tariff: Tariff,
    #[serde(rename = "pmrAccessible")]
    pub pmr_accessible: Availability,
    #[serde(rename = "babyChanging")]
    pub baby_changing: Availability,
    #[serde(rename = "openingHours")]
    pub opening_hours: Option<String>,
    #[serde(rename = "locationDescription")]
    pub location_description: String,
    #[serde(rename = "facilityType")]
    pub facility_type: String,
}

/// One entry of a proximity search, borrowed from the dataset
#[derive(Debug, Clone, Copy, Serialize)]
pub struct SearchHit<'a> {
    pub facility: &'a Facility,
    #[serde(rename = "distanceM")]
    pub distance_m: f64,
}

impl SearchHit<'_> {
    pub fn to_marker(&self) -> MapMarker {
        MapMarker {
            lat: self.facility.coordinate.latitude(),
            lon: self.facility.coordinate.longitude(),
            category: self.facility.tariff.as_str().to_string(),
            label: format!("{:.0}m - {}", self.distance_m, self.facility.facility_type),
        }
    }
}

/// Distance-ordered search output
pub type SearchResult<'a> = Vec<SearchHit<'a>>;

/// Proposed installation site: centroid of an unserved Voronoi cell
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GapCandidate {
    pub latitude: f64,
    pub longitude: f64,
    /// Id of the facility whose cell produced this candidate
    #[serde(rename = "facilityId")]
    pub facility_id: usize,
    /// Planar cell area in square degrees
    #[serde(rename = "cellArea")]
    pub cell_area: f64,
}

impl GapCandidate {
    pub fn to_marker(&self) -> MapMarker {
        MapMarker {
            lat: self.latitude,
            lon: self.longitude,
            category: "gap".to_string(),
            label: "Proposed installation".to_string(),
        }
    }
}

/// Point marker handed to a map renderer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MapMarker {
    pub lat: f64,
    pub lon: f64,
    pub category: String,
    pub label: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_bracketed_coordinates() {
        let coord: Coordinate = "[48.8566,2.3522]".parse().unwrap();
        assert_eq!(coord.latitude(), 48.8566);
        assert_eq!(coord.longitude(), 2.3522);
    }

    #[test]
    fn test_parse_with_spaces() {
        let coord: Coordinate = " [48.85, 2.29 ] ".parse().unwrap();
        assert_eq!(coord.latitude(), 48.85);
        assert_eq!(coord.longitude(), 2.29);
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(matches!(
            "[48.85]".parse::<Coordinate>(),
            Err(SanitationError::InvalidCoordinate(_))
        ));
        assert!(matches!(
            "[abc,2.0]".parse::<Coordinate>(),
            Err(SanitationError::InvalidCoordinate(_))
        ));
        assert!(matches!(
            "[1,2,3]".parse::<Coordinate>(),
            Err(SanitationError::InvalidCoordinate(_))
        ));
    }

    #[test]
    fn test_out_of_range_rejected() {
        assert!(Coordinate::new(91.0, 0.0).is_err());
        assert!(Coordinate::new(0.0, -180.5).is_err());
        assert!(Coordinate::new(f64::NAN, 0.0).is_err());
        assert!(Coordinate::new(90.0, 180.0).is_ok());
    }

    #[test]
    fn test_labels() {
        assert_eq!(Tariff::from_label("Gratuit"), Tariff::Free);
        assert_eq!(Tariff::from_label("Payant"), Tariff::Paid);
        assert_eq!(Tariff::from_label("???"), Tariff::Unknown);
        assert_eq!(Availability::from_label("Oui"), Availability::Yes);
        assert_eq!(Availability::from_label(" non "), Availability::No);
        assert_eq!(Availability::from_label(""), Availability::Unknown);
    }

    #[test]
    fn test_planar_axes() {
        let coord = Coordinate::new(48.0, 2.0).unwrap();
        assert_eq!(coord.to_planar().x, 48.0);
        assert_eq!(coord.to_point().x(), 2.0);
    }
}
