use serde::Deserialize;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use thiserror::Error;

use crate::error::SanitationError;
use crate::models::{Availability, Coordinate, Facility, FacilityDataset, Tariff};

/// Placeholder values the open-data export uses for unknown opening hours
const NO_INFO_SENTINELS: [&str; 2] = ["pas d'info", "no info"];

/// Errors that can occur while loading the facility dataset
#[derive(Debug, Error)]
pub enum LoaderError {
    #[error("Failed to open dataset: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Row {row}: {source}")]
    Row {
        row: usize,
        #[source]
        source: SanitationError,
    },

    #[error("Invalid dataset: {0}")]
    Dataset(#[from] SanitationError),
}

/// One CSV row as exported by the open-data portal
#[derive(Debug, Clone, Deserialize)]
struct FacilityRow {
    coordinates: String,
    #[serde(default)]
    tarif: String,
    #[serde(default)]
    accessibilite_pmr: String,
    #[serde(default)]
    relais_bebe: String,
    #[serde(default)]
    horaires: Option<String>,
    #[serde(default)]
    indications_localisation: Option<String>,
    #[serde(rename = "type", default)]
    facility_type: Option<String>,
}

impl FacilityRow {
    fn into_facility(self, id: usize) -> Result<Facility, SanitationError> {
        let coordinate: Coordinate = self.coordinates.parse()?;

        let opening_hours = self
            .horaires
            .map(|h| h.trim().to_string())
            .filter(|h| !h.is_empty() && !NO_INFO_SENTINELS.contains(&h.to_lowercase().as_str()));

        Ok(Facility {
            id,
            coordinate,
            tariff: Tariff::from_label(&self.tarif),
            pmr_accessible: Availability::from_label(&self.accessibilite_pmr),
            baby_changing: Availability::from_label(&self.relais_bebe),
            opening_hours,
            location_description: self.indications_localisation.unwrap_or_default().trim().to_string(),
            facility_type: self.facility_type.unwrap_or_default().trim().to_string(),
        })
    }
}

/// Builds a [`FacilityDataset`] from the CSV export
///
/// Each facility's id is its zero-based data row index, so ids follow file
/// order and are unique by construction.
#[derive(Debug, Clone, Copy)]
pub struct DatasetLoader {
    delimiter: u8,
}

impl Default for DatasetLoader {
    fn default() -> Self {
        Self { delimiter: b',' }
    }
}

impl DatasetLoader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_delimiter(delimiter: u8) -> Self {
        Self { delimiter }
    }

    /// Load the dataset from a file on disk
    pub fn load_from_path<P: AsRef<Path>>(&self, path: P) -> Result<FacilityDataset, LoaderError> {
        let path = path.as_ref();
        tracing::info!("Loading facility dataset from {}", path.display());
        let file = File::open(path)?;
        self.load_from_reader(file)
    }

    /// Load the dataset from any CSV source with a header row
    pub fn load_from_reader<R: Read>(&self, reader: R) -> Result<FacilityDataset, LoaderError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .delimiter(self.delimiter)
            .trim(csv::Trim::Headers)
            .from_reader(reader);

        let mut facilities = Vec::new();
        for (index, record) in csv_reader.deserialize::<FacilityRow>().enumerate() {
            let row = record?;
            let facility = row
                .into_facility(index)
                .map_err(|source| LoaderError::Row { row: index + 1, source })?;
            facilities.push(facility);
        }

        let dataset = FacilityDataset::new(facilities)?;
        let stats = dataset.stats();
        tracing::info!(
            "Loaded {} facilities ({} free, {} PMR accessible, {} with baby changing)",
            stats.total,
            stats.free,
            stats.pmr_accessible,
            stats.baby_changing
        );

        Ok(dataset)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "\
type,tarif,horaires,accessibilite_pmr,relais_bebe,indications_localisation,coordinates
SANISETTE,Gratuit,24 h / 24,Oui,Non,Place de la Concorde,\"[48.8656,2.3212]\"
TOILETTES,Payant,pas d'info,Non,Oui,Gare de Lyon,\"[48.8443,2.3744]\"
URINOIR,,,,,,\"[48.8584, 2.2945]\"
";

    #[test]
    fn test_load_sample() {
        let dataset = DatasetLoader::new().load_from_reader(SAMPLE.as_bytes()).unwrap();

        assert_eq!(dataset.len(), 3);

        let first = dataset.get(0).unwrap();
        assert_eq!(first.coordinate.latitude(), 48.8656);
        assert_eq!(first.coordinate.longitude(), 2.3212);
        assert_eq!(first.tariff, Tariff::Free);
        assert_eq!(first.pmr_accessible, Availability::Yes);
        assert_eq!(first.baby_changing, Availability::No);
        assert_eq!(first.opening_hours.as_deref(), Some("24 h / 24"));
        assert_eq!(first.facility_type, "SANISETTE");

        let second = dataset.get(1).unwrap();
        assert_eq!(second.tariff, Tariff::Paid);
        assert_eq!(second.opening_hours, None);

        let third = dataset.get(2).unwrap();
        assert_eq!(third.tariff, Tariff::Unknown);
        assert_eq!(third.pmr_accessible, Availability::Unknown);
        assert_eq!(third.location_description, "");
    }

    #[test]
    fn test_bad_coordinate_reports_row() {
        let csv = "coordinates,tarif\n\"[48.85,2.35]\",Gratuit\n\"[48.85;2.35]\",Payant\n";

        let err = DatasetLoader::new().load_from_reader(csv.as_bytes()).unwrap_err();

        match err {
            LoaderError::Row { row, source } => {
                assert_eq!(row, 2);
                assert!(matches!(source, SanitationError::InvalidCoordinate(_)));
            }
            other => panic!("unexpected error: {}", other),
        }
    }

    #[test]
    fn test_semicolon_delimiter() {
        let csv = "coordinates;tarif\n[48.85,2.35];Gratuit\n";

        let dataset = DatasetLoader::with_delimiter(b';').load_from_reader(csv.as_bytes()).unwrap();

        assert_eq!(dataset.len(), 1);
        assert_eq!(dataset.get(0).unwrap().tariff, Tariff::Free);
    }
}
