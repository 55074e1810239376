use serde::Serialize;
use std::collections::{BTreeSet, HashMap};

use crate::error::SanitationError;
use crate::models::domain::{Availability, Coordinate, Facility, Tariff};

/// Immutable, insertion-ordered collection of facilities
///
/// Built once at startup and shared by reference with both engines.
/// Ids are unique; iteration order is the order facilities were supplied in,
/// which is what search uses to break distance ties.
#[derive(Debug, Clone, Default)]
pub struct FacilityDataset {
    facilities: Vec<Facility>,
    index: HashMap<usize, usize>,
}

/// Headline counts for the dataset
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DatasetStats {
    pub total: usize,
    pub free: usize,
    #[serde(rename = "pmrAccessible")]
    pub pmr_accessible: usize,
    #[serde(rename = "babyChanging")]
    pub baby_changing: usize,
}

/// Category values that actually occur in the dataset
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ObservedCategories {
    pub tariff: BTreeSet<Tariff>,
    pub pmr: BTreeSet<Availability>,
    #[serde(rename = "babyChanging")]
    pub baby_changing: BTreeSet<Availability>,
}

impl FacilityDataset {
    pub fn new(facilities: Vec<Facility>) -> Result<Self, SanitationError> {
        let mut index = HashMap::with_capacity(facilities.len());
        for (position, facility) in facilities.iter().enumerate() {
            if index.insert(facility.id, position).is_some() {
                return Err(SanitationError::DuplicateFacility(facility.id));
            }
        }

        Ok(Self { facilities, index })
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.facilities.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.facilities.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Facility> {
        self.facilities.iter()
    }

    pub fn as_slice(&self) -> &[Facility] {
        &self.facilities
    }

    pub fn get(&self, id: usize) -> Option<&Facility> {
        self.index.get(&id).map(|&position| &self.facilities[position])
    }

    pub fn coordinates(&self) -> Vec<Coordinate> {
        self.facilities.iter().map(|f| f.coordinate).collect()
    }

    pub fn stats(&self) -> DatasetStats {
        DatasetStats {
            total: self.facilities.len(),
            free: self.facilities.iter().filter(|f| f.tariff == Tariff::Free).count(),
            pmr_accessible: self
                .facilities
                .iter()
                .filter(|f| f.pmr_accessible == Availability::Yes)
                .count(),
            baby_changing: self
                .facilities
                .iter()
                .filter(|f| f.baby_changing == Availability::Yes)
                .count(),
        }
    }

    pub fn categories(&self) -> ObservedCategories {
        let mut observed = ObservedCategories::default();
        for facility in &self.facilities {
            observed.tariff.insert(facility.tariff);
            observed.pmr.insert(facility.pmr_accessible);
            observed.baby_changing.insert(facility.baby_changing);
        }
        observed
    }
}

impl<'a> IntoIterator for &'a FacilityDataset {
    type Item = &'a Facility;
    type IntoIter = std::slice::Iter<'a, Facility>;

    fn into_iter(self) -> Self::IntoIter {
        self.facilities.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn facility(id: usize, tariff: Tariff, pmr: Availability) -> Facility {
        Facility {
            id,
            coordinate: Coordinate::new(48.85, 2.35).unwrap(),
            tariff,
            pmr_accessible: pmr,
            baby_changing: Availability::No,
            opening_hours: None,
            location_description: String::new(),
            facility_type: "SANISETTE".to_string(),
        }
    }

    #[test]
    fn test_duplicate_ids_rejected() {
        let result = FacilityDataset::new(vec![
            facility(1, Tariff::Free, Availability::Yes),
            facility(1, Tariff::Paid, Availability::No),
        ]);
        assert_eq!(result.unwrap_err(), SanitationError::DuplicateFacility(1));
    }

    #[test]
    fn test_stats_and_categories() {
        let dataset = FacilityDataset::new(vec![
            facility(0, Tariff::Free, Availability::Yes),
            facility(1, Tariff::Free, Availability::No),
            facility(2, Tariff::Paid, Availability::Yes),
        ])
        .unwrap();

        let stats = dataset.stats();
        assert_eq!(stats.total, 3);
        assert_eq!(stats.free, 2);
        assert_eq!(stats.pmr_accessible, 2);
        assert_eq!(stats.baby_changing, 0);

        let categories = dataset.categories();
        assert!(categories.tariff.contains(&Tariff::Paid));
        assert!(!categories.tariff.contains(&Tariff::Unknown));
        assert_eq!(categories.baby_changing.len(), 1);
    }

    #[test]
    fn test_lookup_preserves_order() {
        let dataset = FacilityDataset::new(vec![
            facility(7, Tariff::Free, Availability::Yes),
            facility(3, Tariff::Paid, Availability::No),
        ])
        .unwrap();

        assert_eq!(dataset.get(3).map(|f| f.tariff), Some(Tariff::Paid));
        assert!(dataset.get(4).is_none());
        let ids: Vec<usize> = dataset.iter().map(|f| f.id).collect();
        assert_eq!(ids, vec![7, 3]);
    }
}
