use std::collections::BTreeSet;
use std::fmt::Display;

use crate::error::SanitationError;
use crate::models::{Availability, Facility, FacilityDataset, Tariff};

/// Predicate over one attribute dimension
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CategoryFilter<T: Ord> {
    AcceptAll,
    AcceptSet(BTreeSet<T>),
}

impl<T: Ord> Default for CategoryFilter<T> {
    fn default() -> Self {
        CategoryFilter::AcceptAll
    }
}

impl<T: Ord + Copy> CategoryFilter<T> {
    /// Build a filter from an optional list of selected categories.
    /// `None` accepts everything; `Some(empty)` accepts nothing.
    pub fn from_selection(selection: Option<&[T]>) -> Self {
        match selection {
            None => CategoryFilter::AcceptAll,
            Some(values) => CategoryFilter::AcceptSet(values.iter().copied().collect()),
        }
    }

    #[inline]
    pub fn accepts(&self, value: &T) -> bool {
        match self {
            CategoryFilter::AcceptAll => true,
            CategoryFilter::AcceptSet(set) => set.contains(value),
        }
    }
}

impl<T: Ord + Display> CategoryFilter<T> {
    fn validate(&self, dimension: &'static str, observed: &BTreeSet<T>) -> Result<(), SanitationError> {
        if let CategoryFilter::AcceptSet(set) = self {
            if let Some(unknown) = set.iter().find(|value| !observed.contains(value)) {
                return Err(SanitationError::UnknownCategory {
                    dimension,
                    value: unknown.to_string(),
                });
            }
        }
        Ok(())
    }
}

/// Typed filter descriptor for the three filterable dimensions
///
/// Dimensions are combined with AND; categories within one dimension with OR.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AttributeFilters {
    pub tariff: CategoryFilter<Tariff>,
    pub pmr: CategoryFilter<Availability>,
    pub baby_changing: CategoryFilter<Availability>,
}

impl AttributeFilters {
    pub fn accept_all() -> Self {
        Self::default()
    }

    pub fn with_tariff(mut self, tariffs: &[Tariff]) -> Self {
        self.tariff = CategoryFilter::from_selection(Some(tariffs));
        self
    }

    pub fn with_pmr(mut self, values: &[Availability]) -> Self {
        self.pmr = CategoryFilter::from_selection(Some(values));
        self
    }

    pub fn with_baby_changing(mut self, values: &[Availability]) -> Self {
        self.baby_changing = CategoryFilter::from_selection(Some(values));
        self
    }

    /// Check a facility against every dimension
    #[inline]
    pub fn matches(&self, facility: &Facility) -> bool {
        self.tariff.accepts(&facility.tariff)
            && self.pmr.accepts(&facility.pmr_accessible)
            && self.baby_changing.accepts(&facility.baby_changing)
    }

    /// Reject selections naming a category the dataset never contains
    pub fn validate(&self, dataset: &FacilityDataset) -> Result<(), SanitationError> {
        let observed = dataset.categories();
        self.tariff.validate("tariff", &observed.tariff)?;
        self.pmr.validate("pmr", &observed.pmr)?;
        self.baby_changing.validate("baby_changing", &observed.baby_changing)?;
        Ok(())
    }
}
