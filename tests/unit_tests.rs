// Unit tests for Sanimap

use approx::assert_relative_eq;
use sanimap::core::{
    distance::geodesic_distance,
    filters::AttributeFilters,
    gaps::SpatialGapAnalyzer,
    search::ProximitySearchEngine,
};
use sanimap::error::SanitationError;
use sanimap::models::{Availability, Coordinate, Facility, FacilityDataset, Tariff};

fn create_facility(id: usize, lat: f64, lon: f64, tariff: Tariff) -> Facility {
    Facility {
        id,
        coordinate: Coordinate::new(lat, lon).unwrap(),
        tariff,
        pmr_accessible: Availability::Yes,
        baby_changing: Availability::No,
        opening_hours: None,
        location_description: format!("Facility {}", id),
        facility_type: "SANISETTE".to_string(),
    }
}

fn paris_dataset() -> FacilityDataset {
    FacilityDataset::new(vec![
        create_facility(0, 48.8584, 2.2945, Tariff::Paid),  // Eiffel Tower
        create_facility(1, 48.8606, 2.3376, Tariff::Free),  // Louvre
        create_facility(2, 48.8530, 2.3499, Tariff::Paid),  // Notre-Dame
        create_facility(3, 48.8738, 2.2950, Tariff::Free),  // Arc de Triomphe
        create_facility(4, 48.8867, 2.3431, Tariff::Paid),  // Sacre-Coeur
    ])
    .unwrap()
}

fn origin() -> Coordinate {
    Coordinate::new(48.8566, 2.3522).unwrap()
}

#[test]
fn test_distance_non_negative_and_zero_only_at_same_point() {
    let dataset = paris_dataset();
    let q = origin();

    for facility in dataset.iter() {
        let d = geodesic_distance(q, facility.coordinate);
        assert!(d > 0.0, "facility {} should be away from origin", facility.id);
        assert!(geodesic_distance(facility.coordinate, facility.coordinate).abs() < 1e-9);
    }
}

#[test]
fn test_geodesic_known_distance() {
    // Eiffel Tower to Louvre, about 3.2 km
    let eiffel = Coordinate::new(48.8584, 2.2945).unwrap();
    let louvre = Coordinate::new(48.8606, 2.3376).unwrap();

    assert_relative_eq!(geodesic_distance(eiffel, louvre), 3_170.0, max_relative = 0.03);
}

#[test]
fn test_larger_bound_is_superset() {
    let dataset = paris_dataset();
    let engine = ProximitySearchEngine::new();
    let filters = AttributeFilters::accept_all();

    let bounds = [500.0, 1_000.0, 2_000.0, 4_000.0, 8_000.0];
    let mut previous: Vec<usize> = Vec::new();

    for bound in bounds {
        let ids: Vec<usize> = engine
            .search(origin(), &dataset, bound, &filters)
            .unwrap()
            .iter()
            .map(|hit| hit.facility.id)
            .collect();

        assert!(
            previous.iter().all(|id| ids.contains(id)),
            "bound {} dropped a facility: {:?} -> {:?}",
            bound,
            previous,
            ids
        );
        previous = ids;
    }

    assert_eq!(previous.len(), 5);
}

#[test]
fn test_facility_at_exact_bound_is_included() {
    let dataset = paris_dataset();
    let louvre = dataset.get(1).unwrap().coordinate;
    let exact = geodesic_distance(origin(), louvre);

    let hits = ProximitySearchEngine::new()
        .search(origin(), &dataset, exact, &AttributeFilters::accept_all())
        .unwrap();

    assert_eq!(hits.last().map(|h| h.facility.id), Some(1));
    assert_eq!(hits.last().map(|h| h.distance_m), Some(exact));
}

#[test]
fn test_query_on_facility_returns_it_first() {
    let dataset = paris_dataset();
    let notre_dame = dataset.get(2).unwrap().coordinate;

    let hits = ProximitySearchEngine::new()
        .search(notre_dame, &dataset, 10.0, &AttributeFilters::accept_all())
        .unwrap();

    assert_eq!(hits[0].facility.id, 2);
    assert!(hits[0].distance_m.abs() < 1e-9);
}

#[test]
fn test_free_tariff_filter() {
    let dataset = paris_dataset();
    let filters = AttributeFilters::accept_all().with_tariff(&[Tariff::Free]);

    let hits = ProximitySearchEngine::new()
        .search(origin(), &dataset, 20_000.0, &filters)
        .unwrap();

    let ids: Vec<usize> = hits.iter().map(|h| h.facility.id).collect();
    assert_eq!(ids, vec![1, 3]);
    assert!(hits.iter().all(|h| h.facility.tariff == Tariff::Free));
    assert!(hits[0].distance_m <= hits[1].distance_m);
}

#[test]
fn test_coordinate_string_parse() {
    let coord: Coordinate = "[48.8566,2.3522]".parse().unwrap();
    assert_eq!((coord.latitude(), coord.longitude()), (48.8566, 2.3522));

    assert!(matches!(
        "48.8566 2.3522".parse::<Coordinate>(),
        Err(SanitationError::InvalidCoordinate(_))
    ));
}

#[test]
fn test_analyze_needs_three_facilities() {
    let dataset = FacilityDataset::new(vec![
        create_facility(0, 48.85, 2.34, Tariff::Free),
        create_facility(1, 48.86, 2.35, Tariff::Free),
    ])
    .unwrap();

    assert_eq!(
        SpatialGapAnalyzer::new().analyze(&dataset).unwrap_err(),
        SanitationError::InsufficientPoints { found: 2 }
    );

    let empty = FacilityDataset::default();
    assert_eq!(
        SpatialGapAnalyzer::new().analyze(&empty).unwrap_err(),
        SanitationError::InsufficientPoints { found: 0 }
    );
}

#[test]
fn test_analyze_is_deterministic() {
    // Grid with a near-duplicate cluster at its center, so the analysis has
    // something to report
    let mut facilities = Vec::new();
    for i in 0..5 {
        for j in 0..5 {
            let id = facilities.len();
            facilities.push(create_facility(id, 48.85 + i as f64 * 0.01, 2.34 + j as f64 * 0.01, Tariff::Free));
        }
    }
    let center = facilities[12].coordinate;
    facilities.push(create_facility(25, center.latitude() + 2e-10, center.longitude(), Tariff::Paid));
    facilities.push(create_facility(26, center.latitude() - 2e-10, center.longitude(), Tariff::Paid));
    let dataset = FacilityDataset::new(facilities).unwrap();

    let analyzer = SpatialGapAnalyzer::new();
    let first = analyzer.analyze(&dataset).unwrap();
    let second = analyzer.analyze(&dataset).unwrap();

    assert!(!first.warnings.is_empty());
    assert_eq!(first, second);

    for (a, b) in first.candidates.iter().zip(&second.candidates) {
        assert_relative_eq!(a.latitude, b.latitude, epsilon = 1e-12);
        assert_relative_eq!(a.longitude, b.longitude, epsilon = 1e-12);
    }
}
