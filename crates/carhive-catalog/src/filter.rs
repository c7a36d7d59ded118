//! Client-side re-filtering of fetched catalog pages.
//!
//! The remote service does not reliably honor its query-parameter filters, so
//! every fetched page is re-checked against the caller's criteria before it
//! is shown. Pure: same inputs, same output, no side effects.

use carhive_core::{FilterCriteria, Vehicle};

/// Re-applies `criteria` to an already-normalized list.
///
/// Rules are AND-combined and each empty criterion imposes no constraint:
///
/// - brand: case-insensitive, whitespace-trimmed exact match on the
///   manufacturer (not substring);
/// - max price: the vehicle's numeric price must be ≤ the criterion; a
///   vehicle whose price does not parse fails an active price filter;
/// - mileage: inclusive `[from, to]`, each bound independent.
#[must_use]
pub fn reconcile(vehicles: Vec<Vehicle>, criteria: &FilterCriteria) -> Vec<Vehicle> {
    vehicles
        .into_iter()
        .filter(|vehicle| matches_criteria(vehicle, criteria))
        .collect()
}

fn matches_criteria(vehicle: &Vehicle, criteria: &FilterCriteria) -> bool {
    if let Some(brand) = criteria.brand_constraint() {
        if !vehicle.make.trim().eq_ignore_ascii_case(brand) {
            return false;
        }
    }

    if let Some(max_price) = criteria.max_price() {
        match vehicle.price_value() {
            Some(price) if price <= max_price => {}
            _ => return false,
        }
    }

    if let Some(from) = criteria.mileage_from() {
        if vehicle.mileage < from {
            return false;
        }
    }
    if let Some(to) = criteria.mileage_to() {
        if vehicle.mileage > to {
            return false;
        }
    }

    true
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vehicle(make: &str, price: &str, mileage: u64) -> Vehicle {
        Vehicle {
            id: format!("{make}-{mileage}"),
            make: make.to_string(),
            model: "Test".to_string(),
            year: 2020,
            body_type: "Sedan".to_string(),
            img: "https://car-rental-api.goit.global/placeholder-car.jpg".to_string(),
            description: String::new(),
            fuel_consumption: String::new(),
            engine_size: String::new(),
            accessories: Vec::new(),
            functionalities: Vec::new(),
            rental_price: price.to_string(),
            rental_company: String::new(),
            address: String::new(),
            rental_conditions: Vec::new(),
            mileage,
        }
    }

    fn criteria(brand: &str, price: &str, from: &str, to: &str) -> FilterCriteria {
        FilterCriteria {
            brand: brand.to_string(),
            price: price.to_string(),
            mileage_from: from.to_string(),
            mileage_to: to.to_string(),
        }
    }

    #[test]
    fn empty_criteria_keep_everything() {
        let vehicles = vec![vehicle("Audi", "$40", 1000), vehicle("BMW", "$90", 9000)];
        let kept = reconcile(vehicles.clone(), &FilterCriteria::default());
        assert_eq!(kept, vehicles);
    }

    #[test]
    fn brand_match_is_case_insensitive_and_trimmed() {
        let vehicles = vec![vehicle("BMW ", "$40", 1000)];
        let kept = reconcile(vehicles, &criteria("bmw", "", "", ""));
        assert_eq!(kept.len(), 1);
    }

    #[test]
    fn brand_match_is_exact_not_substring() {
        let vehicles = vec![vehicle("BMW", "$40", 1000)];
        let kept = reconcile(vehicles, &criteria("BM", "", "", ""));
        assert!(kept.is_empty());
    }

    #[test]
    fn price_filter_keeps_at_or_below_max() {
        let vehicles = vec![
            vehicle("Audi", "$30", 1000),
            vehicle("Audi", "40", 1000),
            vehicle("Audi", "$41", 1000),
        ];
        let kept = reconcile(vehicles, &criteria("", "40", "", ""));
        assert_eq!(kept.len(), 2);
        assert!(kept.iter().all(|v| v.price_value().unwrap() <= 40.0));
    }

    #[test]
    fn unparseable_vehicle_price_fails_an_active_price_filter() {
        let vehicles = vec![vehicle("Audi", "call us", 1000)];
        let kept = reconcile(vehicles, &criteria("", "40", "", ""));
        assert!(kept.is_empty());
    }

    #[test]
    fn unparseable_vehicle_price_passes_when_no_price_filter() {
        let vehicles = vec![vehicle("Audi", "call us", 1000)];
        let kept = reconcile(vehicles, &FilterCriteria::default());
        assert_eq!(kept.len(), 1);
    }

    #[test]
    fn unparseable_criterion_imposes_no_constraint() {
        let vehicles = vec![vehicle("Audi", "$99", 1000)];
        let kept = reconcile(vehicles, &criteria("", "not-a-number", "", ""));
        assert_eq!(kept.len(), 1);
    }

    #[test]
    fn mileage_bounds_are_inclusive() {
        let vehicles = vec![
            vehicle("Audi", "$40", 2999),
            vehicle("Audi", "$40", 3000),
            vehicle("Audi", "$40", 5000),
            vehicle("Audi", "$40", 5001),
        ];
        let kept = reconcile(vehicles, &criteria("", "", "3000", "5000"));
        let mileages: Vec<u64> = kept.iter().map(|v| v.mileage).collect();
        assert_eq!(mileages, vec![3000, 5000]);
    }

    #[test]
    fn mileage_bounds_apply_independently() {
        let vehicles = vec![vehicle("Audi", "$40", 100), vehicle("Audi", "$40", 9000)];

        let only_from = reconcile(vehicles.clone(), &criteria("", "", "500", ""));
        assert_eq!(only_from.len(), 1);
        assert_eq!(only_from[0].mileage, 9000);

        let only_to = reconcile(vehicles, &criteria("", "", "", "500"));
        assert_eq!(only_to.len(), 1);
        assert_eq!(only_to[0].mileage, 100);
    }

    #[test]
    fn criteria_combine_with_logical_and() {
        let vehicles = vec![
            vehicle("Audi", "$40", 4000),
            vehicle("Audi", "$80", 4000),
            vehicle("BMW", "$40", 4000),
            vehicle("Audi", "$40", 9000),
        ];
        let kept = reconcile(vehicles, &criteria("audi", "50", "", "5000"));
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].make, "Audi");
        assert_eq!(kept[0].mileage, 4000);
    }
}
