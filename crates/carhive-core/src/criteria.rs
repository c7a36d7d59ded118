use serde::{Deserialize, Serialize};

/// Brands the catalog is known to carry. Consumers building filter inputs
/// (select boxes, shell completion) can offer these without a network call.
pub const KNOWN_BRANDS: &[&str] = &[
    "Buick",
    "Volvo",
    "HUMMER",
    "Subaru",
    "Mitsubishi",
    "Nissan",
    "Lincoln",
    "GMC",
    "Hyundai",
    "MINI",
    "Bentley",
    "Mercedes-Benz",
    "Aston Martin",
    "Pontiac",
    "Lamborghini",
    "Audi",
    "BMW",
    "Chevrolet",
    "Chrysler",
    "Kia",
    "Land",
];

/// Filter criteria for a catalog query.
///
/// All four fields are always present as strings; the empty string means
/// "no constraint" for that field. Numeric accessors return `None` both for
/// empty and for unparseable values, so a malformed criterion degrades to no
/// constraint rather than an error.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterCriteria {
    /// Manufacturer name, matched exactly (case-insensitive, trimmed).
    pub brand: String,
    /// Maximum rental price as a numeric string.
    pub price: String,
    /// Minimum mileage as a numeric string.
    pub mileage_from: String,
    /// Maximum mileage as a numeric string.
    pub mileage_to: String,
}

impl FilterCriteria {
    /// Returns `true` when no field imposes a constraint.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.brand.trim().is_empty()
            && self.price.trim().is_empty()
            && self.mileage_from.trim().is_empty()
            && self.mileage_to.trim().is_empty()
    }

    /// The trimmed brand constraint, or `None` when unconstrained.
    #[must_use]
    pub fn brand_constraint(&self) -> Option<&str> {
        let brand = self.brand.trim();
        (!brand.is_empty()).then_some(brand)
    }

    /// The maximum-price constraint as a number, or `None` when the field is
    /// empty or does not parse.
    #[must_use]
    pub fn max_price(&self) -> Option<f64> {
        self.price.trim().parse().ok()
    }

    /// The minimum-mileage bound, or `None` when empty or unparseable.
    #[must_use]
    pub fn mileage_from(&self) -> Option<u64> {
        self.mileage_from.trim().parse().ok()
    }

    /// The maximum-mileage bound, or `None` when empty or unparseable.
    #[must_use]
    pub fn mileage_to(&self) -> Option<u64> {
        self.mileage_to.trim().parse().ok()
    }

    /// Merges the set fields of `update` into `self`, leaving the rest
    /// untouched.
    pub fn apply(&mut self, update: FilterUpdate) {
        if let Some(brand) = update.brand {
            self.brand = brand;
        }
        if let Some(price) = update.price {
            self.price = price;
        }
        if let Some(mileage_from) = update.mileage_from {
            self.mileage_from = mileage_from;
        }
        if let Some(mileage_to) = update.mileage_to {
            self.mileage_to = mileage_to;
        }
    }
}

/// A partial change to [`FilterCriteria`]: `None` fields are left as they
/// are, `Some` fields overwrite (including `Some(String::new())`, which
/// clears a constraint).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterUpdate {
    pub brand: Option<String>,
    pub price: Option<String>,
    pub mileage_from: Option<String>,
    pub mileage_to: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_all_empty() {
        let criteria = FilterCriteria::default();
        assert!(criteria.is_empty());
        assert_eq!(criteria.brand, "");
        assert_eq!(criteria.price, "");
        assert_eq!(criteria.mileage_from, "");
        assert_eq!(criteria.mileage_to, "");
    }

    #[test]
    fn brand_constraint_trims_whitespace() {
        let criteria = FilterCriteria {
            brand: "  BMW  ".to_string(),
            ..FilterCriteria::default()
        };
        assert_eq!(criteria.brand_constraint(), Some("BMW"));
    }

    #[test]
    fn brand_constraint_none_when_blank() {
        let criteria = FilterCriteria {
            brand: "   ".to_string(),
            ..FilterCriteria::default()
        };
        assert_eq!(criteria.brand_constraint(), None);
    }

    #[test]
    fn max_price_parses_numeric_string() {
        let criteria = FilterCriteria {
            price: "40".to_string(),
            ..FilterCriteria::default()
        };
        assert_eq!(criteria.max_price(), Some(40.0));
    }

    #[test]
    fn max_price_none_for_empty_or_garbage() {
        let empty = FilterCriteria::default();
        assert_eq!(empty.max_price(), None);

        let garbage = FilterCriteria {
            price: "cheap".to_string(),
            ..FilterCriteria::default()
        };
        assert_eq!(garbage.max_price(), None);
    }

    #[test]
    fn mileage_bounds_parse_independently() {
        let criteria = FilterCriteria {
            mileage_from: "3000".to_string(),
            mileage_to: String::new(),
            ..FilterCriteria::default()
        };
        assert_eq!(criteria.mileage_from(), Some(3000));
        assert_eq!(criteria.mileage_to(), None);
    }

    #[test]
    fn apply_merges_only_set_fields() {
        let mut criteria = FilterCriteria {
            brand: "Audi".to_string(),
            price: "50".to_string(),
            ..FilterCriteria::default()
        };
        criteria.apply(FilterUpdate {
            price: Some("30".to_string()),
            ..FilterUpdate::default()
        });
        assert_eq!(criteria.brand, "Audi");
        assert_eq!(criteria.price, "30");
    }

    #[test]
    fn apply_with_empty_string_clears_a_constraint() {
        let mut criteria = FilterCriteria {
            brand: "Audi".to_string(),
            ..FilterCriteria::default()
        };
        criteria.apply(FilterUpdate {
            brand: Some(String::new()),
            ..FilterUpdate::default()
        });
        assert_eq!(criteria.brand_constraint(), None);
    }

    #[test]
    fn known_brands_are_non_empty_and_unique() {
        assert!(!KNOWN_BRANDS.is_empty());
        let mut seen = std::collections::HashSet::new();
        for brand in KNOWN_BRANDS {
            assert!(seen.insert(*brand), "duplicate brand {brand}");
        }
    }
}
