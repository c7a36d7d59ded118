use serde::{Deserialize, Serialize};

/// A rental listing in its canonical, shape-independent form. Produced by the
/// catalog normalizer; every consumer downstream of it (store, views, CLI)
/// works with this record only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Vehicle {
    /// Stable unique identifier. Never empty after normalization.
    pub id: String,
    /// Manufacturer name, e.g. `"Audi"`. Filled from the wire `make` field,
    /// falling back to the alternate `brand` field some responses use.
    pub make: String,
    pub model: String,
    pub year: i32,
    /// Body type, e.g. `"SUV"`. The wire field is named `type`.
    pub body_type: String,
    /// Image URL. Always absolute: relative paths are rewritten against the
    /// asset host and a placeholder is substituted when the field is absent.
    pub img: String,
    pub description: String,
    /// Free-text consumption figure, e.g. `"10.5"`.
    pub fuel_consumption: String,
    /// Free-text engine size, e.g. `"3.6L V6"`.
    pub engine_size: String,
    pub accessories: Vec<String>,
    pub functionalities: Vec<String>,
    /// Price per rental unit, numeric or currency-prefixed, passed through
    /// as-is, e.g. `"40"` or `"$40"`. Use [`Vehicle::price_value`] to compare.
    pub rental_price: String,
    pub rental_company: String,
    /// Comma-delimited locality tokens, e.g. `"Kyiv, Ukraine"`.
    pub address: String,
    /// One condition per entry. The wire sends either a list or a single
    /// newline-delimited string; both collapse to this form.
    pub rental_conditions: Vec<String>,
    pub mileage: u64,
}

impl Vehicle {
    /// Returns the numeric rental price, tolerating a currency prefix.
    ///
    /// `"$40"` and `"40"` both yield `Some(40.0)`; anything that does not
    /// parse yields `None`.
    #[must_use]
    pub fn price_value(&self) -> Option<f64> {
        self.rental_price
            .trim()
            .trim_start_matches('$')
            .trim()
            .parse()
            .ok()
    }

    /// Splits the free-text address into trimmed locality tokens.
    ///
    /// `"Kyiv, Ukraine"` yields `["Kyiv", "Ukraine"]`; empty segments are
    /// dropped.
    #[must_use]
    pub fn address_tokens(&self) -> Vec<&str> {
        self.address
            .split(',')
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .collect()
    }
}

/// Formats a mileage figure with thin thousands separators: `5000` → `"5 000"`.
#[must_use]
pub fn format_mileage(mileage: u64) -> String {
    let digits = mileage.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(' ');
        }
        out.push(c);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_vehicle() -> Vehicle {
        Vehicle {
            id: "9582".to_string(),
            make: "Buick".to_string(),
            model: "Enclave".to_string(),
            year: 2008,
            body_type: "SUV".to_string(),
            img: "https://ftp.goit.study/img/campers-test/1-1.webp".to_string(),
            description: "Luxury SUV with three rows of seating.".to_string(),
            fuel_consumption: "10.5".to_string(),
            engine_size: "3.6L V6".to_string(),
            accessories: vec!["Leather seats".to_string()],
            functionalities: vec!["Power liftgate".to_string()],
            rental_price: "$40".to_string(),
            rental_company: "Luxury Car Rentals".to_string(),
            address: "Kyiv, Ukraine".to_string(),
            rental_conditions: vec!["Minimum age: 25".to_string()],
            mileage: 5858,
        }
    }

    #[test]
    fn price_value_strips_currency_prefix() {
        let vehicle = make_vehicle();
        assert_eq!(vehicle.price_value(), Some(40.0));
    }

    #[test]
    fn price_value_parses_plain_number() {
        let mut vehicle = make_vehicle();
        vehicle.rental_price = "55".to_string();
        assert_eq!(vehicle.price_value(), Some(55.0));
    }

    #[test]
    fn price_value_none_for_non_numeric() {
        let mut vehicle = make_vehicle();
        vehicle.rental_price = "call us".to_string();
        assert_eq!(vehicle.price_value(), None);
    }

    #[test]
    fn price_value_none_for_empty() {
        let mut vehicle = make_vehicle();
        vehicle.rental_price = String::new();
        assert_eq!(vehicle.price_value(), None);
    }

    #[test]
    fn address_tokens_splits_and_trims() {
        let vehicle = make_vehicle();
        assert_eq!(vehicle.address_tokens(), vec!["Kyiv", "Ukraine"]);
    }

    #[test]
    fn address_tokens_drops_empty_segments() {
        let mut vehicle = make_vehicle();
        vehicle.address = " , Lviv,".to_string();
        assert_eq!(vehicle.address_tokens(), vec!["Lviv"]);
    }

    #[test]
    fn format_mileage_groups_thousands() {
        assert_eq!(format_mileage(5000), "5 000");
        assert_eq!(format_mileage(5858), "5 858");
        assert_eq!(format_mileage(1_234_567), "1 234 567");
    }

    #[test]
    fn format_mileage_leaves_small_numbers_alone() {
        assert_eq!(format_mileage(0), "0");
        assert_eq!(format_mileage(999), "999");
    }

    #[test]
    fn serde_roundtrip_vehicle() {
        let vehicle = make_vehicle();
        let json = serde_json::to_string(&vehicle).expect("serialization failed");
        let decoded: Vehicle = serde_json::from_str(&json).expect("deserialization failed");
        assert_eq!(decoded, vehicle);
    }
}
