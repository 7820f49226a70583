// ---------------------------------------------------------------------------
// Currency conversion into the reference currency (US Dollar)
// ---------------------------------------------------------------------------

/// Name of the currency every value is converted into.
pub const REFERENCE_CURRENCY: &str = "US Dollar";

/// Multiplier from one unit of the named currency to US Dollars.
///
/// Only these names are recognised; anything else converts to `None`.
pub const CONVERSION_FACTORS: [(&str, f64); 34] = [
    ("US Dollar", 1.0),
    ("Euro", 1.11),
    ("British Pound", 1.27),
    ("Japanese Yen", 0.0091),
    ("Chinese Yuan", 0.14),
    ("Indian Rupee", 0.012),
    ("Australian Dollar", 0.67),
    ("Canadian Dollar", 0.74),
    ("New Zealand Dollar", 0.61),
    ("Swiss Franc", 1.13),
    ("Swedish Krona", 0.096),
    ("Norwegian Krone", 0.094),
    ("Danish Krone", 0.15),
    ("Brazilian Real", 0.18),
    ("Mexican Peso", 0.055),
    ("South African Rand", 0.055),
    ("Kenyan Shilling", 0.0077),
    ("Tanzanian Shilling", 0.00038),
    ("Ugandan Shilling", 0.00027),
    ("Nigerian Naira", 0.00065),
    ("Ghanaian Cedi", 0.064),
    ("Ethiopian Birr", 0.0087),
    ("Indonesian Rupiah", 0.000061),
    ("Philippine Peso", 0.018),
    ("Thai Baht", 0.029),
    ("Vietnamese Dong", 0.000039),
    ("Malaysian Ringgit", 0.23),
    ("Sri Lankan Rupee", 0.0033),
    ("Bangladeshi Taka", 0.0085),
    ("Pakistani Rupee", 0.0036),
    ("Chilean Peso", 0.0011),
    ("Colombian Peso", 0.00025),
    ("Peruvian Sol", 0.27),
    ("Costa Rican Colon", 0.0019),
];

/// Look up the conversion factor for a currency name (trimmed, exact match).
pub fn conversion_factor(currency: &str) -> Option<f64> {
    let name = currency.trim();
    CONVERSION_FACTORS
        .iter()
        .find(|(known, _)| *known == name)
        .map(|&(_, factor)| factor)
}

/// Convert `raw_value` into the reference currency.
///
/// `None` when the currency is unknown or the value itself is missing.
pub fn convert(currency: &str, raw_value: Option<f64>) -> Option<f64> {
    let factor = conversion_factor(currency)?;
    raw_value.map(|v| v * factor)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn euro_uses_fixed_factor() {
        let v = convert("Euro", Some(100.0)).unwrap();
        assert!((v - 111.0).abs() < 1e-9);
    }

    #[test]
    fn reference_currency_is_identity() {
        assert_eq!(conversion_factor(REFERENCE_CURRENCY), Some(1.0));
        assert_eq!(convert(" US Dollar ", Some(42.5)), Some(42.5));
    }

    #[test]
    fn conversion_is_linear_for_every_known_currency() {
        for &(name, factor) in &CONVERSION_FACTORS {
            for v in [-3.5, 0.0, 1.0, 250.0] {
                assert_eq!(convert(name, Some(v)), Some(v * factor), "{name} × {v}");
            }
        }
    }

    #[test]
    fn unknown_currency_is_always_missing() {
        for v in [Some(0.0), Some(1.0), Some(-7.0), None] {
            assert_eq!(convert("Martian Credit", v), None);
        }
        assert_eq!(convert("", Some(1.0)), None);
        assert_eq!(convert("euro", Some(1.0)), None);
    }

    #[test]
    fn missing_value_stays_missing() {
        assert_eq!(convert("Euro", None), None);
    }

    #[test]
    fn table_names_are_unique() {
        let mut names: Vec<&str> = CONVERSION_FACTORS.iter().map(|(n, _)| *n).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), CONVERSION_FACTORS.len());
    }
}
