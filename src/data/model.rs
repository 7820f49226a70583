use std::fmt;

use serde::Serialize;

// ---------------------------------------------------------------------------
// ValuationRecord – one row of the source table
// ---------------------------------------------------------------------------

/// A single valuation as read from the CSV, before any normalisation.
///
/// Numeric columns are already parsed: a malformed or empty cell is `None`.
#[derive(Debug, Clone, PartialEq)]
pub struct ValuationRecord {
    /// 1-based line number in the source file (for diagnostics).
    pub line: u64,
    pub biome: String,
    pub ecosystem_service: String,
    pub currency: String,
    pub raw_value: Option<f64>,
    pub value_type: String,
    pub unit: String,
    /// Area the value applies to, when the unit is not already per hectare.
    pub service_area: Option<f64>,
}

// ---------------------------------------------------------------------------
// ServiceCategory – generalized classification of a service label
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum ServiceCategory {
    #[serde(rename = "Human Happiness")]
    HumanHappiness,
    #[serde(rename = "Food and Water")]
    FoodAndWater,
    #[serde(rename = "Health")]
    Health,
    #[serde(rename = "Weather Protection")]
    WeatherProtection,
    #[serde(rename = "Economic and Energy")]
    EconomicAndEnergy,
    #[serde(rename = "Other")]
    Other,
}

impl ServiceCategory {
    /// Every category, in classification order with the catch-all last.
    pub const ALL: [ServiceCategory; 6] = [
        ServiceCategory::HumanHappiness,
        ServiceCategory::FoodAndWater,
        ServiceCategory::Health,
        ServiceCategory::WeatherProtection,
        ServiceCategory::EconomicAndEnergy,
        ServiceCategory::Other,
    ];

    pub fn label(self) -> &'static str {
        match self {
            ServiceCategory::HumanHappiness => "Human Happiness",
            ServiceCategory::FoodAndWater => "Food and Water",
            ServiceCategory::Health => "Health",
            ServiceCategory::WeatherProtection => "Weather Protection",
            ServiceCategory::EconomicAndEnergy => "Economic and Energy",
            ServiceCategory::Other => "Other",
        }
    }
}

impl fmt::Display for ServiceCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// ---------------------------------------------------------------------------
// CleanRecord – a record that survived every filter
// ---------------------------------------------------------------------------

/// A fully normalised valuation: reference currency per hectare per year.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CleanRecord {
    pub line: u64,
    pub biome: String,
    pub ecosystem_service: String,
    pub category: ServiceCategory,
    pub converted_value: f64,
    pub per_area_value: f64,
}

// ---------------------------------------------------------------------------
// DropReason – why a row did not reach the clean set
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DropReason {
    /// Value type is not one of the annual variants.
    NonAnnualValueType,
    /// Unit is per person / per household.
    PerCapitaUnit,
    /// Currency missing from the conversion table.
    UnknownCurrency,
    /// Value cell empty or not numeric.
    MissingValue,
    /// Non-area unit with a missing, zero or non-numeric service area.
    MissingServiceArea,
}

impl DropReason {
    pub const ALL: [DropReason; 5] = [
        DropReason::NonAnnualValueType,
        DropReason::PerCapitaUnit,
        DropReason::UnknownCurrency,
        DropReason::MissingValue,
        DropReason::MissingServiceArea,
    ];

    pub fn describe(self) -> &'static str {
        match self {
            DropReason::NonAnnualValueType => "non-annual value type",
            DropReason::PerCapitaUnit => "per-person/household unit",
            DropReason::UnknownCurrency => "unknown currency",
            DropReason::MissingValue => "missing value",
            DropReason::MissingServiceArea => "no usable service area",
        }
    }
}

impl fmt::Display for DropReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.describe())
    }
}
