use std::collections::BTreeMap;

use serde::Serialize;

use super::classify::classify;
use super::currency::{conversion_factor, convert};
use super::model::{CleanRecord, DropReason, ValuationRecord};

// ---------------------------------------------------------------------------
// Selection rules
// ---------------------------------------------------------------------------

/// Value types that already express a yearly amount.
pub const ANNUAL_VALUE_TYPES: [&str; 3] = ["Annual", "Annualized NPV", "Annual (Range)"];

const AREA_TOKENS: &[&str] = &["ha", "hectare", "hectares"];

const PER_CAPITA_TOKENS: &[&str] = &[
    "person",
    "persons",
    "people",
    "capita",
    "household",
    "households",
    "hh",
    "individual",
    "visitor",
    "visitors",
];

pub fn is_annual(value_type: &str) -> bool {
    let value_type = value_type.trim();
    ANNUAL_VALUE_TYPES.iter().any(|t| *t == value_type)
}

fn has_token(unit: &str, tokens: &[&str]) -> bool {
    unit.split(|c: char| !c.is_alphanumeric())
        .filter(|t| !t.is_empty())
        .any(|t| tokens.iter().any(|k| k.eq_ignore_ascii_case(t)))
}

/// `true` for units such as `USD/ha/yr` or `EUR per hectare per year`.
pub fn is_area_unit(unit: &str) -> bool {
    !is_per_capita_unit(unit) && has_token(unit, AREA_TOKENS)
}

/// `true` for units expressed per person or per household.
pub fn is_per_capita_unit(unit: &str) -> bool {
    has_token(unit, PER_CAPITA_TOKENS)
}

/// Express a converted value per hectare.
///
/// Area units pass through; otherwise the value is divided by the service
/// area. A missing, zero or non-finite area gives `None`.
pub fn per_area_value(unit: &str, service_area: Option<f64>, converted: Option<f64>) -> Option<f64> {
    let value = converted?;
    if is_area_unit(unit) {
        return Some(value);
    }
    let area = service_area.filter(|a| a.is_finite() && *a != 0.0)?;
    Some(value / area).filter(|v| v.is_finite())
}

// ---------------------------------------------------------------------------
// Cleaning report
// ---------------------------------------------------------------------------

/// Row counts for one pipeline run.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CleaningReport {
    pub input_rows: usize,
    pub kept_rows: usize,
    pub dropped: BTreeMap<DropReason, usize>,
}

impl CleaningReport {
    pub fn dropped_total(&self) -> usize {
        self.dropped.values().sum()
    }

    pub fn dropped_for(&self, reason: DropReason) -> usize {
        self.dropped.get(&reason).copied().unwrap_or(0)
    }

    fn record_drop(&mut self, record: &ValuationRecord, reason: DropReason) {
        log::debug!(
            "line {}: dropping {:?} / {:?} ({reason})",
            record.line,
            record.biome,
            record.ecosystem_service
        );
        *self.dropped.entry(reason).or_default() += 1;
    }

    /// Emit the per-reason totals at `info` level.
    pub fn log_summary(&self) {
        log::info!(
            "{} rows read, {} kept, {} dropped",
            self.input_rows,
            self.kept_rows,
            self.dropped_total()
        );
        for (reason, count) in &self.dropped {
            log::info!("  dropped {count} row(s): {reason}");
        }
    }
}

// ---------------------------------------------------------------------------
// Cleaning pass
// ---------------------------------------------------------------------------

/// Why the normalised value of an annual, non-per-capita record is missing.
fn missing_reason(record: &ValuationRecord) -> DropReason {
    if conversion_factor(&record.currency).is_none() {
        DropReason::UnknownCurrency
    } else if record.raw_value.is_none() {
        DropReason::MissingValue
    } else {
        DropReason::MissingServiceArea
    }
}

/// Convert, filter and hectarize every record, classifying the survivors.
///
/// Steps, in order: currency conversion, annual-type filter, per-capita
/// filter, division by service area, missing-value purge. Rows with a
/// non-area unit and no service area pass the per-capita filter and are
/// removed by the purge.
pub fn clean_records(records: &[ValuationRecord]) -> (Vec<CleanRecord>, CleaningReport) {
    let mut report = CleaningReport {
        input_rows: records.len(),
        ..Default::default()
    };
    let mut clean = Vec::with_capacity(records.len());

    for record in records {
        let converted = convert(&record.currency, record.raw_value);

        if !is_annual(&record.value_type) {
            report.record_drop(record, DropReason::NonAnnualValueType);
            continue;
        }
        if is_per_capita_unit(&record.unit) {
            report.record_drop(record, DropReason::PerCapitaUnit);
            continue;
        }

        let per_area = per_area_value(&record.unit, record.service_area, converted);
        let (Some(converted_value), Some(per_area_value)) = (converted, per_area) else {
            report.record_drop(record, missing_reason(record));
            continue;
        };

        clean.push(CleanRecord {
            line: record.line,
            biome: record.biome.trim().to_string(),
            ecosystem_service: record.ecosystem_service.trim().to_string(),
            category: classify(&record.ecosystem_service),
            converted_value,
            per_area_value,
        });
    }

    report.kept_rows = clean.len();
    (clean, report)
}
