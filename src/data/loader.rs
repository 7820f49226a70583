use std::io::Read;
use std::path::Path;

use anyhow::{Context, Result};

use super::model::ValuationRecord;
use crate::error::LoadError;

// ---------------------------------------------------------------------------
// Layout of the valuation export
// ---------------------------------------------------------------------------

/// Where the header and the first data row sit in the file (1-based lines).
///
/// The export starts with metadata lines, then the header, then a line of
/// column descriptions before the data proper.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadOptions {
    pub header_line: u64,
    pub data_line: u64,
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self {
            header_line: 3,
            data_line: 5,
        }
    }
}

pub const COL_BIOME: &str = "Biome";
pub const COL_SERVICE: &str = "ESService";
pub const COL_CURRENCY: &str = "Currency";
pub const COL_VALUE: &str = "Value";
pub const COL_VALUE_TYPE: &str = "ValueType";
pub const COL_UNIT: &str = "Unit";
pub const COL_SERVICE_AREA: &str = "ServiceArea";

/// Column positions resolved from the header row.
struct Columns {
    biome: usize,
    service: usize,
    currency: usize,
    value: usize,
    value_type: usize,
    unit: usize,
    service_area: usize,
}

impl Columns {
    fn resolve(header: &csv::StringRecord) -> Result<Self, LoadError> {
        let find = |name: &'static str| {
            header
                .iter()
                .position(|h| h == name)
                .ok_or(LoadError::MissingColumn(name))
        };
        Ok(Columns {
            biome: find(COL_BIOME)?,
            service: find(COL_SERVICE)?,
            currency: find(COL_CURRENCY)?,
            value: find(COL_VALUE)?,
            value_type: find(COL_VALUE_TYPE)?,
            unit: find(COL_UNIT)?,
            service_area: find(COL_SERVICE_AREA)?,
        })
    }
}

// ---------------------------------------------------------------------------
// Public entry-points
// ---------------------------------------------------------------------------

/// Load every data row of a valuation CSV.
pub fn load_file(path: &Path, options: &LoadOptions) -> Result<Vec<ValuationRecord>> {
    let file = std::fs::File::open(path)
        .with_context(|| format!("opening {}", path.display()))?;
    load_reader(file, options).with_context(|| format!("loading {}", path.display()))
}

/// Same as [`load_file`] over any reader.
pub fn load_reader<R: Read>(source: R, options: &LoadOptions) -> Result<Vec<ValuationRecord>> {
    if options.header_line == 0 || options.data_line <= options.header_line {
        return Err(LoadError::BadOffsets {
            header_line: options.header_line,
            data_line: options.data_line,
        }
        .into());
    }

    // Metadata lines have their own shape, so records may vary in length.
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(source);

    let mut columns: Option<Columns> = None;
    let mut records = Vec::new();
    let mut last_line = 0;

    // Cells are decoded lossily: a stray Latin-1 byte must not sink the run.
    for result in reader.byte_records() {
        let raw = result.context("reading CSV")?;
        let line = raw.position().map(|p| p.line()).unwrap_or(last_line + 1);
        last_line = line;
        let row = csv::StringRecord::from_byte_record_lossy(raw);

        if line < options.header_line {
            continue;
        }
        if line == options.header_line {
            columns = Some(Columns::resolve(&row)?);
            continue;
        }
        if line < options.data_line {
            continue;
        }

        let Some(cols) = columns.as_ref() else {
            break;
        };
        records.push(parse_row(&row, cols, line));
    }

    if columns.is_none() {
        return Err(LoadError::HeaderNotFound {
            line: options.header_line,
            lines_read: last_line,
        }
        .into());
    }

    log::debug!("read {} data rows", records.len());
    Ok(records)
}

fn parse_row(row: &csv::StringRecord, cols: &Columns, line: u64) -> ValuationRecord {
    let text = |idx: usize| row.get(idx).unwrap_or("").to_string();
    ValuationRecord {
        line,
        biome: text(cols.biome),
        ecosystem_service: text(cols.service),
        currency: text(cols.currency),
        raw_value: parse_number(row.get(cols.value).unwrap_or("")),
        value_type: text(cols.value_type),
        unit: text(cols.unit),
        service_area: parse_number(row.get(cols.service_area).unwrap_or("")),
    }
}

/// Parse a numeric cell. Empty, malformed and non-finite cells are `None`.
pub fn parse_number(s: &str) -> Option<f64> {
    s.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}
