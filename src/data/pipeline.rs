use std::path::Path;

use anyhow::{Context, Result};
use serde::Serialize;

use super::aggregate::{by_biome, by_service, StackedTable};
use super::hectarize::{clean_records, CleaningReport};
use super::loader::{load_file, LoadOptions};
use super::model::{CleanRecord, ValuationRecord};

/// Everything one run produces. Immutable once built.
#[derive(Debug, Clone)]
pub struct Analysis {
    pub records: Vec<CleanRecord>,
    pub report: CleaningReport,
    /// Top biomes, stacked by service category.
    pub by_biome: StackedTable,
    /// Service categories, stacked by biome.
    pub by_service: StackedTable,
}

/// The part of an [`Analysis`] written by `--export`.
#[derive(Debug, Serialize)]
pub struct AnalysisSummary<'a> {
    pub report: &'a CleaningReport,
    pub by_biome: &'a StackedTable,
    pub by_service: &'a StackedTable,
}

impl Analysis {
    /// Clean and aggregate already-loaded records.
    pub fn from_records(raw: &[ValuationRecord], top_n: usize) -> Self {
        let (records, report) = clean_records(raw);
        report.log_summary();

        let by_biome = by_biome(&records, top_n);
        let by_service = by_service(&records);
        Analysis {
            records,
            report,
            by_biome,
            by_service,
        }
    }

    pub fn summary(&self) -> AnalysisSummary<'_> {
        AnalysisSummary {
            report: &self.report,
            by_biome: &self.by_biome,
            by_service: &self.by_service,
        }
    }
}

/// Load, clean and aggregate the file at `path`.
pub fn run(path: &Path, options: &LoadOptions, top_n: usize) -> Result<Analysis> {
    let raw = load_file(path, options)?;
    log::info!("loaded {} rows from {}", raw.len(), path.display());
    Ok(Analysis::from_records(&raw, top_n))
}

/// Write the report and both tables to `path` as pretty-printed JSON.
pub fn export_summary(analysis: &Analysis, path: &Path) -> Result<()> {
    let json = serde_json::to_string_pretty(&analysis.summary()).context("serializing summary")?;
    std::fs::write(path, json).with_context(|| format!("writing {}", path.display()))?;
    log::info!("summary written to {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;
    use crate::data::model::DropReason;

    const DATASET: &str = "\
ESVD extract
rows follow the header description line
Biome,ESService,Currency,Value,ValueType,Unit,ServiceArea
-,-,-,-,-,-,-
Grassland,Pollination,Euro,100,Annual,USD/ha/yr,
Grassland,Recreation,US Dollar,400,Annualized NPV,USD/yr,10
Coastal,Food,Martian Credit,100,Annual,USD/ha/yr,
Coastal,Climate regulation,US Dollar,50,Annual (Range),USD/ha/yr,
Forests,Raw materials,US Dollar,1000,One-time,USD/ha,
Forests,Raw materials,British Pound,10,Annual,GBP/household/yr,
Forests,Waste treatment,US Dollar,90,Annual,USD/yr,
";

    fn analyse(text: &str) -> Analysis {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(text.as_bytes()).unwrap();
        run(file.path(), &LoadOptions::default(), 5).unwrap()
    }

    #[test]
    fn end_to_end() {
        let analysis = analyse(DATASET);

        assert_eq!(analysis.report.input_rows, 7);
        assert_eq!(analysis.report.kept_rows, 3);
        assert_eq!(analysis.report.dropped_for(DropReason::UnknownCurrency), 1);
        assert_eq!(analysis.report.dropped_for(DropReason::NonAnnualValueType), 1);
        assert_eq!(analysis.report.dropped_for(DropReason::PerCapitaUnit), 1);
        assert_eq!(analysis.report.dropped_for(DropReason::MissingServiceArea), 1);

        let biome = &analysis.by_biome;
        assert_eq!(biome.x_categories, vec!["Grassland", "Coastal"]);
        let pollination = biome.value("Grassland", "Food and Water").unwrap();
        assert!((pollination - 111.0).abs() < 1e-9);
        assert_eq!(biome.value("Grassland", "Human Happiness"), Some(40.0));
        assert_eq!(biome.total("Coastal"), Some(50.0));

        let service = &analysis.by_service;
        assert!((service.total("Food and Water").unwrap() - 111.0).abs() < 1e-9);
        assert_eq!(service.total("Weather Protection"), Some(50.0));
        assert_eq!(service.total("Other"), None);
        assert!(!service.series.iter().any(|b| b == "Forests"));
    }

    #[test]
    fn rerun_is_deterministic() {
        let a = analyse(DATASET);
        let b = analyse(DATASET);
        assert_eq!(a.by_biome, b.by_biome);
        assert_eq!(a.by_service, b.by_service);
        assert_eq!(a.report, b.report);
    }

    #[test]
    fn summary_serializes_labels() {
        let analysis = analyse(DATASET);
        let json = serde_json::to_value(analysis.summary()).unwrap();
        assert_eq!(json["report"]["kept_rows"], 3);
        assert_eq!(json["report"]["dropped"]["unknown_currency"], 1);
        assert_eq!(json["by_biome"]["x_categories"][0], "Grassland");
    }

    #[test]
    fn export_writes_json_file() {
        let analysis = analyse(DATASET);
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("summary.json");
        export_summary(&analysis, &path).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        let json: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(json["by_service"]["series"][1], "Coastal");
    }
}
