use std::collections::HashMap;

use serde::Serialize;

use super::model::{CleanRecord, ServiceCategory};

/// Number of biomes kept in the by-biome view unless configured otherwise.
pub const DEFAULT_TOP_BIOMES: usize = 5;

// ---------------------------------------------------------------------------
// StackedTable – the shape both chart views share
// ---------------------------------------------------------------------------

/// Grouped sums laid out for a stacked bar chart.
///
/// `values[s][x]` is the sum for fill series `s` at x category `x`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct StackedTable {
    pub x_categories: Vec<String>,
    pub series: Vec<String>,
    pub values: Vec<Vec<f64>>,
    /// Sum over all series, per x category.
    pub totals: Vec<f64>,
}

impl StackedTable {
    pub fn is_empty(&self) -> bool {
        self.x_categories.is_empty()
    }

    pub fn value(&self, x: &str, series: &str) -> Option<f64> {
        let xi = self.x_categories.iter().position(|c| c == x)?;
        let si = self.series.iter().position(|s| s == series)?;
        Some(self.values[si][xi])
    }

    pub fn total(&self, x: &str) -> Option<f64> {
        let xi = self.x_categories.iter().position(|c| c == x)?;
        Some(self.totals[xi])
    }

    /// Build from `(x, series, value)` triples. Axis order is given by the
    /// caller; triples whose keys are not on an axis are ignored.
    fn from_cells<'a>(
        x_categories: Vec<String>,
        series: Vec<String>,
        cells: impl Iterator<Item = (&'a str, &'a str, f64)>,
    ) -> Self {
        let mut values = vec![vec![0.0; x_categories.len()]; series.len()];
        let mut totals = vec![0.0; x_categories.len()];
        {
            let x_index: HashMap<&str, usize> = x_categories
                .iter()
                .enumerate()
                .map(|(i, x)| (x.as_str(), i))
                .collect();
            let s_index: HashMap<&str, usize> = series
                .iter()
                .enumerate()
                .map(|(i, s)| (s.as_str(), i))
                .collect();

            for (x, s, v) in cells {
                if let (Some(&xi), Some(&si)) = (x_index.get(x), s_index.get(s)) {
                    values[si][xi] += v;
                    totals[xi] += v;
                }
            }
        }

        StackedTable {
            x_categories,
            series,
            values,
            totals,
        }
    }
}

// ---------------------------------------------------------------------------
// Grouped sums
// ---------------------------------------------------------------------------

/// Sum `value` per key, keeping keys in first-encounter order.
fn grouped_sums<'a>(items: impl Iterator<Item = (&'a str, f64)>) -> Vec<(&'a str, f64)> {
    let mut order: Vec<(&str, f64)> = Vec::new();
    let mut index: HashMap<&str, usize> = HashMap::new();
    for (key, value) in items {
        match index.get(key) {
            Some(&i) => order[i].1 += value,
            None => {
                index.insert(key, order.len());
                order.push((key, value));
            }
        }
    }
    order
}

/// Total per-area value per biome, largest first.
///
/// The sort is stable, so equal totals keep first-encounter order.
pub fn biome_totals(records: &[CleanRecord]) -> Vec<(String, f64)> {
    let mut totals = grouped_sums(records.iter().map(|r| (r.biome.as_str(), r.per_area_value)));
    totals.sort_by(|a, b| b.1.total_cmp(&a.1));
    totals.into_iter().map(|(b, v)| (b.to_string(), v)).collect()
}

/// Names of the `n` biomes with the largest totals.
pub fn top_biomes(records: &[CleanRecord], n: usize) -> Vec<String> {
    biome_totals(records)
        .into_iter()
        .take(n)
        .map(|(biome, _)| biome)
        .collect()
}

fn categories_present<'a>(records: impl Iterator<Item = &'a CleanRecord>) -> Vec<String> {
    let present: Vec<ServiceCategory> = records.map(|r| r.category).collect();
    ServiceCategory::ALL
        .iter()
        .filter(|c| present.contains(c))
        .map(|c| c.label().to_string())
        .collect()
}

/// Top-`n` biomes by total value, each broken down by service category.
pub fn by_biome(records: &[CleanRecord], n: usize) -> StackedTable {
    let top = top_biomes(records, n);
    let in_top = |r: &&CleanRecord| top.iter().any(|b| *b == r.biome);

    let series = categories_present(records.iter().filter(in_top));
    StackedTable::from_cells(
        top.clone(),
        series,
        records
            .iter()
            .filter(in_top)
            .map(|r| (r.biome.as_str(), r.category.label(), r.per_area_value)),
    )
}

/// Total value per service category (largest first), broken down by biome.
/// Covers every biome, not only the top ones.
pub fn by_service(records: &[CleanRecord]) -> StackedTable {
    let mut categories = grouped_sums(records.iter().map(|r| (r.category.label(), r.per_area_value)));
    categories.sort_by(|a, b| b.1.total_cmp(&a.1));
    let x_categories = categories.into_iter().map(|(c, _)| c.to_string()).collect();

    let series = grouped_sums(records.iter().map(|r| (r.biome.as_str(), 0.0)))
        .into_iter()
        .map(|(b, _)| b.to_string())
        .collect();

    StackedTable::from_cells(
        x_categories,
        series,
        records
            .iter()
            .map(|r| (r.category.label(), r.biome.as_str(), r.per_area_value)),
    )
}
