use eframe::egui::Ui;
use egui_plot::{Bar, BarChart, Legend, Plot};

use crate::color::ColorMap;
use crate::data::aggregate::StackedTable;
use crate::state::AppState;

const BAR_WIDTH: f64 = 0.7;

// ---------------------------------------------------------------------------
// Chart description
// ---------------------------------------------------------------------------

/// Labels for one stacked bar chart: x field, y field, fill field, title.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartSpec {
    pub title: String,
    pub x_label: &'static str,
    pub y_label: &'static str,
    pub fill_label: &'static str,
}

impl ChartSpec {
    pub fn by_biome(top_n: usize) -> Self {
        ChartSpec {
            title: format!("Top {top_n} biomes by annual value per hectare"),
            x_label: "Biome",
            y_label: "USD / ha / yr",
            fill_label: "Service category",
        }
    }

    pub fn by_service() -> Self {
        ChartSpec {
            title: "Annual value per hectare by service category".to_string(),
            x_label: "Service category",
            y_label: "USD / ha / yr",
            fill_label: "Biome",
        }
    }
}

// ---------------------------------------------------------------------------
// Central panel
// ---------------------------------------------------------------------------

/// Render the active chart in the central panel.
pub fn chart_panel(ui: &mut Ui, state: &AppState) {
    let Some((table, colors, spec)) = state.active_view() else {
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.heading("Open a valuation CSV to chart it  (File → Open…)");
        });
        return;
    };

    if table.is_empty() {
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.heading("Nothing to chart: no rows survived cleaning");
        });
        return;
    }

    render_chart(ui, table, colors, &spec);
}

/// Draw `table` as stacked bars: one bar per x category, one layer per series.
pub fn render_chart(ui: &mut Ui, table: &StackedTable, colors: &ColorMap, spec: &ChartSpec) {
    ui.heading(&spec.title);

    let labels = table.x_categories.clone();
    let mut charts: Vec<BarChart> = Vec::with_capacity(table.series.len());
    for (series, values) in table.series.iter().zip(&table.values) {
        let bars: Vec<Bar> = values
            .iter()
            .enumerate()
            .map(|(x, &v)| {
                Bar::new(x as f64, v)
                    .width(BAR_WIDTH)
                    .name(format!("{}: {series}", table.x_categories[x]))
            })
            .collect();

        let chart = {
            let below: Vec<&BarChart> = charts.iter().collect();
            BarChart::new(bars)
                .name(series)
                .color(colors.color_for(series))
                .stack_on(&below)
        };
        charts.push(chart);
    }

    Plot::new(spec.title.as_str())
        .legend(Legend::default())
        .x_axis_label(format!("{}  (fill: {})", spec.x_label, spec.fill_label))
        .y_axis_label(spec.y_label)
        .x_axis_formatter(move |mark, _range| category_label(&labels, mark.value))
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_scroll(true)
        .allow_zoom(true)
        .show(ui, |plot_ui| {
            for chart in charts {
                plot_ui.bar_chart(chart);
            }
        });
}

/// Axis text for a grid mark: the category name at integer positions.
fn category_label(labels: &[String], value: f64) -> String {
    let rounded = value.round();
    if (value - rounded).abs() > 1e-6 || rounded < 0.0 {
        return String::new();
    }
    labels.get(rounded as usize).cloned().unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labels_only_on_integer_marks() {
        let labels = vec!["Coastal".to_string(), "Grassland".to_string()];
        assert_eq!(category_label(&labels, 0.0), "Coastal");
        assert_eq!(category_label(&labels, 1.0), "Grassland");
        assert_eq!(category_label(&labels, 0.5), "");
        assert_eq!(category_label(&labels, 2.0), "");
        assert_eq!(category_label(&labels, -1.0), "");
    }

    #[test]
    fn titles_mention_top_count() {
        assert!(ChartSpec::by_biome(7).title.contains("Top 7"));
        assert_eq!(ChartSpec::by_service().fill_label, "Biome");
    }
}
