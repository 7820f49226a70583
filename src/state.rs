use std::path::{Path, PathBuf};

use crate::color::ColorMap;
use crate::config::ReportConfig;
use crate::data::aggregate::StackedTable;
use crate::data::pipeline::{self, Analysis};
use crate::ui::plot::ChartSpec;

// ---------------------------------------------------------------------------
// Which chart the central panel shows
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ChartKind {
    #[default]
    ByBiome,
    ByService,
}

impl ChartKind {
    pub const ALL: [ChartKind; 2] = [ChartKind::ByBiome, ChartKind::ByService];

    pub fn label(self) -> &'static str {
        match self {
            ChartKind::ByBiome => "By biome",
            ChartKind::ByService => "By service",
        }
    }
}

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    pub config: ReportConfig,

    /// Result of the last successful run (None until a file is loaded).
    pub analysis: Option<Analysis>,

    /// File the current analysis came from.
    pub source: Option<PathBuf>,

    pub active_chart: ChartKind,

    /// Fill colours for the by-biome and by-service charts.
    pub biome_colors: Option<ColorMap>,
    pub service_colors: Option<ColorMap>,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

impl AppState {
    pub fn new(config: ReportConfig) -> Self {
        Self {
            config,
            analysis: None,
            source: None,
            active_chart: ChartKind::default(),
            biome_colors: None,
            service_colors: None,
            status_message: None,
        }
    }

    /// Run the pipeline on `path`, replacing the current analysis on success.
    pub fn load_path(&mut self, path: &Path) {
        match pipeline::run(path, &self.config.load, self.config.top_n) {
            Ok(analysis) => {
                self.set_analysis(analysis, path.to_path_buf());
                if let (Some(export), Some(analysis)) = (&self.config.export, &self.analysis) {
                    if let Err(e) = pipeline::export_summary(analysis, export) {
                        log::error!("Export failed: {e:#}");
                        self.status_message = Some(format!("Export failed: {e:#}"));
                    }
                }
            }
            Err(e) => {
                log::error!("Failed to load file: {e:#}");
                self.status_message = Some(format!("Error: {e:#}"));
            }
        }
    }

    /// Install a finished analysis and rebuild the chart colours.
    pub fn set_analysis(&mut self, analysis: Analysis, source: PathBuf) {
        self.biome_colors = Some(ColorMap::new(&analysis.by_biome.series));
        self.service_colors = Some(ColorMap::new(&analysis.by_service.series));
        self.status_message = analysis
            .records
            .is_empty()
            .then(|| "No rows survived cleaning".to_string());
        self.analysis = Some(analysis);
        self.source = Some(source);
    }

    /// Table, colours and chart labels for the active chart.
    pub fn active_view(&self) -> Option<(&StackedTable, &ColorMap, ChartSpec)> {
        let analysis = self.analysis.as_ref()?;
        match self.active_chart {
            ChartKind::ByBiome => Some((
                &analysis.by_biome,
                self.biome_colors.as_ref()?,
                ChartSpec::by_biome(self.config.top_n),
            )),
            ChartKind::ByService => Some((
                &analysis.by_service,
                self.service_colors.as_ref()?,
                ChartSpec::by_service(),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    const DATASET: &str = "\
meta
meta
Biome,ESService,Currency,Value,ValueType,Unit,ServiceArea
desc
Grassland,Pollination,Euro,100,Annual,USD/ha/yr,
Wetlands,Water,US Dollar,20,Annual,USD/ha/yr,
";

    fn write_dataset(text: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(text.as_bytes()).unwrap();
        file
    }

    #[test]
    fn load_installs_analysis_and_colours() {
        let file = write_dataset(DATASET);
        let mut state = AppState::new(ReportConfig::default());
        state.load_path(file.path());

        assert!(state.status_message.is_none());
        assert_eq!(state.analysis.as_ref().unwrap().records.len(), 2);
        let (table, _, spec) = state.active_view().unwrap();
        assert_eq!(table.x_categories, vec!["Grassland", "Wetlands"]);
        assert_eq!(spec.x_label, "Biome");

        state.active_chart = ChartKind::ByService;
        let (table, colors, _) = state.active_view().unwrap();
        assert_eq!(table.series, vec!["Grassland", "Wetlands"]);
        assert_ne!(colors.color_for("Grassland"), colors.color_for("Wetlands"));
    }

    #[test]
    fn failed_load_keeps_previous_analysis() {
        let file = write_dataset(DATASET);
        let mut state = AppState::new(ReportConfig::default());
        state.load_path(file.path());

        let broken = write_dataset("only one line\n");
        state.load_path(broken.path());
        assert!(state.status_message.as_deref().unwrap().starts_with("Error"));
        assert_eq!(state.source.as_deref(), Some(file.path()));
    }

    #[test]
    fn empty_result_is_reported() {
        let file = write_dataset("m\nm\nBiome,ESService,Currency,Value,ValueType,Unit,ServiceArea\nd\nA,Food,Euro,1,One-time,USD/ha,\n");
        let mut state = AppState::new(ReportConfig::default());
        state.load_path(file.path());
        assert_eq!(state.status_message.as_deref(), Some("No rows survived cleaning"));
    }
}
