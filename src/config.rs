use std::path::PathBuf;

use clap::Parser;

use crate::data::aggregate::DEFAULT_TOP_BIOMES;
use crate::data::loader::LoadOptions;

#[derive(Parser, Debug)]
#[command(name = "esv-report")]
#[command(about = "Normalise ecosystem-service valuations and chart them by biome and service")]
#[command(version)]
pub struct Cli {
    /// Valuation CSV to analyse. In the viewer it can also be opened from the File menu.
    #[arg(long, short)]
    pub input: Option<PathBuf>,

    /// 1-based line holding the column names
    #[arg(long, default_value_t = LoadOptions::default().header_line)]
    pub header_line: u64,

    /// 1-based line of the first data row
    #[arg(long, default_value_t = LoadOptions::default().data_line)]
    pub data_line: u64,

    /// Number of biomes shown in the by-biome chart
    #[arg(long, default_value_t = DEFAULT_TOP_BIOMES)]
    pub top: usize,

    /// Print the tables instead of opening the viewer
    #[arg(long, requires = "input")]
    pub headless: bool,

    /// Write the cleaning report and both tables as JSON
    #[arg(long)]
    pub export: Option<PathBuf>,
}

/// Run settings shared by the headless path and the viewer.
#[derive(Debug, Clone)]
pub struct ReportConfig {
    pub load: LoadOptions,
    pub top_n: usize,
    pub export: Option<PathBuf>,
}

impl From<&Cli> for ReportConfig {
    fn from(cli: &Cli) -> Self {
        ReportConfig {
            load: LoadOptions {
                header_line: cli.header_line,
                data_line: cli.data_line,
            },
            top_n: cli.top,
            export: cli.export.clone(),
        }
    }
}

impl Default for ReportConfig {
    fn default() -> Self {
        ReportConfig {
            load: LoadOptions::default(),
            top_n: DEFAULT_TOP_BIOMES,
            export: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_export_layout() {
        let cli = Cli::try_parse_from(["esv-report"]).unwrap();
        let config = ReportConfig::from(&cli);
        assert_eq!(config.load, LoadOptions::default());
        assert_eq!(config.top_n, 5);
        assert!(cli.input.is_none());
    }

    #[test]
    fn overrides() {
        let cli = Cli::try_parse_from([
            "esv-report",
            "--input",
            "esvd.csv",
            "--header-line",
            "1",
            "--data-line",
            "2",
            "--top",
            "3",
            "--headless",
            "--export",
            "out.json",
        ])
        .unwrap();
        let config = ReportConfig::from(&cli);
        assert!(cli.headless);
        assert_eq!(config.load.header_line, 1);
        assert_eq!(config.load.data_line, 2);
        assert_eq!(config.top_n, 3);
        assert_eq!(config.export, Some(PathBuf::from("out.json")));
    }

    #[test]
    fn headless_needs_an_input() {
        assert!(Cli::try_parse_from(["esv-report", "--headless"]).is_err());
    }
}
