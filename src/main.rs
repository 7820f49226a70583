mod app;
mod color;
mod config;
mod data;
mod error;
mod state;
mod ui;

use anyhow::{anyhow, Result};
use app::EsvReportApp;
use clap::Parser;
use config::{Cli, ReportConfig};
use data::aggregate::StackedTable;
use data::currency::REFERENCE_CURRENCY;
use data::model::DropReason;
use data::pipeline::{self, Analysis};
use eframe::egui;
use state::AppState;

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let config = ReportConfig::from(&cli);

    if cli.headless {
        let input = cli
            .input
            .as_deref()
            .ok_or_else(|| anyhow!("--headless needs --input"))?;
        let analysis = pipeline::run(input, &config.load, config.top_n)?;
        if let Some(export) = &config.export {
            pipeline::export_summary(&analysis, export)?;
        }
        print_analysis(&analysis, config.top_n);
        return Ok(());
    }

    let mut state = AppState::new(config);
    if let Some(input) = &cli.input {
        state.load_path(input);
    }

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1200.0, 800.0])
            .with_min_inner_size([600.0, 400.0]),
        ..Default::default()
    };

    eframe::run_native(
        "ESV Report – Ecosystem Service Values",
        options,
        Box::new(|_cc| Ok(Box::new(EsvReportApp::new(state)))),
    )
    .map_err(|e| anyhow!("viewer failed: {e}"))
}

fn print_analysis(analysis: &Analysis, top_n: usize) {
    let report = &analysis.report;
    println!("Values in {REFERENCE_CURRENCY} per hectare per year");
    println!("Rows read: {}", report.input_rows);
    println!("Rows kept: {}", report.kept_rows);
    for reason in DropReason::ALL {
        println!("  dropped ({reason}): {}", report.dropped_for(reason));
    }

    println!("\nTop {top_n} biomes (USD/ha/yr), by service category");
    print_table(&analysis.by_biome);

    println!("\nService categories (USD/ha/yr), by biome");
    print_table(&analysis.by_service);
}

fn print_table(table: &StackedTable) {
    for x in &table.x_categories {
        println!("{x}: {:.2}", table.total(x).unwrap_or_default());
        for series in &table.series {
            match table.value(x, series) {
                Some(v) if v != 0.0 => println!("    {series}: {v:.2}"),
                _ => {}
            }
        }
    }
}
