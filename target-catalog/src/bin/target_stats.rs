//! Summarise literature ages in the target list and plot them
//!
//! Reads the CSV written by `generate_targets`, prints age statistics and
//! saves a four-panel figure, then opens it in the system image viewer.

use clap::Parser;
use std::path::PathBuf;
use target_catalog::catalogs::{CatalogError, TargetCatalog};
use target_catalog::config::{load_or_default, AnalysisConfig};
use target_catalog::pipeline::analyze_target_list;
use target_catalog::viz::render_statistics_plot;

#[derive(Parser, Debug)]
#[command(
    name = "Target Statistics",
    about = "Prints literature age statistics for the target list and plots them",
    long_about = None
)]
struct Args {
    /// Target list CSV (default: ASTR502_Mega_Target_List.csv)
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// Output PNG (default: target_statistics_plot.png)
    #[arg(short, long)]
    plot: Option<PathBuf>,

    /// Save the figure without opening a viewer
    #[arg(long)]
    no_show: bool,

    /// JSON file overriding thresholds and file names
    #[arg(long)]
    config: Option<PathBuf>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    let args = Args::parse();

    let mut config: AnalysisConfig = load_or_default(args.config.as_deref())?;
    if let Some(input) = args.input {
        config.input = input;
    }
    if let Some(plot) = args.plot {
        config.plot = plot;
    }

    println!("Reading {}...", config.input.display());
    let catalog = match TargetCatalog::load(&config.input) {
        Ok(catalog) => catalog,
        Err(CatalogError::NotFound(_)) => {
            println!("Error: File not found. Make sure you ran the generator script first!");
            return Ok(());
        }
        Err(e) => return Err(e.into()),
    };

    let report = analyze_target_list(&catalog, &config);
    println!("{}", report.summary);

    render_statistics_plot(&report.plot_data, &config, &config.plot)?;
    println!("Plots saved to {}", config.plot.display());

    if !args.no_show {
        if let Err(e) = open::that(&config.plot) {
            log::warn!("Could not open {}: {e}", config.plot.display());
        }
    }

    Ok(())
}
