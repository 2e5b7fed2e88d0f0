//! featsift: Feature Selection CLI Tool
//!
//! Loads a CSV or Parquet dataset, scores every column against a target with
//! filter, embedded and wrapper methods, and writes the selection as JSON.

use std::time::Instant;

use anyhow::{Context, Result};
use clap::Parser;

use featsift::cli::Cli;
use featsift::pipeline::{display_dataset_stats, load_rows, FeatureSelector};
use featsift::report::{display_summary, export_selection, ExportParams};
use featsift::utils::{
    create_spinner, finish_with_error, finish_with_success, init_logging, print_banner,
    print_completion, print_config, print_info, print_step_header, print_success,
};

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = cli.selection_config()?;
    let output_path = cli.output_path();

    print_banner(env!("CARGO_PKG_VERSION"));
    print_config(&cli.input, &cli.target, &output_path, &config);

    // Step 1: Load dataset
    print_step_header(1, "Load Dataset");
    let step_start = Instant::now();
    let spinner = create_spinner("Reading input file...");
    let rows = match load_rows(&cli.input) {
        Ok(rows) => rows,
        Err(e) => {
            finish_with_error(&spinner, "Failed to load dataset");
            return Err(e);
        }
    };
    finish_with_success(&spinner, "Dataset loaded");
    display_dataset_stats(&rows);
    print_info(&format!("Loaded in {:.2?}", step_start.elapsed()));

    // Step 2: Feature selection
    print_step_header(2, "Feature Selection");
    let step_start = Instant::now();
    let selector = FeatureSelector::new(config.clone()).context("Invalid selection settings")?;
    let spinner = create_spinner("Scoring features (filters, forest importance, wrapper search)...");
    let result = match selector.analyze(&rows, &cli.target, cli.skip_text_vectorization) {
        Ok(result) => result,
        Err(e) => {
            finish_with_error(&spinner, "Feature selection failed");
            return Err(e).context("Feature selection failed");
        }
    };
    finish_with_success(&spinner, "Feature selection complete");
    print_success(&format!(
        "{} of {} features selected ({} mode)",
        result.selected_features.len(),
        result.feature_scores.len(),
        result.mode
    ));
    print_info(&format!("Analyzed in {:.2?}", step_start.elapsed()));

    // Step 3: Save results
    print_step_header(3, "Save Results");
    let spinner = create_spinner("Writing selection report...");
    let input_file = cli.input.display().to_string();
    let params = ExportParams {
        input_file: &input_file,
        target_column: &cli.target,
        config: &config,
        skip_text_vectorization: cli.skip_text_vectorization,
    };
    export_selection(&result, &output_path, &params)?;
    finish_with_success(&spinner, &format!("Saved to {}", output_path.display()));

    display_summary(&result);
    print_completion();

    Ok(())
}
