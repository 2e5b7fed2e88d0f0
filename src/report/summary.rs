//! Selection summary report

use comfy_table::{presets::UTF8_FULL_CONDENSED, Attribute, Cell, CellAlignment, Color, Table};
use console::style;

use crate::pipeline::{FeatureScore, SelectionResult};

/// Format an optional component score, `-` when the filter failed.
fn component(value: Option<f64>) -> String {
    value.map_or_else(|| "-".to_string(), |v| format!("{:.3}", v))
}

/// Build the per-feature score table.
pub fn score_table(scores: &[FeatureScore]) -> Table {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL_CONDENSED);
    table.set_header(vec![
        Cell::new("Feature").add_attribute(Attribute::Bold),
        Cell::new("MI").add_attribute(Attribute::Bold),
        Cell::new("Pearson").add_attribute(Attribute::Bold),
        Cell::new("ANOVA").add_attribute(Attribute::Bold),
        Cell::new("RF").add_attribute(Attribute::Bold),
        Cell::new("Final").add_attribute(Attribute::Bold),
        Cell::new("Selected").add_attribute(Attribute::Bold),
        Cell::new("Explanation").add_attribute(Attribute::Bold),
    ]);

    for score in scores {
        let (mark, color) = if score.selected {
            ("✅", Color::Green)
        } else {
            ("❌", Color::Red)
        };
        table.add_row(vec![
            Cell::new(&score.feature_name),
            Cell::new(component(score.mi_score)).set_alignment(CellAlignment::Right),
            Cell::new(component(score.pearson_score)).set_alignment(CellAlignment::Right),
            Cell::new(component(score.anova_score)).set_alignment(CellAlignment::Right),
            Cell::new(component(score.rf_importance)).set_alignment(CellAlignment::Right),
            Cell::new(format!("{:.3}", score.final_score))
                .fg(color)
                .add_attribute(Attribute::Bold)
                .set_alignment(CellAlignment::Right),
            Cell::new(mark),
            Cell::new(&score.explanation),
        ]);
    }

    table
}

/// Print the selection summary: counts first, then the score table.
pub fn display_summary(result: &SelectionResult) {
    println!();
    println!(
        "    {} {}",
        style("📋").cyan(),
        style("SELECTION SUMMARY").white().bold()
    );
    println!("    {}", style("─".repeat(50)).dim());
    println!();

    let mut counts = Table::new();
    counts.load_preset(UTF8_FULL_CONDENSED);
    counts.set_header(vec![
        Cell::new("Metric").add_attribute(Attribute::Bold),
        Cell::new("Value").add_attribute(Attribute::Bold),
    ]);
    counts.add_row(vec![Cell::new("🎯 Mode"), Cell::new(result.mode).fg(Color::Cyan)]);
    counts.add_row(vec![
        Cell::new("📁 Features Analyzed"),
        Cell::new(result.feature_scores.len()),
    ]);
    counts.add_row(vec![
        Cell::new("✅ Selected"),
        Cell::new(result.selected_features.len())
            .fg(Color::Green)
            .add_attribute(Attribute::Bold),
    ]);
    counts.add_row(vec![
        Cell::new("🗑️  Rejected"),
        Cell::new(result.rejected_features.len()).fg(if result.rejected_features.is_empty() {
            Color::White
        } else {
            Color::Red
        }),
    ]);

    // Indent the tables
    for line in counts.to_string().lines() {
        println!("    {}", line);
    }

    if !result.feature_scores.is_empty() {
        println!();
        println!(
            "    {} {}",
            style("📝").cyan(),
            style("FEATURE SCORES").white().bold()
        );
        println!("    {}", style("─".repeat(50)).dim());
        println!();
        for line in score_table(&result.feature_scores).to_string().lines() {
            println!("    {}", line);
        }
    }
}
