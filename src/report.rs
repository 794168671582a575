//! Report formatting for simulation results.
//!
//! Pure functions: (SimulationReport, OutputFormat) → String.
//! No I/O, no side effects.

use crate::types::{DrawPolicy, OutputFormat, SimulationReport};

/// Format a simulation report for output.
pub fn format_report(report: &SimulationReport, format: OutputFormat) -> String {
    match format {
        OutputFormat::Human => format_human(report),
        OutputFormat::Json => format_json(report),
    }
}

// ============================================================================
// HUMAN FORMAT
// ============================================================================

fn format_human(report: &SimulationReport) -> String {
    let mut out = String::new();

    out.push_str("=== Simulation ===\n");
    out.push_str(&format!("Games played:       {}\n", report.games));
    out.push_str(&format!("Seed:               {}\n", report.seed));
    out.push_str(&format!(
        "Draw scoring:       {}\n",
        match report.draw_policy {
            DrawPolicy::Draw => "draw",
            DrawPolicy::CreditComputer => "credit computer",
        }
    ));
    out.push('\n');

    out.push_str("=== Results ===\n");
    out.push_str(&format!(
        "Human (X) wins:     {}{}\n",
        report.score.human,
        percent(report.score.human, report.games)
    ));
    out.push_str(&format!(
        "Computer (O) wins:  {}{}\n",
        report.score.computer,
        percent(report.score.computer, report.games)
    ));
    out.push_str(&format!(
        "Draws:              {}{}\n",
        report.draws,
        percent(report.draws, report.games)
    ));

    if report.center_openings > 0 {
        out.push('\n');
        out.push_str("=== Center Openings ===\n");
        out.push_str(&format!("Games:              {}\n", report.center_openings));
        out.push_str(&format!(
            "Human wins:         {}{}\n",
            report.center_opening_wins,
            percent(report.center_opening_wins, report.center_openings as usize)
        ));
    }

    out
}

/// "  (12.3%)" or empty when there is nothing to divide by.
fn percent(count: u32, total: usize) -> String {
    if total == 0 {
        return String::new();
    }
    format!("  ({:.1}%)", count as f64 * 100.0 / total as f64)
}

// ============================================================================
// JSON FORMAT
// ============================================================================

fn format_json(report: &SimulationReport) -> String {
    serde_json::to_string_pretty(report).unwrap_or_else(|e| {
        // Plain data only; serialization cannot fail
        panic!("Failed to serialize report to JSON: {}", e)
    })
}

// ============================================================================
// TESTS
// ============================================================================
