pub mod bench;
pub mod calc;
pub mod validate;

use colored::Colorize;

/// Format a probability as a percentage with two decimals.
fn percent(p: f64) -> String {
    format!("{:.2}%", p * 100.0)
}

/// Color a deviation green when within tolerance and red otherwise.
fn deviation_label(deviation: f64, tolerance: f64) -> String {
    let text = format!("{deviation:.4}");
    if deviation <= tolerance {
        text.green().to_string()
    } else {
        text.red().bold().to_string()
    }
}
