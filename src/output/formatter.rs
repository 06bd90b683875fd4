use std::io::IsTerminal;

use chrono::{DateTime, Utc};
use owo_colors::OwoColorize;
use serde::{Deserialize, Serialize};
use terminal_size::{terminal_size, Width};

use crate::scoring::{
    AnalysisResult, DecisionOption, Priority, QubitAnalysis, QuantumState, Recommendation, Report,
};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable report with bars
    #[default]
    Table,
    /// Tab-separated rows for scripting
    Tsv,
    /// Full report as JSON
    Json,
}

/// Check if stdout is a TTY (for auto-detecting color support)
pub fn should_use_colors() -> bool {
    std::io::stdout().is_terminal()
}

/// Get terminal width, defaulting to None for pipes (unlimited)
fn get_terminal_width() -> Option<usize> {
    terminal_size().map(|(Width(w), _)| w as usize)
}

/// Truncate a name to fit available width, accounting for Unicode
fn truncate_name(name: &str, max_width: usize) -> String {
    let chars: Vec<char> = name.chars().collect();
    if chars.len() <= max_width {
        name.to_string()
    } else if max_width > 3 {
        format!("{}...", chars.iter().take(max_width - 3).collect::<String>())
    } else {
        chars.iter().take(max_width).collect()
    }
}

/// Horizontal bar for a percentage in [0, 100]. Out-of-range values are
/// drawn as empty or full.
pub fn format_bar(percent: f64, width: usize) -> String {
    let ratio = if percent.is_nan() {
        0.0
    } else {
        (percent / 100.0).clamp(0.0, 1.0)
    };
    let filled = ((ratio * width as f64).round() as usize).min(width);
    format!("{}{}", "█".repeat(filled), "░".repeat(width - filled))
}

fn priority_badge(priority: Priority, use_colors: bool) -> String {
    let label = format!("[{:<6}]", priority.as_str());
    if !use_colors {
        return label;
    }
    match priority {
        Priority::High => label.red().bold().to_string(),
        Priority::Medium => label.yellow().to_string(),
        Priority::Low => label.green().to_string(),
    }
}

/// Format recommendations as a numbered list: badge and title, then the
/// description indented underneath.
pub fn format_recommendations(recs: &[Recommendation], use_colors: bool) -> String {
    recs.iter()
        .map(|rec| {
            let title = if use_colors {
                rec.title.bold().to_string()
            } else {
                rec.title.clone()
            };
            format!(
                "  {} {}\n           {}",
                priority_badge(rec.priority, use_colors),
                title,
                rec.description
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn format_quantum_state(state: &QuantumState) -> String {
    format!(
        "θ={:.3} φ={:.3} → ({:+.3}, {:+.3}, {:+.3})",
        state.theta, state.phi, state.x, state.y, state.z
    )
}

/// Name and bar column widths for the option rows.
fn column_widths(options: &[DecisionOption]) -> (usize, usize) {
    let longest = options
        .iter()
        .map(|o| o.name.chars().count())
        .max()
        .unwrap_or(0);

    // index (4) + raw (8) + percent (6) + spacing (6)
    let fixed = 24;
    match get_terminal_width() {
        Some(width) if width > fixed + 30 => {
            let room = width - fixed;
            let name_width = longest.min(room / 2).max(8);
            let bar_width = room.saturating_sub(name_width).clamp(10, 40);
            (name_width, bar_width)
        }
        Some(_) => (longest.min(20), 10),
        None => (longest, 30),
    }
}

fn format_header(decision_name: &str, policy: &str, use_colors: bool) -> String {
    if use_colors {
        format!("{}  {}", decision_name.bold(), format!("({} policy)", policy).dimmed())
    } else {
        format!("{}  ({} policy)", decision_name, policy)
    }
}

fn format_weighted(
    decision_name: &str,
    options: &[DecisionOption],
    result: &AnalysisResult,
    use_colors: bool,
) -> String {
    let (name_width, bar_width) = column_widths(options);
    let mut lines = vec![format_header(decision_name, "weighted", use_colors), String::new()];

    let verdict = format!(
        "Optimal choice: {} ({}% confidence)",
        result.optimal_choice, result.confidence
    );
    lines.push(if use_colors {
        verdict.green().bold().to_string()
    } else {
        verdict
    });
    lines.push(format!(
        "Uncertainty: {}%   Sensitivity: {}",
        result.uncertainty_level, result.sensitivity
    ));
    lines.push(format!(
        "Qubit state: {}",
        format_quantum_state(&result.quantum_state)
    ));
    lines.push(String::new());

    for (idx, option) in options.iter().enumerate() {
        let raw = result.raw_scores.get(idx).copied().unwrap_or(0.0);
        let probability = result.probabilities.get(idx).copied().unwrap_or(0.0);
        let name = truncate_name(&option.name, name_width);
        let row = format!(
            "{:>3}. {:<name_width$}  {:>6.2}  {}  {:>5.1}%",
            idx + 1,
            name,
            raw,
            format_bar(probability, bar_width),
            probability,
            name_width = name_width
        );
        if use_colors && idx == result.optimal_index {
            lines.push(row.cyan().to_string());
        } else {
            lines.push(row);
        }
    }

    lines.push(String::new());
    lines.push("Recommendations:".to_string());
    lines.push(format_recommendations(&result.recommendations, use_colors));
    lines.join("\n")
}

fn format_qubit(
    decision_name: &str,
    options: &[DecisionOption],
    result: &QubitAnalysis,
    use_colors: bool,
) -> String {
    let (name_width, bar_width) = column_widths(options);
    let mut lines = vec![format_header(decision_name, "qubit", use_colors), String::new()];

    let verdict = format!(
        "Optimal choice: {} ({}% quantum confidence)",
        result.optimal_choice, result.confidence
    );
    lines.push(if use_colors {
        verdict.green().bold().to_string()
    } else {
        verdict
    });
    lines.push(format!("Quantum noise: {}%", result.noise_level));
    lines.push(format!(
        "Confidence:    {}",
        format_bar(f64::from(result.confidence), bar_width)
    ));
    lines.push(String::new());

    for (idx, option) in options.iter().enumerate() {
        let adjusted = result.adjusted.get(idx).copied().unwrap_or(0);
        let name = truncate_name(&option.name, name_width);
        let row = format!(
            "{:>3}. {:<name_width$}  q={:>5.1}  {}  {:>4}%",
            idx + 1,
            name,
            option.qubit,
            format_bar(f64::from(adjusted), bar_width),
            adjusted,
            name_width = name_width
        );
        if use_colors && idx == result.optimal_index {
            lines.push(row.cyan().to_string());
        } else {
            lines.push(row);
        }
    }

    lines.push(String::new());
    lines.push("Recommendations:".to_string());
    lines.push(format_recommendations(&result.recommendations, use_colors));
    lines.join("\n")
}

/// Format a report as a human-readable table.
pub fn format_report(
    decision_name: &str,
    options: &[DecisionOption],
    report: &Report,
    use_colors: bool,
) -> String {
    match report {
        Report::Weighted(result) => format_weighted(decision_name, options, result, use_colors),
        Report::Qubit(result) => format_qubit(decision_name, options, result, use_colors),
    }
}

/// Format per-option rows as tab-separated values for scripting
/// Columns: index, name, score, probability, optimal flag (no headers, no colors)
/// For the qubit policy score is the qubit position and probability the
/// perturbed position.
pub fn format_tsv(options: &[DecisionOption], report: &Report) -> String {
    options
        .iter()
        .enumerate()
        .map(|(idx, option)| {
            let (score, probability, optimal) = match report {
                Report::Weighted(r) => (
                    r.raw_scores.get(idx).copied().unwrap_or(0.0),
                    r.probabilities.get(idx).copied().unwrap_or(0.0),
                    idx == r.optimal_index,
                ),
                Report::Qubit(r) => (
                    option.qubit,
                    f64::from(r.adjusted.get(idx).copied().unwrap_or(0)),
                    idx == r.optimal_index,
                ),
            };
            format!(
                "{}\t{}\t{:.4}\t{:.2}\t{}",
                idx + 1,
                option.name,
                score,
                probability,
                if optimal { "*" } else { "" }
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

#[derive(Serialize)]
struct JsonEnvelope<'a> {
    decision: &'a str,
    generated_at: DateTime<Utc>,
    options: Vec<&'a str>,
    report: &'a Report,
}

/// Format the whole report as pretty-printed JSON.
pub fn format_json(
    decision_name: &str,
    options: &[DecisionOption],
    report: &Report,
    generated_at: DateTime<Utc>,
) -> serde_json::Result<String> {
    let envelope = JsonEnvelope {
        decision: decision_name,
        generated_at,
        options: options.iter().map(|o| o.name.as_str()).collect(),
        report,
    };
    serde_json::to_string_pretty(&envelope)
}
