use std::io::IsTerminal;
use owo_colors::OwoColorize;
use terminal_size::{Width, terminal_size};

use crate::assessment::fields::{RISK_SCORE, SCORE_FIELDS};
use crate::assessment::Table;
use crate::questions::{Question, QuestionKind};
use crate::scoring::{colour_for, RiskBand, ScoringConfig};

/// Widest a single column may get before its cells are truncated
const MAX_COLUMN_WIDTH: usize = 40;

/// Check if stdout is a TTY (for auto-detecting color support)
pub fn should_use_colors() -> bool {
    std::io::stdout().is_terminal()
}

/// Get terminal width, defaulting to None for pipes (unlimited)
fn get_terminal_width() -> Option<usize> {
    terminal_size().map(|(Width(w), _)| w as usize)
}

/// Truncate text to fit available width, accounting for Unicode
fn truncate(text: &str, max_width: usize) -> String {
    let chars: Vec<char> = text.chars().collect();
    if chars.len() <= max_width {
        text.to_string()
    } else if max_width > 3 {
        format!("{}...", chars[..max_width - 3].iter().collect::<String>())
    } else {
        chars[..max_width].iter().collect()
    }
}

fn pad(text: &str, width: usize) -> String {
    let len = text.chars().count();
    format!("{}{}", text, " ".repeat(width.saturating_sub(len)))
}

/// Paint already padded text in its band colour
fn paint(text: &str, band: RiskBand) -> String {
    match band {
        RiskBand::High => text.red().bold().to_string(),
        RiskBand::Medium => text.yellow().to_string(),
        RiskBand::Low => text.green().to_string(),
        RiskBand::None => text.to_string(),
    }
}

/// Band label, e.g. "high"
fn format_band(band: RiskBand, use_colors: bool) -> String {
    if use_colors {
        paint(band.as_str(), band)
    } else {
        band.as_str().to_string()
    }
}

/// Count of rows per Risk Score band, e.g. "Risk bands: high 1, medium 0, low 2, none 0".
/// Returns None when the table has no Risk Score column.
pub fn format_band_summary(table: &Table, scoring: &ScoringConfig, use_colors: bool) -> Option<String> {
    if !table.has_column(RISK_SCORE) {
        return None;
    }

    let bands = [RiskBand::High, RiskBand::Medium, RiskBand::Low, RiskBand::None];
    let mut counts = [0usize; 4];
    for row in table.rows() {
        if let Some(score) = row.number(RISK_SCORE) {
            let band = colour_for(score, scoring);
            if let Some(idx) = bands.iter().position(|b| *b == band) {
                counts[idx] += 1;
            }
        }
    }

    let parts: Vec<String> = bands
        .iter()
        .zip(counts)
        .map(|(band, count)| format!("{} {}", format_band(*band, use_colors), count))
        .collect();
    Some(format!("Risk bands: {}", parts.join(", ")))
}

/// Format a table with a header line, one line per row.
/// Score columns are coloured by band when `use_colors` is set.
pub fn format_table(table: &Table, scoring: &ScoringConfig, use_colors: bool) -> String {
    if table.columns().is_empty() {
        return "Empty assessment.".to_string();
    }

    let term_width = get_terminal_width();
    let column_cap = match term_width {
        Some(width) => (width / table.columns().len().max(1)).clamp(6, MAX_COLUMN_WIDTH),
        None => MAX_COLUMN_WIDTH,
    };

    let cells: Vec<Vec<String>> = table
        .rows()
        .iter()
        .map(|row| {
            table
                .columns()
                .iter()
                .map(|column| {
                    let text = row.get(column).map(|v| v.to_string()).unwrap_or_default();
                    truncate(&text, column_cap)
                })
                .collect()
        })
        .collect();

    let widths: Vec<usize> = table
        .columns()
        .iter()
        .enumerate()
        .map(|(i, column)| {
            let header = truncate(column, column_cap).chars().count();
            cells
                .iter()
                .map(|row| row[i].chars().count())
                .fold(header, usize::max)
        })
        .collect();

    let separator = "  ";
    let mut lines = Vec::with_capacity(table.len() + 1);

    let header = table
        .columns()
        .iter()
        .zip(&widths)
        .map(|(column, width)| pad(&truncate(column, column_cap), *width))
        .collect::<Vec<_>>()
        .join(separator);
    lines.push(if use_colors {
        header.trim_end().bold().to_string()
    } else {
        header.trim_end().to_string()
    });

    if table.is_empty() {
        lines.push("No rows.".to_string());
    }

    for (row, row_cells) in table.rows().iter().zip(&cells) {
        let line = table
            .columns()
            .iter()
            .zip(row_cells)
            .zip(&widths)
            .map(|((column, text), width)| {
                let padded = pad(text, *width);
                if use_colors && SCORE_FIELDS.contains(&column.as_str()) {
                    match row.number(column) {
                        Some(score) => paint(&padded, colour_for(score, scoring)),
                        None => padded,
                    }
                } else {
                    padded
                }
            })
            .collect::<Vec<_>>()
            .join(separator);
        lines.push(line.trim_end().to_string());
    }

    lines.join("\n")
}

/// Format visible questions as a numbered list
/// Format: "{n}. [{role}] {prompt} -> {field}" plus one line per option
pub fn format_questions(questions: &[&Question], use_colors: bool) -> String {
    if questions.is_empty() {
        return "No questions for this role.".to_string();
    }

    let mut lines = Vec::new();
    for (idx, q) in questions.iter().enumerate() {
        let index = format!("{:>2}.", idx + 1);
        if use_colors {
            lines.push(format!(
                "{} [{}] {} -> {}",
                index.dimmed(),
                q.role.cyan(),
                q.prompt,
                q.field.yellow()
            ));
        } else {
            lines.push(format!("{} [{}] {} -> {}", index, q.role, q.prompt, q.field));
        }

        if q.kind == QuestionKind::Select {
            for (code, label) in q.choices() {
                lines.push(format!("      {} = {}", code, label));
            }
        }
    }
    lines.join("\n")
}
