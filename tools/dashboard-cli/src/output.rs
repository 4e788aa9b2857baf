//! Output formatting for the CLI.

use console::style;
use indicatif::{ProgressBar, ProgressStyle};

/// Output handler for CLI messages.
#[derive(Clone)]
pub struct Output {
    verbose: bool,
    json: bool,
}

impl Output {
    /// Create a new output handler.
    pub fn new(verbose: bool, json: bool) -> Self {
        Self { verbose, json }
    }

    /// Print an info message.
    pub fn info(&self, msg: &str) {
        if self.json {
            return;
        }
        println!("{} {}", style("ℹ").blue(), msg);
    }

    /// Print a success message.
    pub fn success(&self, msg: &str) {
        if self.json {
            return;
        }
        println!("{} {}", style("✓").green(), msg);
    }

    /// Print a warning message.
    pub fn warn(&self, msg: &str) {
        if self.json {
            return;
        }
        eprintln!("{} {}", style("⚠").yellow(), msg);
    }

    /// Print an error message.
    pub fn error(&self, msg: &str) {
        if self.json {
            eprintln!("{}", serde_json::json!({ "error": msg }));
            return;
        }
        eprintln!("{} {}", style("✗").red(), style(msg).red());
    }

    /// Print a debug message (only in verbose mode).
    pub fn debug(&self, msg: &str) {
        if !self.verbose || self.json {
            return;
        }
        eprintln!("{} {}", style("→").dim(), style(msg).dim());
    }

    /// Print a header/title.
    pub fn header(&self, msg: &str) {
        if self.json {
            return;
        }
        println!("\n{}", style(msg).bold().underlined());
    }

    /// Print JSON output.
    pub fn json<T: serde::Serialize>(&self, value: &T) {
        if let Ok(json) = serde_json::to_string_pretty(value) {
            println!("{}", json);
        }
    }

    /// Print a key-value pair.
    pub fn kv(&self, key: &str, value: &str) {
        if self.json {
            return;
        }
        println!("  {}: {}", style(key).dim(), value);
    }

    /// Print a table row.
    pub fn table_row(&self, cols: &[&str], widths: &[usize]) {
        if self.json {
            return;
        }
        let formatted: Vec<String> = cols
            .iter()
            .zip(widths.iter())
            .map(|(col, width)| pad(col, *width))
            .collect();
        println!("  {}", formatted.join("  "));
    }

    /// Print a table: header row, rule, then rows.
    pub fn table(&self, headers: &[&str], rows: &[Vec<String>]) {
        if self.json {
            return;
        }
        let widths = column_widths(headers, rows);
        let header: Vec<String> = headers.iter().map(|h| style(h).bold().to_string()).collect();
        let header: Vec<&str> = header.iter().map(String::as_str).collect();
        self.table_row(&header, &widths);
        let rule = "-".repeat(widths.iter().sum::<usize>() + 2 * widths.len().saturating_sub(1));
        println!("  {}", style(rule).dim());
        for row in rows {
            let cols: Vec<&str> = row.iter().map(String::as_str).collect();
            self.table_row(&cols, &widths);
        }
    }

    /// Create a spinner for indeterminate progress.
    pub fn spinner(&self, msg: &str) -> ProgressBar {
        if self.json {
            return ProgressBar::hidden();
        }

        let pb = ProgressBar::new_spinner();
        if let Ok(spinner_style) = ProgressStyle::default_spinner().template("{spinner:.green} {msg}") {
            pb.set_style(spinner_style);
        }
        pb.set_message(msg.to_string());
        pb.enable_steady_tick(std::time::Duration::from_millis(100));
        pb
    }

    /// Check if JSON mode is enabled.
    pub fn is_json(&self) -> bool {
        self.json
    }
}

/// Pad to `width` visible columns, ignoring ANSI styling.
fn pad(col: &str, width: usize) -> String {
    let visible = console::measure_text_width(col);
    format!("{}{}", col, " ".repeat(width.saturating_sub(visible)))
}

fn column_widths(headers: &[&str], rows: &[Vec<String>]) -> Vec<usize> {
    headers
        .iter()
        .enumerate()
        .map(|(i, h)| {
            rows.iter()
                .filter_map(|r| r.get(i))
                .map(|c| console::measure_text_width(c))
                .chain(std::iter::once(h.len()))
                .max()
                .unwrap_or(0)
        })
        .collect()
}

/// Status badge for entity states.
pub fn status_badge(status: &str) -> String {
    match status.to_lowercase().as_str() {
        "active" | "delivered" | "ok" => style(status).green().to_string(),
        "pending" | "processing" | "lead" | "loading" | "retrying" => {
            style(status).yellow().to_string()
        }
        "shipped" => style(status).cyan().to_string(),
        "cancelled" | "error" => style(status).red().to_string(),
        "inactive" | "draft" | "archived" => style(status).dim().to_string(),
        _ => status.to_string(),
    }
}

/// Format a unix timestamp as a calendar date.
pub fn format_date(timestamp: i64) -> String {
    chrono::DateTime::from_timestamp(timestamp, 0)
        .map(|dt| dt.format("%Y-%m-%d").to_string())
        .unwrap_or_else(|| "-".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_date() {
        assert_eq!(format_date(1_704_067_200), "2024-01-01");
    }

    #[test]
    fn test_column_widths_cover_header_and_cells() {
        let rows = vec![
            vec!["cli-1".to_string(), "Amina Okafor".to_string()],
            vec!["cli-22".to_string(), "Bo".to_string()],
        ];
        assert_eq!(column_widths(&["ID", "NAME"], &rows), vec![6, 12]);
    }

    #[test]
    fn test_pad_ignores_styling() {
        let styled = console::style("ok").green().force_styling(true).to_string();
        assert_eq!(console::measure_text_width(&pad(&styled, 5)), 5);
    }
}
