//! Output formatting for the CLI.

use console::style;
use serde::Serialize;
use shelfcart::prelude::*;

/// Output handler for CLI messages.
#[derive(Clone)]
pub struct Output {
    json: bool,
}

impl Output {
    /// Create a new output handler.
    pub fn new(json: bool) -> Self {
        Self { json }
    }

    /// Check if JSON output mode is enabled.
    pub fn is_json(&self) -> bool {
        self.json
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

    /// Print a header/title.
    pub fn header(&self, msg: &str) {
        if self.json {
            return;
        }
        println!("\n{}", style(msg).bold().underlined());
    }

    /// Print a key-value pair.
    pub fn kv(&self, key: &str, value: &str) {
        if self.json {
            return;
        }
        println!("  {}: {}", style(key).dim(), value);
    }

    /// Print JSON output.
    pub fn json<T: Serialize>(&self, value: &T) {
        match serde_json::to_string_pretty(value) {
            Ok(s) => println!("{}", s),
            Err(e) => self.error(&format!("Failed to serialize output: {}", e)),
        }
    }

    /// Print a notice with the style matching its level.
    pub fn notice(&self, notice: &Notice) {
        match notice.level {
            NoticeLevel::Info => self.info(&notice.message),
            NoticeLevel::Success => self.success(&notice.message),
            NoticeLevel::Warning => self.warn(&notice.message),
            NoticeLevel::Error => self.error(&notice.message),
        }
    }

    /// Print one cart line.
    pub fn entry(&self, position: usize, entry: &CartEntry) {
        if self.json {
            return;
        }
        let mut line = format!(
            "{} {} {}",
            style(format!("{}.", position)).dim(),
            style(entry.display_title()).bold(),
            style(format!("(#{})", entry.id)).dim()
        );
        if let Some(author) = entry.author() {
            line.push_str(&format!(" by {}", author));
        }
        println!("  {}", line);
    }
}

/// Get a styled status badge for a request status.
pub fn status_badge(status: RequestStatus) -> String {
    match status {
        RequestStatus::Waiting => style("● waiting").yellow().to_string(),
        RequestStatus::Approved => style("● approved").green().to_string(),
        RequestStatus::Rejected => style("● rejected").red().to_string(),
        RequestStatus::Returned => style("○ returned").dim().to_string(),
        RequestStatus::Cancelled => style("○ cancelled").dim().to_string(),
    }
}
