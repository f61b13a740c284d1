//! Progress display module
//!
//! Colored status lines for each stage of a run. Everything goes to stdout,
//! including the error block; `quiet` suppresses all but errors.

use colored::*;

use crate::error::FilterError;

/// Width of the rule printed around a run
pub const RULE_WIDTH: usize = 50;

/// Color theme for the tool
pub mod theme {
    use colored::Color;

    pub const PRIMARY: Color = Color::Green;
    pub const ACCENT: Color = Color::Cyan;
    pub const WARNING: Color = Color::Yellow;
    pub const ERROR: Color = Color::Red;
    pub const MUTED: Color = Color::BrightBlack;
}

/// Terminal reporter that honours quiet mode
#[derive(Debug, Clone, Copy, Default)]
pub struct Reporter {
    quiet: bool,
}

impl Reporter {
    pub fn new(quiet: bool) -> Self {
        Self { quiet }
    }

    /// Print the opening line and rule
    pub fn banner(&self) {
        if self.quiet {
            return;
        }
        println!("{}", "starting email filter...".color(theme::PRIMARY).bold());
        self.rule();
    }

    pub fn rule(&self) {
        if !self.quiet {
            println!("{}", "=".repeat(RULE_WIDTH).color(theme::PRIMARY));
        }
    }

    pub fn info(&self, text: &str) {
        if !self.quiet {
            println!("  {} {}", "ℹ".color(theme::ACCENT), text);
        }
    }

    pub fn success(&self, text: &str) {
        if !self.quiet {
            println!("  {} {}", "✔".color(theme::PRIMARY), text.color(theme::PRIMARY));
        }
    }

    pub fn warning(&self, text: &str) {
        if !self.quiet {
            println!("  {} {}", "⚠".color(theme::WARNING), text.color(theme::WARNING));
        }
    }

    /// Print `1. a@x.com`, `2. b@y.org`, ... under a heading
    pub fn numbered(&self, heading: &str, items: &[String]) {
        if self.quiet {
            return;
        }
        println!("  {}", heading);
        for (i, item) in items.iter().enumerate() {
            println!("     {} {}", format!("{}.", i + 1).color(theme::MUTED), item);
        }
    }

    /// Print a closing failure line; never suppressed
    pub fn failure(&self, text: &str) {
        println!("{}", text.color(theme::ERROR).bold());
    }

    /// Print the two-line diagnostic for a failure; never suppressed
    pub fn error(&self, err: &FilterError) {
        println!("  {} {}", "✖".color(theme::ERROR), err.user_message().color(theme::ERROR));
        println!("     {}", err.hint());
    }
}

/// Format a number with thousand separators
pub fn format_number(n: u64) -> String {
    let s = n.to_string();
    let mut result = String::new();
    let chars: Vec<char> = s.chars().collect();

    for (i, c) in chars.iter().enumerate() {
        if i > 0 && (chars.len() - i) % 3 == 0 {
            result.push(',');
        }
        result.push(*c);
    }

    result
}

/// `1 email` / `3 emails`
pub fn plural_emails(count: usize) -> String {
    if count == 1 {
        "1 email".to_string()
    } else {
        format!("{} emails", format_number(count as u64))
    }
}
