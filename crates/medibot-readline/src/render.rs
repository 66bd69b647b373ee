//! Terminal rendering of conversation text.

use colored::Colorize;
use regex::Regex;
use std::sync::LazyLock;

static BOLD_SPAN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\*\*(.+?)\*\*").unwrap());

/// Renders `**bold**` spans bold and leaves everything else untouched.
pub fn render_emphasis(text: &str) -> String {
    BOLD_SPAN
        .replace_all(text, |caps: &regex::Captures<'_>| caps[1].bold().to_string())
        .into_owned()
}

/// A text progress bar, e.g. `[###-------] 33%`.
pub fn progress_bar(percent: u8) -> String {
    const WIDTH: usize = 10;
    let filled = (usize::from(percent.min(100)) * WIDTH + 50) / 100;
    format!(
        "[{}{}] {percent}%",
        "#".repeat(filled),
        "-".repeat(WIDTH - filled)
    )
}
