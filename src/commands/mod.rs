pub mod check;
pub mod init;
pub mod manifest;
pub mod project;
pub mod scene;

use std::io::{self, BufRead, Write};

use anyhow::Result;
use unicode_width::UnicodeWidthStr;

use pmt_scaffold::PmtError;

/// Drops input errors the user gets no notice for.
pub fn silence_input(result: Result<()>) -> Result<()> {
    match result {
        Err(e) if e.downcast_ref::<PmtError>().is_some_and(PmtError::is_silent) => {
            tracing::debug!("aborted: {}", e);
            Ok(())
        }
        other => other,
    }
}

/// `[y/N]` prompt; anything but y/yes declines.
pub fn confirm(prompt: &str, assume_yes: bool) -> bool {
    if assume_yes {
        return true;
    }
    print!("{} [y/N] ", prompt);
    if io::stdout().flush().is_err() {
        return false;
    }
    let mut answer = String::new();
    if io::stdin().lock().read_line(&mut answer).is_err() {
        return false;
    }
    matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes")
}

/// Left-aligns `s` to `width` terminal columns.
pub fn pad(s: &str, width: usize) -> String {
    let used = UnicodeWidthStr::width(s);
    format!("{}{}", s, " ".repeat(width.saturating_sub(used)))
}

pub fn column_width<'a>(items: impl IntoIterator<Item = &'a str>) -> usize {
    items.into_iter().map(UnicodeWidthStr::width).max().unwrap_or(0)
}
