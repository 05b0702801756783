use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};

pub fn spinner(message: &str) -> ProgressBar {
    let bar = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::with_template("{spinner:.cyan} {msg}") {
        bar.set_style(style);
    }
    bar.set_message(message.to_string());
    bar.enable_steady_tick(Duration::from_millis(100));
    bar
}

/// Put the text on the system clipboard. Failure is reported, not fatal.
pub fn copy_to_clipboard(text: &str) -> bool {
    let result = arboard::Clipboard::new().and_then(|mut clipboard| clipboard.set_text(text));
    match result {
        Ok(()) => {
            println!("{}", "Copied to clipboard.".green());
            true
        }
        Err(e) => {
            tracing::warn!("Failed to copy to clipboard: {}", e);
            false
        }
    }
}

pub fn write_text(path: &Path, text: &str) -> Result<()> {
    std::fs::write(path, text).with_context(|| format!("Failed to write {}", path.display()))?;
    println!("{} {}", "Saved".green(), path.display());
    Ok(())
}

pub fn print_error(message: &str) {
    eprintln!("{} {}", "error:".red().bold(), message);
}
