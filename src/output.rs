//! Output formatting and styling module.
//!
//! Provides a centralized interface for all CLI output, including colored output,
//! progress tracking, and formatted tables. The bundle itself never goes through
//! here; this is only what the user sees on the terminal.

use colored::*;
use indicatif::{ProgressBar, ProgressStyle};
use std::path::Path;

/// Manages all CLI output with consistent styling and formatting.
///
/// This struct provides methods for:
/// - Success messages (green with ✓)
/// - Warning messages (yellow with ⚠)
/// - Section headers and plain lines
/// - Progress bars for emission
/// - The language table and dry-run file listing
pub struct OutputFormatter;

impl OutputFormatter {
    /// Prints a success message in green with a checkmark.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use srcbundle::output::OutputFormatter;
    /// OutputFormatter::success("Bundle written to out.txt");
    /// ```
    pub fn success(message: &str) {
        println!("{} {}", "✓".green(), message);
    }

    /// Prints a warning message in yellow with a warning symbol.
    pub fn warning(message: &str) {
        println!("{} {}", "⚠".yellow(), message);
    }

    /// Prints a regular message without styling.
    pub fn plain(message: &str) {
        println!("{}", message);
    }

    /// Prints a section header.
    pub fn header(header: &str) {
        println!("\n{}", header.bold());
    }

    /// Creates a progress bar that ticks once per bundled file.
    ///
    /// The bar draws on stderr and stays hidden when stderr is not a terminal.
    pub fn create_progress_bar(total: u64) -> ProgressBar {
        let pb = ProgressBar::new(total);
        let style = ProgressStyle::default_bar()
            .template("{spinner:.cyan} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
            .map(|style| style.progress_chars("█▓░"))
            .unwrap_or_else(|_| ProgressStyle::default_bar());
        pb.set_style(style);
        pb
    }

    /// Prints the files a bundle run would include, in bundle order.
    pub fn file_list(files: &[&Path]) {
        if files.is_empty() {
            Self::warning("No files matched.");
            return;
        }

        Self::header(&format!("[DRY RUN] {} file(s) would be bundled:", files.len()));
        for file in files {
            println!("  {}", file.display());
        }
    }

    /// Prints language identifiers alongside their extensions.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use srcbundle::output::OutputFormatter;
    ///
    /// OutputFormatter::language_table(&[("python", &[".py"]), ("cpp", &[".cpp", ".h"])]);
    /// ```
    pub fn language_table(rows: &[(&str, &[&str])]) {
        let width = rows
            .iter()
            .map(|(name, _)| name.len())
            .max()
            .unwrap_or(0)
            .max(8);

        println!(
            "{:<width$} | {}",
            "Language".bold(),
            "Extensions".bold(),
            width = width
        );
        println!("{}", "-".repeat(width + 20));
        for (name, extensions) in rows {
            println!(
                "{:<width$} | {}",
                name,
                extensions.join(" ").cyan(),
                width = width
            );
        }
        println!("{}", "-".repeat(width + 20));
        println!(
            "{:<width$} | {}",
            "all".bold(),
            "every file".dimmed(),
            width = width
        );
    }
}
