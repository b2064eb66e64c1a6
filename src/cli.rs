//! Command-line interface module for srcbundle.
//!
//! This module handles all CLI-related functionality including:
//! - Argument definitions
//! - Resolving the run configuration
//! - Orchestrating collect, order and emit
//! - The language listing

use crate::collector::Collector;
use crate::config::{BundleConfig, BundleOptions, DefaultsFile, LOCAL_CONFIG_FILE};
use crate::emitter::{Clock, EmitReport, Emitter, SystemClock};
use crate::error::BundleResult;
use crate::language::Language;
use crate::orderer::order;
use crate::output::OutputFormatter;
use clap::{ArgAction, Args, Parser, Subcommand};
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::info;

/// Concatenate a directory's source files into a single text bundle.
#[derive(Debug, Parser)]
#[command(name = "srcbundle", version, about)]
pub struct Cli {
    /// Increase log verbosity (-v for info, -vv for debug).
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

/// Represents a CLI command to execute.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Bundle the files under the current directory into one output file.
    Bundle(BundleArgs),
    /// List the supported language identifiers and their extensions.
    Languages {
        /// Print the list as JSON.
        #[arg(long)]
        json: bool,
    },
}

/// Options of the `bundle` subcommand.
#[derive(Debug, Clone, Default, Args)]
pub struct BundleArgs {
    /// Language to include (`all` for every file).
    #[arg(short, long)]
    pub language: Option<String>,

    /// Path of the bundle to write.
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Precede each file with a `// File: <path>` line.
    #[arg(long, overrides_with = "no_note")]
    pub note: bool,

    /// Omit file markers even if the defaults file enables them.
    #[arg(long, overrides_with = "note")]
    pub no_note: bool,

    /// File order: `name` or `type`.
    #[arg(long, value_name = "MODE")]
    pub sort: Option<String>,

    /// Drop blank and whitespace-only lines.
    #[arg(long, overrides_with = "keep_empty_lines")]
    pub remove_empty_lines: bool,

    /// Keep blank lines even if the defaults file removes them.
    #[arg(long, overrides_with = "remove_empty_lines")]
    pub keep_empty_lines: bool,

    /// Author named in the bundle header. No header is written without one.
    #[arg(long)]
    pub author: Option<String>,

    /// Defaults file to use instead of the usual lookup.
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// List the files that would be bundled without writing anything.
    #[arg(long)]
    pub dry_run: bool,

    /// Directory holding `.config/srcbundle/config.toml`; `$HOME` when unset.
    #[arg(skip)]
    pub home: Option<PathBuf>,
}

/// Collapses an `--x`/`--no-x` pair; `None` when neither was given.
fn flag_pair(on: bool, off: bool) -> Option<bool> {
    match (on, off) {
        (true, _) => Some(true),
        (false, true) => Some(false),
        (false, false) => None,
    }
}

impl BundleArgs {
    /// Converts into options, anchoring a relative output path at `root`.
    fn into_options(self, root: &Path) -> BundleOptions {
        BundleOptions {
            language: self.language,
            output: self.output.map(|path| root.join(path)),
            note: flag_pair(self.note, self.no_note),
            sort: self.sort,
            remove_empty_lines: flag_pair(self.remove_empty_lines, self.keep_empty_lines),
            author: self.author,
        }
    }
}

/// What a bundle run produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BundleOutcome {
    /// The bundle was written.
    Written(EmitReport),
    /// Dry run: the relative paths that would have been bundled, in order.
    DryRun(Vec<PathBuf>),
}

/// Runs a parsed command against `root`.
///
/// # Examples
///
/// ```no_run
/// use srcbundle::cli::{BundleArgs, Command, run_cli};
/// use std::path::{Path, PathBuf};
///
/// let command = Command::Bundle(BundleArgs {
///     language: Some("python".to_string()),
///     output: Some(PathBuf::from("bundle.txt")),
///     ..Default::default()
/// });
/// if let Err(e) = run_cli(command, Path::new(".")) {
///     eprintln!("Error: {}", e);
/// }
/// ```
pub fn run_cli(command: Command, root: &Path) -> BundleResult<()> {
    match command {
        Command::Bundle(args) => run_bundle(root, args, SystemClock).map(|_| ()),
        Command::Languages { json } => list_languages(json),
    }
}

/// Bundles the files under `root`.
///
/// This function:
/// 1. Loads the defaults file (if any) and validates the options
/// 2. Collects matching files, skipping build-output directories
/// 3. Orders them by name or by type
/// 4. Writes the bundle, or lists the files on a dry run
///
/// Options are validated before the output is opened, so an unknown language
/// never creates the output file.
pub fn run_bundle<C: Clock>(
    root: &Path,
    args: BundleArgs,
    clock: C,
) -> BundleResult<BundleOutcome> {
    let defaults =
        DefaultsFile::load(root, args.config.as_deref(), args.home.as_deref())?.defaults;
    let dry_run = args.dry_run;
    let explicit_config = args.config.clone();
    let config = BundleConfig::resolve(args.into_options(root), &defaults)?;
    info!(?config, "resolved bundle configuration");

    let mut collector = Collector::new(root, config.language)
        .skipping(&config.output)
        .skipping(&root.join(LOCAL_CONFIG_FILE));
    if let Some(path) = &explicit_config {
        collector = collector.skipping(path);
    }
    let mut entries = collector.collect()?;
    order(&mut entries, config.sort);

    if dry_run {
        let files: Vec<&Path> = entries.iter().map(|e| e.relative.as_path()).collect();
        OutputFormatter::file_list(&files);
        return Ok(BundleOutcome::DryRun(
            entries.into_iter().map(|e| e.relative).collect(),
        ));
    }

    let progress = OutputFormatter::create_progress_bar(entries.len() as u64);
    let report = Emitter::new(&config, clock)
        .with_progress(progress)
        .write_file(&entries)?;

    if report.files == 0 {
        OutputFormatter::warning("No files matched; the bundle has no file sections.");
    }
    OutputFormatter::success(&format!(
        "Bundle written to {} ({} files, {} lines)",
        config.output.display(),
        report.files,
        report.lines_written
    ));
    Ok(BundleOutcome::Written(report))
}

#[derive(Debug, Serialize)]
struct LanguageListing {
    language: &'static str,
    extensions: &'static [&'static str],
}

/// Prints the supported languages, as a table or as JSON.
pub fn list_languages(json: bool) -> BundleResult<()> {
    if json {
        let listing: Vec<LanguageListing> = Language::ALL
            .iter()
            .map(|language| LanguageListing {
                language: language.identifier(),
                extensions: language.extensions(),
            })
            .collect();
        OutputFormatter::plain(&serde_json::to_string_pretty(&listing)?);
        return Ok(());
    }

    let rows: Vec<(&str, &[&str])> = Language::ALL
        .iter()
        .map(|language| (language.identifier(), language.extensions()))
        .collect();
    OutputFormatter::language_table(&rows);
    Ok(())
}
