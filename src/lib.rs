//! srcbundle - Concatenate a source tree into a single text file
//!
//! This library walks a directory, selects files by language, orders them
//! deterministically and writes their contents into one bundle, optionally
//! annotating each section with its path and stripping blank lines.

pub mod cli;
pub mod collector;
pub mod config;
pub mod emitter;
pub mod error;
pub mod language;
pub mod orderer;
pub mod output;

pub use collector::{Collector, EXCLUDED_DIR_MARKERS, FileEntry};
pub use config::{BundleConfig, BundleOptions, ConfigError, DefaultsFile};
pub use emitter::{Clock, EmitReport, Emitter, FixedClock, SystemClock};
pub use error::{BundleError, BundleResult};
pub use language::{Language, LanguageFilter};
pub use orderer::{SortMode, order};

pub use cli::{BundleArgs, BundleOutcome, Command, run_bundle, run_cli};
