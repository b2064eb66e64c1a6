//! Bundle rendering.
//!
//! Layout of the produced file:
//!
//! ```text
//! // Author: <author>             only when an author is set
//! // Generated on: <timestamp>    only when an author is set
//!                                 only when an author is set
//! // File: <relative path>        only with --note, once per file
//! <file lines>
//!                                 always, once per file
//! ```

use crate::collector::FileEntry;
use crate::config::BundleConfig;
use crate::error::{BundleError, BundleResult};
use chrono::{DateTime, Local};
use indicatif::ProgressBar;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;
use tracing::{debug, info};

/// Format of the `Generated on` header line.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

const UTF8_BOM: char = '\u{feff}';

/// Source of the header timestamp.
pub trait Clock {
    fn now(&self) -> DateTime<Local>;
}

/// The local wall clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Local> {
        Local::now()
    }
}

/// A clock frozen at one instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Local>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Local> {
        self.0
    }
}

/// Counters describing a finished emission.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EmitReport {
    /// Number of file sections written.
    pub files: usize,
    /// Content lines copied into the bundle.
    pub lines_written: usize,
    /// Blank lines dropped by `remove_empty_lines`.
    pub lines_skipped: usize,
}

/// Writes ordered files into a bundle.
pub struct Emitter<'a, C: Clock> {
    config: &'a BundleConfig,
    clock: C,
    progress: Option<ProgressBar>,
}

impl<'a, C: Clock> Emitter<'a, C> {
    pub fn new(config: &'a BundleConfig, clock: C) -> Self {
        Self {
            config,
            clock,
            progress: None,
        }
    }

    /// Ticks `progress` once per emitted file.
    pub fn with_progress(mut self, progress: ProgressBar) -> Self {
        self.progress = Some(progress);
        self
    }

    /// Creates (or truncates) the configured output file and writes the bundle into it.
    ///
    /// # Errors
    ///
    /// Any failure to open, read, decode or write aborts the run. The output file may
    /// be left partially written.
    pub fn write_file(&self, entries: &[FileEntry]) -> BundleResult<EmitReport> {
        let output = &self.config.output;
        let file = File::create(output).map_err(|source| BundleError::OutputWrite {
            path: output.clone(),
            source,
        })?;
        let mut writer = BufWriter::new(file);

        let report = self.write_to(&mut writer, entries)?;
        writer.flush().map_err(|source| BundleError::OutputWrite {
            path: output.clone(),
            source,
        })?;

        info!(
            output = %output.display(),
            files = report.files,
            lines = report.lines_written,
            "bundle written"
        );
        Ok(report)
    }

    /// Renders the bundle into `writer`.
    ///
    /// The progress bar, if any, is cleared whether or not rendering succeeds.
    pub fn write_to<W: Write>(
        &self,
        writer: &mut W,
        entries: &[FileEntry],
    ) -> BundleResult<EmitReport> {
        let result = self.write_sections(writer, entries);
        if let Some(progress) = &self.progress {
            progress.finish_and_clear();
        }
        result
    }

    fn write_sections<W: Write>(
        &self,
        writer: &mut W,
        entries: &[FileEntry],
    ) -> BundleResult<EmitReport> {
        let mut report = EmitReport::default();

        if !self.config.author.is_empty() {
            let timestamp = self.clock.now().format(TIMESTAMP_FORMAT);
            self.write_line(writer, &format!("// Author: {}", self.config.author))?;
            self.write_line(writer, &format!("// Generated on: {}", timestamp))?;
            self.write_line(writer, "")?;
        }

        for entry in entries {
            if self.config.note {
                self.write_line(writer, &format!("// File: {}", entry.relative.display()))?;
            }

            let content = read_text(&entry.path)?;
            let mut skipped = 0usize;
            for line in content.lines() {
                if self.config.remove_empty_lines && line.trim().is_empty() {
                    skipped += 1;
                    continue;
                }
                self.write_line(writer, line)?;
                report.lines_written += 1;
            }
            self.write_line(writer, "")?;

            debug!(path = %entry.relative.display(), skipped, "emitted file");
            report.files += 1;
            report.lines_skipped += skipped;
            if let Some(progress) = &self.progress {
                progress.inc(1);
            }
        }

        Ok(report)
    }

    fn write_line<W: Write>(&self, writer: &mut W, line: &str) -> BundleResult<()> {
        writeln!(writer, "{}", line).map_err(|source| BundleError::OutputWrite {
            path: self.config.output.clone(),
            source,
        })
    }
}

/// Reads a whole file as UTF-8 text, dropping a leading byte-order mark.
fn read_text(path: &Path) -> BundleResult<String> {
    let bytes = fs::read(path).map_err(|source| BundleError::FileRead {
        path: path.to_path_buf(),
        source,
    })?;
    let mut text = String::from_utf8(bytes).map_err(|_| BundleError::Decode {
        path: path.to_path_buf(),
    })?;
    if text.starts_with(UTF8_BOM) {
        text.replace_range(..UTF8_BOM.len_utf8(), "");
    }
    Ok(text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::language::LanguageFilter;
    use crate::orderer::SortMode;
    use chrono::TimeZone;
    use std::path::PathBuf;
    use tempfile::TempDir;

    fn config(note: bool, remove_empty_lines: bool, author: &str) -> BundleConfig {
        BundleConfig {
            language: LanguageFilter::All,
            output: PathBuf::from("bundle.txt"),
            note,
            sort: SortMode::Name,
            remove_empty_lines,
            author: author.to_string(),
        }
    }

    fn fixed_clock() -> FixedClock {
        FixedClock(Local.with_ymd_and_hms(2024, 3, 9, 14, 5, 0).single().unwrap())
    }

    fn file(temp: &TempDir, rel: &str, content: &[u8]) -> FileEntry {
        let path = temp.path().join(rel);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(&path, content).unwrap();
        FileEntry::new(temp.path(), path)
    }

    fn render(config: &BundleConfig, entries: &[FileEntry]) -> (String, EmitReport) {
        let mut buffer = Vec::new();
        let report = Emitter::new(config, fixed_clock())
            .write_to(&mut buffer, entries)
            .unwrap();
        (String::from_utf8(buffer).unwrap(), report)
    }

    #[test]
    fn test_plain_sections_are_separated_by_blank_lines() {
        let temp = TempDir::new().unwrap();
        let entries = vec![
            file(&temp, "a.py", b"import os\nprint(os.name)\n"),
            file(&temp, "c.py", b"x = 1"),
        ];

        let (text, report) = render(&config(false, false, ""), &entries);

        assert_eq!(text, "import os\nprint(os.name)\n\nx = 1\n\n");
        assert_eq!(report.files, 2);
        assert_eq!(report.lines_written, 3);
    }

    #[test]
    fn test_header_and_notes() {
        let temp = TempDir::new().unwrap();
        let entries = vec![file(&temp, "a.py", b"pass\n")];

        let (text, _) = render(&config(true, false, "Jane"), &entries);

        assert_eq!(
            text,
            "// Author: Jane\n// Generated on: 2024-03-09 14:05:00\n\n// File: a.py\npass\n\n"
        );
    }

    #[test]
    fn test_note_uses_relative_path() {
        let temp = TempDir::new().unwrap();
        let entries = vec![file(&temp, "sub/c.py", b"pass\n")];

        let (text, _) = render(&config(true, false, ""), &entries);

        let expected_path = Path::new("sub").join("c.py");
        assert_eq!(
            text,
            format!("// File: {}\npass\n\n", expected_path.display())
        );
    }

    #[test]
    fn test_empty_author_skips_header_entirely() {
        let (text, report) = render(&config(true, false, ""), &[]);
        assert_eq!(text, "");
        assert_eq!(report, EmitReport::default());
    }

    #[test]
    fn test_header_only_when_no_files() {
        let (text, _) = render(&config(false, false, "Jane"), &[]);
        assert_eq!(text, "// Author: Jane\n// Generated on: 2024-03-09 14:05:00\n\n");
    }

    #[test]
    fn test_remove_empty_lines_drops_whitespace_only_lines() {
        let temp = TempDir::new().unwrap();
        let entries = vec![file(&temp, "a.py", b"a\n\n   \n\tb  \n\t\nc\n")];

        let (text, report) = render(&config(false, true, ""), &entries);

        assert_eq!(text, "a\n\tb  \nc\n\n");
        assert_eq!(report.lines_written, 3);
        assert_eq!(report.lines_skipped, 3);
    }

    #[test]
    fn test_blank_lines_kept_by_default() {
        let temp = TempDir::new().unwrap();
        let entries = vec![file(&temp, "a.py", b"a\n\n  \nb\n")];

        let (text, _) = render(&config(false, false, ""), &entries);

        assert_eq!(text, "a\n\n  \nb\n\n");
    }

    #[test]
    fn test_empty_file_still_gets_separator() {
        let temp = TempDir::new().unwrap();
        let entries = vec![file(&temp, "empty.py", b""), file(&temp, "blank.py", b"\n\n")];

        let (text, _) = render(&config(true, true, ""), &entries);

        assert_eq!(text, "// File: empty.py\n\n// File: blank.py\n\n");
    }

    #[test]
    fn test_crlf_lines_are_normalized() {
        let temp = TempDir::new().unwrap();
        let entries = vec![file(&temp, "win.cs", b"class A\r\n{\r\n}\r\n")];

        let (text, _) = render(&config(false, false, ""), &entries);

        assert_eq!(text, "class A\n{\n}\n\n");
    }

    #[test]
    fn test_byte_order_mark_is_dropped() {
        let temp = TempDir::new().unwrap();
        let entries = vec![file(&temp, "bom.cs", "\u{feff}using System;\n".as_bytes())];

        let (text, _) = render(&config(false, false, ""), &entries);

        assert_eq!(text, "using System;\n\n");
    }

    #[test]
    fn test_invalid_utf8_aborts() {
        let temp = TempDir::new().unwrap();
        let entries = vec![file(&temp, "blob.py", &[0xff, 0xfe, 0x00, 0x80])];

        let mut buffer = Vec::new();
        let result = Emitter::new(&config(false, false, ""), fixed_clock())
            .write_to(&mut buffer, &entries);

        assert!(matches!(result, Err(BundleError::Decode { .. })));
    }

    #[test]
    fn test_progress_cleared_on_success() {
        let temp = TempDir::new().unwrap();
        let entries = vec![file(&temp, "a.py", b"pass\n")];
        let progress = ProgressBar::hidden();

        let mut buffer = Vec::new();
        Emitter::new(&config(false, false, ""), fixed_clock())
            .with_progress(progress.clone())
            .write_to(&mut buffer, &entries)
            .unwrap();

        assert!(progress.is_finished());
        assert_eq!(progress.position(), 1);
    }

    #[test]
    fn test_progress_cleared_when_a_file_fails() {
        let temp = TempDir::new().unwrap();
        let entries = vec![
            file(&temp, "a.py", b"pass\n"),
            file(&temp, "blob.py", &[0xff, 0xfe]),
        ];
        let progress = ProgressBar::hidden();

        let mut buffer = Vec::new();
        let result = Emitter::new(&config(false, false, ""), fixed_clock())
            .with_progress(progress.clone())
            .write_to(&mut buffer, &entries);

        assert!(matches!(result, Err(BundleError::Decode { .. })));
        assert!(progress.is_finished());
    }

    #[test]
    fn test_missing_file_aborts() {
        let temp = TempDir::new().unwrap();
        let entry = FileEntry::new(temp.path(), temp.path().join("gone.py"));

        let mut buffer = Vec::new();
        let result =
            Emitter::new(&config(false, false, ""), fixed_clock()).write_to(&mut buffer, &[entry]);

        assert!(matches!(result, Err(BundleError::FileRead { .. })));
    }

    #[test]
    fn test_write_file_truncates_existing_output() {
        let temp = TempDir::new().unwrap();
        let entries = vec![file(&temp, "a.py", b"new\n")];
        let output = temp.path().join("out.txt");
        fs::write(&output, "old content that is longer\n").unwrap();

        let mut cfg = config(false, false, "");
        cfg.output = output.clone();
        Emitter::new(&cfg, fixed_clock()).write_file(&entries).unwrap();

        assert_eq!(fs::read_to_string(&output).unwrap(), "new\n\n");
    }

    #[test]
    fn test_write_file_missing_parent_fails() {
        let temp = TempDir::new().unwrap();
        let mut cfg = config(false, false, "");
        cfg.output = temp.path().join("no-such-dir").join("out.txt");

        let result = Emitter::new(&cfg, fixed_clock()).write_file(&[]);

        assert!(matches!(result, Err(BundleError::OutputWrite { .. })));
    }
}
