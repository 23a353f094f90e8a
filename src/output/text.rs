//! Human-readable output for duplicate scan results.
//!
//! ```text
//! - finished --------------
//! -> 1 duplications found.
//!
//! • group 0
//!   |- a.txt
//!   |- b.txt
//!
//! ```
//!
//! A scan without duplicates prints a distinct message instead of the group
//! list.

use std::io::{self, Write};

use yansi::{Paint, Style};

use crate::duplicates::{DuplicateGroup, ScanSummary};

/// Text renderer for a finished scan.
#[derive(Debug)]
pub struct TextOutput<'a> {
    groups: &'a [DuplicateGroup],
    summary: &'a ScanSummary,
    color: bool,
}

impl<'a> TextOutput<'a> {
    /// Create a renderer; `color` enables ANSI styling.
    #[must_use]
    pub fn new(groups: &'a [DuplicateGroup], summary: &'a ScanSummary, color: bool) -> Self {
        Self {
            groups,
            summary,
            color,
        }
    }

    fn paint(&self, text: &str, style: Style) -> String {
        if self.color {
            text.paint(style).to_string()
        } else {
            text.to_string()
        }
    }

    /// Write the report.
    ///
    /// # Errors
    ///
    /// Returns an error if writing fails.
    pub fn write_to<W: Write>(&self, writer: &mut W) -> io::Result<()> {
        writeln!(writer, "{}", self.paint("- finished --------------", Style::new().bold()))?;

        if self.groups.is_empty() {
            writeln!(writer, "  no duplicate files found!")?;
        } else {
            writeln!(
                writer,
                "-> {} duplications found.",
                self.paint(&self.groups.len().to_string(), Style::new().yellow().bold())
            )?;
            writeln!(writer)?;

            for (index, group) in self.groups.iter().enumerate() {
                writeln!(
                    writer,
                    "{}",
                    self.paint(&format!("• group {index}"), Style::new().cyan())
                )?;
                for file in &group.files {
                    writeln!(writer, "  |- {file}")?;
                }
                writeln!(writer)?;
            }
        }

        writeln!(
            writer,
            "  {} files hashed ({}) by {} workers in {:.2?}",
            self.summary.files_hashed,
            self.summary.bytes_hashed_display(),
            self.summary.workers_used,
            self.summary.scan_duration
        )?;

        if self.summary.has_errors() {
            writeln!(
                writer,
                "  {}",
                self.paint(
                    &format!(
                        "{} file(s) could not be read and were skipped",
                        self.summary.scan_errors.len()
                    ),
                    Style::new().red()
                )
            )?;
        }

        Ok(())
    }

    /// Render the report into a string.
    #[must_use]
    pub fn render(&self) -> String {
        let mut buf = Vec::new();
        // Writing into a Vec cannot fail.
        let _ = self.write_to(&mut buf);
        String::from_utf8_lossy(&buf).into_owned()
    }
}
