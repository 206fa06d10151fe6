//! Markdown job summary appended to the CI step summary file.

use crate::error::SinkError;
use crate::release::{OutcomeEntry, RunReport};
use std::fmt::Write as _;
use std::io::Write as _;
use std::path::PathBuf;

/// Buffered markdown summary, written once at the end of a step
#[derive(Debug, Clone, Default)]
pub struct StepSummary {
    path: Option<PathBuf>,
    buffer: String,
}

impl StepSummary {
    /// Summary that appends to `path`; `None` discards output
    pub fn new(path: Option<PathBuf>) -> Self {
        Self {
            path,
            buffer: String::new(),
        }
    }

    /// Append raw markdown followed by a newline
    pub fn add_raw(&mut self, text: &str) -> &mut Self {
        self.buffer.push_str(text);
        self.buffer.push('\n');
        self
    }

    /// Append a markdown heading
    pub fn add_heading(&mut self, level: usize, text: &str) -> &mut Self {
        let hashes = "#".repeat(level.clamp(1, 6));
        let _ = writeln!(self.buffer, "{} {}\n", hashes, text);
        self
    }

    /// Append a bulleted list
    pub fn add_list<I, S>(&mut self, items: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for item in items {
            let _ = writeln!(self.buffer, "- {}", item.as_ref());
        }
        self.buffer.push('\n');
        self
    }

    /// Append a table with one row per project outcome
    pub fn add_release_table(&mut self, report: &RunReport) -> &mut Self {
        self.buffer
            .push_str("| Project | Release | Result |\n| --- | --- | --- |\n");
        for entry in report.entries() {
            let result = match entry {
                OutcomeEntry::Released { release_url, .. } => format!("[created]({})", release_url),
                OutcomeEntry::Failed {
                    kind,
                    suggested_identifier: Some(suggestion),
                    ..
                } => format!("{} (try `{}`)", kind.label(), suggestion),
                OutcomeEntry::Failed { kind, .. } => kind.label().to_string(),
            };
            let _ = writeln!(
                self.buffer,
                "| {} | {} | {} |",
                entry.project_key(),
                entry.release_name(),
                result
            );
        }
        self.buffer.push('\n');
        self
    }

    #[cfg(test)]
    fn as_str(&self) -> &str {
        &self.buffer
    }

    /// Append the buffer to the summary file and clear it
    pub fn write(&mut self) -> Result<(), SinkError> {
        let Some(path) = &self.path else {
            log::debug!("No step summary file configured; skipping summary");
            self.buffer.clear();
            return Ok(());
        };

        let mut file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .map_err(|source| SinkError::Write {
                path: path.clone(),
                source,
            })?;
        file.write_all(self.buffer.as_bytes())
            .map_err(|source| SinkError::Write {
                path: path.clone(),
                source,
            })?;

        self.buffer.clear();
        Ok(())
    }
}
