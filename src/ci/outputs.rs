//! Step outputs for downstream CI steps.

use crate::error::SinkError;
use std::io::Write as _;
use std::path::PathBuf;

/// Appends `name=value` records to the CI outputs file
#[derive(Debug, Clone, Default)]
pub struct StepOutputs {
    path: Option<PathBuf>,
}

impl StepOutputs {
    /// Outputs appended to `path`; `None` only logs them
    pub fn new(path: Option<PathBuf>) -> Self {
        Self { path }
    }

    /// Set one output. Multi-line values use a random heredoc delimiter.
    pub fn set(&self, name: &str, value: &str) -> Result<(), SinkError> {
        if name.is_empty() || name.contains(['=', '\n', '\r']) || name.contains('<') {
            return Err(SinkError::InvalidName {
                name: name.to_string(),
            });
        }

        let Some(path) = &self.path else {
            log::info!("output {}={}", name, value);
            return Ok(());
        };

        let record = format_record(name, value);
        let mut file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .map_err(|source| SinkError::Write {
                path: path.clone(),
                source,
            })?;
        file.write_all(record.as_bytes())
            .map_err(|source| SinkError::Write {
                path: path.clone(),
                source,
            })
    }
}

fn format_record(name: &str, value: &str) -> String {
    if value.contains('\n') || value.contains('\r') {
        let delimiter = format!("ghadelimiter_{}", uuid::Uuid::new_v4());
        format!("{}<<{}\n{}\n{}\n", name, delimiter, value, delimiter)
    } else {
        format!("{}={}\n", name, value)
    }
}
