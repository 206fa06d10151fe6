//! Run report handed from the release step to the page step as JSON.

use crate::error::{Result, SinkError};
use crate::release::RunReport;
use std::path::Path;

/// Write the report, replacing any previous file
pub fn write_report(path: &Path, report: &RunReport) -> Result<()> {
    let json = serde_json::to_string_pretty(report)?;
    std::fs::write(path, json).map_err(|source| SinkError::Write {
        path: path.to_path_buf(),
        source,
    })?;
    log::debug!("run report written to {}", path.display());
    Ok(())
}

/// Load a report written by [`write_report`]
pub fn read_report(path: &Path) -> Result<RunReport> {
    let json = std::fs::read_to_string(path).map_err(|source| SinkError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(serde_json::from_str(&json)?)
}
