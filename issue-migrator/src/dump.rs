//! Dry-run dump of a migration plan.

use crate::migration::MigrationPlan;
use std::io::Write;
use thiserror::Error;

/// Errors that can occur while writing a dump.
#[derive(Debug, Error)]
pub enum DumpError {
    /// Failed to open or write the dump destination.
    #[error("Failed to write dump: {0}")]
    Io(#[from] std::io::Error),

    /// Failed to serialize the plan.
    #[error("Failed to serialize dump: {0}")]
    Json(#[from] serde_json::Error),
}

/// Writes `plan` as pretty-printed JSON followed by a newline.
///
/// # Errors
///
/// Returns [`DumpError`] if serialization or the write fails.
pub fn write_dump<W: Write>(plan: &MigrationPlan, mut writer: W) -> Result<(), DumpError> {
    serde_json::to_writer_pretty(&mut writer, plan)?;
    writeln!(writer)?;
    writer.flush()?;
    Ok(())
}
