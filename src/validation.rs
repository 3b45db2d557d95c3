use anyhow::{anyhow, Result};
use std::path::Path;

use crate::models::{MessageKind, MessageRecord};
use crate::utils::{extract_hour, parse_timestamp};

/// Validation utilities for run inputs and upstream record checks
#[derive(Debug, Copy, Clone)]
pub struct InputValidator;

impl InputValidator {
    /// Validate the dialogs directory path.
    ///
    /// A directory that does not exist is allowed; it simply yields no records.
    pub fn validate_dialog_dir(path: &Path) -> Result<()> {
        if path.to_string_lossy().trim().is_empty() {
            return Err(anyhow!("Dialogs directory cannot be empty"));
        }

        if path.exists() && !path.is_dir() {
            return Err(anyhow!("Dialogs path is not a directory: {path:?}"));
        }

        if path.to_string_lossy().len() > 4096 {
            return Err(anyhow!("Dialogs path too long (max 4096 characters)"));
        }

        Ok(())
    }

    /// Validate the maximum number of dialogs to read
    pub fn validate_dialog_amount(amount: usize) -> Result<()> {
        if amount == 0 {
            return Err(anyhow!("Dialog amount must be greater than 0"));
        }

        Ok(())
    }

    /// Check that a record would pass through the chain without a fatal error.
    ///
    /// Every record needs an hour token; text records also need a timestamp
    /// that parses in full.
    pub fn validate_record(record: &MessageRecord) -> Result<()> {
        let hour =
            extract_hour(&record.date).map_err(|e| anyhow!("Record from {}: {e}", record.sender))?;
        if hour > 23 {
            tracing::warn!(date = %record.date, hour, "Hour outside 0-23");
        }

        if let MessageKind::Text { .. } = record.kind {
            parse_timestamp(&record.date)
                .map_err(|e| anyhow!("Text record from {}: {e}", record.sender))?;
        }

        Ok(())
    }
}
