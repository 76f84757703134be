//! Preconditions that must hold before a document is built.

use std::collections::BTreeSet;

use trackit_model::{DataTypeRecord, ExportError, Result};

/// Check that the export names a radiation unit and at least one measuring device.
///
/// # Errors
///
/// [`ExportError::MissingMachineId`] or [`ExportError::NoMeasuringDevice`].
pub fn check_readiness(machine_id: &str, data_types: &[DataTypeRecord]) -> Result<()> {
    if machine_id.trim().is_empty() {
        return Err(ExportError::MissingMachineId);
    }
    if !data_types.iter().any(|record| record.device().is_some()) {
        return Err(ExportError::NoMeasuringDevice);
    }
    Ok(())
}

/// Distinct, non-empty measuring devices across all data type records, sorted.
pub fn measuring_devices(data_types: &[DataTypeRecord]) -> BTreeSet<String> {
    data_types
        .iter()
        .filter_map(DataTypeRecord::device)
        .map(str::to_string)
        .collect()
}
