use std::path::PathBuf;

use serde::Serialize;

use trackit_core::BuildOutcome;
use trackit_output::ExportPaths;

/// Result of one export or check run, printed as a table or JSON.
#[derive(Debug, Clone, Serialize)]
pub struct ExportReport {
    pub folder: PathBuf,
    pub base_name: String,
    pub machine_id: String,
    pub author: String,
    pub source: String,
    pub data_types: usize,
    /// `None` when no parameters were provided at all.
    pub parameters: Option<usize>,
    pub devices: Vec<DeviceSummary>,
    pub skipped: usize,
    pub log_entries: usize,
    pub xml: Option<PathBuf>,
    pub log: Option<PathBuf>,
}

/// Per-measurement counts.
#[derive(Debug, Clone, Serialize)]
pub struct DeviceSummary {
    pub device: String,
    pub analyze_values: usize,
    pub meas_values: usize,
}

impl ExportReport {
    pub fn from_outcome(
        folder: PathBuf,
        base_name: String,
        author: String,
        outcome: &BuildOutcome,
        paths: Option<ExportPaths>,
    ) -> Self {
        let document = &outcome.document;
        let devices = document
            .measurements
            .iter()
            .map(|measurement| DeviceSummary {
                device: measurement.measuring_device_ref.clone(),
                analyze_values: measurement.analyze_values.len(),
                meas_values: measurement.meas_values.len(),
            })
            .collect();
        Self {
            folder,
            base_name,
            machine_id: document.radiation_unit.name.clone(),
            author,
            source: document.measuring_software.name.clone(),
            data_types: document.data_types.len(),
            parameters: document
                .measurements
                .first()
                .and_then(|measurement| measurement.admin.parameters.as_ref())
                .map(Vec::len),
            devices,
            skipped: outcome
                .log
                .iter()
                .filter(|entry| entry.starts_with("Skipping"))
                .count(),
            log_entries: outcome.log.len(),
            xml: paths.as_ref().map(|paths| paths.xml.clone()),
            log: paths.map(|paths| paths.log),
        }
    }
}
