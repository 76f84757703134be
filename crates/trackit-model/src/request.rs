//! Inputs for one export run.

use chrono::{Local, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::record::{ExportInfo, ExportRecords};

/// Timestamp layout used in generated file names.
pub const BASE_NAME_TIMESTAMP_FORMAT: &str = "%Y_%m_%d_%H_%M_%S";

/// Everything the document builder consumes for a single export.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportRequest {
    pub records: ExportRecords,
    pub info: ExportInfo,
    /// TRACK-IT RadiationUnit name (LINAC, HDR or kV unit).
    pub machine_id: String,
    pub comment: String,
    /// Acquisition time, taken as UTC. Falls back to the build time when absent.
    pub measurement_date: Option<NaiveDateTime>,
    /// Base name of the output artifacts and prefix of every measurement guid.
    pub base_name: String,
}

impl ExportRequest {
    /// Create a request named after its author, source and the current local time.
    pub fn new(records: ExportRecords, info: ExportInfo, machine_id: impl Into<String>) -> Self {
        let base_name = export_base_name(&info, Local::now().naive_local());
        Self {
            records,
            info,
            machine_id: machine_id.into(),
            comment: String::new(),
            measurement_date: None,
            base_name,
        }
    }

    #[must_use]
    pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = comment.into();
        self
    }

    #[must_use]
    pub fn with_measurement_date(mut self, date: Option<NaiveDateTime>) -> Self {
        self.measurement_date = date;
        self
    }

    #[must_use]
    pub fn with_base_name(mut self, base_name: impl Into<String>) -> Self {
        self.base_name = base_name.into();
        self
    }
}

/// Build the artifact base name: `<author>_<source>_<timestamp>` with spaces
/// replaced by underscores.
pub fn export_base_name(info: &ExportInfo, timestamp: NaiveDateTime) -> String {
    [
        info.author.replace(' ', "_"),
        info.source.replace(' ', "_"),
        timestamp.format(BASE_NAME_TIMESTAMP_FORMAT).to_string(),
    ]
    .join("_")
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;

    #[test]
    fn base_name_replaces_spaces() {
        let info = ExportInfo::new("A Tester", "Daily QA Template");
        let timestamp = NaiveDate::from_ymd_opt(2024, 3, 5)
            .and_then(|d| d.and_hms_opt(7, 8, 9))
            .unwrap();
        assert_eq!(
            export_base_name(&info, timestamp),
            "A_Tester_Daily_QA_Template_2024_03_05_07_08_09"
        );
    }

    #[test]
    fn request_builders() {
        let request = ExportRequest::new(
            ExportRecords::default(),
            ExportInfo::new("MPC", "MPCService v1.0"),
            "LINAC1",
        )
        .with_comment("weekly")
        .with_base_name("custom");
        assert_eq!(request.machine_id, "LINAC1");
        assert_eq!(request.comment, "weekly");
        assert_eq!(request.base_name, "custom");
        assert!(request.measurement_date.is_none());
    }
}
