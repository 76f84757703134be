//! In-memory TRACK-IT export document.
//!
//! The tree mirrors the XML sections one to one; serialization lives in
//! `trackit-output`.

use serde::{Deserialize, Serialize};

/// Id of the single RadiationUnit and MeasuringSoftware of an export.
pub const SINGLE_ENTRY_ID: &str = "1";

/// Root of a built export.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportDocument {
    pub header: Header,
    pub data_types: Vec<DataTypeEntry>,
    pub radiation_unit: RadiationUnit,
    pub measuring_devices: Vec<MeasuringDevice>,
    pub measuring_software: MeasuringSoftware,
    pub measurements: Vec<Measurement>,
}

impl ExportDocument {
    /// Find the measurement recorded with the given measuring device.
    pub fn measurement_for(&self, device: &str) -> Option<&Measurement> {
        self.measurements
            .iter()
            .find(|measurement| measurement.measuring_device_ref == device)
    }

    /// Find a declared data type by id.
    pub fn data_type(&self, id: &str) -> Option<&DataTypeEntry> {
        self.data_types.iter().find(|entry| entry.id == id)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Header {
    pub version: String,
    pub author: String,
}

/// A declared analysis channel (`<DataType id=..>`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DataTypeEntry {
    pub id: String,
    pub value_type: String,
    pub definition: String,
    pub unit: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RadiationUnit {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MeasuringDevice {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MeasuringSoftware {
    pub id: String,
    pub name: String,
}

/// One measurement per measuring device.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Measurement {
    pub guid: String,
    pub radiation_unit_ref: String,
    pub measuring_software_ref: String,
    pub measuring_device_ref: String,
    pub admin: AdminData,
    pub analyze_values: Vec<AnalyzeValue>,
    pub meas_values: Vec<MeasValues>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdminData {
    /// RFC 3339 timestamp, whole seconds, explicit `+00:00` offset.
    pub date: String,
    pub comment: Option<String>,
    /// `None` when the export has no parameter records at all.
    pub parameters: Option<Vec<Parameter>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Parameter {
    pub name: String,
    pub value_type: String,
    pub unit: Option<String>,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalyzeValue {
    pub data_type_ref: String,
    pub value: String,
    pub comment: Option<String>,
}

/// A binary-encoded measurement value (`<MeasValues>` with its `<Values>` child).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MeasValues {
    pub name: String,
    pub value_type: String,
    pub unit: Option<String>,
    /// Base64 text of the packed value.
    pub encoded: String,
}
