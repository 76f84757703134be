//! Data model for TRACK-IT measurement exports.
//!
//! - **Records**: typed analysis values, parameters and measurement values
//! - **Document**: the in-memory export tree handed to the XML writer
//! - **Build log**: the ordered audit trace of one export run

pub mod document;
pub mod error;
pub mod log;
pub mod record;
pub mod request;
pub mod value;

pub use document::{
    AdminData, AnalyzeValue, DataTypeEntry, ExportDocument, Header, MeasValues, Measurement,
    MeasuringDevice, MeasuringSoftware, Parameter, RadiationUnit, SINGLE_ENTRY_ID,
};
pub use error::{ExportError, Result};
pub use log::BuildLog;
pub use record::{
    DataTypeRecord, ExportInfo, ExportRecords, MeasurementValueRecord, ParameterRecord,
};
pub use request::{BASE_NAME_TIMESTAMP_FORMAT, ExportRequest, export_base_name};
pub use value::{RecordValue, ValueKind, ValueType};
