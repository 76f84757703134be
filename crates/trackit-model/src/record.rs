//! Typed input records for one export run.

use serde::{Deserialize, Serialize};

use crate::error::{ExportError, Result};
use crate::value::{RecordValue, ValueType};

/// One analysis channel: a DataType definition and its measured value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataTypeRecord {
    pub id: String,
    pub value_type: ValueType,
    pub definition: String,
    pub unit: Option<String>,
    pub measuring_device: Option<String>,
    pub value: RecordValue,
    /// Legacy templates have no comment column; normalization fills in `Some("")`.
    pub comment: Option<String>,
}

impl DataTypeRecord {
    pub fn new(
        id: impl Into<String>,
        value_type: impl Into<ValueType>,
        value: impl Into<RecordValue>,
    ) -> Self {
        Self {
            id: id.into(),
            value_type: value_type.into(),
            definition: String::new(),
            unit: None,
            measuring_device: None,
            value: value.into(),
            comment: None,
        }
    }

    #[must_use]
    pub fn with_definition(mut self, definition: impl Into<String>) -> Self {
        self.definition = definition.into();
        self
    }

    #[must_use]
    pub fn with_unit(mut self, unit: impl Into<String>) -> Self {
        self.unit = Some(unit.into());
        self
    }

    #[must_use]
    pub fn with_measuring_device(mut self, device: impl Into<String>) -> Self {
        self.measuring_device = Some(device.into());
        self
    }

    #[must_use]
    pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = Some(comment.into());
        self
    }

    /// The measuring device, if declared and non-empty.
    pub fn device(&self) -> Option<&str> {
        self.measuring_device
            .as_deref()
            .filter(|device| !device.is_empty())
    }
}

/// A per-measurement parameter (energy, modality, ...).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParameterRecord {
    pub id: String,
    pub value_type: ValueType,
    pub unit: Option<String>,
    pub value: RecordValue,
}

impl ParameterRecord {
    pub fn new(
        id: impl Into<String>,
        value_type: impl Into<ValueType>,
        value: impl Into<RecordValue>,
    ) -> Self {
        Self {
            id: id.into(),
            value_type: value_type.into(),
            unit: None,
            value: value.into(),
        }
    }

    #[must_use]
    pub fn with_unit(mut self, unit: impl Into<String>) -> Self {
        self.unit = Some(unit.into());
        self
    }
}

/// A device-specific raw measurement (temperature, pressure, chamber id, ...).
///
/// The declared type must be binary-encodable, so it is checked here rather
/// than when the document is built.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MeasurementValueRecord {
    pub id: String,
    pub value_type: ValueType,
    pub unit: Option<String>,
    pub value: RecordValue,
}

impl MeasurementValueRecord {
    /// Create a measurement record.
    ///
    /// # Errors
    ///
    /// Returns [`ExportError::UnsupportedValueType`] when the declared type is
    /// not one of String, Double, Long or Boolean.
    pub fn new(
        id: impl Into<String>,
        value_type: impl Into<ValueType>,
        value: impl Into<RecordValue>,
    ) -> Result<Self> {
        let id = id.into();
        let value_type = value_type.into();
        if !value_type.is_encodable() {
            return Err(ExportError::unsupported_value_type(id, value_type.as_str()));
        }
        Ok(Self {
            id,
            value_type,
            unit: None,
            value: value.into(),
        })
    }

    #[must_use]
    pub fn with_unit(mut self, unit: impl Into<String>) -> Self {
        self.unit = Some(unit.into());
        self
    }
}

/// Provenance of an export: who produced it and from which template/software.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportInfo {
    pub author: String,
    pub source: String,
}

impl ExportInfo {
    pub fn new(author: impl Into<String>, source: impl Into<String>) -> Self {
        Self {
            author: author.into(),
            source: source.into(),
        }
    }
}

/// The three record lists of one export run, in source order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExportRecords {
    pub data_types: Vec<DataTypeRecord>,
    pub parameters: Vec<ParameterRecord>,
    pub measurements: Vec<MeasurementValueRecord>,
}

impl ExportRecords {
    pub fn new(data_types: Vec<DataTypeRecord>) -> Self {
        Self {
            data_types,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_parameters(mut self, parameters: Vec<ParameterRecord>) -> Self {
        self.parameters = parameters;
        self
    }

    #[must_use]
    pub fn with_measurements(mut self, measurements: Vec<MeasurementValueRecord>) -> Self {
        self.measurements = measurements;
        self
    }
}
