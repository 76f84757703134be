use thiserror::Error;

/// Run-level failures of a TRACK-IT export.
///
/// Blank records are not errors; they are skipped and recorded in the build log.
#[derive(Debug, Error)]
pub enum ExportError {
    /// The radiation unit (machine id) is blank.
    #[error("RadiationUnit is blank: no LINAC, HDR or kV unit defined")]
    MissingMachineId,

    /// No analysis value declares a measuring device.
    #[error("no measuring device defined for any analysis value")]
    NoMeasuringDevice,

    /// A measurement value declares a type that cannot be binary-encoded.
    #[error("unsupported value type '{value_type}' for {id}")]
    UnsupportedValueType { id: String, value_type: String },

    /// A value cannot be converted to its declared type.
    #[error("value '{value}' of {id} is not a valid {value_type}")]
    InvalidValue {
        id: String,
        value: String,
        value_type: String,
    },
}

impl ExportError {
    /// Create an UnsupportedValueType error.
    pub fn unsupported_value_type(id: impl Into<String>, value_type: impl Into<String>) -> Self {
        Self::UnsupportedValueType {
            id: id.into(),
            value_type: value_type.into(),
        }
    }

    /// Create an InvalidValue error.
    pub fn invalid_value(
        id: impl Into<String>,
        value: impl Into<String>,
        value_type: impl Into<String>,
    ) -> Self {
        Self::InvalidValue {
            id: id.into(),
            value: value.into(),
            value_type: value_type.into(),
        }
    }

    /// Returns true for readiness failures detected before any document is built.
    pub fn is_precondition(&self) -> bool {
        matches!(self, Self::MissingMachineId | Self::NoMeasuringDevice)
    }
}

pub type Result<T> = std::result::Result<T, ExportError>;
