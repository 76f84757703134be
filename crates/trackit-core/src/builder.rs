//! Export document assembly.

use chrono::{NaiveDateTime, SecondsFormat, Utc};
use tracing::{debug, info, info_span};

use trackit_model::{
    AdminData, AnalyzeValue, BuildLog, DataTypeEntry, DataTypeRecord, ExportDocument, ExportError,
    ExportInfo, ExportRequest, Header, MeasValues, Measurement, MeasurementValueRecord,
    MeasuringDevice, MeasuringSoftware, Parameter, ParameterRecord, RadiationUnit, RecordValue,
    Result, SINGLE_ENTRY_ID, ValueType,
};

use crate::encode::{EncodeError, encode_value};
use crate::normalize::normalize_records;
use crate::readiness::{check_readiness, measuring_devices};

/// TRACK-IT import protocol version written into the header.
pub const PROTOCOL_VERSION: &str = "1.3";

/// Default header author label.
pub const DEFAULT_AUTHOR_LABEL: &str = "TRACK-IT QA Exporter";

/// Name of the synthetic MeasValues entry carrying the export author.
pub const MEASURED_BY: &str = "Measured by";

/// Header settings for built documents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildOptions {
    pub protocol_version: String,
    pub author_label: String,
}

impl Default for BuildOptions {
    fn default() -> Self {
        Self {
            protocol_version: PROTOCOL_VERSION.to_string(),
            author_label: DEFAULT_AUTHOR_LABEL.to_string(),
        }
    }
}

impl BuildOptions {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_author_label(mut self, label: impl Into<String>) -> Self {
        self.author_label = label.into();
        self
    }
}

/// A built document together with the trace of how it was built.
#[derive(Debug, Clone)]
pub struct BuildOutcome {
    pub document: ExportDocument,
    pub log: BuildLog,
}

/// Normalize the request's records and assemble the export document.
///
/// The measurement date falls back to the current UTC time when the request
/// carries none; everything else is a pure function of the request.
///
/// # Errors
///
/// Precondition failures (blank machine id, no measuring device) are raised
/// before any normalization. Encoding failures abort the run and name the
/// offending record.
pub fn build_export(request: ExportRequest, options: &BuildOptions) -> Result<BuildOutcome> {
    let ExportRequest {
        records,
        info,
        machine_id,
        comment,
        measurement_date,
        base_name,
    } = request;
    let span = info_span!("build", base_name = %base_name, machine_id = %machine_id);
    let _guard = span.enter();

    check_readiness(&machine_id, &records.data_types)?;

    let mut log = BuildLog::new();
    let records = normalize_records(records, &mut log);

    let data_types = data_type_entries(&records.data_types, &mut log);
    let devices = measuring_devices(&records.data_types);
    let date = format_measurement_date(measurement_date.unwrap_or_else(|| Utc::now().naive_utc()));
    let parameters = parameter_entries(&records.parameters, &mut log);
    let meas_values = meas_value_entries(&records.measurements, &info, &mut log)?;
    let comment = Some(comment).filter(|text| !text.is_empty());

    let mut measurements = Vec::with_capacity(devices.len());
    for device in &devices {
        log.push(format!("Looking at measurements with {device}"));
        measurements.push(Measurement {
            guid: format!("{base_name}_{device}"),
            radiation_unit_ref: SINGLE_ENTRY_ID.to_string(),
            measuring_software_ref: SINGLE_ENTRY_ID.to_string(),
            measuring_device_ref: device.clone(),
            admin: AdminData {
                date: date.clone(),
                comment: comment.clone(),
                parameters: parameters.clone(),
            },
            analyze_values: analyze_values(&records.data_types, device, &mut log)?,
            meas_values: meas_values.clone(),
        });
    }

    let document = ExportDocument {
        header: Header {
            version: options.protocol_version.clone(),
            author: options.author_label.clone(),
        },
        data_types,
        radiation_unit: RadiationUnit {
            id: SINGLE_ENTRY_ID.to_string(),
            name: machine_id,
        },
        measuring_devices: devices
            .into_iter()
            .map(|device| MeasuringDevice {
                id: device.clone(),
                name: device,
            })
            .collect(),
        measuring_software: MeasuringSoftware {
            id: SINGLE_ENTRY_ID.to_string(),
            name: info.source,
        },
        measurements,
    };
    info!(
        data_types = document.data_types.len(),
        measurements = document.measurements.len(),
        log_entries = log.len(),
        "export document built"
    );
    Ok(BuildOutcome { document, log })
}

/// RFC 3339 with whole seconds and an explicit `+00:00` offset.
pub fn format_measurement_date(date: NaiveDateTime) -> String {
    date.and_utc().to_rfc3339_opts(SecondsFormat::Secs, false)
}

fn data_type_entries(records: &[DataTypeRecord], log: &mut BuildLog) -> Vec<DataTypeEntry> {
    log.push("Processing DataTypes...");
    let mut entries = Vec::with_capacity(records.len());
    for record in records {
        if record.value.is_blank() {
            skip(log, "DataType", &record.id);
            continue;
        }
        log.push(format!(
            "Found DataType: {} with value {}",
            record.id, record.value
        ));
        entries.push(DataTypeEntry {
            id: record.id.clone(),
            value_type: record.value_type.as_str().to_string(),
            definition: record.definition.clone(),
            unit: non_empty(record.unit.as_deref()),
        });
    }
    entries
}

fn parameter_entries(records: &[ParameterRecord], log: &mut BuildLog) -> Option<Vec<Parameter>> {
    if records.is_empty() {
        log.push("No parameters provided - nothing to process.");
        return None;
    }
    log.push("Processing Parameters...");
    let mut parameters = Vec::with_capacity(records.len());
    for record in records {
        if record.value.is_blank() {
            skip(log, "Parameter", &record.id);
            continue;
        }
        log.push(format!(
            "Found Parameter: {} with value {}",
            record.id, record.value
        ));
        parameters.push(Parameter {
            name: record.id.clone(),
            value_type: record.value_type.as_str().to_string(),
            unit: non_empty(record.unit.as_deref()),
            value: record.value.literal(),
        });
    }
    Some(parameters)
}

/// Encoded measurement values plus the trailing "Measured by" entry.
fn meas_value_entries(
    records: &[MeasurementValueRecord],
    info: &ExportInfo,
    log: &mut BuildLog,
) -> Result<Vec<MeasValues>> {
    let mut entries = Vec::with_capacity(records.len() + 1);
    if records.is_empty() {
        log.push("No Measurements to process.");
    } else {
        log.push("Processing MeasData...");
    }
    for record in records {
        if record.value.is_blank() {
            skip(log, "Measurement", &record.id);
            continue;
        }
        log.push(format!(
            "Found MeasData: {} with value: {}",
            record.id, record.value
        ));
        entries.push(MeasValues {
            name: record.id.clone(),
            value_type: record.value_type.as_str().to_string(),
            unit: non_empty(record.unit.as_deref()),
            encoded: encode_for(&record.id, &record.value, &record.value_type)?,
        });
    }

    let string_type = ValueType::new("String");
    let author = RecordValue::text(info.author.as_str());
    entries.push(MeasValues {
        name: MEASURED_BY.to_string(),
        value_type: string_type.as_str().to_string(),
        unit: None,
        encoded: encode_for(MEASURED_BY, &author, &string_type)?,
    });
    Ok(entries)
}

fn analyze_values(
    records: &[DataTypeRecord],
    device: &str,
    log: &mut BuildLog,
) -> Result<Vec<AnalyzeValue>> {
    log.push("Processing AnalysisValues...");
    let mut values = Vec::new();
    for record in records.iter().filter(|record| record.device() == Some(device)) {
        // Blank records were already reported while building DataTypes.
        if record.value.is_blank() {
            continue;
        }
        log.push(format!(
            "Found AnalysisValue: {} with value: {}",
            record.id, record.value
        ));
        let value = if record.value_type.is_long_like() {
            integer_text(record)?
        } else {
            record.value.literal()
        };
        values.push(AnalyzeValue {
            data_type_ref: record.id.clone(),
            value,
            comment: non_empty(record.comment.as_deref()),
        });
    }
    Ok(values)
}

/// Long-typed analysis values are written as integers; fractions are truncated.
fn integer_text(record: &DataTypeRecord) -> Result<String> {
    let invalid =
        || ExportError::invalid_value(&record.id, record.value.literal(), record.value_type.as_str());
    let number = match &record.value {
        RecordValue::Integer(number) => *number,
        RecordValue::Boolean(flag) => i64::from(*flag),
        RecordValue::Number(number) => truncate(*number).ok_or_else(invalid)?,
        RecordValue::Text(text) => {
            let trimmed = text.trim();
            match trimmed.parse::<i64>() {
                Ok(number) => number,
                Err(_) => trimmed
                    .parse::<f64>()
                    .ok()
                    .and_then(truncate)
                    .ok_or_else(invalid)?,
            }
        }
    };
    Ok(number.to_string())
}

fn truncate(number: f64) -> Option<i64> {
    let in_range = number > i64::MIN as f64 && number < i64::MAX as f64;
    (number.is_finite() && in_range).then_some(number.trunc() as i64)
}

fn encode_for(id: &str, value: &RecordValue, value_type: &ValueType) -> Result<String> {
    encode_value(value, value_type).map_err(|err| match err {
        EncodeError::UnsupportedType(value_type) => {
            ExportError::unsupported_value_type(id, value_type)
        }
        EncodeError::InvalidValue { value, value_type } => {
            ExportError::invalid_value(id, value, value_type)
        }
        EncodeError::Malformed(message) => ExportError::invalid_value(id, message, value_type.as_str()),
    })
}

fn skip(log: &mut BuildLog, kind: &str, id: &str) {
    debug!(kind, record = id, "skipping blank record");
    log.push(format!("Skipping {kind}: {id} because value was blank"));
}

fn non_empty(text: Option<&str>) -> Option<String> {
    text.filter(|text| !text.is_empty()).map(str::to_string)
}
