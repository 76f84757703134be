//! Record normalization applied before document building.
//!
//! Boolean-typed rows arrive as whatever the operator typed into the template
//! ("Pass", "Fail", "Warning", "Yes", ...). Two policies map them onto the
//! canonical forms TRACK-IT expects:
//!
//! - **Analysis/measurement policy** (data types and measurement values):
//!   `p`/`t`/`y` anywhere in the text becomes `1`, otherwise `warn` becomes
//!   `2`, otherwise `f`/`n` becomes `0`. Anything else is left untouched, as
//!   are values that are already numeric.
//! - **Parameter policy**: `p`/`t`/`y` in the text becomes `"True"`, any other
//!   text `"False"`; numbers become `"True"` unless zero.
//!
//! The substring tests are checked in that order, so "Not Pass" is `1`.

use tracing::debug;

use trackit_model::{
    BuildLog, DataTypeRecord, ExportRecords, MeasurementValueRecord, ParameterRecord, RecordValue,
};

const TRUE_MARKERS: [char; 3] = ['p', 't', 'y'];
const FALSE_MARKERS: [char; 2] = ['f', 'n'];
const WARNING_MARKER: &str = "warn";

/// Analysis/measurement boolean coercion.
///
/// Returns the coerced value, or `None` when the value is left unchanged.
/// Blank text is never coerced so that blank records are still skipped.
pub fn coerce_analysis_boolean(value: &RecordValue) -> Option<RecordValue> {
    let text = value.as_text().filter(|text| !text.is_empty())?;
    let lower = text.to_lowercase();
    if contains_any(&lower, &TRUE_MARKERS) {
        Some(RecordValue::Integer(1))
    } else if lower.contains(WARNING_MARKER) {
        Some(RecordValue::Integer(2))
    } else if contains_any(&lower, &FALSE_MARKERS) {
        Some(RecordValue::Integer(0))
    } else {
        None
    }
}

/// Parameter boolean coercion to the canonical `"True"`/`"False"` strings.
///
/// Returns `None` only for blank text.
pub fn coerce_parameter_boolean(value: &RecordValue) -> Option<RecordValue> {
    let canonical = match value {
        RecordValue::Text(text) if text.is_empty() => return None,
        RecordValue::Text(text) => contains_any(&text.to_lowercase(), &TRUE_MARKERS),
        other => !other.is_zero(),
    };
    let text = if canonical { "True" } else { "False" };
    Some(RecordValue::text(text))
}

fn contains_any(haystack: &str, markers: &[char]) -> bool {
    haystack.contains(markers)
}

/// Fill in an empty comment on legacy records without a comment column.
///
/// Returns true when the record was changed.
pub fn backfill_comment(record: &mut DataTypeRecord) -> bool {
    if record.comment.is_some() {
        return false;
    }
    record.comment = Some(String::new());
    true
}

/// Normalize all three record lists of an export.
pub fn normalize_records(records: ExportRecords, log: &mut BuildLog) -> ExportRecords {
    ExportRecords {
        data_types: normalize_data_types(records.data_types, log),
        parameters: normalize_parameters(records.parameters, log),
        measurements: normalize_measurements(records.measurements, log),
    }
}

/// Backfill comments, then apply the analysis policy to boolean-typed rows.
pub fn normalize_data_types(
    mut records: Vec<DataTypeRecord>,
    log: &mut BuildLog,
) -> Vec<DataTypeRecord> {
    for record in &mut records {
        backfill_comment(record);
        if record.value_type.is_boolean_like() {
            apply(&record.id, &mut record.value, coerce_analysis_boolean, log);
        }
    }
    records
}

/// Apply the analysis policy to boolean-typed measurement values.
pub fn normalize_measurements(
    mut records: Vec<MeasurementValueRecord>,
    log: &mut BuildLog,
) -> Vec<MeasurementValueRecord> {
    for record in &mut records {
        if record.value_type.is_boolean_like() {
            apply(&record.id, &mut record.value, coerce_analysis_boolean, log);
        }
    }
    records
}

/// Apply the parameter policy to boolean-typed parameters.
pub fn normalize_parameters(
    mut records: Vec<ParameterRecord>,
    log: &mut BuildLog,
) -> Vec<ParameterRecord> {
    for record in &mut records {
        if record.value_type.is_boolean_like() {
            apply(&record.id, &mut record.value, coerce_parameter_boolean, log);
        }
    }
    records
}

fn apply(
    id: &str,
    value: &mut RecordValue,
    policy: fn(&RecordValue) -> Option<RecordValue>,
    log: &mut BuildLog,
) {
    if value.is_blank() {
        return;
    }
    match policy(value) {
        Some(coerced) => {
            debug!(record = id, from = %value, to = %coerced, "boolean coerced");
            log.push(format!(
                "Applying boolean conversion method to {id} with value: {value} -> {coerced}"
            ));
            *value = coerced;
        }
        None => {
            log.push(format!(
                "Applying boolean conversion method to {id} with value: {value} (unchanged)"
            ));
        }
    }
}
