//! Typed records from record tables.
//!
//! Every table carries the `track-it` (id), `valuetype` and `values` columns.
//! Cells are kept as text; the normalizer and builder interpret them.

use tracing::debug;

use trackit_model::{DataTypeRecord, MeasurementValueRecord, ParameterRecord, RecordValue};

use crate::error::{IngestError, Result};
use crate::table::{RecordTable, cell};

pub const ID_COLUMN: &str = "track-it";
pub const VALUE_TYPE_COLUMN: &str = "valuetype";
pub const VALUES_COLUMN: &str = "values";
pub const DEFINITION_COLUMN: &str = "definition";
pub const UNIT_COLUMN: &str = "unit";
pub const DEVICE_COLUMN: &str = "measuringdevice";
pub const COMMENT_COLUMN: &str = "comment";

struct CoreColumns {
    id: usize,
    value_type: usize,
    values: usize,
}

impl CoreColumns {
    fn locate(table: &RecordTable) -> Result<Self> {
        Ok(Self {
            id: table.require_column(ID_COLUMN)?,
            value_type: table.require_column(VALUE_TYPE_COLUMN)?,
            values: table.require_column(VALUES_COLUMN)?,
        })
    }
}

fn optional(text: &str) -> Option<String> {
    (!text.is_empty()).then(|| text.to_string())
}

/// AnalysisValues rows. A missing `comment` column leaves comments unset.
pub fn data_type_records(table: &RecordTable) -> Result<Vec<DataTypeRecord>> {
    let core = CoreColumns::locate(table)?;
    let definition = table.column_index(DEFINITION_COLUMN);
    let unit = table.column_index(UNIT_COLUMN);
    let device = table.column_index(DEVICE_COLUMN);
    let comment = table.column_index(COMMENT_COLUMN);

    let records: Vec<DataTypeRecord> = table
        .rows
        .iter()
        .map(|row| DataTypeRecord {
            id: row[core.id].clone(),
            value_type: row[core.value_type].as_str().into(),
            definition: cell(row, definition).to_string(),
            unit: optional(cell(row, unit)),
            measuring_device: optional(cell(row, device)),
            value: RecordValue::text(row[core.values].as_str()),
            comment: comment.map(|_| cell(row, comment).to_string()),
        })
        .collect();
    debug!(path = %table.path.display(), count = records.len(), "data type records");
    Ok(records)
}

pub fn parameter_records(table: &RecordTable) -> Result<Vec<ParameterRecord>> {
    let core = CoreColumns::locate(table)?;
    let unit = table.column_index(UNIT_COLUMN);
    let records: Vec<ParameterRecord> = table
        .rows
        .iter()
        .map(|row| ParameterRecord {
            id: row[core.id].clone(),
            value_type: row[core.value_type].as_str().into(),
            unit: optional(cell(row, unit)),
            value: RecordValue::text(row[core.values].as_str()),
        })
        .collect();
    debug!(path = %table.path.display(), count = records.len(), "parameter records");
    Ok(records)
}

/// Measurements rows; each declared type must be binary-encodable.
pub fn measurement_records(table: &RecordTable) -> Result<Vec<MeasurementValueRecord>> {
    let core = CoreColumns::locate(table)?;
    let unit = table.column_index(UNIT_COLUMN);
    let mut records = Vec::with_capacity(table.len());
    for row in &table.rows {
        let mut record = MeasurementValueRecord::new(
            row[core.id].as_str(),
            row[core.value_type].as_str(),
            row[core.values].as_str(),
        )
        .map_err(|source| IngestError::Record {
            path: table.path.clone(),
            source,
        })?;
        record.unit = optional(cell(row, unit));
        records.push(record);
    }
    debug!(path = %table.path.display(), count = records.len(), "measurement records");
    Ok(records)
}
