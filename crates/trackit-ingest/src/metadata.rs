//! Export metadata from the `key,value` metadata table.

use std::path::Path;

use chrono::{NaiveDate, NaiveDateTime};
use tracing::debug;

use trackit_model::ExportInfo;

use crate::error::{IngestError, Result};
use crate::table::RecordTable;

pub const DEFAULT_AUTHOR: &str = "No Name";
pub const DEFAULT_SOURCE: &str = "MS Excel";

pub const RADIATION_UNIT_KEY: &str = "radiationunit";
pub const AUTHOR_KEY: &str = "author";
pub const TITLE_KEY: &str = "title";
pub const COMMENT_KEY: &str = "comment";
pub const MEASUREMENT_DATE_KEY: &str = "measurementdate";

const DATE_TIME_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S"];
const DATE_FORMAT: &str = "%Y-%m-%d";

/// Values read from the metadata table, before defaults are applied.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SourceMetadata {
    pub radiation_unit: Option<String>,
    pub author: Option<String>,
    pub title: Option<String>,
    pub comment: Option<String>,
    pub measurement_date: Option<NaiveDateTime>,
}

impl SourceMetadata {
    /// Read metadata rows. Keys are case-insensitive; blank values count as absent.
    pub fn from_table(table: &RecordTable) -> Result<Self> {
        let key_column = table.require_column("key")?;
        let value_column = table.require_column("value")?;
        let mut metadata = Self::default();
        for row in &table.rows {
            let key = row[key_column].to_lowercase();
            let value = row[value_column].as_str();
            if value.is_empty() {
                continue;
            }
            match key.as_str() {
                RADIATION_UNIT_KEY => metadata.radiation_unit = Some(value.to_string()),
                AUTHOR_KEY => metadata.author = Some(sanitize_text(value)),
                TITLE_KEY => metadata.title = Some(sanitize_text(value)),
                COMMENT_KEY => metadata.comment = Some(sanitize_text(value)),
                MEASUREMENT_DATE_KEY => {
                    metadata.measurement_date = Some(parse_measurement_date(value, &table.path)?);
                }
                other => debug!(key = other, "ignoring unknown metadata key"),
            }
        }
        Ok(metadata)
    }

    pub fn machine_id(&self) -> &str {
        self.radiation_unit.as_deref().unwrap_or_default()
    }

    pub fn comment(&self) -> &str {
        self.comment.as_deref().unwrap_or_default()
    }

    /// Author and source with defaults applied.
    pub fn export_info(&self) -> ExportInfo {
        ExportInfo::new(
            self.author.as_deref().unwrap_or(DEFAULT_AUTHOR),
            self.title.as_deref().unwrap_or(DEFAULT_SOURCE),
        )
    }
}

/// Replace every character that is not a word character or whitespace with `_`.
pub fn sanitize_text(text: &str) -> String {
    text.trim()
        .chars()
        .map(|ch| {
            if ch.is_alphanumeric() || ch == '_' || ch.is_whitespace() {
                ch
            } else {
                '_'
            }
        })
        .collect()
}

/// Parse `YYYY-MM-DDTHH:MM:SS`, `YYYY-MM-DD HH:MM:SS` or `YYYY-MM-DD` (midnight).
pub fn parse_measurement_date(value: &str, path: &Path) -> Result<NaiveDateTime> {
    let value = value.trim();
    DATE_TIME_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(value, format).ok())
        .or_else(|| {
            NaiveDate::parse_from_str(value, DATE_FORMAT)
                .ok()
                .and_then(|date| date.and_hms_opt(0, 0, 0))
        })
        .ok_or_else(|| IngestError::invalid_value("MeasurementDate", value, path))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(text: &str) -> RecordTable {
        RecordTable::from_reader(text.as_bytes(), Path::new("Metadata.csv")).unwrap()
    }

    #[test]
    fn sanitize_replaces_punctuation() {
        assert_eq!(sanitize_text(" O'Brien, J. "), "O_Brien_ J_");
        assert_eq!(sanitize_text("weekly check_2"), "weekly check_2");
        assert_eq!(sanitize_text("Müller"), "Müller");
    }

    #[test]
    fn date_formats() {
        let path = Path::new("Metadata.csv");
        let expected = NaiveDate::from_ymd_opt(2024, 5, 14)
            .and_then(|d| d.and_hms_opt(9, 15, 0))
            .unwrap();
        assert_eq!(parse_measurement_date("2024-05-14T09:15:00", path).unwrap(), expected);
        assert_eq!(parse_measurement_date("2024-05-14 09:15:00", path).unwrap(), expected);
        let midnight = parse_measurement_date("2024-05-14", path).unwrap();
        assert_eq!(midnight.to_string(), "2024-05-14 00:00:00");
        assert!(matches!(
            parse_measurement_date("14/05/2024", path),
            Err(IngestError::InvalidValue { .. })
        ));
    }

    #[test]
    fn metadata_keys_are_case_insensitive() {
        let metadata = SourceMetadata::from_table(&table(
            "key,value\nRADIATIONUNIT,LINAC1\nauthor,A. Tester\nTitle,Daily QA\nComment,\nColour,blue\n",
        ))
        .unwrap();
        assert_eq!(metadata.machine_id(), "LINAC1");
        assert_eq!(metadata.author.as_deref(), Some("A_ Tester"));
        assert_eq!(metadata.comment(), "");
        let info = metadata.export_info();
        assert_eq!(info.author, "A_ Tester");
        assert_eq!(info.source, "Daily QA");
    }

    #[test]
    fn defaults_when_absent() {
        let metadata = SourceMetadata::default();
        assert_eq!(metadata.machine_id(), "");
        let info = metadata.export_info();
        assert_eq!(info.author, DEFAULT_AUTHOR);
        assert_eq!(info.source, DEFAULT_SOURCE);
    }

    #[test]
    fn title_is_sanitized() {
        let metadata =
            SourceMetadata::from_table(&table("key,value
Title,../../escaped/QA
")).unwrap();
        assert_eq!(metadata.title.as_deref(), Some("______escaped_QA"));
        assert_eq!(metadata.export_info().source, "______escaped_QA");
    }
}
