//! Record source for TRACK-IT exports.
//!
//! A source folder holds one CSV file per record table (`AnalysisValues.csv`,
//! `Parameters.csv`, `Measurements.csv`) plus an optional `Metadata.csv` of
//! `key,value` rows naming the radiation unit, author, title, comment and
//! measurement date.

pub mod discovery;
pub mod error;
pub mod metadata;
pub mod records;
pub mod source;
pub mod table;

pub use discovery::{
    ANALYSIS_VALUES_FILE, MEASUREMENTS_FILE, METADATA_FILE, PARAMETERS_FILE, SourceFiles,
    list_csv_files, locate_source_files,
};
pub use error::{IngestError, Result};
pub use metadata::{
    DEFAULT_AUTHOR, DEFAULT_SOURCE, SourceMetadata, parse_measurement_date, sanitize_text,
};
pub use records::{data_type_records, measurement_records, parameter_records};
pub use source::{SourceBundle, load_source};
pub use table::{RecordTable, normalize_header, read_record_table};
