//! Loading a complete record source folder.

use std::path::{Path, PathBuf};

use tracing::{debug, info, info_span};

use trackit_model::{ExportRecords, ExportRequest};

use crate::discovery::locate_source_files;
use crate::error::Result;
use crate::metadata::SourceMetadata;
use crate::records::{data_type_records, measurement_records, parameter_records};
use crate::table::read_record_table;

/// Everything one source folder provides for an export run.
#[derive(Debug, Clone)]
pub struct SourceBundle {
    pub folder: PathBuf,
    pub records: ExportRecords,
    pub metadata: SourceMetadata,
}

impl SourceBundle {
    /// Turn the bundle into an export request with metadata defaults applied.
    pub fn into_request(self) -> ExportRequest {
        let info = self.metadata.export_info();
        let machine_id = self.metadata.machine_id().to_string();
        let comment = self.metadata.comment().to_string();
        ExportRequest::new(self.records, info, machine_id)
            .with_comment(comment)
            .with_measurement_date(self.metadata.measurement_date)
    }
}

/// Load records and metadata from a source folder.
///
/// `AnalysisValues.csv` is required; parameter, measurement and metadata files
/// are optional.
pub fn load_source(dir: &Path) -> Result<SourceBundle> {
    let span = info_span!("load_source", folder = %dir.display());
    let _guard = span.enter();

    let files = locate_source_files(dir)?;
    let data_types = data_type_records(&read_record_table(&files.analysis_values)?)?;
    let parameters = match &files.parameters {
        Some(path) => parameter_records(&read_record_table(path)?)?,
        None => {
            debug!("no parameter file");
            Vec::new()
        }
    };
    let measurements = match &files.measurements {
        Some(path) => measurement_records(&read_record_table(path)?)?,
        None => {
            debug!("no measurement file");
            Vec::new()
        }
    };
    let metadata = match &files.metadata {
        Some(path) => SourceMetadata::from_table(&read_record_table(path)?)?,
        None => SourceMetadata::default(),
    };

    info!(
        data_types = data_types.len(),
        parameters = parameters.len(),
        measurements = measurements.len(),
        "source loaded"
    );
    Ok(SourceBundle {
        folder: dir.to_path_buf(),
        records: ExportRecords::new(data_types)
            .with_parameters(parameters)
            .with_measurements(measurements),
        metadata,
    })
}
