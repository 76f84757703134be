//! Source folder discovery.

use std::path::{Path, PathBuf};

use crate::error::{IngestError, Result};

pub const ANALYSIS_VALUES_FILE: &str = "AnalysisValues.csv";
pub const PARAMETERS_FILE: &str = "Parameters.csv";
pub const MEASUREMENTS_FILE: &str = "Measurements.csv";
pub const METADATA_FILE: &str = "Metadata.csv";

/// Record files found in a source folder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFiles {
    pub analysis_values: PathBuf,
    pub parameters: Option<PathBuf>,
    pub measurements: Option<PathBuf>,
    pub metadata: Option<PathBuf>,
}

/// Lists all CSV files in a directory.
///
/// Returns files sorted by filename.
pub fn list_csv_files(dir: &Path) -> Result<Vec<PathBuf>> {
    if !dir.is_dir() {
        return Err(IngestError::DirectoryNotFound {
            path: dir.to_path_buf(),
        });
    }

    let entries = std::fs::read_dir(dir).map_err(|source| IngestError::DirectoryRead {
        path: dir.to_path_buf(),
        source,
    })?;

    let mut files = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|source| IngestError::DirectoryRead {
            path: dir.to_path_buf(),
            source,
        })?;
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        let is_csv = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("csv"));
        if is_csv {
            files.push(path);
        }
    }

    files.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    Ok(files)
}

/// Find the record files of a source folder, matching names case-insensitively.
pub fn locate_source_files(dir: &Path) -> Result<SourceFiles> {
    let files = list_csv_files(dir)?;
    let find = |name: &str| {
        files
            .iter()
            .find(|path| {
                path.file_name()
                    .and_then(|file| file.to_str())
                    .is_some_and(|file| file.eq_ignore_ascii_case(name))
            })
            .cloned()
    };

    let analysis_values = find(ANALYSIS_VALUES_FILE).ok_or_else(|| IngestError::FileNotFound {
        name: ANALYSIS_VALUES_FILE.to_string(),
        path: dir.to_path_buf(),
    })?;
    Ok(SourceFiles {
        analysis_values,
        parameters: find(PARAMETERS_FILE),
        measurements: find(MEASUREMENTS_FILE),
        metadata: find(METADATA_FILE),
    })
}
