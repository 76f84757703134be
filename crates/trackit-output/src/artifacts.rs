//! Export artifacts: the XML import file and the plain-text build log.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::{info, warn};

use trackit_core::BuildOutcome;
use trackit_model::BuildLog;

use crate::common::ensure_parent_dir;
use crate::xml::write_export_xml;

/// Where export artifacts are written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputLayout {
    pub xml_dir: PathBuf,
    pub log_dir: PathBuf,
}

impl OutputLayout {
    pub fn new(xml_dir: impl Into<PathBuf>, log_dir: impl Into<PathBuf>) -> Self {
        Self {
            xml_dir: xml_dir.into(),
            log_dir: log_dir.into(),
        }
    }

    /// `<root>/xml` and `<root>/log`.
    pub fn under(root: &Path) -> Self {
        Self::new(root.join("xml"), root.join("log"))
    }

    pub fn paths(&self, base_name: &str) -> ExportPaths {
        ExportPaths {
            xml: self.xml_dir.join(format!("{base_name}.xml")),
            log: self.log_dir.join(format!("{base_name}.log")),
        }
    }
}

/// Paths of the artifacts written for one export.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportPaths {
    pub xml: PathBuf,
    pub log: PathBuf,
}

/// Write the build log, one entry per line.
pub fn write_build_log(path: &Path, log: &BuildLog) -> Result<()> {
    ensure_parent_dir(path)?;
    fs::write(path, log.to_text()).with_context(|| format!("write {}", path.display()))?;
    Ok(())
}

/// Write `<base>.xml` and `<base>.log` for a built export.
///
/// The outcome of the XML write is appended to the build log before the log
/// itself is written, so a failed XML write still leaves a log behind. The
/// XML error is returned after the log is on disk.
pub fn write_artifacts(
    outcome: &mut BuildOutcome,
    layout: &OutputLayout,
    base_name: &str,
) -> Result<ExportPaths> {
    let paths = layout.paths(base_name);
    let xml_result = write_export_xml(&paths.xml, &outcome.document);
    match &xml_result {
        Ok(()) => {
            outcome
                .log
                .push(format!("xml file generated: {}", paths.xml.display()));
            info!(path = %paths.xml.display(), "xml file generated");
        }
        Err(err) => {
            outcome.log.push(format!("Could not generate xml: {err:#}"));
            warn!(path = %paths.xml.display(), error = %err, "could not generate xml");
        }
    }
    write_build_log(&paths.log, &outcome.log)?;
    xml_result?;
    Ok(paths)
}
