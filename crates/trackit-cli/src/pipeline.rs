//! Export pipeline: source folder -> request -> document -> artifacts.

use std::path::Path;

use anyhow::{Context, Result, bail};
use chrono::{Local, NaiveDateTime};
use tracing::{info, info_span};

use trackit_core::{BuildOptions, build_export, coerce_analysis_boolean, encode_value};
use trackit_ingest::{load_source, sanitize_text};
use trackit_model::{ExportInfo, ExportRequest, RecordValue, ValueType, export_base_name};
use trackit_output::{OutputLayout, write_artifacts};

use crate::types::ExportReport;

/// Values given on the command line that replace source metadata.
#[derive(Debug, Clone, Default)]
pub struct SourceOverrides {
    pub machine_id: Option<String>,
    pub author: Option<String>,
    pub source: Option<String>,
    pub comment: Option<String>,
    pub measurement_date: Option<NaiveDateTime>,
    pub base_name: Option<String>,
}

impl SourceOverrides {
    /// Apply the overrides. A changed author or source renames the export
    /// unless a base name is given explicitly.
    pub fn apply(&self, mut request: ExportRequest) -> ExportRequest {
        if let Some(machine_id) = &self.machine_id {
            request.machine_id = machine_id.trim().to_string();
        }
        if let Some(comment) = &self.comment {
            request.comment = sanitize_text(comment);
        }
        if let Some(date) = self.measurement_date {
            request.measurement_date = Some(date);
        }
        if self.author.is_some() || self.source.is_some() {
            request.info = ExportInfo::new(
                self.author
                    .as_deref()
                    .map_or_else(|| request.info.author.clone(), sanitize_text),
                self.source
                    .as_deref()
                    .map_or_else(|| request.info.source.clone(), sanitize_text),
            );
            request.base_name = export_base_name(&request.info, Local::now().naive_local());
        }
        if let Some(base_name) = &self.base_name {
            request.base_name.clone_from(base_name);
        }
        request
    }
}

/// Settings for a full export run.
#[derive(Debug, Clone)]
pub struct ExportSettings {
    pub overrides: SourceOverrides,
    pub options: BuildOptions,
    pub layout: OutputLayout,
    pub dry_run: bool,
}

/// Load a source folder and apply overrides.
pub fn prepare_request(folder: &Path, overrides: &SourceOverrides) -> Result<ExportRequest> {
    let bundle =
        load_source(folder).with_context(|| format!("load source {}", folder.display()))?;
    Ok(overrides.apply(bundle.into_request()))
}

/// Build the export and write its artifacts (unless dry-run).
pub fn run_export(folder: &Path, settings: &ExportSettings) -> Result<ExportReport> {
    let span = info_span!("export", folder = %folder.display());
    let _guard = span.enter();

    let request = prepare_request(folder, &settings.overrides)?;
    let base_name = request.base_name.clone();
    let author = request.info.author.clone();
    let mut outcome = build_export(request, &settings.options)
        .with_context(|| format!("build export {base_name}"))?;

    let paths = if settings.dry_run {
        info!("dry run: no files written");
        None
    } else {
        Some(write_artifacts(&mut outcome, &settings.layout, &base_name)?)
    };
    Ok(ExportReport::from_outcome(
        folder.to_path_buf(),
        base_name,
        author,
        &outcome,
        paths,
    ))
}

/// Ingest, check readiness and build in memory without writing anything.
pub fn run_check(
    folder: &Path,
    overrides: &SourceOverrides,
    options: &BuildOptions,
) -> Result<ExportReport> {
    let span = info_span!("check", folder = %folder.display());
    let _guard = span.enter();

    let request = prepare_request(folder, overrides)?;
    let base_name = request.base_name.clone();
    let author = request.info.author.clone();
    let outcome = build_export(request, options)
        .with_context(|| format!("build export {base_name}"))?;
    Ok(ExportReport::from_outcome(
        folder.to_path_buf(),
        base_name,
        author,
        &outcome,
        None,
    ))
}

/// MeasValues encoding of a single value, with boolean coercion applied.
pub fn encode_measurement(value: &str, value_type: &str) -> Result<String> {
    let value_type = ValueType::new(value_type);
    if !value_type.is_encodable() {
        bail!("unsupported value type '{value_type}': expected String, Double, Long or Boolean");
    }
    let mut value = RecordValue::text(value);
    if value_type.is_boolean_like()
        && let Some(coerced) = coerce_analysis_boolean(&value)
    {
        value = coerced;
    }
    encode_value(&value, &value_type).with_context(|| format!("encode {value} as {value_type}"))
}
