use anyhow::Result;
use tracing::info;

use trackit_cli::pipeline::{
    ExportSettings, SourceOverrides, encode_measurement, run_check as check_folder,
    run_export as export_folder,
};
use trackit_cli::types::ExportReport;
use trackit_core::BuildOptions;
use trackit_output::OutputLayout;

use crate::cli::{EncodeArgs, ExportArgs, SourceArgs};

pub fn run_export(args: &ExportArgs) -> Result<ExportReport> {
    let source = &args.source;
    let output_dir = args
        .output_dir
        .clone()
        .unwrap_or_else(|| source.folder.join("output"));
    let settings = ExportSettings {
        overrides: overrides(source),
        options: build_options(source),
        layout: OutputLayout::under(&output_dir),
        dry_run: args.dry_run,
    };
    let report = export_folder(&source.folder, &settings)?;
    info!(
        base_name = %report.base_name,
        devices = report.devices.len(),
        skipped = report.skipped,
        "export complete"
    );
    Ok(report)
}

pub fn run_check(args: &SourceArgs) -> Result<ExportReport> {
    check_folder(&args.folder, &overrides(args), &build_options(args))
}

pub fn run_encode(args: &EncodeArgs) -> Result<()> {
    let encoded = encode_measurement(&args.value, &args.value_type)?;
    println!("{encoded}");
    Ok(())
}

fn overrides(args: &SourceArgs) -> SourceOverrides {
    SourceOverrides {
        machine_id: args.machine.clone(),
        author: args.author.clone(),
        source: args.source.clone(),
        comment: args.comment.clone(),
        measurement_date: args.date,
        base_name: args.base_name.clone(),
    }
}

fn build_options(args: &SourceArgs) -> BuildOptions {
    match &args.author_label {
        Some(label) => BuildOptions::default().with_author_label(label.as_str()),
        None => BuildOptions::default(),
    }
}
