//! Integration tests for the export pipeline.

use std::fs;
use std::path::Path;

use chrono::NaiveDate;
use tempfile::TempDir;
use trackit_cli::pipeline::{
    ExportSettings, SourceOverrides, encode_measurement, prepare_request, run_check, run_export,
};
use trackit_core::BuildOptions;
use trackit_model::ExportError;
use trackit_output::OutputLayout;

fn write(dir: &Path, name: &str, contents: &str) {
    fs::write(dir.join(name), contents).expect("write file");
}

fn source_folder() -> TempDir {
    let dir = TempDir::new().expect("temp dir");
    write(
        dir.path(),
        "AnalysisValues.csv",
        "track-it,valuetype,definition,unit,measuringdevice,values\n\
         TEMP,Double,Room temperature,C,DEV1,20.5\n\
         OUTPUT,Boolean,Output constancy,,DEV1,Pass\n\
         FLATNESS,Double,Flatness,%,DEV2,\n",
    );
    write(
        dir.path(),
        "Metadata.csv",
        "key,value\nRadiationUnit,LINAC1\nAuthor,A Tester\nTitle,ExcelTemplate\n\
         MeasurementDate,2024-05-14\n",
    );
    dir
}

fn settings(output: &Path, overrides: SourceOverrides) -> ExportSettings {
    ExportSettings {
        overrides,
        options: BuildOptions::default(),
        layout: OutputLayout::under(output),
        dry_run: false,
    }
}

fn named(base_name: &str) -> SourceOverrides {
    SourceOverrides {
        base_name: Some(base_name.to_string()),
        ..SourceOverrides::default()
    }
}

#[test]
fn export_writes_artifacts_and_reports() {
    let source = source_folder();
    let output = TempDir::new().expect("output dir");

    let report = run_export(source.path(), &settings(output.path(), named("weekly"))).expect("export");

    assert_eq!(report.base_name, "weekly");
    assert_eq!(report.machine_id, "LINAC1");
    assert_eq!(report.author, "A Tester");
    assert_eq!(report.source, "ExcelTemplate");
    assert_eq!(report.data_types, 2);
    assert_eq!(report.parameters, None);
    assert_eq!(report.skipped, 1);
    let devices: Vec<(&str, usize)> = report
        .devices
        .iter()
        .map(|device| (device.device.as_str(), device.analyze_values))
        .collect();
    assert_eq!(devices, vec![("DEV1", 2), ("DEV2", 0)]);

    let xml_path = output.path().join("xml").join("weekly.xml");
    let log_path = output.path().join("log").join("weekly.log");
    assert_eq!(report.xml.as_deref(), Some(xml_path.as_path()));
    assert_eq!(report.log.as_deref(), Some(log_path.as_path()));

    let xml = fs::read_to_string(&xml_path).expect("read xml");
    assert!(xml.contains(r#"<Measurement guid="weekly_DEV1""#));
    assert!(xml.contains("<Date>2024-05-14T00:00:00+00:00</Date>"));
    assert!(xml.contains("<Value>1</Value>"));

    let log = fs::read_to_string(&log_path).expect("read log");
    assert!(log.contains("Skipping DataType: FLATNESS because value was blank"));
    assert!(log.lines().last().unwrap_or_default().starts_with("xml file generated: "));
}

#[test]
fn dry_run_writes_nothing() {
    let source = source_folder();
    let output = TempDir::new().expect("output dir");
    let mut settings = settings(output.path(), named("weekly"));
    settings.dry_run = true;

    let report = run_export(source.path(), &settings).expect("export");
    assert!(report.xml.is_none());
    assert!(report.log.is_none());
    assert!(!output.path().join("xml").exists());
}

#[test]
fn overrides_replace_metadata() {
    let source = source_folder();
    let overrides = SourceOverrides {
        machine_id: Some(" LINAC2 ".to_string()),
        author: Some("B. Physicist".to_string()),
        comment: Some("after service!".to_string()),
        measurement_date: NaiveDate::from_ymd_opt(2024, 6, 1).and_then(|d| d.and_hms_opt(8, 0, 0)),
        ..SourceOverrides::default()
    };
    let request = prepare_request(source.path(), &overrides).expect("prepare");
    assert_eq!(request.machine_id, "LINAC2");
    assert_eq!(request.info.author, "B_ Physicist");
    assert_eq!(request.info.source, "ExcelTemplate");
    assert_eq!(request.comment, "after service_");
    assert!(request.base_name.starts_with("B__Physicist_ExcelTemplate_"));
    assert_eq!(
        request.measurement_date.map(|date| date.to_string()),
        Some("2024-06-01 08:00:00".to_string())
    );
}

#[test]
fn title_with_path_separators_stays_inside_output_dirs() {
    let source = source_folder();
    write(
        source.path(),
        "Metadata.csv",
        "key,value\nRadiationUnit,LINAC1\nAuthor,A Tester\nTitle,../../escaped/QA\n",
    );
    let output = TempDir::new().expect("output dir");

    let report =
        run_export(source.path(), &settings(output.path(), SourceOverrides::default())).expect("export");

    assert_eq!(report.source, "______escaped_QA");
    assert!(report.base_name.starts_with("A_Tester_______escaped_QA_"));
    assert!(!report.base_name.contains('/'));
    let xml_path = report.xml.expect("xml path");
    assert_eq!(xml_path.parent(), Some(output.path().join("xml").as_path()));
    assert!(!output.path().join("xml").join("escaped").exists());

    let xml = fs::read_to_string(&xml_path).expect("read xml");
    let guid = format!(r#"guid="{}_DEV1""#, report.base_name);
    assert!(xml.contains(&guid));
}

#[test]
fn source_override_is_sanitized() {
    let source = source_folder();
    let overrides = SourceOverrides {
        source: Some("QA/v2".to_string()),
        ..SourceOverrides::default()
    };
    let request = prepare_request(source.path(), &overrides).expect("prepare");
    assert_eq!(request.info.source, "QA_v2");
    assert!(request.base_name.starts_with("A_Tester_QA_v2_"));
}

#[test]
fn check_reports_missing_radiation_unit() {
    let source = source_folder();
    write(source.path(), "Metadata.csv", "key,value\nAuthor,A Tester\n");

    let err = run_check(source.path(), &SourceOverrides::default(), &BuildOptions::default())
        .unwrap_err();
    let export_error = err.downcast_ref::<ExportError>().expect("export error");
    assert!(export_error.is_precondition());
    assert!(matches!(export_error, ExportError::MissingMachineId));
}

#[test]
fn check_builds_without_writing() {
    let source = source_folder();
    let report = run_check(source.path(), &named("probe"), &BuildOptions::default()).expect("check");
    assert_eq!(report.devices.len(), 2);
    assert!(report.xml.is_none());
    assert!(!source.path().join("output").exists());
}

#[test]
fn report_serializes_to_json() {
    let source = source_folder();
    let report = run_check(source.path(), &named("probe"), &BuildOptions::default()).expect("check");
    let value = serde_json::to_value(&report).expect("json");
    assert_eq!(value["base_name"], "probe");
    assert_eq!(value["devices"][0]["device"], "DEV1");
    assert_eq!(value["parameters"], serde_json::Value::Null);
    assert_eq!(value["xml"], serde_json::Value::Null);
}

#[test]
fn encode_single_values() {
    assert_eq!(encode_measurement("A. Tester", "String").unwrap(), "QS4gVGVzdGVy");
    assert_eq!(encode_measurement("1.0", "Double").unwrap(), "AAAAAAAA8D8=");
    assert_eq!(encode_measurement("Pass", "Boolean").unwrap(), "AQAAAAAAAAA=");
    assert_eq!(encode_measurement("-1", "Long").unwrap(), "//////////8=");
    assert!(encode_measurement("Photon", "Modality").is_err());
    assert!(encode_measurement("high", "Double").is_err());
}
