//! Integration tests for export document building.

use chrono::{NaiveDate, NaiveDateTime};

use trackit_core::{BuildOptions, BuildOutcome, MEASURED_BY, build_export, decode_value};
use trackit_model::{
    DataTypeRecord, ExportError, ExportInfo, ExportRecords, ExportRequest, MeasurementValueRecord,
    ParameterRecord, RecordValue, ValueType,
};

fn measurement_date() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 5, 14)
        .and_then(|d| d.and_hms_opt(9, 15, 0))
        .unwrap()
}

fn request(records: ExportRecords) -> ExportRequest {
    ExportRequest::new(records, ExportInfo::new("A Tester", "ExcelTemplate"), "LINAC1")
        .with_measurement_date(Some(measurement_date()))
        .with_base_name("run")
}

fn build(records: ExportRecords) -> BuildOutcome {
    build_export(request(records), &BuildOptions::default()).expect("build export")
}

fn temp_record() -> DataTypeRecord {
    DataTypeRecord::new("TEMP", "Double", "20.5").with_measuring_device("DEV1")
}

fn mixed_records() -> ExportRecords {
    ExportRecords::new(vec![
        temp_record(),
        DataTypeRecord::new("OUTPUT", "Boolean", "Pass").with_measuring_device("DEV1"),
        DataTypeRecord::new("FLATNESS", "Double", "").with_measuring_device("DEV2"),
    ])
    .with_parameters(vec![
        ParameterRecord::new("Energy", "String", "6").with_unit("MV"),
        ParameterRecord::new("FFF", "Boolean", ""),
    ])
    .with_measurements(vec![
        MeasurementValueRecord::new("Temperature", "Double", "21.3")
            .unwrap()
            .with_unit("°C"),
        MeasurementValueRecord::new("Pressure", "Double", "").unwrap(),
    ])
}

#[test]
fn end_to_end_single_record() {
    let outcome = build(ExportRecords::new(vec![temp_record()]));
    let document = &outcome.document;

    assert_eq!(document.radiation_unit.name, "LINAC1");
    assert_eq!(document.measuring_devices.len(), 1);
    assert_eq!(document.measuring_devices[0].name, "DEV1");
    assert_eq!(document.measuring_software.name, "ExcelTemplate");
    assert_eq!(document.measurements.len(), 1);

    let measurement = &document.measurements[0];
    assert_eq!(measurement.guid, "run_DEV1");
    assert_eq!(measurement.measuring_device_ref, "DEV1");
    assert_eq!(measurement.admin.date, "2024-05-14T09:15:00+00:00");
    assert_eq!(measurement.analyze_values.len(), 1);
    assert_eq!(measurement.analyze_values[0].data_type_ref, "TEMP");
    assert_eq!(measurement.analyze_values[0].value, "20.5");
    assert_eq!(measurement.analyze_values[0].comment, None);
}

#[test]
fn blank_records_are_omitted_and_skipped_once() {
    let outcome = build(mixed_records());
    let document = &outcome.document;

    assert!(document.data_type("FLATNESS").is_none());
    for measurement in &document.measurements {
        assert!(
            measurement
                .analyze_values
                .iter()
                .all(|value| value.data_type_ref != "FLATNESS")
        );
        let parameters = measurement.admin.parameters.as_ref().expect("parameters");
        assert!(parameters.iter().all(|parameter| parameter.name != "FFF"));
        assert!(
            measurement
                .meas_values
                .iter()
                .all(|values| values.name != "Pressure")
        );
    }

    for id in ["FLATNESS", "FFF", "Pressure"] {
        let skips = outcome
            .log
            .iter()
            .filter(|entry| entry.starts_with("Skipping") && entry.contains(id))
            .count();
        assert_eq!(skips, 1, "skip entries for {id}");
    }
}

#[test]
fn build_log_trace() {
    let outcome = build(mixed_records());
    let trace = outcome.log.entries().join("\n");
    insta::assert_snapshot!(trace, @r"
    Applying boolean conversion method to OUTPUT with value: Pass -> 1
    Processing DataTypes...
    Found DataType: TEMP with value 20.5
    Found DataType: OUTPUT with value 1
    Skipping DataType: FLATNESS because value was blank
    Processing Parameters...
    Found Parameter: Energy with value 6
    Skipping Parameter: FFF because value was blank
    Processing MeasData...
    Found MeasData: Temperature with value: 21.3
    Skipping Measurement: Pressure because value was blank
    Looking at measurements with DEV1
    Processing AnalysisValues...
    Found AnalysisValue: TEMP with value: 20.5
    Found AnalysisValue: OUTPUT with value: 1
    Looking at measurements with DEV2
    Processing AnalysisValues...
    ");
}

#[test]
fn measuring_devices_collapse_duplicates() {
    let outcome = build(ExportRecords::new(vec![
        DataTypeRecord::new("A", "Double", "1.0").with_measuring_device("QuickCheck"),
        DataTypeRecord::new("B", "Double", "2.0").with_measuring_device("FC65"),
        DataTypeRecord::new("C", "Double", "3.0").with_measuring_device("QuickCheck"),
        DataTypeRecord::new("D", "Double", "4.0"),
    ]));
    let document = &outcome.document;

    let names: Vec<&str> = document
        .measuring_devices
        .iter()
        .map(|device| device.name.as_str())
        .collect();
    assert_eq!(names, vec!["FC65", "QuickCheck"]);
    assert_eq!(document.measurements.len(), 2);

    let quick_check = document.measurement_for("QuickCheck").expect("QuickCheck");
    let refs: Vec<&str> = quick_check
        .analyze_values
        .iter()
        .map(|value| value.data_type_ref.as_str())
        .collect();
    assert_eq!(refs, vec!["A", "C"]);
    // D has no device: declared, but part of no measurement.
    assert!(document.data_type("D").is_some());
}

#[test]
fn zero_parameters_produce_no_parameters_block() {
    let outcome = build(ExportRecords::new(vec![temp_record()]));
    let admin = &outcome.document.measurements[0].admin;
    assert!(admin.parameters.is_none());
    assert_eq!(
        outcome
            .log
            .count_containing("No parameters provided - nothing to process."),
        1
    );
}

#[test]
fn all_blank_parameters_produce_empty_block() {
    let records = ExportRecords::new(vec![temp_record()])
        .with_parameters(vec![ParameterRecord::new("FFF", "Boolean", "")]);
    let outcome = build(records);
    let parameters = outcome.document.measurements[0].admin.parameters.as_ref();
    assert_eq!(parameters.map(Vec::len), Some(0));
}

#[test]
fn parameters_render_literal_values() {
    let records = ExportRecords::new(vec![temp_record()]).with_parameters(vec![
        ParameterRecord::new("Energy", "Double", RecordValue::Number(6.0)).with_unit("MV"),
        ParameterRecord::new("FFF", "Boolean", RecordValue::Boolean(true)),
        ParameterRecord::new("Modality", "Modality", "Photon"),
        ParameterRecord::new("Gated", "Boolean", "no"),
    ]);
    let outcome = build(records);
    let parameters = outcome.document.measurements[0]
        .admin
        .parameters
        .clone()
        .expect("parameters");

    let rendered: Vec<(&str, &str, Option<&str>)> = parameters
        .iter()
        .map(|p| (p.name.as_str(), p.value.as_str(), p.unit.as_deref()))
        .collect();
    assert_eq!(
        rendered,
        vec![
            ("Energy", "6.0", Some("MV")),
            ("FFF", "True", None),
            ("Modality", "Photon", None),
            ("Gated", "False", None),
        ]
    );
}

#[test]
fn long_analysis_values_are_integers_and_comments_kept() {
    let outcome = build(ExportRecords::new(vec![
        DataTypeRecord::new("MU", "Long", "100.0")
            .with_measuring_device("DEV1")
            .with_comment("checked twice"),
        DataTypeRecord::new("SYM", "Double", "100.0")
            .with_measuring_device("DEV1")
            .with_comment(""),
    ]));
    let values = &outcome.document.measurements[0].analyze_values;
    assert_eq!(values[0].value, "100");
    assert_eq!(values[0].comment.as_deref(), Some("checked twice"));
    assert_eq!(values[1].value, "100.0");
    assert_eq!(values[1].comment, None);
}

#[test]
fn meas_data_is_encoded_and_ends_with_measured_by() {
    let outcome = build(mixed_records());
    let meas_values = &outcome.document.measurements[0].meas_values;
    assert_eq!(meas_values.len(), 2);

    let temperature = &meas_values[0];
    assert_eq!(temperature.name, "Temperature");
    assert_eq!(temperature.unit.as_deref(), Some("°C"));
    let decoded = decode_value(&temperature.encoded, &ValueType::new("Double")).unwrap();
    assert_eq!(decoded, RecordValue::Number(21.3));

    let measured_by = meas_values.last().unwrap();
    assert_eq!(measured_by.name, MEASURED_BY);
    assert_eq!(measured_by.value_type, "String");
    let author = decode_value(&measured_by.encoded, &ValueType::new("String")).unwrap();
    assert_eq!(author, RecordValue::text("A Tester"));
}

#[test]
fn measured_by_present_without_measurements() {
    let outcome = build(ExportRecords::new(vec![temp_record()]));
    let meas_values = &outcome.document.measurements[0].meas_values;
    assert_eq!(meas_values.len(), 1);
    assert_eq!(meas_values[0].name, MEASURED_BY);
    assert_eq!(outcome.log.count_containing("No Measurements to process."), 1);
}

#[test]
fn boolean_measurements_are_coerced_before_encoding() {
    let records = ExportRecords::new(vec![temp_record()]).with_measurements(vec![
        MeasurementValueRecord::new("Interlock", "Boolean", "Warning").unwrap(),
    ]);
    let outcome = build(records);
    let encoded = &outcome.document.measurements[0].meas_values[0].encoded;
    let decoded = decode_value(encoded, &ValueType::new("Boolean")).unwrap();
    assert_eq!(decoded, RecordValue::Integer(2));
}

#[test]
fn comment_only_when_non_empty() {
    let with_comment = build_export(
        request(ExportRecords::new(vec![temp_record()])).with_comment("weekly output check"),
        &BuildOptions::default(),
    )
    .unwrap();
    assert_eq!(
        with_comment.document.measurements[0].admin.comment.as_deref(),
        Some("weekly output check")
    );

    let without = build(ExportRecords::new(vec![temp_record()]));
    assert_eq!(without.document.measurements[0].admin.comment, None);
}

#[test]
fn empty_machine_id_is_a_precondition_failure() {
    let request = ExportRequest::new(
        ExportRecords::new(vec![temp_record()]),
        ExportInfo::new("A Tester", "ExcelTemplate"),
        "",
    );
    let err = build_export(request, &BuildOptions::default()).unwrap_err();
    assert!(err.is_precondition());
    assert!(matches!(err, ExportError::MissingMachineId));
}

#[test]
fn missing_device_is_a_precondition_failure() {
    let records = ExportRecords::new(vec![DataTypeRecord::new("TEMP", "Double", "20.5")]);
    let err = build_export(request(records), &BuildOptions::default()).unwrap_err();
    assert!(matches!(err, ExportError::NoMeasuringDevice));
}

#[test]
fn invalid_measurement_value_aborts_with_record_id() {
    let records = ExportRecords::new(vec![temp_record()]).with_measurements(vec![
        MeasurementValueRecord::new("Pressure", "Double", "high").unwrap(),
    ]);
    let err = build_export(request(records), &BuildOptions::default()).unwrap_err();
    match err {
        ExportError::InvalidValue { id, value, .. } => {
            assert_eq!(id, "Pressure");
            assert_eq!(value, "high");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn header_uses_options() {
    let options = BuildOptions::default().with_author_label("Physics QA");
    let outcome = build_export(request(ExportRecords::new(vec![temp_record()])), &options).unwrap();
    assert_eq!(outcome.document.header.version, "1.3");
    assert_eq!(outcome.document.header.author, "Physics QA");
}
