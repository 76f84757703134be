//! Tests for trackit-model types.

use trackit_model::{
    BuildLog, DataTypeRecord, ExportError, ExportInfo, ExportRecords, ExportRequest,
    MeasurementValueRecord, ParameterRecord, RecordValue, ValueKind, ValueType,
};

#[test]
fn measurement_record_rejects_unsupported_type() {
    let err = MeasurementValueRecord::new("CHAMBER", "Modality", "FC65").unwrap_err();
    match err {
        ExportError::UnsupportedValueType { id, value_type } => {
            assert_eq!(id, "CHAMBER");
            assert_eq!(value_type, "Modality");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn measurement_record_accepts_encodable_types() {
    for declared in ["String", "double", "LONG", "Boolean"] {
        let record = MeasurementValueRecord::new("X", declared, "1").expect("encodable");
        assert!(record.value_type.is_encodable());
        assert_eq!(record.value_type.as_str(), declared);
    }
}

#[test]
fn data_type_device_ignores_blank() {
    let record = DataTypeRecord::new("TEMP", "Double", "20.5").with_measuring_device("");
    assert_eq!(record.device(), None);

    let record = record.with_measuring_device("DEV1");
    assert_eq!(record.device(), Some("DEV1"));
}

#[test]
fn value_type_serializes_as_declared_text() {
    let value_type = ValueType::new("Double");
    let json = serde_json::to_string(&value_type).expect("serialize value type");
    assert_eq!(json, "\"Double\"");

    let round: ValueType = serde_json::from_str("\"boolean\"").expect("deserialize value type");
    assert_eq!(round.kind(), ValueKind::Boolean);
    assert_eq!(round.as_str(), "boolean");
}

#[test]
fn request_serializes() {
    let records = ExportRecords::new(vec![
        DataTypeRecord::new("TEMP", "Double", "20.5").with_measuring_device("DEV1"),
    ])
    .with_parameters(vec![ParameterRecord::new("Energy", "String", "6MV").with_unit("MV")]);
    let request = ExportRequest::new(records, ExportInfo::new("A Tester", "Template"), "LINAC1")
        .with_base_name("fixed");

    let json = serde_json::to_string(&request).expect("serialize request");
    let round: ExportRequest = serde_json::from_str(&json).expect("deserialize request");
    assert_eq!(round, request);
}

#[test]
fn build_log_serializes_as_list() {
    let mut log = BuildLog::new();
    log.push("Processing DataTypes...");
    let json = serde_json::to_string(&log).expect("serialize log");
    assert_eq!(json, "[\"Processing DataTypes...\"]");
}

#[test]
fn record_value_conversions() {
    assert_eq!(RecordValue::from("x"), RecordValue::Text("x".to_string()));
    assert_eq!(RecordValue::from(2_i64), RecordValue::Integer(2));
    assert_eq!(RecordValue::from(true).literal(), "True");
}
