//! Property tests for MeasValues encoding.

use proptest::prelude::*;

use trackit_core::{decode_value, encode_value};
use trackit_model::{RecordValue, ValueType};

proptest! {
    #[test]
    fn double_round_trips_bit_for_bit(value in any::<f64>().prop_filter("finite", |v| v.is_finite())) {
        let double = ValueType::new("Double");
        let encoded = encode_value(&RecordValue::Number(value), &double).unwrap();
        match decode_value(&encoded, &double).unwrap() {
            RecordValue::Number(decoded) => prop_assert_eq!(decoded.to_bits(), value.to_bits()),
            other => prop_assert!(false, "decoded to {:?}", other),
        }
    }

    #[test]
    fn long_round_trips(value in any::<i64>()) {
        let long = ValueType::new("Long");
        let encoded = encode_value(&RecordValue::Integer(value), &long).unwrap();
        prop_assert_eq!(decode_value(&encoded, &long).unwrap(), RecordValue::Integer(value));
    }

    #[test]
    fn encoded_text_is_ascii(text in ".*") {
        let string = ValueType::new("String");
        let encoded = encode_value(&RecordValue::Text(text), &string).unwrap();
        prop_assert!(encoded.is_ascii());
        prop_assert_eq!(encoded.len() % 4, 0);
    }
}
