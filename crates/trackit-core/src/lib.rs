//! TRACK-IT export codec.
//!
//! Converts loosely typed measurement records into the export document tree:
//!
//! - [`normalize`]: legacy comment backfill and boolean coercion policies
//! - [`encode`]: binary packing + base64 for MeasValues
//! - [`readiness`]: run preconditions and the derived measuring-device set
//! - [`builder`]: document assembly and the build log

pub mod builder;
pub mod encode;
pub mod normalize;
pub mod readiness;

pub use builder::{
    BuildOptions, BuildOutcome, DEFAULT_AUTHOR_LABEL, MEASURED_BY, PROTOCOL_VERSION, build_export,
    format_measurement_date,
};
pub use encode::{EncodeError, decode_value, encode_value, pack_value, to_base64_text};
pub use normalize::{
    backfill_comment, coerce_analysis_boolean, coerce_parameter_boolean, normalize_records,
};
pub use readiness::{check_readiness, measuring_devices};
