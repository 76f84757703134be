//! Output generation for TRACK-IT exports.
//!
//! - [`xml`]: the PTW import document
//! - [`artifacts`]: XML + build log files for one export run

pub mod artifacts;
pub mod common;
pub mod xml;

pub use artifacts::{ExportPaths, OutputLayout, write_artifacts, write_build_log};
pub use common::{ROOT_ELEMENT, ensure_parent_dir, write_text_element};
pub use xml::{render_document, write_document, write_export_xml};
