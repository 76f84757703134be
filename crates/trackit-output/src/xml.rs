//! TRACK-IT import XML generation.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use anyhow::{Context, Result};
use quick_xml::Writer;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, Event};
use tracing::debug;

use trackit_model::{
    AdminData, AnalyzeValue, DataTypeEntry, ExportDocument, MeasValues, Measurement,
};

use crate::common::{
    ROOT_ELEMENT, XML_ENCODING, XML_STANDALONE, XML_VERSION, ensure_parent_dir,
    write_attributed_text, write_optional_element, write_text_element,
};

/// Serialize a document to `writer` with two-space indentation.
///
/// Returns the inner writer so callers can flush or inspect it.
pub fn write_document<W: Write>(writer: W, document: &ExportDocument) -> Result<W> {
    let mut xml = Writer::new_with_indent(writer, b' ', 2);
    xml.write_event(Event::Decl(BytesDecl::new(
        XML_VERSION,
        Some(XML_ENCODING),
        Some(XML_STANDALONE),
    )))?;

    xml.write_event(Event::Start(BytesStart::new(ROOT_ELEMENT)))?;
    write_text_element(&mut xml, "Version", &document.header.version)?;
    write_text_element(&mut xml, "Author", &document.header.author)?;

    start(&mut xml, "Content")?;

    start(&mut xml, "DataTypes")?;
    for data_type in &document.data_types {
        write_data_type(&mut xml, data_type)?;
    }
    end(&mut xml, "DataTypes")?;

    start(&mut xml, "RadiationUnits")?;
    write_named_entry(
        &mut xml,
        "RadiationUnit",
        &document.radiation_unit.id,
        &document.radiation_unit.name,
    )?;
    end(&mut xml, "RadiationUnits")?;

    start(&mut xml, "MeasuringDevices")?;
    for device in &document.measuring_devices {
        write_named_entry(&mut xml, "MeasuringDevice", &device.id, &device.name)?;
    }
    end(&mut xml, "MeasuringDevices")?;

    start(&mut xml, "MeasuringSoftwares")?;
    write_named_entry(
        &mut xml,
        "MeasuringSoftware",
        &document.measuring_software.id,
        &document.measuring_software.name,
    )?;
    end(&mut xml, "MeasuringSoftwares")?;

    start(&mut xml, "Measurements")?;
    for measurement in &document.measurements {
        write_measurement(&mut xml, measurement)?;
    }
    end(&mut xml, "Measurements")?;

    end(&mut xml, "Content")?;
    xml.write_event(Event::End(BytesEnd::new(ROOT_ELEMENT)))?;
    Ok(xml.into_inner())
}

/// Render a document to an XML string.
pub fn render_document(document: &ExportDocument) -> Result<String> {
    let bytes = write_document(Vec::new(), document)?;
    String::from_utf8(bytes).context("export XML is not valid UTF-8")
}

/// Write a document to `path`, creating parent directories as needed.
pub fn write_export_xml(path: &Path, document: &ExportDocument) -> Result<()> {
    ensure_parent_dir(path)?;
    let file = File::create(path).with_context(|| format!("create {}", path.display()))?;
    let mut writer = write_document(BufWriter::new(file), document)
        .with_context(|| format!("write {}", path.display()))?;
    writer
        .flush()
        .with_context(|| format!("flush {}", path.display()))?;
    debug!(path = %path.display(), "export xml written");
    Ok(())
}

fn start<W: Write>(xml: &mut Writer<W>, name: &str) -> Result<()> {
    xml.write_event(Event::Start(BytesStart::new(name)))?;
    Ok(())
}

fn end<W: Write>(xml: &mut Writer<W>, name: &str) -> Result<()> {
    xml.write_event(Event::End(BytesEnd::new(name)))?;
    Ok(())
}

fn write_named_entry<W: Write>(xml: &mut Writer<W>, tag: &str, id: &str, name: &str) -> Result<()> {
    let mut element = BytesStart::new(tag);
    element.push_attribute(("id", id));
    xml.write_event(Event::Start(element))?;
    write_text_element(xml, "Name", name)?;
    end(xml, tag)
}

fn write_data_type<W: Write>(xml: &mut Writer<W>, data_type: &DataTypeEntry) -> Result<()> {
    let mut element = BytesStart::new("DataType");
    element.push_attribute(("id", data_type.id.as_str()));
    xml.write_event(Event::Start(element))?;
    write_text_element(xml, "Name", &data_type.id)?;
    write_text_element(xml, "ValueType", &data_type.value_type)?;
    write_text_element(xml, "Definition", &data_type.definition)?;
    write_optional_element(xml, "Unit", data_type.unit.as_deref())?;
    end(xml, "DataType")
}

fn write_measurement<W: Write>(xml: &mut Writer<W>, measurement: &Measurement) -> Result<()> {
    let mut element = BytesStart::new("Measurement");
    element.push_attribute(("guid", measurement.guid.as_str()));
    element.push_attribute(("radiation-unit-ref", measurement.radiation_unit_ref.as_str()));
    element.push_attribute((
        "measuring-software-ref",
        measurement.measuring_software_ref.as_str(),
    ));
    element.push_attribute((
        "measuring-device-ref",
        measurement.measuring_device_ref.as_str(),
    ));
    xml.write_event(Event::Start(element))?;

    write_admin_data(xml, &measurement.admin)?;

    start(xml, "AnalyzeData")?;
    for value in &measurement.analyze_values {
        write_analyze_value(xml, value)?;
    }
    end(xml, "AnalyzeData")?;

    start(xml, "MeasData")?;
    for values in &measurement.meas_values {
        write_meas_values(xml, values)?;
    }
    end(xml, "MeasData")?;

    end(xml, "Measurement")
}

fn write_admin_data<W: Write>(xml: &mut Writer<W>, admin: &AdminData) -> Result<()> {
    start(xml, "AdminData")?;
    write_text_element(xml, "Date", &admin.date)?;
    write_optional_element(xml, "Comment", admin.comment.as_deref())?;
    if let Some(parameters) = &admin.parameters {
        start(xml, "Parameters")?;
        for parameter in parameters {
            let mut attributes = vec![
                ("name", parameter.name.as_str()),
                ("valuetype", parameter.value_type.as_str()),
            ];
            if let Some(unit) = parameter.unit.as_deref() {
                attributes.push(("unit", unit));
            }
            write_attributed_text(xml, "Parameter", &attributes, &parameter.value)?;
        }
        end(xml, "Parameters")?;
    }
    end(xml, "AdminData")
}

fn write_analyze_value<W: Write>(xml: &mut Writer<W>, value: &AnalyzeValue) -> Result<()> {
    let mut element = BytesStart::new("AnalyzeValue");
    element.push_attribute(("data-type-ref", value.data_type_ref.as_str()));
    xml.write_event(Event::Start(element))?;
    write_text_element(xml, "Value", &value.value)?;
    write_optional_element(xml, "Comment", value.comment.as_deref())?;
    end(xml, "AnalyzeValue")
}

fn write_meas_values<W: Write>(xml: &mut Writer<W>, values: &MeasValues) -> Result<()> {
    let mut element = BytesStart::new("MeasValues");
    element.push_attribute(("name", values.name.as_str()));
    element.push_attribute(("type", values.value_type.as_str()));
    xml.write_event(Event::Start(element))?;
    match values.unit.as_deref() {
        Some(unit) => write_attributed_text(xml, "Values", &[("unit", unit)], &values.encoded)?,
        None => write_text_element(xml, "Values", &values.encoded)?,
    }
    end(xml, "MeasValues")
}
