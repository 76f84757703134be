use anyhow::{Context, Result};
use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use trackit_cli::types::ExportReport;

pub fn print_summary(report: &ExportReport) {
    println!("Source: {}", report.folder.display());
    println!("Export: {}", report.base_name);
    println!("Radiation unit: {}", report.machine_id);
    println!("Author: {}  Software: {}", report.author, report.source);
    if let Some(path) = &report.xml {
        println!("XML: {}", path.display());
    }
    if let Some(path) = &report.log {
        println!("Log: {}", path.display());
    }

    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Measuring device"),
        header_cell("Analyze values"),
        header_cell("Meas values"),
    ]);
    apply_summary_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    align_column(&mut table, 2, CellAlignment::Right);

    let mut total_analyze = 0usize;
    for device in &report.devices {
        total_analyze += device.analyze_values;
        table.add_row(vec![
            Cell::new(&device.device)
                .fg(Color::Blue)
                .add_attribute(Attribute::Bold),
            count_cell(device.analyze_values),
            count_cell(device.meas_values),
        ]);
    }
    table.add_row(vec![
        Cell::new("TOTAL")
            .fg(Color::Cyan)
            .add_attribute(Attribute::Bold),
        Cell::new(total_analyze).add_attribute(Attribute::Bold),
        dim_cell("-"),
    ]);
    println!("{table}");

    let parameters = report
        .parameters
        .map_or_else(|| "none provided".to_string(), |count| count.to_string());
    println!(
        "DataTypes: {}  Parameters: {}  Skipped blank records: {}",
        report.data_types, parameters, report.skipped
    );
    if report.xml.is_none() {
        println!("No files written.");
    }
}

pub fn print_json(report: &ExportReport) -> Result<()> {
    let json = serde_json::to_string_pretty(report).context("serialize report")?;
    println!("{json}");
    Ok(())
}

fn apply_summary_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(100);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn count_cell(count: usize) -> Cell {
    if count > 0 {
        Cell::new(count)
    } else {
        dim_cell(count)
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}
