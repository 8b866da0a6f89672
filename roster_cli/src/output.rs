use anyhow::Result;
use roster_lib::{PageItem, TableState};
use serde::Serialize;
use serde_json::Value;
use tabled::builder::Builder;
use tabled::settings::Style;
use tabled::Table;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum OutputFormat {
    Table,
    Json,
    Csv,
    Markdown,
}

impl OutputFormat {
    pub fn parse(name: &str) -> Self {
        match name {
            "json" => OutputFormat::Json,
            "csv" => OutputFormat::Csv,
            "markdown" | "md" => OutputFormat::Markdown,
            _ => OutputFormat::Table,
        }
    }
}

// -- Column selection --

/// Columns to print: the requested ones if given, otherwise every top-level
/// key seen across `records`, in order of first appearance.
pub fn select_columns(records: &[&Value], requested: Option<&str>) -> Vec<String> {
    if let Some(requested) = requested {
        return requested
            .split(',')
            .map(str::trim)
            .filter(|c| !c.is_empty())
            .map(str::to_string)
            .collect();
    }
    let mut columns: Vec<String> = Vec::new();
    for record in records {
        if let Value::Object(map) = record {
            for key in map.keys() {
                if !columns.iter().any(|c| c == key) {
                    columns.push(key.clone());
                }
            }
        }
    }
    columns
}

/// Plain text for one cell: strings unquoted, null and missing as blank.
pub fn cell_text(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}

// -- Row builders --

fn build_rows(records: &[&Value], columns: &[String]) -> Vec<Vec<String>> {
    records
        .iter()
        .map(|record| {
            columns
                .iter()
                .map(|column| cell_text(record.get(column)))
                .collect()
        })
        .collect()
}

fn build_table(records: &[&Value], columns: &[String]) -> Table {
    let mut builder = Builder::default();
    builder.push_record(columns.iter().cloned());
    for row in build_rows(records, columns) {
        builder.push_record(row);
    }
    builder.build()
}

// -- Table output --

pub fn render_table(records: &[&Value], columns: &[String]) -> String {
    build_table(records, columns).to_string()
}

// -- Markdown output --

pub fn render_markdown(records: &[&Value], columns: &[String]) -> String {
    let mut table = build_table(records, columns);
    table.with(Style::markdown());
    table.to_string()
}

// -- CSV output --

pub fn render_csv(records: &[&Value], columns: &[String]) -> Result<String> {
    let mut wtr = csv::Writer::from_writer(Vec::new());
    wtr.write_record(columns)?;
    for row in build_rows(records, columns) {
        wtr.write_record(&row)?;
    }
    finish_csv(wtr)
}

/// CSV of typed rows, with the header taken from the field names.
pub fn render_rows_csv<T: Serialize>(rows: &[T]) -> Result<String> {
    let mut wtr = csv::Writer::from_writer(Vec::new());
    for row in rows {
        wtr.serialize(row)?;
    }
    finish_csv(wtr)
}

fn finish_csv(wtr: csv::Writer<Vec<u8>>) -> Result<String> {
    let bytes = wtr
        .into_inner()
        .map_err(|e| anyhow::anyhow!("failed to flush CSV output: {}", e.error()))?;
    Ok(String::from_utf8(bytes)?)
}

// -- JSON output --

pub fn print_json<T: Serialize>(data: &T) {
    match serde_json::to_string_pretty(data) {
        Ok(json) => println!("{}", json),
        Err(e) => eprintln!("Failed to serialize to JSON: {}", e),
    }
}

pub fn print_records(records: &[&Value], columns: &[String], format: &OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Table => println!("{}", render_table(records, columns)),
        OutputFormat::Markdown => println!("{}", render_markdown(records, columns)),
        OutputFormat::Csv => print!("{}", render_csv(records, columns)?),
        OutputFormat::Json => print_json(&records),
    }
    Ok(())
}

// -- Pagination footer --

/// `1 … 8 9 [10] 11 12 … 20`, with the current page bracketed.
pub fn format_page_controls(items: impl Iterator<Item = PageItem>, current: i64) -> String {
    items
        .map(|item| match item {
            PageItem::Page(page) if page == current => format!("[{}]", page),
            other => other.to_string(),
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// `Showing 11-20 of 95 sisters (page 2/10)`.
pub fn format_summary(state: &TableState, noun: &str) -> String {
    format!(
        "Showing {}-{} of {} {} (page {}/{})",
        state.range_start(),
        state.range_end(),
        state.total_items(),
        noun,
        state.current_page(),
        state.total_pages()
    )
}
