use anyhow::Result;
use clap::Args;
use roster_lib::validation;
use roster_lib::RetryingClient;
use serde::Serialize;
use serde_json::Value;
use tabled::settings::Style;
use tabled::{Table, Tabled};

use super::parse_resource;
use crate::output::{cell_text, print_json, render_rows_csv, OutputFormat};

#[derive(Args)]
pub struct ShowArgs {
    /// Resource the record belongs to (see `roster resources`)
    pub resource: String,

    /// Record identifier
    pub id: String,
}

#[derive(Tabled, Serialize)]
struct FieldRow {
    #[tabled(rename = "Field")]
    field: String,
    #[tabled(rename = "Value")]
    value: String,
}

fn field_rows(record: &Value) -> Vec<FieldRow> {
    match record {
        Value::Object(map) => map
            .iter()
            .map(|(field, value)| FieldRow {
                field: field.clone(),
                value: cell_text(Some(value)),
            })
            .collect(),
        other => vec![FieldRow {
            field: "value".to_string(),
            value: cell_text(Some(other)),
        }],
    }
}

async fn fetch(args: &ShowArgs, client: &RetryingClient) -> Result<Value> {
    let resource = parse_resource(&args.resource)?;
    let id = validation::validate_record_id(&args.id)?;
    let resp = client.get_record::<Value>(resource, &id).await?;
    Ok(resp.data)
}

pub async fn run(args: &ShowArgs, client: &RetryingClient, format: &OutputFormat) -> Result<()> {
    let record = fetch(args, client).await?;
    let rows = field_rows(&record);
    match format {
        OutputFormat::Json => print_json(&record),
        OutputFormat::Markdown => {
            let mut table = Table::new(&rows);
            table.with(Style::markdown());
            println!("{}", table);
        }
        OutputFormat::Csv => print!("{}", render_rows_csv(&rows)?),
        OutputFormat::Table => println!("{}", Table::new(&rows)),
    }
    Ok(())
}
