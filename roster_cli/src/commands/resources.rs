use anyhow::Result;
use roster_lib::types::Resource;
use serde::Serialize;
use tabled::settings::Style;
use tabled::{Table, Tabled};

use crate::output::{print_json, render_rows_csv, OutputFormat};

#[derive(Tabled, Serialize)]
struct ResourceRow {
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Endpoint")]
    endpoint: &'static str,
}

fn rows() -> Vec<ResourceRow> {
    Resource::ALL
        .iter()
        .map(|r| ResourceRow {
            name: r.to_string(),
            endpoint: r.path(),
        })
        .collect()
}

pub fn run(format: &OutputFormat) -> Result<()> {
    let rows = rows();
    match format {
        OutputFormat::Json => print_json(&rows),
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
