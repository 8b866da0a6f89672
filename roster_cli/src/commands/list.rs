use anyhow::{bail, Result};
use clap::Args;
use roster_lib::types::Resource;
use roster_lib::validation;
use roster_lib::{
    Column, Columns, Config, FetchOutcome, ListQuery, ListView, LocalTable, Query,
    RetryingClient, TableState,
};
use serde_json::Value;
use tokio::time::Instant;

use super::parse_resource;
use crate::output::{format_page_controls, format_summary, print_records, select_columns, OutputFormat};

/// Most records pulled in one request for `--local`.
const LOCAL_FETCH_LIMIT: i64 = 1000;

#[derive(Args)]
pub struct ListArgs {
    /// Resource to list (see `roster resources`)
    pub resource: String,

    /// Page number
    #[arg(long, default_value = "1")]
    pub page: i64,

    /// Results per page (defaults to ROSTER_PAGE_SIZE)
    #[arg(long)]
    pub page_size: Option<i64>,

    /// Free-text search
    #[arg(long)]
    pub search: Option<String>,

    /// Filter as key=value; repeatable
    #[arg(long = "filter")]
    pub filters: Vec<String>,

    /// Field to sort by
    #[arg(long)]
    pub sort_by: Option<String>,

    /// Sort descending instead of ascending
    #[arg(long, requires = "sort_by")]
    pub desc: bool,

    /// Comma-separated columns to print
    #[arg(long)]
    pub columns: Option<String>,

    /// Fetch everything once and search, filter, sort and page locally
    #[arg(long)]
    pub local: bool,

    /// Most page numbers to show in the footer
    #[arg(long, default_value = "5")]
    pub pages: usize,
}

/// One page of records and the table state it was cut from.
struct Listing {
    resource: Resource,
    rows: Vec<Value>,
    state: TableState,
    /// `--local` saw fewer records than the server holds.
    partial: bool,
}

/// Applies the command line's search, filters and sort to `view`.
fn configure(view: &mut ListView<Value>, args: &ListArgs) -> Result<()> {
    if let Some(ref search) = args.search {
        let sanitized = validation::validate_search(search)?;
        view.on_search_input(&sanitized, Instant::now());
        view.submit_search();
    }

    for filter in &args.filters {
        let (key, value) = validation::parse_filter(filter)?;
        view.state_mut().set_filter(&key, &value);
    }

    if let Some(ref sort_by) = args.sort_by {
        let field = validation::validate_field(sort_by)?;
        let state = view.state_mut();
        state.set_sort_field(&field);
        if args.desc {
            // second click on the same column flips to descending
            state.set_sort_field(&field);
        }
    }
    Ok(())
}

async fn load(args: &ListArgs, client: &RetryingClient, config: &Config) -> Result<Listing> {
    let resource = parse_resource(&args.resource)?;
    let page_size = validation::validate_page_size(args.page_size.unwrap_or(config.page_size))?;

    let mut view: ListView<Value> = ListView::new(page_size, config.search_debounce);
    configure(&mut view, args)?;

    if args.local {
        return load_local(resource, args, client, view.state().clone()).await;
    }

    let source = client.source(resource);
    // the total is unknown until the first response, so the requested page
    // can only be reached on a second round trip
    if view.refresh(&source).await == FetchOutcome::Failed {
        bail!(fetch_error(&view));
    }
    view.state_mut().go_to_page(args.page);
    if view.pending_query().is_some() && view.refresh(&source).await == FetchOutcome::Failed {
        bail!(fetch_error(&view));
    }

    Ok(Listing {
        resource,
        rows: view.rows().to_vec(),
        state: view.state().clone(),
        partial: false,
    })
}

fn fetch_error(view: &ListView<Value>) -> String {
    view.error().unwrap_or("request failed").to_string()
}

async fn load_local(
    resource: Resource,
    args: &ListArgs,
    client: &RetryingClient,
    mut state: TableState,
) -> Result<Listing> {
    let query = ListQuery::default().with_page_size(LOCAL_FETCH_LIMIT);
    let resp = client.list::<Value>(resource, &query).await?;
    let partial = resp.total_items() > resp.data.len() as i64;
    if partial {
        tracing::warn!(
            "only {} of {} {} fetched; local results are partial",
            resp.data.len(),
            resp.total_items(),
            resource
        );
    }

    let all: Vec<&Value> = resp.data.iter().collect();
    let columns = select_columns(&all, None)
        .iter()
        .fold(Columns::new(), |cols, key| {
            cols.with(Column::json(key).searchable().filterable())
        });
    let table = LocalTable::new(columns);

    let mut visible = table.apply(&mut state, &resp.data);
    if state.go_to_page(args.page) {
        visible = table.apply(&mut state, &resp.data);
    }
    let rows = visible.into_iter().cloned().collect();

    Ok(Listing {
        resource,
        rows,
        state,
        partial,
    })
}

pub async fn run(
    args: &ListArgs,
    client: &RetryingClient,
    config: &Config,
    format: &OutputFormat,
) -> Result<()> {
    let listing = load(args, client, config).await?;

    let records: Vec<&Value> = listing.rows.iter().collect();
    let columns = select_columns(&records, args.columns.as_deref());
    print_records(&records, &columns, format)?;

    let state = &listing.state;
    eprintln!("{}", format_summary(state, &listing.resource.to_string()));
    if listing.partial {
        eprintln!("(partial: more records exist than one local fetch returns)");
    }
    if state.total_pages() > 1 {
        eprintln!(
            "{}",
            format_page_controls(state.visible_page_numbers(args.pages), state.current_page())
        );
    }
    Ok(())
}
