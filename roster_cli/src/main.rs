mod commands;
mod output;

use anyhow::Result;
use clap::{Parser, Subcommand};
use roster_lib::{Config, RetryingClient};

use crate::output::OutputFormat;

#[derive(Parser)]
#[command(name = "roster")]
#[command(about = "Browse congregation membership records from the console API")]
struct Cli {
    /// Output format: table, json, csv or markdown
    #[arg(long, default_value = "table", global = true)]
    output: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List one page of a resource
    List(commands::list::ListArgs),
    /// Show one record of a resource by id
    Show(commands::show::ShowArgs),
    /// Show the resources that can be listed
    Resources,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive("roster=info".parse()?),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let format = OutputFormat::parse(&cli.output);

    let config = Config::from_env();
    tracing::debug!("using API at {}", config.api_url);

    match &cli.command {
        Commands::List(args) => {
            let client = RetryingClient::new(&config);
            commands::list::run(args, &client, &config, &format).await?
        }
        Commands::Show(args) => {
            let client = RetryingClient::new(&config);
            commands::show::run(args, &client, &format).await?
        }
        Commands::Resources => commands::resources::run(&format)?,
    }

    Ok(())
}
