//! CLI subcommand implementations.

use anyhow::{anyhow, Result};
use roster_lib::types::Resource;

pub mod list;
pub mod resources;
pub mod show;

fn parse_resource(name: &str) -> Result<Resource> {
    name.parse::<Resource>().map_err(|_| {
        anyhow!(
            "unknown resource '{}'; run `roster resources` to see the available ones",
            name
        )
    })
}
