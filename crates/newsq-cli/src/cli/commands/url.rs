//! `newsq url` – print the search URL without side effects.

use anyhow::Result;
use newsq_core::config::NewsqConfig;
use newsq_core::tables::EditionTables;

use crate::cli::QueryArgs;

pub fn run_url(tables: &EditionTables, cfg: &NewsqConfig, args: &QueryArgs) -> Result<()> {
    let query = args.to_query()?;
    let built = tables.url_builder(cfg.strict_local).build_query(&query);
    println!("{built}");
    Ok(())
}
