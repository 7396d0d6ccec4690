//! `newsq countries [filter]` – list editions by region, or suggest matches.

use anyhow::Result;
use newsq_core::catalog::{Catalog, CountryGroup};
use newsq_core::config::NewsqConfig;
use newsq_core::recents::RecentCountries;
use newsq_core::store::Store;
use newsq_core::tables::EditionTables;

pub async fn run_countries(
    tables: &EditionTables,
    cfg: &NewsqConfig,
    store: Option<&Store>,
    filter: Option<&str>,
    limit: usize,
) -> Result<()> {
    let recents = match store {
        Some(store) => RecentCountries::new(store.clone(), cfg.max_recents)
            .load()
            .await
            .unwrap_or_else(|e| {
                tracing::warn!("could not load recent countries: {:#}", e);
                Vec::new()
            }),
        None => Vec::new(),
    };

    match filter.map(str::trim).filter(|f| !f.is_empty()) {
        Some(filter) => {
            let matches = tables.catalog.suggestions(filter, &recents, limit);
            if matches.is_empty() {
                println!("No countries match '{filter}'.");
            }
            for entry in matches {
                println!("{:<8} {:<28} {}", entry.code, entry.name, entry.region);
            }
        }
        None => {
            for group in listing(&tables.catalog, &recents) {
                print_group(&group);
            }
        }
    }
    Ok(())
}

/// The "Current" group of recent countries (if any) followed by every region.
fn listing(catalog: &Catalog, recents: &[String]) -> Vec<CountryGroup> {
    catalog
        .current_group(recents)
        .into_iter()
        .chain(catalog.groups().iter().cloned())
        .collect()
}

fn print_group(group: &CountryGroup) {
    println!("{}", group.region);
    for entry in &group.countries {
        println!("  {:<8} {}", entry.code, entry.name);
    }
}
