//! CLI for newsq.

mod commands;
mod open;

use anyhow::Result;
use clap::{Args, Parser, Subcommand, ValueEnum};
use newsq_core::config::{self, NewsqConfig};
use newsq_core::query::{SearchError, SearchQuery};
use newsq_core::store::Store;
use newsq_core::tables::EditionTables;
use std::path::PathBuf;

use commands::{
    run_completions, run_countries, run_history, run_search, run_settings, run_url, SearchOptions,
};

/// Top-level CLI for newsq.
#[derive(Debug, Parser)]
#[command(name = "newsq")]
#[command(about = "newsq: build country and language specific news search URLs", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: CliCommand,
}

/// Terms, edition and optional date bounds of one search.
#[derive(Debug, Clone, Args)]
pub struct QueryArgs {
    /// Search terms. A term containing spaces is searched as an exact phrase.
    #[arg(required = true, value_name = "TERM")]
    pub terms: Vec<String>,

    /// Edition code, e.g. `us`, `jp`, `ca_fr` (see `newsq countries`).
    #[arg(short, long, default_value = "us")]
    pub country: String,

    /// Only results after this date.
    #[arg(long, value_name = "YYYY-MM-DD")]
    pub from: Option<String>,

    /// Only results before this date.
    #[arg(long, value_name = "YYYY-MM-DD")]
    pub to: Option<String>,
}

impl QueryArgs {
    /// Validated query. Country codes are case-insensitive on the command line.
    pub fn to_query(&self) -> Result<SearchQuery, SearchError> {
        SearchQuery::new(
            &self.terms,
            &self.country.trim().to_lowercase(),
            self.from.as_deref(),
            self.to.as_deref(),
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Toggle {
    On,
    Off,
}

impl Toggle {
    pub fn enabled(self) -> bool {
        self == Toggle::On
    }
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// Build the search URL, remember it, and optionally summarize and open it.
    Search {
        #[command(flatten)]
        query: QueryArgs,

        /// Open the URL with the desktop's default browser (xdg-open).
        #[arg(long)]
        open: bool,

        /// Skip the AI summary even if one is configured.
        #[arg(long)]
        no_summary: bool,

        /// Do not record the search in history.
        #[arg(long)]
        no_history: bool,
    },

    /// Print the search URL only (nothing is stored).
    Url {
        #[command(flatten)]
        query: QueryArgs,
    },

    /// List editions grouped by region, or suggest editions matching a filter.
    Countries {
        /// Filter tokens matched against names and codes.
        filter: Option<String>,

        /// Maximum number of suggestions when filtering.
        #[arg(long, default_value = "20", value_name = "N")]
        limit: usize,
    },

    /// Manage search history.
    History {
        #[command(subcommand)]
        action: HistoryCommand,
    },

    /// Show or change settings in config.toml.
    Settings {
        #[command(subcommand)]
        action: SettingsCommand,
    },

    /// Print shell completions.
    Completions {
        /// Target shell.
        shell: clap_complete::Shell,
    },
}

#[derive(Debug, Subcommand)]
pub enum HistoryCommand {
    /// List past searches, newest first.
    List,

    /// Show one search, including its URL and summary.
    Show {
        /// History entry identifier.
        id: i64,
    },

    /// Delete one search.
    Delete {
        /// History entry identifier.
        id: i64,
    },

    /// Delete all searches.
    Clear,

    /// Run a past search again (recorded as a new search).
    Rerun {
        /// History entry identifier.
        id: i64,

        /// Open the URL with xdg-open.
        #[arg(long)]
        open: bool,
    },

    /// Export history as JSON.
    Export {
        /// Output file.
        path: PathBuf,
    },
}

#[derive(Debug, Subcommand)]
pub enum SettingsCommand {
    /// Print the current settings.
    Show,

    /// Store the Gemini API key used for summaries.
    SetApiKey {
        /// API key.
        key: String,
    },

    /// Remove the stored API key.
    ClearApiKey,

    /// Turn AI summaries on or off.
    AiSummaries {
        #[arg(value_enum)]
        state: Toggle,
    },

    /// Turn the strict-local search surface on or off.
    StrictLocal {
        #[arg(value_enum)]
        state: Toggle,
    },
}

/// Open the default store; searches still work without it.
async fn open_store_or_warn() -> Option<Store> {
    match Store::open_default().await {
        Ok(store) => Some(store),
        Err(e) => {
            tracing::warn!("store unavailable, searches will not be remembered: {:#}", e);
            None
        }
    }
}

/// Config for commands that only read it; problems fall back to defaults.
fn read_config() -> NewsqConfig {
    let cfg = config::load_or_default();
    tracing::debug!(
        strict_local = cfg.strict_local,
        ai_summaries = cfg.ai_summaries,
        has_api_key = cfg.gemini_api_key.is_some(),
        "loaded config"
    );
    cfg
}

impl CliCommand {
    pub async fn run_from_args() -> Result<()> {
        let cli = Cli::parse();
        let tables = EditionTables::embedded()?;

        match cli.command {
            CliCommand::Search {
                query,
                open,
                no_summary,
                no_history,
            } => {
                let cfg = read_config();
                let store = open_store_or_warn().await;
                let opts = SearchOptions {
                    open,
                    summary: !no_summary,
                    record: !no_history,
                };
                run_search(&tables, &cfg, store.as_ref(), &query, opts).await?;
            }
            CliCommand::Url { query } => run_url(&tables, &read_config(), &query)?,
            CliCommand::Countries { filter, limit } => {
                let cfg = read_config();
                let store = open_store_or_warn().await;
                run_countries(&tables, &cfg, store.as_ref(), filter.as_deref(), limit).await?;
            }
            CliCommand::History { action } => {
                let store = Store::open_default().await?;
                run_history(&tables, &read_config(), &store, action).await?;
            }
            // Settings writes the file back; its config errors stay fatal.
            CliCommand::Settings { action } => run_settings(config::load_or_init()?, action)?,
            CliCommand::Completions { shell } => run_completions(shell),
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests;
