//! CLI command handlers, one file per command.

mod completions;
mod countries;
mod history;
mod search;
mod settings;
mod url;

pub use completions::run_completions;
pub use countries::run_countries;
pub use history::run_history;
pub use search::{run_search, SearchOptions};
pub use settings::run_settings;
pub use url::run_url;
