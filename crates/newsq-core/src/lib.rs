pub mod config;
pub mod logging;

pub mod catalog;
pub mod edition;
pub mod history;
pub mod query;
pub mod recents;
pub mod store;
pub mod summary;
pub mod tables;
