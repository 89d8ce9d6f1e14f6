//! CLI command handlers, one per file.

mod fetch;
mod resolve;
mod staging_name;

pub use fetch::{run_fetch, FetchArgs};
pub use resolve::run_resolve;
pub use staging_name::run_staging_name;
