pub mod config;
pub mod logging;

pub mod fetch;
pub mod mirror;
pub mod plan;
pub mod pool;
pub mod report;
pub mod resolver;
pub mod staging;
pub mod task;
pub mod url_list;
pub mod url_model;

pub use mirror::mirror_urls;
pub use resolver::{resolve, Rejection, ResolvedTarget};
pub use task::{download, DownloadTask, Outcome, TaskFailure};
