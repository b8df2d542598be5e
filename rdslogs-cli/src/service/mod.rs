//! Service layer
//!
//! Services contain the download logic of the tool. The batch orchestrator
//! lists the log files of an instance through a [`LogSource`](source::LogSource)
//! and fetches them one by one, reporting progress through a
//! [`Logger`](logger::Logger).
//!
//! Sources and loggers are trait-based so the orchestration can be tested
//! without the network.

mod batch;
pub mod error;
mod fetch;
mod logger;
mod source;

pub use batch::{DownloadResult, get_logs};
pub use error::BatchError;
