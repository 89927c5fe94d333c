pub mod aggregator;
pub mod fetcher;
pub mod parser;
pub mod resolver;
pub mod sink;
pub mod types;
pub mod utils;

pub use aggregator::aggregate_report;
pub use fetcher::Fetcher;
pub use sink::{render_report, JsonSink, PlainTextSink, ReportSink};
pub use types::*;
