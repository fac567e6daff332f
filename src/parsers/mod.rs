pub mod erpc;
pub mod types;

pub use erpc::Erpc;
pub use types::{Parseable, Record, RecordSeries};
