//! CI step summary and output sinks

mod outputs;
mod report_file;
mod summary;

pub use outputs::StepOutputs;
pub use report_file::{read_report, write_report};
pub use summary::StepSummary;
