//! Multi-project release orchestration

mod orchestrator;
mod report;
mod request;

pub use orchestrator::ReleaseOrchestrator;
pub use report::{FailureKind, FinalRelease, OutcomeEntry, RunReport, RunStatus};
pub use request::{ReleaseRequest, parse_comma_list};
