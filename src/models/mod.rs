pub mod phase;
pub mod report;
