pub mod engineer;
pub mod progress_report;
pub mod project;
