pub mod aggregation;
pub mod resolve;
