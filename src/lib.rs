// Library for tests and the CLI binary

pub mod aggregator;
pub mod batch;
pub mod config;
pub mod export;
pub mod models;
pub mod record_repo;
pub mod report;
pub mod units;
pub mod version;
