pub mod campaign_runner;
pub mod infra;
pub mod state;
