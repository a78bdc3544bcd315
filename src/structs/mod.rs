pub mod ai;
pub mod candidate;
pub mod cli;
pub mod config;
pub mod file_analysis;
pub mod file_info;
pub mod vulnerability;
pub mod vulnerability_report;
