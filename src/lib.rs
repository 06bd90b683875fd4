pub mod config;
pub mod output;
pub mod samples;
pub mod scoring;
