pub mod app;
pub mod client;
pub mod config;
pub mod domain;
pub mod storage;
pub mod telemetry;
