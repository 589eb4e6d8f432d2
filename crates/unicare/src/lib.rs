pub mod access;
pub mod config;
pub mod datetime;
pub mod error;
pub mod modules;
pub mod telemetry;
