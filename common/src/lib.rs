// Common library for shared code across the KOS service binaries

pub mod config;
pub mod db;
pub mod errors;
pub mod readiness;
pub mod telemetry;
