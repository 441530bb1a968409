pub mod health;
pub mod index;
pub mod metrics;

/// Service name reported by the informational endpoints
pub const SERVICE_NAME: &str = "KOS Glucose Monitoring API";
