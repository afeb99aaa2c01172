/// Database configuration and connection management
pub mod database;

/// Attendance/payroll tuning loaded from config.toml
pub mod rules;
