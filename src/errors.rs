//! Unified error types for the attendance and payroll engine.
//!
//! Business-rule failures are modeled as named variants so callers can tell an
//! invalid request apart from a state conflict or a missing record. Attendance
//! computation itself never produces these; missing data degrades to
//! empty/zero results there.

use thiserror::Error;

/// Crate-wide error type.
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration error (bad config file, malformed stored value, ...)
    #[error("Configuration error: {message}")]
    Config {
        /// Description of what went wrong
        message: String,
    },

    /// Underlying database failure
    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    /// An adjustment amount that is zero, negative, or not finite
    #[error("Invalid amount: {amount}")]
    InvalidAmount {
        /// The rejected amount
        amount: f64,
    },

    /// A required label was empty or whitespace
    #[error("Label must not be empty")]
    EmptyLabel,

    /// A required name was empty or whitespace
    #[error("Name must not be empty")]
    EmptyName,

    /// A period whose start date falls after its end date
    #[error("Invalid date range: {start} is after {end}")]
    InvalidDateRange {
        /// Requested start date
        start: chrono::NaiveDate,
        /// Requested end date
        end: chrono::NaiveDate,
    },

    /// Clock-in attempted while an open time log already exists
    #[error("Employee {employee_id} is already clocked in")]
    AlreadyClockedIn {
        /// Employee with the open log
        employee_id: i64,
    },

    /// Clock-out attempted with no open time log
    #[error("Employee {employee_id} has no open time log to clock out from")]
    NoOpenLog {
        /// Employee without an open log
        employee_id: i64,
    },

    /// Removal attempted on an engine-owned payroll line
    #[error("Payroll line {line_id} is auto-generated and cannot be removed")]
    CannotRemoveAutoGenerated {
        /// The protected line
        line_id: i64,
    },

    /// Unknown employee id
    #[error("Employee {id} not found")]
    EmployeeNotFound {
        /// Requested employee id
        id: i64,
    },

    /// Unknown payroll period id
    #[error("Payroll period {id} not found")]
    PeriodNotFound {
        /// Requested period id
        id: i64,
    },

    /// Unknown payroll entry id
    #[error("Payroll entry {id} not found")]
    EntryNotFound {
        /// Requested entry id
        id: i64,
    },

    /// Unknown payroll line id
    #[error("Payroll line {id} not found")]
    LineNotFound {
        /// Requested line id
        id: i64,
    },
}

/// Convenience `Result` type
pub type Result<T> = std::result::Result<T, Error>;
