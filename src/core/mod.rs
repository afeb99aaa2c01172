//! Core business logic - framework-agnostic attendance and payroll operations.
//!
//! The two engines live here: attendance (clock state, day classification,
//! period summaries) and payroll (generation, fixed-pay application, manual
//! adjustments), plus the read paths and money math they share.

/// Clock in/out, daily attendance classification, summaries, and the admin
/// overview
pub mod attendance;
/// Compensation record reads and upserts
pub mod compensation;
/// Pay component assignment resolution
pub mod component;
/// Pay structure classification, kind enums, and rate evaluation
pub mod pay_structure;
/// Payroll period management, generation, and adjustments
pub mod payroll;
/// Attendance penalty settings singleton
pub mod settings;
