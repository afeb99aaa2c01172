//! Entity module - Contains all SeaORM entity definitions for the database.
//! These entities represent the database tables and their relationships.
//! Each entity has a Model struct for data and an Entity struct for operations.

pub mod compensation;
pub mod employee;
pub mod employee_component;
pub mod pay_component;
pub mod payroll_entry;
pub mod payroll_line;
pub mod payroll_period;
pub mod penalty_settings;
pub mod shift;
pub mod time_log;

// Re-export specific types to avoid conflicts
pub use compensation::{Entity as Compensation, Model as CompensationModel};
pub use employee::{Entity as Employee, Model as EmployeeModel};
pub use employee_component::{Entity as EmployeeComponent, Model as EmployeeComponentModel};
pub use pay_component::{Entity as PayComponent, Model as PayComponentModel};
pub use payroll_entry::{Entity as PayrollEntry, Model as PayrollEntryModel};
pub use payroll_line::{Entity as PayrollLine, Model as PayrollLineModel};
pub use payroll_period::{Entity as PayrollPeriod, Model as PayrollPeriodModel};
pub use penalty_settings::{Entity as PenaltySettings, Model as PenaltySettingsModel};
pub use shift::{Entity as Shift, Model as ShiftModel};
pub use time_log::{Entity as TimeLog, Model as TimeLogModel};
