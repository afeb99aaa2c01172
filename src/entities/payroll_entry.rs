//! Payroll entry entity - One employee's payroll for one period.
//!
//! Entries are created and updated only by the payroll engine. The monetary
//! totals are always derived from the entry's lines; they are never edited by
//! hand.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Payroll entry database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "payroll_entries")]
pub struct Model {
    /// Unique identifier for the entry
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Period this entry belongs to
    pub payroll_period_id: i64,
    /// Employee this entry pays
    pub employee_id: i64,
    /// Rendered hours over the period, rounded to 2 decimals
    pub total_hours_worked: f64,
    /// Amount of the BASE line (0 when absent)
    pub base_pay: f64,
    /// Sum of deduction line amounts
    pub total_deductions: f64,
    /// Earnings beyond base pay: max(0, earnings - base)
    pub total_bonuses: f64,
    /// Earnings minus deductions
    pub net_pay: f64,
    /// When totals were last recomputed
    pub calculated_at: DateTimeUtc,
}

/// Defines relationships between PayrollEntry and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each entry belongs to one payroll period
    #[sea_orm(
        belongs_to = "super::payroll_period::Entity",
        from = "Column::PayrollPeriodId",
        to = "super::payroll_period::Column::Id"
    )]
    PayrollPeriod,
    /// Each entry pays one employee
    #[sea_orm(
        belongs_to = "super::employee::Entity",
        from = "Column::EmployeeId",
        to = "super::employee::Column::Id"
    )]
    Employee,
    /// One entry owns many payroll lines
    #[sea_orm(has_many = "super::payroll_line::Entity")]
    PayrollLines,
}

impl Related<super::payroll_period::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::PayrollPeriod.def()
    }
}

impl Related<super::employee::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Employee.def()
    }
}

impl Related<super::payroll_line::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::PayrollLines.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
