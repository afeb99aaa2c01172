//! Compensation entity - An employee's pay structure inputs.
//!
//! One row per employee. Which of the optional rate fields are present
//! determines the pay structure (hourly, fixed, hybrid); see
//! `core::pay_structure`.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Compensation database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "compensations")]
pub struct Model {
    /// Unique identifier for the compensation record
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Employee this compensation belongs to (one record per employee)
    #[sea_orm(unique)]
    pub employee_id: i64,
    /// Whether the employee is paid by the hour even without an explicit rate
    pub is_hourly: bool,
    /// Explicit hourly rate, if any
    pub hourly_rate: Option<f64>,
    /// Fixed monthly salary, if any
    pub fixed_monthly_salary: Option<f64>,
}

/// Defines relationships between Compensation and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each compensation record belongs to one employee
    #[sea_orm(
        belongs_to = "super::employee::Entity",
        from = "Column::EmployeeId",
        to = "super::employee::Column::Id"
    )]
    Employee,
}

impl Related<super::employee::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Employee.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
