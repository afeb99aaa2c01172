//! Shift entity - A scheduled work interval for an employee.
//!
//! Shifts are created and edited by the scheduling collaborator; the engine
//! reads them to classify attendance and to decide which employees belong to a
//! payroll period.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Shift database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "shifts")]
pub struct Model {
    /// Unique identifier for the shift
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Employee this shift is scheduled for
    pub employee_id: i64,
    /// Scheduled start timestamp
    pub start: DateTimeUtc,
    /// Scheduled end timestamp
    pub end: DateTimeUtc,
    /// Optional group label (e.g. "morning", "front desk")
    pub group_label: Option<String>,
}

/// Defines relationships between Shift and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each shift belongs to one employee
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
