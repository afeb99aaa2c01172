//! Time log entity - A recorded actual work interval.
//!
//! A log with `clock_out = None` is an open log: the employee is currently
//! clocked in. At most one open log may exist per employee at any time; the
//! clock-in path enforces this inside its transaction.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Time log database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "time_logs")]
pub struct Model {
    /// Unique identifier for the time log
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Employee who clocked in
    pub employee_id: i64,
    /// When the employee clocked in
    pub clock_in: DateTimeUtc,
    /// When the employee clocked out; None while the log is open
    pub clock_out: Option<DateTimeUtc>,
    /// Where the clock action came from (e.g. `"web"`)
    pub source: String,
}

/// Defines relationships between TimeLog and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each time log belongs to one employee
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
