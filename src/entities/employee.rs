//! Employee entity - Slim read model for the people payroll is computed for.
//!
//! Employee management (profiles, accounts, roles) lives outside this engine;
//! only the fields the engine reads are stored here: the display name used to
//! order payroll output and the active flag used by the attendance overview.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Employee database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "employees")]
pub struct Model {
    /// Unique identifier for the employee
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Display name used to order payroll entries and overview rows
    pub full_name: String,
    /// Whether the employee is currently active
    pub is_active: bool,
}

/// Defines relationships between Employee and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// One employee has many scheduled shifts
    #[sea_orm(has_many = "super::shift::Entity")]
    Shifts,
    /// One employee has many time logs
    #[sea_orm(has_many = "super::time_log::Entity")]
    TimeLogs,
    /// One employee has many payroll entries (one per period)
    #[sea_orm(has_many = "super::payroll_entry::Entity")]
    PayrollEntries,
}

impl Related<super::shift::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Shifts.def()
    }
}

impl Related<super::time_log::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::TimeLogs.def()
    }
}

impl Related<super::payroll_entry::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::PayrollEntries.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
