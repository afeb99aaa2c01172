//! Payroll period entity - The immutable date range payroll is generated for.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Payroll period database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "payroll_periods")]
pub struct Model {
    /// Unique identifier for the period
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Display name (e.g. "March 1-15")
    pub name: String,
    /// First day of the period (inclusive)
    pub start_date: Date,
    /// Last day of the period (inclusive)
    pub end_date: Date,
    /// When the period was created
    pub created_at: DateTimeUtc,
}

/// Defines relationships between PayrollPeriod and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// One period has many payroll entries
    #[sea_orm(has_many = "super::payroll_entry::Entity")]
    PayrollEntries,
}

impl Related<super::payroll_entry::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::PayrollEntries.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
