//! Penalty settings entity - Singleton row of attendance penalty/bonus rates.
//!
//! Created zero-valued on first access. Payroll generation loads the current
//! row once per run and passes the values into the per-employee computation.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Attendance penalty settings database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "penalty_settings")]
pub struct Model {
    /// Unique identifier (there is only ever one row)
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Deduction per late minute
    pub late_penalty_per_minute: f64,
    /// Deduction per undertime minute
    pub undertime_penalty_per_minute: f64,
    /// Multiplier applied to scheduled hours lost to full-day absences
    pub absence_full_day_multiplier: f64,
    /// Bonus per overtime minute
    pub overtime_bonus_per_minute: f64,
    /// When the settings were last changed
    pub updated_at: DateTimeUtc,
}

/// Defines relationships between PenaltySettings and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
