//! Payroll line entity - One itemized earning or deduction on an entry.
//!
//! Auto-generated lines (`is_auto_generated = true`) are fully owned by the
//! engine and replaced on every regeneration. Manual lines are user-entered
//! adjustments; regeneration never touches them and the removal path refuses
//! to delete auto lines.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Payroll line database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "payroll_lines")]
pub struct Model {
    /// Unique identifier for the line
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Entry this line belongs to
    pub payroll_entry_id: i64,
    /// Line code: `"BASE"`, `"LATE"`, `"UNDERTIME"`, `"ABSENT"`, `"OVERTIME"`,
    /// a component code, or `"MANUAL"` for adjustments
    pub code: String,
    /// Human-readable description
    pub description: String,
    /// `"earning"` or `"deduction"`
    pub kind: String,
    /// Unit count the amount was computed from (hours, minutes, or 1)
    pub quantity: f64,
    /// Rate per unit
    pub rate: f64,
    /// Line amount, rounded to 2 decimals
    pub amount: f64,
    /// True when the engine owns and replaces this line on regeneration
    pub is_auto_generated: bool,
    /// Catalog component that produced this line, if any
    pub pay_component_id: Option<i64>,
}

/// Defines relationships between PayrollLine and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each line belongs to one payroll entry
    #[sea_orm(
        belongs_to = "super::payroll_entry::Entity",
        from = "Column::PayrollEntryId",
        to = "super::payroll_entry::Column::Id"
    )]
    PayrollEntry,
    /// A line may reference the component that produced it
    #[sea_orm(
        belongs_to = "super::pay_component::Entity",
        from = "Column::PayComponentId",
        to = "super::pay_component::Column::Id"
    )]
    PayComponent,
}

impl Related<super::payroll_entry::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::PayrollEntry.def()
    }
}

impl Related<super::pay_component::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::PayComponent.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
