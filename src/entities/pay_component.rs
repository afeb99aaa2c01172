//! Pay component entity - A reusable, catalog-defined rate rule.
//!
//! Components are owned by the external catalog collaborator; the engine reads
//! them when composing payroll lines. `kind` is `"earning"` or `"deduction"`,
//! `calc_kind` is `"fixed_amount"`, `"percent_of_base"`, or `"per_hour"`;
//! both are matched through the closed enums in `core::pay_structure`.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Pay component database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "pay_components")]
pub struct Model {
    /// Unique identifier for the pay component
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Short stable code used on payroll lines (e.g. "MEAL", "SSS")
    pub code: String,
    /// Human-readable name
    pub name: String,
    /// `"earning"` or `"deduction"`
    pub kind: String,
    /// `"fixed_amount"`, `"percent_of_base"`, or `"per_hour"`
    pub calc_kind: String,
    /// Default rate applied when an assignment carries no override
    pub default_rate: f64,
    /// Whether the component can still be assigned and paid out
    pub is_active: bool,
}

/// Defines relationships between PayComponent and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// One component has many employee assignments
    #[sea_orm(has_many = "super::employee_component::Entity")]
    EmployeeComponents,
    /// One component may have produced many payroll lines
    #[sea_orm(has_many = "super::payroll_line::Entity")]
    PayrollLines,
}

impl Related<super::employee_component::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::EmployeeComponents.def()
    }
}

impl Related<super::payroll_line::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::PayrollLines.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
