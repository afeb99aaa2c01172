//! Employee component entity - Assignment of a pay component to an employee.
//!
//! Resolves the many-to-many relation between employees and catalog
//! components, optionally carrying an employee-specific rate override.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Employee component assignment database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "employee_components")]
pub struct Model {
    /// Unique identifier for the assignment
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Employee the component is assigned to
    pub employee_id: i64,
    /// The catalog component being assigned
    pub pay_component_id: i64,
    /// Employee-specific rate; None means use the component's default rate
    pub rate_override: Option<f64>,
    /// Whether this assignment currently contributes to payroll
    pub is_active: bool,
}

/// Defines relationships between EmployeeComponent and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each assignment belongs to one employee
    #[sea_orm(
        belongs_to = "super::employee::Entity",
        from = "Column::EmployeeId",
        to = "super::employee::Column::Id"
    )]
    Employee,
    /// Each assignment references one catalog component
    #[sea_orm(
        belongs_to = "super::pay_component::Entity",
        from = "Column::PayComponentId",
        to = "super::pay_component::Column::Id"
    )]
    PayComponent,
}

impl Related<super::employee::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Employee.def()
    }
}

impl Related<super::pay_component::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::PayComponent.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
