//! Pay component read paths.
//!
//! Catalog CRUD and role-default assignment belong to the external catalog
//! collaborator; the engine only needs to resolve which active components an
//! employee carries and at what rate.

use crate::{
    entities::{EmployeeComponent, PayComponent, employee_component, pay_component},
    errors::Result,
};
use sea_orm::{ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, QueryOrder};

/// An active component assignment resolved against its catalog entry.
#[derive(Debug, Clone)]
pub struct ResolvedComponent {
    /// The assignment row carrying the optional rate override
    pub assignment: employee_component::Model,
    /// The catalog component the assignment points at
    pub component: pay_component::Model,
}

impl ResolvedComponent {
    /// The rate this assignment pays out: the override when present, the
    /// component default otherwise.
    #[must_use]
    pub fn effective_rate(&self) -> f64 {
        self.assignment
            .rate_override
            .unwrap_or(self.component.default_rate)
    }
}

/// Returns the active component assignments for an employee, resolved against
/// active catalog components and ordered by component code.
///
/// Assignments pointing at inactive or missing components are dropped.
pub async fn active_components_for_employee<C>(
    db: &C,
    employee_id: i64,
) -> Result<Vec<ResolvedComponent>>
where
    C: ConnectionTrait,
{
    let pairs = EmployeeComponent::find()
        .filter(employee_component::Column::EmployeeId.eq(employee_id))
        .filter(employee_component::Column::IsActive.eq(true))
        .order_by_asc(employee_component::Column::Id)
        .find_also_related(PayComponent)
        .all(db)
        .await?;

    let mut resolved: Vec<ResolvedComponent> = pairs
        .into_iter()
        .filter_map(|(assignment, component)| {
            component
                .filter(|c| c.is_active)
                .map(|component| ResolvedComponent {
                    assignment,
                    component,
                })
        })
        .collect();

    resolved.sort_by(|a, b| a.component.code.cmp(&b.component.code));
    Ok(resolved)
}

/// Finds a catalog component by its unique ID.
pub async fn component_by_id<C>(db: &C, component_id: i64) -> Result<Option<pay_component::Model>>
where
    C: ConnectionTrait,
{
    PayComponent::find_by_id(component_id)
        .one(db)
        .await
        .map_err(Into::into)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::float_cmp)]
    use super::*;
    use crate::core::pay_structure::{CalcKind, LineKind};
    use crate::test_utils::*;

    #[tokio::test]
    async fn test_resolves_active_assignments_only() -> Result<()> {
        let db = setup_test_db().await?;
        let employee = create_test_employee(&db, "Avery Cole").await?;

        let meal = create_test_component(&db, "MEAL", LineKind::Earning, CalcKind::FixedAmount, 750.0)
            .await?;
        let sss = create_test_component(&db, "SSS", LineKind::Deduction, CalcKind::PercentOfBase, 0.05)
            .await?;

        assign_component(&db, employee.id, meal.id, None, true).await?;
        // Inactive assignment must not resolve
        assign_component(&db, employee.id, sss.id, None, false).await?;

        let resolved = active_components_for_employee(&db, employee.id).await?;
        assert_eq!(resolved.len(), 1);
        assert_eq!(resolved[0].component.code, "MEAL");
        assert_eq!(resolved[0].effective_rate(), 750.0);

        Ok(())
    }

    #[tokio::test]
    async fn test_inactive_component_is_dropped() -> Result<()> {
        let db = setup_test_db().await?;
        let employee = create_test_employee(&db, "Avery Cole").await?;

        let stale =
            create_custom_component(&db, "OLD", "Old allowance", LineKind::Earning, CalcKind::FixedAmount, 100.0, false)
                .await?;
        assign_component(&db, employee.id, stale.id, None, true).await?;

        let resolved = active_components_for_employee(&db, employee.id).await?;
        assert!(resolved.is_empty());

        Ok(())
    }

    #[tokio::test]
    async fn test_override_beats_default_rate() -> Result<()> {
        let db = setup_test_db().await?;
        let employee = create_test_employee(&db, "Avery Cole").await?;

        let meal = create_test_component(&db, "MEAL", LineKind::Earning, CalcKind::FixedAmount, 750.0)
            .await?;
        assign_component(&db, employee.id, meal.id, Some(900.0), true).await?;

        let resolved = active_components_for_employee(&db, employee.id).await?;
        assert_eq!(resolved[0].effective_rate(), 900.0);

        Ok(())
    }

    #[tokio::test]
    async fn test_component_by_id() -> Result<()> {
        let db = setup_test_db().await?;
        let meal = create_test_component(&db, "MEAL", LineKind::Earning, CalcKind::FixedAmount, 750.0)
            .await?;

        assert!(component_by_id(&db, meal.id).await?.is_some());
        assert!(component_by_id(&db, 999).await?.is_none());

        Ok(())
    }
}
