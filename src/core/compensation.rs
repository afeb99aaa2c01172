//! Compensation business logic.
//!
//! Read and upsert paths for the per-employee pay structure record consumed by
//! payroll generation.

use crate::{
    entities::{Compensation, compensation},
    errors::{Error, Result},
};
use sea_orm::{ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, Set};

/// Returns the compensation record for an employee, if one exists.
pub async fn compensation_for_employee<C>(
    db: &C,
    employee_id: i64,
) -> Result<Option<compensation::Model>>
where
    C: ConnectionTrait,
{
    Compensation::find()
        .filter(compensation::Column::EmployeeId.eq(employee_id))
        .one(db)
        .await
        .map_err(Into::into)
}

/// Creates or updates the compensation record for an employee.
///
/// There is at most one record per employee; a second upsert overwrites the
/// rate fields of the existing row.
pub async fn upsert_compensation<C>(
    db: &C,
    employee_id: i64,
    is_hourly: bool,
    hourly_rate: Option<f64>,
    fixed_monthly_salary: Option<f64>,
) -> Result<compensation::Model>
where
    C: ConnectionTrait,
{
    for rate in [hourly_rate, fixed_monthly_salary].into_iter().flatten() {
        if !rate.is_finite() || rate < 0.0 {
            return Err(Error::InvalidAmount { amount: rate });
        }
    }

    let existing = compensation_for_employee(db, employee_id).await?;

    match existing {
        Some(current) => {
            let mut row: compensation::ActiveModel = current.into();
            row.is_hourly = Set(is_hourly);
            row.hourly_rate = Set(hourly_rate);
            row.fixed_monthly_salary = Set(fixed_monthly_salary);
            Ok(row.update(db).await?)
        }
        None => {
            let row = compensation::ActiveModel {
                employee_id: Set(employee_id),
                is_hourly: Set(is_hourly),
                hourly_rate: Set(hourly_rate),
                fixed_monthly_salary: Set(fixed_monthly_salary),
                ..Default::default()
            };
            Ok(row.insert(db).await?)
        }
    }
}
