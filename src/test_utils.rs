//! Shared test utilities for `shiftpay`.
//!
//! This module provides common helper functions for setting up test databases
//! and creating test entities with sensible defaults.

#![allow(clippy::unwrap_used)]

use crate::{
    core::pay_structure::{CalcKind, LineKind},
    core::settings::{self, PenaltyRates},
    entities::{
        compensation, employee, employee_component, pay_component, payroll_period,
        penalty_settings, shift, time_log,
    },
    errors::Result,
};
use chrono::{DateTime, NaiveDate, Utc};
use sea_orm::{DatabaseConnection, Set, prelude::*};

/// Creates an in-memory `SQLite` database with all tables initialized.
/// This is the standard setup for all integration tests.
pub async fn setup_test_db() -> Result<DatabaseConnection> {
    let db = sea_orm::Database::connect("sqlite::memory:").await?;
    crate::config::database::create_tables(&db).await?;
    Ok(db)
}

/// Shorthand for a calendar date.
pub fn d(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

/// Shorthand for a UTC timestamp at minute precision.
pub fn dt(year: i32, month: u32, day: u32, hour: u32, minute: u32) -> DateTime<Utc> {
    d(year, month, day).and_hms_opt(hour, minute, 0).unwrap().and_utc()
}

/// Creates an active test employee.
pub async fn create_test_employee(db: &DatabaseConnection, name: &str) -> Result<employee::Model> {
    create_custom_employee(db, name, true).await
}

/// Creates a test employee with an explicit active flag.
pub async fn create_custom_employee(
    db: &DatabaseConnection,
    name: &str,
    is_active: bool,
) -> Result<employee::Model> {
    let row = employee::ActiveModel {
        full_name: Set(name.to_string()),
        is_active: Set(is_active),
        ..Default::default()
    };
    Ok(row.insert(db).await?)
}

/// Creates a scheduled shift for an employee.
pub async fn create_test_shift(
    db: &DatabaseConnection,
    employee_id: i64,
    start: DateTime<Utc>,
    end: DateTime<Utc>,
) -> Result<shift::Model> {
    let row = shift::ActiveModel {
        employee_id: Set(employee_id),
        start: Set(start),
        end: Set(end),
        group_label: Set(None),
        ..Default::default()
    };
    Ok(row.insert(db).await?)
}

/// Creates a time log; pass `None` for `clock_out` to leave it open.
pub async fn create_test_log(
    db: &DatabaseConnection,
    employee_id: i64,
    clock_in: DateTime<Utc>,
    clock_out: Option<DateTime<Utc>>,
) -> Result<time_log::Model> {
    let row = time_log::ActiveModel {
        employee_id: Set(employee_id),
        clock_in: Set(clock_in),
        clock_out: Set(clock_out),
        source: Set("web".to_string()),
        ..Default::default()
    };
    Ok(row.insert(db).await?)
}

/// Creates compensation for an employee paid only by the hour.
pub async fn create_hourly_compensation(
    db: &DatabaseConnection,
    employee_id: i64,
    hourly_rate: f64,
) -> Result<compensation::Model> {
    crate::core::compensation::upsert_compensation(db, employee_id, true, Some(hourly_rate), None)
        .await
}

/// Creates compensation for an employee on a fixed monthly salary.
pub async fn create_fixed_compensation(
    db: &DatabaseConnection,
    employee_id: i64,
    fixed_monthly_salary: f64,
) -> Result<compensation::Model> {
    crate::core::compensation::upsert_compensation(
        db,
        employee_id,
        false,
        None,
        Some(fixed_monthly_salary),
    )
    .await
}

/// Creates an active catalog component with a generated name.
pub async fn create_test_component(
    db: &DatabaseConnection,
    code: &str,
    kind: LineKind,
    calc_kind: CalcKind,
    default_rate: f64,
) -> Result<pay_component::Model> {
    create_custom_component(
        db,
        code,
        &format!("{code} component"),
        kind,
        calc_kind,
        default_rate,
        true,
    )
    .await
}

/// Creates a catalog component with full control over its fields.
pub async fn create_custom_component(
    db: &DatabaseConnection,
    code: &str,
    name: &str,
    kind: LineKind,
    calc_kind: CalcKind,
    default_rate: f64,
    is_active: bool,
) -> Result<pay_component::Model> {
    let row = pay_component::ActiveModel {
        code: Set(code.to_string()),
        name: Set(name.to_string()),
        kind: Set(kind.as_str().to_string()),
        calc_kind: Set(calc_kind.as_str().to_string()),
        default_rate: Set(default_rate),
        is_active: Set(is_active),
        ..Default::default()
    };
    Ok(row.insert(db).await?)
}

/// Assigns a catalog component to an employee.
pub async fn assign_component(
    db: &DatabaseConnection,
    employee_id: i64,
    pay_component_id: i64,
    rate_override: Option<f64>,
    is_active: bool,
) -> Result<employee_component::Model> {
    let row = employee_component::ActiveModel {
        employee_id: Set(employee_id),
        pay_component_id: Set(pay_component_id),
        rate_override: Set(rate_override),
        is_active: Set(is_active),
        ..Default::default()
    };
    Ok(row.insert(db).await?)
}

/// Creates a payroll period through the engine's validated path.
pub async fn create_test_period(
    db: &DatabaseConnection,
    name: &str,
    start: NaiveDate,
    end: NaiveDate,
) -> Result<payroll_period::Model> {
    crate::core::payroll::create_payroll_period(db, name, start, end).await
}

/// Sets the penalty settings used by payroll generation.
pub async fn set_test_penalties(
    db: &DatabaseConnection,
    late: f64,
    undertime: f64,
    absence_multiplier: f64,
    overtime: f64,
) -> Result<penalty_settings::Model> {
    settings::update_settings(
        db,
        PenaltyRates {
            late_penalty_per_minute: late,
            undertime_penalty_per_minute: undertime,
            absence_full_day_multiplier: absence_multiplier,
            overtime_bonus_per_minute: overtime,
        },
    )
    .await
}

/// Schedules a run of identical daily shifts with matching closed logs.
/// Used to stage a clean attendance history.
pub async fn stage_worked_days(
    db: &DatabaseConnection,
    employee_id: i64,
    first_day: NaiveDate,
    days: u32,
    start_hour: u32,
    end_hour: u32,
) -> Result<()> {
    for offset in 0..days {
        let day = first_day + chrono::Days::new(u64::from(offset));
        let start = day.and_hms_opt(start_hour, 0, 0).unwrap().and_utc();
        let end = day.and_hms_opt(end_hour, 0, 0).unwrap().and_utc();
        create_test_shift(db, employee_id, start, end).await?;
        create_test_log(db, employee_id, start, Some(end)).await?;
    }
    Ok(())
}
