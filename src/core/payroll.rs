//! Payroll business logic - period management, generation, and adjustments.
//!
//! Generation is deterministic and idempotent: auto-generated lines are fully
//! replaced on every run from the same inputs, manual adjustment lines are
//! never touched, and entry totals are always recomputed from the line set.
//! Each generation run executes inside one database transaction so a mid-run
//! failure leaves the previous entry state intact.

use crate::{
    config::rules::AttendanceRules,
    core::{
        attendance::{self, AttendancePeriodSummary, day_end_exclusive, day_start},
        compensation::compensation_for_employee,
        component::{self, ResolvedComponent},
        pay_structure::{
            CalcKind, LineKind, PayStructure, derive_hourly_rate, evaluate_component_amount,
            round2,
        },
        settings,
    },
    entities::{
        Employee, PayrollEntry, PayrollLine, PayrollPeriod, Shift, TimeLog, compensation,
        employee, payroll_entry, payroll_line, payroll_period, penalty_settings, shift, time_log,
    },
    errors::{Error, Result},
};
use chrono::{NaiveDate, Utc};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait, ModelTrait,
    QueryFilter, QueryOrder, Set, TransactionTrait,
};
use std::collections::{BTreeSet, HashMap};
use tracing::info;

/// Code of the auto-generated base-pay line.
pub const BASE_CODE: &str = "BASE";
/// Code of the late-penalty deduction line.
pub const LATE_CODE: &str = "LATE";
/// Code of the undertime-penalty deduction line.
pub const UNDERTIME_CODE: &str = "UNDERTIME";
/// Code of the absence deduction line.
pub const ABSENT_CODE: &str = "ABSENT";
/// Code of the overtime bonus line.
pub const OVERTIME_CODE: &str = "OVERTIME";
/// Code of manually added adjustment lines.
pub const MANUAL_CODE: &str = "MANUAL";

/// A payroll entry together with its ordered lines.
#[derive(Debug, Clone)]
pub struct EntryWithLines {
    /// The entry aggregate root
    pub entry: payroll_entry::Model,
    /// Its lines, in insertion order
    pub lines: Vec<payroll_line::Model>,
}

/// A line about to be inserted on an entry.
#[derive(Debug, Clone)]
struct NewLine {
    code: String,
    description: String,
    kind: LineKind,
    quantity: f64,
    rate: f64,
    amount: f64,
    auto: bool,
    pay_component_id: Option<i64>,
}

/// Creates a payroll period after validating its name and date range.
///
/// # Errors
/// Fails with [`Error::EmptyName`] for a blank name and
/// [`Error::InvalidDateRange`] when the start date falls after the end date.
pub async fn create_payroll_period<C>(
    db: &C,
    name: &str,
    start: NaiveDate,
    end: NaiveDate,
) -> Result<payroll_period::Model>
where
    C: ConnectionTrait,
{
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(Error::EmptyName);
    }
    if start > end {
        return Err(Error::InvalidDateRange { start, end });
    }

    let row = payroll_period::ActiveModel {
        name: Set(trimmed.to_string()),
        start_date: Set(start),
        end_date: Set(end),
        created_at: Set(Utc::now()),
        ..Default::default()
    };

    Ok(row.insert(db).await?)
}

/// Finds a payroll period by id.
pub async fn period_by_id<C>(db: &C, period_id: i64) -> Result<Option<payroll_period::Model>>
where
    C: ConnectionTrait,
{
    PayrollPeriod::find_by_id(period_id)
        .one(db)
        .await
        .map_err(Into::into)
}

/// Generates (or regenerates) payroll for every employee with activity in the
/// period.
///
/// The active employee set is the union of employees with a clock-in inside
/// the period and employees with a shift overlapping it. Entries of employees
/// no longer in that set are deleted. For each active employee the period's
/// attendance summary is folded into auto-generated lines (base pay,
/// attendance penalties and bonuses, recurring components); existing auto
/// lines are replaced wholesale while manual adjustments are preserved. The
/// whole run is one transaction.
pub async fn generate_payroll_for_period(
    db: &DatabaseConnection,
    period_id: i64,
    rules: &AttendanceRules,
) -> Result<Vec<EntryWithLines>> {
    let period = period_by_id(db, period_id)
        .await?
        .ok_or(Error::PeriodNotFound { id: period_id })?;

    let span_start = day_start(period.start_date);
    let span_end = day_end_exclusive(period.end_date);

    let txn = db.begin().await?;

    let penalty = settings::get_or_create_settings(&txn).await?;

    let period_logs = TimeLog::find()
        .filter(time_log::Column::ClockIn.gte(span_start))
        .filter(time_log::Column::ClockIn.lt(span_end))
        .all(&txn)
        .await?;
    let overlapping_shifts = Shift::find()
        .filter(shift::Column::Start.lt(span_end))
        .filter(shift::Column::End.gt(span_start))
        .all(&txn)
        .await?;

    let mut active_ids: BTreeSet<i64> = period_logs.iter().map(|l| l.employee_id).collect();
    active_ids.extend(overlapping_shifts.iter().map(|s| s.employee_id));

    // Activity attributed to an unknown employee id is ignored
    let known_ids: BTreeSet<i64> = Employee::find()
        .filter(employee::Column::Id.is_in(active_ids.iter().copied().collect::<Vec<i64>>()))
        .all(&txn)
        .await?
        .into_iter()
        .map(|e| e.id)
        .collect();

    let existing = PayrollEntry::find()
        .filter(payroll_entry::Column::PayrollPeriodId.eq(period_id))
        .all(&txn)
        .await?;

    let mut entries_by_employee: HashMap<i64, payroll_entry::Model> = HashMap::new();
    for entry in existing {
        if known_ids.contains(&entry.employee_id) {
            entries_by_employee.insert(entry.employee_id, entry);
        } else {
            delete_entry_with_lines(&txn, entry).await?;
        }
    }

    let mut generated = 0usize;

    for &employee_id in &known_ids {
        let summary = attendance::summary_for_employee(
            &txn,
            employee_id,
            period.start_date,
            period.end_date,
            rules,
        )
        .await?;

        let total_hours = round2(summary.total_rendered_hours());
        let comp = compensation_for_employee(&txn, employee_id).await?;
        let hourly_rate = derive_hourly_rate(comp.as_ref(), rules);
        let base_pay = round2(hourly_rate * total_hours);
        let components = component::active_components_for_employee(&txn, employee_id).await?;

        // No attendance impact and nothing recurring to pay: leave no entry
        if !summary.has_attendance_impact() && components.is_empty() {
            if let Some(stale) = entries_by_employee.remove(&employee_id) {
                delete_entry_with_lines(&txn, stale).await?;
            }
            continue;
        }

        let entry = match entries_by_employee.remove(&employee_id) {
            Some(existing_entry) => {
                let mut row: payroll_entry::ActiveModel = existing_entry.into();
                row.total_hours_worked = Set(total_hours);
                row.base_pay = Set(base_pay);
                row.calculated_at = Set(Utc::now());
                row.update(&txn).await?
            }
            None => {
                let row = payroll_entry::ActiveModel {
                    payroll_period_id: Set(period_id),
                    employee_id: Set(employee_id),
                    total_hours_worked: Set(total_hours),
                    base_pay: Set(base_pay),
                    total_deductions: Set(0.0),
                    total_bonuses: Set(0.0),
                    net_pay: Set(base_pay),
                    calculated_at: Set(Utc::now()),
                    ..Default::default()
                };
                row.insert(&txn).await?
            }
        };

        // Replace every auto-generated line; manual lines stay untouched
        PayrollLine::delete_many()
            .filter(payroll_line::Column::PayrollEntryId.eq(entry.id))
            .filter(payroll_line::Column::IsAutoGenerated.eq(true))
            .exec(&txn)
            .await?;

        let lines = build_auto_lines(
            &summary,
            hourly_rate,
            total_hours,
            base_pay,
            &penalty,
            &components,
        )?;
        for line in lines {
            insert_line(&txn, entry.id, line).await?;
        }

        recalculate_entry_totals(&txn, entry.id).await?;
        generated += 1;
    }

    txn.commit().await?;

    info!(period_id, entries = generated, "payroll generated");
    entries_for_period(db, period_id).await
}

/// Folds one employee's period summary into the auto-generated line set.
///
/// The BASE line is always present; attendance-derived lines appear only when
/// both the minute/hour count and the configured rate are positive; component
/// lines mirror the catalog kind and skip non-positive amounts.
#[allow(clippy::cast_precision_loss)]
fn build_auto_lines(
    summary: &AttendancePeriodSummary,
    hourly_rate: f64,
    total_hours: f64,
    base_pay: f64,
    penalty: &penalty_settings::Model,
    components: &[ResolvedComponent],
) -> Result<Vec<NewLine>> {
    let mut lines = vec![NewLine {
        code: BASE_CODE.to_string(),
        description: "Base pay".to_string(),
        kind: LineKind::Earning,
        quantity: total_hours,
        rate: hourly_rate,
        amount: base_pay,
        auto: true,
        pay_component_id: None,
    }];

    if summary.late_minutes > 0 && penalty.late_penalty_per_minute > 0.0 {
        lines.push(NewLine {
            code: LATE_CODE.to_string(),
            description: "Late penalty".to_string(),
            kind: LineKind::Deduction,
            quantity: summary.late_minutes as f64,
            rate: penalty.late_penalty_per_minute,
            amount: round2(summary.late_minutes as f64 * penalty.late_penalty_per_minute),
            auto: true,
            pay_component_id: None,
        });
    }

    if summary.undertime_minutes > 0 && penalty.undertime_penalty_per_minute > 0.0 {
        lines.push(NewLine {
            code: UNDERTIME_CODE.to_string(),
            description: "Undertime penalty".to_string(),
            kind: LineKind::Deduction,
            quantity: summary.undertime_minutes as f64,
            rate: penalty.undertime_penalty_per_minute,
            amount: round2(summary.undertime_minutes as f64 * penalty.undertime_penalty_per_minute),
            auto: true,
            pay_component_id: None,
        });
    }

    if summary.absent_scheduled_hours > 0.0
        && penalty.absence_full_day_multiplier > 0.0
        && hourly_rate > 0.0
    {
        lines.push(NewLine {
            code: ABSENT_CODE.to_string(),
            description: "Absence deduction".to_string(),
            kind: LineKind::Deduction,
            quantity: summary.absent_scheduled_hours,
            rate: hourly_rate * penalty.absence_full_day_multiplier,
            amount: round2(
                summary.absent_scheduled_hours
                    * hourly_rate
                    * penalty.absence_full_day_multiplier,
            ),
            auto: true,
            pay_component_id: None,
        });
    }

    if summary.overtime_minutes > 0 && penalty.overtime_bonus_per_minute > 0.0 {
        lines.push(NewLine {
            code: OVERTIME_CODE.to_string(),
            description: "Overtime bonus".to_string(),
            kind: LineKind::Earning,
            quantity: summary.overtime_minutes as f64,
            rate: penalty.overtime_bonus_per_minute,
            amount: round2(summary.overtime_minutes as f64 * penalty.overtime_bonus_per_minute),
            auto: true,
            pay_component_id: None,
        });
    }

    for resolved in components {
        let calc_kind = CalcKind::parse(&resolved.component.calc_kind).ok_or_else(|| {
            Error::Config {
                message: format!(
                    "Unknown calculation kind '{}' on component {}",
                    resolved.component.calc_kind, resolved.component.code
                ),
            }
        })?;
        let kind = LineKind::parse(&resolved.component.kind).ok_or_else(|| Error::Config {
            message: format!(
                "Unknown kind '{}' on component {}",
                resolved.component.kind, resolved.component.code
            ),
        })?;

        let rate = resolved.effective_rate();
        let (quantity, amount) = evaluate_component_amount(calc_kind, rate, base_pay, total_hours);
        if amount <= 0.0 {
            continue;
        }

        lines.push(NewLine {
            code: resolved.component.code.clone(),
            description: resolved.component.name.clone(),
            kind,
            quantity,
            rate,
            amount,
            auto: true,
            pay_component_id: Some(resolved.component.id),
        });
    }

    Ok(lines)
}

async fn insert_line<C>(db: &C, entry_id: i64, line: NewLine) -> Result<payroll_line::Model>
where
    C: ConnectionTrait,
{
    let row = payroll_line::ActiveModel {
        payroll_entry_id: Set(entry_id),
        code: Set(line.code),
        description: Set(line.description),
        kind: Set(line.kind.as_str().to_string()),
        quantity: Set(line.quantity),
        rate: Set(line.rate),
        amount: Set(line.amount),
        is_auto_generated: Set(line.auto),
        pay_component_id: Set(line.pay_component_id),
        ..Default::default()
    };
    Ok(row.insert(db).await?)
}

async fn delete_entry_with_lines<C>(db: &C, entry: payroll_entry::Model) -> Result<()>
where
    C: ConnectionTrait,
{
    PayrollLine::delete_many()
        .filter(payroll_line::Column::PayrollEntryId.eq(entry.id))
        .exec(db)
        .await?;
    entry.delete(db).await?;
    Ok(())
}

/// Recomputes an entry's totals from its current line set.
///
/// Earnings and deductions are summed per line kind, base pay is read off the
/// BASE line (0 when absent), bonuses are earnings beyond base, and net pay is
/// earnings minus deductions; everything rounded to 2 decimals.
pub async fn recalculate_entry_totals<C>(db: &C, entry_id: i64) -> Result<payroll_entry::Model>
where
    C: ConnectionTrait,
{
    let entry = PayrollEntry::find_by_id(entry_id)
        .one(db)
        .await?
        .ok_or(Error::EntryNotFound { id: entry_id })?;

    let lines = PayrollLine::find()
        .filter(payroll_line::Column::PayrollEntryId.eq(entry_id))
        .all(db)
        .await?;

    let mut earnings = 0.0;
    let mut deductions = 0.0;
    let mut base_pay = 0.0;

    for line in &lines {
        match LineKind::parse(&line.kind) {
            Some(LineKind::Earning) => earnings += line.amount,
            Some(LineKind::Deduction) => deductions += line.amount,
            None => {}
        }
        if line.code == BASE_CODE && line.is_auto_generated {
            base_pay = line.amount;
        }
    }

    let earnings = round2(earnings);
    let deductions = round2(deductions);
    let bonuses = round2((earnings - base_pay).max(0.0));
    let net = round2(earnings - deductions);

    let mut row: payroll_entry::ActiveModel = entry.into();
    row.base_pay = Set(round2(base_pay));
    row.total_deductions = Set(deductions);
    row.total_bonuses = Set(bonuses);
    row.net_pay = Set(net);
    row.calculated_at = Set(Utc::now());

    Ok(row.update(db).await?)
}

fn base_pay_with_fixed(
    comp: &compensation::Model,
    structure: PayStructure,
    total_hours: f64,
) -> f64 {
    let hourly = comp.hourly_rate.unwrap_or(0.0);
    let fixed = comp.fixed_monthly_salary.unwrap_or(0.0);

    match structure {
        PayStructure::Fixed => round2(fixed),
        PayStructure::Hybrid => round2(total_hours * hourly + fixed),
        PayStructure::Hourly | PayStructure::Unknown => round2(total_hours * hourly),
    }
}

/// Rewrites base pay to include the fixed-salary component for entries whose
/// employee is on a fixed or hybrid structure, per the corresponding flag.
/// Hourly-only structures are never touched.
pub async fn apply_fixed_pay(
    db: &DatabaseConnection,
    period_id: i64,
    apply_to_fixed: bool,
    apply_to_hybrid: bool,
) -> Result<Vec<EntryWithLines>> {
    period_by_id(db, period_id)
        .await?
        .ok_or(Error::PeriodNotFound { id: period_id })?;

    let txn = db.begin().await?;

    let entries = PayrollEntry::find()
        .filter(payroll_entry::Column::PayrollPeriodId.eq(period_id))
        .all(&txn)
        .await?;

    for entry in entries {
        let comp = compensation_for_employee(&txn, entry.employee_id).await?;
        let structure = PayStructure::determine(comp.as_ref());

        let applies = match structure {
            PayStructure::Fixed => apply_to_fixed,
            PayStructure::Hybrid => apply_to_hybrid,
            PayStructure::Hourly | PayStructure::Unknown => false,
        };
        let Some(comp) = comp else { continue };
        if !applies {
            continue;
        }

        let new_base = base_pay_with_fixed(&comp, structure, entry.total_hours_worked);

        let base_line = PayrollLine::find()
            .filter(payroll_line::Column::PayrollEntryId.eq(entry.id))
            .filter(payroll_line::Column::Code.eq(BASE_CODE))
            .filter(payroll_line::Column::IsAutoGenerated.eq(true))
            .one(&txn)
            .await?;

        match base_line {
            Some(line) => {
                let mut row: payroll_line::ActiveModel = line.into();
                row.amount = Set(new_base);
                row.update(&txn).await?;
            }
            None => {
                let hourly = comp.hourly_rate.unwrap_or(0.0);
                insert_line(
                    &txn,
                    entry.id,
                    NewLine {
                        code: BASE_CODE.to_string(),
                        description: "Base pay".to_string(),
                        kind: LineKind::Earning,
                        quantity: entry.total_hours_worked,
                        rate: hourly,
                        amount: new_base,
                        auto: true,
                        pay_component_id: None,
                    },
                )
                .await?;
            }
        }

        recalculate_entry_totals(&txn, entry.id).await?;
    }

    txn.commit().await?;

    info!(period_id, "fixed pay applied");
    entries_for_period(db, period_id).await
}

/// Normalizes a caller-supplied adjustment type: "deduction" in any casing is
/// a deduction, everything else is a bonus.
fn normalize_adjustment_kind(input: &str) -> LineKind {
    if input.trim().eq_ignore_ascii_case("deduction") {
        LineKind::Deduction
    } else {
        LineKind::Earning
    }
}

/// Appends a manual adjustment line to an entry and recomputes its totals.
///
/// # Errors
/// Fails with [`Error::InvalidAmount`] unless `amount > 0`,
/// [`Error::EmptyLabel`] for a blank label, and [`Error::EntryNotFound`] for
/// an unknown entry.
pub async fn add_adjustment(
    db: &DatabaseConnection,
    entry_id: i64,
    kind_input: &str,
    label: &str,
    amount: f64,
) -> Result<payroll_line::Model> {
    if amount <= 0.0 || !amount.is_finite() {
        return Err(Error::InvalidAmount { amount });
    }
    let label = label.trim();
    if label.is_empty() {
        return Err(Error::EmptyLabel);
    }

    let txn = db.begin().await?;

    PayrollEntry::find_by_id(entry_id)
        .one(&txn)
        .await?
        .ok_or(Error::EntryNotFound { id: entry_id })?;

    let kind = normalize_adjustment_kind(kind_input);
    let amount = round2(amount);

    let line = insert_line(
        &txn,
        entry_id,
        NewLine {
            code: MANUAL_CODE.to_string(),
            description: label.to_string(),
            kind,
            quantity: 1.0,
            rate: amount,
            amount,
            auto: false,
            pay_component_id: None,
        },
    )
    .await?;

    recalculate_entry_totals(&txn, entry_id).await?;
    txn.commit().await?;

    info!(entry_id, amount, "adjustment added");
    Ok(line)
}

/// Removes a manual adjustment line and recomputes the entry's totals.
///
/// # Errors
/// Fails with [`Error::CannotRemoveAutoGenerated`] when the line is owned by
/// the engine, and [`Error::LineNotFound`] for an unknown line.
pub async fn remove_adjustment(db: &DatabaseConnection, line_id: i64) -> Result<()> {
    let txn = db.begin().await?;

    let line = PayrollLine::find_by_id(line_id)
        .one(&txn)
        .await?
        .ok_or(Error::LineNotFound { id: line_id })?;

    if line.is_auto_generated {
        return Err(Error::CannotRemoveAutoGenerated { line_id });
    }

    let entry_id = line.payroll_entry_id;
    line.delete(&txn).await?;

    recalculate_entry_totals(&txn, entry_id).await?;
    txn.commit().await?;

    info!(line_id, entry_id, "adjustment removed");
    Ok(())
}

/// Finds a payroll entry with its lines.
pub async fn entry_by_id<C>(db: &C, entry_id: i64) -> Result<Option<EntryWithLines>>
where
    C: ConnectionTrait,
{
    let Some(entry) = PayrollEntry::find_by_id(entry_id).one(db).await? else {
        return Ok(None);
    };

    let lines = PayrollLine::find()
        .filter(payroll_line::Column::PayrollEntryId.eq(entry.id))
        .order_by_asc(payroll_line::Column::Id)
        .all(db)
        .await?;

    Ok(Some(EntryWithLines { entry, lines }))
}

/// Returns every entry of a period with its lines, ordered by employee
/// display name (ties broken by entry id for a stable listing).
pub async fn entries_for_period<C>(db: &C, period_id: i64) -> Result<Vec<EntryWithLines>>
where
    C: ConnectionTrait,
{
    let entries = PayrollEntry::find()
        .filter(payroll_entry::Column::PayrollPeriodId.eq(period_id))
        .all(db)
        .await?;

    if entries.is_empty() {
        return Ok(Vec::new());
    }

    let employee_ids: Vec<i64> = entries.iter().map(|e| e.employee_id).collect();
    let names: HashMap<i64, String> = Employee::find()
        .filter(employee::Column::Id.is_in(employee_ids))
        .all(db)
        .await?
        .into_iter()
        .map(|e| (e.id, e.full_name))
        .collect();

    let entry_ids: Vec<i64> = entries.iter().map(|e| e.id).collect();
    let lines = PayrollLine::find()
        .filter(payroll_line::Column::PayrollEntryId.is_in(entry_ids))
        .order_by_asc(payroll_line::Column::Id)
        .all(db)
        .await?;

    let mut lines_by_entry: HashMap<i64, Vec<payroll_line::Model>> = HashMap::new();
    for line in lines {
        lines_by_entry
            .entry(line.payroll_entry_id)
            .or_default()
            .push(line);
    }

    let mut result: Vec<EntryWithLines> = entries
        .into_iter()
        .map(|entry| {
            let lines = lines_by_entry.remove(&entry.id).unwrap_or_default();
            EntryWithLines { entry, lines }
        })
        .collect();

    result.sort_by(|a, b| {
        let name_a = names.get(&a.entry.employee_id).map_or("", String::as_str);
        let name_b = names.get(&b.entry.employee_id).map_or("", String::as_str);
        name_a
            .cmp(name_b)
            .then_with(|| a.entry.id.cmp(&b.entry.id))
    });

    Ok(result)
}
