//! Attendance business logic - clock state transitions and day classification.
//!
//! Converts raw shift and time-log data into attendance facts: one
//! [`DailyAttendance`] per employee-day, folded into an
//! [`AttendancePeriodSummary`] over a date range. Classification is a total
//! function; missing data degrades to zero/false because an employee with no
//! shift that day is a valid business state, not an error. Only the clock-in
//! and clock-out paths can fail, with named conditions.

use crate::{
    config::rules::AttendanceRules,
    entities::{Employee, Shift, TimeLog, employee, shift, time_log},
    errors::{Error, Result},
};
use chrono::{DateTime, Days, Duration, NaiveDate, NaiveTime, Utc};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, Set, TransactionTrait,
};
use std::collections::{BTreeMap, BTreeSet};
use tracing::info;

/// Source tag recorded on logs created by the clock endpoints.
const CLOCK_SOURCE: &str = "web";

/// Derived classification of one employee-day. Recomputed on every query,
/// never stored.
#[derive(Debug, Clone)]
pub struct DailyAttendance {
    /// The day being classified
    pub date: NaiveDate,
    /// Earliest clock-in that day, if any
    pub first_in: Option<DateTime<Utc>>,
    /// Latest clock-out among closed logs, if any
    pub last_out: Option<DateTime<Utc>>,
    /// Total worked time over closed logs (open logs contribute zero)
    pub total_duration: Duration,
    /// Scheduled start: min shift start when the day has shifts
    pub scheduled_start: Option<DateTime<Utc>>,
    /// Scheduled end: max shift end when the day has shifts
    pub scheduled_end: Option<DateTime<Utc>>,
    /// Scheduled span in hours (0 when unscheduled)
    pub scheduled_hours: f64,
    /// Whether any log exists that day
    pub has_logs: bool,
    /// Clock-in beyond the late grace window
    pub is_late: bool,
    /// Clock-out before the scheduled end beyond the grace window
    pub is_undertime: bool,
    /// Clock-out past the scheduled end beyond the overtime threshold
    pub is_overtime: bool,
    /// Scheduled but no logs at all
    pub is_absent: bool,
    /// Minutes late beyond the grace window
    pub late_minutes: i64,
    /// Minutes short of the scheduled end beyond the grace window
    pub undertime_minutes: i64,
    /// Minutes past the scheduled end beyond the threshold
    pub overtime_minutes: i64,
}

impl DailyAttendance {
    /// Worked time in fractional hours.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn rendered_hours(&self) -> f64 {
        self.total_duration.num_seconds() as f64 / 3600.0
    }
}

/// Attendance facts aggregated over a date range for one employee.
#[derive(Debug, Clone)]
pub struct AttendancePeriodSummary {
    /// Employee the summary is for
    pub employee_id: i64,
    /// Daily facts, newest first
    pub days: Vec<DailyAttendance>,
    /// Total worked time over the range
    pub total_rendered: Duration,
    /// Cumulative late minutes
    pub late_minutes: i64,
    /// Cumulative undertime minutes
    pub undertime_minutes: i64,
    /// Cumulative overtime minutes
    pub overtime_minutes: i64,
    /// Days that were scheduled but had no logs
    pub full_day_absences: u32,
    /// Days with a scheduled shift
    pub days_with_shift: u32,
    /// Scheduled hours lost to full-day absences
    pub absent_scheduled_hours: f64,
}

impl AttendancePeriodSummary {
    /// Total worked time in fractional hours.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn total_rendered_hours(&self) -> f64 {
        self.total_rendered.num_seconds() as f64 / 3600.0
    }

    /// Whether the range carries anything payroll should react to.
    #[must_use]
    pub fn has_attendance_impact(&self) -> bool {
        self.total_rendered > Duration::zero()
            || self.full_day_absences > 0
            || self.late_minutes > 0
            || self.undertime_minutes > 0
            || self.overtime_minutes > 0
    }
}

/// One row of the admin attendance overview.
#[derive(Debug, Clone)]
pub struct AttendanceOverviewRow {
    /// Employee the row describes
    pub employee_id: i64,
    /// Display name
    pub employee_name: String,
    /// That day's classification
    pub attendance: DailyAttendance,
}

/// Paginated admin attendance overview for one date.
#[derive(Debug, Clone)]
pub struct PaginatedAttendanceView {
    /// 1-based page number
    pub page: u64,
    /// Rows per page
    pub page_size: u64,
    /// Total matching employees across all pages
    pub total_count: u64,
    /// The requested page of rows, ordered by employee name
    pub rows: Vec<AttendanceOverviewRow>,
}

pub(crate) fn day_start(date: NaiveDate) -> DateTime<Utc> {
    date.and_time(NaiveTime::MIN).and_utc()
}

pub(crate) fn day_end_exclusive(date: NaiveDate) -> DateTime<Utc> {
    day_start(date + Days::new(1))
}

/// Returns the employee's open time log (clocked in, not yet out), if any.
pub async fn open_log_for_employee<C>(db: &C, employee_id: i64) -> Result<Option<time_log::Model>>
where
    C: ConnectionTrait,
{
    TimeLog::find()
        .filter(time_log::Column::EmployeeId.eq(employee_id))
        .filter(time_log::Column::ClockOut.is_null())
        .order_by_desc(time_log::Column::ClockIn)
        .one(db)
        .await
        .map_err(Into::into)
}

/// Clocks an employee in at the current time.
///
/// # Errors
/// Fails with [`Error::AlreadyClockedIn`] if an open log exists, and
/// [`Error::EmployeeNotFound`] for an unknown employee.
pub async fn clock_in(db: &DatabaseConnection, employee_id: i64) -> Result<time_log::Model> {
    clock_in_at(db, employee_id, Utc::now()).await
}

/// Clocks an employee in at an explicit timestamp.
///
/// The open-log pre-check and the insert run inside one transaction, which
/// keeps the at-most-one-open-log invariant under SQLite's single writer.
pub async fn clock_in_at(
    db: &DatabaseConnection,
    employee_id: i64,
    now: DateTime<Utc>,
) -> Result<time_log::Model> {
    let txn = db.begin().await?;

    Employee::find_by_id(employee_id)
        .one(&txn)
        .await?
        .ok_or(Error::EmployeeNotFound { id: employee_id })?;

    if open_log_for_employee(&txn, employee_id).await?.is_some() {
        return Err(Error::AlreadyClockedIn { employee_id });
    }

    let log = time_log::ActiveModel {
        employee_id: Set(employee_id),
        clock_in: Set(now),
        clock_out: Set(None),
        source: Set(CLOCK_SOURCE.to_string()),
        ..Default::default()
    }
    .insert(&txn)
    .await?;

    txn.commit().await?;

    info!(employee_id, "clocked in");
    Ok(log)
}

/// Clocks an employee out at the current time.
///
/// # Errors
/// Fails with [`Error::NoOpenLog`] if the employee is not clocked in, and
/// [`Error::EmployeeNotFound`] for an unknown employee.
pub async fn clock_out(db: &DatabaseConnection, employee_id: i64) -> Result<time_log::Model> {
    clock_out_at(db, employee_id, Utc::now()).await
}

/// Clocks an employee out at an explicit timestamp, closing the most recent
/// open log.
pub async fn clock_out_at(
    db: &DatabaseConnection,
    employee_id: i64,
    now: DateTime<Utc>,
) -> Result<time_log::Model> {
    let txn = db.begin().await?;

    Employee::find_by_id(employee_id)
        .one(&txn)
        .await?
        .ok_or(Error::EmployeeNotFound { id: employee_id })?;

    let open = open_log_for_employee(&txn, employee_id)
        .await?
        .ok_or(Error::NoOpenLog { employee_id })?;

    let mut log: time_log::ActiveModel = open.into();
    log.clock_out = Set(Some(now));
    let closed = log.update(&txn).await?;

    txn.commit().await?;

    info!(employee_id, "clocked out");
    Ok(closed)
}

/// Time logs whose clock-in falls inside the inclusive date range.
pub async fn logs_for_employee_in_range<C>(
    db: &C,
    employee_id: i64,
    start: NaiveDate,
    end: NaiveDate,
) -> Result<Vec<time_log::Model>>
where
    C: ConnectionTrait,
{
    TimeLog::find()
        .filter(time_log::Column::EmployeeId.eq(employee_id))
        .filter(time_log::Column::ClockIn.gte(day_start(start)))
        .filter(time_log::Column::ClockIn.lt(day_end_exclusive(end)))
        .order_by_asc(time_log::Column::ClockIn)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Shifts starting inside the inclusive date range.
pub async fn shifts_for_employee_in_range<C>(
    db: &C,
    employee_id: i64,
    start: NaiveDate,
    end: NaiveDate,
) -> Result<Vec<shift::Model>>
where
    C: ConnectionTrait,
{
    Shift::find()
        .filter(shift::Column::EmployeeId.eq(employee_id))
        .filter(shift::Column::Start.gte(day_start(start)))
        .filter(shift::Column::Start.lt(day_end_exclusive(end)))
        .order_by_asc(shift::Column::Start)
        .all(db)
        .await
        .map_err(Into::into)
}

/// All shifts starting on the given date, any employee.
pub async fn shifts_for_all_on_date<C>(db: &C, date: NaiveDate) -> Result<Vec<shift::Model>>
where
    C: ConnectionTrait,
{
    Shift::find()
        .filter(shift::Column::Start.gte(day_start(date)))
        .filter(shift::Column::Start.lt(day_end_exclusive(date)))
        .order_by_asc(shift::Column::Start)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Rounded minutes beyond a tolerance, floored at zero.
#[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation)]
fn excess_minutes(delta: Duration, tolerance_minutes: i64) -> i64 {
    let minutes = delta.num_seconds() as f64 / 60.0;
    let excess = (minutes - tolerance_minutes as f64).round();
    if excess > 0.0 { excess as i64 } else { 0 }
}

/// Classifies one employee-day from its logs and shifts.
///
/// Pure and total. With no shift the day is never penalized (and never
/// absent); with a shift but no logs the day is a full absence. Multi-shift
/// days use the earliest start and latest end as the scheduled boundary.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn build_daily_attendance(
    date: NaiveDate,
    logs: &[time_log::Model],
    shifts: &[shift::Model],
    rules: &AttendanceRules,
) -> DailyAttendance {
    let has_logs = !logs.is_empty();
    let first_in = logs.iter().map(|log| log.clock_in).min();
    let last_out = logs.iter().filter_map(|log| log.clock_out).max();

    let mut total = Duration::zero();
    for log in logs {
        if let Some(out) = log.clock_out {
            total = total + (out - log.clock_in);
        }
    }

    let scheduled_start = shifts.iter().map(|s| s.start).min();
    let scheduled_end = shifts.iter().map(|s| s.end).max();

    let mut day = DailyAttendance {
        date,
        first_in,
        last_out,
        total_duration: total,
        scheduled_start,
        scheduled_end,
        scheduled_hours: 0.0,
        has_logs,
        is_late: false,
        is_undertime: false,
        is_overtime: false,
        is_absent: false,
        late_minutes: 0,
        undertime_minutes: 0,
        overtime_minutes: 0,
    };

    let (Some(start), Some(end)) = (scheduled_start, scheduled_end) else {
        return day;
    };

    day.scheduled_hours = (end - start).num_seconds() as f64 / 3600.0;

    if !has_logs {
        day.is_absent = true;
        return day;
    }

    if let Some(first_in) = first_in {
        day.late_minutes = excess_minutes(first_in - start, rules.late_grace_minutes);
        day.is_late = day.late_minutes > 0;
    }

    if let Some(last_out) = last_out {
        day.undertime_minutes = excess_minutes(end - last_out, rules.undertime_grace_minutes);
        day.is_undertime = day.undertime_minutes > 0;

        day.overtime_minutes = excess_minutes(last_out - end, rules.overtime_threshold_minutes);
        day.is_overtime = day.overtime_minutes > 0;
    }

    day
}

/// Builds one [`DailyAttendance`] for every date in the range that has either
/// a log or a shift, newest first.
pub async fn attendance_for_employee<C>(
    db: &C,
    employee_id: i64,
    start: NaiveDate,
    end: NaiveDate,
    rules: &AttendanceRules,
) -> Result<Vec<DailyAttendance>>
where
    C: ConnectionTrait,
{
    let logs = logs_for_employee_in_range(db, employee_id, start, end).await?;
    let shifts = shifts_for_employee_in_range(db, employee_id, start, end).await?;

    let mut logs_by_date: BTreeMap<NaiveDate, Vec<time_log::Model>> = BTreeMap::new();
    for log in logs {
        logs_by_date
            .entry(log.clock_in.date_naive())
            .or_default()
            .push(log);
    }

    let mut shifts_by_date: BTreeMap<NaiveDate, Vec<shift::Model>> = BTreeMap::new();
    for shift in shifts {
        shifts_by_date
            .entry(shift.start.date_naive())
            .or_default()
            .push(shift);
    }

    let mut dates: BTreeSet<NaiveDate> = logs_by_date.keys().copied().collect();
    dates.extend(shifts_by_date.keys().copied());

    let no_logs: Vec<time_log::Model> = Vec::new();
    let no_shifts: Vec<shift::Model> = Vec::new();

    Ok(dates
        .into_iter()
        .rev()
        .map(|date| {
            build_daily_attendance(
                date,
                logs_by_date.get(&date).unwrap_or(&no_logs),
                shifts_by_date.get(&date).unwrap_or(&no_shifts),
                rules,
            )
        })
        .collect())
}

/// Folds a date range into an [`AttendancePeriodSummary`] for one employee.
pub async fn summary_for_employee<C>(
    db: &C,
    employee_id: i64,
    start: NaiveDate,
    end: NaiveDate,
    rules: &AttendanceRules,
) -> Result<AttendancePeriodSummary>
where
    C: ConnectionTrait,
{
    let days = attendance_for_employee(db, employee_id, start, end, rules).await?;

    let mut summary = AttendancePeriodSummary {
        employee_id,
        days: Vec::new(),
        total_rendered: Duration::zero(),
        late_minutes: 0,
        undertime_minutes: 0,
        overtime_minutes: 0,
        full_day_absences: 0,
        days_with_shift: 0,
        absent_scheduled_hours: 0.0,
    };

    for day in &days {
        summary.total_rendered = summary.total_rendered + day.total_duration;
        summary.late_minutes += day.late_minutes;
        summary.undertime_minutes += day.undertime_minutes;
        summary.overtime_minutes += day.overtime_minutes;

        if day.scheduled_hours > 0.0 {
            summary.days_with_shift += 1;
        }
        if day.is_absent {
            summary.full_day_absences += 1;
            summary.absent_scheduled_hours += day.scheduled_hours;
        }
    }

    summary.days = days;
    Ok(summary)
}

/// Admin overview for one date: active employees with at least one shift that
/// day, ordered by name, paginated. Employees never scheduled on the date are
/// excluded even when active.
pub async fn attendance_overview<C>(
    db: &C,
    date: NaiveDate,
    employee_filter: Option<i64>,
    page: u64,
    page_size: u64,
    rules: &AttendanceRules,
) -> Result<PaginatedAttendanceView>
where
    C: ConnectionTrait,
{
    let page = page.max(1);

    let day_shifts = shifts_for_all_on_date(db, date).await?;
    let mut scheduled_ids: BTreeSet<i64> = day_shifts.iter().map(|s| s.employee_id).collect();
    if let Some(filter) = employee_filter {
        scheduled_ids.retain(|id| *id == filter);
    }

    if scheduled_ids.is_empty() {
        return Ok(PaginatedAttendanceView {
            page,
            page_size,
            total_count: 0,
            rows: Vec::new(),
        });
    }

    let scheduled: Vec<i64> = scheduled_ids.iter().copied().collect();
    let base_query = Employee::find()
        .filter(employee::Column::IsActive.eq(true))
        .filter(employee::Column::Id.is_in(scheduled));

    let total_count = base_query.clone().count(db).await?;
    let employees = base_query
        .order_by_asc(employee::Column::FullName)
        .offset((page - 1) * page_size)
        .limit(page_size)
        .all(db)
        .await?;

    let employee_ids: Vec<i64> = employees.iter().map(|e| e.id).collect();
    let logs = TimeLog::find()
        .filter(time_log::Column::EmployeeId.is_in(employee_ids))
        .filter(time_log::Column::ClockIn.gte(day_start(date)))
        .filter(time_log::Column::ClockIn.lt(day_end_exclusive(date)))
        .all(db)
        .await?;

    let rows = employees
        .into_iter()
        .map(|employee| {
            let employee_logs: Vec<time_log::Model> = logs
                .iter()
                .filter(|log| log.employee_id == employee.id)
                .cloned()
                .collect();
            let employee_shifts: Vec<shift::Model> = day_shifts
                .iter()
                .filter(|s| s.employee_id == employee.id)
                .cloned()
                .collect();
            let attendance = build_daily_attendance(date, &employee_logs, &employee_shifts, rules);

            AttendanceOverviewRow {
                employee_id: employee.id,
                employee_name: employee.full_name,
                attendance,
            }
        })
        .collect();

    Ok(PaginatedAttendanceView {
        page,
        page_size,
        total_count,
        rows,
    })
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::float_cmp)]
    use super::*;
    use crate::test_utils::*;

    fn rules() -> AttendanceRules {
        AttendanceRules::default()
    }

    fn log_model(clock_in: DateTime<Utc>, clock_out: Option<DateTime<Utc>>) -> time_log::Model {
        time_log::Model {
            id: 0,
            employee_id: 1,
            clock_in,
            clock_out,
            source: "web".to_string(),
        }
    }

    fn shift_model(start: DateTime<Utc>, end: DateTime<Utc>) -> shift::Model {
        shift::Model {
            id: 0,
            employee_id: 1,
            start,
            end,
            group_label: None,
        }
    }

    #[test]
    fn test_unscheduled_day_is_never_penalized() {
        let date = d(2026, 3, 2);
        let logs = vec![log_model(dt(2026, 3, 2, 13, 0), Some(dt(2026, 3, 2, 17, 0)))];

        let day = build_daily_attendance(date, &logs, &[], &rules());

        assert!(day.has_logs);
        assert!(!day.is_absent);
        assert!(!day.is_late);
        assert!(!day.is_undertime);
        assert!(!day.is_overtime);
        assert_eq!(day.scheduled_hours, 0.0);
        assert_eq!(day.rendered_hours(), 4.0);
    }

    #[test]
    fn test_scheduled_day_without_logs_is_absent() {
        let date = d(2026, 3, 2);
        let shifts = vec![shift_model(dt(2026, 3, 2, 9, 0), dt(2026, 3, 2, 17, 0))];

        let day = build_daily_attendance(date, &[], &shifts, &rules());

        assert!(day.is_absent);
        assert!(!day.is_late);
        assert!(!day.is_undertime);
        assert!(!day.is_overtime);
        assert_eq!(day.scheduled_hours, 8.0);
        assert_eq!(day.late_minutes, 0);
    }

    #[test]
    fn test_grace_window_boundaries() {
        let date = d(2026, 3, 2);
        let shifts = vec![shift_model(dt(2026, 3, 2, 9, 0), dt(2026, 3, 2, 17, 0))];

        // 09:04 is inside the 5-minute grace window
        let logs = vec![log_model(dt(2026, 3, 2, 9, 4), Some(dt(2026, 3, 2, 17, 0)))];
        let day = build_daily_attendance(date, &logs, &shifts, &rules());
        assert!(!day.is_late);
        assert_eq!(day.late_minutes, 0);

        // 09:06 is one minute beyond it
        let logs = vec![log_model(dt(2026, 3, 2, 9, 6), Some(dt(2026, 3, 2, 17, 0)))];
        let day = build_daily_attendance(date, &logs, &shifts, &rules());
        assert!(day.is_late);
        assert_eq!(day.late_minutes, 1);
    }

    #[test]
    fn test_undertime_beyond_grace() {
        let date = d(2026, 3, 2);
        let shifts = vec![shift_model(dt(2026, 3, 2, 9, 0), dt(2026, 3, 2, 17, 0))];

        // Leaving at 16:56 is inside the grace window
        let logs = vec![log_model(dt(2026, 3, 2, 9, 0), Some(dt(2026, 3, 2, 16, 56)))];
        let day = build_daily_attendance(date, &logs, &shifts, &rules());
        assert!(!day.is_undertime);

        // Leaving at 16:30 is 25 minutes beyond it
        let logs = vec![log_model(dt(2026, 3, 2, 9, 0), Some(dt(2026, 3, 2, 16, 30)))];
        let day = build_daily_attendance(date, &logs, &shifts, &rules());
        assert!(day.is_undertime);
        assert_eq!(day.undertime_minutes, 25);
    }

    #[test]
    fn test_overtime_beyond_threshold() {
        let date = d(2026, 3, 2);
        let shifts = vec![shift_model(dt(2026, 3, 2, 9, 0), dt(2026, 3, 2, 17, 0))];

        // 17:04 is under the 5-minute threshold
        let logs = vec![log_model(dt(2026, 3, 2, 9, 0), Some(dt(2026, 3, 2, 17, 4)))];
        let day = build_daily_attendance(date, &logs, &shifts, &rules());
        assert!(!day.is_overtime);

        // 17:35 is 30 minutes beyond it
        let logs = vec![log_model(dt(2026, 3, 2, 9, 0), Some(dt(2026, 3, 2, 17, 35)))];
        let day = build_daily_attendance(date, &logs, &shifts, &rules());
        assert!(day.is_overtime);
        assert_eq!(day.overtime_minutes, 30);
    }

    #[test]
    fn test_open_log_contributes_zero_duration() {
        let date = d(2026, 3, 2);
        let logs = vec![
            log_model(dt(2026, 3, 2, 9, 0), Some(dt(2026, 3, 2, 12, 0))),
            log_model(dt(2026, 3, 2, 13, 0), None),
        ];

        let day = build_daily_attendance(date, &logs, &[], &rules());

        assert_eq!(day.rendered_hours(), 3.0);
        assert!(day.last_out.is_some());
        assert_eq!(day.last_out, Some(dt(2026, 3, 2, 12, 0)));
    }

    #[test]
    fn test_multi_shift_day_uses_outer_boundaries() {
        let date = d(2026, 3, 2);
        let shifts = vec![
            shift_model(dt(2026, 3, 2, 13, 0), dt(2026, 3, 2, 17, 0)),
            shift_model(dt(2026, 3, 2, 8, 0), dt(2026, 3, 2, 12, 0)),
        ];
        let logs = vec![log_model(dt(2026, 3, 2, 8, 0), Some(dt(2026, 3, 2, 17, 0)))];

        let day = build_daily_attendance(date, &logs, &shifts, &rules());

        assert_eq!(day.scheduled_start, Some(dt(2026, 3, 2, 8, 0)));
        assert_eq!(day.scheduled_end, Some(dt(2026, 3, 2, 17, 0)));
        assert_eq!(day.scheduled_hours, 9.0);
        assert!(!day.is_late);
        assert!(!day.is_undertime);
    }

    #[tokio::test]
    async fn test_clock_in_creates_open_log() -> Result<()> {
        let db = setup_test_db().await?;
        let employee = create_test_employee(&db, "Avery Cole").await?;

        let log = clock_in_at(&db, employee.id, dt(2026, 3, 2, 9, 0)).await?;
        assert_eq!(log.employee_id, employee.id);
        assert!(log.clock_out.is_none());
        assert_eq!(log.source, "web");

        let open = open_log_for_employee(&db, employee.id).await?;
        assert_eq!(open.unwrap().id, log.id);

        Ok(())
    }

    #[tokio::test]
    async fn test_double_clock_in_is_rejected() -> Result<()> {
        let db = setup_test_db().await?;
        let employee = create_test_employee(&db, "Avery Cole").await?;

        clock_in_at(&db, employee.id, dt(2026, 3, 2, 9, 0)).await?;
        let result = clock_in_at(&db, employee.id, dt(2026, 3, 2, 9, 5)).await;

        assert!(matches!(
            result.unwrap_err(),
            Error::AlreadyClockedIn { employee_id } if employee_id == employee.id
        ));

        Ok(())
    }

    #[tokio::test]
    async fn test_clock_out_closes_most_recent_open_log() -> Result<()> {
        let db = setup_test_db().await?;
        let employee = create_test_employee(&db, "Avery Cole").await?;

        let open = clock_in_at(&db, employee.id, dt(2026, 3, 2, 9, 0)).await?;
        let closed = clock_out_at(&db, employee.id, dt(2026, 3, 2, 17, 0)).await?;

        assert_eq!(closed.id, open.id);
        assert_eq!(closed.clock_out, Some(dt(2026, 3, 2, 17, 0)));
        assert!(open_log_for_employee(&db, employee.id).await?.is_none());

        Ok(())
    }

    #[tokio::test]
    async fn test_clock_out_without_open_log_is_rejected() -> Result<()> {
        let db = setup_test_db().await?;
        let employee = create_test_employee(&db, "Avery Cole").await?;

        let result = clock_out_at(&db, employee.id, dt(2026, 3, 2, 17, 0)).await;
        assert!(matches!(result.unwrap_err(), Error::NoOpenLog { .. }));

        Ok(())
    }

    #[tokio::test]
    async fn test_clock_actions_require_known_employee() -> Result<()> {
        let db = setup_test_db().await?;

        let result = clock_in_at(&db, 404, dt(2026, 3, 2, 9, 0)).await;
        assert!(matches!(result.unwrap_err(), Error::EmployeeNotFound { id: 404 }));

        let result = clock_out_at(&db, 404, dt(2026, 3, 2, 17, 0)).await;
        assert!(matches!(result.unwrap_err(), Error::EmployeeNotFound { id: 404 }));

        Ok(())
    }

    #[tokio::test]
    async fn test_range_unions_log_and_shift_dates_descending() -> Result<()> {
        let db = setup_test_db().await?;
        let employee = create_test_employee(&db, "Avery Cole").await?;

        // Day 1: logs only. Day 2: shift only. Day 3: both.
        create_test_log(&db, employee.id, dt(2026, 3, 2, 9, 0), Some(dt(2026, 3, 2, 17, 0)))
            .await?;
        create_test_shift(&db, employee.id, dt(2026, 3, 3, 9, 0), dt(2026, 3, 3, 17, 0)).await?;
        create_test_shift(&db, employee.id, dt(2026, 3, 4, 9, 0), dt(2026, 3, 4, 17, 0)).await?;
        create_test_log(&db, employee.id, dt(2026, 3, 4, 9, 0), Some(dt(2026, 3, 4, 17, 0)))
            .await?;

        let days =
            attendance_for_employee(&db, employee.id, d(2026, 3, 1), d(2026, 3, 15), &rules())
                .await?;

        assert_eq!(days.len(), 3);
        assert_eq!(days[0].date, d(2026, 3, 4));
        assert_eq!(days[1].date, d(2026, 3, 3));
        assert_eq!(days[2].date, d(2026, 3, 2));

        assert!(!days[2].is_absent); // unscheduled day with logs
        assert!(days[1].is_absent); // scheduled day without logs
        assert!(!days[0].is_absent);

        Ok(())
    }

    #[tokio::test]
    async fn test_summary_accumulates_counts() -> Result<()> {
        let db = setup_test_db().await?;
        let employee = create_test_employee(&db, "Avery Cole").await?;

        // On-time full day
        create_test_shift(&db, employee.id, dt(2026, 3, 2, 9, 0), dt(2026, 3, 2, 17, 0)).await?;
        create_test_log(&db, employee.id, dt(2026, 3, 2, 9, 0), Some(dt(2026, 3, 2, 17, 0)))
            .await?;
        // Late by 10 minutes beyond grace (09:15 with 5-minute grace)
        create_test_shift(&db, employee.id, dt(2026, 3, 3, 9, 0), dt(2026, 3, 3, 17, 0)).await?;
        create_test_log(&db, employee.id, dt(2026, 3, 3, 9, 15), Some(dt(2026, 3, 3, 17, 0)))
            .await?;
        // Full-day absence
        create_test_shift(&db, employee.id, dt(2026, 3, 4, 9, 0), dt(2026, 3, 4, 17, 0)).await?;

        let summary =
            summary_for_employee(&db, employee.id, d(2026, 3, 1), d(2026, 3, 15), &rules())
                .await?;

        assert_eq!(summary.days.len(), 3);
        assert_eq!(summary.days_with_shift, 3);
        assert_eq!(summary.full_day_absences, 1);
        assert_eq!(summary.late_minutes, 10);
        assert_eq!(summary.total_rendered_hours(), 15.75);
        assert_eq!(summary.absent_scheduled_hours, 8.0);
        assert!(summary.has_attendance_impact());

        Ok(())
    }

    #[tokio::test]
    async fn test_summary_without_activity_has_no_impact() -> Result<()> {
        let db = setup_test_db().await?;
        let employee = create_test_employee(&db, "Avery Cole").await?;

        let summary =
            summary_for_employee(&db, employee.id, d(2026, 3, 1), d(2026, 3, 15), &rules())
                .await?;

        assert!(summary.days.is_empty());
        assert!(!summary.has_attendance_impact());

        Ok(())
    }

    #[tokio::test]
    async fn test_overview_excludes_unscheduled_and_inactive() -> Result<()> {
        let db = setup_test_db().await?;
        let scheduled = create_test_employee(&db, "Avery Cole").await?;
        let unscheduled = create_test_employee(&db, "Blake Reyes").await?;
        let inactive = create_custom_employee(&db, "Casey Fox", false).await?;

        create_test_shift(&db, scheduled.id, dt(2026, 3, 2, 9, 0), dt(2026, 3, 2, 17, 0)).await?;
        create_test_shift(&db, inactive.id, dt(2026, 3, 2, 9, 0), dt(2026, 3, 2, 17, 0)).await?;
        create_test_log(&db, scheduled.id, dt(2026, 3, 2, 9, 0), Some(dt(2026, 3, 2, 17, 0)))
            .await?;
        // Logs without a shift must not surface the employee
        create_test_log(&db, unscheduled.id, dt(2026, 3, 2, 9, 0), None).await?;

        let view = attendance_overview(&db, d(2026, 3, 2), None, 1, 10, &rules()).await?;

        assert_eq!(view.total_count, 1);
        assert_eq!(view.rows.len(), 1);
        assert_eq!(view.rows[0].employee_name, "Avery Cole");
        assert!(!view.rows[0].attendance.is_absent);

        Ok(())
    }

    #[tokio::test]
    async fn test_overview_pagination_and_filter() -> Result<()> {
        let db = setup_test_db().await?;

        let mut ids = Vec::new();
        for name in ["Avery Cole", "Blake Reyes", "Casey Fox"] {
            let employee = create_test_employee(&db, name).await?;
            create_test_shift(&db, employee.id, dt(2026, 3, 2, 9, 0), dt(2026, 3, 2, 17, 0))
                .await?;
            ids.push(employee.id);
        }

        let page1 = attendance_overview(&db, d(2026, 3, 2), None, 1, 2, &rules()).await?;
        assert_eq!(page1.total_count, 3);
        assert_eq!(page1.rows.len(), 2);
        assert_eq!(page1.rows[0].employee_name, "Avery Cole");

        let page2 = attendance_overview(&db, d(2026, 3, 2), None, 2, 2, &rules()).await?;
        assert_eq!(page2.rows.len(), 1);
        assert_eq!(page2.rows[0].employee_name, "Casey Fox");

        let filtered =
            attendance_overview(&db, d(2026, 3, 2), Some(ids[1]), 1, 10, &rules()).await?;
        assert_eq!(filtered.total_count, 1);
        assert_eq!(filtered.rows[0].employee_name, "Blake Reyes");

        Ok(())
    }
}
