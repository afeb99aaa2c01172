//! Attendance penalty settings business logic.
//!
//! The settings live in a single database row created zero-valued on first
//! access, so a fresh deployment penalizes nothing until an administrator sets
//! rates. Payroll generation reads the row once per run and passes the plain
//! model into the per-employee computation rather than re-reading shared state.

use crate::{
    entities::{PenaltySettings, penalty_settings},
    errors::Result,
};
use sea_orm::{ActiveModelTrait, ConnectionTrait, EntityTrait, Set};

/// New rate values for [`update_settings`].
#[derive(Debug, Clone, Copy, Default)]
pub struct PenaltyRates {
    /// Deduction per late minute
    pub late_penalty_per_minute: f64,
    /// Deduction per undertime minute
    pub undertime_penalty_per_minute: f64,
    /// Multiplier applied to scheduled hours lost to full-day absences
    pub absence_full_day_multiplier: f64,
    /// Bonus per overtime minute
    pub overtime_bonus_per_minute: f64,
}

/// Returns the current penalty settings, creating a zero-valued row on first
/// access.
pub async fn get_or_create_settings<C>(db: &C) -> Result<penalty_settings::Model>
where
    C: ConnectionTrait,
{
    if let Some(settings) = PenaltySettings::find().one(db).await? {
        return Ok(settings);
    }

    let row = penalty_settings::ActiveModel {
        late_penalty_per_minute: Set(0.0),
        undertime_penalty_per_minute: Set(0.0),
        absence_full_day_multiplier: Set(0.0),
        overtime_bonus_per_minute: Set(0.0),
        updated_at: Set(chrono::Utc::now()),
        ..Default::default()
    };

    Ok(row.insert(db).await?)
}

/// Replaces the penalty rates, stamping the update time.
pub async fn update_settings<C>(db: &C, rates: PenaltyRates) -> Result<penalty_settings::Model>
where
    C: ConnectionTrait,
{
    let existing = get_or_create_settings(db).await?;

    let mut row: penalty_settings::ActiveModel = existing.into();
    row.late_penalty_per_minute = Set(rates.late_penalty_per_minute);
    row.undertime_penalty_per_minute = Set(rates.undertime_penalty_per_minute);
    row.absence_full_day_multiplier = Set(rates.absence_full_day_multiplier);
    row.overtime_bonus_per_minute = Set(rates.overtime_bonus_per_minute);
    row.updated_at = Set(chrono::Utc::now());

    Ok(row.update(db).await?)
}
