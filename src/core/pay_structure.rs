//! Pay structure classification and rate evaluation helpers.
//!
//! The shared money math of the payroll engine: classifying an employee's
//! compensation record into a pay structure, deriving an hourly-equivalent
//! rate, and evaluating a pay component's rate rule into a line amount. Kinds
//! that the database stores as strings are matched through the closed enums
//! here, never by raw string comparison in the engine.

use crate::config::rules::AttendanceRules;
use crate::entities::compensation;

/// Classification of an employee's compensation record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PayStructure {
    /// Paid per rendered hour
    Hourly,
    /// Paid a fixed monthly salary
    Fixed,
    /// Fixed salary plus an hourly component
    Hybrid,
    /// No usable compensation data
    Unknown,
}

impl PayStructure {
    /// Classifies a compensation record by which rate fields are present.
    ///
    /// Both rates > 0 means hybrid, only a fixed salary means fixed, an hourly
    /// rate (or the hourly flag alone) means hourly, anything else is unknown.
    #[must_use]
    pub fn determine(compensation: Option<&compensation::Model>) -> Self {
        let Some(comp) = compensation else {
            return Self::Unknown;
        };

        let has_hourly = comp.hourly_rate.is_some_and(|rate| rate > 0.0);
        let has_fixed = comp.fixed_monthly_salary.is_some_and(|salary| salary > 0.0);

        match (has_hourly, has_fixed) {
            (true, true) => Self::Hybrid,
            (false, true) => Self::Fixed,
            (true, false) => Self::Hourly,
            (false, false) if comp.is_hourly => Self::Hourly,
            (false, false) => Self::Unknown,
        }
    }

    /// Human-readable name for display surfaces.
    #[must_use]
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::Hourly => "Hourly",
            Self::Fixed => "Fixed",
            Self::Hybrid => "Hybrid",
            Self::Unknown => "Not set",
        }
    }
}

/// Whether a payroll line or pay component adds to or subtracts from pay.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind {
    /// Adds to pay
    Earning,
    /// Subtracts from pay
    Deduction,
}

impl LineKind {
    /// The string stored in the database for this kind.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Earning => "earning",
            Self::Deduction => "deduction",
        }
    }

    /// Parses a stored kind string. Unknown values return None.
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "earning" => Some(Self::Earning),
            "deduction" => Some(Self::Deduction),
            _ => None,
        }
    }
}

/// How a pay component's rate is turned into a line amount.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CalcKind {
    /// The rate is the amount
    FixedAmount,
    /// Amount = base pay x rate
    PercentOfBase,
    /// Amount = rendered hours x rate
    PerHour,
}

impl CalcKind {
    /// The string stored in the database for this calculation kind.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::FixedAmount => "fixed_amount",
            Self::PercentOfBase => "percent_of_base",
            Self::PerHour => "per_hour",
        }
    }

    /// Parses a stored calculation-kind string. Unknown values return None.
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "fixed_amount" => Some(Self::FixedAmount),
            "percent_of_base" => Some(Self::PercentOfBase),
            "per_hour" => Some(Self::PerHour),
            _ => None,
        }
    }
}

/// Rounds a monetary value to 2 decimal places, half away from zero.
#[must_use]
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Derives the hourly rate used for base pay.
///
/// The explicit hourly rate wins when present and positive; otherwise a fixed
/// monthly salary is spread over the standard work month; otherwise zero.
#[must_use]
pub fn derive_hourly_rate(
    compensation: Option<&compensation::Model>,
    rules: &AttendanceRules,
) -> f64 {
    let Some(comp) = compensation else {
        return 0.0;
    };

    match comp.hourly_rate {
        Some(rate) if rate > 0.0 => rate,
        _ => match comp.fixed_monthly_salary {
            Some(salary) if salary > 0.0 && rules.standard_monthly_hours > 0.0 => {
                salary / rules.standard_monthly_hours
            }
            _ => 0.0,
        },
    }
}

/// Evaluates a pay component's rate rule into (quantity, amount).
///
/// The quantity records what the amount was computed from: 1 for fixed
/// amounts, base pay for percentages, rendered hours for per-hour rates.
#[must_use]
pub fn evaluate_component_amount(
    calc_kind: CalcKind,
    rate: f64,
    base_pay: f64,
    total_hours: f64,
) -> (f64, f64) {
    match calc_kind {
        CalcKind::FixedAmount => (1.0, round2(rate)),
        CalcKind::PercentOfBase => (base_pay, round2(base_pay * rate)),
        CalcKind::PerHour => (total_hours, round2(total_hours * rate)),
    }
}
