use crate::model::{Day, PersonId, RoleId};
use std::fmt;
use thiserror::Error;

/// Double réservation : une personne occupe deux rôles le même jour.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DoubleBooking {
    pub day: Day,
    pub person: PersonId,
    pub role_a: RoleId,
    pub role_b: RoleId,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigIssueKind {
    NonPositiveCap(i32),
    UnavailableDayOutOfRange(Day),
    PreferredDayOutOfRange(Day),
    UnknownRole(RoleId),
    HolidayOutOfRange(Day),
    /// Plafond nul, tous les jours indisponibles ou tous les rôles exclus.
    NeverSchedulable,
}

/// Anomalie de configuration, signalée mais jamais rejetée.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigIssue {
    pub person: Option<PersonId>,
    pub kind: ConfigIssueKind,
}

impl fmt::Display for ConfigIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(p) = &self.person {
            write!(f, "{p}: ")?;
        }
        match &self.kind {
            ConfigIssueKind::NonPositiveCap(cap) => {
                write!(f, "max_shifts {cap} <= 0, never assigned")
            }
            ConfigIssueKind::UnavailableDayOutOfRange(d) => {
                write!(f, "unavailable day {d} outside the period")
            }
            ConfigIssueKind::PreferredDayOutOfRange(d) => {
                write!(f, "preferred day {d} outside the period")
            }
            ConfigIssueKind::UnknownRole(r) => write!(f, "excluded role {r} is not configured"),
            ConfigIssueKind::HolidayOutOfRange(d) => write!(f, "holiday {d} outside the period"),
            ConfigIssueKind::NeverSchedulable => f.write_str("can never be scheduled"),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SchedError {
    #[error("day count out of range: {0} (expected 1..=31)")]
    DayCountOutOfRange(Day),
    #[error("invalid month: {year}-{month:02}")]
    InvalidMonth { year: i32, month: u32 },
    #[error("duplicate role: {0}")]
    DuplicateRole(String),
    #[error("schedule failed internal consistency check ({0} double booking(s))")]
    Inconsistent(usize),
}
