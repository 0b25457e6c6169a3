#![forbid(unsafe_code)]
//! Duty roster — répartition de gardes quotidiennes par rôle (sans BD).
//!
//! - Glouton aléatoire : le moins chargé d'abord, départage par mélange.
//! - Plafonds, indisponibilités et rôles exclus par personne.
//! - Vérification indépendante des doubles réservations, récapitulatif férié/ouvré.
//! - Source aléatoire injectable (graine) pour des exécutions reproductibles.

#[cfg(feature = "io")]
pub mod io;
pub mod model;
pub mod render;
pub mod scheduler;
#[cfg(feature = "io")]
pub mod storage;

pub use model::{
    AssignmentTable, Calendar, Cell, Day, DayRow, GeneratedSchedule, Person, PersonId, RoleId,
    Roster, DEFAULT_ROLES, MAX_DAYS,
};
pub use render::{TableRenderer, TextTable};
pub use scheduler::{
    find_double_bookings, summarize_schedule, validate_schedule, ConfigIssue, ConfigIssueKind,
    DoubleBooking, SchedError, Scheduler, Summary, SummaryRow,
};
#[cfg(feature = "io")]
pub use storage::{JsonStorage, Session, Storage};
