mod assignment;
mod diagnostics;
mod summary;
mod types;
mod validation;

pub use summary::{summarize_schedule, Summary, SummaryRow};
pub use types::{ConfigIssue, ConfigIssueKind, DoubleBooking, SchedError};
pub use validation::{find_double_bookings, validate_schedule};

use crate::model::{check_day_count, AssignmentTable, Calendar, Day, Person, RoleId, Roster};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::{BTreeSet, HashSet};

/// Scheduler : session de planification (roster + calendrier).
///
/// Le roster et le calendrier ne sont lus qu'en lecture pendant une
/// génération ; chaque génération produit un tableau indépendant.
#[derive(Debug, Clone, Default)]
pub struct Scheduler {
    roster: Roster,
    calendar: Calendar,
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reprend une session existante ; la période doit rester dans 1..=31.
    pub fn from_parts(roster: Roster, calendar: Calendar) -> Result<Self, SchedError> {
        check_day_count(calendar.num_days)?;
        Ok(Self { roster, calendar })
    }

    pub fn into_parts(self) -> (Roster, Calendar) {
        (self.roster, self.calendar)
    }

    pub fn roster(&self) -> &Roster {
        &self.roster
    }
    pub fn calendar(&self) -> &Calendar {
        &self.calendar
    }

    pub fn upsert_person(&mut self, person: Person) {
        self.roster.upsert_person(person);
    }

    pub fn add_people<I: IntoIterator<Item = Person>>(&mut self, people: I) {
        for p in people {
            self.roster.upsert_person(p);
        }
    }

    pub fn set_holidays<I: IntoIterator<Item = Day>>(&mut self, days: I) {
        self.calendar.holidays = days.into_iter().collect::<BTreeSet<_>>();
    }

    pub fn set_num_days(&mut self, num_days: Day) -> Result<(), SchedError> {
        check_day_count(num_days)?;
        self.calendar.num_days = num_days;
        Ok(())
    }

    pub fn set_calendar(&mut self, calendar: Calendar) -> Result<(), SchedError> {
        check_day_count(calendar.num_days)?;
        self.calendar = calendar;
        Ok(())
    }

    /// Remplace la liste ordonnée des rôles (doublons refusés).
    pub fn set_roles<I, S>(&mut self, roles: I) -> Result<(), SchedError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let roles: Vec<RoleId> = roles.into_iter().map(RoleId::new).collect();
        let mut seen = HashSet::new();
        for r in &roles {
            if !seen.insert(r) {
                return Err(SchedError::DuplicateRole(r.as_str().to_string()));
            }
        }
        self.roster.roles = roles;
        Ok(())
    }

    /// Génère un tableau de `num_days` jours avec la source aléatoire fournie.
    ///
    /// `preferred_days` n'intervient pas dans le choix.
    pub fn generate_schedule<R: Rng + ?Sized>(&self, num_days: Day, rng: &mut R) -> AssignmentTable {
        assignment::generate_schedule(&self.roster, num_days, rng)
    }

    /// Variante reproductible : même roster + même graine => même tableau.
    pub fn generate_schedule_seeded(&self, num_days: Day, seed: u64) -> AssignmentTable {
        let mut rng = StdRng::seed_from_u64(seed);
        self.generate_schedule(num_days, &mut rng)
    }

    /// Génère sur la période du calendrier puis valide le résultat.
    pub fn generate_checked<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<AssignmentTable, SchedError> {
        check_day_count(self.calendar.num_days)?;
        let table = self.generate_schedule(self.calendar.num_days, rng);
        if !validate_schedule(&table) {
            return Err(SchedError::Inconsistent(find_double_bookings(&table).len()));
        }
        Ok(table)
    }

    pub fn validate_schedule(&self, table: &AssignmentTable) -> bool {
        validate_schedule(table)
    }

    pub fn find_double_bookings(&self, table: &AssignmentTable) -> Vec<DoubleBooking> {
        find_double_bookings(table)
    }

    /// Récapitulatif ; toute personne du roster y figure, même à zéro.
    pub fn summarize_schedule(&self, table: &AssignmentTable) -> Summary {
        summarize_schedule(
            table,
            &self.calendar.holidays,
            self.roster.people.iter().map(|p| &p.id),
        )
    }

    pub fn check_config(&self) -> Vec<ConfigIssue> {
        diagnostics::check_config(&self.roster, &self.calendar)
    }
}
