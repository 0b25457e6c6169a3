use crate::scheduler::SchedError;
use chrono::{DateTime, Datelike, NaiveDate, Utc, Weekday};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// Numéro de jour dans la période (1-based).
pub type Day = u32;

/// Longueur maximale d'une période (un mois).
pub const MAX_DAYS: Day = 31;

/// Rôles par défaut d'une journée.
pub const DEFAULT_ROLES: [&str; 5] = ["ER", "OPD", "WARD", "ICU1", "ICU2"];

/// Identifiant fort pour Person (son nom, unique dans le roster)
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PersonId(String);

impl PersonId {
    pub fn new<S: AsRef<str>>(s: S) -> Self {
        Self(s.as_ref().to_owned())
    }
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PersonId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Identifiant d'un rôle de garde (ex. `ICU1`)
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RoleId(String);

impl RoleId {
    pub fn new<S: AsRef<str>>(s: S) -> Self {
        Self(s.as_ref().to_owned())
    }
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RoleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Personne et ses contraintes pour la période.
///
/// Les valeurs hors bornes ne sont pas rejetées : un plafond `<= 0` ou un
/// jour hors de la période ne correspond simplement jamais.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Person {
    pub id: PersonId,
    pub max_shifts: i32,
    #[serde(default, skip_serializing_if = "BTreeSet::is_empty")]
    pub unavailable_days: BTreeSet<Day>,
    /// Conservé mais ignoré par l'assignation (réservé à une pondération future).
    #[serde(default, skip_serializing_if = "BTreeSet::is_empty")]
    pub preferred_days: BTreeSet<Day>,
    #[serde(default, skip_serializing_if = "BTreeSet::is_empty")]
    pub unavailable_roles: BTreeSet<RoleId>,
}

impl Person {
    pub fn new<S: AsRef<str>>(id: S, max_shifts: i32) -> Self {
        Self {
            id: PersonId::new(id),
            max_shifts,
            unavailable_days: BTreeSet::new(),
            preferred_days: BTreeSet::new(),
            unavailable_roles: BTreeSet::new(),
        }
    }

    pub fn with_unavailable_days<I: IntoIterator<Item = Day>>(mut self, days: I) -> Self {
        self.unavailable_days = days.into_iter().collect();
        self
    }

    pub fn with_preferred_days<I: IntoIterator<Item = Day>>(mut self, days: I) -> Self {
        self.preferred_days = days.into_iter().collect();
        self
    }

    pub fn with_unavailable_roles<I, S>(mut self, roles: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.unavailable_roles = roles.into_iter().map(RoleId::new).collect();
        self
    }

    pub fn is_available_on(&self, day: Day) -> bool {
        !self.unavailable_days.contains(&day)
    }

    pub fn accepts_role(&self, role: &RoleId) -> bool {
        !self.unavailable_roles.contains(role)
    }

    /// Vrai tant que `assigned` reste strictement sous le plafond.
    pub fn has_capacity(&self, assigned: u32) -> bool {
        i64::from(assigned) < i64::from(self.max_shifts)
    }
}

/// Personnes + rôles d'une session
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Roster {
    pub people: Vec<Person>,
    pub roles: Vec<RoleId>,
}

impl Default for Roster {
    fn default() -> Self {
        Self {
            people: Vec::new(),
            roles: DEFAULT_ROLES.iter().map(RoleId::new).collect(),
        }
    }
}

impl Roster {
    /// Insère ou remplace (à la même position) la personne portant cet id.
    pub fn upsert_person(&mut self, person: Person) {
        match self.find_person_mut(&person.id) {
            Some(existing) => *existing = person,
            None => self.people.push(person),
        }
    }
    pub fn find_person<'a>(&'a self, id: &PersonId) -> Option<&'a Person> {
        self.people.iter().find(|p| &p.id == id)
    }
    pub fn find_person_mut(&mut self, id: &PersonId) -> Option<&mut Person> {
        self.people.iter_mut().find(|p| &p.id == id)
    }
    pub fn has_role(&self, role: &RoleId) -> bool {
        self.roles.contains(role)
    }
}

/// Période planifiée et jours fériés.
///
/// Les jours fériés ne servent qu'au rapport et à l'export, jamais au filtrage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Calendar {
    pub num_days: Day,
    #[serde(default)]
    pub holidays: BTreeSet<Day>,
}

impl Default for Calendar {
    fn default() -> Self {
        Self {
            num_days: 30,
            holidays: BTreeSet::new(),
        }
    }
}

impl Calendar {
    pub fn new(num_days: Day) -> Result<Self, SchedError> {
        check_day_count(num_days)?;
        Ok(Self {
            num_days,
            holidays: BTreeSet::new(),
        })
    }

    /// Calendrier couvrant un mois réel (28 à 31 jours).
    pub fn for_month(year: i32, month: u32) -> Result<Self, SchedError> {
        Self::new(days_in_month(year, month)?)
    }

    /// Samedis et dimanches du mois, en numéros de jour.
    pub fn weekend_days(year: i32, month: u32) -> Result<BTreeSet<Day>, SchedError> {
        let len = days_in_month(year, month)?;
        let mut out = BTreeSet::new();
        for day in 1..=len {
            let date = NaiveDate::from_ymd_opt(year, month, day)
                .ok_or(SchedError::InvalidMonth { year, month })?;
            if matches!(date.weekday(), Weekday::Sat | Weekday::Sun) {
                out.insert(day);
            }
        }
        Ok(out)
    }

    pub fn is_holiday(&self, day: Day) -> bool {
        self.holidays.contains(&day)
    }

    pub fn contains(&self, day: Day) -> bool {
        (1..=self.num_days).contains(&day)
    }
}

pub(crate) fn check_day_count(num_days: Day) -> Result<(), SchedError> {
    if (1..=MAX_DAYS).contains(&num_days) {
        Ok(())
    } else {
        Err(SchedError::DayCountOutOfRange(num_days))
    }
}

fn days_in_month(year: i32, month: u32) -> Result<Day, SchedError> {
    let invalid = SchedError::InvalidMonth { year, month };
    let first = NaiveDate::from_ymd_opt(year, month, 1).ok_or(invalid.clone())?;
    let next = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)
    }
    .ok_or(invalid)?;
    Ok(next.signed_duration_since(first).num_days() as Day)
}

/// Case d'un tableau de garde : une personne ou « non pourvu ».
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Cell {
    Assigned(PersonId),
    Unfilled,
}

impl Cell {
    pub fn person(&self) -> Option<&PersonId> {
        match self {
            Cell::Assigned(p) => Some(p),
            Cell::Unfilled => None,
        }
    }
    pub fn is_unfilled(&self) -> bool {
        matches!(self, Cell::Unfilled)
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cell::Assigned(p) => f.write_str(p.as_str()),
            Cell::Unfilled => f.write_str("-"),
        }
    }
}

/// Une journée : une case par rôle, dans l'ordre des rôles du tableau.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayRow {
    pub day: Day,
    pub cells: Vec<Cell>,
}

/// Tableau jour × rôle produit par une exécution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssignmentTable {
    pub roles: Vec<RoleId>,
    pub rows: Vec<DayRow>,
}

impl AssignmentTable {
    pub fn new(roles: Vec<RoleId>) -> Self {
        Self {
            roles,
            rows: Vec::new(),
        }
    }

    pub fn num_days(&self) -> usize {
        self.rows.len()
    }

    pub fn row(&self, day: Day) -> Option<&DayRow> {
        self.rows.iter().find(|r| r.day == day)
    }

    pub fn get(&self, day: Day, role: &RoleId) -> Option<&Cell> {
        let idx = self.roles.iter().position(|r| r == role)?;
        self.row(day)?.cells.get(idx)
    }

    /// Paires (rôle, case) d'une journée.
    pub fn entries<'a>(&'a self, row: &'a DayRow) -> impl Iterator<Item = (&'a RoleId, &'a Cell)> {
        self.roles.iter().zip(row.cells.iter())
    }

    pub fn unfilled_count(&self) -> usize {
        self.rows
            .iter()
            .flat_map(|r| r.cells.iter())
            .filter(|c| c.is_unfilled())
            .count()
    }

    pub fn cells_for(&self, person: &PersonId) -> usize {
        self.rows
            .iter()
            .flat_map(|r| r.cells.iter())
            .filter(|c| c.person() == Some(person))
            .count()
    }
}

/// Dernier tableau généré, tel que conservé dans la session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneratedSchedule {
    pub generated_at: DateTime<Utc>,
    #[serde(default)]
    pub seed: Option<u64>,
    /// Jours fériés en vigueur lors de la génération.
    #[serde(default)]
    pub holidays: BTreeSet<Day>,
    pub table: AssignmentTable,
}
