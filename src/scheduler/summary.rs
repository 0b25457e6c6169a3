use crate::model::{AssignmentTable, Day, PersonId};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap};

/// Totaux d'une personne sur la période.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SummaryRow {
    pub person: PersonId,
    pub total: u32,
    pub weekday: u32,
    pub holiday: u32,
}

impl SummaryRow {
    fn zero(person: PersonId) -> Self {
        Self {
            person,
            total: 0,
            weekday: 0,
            holiday: 0,
        }
    }
}

/// Récapitulatif par personne, dans l'ordre du roster.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Summary {
    pub rows: Vec<SummaryRow>,
}

impl Summary {
    pub fn get(&self, person: &PersonId) -> Option<&SummaryRow> {
        self.rows.iter().find(|r| &r.person == person)
    }
    pub fn iter(&self) -> impl Iterator<Item = &SummaryRow> {
        self.rows.iter()
    }
    pub fn len(&self) -> usize {
        self.rows.len()
    }
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Agrège les cases pourvues par personne, ventilées férié / ouvré.
///
/// Chaque personne de `known` apparaît, même à zéro ; une personne présente
/// dans le tableau mais absente de `known` est ajoutée à la suite.
pub fn summarize_schedule<'a, I>(
    table: &AssignmentTable,
    holidays: &BTreeSet<Day>,
    known: I,
) -> Summary
where
    I: IntoIterator<Item = &'a PersonId>,
{
    let mut rows: Vec<SummaryRow> = Vec::new();
    let mut index: HashMap<PersonId, usize> = HashMap::new();
    for person in known {
        if !index.contains_key(person) {
            index.insert(person.clone(), rows.len());
            rows.push(SummaryRow::zero(person.clone()));
        }
    }

    for row in &table.rows {
        let is_holiday = holidays.contains(&row.day);
        for person in row.cells.iter().filter_map(|c| c.person()) {
            let pos = *index.entry(person.clone()).or_insert_with(|| {
                rows.push(SummaryRow::zero(person.clone()));
                rows.len() - 1
            });
            let entry = &mut rows[pos];
            entry.total += 1;
            if is_holiday {
                entry.holiday += 1;
            } else {
                entry.weekday += 1;
            }
        }
    }

    Summary { rows }
}
