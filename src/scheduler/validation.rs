use super::DoubleBooking;
use crate::model::{AssignmentTable, PersonId, RoleId};
use std::collections::{HashMap, HashSet};

/// Vérifie qu'aucune personne n'occupe deux rôles le même jour.
///
/// Indépendant du générateur : s'arrête à la première violation.
pub fn validate_schedule(table: &AssignmentTable) -> bool {
    table.rows.iter().all(|row| {
        let mut seen: HashSet<&PersonId> = HashSet::new();
        row.cells
            .iter()
            .filter_map(|c| c.person())
            .all(|p| seen.insert(p))
    })
}

/// Liste toutes les doubles réservations (une entrée par rôle en trop).
pub fn find_double_bookings(table: &AssignmentTable) -> Vec<DoubleBooking> {
    let mut out = Vec::new();

    for row in &table.rows {
        let mut first_role: HashMap<&PersonId, usize> = HashMap::new();
        for (idx, cell) in row.cells.iter().enumerate() {
            let Some(person) = cell.person() else {
                continue;
            };
            match first_role.get(person) {
                Some(&first) => out.push(DoubleBooking {
                    day: row.day,
                    person: person.clone(),
                    role_a: role_at(table, first),
                    role_b: role_at(table, idx),
                }),
                None => {
                    first_role.insert(person, idx);
                }
            }
        }
    }

    out
}

fn role_at(table: &AssignmentTable, idx: usize) -> RoleId {
    table
        .roles
        .get(idx)
        .cloned()
        .unwrap_or_else(|| RoleId::new(format!("#{}", idx + 1)))
}
