use crate::model::{AssignmentTable, Cell, Day, DayRow, Roster};
use rand::seq::SliceRandom;
use rand::Rng;
use tracing::{debug, info, trace};

/// Glouton aléatoire : une passe par jour, un choix irrévocable par rôle.
pub(super) fn generate_schedule<R: Rng + ?Sized>(
    roster: &Roster,
    num_days: Day,
    rng: &mut R,
) -> AssignmentTable {
    let mut table = AssignmentTable::new(roster.roles.clone());
    // compteurs indexés par position dans le roster, conservés sur toute la période
    let mut duty_counts = vec![0u32; roster.people.len()];

    for day in 1..=num_days {
        let mut available: Vec<usize> = roster
            .people
            .iter()
            .enumerate()
            .filter(|(_, p)| p.is_available_on(day))
            .map(|(idx, _)| idx)
            .collect();
        available.shuffle(rng);

        let mut assigned_today = vec![false; roster.people.len()];
        let mut cells = Vec::with_capacity(roster.roles.len());

        for role in &roster.roles {
            // min_by_key garde le premier minimum : l'ordre du mélange départage
            let chosen = available
                .iter()
                .copied()
                .filter(|&idx| {
                    let person = &roster.people[idx];
                    !assigned_today[idx]
                        && person.accepts_role(role)
                        && person.has_capacity(duty_counts[idx])
                })
                .min_by_key(|&idx| duty_counts[idx]);

            match chosen {
                Some(idx) => {
                    let person = &roster.people[idx];
                    trace!(day, role = %role, person = %person.id, "slot assigned");
                    duty_counts[idx] += 1;
                    assigned_today[idx] = true;
                    cells.push(Cell::Assigned(person.id.clone()));
                }
                None => {
                    debug!(day, role = %role, "no eligible person, slot left unfilled");
                    cells.push(Cell::Unfilled);
                }
            }
        }

        table.rows.push(DayRow { day, cells });
    }

    info!(
        days = num_days,
        roles = roster.roles.len(),
        people = roster.people.len(),
        unfilled = table.unfilled_count(),
        "schedule generated"
    );
    table
}
