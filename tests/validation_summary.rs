#![forbid(unsafe_code)]
use duty_roster::{
    model::{AssignmentTable, Cell, DayRow, Person, PersonId, RoleId},
    scheduler::{find_double_bookings, summarize_schedule, validate_schedule, SchedError, Scheduler},
};
use rand::SeedableRng;
use std::collections::BTreeSet;

fn cell(name: &str) -> Cell {
    Cell::Assigned(PersonId::new(name))
}

fn table(rows: Vec<Vec<Cell>>) -> AssignmentTable {
    let mut t = AssignmentTable::new(vec![RoleId::new("ER"), RoleId::new("OPD"), RoleId::new("ICU1")]);
    for (idx, cells) in rows.into_iter().enumerate() {
        t.rows.push(DayRow {
            day: idx as u32 + 1,
            cells,
        });
    }
    t
}

#[test]
fn unfilled_cells_never_count_as_double_booking() {
    let t = table(vec![
        vec![cell("a"), Cell::Unfilled, Cell::Unfilled],
        vec![Cell::Unfilled, Cell::Unfilled, Cell::Unfilled],
    ]);
    assert!(validate_schedule(&t));
    assert!(find_double_bookings(&t).is_empty());
}

#[test]
fn same_person_twice_in_a_day_fails() {
    let t = table(vec![
        vec![cell("a"), cell("b"), cell("c")],
        vec![cell("b"), cell("c"), cell("b")],
    ]);
    assert!(!validate_schedule(&t));

    let found = find_double_bookings(&t);
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].day, 2);
    assert_eq!(found[0].person, PersonId::new("b"));
    assert_eq!(found[0].role_a, RoleId::new("ER"));
    assert_eq!(found[0].role_b, RoleId::new("ICU1"));
}

#[test]
fn same_person_on_different_days_is_fine() {
    let t = table(vec![
        vec![cell("a"), cell("b"), cell("c")],
        vec![cell("a"), cell("b"), cell("c")],
    ]);
    assert!(validate_schedule(&t));
}

#[test]
fn summary_splits_holiday_and_weekday() {
    let t = table(vec![
        vec![cell("a"), cell("b"), Cell::Unfilled],
        vec![cell("b"), cell("a"), cell("c")],
        vec![cell("a"), Cell::Unfilled, Cell::Unfilled],
    ]);
    let holidays: BTreeSet<u32> = [2].into_iter().collect();
    let known = [PersonId::new("a"), PersonId::new("b"), PersonId::new("c"), PersonId::new("idle")];

    let summary = summarize_schedule(&t, &holidays, known.iter());
    assert_eq!(summary.len(), 4);

    let a = summary.get(&PersonId::new("a")).unwrap();
    assert_eq!((a.total, a.weekday, a.holiday), (3, 2, 1));
    let b = summary.get(&PersonId::new("b")).unwrap();
    assert_eq!((b.total, b.weekday, b.holiday), (2, 1, 1));
    let c = summary.get(&PersonId::new("c")).unwrap();
    assert_eq!((c.total, c.weekday, c.holiday), (1, 0, 1));
    let idle = summary.get(&PersonId::new("idle")).unwrap();
    assert_eq!((idle.total, idle.weekday, idle.holiday), (0, 0, 0));
}

#[test]
fn summary_appends_people_missing_from_roster() {
    let t = table(vec![vec![cell("ghost"), cell("a"), Cell::Unfilled]]);
    let known = [PersonId::new("a")];
    let summary = summarize_schedule(&t, &BTreeSet::new(), known.iter());
    let names: Vec<&str> = summary.iter().map(|r| r.person.as_str()).collect();
    assert_eq!(names, vec!["a", "ghost"]);
}

#[test]
fn summary_matches_table_for_generated_schedules() {
    let mut s = Scheduler::new();
    s.set_num_days(31).unwrap();
    s.set_holidays([1, 7, 8, 14, 15, 21, 22, 28, 29]);
    for (i, name) in ["a", "b", "c", "d", "e", "f", "g"].iter().enumerate() {
        s.upsert_person(Person::new(name, 18 + i as i32).with_unavailable_days([i as u32 * 4 + 1]));
    }

    for seed in 0..10 {
        let t = s.generate_schedule_seeded(31, seed);
        let summary = s.summarize_schedule(&t);
        assert_eq!(summary.len(), 7);
        for row in summary.iter() {
            assert_eq!(row.total, row.weekday + row.holiday);
            assert_eq!(row.total as usize, t.cells_for(&row.person));
        }
    }
}

#[test]
fn generate_checked_passes_on_engine_output() {
    let mut s = Scheduler::new();
    s.add_people([Person::new("a", 5), Person::new("b", 5)]);
    s.set_num_days(5).unwrap();
    let mut rng = rand::rngs::StdRng::seed_from_u64(11);
    let result: Result<AssignmentTable, SchedError> = s.generate_checked(&mut rng);
    let t = result.unwrap();
    assert!(s.validate_schedule(&t));
    assert!(s.find_double_bookings(&t).is_empty());
}
