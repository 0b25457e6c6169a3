#![forbid(unsafe_code)]
use duty_roster::{
    model::{AssignmentTable, Cell, DayRow, PersonId, RoleId},
    render::{TableRenderer, TextTable},
    scheduler::summarize_schedule,
};
use insta::assert_snapshot;
use std::collections::BTreeSet;

fn sample() -> AssignmentTable {
    let mut t = AssignmentTable::new(vec![RoleId::new("ER"), RoleId::new("ICU1")]);
    t.rows.push(DayRow {
        day: 1,
        cells: vec![
            Cell::Assigned(PersonId::new("alice")),
            Cell::Assigned(PersonId::new("bob")),
        ],
    });
    t.rows.push(DayRow {
        day: 2,
        cells: vec![Cell::Assigned(PersonId::new("bob")), Cell::Unfilled],
    });
    t
}

#[test]
fn schedule_grid_marks_holidays() {
    let holidays: BTreeSet<u32> = [2].into_iter().collect();
    let out = TextTable.render_schedule(&sample(), &holidays);
    assert_snapshot!(out, @r"
    Day | ER    | ICU1
    ----+-------+-----
    1   | alice | bob
    2*  | bob   | -
    ");
}

#[test]
fn summary_grid() {
    let holidays: BTreeSet<u32> = [2].into_iter().collect();
    let known = [PersonId::new("alice"), PersonId::new("bob"), PersonId::new("carol")];
    let summary = summarize_schedule(&sample(), &holidays, known.iter());
    let out = TextTable.render_summary(&summary);
    assert_snapshot!(out, @r"
    Name  | Total | Weekday | Holiday
    ------+-------+---------+--------
    alice | 1     | 1       | 0
    bob   | 2     | 1       | 1
    carol | 0     | 0       | 0
    ");
}
