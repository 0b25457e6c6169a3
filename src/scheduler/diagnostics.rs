use super::{ConfigIssue, ConfigIssueKind};
use crate::model::{Calendar, Person, Roster};

pub(super) fn check_config(roster: &Roster, calendar: &Calendar) -> Vec<ConfigIssue> {
    let mut out = Vec::new();

    for person in &roster.people {
        let mut push = |kind| {
            out.push(ConfigIssue {
                person: Some(person.id.clone()),
                kind,
            })
        };

        if person.max_shifts <= 0 {
            push(ConfigIssueKind::NonPositiveCap(person.max_shifts));
        }
        for &day in &person.unavailable_days {
            if !calendar.contains(day) {
                push(ConfigIssueKind::UnavailableDayOutOfRange(day));
            }
        }
        for &day in &person.preferred_days {
            if !calendar.contains(day) {
                push(ConfigIssueKind::PreferredDayOutOfRange(day));
            }
        }
        for role in &person.unavailable_roles {
            if !roster.has_role(role) {
                push(ConfigIssueKind::UnknownRole(role.clone()));
            }
        }
        if never_schedulable(person, roster, calendar) {
            push(ConfigIssueKind::NeverSchedulable);
        }
    }

    for &day in &calendar.holidays {
        if !calendar.contains(day) {
            out.push(ConfigIssue {
                person: None,
                kind: ConfigIssueKind::HolidayOutOfRange(day),
            });
        }
    }

    out
}

fn never_schedulable(person: &Person, roster: &Roster, calendar: &Calendar) -> bool {
    let no_day = (1..=calendar.num_days).all(|d| !person.is_available_on(d));
    let no_role = roster.roles.iter().all(|r| !person.accepts_role(r));
    !person.has_capacity(0) || no_day || no_role
}
