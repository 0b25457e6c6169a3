use crate::model::{AssignmentTable, Day};
use crate::scheduler::Summary;
use std::collections::BTreeSet;

/// Permet de customiser le rendu des tableaux (texte, markdown, etc.).
pub trait TableRenderer {
    fn render_schedule(&self, table: &AssignmentTable, holidays: &BTreeSet<Day>) -> String;
    fn render_summary(&self, summary: &Summary) -> String;
}

/// Grille texte alignée ; les jours fériés sont suffixés par `*`.
#[derive(Debug, Default, Clone, Copy)]
pub struct TextTable;

impl TableRenderer for TextTable {
    fn render_schedule(&self, table: &AssignmentTable, holidays: &BTreeSet<Day>) -> String {
        let mut header = vec!["Day".to_string()];
        header.extend(table.roles.iter().map(|r| r.to_string()));

        let rows = table
            .rows
            .iter()
            .map(|row| {
                let marker = if holidays.contains(&row.day) { "*" } else { "" };
                let mut line = vec![format!("{}{marker}", row.day)];
                line.extend(row.cells.iter().map(|c| c.to_string()));
                line
            })
            .collect::<Vec<_>>();

        render_grid(&header, &rows)
    }

    fn render_summary(&self, summary: &Summary) -> String {
        let header = ["Name", "Total", "Weekday", "Holiday"].map(String::from);
        let rows = summary
            .iter()
            .map(|r| {
                vec![
                    r.person.to_string(),
                    r.total.to_string(),
                    r.weekday.to_string(),
                    r.holiday.to_string(),
                ]
            })
            .collect::<Vec<_>>();
        render_grid(&header, &rows)
    }
}

fn render_grid(header: &[String], rows: &[Vec<String>]) -> String {
    let mut widths: Vec<usize> = header.iter().map(|h| h.chars().count()).collect();
    for row in rows {
        for (idx, cell) in row.iter().enumerate() {
            let len = cell.chars().count();
            match widths.get_mut(idx) {
                Some(w) => *w = (*w).max(len),
                None => widths.push(len),
            }
        }
    }

    let line = |cells: &[String]| -> String {
        let joined = cells
            .iter()
            .zip(widths.iter())
            .map(|(c, &w)| format!("{c:<w$}"))
            .collect::<Vec<_>>()
            .join(" | ");
        joined.trim_end().to_string()
    };

    let mut out = String::new();
    out.push_str(&line(header));
    out.push('\n');
    let sep = widths
        .iter()
        .map(|&w| "-".repeat(w))
        .collect::<Vec<_>>()
        .join("-+-");
    out.push_str(&sep);
    out.push('\n');
    for row in rows {
        out.push_str(&line(row));
        out.push('\n');
    }
    out
}
