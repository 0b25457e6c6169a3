use crate::model::{AssignmentTable, Day, Person, RoleId};
use crate::scheduler::Summary;
use anyhow::{bail, Context};
use csv::{ReaderBuilder, WriterBuilder};
use std::collections::BTreeSet;
use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;

/// Import de personnes depuis CSV: header
/// `name,max_shifts[,unavailable_days][,preferred_days][,unavailable_roles]`.
///
/// Les listes sont séparées par `;` ; les jours acceptent les plages `3-5`.
pub fn import_people_csv<P: AsRef<Path>>(path: P) -> anyhow::Result<Vec<Person>> {
    let path = path.as_ref();
    let file = File::open(path).with_context(|| format!("opening {}", path.display()))?;
    read_people_csv(file)
}

pub fn read_people_csv<R: Read>(reader: R) -> anyhow::Result<Vec<Person>> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);
    let mut out = Vec::new();
    for rec in rdr.records() {
        let rec = rec?;
        let name = rec.get(0).context("missing name")?;
        if name.is_empty() {
            bail!("invalid people row (empty name)");
        }
        let max_shifts: i32 = rec
            .get(1)
            .context("missing max_shifts")?
            .parse()
            .with_context(|| format!("invalid max_shifts for {name}"))?;
        let mut person = Person::new(name, max_shifts);
        if let Some(raw) = rec.get(2) {
            person.unavailable_days = parse_day_list(raw)
                .with_context(|| format!("invalid unavailable_days for {name}"))?;
        }
        if let Some(raw) = rec.get(3) {
            person.preferred_days = parse_day_list(raw)
                .with_context(|| format!("invalid preferred_days for {name}"))?;
        }
        if let Some(raw) = rec.get(4) {
            person.unavailable_roles = parse_role_list(raw).into_iter().collect();
        }
        out.push(person);
    }
    Ok(out)
}

/// `"1;3-5;9"` -> {1,3,4,5,9}. Chaîne vide -> ensemble vide.
pub fn parse_day_list(raw: &str) -> anyhow::Result<BTreeSet<Day>> {
    let mut out = BTreeSet::new();
    for chunk in raw.split([';', ',']).map(str::trim).filter(|c| !c.is_empty()) {
        if let Some((start, end)) = chunk.split_once('-') {
            let start: Day = start.trim().parse().with_context(|| format!("bad day: {chunk}"))?;
            let end: Day = end.trim().parse().with_context(|| format!("bad day: {chunk}"))?;
            if end < start {
                bail!("day range {chunk} is reversed");
            }
            out.extend(start..=end);
        } else {
            out.insert(chunk.parse().with_context(|| format!("bad day: {chunk}"))?);
        }
    }
    Ok(out)
}

/// `"ER;ICU1"` -> [ER, ICU1], ordre conservé.
pub fn parse_role_list(raw: &str) -> Vec<RoleId> {
    raw.split([';', ','])
        .map(str::trim)
        .filter(|r| !r.is_empty())
        .map(RoleId::new)
        .collect()
}

/// Export CSV du tableau: header `Day,<rôles...>,Holiday`.
///
/// Une ligne par jour ; `-` pour une case non pourvue ; `yes` marque
/// la ligne entière d'un jour férié.
pub fn export_schedule_csv<P: AsRef<Path>>(
    path: P,
    table: &AssignmentTable,
    holidays: &BTreeSet<Day>,
) -> anyhow::Result<()> {
    let path = path.as_ref();
    let file = File::create(path).with_context(|| format!("creating {}", path.display()))?;
    write_schedule_csv(file, table, holidays)
}

pub fn write_schedule_csv<W: Write>(
    writer: W,
    table: &AssignmentTable,
    holidays: &BTreeSet<Day>,
) -> anyhow::Result<()> {
    let mut w = WriterBuilder::new().has_headers(true).from_writer(writer);
    let mut header = vec!["Day".to_string()];
    header.extend(table.roles.iter().map(|r| r.to_string()));
    header.push("Holiday".to_string());
    w.write_record(&header)?;

    for row in &table.rows {
        let mut record = vec![row.day.to_string()];
        record.extend(row.cells.iter().map(|c| c.to_string()));
        // lignes courtes complétées pour garder un CSV rectangulaire
        record.resize(table.roles.len() + 1, "-".to_string());
        let marked = if holidays.contains(&row.day) { "yes" } else { "" };
        record.push(marked.to_string());
        w.write_record(&record)?;
    }
    w.flush()?;
    Ok(())
}

/// Export CSV du récapitulatif: header `name,total,weekday,holiday`
pub fn export_summary_csv<P: AsRef<Path>>(path: P, summary: &Summary) -> anyhow::Result<()> {
    let path = path.as_ref();
    let file = File::create(path).with_context(|| format!("creating {}", path.display()))?;
    write_summary_csv(file, summary)
}

pub fn write_summary_csv<W: Write>(writer: W, summary: &Summary) -> anyhow::Result<()> {
    let mut w = WriterBuilder::new().has_headers(true).from_writer(writer);
    w.write_record(["name", "total", "weekday", "holiday"])?;
    for r in summary.iter() {
        let total = r.total.to_string();
        let weekday = r.weekday.to_string();
        let holiday = r.holiday.to_string();
        w.write_record([
            r.person.as_str(),
            total.as_str(),
            weekday.as_str(),
            holiday.as_str(),
        ])?;
    }
    w.flush()?;
    Ok(())
}
