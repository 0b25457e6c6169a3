#![forbid(unsafe_code)]
use anyhow::{anyhow, bail, Context, Result};
use chrono::Utc;
use clap::{Parser, Subcommand};
use duty_roster::{
    io,
    model::{Calendar, GeneratedSchedule, Person},
    render::{TableRenderer, TextTable},
    scheduler::{summarize_schedule, Scheduler},
    storage::{JsonStorage, Session, Storage},
};
use rand::rngs::StdRng;
use rand::SeedableRng;
#[cfg(feature = "logging")]
use tracing_subscriber::{fmt::Subscriber, EnvFilter};

/// CLI de répartition des gardes (sans base de données)
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Cli {
    /// Active les logs (feature `logging`)
    #[arg(long, global = true)]
    log: bool,

    /// Fichier JSON de session
    #[arg(long, global = true, default_value = "session.json")]
    session: String,

    #[command(subcommand)]
    cmd: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Ajouter ou remplacer une personne
    AddPerson {
        #[arg(long)]
        name: String,
        #[arg(long, allow_hyphen_values = true)]
        max_shifts: i32,
        /// liste "1;3-5;9"
        #[arg(long, default_value = "")]
        unavailable_days: String,
        #[arg(long, default_value = "")]
        preferred_days: String,
        /// liste "ER;ICU1"
        #[arg(long, default_value = "")]
        unavailable_roles: String,
    },

    /// Importer des personnes depuis un CSV
    ImportPeople {
        #[arg(long)]
        csv: String,
    },

    /// Lister les personnes et leurs contraintes
    People,

    /// Définir la période (nombre de jours ou mois réel)
    Calendar {
        #[arg(long, conflicts_with = "month")]
        days: Option<u32>,
        /// YYYY-MM
        #[arg(long)]
        month: Option<String>,
        /// Marque samedis et dimanches comme fériés (avec --month)
        #[arg(long, requires = "month")]
        weekends_as_holidays: bool,
    },

    /// Remplacer la liste des jours fériés
    Holidays {
        /// liste "1;7;14-15" (vide pour effacer)
        #[arg(default_value = "")]
        days: String,
    },

    /// Remplacer la liste ordonnée des rôles
    Roles {
        /// liste "ER;OPD;ICU1"
        roles: String,
    },

    /// Générer le tableau de gardes
    Generate {
        /// Remplace la durée du calendrier (enregistrée dans la session)
        #[arg(long)]
        days: Option<u32>,
        /// Graine pour une exécution reproductible
        #[arg(long)]
        seed: Option<u64>,
        #[arg(long)]
        out_csv: Option<String>,
        #[arg(long)]
        summary_csv: Option<String>,
    },

    /// Afficher (et exporter) le dernier tableau
    Show {
        #[arg(long)]
        out_csv: Option<String>,
        #[arg(long)]
        summary_csv: Option<String>,
    },

    /// Vérifier la configuration
    Check,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    #[cfg(feature = "logging")]
    if cli.log {
        let _ = Subscriber::builder()
            .with_env_filter(EnvFilter::from_default_env())
            .try_init();
    }

    let storage = JsonStorage::open(&cli.session)?;
    let session = storage.load_or_default()?;
    let mut last_schedule = session.last_schedule;
    let mut scheduler = Scheduler::from_parts(session.roster, session.calendar)
        .with_context(|| format!("invalid calendar in {}", cli.session))?;
    let renderer = TextTable;

    let code = match cli.cmd {
        Commands::AddPerson {
            name,
            max_shifts,
            unavailable_days,
            preferred_days,
            unavailable_roles,
        } => {
            let mut person = Person::new(&name, max_shifts);
            person.unavailable_days = io::parse_day_list(&unavailable_days)?;
            person.preferred_days = io::parse_day_list(&preferred_days)?;
            person.unavailable_roles = io::parse_role_list(&unavailable_roles).into_iter().collect();
            scheduler.upsert_person(person);
            save(&storage, scheduler, last_schedule)?;
            println!("saved {name}");
            0
        }
        Commands::ImportPeople { csv } => {
            let people = io::import_people_csv(csv)?;
            let n = people.len();
            scheduler.add_people(people);
            save(&storage, scheduler, last_schedule)?;
            println!("imported {n} person(s)");
            0
        }
        Commands::People => {
            for p in &scheduler.roster().people {
                println!(
                    "{} | max {} | unavailable days {:?} | preferred days {:?} | unavailable roles {:?}",
                    p.id,
                    p.max_shifts,
                    p.unavailable_days,
                    p.preferred_days,
                    p.unavailable_roles.iter().map(|r| r.as_str()).collect::<Vec<_>>()
                );
            }
            0
        }
        Commands::Calendar {
            days,
            month,
            weekends_as_holidays,
        } => {
            if let Some(month) = month {
                let (year, month) = parse_month(&month)?;
                let mut calendar = Calendar::for_month(year, month)?;
                if weekends_as_holidays {
                    calendar.holidays = Calendar::weekend_days(year, month)?;
                }
                scheduler.set_calendar(calendar)?;
            } else if let Some(days) = days {
                scheduler.set_num_days(days)?;
            } else {
                bail!("either --days or --month is required");
            }
            println!("period: {} day(s)", scheduler.calendar().num_days);
            save(&storage, scheduler, last_schedule)?;
            0
        }
        Commands::Holidays { days } => {
            scheduler.set_holidays(io::parse_day_list(&days)?);
            save(&storage, scheduler, last_schedule)?;
            0
        }
        Commands::Roles { roles } => {
            let roles = io::parse_role_list(&roles);
            scheduler.set_roles(roles.iter().map(|r| r.as_str()))?;
            save(&storage, scheduler, last_schedule)?;
            0
        }
        Commands::Generate {
            days,
            seed,
            out_csv,
            summary_csv,
        } => {
            if let Some(days) = days {
                scheduler.set_num_days(days)?;
            }
            let checked = match seed {
                Some(seed) => scheduler.generate_checked(&mut StdRng::seed_from_u64(seed)),
                None => scheduler.generate_checked(&mut rand::rng()),
            };
            match checked {
                Ok(table) => {
                    let summary = scheduler.summarize_schedule(&table);
                    let holidays = &scheduler.calendar().holidays;
                    print!("{}", renderer.render_schedule(&table, holidays));
                    println!();
                    print!("{}", renderer.render_summary(&summary));
                    if let Some(path) = out_csv {
                        io::export_schedule_csv(path, &table, holidays)?;
                    }
                    if let Some(path) = summary_csv {
                        io::export_summary_csv(path, &summary)?;
                    }
                    let unfilled = table.unfilled_count();
                    last_schedule = Some(GeneratedSchedule {
                        generated_at: Utc::now(),
                        seed,
                        holidays: holidays.clone(),
                        table,
                    });
                    save(&storage, scheduler, last_schedule)?;
                    if unfilled > 0 {
                        eprintln!("{unfilled} slot(s) could not be filled");
                    }
                    0
                }
                Err(err) => {
                    // tableau jamais affiché ni sauvegardé
                    eprintln!("error: {err}; adjust constraints and retry");
                    2
                }
            }
        }
        Commands::Show {
            out_csv,
            summary_csv,
        } => {
            let generated = last_schedule
                .as_ref()
                .ok_or_else(|| anyhow!("no schedule generated yet"))?;
            if !scheduler.validate_schedule(&generated.table) {
                bail!("stored schedule failed internal consistency check");
            }
            // fériés figés au moment de la génération
            let holidays = &generated.holidays;
            let summary = summarize_schedule(
                &generated.table,
                holidays,
                scheduler.roster().people.iter().map(|p| &p.id),
            );
            println!("generated at {}", generated.generated_at.to_rfc3339());
            print!("{}", renderer.render_schedule(&generated.table, holidays));
            println!();
            print!("{}", renderer.render_summary(&summary));
            if let Some(path) = out_csv {
                io::export_schedule_csv(path, &generated.table, holidays)?;
            }
            if let Some(path) = summary_csv {
                io::export_summary_csv(path, &summary)?;
            }
            0
        }
        Commands::Check => {
            let issues = scheduler.check_config();
            if issues.is_empty() {
                println!("OK: no configuration issue");
                0
            } else {
                eprintln!("Found {} issue(s)", issues.len());
                for issue in &issues {
                    eprintln!("  {issue}");
                }
                // Code 2 = WARNING
                2
            }
        }
    };

    std::process::exit(code);
}

fn save(
    storage: &JsonStorage,
    scheduler: Scheduler,
    last_schedule: Option<GeneratedSchedule>,
) -> Result<()> {
    let (roster, calendar) = scheduler.into_parts();
    storage.save(&Session {
        roster,
        calendar,
        last_schedule,
    })
}

fn parse_month(raw: &str) -> Result<(i32, u32)> {
    let (year, month) = raw
        .split_once('-')
        .with_context(|| format!("expected YYYY-MM, got {raw}"))?;
    let year: i32 = year.parse().with_context(|| format!("invalid year in {raw}"))?;
    let month: u32 = month.parse().with_context(|| format!("invalid month in {raw}"))?;
    Ok((year, month))
}
