#![forbid(unsafe_code)]
use anyhow::{bail, Context, Result};
use chrono::Local;
use clap::{Parser, Subcommand};
use gardeswap::{
    calendar, io,
    model::{PersonId, Preferences, RosterInfo, Schedule},
    taxonomy::Taxonomy,
    SwapEngine, SwapOptions,
};
#[cfg(feature = "logging")]
use tracing_subscriber::{fmt::Subscriber, EnvFilter};

/// CLI minimaliste de recherche d'échanges de gardes (sans base de données)
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Cli {
    /// Active les logs (feature `logging`)
    #[arg(long, global = true)]
    log: bool,

    /// Planning CSV (header `date,name,shift`)
    #[arg(long, global = true, default_value = "schedule.csv")]
    schedule: String,

    /// Votre nom, tel qu'il apparaît dans le planning
    #[arg(long, global = true)]
    name: Option<String>,

    /// Préférences JSON (amis, préférence nuit, bons samaritains)
    #[arg(long, global = true, default_value = "friends.json")]
    prefs: String,

    /// Classement du roster JSON (niveaux, rotations OB)
    #[arg(long, global = true, default_value = "roster.json")]
    roster: String,

    #[command(subcommand)]
    cmd: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Résumé de votre planning à venir
    Summary {
        #[arg(long, default_value_t = 30)]
        days: u32,
    },

    /// Candidats pour échanger une garde précise
    Swap {
        /// Date de votre garde (YYYY-MM-DD)
        date: String,
        /// Libellé de la garde (auto-détecté sinon)
        #[arg(long)]
        shift: Option<String>,
        /// Ne montrer que les amis
        #[arg(long)]
        friends_only: bool,
        /// Export CSV des candidats (optionnel)
        #[arg(long)]
        out_csv: Option<String>,
    },

    /// Candidats pour échanger un week-end complet
    Weekend {
        /// Samedi de votre week-end (YYYY-MM-DD)
        saturday: String,
        #[arg(long, default_value_t = 4)]
        weeks: u32,
        #[arg(long)]
        friends_only: bool,
    },

    /// Échanger une garde de nuit contre une garde de jour du même jour
    NightToDay {
        /// Date de votre garde de nuit (YYYY-MM-DD)
        date: String,
        #[arg(long)]
        friends_only: bool,
    },

    /// Qui est libre un jour donné
    WhosFree {
        /// Date à vérifier (YYYY-MM-DD)
        date: String,
        #[arg(long)]
        friends_only: bool,
    },

    /// Couverture des gardes pendant un voyage
    Trip {
        /// Premier jour du voyage (YYYY-MM-DD)
        start: String,
        /// Dernier jour du voyage (YYYY-MM-DD)
        end: String,
        /// Inclure la nuit de la veille (départ en soirée)
        #[arg(long)]
        depart_day_before: bool,
        #[arg(long)]
        friends_only: bool,
    },

    /// Week-ends où vous (et vos amis) êtes libres
    Golden {
        #[arg(long, default_value_t = 12)]
        weeks: u32,
        /// Ne garder que les week-ends où vous êtes off
        #[arg(long)]
        only_off: bool,
    },

    /// Libellés du planning inconnus de la taxonomie
    Audit,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    #[cfg(feature = "logging")]
    if cli.log {
        let _ = Subscriber::builder()
            .with_env_filter(EnvFilter::from_default_env())
            .try_init();
    }

    let schedule = io::import_schedule_csv(&cli.schedule)
        .with_context(|| format!("loading schedule {}", cli.schedule))?;
    let prefs = io::load_preferences(&cli.prefs)?;
    let roster = io::load_roster_info(&cli.roster)?;
    let taxonomy = Taxonomy::standard();

    let code = run(&cli, &schedule, &taxonomy, &roster, &prefs)?;
    std::process::exit(code);
}

fn run(
    cli: &Cli,
    schedule: &Schedule,
    taxonomy: &Taxonomy,
    roster: &RosterInfo,
    prefs: &Preferences,
) -> Result<i32> {
    let engine = SwapEngine::new(schedule, taxonomy, roster, prefs);

    let code = match &cli.cmd {
        Commands::Summary { days } => {
            let me = require_name(cli)?;
            let today = Local::now().date_naive();
            let summary = engine.schedule_summary(&me, today, *days)?;
            println!(
                "{} | {} gardes, {} jours, {} jours off sur {} jours",
                me, summary.total_calls, summary.total_day_shifts, summary.days_off, days
            );
            match &summary.next_call {
                Some(call) => println!(
                    "Prochaine garde : {} dans {} jour(s) ({})",
                    calendar::format_date(call.date),
                    call.days_until,
                    call.shift
                ),
                None => println!("Prochaine garde : aucune"),
            }
            if let Some(sat) = summary.next_golden_weekend {
                println!("Prochain week-end off : {}", calendar::format_date(sat));
            }
            for s in &summary.upcoming {
                println!("  {} | {}", calendar::format_date(s.date), s.shift);
            }
            println!("Semaine      | gardes | jours | off");
            for w in &summary.weekly {
                println!(
                    "  {} | {:>6} | {:>5} | {:>3}",
                    calendar::format_date(w.week_of),
                    w.calls,
                    w.day_shifts,
                    w.off_days
                );
            }
            0
        }

        Commands::Swap {
            date,
            shift,
            friends_only,
            out_csv,
        } => {
            let me = require_name(cli)?;
            let date = calendar::parse_date(date)?;
            let shift = match shift {
                Some(s) => s.clone(),
                None => auto_detect_shift(schedule, &me, date)?,
            };
            let mut candidates =
                engine.find_swap_candidates(&me, date, &shift, &SwapOptions::default())?;
            if *friends_only {
                candidates.retain(|c| prefs.is_friend(&c.candidate));
            }
            if let Some(path) = out_csv {
                io::export_candidates_csv(path, &candidates)?;
            }
            if candidates.is_empty() {
                println!("No swap candidates found.");
            } else {
                for c in &candidates {
                    println!(
                        "{} | {} {} ↔ {} {}",
                        c.candidate,
                        calendar::format_date(c.their_date),
                        c.their_shift,
                        calendar::format_date(c.your_date),
                        c.your_shift
                    );
                }
            }
            0
        }

        Commands::Weekend {
            saturday,
            weeks,
            friends_only,
        } => {
            let me = require_name(cli)?;
            let saturday = calendar::parse_date(saturday)?;
            let mut candidates = engine.find_weekend_swaps(&me, saturday, *weeks, *weeks)?;
            if *friends_only {
                candidates.retain(|c| prefs.is_friend(&c.candidate));
            }
            if candidates.is_empty() {
                println!("No weekend swap candidates found.");
            } else {
                for c in &candidates {
                    println!(
                        "{} | Sat {} - Sun {} | {}↔{} | {} | {} / {}",
                        c.candidate,
                        calendar::format_date(c.saturday),
                        calendar::format_date(c.sunday),
                        c.mine,
                        c.theirs,
                        c.ease,
                        join_or_off(&c.sat_shifts),
                        join_or_off(&c.sun_shifts)
                    );
                }
            }
            0
        }

        Commands::NightToDay { date, friends_only } => {
            let me = require_name(cli)?;
            let date = calendar::parse_date(date)?;
            let night_shift = auto_detect_call_shift(&engine, &me, date)?;
            let mut candidates = engine.find_night_to_day_swaps(&me, date, &night_shift);
            if *friends_only {
                candidates.retain(|c| prefs.is_friend(&c.candidate));
            }
            if candidates.is_empty() {
                println!("No day-shift swap candidates found.");
            } else {
                for c in &candidates {
                    println!("{} | {} ↔ {}", c.candidate, c.their_shift, c.your_shift);
                }
            }
            0
        }

        Commands::WhosFree { date, friends_only } => {
            let date = calendar::parse_date(date)?;
            let mut free = engine.free_on(date);
            if *friends_only {
                free.retain(|a| prefs.is_friend(&a.person));
            }
            if free.is_empty() {
                println!("No one is free on {}.", calendar::format_date(date));
            } else {
                for a in &free {
                    println!("{} | {}", a.person, join_or_off(&a.labels));
                }
            }
            0
        }

        Commands::Trip {
            start,
            end,
            depart_day_before,
            friends_only,
        } => {
            let me = require_name(cli)?;
            let start = calendar::parse_date(start)?;
            let end = calendar::parse_date(end)?;
            let result = engine.find_trip_coverage(&me, start, end, *depart_day_before)?;

            println!("Gardes sur la période :");
            for b in &result.blocking_shifts {
                let mark = if b.blocks_travel { "BLOQUE" } else { "ok" };
                println!("  {} | {} | {}", calendar::format_date(b.date), b.shift, mark);
            }

            if !result.packages.is_empty() {
                println!("Package deals :");
                for p in &result.packages {
                    if *friends_only && !prefs.is_friend(&p.person) {
                        continue;
                    }
                    let tag = if p.good_samaritan { " (bon samaritain)" } else { "" };
                    println!(
                        "  {}{} couvre {} date(s){}",
                        p.person,
                        tag,
                        p.coverage_count,
                        if p.covers_all { " — tout le voyage" } else { "" }
                    );
                }
            }

            println!("Couverture par personne :");
            for c in &result.coverage {
                if *friends_only && !prefs.is_friend(&c.person) {
                    continue;
                }
                let dates: Vec<String> = c.free_dates.iter().copied().map(calendar::format_date).collect();
                println!("  {} | {}", c.person, dates.join(", "));
            }

            println!("Pistes d'échange :");
            for (date, swaps) in &result.swap_options {
                println!("  {} :", calendar::format_date(*date));
                for s in swaps.iter().take(5) {
                    if *friends_only && !prefs.is_friend(&s.candidate) {
                        continue;
                    }
                    println!(
                        "    - {} a {} le {}",
                        s.candidate,
                        s.their_shift,
                        calendar::format_date(s.their_date)
                    );
                }
            }

            if let Some(warning) = &result.data_warning {
                eprintln!("Warning: {}", warning.message);
                // Code 2 = WARNING/INCOMPLETE
                2
            } else {
                0
            }
        }

        Commands::Golden { weeks, only_off } => {
            let me = require_name(cli)?;
            let today = Local::now().date_naive();
            let mut weekends = engine.find_golden_weekends(&me, today, *weeks)?;
            if *only_off {
                weekends.retain(|w| w.i_am_off);
            }
            for w in &weekends {
                let status = if w.i_am_off { "OFF" } else { "travail" };
                let friends: Vec<&str> = w.friends_off.iter().map(|p| p.as_str()).collect();
                println!(
                    "Sat {} - Sun {} | {} | {} amis off ({}) | {} résidents off",
                    calendar::format_date(w.saturday),
                    calendar::format_date(w.sunday),
                    status,
                    w.friends_off.len(),
                    friends.join(", "),
                    w.residents_off.len()
                );
            }
            0
        }

        Commands::Audit => {
            let unmatched = taxonomy.unmatched_labels(schedule);
            if unmatched.is_empty() {
                println!("OK: every label matches a known category");
                0
            } else {
                eprintln!("Found {} unmatched label(s):", unmatched.len());
                for label in &unmatched {
                    println!("  {label}");
                }
                2
            }
        }
    };

    Ok(code)
}

fn require_name(cli: &Cli) -> Result<PersonId> {
    match &cli.name {
        Some(name) => Ok(PersonId::new(name)),
        None => bail!("missing --name (as it appears in the schedule)"),
    }
}

/// Première garde de la personne ce jour-là, sinon erreur.
fn auto_detect_shift(schedule: &Schedule, me: &PersonId, date: chrono::NaiveDate) -> Result<String> {
    schedule
        .labels_on(me, date)
        .into_iter()
        .next()
        .map(str::to_owned)
        .ok_or_else(|| anyhow::anyhow!("no shift found for {} on {}", me, calendar::format_date(date)))
}

fn auto_detect_call_shift(
    engine: &SwapEngine<'_>,
    me: &PersonId,
    date: chrono::NaiveDate,
) -> Result<String> {
    engine
        .schedule()
        .labels_on(me, date)
        .into_iter()
        .find(|label| engine.taxonomy().is_call(label))
        .map(str::to_owned)
        .ok_or_else(|| {
            anyhow::anyhow!("no call shift found for {} on {}", me, calendar::format_date(date))
        })
}

fn join_or_off(labels: &[String]) -> String {
    if labels.is_empty() {
        "OFF".to_owned()
    } else {
        labels.join(", ")
    }
}
