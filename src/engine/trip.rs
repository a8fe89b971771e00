use super::availability::BusyScope;
use super::types::{BlockingShift, CoverageCandidate, DataWarning, SwapError, SwapOptions, TripCoverage};
use super::{guard_window, SwapEngine};
use crate::calendar;
use crate::model::{PersonId, PersonType};
use chrono::NaiveDate;
use std::collections::{BTreeMap, BTreeSet};

pub(super) fn find_trip_coverage(
    engine: &SwapEngine<'_>,
    who: &PersonId,
    start: NaiveDate,
    end: NaiveDate,
    depart_day_before: bool,
) -> Result<TripCoverage, SwapError> {
    if end < start {
        return Err(SwapError::EmptyRange { start, end });
    }
    guard_window((end - start).num_days())?;

    let tax = engine.taxonomy;
    let check_start = if depart_day_before {
        calendar::add_days(start, -1)
    } else {
        start
    };

    // Gardes du demandeur sur la plage : toute garde `call` bloque le voyage ;
    // la veille de départ, seules les nuits bloquent.
    let mut blocking_shifts = Vec::new();
    for rec in engine.schedule.shifts_in(who, check_start, end) {
        let blocks_travel = if rec.date < start {
            tax.is_night_call(&rec.shift)
        } else {
            tax.is_call(&rec.shift)
        };
        blocking_shifts.push(BlockingShift {
            date: rec.date,
            shift: rec.shift.clone(),
            blocks_travel,
        });
    }

    let blocked_dates: BTreeSet<NaiveDate> = blocking_shifts
        .iter()
        .filter(|b| b.blocks_travel)
        .map(|b| b.date)
        .collect();

    // Qui peut prendre chaque date bloquée, sous l'union complète ?
    let people = engine.schedule.people();
    let mut free_by_person: BTreeMap<PersonId, Vec<NaiveDate>> = BTreeMap::new();

    for &date in &blocked_dates {
        let my_labels = engine.schedule.labels_on(who, date);
        for person in &people {
            if person == who {
                continue;
            }
            if engine.is_busy(person, date, BusyScope::Full) {
                continue;
            }
            // Eux-mêmes post-garde ce jour-là : inutile de leur demander.
            let night_before = engine
                .schedule
                .labels_on(person, calendar::add_days(date, -1))
                .iter()
                .any(|l| tax.is_night_call(l));
            if night_before {
                continue;
            }
            if !eligible_to_cover(engine, person, &my_labels) {
                continue;
            }
            free_by_person.entry(person.clone()).or_default().push(date);
        }
    }

    let mut coverage: Vec<CoverageCandidate> = free_by_person
        .into_iter()
        .map(|(person, free_dates)| {
            let coverage_count = free_dates.len();
            CoverageCandidate {
                covers_all: !blocked_dates.is_empty() && coverage_count == blocked_dates.len(),
                good_samaritan: engine.prefs.is_good_samaritan(&person),
                person,
                free_dates,
                coverage_count,
            }
        })
        .collect();
    // Les plus couvrants d'abord ; nom pour départager.
    coverage.sort_by(|a, b| {
        b.coverage_count
            .cmp(&a.coverage_count)
            .then_with(|| a.person.cmp(&b.person))
    });

    let packages: Vec<CoverageCandidate> = coverage
        .iter()
        .filter(|c| c.coverage_count > 1)
        .cloned()
        .collect();

    // Pistes d'échange réciproque pour chaque garde bloquante.
    let mut swap_options: BTreeMap<NaiveDate, Vec<_>> = BTreeMap::new();
    for blocking in blocking_shifts.iter().filter(|b| b.blocks_travel) {
        let found = engine.find_swap_candidates(
            who,
            blocking.date,
            &blocking.shift,
            &SwapOptions::default(),
        )?;
        swap_options.entry(blocking.date).or_default().extend(found);
    }

    Ok(TripCoverage {
        data_warning: data_warning(engine, who, check_start, end),
        blocking_shifts,
        coverage,
        packages,
        swap_options,
    })
}

/// Un interne ne couvre jamais une garde ; les gardes CLI exigent la rotation
/// OB validée, sauf pour les CA3+ et fellows.
fn eligible_to_cover(
    engine: &SwapEngine<'_>,
    person: &PersonId,
    requester_labels: &BTreeSet<&str>,
) -> bool {
    let tax = engine.taxonomy;
    let ptype = engine.roster.person_type(person);

    let covers_call = requester_labels.iter().any(|l| tax.is_call(l));
    if covers_call && ptype == PersonType::Intern {
        return false;
    }

    let needs_ob = requester_labels.iter().any(|l| tax.requires_ob(l));
    if needs_ob && !ptype.is_senior() && !engine.roster.has_completed_ob(person) {
        return false;
    }

    true
}

/// Avertissement si le voyage déborde des données connues du demandeur.
fn data_warning(
    engine: &SwapEngine<'_>,
    who: &PersonId,
    check_start: NaiveDate,
    end: NaiveDate,
) -> Option<DataWarning> {
    let Some((first, last)) = engine.schedule.date_bounds(who) else {
        return Some(DataWarning {
            message: format!("no schedule records found for {who}"),
            boundary_date: check_start,
        });
    };
    if end > last {
        return Some(DataWarning {
            message: format!(
                "schedule data for {who} ends on {} but the trip extends to {}",
                calendar::format_date(last),
                calendar::format_date(end)
            ),
            boundary_date: last,
        });
    }
    if check_start < first {
        return Some(DataWarning {
            message: format!(
                "schedule data for {who} starts on {} but the trip begins on {}",
                calendar::format_date(first),
                calendar::format_date(check_start)
            ),
            boundary_date: first,
        });
    }
    None
}
