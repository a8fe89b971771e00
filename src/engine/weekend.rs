use super::availability::BusyScope;
use super::ease::swap_ease;
use super::types::{SwapError, WeekendSwapCandidate};
use super::{guard_window, SwapEngine};
use crate::calendar;
use crate::model::PersonId;
use chrono::NaiveDate;
use std::collections::BTreeSet;

pub(super) fn find_weekend_swaps(
    engine: &SwapEngine<'_>,
    who: &PersonId,
    saturday: NaiveDate,
    weeks_back: u32,
    weeks_forward: u32,
) -> Result<Vec<WeekendSwapCandidate>, SwapError> {
    if calendar::weekday_index(saturday) != 6 {
        return Err(SwapError::NotSaturday(saturday));
    }
    let sunday = calendar::add_days(saturday, 1);
    let start = calendar::add_days(saturday, -7 * i64::from(weeks_back));
    let end = calendar::add_days(sunday, 7 * i64::from(weeks_forward));
    guard_window((end - start).num_days())?;

    let tax = engine.taxonomy;

    // ICU sur mon propre week-end : rien n'est négociable, liste vide.
    if engine.weekend_has_icu(who, saturday) {
        return Ok(Vec::new());
    }

    let my_sat: BTreeSet<String> = owned_labels(engine, who, saturday);
    let my_sun: BTreeSet<String> = owned_labels(engine, who, sunday);
    let my_type = tax.weekend_type(my_sat.iter().chain(my_sun.iter()).map(String::as_str));
    let my_night_sat = my_sat.iter().any(|l| tax.is_night_call(l));
    let my_night_sun = my_sun.iter().any(|l| tax.is_night_call(l));

    let people = engine.schedule.people();
    let mut out = Vec::new();

    for (their_sat, their_sun) in calendar::weekends_between(start, end) {
        if their_sat == saturday {
            continue; // jamais son propre week-end
        }

        for person in &people {
            if person == who {
                continue;
            }

            // Exclusion ICU, les deux personnes sur les deux week-ends.
            if engine.weekend_has_icu(person, their_sat)
                || engine.weekend_has_icu(person, saturday)
                || engine.weekend_has_icu(who, their_sat)
            {
                continue;
            }

            // Disponibilité croisée sous `call ∪ unavailable`.
            let they_free = !engine.is_busy(person, saturday, BusyScope::Negotiable)
                && !engine.is_busy(person, sunday, BusyScope::Negotiable);
            let me_free = !engine.is_busy(who, their_sat, BusyScope::Negotiable)
                && !engine.is_busy(who, their_sun, BusyScope::Negotiable);
            if !they_free || !me_free {
                continue;
            }

            let sat_labels = owned_labels(engine, person, their_sat);
            let sun_labels = owned_labels(engine, person, their_sun);

            // Post-garde jour par jour : une nuit le samedi ne regarde que J+1.
            let their_night_sat = sat_labels.iter().any(|l| tax.is_night_call(l));
            let their_night_sun = sun_labels.iter().any(|l| tax.is_night_call(l));
            if their_night_sat && engine.has_post_call_conflict(who, their_sat) {
                continue;
            }
            if their_night_sun && engine.has_post_call_conflict(who, their_sun) {
                continue;
            }
            if my_night_sat && engine.has_post_call_conflict(person, saturday) {
                continue;
            }
            if my_night_sun && engine.has_post_call_conflict(person, sunday) {
                continue;
            }

            let their_type =
                tax.weekend_type(sat_labels.iter().chain(sun_labels.iter()).map(String::as_str));
            let has_vacation = sat_labels
                .iter()
                .chain(sun_labels.iter())
                .any(|l| tax.is_vacation(l));
            let ease = swap_ease(
                my_type,
                their_type,
                engine.prefs.prefers_night(person),
                has_vacation,
            );

            out.push(WeekendSwapCandidate {
                candidate: person.clone(),
                saturday: their_sat,
                sunday: their_sun,
                sat_shifts: sat_labels.into_iter().collect(),
                sun_shifts: sun_labels.into_iter().collect(),
                mine: my_type,
                theirs: their_type,
                ease,
            });
        }
    }

    // Ordre canonique : chronologique, puis facilité croissante.
    out.sort_by_key(|c| (c.saturday, c.ease));
    Ok(out)
}

fn owned_labels(engine: &SwapEngine<'_>, person: &PersonId, date: NaiveDate) -> BTreeSet<String> {
    engine
        .schedule
        .labels_on(person, date)
        .into_iter()
        .map(str::to_owned)
        .collect()
}
