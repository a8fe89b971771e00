use super::availability::BusyScope;
use super::types::{DayTradeCandidate, SwapCandidate, SwapError, SwapOptions};
use super::{guard_window, SwapEngine};
use crate::calendar;
use crate::model::PersonId;
use chrono::NaiveDate;

/// Fenêtre par défaut autour de la garde à céder.
const DEFAULT_WINDOW_DAYS: i64 = 14;

pub(super) fn find_swap_candidates(
    engine: &SwapEngine<'_>,
    who: &PersonId,
    date: NaiveDate,
    shift: &str,
    opts: &SwapOptions,
) -> Result<Vec<SwapCandidate>, SwapError> {
    let (start, end) = match opts.window {
        Some((start, end)) => {
            if end < start {
                return Err(SwapError::EmptyRange { start, end });
            }
            (start, end)
        }
        None => (
            calendar::add_days(date, -DEFAULT_WINDOW_DAYS),
            calendar::add_days(date, DEFAULT_WINDOW_DAYS),
        ),
    };
    guard_window((end - start).num_days())?;

    let tax = engine.taxonomy;
    let my_shift_is_call = tax.is_call(shift);
    let my_shift_is_night = tax.is_night_call(shift);
    let target = opts.target_label.as_ref().map(|t| t.to_lowercase());

    let mut out = Vec::new();

    for person in engine.schedule.people() {
        if &person == who {
            continue;
        }
        // Déjà pris (garde ou indisponibilité) le jour que je veux céder.
        if engine.is_busy(&person, date, BusyScope::Negotiable) {
            continue;
        }

        for rec in engine.schedule.shifts_in(&person, start, end) {
            // Filtre explicite de libellé, sinon garde-contre-garde.
            if let Some(needle) = &target {
                if !rec.shift.to_lowercase().contains(needle) {
                    continue;
                }
            } else if my_shift_is_call && !tax.is_call(&rec.shift) {
                continue;
            }

            // Moi, libre le jour qu'ils offrent ?
            if engine.is_busy(who, rec.date, BusyScope::Negotiable) {
                continue;
            }

            // Post-garde, dans les deux sens selon qui récupère une nuit.
            if tax.is_night_call(&rec.shift) && engine.has_post_call_conflict(who, rec.date) {
                continue;
            }
            if my_shift_is_night && engine.has_post_call_conflict(&person, date) {
                continue;
            }

            out.push(SwapCandidate {
                candidate: person.clone(),
                their_date: rec.date,
                their_shift: rec.shift.clone(),
                your_date: date,
                your_shift: shift.to_owned(),
            });
        }
    }

    // Tri stable : l'ordre d'énumération départage à date égale.
    out.sort_by_key(|c| c.their_date);
    Ok(out)
}

/// Titulaires d'une garde de jour le même jour, qui ne sont pas aussi de garde.
pub(super) fn find_night_to_day_swaps(
    engine: &SwapEngine<'_>,
    who: &PersonId,
    date: NaiveDate,
    night_shift: &str,
) -> Vec<DayTradeCandidate> {
    let tax = engine.taxonomy;
    let mut out = Vec::new();

    for rec in engine.schedule.records() {
        if rec.date != date || &rec.person == who || !tax.is_day(&rec.shift) {
            continue;
        }
        let also_on_call = engine
            .schedule
            .labels_on(&rec.person, date)
            .iter()
            .any(|label| tax.is_call(label));
        if also_on_call {
            continue;
        }
        out.push(DayTradeCandidate {
            candidate: rec.person.clone(),
            date,
            their_shift: rec.shift.clone(),
            your_shift: night_shift.to_owned(),
        });
    }

    out
}
