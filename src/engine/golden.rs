use super::types::{GoldenWeekend, SwapError};
use super::{guard_window, SwapEngine};
use crate::calendar;
use crate::model::PersonId;
use chrono::NaiveDate;

pub(super) fn find_golden_weekends(
    engine: &SwapEngine<'_>,
    who: &PersonId,
    from: NaiveDate,
    weeks: u32,
) -> Result<Vec<GoldenWeekend>, SwapError> {
    let horizon = 7 * i64::from(weeks);
    guard_window(horizon)?;
    let end = calendar::add_days(from, horizon);

    let tax = engine.taxonomy;
    let people = engine.schedule.people();
    let mut out = Vec::new();

    let mut saturday = calendar::saturday_on_or_after(from);
    while saturday <= end {
        let sunday = calendar::add_days(saturday, 1);

        // « Off » pour moi : aucun libellé, ou uniquement des libellés
        // compatibles repos (vacances, post-garde, excusé).
        let i_am_off = engine
            .schedule
            .labels_on(who, saturday)
            .iter()
            .chain(engine.schedule.labels_on(who, sunday).iter())
            .all(|label| tax.weekend_off_compatible(label));

        let mut residents_off = Vec::new();
        let mut friends_off = Vec::new();
        for person in &people {
            if person == who {
                continue;
            }
            let working = engine
                .schedule
                .labels_on(person, saturday)
                .iter()
                .chain(engine.schedule.labels_on(person, sunday).iter())
                .any(|label| tax.is_call(label) || tax.is_day(label));
            if working {
                continue;
            }
            if engine.prefs.is_friend(person) {
                friends_off.push(person.clone());
            }
            residents_off.push(person.clone());
        }

        out.push(GoldenWeekend {
            saturday,
            sunday,
            i_am_off,
            residents_off,
            friends_off,
        });
        saturday = calendar::add_days(saturday, 7);
    }

    // Chronologique : l'appelant filtre sur `i_am_off` ou retrie à sa guise.
    Ok(out)
}
