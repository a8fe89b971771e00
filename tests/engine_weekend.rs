#![forbid(unsafe_code)]
use chrono::NaiveDate;
use gardeswap::{
    calendar,
    model::{PersonId, Preferences, RosterInfo, Schedule, ShiftRecord},
    EaseLevel, SwapEngine, SwapError, Taxonomy, WeekendType,
};

fn d(s: &str) -> NaiveDate {
    calendar::parse_date(s).unwrap()
}

fn rec(date: &str, person: &str, shift: &str) -> ShiftRecord {
    ShiftRecord::new(d(date), person, shift)
}

#[test]
fn rejects_non_saturday() {
    let tax = Taxonomy::standard();
    let roster = RosterInfo::default();
    let prefs = Preferences::default();
    let schedule = Schedule::new(vec![rec("2025-02-01", "Me", "CA CV Call")]);
    let engine = SwapEngine::new(&schedule, &tax, &roster, &prefs);

    let err = engine
        .find_weekend_swaps(&PersonId::new("Me"), d("2025-02-02"), 0, 1)
        .unwrap_err();
    assert!(matches!(err, SwapError::NotSaturday(_)));
}

#[test]
fn night_weekend_against_free_weekend() {
    let tax = Taxonomy::standard();
    let roster = RosterInfo::default();
    let prefs = Preferences::default();
    let me = PersonId::new("Me");

    let schedule = Schedule::new(vec![
        rec("2025-02-01", "Me", "CA CLI Night Call"),
        rec("2025-02-02", "Me", "CA Post Call"),
        // Bob existe dans le planning mais son week-end du 8-9 est vide.
        rec("2025-02-05", "Bob", "CA GOR"),
    ]);
    let engine = SwapEngine::new(&schedule, &tax, &roster, &prefs);

    let found = engine.find_weekend_swaps(&me, d("2025-02-01"), 0, 1).unwrap();
    assert_eq!(found.len(), 1);
    let c = &found[0];
    assert_eq!(c.candidate.as_str(), "Bob");
    assert_eq!(c.saturday, d("2025-02-08"));
    assert_eq!(c.sunday, d("2025-02-09"));
    assert_eq!(c.mine, WeekendType::Night);
    assert_eq!(c.theirs, WeekendType::Off);
    // Nuit contre repos, sans goût pour les nuits : vente difficile.
    assert_eq!(c.ease, EaseLevel::HardSell);
}

#[test]
fn prefers_nights_softens_the_trade() {
    let tax = Taxonomy::standard();
    let roster = RosterInfo::default();
    let mut prefs = Preferences::default();
    prefs.prefers_nights.insert(PersonId::new("Bob"));
    let me = PersonId::new("Me");

    let schedule = Schedule::new(vec![
        rec("2025-02-01", "Me", "CA CLI Night Call"),
        rec("2025-02-05", "Bob", "CA GOR"),
    ]);
    let engine = SwapEngine::new(&schedule, &tax, &roster, &prefs);

    let found = engine.find_weekend_swaps(&me, d("2025-02-01"), 0, 1).unwrap();
    assert_eq!(found[0].ease, EaseLevel::Moderate);
}

#[test]
fn vacation_weekend_is_very_hard() {
    let tax = Taxonomy::standard();
    let roster = RosterInfo::default();
    let prefs = Preferences::default();
    let me = PersonId::new("Me");

    let schedule = Schedule::new(vec![
        rec("2025-02-01", "Me", "CA CLI Night Call"),
        rec("2025-02-08", "Bob", "CA Vacation"),
    ]);
    let engine = SwapEngine::new(&schedule, &tax, &roster, &prefs);

    let found = engine.find_weekend_swaps(&me, d("2025-02-01"), 0, 1).unwrap();
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].ease, EaseLevel::VeryHard);
}

#[test]
fn icu_weekend_excludes_both_sides() {
    let tax = Taxonomy::standard();
    let roster = RosterInfo::default();
    let prefs = Preferences::default();
    let me = PersonId::new("Me");

    // Réa sur MON week-end : rien n'est négociable.
    let schedule = Schedule::new(vec![
        rec("2025-02-01", "Me", "CA SICU"),
        rec("2025-02-05", "Bob", "CA GOR"),
    ]);
    let engine = SwapEngine::new(&schedule, &tax, &roster, &prefs);
    assert!(engine
        .find_weekend_swaps(&me, d("2025-02-01"), 0, 1)
        .unwrap()
        .is_empty());

    // Réa sur le week-end du candidat : candidat écarté.
    let schedule = Schedule::new(vec![
        rec("2025-02-01", "Me", "CA CLI Night Call"),
        rec("2025-02-09", "Bob", "CA CTICU"),
        rec("2025-02-05", "Carol", "CA GOR"),
    ]);
    let engine = SwapEngine::new(&schedule, &tax, &roster, &prefs);
    let found = engine.find_weekend_swaps(&me, d("2025-02-01"), 0, 1).unwrap();
    let names: Vec<&str> = found.iter().map(|c| c.candidate.as_str()).collect();
    assert_eq!(names, vec!["Carol"]);
}

#[test]
fn busy_candidates_are_skipped() {
    let tax = Taxonomy::standard();
    let roster = RosterInfo::default();
    let prefs = Preferences::default();
    let me = PersonId::new("Me");

    let schedule = Schedule::new(vec![
        rec("2025-02-01", "Me", "CA CLI Night Call"),
        // Bob est de garde sur MON samedi : indisponible pour l'échange.
        rec("2025-02-01", "Bob", "CA CV Call"),
        rec("2025-02-05", "Carol", "CA GOR"),
    ]);
    let engine = SwapEngine::new(&schedule, &tax, &roster, &prefs);

    let found = engine.find_weekend_swaps(&me, d("2025-02-01"), 0, 1).unwrap();
    let names: Vec<&str> = found.iter().map(|c| c.candidate.as_str()).collect();
    assert_eq!(names, vec!["Carol"]);
}

#[test]
fn results_are_chronological_then_by_ease() {
    let tax = Taxonomy::standard();
    let roster = RosterInfo::default();
    let prefs = Preferences::default();
    let me = PersonId::new("Me");

    let schedule = Schedule::new(vec![
        rec("2025-02-01", "Me", "CA CLI Night Call"),
        // Week-end du 8-9 : Bob libre (HardSell), Carol de nuit (Easy).
        rec("2025-02-05", "Bob", "CA GOR"),
        rec("2025-02-08", "Carol", "CA Senior Night Call"),
        // Week-end du 15-16 : Dan libre.
        rec("2025-02-12", "Dan", "CA GOR"),
    ]);
    let engine = SwapEngine::new(&schedule, &tax, &roster, &prefs);

    let found = engine.find_weekend_swaps(&me, d("2025-02-01"), 0, 2).unwrap();
    // Samedis jamais décroissants, facilité jamais décroissante à samedi égal.
    for pair in found.windows(2) {
        assert!(pair[0].saturday <= pair[1].saturday);
        if pair[0].saturday == pair[1].saturday {
            assert!(pair[0].ease <= pair[1].ease);
        }
    }
    // Dans le week-end du 8-9, la nuit de Carol est le pari le plus facile.
    let first_of_feb8 = found.iter().find(|c| c.saturday == d("2025-02-08")).unwrap();
    assert_eq!(first_of_feb8.candidate.as_str(), "Carol");
    assert_eq!(first_of_feb8.ease, EaseLevel::Easy);
}

#[test]
fn post_call_blocks_candidate_working_the_day_after_my_night() {
    let tax = Taxonomy::standard();
    let roster = RosterInfo::default();
    let prefs = Preferences::default();
    let me = PersonId::new("Me");

    let schedule = Schedule::new(vec![
        rec("2025-02-01", "Me", "CA CLI Night Call"),
        // Bob travaille le dimanche 2 : il ne peut pas prendre ma nuit du samedi.
        rec("2025-02-02", "Bob", "CA GOR"),
        rec("2025-02-05", "Bob", "CA GOR"),
        rec("2025-02-05", "Carol", "CA GOR"),
    ]);
    let engine = SwapEngine::new(&schedule, &tax, &roster, &prefs);

    let found = engine.find_weekend_swaps(&me, d("2025-02-01"), 0, 1).unwrap();
    let names: Vec<&str> = found.iter().map(|c| c.candidate.as_str()).collect();
    assert_eq!(names, vec!["Carol"]);
}
