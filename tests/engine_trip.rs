#![forbid(unsafe_code)]
use chrono::NaiveDate;
use gardeswap::{
    calendar,
    model::{PersonId, PersonType, Preferences, RosterInfo, Schedule, ShiftRecord},
    SwapEngine, SwapError, Taxonomy,
};

fn d(s: &str) -> NaiveDate {
    calendar::parse_date(s).unwrap()
}

fn rec(date: &str, person: &str, shift: &str) -> ShiftRecord {
    ShiftRecord::new(d(date), person, shift)
}

/// Planning de référence : voyage du lundi 10 au vendredi 14 mars 2025.
fn trip_fixture() -> (Schedule, RosterInfo, Preferences) {
    let schedule = Schedule::new(vec![
        // Le demandeur : deux gardes bloquantes, une journée qui ne bloque pas.
        rec("2025-03-10", "Me", "CA CV Call"),
        rec("2025-03-12", "Me", "CA GOR"),
        rec("2025-03-13", "Me", "CA CLI Day Call"),
        rec("2025-03-20", "Me", "CA GOR"),
        // Alice (CA3, bonne samaritaine) : libre sur les deux dates bloquées.
        rec("2025-03-20", "Alice", "CA GOR"),
        // Bob (CA2, rotation OB validée) : occupé le 10, libre le 13.
        rec("2025-03-10", "Bob", "CA GOR"),
        // Carl : nuit le 12, donc inutilisable le 13.
        rec("2025-03-12", "Carl", "CA CLI Night Call"),
        // Ivan : interne, jamais sur une garde.
        rec("2025-03-25", "Ivan", "CA GOR"),
        // Zed : une garde le 18, piste d'échange réciproque.
        rec("2025-03-18", "Zed", "CA COMER Call"),
    ]);

    let mut roster = RosterInfo::default();
    roster.types.insert(PersonId::new("Alice"), PersonType::Ca3);
    roster.types.insert(PersonId::new("Bob"), PersonType::Ca2);
    roster.types.insert(PersonId::new("Ivan"), PersonType::Intern);
    roster.ob_completed.insert(PersonId::new("Bob"));

    let mut prefs = Preferences::default();
    prefs.good_samaritans.insert(PersonId::new("Alice"));

    (schedule, roster, prefs)
}

#[test]
fn blocking_shifts_distinguish_call_from_day() {
    let tax = Taxonomy::standard();
    let (schedule, roster, prefs) = trip_fixture();
    let engine = SwapEngine::new(&schedule, &tax, &roster, &prefs);

    let trip = engine
        .find_trip_coverage(&PersonId::new("Me"), d("2025-03-10"), d("2025-03-14"), false)
        .unwrap();

    let summary: Vec<(NaiveDate, &str, bool)> = trip
        .blocking_shifts
        .iter()
        .map(|b| (b.date, b.shift.as_str(), b.blocks_travel))
        .collect();
    assert_eq!(
        summary,
        vec![
            (d("2025-03-10"), "CA CV Call", true),
            (d("2025-03-12"), "CA GOR", false),
            (d("2025-03-13"), "CA CLI Day Call", true),
        ]
    );
    assert!(trip.data_warning.is_none());
}

#[test]
fn coverage_ranks_by_count_then_name() {
    let tax = Taxonomy::standard();
    let (schedule, roster, prefs) = trip_fixture();
    let engine = SwapEngine::new(&schedule, &tax, &roster, &prefs);

    let trip = engine
        .find_trip_coverage(&PersonId::new("Me"), d("2025-03-10"), d("2025-03-14"), false)
        .unwrap();

    let ranked: Vec<(&str, usize)> = trip
        .coverage
        .iter()
        .map(|c| (c.person.as_str(), c.coverage_count))
        .collect();
    // Ivan (interne) absent ; Carl écarté du 13 par sa nuit du 12 ;
    // Zed écarté du 13 faute de rotation OB.
    assert_eq!(
        ranked,
        vec![("Alice", 2), ("Bob", 1), ("Carl", 1), ("Zed", 1)]
    );

    let alice = &trip.coverage[0];
    assert!(alice.covers_all);
    assert!(alice.good_samaritan);
    assert_eq!(alice.free_dates, vec![d("2025-03-10"), d("2025-03-13")]);
    assert!(!trip.coverage[1].covers_all);

    // Les offres groupées ne retiennent que les multi-dates.
    let packages: Vec<&str> = trip.packages.iter().map(|c| c.person.as_str()).collect();
    assert_eq!(packages, vec!["Alice"]);
}

#[test]
fn swap_options_cover_each_blocking_shift() {
    let tax = Taxonomy::standard();
    let (schedule, roster, prefs) = trip_fixture();
    let engine = SwapEngine::new(&schedule, &tax, &roster, &prefs);

    let trip = engine
        .find_trip_coverage(&PersonId::new("Me"), d("2025-03-10"), d("2025-03-14"), false)
        .unwrap();

    let on_10 = trip.swap_options.get(&d("2025-03-10")).unwrap();
    assert!(on_10.iter().any(|s| s.candidate.as_str() == "Zed"));
    assert!(trip.swap_options.contains_key(&d("2025-03-13")));
}

#[test]
fn departure_eve_only_minds_night_calls() {
    let tax = Taxonomy::standard();
    let roster = RosterInfo::default();
    let prefs = Preferences::default();
    let me = PersonId::new("Me");

    let schedule = Schedule::new(vec![
        rec("2025-03-09", "Me", "CA CLI Night Call"),
        rec("2025-03-09", "Me", "CA CLI Day Call"),
        rec("2025-03-20", "Me", "CA GOR"),
    ]);
    let engine = SwapEngine::new(&schedule, &tax, &roster, &prefs);

    // Sans veille de départ, le 9 n'est pas examiné du tout.
    let trip = engine
        .find_trip_coverage(&me, d("2025-03-10"), d("2025-03-14"), false)
        .unwrap();
    assert!(trip.blocking_shifts.is_empty());

    // Avec la veille : la nuit bloque, la garde de jour non.
    let trip = engine
        .find_trip_coverage(&me, d("2025-03-10"), d("2025-03-14"), true)
        .unwrap();
    let blocks: Vec<(&str, bool)> = trip
        .blocking_shifts
        .iter()
        .map(|b| (b.shift.as_str(), b.blocks_travel))
        .collect();
    assert!(blocks.contains(&("CA CLI Night Call", true)));
    assert!(blocks.contains(&("CA CLI Day Call", false)));
}

#[test]
fn warns_when_trip_outruns_the_data() {
    let tax = Taxonomy::standard();
    let roster = RosterInfo::default();
    let prefs = Preferences::default();
    let me = PersonId::new("Me");

    let schedule = Schedule::new(vec![
        rec("2025-03-01", "Me", "CA GOR"),
        rec("2025-04-30", "Me", "CA GOR"),
    ]);
    let engine = SwapEngine::new(&schedule, &tax, &roster, &prefs);

    let trip = engine
        .find_trip_coverage(&me, d("2025-05-01"), d("2025-05-05"), false)
        .unwrap();
    let warning = trip.data_warning.unwrap();
    assert_eq!(warning.boundary_date, d("2025-04-30"));

    // Personne inconnue du planning : avertissement, pas d'erreur.
    let trip = engine
        .find_trip_coverage(&PersonId::new("Ghost"), d("2025-05-01"), d("2025-05-05"), true)
        .unwrap();
    let warning = trip.data_warning.unwrap();
    assert_eq!(warning.boundary_date, d("2025-04-30"));
    assert!(trip.blocking_shifts.is_empty());
}

#[test]
fn rejects_inverted_or_huge_ranges() {
    let tax = Taxonomy::standard();
    let roster = RosterInfo::default();
    let prefs = Preferences::default();
    let schedule = Schedule::new(vec![rec("2025-03-01", "Me", "CA GOR")]);
    let engine = SwapEngine::new(&schedule, &tax, &roster, &prefs);
    let me = PersonId::new("Me");

    let err = engine
        .find_trip_coverage(&me, d("2025-03-14"), d("2025-03-10"), false)
        .unwrap_err();
    assert!(matches!(err, SwapError::EmptyRange { .. }));

    let err = engine
        .find_trip_coverage(&me, d("2025-03-10"), d("2035-03-10"), false)
        .unwrap_err();
    assert!(matches!(err, SwapError::WindowTooLarge { .. }));
}
