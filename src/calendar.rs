use chrono::{Datelike, Duration, NaiveDate, Weekday};
use thiserror::Error;

/// Format de date unique du planning : `YYYY-MM-DD`.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

#[derive(Error, Debug)]
#[error("invalid date '{0}': expected YYYY-MM-DD")]
pub struct ParseDateError(String);

/// Parse stricte, sans récupération : l'appelant valide en amont.
pub fn parse_date(s: &str) -> Result<NaiveDate, ParseDateError> {
    NaiveDate::parse_from_str(s, DATE_FORMAT).map_err(|_| ParseDateError(s.to_owned()))
}

pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

/// Décale une date de `n` jours (négatif autorisé).
pub fn add_days(date: NaiveDate, n: i64) -> NaiveDate {
    date + Duration::days(n)
}

/// Index du jour de semaine, 0 = dimanche.
pub fn weekday_index(date: NaiveDate) -> u32 {
    date.weekday().num_days_from_sunday()
}

/// Prochain samedi strictement utile : un samedi avance au samedi SUIVANT.
///
/// Règle fixe — elle garantit l'idempotence de l'énumération des week-ends.
pub fn next_saturday(date: NaiveDate) -> NaiveDate {
    let until = saturday_offset(date);
    add_days(date, if until == 0 { 7 } else { until })
}

/// Samedi de la date si c'en est un, sinon le prochain.
pub fn saturday_on_or_after(date: NaiveDate) -> NaiveDate {
    add_days(date, saturday_offset(date))
}

fn saturday_offset(date: NaiveDate) -> i64 {
    i64::from((Weekday::Sat.num_days_from_monday() + 7 - date.weekday().num_days_from_monday()) % 7)
}

/// Paires (samedi, dimanche) entièrement contenues dans [start, end].
pub fn weekends_between(start: NaiveDate, end: NaiveDate) -> Vec<(NaiveDate, NaiveDate)> {
    let mut out = Vec::new();
    let mut saturday = saturday_on_or_after(start);
    loop {
        let sunday = add_days(saturday, 1);
        if sunday > end {
            break;
        }
        out.push((saturday, sunday));
        saturday = add_days(saturday, 7);
    }
    out
}

/// Lundi de la semaine contenant la date (découpage hebdomadaire du résumé).
pub fn monday_of_week(date: NaiveDate) -> NaiveDate {
    add_days(date, -i64::from(date.weekday().num_days_from_monday()))
}
