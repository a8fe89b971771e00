//! Statistiques agrégées du planning d'une personne. Aucune recherche ici.

use crate::calendar;
use crate::engine::{guard_window, SwapEngine, SwapError};
use crate::model::PersonId;
use chrono::NaiveDate;
use serde::Serialize;

/// Classement d'une garde pour les comptages du résumé.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ShiftKind {
    Call,
    Day,
    Off,
    Other,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UpcomingShift {
    pub date: NaiveDate,
    pub shift: String,
    pub kind: ShiftKind,
    pub days_until: i64,
}

/// Comptages d'une semaine calendaire (alignée sur le lundi).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WeekBreakdown {
    pub week_of: NaiveDate,
    pub calls: usize,
    pub day_shifts: usize,
    pub off_days: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScheduleSummary {
    pub upcoming: Vec<UpcomingShift>,
    pub total_calls: usize,
    pub total_day_shifts: usize,
    pub days_off: usize,
    pub next_call: Option<UpcomingShift>,
    pub next_golden_weekend: Option<NaiveDate>,
    pub weekly: Vec<WeekBreakdown>,
}

impl SwapEngine<'_> {
    /// Classe un libellé pour les comptages : garde, jour, repos, autre.
    pub fn shift_kind(&self, label: &str) -> ShiftKind {
        let tax = self.taxonomy();
        if tax.is_call(label) {
            ShiftKind::Call
        } else if tax.is_day(label) {
            ShiftKind::Day
        } else if tax.is_unavailable(label) {
            ShiftKind::Off
        } else {
            ShiftKind::Other
        }
    }

    /// Résumé du planning à venir sur `days_ahead` jours à partir de `from`.
    pub fn schedule_summary(
        &self,
        who: &PersonId,
        from: NaiveDate,
        days_ahead: u32,
    ) -> Result<ScheduleSummary, SwapError> {
        guard_window(i64::from(days_ahead))?;
        let end = calendar::add_days(from, i64::from(days_ahead));

        let upcoming: Vec<UpcomingShift> = self
            .schedule()
            .shifts_in(who, from, end)
            .into_iter()
            .map(|rec| UpcomingShift {
                date: rec.date,
                shift: rec.shift.clone(),
                kind: self.shift_kind(&rec.shift),
                days_until: (rec.date - from).num_days(),
            })
            .collect();

        let total_calls = upcoming.iter().filter(|s| s.kind == ShiftKind::Call).count();
        let total_day_shifts = upcoming.iter().filter(|s| s.kind == ShiftKind::Day).count();

        // Jour off : aucune ligne, ou uniquement des lignes classées repos.
        let mut days_off = 0usize;
        let mut date = from;
        while date <= end {
            if self.is_day_off(&upcoming, date) {
                days_off += 1;
            }
            date = calendar::add_days(date, 1);
        }

        let next_call = upcoming.iter().find(|s| s.kind == ShiftKind::Call).cloned();

        let next_golden_weekend = self
            .find_golden_weekends(who, from, 8)?
            .into_iter()
            .find(|w| w.i_am_off)
            .map(|w| w.saturday);

        // Découpage hebdomadaire, borné à la plage demandée.
        let mut weekly = Vec::new();
        let mut week_of = calendar::monday_of_week(from);
        while week_of <= end {
            let week_end = calendar::add_days(week_of, 6);
            let in_week = |s: &&UpcomingShift| s.date >= week_of && s.date <= week_end;
            let calls = upcoming.iter().filter(in_week).filter(|s| s.kind == ShiftKind::Call).count();
            let day_shifts = upcoming.iter().filter(in_week).filter(|s| s.kind == ShiftKind::Day).count();

            let mut off_days = 0usize;
            let mut d = week_of.max(from);
            let last = week_end.min(end);
            while d <= last {
                if self.is_day_off(&upcoming, d) {
                    off_days += 1;
                }
                d = calendar::add_days(d, 1);
            }

            weekly.push(WeekBreakdown {
                week_of,
                calls,
                day_shifts,
                off_days,
            });
            week_of = calendar::add_days(week_of, 7);
        }

        Ok(ScheduleSummary {
            upcoming,
            total_calls,
            total_day_shifts,
            days_off,
            next_call,
            next_golden_weekend,
            weekly,
        })
    }

    fn is_day_off(&self, upcoming: &[UpcomingShift], date: NaiveDate) -> bool {
        upcoming
            .iter()
            .filter(|s| s.date == date)
            .all(|s| s.kind == ShiftKind::Off)
    }
}
