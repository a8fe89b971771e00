mod availability;
mod ease;
mod golden;
mod single;
mod trip;
mod types;
mod weekend;

pub use availability::BusyScope;
pub use ease::{swap_ease, EaseLevel};
pub use types::{
    Availability, BlockingShift, CoverageCandidate, DataWarning, DayTradeCandidate, GoldenWeekend,
    SwapCandidate, SwapError, SwapOptions, TripCoverage, WeekendSwapCandidate,
};

use crate::model::{PersonId, Preferences, RosterInfo, Schedule};
use crate::taxonomy::Taxonomy;
use chrono::NaiveDate;

/// Garde-fou sur la taille des fenêtres de recherche (coût quadratique sinon).
pub const MAX_WINDOW_DAYS: i64 = 730;

/// Moteur de recherche : planning, taxonomie, roster et préférences injectés,
/// tous en lecture seule. Chaque requête est un calcul pur et déterministe.
#[derive(Debug, Clone, Copy)]
pub struct SwapEngine<'a> {
    pub(crate) schedule: &'a Schedule,
    pub(crate) taxonomy: &'a Taxonomy,
    pub(crate) roster: &'a RosterInfo,
    pub(crate) prefs: &'a Preferences,
}

impl<'a> SwapEngine<'a> {
    pub fn new(
        schedule: &'a Schedule,
        taxonomy: &'a Taxonomy,
        roster: &'a RosterInfo,
        prefs: &'a Preferences,
    ) -> Self {
        Self {
            schedule,
            taxonomy,
            roster,
            prefs,
        }
    }

    pub fn schedule(&self) -> &Schedule {
        self.schedule
    }

    pub fn taxonomy(&self) -> &Taxonomy {
        self.taxonomy
    }

    pub fn preferences(&self) -> &Preferences {
        self.prefs
    }

    /// Candidats à l'échange d'une garde précise (fenêtre ±14 jours par défaut).
    pub fn find_swap_candidates(
        &self,
        who: &PersonId,
        date: NaiveDate,
        shift: &str,
        opts: &SwapOptions,
    ) -> Result<Vec<SwapCandidate>, SwapError> {
        single::find_swap_candidates(self, who, date, shift, opts)
    }

    /// Titulaires d'une garde de jour le même jour, candidats nuit↔jour.
    pub fn find_night_to_day_swaps(
        &self,
        who: &PersonId,
        date: NaiveDate,
        night_shift: &str,
    ) -> Vec<DayTradeCandidate> {
        single::find_night_to_day_swaps(self, who, date, night_shift)
    }

    /// Échanges de week-end complet autour du week-end demandé.
    pub fn find_weekend_swaps(
        &self,
        who: &PersonId,
        saturday: NaiveDate,
        weeks_back: u32,
        weeks_forward: u32,
    ) -> Result<Vec<WeekendSwapCandidate>, SwapError> {
        weekend::find_weekend_swaps(self, who, saturday, weeks_back, weeks_forward)
    }

    /// Couverture des gardes bloquantes d'un voyage + pistes d'échange.
    pub fn find_trip_coverage(
        &self,
        who: &PersonId,
        start: NaiveDate,
        end: NaiveDate,
        depart_day_before: bool,
    ) -> Result<TripCoverage, SwapError> {
        trip::find_trip_coverage(self, who, start, end, depart_day_before)
    }

    /// Week-ends où le demandeur (et idéalement ses amis) sont libres.
    pub fn find_golden_weekends(
        &self,
        who: &PersonId,
        from: NaiveDate,
        weeks: u32,
    ) -> Result<Vec<GoldenWeekend>, SwapError> {
        golden::find_golden_weekends(self, who, from, weeks)
    }
}

pub(crate) fn guard_window(days: i64) -> Result<(), SwapError> {
    if days > MAX_WINDOW_DAYS {
        return Err(SwapError::WindowTooLarge {
            days,
            max: MAX_WINDOW_DAYS,
        });
    }
    Ok(())
}
