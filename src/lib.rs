#![forbid(unsafe_code)]
//! Gardeswap — moteur de recherche d'échanges de gardes (anesthésie), sans BD.
//!
//! - Planning figé en mémoire (import CSV/JSON), jamais muté.
//! - Taxonomie de gardes injectée (pas de singletons).
//! - Recherches pures : échange simple, week-end, couverture de voyage,
//!   week-ends dorés, résumé de planning.
//! - Dates calendaires locales (`NaiveDate`), pas d'instant ni de fuseau.

pub mod calendar;
pub mod engine;
pub mod io;
pub mod model;
pub mod summary;
pub mod taxonomy;

pub use calendar::ParseDateError;
pub use engine::{
    swap_ease, Availability, BlockingShift, BusyScope, CoverageCandidate, DataWarning,
    DayTradeCandidate, EaseLevel, GoldenWeekend, SwapCandidate, SwapEngine, SwapError, SwapOptions,
    TripCoverage, WeekendSwapCandidate,
};
pub use model::{PersonId, PersonType, Preferences, RosterInfo, Schedule, ShiftRecord};
pub use summary::{ScheduleSummary, ShiftKind, UpcomingShift, WeekBreakdown};
pub use taxonomy::{ShiftCategories, Taxonomy, TaxonomyConfig, WeekendType};
