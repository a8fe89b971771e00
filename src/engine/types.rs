use super::ease::EaseLevel;
use crate::calendar::ParseDateError;
use crate::model::PersonId;
use crate::taxonomy::WeekendType;
use chrono::NaiveDate;
use serde::Serialize;
use std::collections::BTreeMap;
use thiserror::Error;

/// Options de recherche pour un échange simple.
#[derive(Debug, Clone, Default)]
pub struct SwapOptions {
    /// Fenêtre explicite, sinon ±14 jours autour de la garde à céder.
    pub window: Option<(NaiveDate, NaiveDate)>,
    /// Filtre « contient » (insensible à la casse) sur le libellé cherché.
    pub target_label: Option<String>,
}

#[derive(Error, Debug)]
pub enum SwapError {
    #[error(transparent)]
    Date(#[from] ParseDateError),
    #[error("invalid range: end {end} before start {start}")]
    EmptyRange { start: NaiveDate, end: NaiveDate },
    #[error("search window too large: {days} days (max {max})")]
    WindowTooLarge { days: i64, max: i64 },
    #[error("not a Saturday: {0}")]
    NotSaturday(NaiveDate),
}

/// Candidat à l'échange d'une garde simple.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SwapCandidate {
    pub candidate: PersonId,
    pub their_date: NaiveDate,
    pub their_shift: String,
    pub your_date: NaiveDate,
    pub your_shift: String,
}

/// Candidat nuit↔jour : garde de jour le même jour, sans garde de nuit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DayTradeCandidate {
    pub candidate: PersonId,
    pub date: NaiveDate,
    pub their_shift: String,
    pub your_shift: String,
}

/// Candidat à l'échange d'un week-end complet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WeekendSwapCandidate {
    pub candidate: PersonId,
    pub saturday: NaiveDate,
    pub sunday: NaiveDate,
    pub sat_shifts: Vec<String>,
    pub sun_shifts: Vec<String>,
    pub mine: WeekendType,
    pub theirs: WeekendType,
    pub ease: EaseLevel,
}

/// Une garde du demandeur pendant (ou juste avant) un voyage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BlockingShift {
    pub date: NaiveDate,
    pub shift: String,
    pub blocks_travel: bool,
}

/// Agrégat de couverture par personne sur les dates bloquées d'un voyage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CoverageCandidate {
    pub person: PersonId,
    pub free_dates: Vec<NaiveDate>,
    pub coverage_count: usize,
    pub covers_all: bool,
    pub good_samaritan: bool,
}

/// Avertissement structuré : la requête déborde des données du demandeur.
/// Jamais une erreur — les résultats partiels sont quand même rendus.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DataWarning {
    pub message: String,
    pub boundary_date: NaiveDate,
}

/// Résultat complet d'une requête de couverture de voyage.
#[derive(Debug, Clone, Default, Serialize)]
pub struct TripCoverage {
    pub blocking_shifts: Vec<BlockingShift>,
    pub coverage: Vec<CoverageCandidate>,
    /// Sous-ensemble de `coverage` couvrant plus d'une date (« package deals »).
    pub packages: Vec<CoverageCandidate>,
    pub swap_options: BTreeMap<NaiveDate, Vec<SwapCandidate>>,
    pub data_warning: Option<DataWarning>,
}

/// Un week-end du demandeur, avec le roster libre ce week-end-là.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GoldenWeekend {
    pub saturday: NaiveDate,
    pub sunday: NaiveDate,
    pub i_am_off: bool,
    pub residents_off: Vec<PersonId>,
    pub friends_off: Vec<PersonId>,
}

/// Une personne libre un jour donné, avec ce qu'elle fait quand même.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Availability {
    pub person: PersonId,
    pub labels: Vec<String>,
}
