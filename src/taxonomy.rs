use crate::model::Schedule;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// Appartenance d'un libellé aux catégories sémantiques.
///
/// Un libellé hors de tous les ensembles est « autre » : jamais une erreur,
/// mais invisible pour tous les filtres par catégorie (voir `unmatched_labels`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ShiftCategories {
    pub night_call: bool,
    pub call: bool,
    pub day: bool,
    pub icu: bool,
    pub vacation: bool,
    pub unavailable: bool,
}

impl ShiftCategories {
    pub fn is_other(self) -> bool {
        !(self.night_call || self.call || self.day || self.icu || self.vacation || self.unavailable)
    }
}

/// Type d'un week-end : nuit prime sur jour, jour prime sur repos.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum WeekendType {
    Night,
    Day,
    Off,
}

impl WeekendType {
    pub fn as_str(self) -> &'static str {
        match self {
            WeekendType::Night => "night",
            WeekendType::Day => "day",
            WeekendType::Off => "off",
        }
    }
}

impl fmt::Display for WeekendType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Configuration brute d'une taxonomie (sérialisable, substituable en test).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TaxonomyConfig {
    #[serde(default)]
    pub night_call: Vec<String>,
    #[serde(default)]
    pub call: Vec<String>,
    #[serde(default)]
    pub day: Vec<String>,
    #[serde(default)]
    pub icu: Vec<String>,
    #[serde(default)]
    pub vacation: Vec<String>,
    #[serde(default)]
    pub unavailable: Vec<String>,
    /// Libellés acceptables le lendemain d'une garde de nuit.
    #[serde(default)]
    pub post_call_ok: Vec<String>,
    /// Libellés compatibles avec un week-end « off » pour le demandeur.
    #[serde(default)]
    pub weekend_off_ok: Vec<String>,
    /// Gardes exigeant la rotation OB validée (sauf CA3+/fellow).
    #[serde(default)]
    pub ob_required: Vec<String>,
}

/// Classification des libellés de gardes par appartenance exacte.
///
/// Pas de normalisation ni de correspondance partielle : un libellé avec un
/// suffixe en plus n'est PAS reconnu. L'outillage d'audit s'appuie sur ces
/// trous pour repérer les libellés mal saisis.
#[derive(Debug, Clone)]
pub struct Taxonomy {
    night_call: BTreeSet<String>,
    call: BTreeSet<String>,
    day: BTreeSet<String>,
    icu: BTreeSet<String>,
    vacation: BTreeSet<String>,
    unavailable: BTreeSet<String>,
    post_call_ok: BTreeSet<String>,
    weekend_off_ok: BTreeSet<String>,
    ob_required: BTreeSet<String>,
}

impl Taxonomy {
    /// Construit une taxonomie. Invariant garanti : `night_call ⊆ call`.
    pub fn from_config(cfg: TaxonomyConfig) -> Self {
        let night_call: BTreeSet<String> = cfg.night_call.into_iter().collect();
        let mut call: BTreeSet<String> = cfg.call.into_iter().collect();
        call.extend(night_call.iter().cloned());
        Self {
            night_call,
            call,
            day: cfg.day.into_iter().collect(),
            icu: cfg.icu.into_iter().collect(),
            vacation: cfg.vacation.into_iter().collect(),
            unavailable: cfg.unavailable.into_iter().collect(),
            post_call_ok: cfg.post_call_ok.into_iter().collect(),
            weekend_off_ok: cfg.weekend_off_ok.into_iter().collect(),
            ob_required: cfg.ob_required.into_iter().collect(),
        }
    }

    /// Taxonomie QGenda des gardes de résidents (préfixe « CA »).
    pub fn standard() -> Self {
        fn owned(labels: &[&str]) -> Vec<String> {
            labels.iter().map(|s| (*s).to_owned()).collect()
        }

        Self::from_config(TaxonomyConfig {
            night_call: owned(&[
                "CA CLI Night Call",
                "CA Senior Night Call",
                "CA GOR1 Night Call",
                "CA GOR2 Night Call",
                "CA CART Night Call",
                "CA CV Call",
                "CA COMER Call",
                "CA ICU Call",
                "CA Northshore Call",
            ]),
            call: owned(&["CA CLI Day Call"]),
            day: owned(&[
                "CA GOR",
                "CA GOR-Block",
                "CA AMB",
                "CA AMB- Block",
                "CA OB",
                "CA OB3",
                "CA PEDS",
                "CA Ortho",
                "CA CTICU",
                "CA SICU",
                "CA CV Cardiac",
                "CA CV-3",
                "CA Neuro",
                "CA Northshore",
                "CA Northshore Neuro",
                "CA PACU",
                "CA Pain Clinic",
                "CA Pain Clinic 3",
                "CA Urology",
                "CA Vascular Thoracic",
                "CA ECHO",
                "CA APMC",
                "CA APMC 3",
                "CA Research",
            ]),
            icu: owned(&["CA CTICU", "CA SICU", "CA ICU Call", "CA ICU 3 Elective"]),
            vacation: owned(&["CA Vacation", "CA Vacation Week"]),
            unavailable: owned(&[
                "CA Vacation",
                "CA Vacation Week",
                "CA Sick",
                "CA Post Call",
                "CA Home Post Call",
                "CA Excused",
                "CA Interview",
                "CA Meeting",
                "CA half-day/meeting",
            ]),
            post_call_ok: owned(&[
                "CA Post Call",
                "CA Home Post Call",
                "CA Vacation",
                "CA Vacation Week",
                "CA Sick",
                "CA Excused",
            ]),
            weekend_off_ok: owned(&[
                "CA Vacation",
                "CA Vacation Week",
                "CA Post Call",
                "CA Home Post Call",
                "CA Excused",
            ]),
            ob_required: owned(&["CA CLI Day Call", "CA CLI Night Call"]),
        })
    }

    pub fn classify(&self, label: &str) -> ShiftCategories {
        ShiftCategories {
            night_call: self.is_night_call(label),
            call: self.is_call(label),
            day: self.is_day(label),
            icu: self.is_icu(label),
            vacation: self.is_vacation(label),
            unavailable: self.is_unavailable(label),
        }
    }

    pub fn is_night_call(&self, label: &str) -> bool {
        self.night_call.contains(label)
    }

    pub fn is_call(&self, label: &str) -> bool {
        self.call.contains(label)
    }

    pub fn is_day(&self, label: &str) -> bool {
        self.day.contains(label)
    }

    pub fn is_icu(&self, label: &str) -> bool {
        self.icu.contains(label)
    }

    pub fn is_vacation(&self, label: &str) -> bool {
        self.vacation.contains(label)
    }

    pub fn is_unavailable(&self, label: &str) -> bool {
        self.unavailable.contains(label)
    }

    pub fn post_call_acceptable(&self, label: &str) -> bool {
        self.post_call_ok.contains(label)
    }

    pub fn weekend_off_compatible(&self, label: &str) -> bool {
        self.weekend_off_ok.contains(label)
    }

    pub fn requires_ob(&self, label: &str) -> bool {
        self.ob_required.contains(label)
    }

    /// Type d'un week-end à partir de l'union des libellés samedi + dimanche.
    pub fn weekend_type<'a, I>(&self, labels: I) -> WeekendType
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut has_day = false;
        for label in labels {
            if self.is_call(label) {
                return WeekendType::Night;
            }
            if self.is_day(label) {
                has_day = true;
            }
        }
        if has_day {
            WeekendType::Day
        } else {
            WeekendType::Off
        }
    }

    /// Libellés du planning n'appartenant à aucune catégorie connue.
    ///
    /// Un libellé mal saisi (« CA GOR (AM) » etc.) serait invisible pour
    /// toutes les recherches ; cet audit le rend visible au lieu de le taire.
    pub fn unmatched_labels(&self, schedule: &Schedule) -> BTreeSet<String> {
        schedule
            .records()
            .iter()
            .filter(|r| self.classify(&r.shift).is_other())
            .map(|r| r.shift.clone())
            .collect()
    }
}
