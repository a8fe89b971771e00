use crate::taxonomy::WeekendType;
use serde::Serialize;
use std::fmt;

/// Difficulté de négociation, du plus simple au plus délicat.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum EaseLevel {
    Easy,
    Moderate,
    HardSell,
    VeryHard,
}

impl EaseLevel {
    pub fn as_str(self) -> &'static str {
        match self {
            EaseLevel::Easy => "Easy",
            EaseLevel::Moderate => "Moderate",
            EaseLevel::HardSell => "Hard sell",
            EaseLevel::VeryHard => "Very hard",
        }
    }
}

impl fmt::Display for EaseLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Difficulté d'un échange selon les deux types de week-end et le contexte.
///
/// Fonction totale sur le produit des types : chaque combinaison est couverte
/// par le match. Les vacances côté candidat priment sur tout le reste — on
/// demande à quelqu'un de rendre son congé.
pub fn swap_ease(
    mine: WeekendType,
    theirs: WeekendType,
    candidate_prefers_nights: bool,
    their_side_has_vacation: bool,
) -> EaseLevel {
    use WeekendType::{Day, Night, Off};

    if their_side_has_vacation {
        return EaseLevel::VeryHard;
    }

    match (mine, theirs) {
        // Même fardeau des deux côtés.
        (Night, Night) | (Day, Day) | (Off, Off) => EaseLevel::Easy,
        // Je demande un surclassement nuit → jour.
        (Night, Day) => {
            if candidate_prefers_nights {
                EaseLevel::Easy
            } else {
                EaseLevel::HardSell
            }
        }
        // J'offre un surclassement jour → nuit.
        (Day, Night) => {
            if candidate_prefers_nights {
                EaseLevel::HardSell
            } else {
                EaseLevel::Easy
            }
        }
        (Night, Off) => {
            if candidate_prefers_nights {
                EaseLevel::Moderate
            } else {
                EaseLevel::HardSell
            }
        }
        (Off, Night) => {
            if candidate_prefers_nights {
                EaseLevel::HardSell
            } else {
                EaseLevel::Easy
            }
        }
        (Day, Off) => EaseLevel::Moderate,
        (Off, Day) => EaseLevel::Easy,
    }
}
