use super::types::Availability;
use super::SwapEngine;
use crate::calendar;
use crate::model::PersonId;
use chrono::NaiveDate;

/// Union de catégories utilisée pour décider si une personne est occupée.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BusyScope {
    /// `call ∪ unavailable` : une garde de jour reste négociable.
    Negotiable,
    /// `call ∪ unavailable ∪ icu ∪ day` : couverture de voyage, aucune marge.
    Full,
}

impl SwapEngine<'_> {
    /// La personne est-elle occupée ce jour-là, au sens du périmètre demandé ?
    ///
    /// Monotone : ajouter une ligne au planning ne peut que passer de libre à
    /// occupé, jamais l'inverse.
    pub fn is_busy(&self, person: &PersonId, date: NaiveDate, scope: BusyScope) -> bool {
        self.schedule.labels_on(person, date).iter().any(|label| {
            let tax = self.taxonomy;
            match scope {
                BusyScope::Negotiable => tax.is_call(label) || tax.is_unavailable(label),
                BusyScope::Full => {
                    tax.is_call(label)
                        || tax.is_unavailable(label)
                        || tax.is_icu(label)
                        || tax.is_day(label)
                }
            }
        })
    }

    /// Prendre une garde de nuit le jour J crée-t-il un conflit post-garde ?
    ///
    /// Conflit dès que J+1 porte un libellé hors de la liste blanche
    /// (post-garde, vacances, maladie, excusé). Le lendemain vide est sain.
    pub fn has_post_call_conflict(&self, person: &PersonId, night_call_date: NaiveDate) -> bool {
        let day_after = calendar::add_days(night_call_date, 1);
        let labels = self.schedule.labels_on(person, day_after);
        if labels.is_empty() {
            return false;
        }
        !labels
            .iter()
            .all(|label| self.taxonomy.post_call_acceptable(label))
    }

    /// Une garde ICU sur l'un des deux jours du week-end ? Non négociable.
    pub(super) fn weekend_has_icu(&self, person: &PersonId, saturday: NaiveDate) -> bool {
        let sunday = calendar::add_days(saturday, 1);
        self.schedule
            .labels_on(person, saturday)
            .iter()
            .chain(self.schedule.labels_on(person, sunday).iter())
            .any(|label| self.taxonomy.is_icu(label))
    }

    /// Qui est libre ce jour-là (pas de garde ni d'indisponibilité) ?
    pub fn free_on(&self, date: NaiveDate) -> Vec<Availability> {
        self.schedule
            .people()
            .into_iter()
            .filter(|p| !self.is_busy(p, date, BusyScope::Negotiable))
            .map(|person| {
                let labels = self
                    .schedule
                    .labels_on(&person, date)
                    .into_iter()
                    .map(str::to_owned)
                    .collect();
                Availability { person, labels }
            })
            .collect()
    }
}
