use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

/// Identifiant fort pour une personne (nom tel qu'affiché dans le planning).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct PersonId(String);

impl PersonId {
    pub fn new<S: AsRef<str>>(s: S) -> Self {
        Self(s.as_ref().to_owned())
    }
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PersonId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Une ligne du planning : une affectation (date, personne, libellé de garde).
///
/// Plusieurs lignes peuvent partager le même couple (date, personne) — une
/// garde plus un marqueur le même jour. Les requêtes raisonnent donc toujours
/// en ensembles de libellés.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShiftRecord {
    pub date: NaiveDate,
    pub person: PersonId,
    pub shift: String,
}

impl ShiftRecord {
    pub fn new<P: AsRef<str>, S: AsRef<str>>(date: NaiveDate, person: P, shift: S) -> Self {
        Self {
            date,
            person: PersonId::new(person),
            shift: shift.as_ref().to_owned(),
        }
    }
}

/// Planning complet, en lecture seule. Le moteur ne le mute jamais.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Schedule {
    records: Vec<ShiftRecord>,
}

impl Schedule {
    pub fn new(records: Vec<ShiftRecord>) -> Self {
        Self { records }
    }

    pub fn records(&self) -> &[ShiftRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Toutes les personnes présentes dans le planning, triées.
    pub fn people(&self) -> BTreeSet<PersonId> {
        self.records.iter().map(|r| r.person.clone()).collect()
    }

    /// Ensemble des libellés d'une personne pour une date donnée.
    pub fn labels_on(&self, person: &PersonId, date: NaiveDate) -> BTreeSet<&str> {
        self.records
            .iter()
            .filter(|r| &r.person == person && r.date == date)
            .map(|r| r.shift.as_str())
            .collect()
    }

    /// Affectations d'une personne dans [start, end], triées par date.
    pub fn shifts_in(&self, person: &PersonId, start: NaiveDate, end: NaiveDate) -> Vec<&ShiftRecord> {
        let mut out: Vec<&ShiftRecord> = self
            .records
            .iter()
            .filter(|r| &r.person == person && r.date >= start && r.date <= end)
            .collect();
        out.sort_by_key(|r| r.date);
        out
    }

    /// Première et dernière date connues pour une personne.
    pub fn date_bounds(&self, person: &PersonId) -> Option<(NaiveDate, NaiveDate)> {
        let mut bounds: Option<(NaiveDate, NaiveDate)> = None;
        for r in self.records.iter().filter(|r| &r.person == person) {
            bounds = Some(match bounds {
                None => (r.date, r.date),
                Some((lo, hi)) => (lo.min(r.date), hi.max(r.date)),
            });
        }
        bounds
    }
}

/// Niveau d'une personne, fourni par le classement externe du roster.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PersonType {
    Intern,
    Ca1,
    Ca2,
    Ca3,
    Fellow,
    Crna,
    Faculty,
    Resident,
    Unknown,
}

impl PersonType {
    /// CA3 et fellows sont dispensés des contraintes de rotation (OB).
    pub fn is_senior(self) -> bool {
        matches!(self, PersonType::Ca3 | PersonType::Fellow)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            PersonType::Intern => "intern",
            PersonType::Ca1 => "ca1",
            PersonType::Ca2 => "ca2",
            PersonType::Ca3 => "ca3",
            PersonType::Fellow => "fellow",
            PersonType::Crna => "crna",
            PersonType::Faculty => "faculty",
            PersonType::Resident => "resident",
            PersonType::Unknown => "unknown",
        }
    }
}

/// Classement du roster : niveau par personne et rotations validées.
///
/// Toute personne absente de la table est classée `unknown`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RosterInfo {
    #[serde(default)]
    pub types: BTreeMap<PersonId, PersonType>,
    #[serde(default)]
    pub ob_completed: BTreeSet<PersonId>,
}

impl RosterInfo {
    pub fn person_type(&self, person: &PersonId) -> PersonType {
        self.types.get(person).copied().unwrap_or(PersonType::Unknown)
    }

    pub fn has_completed_ob(&self, person: &PersonId) -> bool {
        self.ob_completed.contains(person)
    }
}

/// Préférences utilisateur, fournies par un magasin externe (jamais persistées ici).
///
/// Les champs absents du JSON chargent vides, pour rester compatible avec les
/// anciens fichiers `friends.json`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Preferences {
    #[serde(default)]
    pub friends: BTreeSet<PersonId>,
    #[serde(default)]
    pub notes: BTreeMap<PersonId, String>,
    #[serde(default)]
    pub prefers_nights: BTreeSet<PersonId>,
    #[serde(default)]
    pub good_samaritans: BTreeSet<PersonId>,
}

impl Preferences {
    pub fn is_friend(&self, person: &PersonId) -> bool {
        self.friends.contains(person)
    }

    pub fn prefers_night(&self, person: &PersonId) -> bool {
        self.prefers_nights.contains(person)
    }

    pub fn is_good_samaritan(&self, person: &PersonId) -> bool {
        self.good_samaritans.contains(person)
    }
}
