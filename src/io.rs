use crate::calendar;
use crate::engine::SwapCandidate;
use crate::model::{Preferences, RosterInfo, Schedule, ShiftRecord};
use anyhow::{bail, Context};
use csv::{ReaderBuilder, WriterBuilder};
use serde::Serialize;
use std::fs;
use std::path::Path;

/// Import du planning depuis CSV : header `date,name,shift` (dates YYYY-MM-DD).
pub fn import_schedule_csv<P: AsRef<Path>>(path: P) -> anyhow::Result<Schedule> {
    let mut rdr = ReaderBuilder::new().has_headers(true).from_path(&path)?;
    let mut records = Vec::new();
    for (idx, rec) in rdr.records().enumerate() {
        let rec = rec?;
        let date_raw = rec.get(0).context("missing date")?.trim();
        let name = rec.get(1).context("missing name")?.trim();
        let shift = rec.get(2).context("missing shift")?.trim();
        if name.is_empty() || shift.is_empty() {
            bail!("invalid schedule row {} (empty field)", idx + 2);
        }
        let date = calendar::parse_date(date_raw)
            .with_context(|| format!("schedule row {}", idx + 2))?;
        records.push(ShiftRecord::new(date, name, shift));
    }
    Ok(Schedule::new(records))
}

/// Export CSV des candidats : header `candidate,their_date,their_shift,your_date,your_shift`.
pub fn export_candidates_csv<P: AsRef<Path>>(
    path: P,
    candidates: &[SwapCandidate],
) -> anyhow::Result<()> {
    let mut w = WriterBuilder::new().has_headers(true).from_path(path)?;
    w.write_record([
        "candidate",
        "their_date",
        "their_shift",
        "your_date",
        "your_shift",
    ])?;
    for c in candidates {
        w.write_record([
            c.candidate.as_str(),
            calendar::format_date(c.their_date).as_str(),
            c.their_shift.as_str(),
            calendar::format_date(c.your_date).as_str(),
            c.your_shift.as_str(),
        ])?;
    }
    w.flush()?;
    Ok(())
}

/// Charge les préférences (amis, préférence nuit, bons samaritains).
/// Fichier absent = préférences vides, comme l'ancien `friends.json`.
pub fn load_preferences<P: AsRef<Path>>(path: P) -> anyhow::Result<Preferences> {
    let path = path.as_ref();
    if !path.exists() {
        return Ok(Preferences::default());
    }
    let data = fs::read(path).with_context(|| format!("reading {}", path.display()))?;
    let prefs: Preferences =
        serde_json::from_slice(&data).with_context(|| format!("parsing {}", path.display()))?;
    Ok(prefs)
}

/// Charge le classement du roster (niveaux, rotations OB validées).
/// Fichier absent = tout le monde `unknown`.
pub fn load_roster_info<P: AsRef<Path>>(path: P) -> anyhow::Result<RosterInfo> {
    let path = path.as_ref();
    if !path.exists() {
        return Ok(RosterInfo::default());
    }
    let data = fs::read(path).with_context(|| format!("reading {}", path.display()))?;
    let roster: RosterInfo =
        serde_json::from_slice(&data).with_context(|| format!("parsing {}", path.display()))?;
    Ok(roster)
}

/// Export JSON d'un résultat de requête (jolie mise en forme).
pub fn export_json<P: AsRef<Path>, T: Serialize>(path: P, value: &T) -> anyhow::Result<()> {
    let s = serde_json::to_string_pretty(value)?;
    fs::write(path, s)?;
    Ok(())
}
