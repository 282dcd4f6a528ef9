//! Pure join of the two dashboard reads into display rows: one row per
//! daily entry, in fetched order, with derived cycle-day, status, and
//! hormone columns.

use std::fmt;

use shared::domain::{CervicalMucus, DailyEntry, EntryId, HormoneSeries};

pub const HORMONE_UNAVAILABLE: &str = "N/A";
pub const PHASE_UNKNOWN: &str = "Unknown";
pub const NO_SYMPTOMS: &str = "None";

/// Derived review status. Recomputed from symptom presence on every
/// fetch; there is no stored workflow state behind it, so it can never
/// diverge from the symptom data but also cannot represent an
/// independent review step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryStatus {
    Done,
    Pending,
}

impl fmt::Display for EntryStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntryStatus::Done => f.write_str("Done"),
            EntryStatus::Pending => f.write_str("Pending"),
        }
    }
}

/// Reviewer assignment. No assignment model exists yet, so the only
/// variant is the explicit placeholder; real assignment state extends
/// this enum rather than replacing a magic string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Reviewer {
    #[default]
    Unassigned,
}

impl fmt::Display for Reviewer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Reviewer::Unassigned => f.write_str("Assign reviewer"),
        }
    }
}

/// UI-ready representation of one daily entry joined with its positional
/// hormone sample. The id is stable across re-fetches and local
/// reordering; selection and drag state key on it.
#[derive(Debug, Clone, PartialEq)]
pub struct DisplayRow {
    pub id: EntryId,
    pub cycle_day: String,
    pub phase: String,
    pub status: EntryStatus,
    pub estrogen_level: String,
    pub progesterone_level: String,
    pub symptoms: String,
    pub reviewer: Reviewer,
}

/// Joins the entries list with the hormone series, preserving the
/// positional order of the entries as fetched. Pure: the same inputs
/// always produce the same rows. No sorting or filtering happens here;
/// that belongs to the table model.
pub fn reconcile(entries: &[DailyEntry], series: &HormoneSeries) -> Vec<DisplayRow> {
    entries
        .iter()
        .enumerate()
        .map(|(index, entry)| build_row(index, entry, series))
        .collect()
}

fn build_row(index: usize, entry: &DailyEntry, series: &HormoneSeries) -> DisplayRow {
    let cycle = entry.cycle.as_ref();

    let cycle_day = match cycle.and_then(|c| c.start_date) {
        Some(start) => format!("Day {}", (entry.date - start).num_days() + 1),
        None => format!("Day {}", index + 1),
    };

    let phase = cycle
        .and_then(|c| c.phase.clone())
        .unwrap_or_else(|| PHASE_UNKNOWN.to_string());

    let symptoms = symptom_summary(entry);
    let status = if symptoms.is_some() {
        EntryStatus::Done
    } else {
        EntryStatus::Pending
    };

    // The join key is the row's position in the fetched list (1-indexed),
    // not the entry's date or its computed cycle day. If the backend ever
    // returns entries out of date order, or with gaps, hormone values
    // land on the wrong row. Kept as-is; see DESIGN.md before changing.
    let (estrogen_level, progesterone_level) = match series.sample_for_day(index as i64 + 1) {
        Some((estradiol, progesterone)) => {
            (format!("{estradiol:.2}"), format!("{progesterone:.2}"))
        }
        None => (
            HORMONE_UNAVAILABLE.to_string(),
            HORMONE_UNAVAILABLE.to_string(),
        ),
    };

    DisplayRow {
        id: entry.id,
        cycle_day,
        phase,
        status,
        estrogen_level,
        progesterone_level,
        symptoms: symptoms.unwrap_or_else(|| NO_SYMPTOMS.to_string()),
        reviewer: Reviewer::Unassigned,
    }
}

/// Comma-joined fragments of the table's fixed symptom subset, in a
/// fixed order. A zero level, a `none` mucus reading, and empty notes
/// all count as absent. Earlier dashboard builds rendered `none` in the
/// summary and marked the row done; that counted unobserved as
/// observed, so it changed here.
fn symptom_summary(entry: &DailyEntry) -> Option<String> {
    let mut parts = Vec::new();
    push_level(&mut parts, "Cramps", entry.cramps);
    push_level(&mut parts, "Bloating", entry.bloating);
    push_level(&mut parts, "Mood", entry.mood);
    if let Some(mucus) = entry.cervical_mucus.filter(|m| *m != CervicalMucus::None) {
        parts.push(format!("Cervical Mucus: {mucus}"));
    }
    if let Some(notes) = entry.notes.as_deref().filter(|n| !n.is_empty()) {
        parts.push(format!("Notes: {notes}"));
    }

    if parts.is_empty() {
        None
    } else {
        Some(parts.join(", "))
    }
}

fn push_level(parts: &mut Vec<String>, label: &str, level: Option<u8>) {
    if let Some(level) = level.filter(|l| *l != 0) {
        parts.push(format!("{label}: {level}"));
    }
}

#[cfg(test)]
#[path = "tests/reconcile_tests.rs"]
mod tests;
