use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::{CervicalMucus, DailyEntry, EntryId};

/// Wrapper the backend puts around the date-filtered entries read. The
/// bare list read returns a plain JSON array instead; both shapes are
/// preserved exactly as the backend serves them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EntryListEnvelope {
    #[serde(default)]
    pub results: Vec<DailyEntry>,
}

/// Full write body for creating or updating a daily entry. Unlike the
/// read shape, every field is sent explicitly; the backend treats the
/// payload as a complete replacement of the day's observations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SymptomPayload {
    pub date: NaiveDate,
    pub cramps: u8,
    pub bloating: u8,
    pub tender_breasts: u8,
    pub headache: u8,
    pub acne: u8,
    pub mood: u8,
    pub stress: u8,
    pub energy: u8,
    pub cervical_mucus: CervicalMucus,
    pub sleep_quality: u8,
    pub libido: u8,
    pub notes: String,
}

/// Response to a successful create; the assigned id keys every
/// subsequent update for the same date.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct CreatedEntry {
    pub id: EntryId,
}
