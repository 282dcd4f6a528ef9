//! Symptom-logging form state: load the existing entry for a date or
//! reset to defaults, validate locally, then POST or PATCH depending on
//! whether the day already has an entry.

use chrono::NaiveDate;
use shared::{
    domain::{CervicalMucus, DailyEntry, EntryId},
    protocol::SymptomPayload,
};
use tracing::debug;

use crate::{api::ApiClient, error::ClientError};

pub const SLIDER_MAX: u8 = 5;

pub const DEFAULT_MOOD: u8 = 3;
pub const DEFAULT_ENERGY: u8 = 3;
pub const DEFAULT_SLEEP_QUALITY: u8 = 3;
pub const DEFAULT_LIBIDO: u8 = 2;

/// The 0–5 slider fields of the form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Slider {
    Cramps,
    Bloating,
    TenderBreasts,
    Headache,
    Acne,
    Mood,
    Stress,
    Energy,
    SleepQuality,
    Libido,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    Created(EntryId),
    Updated(EntryId),
}

#[derive(Debug, Clone, PartialEq)]
pub struct SymptomForm {
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
    entry_id: Option<EntryId>,
}

impl SymptomForm {
    pub fn new(date: NaiveDate) -> Self {
        Self {
            date,
            cramps: 0,
            bloating: 0,
            tender_breasts: 0,
            headache: 0,
            acne: 0,
            mood: DEFAULT_MOOD,
            stress: 0,
            energy: DEFAULT_ENERGY,
            cervical_mucus: CervicalMucus::None,
            sleep_quality: DEFAULT_SLEEP_QUALITY,
            libido: DEFAULT_LIBIDO,
            notes: String::new(),
            entry_id: None,
        }
    }

    /// The id of the backend entry this form is editing, once known.
    /// Present after loading an existing entry or after a successful
    /// create; a successful update never changes it.
    pub fn entry_id(&self) -> Option<EntryId> {
        self.entry_id
    }

    /// Fetches the existing entry for `date` and fills the form from it,
    /// or resets every observation to its default when the day has no
    /// entry yet.
    pub async fn load_for_date(
        &mut self,
        api: &ApiClient,
        date: NaiveDate,
    ) -> Result<(), ClientError> {
        self.date = date;
        match api.entry_for_date(date).await? {
            Some(entry) => {
                debug!(entry_id = entry.id.0, %date, "loaded existing entry");
                self.apply_entry(&entry);
            }
            None => {
                debug!(%date, "no entry for date; form reset to defaults");
                self.entry_id = None;
                self.reset_observations();
            }
        }
        Ok(())
    }

    pub fn apply_entry(&mut self, entry: &DailyEntry) {
        self.entry_id = Some(entry.id);
        self.date = entry.date;
        self.cramps = entry.cramps.unwrap_or(0);
        self.bloating = entry.bloating.unwrap_or(0);
        self.tender_breasts = entry.tender_breasts.unwrap_or(0);
        self.headache = entry.headache.unwrap_or(0);
        self.acne = entry.acne.unwrap_or(0);
        self.mood = entry.mood.unwrap_or(DEFAULT_MOOD);
        self.stress = entry.stress.unwrap_or(0);
        self.energy = entry.energy.unwrap_or(DEFAULT_ENERGY);
        self.cervical_mucus = entry.cervical_mucus.unwrap_or(CervicalMucus::None);
        self.sleep_quality = entry.sleep_quality.unwrap_or(DEFAULT_SLEEP_QUALITY);
        self.libido = entry.libido.unwrap_or(DEFAULT_LIBIDO);
        self.notes = entry.notes.clone().unwrap_or_default();
    }

    fn reset_observations(&mut self) {
        let date = self.date;
        *self = Self::new(date);
    }

    /// Sets a slider, clamping to the 0–5 scale.
    pub fn set_level(&mut self, slider: Slider, value: u8) {
        let value = value.min(SLIDER_MAX);
        match slider {
            Slider::Cramps => self.cramps = value,
            Slider::Bloating => self.bloating = value,
            Slider::TenderBreasts => self.tender_breasts = value,
            Slider::Headache => self.headache = value,
            Slider::Acne => self.acne = value,
            Slider::Mood => self.mood = value,
            Slider::Stress => self.stress = value,
            Slider::Energy => self.energy = value,
            Slider::SleepQuality => self.sleep_quality = value,
            Slider::Libido => self.libido = value,
        }
    }

    /// True iff something was actually observed: any slider away from
    /// its default, or a mucus reading other than `none`. Notes alone do
    /// not count, and neither does the date.
    pub fn has_observations(&self) -> bool {
        self.cramps != 0
            || self.bloating != 0
            || self.tender_breasts != 0
            || self.headache != 0
            || self.acne != 0
            || self.stress != 0
            || self.mood != DEFAULT_MOOD
            || self.energy != DEFAULT_ENERGY
            || self.sleep_quality != DEFAULT_SLEEP_QUALITY
            || self.libido != DEFAULT_LIBIDO
            || self.cervical_mucus != CervicalMucus::None
    }

    pub fn payload(&self) -> SymptomPayload {
        SymptomPayload {
            date: self.date,
            cramps: self.cramps,
            bloating: self.bloating,
            tender_breasts: self.tender_breasts,
            headache: self.headache,
            acne: self.acne,
            mood: self.mood,
            stress: self.stress,
            energy: self.energy,
            cervical_mucus: self.cervical_mucus,
            sleep_quality: self.sleep_quality,
            libido: self.libido,
            notes: self.notes.clone(),
        }
    }

    /// Validates locally, then creates or updates the day's entry. A
    /// default-valued form is rejected before any request is issued.
    /// After a successful create the assigned id is remembered, so the
    /// next submit for this date updates instead.
    pub async fn submit(&mut self, api: &ApiClient) -> Result<SubmitOutcome, ClientError> {
        if !self.has_observations() {
            return Err(ClientError::NothingToLog);
        }

        let payload = self.payload();
        match self.entry_id {
            Some(id) => {
                api.update_entry(id, &payload).await?;
                Ok(SubmitOutcome::Updated(id))
            }
            None => {
                let created = api.create_entry(&payload).await?;
                self.entry_id = Some(created.id);
                Ok(SubmitOutcome::Created(created.id))
            }
        }
    }
}

#[cfg(test)]
#[path = "tests/form_tests.rs"]
mod tests;
