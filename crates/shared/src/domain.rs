use std::{fmt, str::FromStr};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::ParseCervicalMucusError;

macro_rules! id_newtype {
    ($name:ident) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub struct $name(pub i64);
    };
}

id_newtype!(EntryId);
id_newtype!(CycleId);

/// Cervical mucus observation as the backend stores it. `None` is the
/// unobserved default, not a logged symptom.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum CervicalMucus {
    #[default]
    None,
    Sticky,
    Watery,
    EggWhite,
    Creamy,
    Atypical,
}

impl CervicalMucus {
    pub fn as_str(&self) -> &'static str {
        match self {
            CervicalMucus::None => "none",
            CervicalMucus::Sticky => "sticky",
            CervicalMucus::Watery => "watery",
            CervicalMucus::EggWhite => "egg-white",
            CervicalMucus::Creamy => "creamy",
            CervicalMucus::Atypical => "atypical",
        }
    }
}

impl fmt::Display for CervicalMucus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CervicalMucus {
    type Err = ParseCervicalMucusError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "none" => Ok(CervicalMucus::None),
            "sticky" => Ok(CervicalMucus::Sticky),
            "watery" => Ok(CervicalMucus::Watery),
            "egg-white" => Ok(CervicalMucus::EggWhite),
            "creamy" => Ok(CervicalMucus::Creamy),
            "atypical" => Ok(CervicalMucus::Atypical),
            other => Err(ParseCervicalMucusError::new(other)),
        }
    }
}

/// Parent menstrual cycle of a daily entry. The backend may omit the
/// start date or phase on cycles that are still being inferred.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Cycle {
    pub id: CycleId,
    #[serde(default)]
    pub start_date: Option<NaiveDate>,
    #[serde(default)]
    pub phase: Option<String>,
}

/// One day's logged symptom record, decoded at the fetch boundary so
/// downstream code never sees a malformed shape. Every observation field
/// is optional on the wire; absent and null are equivalent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyEntry {
    pub id: EntryId,
    pub date: NaiveDate,
    #[serde(default)]
    pub cycle: Option<Cycle>,
    #[serde(default)]
    pub cramps: Option<u8>,
    #[serde(default)]
    pub bloating: Option<u8>,
    #[serde(default)]
    pub tender_breasts: Option<u8>,
    #[serde(default)]
    pub headache: Option<u8>,
    #[serde(default)]
    pub acne: Option<u8>,
    #[serde(default)]
    pub mood: Option<u8>,
    #[serde(default)]
    pub stress: Option<u8>,
    #[serde(default)]
    pub energy: Option<u8>,
    #[serde(default)]
    pub cervical_mucus: Option<CervicalMucus>,
    #[serde(default)]
    pub sleep_quality: Option<u8>,
    #[serde(default)]
    pub libido: Option<u8>,
    #[serde(default)]
    pub notes: Option<String>,
}

/// Day-indexed hormone measurements for the active cycle.
///
/// The three arrays are parallel: `days[i]` is the cycle-day label for
/// `estradiol[i]` and `progesterone[i]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HormoneSeries {
    pub days: Vec<i64>,
    pub estradiol: Vec<f64>,
    pub progesterone: Vec<f64>,
}

impl HormoneSeries {
    /// Looks up the aligned (estradiol, progesterone) sample for a
    /// cycle-day label, if the series covers it.
    pub fn sample_for_day(&self, day: i64) -> Option<(f64, f64)> {
        let index = self.days.iter().position(|d| *d == day)?;
        Some((*self.estradiol.get(index)?, *self.progesterone.get(index)?))
    }

    pub fn len(&self) -> usize {
        self.days.len()
    }

    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }
}
