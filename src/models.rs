use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, thiserror::Error)]
pub enum ModelError {
    #[error("period end date {end} is before start date {start}")]
    EndBeforeStart { start: NaiveDate, end: NaiveDate },
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum FlowIntensity {
    None,
    Light,
    Medium,
    Heavy,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum PainLevel {
    None,
    Mild,
    Moderate,
    Severe,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Mood {
    Happy,
    Content,
    Neutral,
    Sad,
    Irritated,
    Anxious,
    Depressed,
    Energetic,
    Stressed,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum EnergyLevel {
    VeryLow,
    Low,
    Normal,
    High,
    VeryHigh,
}

/// One observed menstrual period. `end_date` is absent while the period is
/// ongoing or simply unrecorded.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Period {
    pub id: Uuid,
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
}

impl Period {
    /// Create a period record, rejecting an end date before the start date.
    pub fn new(start_date: NaiveDate, end_date: Option<NaiveDate>) -> Result<Self, ModelError> {
        if let Some(end) = end_date {
            if end < start_date {
                return Err(ModelError::EndBeforeStart {
                    start: start_date,
                    end,
                });
            }
        }
        Ok(Self {
            id: Uuid::new_v4(),
            start_date,
            end_date,
        })
    }
}

/// A day's symptom log. The structured fields are closed enums, validated
/// once at deserialization; `tags` carries the free-text symptom names used
/// by the frequency analysis.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SymptomEntry {
    pub id: Uuid,
    pub date: NaiveDate,
    pub flow_intensity: Option<FlowIntensity>,
    pub pain_level: Option<PainLevel>,
    pub mood: Option<Mood>,
    pub energy_level: Option<EnergyLevel>,
    #[serde(default)]
    pub tags: Vec<String>,
    pub notes: Option<String>,
}

impl SymptomEntry {
    pub fn on(date: NaiveDate) -> Self {
        Self {
            id: Uuid::new_v4(),
            date,
            flow_intensity: None,
            pain_level: None,
            mood: None,
            energy_level: None,
            tags: Vec::new(),
            notes: None,
        }
    }

    pub fn with_tags<I, S>(date: NaiveDate, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut entry = Self::on(date);
        entry.tags = tags.into_iter().map(Into::into).collect();
        entry
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Regularity {
    Regular,
    Irregular,
    Unknown,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Confidence {
    High,
    Medium,
    Low,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct FertileWindow {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

/// Derived cycle statistics, recomputed on demand and never persisted.
/// Numeric fields always carry a value; 28 / 5 / 0 are the documented
/// defaults when history is too thin to compute anything.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CycleInsights {
    pub avg_cycle_length: i64,
    pub avg_period_length: i64,
    pub cycle_variation: i64,
    pub regularity: Regularity,
    pub confidence: Confidence,
    pub next_ovulation: Option<NaiveDate>,
    pub fertile_window: Option<FertileWindow>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum CyclePhase {
    Menstrual,
    Follicular,
    Ovulation,
    Luteal,
}

impl CyclePhase {
    pub fn name(self) -> &'static str {
        match self {
            CyclePhase::Menstrual => "Menstrual Phase",
            CyclePhase::Follicular => "Follicular Phase",
            CyclePhase::Ovulation => "Ovulation Phase",
            CyclePhase::Luteal => "Luteal Phase",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            CyclePhase::Menstrual => "Your period is active. Focus on rest and self-care.",
            CyclePhase::Follicular => {
                "Energy levels are rising. Great time for new activities and challenges."
            }
            CyclePhase::Ovulation => {
                "Peak fertility window. Your body is preparing for potential conception."
            }
            CyclePhase::Luteal => "Pre-menstrual phase. You may experience PMS symptoms.",
        }
    }
}

/// One row of the symptom-frequency table. `percentage` is relative to the
/// total number of symptom entries, not tag occurrences, so rows can sum
/// past 100 when entries carry several tags.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SymptomFrequency {
    pub name: String,
    pub count: usize,
    pub percentage: i64,
}

/// The dashboard payload. Field names follow the wire contract consumed by
/// the client, hence the camelCase renames.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct InsightsReport {
    pub average_cycle_length: i64,
    pub average_period_length: i64,
    pub cycle_variation: i64,
    pub total_cycles: usize,
    pub next_period_date: Option<NaiveDate>,
    pub days_until_next: i64,
    pub common_symptoms: Vec<SymptomFrequency>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct Settings {
    #[serde(default)]
    pub show_fertility: bool,
}

/// Everything stored for one user.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct Profile {
    pub periods: Vec<Period>,
    pub symptoms: Vec<SymptomEntry>,
    pub settings: Settings,
}
