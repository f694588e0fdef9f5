//! periodflow — cycle tracking engine.
//!
//! Pure, timezone-naive calendar math over logged period records: cycle
//! length statistics, regularity and confidence classification, next-period
//! and fertility-window prediction, symptom frequency analysis, and the
//! calendar grid used to render it all. Around the engine sit an injected
//! profile store and an encrypted on-disk vault for the snapshot.
//!
//! The prediction math is deliberately simple and documented as such: a
//! fixed 14-day luteal phase for ovulation, a midpoint-driven four-phase
//! model for day classification. The two models are independent and may
//! disagree near cycle boundaries; that divergence is a characteristic of
//! the system, not something the engine reconciles.

pub mod calendar;
pub mod cycle;
pub mod insights;
pub mod models;
pub mod prediction;
pub mod service;
pub mod store;
pub mod vault;

pub use models::{
    Confidence, CycleInsights, CyclePhase, FertileWindow, InsightsReport, Period, Profile,
    Regularity, Settings, SymptomEntry, SymptomFrequency,
};
pub use service::{Tracker, TrackerError};
pub use store::{MemoryStore, ProfileStore, VaultStore};
pub use vault::Vault;
