use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::debug;
use uuid::Uuid;

use crate::calendar::{is_in_month, is_same_day, month_grid};
use crate::insights::{cycle_insights, insights_report};
use crate::models::{InsightsReport, ModelError, Period, SymptomEntry};
use crate::prediction::{
    is_in_fertile_window, is_ovulation_day, is_peak_fertility_day, next_period_start,
};
use crate::store::{ProfileStore, StoreError};

#[derive(Debug, thiserror::Error)]
pub enum TrackerError {
    #[error(transparent)]
    Model(#[from] ModelError),
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error("no month {month} in year {year}")]
    InvalidMonth { year: i32, month: u32 },
}

/// One cell of the six-week calendar grid, pre-flagged for rendering.
///
/// Fertility flags come from the raw per-date predicates on the predicted
/// ovulation date; the irregularity widening applies only to the aggregate
/// insights window, not to calendar highlighting.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DayCell {
    pub date: NaiveDate,
    pub in_month: bool,
    pub is_today: bool,
    pub period: bool,
    pub predicted_period: bool,
    pub fertile: bool,
    pub peak_fertility: bool,
    pub ovulation: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct MonthView {
    pub year: i32,
    pub month: u32,
    pub days: Vec<DayCell>,
}

/// Application facade over an injected [`ProfileStore`]: log records, pull
/// reports, assemble month views. Holds no derived state; everything is
/// recomputed from the store on each call.
pub struct Tracker<S: ProfileStore> {
    store: S,
}

impl<S: ProfileStore> Tracker<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Log a period, validating the date pair before it reaches the store.
    pub fn log_period(
        &mut self,
        user: Uuid,
        start: NaiveDate,
        end: Option<NaiveDate>,
    ) -> Result<Period, TrackerError> {
        let period = Period::new(start, end)?;
        self.store.add_period(user, period.clone())?;
        debug!(user = %user, "period logged");
        Ok(period)
    }

    pub fn log_symptoms(&mut self, user: Uuid, entry: SymptomEntry) -> Result<(), TrackerError> {
        self.store.add_symptom(user, entry)?;
        debug!(user = %user, "symptom entry logged");
        Ok(())
    }

    pub fn set_show_fertility(&mut self, user: Uuid, enabled: bool) -> Result<(), TrackerError> {
        self.store.set_show_fertility(user, enabled)?;
        Ok(())
    }

    /// The dashboard report for one user.
    pub fn insights(&self, user: Uuid, today: NaiveDate) -> Result<InsightsReport, TrackerError> {
        let profile = self.store.profile(user)?;
        let report = insights_report(&profile.periods, &profile.symptoms, today);
        debug!(
            user = %user,
            periods = profile.periods.len(),
            symptoms = profile.symptoms.len(),
            "insights report computed"
        );
        Ok(report)
    }

    /// The 42-cell grid for a month, with logged and predicted highlights.
    /// Fertility cells are only flagged when the user has opted in.
    pub fn month_view(
        &self,
        user: Uuid,
        year: i32,
        month: u32,
        today: NaiveDate,
    ) -> Result<MonthView, TrackerError> {
        let grid = month_grid(year, month).ok_or(TrackerError::InvalidMonth { year, month })?;
        let profile = self.store.profile(user)?;

        let insights = cycle_insights(&profile.periods);
        let next_start = next_period_start(&profile.periods, insights.avg_cycle_length);
        let predicted_end =
            next_start.map(|start| start + chrono::Duration::days(insights.avg_period_length - 1));
        let ovulation = if profile.settings.show_fertility {
            insights.next_ovulation
        } else {
            None
        };

        let days = grid
            .into_iter()
            .map(|date| {
                let period = profile.periods.iter().any(|p| {
                    date >= p.start_date && date <= p.end_date.unwrap_or(p.start_date)
                });
                let predicted_period = match (next_start, predicted_end) {
                    (Some(start), Some(end)) => date >= start && date <= end,
                    _ => false,
                };
                DayCell {
                    date,
                    in_month: is_in_month(date, year, month),
                    is_today: is_same_day(date, today),
                    period,
                    predicted_period,
                    fertile: ovulation.map_or(false, |ov| is_in_fertile_window(date, ov)),
                    peak_fertility: ovulation.map_or(false, |ov| is_peak_fertility_day(date, ov)),
                    ovulation: ovulation.map_or(false, |ov| is_ovulation_day(date, ov)),
                }
            })
            .collect();

        Ok(MonthView { year, month, days })
    }
}
