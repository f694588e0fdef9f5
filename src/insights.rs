use chrono::NaiveDate;

use crate::calendar::add_days;
use crate::cycle::{average_cycle_length, average_period_length, classify, cycle_lengths, cycle_variation};
use crate::models::{
    CycleInsights, InsightsReport, Period, Regularity, SymptomEntry, SymptomFrequency,
};
use crate::prediction::{fertile_window, next_period_start, ovulation_date};

/// Extra days added to each side of the fertile window when cycles are
/// irregular, reflecting the lower predictive confidence.
pub const IRREGULAR_WIDENING_DAYS: i64 = 1;

/// How many symptom rows the dashboard shows.
pub const TOP_SYMPTOMS: usize = 5;

/// Compose the full cycle statistics for a period history.
///
/// Every numeric field is always populated, falling back to the documented
/// defaults when history is thin. A single logged period is already enough
/// for a next-period prediction (using the default cycle length); the
/// regularity classification needs more.
pub fn cycle_insights(periods: &[Period]) -> CycleInsights {
    let lengths = cycle_lengths(periods);
    let avg_cycle_length = average_cycle_length(&lengths);
    let avg_period_length = average_period_length(periods);
    let cycle_variation = cycle_variation(&lengths, avg_cycle_length);
    let (regularity, confidence) = classify(lengths.len(), cycle_variation);

    let next_ovulation = next_period_start(periods, avg_cycle_length).map(ovulation_date);
    let fertile = next_ovulation.map(|ov| {
        let mut window = fertile_window(ov);
        if regularity == Regularity::Irregular {
            window.start = add_days(window.start, -IRREGULAR_WIDENING_DAYS);
            window.end = add_days(window.end, IRREGULAR_WIDENING_DAYS);
        }
        window
    });

    CycleInsights {
        avg_cycle_length,
        avg_period_length,
        cycle_variation,
        regularity,
        confidence,
        next_ovulation,
        fertile_window: fertile,
    }
}

/// Tag frequency across symptom entries, most common first, top
/// [`TOP_SYMPTOMS`] only.
///
/// The percentage denominator is the number of *entries*, not tag
/// occurrences: an entry tagged both "Headache" and "Nausea" contributes to
/// both rows, so percentages may sum past 100. That is the intended reading
/// ("40% of logged days had a headache") and is not normalized away. Ties
/// keep first-seen tag order, so output is deterministic.
pub fn common_symptoms(entries: &[SymptomEntry]) -> Vec<SymptomFrequency> {
    if entries.is_empty() {
        return Vec::new();
    }

    let mut counts: Vec<(String, usize)> = Vec::new();
    for entry in entries {
        for tag in &entry.tags {
            match counts.iter_mut().find(|(name, _)| name == tag) {
                Some((_, count)) => *count += 1,
                None => counts.push((tag.clone(), 1)),
            }
        }
    }

    let total = entries.len() as f64;
    let mut rows: Vec<SymptomFrequency> = counts
        .into_iter()
        .map(|(name, count)| SymptomFrequency {
            name,
            count,
            percentage: (count as f64 / total * 100.0).round() as i64,
        })
        .collect();

    rows.sort_by(|a, b| b.count.cmp(&a.count));
    rows.truncate(TOP_SYMPTOMS);
    rows
}

/// The dashboard payload for one user. `today` is passed in so the function
/// stays pure; `days_until_next` clamps at zero when the prediction is
/// already past or there is no history.
pub fn insights_report(
    periods: &[Period],
    symptoms: &[SymptomEntry],
    today: NaiveDate,
) -> InsightsReport {
    let insights = cycle_insights(periods);
    let next_period_date = next_period_start(periods, insights.avg_cycle_length);
    let days_until_next = next_period_date
        .map(|next| (next - today).num_days().max(0))
        .unwrap_or(0);

    InsightsReport {
        average_cycle_length: insights.avg_cycle_length,
        average_period_length: insights.avg_period_length,
        cycle_variation: insights.cycle_variation,
        total_cycles: periods.len(),
        next_period_date,
        days_until_next,
        common_symptoms: common_symptoms(symptoms),
    }
}
