use crate::models::{Confidence, Period, Regularity};

/// Assumed cycle length until enough history exists to compute one.
pub const DEFAULT_CYCLE_LENGTH: i64 = 28;
/// Assumed period length when no period has a recorded end date.
pub const DEFAULT_PERIOD_LENGTH: i64 = 5;
/// Cycles with a standard deviation at or below this many days count as
/// regular. Tunable, but the value is part of the observed behavior.
pub const REGULARITY_THRESHOLD_DAYS: i64 = 7;
/// Below this many cycle-length samples no classification is attempted.
pub const MIN_SAMPLES_TO_CLASSIFY: usize = 3;
/// At this many samples a regular history earns high confidence.
pub const HIGH_CONFIDENCE_SAMPLES: usize = 6;

/// Derive cycle lengths (start-to-start day counts) from a period history.
///
/// Input order does not matter: periods are sorted most-recent-first before
/// pairing, and the output keeps that order. Non-positive gaps (duplicate or
/// same-day entries) are dropped. Fewer than two periods yields nothing.
pub fn cycle_lengths(periods: &[Period]) -> Vec<i64> {
    if periods.len() < 2 {
        return Vec::new();
    }

    let mut sorted: Vec<&Period> = periods.iter().collect();
    sorted.sort_by(|a, b| b.start_date.cmp(&a.start_date));

    sorted
        .windows(2)
        .map(|w| (w[0].start_date - w[1].start_date).num_days())
        .filter(|&days| days > 0)
        .collect()
}

/// Rounded mean cycle length, defaulting to [`DEFAULT_CYCLE_LENGTH`] when
/// there are no samples.
pub fn average_cycle_length(lengths: &[i64]) -> i64 {
    if lengths.is_empty() {
        return DEFAULT_CYCLE_LENGTH;
    }
    rounded_mean(lengths)
}

/// Rounded mean period length over periods with a recorded end, counting
/// both endpoints (a period starting and ending the same day is 1 day long).
/// Defaults to [`DEFAULT_PERIOD_LENGTH`] when no period has an end date.
pub fn average_period_length(periods: &[Period]) -> i64 {
    let lengths: Vec<i64> = periods
        .iter()
        .filter_map(|p| p.end_date.map(|end| (end - p.start_date).num_days() + 1))
        .collect();

    if lengths.is_empty() {
        return DEFAULT_PERIOD_LENGTH;
    }
    rounded_mean(&lengths)
}

/// Population standard deviation of the samples around `avg`, rounded.
///
/// `avg` is the already-rounded average cycle length, not a fresh mean —
/// the variation is measured against the number shown to the user.
pub fn cycle_variation(lengths: &[i64], avg: i64) -> i64 {
    if lengths.len() < 2 {
        return 0;
    }
    let variance = lengths
        .iter()
        .map(|&l| ((l - avg) as f64).powi(2))
        .sum::<f64>()
        / lengths.len() as f64;
    variance.sqrt().round() as i64
}

/// Classify regularity and prediction confidence from sample count and
/// variation.
///
/// | samples | variation        | regularity | confidence |
/// |---------|------------------|------------|------------|
/// | < 3     | n/a              | unknown    | low        |
/// | 3..=5   | any              | by σ ≤ 7   | medium     |
/// | >= 6    | σ ≤ 7            | regular    | high       |
/// | >= 6    | σ > 7            | irregular  | medium     |
pub fn classify(sample_count: usize, variation: i64) -> (Regularity, Confidence) {
    if sample_count < MIN_SAMPLES_TO_CLASSIFY {
        return (Regularity::Unknown, Confidence::Low);
    }

    let regularity = if variation <= REGULARITY_THRESHOLD_DAYS {
        Regularity::Regular
    } else {
        Regularity::Irregular
    };

    let confidence = if sample_count >= HIGH_CONFIDENCE_SAMPLES {
        match regularity {
            Regularity::Regular => Confidence::High,
            _ => Confidence::Medium,
        }
    } else {
        Confidence::Medium
    };

    (regularity, confidence)
}

fn rounded_mean(values: &[i64]) -> i64 {
    (values.iter().sum::<i64>() as f64 / values.len() as f64).round() as i64
}
