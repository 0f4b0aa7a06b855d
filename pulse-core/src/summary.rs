//! Daily forecast summaries.
//!
//! Providers return forecasts as fine-grained readings (OpenWeatherMap uses
//! 3-hour steps). The weather page shows one card per day instead, so the
//! readings are folded into high/low temperatures and the most frequent
//! condition for each calendar day.

use std::collections::HashMap;

use chrono::{DateTime, NaiveDate, Utc};

use crate::model::{DaySummary, Observation};

/// Number of day cards the forecast strip shows.
pub const MAX_FORECAST_DAYS: usize = 5;

/// Summarize `observations` into at most [`MAX_FORECAST_DAYS`] days,
/// skipping `today`.
///
/// Days come out in the order they first appear in the input; nothing is
/// sorted here, so chronological input gives ascending dates. Readings
/// without a condition code or text simply don't vote for that day's
/// dominant condition.
pub fn summarize_forecast(observations: &[Observation], today: NaiveDate) -> Vec<DaySummary> {
    let mut days: Vec<DailyAccumulator> = Vec::new();
    let mut index: HashMap<NaiveDate, usize> = HashMap::new();

    for obs in observations {
        let date = obs.day();
        if date == today {
            continue;
        }

        let slot = *index.entry(date).or_insert_with(|| {
            days.push(DailyAccumulator::new(date, obs.timestamp, obs.temperature));
            days.len() - 1
        });

        days[slot].observe(obs);
    }

    days.into_iter()
        .take(MAX_FORECAST_DAYS)
        .map(DailyAccumulator::finish)
        .collect()
}

#[derive(Debug)]
struct DailyAccumulator {
    date: NaiveDate,
    first_seen: DateTime<Utc>,
    high: f64,
    low: f64,
    codes: Tally,
    texts: Tally,
}

impl DailyAccumulator {
    fn new(date: NaiveDate, first_seen: DateTime<Utc>, temperature: f64) -> Self {
        Self {
            date,
            first_seen,
            high: temperature,
            low: temperature,
            codes: Tally::default(),
            texts: Tally::default(),
        }
    }

    fn observe(&mut self, obs: &Observation) {
        self.high = self.high.max(obs.temperature);
        self.low = self.low.min(obs.temperature);

        if let Some(code) = obs.condition_code.as_deref() {
            self.codes.add(code);
        }
        if let Some(text) = obs.condition_text.as_deref() {
            self.texts.add(text);
        }
    }

    fn finish(self) -> DaySummary {
        DaySummary {
            date: self.date,
            representative_timestamp: self.first_seen,
            high: self.high,
            low: self.low,
            dominant_condition_code: self.codes.most_frequent(),
            dominant_condition_text: self.texts.most_frequent(),
        }
    }
}

/// Occurrence counts kept in first-seen order, so ties resolve to the value
/// that showed up earliest.
#[derive(Debug, Default)]
struct Tally {
    counts: Vec<(String, usize)>,
}

impl Tally {
    fn add(&mut self, value: &str) {
        match self.counts.iter_mut().find(|(seen, _)| seen == value) {
            Some((_, count)) => *count += 1,
            None => self.counts.push((value.to_string(), 1)),
        }
    }

    fn most_frequent(self) -> Option<String> {
        let mut best: Option<(String, usize)> = None;

        for (value, count) in self.counts {
            match &best {
                Some((_, best_count)) if count <= *best_count => {}
                _ => best = Some((value, count)),
            }
        }

        best.map(|(value, _)| value)
    }
}
