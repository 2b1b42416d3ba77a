// Module for aggregating one exercise's sets into progress statistics.
use chrono::{Months, NaiveDate};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::model::WorkoutSet;

/// Aggregates for a single training day of one exercise.
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct DaySummary {
    pub day: NaiveDate,
    pub total_volume: f64,
    pub max_weight: f64,
    pub best_est_1rm: f64,
    pub max_duration_secs: u32,
    pub total_reps: u32,
    pub set_count: usize,
}

/// Summary statistics over a time window of one exercise's history.
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProgressStats {
    /// Heaviest weight in the window, absent when there are no sets.
    pub personal_record: Option<f64>,
    pub best_day_volume: f64,
    /// Total volume over the full history, ignoring the window.
    pub lifetime_volume: f64,
    pub avg_reps_per_set: f64,
    pub sessions_per_week: f64,
    pub total_sets: usize,
}

/// The time window statistics are computed over.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StatsWindow {
    AllTime,
    /// The last N months, counting back from "today".
    MonthsBack(u32),
}

impl StatsWindow {
    fn start(self, today: NaiveDate) -> Option<NaiveDate> {
        match self {
            StatsWindow::AllTime => None,
            StatsWindow::MonthsBack(n) => today.checked_sub_months(Months::new(n)),
        }
    }
}

fn in_window(day: NaiveDate, start: Option<NaiveDate>, today: NaiveDate) -> bool {
    start.map_or(true, |s| day >= s) && day <= today
}

/// Group an exercise's sets by calendar day and compute per-day aggregates.
///
/// Only sets within the window are considered. Days come back in ascending
/// order, ready for charting. Dangling sets are skipped.
pub fn aggregate_daily(
    sets: &[WorkoutSet],
    window: StatsWindow,
    today: NaiveDate,
) -> Vec<DaySummary> {
    let start = window.start(today);
    let mut days: BTreeMap<NaiveDate, DaySummary> = BTreeMap::new();

    for s in sets {
        if s.exercise_id.is_none() || !in_window(s.day(), start, today) {
            continue;
        }
        let entry = days.entry(s.day()).or_insert_with(|| DaySummary {
            day: s.day(),
            ..DaySummary::default()
        });
        entry.total_volume += s.volume();
        entry.max_weight = entry.max_weight.max(s.weight);
        entry.best_est_1rm = entry.best_est_1rm.max(s.estimated_one_rep_max());
        entry.max_duration_secs = entry.max_duration_secs.max(s.duration_secs);
        entry.total_reps += s.reps;
        entry.set_count += 1;
    }

    days.into_values().collect()
}

/// Compute windowed progress statistics for one exercise.
///
/// Empty input yields the zeroed default; the sessions-per-week denominator
/// is floored at one week so a single training day never divides by zero.
pub fn compute_progress_stats(
    sets: &[WorkoutSet],
    window: StatsWindow,
    today: NaiveDate,
) -> ProgressStats {
    let lifetime_volume: f64 = sets
        .iter()
        .filter(|s| s.exercise_id.is_some())
        .map(|s| s.volume())
        .sum();

    let daily = aggregate_daily(sets, window, today);
    if daily.is_empty() {
        return ProgressStats {
            lifetime_volume,
            ..ProgressStats::default()
        };
    }

    log::info!("Computing progress stats over {} training days", daily.len());

    let total_sets: usize = daily.iter().map(|d| d.set_count).sum();
    let total_reps: u32 = daily.iter().map(|d| d.total_reps).sum();
    let personal_record = daily
        .iter()
        .map(|d| d.max_weight)
        .fold(f64::NEG_INFINITY, f64::max);
    let best_day_volume = daily
        .iter()
        .map(|d| d.total_volume)
        .fold(0.0_f64, f64::max);

    // daily is sorted ascending, so the span is last minus first.
    let first = daily.first().map(|d| d.day).unwrap_or(today);
    let last = daily.last().map(|d| d.day).unwrap_or(today);
    let weeks = ((last - first).num_days() as f64 / 7.0).max(1.0);
    let sessions_per_week = daily.len() as f64 / weeks;

    ProgressStats {
        personal_record: (personal_record > f64::NEG_INFINITY).then_some(personal_record),
        best_day_volume,
        lifetime_volume,
        avg_reps_per_set: f64::from(total_reps) / total_sets as f64,
        sessions_per_week,
        total_sets,
    }
}
