// Core entity types for the training log.
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

/// How a set of this exercise is measured.
///
/// `WeightReps` uses weight and reps, `RepsOnly` uses reps alone and
/// `TimeOnly` uses duration alone. Fields that do not apply to the kind are
/// kept at zero (see [`WorkoutSet::normalize`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ExerciseKind {
    WeightReps,
    RepsOnly,
    TimeOnly,
}

impl ExerciseKind {
    /// Stable tag used in exports and the store file.
    pub fn as_str(self) -> &'static str {
        match self {
            ExerciseKind::WeightReps => "weightReps",
            ExerciseKind::RepsOnly => "repsOnly",
            ExerciseKind::TimeOnly => "timeOnly",
        }
    }
}

/// A logged or user-created exercise.
///
/// Display name and notes for built-in exercises are localized through the
/// catalog; user-created ones fall back to the raw `name`/`notes` fields.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Exercise {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub notes: String,
    #[serde(default)]
    pub muscle_group: String,
    pub kind: ExerciseKind,
    pub created_at: DateTime<Utc>,
}

impl Exercise {
    /// Sets belonging to this exercise, skipping dangling records.
    pub fn own_sets<'a>(&self, sets: &'a [WorkoutSet]) -> Vec<&'a WorkoutSet> {
        sets.iter()
            .filter(|s| s.exercise_id == Some(self.id))
            .collect()
    }

    /// Number of distinct calendar days with at least one set.
    pub fn times_performed(&self, sets: &[WorkoutSet]) -> usize {
        let mut days: Vec<NaiveDate> = self.own_sets(sets).iter().map(|s| s.day()).collect();
        days.sort();
        days.dedup();
        days.len()
    }

    /// Calendar day of the most recent set, if any.
    pub fn last_trained(&self, sets: &[WorkoutSet]) -> Option<NaiveDate> {
        self.own_sets(sets).iter().map(|s| s.day()).max()
    }

    /// Weight of the latest set in training order.
    pub fn last_weight(&self, sets: &[WorkoutSet]) -> Option<f64> {
        let mut own = self.own_sets(sets);
        crate::order::sort_training_order(&mut own);
        own.last().map(|s| s.weight)
    }
}

/// One performed unit of an exercise on a specific date.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkoutSet {
    pub id: u64,
    /// Owning exercise; `None` once the exercise has been deleted, in which
    /// case the set is filtered out of every view.
    pub exercise_id: Option<u64>,
    /// Local date and time the set was performed.
    pub performed_at: NaiveDateTime,
    /// Weight in kilograms, >= 0.
    pub weight: f64,
    pub reps: u32,
    pub duration_secs: u32,
    /// 1-based position within the exercise's sets of that calendar day.
    pub set_number: u32,
    /// Reps in reserve, 0..=2 when recorded.
    pub rir: Option<u8>,
    #[serde(default)]
    pub notes: String,
    /// Note attached to the whole training day, mirrored on every set of
    /// that day. The store keeps the copies in sync.
    #[serde(default)]
    pub day_note: Option<String>,
    #[serde(default)]
    pub body_weight: Option<f64>,
    #[serde(default)]
    pub waist: Option<f64>,
    /// Record creation time, used as an ordering tie-breaker. Distinct from
    /// the logged `performed_at`.
    pub created_at: DateTime<Utc>,
}

impl WorkoutSet {
    /// Calendar day of the logged date.
    pub fn day(&self) -> NaiveDate {
        self.performed_at.date()
    }

    /// Training volume: weight * reps.
    pub fn volume(&self) -> f64 {
        self.weight * f64::from(self.reps)
    }

    /// Epley estimate: `weight * (1 + reps / 30)`.
    pub fn estimated_one_rep_max(&self) -> f64 {
        self.weight * (1.0 + f64::from(self.reps) / 30.0)
    }

    /// Duration rendered as `M:SS`.
    pub fn formatted_duration(&self) -> String {
        format!("{}:{:02}", self.duration_secs / 60, self.duration_secs % 60)
    }

    /// Zero the fields the exercise kind does not use and clamp RIR into
    /// its valid range.
    pub fn normalize(&mut self, kind: ExerciseKind) {
        match kind {
            ExerciseKind::WeightReps => {
                self.duration_secs = 0;
            }
            ExerciseKind::RepsOnly => {
                self.weight = 0.0;
                self.duration_secs = 0;
            }
            ExerciseKind::TimeOnly => {
                self.weight = 0.0;
                self.reps = 0;
            }
        }
        if self.weight < 0.0 {
            self.weight = 0.0;
        }
        self.rir = self.rir.map(|r| r.min(2));
    }
}

/// Parse weight input, treating malformed text as 0 instead of failing.
pub fn parse_weight_input(text: &str) -> f64 {
    text.trim().parse::<f64>().unwrap_or(0.0).max(0.0)
}

/// Parse a rep or duration count, treating malformed text as 0.
pub fn parse_count_input(text: &str) -> u32 {
    text.trim().parse().unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn set(weight: f64, reps: u32) -> WorkoutSet {
        WorkoutSet {
            id: 1,
            exercise_id: Some(1),
            performed_at: NaiveDate::from_ymd_opt(2024, 1, 1)
                .unwrap()
                .and_hms_opt(10, 0, 0)
                .unwrap(),
            weight,
            reps,
            duration_secs: 0,
            set_number: 1,
            rir: None,
            notes: String::new(),
            day_note: None,
            body_weight: None,
            waist: None,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn volume_and_epley() {
        let s = set(100.0, 5);
        assert!((s.volume() - 500.0).abs() < 1e-9);
        assert!((s.estimated_one_rep_max() - 116.666_666).abs() < 1e-3);
    }

    #[test]
    fn formatted_duration_pads_seconds() {
        let mut s = set(0.0, 0);
        s.duration_secs = 95;
        assert_eq!(s.formatted_duration(), "1:35");
        s.duration_secs = 60;
        assert_eq!(s.formatted_duration(), "1:00");
        s.duration_secs = 9;
        assert_eq!(s.formatted_duration(), "0:09");
    }

    #[test]
    fn normalize_zeroes_unused_fields() {
        let mut s = set(80.0, 8);
        s.duration_secs = 45;
        s.rir = Some(5);
        s.normalize(ExerciseKind::WeightReps);
        assert_eq!(s.duration_secs, 0);
        assert_eq!(s.rir, Some(2));

        let mut s = set(80.0, 8);
        s.normalize(ExerciseKind::RepsOnly);
        assert_eq!(s.weight, 0.0);
        assert_eq!(s.reps, 8);

        let mut s = set(80.0, 8);
        s.duration_secs = 45;
        s.normalize(ExerciseKind::TimeOnly);
        assert_eq!(s.weight, 0.0);
        assert_eq!(s.reps, 0);
        assert_eq!(s.duration_secs, 45);
    }

    #[test]
    fn kind_round_trips_with_camel_case_tags() {
        let json = serde_json::to_string(&ExerciseKind::WeightReps).unwrap();
        assert_eq!(json, "\"weightReps\"");
        let kind: ExerciseKind = serde_json::from_str("\"timeOnly\"").unwrap();
        assert_eq!(kind, ExerciseKind::TimeOnly);
        assert_eq!(ExerciseKind::RepsOnly.as_str(), "repsOnly");
    }

    #[test]
    fn malformed_numeric_input_parses_to_zero() {
        assert_eq!(parse_weight_input("abc"), 0.0);
        assert_eq!(parse_weight_input("-5"), 0.0);
        assert!((parse_weight_input(" 62.5 ") - 62.5).abs() < 1e-9);
        assert_eq!(parse_count_input(""), 0);
        assert_eq!(parse_count_input("12"), 12);
    }
}
