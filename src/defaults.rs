// Suggested values for quick-added sets.
use serde::{Deserialize, Serialize};

use chrono::NaiveDate;

use crate::model::{ExerciseKind, WorkoutSet};
use crate::order::sort_training_order;

/// Which set of the previous training day seeds the suggestion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DefaultSetChoice {
    #[serde(rename = "firstSet")]
    FirstSet,
    #[serde(rename = "lastSet")]
    LastSet,
}

impl Default for DefaultSetChoice {
    fn default() -> Self {
        DefaultSetChoice::LastSet
    }
}

/// Values pre-filled into a new set.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SetDefaults {
    pub weight: f64,
    pub reps: u32,
    pub duration_secs: u32,
    pub rir: Option<u8>,
}

impl SetDefaults {
    /// Hard fallbacks when the exercise has no history at all.
    fn for_kind(kind: ExerciseKind) -> Self {
        match kind {
            ExerciseKind::WeightReps => SetDefaults {
                weight: 20.0,
                reps: 10,
                duration_secs: 0,
                rir: None,
            },
            ExerciseKind::RepsOnly => SetDefaults {
                weight: 0.0,
                reps: 10,
                duration_secs: 0,
                rir: None,
            },
            ExerciseKind::TimeOnly => SetDefaults {
                weight: 0.0,
                reps: 0,
                duration_secs: 30,
                rir: None,
            },
        }
    }

    fn from_set(set: &WorkoutSet) -> Self {
        SetDefaults {
            weight: set.weight,
            reps: set.reps,
            duration_secs: set.duration_secs,
            rir: set.rir,
        }
    }
}

/// Compute the suggested weight/reps/duration/RIR for a new set.
///
/// A `reference` set (duplicating an existing set) wins outright. Otherwise
/// the most recent calendar day strictly before `target_day` that has sets
/// for this exercise provides the template, taking its first or last set in
/// training order per `choice`. With no history the kind's hard defaults
/// apply.
pub fn suggest_defaults(
    kind: ExerciseKind,
    exercise_sets: &[WorkoutSet],
    target_day: NaiveDate,
    reference: Option<&WorkoutSet>,
    choice: DefaultSetChoice,
) -> SetDefaults {
    if let Some(r) = reference {
        return SetDefaults::from_set(r);
    }

    let prior_day = exercise_sets
        .iter()
        .map(|s| s.day())
        .filter(|d| *d < target_day)
        .max();
    let Some(day) = prior_day else {
        return SetDefaults::for_kind(kind);
    };

    let mut day_sets: Vec<&WorkoutSet> =
        exercise_sets.iter().filter(|s| s.day() == day).collect();
    sort_training_order(&mut day_sets);
    let template = match choice {
        DefaultSetChoice::FirstSet => day_sets.first(),
        DefaultSetChoice::LastSet => day_sets.last(),
    };
    template.map_or_else(|| SetDefaults::for_kind(kind), |s| SetDefaults::from_set(s))
}

/// Set number for the next set of `target_day`: one past the day's current
/// maximum, or 1 for the day's first set.
pub fn next_set_number(exercise_sets: &[WorkoutSet], target_day: NaiveDate) -> u32 {
    exercise_sets
        .iter()
        .filter(|s| s.day() == target_day)
        .map(|s| s.set_number)
        .max()
        .map_or(1, |n| n + 1)
}
