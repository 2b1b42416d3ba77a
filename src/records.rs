// Personal-best detection over one exercise's history.
use crate::model::{ExerciseKind, WorkoutSet};
use crate::order::sort_training_order;

/// Decide whether `set` broke new ground the first time it was performed.
///
/// The history is the exercise's full set collection; sets strictly before
/// `set` in training order form the comparison window. The metric depends on
/// the exercise kind: duration for `TimeOnly`, reps for `RepsOnly`, and for
/// `WeightReps` either weight or volume exceeding its previous maximum
/// qualifies. A tie does not count; only a strictly greater, non-zero value
/// earns the badge. The first set of an exercise is a personal best whenever
/// its metric is positive.
pub fn is_personal_best(set: &WorkoutSet, all_sets: &[WorkoutSet], kind: ExerciseKind) -> bool {
    let mut history: Vec<&WorkoutSet> = all_sets
        .iter()
        .filter(|s| s.exercise_id.is_some() && s.exercise_id == set.exercise_id)
        .collect();
    sort_training_order(&mut history);

    let Some(pos) = history.iter().position(|s| s.id == set.id) else {
        return false;
    };
    let prior = &history[..pos];

    match kind {
        ExerciseKind::TimeOnly => {
            let prev_max = prior.iter().map(|s| s.duration_secs).max().unwrap_or(0);
            set.duration_secs > 0 && set.duration_secs > prev_max
        }
        ExerciseKind::RepsOnly => {
            let prev_max = prior.iter().map(|s| s.reps).max().unwrap_or(0);
            set.reps > 0 && set.reps > prev_max
        }
        ExerciseKind::WeightReps => {
            let prev_weight = prior.iter().map(|s| s.weight).fold(0.0_f64, f64::max);
            let prev_volume = prior.iter().map(|s| s.volume()).fold(0.0_f64, f64::max);
            let new_weight = set.weight > 0.0 && set.weight > prev_weight;
            let new_volume = set.volume() > 0.0 && set.volume() > prev_volume;
            new_weight || new_volume
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, TimeZone, Utc};

    fn set(id: u64, day: u32, set_number: u32, weight: f64, reps: u32) -> WorkoutSet {
        WorkoutSet {
            id,
            exercise_id: Some(1),
            performed_at: NaiveDate::from_ymd_opt(2024, 3, day)
                .unwrap()
                .and_hms_opt(17, 30, 0)
                .unwrap(),
            weight,
            reps,
            duration_secs: 0,
            set_number,
            rir: None,
            notes: String::new(),
            day_note: None,
            body_weight: None,
            waist: None,
            created_at: Utc.timestamp_opt(id as i64, 0).unwrap(),
        }
    }

    #[test]
    fn squat_progression_example() {
        // Day 1: 100x5 then 105x5; day 2: 110x3.
        let sets = vec![
            set(1, 1, 1, 100.0, 5),
            set(2, 1, 2, 105.0, 5),
            set(3, 2, 1, 110.0, 3),
        ];
        assert!(is_personal_best(&sets[0], &sets, ExerciseKind::WeightReps));
        assert!(is_personal_best(&sets[1], &sets, ExerciseKind::WeightReps));
        assert!(is_personal_best(&sets[2], &sets, ExerciseKind::WeightReps));
    }

    #[test]
    fn tie_does_not_re_earn_the_badge() {
        let sets = vec![set(1, 1, 1, 100.0, 5), set(2, 2, 1, 100.0, 5)];
        assert!(!is_personal_best(&sets[1], &sets, ExerciseKind::WeightReps));
    }

    #[test]
    fn zero_metric_is_never_a_best() {
        let sets = vec![set(1, 1, 1, 0.0, 0)];
        assert!(!is_personal_best(&sets[0], &sets, ExerciseKind::WeightReps));
        let mut timed = set(1, 1, 1, 0.0, 0);
        timed.duration_secs = 0;
        let timed_sets = vec![timed];
        assert!(!is_personal_best(
            &timed_sets[0],
            &timed_sets,
            ExerciseKind::TimeOnly
        ));
    }

    #[test]
    fn first_positive_set_is_a_best() {
        let sets = vec![set(1, 1, 1, 20.0, 1)];
        assert!(is_personal_best(&sets[0], &sets, ExerciseKind::WeightReps));
    }

    #[test]
    fn volume_alone_can_qualify() {
        // Same weight as before, but more reps: volume record, weight tie.
        let sets = vec![set(1, 1, 1, 100.0, 5), set(2, 2, 1, 100.0, 8)];
        assert!(is_personal_best(&sets[1], &sets, ExerciseKind::WeightReps));
    }

    #[test]
    fn reps_only_compares_reps() {
        let sets = vec![set(1, 1, 1, 0.0, 10), set(2, 2, 1, 0.0, 10)];
        assert!(is_personal_best(&sets[0], &sets, ExerciseKind::RepsOnly));
        assert!(!is_personal_best(&sets[1], &sets, ExerciseKind::RepsOnly));
    }

    #[test]
    fn time_only_compares_duration() {
        let mut a = set(1, 1, 1, 0.0, 0);
        a.duration_secs = 30;
        let mut b = set(2, 2, 1, 0.0, 0);
        b.duration_secs = 45;
        let sets = vec![a, b];
        assert!(is_personal_best(&sets[1], &sets, ExerciseKind::TimeOnly));
    }

    #[test]
    fn later_sets_do_not_affect_earlier_ones() {
        // The 120 on day 3 must not retroactively unmake day 2's record.
        let sets = vec![
            set(1, 1, 1, 100.0, 5),
            set(2, 2, 1, 110.0, 5),
            set(3, 3, 1, 120.0, 5),
        ];
        assert!(is_personal_best(&sets[1], &sets, ExerciseKind::WeightReps));
    }

    #[test]
    fn dangling_sets_are_ignored() {
        let mut dangling = set(9, 1, 1, 200.0, 5);
        dangling.exercise_id = None;
        let sets = vec![dangling, set(1, 2, 1, 100.0, 5)];
        assert!(is_personal_best(&sets[1], &sets, ExerciseKind::WeightReps));
    }
}
