// Renumbering pass for legacy or duplicated set numbers.
use std::collections::BTreeMap;

use chrono::NaiveDate;

use crate::model::WorkoutSet;

/// Renumber sets whose (exercise, day) group carries duplicate or
/// non-positive set numbers.
///
/// Suspect groups are re-sorted by logged date-time, creation time and id
/// (the set number itself cannot be trusted here) and renumbered 1..N.
/// Healthy groups are left untouched, which makes the pass idempotent.
/// Returns the number of sets whose number actually changed; callers persist
/// only when this is non-zero.
pub fn repair_set_numbers(sets: &mut [WorkoutSet]) -> usize {
    let mut groups: BTreeMap<(u64, NaiveDate), Vec<usize>> = BTreeMap::new();
    for (idx, set) in sets.iter().enumerate() {
        if let Some(ex) = set.exercise_id {
            groups.entry((ex, set.day())).or_default().push(idx);
        }
    }

    let mut changed = 0;
    for indices in groups.values() {
        if !needs_repair(sets, indices) {
            continue;
        }
        let mut ordered = indices.clone();
        ordered.sort_by(|a, b| {
            let (x, y) = (&sets[*a], &sets[*b]);
            x.performed_at
                .cmp(&y.performed_at)
                .then_with(|| x.created_at.cmp(&y.created_at))
                .then_with(|| x.id.cmp(&y.id))
        });
        for (pos, idx) in ordered.iter().enumerate() {
            let number = (pos + 1) as u32;
            if sets[*idx].set_number != number {
                sets[*idx].set_number = number;
                changed += 1;
            }
        }
    }

    if changed > 0 {
        log::info!("Repaired set numbers on {changed} sets");
    }
    changed
}

fn needs_repair(sets: &[WorkoutSet], indices: &[usize]) -> bool {
    let mut seen = Vec::with_capacity(indices.len());
    for idx in indices {
        let n = sets[*idx].set_number;
        if n == 0 || seen.contains(&n) {
            return true;
        }
        seen.push(n);
    }
    false
}
