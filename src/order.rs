// Canonical ordering for the sets of one exercise.
use std::cmp::Ordering;

use crate::model::WorkoutSet;

/// Strict total order over the sets of a single exercise.
///
/// Keys, in priority: calendar day of the logged date, then set number, then
/// the full logged date-time, then creation timestamp, then id. Time of day
/// is deliberately not a primary key; sets within a day are ordered by their
/// set number. This order defines "prior" history for personal-best checks,
/// quick-add defaults and export ordering.
pub fn training_order(a: &WorkoutSet, b: &WorkoutSet) -> Ordering {
    a.day()
        .cmp(&b.day())
        .then_with(|| a.set_number.cmp(&b.set_number))
        .then_with(|| a.performed_at.cmp(&b.performed_at))
        .then_with(|| a.created_at.cmp(&b.created_at))
        .then_with(|| a.id.cmp(&b.id))
}

/// Sort a collection of sets into training order.
pub fn sort_training_order(sets: &mut [&WorkoutSet]) {
    sets.sort_by(|a, b| training_order(a, b));
}
