//! Single-user strength-training log.
//!
//! The crate is the data layer beneath a mobile UI: it records workout sets
//! per exercise and derives everything the screens show — per-day volume,
//! personal bests, estimated one-rep maxima, progress statistics, CSV
//! exports and an HTML report. All computation is synchronous and re-derived
//! on read; the only persistent state is a local JSON object store plus a
//! small settings file.

pub mod analysis;
pub mod catalog;
pub mod defaults;
pub mod export;
pub mod model;
pub mod order;
pub mod records;
pub mod repair;
pub mod report;
pub mod settings;
pub mod store;

pub use analysis::{DaySummary, ProgressStats, StatsWindow, aggregate_daily,
    compute_progress_stats};
pub use catalog::{Language, Locale};
pub use defaults::{DefaultSetChoice, SetDefaults, next_set_number, suggest_defaults};
pub use model::{Exercise, ExerciseKind, WorkoutSet};
pub use order::{sort_training_order, training_order};
pub use records::is_personal_best;
pub use repair::repair_set_numbers;
pub use settings::{BodyMetrics, Settings};
pub use store::{Store, StoreError};
