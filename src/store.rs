//! Embedded on-device store for exercises and workout sets.
//!
//! A single JSON document holds the whole object graph. The file is loaded
//! once at open; every mutation goes through a method that saves afterwards.
//! There is no multi-writer scenario, so no locking discipline is needed.
use std::path::{Path, PathBuf};

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use dirs_next as dirs;
use serde::{Deserialize, Serialize};

use crate::catalog;
use crate::defaults::{self, DefaultSetChoice};
use crate::model::{Exercise, ExerciseKind, WorkoutSet};
use crate::repair::repair_set_numbers;
use crate::settings::Settings;

/// Failure reading or writing the store file.
#[derive(Debug)]
pub enum StoreError {
    Io(std::io::Error),
    Json(serde_json::Error),
}

impl std::fmt::Display for StoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StoreError::Io(e) => write!(f, "store I/O error: {e}"),
            StoreError::Json(e) => write!(f, "store JSON error: {e}"),
        }
    }
}

impl std::error::Error for StoreError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            StoreError::Io(e) => Some(e),
            StoreError::Json(e) => Some(e),
        }
    }
}

#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(default)]
struct StoreData {
    exercises: Vec<Exercise>,
    sets: Vec<WorkoutSet>,
    next_exercise_id: u64,
    next_set_id: u64,
}

/// The on-device object store.
pub struct Store {
    path: PathBuf,
    data: StoreData,
}

impl Store {
    const FILE: &'static str = "repbook_store.json";

    /// Default store path under the platform data directory.
    pub fn default_path() -> Option<PathBuf> {
        dirs::data_dir().map(|p| p.join("repbook").join(Self::FILE))
    }

    /// Open the store at `path`, creating an empty one when the file does
    /// not exist.
    ///
    /// An unreadable or un-parsable file is renamed aside to
    /// `<file>.corrupt` and the store starts empty; the original bytes stay
    /// on disk for manual recovery. Legacy set numbers are repaired on load
    /// and the repair is persisted only when something actually changed.
    pub fn open<P: AsRef<Path>>(path: P) -> Self {
        let path = path.as_ref().to_path_buf();
        let data = if path.exists() {
            match Self::read_data(&path) {
                Ok(data) => data,
                Err(e) => {
                    log::error!("Store at {} is unreadable ({e}), starting empty", path.display());
                    // Append ".corrupt" to the full file name so any store
                    // path keeps its original extension in the aside copy.
                    let mut aside_name = path
                        .file_name()
                        .map(|n| n.to_os_string())
                        .unwrap_or_default();
                    aside_name.push(".corrupt");
                    let aside = path.with_file_name(aside_name);
                    if let Err(e) = std::fs::rename(&path, &aside) {
                        log::error!("Could not move corrupt store aside: {e}");
                    }
                    StoreData::default()
                }
            }
        } else {
            StoreData::default()
        };

        let mut store = Store { path, data };
        if repair_set_numbers(&mut store.data.sets) > 0 {
            store.persist();
        }
        store
    }

    fn read_data(path: &Path) -> Result<StoreData, StoreError> {
        let data = std::fs::read_to_string(path).map_err(StoreError::Io)?;
        serde_json::from_str(&data).map_err(StoreError::Json)
    }

    fn write_data(&self) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent).map_err(StoreError::Io)?;
        }
        let data = serde_json::to_string_pretty(&self.data).map_err(StoreError::Json)?;
        std::fs::write(&self.path, data).map_err(StoreError::Io)
    }

    /// Best-effort save: failures are logged and the in-memory state stays
    /// authoritative.
    fn persist(&self) {
        if let Err(e) = self.write_data() {
            log::warn!("Failed to save store: {e}");
        }
    }

    pub fn exercises(&self) -> &[Exercise] {
        &self.data.exercises
    }

    pub fn exercise(&self, id: u64) -> Option<&Exercise> {
        self.data.exercises.iter().find(|e| e.id == id)
    }

    /// Raw set collection, including records that still need filtering.
    pub fn all_sets(&self) -> &[WorkoutSet] {
        &self.data.sets
    }

    /// Sets of one exercise, in insertion order, dangling records excluded.
    pub fn sets_for_exercise(&self, exercise_id: u64) -> Vec<WorkoutSet> {
        if self.exercise(exercise_id).is_none() {
            return Vec::new();
        }
        self.data
            .sets
            .iter()
            .filter(|s| s.exercise_id == Some(exercise_id))
            .cloned()
            .collect()
    }

    /// Create an exercise and return its id.
    pub fn add_exercise(
        &mut self,
        name: &str,
        notes: &str,
        muscle_group: &str,
        kind: ExerciseKind,
        now: DateTime<Utc>,
    ) -> u64 {
        self.data.next_exercise_id += 1;
        let id = self.data.next_exercise_id;
        self.data.exercises.push(Exercise {
            id,
            name: name.to_string(),
            notes: notes.to_string(),
            muscle_group: muscle_group.to_string(),
            kind,
            created_at: now,
        });
        self.persist();
        id
    }

    /// Delete an exercise and cascade to all of its sets.
    pub fn delete_exercise(&mut self, id: u64) {
        let before = self.data.sets.len();
        self.data.exercises.retain(|e| e.id != id);
        self.data.sets.retain(|s| s.exercise_id != Some(id));
        log::info!(
            "Deleted exercise {id} and {} of its sets",
            before - self.data.sets.len()
        );
        self.persist();
    }

    /// Log a set with explicit values. The set number is assigned for the
    /// target day and kind-unused fields are zeroed.
    pub fn log_set(
        &mut self,
        exercise_id: u64,
        performed_at: NaiveDateTime,
        weight: f64,
        reps: u32,
        duration_secs: u32,
        rir: Option<u8>,
        notes: &str,
        now: DateTime<Utc>,
    ) -> Option<u64> {
        let kind = self.exercise(exercise_id)?.kind;
        let own: Vec<WorkoutSet> = self.sets_for_exercise(exercise_id);
        let set_number = defaults::next_set_number(&own, performed_at.date());
        let day_note = own
            .iter()
            .find(|s| s.day() == performed_at.date())
            .and_then(|s| s.day_note.clone());

        self.data.next_set_id += 1;
        let id = self.data.next_set_id;
        let mut set = WorkoutSet {
            id,
            exercise_id: Some(exercise_id),
            performed_at,
            weight,
            reps,
            duration_secs,
            set_number,
            rir,
            notes: notes.to_string(),
            day_note,
            body_weight: None,
            waist: None,
            created_at: now,
        };
        set.normalize(kind);
        self.data.sets.push(set);
        self.persist();
        Some(id)
    }

    /// One-tap quick add: values come from a reference set, else from the
    /// previous training day per the user's preference, else from the
    /// kind's hard defaults.
    pub fn quick_add(
        &mut self,
        exercise_id: u64,
        performed_at: NaiveDateTime,
        reference: Option<u64>,
        choice: DefaultSetChoice,
        now: DateTime<Utc>,
    ) -> Option<u64> {
        let kind = self.exercise(exercise_id)?.kind;
        let own = self.sets_for_exercise(exercise_id);
        let reference_set = reference.and_then(|rid| own.iter().find(|s| s.id == rid));
        let d = defaults::suggest_defaults(
            kind,
            &own,
            performed_at.date(),
            reference_set,
            choice,
        );
        self.log_set(
            exercise_id,
            performed_at,
            d.weight,
            d.reps,
            d.duration_secs,
            d.rir,
            "",
            now,
        )
    }

    /// Replace a set in place, keeping kind-conditioned fields normalized.
    pub fn update_set(&mut self, updated: WorkoutSet) -> bool {
        let kind = updated
            .exercise_id
            .and_then(|id| self.exercise(id))
            .map(|e| e.kind);
        let Some(slot) = self.data.sets.iter_mut().find(|s| s.id == updated.id) else {
            return false;
        };
        *slot = updated;
        if let Some(kind) = kind {
            slot.normalize(kind);
        }
        self.persist();
        true
    }

    pub fn delete_set(&mut self, id: u64) {
        self.data.sets.retain(|s| s.id != id);
        self.persist();
    }

    /// Attach (or clear) the shared day note on every set of the
    /// (exercise, day) group.
    pub fn set_day_note(&mut self, exercise_id: u64, day: NaiveDate, note: Option<&str>) {
        let mut touched = 0;
        for s in &mut self.data.sets {
            if s.exercise_id == Some(exercise_id) && s.day() == day {
                s.day_note = note.map(str::to_string);
                touched += 1;
            }
        }
        if touched > 0 {
            self.persist();
        }
    }

    /// Insert the built-in catalog exercises once, guarded by the settings
    /// `seeded` flag.
    pub fn seed_builtins(&mut self, settings: &mut Settings, now: DateTime<Utc>) {
        if settings.seeded {
            return;
        }
        for name in catalog::BUILTIN_NAMES.iter() {
            if let Some(b) = catalog::builtin(name) {
                self.add_exercise(name, "", b.muscle_group, b.kind, now);
            }
        }
        settings.seeded = true;
        log::info!("Seeded {} built-in exercises", catalog::BUILTINS.len());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use tempfile::tempdir;

    fn at(day: u32, hour: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 6, day)
            .unwrap()
            .and_hms_opt(hour, 0, 0)
            .unwrap()
    }

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap()
    }

    fn init_logs() {
        let _ = env_logger::builder().is_test(true).try_init();
    }

    #[test]
    fn create_log_and_reload() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("store.json");
        let ex;
        {
            let mut store = Store::open(&path);
            ex = store.add_exercise("Squat", "", "legs", ExerciseKind::WeightReps, now());
            store.log_set(ex, at(1, 10), 100.0, 5, 0, Some(2), "", now());
            store.log_set(ex, at(1, 10), 105.0, 5, 0, None, "", now());
        }
        let store = Store::open(&path);
        let sets = store.sets_for_exercise(ex);
        assert_eq!(sets.len(), 2);
        assert_eq!(sets[0].set_number, 1);
        assert_eq!(sets[1].set_number, 2);
    }

    #[test]
    fn delete_exercise_cascades() {
        let dir = tempdir().unwrap();
        let mut store = Store::open(dir.path().join("store.json"));
        let ex = store.add_exercise("Squat", "", "legs", ExerciseKind::WeightReps, now());
        store.log_set(ex, at(1, 10), 100.0, 5, 0, None, "", now());
        store.delete_exercise(ex);
        assert!(store.exercises().is_empty());
        assert!(store.all_sets().is_empty());
        assert!(store.sets_for_exercise(ex).is_empty());
    }

    #[test]
    fn corrupt_store_moves_aside_and_starts_empty() {
        init_logs();
        let dir = tempdir().unwrap();
        let path = dir.path().join("store.json");
        std::fs::write(&path, "{ not json").unwrap();
        let store = Store::open(&path);
        assert!(store.exercises().is_empty());
        assert!(dir.path().join("store.json.corrupt").exists());
    }

    #[test]
    fn corrupt_aside_name_suffixes_any_extension() {
        init_logs();
        let dir = tempdir().unwrap();
        let path = dir.path().join("store.db");
        std::fs::write(&path, "{ not json").unwrap();
        let store = Store::open(&path);
        assert!(store.exercises().is_empty());
        assert!(dir.path().join("store.db.corrupt").exists());
        assert!(!dir.path().join("store.corrupt").exists());
    }

    #[test]
    fn quick_add_inherits_previous_day() {
        let dir = tempdir().unwrap();
        let mut store = Store::open(dir.path().join("store.json"));
        let ex = store.add_exercise("Squat", "", "legs", ExerciseKind::WeightReps, now());
        store.log_set(ex, at(1, 10), 50.0, 10, 0, None, "", now());
        store.log_set(ex, at(1, 10), 55.0, 8, 0, None, "", now());

        let id = store
            .quick_add(ex, at(2, 10), None, DefaultSetChoice::LastSet, now())
            .unwrap();
        let sets = store.sets_for_exercise(ex);
        let added = sets.iter().find(|s| s.id == id).unwrap();
        assert_eq!(added.weight, 55.0);
        assert_eq!(added.reps, 8);
        assert_eq!(added.set_number, 1);
    }

    #[test]
    fn quick_add_clones_reference_set() {
        let dir = tempdir().unwrap();
        let mut store = Store::open(dir.path().join("store.json"));
        let ex = store.add_exercise("Squat", "", "legs", ExerciseKind::WeightReps, now());
        let first = store.log_set(ex, at(1, 10), 80.0, 3, 0, Some(1), "", now()).unwrap();
        store.log_set(ex, at(1, 11), 60.0, 10, 0, None, "", now());

        let id = store
            .quick_add(ex, at(1, 12), Some(first), DefaultSetChoice::LastSet, now())
            .unwrap();
        let sets = store.sets_for_exercise(ex);
        let added = sets.iter().find(|s| s.id == id).unwrap();
        assert_eq!(added.weight, 80.0);
        assert_eq!(added.reps, 3);
        assert_eq!(added.rir, Some(1));
        assert_eq!(added.set_number, 3);
    }

    #[test]
    fn day_note_syncs_across_the_day() {
        let dir = tempdir().unwrap();
        let mut store = Store::open(dir.path().join("store.json"));
        let ex = store.add_exercise("Squat", "", "legs", ExerciseKind::WeightReps, now());
        store.log_set(ex, at(1, 10), 100.0, 5, 0, None, "", now());
        store.log_set(ex, at(1, 11), 100.0, 5, 0, None, "", now());
        store.log_set(ex, at(2, 10), 100.0, 5, 0, None, "", now());

        store.set_day_note(ex, NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(), Some("PR day"));
        let sets = store.sets_for_exercise(ex);
        assert_eq!(sets[0].day_note.as_deref(), Some("PR day"));
        assert_eq!(sets[1].day_note.as_deref(), Some("PR day"));
        assert_eq!(sets[2].day_note, None);

        // A set logged later the same day inherits the note.
        store.log_set(ex, at(1, 12), 100.0, 5, 0, None, "", now());
        let sets = store.sets_for_exercise(ex);
        assert_eq!(sets[3].day_note.as_deref(), Some("PR day"));
    }

    #[test]
    fn seeding_runs_once() {
        let dir = tempdir().unwrap();
        let mut store = Store::open(dir.path().join("store.json"));
        let mut settings = Settings::default();
        store.seed_builtins(&mut settings, now());
        let count = store.exercises().len();
        assert!(count > 0);
        assert!(settings.seeded);
        store.seed_builtins(&mut settings, now());
        assert_eq!(store.exercises().len(), count);
    }

    #[test]
    fn legacy_set_numbers_repair_on_open() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("store.json");
        {
            let mut store = Store::open(&path);
            let ex = store.add_exercise("Squat", "", "legs", ExerciseKind::WeightReps, now());
            store.log_set(ex, at(1, 10), 100.0, 5, 0, None, "", now());
            store.log_set(ex, at(1, 10), 100.0, 5, 0, None, "", now());
        }
        // Corrupt the numbers on disk the way a legacy version might have.
        let mut data: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        data["sets"][0]["set_number"] = 0.into();
        data["sets"][1]["set_number"] = 0.into();
        std::fs::write(&path, serde_json::to_string(&data).unwrap()).unwrap();

        let store = Store::open(&path);
        let mut numbers: Vec<u32> = store.all_sets().iter().map(|s| s.set_number).collect();
        numbers.sort();
        assert_eq!(numbers, vec![1, 2]);
    }

    #[test]
    fn update_set_normalizes_for_kind() {
        let dir = tempdir().unwrap();
        let mut store = Store::open(dir.path().join("store.json"));
        let ex = store.add_exercise("Plank", "", "core", ExerciseKind::TimeOnly, now());
        let id = store.log_set(ex, at(1, 10), 0.0, 0, 60, None, "", now()).unwrap();

        let mut set = store.sets_for_exercise(ex)[0].clone();
        assert_eq!(set.id, id);
        set.duration_secs = 90;
        set.weight = 40.0; // not applicable to TimeOnly
        assert!(store.update_set(set));

        let reloaded = &store.sets_for_exercise(ex)[0];
        assert_eq!(reloaded.duration_secs, 90);
        assert_eq!(reloaded.weight, 0.0);
    }
}
