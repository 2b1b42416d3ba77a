// CSV export for workout history and the exercise library.
use std::collections::HashMap;
use std::io::Write;
use std::path::Path;

use csv::{QuoteStyle, Terminator, WriterBuilder};
use serde::Serialize;

use crate::catalog::{self, Locale};
use crate::model::{Exercise, WorkoutSet};
use crate::order::sort_training_order;

/// Failure while writing an export file.
#[derive(Debug)]
pub enum ExportError {
    Io(std::io::Error),
    Csv(csv::Error),
}

impl std::fmt::Display for ExportError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ExportError::Io(e) => write!(f, "export I/O error: {e}"),
            ExportError::Csv(e) => write!(f, "export CSV error: {e}"),
        }
    }
}

impl std::error::Error for ExportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ExportError::Io(e) => Some(e),
            ExportError::Csv(e) => Some(e),
        }
    }
}

impl From<std::io::Error> for ExportError {
    fn from(e: std::io::Error) -> Self {
        ExportError::Io(e)
    }
}

impl From<csv::Error> for ExportError {
    fn from(e: csv::Error) -> Self {
        ExportError::Csv(e)
    }
}

/// Export file name: `<app>_<entity>_<date-range-or-date>.csv`.
pub fn export_filename(entity: &str, from: chrono::NaiveDate, to: chrono::NaiveDate) -> String {
    if from == to {
        format!("repbook_{entity}_{from}.csv")
    } else {
        format!("repbook_{entity}_{from}_{to}.csv")
    }
}

#[derive(Serialize)]
struct HistoryRow {
    date: String,
    time: String,
    exercise: String,
    muscle_group: String,
    exercise_type: String,
    set_number: u32,
    weight: String,
    reps: u32,
    duration_secs: u32,
    rir: String,
    notes: String,
    volume: String,
}

#[derive(Serialize)]
struct LibraryRow {
    id: u64,
    name: String,
    display_name: String,
    muscle_group: String,
    muscle_group_label: String,
    exercise_type: String,
    exercise_type_label: String,
    notes: String,
    display_notes: String,
    created_at: String,
    last_trained: String,
    times_performed: usize,
    total_sets: usize,
}

/// Spreadsheet-friendly CSV writer: UTF-8 BOM, CRLF rows, text fields
/// quoted, numeric fields bare.
fn write_rows<W: Write, T: Serialize>(mut writer: W, rows: &[T]) -> Result<(), ExportError> {
    writer.write_all(b"\xEF\xBB\xBF")?;
    let mut wtr = WriterBuilder::new()
        .terminator(Terminator::CRLF)
        .quote_style(QuoteStyle::NonNumeric)
        .from_writer(writer);
    for row in rows {
        wtr.serialize(row)?;
    }
    wtr.flush()?;
    Ok(())
}

/// Render workout history rows in training order.
pub fn write_history_csv<W: Write>(
    writer: W,
    exercises: &[Exercise],
    sets: &[WorkoutSet],
    locale: Locale,
) -> Result<(), ExportError> {
    let by_id: HashMap<u64, &Exercise> = exercises.iter().map(|e| (e.id, e)).collect();
    let mut ordered: Vec<&WorkoutSet> = sets
        .iter()
        .filter(|s| s.exercise_id.is_some_and(|id| by_id.contains_key(&id)))
        .collect();
    sort_training_order(&mut ordered);

    let rows: Vec<HistoryRow> = ordered
        .iter()
        .map(|s| {
            let ex = by_id[&s.exercise_id.unwrap_or_default()];
            HistoryRow {
                date: s.day().format("%Y-%m-%d").to_string(),
                time: s.performed_at.format("%H:%M").to_string(),
                exercise: catalog::display_name(ex, locale),
                muscle_group: catalog::muscle_group_label(&ex.muscle_group, locale).to_string(),
                exercise_type: ex.kind.as_str().to_string(),
                set_number: s.set_number,
                weight: format!("{:.2}", s.weight),
                reps: s.reps,
                duration_secs: s.duration_secs,
                rir: s.rir.map(|r| r.to_string()).unwrap_or_default(),
                notes: s.notes.clone(),
                volume: format!("{:.2}", s.volume()),
            }
        })
        .collect();
    write_rows(writer, &rows)
}

/// Render exercise library rows ordered by muscle group, display name and
/// creation time.
pub fn write_library_csv<W: Write>(
    writer: W,
    exercises: &[Exercise],
    sets: &[WorkoutSet],
    locale: Locale,
) -> Result<(), ExportError> {
    let mut rows: Vec<LibraryRow> = exercises
        .iter()
        .map(|ex| LibraryRow {
            id: ex.id,
            name: ex.name.clone(),
            display_name: catalog::display_name(ex, locale),
            muscle_group: ex.muscle_group.clone(),
            muscle_group_label: catalog::muscle_group_label(&ex.muscle_group, locale).to_string(),
            exercise_type: ex.kind.as_str().to_string(),
            exercise_type_label: catalog::kind_label(ex.kind, locale).to_string(),
            notes: ex.notes.clone(),
            display_notes: catalog::display_notes(ex, locale),
            created_at: ex.created_at.to_rfc3339(),
            last_trained: ex
                .last_trained(sets)
                .map(|d| d.format("%Y-%m-%d").to_string())
                .unwrap_or_default(),
            times_performed: ex.times_performed(sets),
            total_sets: ex.own_sets(sets).len(),
        })
        .collect();
    rows.sort_by(|a, b| {
        a.muscle_group
            .cmp(&b.muscle_group)
            .then_with(|| a.display_name.cmp(&b.display_name))
            .then_with(|| a.created_at.cmp(&b.created_at))
    });
    write_rows(writer, &rows)
}

fn save_atomically<P: AsRef<Path>>(
    path: P,
    write: impl FnOnce(&mut Vec<u8>) -> Result<(), ExportError>,
) -> Result<(), ExportError> {
    // Buffer the whole file so a failed export never leaves a partial file
    // behind.
    let mut buf = Vec::new();
    write(&mut buf)?;
    std::fs::write(path, buf)?;
    Ok(())
}

/// Write the workout-history export to `path`.
pub fn save_history_csv<P: AsRef<Path>>(
    path: P,
    exercises: &[Exercise],
    sets: &[WorkoutSet],
    locale: Locale,
) -> Result<(), ExportError> {
    save_atomically(path, |buf| write_history_csv(buf, exercises, sets, locale))
}

/// Write the exercise-library export to `path`.
pub fn save_library_csv<P: AsRef<Path>>(
    path: P,
    exercises: &[Exercise],
    sets: &[WorkoutSet],
    locale: Locale,
) -> Result<(), ExportError> {
    save_atomically(path, |buf| write_library_csv(buf, exercises, sets, locale))
}
