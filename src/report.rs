// HTML progress report with an embedded volume chart.
use std::path::Path;

use chrono::NaiveDate;
use maud::{Markup, html};
use plotters::prelude::*;

use crate::analysis::{DaySummary, ProgressStats, StatsWindow, aggregate_daily,
    compute_progress_stats};
use crate::export::ExportError;
use crate::model::WorkoutSet;

trait FormatOption {
    fn fmt_opt(self) -> String;
}

impl FormatOption for Option<f64> {
    fn fmt_opt(self) -> String {
        self.map(|v| format!("{v:.1}")).unwrap_or_else(|| "-".into())
    }
}

impl FormatOption for f64 {
    fn fmt_opt(self) -> String {
        format!("{self:.1}")
    }
}

/// Write an HTML progress report for one exercise next to a PNG volume
/// chart. A chart failure degrades to a placeholder instead of failing the
/// whole report.
pub fn export_html_report<P: AsRef<Path>>(
    path: P,
    exercise_name: &str,
    sets: &[WorkoutSet],
    window: StatsWindow,
    today: NaiveDate,
) -> Result<(), ExportError> {
    let path = path.as_ref();
    let days = aggregate_daily(sets, window, today);
    let stats = compute_progress_stats(sets, window, today);

    let chart_path = path.with_extension("png");
    let chart_file = match generate_volume_chart(&days, &chart_path) {
        Ok(()) => chart_path
            .file_name()
            .unwrap_or_else(|| std::ffi::OsStr::new("")),
        Err(e) => {
            log::warn!("Failed to generate chart: {e}");
            std::ffi::OsStr::new("")
        }
    };
    let markup = build_html(exercise_name, &stats, &days, chart_file);
    std::fs::write(path, markup.into_string())?;
    Ok(())
}

fn generate_volume_chart(
    days: &[DaySummary],
    path: &Path,
) -> Result<(), Box<dyn std::error::Error>> {
    let root = BitMapBackend::new(path, (800, 400)).into_drawing_area();
    root.fill(&WHITE)?;
    if days.is_empty() {
        root.present()?;
        return Ok(());
    }
    let max = days.iter().map(|d| d.total_volume).fold(0.0_f64, f64::max);
    let mut chart = ChartBuilder::on(&root)
        .caption("Daily Volume", ("sans-serif", 25))
        .margin(5)
        .x_label_area_size(30)
        .y_label_area_size(40)
        .build_cartesian_2d(0..days.len(), 0f64..max)?;
    chart
        .configure_mesh()
        .disable_mesh()
        .x_desc("Session")
        .y_desc("Volume (kg)")
        .draw()?;
    chart.draw_series(LineSeries::new(
        days.iter().enumerate().map(|(i, d)| (i, d.total_volume)),
        &BLUE,
    ))?;
    root.present()?;
    Ok(())
}

fn build_html(
    exercise_name: &str,
    stats: &ProgressStats,
    days: &[DaySummary],
    chart_file: &std::ffi::OsStr,
) -> Markup {
    html! {
        html {
            head { meta charset="utf-8"; title { (exercise_name) " Progress" } }
            body {
                h1 { (exercise_name) }
                table border="1" {
                    tr { th { "Personal Record (kg)" } td { (stats.personal_record.fmt_opt()) } }
                    tr { th { "Best Day Volume" } td { (stats.best_day_volume.fmt_opt()) } }
                    tr { th { "Lifetime Volume" } td { (stats.lifetime_volume.fmt_opt()) } }
                    tr { th { "Avg Reps/Set" } td { (stats.avg_reps_per_set.fmt_opt()) } }
                    tr { th { "Sessions/Week" } td { (stats.sessions_per_week.fmt_opt()) } }
                    tr { th { "Total Sets" } td { (stats.total_sets) } }
                }
                h1 { "Training Days" }
                table border="1" {
                    tr {
                        th { "Date" } th { "Sets" } th { "Volume" }
                        th { "Max Weight" } th { "Best Est 1RM" }
                    }
                    @for d in days {
                        tr {
                            td { (d.day) }
                            td { (d.set_count) }
                            td { (d.total_volume.fmt_opt()) }
                            td { (d.max_weight.fmt_opt()) }
                            td { (d.best_est_1rm.fmt_opt()) }
                        }
                    }
                }
                h1 { "Daily Volume" }
                @if chart_file.is_empty() {
                    p { "Chart unavailable" }
                } @else {
                    img src=(chart_file.to_string_lossy());
                }
            }
        }
    }
}
