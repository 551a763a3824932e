use chrono::{DateTime, Utc};
use whoop::prelude::*;

/// Timestamp format in table cells
const TABLE_DATE_FORMAT: &str = "%Y-%m-%d %H:%M";

pub trait TableRow {
    fn headers() -> &'static [&'static str];
    fn row(&self) -> Vec<String>;
}

pub fn render_table<T: TableRow>(items: &[T]) -> String {
    let headers = T::headers();
    let rows: Vec<Vec<String>> = items.iter().map(TableRow::row).collect();
    let widths = column_widths(headers, &rows);

    let mut out = String::new();
    out.push_str(&format_row(
        &headers.iter().map(ToString::to_string).collect::<Vec<_>>(),
        &widths,
    ));
    out.push('\n');
    out.push_str(&format_separator(&widths));

    for row in rows {
        out.push('\n');
        out.push_str(&format_row(&row, &widths));
    }

    out
}

fn column_widths(headers: &[&str], rows: &[Vec<String>]) -> Vec<usize> {
    let mut widths: Vec<usize> = headers.iter().map(|h| h.len()).collect();
    for row in rows {
        for (idx, cell) in row.iter().enumerate() {
            if idx >= widths.len() {
                widths.push(cell.len());
            } else {
                widths[idx] = widths[idx].max(cell.len());
            }
        }
    }
    widths
}

fn format_row(row: &[String], widths: &[usize]) -> String {
    use std::fmt::Write as _;
    let mut out = String::new();
    for (idx, cell) in row.iter().enumerate() {
        if idx > 0 {
            out.push_str("  ");
        }
        let width = widths.get(idx).copied().unwrap_or(0);
        let _ = write!(out, "{cell:<width$}");
    }
    out.trim_end().to_string()
}

fn format_separator(widths: &[usize]) -> String {
    widths
        .iter()
        .map(|width| "-".repeat(*width))
        .collect::<Vec<_>>()
        .join("  ")
}

fn date(value: Option<DateTime<Utc>>) -> String {
    value.map(|v| v.format(TABLE_DATE_FORMAT).to_string()).unwrap_or_default()
}

fn state(value: Option<ScoreState>) -> String {
    value.map(|s| s.to_string()).unwrap_or_default()
}

fn num(value: Option<f64>) -> String {
    value.map(|v| format!("{v:.1}")).unwrap_or_default()
}

/// milliseconds as h:mm
fn hours(milli: i64) -> String {
    let minutes = milli / 60_000;
    format!("{}:{:02}", minutes / 60, minutes % 60)
}

impl TableRow for Cycle {
    fn headers() -> &'static [&'static str] {
        &["id", "start", "end", "state", "strain", "kJ", "avg hr", "max hr"]
    }

    fn row(&self) -> Vec<String> {
        let score = self.score.as_ref();
        vec![
            self.id.to_string(),
            date(self.start),
            date(self.end),
            state(self.score_state),
            num(score.map(|s| s.strain)),
            num(score.map(|s| s.kilojoule)),
            score.map(|s| s.average_heart_rate.to_string()).unwrap_or_default(),
            score.map(|s| s.max_heart_rate.to_string()).unwrap_or_default(),
        ]
    }
}

impl TableRow for Recovery {
    fn headers() -> &'static [&'static str] {
        &["cycle", "sleep", "state", "recovery", "rhr", "hrv", "spo2", "skin temp"]
    }

    fn row(&self) -> Vec<String> {
        let score = self.score.as_ref();
        vec![
            self.cycle_id.to_string(),
            self.sleep_id.to_string(),
            state(self.score_state),
            num(score.map(|s| s.recovery_score)),
            num(score.map(|s| s.resting_heart_rate)),
            num(score.map(|s| s.hrv_rmssd_milli)),
            num(score.and_then(|s| s.spo2_percentage)),
            num(score.and_then(|s| s.skin_temp_celsius)),
        ]
    }
}

impl TableRow for Sleep {
    fn headers() -> &'static [&'static str] {
        &["id", "start", "end", "nap", "state", "asleep", "performance", "efficiency"]
    }

    fn row(&self) -> Vec<String> {
        let score = self.score.as_ref();
        vec![
            self.id.to_string(),
            date(self.start),
            date(self.end),
            self.nap.to_string(),
            state(self.score_state),
            score
                .map(|s| hours(s.stage_summary.total_sleep_time_milli()))
                .unwrap_or_default(),
            num(score.and_then(|s| s.sleep_performance_percentage)),
            num(score.and_then(|s| s.sleep_efficiency_percentage)),
        ]
    }
}

impl TableRow for Workout {
    fn headers() -> &'static [&'static str] {
        &["id", "start", "sport", "state", "strain", "avg hr", "max hr", "distance m"]
    }

    fn row(&self) -> Vec<String> {
        let score = self.score.as_ref();
        let sport = self
            .sport_name
            .clone()
            .unwrap_or_else(|| self.sport_id.to_string());
        vec![
            self.id.to_string(),
            date(self.start),
            sport,
            state(self.score_state),
            num(score.map(|s| s.strain)),
            score.map(|s| s.average_heart_rate.to_string()).unwrap_or_default(),
            score.map(|s| s.max_heart_rate.to_string()).unwrap_or_default(),
            num(score.and_then(|s| s.distance_meter)),
        ]
    }
}

impl TableRow for UserProfile {
    fn headers() -> &'static [&'static str] {
        &["user id", "email", "first name", "last name"]
    }

    fn row(&self) -> Vec<String> {
        vec![
            self.user_id.to_string(),
            self.email.clone(),
            self.first_name.clone(),
            self.last_name.clone(),
        ]
    }
}

impl TableRow for BodyMeasurement {
    fn headers() -> &'static [&'static str] {
        &["height m", "weight kg", "max hr"]
    }

    fn row(&self) -> Vec<String> {
        vec![
            format!("{:.2}", self.height_meter),
            format!("{:.1}", self.weight_kilogram),
            self.max_heart_rate.to_string(),
        ]
    }
}
