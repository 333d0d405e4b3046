pub mod csv;
pub mod json;
pub mod table;

/// Format a fractional hour as a wall-clock label, e.g. `06:30`.
pub fn format_hour(hour: f64) -> String {
    let total_minutes = (hour * 60.0).round() as i64;
    let hours = (total_minutes / 60).clamp(0, 24);
    let minutes = total_minutes % 60;
    format!("{hours:02}:{minutes:02}")
}
