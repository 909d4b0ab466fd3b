//! Centralized game-time and score formatting utilities.
//!
//! Diagnostics, worker logs and summaries all format game clock values
//! through this module so the same timestamp always reads the same way.

/// Format a game clock value (seconds) with five fractional digits.
///
/// - Below one minute: `SS.fffff`
/// - One minute or more: `M:SS.fffff`
/// - Negative values clamp to zero
///
/// # Examples
/// ```
/// use fragstats_types::formatting::format_game_time;
/// assert_eq!(format_game_time(3.25), "03.25000");
/// assert_eq!(format_game_time(75.5), "1:15.50000");
/// assert_eq!(format_game_time(-1.0), "00.00000");
/// ```
pub fn format_game_time(secs: f32) -> String {
    let scaled = (f64::from(secs.max(0.0)) * 100_000.0).round() as u64;
    let whole = scaled / 100_000;
    let frac = scaled % 100_000;
    let mins = whole / 60;
    let secs = whole % 60;
    if mins == 0 {
        format!("{:02}.{:05}", secs, frac)
    } else {
        format!("{}:{:02}.{:05}", mins, secs, frac)
    }
}

/// Format a duration as `M:SS`.
///
/// # Examples
/// ```
/// use fragstats_types::formatting::format_duration;
/// assert_eq!(format_duration(125), "2:05");
/// assert_eq!(format_duration(59), "0:59");
/// assert_eq!(format_duration(0), "0:00");
/// ```
pub fn format_duration(secs: i64) -> String {
    let mins = secs / 60;
    let secs = secs % 60;
    format!("{}:{:02}", mins, secs)
}

/// Format a duration from f32 seconds as `M:SS` (rounded).
///
/// # Examples
/// ```
/// use fragstats_types::formatting::format_duration_f32;
/// assert_eq!(format_duration_f32(1199.7), "20:00");
/// assert_eq!(format_duration_f32(59.4), "0:59");
/// ```
pub fn format_duration_f32(secs: f32) -> String {
    format_duration(secs.round() as i64)
}

/// Format a score difference with an explicit sign.
///
/// Zero renders as `±0` so a reconciled score stands out in logs.
///
/// # Examples
/// ```
/// use fragstats_types::formatting::format_score_delta;
/// assert_eq!(format_score_delta(3), "+3");
/// assert_eq!(format_score_delta(-2), "-2");
/// assert_eq!(format_score_delta(0), "±0");
/// ```
pub fn format_score_delta(delta: i32) -> String {
    match delta {
        0 => "±0".to_string(),
        d if d > 0 => format!("+{}", d),
        d => d.to_string(),
    }
}
