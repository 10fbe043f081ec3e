//! Duration parsing and formatting for session timers.

use crate::errors::{AppError, AppResult};

/// Parse a duration expression into whole seconds.
///
/// Accepts plain seconds ("90") or hour/minute/second components in order
/// ("1h", "25m", "1h30m", "1h30m15s", "45s").
pub fn parse_duration(s: &str) -> AppResult<i64> {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        return Err(AppError::InvalidDuration(s.to_string()));
    }

    if let Ok(secs) = trimmed.parse::<i64>() {
        if secs < 0 {
            return Err(AppError::InvalidDuration(s.to_string()));
        }
        return Ok(secs);
    }

    let mut total: i64 = 0;
    let mut digits = String::new();
    let mut seen_unit = false;

    for c in trimmed.chars() {
        if c.is_ascii_digit() {
            digits.push(c);
            continue;
        }
        let value: i64 = digits
            .parse()
            .map_err(|_| AppError::InvalidDuration(s.to_string()))?;
        digits.clear();
        seen_unit = true;
        match c {
            'h' | 'H' => total += value * 3600,
            'm' | 'M' => total += value * 60,
            's' | 'S' => total += value,
            _ => return Err(AppError::InvalidDuration(s.to_string())),
        }
    }

    if !digits.is_empty() || !seen_unit {
        return Err(AppError::InvalidDuration(s.to_string()));
    }

    Ok(total)
}

/// Always `HH:MM:SS`, hours zero-padded.
pub fn fmt_hms(secs: i64) -> String {
    let s = secs.max(0);
    format!("{:02}:{:02}:{:02}", s / 3600, (s % 3600) / 60, s % 60)
}

/// Menu-bar style clock: hours omitted while zero (`MM:SS`, then `HH:MM:SS`).
pub fn fmt_clock(secs: i64) -> String {
    let s = secs.max(0);
    let hours = s / 3600;
    if hours > 0 {
        format!("{:02}:{:02}:{:02}", hours, (s % 3600) / 60, s % 60)
    } else {
        format!("{:02}:{:02}", s / 60, s % 60)
    }
}

/// Human-readable total, e.g. "02h 05m".
pub fn fmt_hours_minutes(secs: i64) -> String {
    let mins = secs.max(0) / 60;
    format!("{:02}h {:02}m", mins / 60, mins % 60)
}
