/// Render a second counter as `HH:MM:SS`. Hours are not wrapped.
pub fn format_hms(total_secs: u64) -> String {
    let hours = total_secs / 3600;
    let minutes = (total_secs % 3600) / 60;
    let seconds = total_secs % 60;

    format!("{hours:02}:{minutes:02}:{seconds:02}")
}

/// Render a (minutes, seconds) pair as `MM:SS`.
pub fn format_mm_ss(minutes: u64, seconds: u64) -> String {
    format!("{minutes:02}:{seconds:02}")
}

/// Group the digits of an integer with commas, e.g. `12353546` -> `12,353,546`.
pub fn group_thousands(value: i64) -> String {
    let digits = value.unsigned_abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 + 1);

    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }

    if value < 0 {
        format!("-{grouped}")
    } else {
        grouped
    }
}

/// Parse user-typed XP text the way the input boxes expect: surrounding
/// whitespace is ignored, everything else must be a plain integer.
pub fn parse_xp(raw: &str) -> Option<i64> {
    raw.trim().parse::<i64>().ok()
}
