use chrono::{DateTime, NaiveDateTime};

/// Characters of summary text shown on a user's history card.
pub const HISTORY_PREVIEW_CHARS: usize = 200;

/// Characters of summary text shown on an admin card.
pub const ADMIN_PREVIEW_CHARS: usize = 180;

const DISPLAY_FORMAT: &str = "%b %-d, %Y, %I:%M %p";

const NAIVE_FORMATS: [&str; 3] = ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];

/// Render a backend timestamp as `Jan 5, 2026, 02:30 PM`.
///
/// SQLite `CURRENT_TIMESTAMP` values and RFC 3339 strings are understood.
/// Anything else is returned untouched rather than hidden.
pub fn format_timestamp(raw: &str) -> String {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return dt.naive_local().format(DISPLAY_FORMAT).to_string();
    }
    NAIVE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
        .map(|dt| dt.format(DISPLAY_FORMAT).to_string())
        .unwrap_or_else(|| raw.to_string())
}

/// First `max_chars` characters of `text`, with `...` appended when cut.
pub fn preview(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => format!("{}...", &text[..idx]),
        None => text.to_string(),
    }
}

/// `1 word` / `75 words`.
pub fn word_count_label(count: u32) -> String {
    if count == 1 {
        "1 word".to_string()
    } else {
        format!("{count} words")
    }
}
