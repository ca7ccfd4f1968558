//! Human-readable renderings of manifest fields

use chrono::NaiveDate;

/// Longest description excerpt returned to clients
pub const DESCRIPTION_LIMIT: usize = 200;

/// Longest sanitized title used in attachment filenames
pub const TITLE_LIMIT: usize = 50;

pub const NO_DESCRIPTION: &str = "No description";

/// Format elapsed seconds as `H:MM:SS`, or `M:SS` when under an hour.
pub fn format_duration(total_seconds: u64) -> String {
    let hours = total_seconds / 3600;
    let minutes = (total_seconds % 3600) / 60;
    let seconds = total_seconds % 60;

    if hours > 0 {
        format!("{}:{:02}:{:02}", hours, minutes, seconds)
    } else {
        format!("{}:{:02}", minutes, seconds)
    }
}

/// Group digits in threes with commas: 1234567 -> "1,234,567"
pub fn format_views(count: u64) -> String {
    let digits = count.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);

    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    grouped
}

/// Cut a description to its first 200 characters and mark it as an excerpt.
pub fn truncate_description(description: Option<&str>) -> String {
    match description {
        Some(text) if !text.is_empty() => {
            let excerpt: String = text.chars().take(DESCRIPTION_LIMIT).collect();
            format!("{}...", excerpt)
        }
        _ => NO_DESCRIPTION.to_string(),
    }
}

/// yt-dlp reports upload dates as `YYYYMMDD`; render them as `YYYY-MM-DD`.
pub fn format_upload_date(raw: Option<&str>) -> String {
    match raw {
        Some(raw) => NaiveDate::parse_from_str(raw, "%Y%m%d")
            .map(|date| date.format("%Y-%m-%d").to_string())
            .unwrap_or_else(|_| raw.to_string()),
        None => String::new(),
    }
}

/// Strip everything but word characters, whitespace and hyphens, trim, and cap the length.
///
/// Word characters are ASCII letters, digits and underscore. The cap is applied after
/// trimming, so a title cut mid-phrase may keep a trailing space.
pub fn sanitize_title(title: &str) -> String {
    let kept: String = title
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == '_' || *c == '-' || c.is_whitespace())
        .collect();

    kept.trim().chars().take(TITLE_LIMIT).collect()
}
