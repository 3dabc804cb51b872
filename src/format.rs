//! Pure formatting and export utilities.

use chrono::{Local, TimeZone};

use crate::Note;

/// Neutralizes the five characters `& < > " '` before user text is
/// interpolated into a rendering surface.
///
/// Empty input maps to the empty string; placeholders are applied at the
/// data layer, not here.
pub fn escape_for_display(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for ch in input.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

/// Renders a millisecond epoch timestamp as `YYYY-MM-DD HH:MM` in
/// zero-padded, 24-hour, local time.
pub fn format_timestamp(ms: i64) -> String {
    match Local.timestamp_millis_opt(ms).earliest() {
        Some(dt) => dt.format("%Y-%m-%d %H:%M").to_string(),
        None => String::new(),
    }
}

/// Serializes a note into its exportable text document: title heading,
/// tags line, formatted update timestamp, blank line, body.
pub fn to_export_document(note: &Note) -> String {
    format!(
        "# {}\nTags: {}\nUpdated: {}\n\n{}",
        note.title,
        note.tags.join(" "),
        format_timestamp(note.updated),
        note.body
    )
}

/// File name for an exported note: the note's title, or a generic
/// fallback when the title is empty.
pub fn export_file_name(note: &Note) -> String {
    let title = note.title.trim();
    if title.is_empty() {
        "note.txt".to_string()
    } else {
        format!("{}.txt", title)
    }
}
