//! Utility functions for text formatting and file system checks.
//!
//! - String truncation for logging and summary previews
//! - Label display casing and topic slugification
//! - File system validation for export directories

use std::error::Error;
use std::fs as stdfs;
use tokio::fs;
use tracing::{info, instrument};

/// Truncate a string for logging purposes.
///
/// Long strings are cut to `max` bytes (backed off to a char boundary) with an
/// ellipsis and byte count indicator appended.
///
/// # Examples
///
/// ```ignore
/// assert_eq!(truncate_for_log("short", 100), "short");
/// assert_eq!(truncate_for_log(&"a".repeat(500), 10), "aaaaaaaaaa…(+490 bytes)");
/// ```
pub fn truncate_for_log(s: &str, max: usize) -> String {
    if s.len() <= max {
        return s.to_string();
    }
    let mut cut = max;
    while !s.is_char_boundary(cut) {
        cut -= 1;
    }
    format!("{}…(+{} bytes)", &s[..cut], s.len() - cut)
}

/// First `max_chars` characters of a summary followed by `...`.
///
/// The ellipsis is always appended, even to short summaries, so every row of
/// the breakdown table reads the same way.
pub fn summary_preview(summary: Option<&str>, max_chars: usize) -> String {
    let summary = summary.unwrap_or("N/A");
    let head: String = summary.chars().take(max_chars).collect();
    format!("{head}...")
}

/// Title-case a label for display.
///
/// Every run of alphabetic characters starts upper-case and continues
/// lower-case, so `"positive"` becomes `"Positive"` and `"label_2"` becomes
/// `"Label_2"`.
///
/// # Examples
///
/// ```ignore
/// assert_eq!(title_case("very negative"), "Very Negative");
/// assert_eq!(title_case(""), "");
/// ```
pub fn title_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut in_word = false;
    for c in s.chars() {
        if c.is_alphabetic() {
            if in_word {
                out.extend(c.to_lowercase());
            } else {
                out.extend(c.to_uppercase());
            }
            in_word = true;
        } else {
            out.push(c);
            in_word = false;
        }
    }
    out
}

/// Convert a topic to a file-name friendly slug.
///
/// Lowercases the text, removes special characters and replaces spaces with
/// hyphens. Falls back to `"topic"` when nothing usable remains.
///
/// # Examples
///
/// ```ignore
/// assert_eq!(slugify_title("Climate Change"), "climate-change");
/// assert_eq!(slugify_title("AI!"), "ai");
/// ```
pub fn slugify_title(title: &str) -> String {
    let slug = title
        .trim()
        .to_lowercase()
        .replace(|c: char| !c.is_alphanumeric() && c != ' ' && c != '-', "")
        .replace(' ', "-");
    if slug.is_empty() {
        "topic".to_string()
    } else {
        slug
    }
}

/// Ensure a directory exists and is writable.
///
/// Creates the directory if it doesn't exist, then performs a write test by
/// creating and immediately deleting a scratch file.
///
/// # Errors
///
/// Returns an error if:
/// - The directory cannot be created
/// - The directory is not writable (permission denied, read-only filesystem, etc.)
#[instrument(level = "info", skip_all, fields(path = %path))]
pub async fn ensure_writable_dir(path: &str) -> Result<(), Box<dyn Error>> {
    fs::create_dir_all(path).await?;
    // Try a small sync write using std fs (simpler error surface)
    let scratch_path = format!("{}/..__write_check__", path.trim_end_matches('/'));
    match stdfs::File::create(&scratch_path) {
        Ok(_) => {
            let _ = stdfs::remove_file(&scratch_path);
            info!("Output directory is writable");
            Ok(())
        }
        Err(e) => Err(Box::new(e)),
    }
}
