//! Safe filename generation utilities

use regex::Regex;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

static INVALID_CHARS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"[<>:"/\\|?*\x00-\x1f]"#).expect("valid regex"));

/// Convert a title to a safe filename by replacing invalid characters
pub fn to_safe_filename(title: &str, extension: &str) -> String {
    let mut safe_title = INVALID_CHARS.replace_all(title, "_").to_string();

    safe_title = safe_title
        .trim_matches(|c: char| c == '.' || c == ' ')
        .to_string();

    // Windows caps names at 255; leave room for the extension
    if safe_title.chars().count() > 200 {
        safe_title = safe_title.chars().take(200).collect::<String>();
        safe_title = safe_title.trim_end().to_string();
    }

    if safe_title.is_empty() {
        safe_title = "video".to_string();
    }

    if extension.is_empty() {
        return safe_title;
    }

    let ext = extension.trim_start_matches('.');
    format!("{}.{}", safe_title, ext)
}

/// First path of the form `name.ext`, `name (1).ext`, `name (2).ext` ...
/// that does not exist yet
pub fn next_free_path(path: &Path) -> PathBuf {
    if !path.exists() {
        return path.to_path_buf();
    }

    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let extension = path.extension().map(|e| e.to_string_lossy().into_owned());

    (1u32..)
        .map(|n| {
            let name = match &extension {
                Some(ext) => format!("{} ({}).{}", stem, n, ext),
                None => format!("{} ({})", stem, n),
            };
            path.with_file_name(name)
        })
        .find(|candidate| !candidate.exists())
        .unwrap_or_else(|| path.to_path_buf())
}
