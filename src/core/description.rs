//! Human-readable metadata blocks and description records

use crate::core::video_info::{StreamDescriptor, VideoMetadata};
use crate::error::TubeError;
use std::path::{Path, PathBuf};
use tokio::io::AsyncWriteExt;
use tracing::debug;

/// File that description mode appends to
pub const DESCRIPTION_FILE: &str = "description.txt";

/// Abbreviate a view count.
///
/// Below 1000 the count is printed as is. From 1000 it is shown in
/// thousands with a `k` suffix, and once that would reach `1000.0k` it
/// switches to millions with an `m` suffix. Values keep at most two
/// decimals and at least one.
pub fn format_views(views: u64) -> String {
    if views < 1_000 {
        return views.to_string();
    }

    let thousands = round2(views as f64 / 1_000.0);
    if thousands < 1_000.0 {
        return format!("{}k", trim_decimals(thousands));
    }

    format!("{}m", trim_decimals(round2(views as f64 / 1_000_000.0)))
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

fn trim_decimals(value: f64) -> String {
    let fixed = format!("{:.2}", value);
    let trimmed = fixed.trim_end_matches('0');
    if trimmed.ends_with('.') {
        format!("{}0", trimmed)
    } else {
        trimmed.to_string()
    }
}

/// Render the metadata block printed before a download
pub fn render_metadata(metadata: &VideoMetadata) -> String {
    format!(
        "\n\tVideo Description:\n\
         \t------------------\n\
         \tTitle        : {}\n\
         \tAuthor       : {}\n\
         \tDuration     : {}\n\
         \tRating       : {}\n\
         \tViews        : {}\n",
        metadata.title,
        metadata.author,
        metadata.duration,
        trim_decimals(round2(metadata.rating)),
        format_views(metadata.view_count),
    )
}

/// Render the addressable stream table shown by the interactive prompt
pub fn render_stream_table(streams: &[&StreamDescriptor]) -> String {
    let mut table = String::from("\n\tAvailable Streams:\n\n");
    table.push_str(&format!("\t    {:>5} | {:>10}\n", "stream", "resolution"));
    table.push_str("\t-- + ----- + ----------\n");

    for (index, stream) in streams.iter().enumerate() {
        table.push_str(&format!(
            "\t{:>2}    {:>5}  {:>10}\n",
            index, stream.container, stream.quality
        ));
    }

    table
}

/// Format one record of `description.txt`
pub fn format_description_record(date: &str, description: &str) -> String {
    format!("{}\n\n{}\n\n\n", date, description)
}

/// Append a description record to `<directory>/description.txt`.
///
/// The file is created if missing and never truncated.
pub async fn append_description(
    directory: &Path,
    date: &str,
    description: &str,
) -> Result<PathBuf, TubeError> {
    let path = directory.join(DESCRIPTION_FILE);
    let record = format_description_record(date, description);

    let mut file = tokio::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .await?;
    file.write_all(record.as_bytes()).await?;
    file.flush().await?;

    debug!("Appended {} bytes to {}", record.len(), path.display());
    Ok(path)
}
