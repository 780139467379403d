//! Transfer progress tracking

use std::time::{Duration, Instant};

/// Progress of one transfer
#[derive(Debug, Clone)]
pub struct Progress {
    /// Total size in bytes, 0 when the server did not say
    pub total_size: u64,
    /// Bytes written so far
    pub downloaded_size: u64,
    /// Current speed in bytes per second
    pub speed: Option<f64>,
    /// Estimated time remaining
    pub eta: Option<Duration>,
    /// Time when the transfer started
    pub start_time: Instant,
}

impl Progress {
    pub fn new(total_size: u64) -> Self {
        Self {
            total_size,
            downloaded_size: 0,
            speed: None,
            eta: None,
            start_time: Instant::now(),
        }
    }

    /// Record the new byte count and refresh speed and ETA
    pub fn update(&mut self, downloaded_size: u64) {
        self.downloaded_size = downloaded_size;

        let elapsed = self.start_time.elapsed();
        if elapsed.as_millis() > 0 {
            let speed = downloaded_size as f64 / elapsed.as_secs_f64();
            self.speed = Some(speed);

            if speed > 0.0 && self.total_size > downloaded_size {
                let remaining = self.total_size - downloaded_size;
                self.eta = Some(Duration::from_secs((remaining as f64 / speed) as u64));
            }
        }
    }

    /// Percentage done, 0.0 while the total is unknown
    pub fn percent(&self) -> f64 {
        if self.total_size > 0 {
            (self.downloaded_size as f64 / self.total_size as f64) * 100.0
        } else {
            0.0
        }
    }

    pub fn is_complete(&self) -> bool {
        self.total_size > 0 && self.downloaded_size >= self.total_size
    }
}

/// Format bytes as human-readable string
pub fn format_bytes(bytes: u64) -> String {
    const UNITS: &[&str] = &["B", "KB", "MB", "GB", "TB"];
    const THRESHOLD: f64 = 1024.0;

    if bytes == 0 {
        return "0 B".to_string();
    }

    let bytes_f64 = bytes as f64;
    let exp = (bytes_f64.ln() / THRESHOLD.ln()).floor() as usize;
    let exp = exp.min(UNITS.len() - 1);

    let value = bytes_f64 / THRESHOLD.powi(exp as i32);

    if exp == 0 {
        format!("{} {}", bytes, UNITS[exp])
    } else {
        format!("{:.1} {}", value, UNITS[exp])
    }
}
