//! Human-readable byte counts
//!
//! Scaling uses whole-number division at every step, so any remainder below
//! the final unit is dropped before rendering (1536 bytes prints as `1.00 KB`).

const UNITS: [&str; 5] = ["B", "KB", "MB", "GB", "TB"];

/// Format a byte count with binary scaling and two decimal places
pub fn format_bytes(bytes: i64) -> String {
    let mut size = bytes;
    let mut unit = 0;
    while size >= 1024 && unit < UNITS.len() - 1 {
        size /= 1024;
        unit += 1;
    }

    format!("{:.2} {}", size as f64, UNITS[unit])
}
