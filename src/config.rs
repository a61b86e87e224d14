//! Global configuration for snpbed runtime behavior.
//!
//! Process-wide switches that affect how input lines are read. They are set
//! once at startup, before any file is loaded.

use std::sync::atomic::{AtomicBool, Ordering};

/// Global flag for skipping BED header lines.
///
/// When enabled, lines starting with `#`, `track` or `browser` are ignored
/// by [`crate::bed::BedReader`]. When disabled they are parsed like records,
/// which normally fails with a format error.
static SKIP_HEADERS: AtomicBool = AtomicBool::new(false);

/// Enable or disable header skipping.
///
/// # Example
///
/// ```
/// use snpbed::config;
///
/// config::set_skip_headers(true);
/// assert!(config::skip_headers());
/// config::set_skip_headers(false);
/// ```
#[inline]
pub fn set_skip_headers(enabled: bool) {
    SKIP_HEADERS.store(enabled, Ordering::Release);
}

/// Check if header skipping is enabled.
#[inline]
pub fn skip_headers() -> bool {
    SKIP_HEADERS.load(Ordering::Acquire)
}

/// Returns true if `line` is a header line that should be skipped under the
/// current configuration.
#[inline]
pub fn is_skipped_header(line: &str) -> bool {
    skip_headers()
        && (line.starts_with('#') || line.starts_with("track") || line.starts_with("browser"))
}
