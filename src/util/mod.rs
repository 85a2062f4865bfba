//! CLI plumbing: stderr logging, weapon name keys and input file bounds.

use std::path::Path;
use tracing::Level;

/// Log to stderr; stdout carries the table or JSON output. `RUST_LOG` wins over `--verbose`.
pub fn init_logging(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::INFO };
    let filter = std::env::var("RUST_LOG").unwrap_or_else(|_| level.to_string());
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

/// Key for `calc <NAME>` lookups: "  moonveil" finds "Moonveil".
pub fn normalize_id(s: &str) -> String {
    s.trim().to_lowercase()
}

/// Reject missing paths, directories and oversized weapon or config files before reading.
pub fn check_file_size(path: &Path, max_bytes: u64) -> Result<u64, String> {
    let meta = std::fs::metadata(path).map_err(|e| format!("{}: {}", path.display(), e))?;
    if !meta.is_file() {
        return Err(format!("not a file: {}", path.display()));
    }
    let size = meta.len();
    if size > max_bytes {
        return Err(format!("file too large: {} bytes (max {})", size, max_bytes));
    }
    Ok(size)
}
