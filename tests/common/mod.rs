//! Shared helpers for integration tests.
#![allow(dead_code)]

use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
use std::sync::Once;

use secureconf::{setup_logging, LogConfig, LogLevel};

pub const CONTENT: &str = "random text";

static LOGGING: Once = Once::new();

pub fn init_logging() {
    LOGGING.call_once(|| {
        let config = LogConfig {
            level: LogLevel::Debug,
            json_output: false,
        };
        // Another test binary in the same process may have won the race.
        let _ = setup_logging(&config);
    });
}

pub fn chmod(path: &Path, mode: u32) {
    std::fs::set_permissions(path, std::fs::Permissions::from_mode(mode))
        .unwrap_or_else(|e| panic!("chmod {:o} failed for {}: {}", mode, path.display(), e));
}

/// Writes `content` to `dir/name` and applies `mode`.
pub fn write_with_mode(dir: &Path, name: &str, content: &str, mode: u32) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, content)
        .unwrap_or_else(|e| panic!("write failed for {}: {}", path.display(), e));
    chmod(&path, mode);
    path
}
