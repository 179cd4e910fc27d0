//! `secureconf` reads credential-bearing configuration files and refuses the
//! ones whose POSIX permission bits expose them to other users.
//!
//! ```no_run
//! use secureconf::{validate_file_permissions, FileOperations};
//!
//! let text = FileOperations::new()
//!     .read_all_text("/home/alice/.secureconf/connections.toml", &validate_file_permissions)?;
//! # Ok::<(), secureconf::Error>(())
//! ```

pub mod config;
pub mod policy;
pub mod utils;

pub use crate::config::{ConnectionLoader, ConnectionSettings, Connections, LoaderSettings};
pub use policy::{
    permit_any, validate_file_permissions, validate_owner_only, ForbiddenBits, ValidationPolicy,
};
pub use utils::errors::{ConfigError, Error, Result};
pub use utils::filesystem::{CheckedText, FileOperations, PermissionCheck};
pub use utils::logging::{setup_logging, LogConfig, LogLevel};
#[cfg(unix)]
pub use utils::permissions::UnixInspector;
pub use utils::permissions::{
    NativeInspector, NoPermissionModel, PermissionBits, PermissionInspector,
};
