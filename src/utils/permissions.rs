//! POSIX permission bits and the platform-specific inspectors that read them.
//!
//! The inspector is picked at compile time: [`NativeInspector`] is
//! [`UnixInspector`] on unix targets and [`NoPermissionModel`] everywhere else.
//! Callers never branch on the operating system themselves.

use bitflags::bitflags;
use std::path::Path;

bitflags! {
    /// Owner/group/other access bits, valued as in a POSIX `st_mode`.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct PermissionBits: u32 {
        const OWNER_READ    = 0o400;
        const OWNER_WRITE   = 0o200;
        const OWNER_EXECUTE = 0o100;
        const GROUP_READ    = 0o040;
        const GROUP_WRITE   = 0o020;
        const GROUP_EXECUTE = 0o010;
        const OTHER_READ    = 0o004;
        const OTHER_WRITE   = 0o002;
        const OTHER_EXECUTE = 0o001;
    }
}

impl PermissionBits {
    pub const OWNER_ALL: Self = Self::OWNER_READ
        .union(Self::OWNER_WRITE)
        .union(Self::OWNER_EXECUTE);

    pub const GROUP_ALL: Self = Self::GROUP_READ
        .union(Self::GROUP_WRITE)
        .union(Self::GROUP_EXECUTE);

    pub const OTHER_ALL: Self = Self::OTHER_READ
        .union(Self::OTHER_WRITE)
        .union(Self::OTHER_EXECUTE);

    /// Builds the flag set from a raw mode, dropping file-type, setuid,
    /// setgid and sticky bits.
    pub fn from_mode(mode: u32) -> Self {
        Self::from_bits_truncate(mode)
    }

    pub fn mode(self) -> u32 {
        self.bits()
    }
}

/// Reads the permission bits of a path.
pub trait PermissionInspector {
    /// Returns `Ok(None)` when the platform has no POSIX permission model.
    ///
    /// On platforms that do, a path that cannot be stat'd is an I/O error.
    fn permissions(&self, path: &Path) -> std::io::Result<Option<PermissionBits>>;
}

#[cfg(unix)]
#[derive(Debug, Clone, Copy, Default)]
pub struct UnixInspector;

#[cfg(unix)]
impl PermissionInspector for UnixInspector {
    fn permissions(&self, path: &Path) -> std::io::Result<Option<PermissionBits>> {
        use std::os::unix::fs::PermissionsExt;
        let mode = std::fs::metadata(path)?.permissions().mode();
        Ok(Some(PermissionBits::from_mode(mode)))
    }
}

/// Inspector for platforms whose access control is not expressed in POSIX
/// bits. It never touches the filesystem.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoPermissionModel;

impl PermissionInspector for NoPermissionModel {
    fn permissions(&self, _path: &Path) -> std::io::Result<Option<PermissionBits>> {
        Ok(None)
    }
}

#[cfg(unix)]
pub type NativeInspector = UnixInspector;

#[cfg(not(unix))]
pub type NativeInspector = NoPermissionModel;
