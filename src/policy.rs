//! Validation policies deciding whether a file's permission bits are narrow
//! enough to trust its contents.
//!
//! Any `Fn(&Path, PermissionBits) -> Result<()>` is a policy, so plain
//! functions such as [`validate_file_permissions`] can be passed directly.

use std::path::Path;

use crate::utils::errors::{Error, Result};
use crate::utils::permissions::PermissionBits;

pub trait ValidationPolicy {
    fn validate(&self, path: &Path, permissions: PermissionBits) -> Result<()>;
}

impl<F> ValidationPolicy for F
where
    F: Fn(&Path, PermissionBits) -> Result<()>,
{
    fn validate(&self, path: &Path, permissions: PermissionBits) -> Result<()> {
        self(path, permissions)
    }
}

/// Bits the connection configuration policy refuses. Group read stays allowed.
pub const CONNECTION_FILE_FORBIDDEN: PermissionBits = PermissionBits::GROUP_WRITE
    .union(PermissionBits::GROUP_EXECUTE)
    .union(PermissionBits::OTHER_ALL);

/// Rejects any permission set containing a bit of the wrapped mask.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ForbiddenBits(pub PermissionBits);

impl ValidationPolicy for ForbiddenBits {
    fn validate(&self, path: &Path, permissions: PermissionBits) -> Result<()> {
        if permissions.intersects(self.0) {
            return Err(Error::PermissionTooBroad {
                path: path.to_path_buf(),
                mode: permissions.mode(),
            });
        }
        Ok(())
    }
}

/// Default policy for credential-bearing connection files: no group write or
/// execute, no access at all for others.
pub fn validate_file_permissions(path: &Path, permissions: PermissionBits) -> Result<()> {
    ForbiddenBits(CONNECTION_FILE_FORBIDDEN).validate(path, permissions)
}

/// Only the owner may hold any access.
pub fn validate_owner_only(path: &Path, permissions: PermissionBits) -> Result<()> {
    ForbiddenBits(PermissionBits::GROUP_ALL | PermissionBits::OTHER_ALL).validate(path, permissions)
}

pub fn permit_any(_path: &Path, _permissions: PermissionBits) -> Result<()> {
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const PATH: &str = "/home/user/.secureconf/connections.toml";

    #[test]
    fn connection_policy_over_every_mode() {
        assert_eq!(CONNECTION_FILE_FORBIDDEN.mode(), 0o037);
        for mode in 0..=0o777u32 {
            let result = validate_file_permissions(Path::new(PATH), PermissionBits::from_mode(mode));
            let forbidden = mode & CONNECTION_FILE_FORBIDDEN.mode() != 0;
            match result {
                Ok(()) => assert!(!forbidden, "mode {mode:03o} should be rejected"),
                Err(Error::PermissionTooBroad { mode: reported, .. }) => {
                    assert!(forbidden, "mode {mode:03o} should be accepted");
                    assert_eq!(reported, mode);
                }
                Err(other) => panic!("unexpected error: {other:?}"),
            }
        }
    }

    #[test]
    fn connection_policy_tolerates_group_read_only() {
        let path = Path::new(PATH);
        assert!(validate_file_permissions(path, PermissionBits::from_mode(0o640)).is_ok());
        assert!(validate_file_permissions(path, PermissionBits::from_mode(0o740)).is_ok());
        assert!(validate_file_permissions(path, PermissionBits::from_mode(0o660)).is_err());
        assert!(validate_file_permissions(path, PermissionBits::from_mode(0o610)).is_err());
        assert!(validate_file_permissions(path, PermissionBits::from_mode(0o604)).is_err());
        assert!(validate_file_permissions(path, PermissionBits::from_mode(0o004)).is_err());
    }

    #[test]
    fn owner_only_rejects_group_read() {
        let path = Path::new(PATH);
        assert!(validate_owner_only(path, PermissionBits::from_mode(0o700)).is_ok());
        let err = validate_owner_only(path, PermissionBits::from_mode(0o640)).unwrap_err();
        assert!(err.is_permission_too_broad());
    }

    #[test]
    fn permit_any_accepts_world_writable() {
        assert!(permit_any(Path::new(PATH), PermissionBits::all()).is_ok());
    }

    #[test]
    fn closures_are_policies() {
        let no_exec = |path: &Path, bits: PermissionBits| -> Result<()> {
            ForbiddenBits(PermissionBits::OWNER_EXECUTE).validate(path, bits)
        };
        let policy: &dyn ValidationPolicy = &no_exec;
        assert!(policy.validate(Path::new(PATH), PermissionBits::OWNER_READ).is_ok());
        assert!(policy
            .validate(Path::new(PATH), PermissionBits::OWNER_ALL)
            .is_err());
    }
}
