use std::path::Path;

use crate::policy::ValidationPolicy;
use crate::utils::errors::{Error, Result};
use crate::utils::permissions::{NativeInspector, PermissionInspector};

/// How the permission gate was handled for a read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PermissionCheck {
    /// The policy ran against the file's bits and accepted them.
    Passed,
    /// The platform has no POSIX permission model; the policy was not invoked.
    Skipped,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckedText {
    pub content: String,
    pub check: PermissionCheck,
}

/// Reads configuration text only after its permission bits pass a policy.
///
/// Holds no state besides the inspector, so one value can be shared across
/// threads or rebuilt per call. Permissions are read fresh on every call and
/// the file is read right after; a permission change landing between the two
/// is not guarded against.
#[derive(Debug, Clone, Copy, Default)]
pub struct FileOperations<I = NativeInspector> {
    inspector: I,
}

impl FileOperations {
    pub fn new() -> Self {
        Self::default()
    }
}

impl<I: PermissionInspector> FileOperations<I> {
    pub fn with_inspector(inspector: I) -> Self {
        Self { inspector }
    }

    /// Returns the whole file as text, verbatim.
    ///
    /// Fails with [`Error::PermissionTooBroad`] (or whatever the policy
    /// returns) before the file is opened, and with [`Error::Io`] when the
    /// path cannot be stat'd or read.
    pub fn read_all_text<P>(&self, path: impl AsRef<Path>, policy: &P) -> Result<String>
    where
        P: ValidationPolicy + ?Sized,
    {
        self.read_checked(path, policy).map(|text| text.content)
    }

    /// Same as [`read_all_text`](Self::read_all_text), also reporting whether
    /// the permission check ran.
    pub fn read_checked<P>(&self, path: impl AsRef<Path>, policy: &P) -> Result<CheckedText>
    where
        P: ValidationPolicy + ?Sized,
    {
        let path = path.as_ref();
        let check = self.check_permissions(path, policy)?;

        let content = std::fs::read_to_string(path).map_err(|source| Error::io(path, source))?;

        Ok(CheckedText { content, check })
    }

    fn check_permissions<P>(&self, path: &Path, policy: &P) -> Result<PermissionCheck>
    where
        P: ValidationPolicy + ?Sized,
    {
        let bits = self
            .inspector
            .permissions(path)
            .map_err(|source| Error::io(path, source))?;

        let Some(bits) = bits else {
            tracing::debug!(
                path = %path.display(),
                "No POSIX permission model on this platform; skipping permission check"
            );
            return Ok(PermissionCheck::Skipped);
        };

        let mode = format!("{:03o}", bits.mode());
        policy.validate(path, bits).map_err(|e| {
            tracing::warn!(path = %path.display(), mode = %mode, error = %e, "File permissions rejected");
            e
        })?;

        tracing::debug!(path = %path.display(), mode = %mode, "File permissions validated");
        Ok(PermissionCheck::Passed)
    }
}
