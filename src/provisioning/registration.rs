use serde::Serialize;
use std::path::{Path, PathBuf};

/// An artifact copied into distributed storage and qualified.
///
/// Only [`super::Provisioner`] creates these, and only after qualification
/// succeeded, so holding one means the URI is usable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResourceRegistration {
    local_path: PathBuf,
    remote_path: String,
    uri: String,
}

impl ResourceRegistration {
    pub(super) fn qualified(local_path: &Path, remote_path: &str, uri: String) -> Self {
        Self {
            local_path: local_path.to_path_buf(),
            remote_path: remote_path.to_string(),
            uri,
        }
    }

    pub fn local_path(&self) -> &Path {
        &self.local_path
    }

    pub fn remote_path(&self) -> &str {
        &self.remote_path
    }

    /// Cluster-addressable URI
    pub fn uri(&self) -> &str {
        &self.uri
    }
}
