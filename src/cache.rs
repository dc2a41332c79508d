use crate::snapshot::Snapshot;
use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use std::{
    io::ErrorKind,
    path::{Path, PathBuf},
};
use thiserror::Error;

const INDENT: &[u8] = b"    ";

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Failed to read cache file {}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        cause: std::io::Error,
    },
    #[error("Failed to write cache file {}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        cause: std::io::Error,
    },
    #[error("Failed to serialize snapshot")]
    Serialize {
        #[source]
        cause: serde_json::Error,
    },
}

/// Last-seen snapshot, persisted as a pretty-printed JSON object.
pub struct SnapshotStore {
    path: PathBuf,
}

impl SnapshotStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        SnapshotStore { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// `None` means there is no usable prior state, either because the file
    /// does not exist yet or because it cannot be parsed.
    pub async fn load(&self) -> Result<Option<Snapshot>, StoreError> {
        let content = match tokio::fs::read_to_string(&self.path).await {
            Ok(content) => content,
            Err(err) if err.kind() == ErrorKind::NotFound => {
                log::debug!("no cache file at {}", self.path.display());
                return Ok(None);
            }
            Err(cause) => {
                return Err(StoreError::Read {
                    path: self.path.to_owned(),
                    cause,
                })
            }
        };

        match serde_json::from_str::<Snapshot>(&content) {
            Ok(snapshot) => Ok(Some(snapshot)),
            Err(err) => {
                log::warn!(
                    "cache file {} is corrupt, reseeding: {}",
                    self.path.display(),
                    err
                );
                Ok(None)
            }
        }
    }

    pub async fn save(&self, snapshot: &Snapshot) -> Result<(), StoreError> {
        let body = to_pretty_json(snapshot)?;

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|cause| self.write_error(cause))?;
        }

        let tmp = self.tmp_path();
        log::debug!("writing {} entries to {}", snapshot.len(), tmp.display());
        tokio::fs::write(&tmp, body)
            .await
            .map_err(|cause| self.write_error(cause))?;
        tokio::fs::rename(&tmp, &self.path)
            .await
            .map_err(|cause| self.write_error(cause))?;

        Ok(())
    }

    fn tmp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }

    fn write_error(&self, cause: std::io::Error) -> StoreError {
        StoreError::Write {
            path: self.path.to_owned(),
            cause,
        }
    }
}

fn to_pretty_json(snapshot: &Snapshot) -> Result<Vec<u8>, StoreError> {
    let mut buf = Vec::new();
    let mut serializer =
        serde_json::Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(INDENT));
    snapshot
        .serialize(&mut serializer)
        .map_err(|cause| StoreError::Serialize { cause })?;
    Ok(buf)
}
