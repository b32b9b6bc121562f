//! Reads an index archive fully into memory.
//!
//! Index archives are small metadata bundles, so members are materialized
//! eagerly. A leading zstd frame is decompressed; anything else is read as a
//! plain tar stream.

use std::borrow::Cow;
use std::io::Read;
use std::path::{Path, PathBuf};

use pacprune_core::constants::ZSTD_MAGIC;
use pacprune_core::errors::ArchiveError;

use crate::fs::FsProvider;

/// One regular-file member of an index archive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchiveMember {
    /// Path of the member inside the archive (e.g. `foo-1.0-1/desc`).
    pub name: String,
    pub content: Vec<u8>,
}

impl ArchiveMember {
    /// Last path component of the member name.
    pub fn base_name(&self) -> &str {
        self.name
            .trim_end_matches('/')
            .rsplit('/')
            .next()
            .unwrap_or(&self.name)
    }
}

/// An opened index archive.
#[derive(Debug, Clone)]
pub struct IndexArchive {
    path: PathBuf,
    compressed: bool,
    members: Vec<ArchiveMember>,
}

impl IndexArchive {
    /// Open and read the archive at `path`.
    pub fn open(fs: &dyn FsProvider, path: &Path) -> Result<Self, ArchiveError> {
        let bytes = fs.read(path).map_err(|source| ArchiveError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_bytes(path, &bytes)
    }

    /// Read an archive from memory. `path` is only used for error messages.
    pub fn from_bytes(path: &Path, bytes: &[u8]) -> Result<Self, ArchiveError> {
        let compressed = is_zstd(bytes);
        let payload: Cow<'_, [u8]> = if compressed {
            Cow::Owned(decompress(path, bytes)?)
        } else {
            Cow::Borrowed(bytes)
        };
        let members = read_tar(path, &payload)?;
        tracing::debug!(
            path = %path.display(),
            compressed,
            members = members.len(),
            "opened index archive"
        );
        Ok(Self {
            path: path.to_path_buf(),
            compressed,
            members,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Whether the archive was wrapped in a zstd frame.
    pub fn is_compressed(&self) -> bool {
        self.compressed
    }

    /// Iterate over members in archive order.
    pub fn members(&self) -> impl Iterator<Item = &ArchiveMember> {
        self.members.iter()
    }
}

fn is_zstd(bytes: &[u8]) -> bool {
    bytes.starts_with(&ZSTD_MAGIC)
}

fn decompress(path: &Path, bytes: &[u8]) -> Result<Vec<u8>, ArchiveError> {
    zstd::stream::decode_all(bytes).map_err(|e| ArchiveError::Corrupt {
        path: path.to_path_buf(),
        message: format!("invalid zstd frame: {e}"),
    })
}

fn read_tar(path: &Path, payload: &[u8]) -> Result<Vec<ArchiveMember>, ArchiveError> {
    let corrupt = |e: std::io::Error| ArchiveError::Corrupt {
        path: path.to_path_buf(),
        message: format!("malformed tar stream: {e}"),
    };

    let mut archive = tar::Archive::new(payload);
    let mut members = Vec::new();
    for entry in archive.entries().map_err(corrupt)? {
        let mut entry = entry.map_err(corrupt)?;
        if !entry.header().entry_type().is_file() {
            continue;
        }
        let name = entry.path().map_err(corrupt)?.to_string_lossy().into_owned();
        let mut content = Vec::new();
        entry.read_to_end(&mut content).map_err(corrupt)?;
        members.push(ArchiveMember { name, content });
    }
    Ok(members)
}
