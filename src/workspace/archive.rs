//! Reading named streams out of packed save containers.
//!
//! Packed saves are MPQ archives. The vault never parses archive internals
//! itself; it asks an [`ArchiveReader`] for the raw bytes of one stream.

use std::path::{Path, PathBuf};

#[derive(Debug, thiserror::Error)]
pub enum ArchiveError {
    #[error("packed saves are not supported in this build (enable the `mpq` feature)")]
    Disabled,

    #[error("failed to open archive {}: {reason}", .path.display())]
    Open { path: PathBuf, reason: String },

    #[error("archive {} has no readable entry '{entry}': {reason}", .path.display())]
    Entry {
        path: PathBuf,
        entry: String,
        reason: String,
    },
}

/// "Read named stream from container" service.
pub trait ArchiveReader {
    fn read_entry(&self, archive: &Path, entry: &str) -> Result<Vec<u8>, ArchiveError>;
}

/// Reader for builds without archive support. Every read fails with
/// [`ArchiveError::Disabled`].
#[derive(Debug, Default, Clone, Copy)]
pub struct NoArchiveSupport;

impl ArchiveReader for NoArchiveSupport {
    fn read_entry(&self, _archive: &Path, _entry: &str) -> Result<Vec<u8>, ArchiveError> {
        Err(ArchiveError::Disabled)
    }
}

#[cfg(feature = "mpq")]
pub use mpq::MpqArchiveReader;

#[cfg(feature = "mpq")]
mod mpq {
    use std::path::Path;

    use super::{ArchiveError, ArchiveReader};

    /// Reads entries with the `wow-mpq` crate.
    #[derive(Debug, Default, Clone, Copy)]
    pub struct MpqArchiveReader;

    impl ArchiveReader for MpqArchiveReader {
        fn read_entry(&self, archive: &Path, entry: &str) -> Result<Vec<u8>, ArchiveError> {
            let mut mpq = wow_mpq::Archive::open(archive).map_err(|e| ArchiveError::Open {
                path: archive.to_path_buf(),
                reason: e.to_string(),
            })?;
            mpq.read_file(entry).map_err(|e| ArchiveError::Entry {
                path: archive.to_path_buf(),
                entry: entry.to_string(),
                reason: e.to_string(),
            })
        }
    }
}

/// The best reader this build has.
pub fn default_archive_reader() -> Box<dyn ArchiveReader> {
    #[cfg(feature = "mpq")]
    {
        Box::new(MpqArchiveReader)
    }
    #[cfg(not(feature = "mpq"))]
    {
        Box::new(NoArchiveSupport)
    }
}
