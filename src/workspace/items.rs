//! Item listing for one container.

use std::fs;
use std::path::{Path, PathBuf};

use super::{ArchiveError, Container, ContainerKind, Workspace};
use crate::crypt::{self, CodecError};
use crate::database::ItemDb;
use crate::regen::{self, VariantPolicy};
use crate::save::{PlayerPack, PlayerRecord, StashSummary, HERO_ENTRY, STASH_FILES};

/// One row of a container listing: a character header, an item, or a
/// stash summary.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ItemRecord {
    pub name: String,
    pub base_type: String,
    pub quality: String,
    pub affixes: String,
    pub ilvl: i32,
    pub req_str: i32,
    pub req_mag: i32,
    pub req_dex: i32,
    pub location: String,
    /// Where the row came from, e.g. `<dir>/hero` or `<archive>::hero`.
    pub source_path: String,
}

#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("no container with id '{0}'")]
    UnknownContainer(String),

    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{source_path}: record is {len} bytes, need {need}")]
    ShortRecord {
        source_path: String,
        len: usize,
        need: usize,
    },

    #[error(transparent)]
    Archive(#[from] ArchiveError),

    #[error("failed to decode {source_path}: {source}")]
    Decode {
        source_path: String,
        #[source]
        source: CodecError,
    },

    #[error("packed shared stash {} is not supported", .0.display())]
    PackedStashUnsupported(PathBuf),

    #[error("no stash summary file in {}", .0.display())]
    EmptyStash(PathBuf),
}

impl Workspace {
    /// Lists the contents of container `id`.
    ///
    /// A failure to read or decode is an error, never an empty list.
    pub fn load_items_for(
        &self,
        id: &str,
        db: &ItemDb,
        policy: VariantPolicy,
    ) -> Result<Vec<ItemRecord>, LoadError> {
        let container = self
            .find_container(id)
            .ok_or_else(|| LoadError::UnknownContainer(id.to_string()))?;

        let result = match (container.kind, container.is_packed()) {
            (ContainerKind::CharacterSave, false) => load_unpacked_hero(container, db, policy),
            (ContainerKind::CharacterSave, true) => self.load_packed_hero(container, db, policy),
            (ContainerKind::SharedStash, false) => load_stash_summary(&container.path),
            (ContainerKind::SharedStash, true) => {
                Err(LoadError::PackedStashUnsupported(container.path.clone()))
            }
            (ContainerKind::Unknown, _) => Err(LoadError::UnknownContainer(id.to_string())),
        };
        if let Err(e) = &result {
            tracing::warn!("[workspace] load {id} failed: {e}");
        }
        result
    }

    fn load_packed_hero(
        &self,
        container: &Container,
        db: &ItemDb,
        policy: VariantPolicy,
    ) -> Result<Vec<ItemRecord>, LoadError> {
        let source_path = format!("{}::{}", container.path.display(), self.hero_entry);
        let raw = self.archive.read_entry(&container.path, &self.hero_entry)?;
        trace_stream_edges(&source_path, &raw);

        let stem = container
            .path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or_default()
            .to_ascii_lowercase();
        let decoded = crypt::decode_save(&raw, &stem).map_err(|source| LoadError::Decode {
            source_path: source_path.clone(),
            source,
        })?;
        tracing::debug!(
            "[workspace] {source_path} decoded with password '{}' len={}",
            decoded.password,
            decoded.data.len()
        );

        let record = decode_record(&decoded.data, &source_path)?;
        Ok(character_rows(&record, "(packed hero)", &source_path, db, policy))
    }
}

fn load_unpacked_hero(
    container: &Container,
    db: &ItemDb,
    policy: VariantPolicy,
) -> Result<Vec<ItemRecord>, LoadError> {
    let path = container.path.join(HERO_ENTRY);
    let bytes = fs::read(&path).map_err(|source| LoadError::Io {
        path: path.clone(),
        source,
    })?;
    let source_path = path.display().to_string();
    let record = decode_record(&bytes, &source_path)?;
    Ok(character_rows(&record, "(character)", &source_path, db, policy))
}

fn decode_record(bytes: &[u8], source_path: &str) -> Result<PlayerRecord, LoadError> {
    PlayerRecord::decode(bytes).ok_or_else(|| LoadError::ShortRecord {
        source_path: source_path.to_string(),
        len: bytes.len(),
        need: std::mem::size_of::<PlayerPack>(),
    })
}

/// Header row followed by one row per occupied slot.
fn character_rows(
    record: &PlayerRecord,
    location: &str,
    source_path: &str,
    db: &ItemDb,
    policy: VariantPolicy,
) -> Vec<ItemRecord> {
    let variant = policy.resolve(record.is_hellfire);
    let mut rows = vec![ItemRecord {
        name: record.name.clone(),
        base_type: format!("Class={}", record.class),
        quality: format!("Level={}", record.level),
        affixes: format!("XP={}", record.experience),
        location: location.to_string(),
        source_path: source_path.to_string(),
        ..ItemRecord::default()
    }];

    rows.extend(record.items().map(|(loc, slot)| {
        let view = regen::regenerate(slot, variant, db);
        ItemRecord {
            name: view.name,
            base_type: view.base_name,
            quality: view.quality,
            affixes: view.affixes,
            ilvl: view.ilvl,
            req_str: view.req_str,
            req_mag: view.req_mag,
            req_dex: view.req_dex,
            location: loc.to_string(),
            source_path: source_path.to_string(),
        }
    }));
    rows
}

/// One row per readable summary file. A bad file is skipped; the load fails
/// only when no row is left, with the last file error if there was one.
fn load_stash_summary(dir: &Path) -> Result<Vec<ItemRecord>, LoadError> {
    let mut rows = Vec::new();
    let mut last_err = None;
    for (file, label) in STASH_FILES {
        let path = dir.join(file);
        if !path.exists() {
            continue;
        }
        match stash_summary_row(&path, label) {
            Ok(row) => rows.push(row),
            Err(e) => {
                tracing::warn!("[workspace] skipping {}: {e}", path.display());
                last_err = Some(e);
            }
        }
    }
    if rows.is_empty() {
        return Err(last_err.unwrap_or_else(|| LoadError::EmptyStash(dir.to_path_buf())));
    }
    Ok(rows)
}

fn stash_summary_row(path: &Path, label: &str) -> Result<ItemRecord, LoadError> {
    let bytes = fs::read(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let source_path = path.display().to_string();
    let summary = StashSummary::parse(&bytes).ok_or_else(|| LoadError::ShortRecord {
        source_path: source_path.clone(),
        len: bytes.len(),
        need: crate::save::stash::STASH_HEADER_LEN,
    })?;
    Ok(ItemRecord {
        name: label.to_string(),
        base_type: format!("ver={}", summary.version),
        quality: format!("gold={}", summary.gold),
        affixes: format!("pages={}", summary.pages),
        location: "(stash summary)".to_string(),
        source_path,
        ..ItemRecord::default()
    })
}

/// Logs the first 16 and last 8 bytes of a raw stream.
fn trace_stream_edges(source_path: &str, raw: &[u8]) {
    let head = &raw[..raw.len().min(16)];
    let tail = &raw[raw.len().saturating_sub(8)..];
    tracing::trace!(
        "[workspace] {source_path} bytes={} head={} tail={}",
        raw.len(),
        hex::encode_upper(head),
        hex::encode_upper(tail)
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stash_summary_rows() {
        let dir = std::env::temp_dir().join(format!("dvault_items_stash_{}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        let mut raw = vec![2u8];
        raw.extend_from_slice(&5000u32.to_le_bytes());
        raw.extend_from_slice(&3u32.to_le_bytes());
        fs::write(dir.join(STASH_FILES[1].0), &raw).unwrap();

        let rows = load_stash_summary(&dir).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].name, "MP Stash");
        assert_eq!(rows[0].base_type, "ver=2");
        assert_eq!(rows[0].quality, "gold=5000");
        assert_eq!(rows[0].affixes, "pages=3");
        assert_eq!(rows[0].location, "(stash summary)");

        // A short SP file is skipped; the MP row survives.
        fs::write(dir.join(STASH_FILES[0].0), [1u8, 2, 3]).unwrap();
        let rows = load_stash_summary(&dir).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].name, "MP Stash");

        // With no good file left the file error comes back.
        fs::write(dir.join(STASH_FILES[1].0), [7u8]).unwrap();
        let err = load_stash_summary(&dir).unwrap_err();
        assert!(matches!(err, LoadError::ShortRecord { len: 1, need: 9, .. }));

        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_empty_stash_dir() {
        let dir = std::env::temp_dir().join(format!("dvault_items_empty_{}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        assert!(matches!(load_stash_summary(&dir), Err(LoadError::EmptyStash(_))));
        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_decode_record_short() {
        let err = decode_record(&[0u8; 10], "x/hero").unwrap_err();
        assert!(matches!(err, LoadError::ShortRecord { len: 10, need: 1266, .. }));
    }
}
