//! Save-directory scanning.
//!
//! A workspace root holds packed saves (`*.sv`, `*.hsv`) and/or unpacked save
//! directories. Both follow the game's naming convention; anything else in
//! the root is ignored.

use std::cmp::Ordering;
use std::fs;
use std::path::{Path, PathBuf};

pub mod archive;
pub mod items;

pub use archive::{default_archive_reader, ArchiveError, ArchiveReader, NoArchiveSupport};
pub use items::{ItemRecord, LoadError};

use crate::save::{HERO_ENTRY, STASH_FILES};

const PACKED_EXTENSIONS: [&str; 2] = ["sv", "hsv"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ContainerKind {
    CharacterSave,
    SharedStash,
    Unknown,
}

/// One save unit found by a scan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Container {
    /// Stable across scans: lowercased file name (with extension) or
    /// directory name.
    pub id: String,
    pub display_name: String,
    pub path: PathBuf,
    pub kind: ContainerKind,
    /// Fixed at scan time.
    packed: bool,
}

impl Container {
    /// A `*.sv` / `*.hsv` archive rather than an unpacked directory.
    pub fn is_packed(&self) -> bool {
        self.packed
    }
}

#[derive(Debug, thiserror::Error)]
pub enum WorkspaceError {
    #[error("workspace root {} is not a directory", .0.display())]
    NotADirectory(PathBuf),

    #[error("failed to scan {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Kind implied by a save's base name (no extension). Case-insensitive.
pub fn classify_save_name(stem: &str) -> ContainerKind {
    let stem = stem.to_ascii_lowercase();
    if stem == "stash" || stem == "stash_spawn" {
        return ContainerKind::SharedStash;
    }
    let character = ["single_", "multi_", "share_", "spawn_"];
    if character.iter().any(|p| stem.starts_with(p)) {
        return ContainerKind::CharacterSave;
    }
    ContainerKind::Unknown
}

pub struct Workspace {
    root_dir: Option<PathBuf>,
    containers: Vec<Container>,
    archive: Box<dyn ArchiveReader>,
    hero_entry: String,
}

impl Default for Workspace {
    fn default() -> Self {
        Self::new()
    }
}

impl Workspace {
    /// Empty workspace using the build's default archive reader.
    pub fn new() -> Self {
        Self::with_archive_reader(default_archive_reader())
    }

    pub fn with_archive_reader(archive: Box<dyn ArchiveReader>) -> Self {
        Self {
            root_dir: None,
            containers: Vec::new(),
            archive,
            hero_entry: HERO_ENTRY.to_string(),
        }
    }

    /// Name of the player-record stream inside packed saves.
    pub fn set_hero_entry(&mut self, entry: impl Into<String>) {
        self.hero_entry = entry.into();
    }

    pub fn hero_entry(&self) -> &str {
        &self.hero_entry
    }

    /// Scans `root` (non-recursive) and replaces the container list.
    ///
    /// On error the workspace is left empty. Returns the number of
    /// containers found.
    pub fn open(&mut self, root: impl AsRef<Path>) -> Result<usize, WorkspaceError> {
        self.root_dir = None;
        self.containers.clear();

        let root = absolute(root.as_ref())?;
        if !root.is_dir() {
            tracing::warn!("[workspace] not a directory: {}", root.display());
            return Err(WorkspaceError::NotADirectory(root));
        }

        let entries = fs::read_dir(&root).map_err(|source| WorkspaceError::Io {
            path: root.clone(),
            source,
        })?;
        let mut found: Vec<Container> = entries
            .flatten()
            .filter_map(|entry| classify_entry(&entry.path()))
            .collect();
        found.sort_by(container_order);

        tracing::info!(
            "[workspace] scan root={} containers={}",
            root.display(),
            found.len()
        );
        self.root_dir = Some(root);
        self.containers = found;
        Ok(self.containers.len())
    }

    /// Root of the last successful scan.
    pub fn root_dir(&self) -> Option<&Path> {
        self.root_dir.as_deref()
    }

    pub fn containers(&self) -> &[Container] {
        &self.containers
    }

    pub fn find_container(&self, id: &str) -> Option<&Container> {
        self.containers.iter().find(|c| c.id == id)
    }
}

fn absolute(path: &Path) -> Result<PathBuf, WorkspaceError> {
    if path.is_absolute() {
        return Ok(path.to_path_buf());
    }
    let cwd = std::env::current_dir().map_err(|source| WorkspaceError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(cwd.join(path))
}

fn container_order(a: &Container, b: &Container) -> Ordering {
    a.kind
        .cmp(&b.kind)
        .then_with(|| {
            a.display_name
                .to_lowercase()
                .cmp(&b.display_name.to_lowercase())
        })
        .then_with(|| a.id.cmp(&b.id))
}

fn classify_entry(path: &Path) -> Option<Container> {
    if path.is_file() {
        classify_packed(path)
    } else if path.is_dir() {
        classify_unpacked(path)
    } else {
        None
    }
}

fn classify_packed(path: &Path) -> Option<Container> {
    let ext = path.extension()?.to_str()?.to_ascii_lowercase();
    if !PACKED_EXTENSIONS.contains(&ext.as_str()) {
        return None;
    }
    let stem = path.file_stem()?.to_str()?;
    let kind = classify_save_name(stem);
    if kind == ContainerKind::Unknown {
        return None;
    }
    Some(Container {
        id: format!("{}.{ext}", stem.to_ascii_lowercase()),
        display_name: stem.to_string(),
        path: path.to_path_buf(),
        kind,
        packed: true,
    })
}

fn classify_unpacked(path: &Path) -> Option<Container> {
    let name = path.file_name()?.to_str()?;
    let kind = classify_save_name(name);
    let valid = match kind {
        ContainerKind::CharacterSave => path.join(HERO_ENTRY).exists(),
        ContainerKind::SharedStash => STASH_FILES.iter().any(|(f, _)| path.join(f).exists()),
        ContainerKind::Unknown => false,
    };
    if !valid {
        tracing::debug!("[workspace] skipping {}", path.display());
        return None;
    }
    Some(Container {
        id: name.to_ascii_lowercase(),
        display_name: name.to_string(),
        path: path.to_path_buf(),
        kind,
        packed: false,
    })
}
