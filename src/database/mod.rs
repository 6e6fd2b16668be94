use std::path::PathBuf;

pub mod item_db;
pub mod tsv;
pub mod types;

pub use item_db::{AffixRow, BaseItemRow, ItemDb, UniqueItemRow};
pub use types::{AffixItemType, Alignment, ItemMiscId, ItemType};

/// Why a table load failed. Always names the offending file.
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{} has no header row", .path.display())]
    MissingHeader { path: PathBuf },

    #[error("{} is missing required column '{column}'", .path.display())]
    MissingColumn { path: PathBuf, column: &'static str },
}
