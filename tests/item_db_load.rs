use std::fs;
use std::path::{Path, PathBuf};

use dvault::database::item_db::{ITEMDAT_FILE, PREFIXES_FILE, SUFFIXES_FILE, UNIQUE_ITEMDAT_FILE};
use dvault::database::{DbError, ItemDb};

fn fixture_dir() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/txtdata")
}

/// Copies the fixture tables into a fresh temp directory.
fn copy_fixtures(tag: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("dvault_db_{tag}_{}", std::process::id()));
    let _ = fs::remove_dir_all(&dir);
    fs::create_dir_all(&dir).unwrap();
    for file in [ITEMDAT_FILE, UNIQUE_ITEMDAT_FILE, PREFIXES_FILE, SUFFIXES_FILE] {
        fs::copy(fixture_dir().join(file), dir.join(file)).unwrap();
    }
    dir
}

#[test]
fn test_load_fixture_tables() {
    let db = ItemDb::from_directory(fixture_dir()).unwrap();
    assert!(db.is_loaded());
    assert_eq!(db.generation(), 1);
    assert_eq!(db.txtdata_dir(), Some(fixture_dir().as_path()));
    assert!(!db.items().is_empty());
    assert!(!db.uniques().is_empty());
    assert!(!db.prefixes().is_empty());
    assert!(!db.suffixes().is_empty());

    for (i, row) in db.items().iter().enumerate() {
        assert_eq!(row.mapping_id, i);
    }
    assert!(db.item(db.items().len()).is_none());
    assert!(db.unique(db.uniques().len()).is_none());
}

#[test]
fn test_missing_column_keeps_prior_tables() {
    let dir = copy_fixtures("missing_col");
    let mut db = ItemDb::from_directory(&dir).unwrap();
    let items_before = db.items().len();

    // Rename the alignment header so the required column disappears.
    let path = dir.join(SUFFIXES_FILE);
    let text = fs::read_to_string(&path).unwrap();
    fs::write(&path, text.replacen("alignment", "align", 1)).unwrap();

    let err = db.load_from_directory(&dir).unwrap_err();
    match &err {
        DbError::MissingColumn { path: p, column } => {
            assert_eq!(p, &path);
            assert_eq!(*column, "alignment");
        }
        other => panic!("unexpected error: {other}"),
    }
    assert!(err.to_string().contains(SUFFIXES_FILE));

    assert!(db.is_loaded());
    assert_eq!(db.generation(), 1);
    assert_eq!(db.items().len(), items_before);

    fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn test_missing_file_leaves_store_unloaded() {
    let dir = copy_fixtures("missing_file");
    fs::remove_file(dir.join(UNIQUE_ITEMDAT_FILE)).unwrap();

    let mut db = ItemDb::new();
    let err = db.load_from_directory(&dir).unwrap_err();
    assert!(matches!(err, DbError::Io { .. }));
    assert!(!db.is_loaded());
    assert_eq!(db.generation(), 0);
    assert!(db.items().is_empty());
    assert!(db.item(0).is_none());

    fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn test_comment_only_file_has_no_header() {
    let dir = copy_fixtures("no_header");
    fs::write(dir.join(PREFIXES_FILE), "# nothing here\n\n").unwrap();

    let err = ItemDb::from_directory(&dir).unwrap_err();
    assert!(matches!(err, DbError::MissingHeader { .. }));

    fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn test_reload_bumps_generation() {
    let mut db = ItemDb::from_directory(fixture_dir()).unwrap();
    db.load_from_directory(fixture_dir()).unwrap();
    assert_eq!(db.generation(), 2);
}
