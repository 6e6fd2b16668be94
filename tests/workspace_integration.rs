use std::fs;
use std::path::{Path, PathBuf};

use dvault::database::ItemDb;
use dvault::regen::VariantPolicy;
use dvault::workspace::{
    ArchiveError, ArchiveReader, ContainerKind, LoadError, NoArchiveSupport, Workspace,
    WorkspaceError,
};

fn fixture(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures").join(name)
}

fn item_db() -> ItemDb {
    ItemDb::from_directory(fixture("txtdata")).unwrap()
}

/// Serves the encrypted fixture record for every `hero` request.
struct FixtureArchive;

impl ArchiveReader for FixtureArchive {
    fn read_entry(&self, archive: &Path, entry: &str) -> Result<Vec<u8>, ArchiveError> {
        if entry != "hero" {
            return Err(ArchiveError::Entry {
                path: archive.to_path_buf(),
                entry: entry.to_string(),
                reason: "not in fixture".to_string(),
            });
        }
        Ok(fs::read(fixture("multi_0_hero.bin")).unwrap())
    }
}

/// Builds a save root:
///   single_0/hero, stash/mpstashitems, multi_0.sv, Stash.sv,
///   plus entries the scan must ignore.
fn build_root(tag: &str) -> PathBuf {
    let root = std::env::temp_dir().join(format!("dvault_ws_{tag}_{}", std::process::id()));
    let _ = fs::remove_dir_all(&root);
    fs::create_dir_all(&root).unwrap();

    let hero_dir = root.join("single_0");
    fs::create_dir_all(&hero_dir).unwrap();
    fs::copy(fixture("hero.bin"), hero_dir.join("hero")).unwrap();

    let stash_dir = root.join("stash");
    fs::create_dir_all(&stash_dir).unwrap();
    let mut header = vec![3u8];
    header.extend_from_slice(&12345u32.to_le_bytes());
    header.extend_from_slice(&4u32.to_le_bytes());
    header.extend_from_slice(&[0u8; 32]);
    fs::write(stash_dir.join("mpstashitems"), header).unwrap();

    fs::write(root.join("multi_0.sv"), b"MPQ").unwrap();
    fs::write(root.join("Stash.sv"), b"MPQ").unwrap();

    // Ignored: unknown name, wrong extension, empty character directory.
    fs::write(root.join("notes.sv"), b"x").unwrap();
    fs::write(root.join("single_5.bak"), b"x").unwrap();
    fs::create_dir_all(root.join("single_9")).unwrap();
    root
}

#[test]
fn test_scan_classifies_and_sorts() {
    let root = build_root("scan");
    let mut ws = Workspace::with_archive_reader(Box::new(FixtureArchive));
    let count = ws.open(&root).unwrap();
    assert_eq!(count, 4);
    assert_eq!(ws.root_dir(), Some(root.as_path()));

    let ids: Vec<&str> = ws.containers().iter().map(|c| c.id.as_str()).collect();
    assert_eq!(ids, vec!["multi_0.sv", "single_0", "stash", "stash.sv"]);

    let kinds: Vec<ContainerKind> = ws.containers().iter().map(|c| c.kind).collect();
    assert_eq!(
        kinds,
        vec![
            ContainerKind::CharacterSave,
            ContainerKind::CharacterSave,
            ContainerKind::SharedStash,
            ContainerKind::SharedStash,
        ]
    );
    assert!(ws.find_container("multi_0.sv").unwrap().is_packed());
    assert!(!ws.find_container("single_0").unwrap().is_packed());
    assert!(ws.find_container("single_9").is_none());

    fs::remove_dir_all(&root).unwrap();
}

#[test]
fn test_rescan_replaces_containers() {
    let root = build_root("rescan");
    let mut ws = Workspace::with_archive_reader(Box::new(NoArchiveSupport));
    ws.open(&root).unwrap();
    fs::remove_dir_all(root.join("stash")).unwrap();
    assert_eq!(ws.open(&root).unwrap(), 3);
    assert!(ws.find_container("stash").is_none());

    let file = root.join("multi_0.sv");
    let err = ws.open(&file).unwrap_err();
    assert!(matches!(err, WorkspaceError::NotADirectory(_)));
    assert!(ws.containers().is_empty());
    assert!(ws.root_dir().is_none());

    fs::remove_dir_all(&root).unwrap();
}

#[test]
fn test_unpacked_character_listing() {
    let root = build_root("hero");
    let mut ws = Workspace::with_archive_reader(Box::new(NoArchiveSupport));
    ws.open(&root).unwrap();
    let db = item_db();

    let rows = ws.load_items_for("single_0", &db, VariantPolicy::Auto).unwrap();
    assert_eq!(rows.len(), 6);

    let header = &rows[0];
    assert_eq!(header.name, "Tester");
    assert_eq!(header.base_type, "Class=1");
    assert_eq!(header.quality, "Level=12");
    assert_eq!(header.affixes, "XP=45000");
    assert_eq!(header.location, "(character)");
    assert!(header.source_path.ends_with("hero"));

    let names: Vec<(&str, &str)> = rows[1..]
        .iter()
        .map(|r| (r.location.as_str(), r.name.as_str()))
        .collect();
    assert_eq!(
        names,
        vec![
            ("Body[0]", "Cap of Strength"),
            ("Body[4]", "Tin Short Sword of Frailty"),
            ("Inventory[0]", "Constricting Ring"),
            ("Inventory[3]", "Quilted Armor"),
            ("Belt[0]", "Potion of Healing"),
        ]
    );

    assert_eq!(rows[1].affixes, "suffix=Strength");
    assert_eq!(rows[1].ilvl, 1);
    assert_eq!(rows[2].quality, "identified, magic");
    assert_eq!(rows[2].affixes, "prefix=Tin, suffix=Frailty");
    assert_eq!(rows[2].base_type, "Short Sword");
    assert_eq!(rows[3].quality, "identified, unique");
    assert_eq!(rows[3].ilvl, 34);
    assert_eq!(rows[4].quality, "unidentified, magic");
    assert_eq!(rows[4].affixes, "prefix=Vulnerable, suffix=Frailty");
    assert_eq!(rows[5].quality, "identified");
    assert_eq!(rows[5].affixes, "");

    fs::remove_dir_all(&root).unwrap();
}

#[test]
fn test_removed_directory_stays_unpacked() {
    let root = build_root("removed");
    let mut ws = Workspace::with_archive_reader(Box::new(FixtureArchive));
    ws.open(&root).unwrap();
    fs::remove_dir_all(root.join("single_0")).unwrap();

    assert!(!ws.find_container("single_0").unwrap().is_packed());
    let err = ws
        .load_items_for("single_0", &item_db(), VariantPolicy::Auto)
        .unwrap_err();
    assert!(matches!(err, LoadError::Io { .. }));

    fs::remove_dir_all(&root).unwrap();
}

#[test]
fn test_stash_summary_listing() {
    let root = build_root("stash");
    let mut ws = Workspace::with_archive_reader(Box::new(NoArchiveSupport));
    ws.open(&root).unwrap();

    let rows = ws.load_items_for("stash", &item_db(), VariantPolicy::Auto).unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].name, "MP Stash");
    assert_eq!(rows[0].base_type, "ver=3");
    assert_eq!(rows[0].quality, "gold=12345");
    assert_eq!(rows[0].affixes, "pages=4");
    assert_eq!(rows[0].location, "(stash summary)");

    fs::remove_dir_all(&root).unwrap();
}

#[test]
fn test_packed_character_listing() {
    let root = build_root("packed");
    let mut ws = Workspace::with_archive_reader(Box::new(FixtureArchive));
    ws.open(&root).unwrap();

    let rows = ws.load_items_for("multi_0.sv", &item_db(), VariantPolicy::Auto).unwrap();
    assert_eq!(rows.len(), 6);
    assert_eq!(rows[0].name, "Tester");
    assert_eq!(rows[0].location, "(packed hero)");
    assert!(rows[0].source_path.ends_with("multi_0.sv::hero"));
    assert_eq!(rows[2].name, "Tin Short Sword of Frailty");
    assert_eq!(rows[3].name, "Constricting Ring");

    fs::remove_dir_all(&root).unwrap();
}

#[test]
fn test_packed_listing_uses_configured_entry() {
    let root = build_root("entry");
    let mut ws = Workspace::with_archive_reader(Box::new(FixtureArchive));
    ws.set_hero_entry("player");
    ws.open(&root).unwrap();

    let err = ws
        .load_items_for("multi_0.sv", &item_db(), VariantPolicy::Auto)
        .unwrap_err();
    assert!(matches!(err, LoadError::Archive(ArchiveError::Entry { .. })));

    fs::remove_dir_all(&root).unwrap();
}

#[test]
fn test_packed_without_archive_support() {
    let root = build_root("noarchive");
    let mut ws = Workspace::with_archive_reader(Box::new(NoArchiveSupport));
    ws.open(&root).unwrap();

    let err = ws
        .load_items_for("multi_0.sv", &item_db(), VariantPolicy::Auto)
        .unwrap_err();
    assert!(matches!(err, LoadError::Archive(ArchiveError::Disabled)));

    fs::remove_dir_all(&root).unwrap();
}

#[test]
fn test_packed_stash_unsupported() {
    let root = build_root("packedstash");
    let mut ws = Workspace::with_archive_reader(Box::new(FixtureArchive));
    ws.open(&root).unwrap();

    let err = ws
        .load_items_for("stash.sv", &item_db(), VariantPolicy::Auto)
        .unwrap_err();
    assert!(matches!(err, LoadError::PackedStashUnsupported(_)));

    fs::remove_dir_all(&root).unwrap();
}

#[test]
fn test_unknown_container() {
    let root = build_root("unknown");
    let mut ws = Workspace::with_archive_reader(Box::new(NoArchiveSupport));
    ws.open(&root).unwrap();

    let err = ws
        .load_items_for("single_7", &item_db(), VariantPolicy::Auto)
        .unwrap_err();
    assert!(matches!(err, LoadError::UnknownContainer(ref id) if id == "single_7"));

    fs::remove_dir_all(&root).unwrap();
}

#[test]
fn test_truncated_hero_is_an_error() {
    let root = build_root("short");
    let hero = root.join("single_0").join("hero");
    let bytes = fs::read(&hero).unwrap();
    fs::write(&hero, &bytes[..600]).unwrap();

    let mut ws = Workspace::with_archive_reader(Box::new(NoArchiveSupport));
    ws.open(&root).unwrap();
    let err = ws
        .load_items_for("single_0", &item_db(), VariantPolicy::Auto)
        .unwrap_err();
    assert!(matches!(err, LoadError::ShortRecord { len: 600, need: 1266, .. }));

    fs::remove_dir_all(&root).unwrap();
}
