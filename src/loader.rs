//! Loader - rebuilds the relic database from a source document
//!
//! The new database is written to a staging file next to the target and only
//! moved into place once the whole transaction has committed. A failed load
//! therefore leaves whatever store was there before untouched.

use std::path::{Path, PathBuf};
use crate::model::RelicDocument;
use crate::storage::RelicStore;
use crate::Result;

/// What a successful load did
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct LoadSummary {
    pub craft_results: usize,
    pub relics: usize,
    /// Out-of-range percentages seen (accepted as-is)
    pub warnings: usize,
    /// Whether an existing database was replaced
    pub replaced_existing: bool,
}

/// Path of the staging database used while building `db_path`
pub fn staging_path(db_path: &Path) -> PathBuf {
    let mut name = db_path.file_name().map(|n| n.to_os_string()).unwrap_or_default();
    name.push(".partial");
    db_path.with_file_name(name)
}

/// Read `input`, then rebuild the database at `db_path` from it
pub fn load_file(input: &Path, db_path: &Path) -> Result<(RelicStore, LoadSummary)> {
    tracing::info!("Loading {} into {}", input.display(), db_path.display());
    let document = RelicDocument::from_path(input)?;
    load_with_summary(&document, db_path)
}

/// Rebuild the database at `db_path` from `document` and return a read
/// handle on it
pub fn load(document: &RelicDocument, db_path: &Path) -> Result<RelicStore> {
    load_with_summary(document, db_path).map(|(store, _)| store)
}

fn load_with_summary(document: &RelicDocument, db_path: &Path) -> Result<(RelicStore, LoadSummary)> {
    let warnings = document.consistency_warnings();
    for warning in &warnings {
        tracing::warn!("{}", warning);
    }

    let staging = staging_path(db_path);
    remove_if_exists(&staging)?;

    if let Err(e) = build(document, &staging) {
        tracing::debug!("Load failed, discarding {}", staging.display());
        if let Err(cleanup) = remove_if_exists(&staging) {
            tracing::warn!("Failed to remove {}: {}", staging.display(), cleanup);
        }
        return Err(e);
    }

    // rename replaces the target in one step, so readers see either the old
    // store or the new one
    let replaced_existing = db_path.exists();
    if let Err(e) = std::fs::rename(&staging, db_path) {
        if let Err(cleanup) = remove_if_exists(&staging) {
            tracing::warn!("Failed to remove {}: {}", staging.display(), cleanup);
        }
        return Err(e.into());
    }
    if replaced_existing {
        tracing::debug!("Replaced existing database: {}", db_path.display());
    }
    tracing::debug!("Database created: {}", db_path.display());

    let summary = LoadSummary {
        craft_results: document.relic_craft_results.len(),
        relics: document.relics.len(),
        warnings: warnings.len(),
        replaced_existing,
    };
    Ok((RelicStore::open_read_only(db_path)?, summary))
}

fn build(document: &RelicDocument, path: &Path) -> Result<()> {
    let mut store = RelicStore::create(path)?;
    store.populate(document)
}

fn remove_if_exists(path: &Path) -> Result<()> {
    match std::fs::remove_file(path) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(e.into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{CraftResult, RarityMix, Relic};
    use crate::Error;
    use tempfile::tempdir;

    fn sample_document() -> RelicDocument {
        RelicDocument {
            relic_craft_results: vec![
                CraftResult {
                    composition: RarityMix::new(40.0, 30.0, 20.0, 10.0),
                    result: RarityMix::new(50.0, 25.0, 15.0, 10.0),
                },
                CraftResult {
                    composition: RarityMix::new(0.0, 0.0, 50.0, 50.0),
                    result: RarityMix::new(0.0, 10.0, 60.0, 30.0),
                },
            ],
            relics: vec![
                Relic::new("Ember Crown", "Fire", "Mythical", "ember.png").with_description("Hot"),
                Relic::new("Moss Ring", "Nature", "Rare", "moss.png"),
            ],
        }
    }

    #[test]
    fn test_load_creates_store() {
        let dir = tempdir().unwrap();
        let db = dir.path().join("relics.db");

        let store = load(&sample_document(), &db).unwrap();
        assert!(db.is_file());
        assert!(!staging_path(&db).exists());
        assert_eq!(store.count_relics().unwrap(), 2);
        assert_eq!(store.count_craft_results().unwrap(), 2);
        assert_eq!(store.get_relic("Moss Ring").unwrap().unwrap().description, "");
    }

    #[test]
    fn test_load_is_idempotent() {
        let dir = tempdir().unwrap();
        let db = dir.path().join("relics.db");
        let doc = sample_document();

        let first = load(&doc, &db).unwrap();
        let first_relics = first.all_relics().unwrap();
        let first_crafts = first.all_craft_results().unwrap();
        drop(first);

        let second = load(&doc, &db).unwrap();
        assert_eq!(second.all_relics().unwrap(), first_relics);
        assert_eq!(second.all_craft_results().unwrap(), first_crafts);
        assert_eq!(second.count_craft_results().unwrap(), 2);
    }

    #[test]
    fn test_load_replaces_previous_contents() {
        let dir = tempdir().unwrap();
        let db = dir.path().join("relics.db");

        drop(load(&sample_document(), &db).unwrap());

        let smaller = RelicDocument {
            relic_craft_results: vec![],
            relics: vec![Relic::new("Lone", "Void", "Epic", "lone.png")],
        };
        let (_, summary) = load_with_summary(&smaller, &db).unwrap();
        assert!(summary.replaced_existing);

        let store = RelicStore::open_read_only(&db).unwrap();
        assert_eq!(store.count_relics().unwrap(), 1);
        assert_eq!(store.count_craft_results().unwrap(), 0);
    }

    #[test]
    fn test_duplicate_name_aborts_and_keeps_previous_store() {
        let dir = tempdir().unwrap();
        let db = dir.path().join("relics.db");
        drop(load(&sample_document(), &db).unwrap());

        let mut bad = sample_document();
        bad.relics.push(Relic::new("Moss Ring", "Other", "Epic", "x.png"));

        let err = load(&bad, &db).unwrap_err();
        assert!(matches!(err, Error::ConstraintViolation(_)));
        assert!(!staging_path(&db).exists());

        let store = RelicStore::open_read_only(&db).unwrap();
        assert_eq!(store.count_relics().unwrap(), 2);
        assert_eq!(store.get_relic("Moss Ring").unwrap().unwrap().group, "Nature");
    }

    #[test]
    fn test_duplicate_name_without_previous_store_creates_nothing() {
        let dir = tempdir().unwrap();
        let db = dir.path().join("relics.db");

        let mut bad = sample_document();
        bad.relics.push(Relic::new("Ember Crown", "Fire", "Rare", "e.png"));

        assert!(matches!(load(&bad, &db), Err(Error::ConstraintViolation(_))));
        assert!(!db.exists());
        assert!(!staging_path(&db).exists());
    }

    #[test]
    fn test_missing_collection_creates_no_store() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("relics-infos.json");
        let db = dir.path().join("relics.db");
        std::fs::write(&input, r#"{"relic_craft_results": []}"#).unwrap();

        let err = load_file(&input, &db).err().unwrap();
        assert!(matches!(err, Error::Parse(_)));
        assert!(!db.exists());
    }

    #[test]
    fn test_missing_input_is_io_error() {
        let dir = tempdir().unwrap();
        let err = load_file(&dir.path().join("absent.json"), &dir.path().join("relics.db"))
            .err()
            .unwrap();
        assert!(matches!(err, Error::Io(_)));
    }

    #[test]
    fn test_load_file_counts_warnings() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("relics-infos.json");
        let db = dir.path().join("relics.db");
        std::fs::write(
            &input,
            r#"{
                "relic_craft_results": [
                    {"composition": {"rare": 110, "epic": 0, "legendary": 0, "mythical": -10},
                     "result": {"rare": 100, "epic": 0, "legendary": 0, "mythical": 0}}
                ],
                "relics": [{"name": "A", "group": "G", "rarity": "Rare", "image": "a.png"}]
            }"#,
        )
        .unwrap();

        let (store, summary) = load_file(&input, &db).unwrap();
        assert_eq!(summary.warnings, 2);
        assert_eq!(summary.craft_results, 1);
        assert_eq!(summary.relics, 1);
        assert!(!summary.replaced_existing);
        assert_eq!(store.all_craft_results().unwrap()[0].composition.rare, 110.0);
    }

    #[test]
    fn test_failed_swap_keeps_existing_target() {
        let dir = tempdir().unwrap();
        // A non-empty directory at the target path cannot be replaced by a file
        let db = dir.path().join("relics.db");
        std::fs::create_dir(&db).unwrap();
        std::fs::write(db.join("keep.txt"), "old").unwrap();

        let err = load(&sample_document(), &db).unwrap_err();
        assert!(matches!(err, Error::Io(_)));
        assert!(!staging_path(&db).exists());
        assert_eq!(std::fs::read_to_string(db.join("keep.txt")).unwrap(), "old");
    }

    #[test]
    fn test_staging_path() {
        assert_eq!(
            staging_path(Path::new("data/relics.db")),
            PathBuf::from("data/relics.db.partial")
        );
    }
}
