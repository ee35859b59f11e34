use super::CardStore;
use crate::error::{OdysseyError, Result};
use std::fs;
use std::path::{Path, PathBuf};
use uuid::Uuid;

pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    fn dir(&self) -> PathBuf {
        match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        }
    }

    fn ensure_dir(&self, path: &Path) -> Result<()> {
        if !path.exists() {
            fs::create_dir_all(path).map_err(OdysseyError::StoreWrite)?;
        }
        Ok(())
    }
}

impl CardStore for JsonFileStore {
    fn read_document(&self) -> Result<String> {
        fs::read_to_string(&self.path).map_err(OdysseyError::StoreRead)
    }

    fn write_document(&mut self, content: String) -> Result<()> {
        let dir = self.dir();
        self.ensure_dir(&dir)?;

        // Atomic replace: the document is either the old or the new array
        let tmp_file = dir.join(format!(".cards-{}.tmp", Uuid::new_v4()));
        fs::write(&tmp_file, content).map_err(OdysseyError::StoreWrite)?;
        if let Err(e) = fs::rename(&tmp_file, &self.path) {
            let _ = fs::remove_file(&tmp_file);
            return Err(OdysseyError::StoreWrite(e));
        }
        Ok(())
    }

    fn location(&self) -> String {
        self.path.display().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Card, CardStats, Rarity};
    use serde_json::Map;
    use tempfile::TempDir;

    fn card(id: u64) -> Card {
        Card {
            id,
            name: format!("Card {id}"),
            rarity: Rarity::Common,
            image: String::new(),
            lore: String::new(),
            stats: CardStats::default(),
            extra: Map::new(),
        }
    }

    fn setup() -> (TempDir, JsonFileStore) {
        let dir = TempDir::new().unwrap();
        let store = JsonFileStore::new(dir.path().join("data").join("cards.json"));
        (dir, store)
    }

    #[test]
    fn missing_document_is_a_read_failure() {
        let (_dir, store) = setup();
        let err = store.load().unwrap_err();
        assert!(matches!(err, OdysseyError::StoreRead(_)));
    }

    #[test]
    fn save_creates_directory_and_round_trips() {
        let (_dir, mut store) = setup();
        store.save(&[card(1), card(2)]).unwrap();
        assert!(store.exists());

        let loaded = store.load().unwrap();
        assert_eq!(loaded, vec![card(1), card(2)]);
    }

    #[test]
    fn save_leaves_no_temp_files() {
        let (dir, mut store) = setup();
        store.save(&[card(1)]).unwrap();
        store.save(&[card(1), card(2)]).unwrap();

        for entry in fs::read_dir(dir.path().join("data")).unwrap() {
            let path = entry.unwrap().path();
            let name = path.file_name().unwrap().to_str().unwrap();
            assert!(!name.ends_with(".tmp"), "Found leftover tmp file: {}", name);
        }
    }

    #[test]
    fn garbage_document_is_corrupt() {
        let (_dir, store) = setup();
        fs::create_dir_all(store.path().parent().unwrap()).unwrap();
        fs::write(store.path(), "this is not json").unwrap();

        let err = store.load().unwrap_err();
        assert!(matches!(err, OdysseyError::CorruptStore(_)));
    }

    #[test]
    fn failed_rename_keeps_previous_document() {
        let (dir, mut store) = setup();
        store.save(&[card(1)]).unwrap();
        let before = fs::read_to_string(store.path()).unwrap();

        // A directory sitting at the document path makes the rename fail
        let blocked = dir.path().join("blocked");
        fs::create_dir_all(blocked.join("cards.json")).unwrap();
        let mut blocked_store = JsonFileStore::new(blocked.join("cards.json"));
        let err = blocked_store.save(&[card(1), card(2)]).unwrap_err();
        assert!(matches!(err, OdysseyError::StoreWrite(_)));

        let leftovers: Vec<_> = fs::read_dir(&blocked)
            .unwrap()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_name().to_string_lossy().ends_with(".tmp"))
            .collect();
        assert!(leftovers.is_empty());
        assert_eq!(fs::read_to_string(store.path()).unwrap(), before);
    }
}
