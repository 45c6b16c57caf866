// ── Local favorites persistence ──
//
// The favorites set is stored as one JSON array of `Home` snapshots
// (including `isFavorite`) and always rewritten whole.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};

use tracing::{debug, warn};

use crate::error::CoreError;
use crate::model::Home;

/// Name of the storage entry holding the favorites set.
pub const FAVORITES_ENTRY: &str = "favorites";

/// Durable storage for the favorites set.
pub trait FavoritesStore: Send + Sync {
    /// Read the persisted set. Absent or unreadable storage is an empty set.
    fn load(&self) -> Vec<Home>;

    /// Replace the persisted set with `homes`.
    fn save(&self, homes: &[Home]) -> Result<(), CoreError>;
}

fn decode(blob: &str, origin: &str) -> Vec<Home> {
    if blob.trim().is_empty() {
        return Vec::new();
    }
    match serde_json::from_str::<Vec<Home>>(blob) {
        Ok(homes) => homes,
        Err(e) => {
            warn!(origin, error = %e, "favorites entry is malformed, starting empty");
            Vec::new()
        }
    }
}

fn encode(homes: &[Home]) -> Result<String, CoreError> {
    serde_json::to_string(homes).map_err(|e| CoreError::Persistence {
        message: format!("failed to serialize favorites: {e}"),
    })
}

// ── JsonFileStore ────────────────────────────────────────────────────

/// Favorites kept in `<dir>/favorites.json`.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    /// Store backed by the exact file `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Store backed by `favorites.json` inside `dir`.
    pub fn in_dir(dir: impl AsRef<Path>) -> Self {
        Self::new(dir.as_ref().join(format!("{FAVORITES_ENTRY}.json")))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn write_atomic(&self, contents: &str) -> io::Result<()> {
        let dir = match self.path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
            _ => PathBuf::from("."),
        };
        fs::create_dir_all(&dir)?;
        let mut tmp = tempfile::NamedTempFile::new_in(&dir)?;
        tmp.write_all(contents.as_bytes())?;
        tmp.as_file().sync_all()?;
        tmp.persist(&self.path).map_err(|e| e.error)?;
        Ok(())
    }
}

impl FavoritesStore for JsonFileStore {
    fn load(&self) -> Vec<Home> {
        match fs::read_to_string(&self.path) {
            Ok(blob) => {
                let homes = decode(&blob, &self.path.display().to_string());
                debug!(path = %self.path.display(), count = homes.len(), "loaded favorites");
                homes
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "no favorites file yet");
                Vec::new()
            }
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "cannot read favorites, starting empty");
                Vec::new()
            }
        }
    }

    fn save(&self, homes: &[Home]) -> Result<(), CoreError> {
        let blob = encode(homes)?;
        self.write_atomic(&blob)
            .map_err(|e| CoreError::Persistence {
                message: format!("{}: {e}", self.path.display()),
            })?;
        debug!(path = %self.path.display(), count = homes.len(), "saved favorites");
        Ok(())
    }
}

// ── MemoryStore ──────────────────────────────────────────────────────

/// In-process store holding the serialized blob.
#[derive(Debug, Default)]
pub struct MemoryStore {
    blob: Mutex<Option<String>>,
    fail_writes: AtomicBool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from a raw blob, as if previously persisted.
    pub fn with_blob(blob: impl Into<String>) -> Self {
        Self {
            blob: Mutex::new(Some(blob.into())),
            fail_writes: AtomicBool::new(false),
        }
    }

    /// The current raw blob, if anything has been stored.
    pub fn blob(&self) -> Option<String> {
        self.blob
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .clone()
    }

    /// Make subsequent `save` calls fail.
    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }
}

impl FavoritesStore for MemoryStore {
    fn load(&self) -> Vec<Home> {
        self.blob()
            .map(|blob| decode(&blob, "memory"))
            .unwrap_or_default()
    }

    fn save(&self, homes: &[Home]) -> Result<(), CoreError> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(CoreError::Persistence {
                message: "storage is read-only".into(),
            });
        }
        let blob = encode(homes)?;
        *self
            .blob
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner) = Some(blob);
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::model::HomeId;

    fn fav(id: u64) -> Home {
        Home {
            id: HomeId::from(id),
            title: format!("Home {id}"),
            description: "Somewhere nice".into(),
            city: "Denver".into(),
            rooms: 2,
            bathrooms: 1,
            has_pool: false,
            picture: format!("https://img.example.com/{id}.jpg"),
            is_favorite: true,
        }
    }

    #[test]
    fn absent_file_loads_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::in_dir(dir.path());
        assert!(store.load().is_empty());
        assert!(store.path().ends_with("favorites.json"));
    }

    #[test]
    fn save_then_load_keeps_order() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::in_dir(dir.path().join("nested/data"));
        store.save(&[fav(3), fav(1), fav(2)]).unwrap();

        let ids: Vec<String> = store.load().iter().map(|h| h.id.to_string()).collect();
        assert_eq!(ids, vec!["3", "1", "2"]);
    }

    #[test]
    fn file_is_a_plain_json_array() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::in_dir(dir.path());
        store.save(&[fav(7)]).unwrap();

        let raw: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(store.path()).unwrap()).unwrap();
        assert!(raw.is_array());
        assert_eq!(raw[0]["isFavorite"], serde_json::json!(true));
        assert_eq!(raw[0]["id"], serde_json::json!(7));
    }

    #[test]
    fn malformed_or_empty_file_loads_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::in_dir(dir.path());
        fs::write(store.path(), "{not json").unwrap();
        assert!(store.load().is_empty());
        fs::write(store.path(), "").unwrap();
        assert!(store.load().is_empty());
    }

    #[test]
    fn saving_empty_set_overwrites() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::in_dir(dir.path());
        store.save(&[fav(1)]).unwrap();
        store.save(&[]).unwrap();
        assert!(store.load().is_empty());
        assert_eq!(fs::read_to_string(store.path()).unwrap(), "[]");
    }

    #[test]
    fn memory_store_can_refuse_writes() {
        let store = MemoryStore::new();
        store.save(&[fav(1)]).unwrap();
        store.set_fail_writes(true);
        let err = store.save(&[]).unwrap_err();
        assert!(matches!(err, CoreError::Persistence { .. }));
        assert_eq!(store.load().len(), 1);
    }

    #[test]
    fn memory_store_reads_string_ids() {
        let store = MemoryStore::with_blob(
            r#"[{"id":"4","title":"Loft","city":"Miami","rooms":1,"bathrooms":1,"isFavorite":true}]"#,
        );
        assert_eq!(store.load()[0].id, HomeId::from(4));
    }
}
