use std::fs;
use std::path::{Path, PathBuf};

const BEST_FILE_NAME: &str = "best.v1";

/// Persistence for the single best-score integer. Injected into the game
/// session so tests can substitute an in-memory stub.
pub trait BestStore {
    fn load(&self) -> Option<u32>;
    fn save(&mut self, moves: u32);
}

/// Stores the best score as a decimal string in the user config dir.
/// Anything missing or unreadable counts as "no best score yet".
pub struct FileBestStore {
    path: PathBuf,
}

impl FileBestStore {
    pub fn new() -> Self {
        Self {
            path: glib::user_config_dir().join("pairup").join(BEST_FILE_NAME),
        }
    }

    #[cfg(test)]
    fn with_path(path: PathBuf) -> Self {
        Self { path }
    }
}

impl BestStore for FileBestStore {
    fn load(&self) -> Option<u32> {
        let raw = fs::read_to_string(&self.path).ok()?;
        raw.trim().parse().ok()
    }

    fn save(&mut self, moves: u32) {
        write_atomic(&self.path, &moves.to_string());
    }
}

fn write_atomic(path: &Path, data: &str) {
    if let Some(parent) = path.parent() {
        let _ = fs::create_dir_all(parent);
    }
    let tmp_path = path.with_extension("tmp");
    if fs::write(&tmp_path, data).is_ok() {
        let _ = fs::rename(&tmp_path, path);
    }
}

/// Test stub; clones share the same slot so a test can inspect what the
/// session persisted.
#[cfg(test)]
#[derive(Clone, Default)]
pub struct MemoryBestStore {
    value: std::rc::Rc<std::cell::RefCell<Option<u32>>>,
}

#[cfg(test)]
impl MemoryBestStore {
    pub fn get(&self) -> Option<u32> {
        *self.value.borrow()
    }
}

#[cfg(test)]
impl BestStore for MemoryBestStore {
    fn load(&self) -> Option<u32> {
        self.get()
    }

    fn save(&mut self, moves: u32) {
        *self.value.borrow_mut() = Some(moves);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_store(name: &str) -> FileBestStore {
        let path = std::env::temp_dir()
            .join(format!("pairup-{}-{}", name, std::process::id()))
            .join(BEST_FILE_NAME);
        let _ = fs::remove_file(&path);
        FileBestStore::with_path(path)
    }

    #[test]
    fn missing_file_means_no_best() {
        let store = temp_store("missing");
        assert_eq!(store.load(), None);
    }

    #[test]
    fn saved_value_round_trips() {
        let mut store = temp_store("roundtrip");
        store.save(12);
        assert_eq!(store.load(), Some(12));
        store.save(7);
        assert_eq!(store.load(), Some(7));
    }

    #[test]
    fn file_holds_a_decimal_string() {
        let mut store = temp_store("decimal");
        store.save(42);
        let raw = fs::read_to_string(&store.path).unwrap();
        assert_eq!(raw, "42");
    }

    #[test]
    fn malformed_content_is_ignored() {
        let store = temp_store("malformed");
        write_atomic(&store.path, "not a number");
        assert_eq!(store.load(), None);
    }

    #[test]
    fn no_stray_tmp_file_left_behind() {
        let mut store = temp_store("tmp");
        store.save(3);
        assert!(!store.path.with_extension("tmp").exists());
    }
}
