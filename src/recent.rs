//! The recent-files list.
//!
//! An ordered, most-recent-first list with a fixed capacity, persisted
//! as a single value in the host key-value store. Invariants: at most
//! [`RECENT_CAPACITY`] entries, the most recently opened path at index
//! 0, no duplicate paths.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Maximum number of remembered files.
pub const RECENT_CAPACITY: usize = 10;

/// Storage key the list is persisted under.
pub const STORAGE_KEY: &str = "recent-files";

/// One remembered file, including its text so a recent-select works
/// even after the file disappears from disk.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecentEntry {
    pub path: PathBuf,
    pub name: String,
    pub text: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecentFiles {
    entries: Vec<RecentEntry>,
}

impl RecentFiles {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an opened file at the front of the list.
    ///
    /// An existing entry for the same path is removed first, then the
    /// list is truncated to capacity.
    pub fn insert(&mut self, path: &Path, text: &str) {
        let name = path
            .file_name()
            .map_or_else(|| "Untitled".to_string(), |name| name.to_string_lossy().into_owned());
        self.entries.retain(|entry| entry.path != path);
        self.entries.insert(
            0,
            RecentEntry {
                path: path.to_path_buf(),
                name,
                text: text.to_string(),
            },
        );
        self.entries.truncate(RECENT_CAPACITY);
    }

    pub fn get(&self, index: usize) -> Option<&RecentEntry> {
        self.entries.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &RecentEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_insert_puts_newest_first() {
        let mut recent = RecentFiles::new();
        recent.insert(Path::new("/a.md"), "a");
        recent.insert(Path::new("/b.md"), "b");

        assert_eq!(recent.len(), 2);
        assert_eq!(recent.get(0).unwrap().path, PathBuf::from("/b.md"));
        assert_eq!(recent.get(1).unwrap().path, PathBuf::from("/a.md"));
    }

    #[test]
    fn test_reinsert_moves_entry_to_front_with_new_text() {
        let mut recent = RecentFiles::new();
        recent.insert(Path::new("/a.md"), "old");
        recent.insert(Path::new("/b.md"), "b");
        recent.insert(Path::new("/a.md"), "new");

        assert_eq!(recent.len(), 2);
        let front = recent.get(0).unwrap();
        assert_eq!(front.path, PathBuf::from("/a.md"));
        assert_eq!(front.text, "new");
    }

    #[test]
    fn test_capacity_evicts_oldest() {
        let mut recent = RecentFiles::new();
        for i in 0..15 {
            recent.insert(Path::new(&format!("/f{i}.md")), "x");
        }

        assert_eq!(recent.len(), RECENT_CAPACITY);
        assert_eq!(recent.get(0).unwrap().path, PathBuf::from("/f14.md"));
        assert!(recent.iter().all(|entry| entry.path != Path::new("/f4.md")));
    }

    #[test]
    fn test_entry_name_is_file_name() {
        let mut recent = RecentFiles::new();
        recent.insert(Path::new("/deep/dir/notes.md"), "x");
        assert_eq!(recent.get(0).unwrap().name, "notes.md");
    }

    #[test]
    fn test_serde_round_trip() {
        let mut recent = RecentFiles::new();
        recent.insert(Path::new("/a.md"), "# Hi");
        let json = serde_json::to_string(&recent).unwrap();
        let back: RecentFiles = serde_json::from_str(&json).unwrap();
        assert_eq!(back, recent);
    }

    proptest! {
        #[test]
        fn prop_invariants_hold_after_many_inserts(
            stems in proptest::collection::vec("[a-z]{1,8}", 1..40)
        ) {
            let mut recent = RecentFiles::new();
            for stem in &stems {
                recent.insert(Path::new(&format!("/{stem}.md")), stem);
            }

            // Capacity bound.
            prop_assert!(recent.len() <= RECENT_CAPACITY);
            // Most recently opened path sits at index 0.
            let last = format!("/{}.md", stems.last().unwrap());
            prop_assert_eq!(&recent.get(0).unwrap().path, &PathBuf::from(last));
            // No duplicate paths.
            let mut seen = std::collections::HashSet::new();
            for entry in recent.iter() {
                prop_assert!(seen.insert(entry.path.clone()));
            }
        }
    }
}
