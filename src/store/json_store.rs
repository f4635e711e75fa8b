use std::fs;
use std::io::Write;
use std::path::PathBuf;

use anyhow::{Result, bail};
use log::{debug, warn};
use serde::Serialize;

use crate::store::profile::UserProfile;

const PROFILE_EXT: &str = "json";

/// One pretty-printed JSON file per profile, named after the lower-cased
/// profile name.
pub struct JsonStore {
    base_dir: PathBuf,
}

impl JsonStore {
    pub fn new() -> Result<Self> {
        let base_dir = dirs::data_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("keyrow")
            .join("profiles");
        Self::with_base_dir(base_dir)
    }

    pub fn with_base_dir(base_dir: PathBuf) -> Result<Self> {
        fs::create_dir_all(&base_dir)?;
        Ok(Self { base_dir })
    }

    fn file_stem(name: &str) -> String {
        name.trim()
            .to_lowercase()
            .chars()
            .map(|c| {
                if c.is_alphanumeric() || c == '-' || c == '_' {
                    c
                } else {
                    '_'
                }
            })
            .collect()
    }

    fn profile_path(&self, name: &str) -> Result<PathBuf> {
        let stem = Self::file_stem(name);
        if stem.is_empty() {
            bail!("profile name is empty");
        }
        Ok(self.base_dir.join(format!("{stem}.{PROFILE_EXT}")))
    }

    /// Write through a temp file and rename, so a crash never leaves a
    /// half-written profile behind.
    fn save<T: Serialize>(&self, path: &PathBuf, data: &T) -> Result<()> {
        let tmp_path = path.with_extension("tmp");

        let json = serde_json::to_string_pretty(data)?;
        let mut file = fs::File::create(&tmp_path)?;
        file.write_all(json.as_bytes())?;
        file.sync_all()?;

        fs::rename(&tmp_path, path)?;
        Ok(())
    }

    pub fn save_profile(&self, profile: &UserProfile) -> Result<()> {
        let path = self.profile_path(&profile.name)?;
        self.save(&path, profile)?;
        debug!("saved profile {} to {}", profile.name, path.display());
        Ok(())
    }

    /// `None` when no profile of that name exists. A file that exists but
    /// does not parse is an error rather than a silent fresh start.
    pub fn load_profile(&self, name: &str) -> Result<Option<UserProfile>> {
        let path = self.profile_path(name)?;
        if !path.exists() {
            return Ok(None);
        }
        let content = fs::read_to_string(&path)?;
        let profile = serde_json::from_str(&content)?;
        Ok(Some(profile))
    }

    /// Load the named profile, creating and saving a fresh one if missing.
    pub fn load_or_create(&self, name: &str) -> Result<UserProfile> {
        match self.load_profile(name)? {
            Some(profile) => Ok(profile),
            None => {
                warn!("no profile named {name:?}, creating one");
                let profile = UserProfile::new(name);
                self.save_profile(&profile)?;
                Ok(profile)
            }
        }
    }

    /// Stored profile names (file stems), sorted.
    pub fn list_profiles(&self) -> Result<Vec<String>> {
        let mut names = Vec::new();
        for entry in fs::read_dir(&self.base_dir)? {
            let path = entry?.path();
            if path.extension().and_then(|e| e.to_str()) != Some(PROFILE_EXT) {
                continue;
            }
            if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                names.push(stem.to_string());
            }
        }
        names.sort();
        Ok(names)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn make_test_store() -> (TempDir, JsonStore) {
        let dir = TempDir::new().unwrap();
        let store = JsonStore::with_base_dir(dir.path().to_path_buf()).unwrap();
        (dir, store)
    }

    #[test]
    fn test_save_then_load() {
        let (_dir, store) = make_test_store();
        let mut profile = UserProfile::new("Grace");
        profile.current_lesson_index = 7;
        profile.wpm_record = 41;
        store.save_profile(&profile).unwrap();

        let loaded = store.load_profile("grace").unwrap().unwrap();
        assert_eq!(loaded, profile);
        assert!(!store.base_dir.join("grace.tmp").exists());
    }

    #[test]
    fn test_missing_profile_is_none() {
        let (_dir, store) = make_test_store();
        assert!(store.load_profile("nobody").unwrap().is_none());
    }

    #[test]
    fn test_corrupt_profile_is_an_error() {
        let (_dir, store) = make_test_store();
        fs::write(store.base_dir.join("broken.json"), "{ not json").unwrap();
        assert!(store.load_profile("broken").is_err());
    }

    #[test]
    fn test_list_profiles_sorted_json_only() {
        let (_dir, store) = make_test_store();
        store.save_profile(&UserProfile::new("zed")).unwrap();
        store.save_profile(&UserProfile::new("Amy")).unwrap();
        fs::write(store.base_dir.join("notes.txt"), "x").unwrap();
        assert_eq!(store.list_profiles().unwrap(), vec!["amy", "zed"]);
    }

    #[test]
    fn test_load_or_create_persists_new_profile() {
        let (_dir, store) = make_test_store();
        let created = store.load_or_create("new").unwrap();
        assert_eq!(created.current_lesson_index, 0);
        assert_eq!(store.list_profiles().unwrap(), vec!["new"]);
    }

    #[test]
    fn test_names_cannot_escape_the_directory() {
        let (_dir, store) = make_test_store();
        let path = store.profile_path("../evil").unwrap();
        assert_eq!(path.parent(), Some(store.base_dir.as_path()));
        assert!(store.profile_path("   ").is_err());
    }
}
