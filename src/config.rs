use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

/// Defaults matching the production site.
pub const DEFAULT_GITHUB_REPO: &str = "IReaderorg/IReader";
pub const DEFAULT_SOURCES_INDEX_URL: &str =
    "https://raw.githubusercontent.com/IReaderorg/IReader-extensions/refs/heads/repo/index.min.json";
pub const DEFAULT_USER_AGENT: &str = "IReader-Site";

/// App configuration. Every field has the production default, so running
/// without a config file behaves exactly like the site.
#[derive(Serialize, Deserialize, Clone)]
pub struct SiteConfig {
    pub github_repo: String,
    pub sources_index_url: String,
    pub user_agent: String,
    /// Release feed revalidation window
    pub release_cache_minutes: u64,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            github_repo: DEFAULT_GITHUB_REPO.to_string(),
            sources_index_url: DEFAULT_SOURCES_INDEX_URL.to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            release_cache_minutes: 15,
        }
    }
}

impl SiteConfig {
    fn get_path() -> PathBuf {
        crate::site_path!("config.json")
    }

    pub fn load() -> Self {
        let path = Self::get_path();
        if path.exists() {
            if let Ok(content) = fs::read_to_string(&path) {
                if let Ok(config) = serde_json::from_str(&content) {
                    return config;
                }
            }
        }
        Self::default()
    }

    pub fn save(&self) {
        let path = Self::get_path();
        // Ensure parent dir exists
        if let Some(parent) = path.parent() {
            let _ = fs::create_dir_all(parent);
        }
        if let Ok(json) = serde_json::to_string_pretty(self) {
            let _ = fs::write(path, json);
        }
    }

    pub fn release_cache_ttl(&self) -> std::time::Duration {
        std::time::Duration::from_secs(self.release_cache_minutes * 60)
    }
}
