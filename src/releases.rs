//! Release feed: fetch, normalize, cache
//!
//! Turns raw GitHub release payloads into the display model the site
//! renders. Fetching is fail-soft: an unreachable or unhappy GitHub yields
//! [`ReleaseFeed::Unavailable`], never an error, and the page renders with
//! an empty state.

use std::time::{Duration, Instant};

use parking_lot::Mutex;

use crate::checksum;
use crate::format;
use crate::github::RawRelease;

/// Revalidation window for the cached feed.
pub const DEFAULT_CACHE_TTL: Duration = Duration::from_secs(15 * 60);

/// Display model for one release.
#[derive(Debug, Clone, PartialEq)]
pub struct Release {
    pub id: u64,
    pub name: String,
    pub tag_name: String,
    /// Page-local fragment id, `release-<tag>` with unsafe chars mapped to `-`
    pub anchor: String,
    /// Formatted publish date, e.g. "Jan 5, 2024"
    pub published_at: String,
    pub published_at_raw: String,
    pub assets: Vec<Asset>,
    /// Raw markdown notes, untouched; rendering and sanitizing are the
    /// presentation layer's problem
    pub notes: String,
}

/// Display model for one downloadable asset.
#[derive(Debug, Clone, PartialEq)]
pub struct Asset {
    /// Verbatim uploaded filename; also the checksum lookup key
    pub label: String,
    pub url: String,
    /// Formatted size, e.g. "12.4 MB"
    pub size: String,
    /// `None` when the release notes never published a checksum for this
    /// file - a valid state, shown as a placeholder downstream
    pub sha256: Option<String>,
}

/// Outcome of one feed retrieval. `Unavailable` is distinct from a fetched
/// empty list so callers can tell "no releases exist" from "GitHub was
/// unreachable".
#[derive(Debug, Clone, PartialEq)]
pub enum ReleaseFeed {
    Fetched {
        releases: Vec<Release>,
        /// Formatted publish date of the newest release, `None` when the
        /// list is empty
        updated_at: Option<String>,
    },
    Unavailable,
}

impl Release {
    pub fn from_raw(raw: RawRelease) -> Self {
        let notes = raw.body.unwrap_or_default();
        let sha256_map = checksum::extract(&notes);

        let assets = raw
            .assets
            .into_iter()
            .map(|asset| Asset {
                sha256: sha256_map.get(&asset.name).cloned(),
                label: asset.name,
                url: asset.browser_download_url,
                size: format::file_size(asset.size),
            })
            .collect();

        Release {
            id: raw.id,
            // untitled releases fall back to the tag
            name: raw.name.unwrap_or_else(|| raw.tag_name.clone()),
            anchor: anchor_for(&raw.tag_name),
            published_at: format::publish_date(&raw.published_at),
            published_at_raw: raw.published_at,
            tag_name: raw.tag_name,
            assets,
            notes,
        }
    }
}

/// Slugify a tag into a fragment id. Uniqueness rides on upstream tag names
/// being unique; no check here.
fn anchor_for(tag_name: &str) -> String {
    format!("release-{}", tag_name)
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '-' || c == '_' {
                c
            } else {
                '-'
            }
        })
        .collect()
}

/// Normalize a raw payload in order. `updated_at` is the formatted publish
/// date of the first entry, which GitHub returns newest-first.
pub fn normalize(raw: Vec<RawRelease>) -> ReleaseFeed {
    let releases: Vec<Release> = raw.into_iter().map(Release::from_raw).collect();
    let updated_at = releases.first().map(|r| r.published_at.clone());
    ReleaseFeed::Fetched {
        releases,
        updated_at,
    }
}

// ============================================================================
// Fetch Service
// ============================================================================

/// Fetch the release list from the GitHub API, first page only.
///
/// Non-2xx responses and transport failures both degrade to
/// [`ReleaseFeed::Unavailable`]; this never returns an error.
#[cfg(feature = "full")]
pub fn fetch_releases(repo: &str, user_agent: &str) -> ReleaseFeed {
    use crate::logging::{log_fetch, log_warning};

    let url = format!("https://api.github.com/repos/{}/releases", repo);
    log_fetch(&format!("Fetching releases from {}", url));

    let response = ureq::get(&url)
        .set("Accept", "application/vnd.github+json")
        .set("User-Agent", user_agent)
        .call();

    match response {
        Ok(resp) => match resp.into_json::<Vec<RawRelease>>() {
            Ok(raw) => normalize(raw),
            Err(e) => {
                log_warning(&format!("Release payload did not parse: {}", e));
                ReleaseFeed::Unavailable
            }
        },
        Err(e) => {
            log_warning(&format!("Release fetch failed: {}", e));
            ReleaseFeed::Unavailable
        }
    }
}

// ============================================================================
// Cache
// ============================================================================

struct CachedFeed {
    feed: ReleaseFeed,
    fetched_at: Instant,
}

/// TTL cache over the feed. Only successful fetches are retained, so an
/// `Unavailable` result is retried on the next call. Concurrent refreshes
/// of a stale entry may fetch twice; both resolve independently.
pub struct ReleaseCache {
    ttl: Duration,
    entry: Mutex<Option<CachedFeed>>,
}

impl ReleaseCache {
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            entry: Mutex::new(None),
        }
    }

    /// Return the cached feed while fresh, otherwise refresh through
    /// `fetch` and cache the result if it succeeded.
    pub fn get_or_fetch<F>(&self, fetch: F) -> ReleaseFeed
    where
        F: FnOnce() -> ReleaseFeed,
    {
        {
            let entry = self.entry.lock();
            if let Some(cached) = entry.as_ref() {
                if cached.fetched_at.elapsed() < self.ttl {
                    return cached.feed.clone();
                }
            }
        }

        let feed = fetch();
        if let ReleaseFeed::Fetched { .. } = feed {
            *self.entry.lock() = Some(CachedFeed {
                feed: feed.clone(),
                fetched_at: Instant::now(),
            });
        }
        feed
    }
}

impl Default for ReleaseCache {
    fn default() -> Self {
        Self::new(DEFAULT_CACHE_TTL)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::github::RawAsset;

    fn raw_release(id: u64, tag: &str, body: Option<&str>) -> RawRelease {
        RawRelease {
            id,
            name: Some(format!("IReader {}", tag)),
            tag_name: tag.to_string(),
            published_at: "2024-01-05T10:30:00Z".to_string(),
            body: body.map(str::to_string),
            prerelease: false,
            assets: vec![RawAsset {
                name: "IReader-arm64-v8a.apk".to_string(),
                browser_download_url: "https://example.com/IReader-arm64-v8a.apk".to_string(),
                size: 24 * 1024 * 1024,
            }],
        }
    }

    #[test]
    fn test_anchor_replaces_unsafe_chars() {
        assert_eq!(anchor_for("v1.2.3"), "release-v1-2-3");
        assert_eq!(anchor_for("v1_2-rc"), "release-v1_2-rc");
        assert_eq!(anchor_for("tag with spaces!"), "release-tag-with-spaces-");
    }

    #[test]
    fn test_normalize_preserves_order_and_count() {
        let raw = vec![
            raw_release(3, "v1.2.0", None),
            raw_release(2, "v1.1.0", None),
            raw_release(1, "v1.0.0", None),
        ];
        match normalize(raw) {
            ReleaseFeed::Fetched {
                releases,
                updated_at,
            } => {
                assert_eq!(releases.len(), 3);
                let ids: Vec<_> = releases.iter().map(|r| r.id).collect();
                assert_eq!(ids, [3, 2, 1]);
                assert_eq!(updated_at.as_deref(), Some("Jan 5, 2024"));
            }
            ReleaseFeed::Unavailable => panic!("normalize never fails"),
        }
    }

    #[test]
    fn test_normalize_empty_payload_has_no_timestamp() {
        match normalize(vec![]) {
            ReleaseFeed::Fetched {
                releases,
                updated_at,
            } => {
                assert!(releases.is_empty());
                assert_eq!(updated_at, None);
            }
            ReleaseFeed::Unavailable => panic!("normalize never fails"),
        }
    }

    #[test]
    fn test_asset_checksum_resolved_from_notes() {
        let hash = "cc".repeat(32);
        let body = format!("IReader-arm64-v8a.apksha256:{hash}");
        let release = Release::from_raw(raw_release(1, "v1.0.0", Some(&body)));

        assert_eq!(release.assets.len(), 1);
        let asset = &release.assets[0];
        assert_eq!(asset.label, "IReader-arm64-v8a.apk");
        assert_eq!(asset.size, "24.0 MB");
        assert_eq!(asset.sha256.as_deref(), Some(hash.as_str()));
        // notes pass through verbatim
        assert_eq!(release.notes, body);
    }

    #[test]
    fn test_asset_without_published_checksum_is_none() {
        let release = Release::from_raw(raw_release(1, "v1.0.0", Some("Bug fixes.")));
        assert_eq!(release.assets[0].sha256, None);
    }

    #[test]
    fn test_untitled_release_uses_tag_as_name() {
        let mut raw = raw_release(1, "v1.0.0", None);
        raw.name = None;
        let release = Release::from_raw(raw);
        assert_eq!(release.name, "v1.0.0");
    }

    #[test]
    fn test_cache_serves_fresh_entry_without_refetch() {
        let cache = ReleaseCache::new(Duration::from_secs(60));
        let first = cache.get_or_fetch(|| normalize(vec![raw_release(1, "v1.0.0", None)]));
        let second = cache.get_or_fetch(|| panic!("fresh entry must not refetch"));
        assert_eq!(first, second);
    }

    #[test]
    fn test_cache_does_not_retain_unavailable() {
        let cache = ReleaseCache::new(Duration::from_secs(60));
        let first = cache.get_or_fetch(|| ReleaseFeed::Unavailable);
        assert_eq!(first, ReleaseFeed::Unavailable);

        // the failed fetch was not cached, so the next call fetches again
        let second = cache.get_or_fetch(|| normalize(vec![]));
        assert!(matches!(second, ReleaseFeed::Fetched { .. }));
    }

    #[test]
    fn test_cache_refetches_after_ttl() {
        let cache = ReleaseCache::new(Duration::ZERO);
        cache.get_or_fetch(|| normalize(vec![raw_release(1, "v1.0.0", None)]));
        let refreshed = cache.get_or_fetch(|| normalize(vec![]));
        match refreshed {
            ReleaseFeed::Fetched { releases, .. } => assert!(releases.is_empty()),
            ReleaseFeed::Unavailable => panic!("expected refetched feed"),
        }
    }
}
