//! Raw GitHub releases API types
//!
//! Wire shapes only; normalization into the display model happens in
//! `crate::releases`.

use serde::Deserialize;

/// One release as returned by `GET /repos/<org>/<repo>/releases`
#[derive(Deserialize, Debug, Clone)]
pub struct RawRelease {
    pub id: u64,
    /// GitHub allows untitled releases; `null` in the payload
    pub name: Option<String>,
    pub tag_name: String,
    pub published_at: String,
    /// Free-form markdown release notes; `null` when empty
    pub body: Option<String>,
    #[serde(default)]
    pub prerelease: bool,
    #[serde(default)]
    pub assets: Vec<RawAsset>,
}

/// One downloadable file attached to a release
#[derive(Deserialize, Debug, Clone)]
pub struct RawAsset {
    pub name: String,
    pub browser_download_url: String,
    pub size: u64,
}
