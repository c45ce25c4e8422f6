//! IReader site data core
//!
//! Library crate behind the IReader marketing site's data pipelines: the
//! GitHub release feed (fetch, checksum extraction, normalization) and the
//! extensions source catalogue (fetch, validation, filter/sort).
//! Presentation is out of scope; this crate ends at validated in-memory
//! lists.

pub mod checksum;
pub mod config;
pub mod format;
pub mod github;
pub mod logging;
pub mod paths;
pub mod query;
pub mod releases;
pub mod sources;
