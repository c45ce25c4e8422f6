//! Sha256 extraction from free-form release notes
//!
//! Release authors have published checksums in several hand-written layouts
//! over the years. Each layout is one [`Strategy`]; the strategies run in the
//! fixed order of [`strategies`], all writing into one map, and a later
//! strategy overwrites an earlier result for the same filename. That
//! last-match-wins precedence is part of the contract, not an accident of
//! code order.

use std::collections::HashMap;
use std::sync::OnceLock;

use regex::Regex;

/// Filename pattern for the non-table layouts: restricted to known
/// release-asset extensions so prose around the checksum is not mistaken
/// for a filename.
const ASSET_FILENAME: &str = r"[A-Za-z0-9_.-]+\.(?:apk|jar|msi|AppImage|deb|zip|gz)";

/// One recognized checksum notation.
pub struct Strategy {
    pub name: &'static str,
    pattern: Regex,
}

static STRATEGIES: OnceLock<Vec<Strategy>> = OnceLock::new();

/// The ordered strategy list. Later entries overwrite earlier ones when both
/// mention the same filename.
pub fn strategies() -> &'static [Strategy] {
    STRATEGIES.get_or_init(|| {
        vec![
            // "IReader-arm64-v8a.apksha256:<hex>" - filename runs directly
            // into the sha256: literal
            Strategy {
                name: "direct-suffix",
                pattern: Regex::new(&format!(
                    r"(?i)({ASSET_FILENAME})sha256:([0-9a-f]{{64,}})"
                ))
                .expect("direct-suffix pattern"),
            },
            // markdown table row: |<filename>|<hex>| with optional padding
            Strategy {
                name: "table-row",
                pattern: Regex::new(r"(?i)\|([^|]+)\|\s*([0-9a-f]{64,})\s*\|")
                    .expect("table-row pattern"),
            },
            // "<filename> | sha256:<hex>"
            Strategy {
                name: "pipe-separated",
                pattern: Regex::new(&format!(
                    r"(?i)({ASSET_FILENAME})\s*\|\s*sha256:([0-9a-f]{{64,}})"
                ))
                .expect("pipe-separated pattern"),
            },
        ]
    })
}

/// A published checksum must be exactly 64 hex characters. The patterns
/// capture maximal hex runs so a 65-character run is rejected here instead
/// of being silently truncated to its first 64 characters.
fn is_sha256(hex: &str) -> bool {
    hex.len() == 64 && hex.bytes().all(|b| b.is_ascii_hexdigit())
}

/// Scan release notes for checksum mentions and map asset filename to the
/// published sha256, case preserved as matched. Text with no recognizable
/// checksums yields an empty map; this never fails.
pub fn extract(body: &str) -> HashMap<String, String> {
    let mut map = HashMap::new();
    for strategy in strategies() {
        for caps in strategy.pattern.captures_iter(body) {
            let hex = &caps[2];
            if is_sha256(hex) {
                map.insert(caps[1].trim().to_string(), hex.to_string());
            }
        }
    }
    map
}

#[cfg(test)]
mod tests {
    use super::*;

    const HASH_A: &str = "aaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaa";
    const HASH_B: &str = "bbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbb";

    #[test]
    fn test_direct_suffix_format() {
        let body = format!("IReader-arm64-v8a.apksha256:{HASH_A}");
        let map = extract(&body);
        assert_eq!(map.get("IReader-arm64-v8a.apk"), Some(&HASH_A.to_string()));
    }

    #[test]
    fn test_table_row_format() {
        let body = format!("|file.apk|{HASH_A}|");
        let map = extract(&body);
        assert_eq!(map.get("file.apk"), Some(&HASH_A.to_string()));
    }

    #[test]
    fn test_table_row_trims_filename_padding() {
        let body = format!("| file.apk | {HASH_A} |");
        let map = extract(&body);
        assert_eq!(map.get("file.apk"), Some(&HASH_A.to_string()));
    }

    #[test]
    fn test_pipe_separated_format() {
        let body = format!("IReader-x64.msi | sha256:{HASH_A}");
        let map = extract(&body);
        assert_eq!(map.get("IReader-x64.msi"), Some(&HASH_A.to_string()));
    }

    #[test]
    fn test_hex_run_must_be_exactly_64_chars() {
        let short = &HASH_A[..63];
        let long = format!("{HASH_A}a");
        assert!(extract(&format!("file.apksha256:{short}")).is_empty());
        assert!(extract(&format!("file.apksha256:{long}")).is_empty());
        assert!(extract(&format!("|file.apk|{long}|")).is_empty());
    }

    #[test]
    fn test_uppercase_hex_preserved_as_matched() {
        let upper = HASH_A.to_uppercase();
        let map = extract(&format!("file.zipsha256:{upper}"));
        assert_eq!(map.get("file.zip"), Some(&upper));
    }

    #[test]
    fn test_unknown_extension_ignored_outside_tables() {
        let body = format!("notes.txtsha256:{HASH_A}");
        assert!(extract(&body).is_empty());
    }

    #[test]
    fn test_empty_and_plain_text_yield_empty_map() {
        assert!(extract("").is_empty());
        assert!(extract("Bug fixes and performance improvements.").is_empty());
    }

    #[test]
    fn test_later_strategy_overwrites_earlier_for_same_file() {
        // direct-suffix maps the file to HASH_A, then the table row for the
        // same file runs later in the strategy order and must win
        let body = format!("App-x64.zipsha256:{HASH_A}\n| App-x64.zip | {HASH_B} |");
        let map = extract(&body);
        assert_eq!(map.get("App-x64.zip"), Some(&HASH_B.to_string()));
        assert_eq!(map.len(), 1);
    }

    #[test]
    fn test_strategy_order_is_declared() {
        let names: Vec<_> = strategies().iter().map(|s| s.name).collect();
        assert_eq!(names, ["direct-suffix", "table-row", "pipe-separated"]);
    }

    #[test]
    fn test_multiple_assets_in_one_body() {
        let body = format!(
            "IReader-arm64-v8a.apksha256:{HASH_A}\nIReader-x86_64.apksha256:{HASH_B}"
        );
        let map = extract(&body);
        assert_eq!(map.len(), 2);
        assert_eq!(map.get("IReader-arm64-v8a.apk"), Some(&HASH_A.to_string()));
        assert_eq!(map.get("IReader-x86_64.apk"), Some(&HASH_B.to_string()));
    }
}
