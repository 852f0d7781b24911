//! PSR-4 namespace map read from a project's `composer.json`.

use std::collections::BTreeMap;

use serde::Deserialize;

use super::AppError;

/// Composer manifest file name.
pub const COMPOSER_FILE: &str = "composer.json";

#[derive(Debug, Default, Deserialize)]
struct ComposerManifest {
    #[serde(default)]
    autoload: Autoload,
    #[serde(default, rename = "autoload-dev")]
    autoload_dev: Autoload,
}

#[derive(Debug, Default, Deserialize)]
struct Autoload {
    #[serde(default, rename = "psr-4")]
    psr4: BTreeMap<String, Psr4Dirs>,
}

/// A PSR-4 entry maps to one directory or a list of fallbacks.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum Psr4Dirs {
    One(String),
    Many(Vec<String>),
}

impl Psr4Dirs {
    fn first(&self) -> Option<&str> {
        match self {
            Psr4Dirs::One(dir) => Some(dir),
            Psr4Dirs::Many(dirs) => dirs.first().map(String::as_str),
        }
    }
}

/// Namespace prefix → directory (relative to the project root) from
/// `autoload.psr-4`, then `autoload-dev.psr-4` for prefixes not already
/// mapped. Only the first directory of a list is used.
pub fn parse_psr4_map(content: &str) -> Result<BTreeMap<String, String>, AppError> {
    let manifest: ComposerManifest = serde_json::from_str(content).map_err(|e| {
        AppError::ParseError { what: COMPOSER_FILE.to_string(), details: e.to_string() }
    })?;

    let mut map = BTreeMap::new();
    for (prefix, dirs) in manifest.autoload.psr4.iter().chain(manifest.autoload_dev.psr4.iter()) {
        if map.contains_key(prefix) {
            continue;
        }
        if let Some(dir) = dirs.first() {
            map.insert(prefix.clone(), dir.trim_end_matches('/').to_string());
        }
    }
    Ok(map)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_autoload_and_autoload_dev() {
        let map = parse_psr4_map(
            r#"{
                "name": "acme/app",
                "autoload": { "psr-4": { "App\\": "src/App/", "Shared\\": ["lib/", "vendor-lib/"] } },
                "autoload-dev": { "psr-4": { "AppTest\\": "test/AppTest/", "App\\": "ignored/" } }
            }"#,
        )
        .expect("composer.json parses");

        assert_eq!(map.get("App\\").map(String::as_str), Some("src/App"));
        assert_eq!(map.get("Shared\\").map(String::as_str), Some("lib"));
        assert_eq!(map.get("AppTest\\").map(String::as_str), Some("test/AppTest"));
    }

    #[test]
    fn manifest_without_autoload_is_empty() {
        assert!(parse_psr4_map(r#"{"name": "acme/app"}"#).expect("parses").is_empty());
    }

    #[test]
    fn malformed_manifest_is_a_parse_error() {
        let err = parse_psr4_map("{ not json").expect_err("malformed");
        assert!(matches!(err, AppError::ParseError { ref what, .. } if what == COMPOSER_FILE));
    }
}
