//! Configuration file support for sbom-changelog.
//!
//! Provides YAML-based configuration through `sbom-changelog.config.yml` files,
//! including data structures, file loading, and validation.

use anyhow::{bail, Context};
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;

use crate::sbom_diff::domain::{VariantCatalog, VariantSpec};
use crate::shared::Result;

pub const CONFIG_FILENAME: &str = "sbom-changelog.config.yml";

/// Top-level configuration file schema.
#[derive(Debug, Deserialize, Default)]
pub struct ConfigFile {
    pub variants: Option<Vec<VariantEntry>>,
    pub locator_prefix: Option<String>,
    pub file_suffix: Option<String>,
    pub asset_marker: Option<String>,
    pub strict_absence: Option<bool>,
    pub output_key: Option<String>,
    /// Captures unknown fields for warnings.
    #[serde(flatten)]
    pub unknown_fields: HashMap<String, serde_yaml_ng::Value>,
}

/// One image variant as declared in the config file.
#[derive(Debug, Deserialize)]
pub struct VariantEntry {
    pub name: String,
    /// Heading used in the changelog; defaults to the name.
    pub title: Option<String>,
    pub prefixes: Vec<String>,
}

impl ConfigFile {
    /// Builds the variant catalog, if the file declares variants.
    pub fn catalog(&self) -> Result<Option<VariantCatalog>> {
        let Some(entries) = &self.variants else {
            return Ok(None);
        };

        let specs = entries
            .iter()
            .map(|entry| {
                VariantSpec::new(
                    entry.name.clone(),
                    entry.title.clone().unwrap_or_else(|| entry.name.clone()),
                    entry.prefixes.clone(),
                )
            })
            .collect();

        let catalog = VariantCatalog::new(specs).context(
            "Invalid config: variants\n\n💡 Hint: Each variant needs a unique non-empty 'name' and at least one non-empty prefix.",
        )?;
        Ok(Some(catalog))
    }
}

/// Load config from an explicit path. Returns an error if the file is not found.
pub fn load_config_from_path(path: &Path) -> Result<ConfigFile> {
    let content = std::fs::read_to_string(path).with_context(|| {
        format!(
            "Failed to read config file: {}\n\n💡 Hint: Check that the file exists and is readable.",
            path.display()
        )
    })?;

    let config: ConfigFile = serde_yaml_ng::from_str(&content).with_context(|| {
        format!(
            "Failed to parse config file: {}\n\n💡 Hint: Ensure the file contains valid YAML syntax.",
            path.display()
        )
    })?;

    validate_config(&config)?;
    warn_unknown_fields(&config);

    Ok(config)
}

/// Auto-discover config in a directory. Returns `None` silently if not found.
pub fn discover_config(dir: &Path) -> Result<Option<ConfigFile>> {
    let config_path = dir.join(CONFIG_FILENAME);

    if !config_path.exists() {
        return Ok(None);
    }

    let config = load_config_from_path(&config_path)?;
    Ok(Some(config))
}

/// Validate the loaded configuration.
fn validate_config(config: &ConfigFile) -> Result<()> {
    if let Some(suffix) = &config.file_suffix {
        if suffix.trim().is_empty() {
            bail!(
                "Invalid config: file_suffix must not be empty.\n\n\
                 💡 Hint: Use a suffix such as \".json\"."
            );
        }
    }

    if let Some(marker) = &config.asset_marker {
        if marker.trim().is_empty() {
            bail!(
                "Invalid config: asset_marker must not be empty.\n\n\
                 💡 Hint: Use a marker contained in every SBOM asset name, e.g. \"sbom\"."
            );
        }
    }

    if let Some(key) = &config.output_key {
        if key.is_empty() || key.contains(['=', '\n', '\r']) {
            bail!(
                "Invalid config: output_key '{}' is not a valid step output name.\n\n\
                 💡 Hint: Use a plain name such as \"sbom-changes\".",
                key.escape_debug()
            );
        }
    }

    config.catalog()?;
    Ok(())
}

/// Warn about unknown fields in the config file.
fn warn_unknown_fields(config: &ConfigFile) {
    let mut keys: Vec<&String> = config.unknown_fields.keys().collect();
    keys.sort();
    for key in keys {
        eprintln!("⚠️  Warning: Unknown config field '{}' will be ignored.", key);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_load_valid_config() {
        let dir = TempDir::new().unwrap();
        let config_path = dir.path().join("config.yml");
        fs::write(
            &config_path,
            r#"
variants:
  - name: base
    title: Production Image
    prefixes: [base_, main_]
  - name: debug
    prefixes: [debug_]
locator_prefix: "pkg:apk/chainguard/"
file_suffix: .spdx.json
asset_marker: SPDX
strict_absence: true
output_key: image-changes
"#,
        )
        .unwrap();

        let config = load_config_from_path(&config_path).unwrap();
        assert_eq!(config.locator_prefix.as_deref(), Some("pkg:apk/chainguard/"));
        assert_eq!(config.file_suffix.as_deref(), Some(".spdx.json"));
        assert_eq!(config.asset_marker.as_deref(), Some("SPDX"));
        assert_eq!(config.strict_absence, Some(true));
        assert_eq!(config.output_key.as_deref(), Some("image-changes"));

        let catalog = config.catalog().unwrap().unwrap();
        assert_eq!(catalog.names().collect::<Vec<_>>(), vec!["base", "debug"]);
        assert_eq!(catalog.title_for("base"), "Production Image");
        assert_eq!(catalog.title_for("debug"), "debug");
        assert_eq!(catalog.classify("main_sbom.json").unwrap().name(), "base");
    }

    #[test]
    fn test_config_without_variants() {
        let dir = TempDir::new().unwrap();
        let config_path = dir.path().join("config.yml");
        fs::write(&config_path, "strict_absence: false\n").unwrap();

        let config = load_config_from_path(&config_path).unwrap();
        assert!(config.catalog().unwrap().is_none());
        assert_eq!(config.strict_absence, Some(false));
    }

    #[test]
    fn test_discover_config_found() {
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join(CONFIG_FILENAME),
            "locator_prefix: \"pkg:apk/wolfi/\"\n",
        )
        .unwrap();

        let config = discover_config(dir.path()).unwrap();
        assert!(config.is_some());
        assert_eq!(
            config.unwrap().locator_prefix.as_deref(),
            Some("pkg:apk/wolfi/")
        );
    }

    #[test]
    fn test_discover_config_not_found() {
        let dir = TempDir::new().unwrap();
        let config = discover_config(dir.path()).unwrap();
        assert!(config.is_none());
    }

    #[test]
    fn test_load_config_missing_file() {
        let result = load_config_from_path(Path::new("/nonexistent/config.yml"));
        assert!(result.is_err());
        let err = format!("{}", result.unwrap_err());
        assert!(err.contains("Failed to read config file"));
    }

    #[test]
    fn test_load_config_parse_error() {
        let dir = TempDir::new().unwrap();
        let config_path = dir.path().join("bad.yml");
        fs::write(&config_path, "invalid: yaml: [[[broken").unwrap();

        let result = load_config_from_path(&config_path);
        assert!(result.is_err());
        let err = format!("{}", result.unwrap_err());
        assert!(err.contains("Failed to parse config file"));
    }

    #[test]
    fn test_duplicate_variant_validation_error() {
        let dir = TempDir::new().unwrap();
        let config_path = dir.path().join("config.yml");
        fs::write(
            &config_path,
            r#"
variants:
  - name: base
    prefixes: [base_]
  - name: base
    prefixes: [main_]
"#,
        )
        .unwrap();

        let result = load_config_from_path(&config_path);
        assert!(result.is_err());
        let err = format!("{}", result.unwrap_err());
        assert!(err.contains("Invalid config: variants"));
    }

    #[test]
    fn test_variant_without_prefixes_is_rejected() {
        let dir = TempDir::new().unwrap();
        let config_path = dir.path().join("config.yml");
        fs::write(
            &config_path,
            "variants:\n  - name: base\n    prefixes: []\n",
        )
        .unwrap();

        assert!(load_config_from_path(&config_path).is_err());
    }

    #[test]
    fn test_empty_suffix_validation_error() {
        let dir = TempDir::new().unwrap();
        let config_path = dir.path().join("config.yml");
        fs::write(&config_path, "file_suffix: \"\"\n").unwrap();

        let result = load_config_from_path(&config_path);
        assert!(result.is_err());
        assert!(format!("{}", result.unwrap_err()).contains("file_suffix"));
    }

    #[test]
    fn test_invalid_output_key() {
        let dir = TempDir::new().unwrap();
        let config_path = dir.path().join("config.yml");
        fs::write(&config_path, "output_key: \"a=b\"\n").unwrap();

        let result = load_config_from_path(&config_path);
        assert!(result.is_err());
        assert!(format!("{}", result.unwrap_err()).contains("output_key"));
    }

    #[test]
    fn test_unknown_fields_are_captured() {
        let dir = TempDir::new().unwrap();
        let config_path = dir.path().join("config.yml");
        fs::write(&config_path, "strict_absence: true\nformat: markdown\n").unwrap();

        let config = load_config_from_path(&config_path).unwrap();
        assert!(config.unknown_fields.contains_key("format"));
    }
}
