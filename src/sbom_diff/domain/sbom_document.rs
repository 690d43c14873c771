use crate::shared::error::SbomError;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// A parsed SBOM document, tagged by schema family
///
/// CycloneDX documents carry their packages in `components`, SPDX documents
/// in `packages`. A document with neither list is `Empty`.
#[derive(Debug, Clone, PartialEq)]
pub enum SbomDocument {
    CycloneDx { components: Vec<SbomEntry> },
    Spdx { packages: Vec<SbomEntry> },
    Empty,
}

/// One component (CycloneDX) or package (SPDX) entry
///
/// Only the fields used for normalization are kept. Every field is optional;
/// defaults are applied by the normalizer, not here. A field of an unexpected
/// type never rejects the entry: non-string scalars are stringified and any
/// other value counts as missing.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SbomEntry {
    #[serde(default, deserialize_with = "lenient_string")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub version: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub version_info: Option<String>,
    #[serde(default, deserialize_with = "lenient_list")]
    pub licenses: Option<Vec<LicenseChoice>>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub license_declared: Option<String>,
    #[serde(default, deserialize_with = "lenient_list")]
    pub external_refs: Option<Vec<ExternalRef>>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub purl: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct LicenseChoice {
    #[serde(default, deserialize_with = "lenient_object")]
    pub license: Option<LicenseName>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct LicenseName {
    #[serde(default, deserialize_with = "lenient_string")]
    pub name: Option<String>,
}

/// External reference of an SPDX-style entry
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExternalRef {
    #[serde(default, deserialize_with = "lenient_string")]
    pub reference_category: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub reference_locator: Option<String>,
}

fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => Some(s),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    })
}

fn lenient_object<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    Ok(match Value::deserialize(deserializer)? {
        value @ Value::Object(_) => serde_json::from_value(value).ok(),
        _ => None,
    })
}

/// Items that do not decode keep their slot as a default value
fn lenient_list<'de, D, T>(deserializer: D) -> Result<Option<Vec<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Default,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Array(items) => Some(
            items
                .into_iter()
                .map(|item| match item {
                    Value::Object(_) => serde_json::from_value(item).unwrap_or_default(),
                    _ => T::default(),
                })
                .collect(),
        ),
        _ => None,
    })
}

impl ExternalRef {
    /// Returns true if the reference is categorized as a package-manager reference
    ///
    /// Accepts both `PACKAGE-MANAGER` (SPDX 2.3) and `PACKAGE_MANAGER` (SPDX 2.2),
    /// case-insensitively.
    pub fn is_package_manager(&self) -> bool {
        self.reference_category
            .as_deref()
            .map(|category| category.replace('_', "-").eq_ignore_ascii_case("package-manager"))
            .unwrap_or(false)
    }
}

impl SbomDocument {
    /// Parses raw bytes into a document
    ///
    /// # Errors
    /// Returns `SbomError::MalformedDocument` if the bytes are not JSON or the
    /// top-level value is not an object.
    pub fn parse(bytes: &[u8]) -> Result<Self, SbomError> {
        let value: Value =
            serde_json::from_slice(bytes).map_err(|e| SbomError::MalformedDocument {
                details: e.to_string(),
            })?;
        Self::from_value(value)
    }

    /// Builds a document from an already parsed JSON tree
    ///
    /// A non-empty `components` list selects CycloneDX; otherwise a `packages`
    /// list selects SPDX. Entries that are not objects are skipped.
    pub fn from_value(value: Value) -> Result<Self, SbomError> {
        let Value::Object(mut root) = value else {
            return Err(SbomError::MalformedDocument {
                details: "top-level value is not a JSON object".to_string(),
            });
        };

        let components = root.remove("components").map(entries_from_value);
        if let Some(components) = components.filter(|c| !c.is_empty()) {
            return Ok(SbomDocument::CycloneDx { components });
        }

        match root.remove("packages").map(entries_from_value) {
            Some(packages) => Ok(SbomDocument::Spdx { packages }),
            None => Ok(SbomDocument::Empty),
        }
    }

    pub fn entries(&self) -> &[SbomEntry] {
        match self {
            SbomDocument::CycloneDx { components } => components,
            SbomDocument::Spdx { packages } => packages,
            SbomDocument::Empty => &[],
        }
    }
}

fn entries_from_value(value: Value) -> Vec<SbomEntry> {
    match value {
        Value::Array(items) => items
            .into_iter()
            .filter(Value::is_object)
            .filter_map(|item| serde_json::from_value(item).ok())
            .collect(),
        _ => Vec::new(),
    }
}
