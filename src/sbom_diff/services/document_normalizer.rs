use crate::sbom_diff::domain::{PackageRecord, SbomDocument, SbomEntry, UNKNOWN};

/// A normalized entry that has not been through the package filter yet
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidatePackage {
    pub record: PackageRecord,
    /// Package-manager locators (purls) attached to the entry
    pub locators: Vec<String>,
}

/// DocumentNormalizer - converts SBOM documents of either schema family
/// into canonical package candidates
pub struct DocumentNormalizer;

impl DocumentNormalizer {
    /// Normalizes every entry of the document, preserving document order
    pub fn normalize(document: &SbomDocument) -> Vec<CandidatePackage> {
        match document {
            SbomDocument::CycloneDx { components } => components
                .iter()
                .map(Self::normalize_cyclonedx_component)
                .collect(),
            SbomDocument::Spdx { packages } => {
                packages.iter().map(Self::normalize_spdx_package).collect()
            }
            SbomDocument::Empty => Vec::new(),
        }
    }

    /// CycloneDX components may carry their purl directly as well as in `externalRefs`
    fn normalize_cyclonedx_component(entry: &SbomEntry) -> CandidatePackage {
        let mut locators: Vec<String> = entry.purl.iter().cloned().collect();
        locators.extend(package_manager_locators(entry));

        CandidatePackage {
            record: to_record(entry),
            locators,
        }
    }

    fn normalize_spdx_package(entry: &SbomEntry) -> CandidatePackage {
        CandidatePackage {
            record: to_record(entry),
            locators: package_manager_locators(entry).collect(),
        }
    }
}

fn to_record(entry: &SbomEntry) -> PackageRecord {
    let name = entry.name.as_deref().unwrap_or(UNKNOWN);
    let version = entry
        .version
        .as_deref()
        .or(entry.version_info.as_deref())
        .unwrap_or(UNKNOWN);

    PackageRecord::new(name, version, license_of(entry))
}

/// First entry of a non-empty `licenses` list wins, even without a name;
/// `licenseDeclared` is only consulted when that list is missing or empty.
fn license_of(entry: &SbomEntry) -> String {
    match entry.licenses.as_deref() {
        Some([first, ..]) => first
            .license
            .as_ref()
            .and_then(|l| l.name.clone())
            .unwrap_or_else(|| UNKNOWN.to_string()),
        _ => entry
            .license_declared
            .clone()
            .unwrap_or_else(|| UNKNOWN.to_string()),
    }
}

fn package_manager_locators(entry: &SbomEntry) -> impl Iterator<Item = String> + '_ {
    entry
        .external_refs
        .iter()
        .flatten()
        .filter(|r| r.is_package_manager())
        .filter_map(|r| r.reference_locator.clone())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn normalize(value: serde_json::Value) -> Vec<CandidatePackage> {
        DocumentNormalizer::normalize(&SbomDocument::from_value(value).unwrap())
    }

    #[test]
    fn test_missing_fields_default_to_unknown() {
        let candidates = normalize(json!({"packages": [{}]}));
        assert_eq!(candidates.len(), 1);
        let record = &candidates[0].record;
        assert_eq!(record.name(), "unknown");
        assert_eq!(record.version(), "unknown");
        assert_eq!(record.license(), "unknown");
        assert!(candidates[0].locators.is_empty());
    }

    #[test]
    fn test_version_falls_back_to_version_info() {
        let candidates = normalize(json!({
            "packages": [
                {"name": "a", "version": "1.0", "versionInfo": "9.9"},
                {"name": "b", "versionInfo": "2.0"}
            ]
        }));
        assert_eq!(candidates[0].record.version(), "1.0");
        assert_eq!(candidates[1].record.version(), "2.0");
    }

    #[test]
    fn test_license_from_licenses_list() {
        let candidates = normalize(json!({
            "components": [{
                "name": "bash",
                "licenses": [{"license": {"name": "GPL-3.0-or-later"}}, {"license": {"name": "MIT"}}],
                "licenseDeclared": "ignored"
            }]
        }));
        assert_eq!(candidates[0].record.license(), "GPL-3.0-or-later");
    }

    #[test]
    fn test_license_first_entry_without_name_is_unknown() {
        let candidates = normalize(json!({
            "components": [{
                "name": "bash",
                "licenses": [{"expression": "MIT OR Apache-2.0"}],
                "licenseDeclared": "MIT"
            }]
        }));
        assert_eq!(candidates[0].record.license(), "unknown");
    }

    #[test]
    fn test_license_falls_back_to_license_declared() {
        let candidates = normalize(json!({
            "packages": [
                {"name": "a", "licenses": [], "licenseDeclared": "Apache-2.0"},
                {"name": "b", "licenseDeclared": "MIT"}
            ]
        }));
        assert_eq!(candidates[0].record.license(), "Apache-2.0");
        assert_eq!(candidates[1].record.license(), "MIT");
    }

    #[test]
    fn test_spdx_locators_only_from_package_manager_refs() {
        let candidates = normalize(json!({
            "packages": [{
                "name": "busybox",
                "externalRefs": [
                    {"referenceCategory": "SECURITY", "referenceLocator": "cpe:2.3:a:busybox"},
                    {"referenceCategory": "PACKAGE-MANAGER", "referenceLocator": "pkg:apk/wolfi/busybox@1.36"}
                ],
                "purl": "pkg:apk/wolfi/ignored-for-spdx"
            }]
        }));
        assert_eq!(candidates[0].locators, vec!["pkg:apk/wolfi/busybox@1.36"]);
    }

    #[test]
    fn test_cyclonedx_locators_include_purl() {
        let candidates = normalize(json!({
            "components": [{
                "name": "zlib",
                "version": "1.3",
                "purl": "pkg:apk/wolfi/zlib@1.3"
            }]
        }));
        assert_eq!(candidates[0].locators, vec!["pkg:apk/wolfi/zlib@1.3"]);
    }

    #[test]
    fn test_empty_document_yields_nothing() {
        assert!(normalize(json!({})).is_empty());
        assert!(normalize(json!({"packages": []})).is_empty());
    }

    #[test]
    fn test_document_order_is_preserved() {
        let candidates = normalize(json!({
            "packages": [{"name": "zlib"}, {"name": "bash"}, {"name": "zlib", "versionInfo": "2"}]
        }));
        let names: Vec<&str> = candidates.iter().map(|c| c.record.name()).collect();
        assert_eq!(names, vec!["zlib", "bash", "zlib"]);
    }
}
