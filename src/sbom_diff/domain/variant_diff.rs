use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// A package present only in the new snapshot
///
/// Serialized as a `[name, version, license]` array.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "(String, String, String)", into = "(String, String, String)")]
pub struct AddedPackage {
    pub name: String,
    pub version: String,
    pub license: String,
}

/// A package present only in the old snapshot
///
/// Serialized as a `[name, version]` array.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "(String, String)", into = "(String, String)")]
pub struct RemovedPackage {
    pub name: String,
    pub version: String,
}

/// A package present in both snapshots with a different version
///
/// Serialized as a `[name, old_version, new_version]` array.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "(String, String, String)", into = "(String, String, String)")]
pub struct UpdatedPackage {
    pub name: String,
    pub old_version: String,
    pub new_version: String,
}

impl From<(String, String, String)> for AddedPackage {
    fn from((name, version, license): (String, String, String)) -> Self {
        Self {
            name,
            version,
            license,
        }
    }
}

impl From<AddedPackage> for (String, String, String) {
    fn from(p: AddedPackage) -> Self {
        (p.name, p.version, p.license)
    }
}

impl From<(String, String)> for RemovedPackage {
    fn from((name, version): (String, String)) -> Self {
        Self { name, version }
    }
}

impl From<RemovedPackage> for (String, String) {
    fn from(p: RemovedPackage) -> Self {
        (p.name, p.version)
    }
}

impl From<(String, String, String)> for UpdatedPackage {
    fn from((name, old_version, new_version): (String, String, String)) -> Self {
        Self {
            name,
            old_version,
            new_version,
        }
    }
}

impl From<UpdatedPackage> for (String, String, String) {
    fn from(p: UpdatedPackage) -> Self {
        (p.name, p.old_version, p.new_version)
    }
}

/// VariantDiff - result of comparing the old and new package maps of one variant
///
/// Each list is sorted ascending by package name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VariantDiff {
    pub added: Vec<AddedPackage>,
    pub removed: Vec<RemovedPackage>,
    pub updated: Vec<UpdatedPackage>,
    /// Number of packages in the new snapshot
    pub total_packages: usize,
    pub is_first_release: bool,
}

impl VariantDiff {
    pub fn has_changes(&self) -> bool {
        !(self.added.is_empty() && self.removed.is_empty() && self.updated.is_empty())
    }
}

/// ChangeReport - one VariantDiff per configured variant, in declared order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ChangeReport {
    variants: IndexMap<String, VariantDiff>,
}

impl ChangeReport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends the diff for a variant (replacing any earlier diff of the same name
    /// while keeping its position)
    pub fn insert(&mut self, variant: impl Into<String>, diff: VariantDiff) {
        self.variants.insert(variant.into(), diff);
    }

    pub fn get(&self, variant: &str) -> Option<&VariantDiff> {
        self.variants.get(variant)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &VariantDiff)> {
        self.variants.iter().map(|(name, diff)| (name.as_str(), diff))
    }

    pub fn len(&self) -> usize {
        self.variants.len()
    }

    pub fn is_empty(&self) -> bool {
        self.variants.is_empty()
    }

    /// True if any variant has added, removed or updated packages
    pub fn has_changes(&self) -> bool {
        self.variants.values().any(VariantDiff::has_changes)
    }

    /// True if the report is non-empty and every variant is a first release
    pub fn is_initial_release(&self) -> bool {
        !self.variants.is_empty() && self.variants.values().all(|d| d.is_first_release)
    }
}

impl FromIterator<(String, VariantDiff)> for ChangeReport {
    fn from_iter<I: IntoIterator<Item = (String, VariantDiff)>>(iter: I) -> Self {
        Self {
            variants: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn diff_with_update() -> VariantDiff {
        VariantDiff {
            updated: vec![UpdatedPackage {
                name: "bash".to_string(),
                old_version: "5.1".to_string(),
                new_version: "5.2".to_string(),
            }],
            total_packages: 1,
            ..Default::default()
        }
    }

    #[test]
    fn test_variant_diff_has_changes() {
        assert!(!VariantDiff::default().has_changes());
        assert!(diff_with_update().has_changes());
    }

    #[test]
    fn test_report_preserves_insertion_order() {
        let mut report = ChangeReport::new();
        report.insert("debug", VariantDiff::default());
        report.insert("base", VariantDiff::default());
        report.insert("glibc", VariantDiff::default());

        let names: Vec<&str> = report.iter().map(|(name, _)| name).collect();
        assert_eq!(names, vec!["debug", "base", "glibc"]);
    }

    #[test]
    fn test_report_has_changes() {
        let mut report = ChangeReport::new();
        report.insert("base", VariantDiff::default());
        assert!(!report.has_changes());

        report.insert("debug", diff_with_update());
        assert!(report.has_changes());
    }

    #[test]
    fn test_report_is_initial_release() {
        let first = VariantDiff {
            is_first_release: true,
            ..Default::default()
        };

        assert!(!ChangeReport::new().is_initial_release());

        let mut report = ChangeReport::new();
        report.insert("base", first.clone());
        report.insert("debug", first.clone());
        assert!(report.is_initial_release());

        report.insert("glibc", VariantDiff::default());
        assert!(!report.is_initial_release());
    }

    #[test]
    fn test_package_entries_serialize_as_arrays() {
        let added = AddedPackage {
            name: "bash".to_string(),
            version: "5.2".to_string(),
            license: "GPL-3.0".to_string(),
        };
        let removed = RemovedPackage {
            name: "curl".to_string(),
            version: "8.0".to_string(),
        };
        assert_eq!(
            serde_json::to_string(&added).unwrap(),
            r#"["bash","5.2","GPL-3.0"]"#
        );
        assert_eq!(
            serde_json::to_string(&removed).unwrap(),
            r#"["curl","8.0"]"#
        );
    }
}
