use super::absence_policy::AbsencePolicy;
use super::variant_aggregator::{Aggregation, VariantSnapshot};
use crate::sbom_diff::domain::{
    AddedPackage, ChangeReport, PackageMap, PackageRecord, RemovedPackage, UpdatedPackage,
    VariantCatalog, VariantDiff,
};

/// Differ - computes added, removed and updated packages for one variant
pub struct Differ;

impl Differ {
    /// Compares the old and new package maps of a variant
    ///
    /// When `old_map_was_absent` is true there is no baseline to compare
    /// against: every new package is reported as added and the diff is
    /// marked as a first release.
    ///
    /// Updates are detected on the version string only; license changes
    /// alone are not reported. All three lists are sorted ascending by name.
    pub fn diff(old: &PackageMap, new: &PackageMap, old_map_was_absent: bool) -> VariantDiff {
        if old_map_was_absent {
            let mut added: Vec<AddedPackage> = new.iter().map(to_added).collect();
            added.sort_by(|a, b| a.name.cmp(&b.name));
            return VariantDiff {
                added,
                removed: Vec::new(),
                updated: Vec::new(),
                total_packages: new.len(),
                is_first_release: true,
            };
        }

        let mut added = Vec::new();
        let mut updated = Vec::new();
        for record in new.iter() {
            match old.get(record.name()) {
                None => added.push(to_added(record)),
                Some(previous) if previous.version() != record.version() => {
                    updated.push(UpdatedPackage {
                        name: record.name().to_string(),
                        old_version: previous.version().to_string(),
                        new_version: record.version().to_string(),
                    })
                }
                Some(_) => {}
            }
        }

        let mut removed: Vec<RemovedPackage> = old
            .iter()
            .filter(|record| !new.contains(record.name()))
            .map(|record| RemovedPackage {
                name: record.name().to_string(),
                version: record.version().to_string(),
            })
            .collect();

        added.sort_by(|a, b| a.name.cmp(&b.name));
        removed.sort_by(|a, b| a.name.cmp(&b.name));
        updated.sort_by(|a, b| a.name.cmp(&b.name));

        VariantDiff {
            added,
            removed,
            updated,
            total_packages: new.len(),
            is_first_release: false,
        }
    }

    /// Diffs every catalog variant and collects the results in catalog order
    ///
    /// A variant missing from either aggregation is treated as an empty,
    /// sourceless snapshot.
    pub fn diff_all(
        catalog: &VariantCatalog,
        previous: &Aggregation,
        current: &Aggregation,
        policy: AbsencePolicy,
    ) -> ChangeReport {
        let empty = VariantSnapshot::default();
        catalog
            .names()
            .map(|name| {
                let old = previous.snapshot(name).unwrap_or(&empty);
                let new = current.snapshot(name).unwrap_or(&empty);
                let diff = Self::diff(&old.packages, &new.packages, policy.is_absent(old));
                (name.to_string(), diff)
            })
            .collect()
    }
}

fn to_added(record: &PackageRecord) -> AddedPackage {
    AddedPackage {
        name: record.name().to_string(),
        version: record.version().to_string(),
        license: record.license().to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sbom_diff::domain::UNKNOWN;
    use std::collections::HashSet;

    fn map(records: &[(&str, &str, &str)]) -> PackageMap {
        records
            .iter()
            .map(|(name, version, license)| PackageRecord::new(*name, *version, *license))
            .collect()
    }

    #[test]
    fn test_first_release_reports_everything_as_added() {
        let old = PackageMap::new();
        let new = map(&[("bash", "5.1", UNKNOWN)]);

        let diff = Differ::diff(&old, &new, true);

        assert!(diff.is_first_release);
        assert_eq!(
            diff.added,
            vec![AddedPackage {
                name: "bash".to_string(),
                version: "5.1".to_string(),
                license: "unknown".to_string(),
            }]
        );
        assert!(diff.removed.is_empty());
        assert!(diff.updated.is_empty());
        assert_eq!(diff.total_packages, 1);
    }

    #[test]
    fn test_version_change_is_an_update() {
        let old = map(&[("bash", "5.1", "GPL")]);
        let new = map(&[("bash", "5.2", "GPL")]);

        let diff = Differ::diff(&old, &new, false);

        assert_eq!(
            diff.updated,
            vec![UpdatedPackage {
                name: "bash".to_string(),
                old_version: "5.1".to_string(),
                new_version: "5.2".to_string(),
            }]
        );
        assert!(diff.added.is_empty());
        assert!(diff.removed.is_empty());
        assert!(!diff.is_first_release);
    }

    #[test]
    fn test_everything_removed_when_new_is_empty() {
        let old = map(&[("curl", "8.0", UNKNOWN)]);
        let new = PackageMap::new();

        let diff = Differ::diff(&old, &new, false);

        assert_eq!(
            diff.removed,
            vec![RemovedPackage {
                name: "curl".to_string(),
                version: "8.0".to_string(),
            }]
        );
        assert_eq!(diff.total_packages, 0);
        assert!(!diff.is_first_release);
    }

    #[test]
    fn test_license_change_alone_is_not_an_update() {
        let old = map(&[("zlib", "1.3", "Zlib")]);
        let new = map(&[("zlib", "1.3", "MIT")]);

        let diff = Differ::diff(&old, &new, false);
        assert!(!diff.has_changes());
    }

    #[test]
    fn test_identical_maps_have_no_changes() {
        let packages = map(&[
            ("bash", "5.2", "GPL"),
            ("curl", "8.5", "curl"),
            ("zlib", "1.3", "Zlib"),
        ]);

        let diff = Differ::diff(&packages, &packages, false);

        assert!(diff.added.is_empty());
        assert!(diff.removed.is_empty());
        assert!(diff.updated.is_empty());
        assert_eq!(diff.total_packages, 3);
    }

    #[test]
    fn test_mixed_changes_are_sorted_and_disjoint() {
        let old = map(&[
            ("zlib", "1.2", UNKNOWN),
            ("openssl", "3.1", UNKNOWN),
            ("bash", "5.1", UNKNOWN),
            ("ncurses", "6.4", UNKNOWN),
            ("busybox", "1.36", UNKNOWN),
        ]);
        let new = map(&[
            ("zlib", "1.3", UNKNOWN),
            ("bash", "5.2", UNKNOWN),
            ("ncurses", "6.4", UNKNOWN),
            ("wget", "1.21", UNKNOWN),
            ("curl", "8.5", UNKNOWN),
        ]);

        let diff = Differ::diff(&old, &new, false);

        let added: Vec<&str> = diff.added.iter().map(|p| p.name.as_str()).collect();
        let removed: Vec<&str> = diff.removed.iter().map(|p| p.name.as_str()).collect();
        let updated: Vec<&str> = diff.updated.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(added, vec!["curl", "wget"]);
        assert_eq!(removed, vec!["busybox", "openssl"]);
        assert_eq!(updated, vec!["bash", "zlib"]);

        let added_set: HashSet<&str> = added.iter().copied().collect();
        assert!(removed.iter().all(|name| !added_set.contains(name)));
        for update in &diff.updated {
            assert_ne!(update.old_version, update.new_version);
            assert!(old.contains(&update.name) && new.contains(&update.name));
        }
        assert_eq!(diff.total_packages, 5);
    }

    #[test]
    fn test_lists_are_strictly_ascending() {
        let old = map(&[("b", "1", UNKNOWN), ("a", "1", UNKNOWN), ("C", "1", UNKNOWN)]);
        let new = map(&[
            ("b", "2", UNKNOWN),
            ("a", "2", UNKNOWN),
            ("C", "2", UNKNOWN),
            ("d", "1", UNKNOWN),
            ("B", "1", UNKNOWN),
        ]);

        let diff = Differ::diff(&old, &new, false);

        assert!(diff.updated.windows(2).all(|w| w[0].name < w[1].name));
        assert!(diff.added.windows(2).all(|w| w[0].name < w[1].name));
        let updated: Vec<&str> = diff.updated.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(updated, vec!["C", "a", "b"]);
    }

    #[test]
    fn test_absent_flag_overrides_existing_old_map() {
        let old = map(&[("bash", "5.1", UNKNOWN)]);
        let new = map(&[("bash", "5.2", UNKNOWN)]);

        let diff = Differ::diff(&old, &new, true);

        assert!(diff.is_first_release);
        assert_eq!(diff.added.len(), 1);
        assert!(diff.updated.is_empty());
    }

    fn snapshot(records: &[(&str, &str, &str)], source_count: usize) -> VariantSnapshot {
        VariantSnapshot {
            packages: map(records),
            source_count,
        }
    }

    #[test]
    fn test_diff_all_covers_every_variant_in_order() {
        let catalog = VariantCatalog::standard();
        let mut previous = Aggregation::absent(&catalog);
        previous
            .snapshots
            .insert("base".to_string(), snapshot(&[("bash", "5.1", "GPL")], 1));
        let mut current = Aggregation::absent(&catalog);
        current
            .snapshots
            .insert("base".to_string(), snapshot(&[("bash", "5.2", "GPL")], 1));
        current
            .snapshots
            .insert("debug".to_string(), snapshot(&[("gdb", "14", "GPL")], 1));

        let report = Differ::diff_all(&catalog, &previous, &current, AbsencePolicy::default());

        let names: Vec<&str> = report.iter().map(|(name, _)| name).collect();
        assert_eq!(names, vec!["base", "glibc", "debug"]);
        assert_eq!(report.get("base").unwrap().updated.len(), 1);
        assert!(!report.get("base").unwrap().is_first_release);
        assert!(report.get("glibc").unwrap().is_first_release);
        assert_eq!(report.get("glibc").unwrap().total_packages, 0);
        assert!(report.get("debug").unwrap().is_first_release);
        assert_eq!(report.get("debug").unwrap().added.len(), 1);
    }

    #[test]
    fn test_diff_all_strict_policy_keeps_present_empty_baseline() {
        let catalog = VariantCatalog::standard();
        let mut previous = Aggregation::absent(&catalog);
        previous.snapshots.insert("base".to_string(), snapshot(&[], 1));
        let mut current = Aggregation::absent(&catalog);
        current
            .snapshots
            .insert("base".to_string(), snapshot(&[("bash", "5.2", "GPL")], 1));

        let lenient = Differ::diff_all(&catalog, &previous, &current, AbsencePolicy::EmptyIsAbsent);
        let strict = Differ::diff_all(&catalog, &previous, &current, AbsencePolicy::Strict);

        assert!(lenient.get("base").unwrap().is_first_release);
        let base = strict.get("base").unwrap();
        assert!(!base.is_first_release);
        assert_eq!(base.added.len(), 1);
    }

    #[test]
    fn test_both_empty_and_present() {
        let diff = Differ::diff(&PackageMap::new(), &PackageMap::new(), false);
        assert!(!diff.has_changes());
        assert!(!diff.is_first_release);
        assert_eq!(diff.total_packages, 0);
    }
}
