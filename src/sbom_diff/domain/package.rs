use std::collections::BTreeMap;

/// Placeholder used for any field an SBOM entry does not provide
pub const UNKNOWN: &str = "unknown";

/// Package value object representing one tracked package of an image variant
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageRecord {
    name: String,
    version: String,
    license: String,
}

impl PackageRecord {
    pub fn new(
        name: impl Into<String>,
        version: impl Into<String>,
        license: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            version: version.into(),
            license: license.into(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    pub fn license(&self) -> &str {
        &self.license
    }
}

/// PackageMap - name-keyed package set for one variant and one side of a comparison
///
/// Backed by a `BTreeMap`, so iteration is ascending by name (byte-wise).
/// Inserting a record whose name is already present replaces the earlier one.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PackageMap {
    packages: BTreeMap<String, PackageRecord>,
}

impl PackageMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a record, returning the record it replaced (if any)
    pub fn insert(&mut self, record: PackageRecord) -> Option<PackageRecord> {
        self.packages.insert(record.name.clone(), record)
    }

    pub fn get(&self, name: &str) -> Option<&PackageRecord> {
        self.packages.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.packages.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.packages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.packages.is_empty()
    }

    /// Iterates records in ascending name order
    pub fn iter(&self) -> impl Iterator<Item = &PackageRecord> {
        self.packages.values()
    }
}

impl FromIterator<PackageRecord> for PackageMap {
    fn from_iter<I: IntoIterator<Item = PackageRecord>>(iter: I) -> Self {
        let mut map = PackageMap::new();
        map.extend(iter);
        map
    }
}

impl Extend<PackageRecord> for PackageMap {
    fn extend<I: IntoIterator<Item = PackageRecord>>(&mut self, iter: I) {
        for record in iter {
            self.insert(record);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_package_record_accessors() {
        let record = PackageRecord::new("bash", "5.2-r1", "GPL-3.0-or-later");
        assert_eq!(record.name(), "bash");
        assert_eq!(record.version(), "5.2-r1");
        assert_eq!(record.license(), "GPL-3.0-or-later");
    }

    #[test]
    fn test_package_map_last_write_wins() {
        let mut map = PackageMap::new();
        assert!(map.insert(PackageRecord::new("curl", "8.0", "MIT")).is_none());

        let replaced = map.insert(PackageRecord::new("curl", "8.1", "curl"));
        assert_eq!(replaced.unwrap().version(), "8.0");
        assert_eq!(map.len(), 1);
        assert_eq!(map.get("curl").unwrap().version(), "8.1");
        assert_eq!(map.get("curl").unwrap().license(), "curl");
    }

    #[test]
    fn test_package_map_iterates_in_name_order() {
        let map: PackageMap = vec![
            PackageRecord::new("zlib", "1.3", UNKNOWN),
            PackageRecord::new("Zstd", "1.5", UNKNOWN),
            PackageRecord::new("bash", "5.2", UNKNOWN),
        ]
        .into_iter()
        .collect();

        let names: Vec<&str> = map.iter().map(|r| r.name()).collect();
        // Byte-wise ordering puts uppercase before lowercase
        assert_eq!(names, vec!["Zstd", "bash", "zlib"]);
    }

    #[test]
    fn test_package_map_empty() {
        let map = PackageMap::new();
        assert!(map.is_empty());
        assert!(!map.contains("bash"));
        assert!(map.get("bash").is_none());
    }
}
