use crate::sbom_diff::domain::VariantCatalog;
use crate::sbom_diff::services::AbsencePolicy;

/// Default locator prefix identifying packages from the Wolfi APK repository
pub const DEFAULT_LOCATOR_PREFIX: &str = "pkg:apk/wolfi/";

/// Default SBOM file name suffix
pub const DEFAULT_FILE_SUFFIX: &str = ".json";

/// DiffSettings - comparison parameters shared by both use cases
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiffSettings {
    /// Configured variants, in changelog order
    pub catalog: VariantCatalog,
    /// Package-manager locator prefix a package must carry to be tracked
    pub locator_prefix: String,
    /// File name suffix of SBOM files
    pub file_suffix: String,
    /// How an empty previous snapshot is interpreted
    pub absence_policy: AbsencePolicy,
}

impl Default for DiffSettings {
    fn default() -> Self {
        Self {
            catalog: VariantCatalog::standard(),
            locator_prefix: DEFAULT_LOCATOR_PREFIX.to_string(),
            file_suffix: DEFAULT_FILE_SUFFIX.to_string(),
            absence_policy: AbsencePolicy::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_settings() {
        let settings = DiffSettings::default();
        assert_eq!(settings.catalog, VariantCatalog::standard());
        assert_eq!(settings.locator_prefix, "pkg:apk/wolfi/");
        assert_eq!(settings.file_suffix, ".json");
        assert_eq!(settings.absence_policy, AbsencePolicy::EmptyIsAbsent);
    }
}
