pub mod package;
pub mod raw_sbom;
pub mod sbom_document;
pub mod variant;
pub mod variant_diff;

pub use package::{PackageMap, PackageRecord, UNKNOWN};
pub use raw_sbom::RawSbom;
pub use sbom_document::{ExternalRef, SbomDocument, SbomEntry};
pub use variant::{VariantCatalog, VariantSpec};
pub use variant_diff::{AddedPackage, ChangeReport, RemovedPackage, UpdatedPackage, VariantDiff};
