mod absence_policy;
mod differ;
mod document_normalizer;
mod package_filter;
mod variant_aggregator;

pub use absence_policy::AbsencePolicy;
pub use differ::Differ;
pub use document_normalizer::{CandidatePackage, DocumentNormalizer};
pub use package_filter::PackageFilter;
pub use variant_aggregator::{Aggregation, SkippedSource, VariantAggregator, VariantSnapshot};
