use super::document_normalizer::DocumentNormalizer;
use super::package_filter::PackageFilter;
use crate::sbom_diff::domain::{PackageMap, RawSbom, SbomDocument, VariantCatalog};
use indexmap::IndexMap;

/// Packages collected for one variant on one side of the comparison
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VariantSnapshot {
    pub packages: PackageMap,
    /// Number of successfully parsed documents that contributed to this variant
    pub source_count: usize,
}

impl VariantSnapshot {
    /// True if no document was located for the variant at all
    pub fn is_absent(&self) -> bool {
        self.source_count == 0
    }
}

/// A source that could not be parsed and contributed no packages
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedSource {
    pub identifier: String,
    pub reason: String,
}

/// Result of aggregating a set of sources
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Aggregation {
    /// One snapshot per catalog variant, in catalog order
    pub snapshots: IndexMap<String, VariantSnapshot>,
    pub skipped: Vec<SkippedSource>,
    /// Identifiers that matched no variant prefix
    pub unclassified: Vec<String>,
}

impl Aggregation {
    /// Empty snapshots for every variant, as if no sources existed
    pub fn absent(catalog: &VariantCatalog) -> Self {
        Self {
            snapshots: catalog
                .names()
                .map(|name| (name.to_string(), VariantSnapshot::default()))
                .collect(),
            ..Default::default()
        }
    }

    pub fn snapshot(&self, variant: &str) -> Option<&VariantSnapshot> {
        self.snapshots.get(variant)
    }

    /// Total number of packages across every variant
    pub fn package_count(&self) -> usize {
        self.snapshots.values().map(|s| s.packages.len()).sum()
    }
}

/// VariantAggregator - merges the packages of many SBOMs into one map per variant
pub struct VariantAggregator<'a> {
    catalog: &'a VariantCatalog,
    filter: &'a PackageFilter,
}

impl<'a> VariantAggregator<'a> {
    pub fn new(catalog: &'a VariantCatalog, filter: &'a PackageFilter) -> Self {
        Self { catalog, filter }
    }

    /// Parses, normalizes, filters and merges the sources
    ///
    /// Sources are merged in ascending identifier order (stable for equal
    /// identifiers), so a package listed by several documents of the same
    /// variant resolves to the record of the last document in that order,
    /// independent of the order the sources were delivered in.
    pub fn aggregate(&self, sources: &[RawSbom]) -> Aggregation {
        self.aggregate_with_progress(sources, |_, _, _| {})
    }

    /// Same as [`aggregate`](Self::aggregate), calling `on_source(current, total, identifier)`
    /// as each source is taken up, in merge order
    pub fn aggregate_with_progress<F>(&self, sources: &[RawSbom], mut on_source: F) -> Aggregation
    where
        F: FnMut(usize, usize, &str),
    {
        let mut ordered: Vec<&RawSbom> = sources.iter().collect();
        ordered.sort_by(|a, b| a.identifier.cmp(&b.identifier));
        let total = ordered.len();

        let mut aggregation = Aggregation::absent(self.catalog);
        let mut parsed: Vec<(&str, SbomDocument)> = Vec::new();

        for (idx, source) in ordered.into_iter().enumerate() {
            on_source(idx + 1, total, &source.identifier);

            let Some(variant) = self.catalog.classify(&source.identifier) else {
                aggregation.unclassified.push(source.identifier.clone());
                continue;
            };

            match SbomDocument::parse(&source.content) {
                Ok(document) => parsed.push((variant.name(), document)),
                Err(e) => aggregation.skipped.push(SkippedSource {
                    identifier: source.identifier.clone(),
                    reason: e.to_string(),
                }),
            }
        }

        for (name, snapshot) in aggregation.snapshots.iter_mut() {
            *snapshot = parsed
                .iter()
                .filter(|(variant, _)| *variant == name.as_str())
                .fold(VariantSnapshot::default(), |mut acc, (_, document)| {
                    let candidates = DocumentNormalizer::normalize(document);
                    acc.packages.extend(
                        self.filter
                            .filter_candidates(candidates)
                            .into_iter()
                            .map(|c| c.record),
                    );
                    acc.source_count += 1;
                    acc
                });
        }

        aggregation
    }
}
