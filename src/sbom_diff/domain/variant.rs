use crate::shared::Result;
use std::collections::HashSet;

/// A named image variant and the source-name prefixes that belong to it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VariantSpec {
    name: String,
    title: String,
    prefixes: Vec<String>,
}

impl VariantSpec {
    pub fn new(name: impl Into<String>, title: impl Into<String>, prefixes: Vec<String>) -> Self {
        Self {
            name: name.into(),
            title: title.into(),
            prefixes,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Heading used for this variant in the changelog
    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn prefixes(&self) -> &[String] {
        &self.prefixes
    }
}

/// VariantCatalog - ordered list of configured variants
///
/// Declaration order is the order of the changelog sections and of the
/// serialized change report. The first variant is the primary one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VariantCatalog {
    variants: Vec<VariantSpec>,
}

impl VariantCatalog {
    /// Creates a catalog after validating it
    ///
    /// # Errors
    /// - No variants
    /// - Duplicate or empty variant names
    /// - A variant without prefixes, or with an empty prefix
    pub fn new(variants: Vec<VariantSpec>) -> Result<Self> {
        if variants.is_empty() {
            anyhow::bail!("At least one variant must be configured");
        }

        let mut seen = HashSet::new();
        for variant in &variants {
            if variant.name.trim().is_empty() {
                anyhow::bail!("Variant names must not be empty");
            }
            if !seen.insert(variant.name.as_str()) {
                anyhow::bail!("Duplicate variant name: '{}'", variant.name);
            }
            if variant.prefixes.is_empty() {
                anyhow::bail!("Variant '{}' has no source prefixes", variant.name);
            }
            if variant.prefixes.iter().any(|p| p.is_empty()) {
                anyhow::bail!("Variant '{}' has an empty source prefix", variant.name);
            }
        }

        Ok(Self { variants })
    }

    /// The stock catalog: base (with the legacy `main_` alias), glibc and debug
    pub fn standard() -> Self {
        Self {
            variants: vec![
                VariantSpec::new(
                    "base",
                    "Production Image",
                    vec!["base_".to_string(), "main_".to_string()],
                ),
                VariantSpec::new("glibc", "glibc Image", vec!["glibc_".to_string()]),
                VariantSpec::new("debug", "Debug Image", vec!["debug_".to_string()]),
            ],
        }
    }

    pub fn variants(&self) -> &[VariantSpec] {
        &self.variants
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.variants.iter().map(|v| v.name())
    }

    pub fn primary(&self) -> &VariantSpec {
        // Non-empty by construction
        &self.variants[0]
    }

    pub fn get(&self, name: &str) -> Option<&VariantSpec> {
        self.variants.iter().find(|v| v.name == name)
    }

    /// Returns the changelog title for a variant, falling back to its name
    pub fn title_for<'a>(&'a self, name: &'a str) -> &'a str {
        self.get(name).map(|v| v.title()).unwrap_or(name)
    }

    /// Assigns a source identifier to a variant by longest prefix match
    ///
    /// Ties between equally long prefixes go to the pair declared first.
    /// Returns `None` when no prefix matches.
    pub fn classify(&self, identifier: &str) -> Option<&VariantSpec> {
        let mut best: Option<(&VariantSpec, usize)> = None;
        for variant in &self.variants {
            for prefix in &variant.prefixes {
                if !identifier.starts_with(prefix.as_str()) {
                    continue;
                }
                if best.map_or(true, |(_, len)| prefix.len() > len) {
                    best = Some((variant, prefix.len()));
                }
            }
        }
        best.map(|(variant, _)| variant)
    }
}

impl Default for VariantCatalog {
    fn default() -> Self {
        Self::standard()
    }
}
