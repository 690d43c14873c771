use super::variant_aggregator::VariantSnapshot;

/// Decides whether a variant's previous snapshot counts as "no baseline"
///
/// `EmptyIsAbsent` treats a previous snapshot with zero packages as absent,
/// whether or not any documents were found for it. `Strict` only treats a
/// snapshot as absent when no document was found for the variant.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum AbsencePolicy {
    #[default]
    EmptyIsAbsent,
    Strict,
}

impl AbsencePolicy {
    pub fn from_strict_flag(strict: bool) -> Self {
        if strict {
            AbsencePolicy::Strict
        } else {
            AbsencePolicy::EmptyIsAbsent
        }
    }

    pub fn is_absent(&self, previous: &VariantSnapshot) -> bool {
        match self {
            AbsencePolicy::EmptyIsAbsent => previous.packages.is_empty(),
            AbsencePolicy::Strict => previous.is_absent(),
        }
    }
}
