/// Domain layer: SBOM normalization and per-variant package diffing
///
/// Everything in this module is pure and synchronous; it performs no I/O.
pub mod domain;
pub mod services;
