/// An unparsed SBOM as delivered by a reader or release download
///
/// `identifier` is the bare file name or release asset name; it is what the
/// variant catalog classifies.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawSbom {
    pub identifier: String,
    pub content: Vec<u8>,
}

impl RawSbom {
    pub fn new(identifier: impl Into<String>, content: impl Into<Vec<u8>>) -> Self {
        Self {
            identifier: identifier.into(),
            content: content.into(),
        }
    }
}
