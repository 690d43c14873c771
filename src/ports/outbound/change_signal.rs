use crate::shared::Result;

/// ChangeSignalWriter port for publishing the "any changes" flag to CI
pub trait ChangeSignalWriter {
    /// Records whether any variant changed
    ///
    /// # Errors
    /// Returns an error if the signal cannot be written
    fn write_signal(&self, changed: bool) -> Result<()>;
}
