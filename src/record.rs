//! The fixed-width record abstraction shared by all four line types.

use crate::error::{FepError, Result};
use crate::validation::Validatable;

/// A validated record that encodes to one 100-character line.
pub trait Record: Validatable {
    /// Marker plus the reserved-zero segment, e.g. `"FH000"`.
    const MARKER: &'static str;

    /// Name used in diagnostics.
    const NAME: &'static str;

    /// Lays out the line. Only called on a valid record.
    fn layout(&self) -> String;

    /// Encodes the record, failing with every violation if it is invalid.
    fn encode(&self) -> Result<String> {
        let violations = self.validate();
        if !violations.is_empty() {
            return Err(FepError::Encoding {
                record: Self::NAME,
                violations,
            });
        }
        Ok(self.layout())
    }
}
