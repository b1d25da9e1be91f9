//! Attribute access properties.
//!
//! Settings that change how values are laid out on disk travel with each
//! call instead of living in process-wide state.

/// Attribute read/write properties.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttrProps {
    /// Field names of the two-member compound type that stores complex
    /// numbers, as `(real, imaginary)`.
    pub complex_names: (String, String),
}

impl Default for AttrProps {
    fn default() -> Self {
        Self {
            complex_names: ("real".to_string(), "imag".to_string()),
        }
    }
}

impl AttrProps {
    /// Create default attribute properties.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the compound field names used for complex values.
    pub fn complex_names(mut self, real: impl Into<String>, imag: impl Into<String>) -> Self {
        self.complex_names = (real.into(), imag.into());
        self
    }

    /// Whether a two-field compound with these names holds a complex value.
    pub fn is_complex_pair(&self, first: &str, second: &str) -> bool {
        self.complex_names.0 == first && self.complex_names.1 == second
    }
}
