//! Attributes disclosed by the verification provider.

use serde::{Deserialize, Serialize};

/// What the provider revealed about the claimed account. Attributes the proof
/// did not disclose are `None`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Disclosure {
    /// Proven lower bound on the holder's age.
    pub older_than: Option<u32>,
    /// ISO 3166 alpha-3 nationality code.
    pub nationality: Option<String>,
    pub gender: Option<String>,
}

impl Disclosure {
    pub fn with_age(mut self, older_than: u32) -> Self {
        self.older_than = Some(older_than);
        self
    }

    pub fn with_nationality(mut self, code: impl Into<String>) -> Self {
        self.nationality = Some(code.into());
        self
    }

    pub fn with_gender(mut self, code: impl Into<String>) -> Self {
        self.gender = Some(code.into());
        self
    }
}
