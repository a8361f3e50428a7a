//! The nine verification policy levels.

use serde::{Deserialize, Serialize};

/// Which identity attributes an account must prove before it may deposit.
///
/// Levels are numbered 0..=8 in declaration order; the number is what external
/// tooling passes around.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VerificationPolicy {
    /// No verification at all.
    #[default]
    None,
    /// Any valid proof of personhood; no attribute checks.
    ProofOfPersonhood,
    Age,
    Nationality,
    Gender,
    AgeAndNationality,
    AgeAndGender,
    NationalityAndGender,
    AgeNationalityAndGender,
}

impl VerificationPolicy {
    pub fn level(&self) -> u8 {
        *self as u8
    }

    /// Whether a member must be verified before depositing.
    pub fn requires_verification(&self) -> bool {
        *self != Self::None
    }

    /// Whether disclosures are checked attribute by attribute.
    pub fn checks_attributes(&self) -> bool {
        self.requires_age() || self.requires_nationality() || self.requires_gender()
    }

    pub fn requires_age(&self) -> bool {
        matches!(
            self,
            Self::Age | Self::AgeAndNationality | Self::AgeAndGender | Self::AgeNationalityAndGender
        )
    }

    pub fn requires_nationality(&self) -> bool {
        matches!(
            self,
            Self::Nationality
                | Self::AgeAndNationality
                | Self::NationalityAndGender
                | Self::AgeNationalityAndGender
        )
    }

    pub fn requires_gender(&self) -> bool {
        matches!(
            self,
            Self::Gender
                | Self::AgeAndGender
                | Self::NationalityAndGender
                | Self::AgeNationalityAndGender
        )
    }
}
