//! Identity requirements fixed at group creation.

use crate::error::VerificationError;
use crate::policy::VerificationPolicy;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

const CONFIG_ID_DOMAIN: &[u8] = b"rosca/verification-config/v1";

/// The policy level plus the parameters its active checks need.
///
/// Parameters for inactive checks are carried but ignored: `min_age` only matters
/// when the policy requires age, and so on.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdentityRequirements {
    #[serde(default)]
    pub policy: VerificationPolicy,

    /// Minimum disclosed "older than" age.
    #[serde(default)]
    pub min_age: u32,

    /// ISO 3166 alpha-3 codes. Empty means any nationality is accepted.
    #[serde(default)]
    pub allowed_nationalities: BTreeSet<String>,

    /// Required gender code (e.g. `"F"`).
    #[serde(default)]
    pub required_gender: Option<String>,
}

impl IdentityRequirements {
    /// Requirements that check nothing.
    pub fn none() -> Self {
        Self::default()
    }

    pub fn with_policy(policy: VerificationPolicy) -> Self {
        Self {
            policy,
            ..Self::default()
        }
    }

    pub fn min_age(mut self, age: u32) -> Self {
        self.min_age = age;
        self
    }

    pub fn allow_nationality(mut self, code: impl Into<String>) -> Self {
        self.allowed_nationalities.insert(code.into());
        self
    }

    pub fn required_gender(mut self, code: impl Into<String>) -> Self {
        self.required_gender = Some(code.into());
        self
    }

    /// Check that every active sub-check has the parameters it needs.
    pub fn validate(&self) -> Result<(), VerificationError> {
        if self.policy.requires_age() && self.min_age == 0 {
            return Err(VerificationError::InvalidRequirements(
                "age policy needs a minimum age above zero".into(),
            ));
        }
        if self.policy.requires_nationality()
            && self.allowed_nationalities.iter().any(|c| c.trim().is_empty())
        {
            return Err(VerificationError::InvalidRequirements(
                "nationality codes must not be blank".into(),
            ));
        }
        if self.policy.requires_gender()
            && self
                .required_gender
                .as_deref()
                .map_or(true, |g| g.trim().is_empty())
        {
            return Err(VerificationError::InvalidRequirements(
                "gender policy needs a required gender code".into(),
            ));
        }
        Ok(())
    }

    /// Stable identifier of what the verification provider must check.
    ///
    /// Only parameters of active checks contribute, so two groups with the same
    /// effective requirements share an identifier.
    pub fn config_id(&self) -> ConfigId {
        let level = [self.policy.level()];
        let mut parts: Vec<Vec<u8>> = Vec::new();
        if self.policy.requires_age() {
            parts.push(self.min_age.to_be_bytes().to_vec());
        }
        if self.policy.requires_nationality() {
            for code in &self.allowed_nationalities {
                parts.push((code.len() as u32).to_be_bytes().to_vec());
                parts.push(code.as_bytes().to_vec());
            }
        }
        if self.policy.requires_gender() {
            if let Some(gender) = &self.required_gender {
                parts.push(gender.as_bytes().to_vec());
            }
        }

        let mut slices: Vec<&[u8]> = vec![CONFIG_ID_DOMAIN, &level];
        slices.extend(parts.iter().map(Vec::as_slice));
        ConfigId(rosca_crypto::blake2b_256_multi(&slices))
    }
}

/// Digest identifying a set of identity requirements.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ConfigId([u8; 32]);

impl ConfigId {
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }
}

impl fmt::Debug for ConfigId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ConfigId({}\u{2026})", hex::encode(&self.0[..4]))
    }
}

impl fmt::Display for ConfigId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", hex::encode(self.0))
    }
}
