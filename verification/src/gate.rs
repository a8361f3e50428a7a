//! Evaluates disclosures against identity requirements.

use crate::disclosure::Disclosure;
use crate::error::{Attribute, VerificationError};
use crate::requirements::IdentityRequirements;

pub struct VerificationGate;

impl VerificationGate {
    /// Check a disclosure against the group's requirements.
    ///
    /// `None` and `ProofOfPersonhood` pass unconditionally. Otherwise every active
    /// sub-check must pass; the first failure is returned.
    pub fn evaluate(
        &self,
        requirements: &IdentityRequirements,
        disclosure: &Disclosure,
    ) -> Result<(), VerificationError> {
        let policy = requirements.policy;
        if !policy.checks_attributes() {
            return Ok(());
        }

        if policy.requires_age() {
            self.check_age(requirements.min_age, disclosure)?;
        }
        if policy.requires_nationality() {
            self.check_nationality(requirements, disclosure)?;
        }
        if policy.requires_gender() {
            self.check_gender(requirements, disclosure)?;
        }

        tracing::debug!(policy = ?policy, "disclosure satisfies identity requirements");
        Ok(())
    }

    fn check_age(&self, min_age: u32, disclosure: &Disclosure) -> Result<(), VerificationError> {
        let disclosed = disclosure
            .older_than
            .ok_or(VerificationError::MissingAttribute(Attribute::Age))?;
        if disclosed < min_age {
            return Err(VerificationError::AgeRequirementNotMet {
                required: min_age,
                disclosed,
            });
        }
        Ok(())
    }

    fn check_nationality(
        &self,
        requirements: &IdentityRequirements,
        disclosure: &Disclosure,
    ) -> Result<(), VerificationError> {
        let code = disclosure
            .nationality
            .as_ref()
            .ok_or(VerificationError::MissingAttribute(Attribute::Nationality))?;
        if requirements.allowed_nationalities.is_empty()
            || requirements.allowed_nationalities.contains(code)
        {
            Ok(())
        } else {
            Err(VerificationError::NationalityNotAllowed(code.clone()))
        }
    }

    fn check_gender(
        &self,
        requirements: &IdentityRequirements,
        disclosure: &Disclosure,
    ) -> Result<(), VerificationError> {
        let disclosed = disclosure
            .gender
            .as_ref()
            .ok_or(VerificationError::MissingAttribute(Attribute::Gender))?;
        let required = requirements.required_gender.as_deref().unwrap_or_default();
        if disclosed != required {
            return Err(VerificationError::GenderMismatch {
                required: required.to_string(),
                disclosed: disclosed.clone(),
            });
        }
        Ok(())
    }
}
