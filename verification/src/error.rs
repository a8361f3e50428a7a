use std::fmt;
use thiserror::Error;

/// A disclosed identity attribute.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Attribute {
    Age,
    Nationality,
    Gender,
}

impl fmt::Display for Attribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Age => write!(f, "age"),
            Self::Nationality => write!(f, "nationality"),
            Self::Gender => write!(f, "gender"),
        }
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum VerificationError {
    #[error("invalid identity requirements: {0}")]
    InvalidRequirements(String),

    #[error("disclosure is missing the {0} attribute")]
    MissingAttribute(Attribute),

    #[error("age requirement not met: need at least {required}, disclosed {disclosed}")]
    AgeRequirementNotMet { required: u32, disclosed: u32 },

    #[error("nationality {0} is not allowed")]
    NationalityNotAllowed(String),

    #[error("gender requirement not met: need {required}, disclosed {disclosed}")]
    GenderMismatch { required: String, disclosed: String },
}
