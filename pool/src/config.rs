//! Group manifest with TOML file support.
//!
//! A manifest carries everything `initialize` and `create_group` need, so a group
//! can be stood up from one file:
//!
//! ```toml
//! creator = "0x0101010101010101010101010101010101010101"
//! invitees = ["0x0202020202020202020202020202020202020202"]
//! fairness = "no_repeat_winners"
//!
//! [setup]
//! group_account = "0x1010101010101010101010101010101010101010"
//! label = "market stall circle"
//! # asset, reserve_market, reserve_receipt, verification_hub, fee_recipient, operator
//!
//! [schedule]
//! deposit_interval_secs = 604800
//! contribution = 100000000
//! total_periods = 10
//!
//! [identity]
//! policy = "age"
//! min_age = 18
//! ```

use crate::error::PoolError;
use crate::lifecycle::{CreateParams, FairnessMode, GroupSetup, Schedule};
use crate::logging::{self, LogFormat};
use rosca_types::{AccountId, TokenAmount};
use rosca_verification::IdentityRequirements;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupManifest {
    pub creator: AccountId,

    #[serde(default)]
    pub invitees: Vec<AccountId>,

    #[serde(default)]
    pub fairness: FairnessMode,

    pub setup: GroupSetup,

    pub schedule: ScheduleManifest,

    #[serde(default)]
    pub identity: IdentityRequirements,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Schedule as written in a manifest. TOML integers are 64-bit, so the
/// contribution is bounded by `u64` here.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleManifest {
    pub deposit_interval_secs: u64,

    /// Defaults to the deposit interval.
    #[serde(default)]
    pub distribution_interval_secs: Option<u64>,

    pub contribution: u64,

    pub total_periods: u32,
}

impl ScheduleManifest {
    pub fn to_schedule(&self) -> Schedule {
        Schedule {
            deposit_interval_secs: self.deposit_interval_secs,
            distribution_interval_secs: self
                .distribution_interval_secs
                .unwrap_or(self.deposit_interval_secs),
            contribution: TokenAmount::from(self.contribution),
            total_periods: self.total_periods,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log format: "human" or "json".
    #[serde(default = "default_log_format")]
    pub format: LogFormat,

    /// Log level filter: "trace", "debug", "info", "warn", "error".
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            format: default_log_format(),
            level: default_log_level(),
        }
    }
}

fn default_log_format() -> LogFormat {
    LogFormat::Human
}

fn default_log_level() -> String {
    "info".to_string()
}

impl GroupManifest {
    /// Load a manifest from a TOML file.
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, PoolError> {
        let content =
            std::fs::read_to_string(path).map_err(|e| PoolError::Config(e.to_string()))?;
        Self::from_toml_str(&content)
    }

    /// Parse a manifest from a TOML string.
    pub fn from_toml_str(s: &str) -> Result<Self, PoolError> {
        toml::from_str(s).map_err(|e| PoolError::Config(e.to_string()))
    }

    /// Serialize the manifest to a TOML string.
    pub fn to_toml_string(&self) -> Result<String, PoolError> {
        toml::to_string_pretty(self).map_err(|e| PoolError::Config(e.to_string()))
    }

    /// Write the manifest to a TOML file.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), PoolError> {
        std::fs::write(path, self.to_toml_string()?).map_err(|e| PoolError::Config(e.to_string()))
    }

    /// Check everything `initialize` and `create_group` would check.
    pub fn validate(&self) -> Result<(), PoolError> {
        self.setup.validate()?;
        self.schedule.to_schedule().validate()?;
        self.identity
            .validate()
            .map_err(|e| PoolError::InvalidConfiguration(e.to_string()))
    }

    /// Install the global subscriber described by the `[logging]` section.
    pub fn init_logging(&self) -> Result<(), PoolError> {
        logging::init_logging(self.logging.format, &self.logging.level)
    }

    pub fn create_params(&self) -> Result<CreateParams, PoolError> {
        self.validate()?;
        Ok(CreateParams {
            creator: self.creator,
            schedule: self.schedule.to_schedule(),
            identity: self.identity.clone(),
            fairness: self.fairness,
            invitees: self.invitees.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rosca_verification::VerificationPolicy;

    const MANIFEST: &str = r#"
creator = "0x0101010101010101010101010101010101010101"
invitees = [
    "0x0202020202020202020202020202020202020202",
    "0x0303030303030303030303030303030303030303",
]

[setup]
group_account = "0x1010101010101010101010101010101010101010"
label = "circle"
asset = "0x2020202020202020202020202020202020202020"
reserve_market = "0x3030303030303030303030303030303030303030"
reserve_receipt = "0x4040404040404040404040404040404040404040"
verification_hub = "0x5050505050505050505050505050505050505050"
fee_recipient = "0x6060606060606060606060606060606060606060"
operator = "0x7070707070707070707070707070707070707070"

[schedule]
deposit_interval_secs = 3600
contribution = 100
total_periods = 3
"#;

    #[test]
    fn minimal_manifest_uses_defaults() {
        let m = GroupManifest::from_toml_str(MANIFEST).unwrap();
        assert_eq!(m.invitees.len(), 2);
        assert_eq!(m.fairness, FairnessMode::OperatorTrust);
        assert_eq!(m.identity.policy, VerificationPolicy::None);
        assert_eq!(m.logging.format, LogFormat::Human);
        assert_eq!(m.logging.level, "info");

        let schedule = m.schedule.to_schedule();
        assert_eq!(schedule.distribution_interval_secs, 3600);
        assert_eq!(schedule.contribution, TokenAmount::new(100));
        assert!(m.validate().is_ok());
    }

    #[test]
    fn identity_and_fairness_sections_parse() {
        let toml = format!(
            "fairness = \"no_repeat_winners\"\n{MANIFEST}\n[identity]\npolicy = \"age_and_nationality\"\nmin_age = 21\nallowed_nationalities = [\"KEN\", \"UGA\"]\n\n[logging]\nformat = \"json\"\nlevel = \"debug\"\n"
        );
        let m = GroupManifest::from_toml_str(&toml).unwrap();
        assert_eq!(m.fairness, FairnessMode::NoRepeatWinners);
        assert_eq!(m.identity.policy, VerificationPolicy::AgeAndNationality);
        assert_eq!(m.identity.min_age, 21);
        assert!(m.identity.allowed_nationalities.contains("UGA"));
        assert_eq!(m.logging.format, LogFormat::Json);
    }

    #[test]
    fn bad_account_is_config_error() {
        let toml = MANIFEST.replace("0x0101010101010101010101010101010101010101", "0x01");
        assert!(matches!(
            GroupManifest::from_toml_str(&toml),
            Err(PoolError::Config(_))
        ));
    }

    #[test]
    fn invalid_schedule_fails_validation() {
        let toml = MANIFEST.replace("total_periods = 3", "total_periods = 0");
        let m = GroupManifest::from_toml_str(&toml).unwrap();
        assert!(matches!(
            m.create_params(),
            Err(PoolError::InvalidConfiguration(_))
        ));
    }

    #[test]
    fn logging_section_drives_subscriber_setup() {
        if std::env::var_os("RUST_LOG").is_some() {
            return;
        }
        let toml = format!("{MANIFEST}\n[logging]\nformat = \"json\"\nlevel = \"rosca_pool=loud\"\n");
        let m = GroupManifest::from_toml_str(&toml).unwrap();
        assert!(matches!(m.init_logging(), Err(PoolError::Logging(_))));
    }

    #[test]
    fn toml_roundtrip() {
        let m = GroupManifest::from_toml_str(MANIFEST).unwrap();
        let reparsed = GroupManifest::from_toml_str(&m.to_toml_string().unwrap()).unwrap();
        assert_eq!(m, reparsed);
    }
}
