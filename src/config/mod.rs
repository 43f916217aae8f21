pub mod port;
pub mod threshold;
pub mod version;

use crate::constants::{NEWLINE_TRIGGER_LENGTH, SCALENE_DATE, SCALENE_PORT, SCALENE_VERSION};
use crate::utils::error::Result;
use crate::utils::validation::{validate_range, validate_release_date, validate_version, Validate};
use serde::{Deserialize, Serialize};

pub use port::UiPort;
pub use threshold::SyncedThreshold;
pub use version::VersionIdentity;

static CURRENT: ScaleneConfig = ScaleneConfig::new(
    VersionIdentity::new(SCALENE_VERSION, SCALENE_DATE),
    match UiPort::new(SCALENE_PORT) {
        Some(port) => port,
        None => panic!("SCALENE_PORT must be non-zero"),
    },
    SyncedThreshold::new(NEWLINE_TRIGGER_LENGTH),
);

/// Read-only identity and coordination values for the whole process.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScaleneConfig {
    version: VersionIdentity,
    ui_port: UiPort,
    threshold: SyncedThreshold,
}

/// Flat view of [`ScaleneConfig`] used for `show` output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfigSnapshot {
    pub version: String,
    pub release_date: String,
    pub ui_port: u16,
    pub newline_trigger_length: u64,
    pub sampleheap_newline: u64,
}

impl ScaleneConfig {
    /// Assembles a record from parts. Values built this way are not checked
    /// until [`Validate::validate`] is called.
    pub const fn new(
        version: VersionIdentity,
        ui_port: UiPort,
        threshold: SyncedThreshold,
    ) -> Self {
        Self {
            version,
            ui_port,
            threshold,
        }
    }

    /// The build's configuration. Every call returns the same instance.
    pub fn current() -> &'static ScaleneConfig {
        &CURRENT
    }

    pub fn version(&self) -> &VersionIdentity {
        &self.version
    }

    pub fn ui_port(&self) -> UiPort {
        self.ui_port
    }

    pub fn threshold(&self) -> SyncedThreshold {
        self.threshold
    }

    pub fn snapshot(&self) -> ConfigSnapshot {
        ConfigSnapshot {
            version: self.version.version().to_string(),
            release_date: self.version.release_date().to_string(),
            ui_port: self.ui_port.get(),
            newline_trigger_length: self.threshold.trigger_length(),
            sampleheap_newline: self.threshold.rollover(),
        }
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(&self.snapshot())?)
    }

    pub fn to_toml(&self) -> Result<String> {
        Ok(toml::to_string(&self.snapshot())?)
    }
}

impl Validate for ScaleneConfig {
    fn validate(&self) -> Result<()> {
        validate_version("identity.version", self.version.version())?;
        validate_release_date("identity.release_date", self.version.release_date())?;
        // rollover() is trigger_length + 1, so u64::MAX would overflow it
        validate_range(
            "sampleheap.trigger_length",
            self.threshold.trigger_length(),
            1,
            u64::MAX - 1,
        )?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::error::ConfigError;

    #[test]
    fn test_current_is_same_instance() {
        let first = ScaleneConfig::current();
        let second = ScaleneConfig::current();
        assert!(std::ptr::eq(first, second));
        assert_eq!(first, second);
    }

    fn build(version: &'static str, date: &'static str, trigger_length: u64) -> ScaleneConfig {
        ScaleneConfig::new(
            VersionIdentity::new(version, date),
            UiPort::new(11235).unwrap(),
            SyncedThreshold::new(trigger_length),
        )
    }

    fn rejected_field(config: &ScaleneConfig) -> String {
        match config.validate() {
            Err(ConfigError::InvalidConfigValueError { field, .. }) => field,
            other => panic!("expected invalid value, got {:?}", other),
        }
    }

    #[test]
    fn test_current_validates() {
        assert!(ScaleneConfig::current().validate().is_ok());
        assert!(build("2.0.1", "2025.01.02", 10).validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_bad_version() {
        assert_eq!(rejected_field(&build("1.5", "2024.06.18", 98820)), "identity.version");
    }

    #[test]
    fn test_validate_rejects_empty_date() {
        assert_eq!(rejected_field(&build("1.5.42.1", "  ", 98820)), "identity.release_date");
    }

    #[test]
    fn test_validate_rejects_zero_and_max_threshold() {
        for trigger_length in [0, u64::MAX] {
            let config = build("1.5.42.1", "2024.06.18", trigger_length);
            assert_eq!(rejected_field(&config), "sampleheap.trigger_length");
        }
    }

    #[test]
    fn test_snapshot_matches_record() {
        let snapshot = ScaleneConfig::current().snapshot();
        assert_eq!(snapshot.version, "1.5.42.1");
        assert_eq!(snapshot.release_date, "2024.06.18");
        assert_eq!(snapshot.ui_port, 11235);
        assert_eq!(snapshot.newline_trigger_length, 98820);
        assert_eq!(snapshot.sampleheap_newline, 98821);
    }

    #[test]
    fn test_json_and_toml_output() {
        let config = ScaleneConfig::current();

        let json: serde_json::Value =
            serde_json::from_str(&config.to_json().unwrap()).unwrap();
        assert_eq!(json["ui_port"], 11235);
        assert_eq!(json["newline_trigger_length"], 98820);

        let parsed: ConfigSnapshot = toml::from_str(&config.to_toml().unwrap()).unwrap();
        assert_eq!(parsed, config.snapshot());
    }
}
