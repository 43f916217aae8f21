use crate::utils::error::{ConfigError, Result};
use crate::utils::shared_checks;

pub use crate::utils::shared_checks::is_version_shaped;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

fn invalid(field_name: &str, value: impl ToString, reason: String) -> ConfigError {
    ConfigError::InvalidConfigValueError {
        field: field_name.to_string(),
        value: value.to_string(),
        reason,
    }
}

pub fn validate_version(field_name: &str, version: &str) -> Result<()> {
    shared_checks::check_version(version).map_err(|reason| invalid(field_name, version, reason))
}

pub fn validate_release_date(field_name: &str, release_date: &str) -> Result<()> {
    shared_checks::check_release_date(release_date)
        .map_err(|reason| invalid(field_name, release_date, reason))
}

pub fn validate_port(field_name: &str, port: u32) -> Result<u16> {
    shared_checks::check_port(port).map_err(|reason| invalid(field_name, port, reason))
}

pub fn validate_range<T: PartialOrd + std::fmt::Display + Copy>(
    field_name: &str,
    value: T,
    min: T,
    max: T,
) -> Result<()> {
    if value < min || value > max {
        return Err(invalid(
            field_name,
            value,
            format!("Value must be between {} and {}", min, max),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_version() {
        assert!(validate_version("version", "1.5.42.1").is_ok());
        match validate_version("identity.version", "١.٢.٣") {
            Err(ConfigError::InvalidConfigValueError { field, value, .. }) => {
                assert_eq!(field, "identity.version");
                assert_eq!(value, "١.٢.٣");
            }
            other => panic!("expected invalid value, got {:?}", other),
        }
    }

    #[test]
    fn test_validate_port() {
        assert_eq!(validate_port("console.port", 11235).unwrap(), 11235);
        assert!(validate_port("console.port", 0).is_err());
        assert!(validate_port("console.port", 70000).is_err());
    }

    #[test]
    fn test_validate_range() {
        assert!(validate_range("sampleheap.trigger_length", 98820u64, 1, u64::MAX - 1).is_ok());
        assert!(validate_range("sampleheap.trigger_length", 0u64, 1, u64::MAX - 1).is_err());
    }

    #[test]
    fn test_validate_release_date() {
        assert!(validate_release_date("identity.release_date", "2024.06.18").is_ok());
        assert!(validate_release_date("identity.release_date", "   ").is_err());
    }
}
