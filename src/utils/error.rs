use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid value '{value}' for {field}: {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Native rollover constant drifted: expected {expected}, found {found}")]
    NativeDriftError { expected: u64, found: u64 },

    #[error("Native constant {name} not found in header")]
    NativeConstantMissing { name: String },

    #[error("Native constant {name} is declared {count} times")]
    NativeConstantAmbiguous { name: String, count: usize },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("TOML serialization error: {0}")]
    TomlError(#[from] toml::ser::Error),
}

impl ConfigError {
    pub fn user_friendly_message(&self) -> String {
        match self {
            ConfigError::InvalidConfigValueError { field, value, .. } => {
                format!("The value '{}' is not accepted for {}", value, field)
            }
            ConfigError::NativeDriftError { expected, found } => format!(
                "The native sampling heap uses NEWLINE = {}, but this build expects {}",
                found, expected
            ),
            ConfigError::NativeConstantMissing { name } => {
                format!("Could not find {} in the native header", name)
            }
            ConfigError::NativeConstantAmbiguous { name, count } => format!(
                "The native header declares {} {} times, so its value is unclear",
                name, count
            ),
            ConfigError::IoError(e) => format!("Could not access file: {}", e),
            ConfigError::SerializationError(_) | ConfigError::TomlError(_) => {
                "Could not render the configuration".to_string()
            }
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            ConfigError::InvalidConfigValueError { .. } => {
                "Use a value inside the documented range"
            }
            ConfigError::NativeDriftError { .. } => {
                "Regenerate the header with `scalene-config header --output <path>` and rebuild"
            }
            ConfigError::NativeConstantMissing { .. } => {
                "Include the generated sampleheap_constants.h in the allocator sources"
            }
            ConfigError::NativeConstantAmbiguous { .. } => {
                "Keep a single NEWLINE declaration in the allocator sources"
            }
            ConfigError::IoError(_) => "Check that the path exists and is readable",
            ConfigError::SerializationError(_) | ConfigError::TomlError(_) => {
                "Try another output format"
            }
        }
    }
}

pub type Result<T> = std::result::Result<T, ConfigError>;
