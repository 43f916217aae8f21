pub mod config;
pub mod constants;
pub mod native;
pub mod utils;

pub use config::{ConfigSnapshot, ScaleneConfig, SyncedThreshold, UiPort, VersionIdentity};
pub use constants::{
    NATIVE_HEADER, NEWLINE_TRIGGER_LENGTH, SAMPLEHEAP_NEWLINE, SCALENE_DATE, SCALENE_PORT,
    SCALENE_VERSION,
};
pub use native::{write_native_header, NativeHeader};
pub use utils::error::{ConfigError, Result};
