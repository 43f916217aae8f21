//! Checks on the values in `shared/constants.toml`.
//!
//! This file is compiled twice: into the library as `utils::shared_checks`
//! and into `build.rs` through `#[path]`. It may only depend on std and
//! `regex`, which both sides have.

use regex::Regex;
use std::sync::OnceLock;

pub const PORT_MIN: u32 = 1;
pub const PORT_MAX: u32 = 65535;
/// Smallest native rollover that still leaves a trigger length of at least 1.
pub const NEWLINE_MIN: u64 = 2;

fn version_shape() -> &'static Regex {
    static SHAPE: OnceLock<Regex> = OnceLock::new();
    SHAPE.get_or_init(|| {
        Regex::new(r"^[0-9]+\.[0-9]+\.[0-9]+(\.[0-9]+)?$")
            .expect("version pattern is a valid regex")
    })
}

pub fn is_version_shaped(version: &str) -> bool {
    version_shape().is_match(version)
}

pub fn check_version(version: &str) -> Result<(), String> {
    if !is_version_shaped(version) {
        return Err(format!(
            "{:?} must look like MAJOR.MINOR.PATCH with an optional fourth component",
            version
        ));
    }
    Ok(())
}

pub fn check_release_date(release_date: &str) -> Result<(), String> {
    if release_date.trim().is_empty() {
        return Err("release date cannot be empty or whitespace-only".to_string());
    }
    Ok(())
}

pub fn check_port(port: u32) -> Result<u16, String> {
    if !(PORT_MIN..=PORT_MAX).contains(&port) {
        return Err(format!(
            "port {} must be between {} and {}",
            port, PORT_MIN, PORT_MAX
        ));
    }
    u16::try_from(port).map_err(|e| e.to_string())
}

pub fn check_newline(newline: u64) -> Result<(), String> {
    if newline < NEWLINE_MIN {
        return Err(format!(
            "newline {} must be at least {}",
            newline, NEWLINE_MIN
        ));
    }
    Ok(())
}
