use crate::utils::validation::is_version_shaped;
use chrono::NaiveDate;
use std::fmt;

const RELEASE_DATE_FORMAT: &str = "%Y.%m.%d";

/// Version string and release date reported by `--version`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct VersionIdentity {
    version: &'static str,
    release_date: &'static str,
}

impl VersionIdentity {
    pub const fn new(version: &'static str, release_date: &'static str) -> Self {
        Self {
            version,
            release_date,
        }
    }

    pub const fn version(&self) -> &'static str {
        self.version
    }

    pub const fn release_date(&self) -> &'static str {
        self.release_date
    }

    /// `<version> (<release_date>)`, the exact line printed for `--version`.
    pub fn version_line(&self) -> String {
        self.to_string()
    }

    pub fn is_well_formed(&self) -> bool {
        is_version_shaped(self.version)
    }

    /// The release date as a calendar date, if it is written `YYYY.MM.DD`.
    /// The date is informational, so a `None` here is not an error.
    pub fn release_date_parsed(&self) -> Option<NaiveDate> {
        NaiveDate::parse_from_str(self.release_date, RELEASE_DATE_FORMAT).ok()
    }
}

impl fmt::Display for VersionIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.version, self.release_date)
    }
}
