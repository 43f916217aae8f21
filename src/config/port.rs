use crate::utils::error::{ConfigError, Result};
use crate::utils::validation::validate_port;
use std::fmt;
use std::net::{Ipv4Addr, SocketAddr, SocketAddrV4};
use std::str::FromStr;

const FIELD: &str = "console.port";

/// TCP port for the web console. Never zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct UiPort(u16);

impl UiPort {
    pub const MIN: u16 = 1;
    pub const MAX: u16 = u16::MAX;

    pub const fn new(port: u16) -> Option<Self> {
        if port < Self::MIN {
            None
        } else {
            Some(Self(port))
        }
    }

    pub const fn get(self) -> u16 {
        self.0
    }

    /// Loopback address the console listens on.
    pub fn localhost(self) -> SocketAddr {
        SocketAddr::V4(SocketAddrV4::new(Ipv4Addr::LOCALHOST, self.0))
    }
}

impl TryFrom<u32> for UiPort {
    type Error = ConfigError;

    fn try_from(value: u32) -> Result<Self> {
        Ok(Self(validate_port(FIELD, value)?))
    }
}

impl FromStr for UiPort {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self> {
        let value: u32 = s
            .trim()
            .parse()
            .map_err(|e| ConfigError::InvalidConfigValueError {
                field: FIELD.to_string(),
                value: s.to_string(),
                reason: format!("Not a port number: {}", e),
            })?;
        Self::try_from(value)
    }
}

impl From<UiPort> for u16 {
    fn from(port: UiPort) -> Self {
        port.0
    }
}

impl fmt::Display for UiPort {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
