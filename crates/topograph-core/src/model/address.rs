//! MAC and IP address canonicalisation

use std::net::IpAddr;

use crate::error::ConfigurationError;

/// A hardware address, stored as raw octets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MacAddress([u8; 6]);

impl MacAddress {
    /// Parse a MAC in colon, dash, dotted (Cisco) or bare hex form
    ///
    /// # Errors
    /// Returns [`ConfigurationError::InvalidMac`] when the value does not
    /// contain exactly twelve hex digits.
    pub fn parse(raw: &str) -> Result<Self, ConfigurationError> {
        let digits: String = raw
            .trim()
            .chars()
            .filter(|c| !matches!(c, ':' | '-' | '.'))
            .collect();

        if digits.len() != 12 || !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(ConfigurationError::InvalidMac(raw.to_string()));
        }

        let mut octets = [0u8; 6];
        for (i, octet) in octets.iter_mut().enumerate() {
            *octet = u8::from_str_radix(&digits[i * 2..i * 2 + 2], 16)
                .map_err(|_| ConfigurationError::InvalidMac(raw.to_string()))?;
        }
        Ok(Self(octets))
    }

    /// Parse an optional MAC; absent or blank values yield `None`
    ///
    /// # Errors
    /// Returns [`ConfigurationError::InvalidMac`] for a non-blank malformed value.
    pub fn parse_optional(raw: Option<&str>) -> Result<Option<Self>, ConfigurationError> {
        match raw.map(str::trim) {
            None | Some("") => Ok(None),
            Some(value) => Self::parse(value).map(Some),
        }
    }

    /// Canonical key form: twelve lowercase hex digits, no separators
    #[must_use]
    pub fn key(&self) -> String {
        self.0.iter().map(|b| format!("{b:02x}")).collect()
    }

    #[must_use]
    pub fn octets(&self) -> [u8; 6] {
        self.0
    }
}

impl std::fmt::Display for MacAddress {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let [a, b, c, d, e, g] = self.0;
        write!(f, "{a:02x}:{b:02x}:{c:02x}:{d:02x}:{e:02x}:{g:02x}")
    }
}

impl std::str::FromStr for MacAddress {
    type Err = ConfigurationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// Parse an IPv4 or IPv6 address
///
/// # Errors
/// Returns [`ConfigurationError::InvalidIp`] when the value is not an address.
pub fn parse_ip(raw: &str) -> Result<IpAddr, ConfigurationError> {
    raw.trim()
        .parse()
        .map_err(|_| ConfigurationError::InvalidIp(raw.to_string()))
}

/// Parse an optional IP; absent or blank values yield `None`
///
/// # Errors
/// Returns [`ConfigurationError::InvalidIp`] for a non-blank malformed value.
pub fn parse_optional_ip(raw: Option<&str>) -> Result<Option<IpAddr>, ConfigurationError> {
    match raw.map(str::trim) {
        None | Some("") => Ok(None),
        Some(value) => parse_ip(value).map(Some),
    }
}
