//! # Check Target Model
//!
//! Defines the host a diagnostic check is aimed at.
//!
//! A target is whatever the user typed into the host field, accepted as one of:
//! * A dotted-quad IPv4 address (e.g., `192.168.1.10`).
//! * A DNS-style hostname (e.g., `router.example.net`, `localhost`).
//!
//! Anything else is rejected before a single request leaves the machine.

use std::fmt;
use std::net::Ipv4Addr;
use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;
use thiserror::Error;

const MAX_HOSTNAME_LEN: usize = 253;

static LABEL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z0-9](?:[A-Za-z0-9-]{0,61}[A-Za-z0-9])?$").expect("label pattern is valid")
});

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TargetError {
    #[error("host cannot be empty")]
    Empty,
    #[error("'{0}' is neither an IPv4 address nor a valid hostname")]
    Invalid(String),
}

/// Represents the host a check is aimed at.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Target {
    /// A literal IPv4 address.
    Ipv4(Ipv4Addr),
    /// A DNS name, resolved by the diagnostics service rather than locally.
    Hostname(String),
}

impl FromStr for Target {
    type Err = TargetError;

    /// Parses user input into a `Target`.
    ///
    /// Surrounding whitespace is ignored, everything else must be exact.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Err(TargetError::Empty);
        }

        if let Some(addr) = parse_ipv4(s) {
            return Ok(Target::Ipv4(addr));
        }

        if is_valid_hostname(s) {
            return Ok(Target::Hostname(s.to_string()));
        }

        Err(TargetError::Invalid(s.to_string()))
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Target::Ipv4(addr) => write!(f, "{addr}"),
            Target::Hostname(name) => write!(f, "{name}"),
        }
    }
}

/// Returns `true` for a strict dotted quad: four decimal octets in `0..=255`.
pub fn is_valid_ipv4(s: &str) -> bool {
    parse_ipv4(s).is_some()
}

/// Returns `true` for a syntactically valid DNS-style hostname.
///
/// Single-label names are only accepted for `localhost`, and the last label may
/// not be purely numeric so that broken quads like `256.1.1.1` are not mistaken
/// for names.
pub fn is_valid_hostname(s: &str) -> bool {
    let name: &str = s.strip_suffix('.').unwrap_or(s);
    if name.is_empty() || name.len() > MAX_HOSTNAME_LEN {
        return false;
    }

    if name.eq_ignore_ascii_case("localhost") {
        return true;
    }

    let labels: Vec<&str> = name.split('.').collect();
    if labels.len() < 2 {
        return false;
    }

    if !labels.iter().all(|label| LABEL_RE.is_match(label)) {
        return false;
    }

    labels
        .last()
        .is_some_and(|tld| !tld.chars().all(|c| c.is_ascii_digit()))
}

/// Accepts either an IPv4 address or a hostname.
pub fn is_valid_host(s: &str) -> bool {
    is_valid_ipv4(s) || is_valid_hostname(s)
}

/// Parses a dotted quad by hand.
///
/// `Ipv4Addr::from_str` refuses leading zeros (`010.0.0.1`), which people do type
/// and which are still four in-range octets.
fn parse_ipv4(s: &str) -> Option<Ipv4Addr> {
    let parts: Vec<&str> = s.split('.').collect();
    if parts.len() != 4 {
        return None;
    }

    let mut octets: [u8; 4] = [0; 4];
    for (octet, part) in octets.iter_mut().zip(parts) {
        if part.is_empty() || part.len() > 3 || !part.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        *octet = part.parse::<u8>().ok()?;
    }

    Some(Ipv4Addr::from(octets))
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
