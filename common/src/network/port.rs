use std::fmt;
use std::str::FromStr;

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("'{0}' is not a port number between 1 and 65535")]
pub struct PortError(pub String);

/// A TCP port in `1..=65535`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Port(u16);

impl Port {
    pub fn new(port: u16) -> Option<Self> {
        (port != 0).then_some(Self(port))
    }

    pub fn get(self) -> u16 {
        self.0
    }
}

impl FromStr for Port {
    type Err = PortError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if !is_valid_port(s) {
            return Err(PortError(s.to_string()));
        }
        s.parse::<u16>()
            .ok()
            .and_then(Port::new)
            .ok_or_else(|| PortError(s.to_string()))
    }
}

impl fmt::Display for Port {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Holds iff `s` is a plain decimal integer in `1..=65535`.
///
/// Signs, whitespace and empty input are rejected, leading zeros are not.
pub fn is_valid_port(s: &str) -> bool {
    if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
        return false;
    }
    let digits: &str = s.trim_start_matches('0');
    if digits.len() > 5 {
        return false;
    }
    matches!(digits.parse::<u32>(), Ok(1..=65535))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PopularPort {
    pub port: u16,
    pub service: &'static str,
}

/// Ports offered as one-tap suggestions, in display order.
pub const POPULAR_PORTS: &[PopularPort] = &[
    PopularPort { port: 80, service: "HTTP" },
    PopularPort { port: 443, service: "HTTPS" },
    PopularPort { port: 554, service: "RTSP (IP cameras)" },
    PopularPort { port: 8080, service: "HTTP alternate" },
    PopularPort { port: 5000, service: "UPnP / dev servers" },
    PopularPort { port: 9000, service: "Web admin panels" },
];

pub fn describe(port: u16) -> Option<&'static str> {
    POPULAR_PORTS
        .iter()
        .find(|popular| popular.port == port)
        .map(|popular| popular.service)
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_port_bounds() {
        assert!(is_valid_port("1"));
        assert!(is_valid_port("80"));
        assert!(is_valid_port("65535"));
        assert!(is_valid_port("00443"));

        assert!(!is_valid_port("0"));
        assert!(!is_valid_port("000"));
        assert!(!is_valid_port("65536"));
        assert!(!is_valid_port("99999999999999999999"));
    }

    #[test]
    fn valid_port_rejects_non_integers() {
        assert!(!is_valid_port(""));
        assert!(!is_valid_port(" 80"));
        assert!(!is_valid_port("80 "));
        assert!(!is_valid_port("+80"));
        assert!(!is_valid_port("-1"));
        assert!(!is_valid_port("80.0"));
        assert!(!is_valid_port("http"));
        assert!(!is_valid_port("٨٠"));
    }

    #[test]
    fn every_u16_except_zero_round_trips_through_validation() {
        for n in 0..=u16::MAX {
            let s: String = n.to_string();
            assert_eq!(is_valid_port(&s), n != 0, "port {n}");
        }
    }

    #[test]
    fn port_from_str() {
        assert_eq!("8080".parse::<Port>().map(Port::get), Ok(8080));
        assert_eq!("0".parse::<Port>(), Err(PortError("0".to_string())));
        assert!("abc".parse::<Port>().is_err());
    }

    #[test]
    fn popular_ports_are_described() {
        assert_eq!(POPULAR_PORTS.len(), 6);
        assert_eq!(describe(554), Some("RTSP (IP cameras)"));
        assert_eq!(describe(22), None);
        assert_eq!(describe(443), Some("HTTPS"));
        assert!(Port::new(0).is_none());
    }
}
