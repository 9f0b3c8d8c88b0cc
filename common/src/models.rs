//! # Diagnostics View Models
//!
//! Shapes of the JSON bodies returned by the diagnostics service.
//!
//! The service is loosely typed: fields go missing when a lookup fails and some
//! numbers arrive as strings. Every field that can be absent is an `Option`, and
//! unknown fields are ignored.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

/// Body of `GET /my-ip`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClientIp {
    pub your_ip: String,
}

/// Outcome of a TCP reachability probe on one port.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum PortStatus {
    Open,
    Closed,
    /// Any status string the service invents later.
    Unknown(String),
}

impl PortStatus {
    pub fn is_open(&self) -> bool {
        matches!(self, PortStatus::Open)
    }
}

impl From<String> for PortStatus {
    fn from(value: String) -> Self {
        match value.to_ascii_lowercase().as_str() {
            "open" => PortStatus::Open,
            "closed" => PortStatus::Closed,
            _ => PortStatus::Unknown(value),
        }
    }
}

impl From<PortStatus> for String {
    fn from(value: PortStatus) -> Self {
        value.to_string()
    }
}

impl fmt::Display for PortStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PortStatus::Open => f.write_str("open"),
            PortStatus::Closed => f.write_str("closed"),
            PortStatus::Unknown(other) => f.write_str(other),
        }
    }
}

/// Body of `GET /check-port`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PortCheck {
    pub status: PortStatus,
}

/// Body of `GET /ping`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PingReport {
    #[serde(default)]
    pub reachable: bool,
    #[serde(default)]
    pub avg_latency_ms: Option<f64>,
    /// Set by the service when the probe itself blew up.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl PingReport {
    /// Average latency with two decimals, e.g. `"12.35 ms"`.
    pub fn latency_label(&self) -> Option<String> {
        self.avg_latency_ms
            .filter(|ms| ms.is_finite())
            .map(|ms| format!("{ms:.2} ms"))
    }
}

/// Body of `GET /geolocate`, in the ip-api.com layout the service forwards.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeoLocation {
    /// `"success"` or `"fail"`.
    #[serde(default)]
    pub status: Option<String>,
    /// Reason given alongside a `"fail"` status.
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub country: Option<String>,
    #[serde(default)]
    pub country_code: Option<String>,
    #[serde(default)]
    pub region_name: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub isp: Option<String>,
    #[serde(default)]
    pub org: Option<String>,
    #[serde(default)]
    pub timezone: Option<String>,
    #[serde(default)]
    pub lat: Option<f64>,
    #[serde(default)]
    pub lon: Option<f64>,
    /// The address the lookup was performed for.
    #[serde(default)]
    pub query: Option<String>,
    /// Upstream lookup error passed through verbatim by the service.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl GeoLocation {
    pub fn is_failure(&self) -> bool {
        self.error.is_some() || self.status.as_deref() == Some("fail")
    }

    pub fn coordinates(&self) -> Option<(f64, f64)> {
        self.lat.zip(self.lon)
    }
}

/// Body of `GET /whois`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct WhoisRecord {
    #[serde(default, deserialize_with = "string_or_number")]
    pub asn: Option<String>,
    #[serde(default)]
    pub network_name: Option<String>,
    #[serde(default)]
    pub org: Option<String>,
    #[serde(default)]
    pub country: Option<String>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub emails: Vec<String>,
}

/// Everything one check gathered, in the order it is rendered.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiagnosticsReport {
    pub target: String,
    pub port: u16,
    pub port_check: PortCheck,
    pub ping: PingReport,
    pub geo: GeoLocation,
    pub whois: WhoisRecord,
    pub elapsed_ms: u64,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum StringOrNumber {
    Str(String),
    Int(i64),
    Float(f64),
}

fn string_or_number<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value: Option<StringOrNumber> = Option::deserialize(deserializer)?;
    Ok(value.map(|v| match v {
        StringOrNumber::Str(s) => s,
        StringOrNumber::Int(n) => n.to_string(),
        StringOrNumber::Float(n) => n.to_string(),
    }))
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<String>>::deserialize(deserializer)?.unwrap_or_default())
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
