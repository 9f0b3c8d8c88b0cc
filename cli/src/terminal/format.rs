use crate::terminal::colors;
use colored::*;
use porthole_common::models::{GeoLocation, PingReport, PortCheck, PortStatus, WhoisRecord};
use porthole_common::network::port;

pub type Detail = (String, ColoredString);

const NOT_AVAILABLE: &str = "N/A";

fn detail(key: &str, value: ColoredString) -> Detail {
    (key.to_string(), value)
}

fn optional(value: Option<&str>) -> ColoredString {
    match value.map(str::trim).filter(|v| !v.is_empty()) {
        Some(v) => v.color(colors::TEXT_DEFAULT),
        None => NOT_AVAILABLE.color(colors::MISSING),
    }
}

pub fn port_status(status: &PortStatus) -> ColoredString {
    match status {
        PortStatus::Open => "open".color(colors::OPEN).bold(),
        PortStatus::Closed => "closed".color(colors::CLOSED).bold(),
        PortStatus::Unknown(other) => other.as_str().color(colors::UNKNOWN),
    }
}

pub fn port_to_detail(port: u16, check: &PortCheck) -> Vec<Detail> {
    let mut details: Vec<Detail> = vec![detail("Port", port_status(&check.status))];
    if let Some(service) = port::describe(port) {
        details.push(detail("Service", service.color(colors::SECONDARY)));
    }
    details
}

pub fn ping_to_detail(ping: &PingReport) -> Vec<Detail> {
    let reachable: ColoredString = if ping.reachable {
        "Yes".color(colors::OPEN)
    } else {
        "No".color(colors::CLOSED)
    };

    let mut details: Vec<Detail> = vec![
        detail("Reachable", reachable),
        detail("Avg latency", optional(ping.latency_label().as_deref())),
    ];
    if let Some(err) = &ping.error {
        details.push(detail("Ping error", err.as_str().color(colors::UNKNOWN)));
    }
    details
}

pub fn geo_to_detail(geo: &GeoLocation) -> Vec<Detail> {
    if geo.is_failure() {
        let reason: Option<&str> = geo.message.as_deref().or(geo.error.as_deref());
        return vec![detail("Location", optional(reason).color(colors::UNKNOWN))];
    }

    let mut details: Vec<Detail> = vec![
        detail("Country", optional(geo.country.as_deref())),
        detail("Region", optional(geo.region_name.as_deref())),
        detail("City", optional(geo.city.as_deref())),
        detail("ISP", optional(geo.isp.as_deref())),
    ];
    if let Some((lat, lon)) = geo.coordinates() {
        details.push(detail(
            "Coordinates",
            format!("{lat:.4}, {lon:.4}").color(colors::TEXT_DEFAULT),
        ));
    }
    details
}

pub fn whois_to_detail(whois: &WhoisRecord) -> Vec<Detail> {
    let emails: ColoredString = if whois.emails.is_empty() {
        NOT_AVAILABLE.color(colors::MISSING)
    } else {
        whois.emails.join(", ").color(colors::TEXT_DEFAULT)
    };

    vec![
        detail("ASN", optional(whois.asn.as_deref())),
        detail("Network", optional(whois.network_name.as_deref())),
        detail("Org", optional(whois.org.as_deref())),
        detail("Reg. country", optional(whois.country.as_deref())),
        detail("Emails", emails),
    ]
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
