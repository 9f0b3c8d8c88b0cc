//! The central **abstraction** over the diagnostics service.
//!
//! Everything that wants port checks, pings, geolocation or WHOIS data goes
//! through [`DiagnosticsApi`]. The concrete HTTP implementation lives in
//! [`crate::network::http`], tests swap in their own.

use async_trait::async_trait;
use porthole_common::models::{ClientIp, GeoLocation, PingReport, PortCheck, WhoisRecord};
use porthole_common::network::port::Port;
use porthole_common::network::target::Target;

use crate::error::ApiError;

#[async_trait]
pub trait DiagnosticsApi: Send + Sync {
    /// Address the service sees the caller connecting from.
    async fn my_ip(&self) -> Result<ClientIp, ApiError>;

    /// Whether `port` accepts TCP connections on `target`.
    async fn check_port(&self, target: &Target, port: Port) -> Result<PortCheck, ApiError>;

    /// Reachability and average round trip time.
    async fn ping(&self, target: &Target) -> Result<PingReport, ApiError>;

    /// Country, region, city and ISP of `target`.
    async fn geolocate(&self, target: &Target) -> Result<GeoLocation, ApiError>;

    /// Registration data for the network `target` belongs to.
    async fn whois(&self, target: &Target) -> Result<WhoisRecord, ApiError>;
}
