//! # Diagnostics Service
//!
//! Implements the "check a host" use case.
//!
//! A check fans out the four per-target lookups (port, ping, geolocation, WHOIS)
//! concurrently and joins them. It is all-or-nothing: the first failure aborts
//! the remaining requests and is returned as-is, there are no partial reports
//! and no retries.

use std::future::Future;
use std::time::Instant;

use porthole_common::models::DiagnosticsReport;
use porthole_common::network::port::Port;
use porthole_common::network::target::Target;
use porthole_common::warn;
use tracing::debug;

use crate::error::{ApiError, Endpoint};
use crate::gateway::DiagnosticsApi;

/// What the client IP line shows when the lookup fails.
pub const UNAVAILABLE: &str = "Unavailable";

/// Application service orchestrating calls against a [`DiagnosticsApi`].
pub struct DiagnosticsService {
    api: Box<dyn DiagnosticsApi>,
}

impl DiagnosticsService {
    pub fn new(api: Box<dyn DiagnosticsApi>) -> Self {
        Self { api }
    }

    pub fn api(&self) -> &dyn DiagnosticsApi {
        self.api.as_ref()
    }

    /// Runs a full check against `target:port`.
    pub async fn run_check(&self, target: &Target, port: Port) -> Result<DiagnosticsReport, ApiError> {
        self.run_check_with_progress(target, port, |_| {}).await
    }

    /// Same as [`Self::run_check`], calling `on_complete` as each lookup succeeds.
    pub async fn run_check_with_progress<F>(
        &self,
        target: &Target,
        port: Port,
        on_complete: F,
    ) -> Result<DiagnosticsReport, ApiError>
    where
        F: Fn(Endpoint) + Sync,
    {
        let start_time: Instant = Instant::now();
        let api: &dyn DiagnosticsApi = self.api();
        let on_complete = &on_complete;

        let (port_check, ping, geo, whois) = tokio::try_join!(
            notify(Endpoint::CheckPort, api.check_port(target, port), on_complete),
            notify(Endpoint::Ping, api.ping(target), on_complete),
            notify(Endpoint::Geolocate, api.geolocate(target), on_complete),
            notify(Endpoint::Whois, api.whois(target), on_complete),
        )?;

        let elapsed_ms: u64 = u64::try_from(start_time.elapsed().as_millis()).unwrap_or(u64::MAX);
        debug!(%target, %port, elapsed_ms, "check complete");

        Ok(DiagnosticsReport {
            target: target.to_string(),
            port: port.get(),
            port_check,
            ping,
            geo,
            whois,
            elapsed_ms,
        })
    }

    /// Runs the client IP lookup and a full check side by side.
    ///
    /// The lookup keeps its [`UNAVAILABLE`] fallback, so only the check can fail.
    pub async fn run_check_with_client_ip<F>(
        &self,
        target: &Target,
        port: Port,
        on_complete: F,
    ) -> (String, Result<DiagnosticsReport, ApiError>)
    where
        F: Fn(Endpoint) + Sync,
    {
        tokio::join!(
            self.lookup_client_ip(),
            self.run_check_with_progress(target, port, on_complete),
        )
    }

    /// The caller's public address, or [`UNAVAILABLE`] if it cannot be fetched.
    pub async fn lookup_client_ip(&self) -> String {
        match self.api.my_ip().await {
            Ok(client_ip) => client_ip.your_ip,
            Err(e) => {
                warn!("Client IP lookup failed: {e}");
                UNAVAILABLE.to_string()
            }
        }
    }
}

async fn notify<T, Fut, F>(endpoint: Endpoint, request: Fut, on_complete: &F) -> Result<T, ApiError>
where
    Fut: Future<Output = Result<T, ApiError>>,
    F: Fn(Endpoint),
{
    let result = request.await;
    if result.is_ok() {
        on_complete(endpoint);
    }
    result
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
