use std::time::Duration;

use async_trait::async_trait;
use porthole_common::config::Config;
use porthole_common::models::{ClientIp, GeoLocation, PingReport, PortCheck, WhoisRecord};
use porthole_common::network::port::Port;
use porthole_common::network::target::Target;
use reqwest::Client;
use serde::de::DeserializeOwned;
use tokio::time::timeout;
use tracing::{debug, trace};

use crate::error::{self, ApiError, Endpoint};
use crate::gateway::DiagnosticsApi;

const USER_AGENT: &str = concat!("porthole/", env!("CARGO_PKG_VERSION"));

/// [`DiagnosticsApi`] over plain HTTP GET requests with JSON bodies.
pub struct HttpClient {
    http: Client,
    base_url: String,
    timeout: Duration,
}

impl HttpClient {
    pub fn new(cfg: &Config) -> Result<Self, ApiError> {
        let http: Client = Client::builder()
            .user_agent(USER_AGENT)
            .connect_timeout(cfg.timeout)
            .build()
            .map_err(ApiError::Client)?;

        Ok(Self {
            http,
            base_url: cfg.api_url.trim_end_matches('/').to_string(),
            timeout: cfg.timeout,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, endpoint: Endpoint) -> String {
        format!("{}{}", self.base_url, endpoint.path())
    }

    /// Performs one GET under the configured deadline and decodes the body.
    async fn get<T>(&self, endpoint: Endpoint, query: &[(&str, String)]) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
    {
        let url: String = self.url(endpoint);
        debug!(%url, ?query, "requesting {endpoint}");

        let request = async {
            let response = self
                .http
                .get(&url)
                .query(query)
                .send()
                .await
                .map_err(|source| ApiError::Transport { endpoint, source })?;

            let status = response.status();
            let body: String = response
                .text()
                .await
                .map_err(|source| ApiError::Transport { endpoint, source })?;
            trace!(%status, %body, "{endpoint} answered");

            if !status.is_success() {
                return Err(ApiError::Status {
                    endpoint,
                    status: status.as_u16(),
                    detail: error::extract_detail(&body),
                });
            }

            serde_json::from_str::<T>(&body).map_err(|source| ApiError::Decode { endpoint, source })
        };

        match timeout(self.timeout, request).await {
            Ok(result) => result,
            Err(_elapsed) => Err(ApiError::Timeout {
                endpoint,
                after: self.timeout,
            }),
        }
    }
}

#[async_trait]
impl DiagnosticsApi for HttpClient {
    async fn my_ip(&self) -> Result<ClientIp, ApiError> {
        self.get(Endpoint::MyIp, &[]).await
    }

    async fn check_port(&self, target: &Target, port: Port) -> Result<PortCheck, ApiError> {
        let query = [("ip", target.to_string()), ("port", port.to_string())];
        self.get(Endpoint::CheckPort, &query).await
    }

    async fn ping(&self, target: &Target) -> Result<PingReport, ApiError> {
        self.get(Endpoint::Ping, &[("ip", target.to_string())]).await
    }

    async fn geolocate(&self, target: &Target) -> Result<GeoLocation, ApiError> {
        self.get(Endpoint::Geolocate, &[("ip", target.to_string())]).await
    }

    async fn whois(&self, target: &Target) -> Result<WhoisRecord, ApiError> {
        self.get(Endpoint::Whois, &[("ip", target.to_string())]).await
    }
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
