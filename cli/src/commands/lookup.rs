//! Single-endpoint lookups: `port`, `ping`, `geo` and `whois`.

use std::future::Future;

use porthole_common::config::Config;
use porthole_common::network::port::Port;
use porthole_common::network::target::Target;
use porthole_core::error::ApiError;
use porthole_core::gateway::DiagnosticsApi;
use porthole_core::network::http::HttpClient;

use crate::terminal::format::{self, Detail};
use crate::terminal::{print, spinner};

/// Awaits `request` with the spinner running, unless output is JSON.
pub async fn with_spinner<T, Fut>(cfg: &Config, msg: &str, request: Fut) -> Result<T, ApiError>
where
    Fut: Future<Output = Result<T, ApiError>>,
{
    if !cfg.json {
        spinner::start(msg);
    }
    let result = request.await;
    spinner::finish();
    result
}

fn render(cfg: &Config, target: &Target, title: &str, details: Vec<Detail>) {
    print::header(title, cfg.quiet);
    print::tree_head(0, &target.to_string());
    print::as_tree_one_level(details);
}

pub async fn port(target: Target, port: Port, cfg: &Config) -> anyhow::Result<()> {
    let client = HttpClient::new(cfg)?;
    let msg: String = format!("Checking {target}:{port}...");
    let check = with_spinner(cfg, &msg, client.check_port(&target, port)).await?;

    if cfg.json {
        print::print(&serde_json::to_string_pretty(&check)?);
        return Ok(());
    }

    render(cfg, &target, "port check", format::port_to_detail(port.get(), &check));
    Ok(())
}

pub async fn ping(target: Target, cfg: &Config) -> anyhow::Result<()> {
    let client = HttpClient::new(cfg)?;
    let msg: String = format!("Pinging {target}...");
    let report = with_spinner(cfg, &msg, client.ping(&target)).await?;

    if cfg.json {
        print::print(&serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    render(cfg, &target, "ping", format::ping_to_detail(&report));
    Ok(())
}

pub async fn geo(target: Target, cfg: &Config) -> anyhow::Result<()> {
    let client = HttpClient::new(cfg)?;
    let msg: String = format!("Locating {target}...");
    let geo = with_spinner(cfg, &msg, client.geolocate(&target)).await?;

    if cfg.json {
        print::print(&serde_json::to_string_pretty(&geo)?);
        return Ok(());
    }

    render(cfg, &target, "geolocation", format::geo_to_detail(&geo));
    Ok(())
}

pub async fn whois(target: Target, cfg: &Config) -> anyhow::Result<()> {
    let client = HttpClient::new(cfg)?;
    let msg: String = format!("Querying WHOIS for {target}...");
    let whois = with_spinner(cfg, &msg, client.whois(&target)).await?;

    if cfg.json {
        print::print(&serde_json::to_string_pretty(&whois)?);
        return Ok(());
    }

    render(cfg, &target, "whois", format::whois_to_detail(&whois));
    Ok(())
}
