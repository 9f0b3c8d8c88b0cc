use colored::*;
use porthole_common::config::Config;
use porthole_core::gateway::DiagnosticsApi;
use porthole_core::network::http::HttpClient;
use serde_json::json;

use crate::commands::lookup;
use crate::terminal::{colors, print};

pub async fn my_ip(cfg: &Config) -> anyhow::Result<()> {
    let client = HttpClient::new(cfg)?;
    let client_ip = lookup::with_spinner(cfg, "Asking the service who we are...", client.my_ip()).await?;

    if cfg.json {
        print::print(&serde_json::to_string_pretty(&json!({ "your_ip": client_ip.your_ip }))?);
        return Ok(());
    }

    print::aligned_line("Your IP", 7, client_ip.your_ip.color(colors::IPV4_ADDR).bold());
    Ok(())
}
