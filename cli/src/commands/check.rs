use std::sync::atomic::{AtomicUsize, Ordering};

use colored::*;
use porthole_common::config::Config;
use porthole_common::info;
use porthole_common::models::DiagnosticsReport;
use porthole_common::network::port::Port;
use porthole_common::network::target::Target;
use porthole_core::diagnostics::{DiagnosticsService, UNAVAILABLE};
use porthole_core::network::http::HttpClient;
use serde_json::json;
use tracing::{Instrument, info_span};

use crate::mprint;
use crate::terminal::{colors, format, print, spinner};

/// Port, ping, geolocation and WHOIS.
const LOOKUPS_PER_CHECK: usize = 4;

pub async fn check(target: Target, port: Port, cfg: &Config) -> anyhow::Result<()> {
    let span = info_span!("check", %target, %port);
    let (client_ip, report) = run_check(&target, port, cfg).instrument(span).await?;

    check_ends(&report, &client_ip, cfg)
}

async fn run_check(
    target: &Target,
    port: Port,
    cfg: &Config,
) -> anyhow::Result<(String, DiagnosticsReport)> {
    let client = HttpClient::new(cfg)?;
    info!("Checking {target}:{port} through {}", client.base_url());
    let service = DiagnosticsService::new(Box::new(client));

    if !cfg.json {
        print::header("running diagnostics", cfg.quiet);
        spinner::start("Contacting the diagnostics service...");
    }

    let done = AtomicUsize::new(0);
    let (client_ip, result) = service
        .run_check_with_client_ip(target, port, |endpoint| {
            let finished: usize = done.fetch_add(1, Ordering::Relaxed) + 1;
            spinner::report_check_progress(endpoint.label(), finished, LOOKUPS_PER_CHECK);
        })
        .await;

    spinner::finish();
    Ok((client_ip, result?))
}

fn check_ends(report: &DiagnosticsReport, client_ip: &str, cfg: &Config) -> anyhow::Result<()> {
    if cfg.json {
        let output = json!({ "client_ip": client_ip, "report": report });
        print::print(&serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    if cfg.quiet < 2 {
        let ip: ColoredString = if client_ip == UNAVAILABLE {
            client_ip.color(colors::MISSING)
        } else {
            client_ip.color(colors::IPV4_ADDR).bold()
        };
        print::aligned_line("Your IP", 7, ip);
    }

    print::header(&format!("{}:{}", report.target, report.port), cfg.quiet);
    print_sections(report);
    print_summary(report, cfg);
    Ok(())
}

fn print_sections(report: &DiagnosticsReport) {
    let sections = [
        ("Port", format::port_to_detail(report.port, &report.port_check)),
        ("Ping", format::ping_to_detail(&report.ping)),
        ("Location", format::geo_to_detail(&report.geo)),
        ("WHOIS", format::whois_to_detail(&report.whois)),
    ];

    let count: usize = sections.len();
    for (idx, (name, details)) in sections.into_iter().enumerate() {
        print::tree_head(idx, name);
        print::as_tree_one_level(details);
        if idx + 1 != count {
            mprint!();
        }
    }
}

fn print_summary(report: &DiagnosticsReport, cfg: &Config) {
    let status: ColoredString = format::port_status(&report.port_check.status);
    let endpoint: ColoredString = format!("{}:{}", report.target, report.port).bold();
    let total_time: ColoredString =
        format!("{:.2}s", report.elapsed_ms as f64 / 1000.0).bold().yellow();
    let output: String = format!("Check Complete: {endpoint} is {status} ({total_time})")
        .color(colors::TEXT_DEFAULT)
        .to_string();

    match cfg.quiet {
        0 => {
            print::fat_separator();
            print::centerln(&output);
        }
        _ => {
            mprint!();
            print::print(&format!("{} {}", "[✓]".bright_green().bold(), output));
        }
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
