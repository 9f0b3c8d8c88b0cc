use colored::*;
use porthole_common::config::Config;
use porthole_common::network::port::POPULAR_PORTS;
use serde_json::json;

use crate::terminal::{colors, format::Detail, print};

pub fn ports(cfg: &Config) -> anyhow::Result<()> {
    if cfg.json {
        let list: Vec<serde_json::Value> = POPULAR_PORTS
            .iter()
            .map(|popular| json!({ "port": popular.port, "service": popular.service }))
            .collect();
        print::print(&serde_json::to_string_pretty(&list)?);
        return Ok(());
    }

    print::header("popular ports", cfg.quiet);
    let details: Vec<Detail> = POPULAR_PORTS
        .iter()
        .map(|popular| {
            (
                popular.port.to_string(),
                popular.service.color(colors::SECONDARY),
            )
        })
        .collect();
    print::as_tree_one_level(details);
    Ok(())
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
    use crate::terminal::logging::capture_stdout;

    #[test]
    fn json_listing_parses_without_trailing_decoration() {
        let cfg = Config { json: true, ..Config::default() };
        let out = capture_stdout(&cfg, || {
            ports(&cfg).unwrap();
            print::end_of_program(&cfg);
        });

        let list: Vec<serde_json::Value> = serde_json::from_str(&out).unwrap();
        assert_eq!(list.len(), POPULAR_PORTS.len());
        assert_eq!(list[0]["port"], 80);
        assert_eq!(list[0]["service"], "HTTP");
    }

    #[test]
    fn tree_listing_names_every_port() {
        let cfg = Config::default();
        let out = capture_stdout(&cfg, || ports(&cfg).unwrap());
        for popular in POPULAR_PORTS {
            assert!(out.contains(popular.service), "missing {}", popular.service);
        }
    }
}
