pub mod check;
pub mod lookup;
pub mod my_ip;
pub mod ports;

use clap::{ArgAction, Parser, Subcommand};
use porthole_common::config::{Config, ConfigError, DEFAULT_API_URL, DEFAULT_TIMEOUT_SECS};
use porthole_common::network::port::Port;
use porthole_common::network::target::Target;

const MAX_QUIET: u8 = 2;

#[derive(Parser)]
#[command(name = "porthole", version)]
#[command(about = "Check whether a host and port are reachable from the outside.")]
pub struct CommandLine {
    #[command(subcommand)]
    pub command: Commands,

    /// Base URL of the diagnostics service
    #[arg(long, global = true, env = "PORTHOLE_API_URL", default_value = DEFAULT_API_URL)]
    pub api_url: String,

    /// Per-request timeout in seconds (1-60)
    #[arg(long, global = true, env = "PORTHOLE_TIMEOUT", default_value_t = DEFAULT_TIMEOUT_SECS)]
    pub timeout: u64,

    /// Reduce output; repeat for results only
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub quiet: u8,

    /// Do not print the banner
    #[arg(long, global = true)]
    pub no_banner: bool,

    /// Print results as JSON
    #[arg(long, global = true)]
    pub json: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run every check against a host and port
    #[command(alias = "c")]
    Check { target: Target, port: Port },
    /// Show the IP address the service sees you connecting from
    #[command(alias = "m")]
    MyIp,
    /// Only check whether a port is open
    #[command(alias = "pt")]
    Port { target: Target, port: Port },
    /// Only measure reachability and latency
    #[command(alias = "pi")]
    Ping { target: Target },
    /// Only geolocate a host
    #[command(alias = "g")]
    Geo { target: Target },
    /// Only look up WHOIS registration data
    #[command(alias = "w")]
    Whois { target: Target },
    /// List commonly forwarded ports
    #[command(alias = "p")]
    Ports,
}

impl CommandLine {
    pub fn parse_args() -> Self {
        Self::parse()
    }

    pub fn to_config(&self) -> Result<Config, ConfigError> {
        let mut cfg: Config = Config::new(&self.api_url, self.timeout)?;
        cfg.quiet = self.quiet.min(MAX_QUIET);
        cfg.no_banner = self.no_banner;
        cfg.json = self.json;
        Ok(cfg)
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
