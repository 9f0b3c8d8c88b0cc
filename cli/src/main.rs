mod commands;
mod terminal;

use std::process::ExitCode;

use commands::{CommandLine, Commands, check, lookup, my_ip, ports};
use porthole_common::config::Config;
use porthole_common::error;
use porthole_core::error::ApiError;
use terminal::{logging, print};

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let commands = CommandLine::parse_args();
    let cfg: Config = commands.to_config()?;

    if cfg.json {
        colored::control::set_override(false);
    }
    logging::init(&cfg);
    print::banner(&cfg);

    let result: anyhow::Result<()> = match commands.command {
        Commands::Check { target, port } => check::check(target, port, &cfg).await,
        Commands::MyIp => my_ip::my_ip(&cfg).await,
        Commands::Port { target, port } => lookup::port(target, port, &cfg).await,
        Commands::Ping { target } => lookup::ping(target, &cfg).await,
        Commands::Geo { target } => lookup::geo(target, &cfg).await,
        Commands::Whois { target } => lookup::whois(target, &cfg).await,
        Commands::Ports => ports::ports(&cfg),
    };

    match result {
        Ok(()) => {
            print::end_of_program(&cfg);
            Ok(ExitCode::SUCCESS)
        }
        Err(e) => {
            match e.downcast_ref::<ApiError>() {
                Some(api_err) => {
                    tracing::debug!(endpoint = ?api_err.endpoint(), "{e:#}");
                    print::error_banner(&api_err.user_message()).await;
                }
                None => error!("{e:#}"),
            }
            Ok(ExitCode::FAILURE)
        }
    }
}
