mod commands;
mod terminal;

use std::sync::Arc;
use std::time::Duration;

use commands::{CommandLine, Commands, inventory, locate};
use machunt_common::config::{Config, NeighborProtocol};
use machunt_common::session::DeviceSession;
use machunt_core::session::{CaptureSession, SshSession};
use terminal::print;

use crate::terminal::spinner;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let commands = CommandLine::parse_args();

    spinner::init_logging(commands.verbose, commands.quiet);

    let timeout = Duration::from_secs(commands.timeout.max(1));
    let protocol = match commands.lldp {
        true => NeighborProtocol::Lldp,
        false => NeighborProtocol::Cdp,
    };

    let cfg = Config {
        quiet: commands.quiet,
        no_banner: commands.no_banner,
        ..Config::default()
    }
    .with_max_sessions(commands.jobs)
    .with_command_timeout(timeout)
    .with_first_match(commands.first_match)
    .with_neighbor_protocol(protocol);

    print::banner(cfg.no_banner, cfg.quiet);

    let session: Arc<dyn DeviceSession> = match &commands.replay {
        Some(dir) => Arc::new(CaptureSession::new(dir)),
        None => Arc::new(SshSession::new().with_connect_timeout(timeout)),
    };

    match commands.command {
        Commands::Locate { target } => {
            locate::locate(target, &commands.inventory, session, &cfg).await
        }
        Commands::Inventory => inventory::inventory(&commands.inventory, &cfg),
    }
}
