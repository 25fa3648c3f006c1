pub mod inventory;
pub mod locate;

use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand};
use machunt_common::config::DEFAULT_MAX_SESSIONS;
use machunt_common::network::HardwareAddress;

const DEFAULT_TIMEOUT_SECS: u64 = 30;

#[derive(Parser)]
#[command(name = "machunt")]
#[command(about = "Find the switch port behind a MAC address.")]
#[command(version)]
pub struct CommandLine {
    #[command(subcommand)]
    pub command: Commands,

    /// Inventory file listing the devices to search
    #[arg(short, long, global = true, default_value = "inventory.json")]
    pub inventory: PathBuf,

    /// Maximum number of devices queried at once
    #[arg(short, long, global = true, default_value_t = DEFAULT_MAX_SESSIONS)]
    pub jobs: usize,

    /// Timeout for each command sent to a device, in seconds
    #[arg(short, long, global = true, default_value_t = DEFAULT_TIMEOUT_SECS)]
    pub timeout: u64,

    /// Replay captured command output from this directory instead of using SSH
    #[arg(long, global = true, value_name = "DIR")]
    pub replay: Option<PathBuf>,

    /// Read LLDP neighbors instead of CDP neighbors
    #[arg(long, global = true)]
    pub lldp: bool,

    /// Stop as soon as one device reports the address
    #[arg(long, global = true)]
    pub first_match: bool,

    /// Less output: -q hides banner and headers, -qq also hides device details
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub quiet: u8,

    /// Do not print the banner
    #[arg(long, global = true)]
    pub no_banner: bool,

    /// Show debug logs
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Search every inventory device for a MAC address
    #[command(alias = "l")]
    Locate {
        /// Address in any common notation (aa:bb:cc:dd:ee:ff, aabb.ccdd.eeff, ...).
        /// Prompted for when omitted.
        target: Option<HardwareAddress>,
    },
    /// List the devices loaded from the inventory
    #[command(alias = "i")]
    Inventory,
}

impl CommandLine {
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
