use std::time::Duration;

pub const DEFAULT_MAX_SESSIONS: usize = 16;
pub const DEFAULT_COMMAND_TIMEOUT: Duration = Duration::from_secs(30);

/// Which neighbor-discovery table is read during enrichment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NeighborProtocol {
    #[default]
    Cdp,
    Lldp,
}

#[derive(Debug, Clone)]
pub struct Config {
    /// Upper bound on devices queried at the same time.
    pub max_sessions: usize,
    /// Applied to every single command sent to a device.
    ///
    /// A command that runs out of time is handled like an unreachable device.
    pub command_timeout: Duration,
    /// Stop scanning the rest of the fleet once one device reports the target.
    pub first_match: bool,
    pub neighbor_protocol: NeighborProtocol,
    pub quiet: u8,
    pub no_banner: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_sessions: DEFAULT_MAX_SESSIONS,
            command_timeout: DEFAULT_COMMAND_TIMEOUT,
            first_match: false,
            neighbor_protocol: NeighborProtocol::Cdp,
            quiet: 0,
            no_banner: false,
        }
    }
}

impl Config {
    pub fn with_max_sessions(mut self, max_sessions: usize) -> Self {
        self.max_sessions = max_sessions.max(1);
        self
    }

    pub fn with_command_timeout(mut self, command_timeout: Duration) -> Self {
        self.command_timeout = command_timeout;
        self
    }

    pub fn with_first_match(mut self, first_match: bool) -> Self {
        self.first_match = first_match;
        self
    }

    pub fn with_neighbor_protocol(mut self, neighbor_protocol: NeighborProtocol) -> Self {
        self.neighbor_protocol = neighbor_protocol;
        self
    }
}
