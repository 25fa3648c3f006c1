//! # Fleet Locator
//!
//! Implements the "where is this hardware address" use case.
//!
//! Every device gets its own task, bounded by a semaphore sized from
//! [`Config::max_sessions`]. A task runs the per-device pipeline in order:
//! 1. **Scan**: list interfaces and look for the target.
//! 2. **Correlate**: on a hit, read the neighbor table for the matched interface.
//! 3. **Identify**: on a hit, read serial, OS and uptime.
//!
//! Tasks share nothing but the session and the semaphore; each one hands its
//! result back through the [`JoinSet`], so cancelling in first-match mode
//! cannot leave a half-written result behind.

use std::sync::Arc;

use machunt_common::config::Config;
use machunt_common::inventory::Device;
use machunt_common::network::HardwareAddress;
use machunt_common::report::{DeviceWarning, FleetOutcome, MatchResult, Report, Stage};
use machunt_common::session::{DeviceSession, SessionError};
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tracing::{debug, error, info, warn};

use crate::{identity, neighbors, scanner};

type ProgressCallback = Arc<dyn Fn(usize) + Send + Sync>;

/// What a single device contributed to the hunt.
#[derive(Debug)]
enum DeviceOutcome {
    NoMatch,
    Matched(Box<Report>),
    Failed(Box<DeviceWarning>),
}

pub struct Locator {
    session: Arc<dyn DeviceSession>,
    config: Config,
    on_progress: Option<ProgressCallback>,
}

impl Locator {
    pub fn new(session: Arc<dyn DeviceSession>, config: Config) -> Self {
        Self {
            session,
            config,
            on_progress: None,
        }
    }

    /// Called with the number of finished devices each time one completes.
    pub fn with_progress(mut self, callback: impl Fn(usize) + Send + Sync + 'static) -> Self {
        self.on_progress = Some(Arc::new(callback));
        self
    }

    /// Hunts for `target` across `devices`.
    ///
    /// Per-device failures become warnings next to the reports of other
    /// devices; they never abort the run. Unless first-match mode is on,
    /// every device is scanned, and several reports are returned when the
    /// address shows up on more than one device.
    pub async fn locate(&self, devices: &[Device], target: HardwareAddress) -> FleetOutcome {
        let permits = self.config.max_sessions.clamp(1, Semaphore::MAX_PERMITS);
        let limiter = Arc::new(Semaphore::new(permits));
        let mut tasks: JoinSet<DeviceOutcome> = JoinSet::new();

        info!("Hunting for {target} across {} devices", devices.len());

        for device in devices.iter().cloned() {
            let session = Arc::clone(&self.session);
            let limiter = Arc::clone(&limiter);
            let config = self.config.clone();

            tasks.spawn(async move {
                let Ok(_permit) = limiter.acquire_owned().await else {
                    let error = SessionError::Connection("session limiter closed".to_string());
                    return failed(device, Stage::InterfaceScan, error, None);
                };
                hunt_device(session.as_ref(), device, target, &config).await
            });
        }

        let mut outcome = FleetOutcome::default();

        while let Some(joined) = tasks.join_next().await {
            let result = match joined {
                Ok(result) => result,
                Err(e) if e.is_cancelled() => {
                    outcome.stopped_early = true;
                    continue;
                }
                Err(e) => {
                    error!("Device task failed: {e}");
                    continue;
                }
            };

            outcome.devices_scanned += 1;
            if let Some(callback) = &self.on_progress {
                callback(outcome.devices_scanned);
            }

            match result {
                DeviceOutcome::NoMatch => {}
                DeviceOutcome::Failed(warning) => outcome.warnings.push(*warning),
                DeviceOutcome::Matched(report) => {
                    outcome.reports.push(*report);
                    if self.config.first_match && !tasks.is_empty() {
                        debug!("First match confirmed, cancelling {} remaining devices", tasks.len());
                        tasks.abort_all();
                    }
                }
            }
        }

        outcome.sort();
        outcome
    }
}

async fn hunt_device(
    session: &dyn DeviceSession,
    device: Device,
    target: HardwareAddress,
    config: &Config,
) -> DeviceOutcome {
    let timeout = config.command_timeout;

    let records = match scanner::scan(session, &device, timeout).await {
        Ok(records) => records,
        Err(e) => return failed(device, Stage::InterfaceScan, e, None),
    };

    let Some(interface_name) = scanner::find_match(&records, &target).map(str::to_string) else {
        debug!("{}: target not present", device.name);
        return DeviceOutcome::NoMatch;
    };

    info!("Target {target} is present on {}'s {interface_name}", device.name);

    let neighbors = match neighbors::neighbors_for(
        session,
        &device,
        &interface_name,
        config.neighbor_protocol,
        timeout,
    )
    .await
    {
        Ok(neighbors) => neighbors,
        Err(e) => return failed(device, Stage::NeighborQuery, e, Some(interface_name)),
    };

    let identity = match identity::identity_of(session, &device, timeout).await {
        Ok(identity) => identity,
        Err(e) => return failed(device, Stage::IdentityQuery, e, Some(interface_name)),
    };

    DeviceOutcome::Matched(Box::new(Report {
        found: MatchResult {
            device,
            interface_name,
            target,
        },
        neighbors,
        identity,
    }))
}

fn failed(
    device: Device,
    stage: Stage,
    error: SessionError,
    matched_interface: Option<String>,
) -> DeviceOutcome {
    warn!("{} ({}): {stage} failed: {error}", device.name, device.hostname);
    DeviceOutcome::Failed(Box::new(DeviceWarning {
        device,
        stage,
        error,
        matched_interface,
    }))
}
