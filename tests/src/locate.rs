use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use machunt_common::config::{Config, NeighborProtocol};
use machunt_common::network::{HardwareAddress, NeighborRecord};
use machunt_common::report::Stage;
use machunt_common::session::{
    CommandOutput, SessionError, SHOW_CDP_NEIGHBORS, SHOW_INTERFACES, SHOW_LLDP_NEIGHBORS,
    SHOW_VERSION,
};
use machunt_core::Locator;
use tokio::time::Instant;

use crate::utils::{fleet, MockSession, ScriptedDevice};

fn target() -> HardwareAddress {
    HardwareAddress::parse("AABB.CCDD.EEFF").unwrap()
}

fn r1() -> ScriptedDevice {
    ScriptedDevice::with_interfaces(&[("Gi0/1", "aa:bb:cc:dd:ee:ff"), ("Gi0/3", "00:00:5e:00:53:01")])
        .cdp(&[("Gi0/1", "SW-CORE", "Gi1/1"), ("Gi0/2", "SW-EDGE", "Gi1/9")])
        .version("FOC1234X0YZ")
}

fn r2() -> ScriptedDevice {
    ScriptedDevice::with_interfaces(&[("Gi0/2", "11:22:33:44:55:66")])
}

#[tokio::test]
async fn locate_finds_target_on_single_device() {
    let session = Arc::new(MockSession::new().device("R1", r1()).device("R2", r2()));
    let locator = Locator::new(session.clone(), Config::default());

    let outcome = locator.locate(&fleet(&["R1", "R2"]), target()).await;

    assert!(outcome.is_found());
    assert!(outcome.warnings.is_empty(), "R2 must not warn: {:?}", outcome.warnings);
    assert_eq!(outcome.devices_scanned, 2);
    assert!(!outcome.stopped_early);

    assert_eq!(outcome.reports.len(), 1);
    let report = &outcome.reports[0];
    assert_eq!(report.found.device.name, "R1");
    assert_eq!(report.found.interface_name, "Gi0/1");
    assert_eq!(report.found.target, target());

    assert_eq!(report.identity.management_address, "10.0.0.1");
    assert_eq!(report.identity.serial_number, "FOC1234X0YZ");
    assert_eq!(report.identity.os_description, "IOS-XE 17.3.4");
    assert_eq!(report.identity.uptime, "1 week, 2 days");

    // Only the matching device is enriched.
    assert_eq!(session.commands_for("R2"), [SHOW_INTERFACES]);
    assert_eq!(
        session.commands_for("R1"),
        [SHOW_INTERFACES, SHOW_CDP_NEIGHBORS, SHOW_VERSION]
    );
}

#[tokio::test]
async fn neighbors_are_limited_to_the_matched_interface() {
    let session = Arc::new(MockSession::new().device("R1", r1()));
    let locator = Locator::new(session, Config::default());

    let outcome = locator.locate(&fleet(&["R1"]), target()).await;

    // Entries come back exactly as the device reported them.
    assert_eq!(
        outcome.reports[0].neighbors,
        [NeighborRecord::new("Gi0/1", "SW-CORE", "Gi1/1")]
    );
}

#[tokio::test]
async fn matched_interface_without_neighbors_still_reports() {
    let device = ScriptedDevice::with_interfaces(&[("GigabitEthernet0/7", "aabb.ccdd.eeff")])
        .cdp(&[("GigabitEthernet0/1", "SW-CORE", "Gi1/1")])
        .version("FOC0000");
    let session = Arc::new(MockSession::new().device("ACCESS-1", device));

    let outcome = Locator::new(session, Config::default())
        .locate(&fleet(&["ACCESS-1"]), target())
        .await;

    assert_eq!(outcome.reports.len(), 1);
    assert!(outcome.reports[0].neighbors.is_empty());
}

#[tokio::test]
async fn unreachable_device_does_not_hide_the_match() {
    // "B" has no script, so the mock refuses the connection.
    let session = Arc::new(MockSession::new().device("A", r1()).device("C", r2()));
    let locator = Locator::new(session, Config::default());

    let outcome = locator.locate(&fleet(&["A", "B", "C"]), target()).await;

    assert_eq!(outcome.reports.len(), 1);
    assert_eq!(outcome.reports[0].found.device.name, "A");

    assert_eq!(outcome.warnings.len(), 1);
    let warning = &outcome.warnings[0];
    assert_eq!(warning.device.name, "B");
    assert_eq!(warning.stage, Stage::InterfaceScan);
    assert!(warning.error.is_unreachable());
    assert!(warning.matched_interface.is_none());
    assert_eq!(outcome.devices_scanned, 3);
}

#[tokio::test]
async fn absent_target_yields_no_reports() {
    let session = Arc::new(MockSession::new().device("R2", r2()).device("R3", r2()));
    let outcome = Locator::new(session, Config::default())
        .locate(&fleet(&["R2", "R3"]), target())
        .await;

    assert!(!outcome.is_found());
    assert!(outcome.reports.is_empty());
    assert!(outcome.warnings.is_empty());
    assert_eq!(outcome.devices_scanned, 2);
}

#[tokio::test]
async fn empty_fleet_finishes_immediately() {
    let outcome = Locator::new(Arc::new(MockSession::new()), Config::default())
        .locate(&[], target())
        .await;

    assert!(!outcome.is_found());
    assert_eq!(outcome.devices_scanned, 0);
}

#[tokio::test]
async fn rejected_and_unparseable_devices_become_warnings() {
    let rejecting = ScriptedDevice::new().fail(
        SHOW_INTERFACES,
        SessionError::Command("% Authorization failed".to_string()),
    );
    let garbled = ScriptedDevice::new().answer(
        SHOW_INTERFACES,
        CommandOutput::Text("this is not an interface table\n".to_string()),
    );
    let session = Arc::new(
        MockSession::new()
            .device("R1", r1())
            .device("R8", rejecting)
            .device("R9", garbled),
    );

    let outcome = Locator::new(session, Config::default())
        .locate(&fleet(&["R9", "R8", "R1"]), target())
        .await;

    assert_eq!(outcome.reports.len(), 1);
    let names: Vec<&str> = outcome.warnings.iter().map(|w| w.device.name.as_str()).collect();
    assert_eq!(names, ["R8", "R9"]);
    assert!(matches!(outcome.warnings[0].error, SessionError::Command(_)));
    assert!(matches!(outcome.warnings[1].error, SessionError::Parse(_)));
}

#[tokio::test]
async fn enrichment_failure_keeps_the_matched_interface() {
    let device = ScriptedDevice::with_interfaces(&[("Gi0/1", "aa:bb:cc:dd:ee:ff")])
        .cdp(&[("Gi0/1", "SW-CORE", "Gi1/1")])
        .fail(SHOW_VERSION, SessionError::Connection("session dropped".to_string()));
    let session = Arc::new(MockSession::new().device("R1", device));

    let outcome = Locator::new(session, Config::default())
        .locate(&fleet(&["R1"]), target())
        .await;

    assert!(outcome.reports.is_empty());
    assert_eq!(outcome.warnings.len(), 1);
    let warning = &outcome.warnings[0];
    assert_eq!(warning.stage, Stage::IdentityQuery);
    assert_eq!(warning.matched_interface.as_deref(), Some("Gi0/1"));
}

#[tokio::test]
async fn target_on_several_devices_reports_each_sorted_by_name() {
    let session = Arc::new(
        MockSession::new()
            .device("SW-B", r1())
            .device("SW-A", r1())
            .device("SW-C", r2()),
    );

    let outcome = Locator::new(session, Config::default())
        .locate(&fleet(&["SW-C", "SW-B", "SW-A"]), target())
        .await;

    let names: Vec<&str> = outcome
        .reports
        .iter()
        .map(|r| r.found.device.name.as_str())
        .collect();
    assert_eq!(names, ["SW-A", "SW-B"]);
}

#[tokio::test(start_paused = true)]
async fn slow_command_counts_as_unreachable() {
    let slow = r2().latency(Duration::from_secs(60));
    let session = Arc::new(MockSession::new().device("R1", r1()).device("SLOW", slow));
    let config = Config::default().with_command_timeout(Duration::from_secs(5));

    let start = Instant::now();
    let outcome = Locator::new(session, config)
        .locate(&fleet(&["R1", "SLOW"]), target())
        .await;

    assert!(start.elapsed() < Duration::from_secs(6));
    assert_eq!(outcome.reports.len(), 1);
    assert_eq!(outcome.warnings.len(), 1);
    let warning = &outcome.warnings[0];
    assert_eq!(warning.device.name, "SLOW");
    assert!(matches!(warning.error, SessionError::Timeout(_)));
    assert!(warning.error.is_unreachable());
}

#[tokio::test(start_paused = true)]
async fn devices_are_scanned_concurrently() {
    let latency = Duration::from_millis(500);
    let mut session = MockSession::new();
    let names = ["R1", "R2", "R3", "R4", "R5", "R6"];
    for name in names {
        session = session.device(name, r2().latency(latency));
    }
    let session = Arc::new(session);

    let start = Instant::now();
    let outcome = Locator::new(session.clone(), Config::default())
        .locate(&fleet(&names), target())
        .await;

    assert_eq!(outcome.devices_scanned, names.len());
    assert!(start.elapsed() < latency * 2, "took {:?}", start.elapsed());
    assert_eq!(session.peak_in_flight(), names.len());
}

#[tokio::test(start_paused = true)]
async fn concurrency_is_bounded_by_max_sessions() {
    let latency = Duration::from_millis(500);
    let mut session = MockSession::new();
    let names = ["R1", "R2", "R3", "R4", "R5", "R6"];
    for name in names {
        session = session.device(name, r2().latency(latency));
    }
    let session = Arc::new(session);
    let config = Config::default().with_max_sessions(2);

    let start = Instant::now();
    let outcome = Locator::new(session.clone(), config)
        .locate(&fleet(&names), target())
        .await;

    assert_eq!(outcome.devices_scanned, names.len());
    assert!(session.peak_in_flight() <= 2);
    assert!(start.elapsed() >= latency * 3, "took {:?}", start.elapsed());
}

#[tokio::test(start_paused = true)]
async fn first_match_cancels_remaining_devices() {
    let session = Arc::new(
        MockSession::new()
            .device("FAST", r1())
            .device("SLOW-1", r2().latency(Duration::from_secs(20)))
            .device("SLOW-2", r1().latency(Duration::from_secs(20))),
    );
    let config = Config::default().with_first_match(true);

    let start = Instant::now();
    let outcome = Locator::new(session, config)
        .locate(&fleet(&["SLOW-1", "FAST", "SLOW-2"]), target())
        .await;

    assert!(start.elapsed() < Duration::from_secs(20));
    assert!(outcome.stopped_early);
    assert_eq!(outcome.reports.len(), 1);
    assert_eq!(outcome.reports[0].found.device.name, "FAST");
    assert_eq!(outcome.devices_scanned, 1);
}

#[tokio::test]
async fn progress_is_reported_once_per_device() {
    let session = Arc::new(MockSession::new().device("R1", r1()).device("R2", r2()));
    let seen = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&seen);

    let outcome = Locator::new(session, Config::default())
        .with_progress(move |_| {
            counter.fetch_add(1, Ordering::SeqCst);
        })
        .locate(&fleet(&["R1", "R2", "R3"]), target())
        .await;

    assert_eq!(seen.load(Ordering::SeqCst), 3);
    assert_eq!(outcome.devices_scanned, 3);
}

#[tokio::test]
async fn lldp_neighbors_are_read_when_configured() {
    let device = ScriptedDevice::with_interfaces(&[("GigabitEthernet0/1", "aa:bb:cc:dd:ee:ff")])
        .lldp(&[("Gi0/1", "SW-CORE", "Gi1/0/1"), ("Gi0/5", "linux-host", "ens3")])
        .version("FOC1234X0YZ");
    let session = Arc::new(MockSession::new().device("R1", device));
    let config = Config::default().with_neighbor_protocol(NeighborProtocol::Lldp);

    let outcome = Locator::new(session.clone(), config)
        .locate(&fleet(&["R1"]), target())
        .await;

    assert_eq!(outcome.reports.len(), 1);
    let neighbors = &outcome.reports[0].neighbors;
    assert_eq!(neighbors.len(), 1);
    assert_eq!(neighbors[0].remote_device_id, "SW-CORE");
    assert_eq!(neighbors[0].local_interface, "Gi0/1");
    assert_eq!(
        session.commands_for("R1"),
        [SHOW_INTERFACES, SHOW_LLDP_NEIGHBORS, SHOW_VERSION]
    );
}

#[tokio::test]
async fn oversized_session_limit_still_runs() {
    let session = Arc::new(MockSession::new().device("R1", r1()).device("R2", r2()));
    let config = Config::default().with_max_sessions(usize::MAX);

    let outcome = Locator::new(session, config)
        .locate(&fleet(&["R1", "R2"]), target())
        .await;

    assert_eq!(outcome.devices_scanned, 2);
    assert_eq!(outcome.reports.len(), 1);
}
