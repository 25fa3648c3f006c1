use std::io::{self, BufRead, Write};
use std::path::Path;
use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::{Context, bail};
use colored::*;
use tracing::{Instrument, info_span};

use crate::{mprint, terminal::{colors, format, print, spinner}};
use machunt_common::config::Config;
use machunt_common::inventory::Inventory;
use machunt_common::network::HardwareAddress;
use machunt_common::report::{FleetOutcome, Report};
use machunt_common::session::DeviceSession;
use machunt_common::vendors::VendorRepository;
use machunt_core::Locator;
use machunt_core::vendors::MacOuiRepo;

pub async fn locate(
    target: Option<HardwareAddress>,
    inventory_path: &Path,
    session: Arc<dyn DeviceSession>,
    cfg: &Config,
) -> anyhow::Result<()> {
    let inventory = Inventory::load(inventory_path)
        .with_context(|| format!("loading inventory from {}", inventory_path.display()))?;

    let target = match target {
        Some(target) => target,
        None => prompt_target()?,
    };

    print::header("getting ready for the hunt", cfg.quiet);
    print_target(target);

    let span = info_span!("locate", indicatif.pb_show = true);
    spinner::start_hunt_progress(&span, inventory.len())?;

    let progress_span = span.clone();
    let locator = Locator::new(session, cfg.clone())
        .with_progress(move |_| spinner::report_device_done(&progress_span));

    let start_time: Instant = Instant::now();
    let outcome = locator
        .locate(inventory.devices(), target)
        .instrument(span)
        .await;

    hunt_ends(&outcome, target, start_time.elapsed(), cfg);
    Ok(())
}

fn prompt_target() -> anyhow::Result<HardwareAddress> {
    let mut stdout = io::stdout();
    write!(stdout, "Enter the MAC address you wish to find: ")?;
    stdout.flush()?;

    let mut line = String::new();
    io::stdin().lock().read_line(&mut line)?;
    let line = line.trim();
    if line.is_empty() {
        bail!("no MAC address given");
    }
    Ok(line.parse()?)
}

fn print_target(target: HardwareAddress) {
    let mut details: Vec<format::Detail> = vec![
        ("Target".to_string(), target.to_string().color(colors::MAC_ADDR)),
        ("Cisco".to_string(), target.to_cisco().normal()),
    ];
    if let Some(vendor) = MacOuiRepo.get_vendor(target) {
        details.push(("Vendor".to_string(), vendor.normal()));
    }
    print::as_tree_one_level(details);
}

fn hunt_ends(outcome: &FleetOutcome, target: HardwareAddress, total_time: Duration, cfg: &Config) {
    if !outcome.is_found() {
        not_found(target, cfg);
    } else {
        for (idx, report) in outcome.reports.iter().enumerate() {
            print_report(report, cfg);
            if idx + 1 != outcome.reports.len() {
                mprint!();
            }
        }
    }

    print_warnings(outcome, cfg);
    print_summary(outcome, total_time, cfg);
}

fn not_found(target: HardwareAddress, cfg: &Config) {
    print::header("target not found", cfg.quiet);
    print::no_results();
    print::print_status(format!("{target} was not seen on any reachable device"));
}

fn print_report(report: &Report, cfg: &Config) {
    print::header("target identified", cfg.quiet);
    mprint!(&format::presence_line(report));

    if cfg.quiet < 2 {
        print::as_tree_one_level(format::identity_to_details(report));
    }

    let neighbors = format::neighbor_lines(report);
    if neighbors.is_empty() {
        return;
    }

    mprint!();
    print::header("remote connection details", cfg.quiet);
    for line in &neighbors {
        print::print_status(line);
    }
}

fn print_warnings(outcome: &FleetOutcome, cfg: &Config) {
    if outcome.warnings.is_empty() {
        return;
    }

    mprint!();
    print::header("devices with errors", cfg.quiet);
    for warning in &outcome.warnings {
        print::print_status(format::warning_line(warning));
    }
}

fn print_summary(outcome: &FleetOutcome, total_time: Duration, cfg: &Config) {
    let output: String = summary_line(outcome, total_time);

    match cfg.quiet {
        0 => {
            print::fat_separator();
            print::centerln(&output);
        }
        _ => {
            mprint!();
            print::print_status(&output);
        }
    }

    if !outcome.warnings.is_empty() {
        let failed = format!("{} devices could not be searched", outcome.warnings.len());
        print::print_status(failed.color(colors::WARNING).to_string());
    }

    if outcome.stopped_early {
        print::print_status("Stopped after the first match, remaining devices were skipped");
    }
    print::end_of_program();
}

fn summary_line(outcome: &FleetOutcome, total_time: Duration) -> String {
    let total_time: ColoredString = format!("{:.2}s", total_time.as_secs_f64()).bold().yellow();
    let result: ColoredString = match outcome.reports.len() {
        0 => "not found".bold().red(),
        1 => "found on 1 device".bold().green(),
        n => format!("found on {n} devices").bold().green(),
    };
    format!(
        "Hunt Complete: {result} after {} devices in {total_time}",
        outcome.devices_scanned
    )
    .color(colors::TEXT_DEFAULT)
    .to_string()
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
