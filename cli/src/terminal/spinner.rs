use indicatif::ProgressStyle;
use tracing::Span;
use tracing_indicatif::IndicatifLayer;
use tracing_indicatif::span_ext::IndicatifSpanExt;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::filter::Directive;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use crate::terminal::logging::MachuntFormatter;
use crate::terminal::print::PRINT_TARGET;

const TICK_STRINGS: &[&str] = &[
    "▁▁▁▁▁",
    "▁▂▂▂▁",
    "▁▄▂▄▁",
    "▂▄▆▄▂",
    "▄▆█▆▄",
    "▂▄▆▄▂",
    "▁▄▂▄▁",
    "▁▂▂▂▁",
    "▁▁▁▁▁",
];

/// Installs the global subscriber.
///
/// `RUST_LOG` wins when set; otherwise `verbose` selects debug and any quiet
/// level hides informational logs. Printed output is never filtered.
pub fn init_logging(verbose: bool, quiet: u8) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_level(verbose, quiet)));
    let filter = with_print_target(filter);

    let indicatif_layer = IndicatifLayer::new();

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .event_format(MachuntFormatter)
                .with_writer(indicatif_layer.get_stdout_writer()),
        )
        .with(indicatif_layer)
        .init();
}

fn default_level(verbose: bool, quiet: u8) -> &'static str {
    match (verbose, quiet) {
        (true, _) => "debug",
        (false, 0) => "info",
        (false, _) => "warn",
    }
}

/// Printed output stays visible whatever the log level.
fn with_print_target(filter: EnvFilter) -> EnvFilter {
    match format!("{PRINT_TARGET}=info").parse::<Directive>() {
        Ok(directive) => filter.add_directive(directive),
        Err(_) => filter,
    }
}

/// Turns `span` into a progress bar over `total` devices.
pub fn start_hunt_progress(span: &Span, total: usize) -> anyhow::Result<()> {
    let style = ProgressStyle::with_template("{spinner:.blue} {msg} {pos}/{len} devices")?
        .tick_strings(TICK_STRINGS);

    span.pb_set_style(&style);
    span.pb_set_length(total as u64);
    span.pb_set_message("Scanning interface tables");
    Ok(())
}

pub fn report_device_done(span: &Span) {
    span.pb_inc(1);
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
    use tracing::Level;

    #[test]
    fn quiet_filter_still_shows_printed_output() {
        let filter = with_print_target(EnvFilter::new(default_level(false, 1)));
        let subscriber = tracing_subscriber::registry().with(filter);

        tracing::subscriber::with_default(subscriber, || {
            assert!(tracing::enabled!(target: PRINT_TARGET, Level::INFO));
            assert!(!tracing::enabled!(target: "machunt::commands::locate", Level::INFO));
            assert!(tracing::enabled!(target: "machunt::commands::locate", Level::WARN));
        });
    }

    #[test]
    fn verbose_wins_over_quiet() {
        assert_eq!(default_level(true, 2), "debug");
        assert_eq!(default_level(false, 0), "info");
    }
}
