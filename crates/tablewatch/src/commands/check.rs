//! Availability sweep command handler.
//!
//! Resolves flags against config defaults, runs the sweep behind a
//! spinner, then renders the report in the chosen format. Per-venue
//! warnings always go to stderr so scripted output stays clean.

use std::io::IsTerminal;
use std::time::Duration;

use chrono::Local;
use indicatif::ProgressBar;
use owo_colors::OwoColorize;

use tablewatch_api::availability::LOOKAHEAD_DAYS;
use tablewatch_api::{
    AvailabilityChecker, AvailabilityQuery, AvailabilityReport, ResyClient, TimeWindow,
};
use tablewatch_config as config;

use crate::cli::{CheckArgs, GlobalOpts, OutputFormat};
use crate::error::{CliError, validation};
use crate::{grid, output};

pub async fn handle(args: CheckArgs, global: &GlobalOpts) -> Result<(), CliError> {
    let cfg = config::load_config_or_default();

    // Flags override config defaults.
    let party_size = args.party_size.unwrap_or(cfg.defaults.party_size);
    let start = match args.from {
        Some(ref s) => config::parse_time(s, "--from")?,
        None => cfg.defaults.window_start_time()?,
    };
    let end = match args.to {
        Some(ref s) => config::parse_time(s, "--to")?,
        None => cfg.defaults.window_end_time()?,
    };

    let window = TimeWindow::new(start, end).map_err(validation)?;
    let query = AvailabilityQuery::new(party_size, window).map_err(validation)?;

    let venues = cfg.venues();
    if venues.is_empty() {
        return Err(CliError::Validation {
            field: "venues".into(),
            reason: "no venues configured".into(),
        });
    }
    let venue_count = venues.len();

    let base_url = global
        .base_url
        .clone()
        .unwrap_or_else(|| cfg.api.base_url.clone());
    let api_key = global.api_key.as_ref().map_or_else(
        || config::resolve_api_key(&cfg.api),
        |key| secrecy::SecretString::from(key.clone()),
    );
    let mut transport = cfg.transport();
    if let Some(secs) = global.timeout {
        transport.timeout = Duration::from_secs(secs);
    }

    let client = ResyClient::from_api_key(&base_url, &api_key, &transport)?;
    let checker = AvailabilityChecker::new(client, venues)
        .with_concurrency(args.concurrency.unwrap_or(cfg.defaults.concurrency));

    let spinner = if global.quiet || !std::io::stderr().is_terminal() {
        None
    } else {
        let pb = ProgressBar::new_spinner();
        pb.set_message(format!(
            "Checking availability across {venue_count} venues..."
        ));
        pb.enable_steady_tick(Duration::from_millis(80));
        Some(pb)
    };

    let today = Local::now().date_naive();
    let report = checker.check_from(today, &query).await;

    if let Some(pb) = spinner {
        pb.finish_and_clear();
    }

    report_warnings(&report, global);

    match global.output {
        OutputFormat::Calendar => {
            if report.is_empty() {
                let message = format!(
                    "No availability found between {} and {} for the next {LOOKAHEAD_DAYS} days.",
                    window.start().format("%I:%M %p"),
                    window.end().format("%I:%M %p"),
                );
                output::print_output(&message, global.quiet);
            } else {
                output::print_output(&grid::render(&report, today, LOOKAHEAD_DAYS), global.quiet);
            }
        }
        OutputFormat::Json => {
            output::print_output(&output::render_json_pretty(&report), global.quiet);
        }
        OutputFormat::JsonCompact => {
            output::print_output(&output::render_json_compact(&report), global.quiet);
        }
        OutputFormat::Yaml => {
            output::print_output(&output::render_yaml(&report), global.quiet);
        }
        OutputFormat::Plain => output::print_output(&plain_lines(&report), global.quiet),
    }

    Ok(())
}

/// One tab-separated line per retained slot: venue, date, time, seating.
fn plain_lines(report: &AvailabilityReport) -> String {
    let mut lines = Vec::new();
    for (venue, availability) in &report.venues {
        for (date, slots) in &availability.slots {
            for slot in slots {
                lines.push(format!(
                    "{venue}\t{date}\t{}\t{}",
                    slot.time, slot.seating_type
                ));
            }
        }
    }
    lines.join("\n")
}

fn report_warnings(report: &AvailabilityReport, global: &GlobalOpts) {
    let color = output::should_color(&global.color);
    for warning in &report.warnings {
        if color {
            eprintln!(
                "{} {}: {}",
                "warning:".yellow().bold(),
                warning.venue,
                warning.reason
            );
        } else {
            eprintln!("warning: {}: {}", warning.venue, warning.reason);
        }
    }
}
