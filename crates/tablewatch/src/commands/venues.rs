//! Venue directory command handler.

use tabled::Tabled;

use tablewatch_config as config;

use crate::cli::GlobalOpts;
use crate::error::CliError;
use crate::output;

// ── Table row ───────────────────────────────────────────────────────

#[derive(Tabled)]
struct VenueRow {
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Venue ID")]
    id: u64,
}

impl From<&config::VenueEntry> for VenueRow {
    fn from(entry: &config::VenueEntry) -> Self {
        Self {
            name: entry.name.clone(),
            id: entry.id,
        }
    }
}

// ── Handler ─────────────────────────────────────────────────────────

pub fn handle(global: &GlobalOpts) -> Result<(), CliError> {
    let cfg = config::load_config_or_default();
    let out = output::render_list(
        &global.output,
        &cfg.venues,
        |entry| VenueRow::from(entry),
        |v| v.name.clone(),
    );
    output::print_output(&out, global.quiet);
    Ok(())
}
