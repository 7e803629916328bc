//! Configuration command handler.

use tablewatch_config as config;

use crate::cli::{ConfigArgs, ConfigCommand, GlobalOpts};
use crate::error::CliError;
use crate::output;

pub fn handle(args: ConfigArgs, global: &GlobalOpts) -> Result<(), CliError> {
    match args.command {
        ConfigCommand::Init => init(global),
        ConfigCommand::Show => show(global),
        ConfigCommand::Path => {
            output::print_output(&config::config_path().display().to_string(), global.quiet);
            Ok(())
        }
    }
}

/// Write a starter config with the default venue directory, refusing to
/// clobber an existing file.
fn init(global: &GlobalOpts) -> Result<(), CliError> {
    let path = config::config_path();
    if path.exists() {
        return Err(CliError::Validation {
            field: "config".into(),
            reason: format!("config file already exists at {}", path.display()),
        });
    }

    let written = config::save_config(&config::Config::default())?;
    output::print_output(
        &format!("Wrote starter config to {}", written.display()),
        global.quiet,
    );
    Ok(())
}

/// Render the fully resolved configuration (defaults + file + env).
fn show(global: &GlobalOpts) -> Result<(), CliError> {
    let cfg = config::load_config_or_default();
    let rendered =
        toml::to_string_pretty(&cfg).map_err(config::ConfigError::Serialization)?;
    output::print_output(&rendered, global.quiet);
    Ok(())
}
