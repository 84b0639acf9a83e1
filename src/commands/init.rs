use camino::Utf8PathBuf;
use clap::Parser;
use ohno::{IntoAppError, bail};
use repo_traffic::Result;
use repo_traffic::config::{DEFAULT_SETTINGS_YAML, Settings};
use std::fs;

#[derive(Parser, Debug)]
pub struct InitArgs {
    /// Where to write the settings file
    #[arg(value_name = "PATH", default_value = "traffic.yml")]
    pub output: Utf8PathBuf,

    /// Overwrite an existing file
    #[arg(long)]
    pub force: bool,
}

/// Write a default settings file.
///
/// YAML output keeps the commented template; other extensions get a plain
/// serialization of the defaults.
pub fn init_settings(args: &InitArgs) -> Result<()> {
    if args.output.exists() && !args.force {
        bail!("'{}' already exists (use --force to overwrite)", args.output);
    }

    match args.output.extension().unwrap_or_default() {
        "yml" | "yaml" => {
            fs::write(&args.output, DEFAULT_SETTINGS_YAML).into_app_err_with(|| format!("writing settings to {}", args.output))?;
        }
        _ => Settings::default().save(&args.output)?,
    }

    println!("Wrote default settings to {}", args.output);
    Ok(())
}
