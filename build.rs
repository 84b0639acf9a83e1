//!! This build script validates the default settings file (`default_settings.yml`) and the built-in themes

#![allow(
    clippy::redundant_pub_crate,
    reason = "pub(crate) is correct in library context but appears redundant in build script"
)]
#![allow(dead_code, reason = "Some items may be unused in this build script context")]
#![allow(unused_imports, reason = "Some items may be unused in this build script context")]

use ohno::{AppError, IntoAppError};

type Result<T, E = ohno::AppError> = core::result::Result<T, E>;
use camino::Utf8PathBuf;
use std::env;
use std::fs;
use std::process;

#[path = "src/config/mod.rs"]
mod config;

#[path = "src/themes/model.rs"]
mod theme_model;

fn main() {
    match inner_main() {
        Ok(()) => {
            println!("cargo:rerun-if-changed=default_settings.yml");
            println!("cargo:rerun-if-changed=themes");
            println!("cargo:rerun-if-changed=src/config");
            process::exit(0);
        }
        Err(e) => {
            eprintln!("embedded data validation failed: {e:?}");
            process::exit(1);
        }
    }
}

fn inner_main() -> Result<()> {
    let manifest_dir = env::var("CARGO_MANIFEST_DIR").into_app_err("CARGO_MANIFEST_DIR should be set during build")?;
    let root = Utf8PathBuf::from(&manifest_dir);

    let settings_path = root.join("default_settings.yml");
    let _settings = config::Settings::load(&root, Some(&settings_path)).into_app_err("unable to load default_settings.yml")?;

    let themes_dir = root.join("themes");
    for entry in themes_dir.read_dir_utf8().into_app_err("unable to read the themes directory")? {
        let entry = entry.into_app_err("unable to read the themes directory")?;
        let path = entry.path();
        if path.extension() != Some("json") {
            continue;
        }

        let text = fs::read_to_string(path).into_app_err_with(|| format!("unable to read theme file '{path}'"))?;
        let _theme: theme_model::Theme = serde_json::from_str(&text).into_app_err_with(|| format!("theme file '{path}' is malformed"))?;
    }

    Ok(())
}
