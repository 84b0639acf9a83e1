//! Named color palettes for the rendered chart.
//!
//! A fixed set of themes is embedded in the binary; a theme directory may add
//! more, and a directory file shadows the built-in theme of the same name.

mod builtin;
mod model;

pub use builtin::BuiltinTheme;
pub use model::{SeriesColors, Theme};

use crate::Result;
use camino::Utf8PathBuf;
use ohno::IntoAppError;
use std::fs;
use std::io;
use strum::IntoEnumIterator;

const LOG_TARGET: &str = "    themes";

/// Resolves theme names to [`Theme`] values.
#[derive(Debug, Clone, Default)]
pub struct ThemeStore {
    theme_dir: Option<Utf8PathBuf>,
}

impl ThemeStore {
    #[must_use]
    pub const fn new(theme_dir: Option<Utf8PathBuf>) -> Self {
        Self { theme_dir }
    }

    /// Theme names come straight from query strings; anything that could
    /// escape the theme directory is treated as unknown.
    fn is_valid_name(name: &str) -> bool {
        !name.is_empty() && name.bytes().all(|b| b.is_ascii_alphanumeric() || b == b'-' || b == b'_')
    }

    /// Load a theme by name.
    ///
    /// Returns `Ok(None)` when the name refers to no known theme, and an
    /// error only when a theme exists but cannot be read or parsed.
    pub fn load(&self, name: &str) -> Result<Option<Theme>> {
        if !Self::is_valid_name(name) {
            return Ok(None);
        }

        if let Some(dir) = &self.theme_dir {
            let path = dir.join(format!("{name}.json"));
            match fs::read_to_string(&path) {
                Ok(text) => {
                    log::debug!(target: LOG_TARGET, "Loading theme '{name}' from '{path}'");
                    return serde_json::from_str(&text)
                        .map(Some)
                        .into_app_err_with(|| format!("parsing theme file '{path}'"));
                }
                Err(e) if e.kind() == io::ErrorKind::NotFound => {}
                Err(e) => return Err(e).into_app_err_with(|| format!("reading theme file '{path}'")),
            }
        }

        BuiltinTheme::find(name).map(BuiltinTheme::load).transpose()
    }

    /// Names of all available themes, sorted, built-ins and directory files
    /// merged.
    pub fn names(&self) -> Result<Vec<String>> {
        let mut names: Vec<String> = BuiltinTheme::iter().map(|theme| theme.to_string()).collect();

        if let Some(dir) = &self.theme_dir {
            let entries = dir
                .read_dir_utf8()
                .into_app_err_with(|| format!("reading theme directory '{dir}'"))?;
            for entry in entries {
                let entry = entry.into_app_err_with(|| format!("reading theme directory '{dir}'"))?;
                let path = entry.path();
                if path.extension() == Some("json")
                    && let Some(stem) = path.file_stem()
                    && Self::is_valid_name(stem)
                {
                    names.push(stem.to_string());
                }
            }
        }

        names.sort_unstable();
        names.dedup();
        Ok(names)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use camino::Utf8Path;

    const CUSTOM_THEME: &str = r##"{
        "background_color": "#101010",
        "line_colors": {"views": "#ff0000", "clones": "#00ff00"},
        "point_colors": {"views": "#ff0000", "clones": "#00ff00"},
        "text_color": "#ffffff",
        "grid_color": "#333333"
    }"##;

    #[test]
    fn test_builtin_resolves_without_theme_dir() {
        let store = ThemeStore::default();
        let theme = store.load("default").unwrap().unwrap();
        assert!((theme.background_color.opacity() - 1.0).abs() < f32::EPSILON);
    }

    #[test]
    fn test_unknown_name_is_none() {
        let store = ThemeStore::default();
        assert!(store.load("no-such-theme").unwrap().is_none());
    }

    #[test]
    fn test_traversal_names_are_unknown() {
        let store = ThemeStore::default();
        assert!(store.load("../default").unwrap().is_none());
        assert!(store.load("a/b").unwrap().is_none());
        assert!(store.load("").unwrap().is_none());
    }

    #[test]
    fn test_theme_dir_adds_theme() {
        let dir = tempfile::tempdir().unwrap();
        let base = Utf8Path::from_path(dir.path()).unwrap();
        fs::write(base.join("corporate.json"), CUSTOM_THEME).unwrap();

        let store = ThemeStore::new(Some(base.to_path_buf()));
        let theme = store.load("corporate").unwrap().unwrap();
        assert_eq!(theme.text_color.hex(), "#ffffff");
    }

    #[test]
    fn test_theme_dir_shadows_builtin() {
        let dir = tempfile::tempdir().unwrap();
        let base = Utf8Path::from_path(dir.path()).unwrap();
        fs::write(base.join("default.json"), CUSTOM_THEME).unwrap();

        let store = ThemeStore::new(Some(base.to_path_buf()));
        let theme = store.load("default").unwrap().unwrap();
        assert_eq!(theme.background_color.hex(), "#101010");
    }

    #[test]
    fn test_malformed_theme_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let base = Utf8Path::from_path(dir.path()).unwrap();
        fs::write(base.join("broken.json"), "{ not json").unwrap();

        let store = ThemeStore::new(Some(base.to_path_buf()));
        let _ = store.load("broken").unwrap_err();
    }

    #[test]
    fn test_names_merges_and_dedups() {
        let dir = tempfile::tempdir().unwrap();
        let base = Utf8Path::from_path(dir.path()).unwrap();
        fs::write(base.join("default.json"), CUSTOM_THEME).unwrap();
        fs::write(base.join("corporate.json"), CUSTOM_THEME).unwrap();
        fs::write(base.join("notes.txt"), "not a theme").unwrap();

        let store = ThemeStore::new(Some(base.to_path_buf()));
        let names = store.names().unwrap();
        assert!(names.contains(&"corporate".to_string()));
        assert!(names.contains(&"tokyo-night".to_string()));
        assert_eq!(names.iter().filter(|n| n.as_str() == "default").count(), 1);
    }
}
