use crate::Result;
use camino::{Utf8Path, Utf8PathBuf};
use core::net::SocketAddr;
use ohno::{IntoAppError, app_err};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;

/// The default settings YAML content, embedded from `default_settings.yml`
pub const DEFAULT_SETTINGS_YAML: &str = include_str!("../../default_settings.yml");

fn default_listen() -> SocketAddr {
    SocketAddr::from(([127, 0, 0, 1], 8080))
}

/// How long fetched traffic data is reused before hitting GitHub again
const fn default_cache_ttl_minutes() -> u64 {
    30
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct Settings {
    /// GitHub user whose repositories are charted when no `username` query
    /// parameter or flag is supplied
    #[serde(default)]
    pub username: Option<String>,

    /// Address the `serve` command listens on
    #[serde(default = "default_listen")]
    pub listen: SocketAddr,

    /// Extra directory of theme JSON files; files shadow built-in themes by name
    #[serde(default)]
    pub theme_dir: Option<Utf8PathBuf>,

    #[serde(default = "default_cache_ttl_minutes")]
    pub cache_ttl_minutes: u64,

    /// Repositories excluded from every chart
    #[serde(default)]
    pub exclude_repos: Vec<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            username: None,
            listen: default_listen(),
            theme_dir: None,
            cache_ttl_minutes: default_cache_ttl_minutes(),
            exclude_repos: Vec::new(),
        }
    }
}

impl Settings {
    /// Load settings from a file or use defaults
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed
    pub fn load(base_path: &Utf8Path, settings_path: Option<&Utf8PathBuf>) -> Result<Self> {
        let (final_path, text) = if let Some(path) = settings_path {
            let text = fs::read_to_string(path).into_app_err_with(|| format!("reading repo-traffic settings from {path}"))?;
            (path.clone(), text)
        } else {
            let candidates = [
                base_path.join("traffic.toml"),
                base_path.join("traffic.yml"),
                base_path.join("traffic.yaml"),
                base_path.join("traffic.json"),
            ];

            let mut found = None;
            for path in &candidates {
                match fs::read_to_string(path) {
                    Ok(text) => {
                        found = Some((path.clone(), text));
                        break;
                    }
                    Err(e) if e.kind() == io::ErrorKind::NotFound => {}
                    Err(e) => return Err(e).into_app_err_with(|| format!("reading repo-traffic settings from {path}")),
                }
            }

            let Some(result) = found else {
                return Ok(Self::default());
            };
            result
        };

        let extension = final_path.extension().unwrap_or_default();
        match extension {
            "toml" => toml::from_str(&text).into_app_err_with(|| format!("parsing TOML settings from {final_path}")),
            "yml" | "yaml" => serde_yaml::from_str(&text).into_app_err_with(|| format!("parsing YAML settings from {final_path}")),
            "json" => serde_json::from_str(&text).into_app_err_with(|| format!("parsing JSON settings from {final_path}")),
            _ => Err(app_err!("unsupported settings file extension: {extension}")),
        }
    }

    /// Save settings to a file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written or serialization fails
    pub fn save(&self, output_path: &Utf8Path) -> Result<()> {
        let extension = output_path.extension().unwrap_or_default();
        let text = match extension {
            "toml" => {
                toml::to_string_pretty(self).into_app_err_with(|| format!("serializing settings to TOML for saving to {output_path}"))?
            }
            "yml" | "yaml" => {
                serde_yaml::to_string(self).into_app_err_with(|| format!("serializing settings to YAML for saving to {output_path}"))?
            }
            "json" => serde_json::to_string_pretty(self)
                .into_app_err_with(|| format!("serializing settings to JSON for saving to {output_path}"))?,
            _ => return Err(app_err!("unsupported settings file extension: {extension}")),
        };

        fs::write(output_path, text).into_app_err_with(|| format!("writing settings to {output_path}"))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_when_no_file_found() {
        let dir = tempfile::tempdir().unwrap();
        let base = Utf8Path::from_path(dir.path()).unwrap();

        let settings = Settings::load(base, None).unwrap();
        assert_eq!(settings.listen, default_listen());
        assert_eq!(settings.cache_ttl_minutes, 30);
        assert!(settings.username.is_none());
        assert!(settings.exclude_repos.is_empty());
    }

    #[test]
    fn test_load_toml() {
        let dir = tempfile::tempdir().unwrap();
        let base = Utf8Path::from_path(dir.path()).unwrap();
        fs::write(
            base.join("traffic.toml"),
            "username = \"octocat\"\nlisten = \"0.0.0.0:9000\"\nexclude_repos = [\"dotfiles\"]\n",
        )
        .unwrap();

        let settings = Settings::load(base, None).unwrap();
        assert_eq!(settings.username.as_deref(), Some("octocat"));
        assert_eq!(settings.listen, SocketAddr::from(([0, 0, 0, 0], 9000)));
        assert_eq!(settings.exclude_repos, vec!["dotfiles".to_string()]);
    }

    #[test]
    fn test_search_order_prefers_toml() {
        let dir = tempfile::tempdir().unwrap();
        let base = Utf8Path::from_path(dir.path()).unwrap();
        fs::write(base.join("traffic.toml"), "username = \"from-toml\"\n").unwrap();
        fs::write(base.join("traffic.yml"), "username: from-yaml\n").unwrap();

        let settings = Settings::load(base, None).unwrap();
        assert_eq!(settings.username.as_deref(), Some("from-toml"));
    }

    #[test]
    fn test_explicit_path_dispatches_on_extension() {
        let dir = tempfile::tempdir().unwrap();
        let base = Utf8Path::from_path(dir.path()).unwrap();
        let path = base.join("custom.json");
        fs::write(&path, "{\"username\": \"from-json\"}").unwrap();

        let settings = Settings::load(base, Some(&path)).unwrap();
        assert_eq!(settings.username.as_deref(), Some("from-json"));
    }

    #[test]
    fn test_unknown_extension_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let base = Utf8Path::from_path(dir.path()).unwrap();
        let path = base.join("custom.ini");
        fs::write(&path, "username = nope").unwrap();

        let _ = Settings::load(base, Some(&path)).unwrap_err();
    }

    #[test]
    fn test_unknown_field_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let base = Utf8Path::from_path(dir.path()).unwrap();
        let path = base.join("custom.yml");
        fs::write(&path, "usrname: typo\n").unwrap();

        let _ = Settings::load(base, Some(&path)).unwrap_err();
    }

    #[test]
    fn test_save_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let base = Utf8Path::from_path(dir.path()).unwrap();
        let path = base.join("out.toml");

        let mut settings = Settings::default();
        settings.username = Some("octocat".to_string());
        settings.save(&path).unwrap();

        let reloaded = Settings::load(base, Some(&path)).unwrap();
        assert_eq!(reloaded.username.as_deref(), Some("octocat"));
    }

    #[test]
    fn test_embedded_default_settings_parse() {
        let settings: Settings = serde_yaml::from_str(DEFAULT_SETTINGS_YAML).unwrap();
        assert_eq!(settings.cache_ttl_minutes, 30);
    }
}
