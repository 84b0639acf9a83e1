//! Common processing logic shared between commands.

use camino::Utf8PathBuf;
use clap::Args;
use clap::ValueEnum;
use ohno::app_err;
use repo_traffic::Result;
use repo_traffic::config::Settings;
use repo_traffic::themes::ThemeStore;
use repo_traffic::traffic::Provider;

/// Log level for diagnostic output
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogLevel {
    /// No logging output
    None,
    /// Only error messages
    Error,
    /// Warning and error messages
    Warn,
    /// Info, warning, and error messages
    Info,
    /// Debug and above messages
    Debug,
    /// All messages including trace
    Trace,
}

/// Common arguments shared between commands
#[derive(Args, Debug)]
pub struct CommonArgs {
    /// GitHub personal access token
    #[arg(long, value_name = "TOKEN", env = "GITHUB_TOKEN")]
    pub github_token: Option<String>,

    /// GitHub user whose repositories are charted
    #[arg(long, short = 'u', value_name = "USER", env = "GITHUB_USERNAME")]
    pub username: Option<String>,

    /// Path to settings file [default: one of traffic.[toml|yml|yaml|json] ]
    #[arg(long, short = 'c', value_name = "PATH")]
    pub config: Option<Utf8PathBuf>,

    /// Directory of extra theme JSON files, shadowing built-ins by name
    #[arg(long, value_name = "PATH")]
    pub theme_dir: Option<Utf8PathBuf>,

    /// Set the logging level for diagnostic output
    #[arg(long, value_name = "LEVEL", default_value = "none", global = true)]
    pub log_level: LogLevel,
}

pub struct Common {
    pub settings: Settings,
    pub provider: Provider,
    pub themes: ThemeStore,
}

impl Common {
    /// Create a new Common processor with logger, settings, and GitHub client
    ///
    /// # Errors
    ///
    /// Returns an error if the settings cannot be loaded or the client cannot
    /// be initialized
    pub fn new(args: &CommonArgs) -> Result<Self> {
        Self::init_logging(args.log_level);

        let base_path = Utf8PathBuf::from(".");
        let mut settings = Settings::load(&base_path, args.config.as_ref())?;

        // Flags (and their environment variables) win over the settings file
        if args.username.is_some() {
            settings.username.clone_from(&args.username);
        }
        if args.theme_dir.is_some() {
            settings.theme_dir.clone_from(&args.theme_dir);
        }

        Ok(Self {
            provider: Provider::new(args.github_token.as_deref())?,
            themes: ThemeStore::new(settings.theme_dir.clone()),
            settings,
        })
    }

    /// The username, from flag, environment, or settings file.
    pub fn require_username(&self) -> Result<&str> {
        self.settings
            .username
            .as_deref()
            .ok_or_else(|| app_err!("no GitHub username: pass --username, set GITHUB_USERNAME, or add `username` to the settings file"))
    }

    /// Initialize logger based on log level
    fn init_logging(log_level: LogLevel) {
        if log_level == LogLevel::None {
            return;
        }

        let level = match log_level {
            LogLevel::None => return, // Already checked above, but being explicit
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
            LogLevel::Trace => "trace",
        };

        let env = env_logger::Env::default().filter_or("RUST_LOG", level);

        env_logger::Builder::from_env(env)
            .format_timestamp(None)
            .format_module_path(false)
            .format_target(matches!(log_level, LogLevel::Debug) || matches!(log_level, LogLevel::Trace))
            .init();
    }
}
