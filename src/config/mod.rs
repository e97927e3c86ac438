//! Configuration layer: typed settings with layered precedence (file → env → CLI).

use std::{
    fmt,
    num::{NonZeroU32, NonZeroU64},
    path::PathBuf,
    str::FromStr,
    time::Duration,
};

use clap::Parser;
use config::{Config, Environment, File};
use serde::Deserialize;
use thiserror::Error;
use tracing::level_filters::LevelFilter;
use url::Url;

const DEFAULT_CONFIG_BASENAME: &str = "config/default";
const LOCAL_CONFIG_BASENAME: &str = "docintel";
const DEFAULT_BASE_URL: &str = "http://localhost:8000/";
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;
const DEFAULT_POLL_INTERVAL_MS: u64 = 5_000;
const DEFAULT_POLL_MAX_ATTEMPTS: u64 = 720;
const DEFAULT_EXPORT_DIR: &str = ".";

mod cli;

pub use cli::{
    AnalyzeArgs, CliArgs, Command, ExportArgs, GlobalOverrides, OutputFormat, RenderArgs, StatusArgs,
};

/// Fully resolved runtime settings.
#[derive(Debug, Clone)]
pub struct Settings {
    pub api: ApiSettings,
    pub auth: AuthSettings,
    pub polling: PollingSettings,
    pub logging: LoggingSettings,
    pub export: ExportSettings,
}

#[derive(Debug, Clone)]
pub struct ApiSettings {
    pub base_url: Url,
    pub request_timeout: Duration,
}

#[derive(Clone, Default)]
pub struct AuthSettings {
    pub token_file: Option<PathBuf>,
    pub token: Option<String>,
}

impl fmt::Debug for AuthSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthSettings")
            .field("token_file", &self.token_file)
            .field("token", &self.token.as_ref().map(|_| "***"))
            .finish()
    }
}

#[derive(Debug, Clone)]
pub struct PollingSettings {
    pub interval: Duration,
    /// `None` polls until the task settles.
    pub max_attempts: Option<NonZeroU32>,
}

impl Default for PollingSettings {
    fn default() -> Self {
        Self {
            interval: Duration::from_millis(DEFAULT_POLL_INTERVAL_MS),
            max_attempts: NonZeroU32::new(DEFAULT_POLL_MAX_ATTEMPTS as u32),
        }
    }
}

#[derive(Debug, Clone)]
pub struct LoggingSettings {
    pub level: LevelFilter,
    pub format: LogFormat,
}

#[derive(Debug, Clone, Copy)]
pub enum LogFormat {
    Json,
    Compact,
}

#[derive(Debug, Clone)]
pub struct ExportSettings {
    pub directory: PathBuf,
}

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to build configuration: {0}")]
    Build(#[from] config::ConfigError),
    #[error("invalid configuration for `{key}`: {reason}")]
    Invalid { key: &'static str, reason: String },
}

impl LoadError {
    fn invalid(key: &'static str, reason: impl Into<String>) -> Self {
        Self::Invalid {
            key,
            reason: reason.into(),
        }
    }
}

/// Load settings using the configured precedence (file → environment → CLI).
pub fn load(cli: &CliArgs) -> Result<Settings, LoadError> {
    let mut builder = Config::builder()
        .add_source(File::with_name(DEFAULT_CONFIG_BASENAME).required(false))
        .add_source(File::with_name(LOCAL_CONFIG_BASENAME).required(false));

    if let Some(path) = cli.config_file.as_ref() {
        builder = builder.add_source(File::from(path.as_path()).required(true));
    }

    builder = builder.add_source(Environment::with_prefix("DOCINTEL").separator("__"));

    let mut raw: RawSettings = builder.build()?.try_deserialize()?;

    raw.apply_global_overrides(&cli.overrides);
    if let Some(token) = cli.token_env.as_ref() {
        raw.auth.token = Some(token.clone());
    }
    match &cli.command {
        Command::Analyze(args) => raw.apply_export_dir(args.out_dir.as_ref()),
        Command::Export(args) => raw.apply_export_dir(args.out_dir.as_ref()),
        Command::Options | Command::Status(_) | Command::Render(_) => {}
    }

    Settings::from_raw(raw)
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
struct RawSettings {
    api: RawApiSettings,
    auth: RawAuthSettings,
    polling: RawPollingSettings,
    logging: RawLoggingSettings,
    export: RawExportSettings,
}

impl RawSettings {
    fn apply_global_overrides(&mut self, overrides: &GlobalOverrides) {
        if let Some(url) = overrides.api_url.as_ref() {
            self.api.base_url = Some(url.clone());
        }
        if let Some(path) = overrides.token_file.as_ref() {
            self.auth.token_file = Some(path.clone());
        }
        if let Some(level) = overrides.log_level.as_ref() {
            self.logging.level = Some(level.clone());
        }
        if let Some(json) = overrides.log_json {
            self.logging.json = Some(json);
        }
        if let Some(interval) = overrides.poll_interval_ms {
            self.polling.interval_ms = Some(interval);
        }
        if let Some(attempts) = overrides.poll_max_attempts {
            self.polling.max_attempts = Some(attempts);
        }
    }

    fn apply_export_dir(&mut self, out_dir: Option<&PathBuf>) {
        if let Some(dir) = out_dir {
            self.export.directory = Some(dir.clone());
        }
    }
}

impl Settings {
    fn from_raw(raw: RawSettings) -> Result<Self, LoadError> {
        let RawSettings {
            api,
            auth,
            polling,
            logging,
            export,
        } = raw;

        let api = build_api_settings(api)?;
        let auth = build_auth_settings(auth);
        let polling = build_polling_settings(polling)?;
        let logging = build_logging_settings(logging)?;
        let export = build_export_settings(export)?;

        Ok(Self {
            api,
            auth,
            polling,
            logging,
            export,
        })
    }
}

fn build_api_settings(api: RawApiSettings) -> Result<ApiSettings, LoadError> {
    let raw_url = api
        .base_url
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
        .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
    let base_url = Url::parse(&raw_url)
        .map_err(|err| LoadError::invalid("api.base_url", format!("failed to parse: {err}")))?;
    if !matches!(base_url.scheme(), "http" | "https") {
        return Err(LoadError::invalid(
            "api.base_url",
            format!("unsupported scheme `{}`", base_url.scheme()),
        ));
    }

    let timeout_secs = api
        .request_timeout_seconds
        .unwrap_or(DEFAULT_REQUEST_TIMEOUT_SECS);
    let timeout_secs = NonZeroU64::new(timeout_secs).ok_or_else(|| {
        LoadError::invalid("api.request_timeout_seconds", "must be greater than zero")
    })?;

    Ok(ApiSettings {
        base_url,
        request_timeout: Duration::from_secs(timeout_secs.get()),
    })
}

fn build_auth_settings(auth: RawAuthSettings) -> AuthSettings {
    let token_file = auth
        .token_file
        .filter(|path| !path.as_os_str().is_empty());
    let token = auth.token.and_then(|value| {
        let trimmed = value.trim();
        (!trimmed.is_empty()).then(|| trimmed.to_string())
    });
    AuthSettings { token_file, token }
}

fn build_polling_settings(polling: RawPollingSettings) -> Result<PollingSettings, LoadError> {
    let interval_ms = polling.interval_ms.unwrap_or(DEFAULT_POLL_INTERVAL_MS);
    if interval_ms == 0 {
        return Err(LoadError::invalid(
            "polling.interval_ms",
            "must be greater than zero",
        ));
    }

    let max_attempts = match polling.max_attempts.unwrap_or(DEFAULT_POLL_MAX_ATTEMPTS) {
        0 => None,
        value => Some(non_zero_u32(value, "polling.max_attempts")?),
    };

    Ok(PollingSettings {
        interval: Duration::from_millis(interval_ms),
        max_attempts,
    })
}

fn build_logging_settings(logging: RawLoggingSettings) -> Result<LoggingSettings, LoadError> {
    let level = match logging.level {
        Some(level) => LevelFilter::from_str(level.as_str()).map_err(|err| {
            LoadError::invalid("logging.level", format!("failed to parse: {err}"))
        })?,
        None => LevelFilter::INFO,
    };

    let format = if logging.json.unwrap_or(false) {
        LogFormat::Json
    } else {
        LogFormat::Compact
    };

    Ok(LoggingSettings { level, format })
}

fn build_export_settings(export: RawExportSettings) -> Result<ExportSettings, LoadError> {
    let directory = export
        .directory
        .unwrap_or_else(|| PathBuf::from(DEFAULT_EXPORT_DIR));
    if directory.as_os_str().is_empty() {
        return Err(LoadError::invalid(
            "export.directory",
            "directory cannot be empty",
        ));
    }
    Ok(ExportSettings { directory })
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
struct RawApiSettings {
    base_url: Option<String>,
    request_timeout_seconds: Option<u64>,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
struct RawAuthSettings {
    token_file: Option<PathBuf>,
    #[serde(skip)]
    token: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
struct RawPollingSettings {
    interval_ms: Option<u64>,
    max_attempts: Option<u64>,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
struct RawLoggingSettings {
    level: Option<String>,
    json: Option<bool>,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
struct RawExportSettings {
    directory: Option<PathBuf>,
}

fn non_zero_u32(value: u64, key: &'static str) -> Result<NonZeroU32, LoadError> {
    if value == 0 {
        return Err(LoadError::invalid(key, "must be greater than zero"));
    }
    let value_u32: u32 = value
        .try_into()
        .map_err(|_| LoadError::invalid(key, "value exceeds supported range for u32"))?;
    NonZeroU32::new(value_u32).ok_or_else(|| LoadError::invalid(key, "must be greater than zero"))
}

/// Resolve configuration using the supplied CLI arguments, returning both for downstream use.
pub fn load_with_cli() -> Result<(CliArgs, Settings), LoadError> {
    let args = CliArgs::parse();
    let settings = load(&args)?;
    Ok((args, settings))
}

#[cfg(test)]
mod tests;
