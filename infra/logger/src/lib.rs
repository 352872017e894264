//! # Logger
//!
//! Installs the global `tracing` subscriber for bootcfg binaries: a compact console layer, an
//! optional rolling log file (plain or JSON lines) written through a non-blocking worker, and an
//! env filter that merges a default level, programmatic directives and `RUST_LOG`.
//!
//! Either configure it by hand with [`Logger::builder`], or straight from the `[logging]`
//! section of the application config with [`Logger::from_config`].
//!
//! ## Example
//!
//! ```rust
//! # use bootcfg_logger::{Logger, LevelFilter};
//!
//! let _logger = Logger::builder()
//!     .name("bootcfg")
//!     .console(true)
//!     .level(LevelFilter::DEBUG)
//!     .init()
//!     .unwrap();
//! ```

mod error;

pub use crate::error::{LoggerError, LoggerErrorExt};
pub use tracing::level_filters::LevelFilter;
pub use tracing_appender::rolling::Rotation;

use bootcfg_domain::config::LoggingConfig;
use private::Sealed;
use std::fs;
use std::marker::PhantomData;
use std::path::PathBuf;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::RollingFileAppender;
use tracing_subscriber::filter::Directive;
use tracing_subscriber::fmt::layer;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

const DEFAULT_MAX_FILES: usize = 7;
const LOG_FILE_SUFFIX: &str = "log";

#[derive(Debug, Clone)]
struct Settings {
    console: bool,
    path: Option<PathBuf>,
    level: LevelFilter,
    rotation: Rotation,
    max_files: usize,
    json: bool,
    env_filter: Option<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            console: true,
            path: None,
            level: LevelFilter::INFO,
            rotation: Rotation::DAILY,
            max_files: DEFAULT_MAX_FILES,
            json: false,
            env_filter: None,
        }
    }
}

impl Settings {
    fn from_config(config: &LoggingConfig) -> Result<Self, LoggerError> {
        let level = config
            .level
            .trim()
            .parse::<LevelFilter>()
            .map_err(|_| LoggerError::InvalidLevel { level: config.level.clone() })?;

        Ok(Self {
            console: config.console,
            path: config.directory.clone(),
            level,
            json: config.json,
            env_filter: config.filter.clone(),
            ..Self::default()
        })
    }
}

#[derive(Debug)]
pub struct NoName;
#[derive(Debug)]
pub struct WithName(String);
#[derive(Debug)]
pub struct NoFile;
#[derive(Debug)]
pub struct WithFile;

mod private {
    pub trait Sealed {}
}
impl Sealed for NoName {}
impl Sealed for WithName {}
impl Sealed for NoFile {}
impl Sealed for WithFile {}

/// Builder for the global subscriber. A name is required before [`LoggerBuilder::init`];
/// file options become available once [`LoggerBuilder::path`] is set.
#[derive(Debug)]
pub struct LoggerBuilder<N: Sealed = NoName, F: Sealed = NoFile> {
    settings: Settings,
    name: N,
    file_state: PhantomData<F>,
}

impl<F: Sealed> LoggerBuilder<NoName, F> {
    /// Names the logger; rolling files are prefixed with it (`bootcfg.2026-10-16.log`).
    pub fn name(self, name: impl Into<String>) -> LoggerBuilder<WithName, F> {
        LoggerBuilder { name: WithName(name.into()), settings: self.settings, file_state: PhantomData }
    }
}

impl LoggerBuilder<WithName, WithFile> {
    #[must_use = "The builder must be configured before it can be used to initialize the logger."]
    pub const fn max_files(mut self, max: usize) -> Self {
        self.settings.max_files = max;
        self
    }

    #[must_use = "The builder must be configured before it can be used to initialize the logger."]
    pub const fn rotation(mut self, rotation: Rotation) -> Self {
        self.settings.rotation = rotation;
        self
    }

    /// Writes the log file as JSON lines.
    #[must_use = "The builder must be configured before it can be used to initialize the logger."]
    pub const fn json(mut self, enabled: bool) -> Self {
        self.settings.json = enabled;
        self
    }
}

impl<F: Sealed> LoggerBuilder<WithName, F> {
    #[must_use = "The builder must be configured before it can be used to initialize the logger."]
    pub const fn level(mut self, level: LevelFilter) -> Self {
        self.settings.level = level;
        self
    }

    /// Extra filter directives (e.g. `bootcfg_resolver=debug`). `RUST_LOG` is still honored.
    #[must_use = "The builder must be configured before it can be used to initialize the logger."]
    pub fn env_filter(mut self, filter: impl Into<String>) -> Self {
        self.settings.env_filter = Some(filter.into());
        self
    }

    #[must_use = "The builder must be configured before it can be used to initialize the logger."]
    pub const fn console(mut self, enabled: bool) -> Self {
        self.settings.console = enabled;
        self
    }

    /// Directory for rolling log files.
    pub fn path(self, path: impl Into<PathBuf>) -> LoggerBuilder<WithName, WithFile> {
        let mut settings = self.settings;
        settings.path = Some(path.into());
        LoggerBuilder { settings, name: self.name, file_state: PhantomData }
    }

    /// Installs the global subscriber.
    ///
    /// Keep the returned [`Logger`] alive until shutdown: it owns the worker that flushes the
    /// log file.
    ///
    /// # Errors
    /// * [`LoggerError::Subscriber`] if a global subscriber is already installed.
    /// * [`LoggerError::InvalidConfiguration`] / [`LoggerError::InvalidFilter`] for bad settings.
    /// * [`LoggerError::Io`] / [`LoggerError::Appender`] if the log directory cannot be used.
    pub fn init(self) -> Result<Logger, LoggerError> {
        install(&self.name.0, self.settings)
    }
}

/// Handle to the installed logging system.
///
/// Holds the background worker guard of the file writer; drop it only at shutdown.
#[must_use = "Dropping this handle will stop background logging threads."]
#[derive(Debug)]
pub struct Logger {
    guard: Option<WorkerGuard>,
}

impl Logger {
    #[must_use = "The builder must be configured before it can be used to initialize the logger."]
    pub fn builder() -> LoggerBuilder {
        LoggerBuilder { settings: Settings::default(), name: NoName, file_state: PhantomData }
    }

    /// Installs the global subscriber described by a `[logging]` config section.
    ///
    /// # Errors
    /// [`LoggerError::InvalidLevel`] for an unknown `level`, otherwise as [`LoggerBuilder::init`].
    pub fn from_config(name: &str, config: &LoggingConfig) -> Result<Self, LoggerError> {
        install(name, Settings::from_config(config)?)
    }

    /// Whether a log file is being written.
    #[must_use]
    pub const fn writes_file(&self) -> bool {
        self.guard.is_some()
    }
}

impl Drop for Logger {
    fn drop(&mut self) {
        if self.guard.is_some() {
            tracing::debug!("Flushing log file");
        }
    }
}

fn install(name: &str, settings: Settings) -> Result<Logger, LoggerError> {
    validate(name, &settings)?;
    let env_filter = build_env_filter(&settings)?;

    let mut layers = Vec::new();
    if settings.console {
        layers.push(layer().compact().with_ansi(true).with_writer(std::io::stderr).boxed());
    }

    let guard = match settings.path {
        Some(path) => {
            fs::create_dir_all(&path).context(format!("Creating {}", path.display()))?;

            let appender = RollingFileAppender::builder()
                .rotation(settings.rotation)
                .filename_prefix(name)
                .filename_suffix(LOG_FILE_SUFFIX)
                .max_log_files(settings.max_files)
                .build(&path)
                .context(format!("Log directory {}", path.display()))?;
            let (writer, guard) = tracing_appender::non_blocking(appender);

            let file_layer = layer().with_writer(writer).with_ansi(false);
            layers.push(if settings.json { file_layer.json().boxed() } else { file_layer.boxed() });
            Some(guard)
        },
        None => None,
    };

    tracing_subscriber::registry().with(env_filter).with(layers).try_init()?;
    Ok(Logger { guard })
}

fn validate(name: &str, settings: &Settings) -> Result<(), LoggerError> {
    if name.trim().is_empty() {
        return Err(LoggerError::InvalidConfiguration { message: "logger name cannot be empty".into() });
    }
    if settings.max_files == 0 {
        return Err(LoggerError::InvalidConfiguration {
            message: "max_files must be greater than zero".into(),
        });
    }
    if !settings.console && settings.path.is_none() {
        return Err(LoggerError::InvalidConfiguration {
            message: "no output enabled: turn on console or set a log directory".into(),
        });
    }
    Ok(())
}

fn build_env_filter(settings: &Settings) -> Result<EnvFilter, LoggerError> {
    let rust_log = std::env::var(EnvFilter::DEFAULT_ENV).ok();
    env_filter_from(settings, rust_log.as_deref())
}

/// `RUST_LOG` entries are parsed leniently; the configured directives are layered on top and must
/// all parse.
fn env_filter_from(settings: &Settings, rust_log: Option<&str>) -> Result<EnvFilter, LoggerError> {
    let mut filter = EnvFilter::builder()
        .with_default_directive(settings.level.into())
        .parse_lossy(rust_log.unwrap_or_default());

    let Some(extra) = settings.env_filter.as_deref() else {
        return Ok(filter);
    };
    for directive in extra.split(',').map(str::trim).filter(|d| !d.is_empty()) {
        let directive = directive.parse::<Directive>().map_err(|e| LoggerError::InvalidFilter {
            filter: extra.to_owned(),
            reason: e.to_string(),
        })?;
        filter = filter.add_directive(directive);
    }
    Ok(filter)
}
