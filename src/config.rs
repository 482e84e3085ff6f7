use clap::{Parser, ValueEnum};
use thiserror::Error;

use crate::geometry::Bounds;
use crate::session::SessionSettings;

/// Upper bound for `point_count`; each restart allocates this many points.
pub const MAX_POINT_COUNT: usize = 1_000_000;
/// Upper bound for `max_k`; centroids are regenerated on every `k` change.
pub const MAX_CLUSTERS: usize = 64;

/// Log output format for the tracing subscriber.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum LogFormat {
    /// One JSON object per event (default)
    #[default]
    Json,
    /// Human-readable single-line events
    Compact,
}

#[derive(Parser, Debug, Clone, PartialEq)]
#[command(author, version, about, long_about = None)]
pub struct Config {
    /// Drawing area width
    #[arg(long, env = "LLOYD_CANVAS_WIDTH", default_value = "600")]
    pub width: f64,

    /// Drawing area height
    #[arg(long, env = "LLOYD_CANVAS_HEIGHT", default_value = "400")]
    pub height: f64,

    /// Margin kept free of generated points on every side
    #[arg(long, env = "LLOYD_MARGIN", default_value = "20")]
    pub margin: f64,

    /// Number of points generated per restart
    #[arg(long = "points", env = "LLOYD_POINT_COUNT", default_value = "40")]
    pub point_count: usize,

    /// Initial cluster count
    #[arg(long = "k", env = "LLOYD_DEFAULT_K", default_value = "3")]
    pub initial_k: usize,

    /// Largest cluster count a user may select
    #[arg(long, env = "LLOYD_MAX_K", default_value = "6")]
    pub max_k: usize,

    /// RNG seed for reproducible sessions (random when unset)
    #[arg(long, env = "LLOYD_SEED")]
    pub seed: Option<u64>,

    /// Log output format
    #[arg(long, env = "LLOYD_LOG_FORMAT", value_enum, default_value = "json")]
    pub log_format: LogFormat,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error(transparent)]
    Cli(#[from] clap::Error),
    #[error("invalid value for {name}: {reason}")]
    Invalid { name: &'static str, reason: String },
}

impl Default for Config {
    fn default() -> Self {
        Self {
            width: 600.0,
            height: 400.0,
            margin: 20.0,
            point_count: 40,
            initial_k: 3,
            max_k: 6,
            seed: None,
            log_format: LogFormat::Json,
        }
    }
}

impl Config {
    /// コマンドライン引数（未指定の項目は環境変数）から設定を読み込み、検証する。
    ///
    /// # Errors
    /// 引数のパースに失敗した場合、または [`Config::validate`] が失敗した場合。
    pub fn from_args<I, T>(args: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        let config = Self::try_parse_from(args)?;
        config.validate()?;
        Ok(config)
    }

    /// # Errors
    /// 描画領域がマージンに対して狭すぎる場合、点の数や k の範囲が上限を超える場合。
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.bounds()?;
        if self.point_count > MAX_POINT_COUNT {
            return Err(ConfigError::Invalid {
                name: "points",
                reason: format!("must be at most {MAX_POINT_COUNT}"),
            });
        }
        if self.max_k == 0 || self.max_k > MAX_CLUSTERS {
            return Err(ConfigError::Invalid {
                name: "max_k",
                reason: format!("must be between 1 and {MAX_CLUSTERS}"),
            });
        }
        if self.initial_k == 0 || self.initial_k > self.max_k {
            return Err(ConfigError::Invalid {
                name: "k",
                reason: format!("must be between 1 and {}", self.max_k),
            });
        }
        Ok(())
    }

    /// # Errors
    /// Returns [`ConfigError::Invalid`] when the margin leaves no room to sample in.
    pub fn bounds(&self) -> Result<Bounds, ConfigError> {
        Bounds::new(self.width, self.height, self.margin).ok_or_else(|| ConfigError::Invalid {
            name: "margin",
            reason: format!(
                "{} leaves no drawable area inside {}x{}",
                self.margin, self.width, self.height
            ),
        })
    }

    /// # Errors
    /// Same as [`Config::validate`].
    pub fn session_settings(&self) -> Result<SessionSettings, ConfigError> {
        self.validate()?;
        Ok(SessionSettings {
            bounds: self.bounds()?,
            point_count: self.point_count,
            initial_k: self.initial_k,
            max_k: self.max_k,
        })
    }
}
