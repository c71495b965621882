//! Configuration management using Figment
//!
//! Configuration is loaded from multiple sources with the following precedence (highest to lowest):
//! 1. Environment variables (prefix: PAGEABLE_, nested keys separated by `__`)
//! 2. Current working directory: ./pageable.toml
//! 3. Default values
//!
//! ```toml
//! log_level = "debug"
//!
//! [offset]
//! default_size = 20
//! max_size = 200
//!
//! [cursor]
//! default_size = 50
//! max_size = 500
//! ```

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{Error, Result};

/// Default page number (1-indexed)
pub const DEFAULT_PAGE: u64 = 1;

/// Default number of items per page
pub const DEFAULT_SIZE: u32 = 10;

/// Maximum allowed page size
pub const MAX_SIZE: u32 = 1000;

/// Default number of items per cursor page
pub const DEFAULT_CURSOR_SIZE: u32 = 10;

/// Maximum allowed cursor page size
pub const MAX_CURSOR_SIZE: u32 = 1000;

const CONFIG_FILE: &str = "pageable.toml";
const ENV_PREFIX: &str = "PAGEABLE_";

/// Page size bounds
///
/// A requested size below 1 becomes `default_size`; anything above
/// `max_size` is capped.
///
/// # Example
///
/// ```rust
/// use pageable::SizeLimits;
///
/// assert_eq!(SizeLimits::OFFSET.clamp(0), 10);
/// assert_eq!(SizeLimits::OFFSET.clamp(-5), 10);
/// assert_eq!(SizeLimits::OFFSET.clamp(25), 25);
/// assert_eq!(SizeLimits::OFFSET.clamp(5000), 1000);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SizeLimits {
    /// Size used when none (or a non-positive one) is requested
    pub default_size: u32,
    /// Largest size a client may request
    pub max_size: u32,
}

impl SizeLimits {
    /// Limits for offset pagination
    pub const OFFSET: Self = Self::new(DEFAULT_SIZE, MAX_SIZE);

    /// Limits for cursor pagination
    pub const CURSOR: Self = Self::new(DEFAULT_CURSOR_SIZE, MAX_CURSOR_SIZE);

    /// Create size limits
    #[must_use]
    pub const fn new(default_size: u32, max_size: u32) -> Self {
        Self {
            default_size,
            max_size,
        }
    }

    /// Floor a requested size to the default, then cap it at the maximum
    ///
    /// The floor happens first, so `0` becomes `default_size`, never
    /// `max_size`.
    #[must_use]
    pub fn clamp(&self, size: i64) -> u32 {
        if size < 1 {
            return self.default_size.min(self.max_size);
        }
        u32::try_from(size).map_or(self.max_size, |size| size.min(self.max_size))
    }

    fn validate(&self, section: &str) -> Result<()> {
        if self.max_size == 0 {
            return Err(Error::from(figment::Error::from(format!(
                "{section}.max_size must be at least 1"
            ))));
        }
        if self.default_size == 0 || self.default_size > self.max_size {
            return Err(Error::from(figment::Error::from(format!(
                "{section}.default_size must be between 1 and {}",
                self.max_size
            ))));
        }
        Ok(())
    }
}

/// Main configuration structure
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Log level filter (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Size limits for offset pagination
    #[serde(default = "default_offset_limits")]
    pub offset: SizeLimits,

    /// Size limits for cursor pagination
    #[serde(default = "default_cursor_limits")]
    pub cursor: SizeLimits,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_offset_limits() -> SizeLimits {
    SizeLimits::OFFSET
}

fn default_cursor_limits() -> SizeLimits {
    SizeLimits::CURSOR
}

impl Config {
    /// Load configuration from `./pageable.toml` (if present) and the
    /// environment
    pub fn load() -> Result<Self> {
        Self::load_from(CONFIG_FILE)
    }

    /// Load configuration from a specific file
    ///
    /// A missing file is not an error; defaults and environment variables
    /// still apply.
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if path.exists() {
            tracing::info!("Loading pagination configuration from: {}", path.display());
        } else {
            tracing::debug!("No configuration file at {}, using defaults", path.display());
        }

        let config: Self = Figment::new()
            // Start with defaults
            .merge(Serialized::defaults(Config::default()))
            // Load from config file (if exists)
            .merge(Toml::file(path))
            // Override with environment variables
            .merge(Env::prefixed(ENV_PREFIX).split("__"))
            .extract()?;

        config.validate()?;
        Ok(config)
    }

    /// Check that both size limit sections are usable
    pub fn validate(&self) -> Result<()> {
        self.offset.validate("offset")?;
        self.cursor.validate("cursor")
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            offset: SizeLimits::OFFSET,
            cursor: SizeLimits::CURSOR,
        }
    }
}
