//! Options for wrapped sources.
//!
//! [`ExpectOptions`] collects everything [`wrap`](crate::wrap) needs to
//! pick and tune an adapter: the content domain, echo behavior, window
//! capacity, poll tuning, and close-on-exit semantics. Options load from
//! TOML and take environment overrides for ad-hoc tuning in test
//! harnesses.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{ExpectError, Result};

/// Default window capacity in bytes.
pub const DEFAULT_WINDOW: usize = 1024;

/// Default interval between poll attempts.
pub const DEFAULT_POLL_PERIOD: Duration = Duration::from_millis(100);

/// Default upper bound on bytes requested per poll attempt.
pub const DEFAULT_MAX_READ: usize = 1024;

/// Conventional default budget for an expect operation.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(3);

/// Configuration for [`wrap`](crate::wrap).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExpectOptions {
    /// Select the text domain instead of the default binary domain.
    pub unicode: bool,

    /// Echo every observed chunk to standard output.
    pub echo: bool,

    /// Window capacity in bytes.
    pub window: usize,

    /// Interval between poll attempts.
    pub poll_period: Duration,

    /// Upper bound on bytes requested per poll attempt.
    pub max_read: usize,

    /// Close the underlying source when the expecter is closed or dropped.
    pub close_stream: bool,
}

impl Default for ExpectOptions {
    fn default() -> Self {
        Self {
            unicode: false,
            echo: false,
            window: DEFAULT_WINDOW,
            poll_period: DEFAULT_POLL_PERIOD,
            max_read: DEFAULT_MAX_READ,
            close_stream: false,
        }
    }
}

impl ExpectOptions {
    /// Create options with all defaults.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Select the text domain instead of the default binary domain.
    #[must_use]
    pub const fn unicode(mut self, unicode: bool) -> Self {
        self.unicode = unicode;
        self
    }

    /// Echo every observed chunk to standard output.
    #[must_use]
    pub const fn echo(mut self, echo: bool) -> Self {
        self.echo = echo;
        self
    }

    /// Set the window capacity in bytes.
    #[must_use]
    pub const fn window(mut self, window: usize) -> Self {
        self.window = window;
        self
    }

    /// Set the interval between poll attempts.
    #[must_use]
    pub const fn poll_period(mut self, poll_period: Duration) -> Self {
        self.poll_period = poll_period;
        self
    }

    /// Set the upper bound on bytes requested per poll attempt.
    #[must_use]
    pub const fn max_read(mut self, max_read: usize) -> Self {
        self.max_read = max_read;
        self
    }

    /// Close the underlying source when the expecter is closed or dropped.
    #[must_use]
    pub const fn close_stream(mut self, close_stream: bool) -> Self {
        self.close_stream = close_stream;
        self
    }

    /// Validate the numeric tuning values.
    pub fn validate(&self) -> Result<()> {
        if self.window == 0 {
            return Err(ExpectError::config("window must be greater than zero"));
        }
        if self.poll_period.is_zero() {
            return Err(ExpectError::config("poll_period must be greater than zero"));
        }
        if self.max_read == 0 {
            return Err(ExpectError::config("max_read must be greater than zero"));
        }
        Ok(())
    }

    /// Parse options from a TOML document.
    pub fn from_toml_str(source: &str) -> Result<Self> {
        let options: Self = toml::from_str(source)
            .map_err(|e| ExpectError::config(format!("invalid options file: {e}")))?;
        options.validate()?;
        Ok(options)
    }

    /// Apply `STREAM_EXPECT_*` environment overrides.
    ///
    /// Recognized variables: `STREAM_EXPECT_WINDOW`,
    /// `STREAM_EXPECT_POLL_PERIOD_MS`, `STREAM_EXPECT_MAX_READ`,
    /// `STREAM_EXPECT_ECHO` (`0`/`1`).
    pub fn overridden_from_env(self) -> Result<Self> {
        self.overridden_from(|name| std::env::var(name).ok())
    }

    /// Apply overrides from an arbitrary variable lookup.
    pub fn overridden_from(
        mut self,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self> {
        if let Some(value) = lookup("STREAM_EXPECT_WINDOW") {
            self.window = parse_var("STREAM_EXPECT_WINDOW", &value)?;
        }
        if let Some(value) = lookup("STREAM_EXPECT_POLL_PERIOD_MS") {
            self.poll_period = Duration::from_millis(parse_var("STREAM_EXPECT_POLL_PERIOD_MS", &value)?);
        }
        if let Some(value) = lookup("STREAM_EXPECT_MAX_READ") {
            self.max_read = parse_var("STREAM_EXPECT_MAX_READ", &value)?;
        }
        if let Some(value) = lookup("STREAM_EXPECT_ECHO") {
            self.echo = match value.as_str() {
                "1" | "true" => true,
                "0" | "false" => false,
                other => {
                    return Err(ExpectError::config(format!(
                        "STREAM_EXPECT_ECHO must be 0 or 1, got {other:?}"
                    )));
                }
            };
        }
        self.validate()?;
        Ok(self)
    }
}

fn parse_var<T: std::str::FromStr>(name: &str, value: &str) -> Result<T> {
    value
        .parse()
        .map_err(|_| ExpectError::config(format!("{name} must be a number, got {value:?}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let options = ExpectOptions::default();
        assert!(!options.unicode);
        assert!(!options.echo);
        assert_eq!(options.window, DEFAULT_WINDOW);
        assert_eq!(options.poll_period, DEFAULT_POLL_PERIOD);
        assert_eq!(options.max_read, DEFAULT_MAX_READ);
        assert!(!options.close_stream);
        options.validate().unwrap();
    }

    #[test]
    fn builder_chains() {
        let options = ExpectOptions::new()
            .unicode(true)
            .echo(true)
            .window(8)
            .poll_period(Duration::from_millis(5))
            .max_read(64)
            .close_stream(true);
        assert!(options.unicode);
        assert_eq!(options.window, 8);
        assert_eq!(options.poll_period, Duration::from_millis(5));
        assert_eq!(options.max_read, 64);
        assert!(options.close_stream);
    }

    #[test]
    fn validation_rejects_zeroes() {
        assert!(ExpectOptions::new().window(0).validate().is_err());
        assert!(
            ExpectOptions::new()
                .poll_period(Duration::ZERO)
                .validate()
                .is_err()
        );
        assert!(ExpectOptions::new().max_read(0).validate().is_err());
    }

    #[test]
    fn loads_from_toml() {
        let options = ExpectOptions::from_toml_str(
            r#"
            unicode = true
            window = 4096
            max_read = 256
            "#,
        )
        .unwrap();
        assert!(options.unicode);
        assert_eq!(options.window, 4096);
        assert_eq!(options.max_read, 256);
        // Unset keys keep their defaults.
        assert_eq!(options.poll_period, DEFAULT_POLL_PERIOD);
    }

    #[test]
    fn toml_rejects_invalid_values() {
        assert!(ExpectOptions::from_toml_str("window = \"lots\"").is_err());
        assert!(ExpectOptions::from_toml_str("window = 0").is_err());
    }

    #[test]
    fn env_overrides_apply() {
        let options = ExpectOptions::new()
            .overridden_from(|name| match name {
                "STREAM_EXPECT_WINDOW" => Some("2048".to_string()),
                "STREAM_EXPECT_POLL_PERIOD_MS" => Some("10".to_string()),
                "STREAM_EXPECT_ECHO" => Some("1".to_string()),
                _ => None,
            })
            .unwrap();
        assert_eq!(options.window, 2048);
        assert_eq!(options.poll_period, Duration::from_millis(10));
        assert!(options.echo);
        assert_eq!(options.max_read, DEFAULT_MAX_READ);
    }

    #[test]
    fn env_overrides_validate() {
        let result = ExpectOptions::new().overridden_from(|name| {
            (name == "STREAM_EXPECT_WINDOW").then(|| "nope".to_string())
        });
        assert!(result.is_err());

        let result = ExpectOptions::new().overridden_from(|name| {
            (name == "STREAM_EXPECT_ECHO").then(|| "maybe".to_string())
        });
        assert!(result.is_err());
    }
}
