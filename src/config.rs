/// Settings read from the environment at startup.
use anyhow::{Context, Result};
use clap::ValueEnum;
use tracing_subscriber::EnvFilter;

use crate::output::Color;
use crate::output::prefix::prefix;

/// Env var selecting when prefixes are colored.
pub const COLOR_ENV: &str = "DEMO_COLOR";
/// Env var holding a tracing filter directive.
pub const LOG_ENV: &str = "DEMO_LOG";

/// When to color the stream prefixes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Default)]
pub enum ColorMode {
    /// Color unless `NO_COLOR` is set.
    #[default]
    Auto,
    Always,
    Never,
}

/// Resolved startup settings.
#[derive(Debug, Clone)]
pub struct Settings {
    pub color: bool,
    pub log_filter: String,
}

impl Settings {
    /// Read settings from the process environment.
    ///
    /// # Errors
    ///
    /// Fails when `DEMO_COLOR` holds an unknown mode.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read settings through `lookup`, so tests need not touch the real
    /// environment.
    ///
    /// # Errors
    ///
    /// Fails when the color mode is not one of `auto`, `always`, `never`.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let mode = match lookup(COLOR_ENV) {
            Some(raw) if !raw.is_empty() => ColorMode::from_str(&raw, true)
                .map_err(anyhow::Error::msg)
                .with_context(|| format!("invalid {COLOR_ENV} value {raw:?}"))?,
            _ => ColorMode::default(),
        };
        let no_color = lookup("NO_COLOR").is_some_and(|v| !v.is_empty());
        let color = match mode {
            ColorMode::Always => true,
            ColorMode::Never => false,
            ColorMode::Auto => !no_color,
        };
        let log_filter = lookup(LOG_ENV)
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| "off".to_owned());
        Ok(Self { color, log_filter })
    }

    #[must_use]
    pub fn stdout_prefix(&self) -> String {
        prefix("[stdout]", self.color.then_some(Color::Blue))
    }

    #[must_use]
    pub fn stderr_prefix(&self) -> String {
        prefix("[stderr]", self.color.then_some(Color::Red))
    }

    /// Install the global tracing subscriber, writing to the real stderr.
    /// An unparsable filter falls back to `off`.
    pub fn init_tracing(&self) {
        let filter = EnvFilter::try_new(&self.log_filter).unwrap_or_else(|_| EnvFilter::new("off"));
        let _ = tracing_subscriber::fmt()
            .with_writer(std::io::stderr)
            .with_env_filter(filter)
            .try_init();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings(vars: &[(&str, &str)]) -> Result<Settings> {
        let vars: Vec<(String, String)> = vars
            .iter()
            .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
            .collect();
        Settings::from_lookup(|key| {
            vars.iter()
                .find(|(k, _)| k == key)
                .map(|(_, v)| v.clone())
        })
    }

    #[test]
    fn test_defaults() {
        let s = settings(&[]).unwrap();
        assert!(s.color);
        assert_eq!(s.log_filter, "off");
        assert_eq!(s.stdout_prefix(), "\x1b[34m[stdout]\x1b[m");
        assert_eq!(s.stderr_prefix(), "\x1b[31m[stderr]\x1b[m");
    }

    #[test]
    fn test_no_color() {
        let s = settings(&[("NO_COLOR", "1")]).unwrap();
        assert!(!s.color);
        assert_eq!(s.stdout_prefix(), "[stdout]");
    }

    #[test]
    fn test_always_overrides_no_color() {
        let s = settings(&[("NO_COLOR", "1"), ("DEMO_COLOR", "ALWAYS")]).unwrap();
        assert!(s.color);
    }

    #[test]
    fn test_never() {
        let s = settings(&[("DEMO_COLOR", "never")]).unwrap();
        assert_eq!(s.stderr_prefix(), "[stderr]");
    }

    #[test]
    fn test_invalid_mode() {
        let err = settings(&[("DEMO_COLOR", "rainbow")]).unwrap_err();
        assert!(err.to_string().contains("invalid DEMO_COLOR value \"rainbow\""));
    }

    #[test]
    fn test_log_filter() {
        let s = settings(&[("DEMO_LOG", "debug")]).unwrap();
        assert_eq!(s.log_filter, "debug");
    }
}
