//! Server configuration from the environment.

use std::path::PathBuf;

use anyhow::Context;
use vocab_core::FormLabels;

use crate::DEFAULT_MAX_SESSIONS;

/// Settings read once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub data_path: PathBuf,
    pub labels: FormLabels,
    pub reset_hour: u32,
    pub max_sessions: usize,
}

impl Config {
    /// Read `HOST`, `PORT` and the `VOCAB_*` variables, falling back to
    /// defaults for anything unset.
    pub fn from_env() -> anyhow::Result<Self> {
        let defaults = FormLabels::default();

        let port = var_or("PORT", "5001")
            .parse()
            .context("PORT must be a port number")?;
        let reset_hour: u32 = var_or("VOCAB_RESET_HOUR", "0")
            .parse()
            .context("VOCAB_RESET_HOUR must be an hour between 0 and 23")?;
        anyhow::ensure!(reset_hour < 24, "VOCAB_RESET_HOUR must be between 0 and 23");
        let max_sessions: usize = var_or("VOCAB_MAX_SESSIONS", &DEFAULT_MAX_SESSIONS.to_string())
            .parse()
            .context("VOCAB_MAX_SESSIONS must be a positive number")?;
        anyhow::ensure!(max_sessions > 0, "VOCAB_MAX_SESSIONS must be at least 1");

        Ok(Self {
            host: var_or("HOST", "0.0.0.0"),
            port,
            data_path: PathBuf::from(var_or("VOCAB_DATA", "data/words.json")),
            labels: FormLabels {
                form_a: var_or("VOCAB_LABEL_A", &defaults.form_a),
                form_b: var_or("VOCAB_LABEL_B", &defaults.form_b),
            },
            reset_hour,
            max_sessions,
        })
    }

    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn var_or(key: &str, default: &str) -> String {
    std::env::var(key)
        .ok()
        .filter(|value| !value.trim().is_empty())
        .unwrap_or_else(|| default.to_string())
}
