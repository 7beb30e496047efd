use std::path::PathBuf;

use anyhow::{Context, Result};

/// Brand voice used when a cover-letter request does not supply one.
pub const DEFAULT_BRAND_VOICE: &str = "Concise, optimistic, systems-builder tone.";

/// Application configuration loaded from environment variables.
/// Every variable is optional; startup fails only on malformed values.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub rust_log: String,
    /// Directory holding `<template>.md` body overrides. Built-ins are used when unset.
    pub template_dir: Option<PathBuf>,
    pub default_brand_voice: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            template_dir: optional_env("TEMPLATE_DIR").map(PathBuf::from),
            default_brand_voice: optional_env("DEFAULT_BRAND_VOICE")
                .unwrap_or_else(|| DEFAULT_BRAND_VOICE.to_string()),
        })
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            port: 8080,
            rust_log: "info".to_string(),
            template_dir: None,
            default_brand_voice: DEFAULT_BRAND_VOICE.to_string(),
        }
    }
}

/// Reads an env var, treating blank values the same as unset.
fn optional_env(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
