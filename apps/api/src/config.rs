use anyhow::{bail, Context, Result};

/// Application configuration loaded from environment variables.
/// Every setting has a default; malformed values fail startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub rust_log: String,
    /// Load the demo marketplace on startup.
    pub seed_demo_data: bool,
    /// Whether the listings wage bracket narrows results.
    pub apply_wage_bracket: bool,
    pub recommended_jobs_limit: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: 8080,
            rust_log: "info".to_string(),
            seed_demo_data: true,
            apply_wage_bracket: true,
            recommended_jobs_limit: 3,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let defaults = Config::default();
        Ok(Config {
            port: std::env::var("PORT")
                .unwrap_or_else(|_| defaults.port.to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or(defaults.rust_log),
            seed_demo_data: env_flag("SEED_DEMO_DATA", defaults.seed_demo_data)?,
            apply_wage_bracket: env_flag(
                "LISTINGS_APPLY_WAGE_BRACKET",
                defaults.apply_wage_bracket,
            )?,
            recommended_jobs_limit: match std::env::var("RECOMMENDED_JOBS_LIMIT") {
                Ok(raw) => raw
                    .parse::<usize>()
                    .context("RECOMMENDED_JOBS_LIMIT must be a non-negative integer")?,
                Err(_) => defaults.recommended_jobs_limit,
            },
        })
    }
}

fn env_flag(key: &str, default: bool) -> Result<bool> {
    match std::env::var(key) {
        Ok(raw) => parse_flag(&raw).with_context(|| format!("{key} must be true or false")),
        Err(_) => Ok(default),
    }
}

fn parse_flag(raw: &str) -> Result<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => bail!("unrecognized flag value '{other}'"),
    }
}
