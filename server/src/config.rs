use std::path::PathBuf;

use anyhow::{Context, Result, anyhow};
use platform_authn::JwtConfig;
use platform_db::DatabaseSettings;
use platform_obs::LogFormat;

const DEV_JWT_SECRET: &str = "mcsu-insecure-development-secret";

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub database: DatabaseSettings,
    pub jwt: JwtConfig,
    pub media_root: PathBuf,
    pub cors_allowed_origins: Vec<String>,
    pub otlp_endpoint: Option<String>,
    pub log_format: LogFormat,
}

impl AppConfig {
    /// Read the process environment. Outside `dev` a `JWT_SECRET` is required.
    pub fn load(dev: bool) -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok(), dev)
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>, dev: bool) -> Result<Self> {
        let var = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let database = match var("DATABASE_URL") {
            Some(url) => DatabaseSettings::new(url),
            None => DatabaseSettings::default(),
        };

        let secret = match var("JWT_SECRET") {
            Some(secret) => secret,
            None if dev => DEV_JWT_SECRET.to_string(),
            None => return Err(anyhow!("JWT_SECRET missing (pass --dev to use a local secret)")),
        };
        let minutes = parse_or(var("JWT_EXPIRATION_MINUTES"), 5, "JWT_EXPIRATION_MINUTES")?;
        let days = parse_or(var("JWT_REFRESH_EXPIRATION_DAYS"), 7, "JWT_REFRESH_EXPIRATION_DAYS")?;

        let media_root = var("MEDIA_ROOT")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("media"));

        let cors_allowed_origins = var("CORS_ALLOWED_ORIGINS")
            .unwrap_or_else(|| "http://localhost:3000".into())
            .split(',')
            .map(str::trim)
            .filter(|origin| !origin.is_empty())
            .map(str::to_string)
            .collect();

        let log_format = match var("LOG_FORMAT") {
            Some(raw) => raw.parse().context("invalid LOG_FORMAT")?,
            None => LogFormat::default(),
        };

        Ok(Self {
            database,
            jwt: JwtConfig::new(secret, minutes, days),
            media_root,
            cors_allowed_origins,
            otlp_endpoint: var("OTLP_ENDPOINT"),
            log_format,
        })
    }
}

fn parse_or(raw: Option<String>, default: i64, key: &str) -> Result<i64> {
    match raw {
        None => Ok(default),
        Some(raw) => match raw.trim().parse::<i64>() {
            Ok(value) if value > 0 => Ok(value),
            _ => Err(anyhow!("{key} must be a positive integer, got `{raw}`")),
        },
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn defaults_apply_in_dev() {
        let config = AppConfig::from_lookup(lookup(&[]), true).unwrap();
        assert_eq!(config.database.url, platform_db::DEFAULT_DATABASE_URL);
        assert_eq!(config.jwt.secret, DEV_JWT_SECRET);
        assert_eq!(config.jwt.expiration, chrono::Duration::minutes(5));
        assert_eq!(config.jwt.refresh_expiration, chrono::Duration::days(7));
        assert_eq!(config.media_root, PathBuf::from("media"));
        assert_eq!(config.cors_allowed_origins, vec!["http://localhost:3000"]);
        assert_eq!(config.log_format, LogFormat::Plain);
    }

    #[test]
    fn secret_is_required_outside_dev() {
        assert!(AppConfig::from_lookup(lookup(&[]), false).is_err());
        let config =
            AppConfig::from_lookup(lookup(&[("JWT_SECRET", "s3cret")]), false).unwrap();
        assert_eq!(config.jwt.secret, "s3cret");
    }

    #[test]
    fn environment_overrides() {
        let config = AppConfig::from_lookup(
            lookup(&[
                ("JWT_SECRET", "s3cret"),
                ("DATABASE_URL", "postgres://app@db/mcsu"),
                ("JWT_EXPIRATION_MINUTES", "30"),
                ("CORS_ALLOWED_ORIGINS", "https://a.example, ,https://b.example"),
                ("LOG_FORMAT", "json"),
                ("OTLP_ENDPOINT", "http://collector:4318/v1/traces"),
            ]),
            false,
        )
        .unwrap();
        assert_eq!(config.database.url, "postgres://app@db/mcsu");
        assert_eq!(config.jwt.expiration, chrono::Duration::minutes(30));
        assert_eq!(
            config.cors_allowed_origins,
            vec!["https://a.example", "https://b.example"]
        );
        assert_eq!(config.log_format, LogFormat::Json);
        assert!(config.otlp_endpoint.is_some());
    }

    #[test]
    fn bad_numbers_are_reported() {
        let err = AppConfig::from_lookup(
            lookup(&[("JWT_SECRET", "s"), ("JWT_REFRESH_EXPIRATION_DAYS", "soon")]),
            false,
        )
        .unwrap_err();
        assert!(err.to_string().contains("JWT_REFRESH_EXPIRATION_DAYS"));
    }
}
