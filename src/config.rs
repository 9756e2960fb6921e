//! Application configuration loaded from environment variables.
//!
//! Configuration is loaded once at startup (after `.env` has been read by
//! `main`), validated, and then handed to constructors. Nothing below the
//! binary reads the process environment.
//!
//! ## Variables
//!
//! - `IP` / `PORT` - Listen address (default: `0.0.0.0` / `3000`)
//! - `TLS_CERT` / `TLS_KEY` - PEM file paths; TLS is enabled when both are set
//! - `CLOUDFLARE_TURNSTILE_SECRET_KEY` - Captcha verification secret
//! - `CAPTCHA_ENABLED` - Force captcha on or off: `true`/`1`/`yes`/`on` or
//!   `false`/`0`/`no`/`off`, anything else is rejected (default: on iff a secret is set)
//! - `CAPTCHA_VERIFY_URL` - Verification endpoint (default: Turnstile `siteverify`)
//! - `CAPTCHA_TIMEOUT_SECONDS` - Verification timeout (default: 10)
//! - `CORS_DOMAINS` - Comma-separated allowed origins, e.g. `https://a.com, https://b.com`
//! - `CLIENT_IP_HEADER` - Trusted client IP header (default: `CF-Connecting-IP`)
//! - `STORE_CAPACITY` - Live links kept before the store is wiped (default: 1000)
//! - `TOKEN_COLLISION_POLICY` - `reroll` (default) or `overwrite`
//! - `RUST_LOG` - Log level (default: `info`)
//! - `LOG_FORMAT` - Log format: `text` or `json` (default: `text`)

use anyhow::{Context, Result};
use axum::http::HeaderName;
use std::env;
use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;
use std::str::FromStr;
use url::Url;

use crate::domain::{CollisionPolicy, MAX_ENTRIES};
use crate::infrastructure::captcha::TURNSTILE_VERIFY_URL;
use crate::utils::client_ip::DEFAULT_CLIENT_IP_HEADER;

/// Paths of the PEM certificate chain and private key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TlsConfig {
    pub cert_path: PathBuf,
    pub key_path: PathBuf,
}

/// Captcha enforcement settings for the submission gate.
#[derive(Debug, Clone)]
pub struct CaptchaConfig {
    pub enabled: bool,
    /// Required when `enabled` is true.
    pub secret: Option<String>,
    pub verify_url: Url,
    pub timeout_seconds: u64,
}

impl Default for CaptchaConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            secret: None,
            verify_url: Url::parse(TURNSTILE_VERIFY_URL).expect("static URL is valid"),
            timeout_seconds: 10,
        }
    }
}

/// Service configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    pub ip: String,
    pub port: u16,
    pub tls_cert: Option<String>,
    pub tls_key: Option<String>,
    pub captcha: CaptchaConfig,
    pub cors_origins: Vec<String>,
    /// Header carrying the real client address, set by the reverse proxy.
    pub client_ip_header: String,
    pub store_capacity: usize,
    pub collision_policy: CollisionPolicy,
    pub log_level: String,
    pub log_format: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            ip: "0.0.0.0".to_string(),
            port: 3000,
            tls_cert: None,
            tls_key: None,
            captcha: CaptchaConfig::default(),
            cors_origins: Vec::new(),
            client_ip_header: DEFAULT_CLIENT_IP_HEADER.to_string(),
            store_capacity: MAX_ENTRIES,
            collision_policy: CollisionPolicy::default(),
            log_level: "info".to_string(),
            log_format: "text".to_string(),
        }
    }
}

impl Config {
    /// Loads configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if a numeric variable does not parse, `CAPTCHA_ENABLED`
    /// is not a recognised boolean, `CAPTCHA_VERIFY_URL` is not a URL or
    /// `TOKEN_COLLISION_POLICY` is not a known policy.
    pub fn from_env() -> Result<Self> {
        let defaults = Self::default();

        let ip = env::var("IP").unwrap_or(defaults.ip);
        let port = parse_var("PORT")?.unwrap_or(defaults.port);

        let tls_cert = non_empty_var("TLS_CERT");
        let tls_key = non_empty_var("TLS_KEY");

        let secret = non_empty_var("CLOUDFLARE_TURNSTILE_SECRET_KEY");
        let enabled = match env::var("CAPTCHA_ENABLED") {
            Ok(raw) => parse_flag(&raw).context("Invalid CAPTCHA_ENABLED")?,
            Err(_) => secret.is_some(),
        };

        let verify_url = match env::var("CAPTCHA_VERIFY_URL") {
            Ok(raw) => Url::parse(&raw).context("CAPTCHA_VERIFY_URL must be a valid URL")?,
            Err(_) => defaults.captcha.verify_url,
        };

        let timeout_seconds =
            parse_var("CAPTCHA_TIMEOUT_SECONDS")?.unwrap_or(defaults.captcha.timeout_seconds);

        let cors_origins = env::var("CORS_DOMAINS")
            .map(|v| parse_origins(&v))
            .unwrap_or_default();

        let client_ip_header =
            env::var("CLIENT_IP_HEADER").unwrap_or(defaults.client_ip_header);

        let store_capacity = parse_var("STORE_CAPACITY")?.unwrap_or(defaults.store_capacity);

        let collision_policy = match env::var("TOKEN_COLLISION_POLICY") {
            Ok(raw) => raw
                .parse::<CollisionPolicy>()
                .map_err(anyhow::Error::msg)
                .context("Invalid TOKEN_COLLISION_POLICY")?,
            Err(_) => defaults.collision_policy,
        };

        let log_level = env::var("RUST_LOG").unwrap_or(defaults.log_level);
        let log_format = env::var("LOG_FORMAT").unwrap_or(defaults.log_format);

        Ok(Self {
            ip,
            port,
            tls_cert,
            tls_key,
            captcha: CaptchaConfig {
                enabled,
                secret,
                verify_url,
                timeout_seconds,
            },
            cors_origins,
            client_ip_header,
            store_capacity,
            collision_policy,
            log_level,
            log_format,
        })
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - `IP` is not an IP address
    /// - only one of `TLS_CERT` / `TLS_KEY` is set
    /// - captcha is enabled without a secret
    /// - `CAPTCHA_TIMEOUT_SECONDS` is outside 1..=120
    /// - `CLIENT_IP_HEADER` is not a valid header name
    /// - `STORE_CAPACITY` is outside 1..=1000000
    /// - `LOG_FORMAT` is not `text` or `json`
    pub fn validate(&self) -> Result<()> {
        if self.ip.parse::<IpAddr>().is_err() {
            anyhow::bail!("IP must be a valid IP address, got '{}'", self.ip);
        }

        if self.tls_cert.is_some() != self.tls_key.is_some() {
            anyhow::bail!("TLS_CERT and TLS_KEY must be set together");
        }

        if self.captcha.enabled && self.captcha.secret.is_none() {
            anyhow::bail!("CLOUDFLARE_TURNSTILE_SECRET_KEY must be set when captcha is enabled");
        }

        if !(1..=120).contains(&self.captcha.timeout_seconds) {
            anyhow::bail!(
                "CAPTCHA_TIMEOUT_SECONDS must be between 1 and 120, got {}",
                self.captcha.timeout_seconds
            );
        }

        if HeaderName::from_bytes(self.client_ip_header.as_bytes()).is_err() {
            anyhow::bail!(
                "CLIENT_IP_HEADER must be a valid header name, got '{}'",
                self.client_ip_header
            );
        }

        if self.store_capacity == 0 || self.store_capacity > 1_000_000 {
            anyhow::bail!(
                "STORE_CAPACITY must be between 1 and 1000000, got {}",
                self.store_capacity
            );
        }

        if self.log_format != "text" && self.log_format != "json" {
            anyhow::bail!(
                "LOG_FORMAT must be 'text' or 'json', got '{}'",
                self.log_format
            );
        }

        Ok(())
    }

    /// Socket address to bind.
    ///
    /// # Errors
    ///
    /// Returns an error if `ip` is not an IP address.
    pub fn listen_addr(&self) -> Result<SocketAddr> {
        let ip: IpAddr = self
            .ip
            .parse()
            .with_context(|| format!("Invalid listen IP '{}'", self.ip))?;
        Ok(SocketAddr::new(ip, self.port))
    }

    /// TLS settings, present only when both certificate and key are configured.
    pub fn tls(&self) -> Option<TlsConfig> {
        match (&self.tls_cert, &self.tls_key) {
            (Some(cert), Some(key)) => Some(TlsConfig {
                cert_path: PathBuf::from(cert),
                key_path: PathBuf::from(key),
            }),
            _ => None,
        }
    }

    /// Prints configuration summary (without sensitive data).
    pub fn print_summary(&self) {
        tracing::info!("Configuration loaded:");
        tracing::info!("  Listen address: {}:{}", self.ip, self.port);

        match self.tls() {
            Some(tls) => tracing::info!(
                "  TLS: enabled (cert: {}, key: {})",
                tls.cert_path.display(),
                tls.key_path.display()
            ),
            None => tracing::info!("  TLS: disabled"),
        }

        if self.captcha.enabled {
            tracing::info!(
                "  Captcha: enabled (secret: {}, endpoint: {}, timeout: {}s)",
                self.captcha.secret.as_deref().map(mask_secret).unwrap_or_default(),
                self.captcha.verify_url,
                self.captcha.timeout_seconds
            );
        } else {
            tracing::warn!("  Captcha: disabled, the create endpoint is unprotected");
        }

        if self.cors_origins.is_empty() {
            tracing::info!("  CORS: disabled");
        } else {
            tracing::info!("  CORS origins: {}", self.cors_origins.join(", "));
        }

        tracing::info!("  Client IP header: {}", self.client_ip_header);
        tracing::info!(
            "  Store capacity: {} (all links are discarded when full)",
            self.store_capacity
        );
        tracing::info!("  Collision policy: {:?}", self.collision_policy);
        tracing::info!("  Log level: {}", self.log_level);
        tracing::info!("  Log format: {}", self.log_format);
    }
}

/// Parses `name` if set. A value that does not parse is an error, not a default.
fn parse_var<T>(name: &str) -> Result<Option<T>>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map(Some)
            .with_context(|| format!("Invalid {name}: '{raw}'")),
        Err(_) => Ok(None),
    }
}

/// Reads an on/off switch. Unknown spellings are rejected.
fn parse_flag(raw: &str) -> Result<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Ok(true),
        "false" | "0" | "no" | "off" => Ok(false),
        other => anyhow::bail!("expected true/false, 1/0, yes/no or on/off, got '{other}'"),
    }
}

fn non_empty_var(name: &str) -> Option<String> {
    env::var(name).ok().filter(|v| !v.trim().is_empty())
}

/// Splits a `CORS_DOMAINS` value into origins.
///
/// The canonical separator is `", "`; bare commas are accepted too.
fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// Keeps the first four characters of a secret and hides the rest.
fn mask_secret(secret: &str) -> String {
    let visible: String = secret.chars().take(4).collect();
    format!("{visible}***")
}

/// Loads and validates configuration from environment variables.
///
/// # Errors
///
/// Returns an error if a variable cannot be parsed or validation fails.
///
/// # Note
///
/// This function expects environment variables to be already loaded
/// (e.g., via `dotenvy::from_filename()` in `main.rs`).
pub fn load_from_env() -> Result<Config> {
    let config = Config::from_env()?;
    config.validate()?;
    Ok(config)
}
