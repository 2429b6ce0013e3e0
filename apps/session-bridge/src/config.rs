use std::env;
use std::time::Duration;

use crate::error::BridgeError;

pub const DEFAULT_SESSION_MAX_AGE_SECS: u64 = 30 * 24 * 60 * 60;

#[derive(Clone)]
pub struct BridgeConfig {
    /// Base URL of the auth backend, without trailing slash
    pub backend_url: String,
    /// Key for signing the session cookie; unrelated to the backend's JWT secret
    pub session_secret: Vec<u8>,
    pub host: String,
    pub port: u16,
    pub session_max_age: Duration,
    /// Mark the cookie `Secure` (set when served over HTTPS)
    pub cookie_secure: bool,
}

impl BridgeConfig {
    pub fn new(backend_url: impl Into<String>, session_secret: impl Into<Vec<u8>>) -> Self {
        Self {
            backend_url: backend_url.into().trim_end_matches('/').to_string(),
            session_secret: session_secret.into(),
            host: "0.0.0.0".to_string(),
            port: 3000,
            session_max_age: Duration::from_secs(DEFAULT_SESSION_MAX_AGE_SECS),
            cookie_secure: false,
        }
    }

    pub fn from_env() -> Result<Self, BridgeError> {
        let backend_url = must_var("BACKEND_URL")?;
        if !(backend_url.starts_with("http://") || backend_url.starts_with("https://")) {
            return Err(BridgeError::Config(format!(
                "BACKEND_URL must be an http(s) URL, got '{backend_url}'"
            )));
        }
        let secret = must_var("SESSION_SECRET")?;

        let mut config = Self::new(backend_url, secret.into_bytes());
        if let Ok(host) = env::var("BRIDGE_HOST") {
            config.host = host;
        }
        config.port = parse_or("BRIDGE_PORT", config.port)?;
        config.session_max_age =
            Duration::from_secs(parse_or("SESSION_MAX_AGE_SECS", DEFAULT_SESSION_MAX_AGE_SECS)?);
        config.cookie_secure = parse_or("SESSION_COOKIE_SECURE", false)?;
        Ok(config)
    }
}

impl std::fmt::Debug for BridgeConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BridgeConfig")
            .field("backend_url", &self.backend_url)
            .field("session_secret", &"[REDACTED]")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("session_max_age", &self.session_max_age)
            .field("cookie_secure", &self.cookie_secure)
            .finish()
    }
}

fn must_var(name: &str) -> Result<String, BridgeError> {
    match env::var(name) {
        Ok(v) if !v.trim().is_empty() => Ok(v),
        _ => Err(BridgeError::Config(format!(
            "Required environment variable '{name}' is not set"
        ))),
    }
}

fn parse_or<T>(name: &str, default: T) -> Result<T, BridgeError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match env::var(name) {
        Ok(raw) if !raw.trim().is_empty() => raw
            .trim()
            .parse()
            .map_err(|e| BridgeError::Config(format!("Environment variable '{name}' is invalid: {e}"))),
        _ => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use serial_test::serial;

    use super::*;

    fn clear_env() {
        for name in [
            "BACKEND_URL",
            "SESSION_SECRET",
            "BRIDGE_HOST",
            "BRIDGE_PORT",
            "SESSION_MAX_AGE_SECS",
            "SESSION_COOKIE_SECURE",
        ] {
            env::remove_var(name);
        }
    }

    #[test]
    #[serial]
    fn requires_backend_url_and_secret() {
        clear_env();
        assert!(BridgeConfig::from_env().is_err());

        env::set_var("BACKEND_URL", "http://backend:3001/");
        let err = BridgeConfig::from_env().unwrap_err();
        assert!(err.to_string().contains("SESSION_SECRET"));
        clear_env();
    }

    #[test]
    #[serial]
    fn defaults_and_overrides() {
        clear_env();
        env::set_var("BACKEND_URL", "http://backend:3001/");
        env::set_var("SESSION_SECRET", "bridge-secret");
        let cfg = BridgeConfig::from_env().unwrap();
        assert_eq!(cfg.backend_url, "http://backend:3001");
        assert_eq!(cfg.port, 3000);
        assert_eq!(cfg.session_max_age, Duration::from_secs(30 * 24 * 60 * 60));
        assert!(!cfg.cookie_secure);

        env::set_var("BRIDGE_PORT", "8080");
        env::set_var("SESSION_COOKIE_SECURE", "true");
        let cfg = BridgeConfig::from_env().unwrap();
        assert_eq!(cfg.port, 8080);
        assert!(cfg.cookie_secure);

        env::set_var("BRIDGE_PORT", "eighty");
        assert!(BridgeConfig::from_env().is_err());
        clear_env();
    }

    #[test]
    #[serial]
    fn rejects_non_http_backend() {
        clear_env();
        env::set_var("BACKEND_URL", "backend:3001");
        env::set_var("SESSION_SECRET", "bridge-secret");
        assert!(BridgeConfig::from_env().is_err());
        clear_env();
    }
}
