use serde::{Deserialize, Serialize};
use std::time::Duration;

const DEFAULT_WHOIS_TIMEOUT_SECONDS: u64 = 10;
const DEFAULT_WHOIS_PORT: u16 = 43;
const DEFAULT_MAX_REFERRALS: usize = 3;
const DEFAULT_MIN_REFERRAL_RESPONSE_LEN: usize = 100;
const DEFAULT_MAX_RESPONSE_SIZE: usize = 1024 * 1024;
const DEFAULT_CACHE_TTL_SECONDS: u64 = 3600;
const DEFAULT_REQUEST_TIMEOUT_MS: u64 = 10_000;
const DEFAULT_DNS_TIMEOUT_SECONDS: u64 = 5;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    pub whois_timeout_seconds: u64,
    pub whois_port: u16,
    pub max_referrals: usize,
    pub min_referral_response_len: usize, // referral answers at or below this are ignored
    pub max_response_size: usize,
    pub cache_ttl_seconds: u64,
    pub request_timeout_ms: u64,
    pub dns_timeout_seconds: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            whois_timeout_seconds: DEFAULT_WHOIS_TIMEOUT_SECONDS,
            whois_port: DEFAULT_WHOIS_PORT,
            max_referrals: DEFAULT_MAX_REFERRALS,
            min_referral_response_len: DEFAULT_MIN_REFERRAL_RESPONSE_LEN,
            max_response_size: DEFAULT_MAX_RESPONSE_SIZE,
            cache_ttl_seconds: DEFAULT_CACHE_TTL_SECONDS,
            request_timeout_ms: DEFAULT_REQUEST_TIMEOUT_MS,
            dns_timeout_seconds: DEFAULT_DNS_TIMEOUT_SECONDS,
        }
    }
}

impl Config {
    /// Defaults overridden by any of the recognised environment variables.
    pub fn load() -> Result<Self, config::ConfigError> {
        let overrides = ENV_MAPPINGS
            .iter()
            .filter_map(|(env_var, key)| std::env::var(env_var).ok().map(|value| (*key, value)));

        Self::from_overrides(overrides)
    }

    /// Build a configuration from `(key, value)` overrides on top of the defaults.
    pub fn from_overrides<I, V>(overrides: I) -> Result<Self, config::ConfigError>
    where
        I: IntoIterator<Item = (&'static str, V)>,
        V: Into<config::Value>,
    {
        let mut settings = config::Config::builder()
            .set_default("whois_timeout_seconds", DEFAULT_WHOIS_TIMEOUT_SECONDS)?
            .set_default("whois_port", DEFAULT_WHOIS_PORT as i64)?
            .set_default("max_referrals", DEFAULT_MAX_REFERRALS as i64)?
            .set_default("min_referral_response_len", DEFAULT_MIN_REFERRAL_RESPONSE_LEN as i64)?
            .set_default("max_response_size", DEFAULT_MAX_RESPONSE_SIZE as i64)?
            .set_default("cache_ttl_seconds", DEFAULT_CACHE_TTL_SECONDS)?
            .set_default("request_timeout_ms", DEFAULT_REQUEST_TIMEOUT_MS)?
            .set_default("dns_timeout_seconds", DEFAULT_DNS_TIMEOUT_SECONDS)?;

        for (key, value) in overrides {
            settings = settings.set_override(key, value)?;
        }

        settings.build()?.try_deserialize()
    }

    pub fn whois_timeout(&self) -> Duration {
        Duration::from_secs(self.whois_timeout_seconds)
    }

    pub fn cache_ttl(&self) -> Duration {
        Duration::from_secs(self.cache_ttl_seconds)
    }

    pub fn dns_timeout(&self) -> Duration {
        Duration::from_secs(self.dns_timeout_seconds)
    }
}

const ENV_MAPPINGS: [(&str, &str); 10] = [
    ("WHOIS_TIMEOUT_SECONDS", "whois_timeout_seconds"),
    ("WHOIS_TIMEOUT", "whois_timeout_seconds"),
    ("WHOIS_PORT", "whois_port"),
    ("MAX_REFERRALS", "max_referrals"),
    ("MIN_REFERRAL_RESPONSE_LEN", "min_referral_response_len"),
    ("MAX_RESPONSE_SIZE", "max_response_size"),
    ("CACHE_TTL_SECONDS", "cache_ttl_seconds"),
    ("CACHE_TTL", "cache_ttl_seconds"),
    ("REQUEST_TIMEOUT_MS", "request_timeout_ms"),
    ("DNS_TIMEOUT_SECONDS", "dns_timeout_seconds"),
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.whois_timeout(), Duration::from_secs(10));
        assert_eq!(config.whois_port, 43);
        assert_eq!(config.max_referrals, 3);
        assert_eq!(config.min_referral_response_len, 100);
        assert_eq!(config.cache_ttl(), Duration::from_secs(3600));
        assert_eq!(config.request_timeout_ms, 10_000);
    }

    #[test]
    fn test_no_overrides_matches_default() {
        let config = Config::from_overrides(Vec::<(&'static str, String)>::new()).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_overrides_are_applied() {
        let config = Config::from_overrides(vec![
            ("max_referrals", "5".to_string()),
            ("cache_ttl_seconds", "60".to_string()),
        ])
        .unwrap();

        assert_eq!(config.max_referrals, 5);
        assert_eq!(config.cache_ttl_seconds, 60);
        assert_eq!(config.whois_port, 43);
    }

    #[test]
    fn test_invalid_override_is_an_error() {
        let result = Config::from_overrides(vec![("whois_port", "not-a-port".to_string())]);
        assert!(result.is_err());
    }
}
