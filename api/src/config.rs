use crate::error::{ApiError, ApiResult};
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

pub const ENV_PROVIDER: &str = "CRICTUI_PROVIDER";
pub const ENV_API_TOKEN: &str = "CRICTUI_API_TOKEN";
pub const ENV_BASE_URL: &str = "CRICTUI_BASE_URL";
pub const ENV_TIMEOUT_SECS: &str = "CRICTUI_TIMEOUT_SECS";

const SPORTMONKS_BASE: &str = "https://cricket.sportmonks.com/api/v2.0";
const CRICTEZ_BASE: &str = "http://apicrictez.com/webservices";
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Upstream cricket data provider.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ProviderKind {
    #[default]
    SportMonks,
    /// Older live-line API; credential in the path, POST bodies.
    CricTez,
}

impl ProviderKind {
    pub fn default_base_url(self) -> &'static str {
        match self {
            ProviderKind::SportMonks => SPORTMONKS_BASE,
            ProviderKind::CricTez => CRICTEZ_BASE,
        }
    }
}

impl fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProviderKind::SportMonks => write!(f, "sportmonks"),
            ProviderKind::CricTez => write!(f, "crictez"),
        }
    }
}

impl FromStr for ProviderKind {
    type Err = ApiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "sportmonks" | "sm" => Ok(ProviderKind::SportMonks),
            "crictez" | "legacy" => Ok(ProviderKind::CricTez),
            other => Err(ApiError::Config(format!("unknown provider '{other}'"))),
        }
    }
}

/// Everything Transport needs to reach the upstream. Built once, injected.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiConfig {
    pub provider: ProviderKind,
    pub base_url: String,
    pub api_token: String,
    pub timeout: Duration,
}

impl ApiConfig {
    pub fn new(provider: ProviderKind, api_token: impl Into<String>) -> Self {
        Self {
            provider,
            base_url: provider.default_base_url().to_owned(),
            api_token: api_token.into(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Read `CRICTUI_*` environment variables. The token is required.
    pub fn from_env() -> ApiResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> ApiResult<Self> {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let provider = match get(ENV_PROVIDER) {
            Some(name) => name.parse()?,
            None => ProviderKind::default(),
        };

        let token = get(ENV_API_TOKEN)
            .ok_or_else(|| ApiError::Config(format!("{ENV_API_TOKEN} is not set")))?;

        let mut config = Self::new(provider, token.trim());

        if let Some(base_url) = get(ENV_BASE_URL) {
            config = config.with_base_url(base_url.trim());
        }

        if let Some(secs) = get(ENV_TIMEOUT_SECS) {
            let secs: u64 = secs
                .trim()
                .parse()
                .map_err(|e| ApiError::Config(format!("invalid {ENV_TIMEOUT_SECS} '{secs}': {e}")))?;
            config = config.with_timeout(Duration::from_secs(secs));
        }

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn token_is_required() {
        let err = ApiConfig::from_lookup(lookup(&[])).unwrap_err();
        assert!(err.to_string().contains(ENV_API_TOKEN));

        let err = ApiConfig::from_lookup(lookup(&[(ENV_API_TOKEN, "   ")])).unwrap_err();
        assert!(matches!(err, ApiError::Config(_)));
    }

    #[test]
    fn defaults_to_sportmonks() {
        let config = ApiConfig::from_lookup(lookup(&[(ENV_API_TOKEN, "tok")])).unwrap();
        assert_eq!(config.provider, ProviderKind::SportMonks);
        assert_eq!(config.base_url, SPORTMONKS_BASE);
        assert_eq!(config.api_token, "tok");
        assert_eq!(config.timeout, DEFAULT_TIMEOUT);
    }

    #[test]
    fn overrides_are_applied() {
        let config = ApiConfig::from_lookup(lookup(&[
            (ENV_API_TOKEN, "tok"),
            (ENV_PROVIDER, "CricTez"),
            (ENV_BASE_URL, "http://localhost:9000"),
            (ENV_TIMEOUT_SECS, "3"),
        ]))
        .unwrap();
        assert_eq!(config.provider, ProviderKind::CricTez);
        assert_eq!(config.base_url, "http://localhost:9000");
        assert_eq!(config.timeout, Duration::from_secs(3));
    }

    #[test]
    fn bad_values_are_config_errors() {
        let err = ApiConfig::from_lookup(lookup(&[(ENV_API_TOKEN, "t"), (ENV_PROVIDER, "espn")]))
            .unwrap_err();
        assert!(matches!(err, ApiError::Config(_)));

        let err = ApiConfig::from_lookup(lookup(&[(ENV_API_TOKEN, "t"), (ENV_TIMEOUT_SECS, "soon")]))
            .unwrap_err();
        assert!(matches!(err, ApiError::Config(_)));
    }

    #[test]
    fn provider_names_round_trip_through_display() {
        for kind in [ProviderKind::SportMonks, ProviderKind::CricTez] {
            assert_eq!(kind.to_string().parse::<ProviderKind>().unwrap(), kind);
        }
    }
}
