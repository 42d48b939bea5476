use log::LevelFilter;
use std::time::Duration;

pub const ENV_LOG: &str = "CRICTUI_LOG";
pub const ENV_REFRESH_SECS: &str = "CRICTUI_REFRESH_SECS";

const DEFAULT_REFRESH: Duration = Duration::from_secs(30);

#[derive(Debug, Clone, PartialEq)]
pub struct AppSettings {
    pub full_screen: bool,
    pub log_level: Option<LevelFilter>,
    /// Live score poll interval.
    pub refresh_interval: Duration,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self { full_screen: false, log_level: None, refresh_interval: DEFAULT_REFRESH }
    }
}

impl AppSettings {
    pub fn load() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Unparseable values fall back to the defaults; the logger is not up yet
    /// to report them.
    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let log_level = lookup(ENV_LOG).and_then(|v| v.trim().parse().ok());
        let refresh_interval = lookup(ENV_REFRESH_SECS)
            .and_then(|v| v.trim().parse::<u64>().ok())
            .filter(|secs| *secs > 0)
            .map(Duration::from_secs)
            .unwrap_or(DEFAULT_REFRESH);

        Self { full_screen: false, log_level, refresh_interval }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_without_env() {
        assert_eq!(AppSettings::from_lookup(|_| None), AppSettings::default());
    }

    #[test]
    fn reads_level_and_interval() {
        let settings = AppSettings::from_lookup(|key| match key {
            ENV_LOG => Some("debug".into()),
            ENV_REFRESH_SECS => Some("5".into()),
            _ => None,
        });
        assert_eq!(settings.log_level, Some(LevelFilter::Debug));
        assert_eq!(settings.refresh_interval, Duration::from_secs(5));
    }

    #[test]
    fn bad_values_fall_back() {
        let settings = AppSettings::from_lookup(|key| match key {
            ENV_LOG => Some("chatty".into()),
            ENV_REFRESH_SECS => Some("0".into()),
            _ => None,
        });
        assert_eq!(settings.log_level, None);
        assert_eq!(settings.refresh_interval, DEFAULT_REFRESH);
    }
}
