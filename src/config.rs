//! Normalizer configuration loaded from environment variables.
//!
//! The pump's zone drives every offset the normalizer emits, so it is an
//! explicit setting rather than the host's local zone.

use chrono_tz::Tz;
use std::env;
use std::fmt;
use std::str::FromStr;

use crate::time_utils::TimeNormalizer;

const DEFAULT_PUMP_TIMEZONE: Tz = chrono_tz::America::New_York;
/// Zone the cloud service renders epoch values in.
const DEFAULT_SOURCE_TIMEZONE: Tz = chrono_tz::America::Los_Angeles;

/// Categories of pump history that can be synchronized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Feature {
    Basal,
    Bolus,
    Iob,
    BolusBg,
    Cgm,
    PumpEvents,
    PumpEventsBasalSuspension,
    Profiles,
    CgmAlerts,
    DeviceStatus,
}

impl Feature {
    /// Enabled when `FEATURES` is not set.
    pub const DEFAULT: &'static [Feature] = &[
        Feature::Basal,
        Feature::Bolus,
        Feature::PumpEvents,
        Feature::Profiles,
    ];

    /// Generally available features.
    pub const STABLE: &'static [Feature] = &[
        Feature::Basal,
        Feature::Bolus,
        Feature::Iob,
        Feature::PumpEventsBasalSuspension,
        Feature::PumpEvents,
        Feature::Profiles,
        Feature::Cgm,
        Feature::CgmAlerts,
        Feature::DeviceStatus,
    ];

    /// Features only selectable with `ENABLE_TESTING_MODES`.
    pub const TESTING: &'static [Feature] = &[Feature::BolusBg];

    pub fn as_str(&self) -> &'static str {
        match self {
            Feature::Basal => "BASAL",
            Feature::Bolus => "BOLUS",
            Feature::Iob => "IOB",
            Feature::BolusBg => "BOLUS_BG",
            Feature::Cgm => "CGM",
            Feature::PumpEvents => "PUMP_EVENTS",
            Feature::PumpEventsBasalSuspension => "PUMP_EVENTS_BASAL_SUSPENSION",
            Feature::Profiles => "PROFILES",
            Feature::CgmAlerts => "CGM_ALERTS",
            Feature::DeviceStatus => "DEVICE_STATUS",
        }
    }

    /// Every feature selectable under the given mode.
    pub fn available(testing_modes: bool) -> Vec<Feature> {
        let mut all = Self::STABLE.to_vec();
        if testing_modes {
            all.extend_from_slice(Self::TESTING);
        }
        all
    }
}

impl fmt::Display for Feature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Feature {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::STABLE
            .iter()
            .chain(Self::TESTING)
            .find(|f| f.as_str() == s)
            .copied()
            .ok_or_else(|| ConfigError::UnknownFeature(s.to_string()))
    }
}

/// Normalizer configuration, loaded once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// IANA zone the pump clock is set to
    pub pump_timezone: Tz,
    /// IANA zone the cloud API renders epoch timestamps in
    pub source_timezone: Tz,
    /// Categories to normalize
    pub features: Vec<Feature>,
    /// Allows selecting features that are not ready for wide use
    pub enable_testing_modes: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            pump_timezone: DEFAULT_PUMP_TIMEZONE,
            source_timezone: DEFAULT_SOURCE_TIMEZONE,
            features: Feature::DEFAULT.to_vec(),
            enable_testing_modes: false,
        }
    }
}

impl Config {
    /// Load configuration from environment variables (and `.env` if present).
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_vars(|key| env::var(key).ok())
    }

    /// Load configuration from an arbitrary variable lookup.
    pub fn from_vars<F>(var: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let enable_testing_modes = var("ENABLE_TESTING_MODES")
            .map(|v| is_truthy(&v))
            .unwrap_or(false);

        let features = match var("FEATURES") {
            Some(raw) if !raw.trim().is_empty() => parse_features(&raw, enable_testing_modes)?,
            _ => Feature::DEFAULT.to_vec(),
        };

        Ok(Self {
            pump_timezone: parse_timezone(&var, "PUMP_TIMEZONE", DEFAULT_PUMP_TIMEZONE)?,
            source_timezone: parse_timezone(&var, "SOURCE_TIMEZONE", DEFAULT_SOURCE_TIMEZONE)?,
            features,
            enable_testing_modes,
        })
    }

    pub fn is_enabled(&self, feature: Feature) -> bool {
        self.features.contains(&feature)
    }

    pub fn normalizer(&self) -> TimeNormalizer {
        TimeNormalizer::new(self.pump_timezone, self.source_timezone)
    }
}

fn parse_timezone<F>(var: &F, key: &'static str, default: Tz) -> Result<Tz, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    match var(key) {
        Some(raw) if !raw.trim().is_empty() => {
            raw.trim()
                .parse::<Tz>()
                .map_err(|_| ConfigError::InvalidTimezone {
                    var: key,
                    value: raw.clone(),
                })
        }
        _ => Ok(default),
    }
}

/// Comma-separated feature names; blank entries are dropped.
fn parse_features(raw: &str, testing_modes: bool) -> Result<Vec<Feature>, ConfigError> {
    let available = Feature::available(testing_modes);
    let mut features = Vec::new();

    for name in raw.split(',').map(str::trim).filter(|s| !s.is_empty()) {
        let feature: Feature = name.parse()?;
        if !available.contains(&feature) {
            return Err(ConfigError::UnavailableFeature(feature));
        }
        if !features.contains(&feature) {
            features.push(feature);
        }
    }

    Ok(features)
}

fn is_truthy(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid timezone in {var}: {value:?}")]
    InvalidTimezone { var: &'static str, value: String },

    #[error("Unknown feature: {0}")]
    UnknownFeature(String),

    #[error("Feature {0} requires ENABLE_TESTING_MODES")]
    UnavailableFeature(Feature),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn load(vars: &[(&str, &str)]) -> Result<Config, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_vars(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_config_defaults() {
        let config = load(&[]).expect("Config should load");

        assert_eq!(config.pump_timezone, chrono_tz::America::New_York);
        assert_eq!(config.source_timezone, chrono_tz::America::Los_Angeles);
        assert_eq!(config.features, Feature::DEFAULT);
        assert!(!config.enable_testing_modes);
    }

    #[test]
    fn test_config_timezones() {
        let config = load(&[
            ("PUMP_TIMEZONE", "Europe/Berlin"),
            ("SOURCE_TIMEZONE", "UTC"),
        ])
        .expect("Config should load");

        assert_eq!(config.pump_timezone, chrono_tz::Europe::Berlin);
        assert_eq!(config.source_timezone, chrono_tz::UTC);
        assert_eq!(
            config.normalizer(),
            TimeNormalizer::new(chrono_tz::Europe::Berlin, chrono_tz::UTC)
        );
    }

    #[test]
    fn test_config_invalid_timezone() {
        let err = load(&[("PUMP_TIMEZONE", "Mars/Olympus_Mons")]).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::InvalidTimezone {
                var: "PUMP_TIMEZONE",
                ..
            }
        ));
    }

    #[test]
    fn test_features_override() {
        let config = load(&[("FEATURES", " BASAL, ,IOB,CGM,BASAL ")]).expect("Config should load");
        assert_eq!(
            config.features,
            vec![Feature::Basal, Feature::Iob, Feature::Cgm]
        );
        assert!(config.is_enabled(Feature::Iob));
        assert!(!config.is_enabled(Feature::Bolus));
    }

    #[test]
    fn test_blank_features_uses_defaults() {
        let config = load(&[("FEATURES", "  ")]).expect("Config should load");
        assert_eq!(config.features, Feature::DEFAULT);
    }

    #[test]
    fn test_unknown_feature() {
        let err = load(&[("FEATURES", "BASAL,INSULIN")]).unwrap_err();
        assert!(matches!(err, ConfigError::UnknownFeature(name) if name == "INSULIN"));
    }

    #[test]
    fn test_testing_feature_requires_testing_modes() {
        let err = load(&[("FEATURES", "BOLUS_BG")]).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::UnavailableFeature(Feature::BolusBg)
        ));

        let config = load(&[("FEATURES", "BOLUS_BG"), ("ENABLE_TESTING_MODES", "true")])
            .expect("Config should load");
        assert_eq!(config.features, vec![Feature::BolusBg]);
    }
}
