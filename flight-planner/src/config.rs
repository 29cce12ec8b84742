use std::env;
use std::path::PathBuf;

use logger::Level;

use crate::types::planner_error::PlannerError;

pub const DEFAULT_AIRPORTS_FILE: &str = "Airport_Database.csv";
pub const DEFAULT_AIRCRAFT_FILE: &str = "airplanes.csv";
pub const DEFAULT_WORKERS: usize = 4;

/// Runtime settings read from the environment.
///
/// | Variable                | Default                |
/// |-------------------------|------------------------|
/// | `PLANNER_AIRPORTS_FILE` | `Airport_Database.csv` |
/// | `PLANNER_AIRCRAFT_FILE` | `airplanes.csv`        |
/// | `PLANNER_LOG_DIR`       | console only           |
/// | `PLANNER_LOG_LEVEL`     | `info`                 |
/// | `PLANNER_WORKERS`       | `4`                    |
#[derive(Debug, Clone, PartialEq)]
pub struct PlannerConfig {
    pub airports_file: PathBuf,
    pub aircraft_file: PathBuf,
    pub log_dir: Option<PathBuf>,
    pub log_level: Level,
    pub workers: usize,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        PlannerConfig {
            airports_file: PathBuf::from(DEFAULT_AIRPORTS_FILE),
            aircraft_file: PathBuf::from(DEFAULT_AIRCRAFT_FILE),
            log_dir: None,
            log_level: Level::Info,
            workers: DEFAULT_WORKERS,
        }
    }
}

impl PlannerConfig {
    pub fn from_env() -> Result<Self, PlannerError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the configuration from any key lookup. Unset or blank keys take their default.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, PlannerError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let value = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let mut config = PlannerConfig::default();

        if let Some(path) = value("PLANNER_AIRPORTS_FILE") {
            config.airports_file = PathBuf::from(path);
        }
        if let Some(path) = value("PLANNER_AIRCRAFT_FILE") {
            config.aircraft_file = PathBuf::from(path);
        }
        config.log_dir = value("PLANNER_LOG_DIR").map(PathBuf::from);
        if let Some(raw) = value("PLANNER_LOG_LEVEL") {
            config.log_level = Level::parse(&raw).ok_or_else(|| {
                PlannerError::InvalidInput(format!(
                    "PLANNER_LOG_LEVEL must be one of debug|info|warn|error, got '{}'",
                    raw
                ))
            })?;
        }
        if let Some(raw) = value("PLANNER_WORKERS") {
            config.workers = match raw.parse::<usize>() {
                Ok(n) if n >= 1 => n,
                _ => {
                    return Err(PlannerError::InvalidInput(format!(
                        "PLANNER_WORKERS must be a positive integer, got '{}'",
                        raw
                    )))
                }
            };
        }

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_defaults_when_nothing_is_set() {
        let config = PlannerConfig::from_lookup(lookup_from(&[])).unwrap();
        assert_eq!(config, PlannerConfig::default());
        assert_eq!(config.workers, 4);
        assert_eq!(config.log_level, Level::Info);
        assert_eq!(config.airports_file, PathBuf::from("Airport_Database.csv"));
    }

    #[test]
    fn test_overrides() {
        let config = PlannerConfig::from_lookup(lookup_from(&[
            ("PLANNER_AIRPORTS_FILE", "data/airports.csv"),
            ("PLANNER_AIRCRAFT_FILE", "data/planes.csv"),
            ("PLANNER_LOG_DIR", "/tmp/planner"),
            ("PLANNER_LOG_LEVEL", "DEBUG"),
            ("PLANNER_WORKERS", " 8 "),
        ]))
        .unwrap();

        assert_eq!(config.airports_file, PathBuf::from("data/airports.csv"));
        assert_eq!(config.aircraft_file, PathBuf::from("data/planes.csv"));
        assert_eq!(config.log_dir, Some(PathBuf::from("/tmp/planner")));
        assert_eq!(config.log_level, Level::Debug);
        assert_eq!(config.workers, 8);
    }

    #[test]
    fn test_blank_values_fall_back_to_defaults() {
        let config = PlannerConfig::from_lookup(lookup_from(&[
            ("PLANNER_LOG_DIR", "  "),
            ("PLANNER_WORKERS", ""),
        ]))
        .unwrap();
        assert_eq!(config.log_dir, None);
        assert_eq!(config.workers, DEFAULT_WORKERS);
    }

    #[test]
    fn test_unknown_log_level() {
        let result = PlannerConfig::from_lookup(lookup_from(&[("PLANNER_LOG_LEVEL", "verbose")]));
        assert!(matches!(result, Err(PlannerError::InvalidInput(_))));
    }

    #[test]
    fn test_log_level_aliases() {
        let config =
            PlannerConfig::from_lookup(lookup_from(&[("PLANNER_LOG_LEVEL", "Warning")])).unwrap();
        assert_eq!(config.log_level, Level::Warn);
    }

    #[test]
    fn test_invalid_worker_count() {
        for raw in ["0", "-2", "many"] {
            let result = PlannerConfig::from_lookup(lookup_from(&[("PLANNER_WORKERS", raw)]));
            assert!(matches!(result, Err(PlannerError::InvalidInput(_))), "{}", raw);
        }
    }
}
