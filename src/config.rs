/*!
 * Simulation Configuration
 * Defaults, optional JSON file, environment overrides
 *
 * Environment variables:
 * - SIM_CONFIG: path to a JSON config file
 * - SIM_MEMORY_CAPACITY: admission queue capacity (default: 10)
 * - SIM_MAX_CYCLES: number of scheduler cycles (default: 10)
 * - SIM_TIME_UNIT_MS: milliseconds per burst unit (default: 100)
 * - SIM_PACING_MS: minimum milliseconds between cycle starts (default: off)
 * - SIM_SEED: seed for process attributes (default: random)
 */

use crate::core::errors::ConfigError;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use tracing::info;

pub const DEFAULT_MEMORY_CAPACITY: usize = 10;
pub const DEFAULT_MAX_CYCLES: u64 = 10;
pub const DEFAULT_TIME_UNIT: Duration = Duration::from_millis(100);

/// Configuration consumed by the scheduler loop
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimConfig {
    pub memory_capacity: usize,
    pub max_cycles: u64,
    pub time_unit: Duration,
    pub pacing: Option<Duration>,
    pub seed: Option<u64>,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            memory_capacity: DEFAULT_MEMORY_CAPACITY,
            max_cycles: DEFAULT_MAX_CYCLES,
            time_unit: DEFAULT_TIME_UNIT,
            pacing: None,
            seed: None,
        }
    }
}

/// On-disk form; every field optional so a file may override a subset
#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
struct ConfigFile {
    memory_capacity: Option<usize>,
    max_cycles: Option<u64>,
    time_unit_ms: Option<u64>,
    pacing_ms: Option<u64>,
    seed: Option<u64>,
}

impl SimConfig {
    pub fn with_memory_capacity(mut self, capacity: usize) -> Self {
        self.memory_capacity = capacity;
        self
    }

    pub fn with_max_cycles(mut self, cycles: u64) -> Self {
        self.max_cycles = cycles;
        self
    }

    pub fn with_time_unit(mut self, unit: Duration) -> Self {
        self.time_unit = unit;
        self
    }

    pub fn with_pacing(mut self, interval: Duration) -> Self {
        self.pacing = Some(interval);
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Reject configurations the simulator cannot run
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.memory_capacity == 0 {
            return Err(ConfigError::InvalidCapacity);
        }
        if self.max_cycles == 0 {
            return Err(ConfigError::InvalidMaxCycles);
        }
        Ok(())
    }

    /// Load from the process environment
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load using `lookup` in place of the environment
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(path) = lookup("SIM_CONFIG") {
            config = config.merge_file(Path::new(&path))?;
        }

        if let Some(v) = parse_var(&lookup, "SIM_MEMORY_CAPACITY")? {
            config.memory_capacity = usize::try_from(v).unwrap_or(usize::MAX);
        }
        if let Some(v) = parse_var(&lookup, "SIM_MAX_CYCLES")? {
            config.max_cycles = v;
        }
        if let Some(v) = parse_var(&lookup, "SIM_TIME_UNIT_MS")? {
            config.time_unit = Duration::from_millis(v);
        }
        if let Some(v) = parse_var(&lookup, "SIM_PACING_MS")? {
            config.pacing = (v > 0).then(|| Duration::from_millis(v));
        }
        if let Some(v) = parse_var(&lookup, "SIM_SEED")? {
            config.seed = Some(v);
        }

        config.validate()?;
        Ok(config)
    }

    /// Load a JSON file over the defaults
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let config = Self::default().merge_file(path)?;
        config.validate()?;
        Ok(config)
    }

    fn merge_file(mut self, path: &Path) -> Result<Self, ConfigError> {
        let shown = path.display().to_string();
        let raw = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: shown.clone(),
            reason: e.to_string(),
        })?;
        let file: ConfigFile = serde_json::from_str(&raw).map_err(|e| ConfigError::Parse {
            path: shown.clone(),
            reason: e.to_string(),
        })?;

        if let Some(v) = file.memory_capacity {
            self.memory_capacity = v;
        }
        if let Some(v) = file.max_cycles {
            self.max_cycles = v;
        }
        if let Some(v) = file.time_unit_ms {
            self.time_unit = Duration::from_millis(v);
        }
        if let Some(v) = file.pacing_ms {
            self.pacing = (v > 0).then(|| Duration::from_millis(v));
        }
        if let Some(v) = file.seed {
            self.seed = Some(v);
        }

        info!(path = %shown, "Loaded config file");
        Ok(self)
    }
}

fn parse_var<F>(lookup: &F, key: &str) -> Result<Option<u64>, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        None => Ok(None),
        Some(raw) => raw
            .trim()
            .parse::<u64>()
            .map(Some)
            .map_err(|_| ConfigError::InvalidValue {
                key: key.to_string(),
                value: raw,
            }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = SimConfig::from_lookup(lookup_from(&[])).unwrap();
        assert_eq!(config, SimConfig::default());
        assert_eq!(config.memory_capacity, 10);
        assert_eq!(config.max_cycles, 10);
        assert_eq!(config.time_unit, Duration::from_millis(100));
    }

    #[test]
    fn test_env_overrides() {
        let config = SimConfig::from_lookup(lookup_from(&[
            ("SIM_MEMORY_CAPACITY", "3"),
            ("SIM_MAX_CYCLES", "25"),
            ("SIM_TIME_UNIT_MS", "0"),
            ("SIM_PACING_MS", "15"),
            ("SIM_SEED", "99"),
        ]))
        .unwrap();

        assert_eq!(config.memory_capacity, 3);
        assert_eq!(config.max_cycles, 25);
        assert_eq!(config.time_unit, Duration::ZERO);
        assert_eq!(config.pacing, Some(Duration::from_millis(15)));
        assert_eq!(config.seed, Some(99));
    }

    #[test]
    fn test_rejects_zero_and_garbage() {
        assert_eq!(
            SimConfig::from_lookup(lookup_from(&[("SIM_MEMORY_CAPACITY", "0")])),
            Err(ConfigError::InvalidCapacity)
        );
        assert_eq!(
            SimConfig::from_lookup(lookup_from(&[("SIM_MAX_CYCLES", "0")])),
            Err(ConfigError::InvalidMaxCycles)
        );
        assert_eq!(
            SimConfig::from_lookup(lookup_from(&[("SIM_SEED", "abc")])),
            Err(ConfigError::InvalidValue {
                key: "SIM_SEED".to_string(),
                value: "abc".to_string(),
            })
        );
    }

    #[test]
    fn test_max_capacity_accepted() {
        let config = SimConfig::from_lookup(lookup_from(&[(
            "SIM_MEMORY_CAPACITY",
            "18446744073709551615",
        )]))
        .unwrap();
        assert_eq!(config.memory_capacity, usize::MAX);
    }

    #[test]
    fn test_missing_file() {
        let err = SimConfig::from_lookup(lookup_from(&[(
            "SIM_CONFIG",
            "/nonexistent/sim-config.json",
        )]))
        .unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }
}
