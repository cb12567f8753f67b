//! Engine configuration
//!
//! Loaded from an optional JSON file, then overridden by environment
//! variables:
//!   FINCALC_INITIAL_GUESS, FINCALC_MAX_ITERATIONS, FINCALC_TOLERANCE,
//!   FINCALC_LOWER_BOUND, FINCALC_UPPER_BOUND,
//!   FINCALC_NPV_MIN_RATE, FINCALC_NPV_MAX_RATE, FINCALC_NPV_RATE_STEP

use crate::series::RateRange;
use crate::solver::SolverConfig;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::path::Path;
use std::str::FromStr;

/// Settings shared by every operation of one run
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub solver: SolverConfig,
    pub npv_range: RateRange,
}

impl EngineConfig {
    /// Load from a JSON file; missing fields take their defaults
    pub fn from_json_path(path: &Path) -> Result<Self, Box<dyn Error + Send + Sync>> {
        let text = std::fs::read_to_string(path)?;
        let config = serde_json::from_str(&text)?;
        log::info!("loaded engine config from {}", path.display());
        Ok(config)
    }

    /// Apply `FINCALC_*` overrides from the process environment
    pub fn with_env_overrides(self) -> Self {
        self.with_overrides(|key| std::env::var(key).ok())
    }

    /// Apply overrides from any key lookup
    pub fn with_overrides<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let solver = &mut self.solver;
        override_value(&lookup, "FINCALC_INITIAL_GUESS", &mut solver.initial_guess);
        override_value(&lookup, "FINCALC_MAX_ITERATIONS", &mut solver.max_iterations);
        override_value(&lookup, "FINCALC_TOLERANCE", &mut solver.tolerance);
        override_value(&lookup, "FINCALC_LOWER_BOUND", &mut solver.lower_bound);
        override_value(&lookup, "FINCALC_UPPER_BOUND", &mut solver.upper_bound);

        let range = &mut self.npv_range;
        override_value(&lookup, "FINCALC_NPV_MIN_RATE", &mut range.min);
        override_value(&lookup, "FINCALC_NPV_MAX_RATE", &mut range.max);
        override_value(&lookup, "FINCALC_NPV_RATE_STEP", &mut range.step);

        self
    }
}

fn override_value<T, F>(lookup: &F, key: &str, target: &mut T)
where
    T: FromStr,
    F: Fn(&str) -> Option<String>,
{
    if let Some(raw) = lookup(key) {
        match raw.trim().parse() {
            Ok(value) => *target = value,
            Err(_) => log::warn!("ignoring {}: cannot parse '{}'", key, raw),
        }
    }
}
