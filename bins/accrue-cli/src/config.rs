//! Simulation schedule loaded from a config file.
//!
//! The file format (TOML, JSON, YAML) is inferred from the extension.
//! Top-level scalars can be overridden with `ACCRUE_`-prefixed environment
//! variables, e.g. `ACCRUE_PERIOD=3600`.

use std::path::Path;

use accrue_core::error::AccrualError;
use accrue_core::fixed::parse_fixed;
use anyhow::{Context, Result};
use serde::Deserialize;

/// Prefix for environment overrides.
pub const ENV_PREFIX: &str = "ACCRUE";

/// A keeper configuration plus a timeline of operations to replay.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SimulationConfig {
    /// Per-period rate as a decimal string, e.g. `"1.0001"`.
    pub initial_rate: String,
    /// Capitalization period in seconds. Zero starts frozen.
    pub period: u64,
    /// Unix seconds at which the keeper is initialized.
    #[serde(default)]
    pub start: u64,
    /// Operations in non-decreasing time order.
    #[serde(default)]
    pub steps: Vec<Step>,
}

/// One operation on the simulated keeper.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum Step {
    Query { at: u64 },
    Checkpoint { at: u64 },
    Accrue { at: u64 },
    SetRate { at: u64, rate: String },
    SetPeriod { at: u64, period: u64 },
}

impl Step {
    pub fn at(&self) -> u64 {
        match self {
            Self::Query { at }
            | Self::Checkpoint { at }
            | Self::Accrue { at }
            | Self::SetRate { at, .. }
            | Self::SetPeriod { at, .. } => *at,
        }
    }

    pub fn action(&self) -> &'static str {
        match self {
            Self::Query { .. } => "query",
            Self::Checkpoint { .. } => "checkpoint",
            Self::Accrue { .. } => "accrue",
            Self::SetRate { .. } => "set_rate",
            Self::SetPeriod { .. } => "set_period",
        }
    }
}

impl SimulationConfig {
    /// Load from `path` with environment overrides, then validate.
    pub fn load(path: &Path) -> Result<Self> {
        let settings = ::config::Config::builder()
            .add_source(::config::File::from(path))
            .add_source(::config::Environment::with_prefix(ENV_PREFIX))
            .build()
            .with_context(|| format!("failed to read simulation file {}", path.display()))?;

        let sim: SimulationConfig = settings
            .try_deserialize()
            .context("malformed simulation file")?;
        sim.validate()?;
        Ok(sim)
    }

    /// Check that every rate parses and the timeline never runs backwards.
    pub fn validate(&self) -> Result<(), AccrualError> {
        parse_fixed(&self.initial_rate)?;

        let mut previous = self.start;
        for (index, step) in self.steps.iter().enumerate() {
            if step.at() < previous {
                return Err(AccrualError::InvalidConfig(format!(
                    "step {index} ({}) at {} is before {previous}",
                    step.action(),
                    step.at()
                )));
            }
            if let Step::SetRate { rate, .. } = step {
                parse_fixed(rate)?;
            }
            previous = step.at();
        }
        Ok(())
    }
}
