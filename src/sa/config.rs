//! Annealing configuration.

use crate::error::{AutonomyError, Result};
use crate::objective::AutonomyFormulation;

/// Configuration for the autonomy annealing search.
///
/// The temperature starts at `initial_temperature` and is multiplied by
/// `cooling_rate` after every `iterations_per_temperature` neighbor
/// evaluations, until it is no longer above `final_temperature`.
///
/// # Examples
///
/// ```
/// use u_autonomy::sa::AnnealingConfig;
///
/// let config = AnnealingConfig::default()
///     .with_initial_temperature(10.0)
///     .with_final_temperature(1.0)
///     .with_cooling_rate(0.9)
///     .with_iterations_per_temperature(20)
///     .with_seed(7);
/// assert!(config.validate().is_ok());
/// assert_eq!(config.temperature_steps(), 22);
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct AnnealingConfig {
    /// Starting temperature. Higher values accept more worsening moves.
    pub initial_temperature: f64,

    /// The search stops once the temperature is at or below this value.
    /// Must be positive.
    pub final_temperature: f64,

    /// Geometric cooling factor in (0, 1).
    pub cooling_rate: f64,

    /// Number of neighbor evaluations at each temperature.
    pub iterations_per_temperature: usize,

    /// Random seed for reproducibility. `None` draws a fresh seed.
    pub seed: Option<u64>,

    /// Objective variant used by the evaluator.
    pub formulation: AutonomyFormulation,
}

impl Default for AnnealingConfig {
    fn default() -> Self {
        Self {
            initial_temperature: 10.0,
            final_temperature: 0.01,
            cooling_rate: 0.95,
            iterations_per_temperature: 100,
            seed: None,
            formulation: AutonomyFormulation::default(),
        }
    }
}

impl AnnealingConfig {
    pub fn with_initial_temperature(mut self, t: f64) -> Self {
        self.initial_temperature = t;
        self
    }

    pub fn with_final_temperature(mut self, t: f64) -> Self {
        self.final_temperature = t;
        self
    }

    pub fn with_cooling_rate(mut self, rate: f64) -> Self {
        self.cooling_rate = rate;
        self
    }

    pub fn with_iterations_per_temperature(mut self, n: usize) -> Self {
        self.iterations_per_temperature = n;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_formulation(mut self, formulation: AutonomyFormulation) -> Self {
        self.formulation = formulation;
        self
    }

    /// Validates the configuration.
    ///
    /// Requires `initial_temperature > final_temperature > 0`, a cooling
    /// rate strictly between 0 and 1, and at least one iteration per
    /// temperature.
    pub fn validate(&self) -> Result<()> {
        if !self.initial_temperature.is_finite() || !self.final_temperature.is_finite() {
            return Err(AutonomyError::InvalidConfig(
                "temperatures must be finite".into(),
            ));
        }
        if self.final_temperature <= 0.0 {
            return Err(AutonomyError::InvalidConfig(format!(
                "final_temperature must be positive, got {}",
                self.final_temperature
            )));
        }
        if self.initial_temperature <= self.final_temperature {
            return Err(AutonomyError::InvalidConfig(format!(
                "initial_temperature {} must exceed final_temperature {}",
                self.initial_temperature, self.final_temperature
            )));
        }
        if !(self.cooling_rate > 0.0 && self.cooling_rate < 1.0) {
            return Err(AutonomyError::InvalidConfig(format!(
                "cooling_rate must be in (0, 1), got {}",
                self.cooling_rate
            )));
        }
        if self.iterations_per_temperature == 0 {
            return Err(AutonomyError::InvalidConfig(
                "iterations_per_temperature must be at least 1".into(),
            ));
        }
        Ok(())
    }

    /// Number of temperature steps the search will run, obtained by
    /// replaying the same geometric decay the search loop applies.
    ///
    /// Returns 0 for a configuration that would never terminate or never
    /// start.
    pub fn temperature_steps(&self) -> usize {
        if self.validate().is_err() {
            return 0;
        }
        let mut temperature = self.initial_temperature;
        let mut steps = 0;
        while temperature > self.final_temperature {
            temperature *= self.cooling_rate;
            steps += 1;
        }
        steps
    }

    /// Total inner iterations, `temperature_steps() * iterations_per_temperature`,
    /// saturating at `usize::MAX`.
    pub fn total_iterations(&self) -> usize {
        self.temperature_steps()
            .saturating_mul(self.iterations_per_temperature)
    }

    /// Loads a configuration from a TOML file.
    #[cfg(feature = "serde")]
    pub fn from_toml_file(path: impl AsRef<std::path::Path>) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    /// Parses and validates a configuration from a TOML string.
    ///
    /// Missing keys take their default values.
    #[cfg(feature = "serde")]
    pub fn from_toml_str(s: &str) -> Result<Self> {
        let config: Self = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }
}
