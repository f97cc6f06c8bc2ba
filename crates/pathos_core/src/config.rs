use anyhow::{bail, Context, Result};
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;

use crate::personality::Personality;

// ============================================================================
// Top-level config
// ============================================================================

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct PathosConfig {
    pub agent: AgentConfig,
    pub personality: PersonalityConfig,
    pub logging: LoggingConfig,
}

impl PathosConfig {
    /// Load config from a TOML file, falling back to defaults for missing fields.
    /// After loading, env var overrides are applied.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read config file: {}", path.as_ref().display()))?;
        let mut config: PathosConfig =
            toml::from_str(&content).with_context(|| "Failed to parse TOML config")?;
        config.apply_env_overrides();
        config.agent.validate()?;
        Ok(config)
    }

    /// Try to load from path; if the file is missing or invalid, return defaults with env overrides.
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Self {
        match Self::load(path) {
            Ok(cfg) => cfg,
            Err(e) => {
                tracing::info!("Config file not found or invalid ({:#}), using defaults", e);
                let mut cfg = Self::default();
                cfg.apply_env_overrides();
                if let Err(e) = cfg.agent.validate() {
                    tracing::warn!("Ignoring invalid env overrides ({:#})", e);
                    cfg.agent = AgentConfig::default();
                }
                cfg
            }
        }
    }

    fn apply_env_overrides(&mut self) {
        if let Some(n) = env_parse("PATHOS_FPS") {
            self.agent.frames_per_second = n;
        }
        if let Some(n) = env_parse("PATHOS_EVENT_DURATION") {
            self.agent.event_duration_secs = n;
        }
        if let Some(n) = env_parse("PATHOS_BASE_VELOCITY") {
            self.agent.base_velocity = n;
        }
        if let Some(n) = env_parse("PATHOS_MAX_NEUROTICS") {
            self.agent.max_neurotics = n;
        }
        if let Ok(v) = std::env::var("PATHOS_LOG") {
            self.logging.filter = v;
        }
    }
}

fn env_parse<T: std::str::FromStr>(key: &str) -> Option<T> {
    let raw = std::env::var(key).ok()?;
    match raw.parse() {
        Ok(v) => Some(v),
        Err(_) => {
            tracing::warn!("Ignoring unparseable {}={}", key, raw);
            None
        }
    }
}

// ============================================================================
// Sub-configs
// ============================================================================

/// Tuning constants of the run loop.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct AgentConfig {
    /// Fixed simulation rate; also the tick rate of the background task.
    pub frames_per_second: u32,
    /// Lifetime of a stimulus event.
    pub event_duration_secs: f64,
    /// Mood units travelled per step before the neuroticism multiplier.
    pub base_velocity: f32,
    /// Per-axis distance under which mood snaps onto its target.
    pub distance_tolerance: f32,
    /// Upper end of the neuroticism velocity multiplier (lower end is 1).
    pub max_neurotics: f32,
    pub decay: DecayKind,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            frames_per_second: 60,
            event_duration_secs: 1.0,
            base_velocity: 1.0 / 250.0,
            distance_tolerance: 1.0 / 10_000.0,
            max_neurotics: 3.0,
            decay: DecayKind::Linear,
        }
    }
}

impl AgentConfig {
    pub fn step_duration(&self) -> Duration {
        Duration::from_secs_f64(1.0 / f64::from(self.frames_per_second.max(1)))
    }

    pub fn event_duration(&self) -> Duration {
        Duration::from_secs_f64(self.event_duration_secs.max(0.0))
    }

    /// Stride of one step for the given personality.
    pub fn velocity_for(&self, personality: &Personality) -> f32 {
        self.base_velocity * personality.neuroticism_factor(self.max_neurotics)
    }

    pub fn validate(&self) -> Result<()> {
        if self.frames_per_second == 0 {
            bail!("frames_per_second must be positive");
        }
        if !(self.event_duration_secs.is_finite() && self.event_duration_secs > 0.0) {
            bail!("event_duration_secs must be a positive number");
        }
        if !(self.base_velocity.is_finite() && self.base_velocity > 0.0) {
            bail!("base_velocity must be a positive number");
        }
        if !(self.distance_tolerance.is_finite() && self.distance_tolerance >= 0.0) {
            bail!("distance_tolerance must be a non-negative number");
        }
        if !(self.max_neurotics.is_finite() && self.max_neurotics >= 1.0) {
            bail!("max_neurotics must be at least 1");
        }
        Ok(())
    }
}

/// Shape of a stimulus event's influence over its lifetime.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DecayKind {
    /// `1 - t/d`
    #[default]
    Linear,
    /// `(1 - t/d)^2`: fades out faster at first, lingers near the end.
    Quadratic,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct PersonalityConfig {
    /// `[openness, conscientiousness, extraversion, agreeableness, neuroticism]`
    pub traits: [f32; 5],
}

impl PersonalityConfig {
    pub fn personality(&self) -> Personality {
        Personality::from(self.traits)
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// `tracing_subscriber::EnvFilter` directive.
    pub filter: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "info".to_string(),
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
