//! Configuration for the workout binary

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use workout_engine::TickConfig;
use workout_types::{PlanField, WorkoutError, WorkoutPlan, WorkoutResult};

use crate::error::CliResult;

/// Main configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkoutConfig {
    /// Plan the session starts with
    #[serde(default = "WorkoutPlan::recommended")]
    pub plan: WorkoutPlan,

    /// Display refresh periods
    #[serde(default)]
    pub ticks: TickConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Default for WorkoutConfig {
    fn default() -> Self {
        Self {
            plan: WorkoutPlan::recommended(),
            ticks: TickConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level, used when `RUST_LOG` is unset
    #[serde(default = "default_log_level")]
    pub level: String,

    /// JSON format
    #[serde(default)]
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Layered sources before plan keys are resolved.
///
/// The loader folds keys to lowercase, so `setsBreakDuration` arrives as
/// `setsbreakduration`. Plan keys stay raw here and go through
/// [`PlanField`] parsing, which accepts every spelling.
#[derive(Debug, Default, Serialize, Deserialize)]
struct ConfigSources {
    #[serde(default)]
    plan: BTreeMap<String, u32>,
    #[serde(default)]
    ticks: TickConfig,
    #[serde(default)]
    logging: LoggingConfig,
}

impl WorkoutConfig {
    /// Load configuration: defaults, then the file at `path`, then
    /// `WORKOUT_`-prefixed environment variables
    /// (`WORKOUT_PLAN__SETS_BREAK_DURATION=30`).
    ///
    /// Plan keys override the recommended plan one field at a time; an
    /// unknown plan key is an error.
    pub fn load(path: Option<&str>) -> CliResult<Self> {
        let mut builder = config::Config::builder();

        builder = builder.add_source(config::Config::try_from(&ConfigSources::default())?);

        if let Some(path) = path {
            builder = builder.add_source(config::File::with_name(path).required(true));
        }

        builder = builder.add_source(
            config::Environment::with_prefix("WORKOUT")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let sources: ConfigSources = builder.build()?.try_deserialize()?;
        let config = WorkoutConfig {
            plan: plan_with_overrides(&sources.plan)?,
            ticks: sources.ticks,
            logging: sources.logging,
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> WorkoutResult<()> {
        self.ticks.validate()
    }
}

fn plan_with_overrides(overrides: &BTreeMap<String, u32>) -> WorkoutResult<WorkoutPlan> {
    let mut plan = WorkoutPlan::recommended();
    let mut seen: Vec<PlanField> = Vec::with_capacity(overrides.len());

    for (key, value) in overrides {
        let field: PlanField = key.parse()?;
        if seen.contains(&field) {
            return Err(WorkoutError::ValidationError(format!(
                "plan field {} is configured under more than one spelling",
                field
            )));
        }
        seen.push(field);
        plan.set(field, Some(*value));
    }
    Ok(plan)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CliError;
    use std::io::Write;

    #[test]
    fn test_default_config() {
        let config = WorkoutConfig::default();
        assert_eq!(config.plan, WorkoutPlan::recommended());
        assert_eq!(config.ticks.elapsed_tick_ms, 1000);
        assert_eq!(config.logging.level, "info");
        assert!(!config.logging.json);
    }

    #[test]
    fn test_partial_sections_default() {
        let config: WorkoutConfig =
            serde_json::from_str(r#"{"logging": {"json": true}}"#).unwrap();
        assert_eq!(config.plan, WorkoutPlan::recommended());
        assert_eq!(config.logging.level, "info");
        assert!(config.logging.json);
    }

    #[test]
    fn test_load_from_file() {
        let path = std::env::temp_dir().join(format!(
            "workout-config-{}.toml",
            std::process::id()
        ));
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(
            file,
            "[plan]\nrepetition_exercises_count = 3\nsets_break_duration = 20\n\n[ticks]\nelapsed_tick_ms = 10"
        )
        .unwrap();

        let config = WorkoutConfig::load(path.to_str()).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(config.plan.repetition_exercises_count, Some(3));
        assert_eq!(config.plan.sets_break_duration, Some(20));
        // Untouched plan fields keep their defaults
        assert_eq!(config.plan.exercises_break_duration, Some(90));
        assert_eq!(config.ticks.elapsed_tick_ms, 10);
    }

    fn write_config(name: &str, contents: &str) -> std::path::PathBuf {
        let path = std::env::temp_dir().join(format!(
            "workout-config-{}-{}.toml",
            name,
            std::process::id()
        ));
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(file, "{}", contents).unwrap();
        path
    }

    #[test]
    fn test_load_camel_case_file() {
        let path = write_config(
            "camel",
            "[plan]\nsetsBreakDuration = 12\ntimedExercisesCount = 4",
        );
        let config = WorkoutConfig::load(path.to_str()).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(config.plan.sets_break_duration, Some(12));
        assert_eq!(config.plan.timed_exercises_count, Some(4));
        assert_eq!(config.plan.exercises_break_duration, Some(90));
    }

    #[test]
    fn test_unknown_plan_key_is_an_error() {
        let path = write_config("unknown", "[plan]\nsetsBreak = 12");
        let result = WorkoutConfig::load(path.to_str());
        std::fs::remove_file(&path).ok();

        assert!(matches!(
            result,
            Err(CliError::Workout(WorkoutError::UnknownPlanField(_)))
        ));
    }

    #[test]
    fn test_same_field_under_two_spellings_is_an_error() {
        let path = write_config(
            "twice",
            "[plan]\nsetsBreakDuration = 12\nsets_break_duration = 20",
        );
        let result = WorkoutConfig::load(path.to_str());
        std::fs::remove_file(&path).ok();

        assert!(matches!(
            result,
            Err(CliError::Workout(WorkoutError::ValidationError(_)))
        ));
    }

    #[test]
    fn test_missing_file_is_an_error() {
        assert!(WorkoutConfig::load(Some("/nonexistent/workout-config.toml")).is_err());
    }

    #[test]
    fn test_zero_tick_rejected() {
        let config = WorkoutConfig {
            ticks: TickConfig {
                countdown_tick_ms: 0,
                ..TickConfig::default()
            },
            ..WorkoutConfig::default()
        };
        assert!(config.validate().is_err());
    }
}
