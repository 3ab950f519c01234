//! CLI configuration.

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use examhall_core::simulation::{AnswerStrategy, SimulationConfig};

/// Top-level examhall configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExamhallConfig {
    #[serde(default)]
    pub simulation: SimulationSection,
}

/// The `[simulation]` table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationSection {
    /// Number of simulated students.
    #[serde(default = "default_students")]
    pub students: usize,
    /// Max students working at once.
    #[serde(default = "default_parallelism")]
    pub parallelism: usize,
    /// Pause before each answer, in milliseconds.
    #[serde(default = "default_think_time")]
    pub think_time_ms: u64,
    #[serde(default = "default_strategy")]
    pub strategy: AnswerStrategy,
}

fn default_students() -> usize {
    100
}
fn default_parallelism() -> usize {
    16
}
fn default_think_time() -> u64 {
    100
}
fn default_strategy() -> AnswerStrategy {
    AnswerStrategy::Alternating
}

impl Default for SimulationSection {
    fn default() -> Self {
        Self {
            students: default_students(),
            parallelism: default_parallelism(),
            think_time_ms: default_think_time(),
            strategy: default_strategy(),
        }
    }
}

impl SimulationSection {
    pub fn to_simulation_config(&self) -> SimulationConfig {
        SimulationConfig {
            students: self.students,
            parallelism: self.parallelism,
            think_time: Duration::from_millis(self.think_time_ms),
            strategy: self.strategy,
        }
    }
}

/// Load config from an explicit path, or search the default locations.
///
/// Search order:
/// 1. `examhall.toml` in the current directory
/// 2. `~/.config/examhall/config.toml`
///
/// Environment variable overrides: `EXAMHALL_STUDENTS`, `EXAMHALL_PARALLELISM`.
pub fn load_config_from(path: Option<&Path>) -> Result<ExamhallConfig> {
    let config_path = if let Some(p) = path {
        if p.exists() {
            Some(p.to_path_buf())
        } else {
            anyhow::bail!("config file not found: {}", p.display());
        }
    } else {
        let local = PathBuf::from("examhall.toml");
        if local.exists() {
            Some(local)
        } else {
            dirs_path()
                .map(|home| home.join("config.toml"))
                .filter(|global| global.exists())
        }
    };

    let mut config = match config_path {
        Some(path) => {
            let content = std::fs::read_to_string(&path)
                .with_context(|| format!("failed to read config: {}", path.display()))?;
            parse_config(&content)
                .with_context(|| format!("failed to parse config: {}", path.display()))?
        }
        None => ExamhallConfig::default(),
    };

    if let Some(students) = env_override("EXAMHALL_STUDENTS")? {
        config.simulation.students = students;
    }
    if let Some(parallelism) = env_override("EXAMHALL_PARALLELISM")? {
        config.simulation.parallelism = parallelism;
    }

    Ok(config)
}

pub fn parse_config(content: &str) -> Result<ExamhallConfig> {
    Ok(toml::from_str(content)?)
}

fn env_override(var: &str) -> Result<Option<usize>> {
    match std::env::var(var) {
        Ok(value) => value
            .trim()
            .parse()
            .map(Some)
            .with_context(|| format!("{var} must be a non-negative integer, got '{value}'")),
        Err(_) => Ok(None),
    }
}

fn dirs_path() -> Option<PathBuf> {
    std::env::var("HOME")
        .ok()
        .map(|h| PathBuf::from(h).join(".config").join("examhall"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let config = ExamhallConfig::default();
        assert_eq!(config.simulation.students, 100);
        assert_eq!(config.simulation.parallelism, 16);
        assert_eq!(config.simulation.think_time_ms, 100);
        assert_eq!(config.simulation.strategy, AnswerStrategy::Alternating);
    }

    #[test]
    fn parse_partial_config() {
        let config = parse_config(
            r#"
[simulation]
students = 12
strategy = "all_correct"
"#,
        )
        .unwrap();
        assert_eq!(config.simulation.students, 12);
        assert_eq!(config.simulation.parallelism, 16);
        assert_eq!(config.simulation.strategy, AnswerStrategy::AllCorrect);
    }

    #[test]
    fn parse_empty_config() {
        let config = parse_config("").unwrap();
        assert_eq!(config.simulation.students, 100);
    }

    #[test]
    fn parse_rejects_unknown_strategy() {
        assert!(parse_config("[simulation]\nstrategy = \"random\"\n").is_err());
    }

    #[test]
    fn missing_explicit_path_is_an_error() {
        let err = load_config_from(Some(Path::new("/definitely/not/here.toml"))).unwrap_err();
        assert!(err.to_string().contains("config file not found"));
    }

    #[test]
    fn explicit_path_is_loaded() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("examhall.toml");
        std::fs::write(&path, "[simulation]\nthink_time_ms = 0\n").unwrap();
        let config = load_config_from(Some(&path)).unwrap();
        assert_eq!(config.simulation.think_time_ms, 0);
        let sim = config.simulation.to_simulation_config();
        assert!(sim.think_time.is_zero());
    }
}
