use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_SOURCE_PATH: &str = "problems.csv";
pub const DEFAULT_TIME_LIMIT_SECS: u64 = 30;

/// Settings for one quiz run, fixed before the problems are loaded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunConfig {
    /// CSV file holding the question/answer rows
    pub source_path: PathBuf,
    /// How long the quiz runs once the start key is pressed
    pub time_limit: Duration,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self::new(
            DEFAULT_SOURCE_PATH,
            Duration::from_secs(DEFAULT_TIME_LIMIT_SECS),
        )
    }
}

impl RunConfig {
    pub fn new(source_path: impl Into<PathBuf>, time_limit: Duration) -> Self {
        Self {
            source_path: source_path.into(),
            time_limit,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = RunConfig::default();
        assert_eq!(config.source_path, PathBuf::from("problems.csv"));
        assert_eq!(config.time_limit, Duration::from_secs(30));
    }

    #[test]
    fn test_new_takes_given_values() {
        let config = RunConfig::new("quiz.csv", Duration::from_millis(1500));
        assert_eq!(config.source_path, PathBuf::from("quiz.csv"));
        assert_eq!(config.time_limit, Duration::from_millis(1500));
    }
}
