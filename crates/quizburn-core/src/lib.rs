// Domain modules
pub mod config;
pub mod error;
pub mod problem;
pub mod tally;

pub use config::{RunConfig, DEFAULT_SOURCE_PATH, DEFAULT_TIME_LIMIT_SECS};
pub use error::{QuizError, Result};
pub use problem::{Problem, ProblemSet};
pub use tally::{Finish, QuizResult, RaceReport};
