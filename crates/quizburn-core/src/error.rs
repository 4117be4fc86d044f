use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum QuizError {
    #[error("error reading file {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("error reading file at line {line}: {reason}")]
    Parse { line: u64, reason: String },

    #[error("error reading input: {0}")]
    Input(#[source] std::io::Error),
}

impl QuizError {
    /// End of input where a read was still expected.
    pub fn end_of_input(stage: &str) -> Self {
        QuizError::Input(std::io::Error::new(
            std::io::ErrorKind::UnexpectedEof,
            format!("input closed while waiting for {}", stage),
        ))
    }
}

pub type Result<T> = std::result::Result<T, QuizError>;
