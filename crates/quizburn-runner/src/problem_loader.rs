use std::fs::File;
use std::io::Read;
use std::path::Path;

use quizburn_core::{Problem, ProblemSet, QuizError, Result};

/// Load a problem set from a CSV file of `question,answer` rows.
///
/// Every row is data; there is no header handling. Rows may carry extra
/// fields, which are ignored, but a row with fewer than two fields fails
/// the whole load.
pub fn load_problem_set(path: &Path) -> Result<ProblemSet> {
    tracing::debug!("Loading problems from {}", path.display());

    let file = File::open(path).map_err(|source| QuizError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    load_problem_set_from_reader(file, path)
}

/// Same as [`load_problem_set`] over any reader. `origin` is only used in
/// error messages.
pub fn load_problem_set_from_reader<R: Read>(reader: R, origin: &Path) -> Result<ProblemSet> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(reader);

    let mut problems = Vec::new();

    for record in csv_reader.records() {
        let record = record.map_err(|e| from_csv_error(e, origin))?;

        let (Some(question), Some(answer)) = (record.get(0), record.get(1)) else {
            let line = record.position().map(|p| p.line()).unwrap_or(0);
            return Err(QuizError::Parse {
                line,
                reason: format!("expected 2 fields, found {}", record.len()),
            });
        };

        if question.trim().is_empty() {
            let line = record.position().map(|p| p.line()).unwrap_or(0);
            return Err(QuizError::Parse {
                line,
                reason: "question is empty".to_string(),
            });
        }

        problems.push(Problem::new(question, answer));
    }

    tracing::info!("Loaded {} problems from {}", problems.len(), origin.display());
    Ok(ProblemSet::new(problems))
}

fn from_csv_error(err: csv::Error, origin: &Path) -> QuizError {
    let line = err.position().map(|p| p.line()).unwrap_or(0);
    let reason = err.to_string();

    match err.into_kind() {
        csv::ErrorKind::Io(source) => QuizError::Io {
            path: origin.to_path_buf(),
            source,
        },
        _ => QuizError::Parse { line, reason },
    }
}
