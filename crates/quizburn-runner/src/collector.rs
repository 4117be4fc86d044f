use std::future::Future;
use std::io::BufRead;
use std::pin::Pin;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::task::{Context, Poll};
use std::thread;

use quizburn_core::{ProblemSet, QuizError, QuizResult, Result};
use tokio::sync::oneshot;

use crate::console::SharedOutput;

/// Asks each problem in order and counts exact answers.
pub struct AnswerCollector {
    problems: Arc<ProblemSet>,
    correct: Arc<AtomicUsize>,
}

impl AnswerCollector {
    pub fn new(problems: Arc<ProblemSet>) -> Self {
        Self {
            problems,
            correct: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn correct_so_far(&self) -> usize {
        self.correct.load(Ordering::SeqCst)
    }

    /// Run the whole quiz on the calling thread.
    pub fn run<R: BufRead>(&self, input: &mut R, output: &SharedOutput) -> Result<QuizResult> {
        let total = self.problems.len();

        for (idx, problem) in self.problems.iter().enumerate() {
            output
                .prompt(&format!("{}: ", problem.question()))
                .map_err(QuizError::Input)?;

            let mut line = String::new();
            let read = input.read_line(&mut line).map_err(QuizError::Input)?;
            if read == 0 {
                return Err(QuizError::end_of_input("an answer"));
            }

            let correct = problem.is_correct(&line);
            if correct {
                self.correct.fetch_add(1, Ordering::SeqCst);
            }
            tracing::debug!("Problem {}/{} answered, correct={}", idx + 1, total, correct);
        }

        Ok(QuizResult::new(self.correct_so_far(), total))
    }

    /// Run the quiz on a detached thread.
    ///
    /// The thread is never joined: once the race is decided nothing waits
    /// for a read that may still be blocked on the terminal.
    pub fn spawn<R>(self, mut input: R, output: SharedOutput) -> CollectorHandle
    where
        R: BufRead + Send + 'static,
    {
        let (tx, rx) = oneshot::channel();
        let correct = self.correct.clone();

        let spawned = thread::Builder::new()
            .name("quizburn-collector".to_string())
            .spawn(move || {
                let outcome = self.run(&mut input, &output);
                if tx.send(outcome).is_err() {
                    tracing::debug!("Collector finished after the race was decided");
                }
            });

        // A failed spawn drops the sender, which the handle reports as a closed unit.
        if let Err(e) = spawned {
            tracing::error!("Failed to spawn collector thread: {}", e);
        }

        CollectorHandle { rx, correct }
    }
}

/// Handle to a spawned collector. Await it for the collector's outcome.
#[derive(Debug)]
pub struct CollectorHandle {
    rx: oneshot::Receiver<Result<QuizResult>>,
    correct: Arc<AtomicUsize>,
}

impl CollectorHandle {
    pub fn correct_so_far(&self) -> usize {
        self.correct.load(Ordering::SeqCst)
    }
}

/// `Err(Closed)` when the collector thread ended without reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Closed;

impl Future for CollectorHandle {
    type Output = std::result::Result<Result<QuizResult>, Closed>;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        Pin::new(&mut self.rx).poll(cx).map(|r| r.map_err(|_| Closed))
    }
}
