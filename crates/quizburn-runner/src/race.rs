use std::io::BufRead;
use std::sync::Arc;
use std::time::Duration;

use quizburn_core::{Finish, ProblemSet, QuizResult, RaceReport, Result, RunConfig};

use crate::collector::{AnswerCollector, Closed};
use crate::console::SharedOutput;
use crate::timer::TimerGate;

/// Runs the answer collector against the quiz timer and reports whichever
/// finishes first.
pub struct RaceCoordinator {
    gate: TimerGate,
}

impl RaceCoordinator {
    pub fn new(time_limit: Duration) -> Self {
        Self {
            gate: TimerGate::new(time_limit),
        }
    }

    pub fn from_config(config: &RunConfig) -> Self {
        Self::new(config.time_limit)
    }

    /// Run one quiz and print the tally.
    ///
    /// The start key is read with a blocking call on the current thread, so
    /// await this directly from `main` rather than from a spawned task.
    /// Only a failed start key is returned as an error. Once the race is
    /// running it always ends in a report: a collector that fails leaves the
    /// timer to decide.
    pub async fn run<R>(
        &self,
        problems: ProblemSet,
        mut input: R,
        output: SharedOutput,
    ) -> Result<RaceReport>
    where
        R: BufRead + Send + 'static,
    {
        let total = problems.len();
        let mut expiry = self.gate.start(&mut input, &output)?;
        let mut collector = AnswerCollector::new(Arc::new(problems)).spawn(input, output.clone());

        tracing::info!(
            "Quiz started: {} problems, {:?} limit",
            total,
            self.gate.duration()
        );

        let report = tokio::select! {
            _ = &mut expiry => time_up(collector.correct_so_far(), total),
            outcome = &mut collector => match outcome {
                Ok(Ok(result)) => RaceReport {
                    finish: Finish::Completed,
                    result,
                },
                Ok(Err(e)) => {
                    tracing::warn!("Answer collector stopped early: {}", e);
                    expiry.await;
                    time_up(collector.correct_so_far(), total)
                }
                Err(Closed) => {
                    tracing::warn!("Answer collector exited without a result");
                    expiry.await;
                    time_up(collector.correct_so_far(), total)
                }
            },
        };

        tracing::info!(
            "Quiz finished: {:?}, {}/{} correct",
            report.finish,
            report.result.correct(),
            report.result.total()
        );
        announce(&output, &report);
        Ok(report)
    }
}

fn time_up(correct: usize, total: usize) -> RaceReport {
    RaceReport {
        finish: Finish::TimeUp,
        result: QuizResult::new(correct, total),
    }
}

fn announce(output: &SharedOutput, report: &RaceReport) {
    let text = format!(
        "\n\n{}\n\n{}",
        report.finish.headline(),
        report.result.summary_line()
    );
    if let Err(e) = output.line(&text) {
        tracing::warn!("Failed to print tally: {}", e);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::console::{Captured, Stalled};
    use crate::timer::START_PROMPT;
    use quizburn_core::{Problem, QuizError};
    use std::io::{BufReader, Cursor, Read};
    use std::sync::mpsc;

    fn sample() -> ProblemSet {
        ProblemSet::new(vec![
            Problem::new("2+2", "4"),
            Problem::new("capital of France", "Paris"),
        ])
    }

    /// Typed input followed by a terminal that never sends anything else.
    fn typed_then_stall(typed: &'static [u8]) -> (mpsc::Sender<()>, impl BufRead + Send + 'static) {
        let (hold, stall) = mpsc::channel();
        (hold, BufReader::new(Cursor::new(typed).chain(Stalled(stall))))
    }

    async fn race(
        limit: Duration,
        input: impl BufRead + Send + 'static,
        captured: &Captured,
    ) -> Result<RaceReport> {
        let coordinator = RaceCoordinator::new(limit);
        tokio::time::timeout(
            Duration::from_secs(10),
            coordinator.run(sample(), input, captured.output()),
        )
        .await
        .expect("race should finish")
    }

    #[tokio::test]
    async fn test_all_answered_in_time() {
        let captured = Captured::default();
        let input = Cursor::new(b"\n4\nParis\n".to_vec());

        let report = race(Duration::from_secs(60), input, &captured).await.unwrap();

        assert_eq!(report.finish, Finish::Completed);
        assert_eq!(report.result, QuizResult::new(2, 2));

        let text = captured.text();
        assert!(text.starts_with(START_PROMPT));
        assert!(text.contains("2+2: capital of France: "));
        assert!(text.contains("All questions answered!"));
        assert!(text.ends_with("You got 2 correct, and 0 wrong!\n"));
    }

    #[tokio::test]
    async fn test_one_right_one_wrong() {
        let captured = Captured::default();
        let input = Cursor::new(b"k\n4\nLyon\n".to_vec());

        let report = race(Duration::from_secs(60), input, &captured).await.unwrap();

        assert_eq!(report.finish, Finish::Completed);
        assert_eq!(report.result, QuizResult::new(1, 2));
        assert!(captured.text().contains("You got 1 correct, and 1 wrong!"));
    }

    #[tokio::test]
    async fn test_timer_fires_before_any_answer() {
        let captured = Captured::default();
        let (_hold, input) = typed_then_stall(b"\n");

        let report = race(Duration::from_millis(50), input, &captured).await.unwrap();

        assert_eq!(report.finish, Finish::TimeUp);
        assert_eq!(report.result, QuizResult::new(0, 2));

        let text = captured.text();
        assert!(text.contains("Time is up! Exiting..."));
        assert!(text.ends_with("You got 0 correct, and 2 wrong!\n"));
    }

    #[tokio::test]
    async fn test_timer_keeps_answers_given_so_far() {
        let captured = Captured::default();
        let (_hold, input) = typed_then_stall(b"\n4\n");

        let report = race(Duration::from_millis(200), input, &captured).await.unwrap();

        assert_eq!(report.finish, Finish::TimeUp);
        assert_eq!(report.result, QuizResult::new(1, 2));
    }

    #[tokio::test]
    async fn test_collector_failure_leaves_timer_to_decide() {
        let captured = Captured::default();
        let input = Cursor::new(b"\n4\n".to_vec());

        let report = race(Duration::from_millis(100), input, &captured).await.unwrap();

        assert_eq!(report.finish, Finish::TimeUp);
        assert_eq!(report.result, QuizResult::new(1, 2));
        assert!(captured.text().contains("Time is up! Exiting..."));
    }

    #[tokio::test]
    async fn test_failed_start_key_starts_nothing() {
        let captured = Captured::default();
        let input = Cursor::new(Vec::new());

        let err = race(Duration::from_millis(10), input, &captured)
            .await
            .unwrap_err();

        assert!(matches!(err, QuizError::Input(_)));
        assert_eq!(captured.text(), format!("{}\n", START_PROMPT));
    }

    #[tokio::test]
    async fn test_empty_problem_set_completes_immediately() {
        let captured = Captured::default();
        let coordinator = RaceCoordinator::new(Duration::from_secs(60));

        let report = coordinator
            .run(ProblemSet::default(), Cursor::new(b"\n".to_vec()), captured.output())
            .await
            .unwrap();

        assert_eq!(report.finish, Finish::Completed);
        assert_eq!(report.result, QuizResult::new(0, 0));
    }
}
