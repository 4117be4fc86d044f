use serde::{Deserialize, Serialize};

/// Final correct/total counts for a run. `correct` never exceeds `total`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "RawQuizResult")]
pub struct QuizResult {
    correct: usize,
    total: usize,
}

#[derive(Deserialize)]
struct RawQuizResult {
    correct: usize,
    total: usize,
}

impl From<RawQuizResult> for QuizResult {
    fn from(raw: RawQuizResult) -> Self {
        QuizResult::new(raw.correct, raw.total)
    }
}

impl QuizResult {
    /// `correct` is clamped to `total`.
    pub fn new(correct: usize, total: usize) -> Self {
        Self {
            correct: correct.min(total),
            total,
        }
    }

    pub fn correct(&self) -> usize {
        self.correct
    }

    pub fn total(&self) -> usize {
        self.total
    }

    pub fn wrong(&self) -> usize {
        self.total.saturating_sub(self.correct)
    }

    pub fn summary_line(&self) -> String {
        format!(
            "You got {} correct, and {} wrong!",
            self.correct,
            self.wrong()
        )
    }
}

/// Which side of the race ended the quiz.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Finish {
    /// Every problem was answered before the timer fired
    Completed,
    /// The timer fired first
    TimeUp,
}

impl Finish {
    pub fn headline(&self) -> &'static str {
        match self {
            Finish::Completed => "All questions answered!",
            Finish::TimeUp => "Time is up! Exiting...",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RaceReport {
    pub finish: Finish,
    pub result: QuizResult,
}
