use std::future::Future;
use std::io::{BufRead, Read};
use std::pin::Pin;
use std::task::{Context, Poll};
use std::time::Duration;

use quizburn_core::{QuizError, Result};
use tokio::sync::oneshot;

use crate::console::SharedOutput;

pub const START_PROMPT: &str = "Press any key to start timer...";

/// A quiz timer that does not tick until the user presses a key.
///
/// `TimerGate` is the idle gate. [`TimerGate::start`] blocks on the start
/// key and hands back an [`Expiry`] for the running timer, which resolves
/// exactly once when the time limit has passed.
#[derive(Debug, Clone, Copy)]
pub struct TimerGate {
    duration: Duration,
}

impl TimerGate {
    pub fn new(duration: Duration) -> Self {
        Self { duration }
    }

    pub fn duration(&self) -> Duration {
        self.duration
    }

    /// Wait for the start key, then launch the countdown.
    ///
    /// Must be called from within a Tokio runtime. Returns as soon as the
    /// countdown task is spawned. If the key is followed by more text on the
    /// same line, that text is consumed so it never reaches the first answer.
    pub fn start<R: BufRead>(self, input: &mut R, output: &SharedOutput) -> Result<Expiry> {
        output.line(START_PROMPT).map_err(QuizError::Input)?;
        tracing::debug!("Timer gate awaiting start key");

        let mut key = [0u8; 1];
        input.read_exact(&mut key).map_err(|e| match e.kind() {
            std::io::ErrorKind::UnexpectedEof => QuizError::end_of_input("the start key"),
            _ => QuizError::Input(e),
        })?;

        if key[0] != b'\n' {
            let mut rest = Vec::new();
            input.read_until(b'\n', &mut rest).map_err(QuizError::Input)?;
        }

        let (tx, rx) = oneshot::channel();
        let duration = self.duration;

        tokio::spawn(async move {
            tokio::time::sleep(duration).await;
            tracing::debug!("Timer expired after {:?}", duration);
            let _ = tx.send(());
        });

        tracing::debug!("Timer running for {:?}", duration);
        Ok(Expiry { rx })
    }
}

/// The running countdown. Resolves once when the time limit is reached.
#[derive(Debug)]
pub struct Expiry {
    rx: oneshot::Receiver<()>,
}

impl Future for Expiry {
    type Output = ();

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<()> {
        // A dropped sender only happens on runtime shutdown; count it as expired.
        Pin::new(&mut self.rx).poll(cx).map(|_| ())
    }
}
