//! Timed status lines shown between a successful resolution and the
//! view switch.
//!
//! [`RevealSequencer`] is a plain state machine:
//! `Idle -> Emitting(n) -> Completed`, where `n` is the number of lines
//! emitted so far. Each call to [`RevealSequencer::advance`] produces the
//! next event and [`RevealSequencer::next_delay`] tells the driver how
//! long to wait before calling it. [`RevealSequencer::play`] is the tokio
//! driver used by the front-end.

use std::time::Duration;

use tokio::sync::mpsc;

/// View the caller switches to once the sequence completes
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RevealTarget {
    Content,
    Admin,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RevealStep {
    /// Wait before this line is appended
    pub delay: Duration,
    pub line: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RevealScript {
    pub steps: Vec<RevealStep>,
    /// Wait after the last line before completion fires
    pub hold: Duration,
}

impl Default for RevealScript {
    fn default() -> Self {
        let steps = [
            (0, "> VERIFYING ACCESS CODE..."),
            (400, "> CODE ACCEPTED"),
            (600, "> DECRYPTING MEMORIES..."),
            (500, "> WELCOME"),
        ]
        .into_iter()
        .map(|(millis, line)| RevealStep {
            delay: Duration::from_millis(millis),
            line: line.to_owned(),
        })
        .collect();

        Self {
            steps,
            hold: Duration::from_millis(800),
        }
    }
}

impl RevealScript {
    pub fn total_duration(&self) -> Duration {
        self.steps.iter().map(|s| s.delay).sum::<Duration>() + self.hold
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RevealState {
    Idle,
    Emitting(usize),
    Completed,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RevealEvent {
    Line { index: usize, text: String },
    Complete(RevealTarget),
}

#[derive(Debug)]
pub struct RevealSequencer {
    script: RevealScript,
    target: RevealTarget,
    state: RevealState,
    emitted: Vec<String>,
}

impl RevealSequencer {
    pub fn new(script: RevealScript, target: RevealTarget) -> Self {
        Self {
            script,
            target,
            state: RevealState::Idle,
            emitted: Vec::new(),
        }
    }

    pub fn state(&self) -> RevealState {
        self.state
    }

    pub fn target(&self) -> RevealTarget {
        self.target
    }

    /// Lines emitted so far, in script order
    pub fn lines(&self) -> &[String] {
        &self.emitted
    }

    pub fn is_complete(&self) -> bool {
        self.state == RevealState::Completed
    }

    /// How long to wait before the next [`advance`](Self::advance),
    /// `None` once completed.
    pub fn next_delay(&self) -> Option<Duration> {
        let emitted = match self.state {
            RevealState::Idle => 0,
            RevealState::Emitting(n) => n,
            RevealState::Completed => return None,
        };

        Some(match self.script.steps.get(emitted) {
            Some(step) => step.delay,
            None => self.script.hold,
        })
    }

    /// Move to the next state and return the event it produced.
    ///
    /// Completion is only produced after every scripted line was emitted.
    pub fn advance(&mut self) -> Option<RevealEvent> {
        let emitted = match self.state {
            RevealState::Idle => 0,
            RevealState::Emitting(n) => n,
            RevealState::Completed => return None,
        };

        match self.script.steps.get(emitted) {
            Some(step) => {
                let text = step.line.clone();
                log::trace!("reveal line {}: {}", emitted, text);
                self.emitted.push(text.clone());
                self.state = RevealState::Emitting(emitted + 1);
                Some(RevealEvent::Line {
                    index: emitted,
                    text,
                })
            }
            None => {
                log::debug!("reveal completed towards {:?}", self.target);
                self.state = RevealState::Completed;
                Some(RevealEvent::Complete(self.target))
            }
        }
    }

    /// Run the sequence to completion, sleeping between steps and sending
    /// every event to `events`.
    ///
    /// There is no way to abort a running sequence. It only stops early
    /// when the receiving side is gone.
    pub async fn play(mut self, events: mpsc::UnboundedSender<RevealEvent>) {
        while let Some(delay) = self.next_delay() {
            if !delay.is_zero() {
                tokio::time::sleep(delay).await;
            }
            if let Some(event) = self.advance() {
                if events.send(event).is_err() {
                    log::debug!("reveal receiver dropped, stopping");
                    return;
                }
            }
        }
    }
}
