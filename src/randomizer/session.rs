//! Session - the caller side of the randomizer
//!
//! Holds the raw input, view mode and animation speed, and walks each
//! accepted request through the processing delay before publishing it.
//! Everything runs on one thread; the only suspension point is the delay.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::time::Duration;
use tokio::time::{sleep_until, Instant};

use crate::core::model::{AnimationSpeed, Snapshot, ViewMode};
use crate::randomizer::cue::{notify, Cue, Muted, TerminalBell};
use crate::randomizer::machine::{BusyPolicy, Completion, Randomizer, RequestOutcome, Status};

/// Time a shuffle stays in the processing state before it is published
pub const DEFAULT_DELAY: Duration = Duration::from_millis(800);

/// Sample input shown when a session starts without one
pub const DEFAULT_INPUT: &str = "Apple, Banana, Cherry, Date, Elderberry, Fig, Grape";

#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// Fixed RNG seed; entropy when absent
    pub seed: Option<u64>,
    pub delay: Duration,
    pub policy: BusyPolicy,
    pub view: ViewMode,
    pub speed: AnimationSpeed,
    pub sound: bool,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            seed: None,
            delay: DEFAULT_DELAY,
            policy: BusyPolicy::default(),
            view: ViewMode::default(),
            speed: AnimationSpeed::default(),
            sound: true,
        }
    }
}

pub struct Session<R = StdRng> {
    raw: String,
    view: ViewMode,
    speed: AnimationSpeed,
    randomizer: Randomizer<R>,
    cue: Box<dyn Cue>,
    delay: Duration,
    deadline: Option<Instant>,
}

impl Session<StdRng> {
    /// Build a session with the RNG and cue selected by `config`
    pub fn from_config(initial: &str, config: &SessionConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let cue: Box<dyn Cue> = if config.sound {
            Box::new(TerminalBell)
        } else {
            Box::new(Muted)
        };
        Session::new(initial, rng, cue, config)
    }
}

impl<R: Rng> Session<R> {
    pub fn new(initial: &str, rng: R, cue: Box<dyn Cue>, config: &SessionConfig) -> Self {
        Self {
            raw: initial.to_string(),
            view: config.view,
            speed: config.speed,
            randomizer: Randomizer::new(initial, rng, config.policy),
            cue,
            delay: config.delay,
            deadline: None,
        }
    }

    pub fn set_input(&mut self, raw: impl Into<String>) {
        self.raw = raw.into();
    }

    #[cfg(test)]
    pub fn input(&self) -> &str {
        &self.raw
    }

    pub fn set_view(&mut self, view: ViewMode) {
        self.view = view;
    }

    #[cfg(test)]
    pub fn view(&self) -> ViewMode {
        self.view
    }

    pub fn set_speed(&mut self, speed: AnimationSpeed) {
        self.speed = speed;
    }

    #[cfg(test)]
    pub fn speed(&self) -> AnimationSpeed {
        self.speed
    }

    pub fn is_busy(&self) -> bool {
        self.randomizer.is_busy()
    }

    #[cfg(test)]
    pub fn count(&self) -> u64 {
        self.randomizer.count()
    }

    #[cfg(test)]
    pub fn items(&self) -> &[String] {
        self.randomizer.items()
    }

    /// When the in-flight shuffle is due to publish
    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    /// Request a shuffle of the current input without waiting for it
    pub fn request(&mut self) -> RequestOutcome {
        let outcome = self.randomizer.request(&self.raw);
        if outcome.will_publish() {
            notify(self.cue.as_ref());
        }
        if outcome == RequestOutcome::Accepted {
            self.deadline = Some(Instant::now() + self.delay);
        }
        outcome
    }

    /// Publish the in-flight shuffle, re-arming the delay if a queued request follows
    pub fn publish(&mut self) -> Option<Completion> {
        let completion = self.randomizer.complete();
        self.deadline = match completion {
            Some(Completion {
                status: Status::Busy,
                ..
            }) => Some(Instant::now() + self.delay),
            _ => None,
        };
        completion
    }

    /// Wait out the processing delay until nothing is in flight.
    ///
    /// Returns the number of shuffles published.
    pub async fn settle(&mut self) -> usize {
        let mut published = 0;
        while let Some(deadline) = self.deadline {
            sleep_until(deadline).await;
            if self.publish().is_some() {
                published += 1;
            }
        }
        published
    }

    /// Request a shuffle and wait for it to publish
    pub async fn randomize(&mut self) -> RequestOutcome {
        let outcome = self.request();
        self.settle().await;
        outcome
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot::new(
            self.randomizer.items(),
            self.view,
            self.speed,
            self.is_busy(),
            self.randomizer.count(),
            self.randomizer.published_at(),
        )
    }
}
