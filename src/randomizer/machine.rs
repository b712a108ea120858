//! Randomizer state machine
//!
//! Two states, `Idle` and `Busy`. A request is accepted only from `Idle`
//! with a non-empty item list; its result is published by [`Randomizer::complete`].
//! While busy, readers keep seeing the previously published list.

use chrono::{DateTime, Utc};
use rand::Rng;
use std::str::FromStr;

use crate::core::parse::parse;
use crate::core::shuffle::shuffle;

/// What happens to a request that arrives while a shuffle is in flight
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BusyPolicy {
    /// Ignore the request
    #[default]
    Drop,
    /// Keep the latest request and run it after the current one publishes
    QueueOne,
}

impl FromStr for BusyPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "drop" => Ok(BusyPolicy::Drop),
            "queue" => Ok(BusyPolicy::QueueOne),
            _ => Err(format!("Unknown busy policy: {}", s)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Idle,
    Busy,
}

/// Result of a randomize request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestOutcome {
    /// Idle -> Busy
    Accepted,
    /// Nothing to shuffle; no state change
    Empty,
    /// Busy, request ignored
    Dropped,
    /// Busy, request held until the current one publishes
    Queued,
}

impl RequestOutcome {
    /// Whether this request will eventually publish
    pub fn will_publish(self) -> bool {
        matches!(self, RequestOutcome::Accepted | RequestOutcome::Queued)
    }
}

/// A published shuffle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Completion {
    /// Published shuffles so far, this one included
    pub count: u64,
    /// State after publishing; `Busy` when a queued request took over
    pub status: Status,
}

pub struct Randomizer<R> {
    rng: R,
    policy: BusyPolicy,
    published: Vec<String>,
    published_at: Option<DateTime<Utc>>,
    count: u64,
    in_flight: Option<Vec<String>>,
    queued: Option<Vec<String>>,
}

impl<R: Rng> Randomizer<R> {
    /// Start idle, showing the parsed initial input in its original order
    pub fn new(initial_raw: &str, rng: R, policy: BusyPolicy) -> Self {
        Self {
            rng,
            policy,
            published: parse(initial_raw),
            published_at: None,
            count: 0,
            in_flight: None,
            queued: None,
        }
    }

    /// Ask for a shuffle of the items currently in `raw`.
    ///
    /// The items are captured now; later edits to the input do not affect
    /// the in-flight request.
    pub fn request(&mut self, raw: &str) -> RequestOutcome {
        let items = parse(raw);
        if items.is_empty() {
            tracing::debug!("randomize ignored: no items");
            return RequestOutcome::Empty;
        }

        if self.in_flight.is_some() {
            return match self.policy {
                BusyPolicy::Drop => {
                    tracing::debug!("randomize dropped: shuffle in flight");
                    RequestOutcome::Dropped
                }
                BusyPolicy::QueueOne => {
                    if self.queued.replace(items).is_some() {
                        tracing::debug!("randomize replaced the pending request");
                    } else {
                        tracing::debug!("randomize queued behind in-flight shuffle");
                    }
                    RequestOutcome::Queued
                }
            };
        }

        tracing::debug!(items = items.len(), "randomize accepted");
        self.in_flight = Some(items);
        RequestOutcome::Accepted
    }

    /// Publish the in-flight shuffle. Returns `None` when idle.
    pub fn complete(&mut self) -> Option<Completion> {
        let items = self.in_flight.take()?;
        self.published = shuffle(&items, &mut self.rng);
        self.published_at = Some(Utc::now());
        self.count += 1;
        self.in_flight = self.queued.take();

        let status = self.status();
        tracing::debug!(count = self.count, ?status, "shuffle published");
        Some(Completion {
            count: self.count,
            status,
        })
    }

    pub fn status(&self) -> Status {
        if self.in_flight.is_some() {
            Status::Busy
        } else {
            Status::Idle
        }
    }

    pub fn is_busy(&self) -> bool {
        self.status() == Status::Busy
    }

    /// The last published list (stale while busy)
    pub fn items(&self) -> &[String] {
        &self.published
    }

    pub fn count(&self) -> u64 {
        self.count
    }

    pub fn published_at(&self) -> Option<DateTime<Utc>> {
        self.published_at
    }
}
