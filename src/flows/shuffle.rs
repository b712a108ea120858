//! Shuffle flow - Randomize a list one or more times and print the result
//!
//! Each request goes through the same processing delay as in a session and
//! completes before the next one is issued.

use anyhow::Result;

use crate::core::model::Snapshot;
use crate::core::render::{RenderConfig, Renderer};
use crate::flows::runtime;
use crate::randomizer::machine::RequestOutcome;
use crate::randomizer::session::{Session, SessionConfig};

/// Run the shuffle command
pub fn run_shuffle(
    raw: &str,
    times: usize,
    session_config: &SessionConfig,
    config: RenderConfig,
) -> Result<()> {
    let snapshot = shuffle_items(raw, times, session_config)?;

    let renderer = Renderer::with_config(config);
    renderer.render_snapshot_to(&snapshot, std::io::stdout().lock())?;

    Ok(())
}

/// Shuffle `raw` `times` times and return the final snapshot
pub fn shuffle_items(raw: &str, times: usize, session_config: &SessionConfig) -> Result<Snapshot> {
    let mut session = Session::from_config(raw, session_config);

    let runtime = runtime()?;
    runtime.block_on(async {
        for _ in 0..times {
            if session.randomize().await == RequestOutcome::Empty {
                tracing::info!("nothing to shuffle");
                break;
            }
        }
    });

    Ok(session.snapshot())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn config() -> SessionConfig {
        SessionConfig {
            seed: Some(3),
            delay: Duration::ZERO,
            sound: false,
            ..SessionConfig::default()
        }
    }

    #[test]
    fn test_shuffle_items_counts_each_request() {
        let snapshot = shuffle_items("a, b, c", 3, &config()).unwrap();
        assert_eq!(snapshot.count, 3);
        assert!(!snapshot.busy);

        let mut labels = snapshot.labels();
        labels.sort();
        assert_eq!(labels, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_shuffle_items_zero_times_keeps_input_order() {
        let snapshot = shuffle_items("c, a, b", 0, &config()).unwrap();
        assert_eq!(snapshot.count, 0);
        assert_eq!(snapshot.labels(), vec!["c", "a", "b"]);
    }

    #[test]
    fn test_shuffle_items_empty_input() {
        let snapshot = shuffle_items(" , ", 5, &config()).unwrap();
        assert_eq!(snapshot.count, 0);
        assert!(snapshot.is_empty());
    }

    #[test]
    fn test_shuffle_items_is_reproducible_with_seed() {
        let a = shuffle_items("a, b, c, d, e, f", 2, &config()).unwrap();
        let b = shuffle_items("a, b, c, d, e, f", 2, &config()).unwrap();
        assert_eq!(a.labels(), b.labels());
    }
}
