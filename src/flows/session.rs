//! Session flow - Interactive randomizer driven by line commands on stdin
//!
//! Commands are processed while a shuffle is in flight, so `show` can
//! observe the busy state and extra `randomize` requests hit the busy policy.
//! Every publish prints a snapshot. At end of input the in-flight shuffle is
//! still published before exiting.

use anyhow::{Context, Result};
use rand::Rng;
use std::io::Write;
use std::str::FromStr;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};
use tokio::time::{sleep_until, Instant};

use crate::core::error::DataRandomError;
use crate::core::model::{AnimationSpeed, ViewMode};
use crate::core::render::{RenderConfig, Renderer};
use crate::flows::runtime;
use crate::randomizer::machine::RequestOutcome;
use crate::randomizer::session::{Session, SessionConfig};

const HELP: &str = "\
Commands:
  input <text>    replace the comma-separated input
  view <mode>     pie, bar or list
  speed <x>       animation speed (0.5 - 2.0 recommended)
  randomize, r    shuffle the current input
  show            print the current state
  help            show this message
  quit            finish the session";

/// A single line of session input
#[derive(Debug, Clone, PartialEq)]
pub enum SessionCommand {
    Input(String),
    View(ViewMode),
    Speed(AnimationSpeed),
    Randomize,
    Show,
    Help,
    Quit,
}

impl FromStr for SessionCommand {
    type Err = DataRandomError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let line = s.trim();
        let (verb, rest) = match line.split_once(char::is_whitespace) {
            Some((verb, rest)) => (verb, rest.trim()),
            None => (line, ""),
        };

        match verb.to_lowercase().as_str() {
            "input" | "set" => Ok(SessionCommand::Input(rest.to_string())),
            "view" if rest.is_empty() => Err(DataRandomError::MissingArgument("view")),
            "view" => rest.parse().map(SessionCommand::View),
            "speed" if rest.is_empty() => Err(DataRandomError::MissingArgument("speed")),
            "speed" => rest.parse().map(SessionCommand::Speed),
            "randomize" | "r" => Ok(SessionCommand::Randomize),
            "show" => Ok(SessionCommand::Show),
            "help" | "?" => Ok(SessionCommand::Help),
            "quit" | "exit" | "q" => Ok(SessionCommand::Quit),
            _ => Err(DataRandomError::UnknownCommand(verb.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    Continue,
    Quit,
}

/// Run the session command on stdin/stdout
pub fn run_session(initial: &str, session_config: &SessionConfig, config: RenderConfig) -> Result<()> {
    let mut session = Session::from_config(initial, session_config);
    let renderer = Renderer::with_config(config);
    let mut stdout = std::io::stdout().lock();

    let runtime = runtime()?;
    let result = runtime.block_on(drive(
        &mut session,
        BufReader::new(tokio::io::stdin()),
        &mut stdout,
        &renderer,
    ));
    // A pending stdin read must not keep the process alive after `quit`
    runtime.shutdown_background();

    result
}

/// Feed commands from `input` into `session`, printing snapshots to `out`
pub async fn drive<R, I, W>(
    session: &mut Session<R>,
    input: I,
    out: &mut W,
    renderer: &Renderer,
) -> Result<()>
where
    R: Rng,
    I: AsyncBufRead + Unpin,
    W: Write,
{
    let mut lines = input.lines();

    loop {
        let deadline = session.deadline();
        tokio::select! {
            biased;

            _ = sleep_until(deadline.unwrap_or_else(Instant::now)), if deadline.is_some() => {
                publish(session, out, renderer)?;
            }

            line = lines.next_line() => {
                let Some(line) = line.context("failed to read session input")? else {
                    break;
                };
                if handle_line(session, &line, out, renderer)? == Flow::Quit {
                    break;
                }
            }
        }
    }

    // Accepted requests always publish, even after end of input
    while let Some(deadline) = session.deadline() {
        sleep_until(deadline).await;
        publish(session, out, renderer)?;
    }

    Ok(())
}

/// Publish the in-flight shuffle, if any, and print the new snapshot
fn publish<R: Rng, W: Write>(
    session: &mut Session<R>,
    out: &mut W,
    renderer: &Renderer,
) -> Result<()> {
    if let Some(completion) = session.publish() {
        tracing::info!(count = completion.count, "shuffle published");
        renderer.render_snapshot_to(&session.snapshot(), &mut *out)?;
    }
    Ok(())
}

fn handle_line<R: Rng, W: Write>(
    session: &mut Session<R>,
    line: &str,
    out: &mut W,
    renderer: &Renderer,
) -> Result<Flow> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return Ok(Flow::Continue);
    }

    let command = match line.parse::<SessionCommand>() {
        Ok(command) => command,
        Err(err) => {
            tracing::warn!("{}", err);
            return Ok(Flow::Continue);
        }
    };

    match command {
        SessionCommand::Input(raw) => session.set_input(raw),
        SessionCommand::View(view) => session.set_view(view),
        SessionCommand::Speed(speed) => {
            if !speed.is_recommended() {
                tracing::info!(speed = speed.value(), "speed outside the recommended range");
            }
            session.set_speed(speed);
        }
        SessionCommand::Randomize => match session.request() {
            RequestOutcome::Accepted => tracing::info!("processing..."),
            RequestOutcome::Empty => tracing::info!("no items to randomize"),
            RequestOutcome::Dropped => tracing::info!("busy, request dropped"),
            RequestOutcome::Queued => tracing::info!("busy, request queued"),
        },
        SessionCommand::Show => renderer.render_snapshot_to(&session.snapshot(), &mut *out)?,
        SessionCommand::Help => eprintln!("{}", HELP),
        SessionCommand::Quit => return Ok(Flow::Quit),
    }

    Ok(Flow::Continue)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::render::OutputFormat;
    use crate::randomizer::cue::Muted;
    use crate::randomizer::machine::BusyPolicy;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use serde_json::Value;
    use std::time::Duration;

    fn session(initial: &str, delay: Duration, policy: BusyPolicy) -> Session {
        let config = SessionConfig {
            delay,
            policy,
            sound: false,
            ..SessionConfig::default()
        };
        Session::new(initial, StdRng::seed_from_u64(8), Box::new(Muted), &config)
    }

    async fn run(session: &mut Session, script: &str) -> Vec<Value> {
        let renderer = Renderer::with_config(RenderConfig::new(OutputFormat::Jsonl));
        let mut out = Vec::new();
        drive(session, script.as_bytes(), &mut out, &renderer)
            .await
            .unwrap();
        String::from_utf8(out)
            .unwrap()
            .lines()
            .map(|l| serde_json::from_str(l).unwrap())
            .collect()
    }

    #[test]
    fn test_parse_commands() {
        assert_eq!(
            "input a, b".parse::<SessionCommand>().unwrap(),
            SessionCommand::Input("a, b".into())
        );
        assert_eq!(
            "input".parse::<SessionCommand>().unwrap(),
            SessionCommand::Input(String::new())
        );
        assert_eq!(
            "VIEW bar".parse::<SessionCommand>().unwrap(),
            SessionCommand::View(ViewMode::Bar)
        );
        assert_eq!(
            "speed 1.5".parse::<SessionCommand>().unwrap(),
            SessionCommand::Speed(AnimationSpeed::new(1.5).unwrap())
        );
        assert_eq!("r".parse::<SessionCommand>().unwrap(), SessionCommand::Randomize);
        assert_eq!("  show ".parse::<SessionCommand>().unwrap(), SessionCommand::Show);
        assert_eq!("exit".parse::<SessionCommand>().unwrap(), SessionCommand::Quit);
    }

    #[test]
    fn test_parse_command_errors() {
        assert_eq!(
            "view".parse::<SessionCommand>().unwrap_err(),
            DataRandomError::MissingArgument("view")
        );
        assert_eq!(
            "speed zero".parse::<SessionCommand>().unwrap_err(),
            DataRandomError::InvalidSpeed("zero".into())
        );
        assert_eq!(
            "shuffle".parse::<SessionCommand>().unwrap_err(),
            DataRandomError::UnknownCommand("shuffle".into())
        );
    }

    #[tokio::test]
    async fn test_randomize_publishes_snapshot() {
        let mut s = session("a, b, c", Duration::ZERO, BusyPolicy::Drop);
        let snapshots = run(&mut s, "view list\nrandomize\n").await;

        assert_eq!(snapshots.len(), 1);
        assert_eq!(snapshots[0]["count"], 1);
        assert_eq!(snapshots[0]["view"], "list");
        assert_eq!(snapshots[0]["busy"], false);
        assert_eq!(snapshots[0]["items"].as_array().unwrap().len(), 3);
    }

    #[tokio::test]
    async fn test_show_while_busy_sees_stale_list() {
        let mut s = session("x, y", Duration::from_millis(50), BusyPolicy::Drop);
        let snapshots = run(&mut s, "input a, b, c\nrandomize\nshow\n").await;

        assert_eq!(snapshots.len(), 2);
        assert_eq!(snapshots[0]["busy"], true);
        assert_eq!(snapshots[0]["count"], 0);
        assert_eq!(snapshots[0]["items"].as_array().unwrap().len(), 2);

        assert_eq!(snapshots[1]["busy"], false);
        assert_eq!(snapshots[1]["count"], 1);
        assert_eq!(snapshots[1]["items"].as_array().unwrap().len(), 3);
    }

    #[tokio::test]
    async fn test_requests_while_busy_are_dropped() {
        let mut s = session("a, b", Duration::from_millis(50), BusyPolicy::Drop);
        let snapshots = run(&mut s, "randomize\nrandomize\nr\n").await;

        assert_eq!(snapshots.len(), 1);
        assert_eq!(s.count(), 1);
    }

    #[tokio::test]
    async fn test_requests_while_busy_are_queued() {
        let mut s = session("a, b", Duration::from_millis(20), BusyPolicy::QueueOne);
        let snapshots = run(&mut s, "randomize\nrandomize\nrandomize\n").await;

        // One in flight plus one pending; the third replaced the second
        assert_eq!(snapshots.len(), 2);
        assert_eq!(snapshots[1]["count"], 2);
    }

    #[tokio::test]
    async fn test_empty_input_randomize_is_silent() {
        let mut s = session("a, b", Duration::ZERO, BusyPolicy::Drop);
        let snapshots = run(&mut s, "input  , ,\nrandomize\nshow\n").await;

        assert_eq!(snapshots.len(), 1);
        assert_eq!(snapshots[0]["count"], 0);
        assert_eq!(snapshots[0]["items"][0]["label"], "a");
    }

    #[tokio::test]
    async fn test_unknown_commands_are_skipped() {
        let mut s = session("a", Duration::ZERO, BusyPolicy::Drop);
        let snapshots = run(&mut s, "# comment\n\nbogus\nview donut\nshow\n").await;

        assert_eq!(snapshots.len(), 1);
        assert_eq!(snapshots[0]["view"], "pie");
    }

    #[tokio::test]
    async fn test_quit_still_publishes_in_flight_shuffle() {
        let mut s = session("a, b", Duration::from_millis(10), BusyPolicy::Drop);
        let snapshots = run(&mut s, "randomize\nquit\nrandomize\n").await;

        assert_eq!(snapshots.len(), 1);
        assert_eq!(s.count(), 1);
    }
}
