//! CLI module - Command-line interface definitions and handlers

use anyhow::{anyhow, Result};
use clap::builder::FalseyValueParser;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::time::Duration;

use crate::core::model::{AnimationSpeed, ViewMode};
use crate::core::render::{OutputFormat, RenderConfig};
use crate::core::style::ensure_styles;
use crate::randomizer::machine::BusyPolicy;
use crate::randomizer::session::{SessionConfig, DEFAULT_INPUT};

/// datarandom - randomize a comma-separated list and view it as a chart.
#[derive(Parser, Debug)]
#[command(name = "datarandom")]
#[command(
    author,
    version,
    about,
    long_about = r#"datarandom shuffles a comma-separated list of items and shows the result
as a pie chart, bar chart or ranked list.

Output formats:
- text: terminal charts (default)
- jsonl: one JSON object per line (best for piping into tools)
- json: a single JSON document
- md: Markdown table

Examples:
    datarandom parse "Apple, Banana, Cherry"
    datarandom shuffle "Apple, Banana, Cherry" --view bar
    datarandom --seed 7 shuffle --file items.txt --times 3 --format json
    datarandom session --view list
"#
)]
pub struct Cli {
    /// Output format (text/jsonl/json/md).
    #[arg(
        long,
        global = true,
        default_value = "text",
        value_name = "FORMAT",
        env = "DATARANDOM_FORMAT",
        long_help = "Select the output format.\n\n\
Supported values:\n\
- text (default)\n\
- jsonl\n\
- json\n\
- md (markdown)"
    )]
    pub format: String,

    /// Pretty-print JSON/JSONL output with indentation.
    #[arg(long, global = true)]
    pub pretty: bool,

    /// Disable colored output.
    #[arg(
        long,
        global = true,
        long_help = "Disable colored output. Color is also disabled when NO_COLOR is set\n\
or when stdout is not a terminal."
    )]
    pub no_color: bool,

    /// Quiet mode (errors only on stderr).
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Verbose mode (debug diagnostics on stderr).
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Seed for the shuffle RNG (reproducible output).
    #[arg(long, global = true, value_name = "N", env = "DATARANDOM_SEED")]
    pub seed: Option<u64>,

    /// Processing time before a shuffle is published, in milliseconds.
    #[arg(
        long,
        global = true,
        default_value = "800",
        value_name = "MS",
        env = "DATARANDOM_DELAY_MS"
    )]
    pub delay_ms: u64,

    /// Do not ring the terminal bell on randomize.
    #[arg(
        long,
        global = true,
        env = "DATARANDOM_NO_SOUND",
        value_parser = FalseyValueParser::new(),
        long_help = "Do not ring the terminal bell on randomize.\n\n\
DATARANDOM_NO_SOUND mutes it too; 0, false, no, off and an empty value leave it on."
    )]
    pub no_sound: bool,

    /// What to do with randomize requests that arrive while busy.
    #[arg(
        long,
        global = true,
        default_value = "drop",
        value_parser = ["drop", "queue"],
        value_name = "POLICY",
        long_help = "What to do with randomize requests that arrive while a shuffle is\n\
still processing.\n\n\
- drop (default): ignore them\n\
- queue: keep the latest one and run it after the current shuffle"
    )]
    pub on_busy: String,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Split the input into items without shuffling.
    #[command(long_about = "Split INPUT on commas, trim each item and drop blanks.\n\n\
Reads from --file, then INPUT, then stdin.\n\n\
Examples:\n\
  datarandom parse \"Apple, , Banana\"\n\
  echo \"a,b,c\" | datarandom parse --format jsonl\n")]
    Parse {
        /// Comma-separated items.
        #[arg(value_name = "INPUT")]
        input: Option<String>,

        /// Read the items from a file.
        #[arg(long, value_name = "PATH")]
        file: Option<PathBuf>,
    },

    /// Shuffle the input and show it.
    #[command(long_about = "Randomize INPUT and print the result in the selected view.\n\n\
Each randomize waits out the processing delay (--delay-ms) before it is published.\n\
Empty input is not an error: nothing is shuffled and the empty view is shown.\n\n\
Examples:\n\
  datarandom shuffle \"Apple, Banana, Cherry\"\n\
  datarandom --delay-ms 0 shuffle --file items.txt --view list --times 5\n")]
    Shuffle {
        /// Comma-separated items.
        #[arg(value_name = "INPUT")]
        input: Option<String>,

        /// Read the items from a file.
        #[arg(long, value_name = "PATH")]
        file: Option<PathBuf>,

        /// Visualization (pie/bar/list).
        #[arg(long, default_value = "pie", value_parser = ["pie", "bar", "list"])]
        view: String,

        /// Animation speed multiplier (0.5 - 2.0 recommended).
        #[arg(long, default_value = "1.0", value_name = "X")]
        speed: String,

        /// Number of randomize requests to run.
        #[arg(long, default_value = "1", value_name = "N")]
        times: usize,
    },

    /// Start an interactive session reading commands from stdin.
    #[command(long_about = "Start a line-oriented session. Commands:\n\n\
  input <text>    replace the comma-separated input\n\
  view <mode>     pie, bar or list\n\
  speed <x>       animation speed\n\
  randomize, r    shuffle the current input\n\
  show            print the current state\n\
  help            list commands\n\
  quit            finish the session\n\n\
A snapshot is printed after each shuffle is published and on `show`.\n\n\
Example:\n\
  printf 'view list\\nrandomize\\n' | datarandom --delay-ms 0 session\n")]
    Session {
        /// Initial comma-separated input.
        #[arg(long, value_name = "TEXT", default_value = DEFAULT_INPUT)]
        input: String,

        /// Initial visualization (pie/bar/list).
        #[arg(long, default_value = "pie", value_parser = ["pie", "bar", "list"])]
        view: String,

        /// Initial animation speed.
        #[arg(long, default_value = "1.0", value_name = "X")]
        speed: String,
    },
}

impl Cli {
    fn session_config(&self, view: &str, speed: &str) -> Result<SessionConfig> {
        let view: ViewMode = view.parse()?;
        let speed: AnimationSpeed = speed.parse()?;
        let policy: BusyPolicy = self.on_busy.parse().map_err(|e: String| anyhow!(e))?;

        Ok(SessionConfig {
            seed: self.seed,
            delay: Duration::from_millis(self.delay_ms),
            policy,
            view,
            speed,
            sound: !self.no_sound,
        })
    }
}

/// Run the CLI with parsed arguments
pub fn run(cli: Cli) -> Result<()> {
    let format: OutputFormat = cli.format.parse().map_err(|e: String| anyhow!(e))?;
    let render_config = RenderConfig::with_pretty(format, cli.pretty);
    ensure_styles(cli.no_color);

    match &cli.command {
        Commands::Parse { input, file } => {
            let raw = crate::flows::read_raw_input(input.clone(), file.as_deref())?;
            crate::flows::parse::run_parse(&raw, render_config)
        }

        Commands::Shuffle {
            input,
            file,
            view,
            speed,
            times,
        } => {
            let session_config = cli.session_config(view, speed)?;
            let raw = crate::flows::read_raw_input(input.clone(), file.as_deref())?;
            crate::flows::shuffle::run_shuffle(&raw, *times, &session_config, render_config)
        }

        Commands::Session { input, view, speed } => {
            let session_config = cli.session_config(view, speed)?;
            crate::flows::session::run_session(input, &session_config, render_config)
        }
    }
}
