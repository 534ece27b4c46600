mod transmitter;

use std::path::PathBuf;
use std::thread;
use std::time::Duration;

use clap::{Parser, Subcommand};
use serde::Deserialize;
use tracing::info;

use goal_protocol::color::{Goal, GoalColors, Rgb, EACH_RGB_LEN};

use crate::transmitter::{SendOutcome, Transmitter, TransmitterConfig};

/// Cadence of the `auto` and `countdown` signal loops.
const SIGNAL_PERIOD: Duration = Duration::from_secs(15);
/// Cadence of the `fun` loop.
const FUN_PERIOD: Duration = Duration::from_millis(100);
/// Cadence of the standalone heartbeat loop.
const HEARTBEAT_PERIOD: Duration =
    Duration::from_millis(goal_protocol::DEFAULT_HEARTBEAT_INTERVAL_MS);

#[derive(Parser, Debug)]
#[command(name = "goal-tx", about = "Field-side transmitter for the goal lighting controller")]
struct Args {
    /// Path to configuration file
    #[arg(short, long, default_value = "config/field.toml")]
    config: PathBuf,

    /// Controller host (overrides the config file)
    #[arg(long)]
    host: Option<String>,

    /// Controller port (overrides the config file)
    #[arg(long)]
    port: Option<u16>,

    /// Log every transmitted frame
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Drive,
}

#[derive(Subcommand, Debug)]
enum Drive {
    /// Repeat the autonomous start signal
    #[command(aliases = ["a", "autostart"])]
    Auto,
    /// Repeat the pre-match countdown signal
    #[command(aliases = ["c", "count"])]
    Countdown,
    /// Fire the light-show trigger ten times a second
    #[command(aliases = ["f", "havefun"])]
    Fun,
    /// Send heartbeats once a second
    #[command(alias = "hb")]
    Heartbeat,
    /// Set every goal to one color, then exit
    #[command(alias = "color")]
    Rgb {
        /// Red channel, 0-255
        r: u8,
        /// Green channel, 0-255
        g: u8,
        /// Blue channel, 0-255
        b: u8,
    },
    /// Set the goals individually (clockwise from blue-left), then exit
    #[command(alias = "goals")]
    Each {
        /// Channel values, R G B per goal
        #[arg(required = true, num_args = 1..)]
        values: Vec<u8>,
    },
}

#[derive(Debug, Clone, Deserialize)]
struct FieldConfig {
    #[serde(default)]
    field: FieldSection,
    #[serde(default)]
    transmit: TransmitSection,
}

#[derive(Debug, Clone, Deserialize)]
struct FieldSection {
    /// Controller address; empty means not configured.
    #[serde(default)]
    host: String,
    #[serde(default = "default_port")]
    port: u16,
}

impl Default for FieldSection {
    fn default() -> Self {
        Self {
            host: String::new(),
            port: default_port(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
struct TransmitSection {
    /// Attempts per connect cycle; 0 retries forever.
    #[serde(default)]
    connect_attempts: u32,
    #[serde(default = "default_backoff_ms")]
    retry_backoff_ms: u64,
    #[serde(default)]
    verbose: bool,
}

impl Default for TransmitSection {
    fn default() -> Self {
        Self {
            connect_attempts: 0,
            retry_backoff_ms: default_backoff_ms(),
            verbose: false,
        }
    }
}

fn default_port() -> u16 { goal_protocol::DEFAULT_PORT }
fn default_backoff_ms() -> u64 { goal_protocol::DEFAULT_RETRY_BACKOFF_MS }

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();

    let config = if args.config.exists() {
        let config_str = std::fs::read_to_string(&args.config)?;
        toml::from_str(&config_str)?
    } else {
        info!(path = %args.config.display(), "No config file found, using defaults");
        FieldConfig {
            field: FieldSection::default(),
            transmit: TransmitSection::default(),
        }
    };

    let host = args.host.unwrap_or(config.field.host);
    let port = args.port.unwrap_or(config.field.port);
    if host.is_empty() {
        return Err(anyhow::anyhow!(
            "no controller host configured (set [field] host in {} or pass --host)",
            args.config.display()
        ));
    }

    let link = TransmitterConfig {
        connect_attempts: config.transmit.connect_attempts,
        backoff: Duration::from_millis(config.transmit.retry_backoff_ms),
        verbose: args.verbose || config.transmit.verbose,
    };

    info!(host = %host, port, command = ?args.command, "goal-tx starting");

    let mut tx = Transmitter::new(host, port, link);
    tx.reconnect();

    match args.command {
        Drive::Auto => run_signal_loop(&mut tx, MatchSignal::Auto),
        Drive::Countdown => run_signal_loop(&mut tx, MatchSignal::Countdown),
        Drive::Fun => run_fun_loop(&mut tx),
        Drive::Heartbeat => run_heartbeat_loop(&mut tx),
        Drive::Rgb { r, g, b } => set_all_goals(&mut tx, Rgb::new(r, g, b)),
        Drive::Each { values } => set_each_goal(&mut tx, &values),
    }

    Ok(())
}

/// Which repeating match signal a drive loop sends.
#[derive(Debug, Clone, Copy)]
enum MatchSignal {
    Auto,
    Countdown,
}

/// Repeat a match signal every [`SIGNAL_PERIOD`]. The autonomous signal
/// goes out between two heartbeats; countdown goes out bare.
fn run_signal_loop(tx: &mut Transmitter, signal: MatchSignal) -> ! {
    loop {
        match signal {
            MatchSignal::Auto => {
                tx.send_heartbeat();
                tx.send_auto_start();
                tx.send_heartbeat();
            }
            MatchSignal::Countdown => {
                tx.send_countdown();
            }
        }
        thread::sleep(SIGNAL_PERIOD);
    }
}

fn run_fun_loop(tx: &mut Transmitter) -> ! {
    loop {
        tx.send_have_fun();
        thread::sleep(FUN_PERIOD);
    }
}

fn run_heartbeat_loop(tx: &mut Transmitter) -> ! {
    loop {
        tx.send_heartbeat();
        thread::sleep(HEARTBEAT_PERIOD);
    }
}

/// One-shot: every goal to `color`, wrapped in heartbeats.
fn set_all_goals(tx: &mut Transmitter, color: Rgb) {
    tx.send_heartbeat();
    // the send path never retransmits; resend once if the link was stale
    if tx.send_rgb(color) == SendOutcome::LinkLost {
        tx.send_rgb(color);
    }
    tx.send_heartbeat();
}

/// One-shot: the goals individually from raw channel values, wrapped in
/// heartbeats. A full set of values gets logged per goal.
fn set_each_goal(tx: &mut Transmitter, values: &[u8]) {
    if let Ok(exact) = <[u8; EACH_RGB_LEN]>::try_from(values) {
        let colors = GoalColors::from_values(exact);
        for goal in Goal::ALL {
            let c = colors.get(goal);
            info!(goal = ?goal, r = c.r, g = c.g, b = c.b, "Goal color");
        }
    }

    tx.send_heartbeat();
    if tx.send_each_rgb(values) == SendOutcome::LinkLost {
        tx.send_each_rgb(values);
    }
    tx.send_heartbeat();
}
