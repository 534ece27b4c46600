//! TCP link to the goal controller.
//!
//! Fully synchronous: every call blocks the calling thread until it
//! completes, fails, or finishes its retry backoff. The connection handle
//! lives behind `&mut self`, so the borrow checker serializes callers;
//! drive a transmitter from one control loop.
//!
//! Failure policy (nothing here aborts the process):
//! - connect failures retry on a fixed backoff, bounded or unlimited;
//! - oversize messages are logged and dropped before any I/O;
//! - a failed write drops the connection and runs one reconnect cycle,
//!   but the failed message is NOT retransmitted. Callers resend if the
//!   message still matters after the link came back.

use std::io::Write;
use std::net::TcpStream;
use std::time::Duration;

use tracing::{debug, info, warn};

use goal_protocol::color::{sanitize_channel, Rgb, EACH_RGB_LEN};
use goal_protocol::commands::{heartbeat_token, Command};
use goal_protocol::DEFAULT_RETRY_BACKOFF_MS;

/// Result of a connect cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectOutcome {
    /// A fresh connection is up.
    Connected,
    /// Bounded retry budget spent without reaching the controller.
    RetriesExhausted,
    /// Host or port still unset; no attempt was made.
    TargetUnset,
}

/// Result of a send.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SendOutcome {
    /// All frame bytes were handed to the socket.
    Sent,
    /// Message exceeded the frame size and was dropped before any I/O.
    Oversize,
    /// No link, or the write failed. The connection was torn down and a
    /// reconnect cycle ran; the message itself was not retransmitted.
    LinkLost,
}

/// Link options, normally taken from the `[transmit]` config section.
#[derive(Debug, Clone)]
pub struct TransmitterConfig {
    /// Attempts per connect cycle; 0 retries until the controller answers.
    pub connect_attempts: u32,
    /// Sleep between connect attempts.
    pub backoff: Duration,
    /// Log every transmitted frame at info level instead of debug.
    pub verbose: bool,
}

impl Default for TransmitterConfig {
    fn default() -> Self {
        Self {
            connect_attempts: 0,
            backoff: Duration::from_millis(DEFAULT_RETRY_BACKOFF_MS),
            verbose: false,
        }
    }
}

pub struct Transmitter {
    host: String,
    port: u16,
    stream: Option<TcpStream>,
    config: TransmitterConfig,
}

impl Transmitter {
    /// Store the target without touching the network. Call [`connect`]
    /// (or just start sending) to bring the link up.
    ///
    /// [`connect`]: Transmitter::connect
    pub fn new(host: impl Into<String>, port: u16, config: TransmitterConfig) -> Self {
        Self {
            host: host.into(),
            port,
            stream: None,
            config,
        }
    }

    /// Point the transmitter at a different controller. Any live
    /// connection is dropped without notice to the old peer.
    pub fn retarget(&mut self, host: impl Into<String>, port: u16) {
        self.host = host.into();
        self.port = port;
        self.stream = None;
    }

    pub fn is_connected(&self) -> bool {
        self.stream.is_some()
    }

    /// Bring up a fresh connection, discarding any existing one.
    ///
    /// Retries up to `max_attempts` times with `backoff` between failed
    /// attempts; `max_attempts == 0` keeps trying until the controller
    /// answers. An unset target (empty host or port 0) is skipped with a
    /// warning instead of attempted.
    pub fn connect(&mut self, max_attempts: u32, backoff: Duration) -> ConnectOutcome {
        self.stream = None;

        if self.host.is_empty() || self.port == 0 {
            warn!(host = %self.host, port = self.port, "Controller target unset, skipping connect");
            return ConnectOutcome::TargetUnset;
        }

        let mut attempt: u32 = 0;
        loop {
            attempt += 1;
            info!(host = %self.host, port = self.port, attempt, "Connecting to goal controller");

            match TcpStream::connect((self.host.as_str(), self.port)) {
                Ok(stream) => {
                    // Frames are tiny and latency-sensitive; never batch them
                    if let Err(e) = stream.set_nodelay(true) {
                        warn!(error = %e, "Failed to set TCP_NODELAY");
                    }
                    info!(host = %self.host, port = self.port, "Connected");
                    self.stream = Some(stream);
                    return ConnectOutcome::Connected;
                }
                Err(e) => {
                    warn!(error = %e, attempt, "Connect failed");
                    if max_attempts != 0 && attempt >= max_attempts {
                        warn!(attempts = attempt, "Giving up on connect");
                        return ConnectOutcome::RetriesExhausted;
                    }
                    std::thread::sleep(backoff);
                }
            }
        }
    }

    /// Connect with the configured retry policy. The send path calls this
    /// after a write failure.
    pub fn reconnect(&mut self) -> ConnectOutcome {
        self.connect(self.config.connect_attempts, self.config.backoff)
    }

    // -- Command sends --

    /// `FIELD:T000` -- begin the autonomous sequence.
    pub fn send_auto_start(&mut self) -> SendOutcome {
        self.send(Command::AutoStart, &[])
    }

    /// `FIELD:T140` -- begin the pre-match countdown.
    pub fn send_countdown(&mut self) -> SendOutcome {
        self.send(Command::Countdown, &[])
    }

    /// `HVFUN:` -- auxiliary light-show trigger.
    pub fn send_have_fun(&mut self) -> SendOutcome {
        self.send(Command::HaveFun, &[])
    }

    /// `HBEAT:` plus the local wall-clock token (`HHMMSSmmm`).
    pub fn send_heartbeat(&mut self) -> SendOutcome {
        let token = heartbeat_token(chrono::Local::now().time());
        self.send(Command::Heartbeat, token.as_bytes())
    }

    /// `DORGB:` -- one color for every goal. Zero channels go out as 1.
    pub fn send_rgb(&mut self, color: Rgb) -> SendOutcome {
        self.send(Command::AllRgb, &color.to_payload())
    }

    /// `EARGB:` -- per-goal channel bytes, clockwise from blue-left.
    ///
    /// More than [`EACH_RGB_LEN`] values is almost certainly a caller
    /// bug, but the controller tolerates extra bytes, so the message is
    /// flagged and sent as given (frame size still permitting). Zero
    /// bytes go out as 1.
    pub fn send_each_rgb(&mut self, values: &[u8]) -> SendOutcome {
        if values.len() > EACH_RGB_LEN {
            warn!(
                count = values.len(),
                expected = EACH_RGB_LEN,
                "More channel values than goals, sending anyway"
            );
        }
        let payload: Vec<u8> = values.iter().copied().map(sanitize_channel).collect();
        self.send(Command::EachRgb, &payload)
    }

    /// Shared transmit path: compose, pad, one socket write, reconnect on
    /// failure. Never retransmits on its own.
    fn send(&mut self, command: Command, payload: &[u8]) -> SendOutcome {
        let frame = match command.compose(payload) {
            Ok(frame) => frame,
            Err(e) => {
                warn!(command = ?command, error = %e, "Dropping oversize message");
                return SendOutcome::Oversize;
            }
        };

        if self.config.verbose {
            info!(frame = %String::from_utf8_lossy(frame.content()), "Tx");
        } else {
            debug!(command = ?command, "Tx");
        }

        let Some(stream) = self.stream.as_mut() else {
            warn!("No link to controller, reconnecting");
            self.reconnect();
            return SendOutcome::LinkLost;
        };

        match stream.write_all(frame.as_bytes()) {
            Ok(()) => SendOutcome::Sent,
            Err(e) => {
                warn!(error = %e, command = ?command, "Transmit failed, reconnecting");
                self.stream = None;
                self.reconnect();
                SendOutcome::LinkLost
            }
        }
    }
}
