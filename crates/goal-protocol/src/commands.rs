use chrono::Timelike;

use crate::frame::{Frame, FrameError};

// -- Command set --

/// Commands understood by the goal controller.
///
/// Each maps to a fixed ASCII head written at the start of the frame;
/// `AutoStart` and `Countdown` share the `FIELD` tag and differ in their
/// fixed payload text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Begin the autonomous hot-goal sequence.
    AutoStart,
    /// Begin the pre-match countdown sequence.
    Countdown,
    /// Liveness heartbeat carrying the sender's wall-clock token.
    Heartbeat,
    /// Set every goal to one color (3 raw channel bytes).
    AllRgb,
    /// Set the goals individually (up to 12 raw channel bytes).
    EachRgb,
    /// Auxiliary light-show trigger.
    HaveFun,
}

impl Command {
    /// Fixed head text, including the `:` separator and any fixed payload.
    pub const fn header(&self) -> &'static str {
        match self {
            Command::AutoStart => "FIELD:T000",
            Command::Countdown => "FIELD:T140",
            Command::Heartbeat => "HBEAT:",
            Command::AllRgb => "DORGB:",
            Command::EachRgb => "EARGB:",
            Command::HaveFun => "HVFUN:",
        }
    }

    /// Wire tag (the part before `:`).
    pub const fn tag(&self) -> &'static str {
        match self {
            Command::AutoStart | Command::Countdown => "FIELD",
            Command::Heartbeat => "HBEAT",
            Command::AllRgb => "DORGB",
            Command::EachRgb => "EARGB",
            Command::HaveFun => "HVFUN",
        }
    }

    /// Compose the full wire frame for this command.
    pub fn compose(&self, payload: &[u8]) -> Result<Frame, FrameError> {
        Frame::compose(self.header(), payload)
    }
}

// -- Heartbeat token --

/// Zero-padded `HHMMSSmmm` wall-clock token carried by heartbeats.
///
/// Always exactly 9 ASCII digits. The receiver only logs it, so clock
/// skew between field machines is harmless.
pub fn heartbeat_token(t: chrono::NaiveTime) -> String {
    // chrono folds leap seconds into the nanosecond field; clamp so the
    // token never grows a tenth digit.
    let millis = (t.nanosecond() / 1_000_000).min(999);
    format!("{:02}{:02}{:02}{:03}", t.hour(), t.minute(), t.second(), millis)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveTime;

    #[test]
    fn test_headers_match_wire_protocol() {
        assert_eq!(Command::AutoStart.header(), "FIELD:T000");
        assert_eq!(Command::Countdown.header(), "FIELD:T140");
        assert_eq!(Command::Heartbeat.header(), "HBEAT:");
        assert_eq!(Command::AllRgb.header(), "DORGB:");
        assert_eq!(Command::EachRgb.header(), "EARGB:");
        assert_eq!(Command::HaveFun.header(), "HVFUN:");
    }

    #[test]
    fn test_field_commands_share_tag() {
        assert_eq!(Command::AutoStart.tag(), "FIELD");
        assert_eq!(Command::Countdown.tag(), "FIELD");
        assert_eq!(Command::EachRgb.tag(), "EARGB");
    }

    #[test]
    fn test_compose_carries_fixed_payload() {
        let frame = Command::AutoStart.compose(&[]).unwrap();
        let (tag, payload) = frame.split().unwrap();
        assert_eq!(tag, "FIELD");
        assert_eq!(payload, b"T000");
    }

    #[test]
    fn test_heartbeat_token_format() {
        let t = NaiveTime::from_hms_milli_opt(9, 30, 55, 123).unwrap();
        assert_eq!(heartbeat_token(t), "093055123");
    }

    #[test]
    fn test_heartbeat_token_zero_pads() {
        let t = NaiveTime::from_hms_milli_opt(0, 0, 0, 0).unwrap();
        assert_eq!(heartbeat_token(t), "000000000");
        let t = NaiveTime::from_hms_milli_opt(23, 59, 59, 999).unwrap();
        assert_eq!(heartbeat_token(t), "235959999");
    }

    #[test]
    fn test_heartbeat_token_clamps_leap_second() {
        // 23:59:59.999 + 500ms of leap second
        let t = NaiveTime::from_hms_nano_opt(23, 59, 59, 1_500_000_000).unwrap();
        let token = heartbeat_token(t);
        assert_eq!(token.len(), 9);
        assert_eq!(token, "235959999");
    }

    #[test]
    fn test_heartbeat_token_always_nine_digits() {
        let t = NaiveTime::from_hms_milli_opt(1, 2, 3, 4).unwrap();
        let token = heartbeat_token(t);
        assert_eq!(token.len(), 9);
        assert!(token.bytes().all(|b| b.is_ascii_digit()));
        assert_eq!(token, "010203004");
    }
}
