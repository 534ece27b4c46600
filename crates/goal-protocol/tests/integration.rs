//! Integration tests for the goal-protocol crate.
//!
//! These tests exercise the public API across module boundaries,
//! composing real command frames out of color and heartbeat data and
//! checking the exact bytes a controller would receive.

use goal_protocol::color::{Goal, GoalColors, Rgb, EACH_RGB_LEN};
use goal_protocol::commands::{heartbeat_token, Command};
use goal_protocol::frame::{Frame, FrameError, FRAME_SIZE, PAD_BYTE};

// ---------------------------------------------------------------------------
// 1. Command frames on the wire
// ---------------------------------------------------------------------------

#[test]
fn every_command_frame_parses_back_to_its_tag() {
    let commands = [
        Command::AutoStart,
        Command::Countdown,
        Command::Heartbeat,
        Command::AllRgb,
        Command::EachRgb,
        Command::HaveFun,
    ];

    for command in commands {
        let frame = command.compose(&[]).expect("empty payload always fits");
        assert_eq!(frame.as_bytes().len(), FRAME_SIZE);

        let received = Frame::from_wire(frame.as_bytes()).expect("exact-size frame");
        let (tag, _) = received.split().expect("all commands carry a colon");
        assert_eq!(tag, command.tag());
    }
}

#[test]
fn match_signals_differ_only_in_payload() {
    let auto = Command::AutoStart.compose(&[]).unwrap();
    let countdown = Command::Countdown.compose(&[]).unwrap();

    assert_eq!(auto.split().unwrap(), ("FIELD", b"T000".as_slice()));
    assert_eq!(countdown.split().unwrap(), ("FIELD", b"T140".as_slice()));
    assert_ne!(auto, countdown);
}

// ---------------------------------------------------------------------------
// 2. All-goals color flow
// ---------------------------------------------------------------------------

#[test]
fn all_rgb_frame_bytes_are_exact() {
    let frame = Command::AllRgb
        .compose(&Rgb::new(0, 128, 255).to_payload())
        .unwrap();

    let mut expected = [PAD_BYTE; FRAME_SIZE];
    expected[..6].copy_from_slice(b"DORGB:");
    expected[6] = 1; // zero channel remapped off the padding byte
    expected[7] = 128;
    expected[8] = 255;
    assert_eq!(frame.as_bytes(), &expected);
}

#[test]
fn black_never_collides_with_padding() {
    let frame = Command::AllRgb
        .compose(&Rgb::new(0, 0, 0).to_payload())
        .unwrap();

    let (_, payload) = frame.split().unwrap();
    assert_eq!(payload, &[1, 1, 1]);
    assert!(frame.content().iter().all(|&b| b != PAD_BYTE));
}

// ---------------------------------------------------------------------------
// 3. Per-goal color flow
// ---------------------------------------------------------------------------

#[test]
fn each_rgb_frame_carries_goals_clockwise() {
    let mut colors = GoalColors::uniform(Rgb::new(5, 5, 5));
    colors.set(Goal::BlueLeft, Rgb::new(0, 0, 200));
    colors.set(Goal::RedRight, Rgb::new(200, 0, 0));

    let frame = Command::EachRgb.compose(&colors.to_payload()).unwrap();
    let (tag, payload) = frame.split().unwrap();

    assert_eq!(tag, "EARGB");
    assert_eq!(payload.len(), EACH_RGB_LEN);
    assert_eq!(&payload[..3], &[1, 1, 200]); // blue-left first
    assert_eq!(&payload[9..], &[200, 1, 1]); // red-right last
}

#[test]
fn full_goal_payload_fits_the_frame() {
    let colors = GoalColors::uniform(Rgb::new(255, 255, 255));
    let frame = Command::EachRgb.compose(&colors.to_payload()).unwrap();
    assert_eq!(frame.content().len(), 6 + EACH_RGB_LEN);
}

// ---------------------------------------------------------------------------
// 4. Heartbeat flow
// ---------------------------------------------------------------------------

#[test]
fn heartbeat_frame_carries_nine_digit_token() {
    let t = chrono::NaiveTime::from_hms_milli_opt(14, 7, 3, 42).unwrap();
    let token = heartbeat_token(t);
    let frame = Command::Heartbeat.compose(token.as_bytes()).unwrap();

    let (tag, payload) = frame.split().unwrap();
    assert_eq!(tag, "HBEAT");
    assert_eq!(payload, b"140703042");
    assert_eq!(frame.content().len(), 15);
}

// ---------------------------------------------------------------------------
// 5. Frame size limits
// ---------------------------------------------------------------------------

#[test]
fn oversize_content_is_rejected_before_the_wire() {
    let too_big = [7u8; FRAME_SIZE];
    let err = Command::EachRgb.compose(&too_big).unwrap_err();
    assert!(matches!(err, FrameError::Oversize { len: 38 }));
}

#[test]
fn content_up_to_frame_size_is_accepted() {
    let exact = [7u8; FRAME_SIZE - 6];
    let frame = Command::EachRgb.compose(&exact).unwrap();
    assert_eq!(frame.content().len(), FRAME_SIZE);
}
