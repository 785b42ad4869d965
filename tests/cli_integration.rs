//! End-to-end tests for `multivac-launch launch`.
//!
//! These tests run the real binary against a stub `/session` endpoint and
//! check its exit status, its stderr alerts, and what reached upstream.

mod common;

use multivac_launch::dispatch::FAILURE_ALERT;
use multivac_launch::form::{INVALID_HEADER, NUM_STEPS_REASON};
use std::process::Output;

/// Runs `multivac-launch launch` with `args` against `upstream`, using a
/// config path that does not exist so built-in defaults apply.
async fn run_launch(upstream: &str, args: &[&str]) -> Output {
    let config_dir = tempfile::TempDir::new().unwrap();
    tokio::process::Command::new(env!("CARGO_BIN_EXE_multivac-launch"))
        .arg("launch")
        .arg("--config")
        .arg(config_dir.path().join("absent.toml"))
        .arg("--upstream")
        .arg(upstream)
        .args(args)
        .env_remove("MULTIVAC_UPSTREAM")
        .output()
        .await
        .expect("Failed to run multivac-launch")
}

#[tokio::test]
async fn unknown_agent_exits_2_without_request() {
    let (upstream, received) = common::start_stub_upstream(200, "success").await;

    let output = run_launch(
        &upstream,
        &[
            "--environment-name",
            "MeanPixelDifferenceEnv",
            "--agent-name",
            "dqn",
            "--num-steps",
            "10",
        ],
    )
    .await;

    assert_eq!(output.status.code(), Some(2));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("invalid agent 'dqn'"), "stderr: {stderr}");
    assert!(received.lock().unwrap().is_empty());
}

#[tokio::test]
async fn zero_steps_exits_1_with_alert_and_no_request() {
    let (upstream, received) = common::start_stub_upstream(200, "success").await;

    let output = run_launch(
        &upstream,
        &[
            "--environment-name",
            "MeanPixelDifferenceEnv",
            "--agent-name",
            "random",
            "--num-steps",
            "0",
        ],
    )
    .await;

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains(INVALID_HEADER), "stderr: {stderr}");
    assert!(stderr.contains(NUM_STEPS_REASON), "stderr: {stderr}");
    assert!(received.lock().unwrap().is_empty());
}

#[tokio::test]
async fn valid_launch_exits_0_with_config_defaults() {
    let (upstream, received) = common::start_stub_upstream(200, "success").await;

    let output = run_launch(
        &upstream,
        &[
            "--environment-name",
            "MeanPixelDifferenceEnv",
            "--agent-name",
            "random",
            "--num-steps",
            "10",
        ],
    )
    .await;

    assert_eq!(output.status.code(), Some(0));
    assert!(String::from_utf8_lossy(&output.stdout).contains("Session launched."));

    let received = received.lock().unwrap();
    assert_eq!(received.len(), 1);
    assert_eq!(received[0]["numSteps"], "10");
    assert_eq!(received[0]["observationDelta"], "250");
    assert_eq!(received[0]["videoFps"], "1");
}

#[tokio::test]
async fn failed_session_exits_1_with_failure_alert() {
    let (upstream, received) = common::start_stub_upstream(500, "error").await;

    let output = run_launch(
        &upstream,
        &[
            "--environment-name",
            "MeanPixelDifferenceEnv",
            "--agent-name",
            "random",
            "--num-steps",
            "10",
            "--video-fps",
            "30",
        ],
    )
    .await;

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains(FAILURE_ALERT), "stderr: {stderr}");
    let received = received.lock().unwrap();
    assert_eq!(received.len(), 1);
    assert_eq!(received[0]["videoFps"], "30");
}
