//! Launcher form fields and validation.

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const ENVIRONMENT_NAME_KEY: &str = "environmentName";
pub const AGENT_NAME_KEY: &str = "agentName";
pub const NUM_STEPS_KEY: &str = "numSteps";
pub const OBSERVATION_DELTA_KEY: &str = "observationDelta";
pub const VIDEO_FPS_KEY: &str = "videoFps";

pub const INVALID_HEADER: &str = "Invalid parameters specified:";
pub const NUM_STEPS_REASON: &str = "Number of steps must be greater than zero.";
pub const OBSERVATION_DELTA_REASON: &str = "Observation delta must be greater than zero.";
pub const VIDEO_FPS_REASON: &str = "Video fps must be greater than or equal to 1.";

/// The five launcher fields exactly as submitted, before any parsing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawLaunchForm {
    #[serde(default)]
    pub environment_name: String,
    #[serde(default)]
    pub agent_name: String,
    #[serde(default)]
    pub num_steps: String,
    #[serde(default)]
    pub observation_delta: String,
    #[serde(default)]
    pub video_fps: String,
}

/// Parameters of a session that passed validation.
#[derive(Debug, Clone, PartialEq)]
pub struct LaunchParams {
    pub environment_name: String,
    pub agent_name: String,
    pub num_steps: u64,
    pub observation_delta: ObservationDelta,
    pub video_fps: u32,
}

/// A non-negative observation delta, kept alongside the trimmed text it
/// was parsed from so the upstream receives exactly what was entered.
#[derive(Debug, Clone, PartialEq)]
pub struct ObservationDelta {
    value: f64,
    text: String,
}

impl ObservationDelta {
    /// Parse a delta; `None` when empty, not a finite number, or negative.
    pub fn parse(raw: &str) -> Option<Self> {
        let text = raw.trim();
        let value = text.parse::<f64>().ok()?;
        (value.is_finite() && value >= 0.0).then(|| Self {
            value,
            text: text.to_string(),
        })
    }

    pub fn value(&self) -> f64 {
        self.value
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }
}

impl LaunchParams {
    /// Named fields in wire order, values string-encoded.
    pub fn fields(&self) -> [(&'static str, String); 5] {
        [
            (ENVIRONMENT_NAME_KEY, self.environment_name.clone()),
            (AGENT_NAME_KEY, self.agent_name.clone()),
            (NUM_STEPS_KEY, self.num_steps.to_string()),
            (OBSERVATION_DELTA_KEY, self.observation_delta.as_str().to_string()),
            (VIDEO_FPS_KEY, self.video_fps.to_string()),
        ]
    }
}

/// One or more field constraints were not met.
///
/// `Display` renders the alert text shown to the user: the header line
/// followed by one reason per line, in rule order.
#[derive(Error, Debug, Clone, PartialEq)]
#[error("{}", alert_message(.reasons))]
pub struct ValidationError {
    reasons: Vec<&'static str>,
}

impl ValidationError {
    pub fn reasons(&self) -> &[&'static str] {
        &self.reasons
    }
}

fn alert_message(reasons: &[&'static str]) -> String {
    let mut message = format!("{}\n", INVALID_HEADER);
    for reason in reasons {
        message.push_str(reason);
        message.push('\n');
    }
    message
}

/// Validate the raw form and parse it into [`LaunchParams`].
///
/// Every failing rule is reported, not just the first. Environment and
/// agent names pass through unchecked.
pub fn validate(form: &RawLaunchForm) -> Result<LaunchParams, ValidationError> {
    let mut reasons = Vec::new();

    let num_steps = form
        .num_steps
        .trim()
        .parse::<u64>()
        .ok()
        .filter(|n| *n > 0);
    if num_steps.is_none() {
        reasons.push(NUM_STEPS_REASON);
    }

    let observation_delta = ObservationDelta::parse(&form.observation_delta);
    if observation_delta.is_none() {
        reasons.push(OBSERVATION_DELTA_REASON);
    }

    let video_fps = form
        .video_fps
        .trim()
        .parse::<u32>()
        .ok()
        .filter(|fps| *fps >= 1);
    if video_fps.is_none() {
        reasons.push(VIDEO_FPS_REASON);
    }

    match (num_steps, observation_delta, video_fps) {
        (Some(num_steps), Some(observation_delta), Some(video_fps)) => Ok(LaunchParams {
            environment_name: form.environment_name.clone(),
            agent_name: form.agent_name.clone(),
            num_steps,
            observation_delta,
            video_fps,
        }),
        _ => Err(ValidationError { reasons }),
    }
}
