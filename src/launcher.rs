//! The submit handler shared by every UI driver.

use crate::dispatch::{RequestError, RequestState, SessionDispatcher};
use crate::form::{validate, RawLaunchForm, ValidationError};
use crate::surface::Surface;

/// How a submission ended.
#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome {
    /// Validation failed; nothing was sent.
    Rejected(ValidationError),
    /// The upstream endpoint reported success.
    Launched,
    /// The request was sent but did not succeed.
    Failed(RequestError),
}

impl SubmitOutcome {
    pub fn is_launched(&self) -> bool {
        matches!(self, SubmitOutcome::Launched)
    }

    /// Where the session request ended up. A rejected form never left
    /// `Idle`.
    pub fn state(&self) -> RequestState {
        match self {
            SubmitOutcome::Rejected(_) => RequestState::Idle,
            SubmitOutcome::Launched => RequestState::Succeeded,
            SubmitOutcome::Failed(_) => RequestState::Failed,
        }
    }
}

/// Validate `form` and, when it passes, dispatch exactly one session
/// request. A rejected form raises one alert carrying every reason and
/// does not navigate.
pub async fn submit<S: Surface + ?Sized>(
    form: &RawLaunchForm,
    dispatcher: &SessionDispatcher,
    surface: &mut S,
) -> SubmitOutcome {
    let params = match validate(form) {
        Ok(params) => params,
        Err(e) => {
            tracing::info!(reasons = ?e.reasons(), "launch form rejected");
            surface.alert(&e.to_string());
            return SubmitOutcome::Rejected(e);
        }
    };

    match dispatcher.dispatch(&params, surface).await {
        Ok(()) => SubmitOutcome::Launched,
        Err(e) => SubmitOutcome::Failed(e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dispatch::{SessionReply, Transport, FAILURE_ALERT};
    use crate::form::{LaunchParams, NUM_STEPS_REASON};
    use crate::surface::{Effect, RecordingSurface};
    use futures::future::BoxFuture;
    use std::sync::{Arc, Mutex};

    #[derive(Clone, Default)]
    struct RecordingTransport {
        status: u16,
        body: &'static str,
        sent: Arc<Mutex<Vec<LaunchParams>>>,
    }

    impl Transport for RecordingTransport {
        fn post_session<'a>(
            &'a self,
            params: &'a LaunchParams,
        ) -> BoxFuture<'a, Result<SessionReply, RequestError>> {
            self.sent.lock().unwrap().push(params.clone());
            let reply = SessionReply {
                status: self.status,
                body: self.body.to_string(),
            };
            Box::pin(async move { Ok(reply) })
        }
    }

    fn raw(num_steps: &str, observation_delta: &str, video_fps: &str) -> RawLaunchForm {
        RawLaunchForm {
            environment_name: "MeanPixelDifferenceEnv".into(),
            agent_name: "random".into(),
            num_steps: num_steps.into(),
            observation_delta: observation_delta.into(),
            video_fps: video_fps.into(),
        }
    }

    fn dispatcher(status: u16, body: &'static str) -> (SessionDispatcher, Arc<Mutex<Vec<LaunchParams>>>) {
        let transport = RecordingTransport {
            status,
            body,
            ..Default::default()
        };
        let sent = transport.sent.clone();
        (SessionDispatcher::new(transport), sent)
    }

    #[tokio::test]
    async fn rejected_form_sends_nothing() {
        let (dispatcher, sent) = dispatcher(200, "success");
        let mut surface = RecordingSurface::new();

        let outcome = submit(&raw("0", "5", "30"), &dispatcher, &mut surface).await;

        assert!(matches!(outcome, SubmitOutcome::Rejected(ref e) if e.reasons() == [NUM_STEPS_REASON]));
        assert_eq!(outcome.state(), RequestState::Idle);
        assert!(sent.lock().unwrap().is_empty());
        assert_eq!(surface.alerts().count(), 1);
        assert!(surface.destination().is_none());
    }

    #[tokio::test]
    async fn valid_form_is_sent_once() {
        let (dispatcher, sent) = dispatcher(200, "success");
        let mut surface = RecordingSurface::new();

        let outcome = submit(&raw("10", "250", "30"), &dispatcher, &mut surface).await;

        assert!(outcome.is_launched());
        assert_eq!(outcome.state(), RequestState::Succeeded);
        let sent = sent.lock().unwrap();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].num_steps, 10);
        assert_eq!(sent[0].video_fps, 30);
        assert_eq!(surface.effects(), &[Effect::Navigate("/".into())]);
    }

    #[tokio::test]
    async fn failed_request_alerts_then_navigates() {
        let (dispatcher, _) = dispatcher(500, "error");
        let mut surface = RecordingSurface::new();

        let outcome = submit(&raw("10", "250", "30"), &dispatcher, &mut surface).await;

        assert!(matches!(outcome, SubmitOutcome::Failed(RequestError::Status { status: 500, .. })));
        assert_eq!(outcome.state(), RequestState::Failed);
        assert_eq!(
            surface.effects(),
            &[
                Effect::Alert(FAILURE_ALERT.into()),
                Effect::Navigate("/".into())
            ]
        );
    }
}
