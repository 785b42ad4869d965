//! Session request dispatcher.
//!
//! Sends one multipart `POST /session` to the upstream Multivac server and
//! maps the reply onto a navigation decision. There is no retry, no
//! timeout and no deduplication: a second submission while one is in
//! flight simply sends a second request.

use futures::future::BoxFuture;
use thiserror::Error;

use crate::form::LaunchParams;
use crate::surface::Surface;

/// Path of the upstream endpoint that launches a session.
pub const SESSION_PATH: &str = "/session";

/// Body returned by the upstream endpoint when the session succeeded.
pub const SUCCESS_BODY: &str = "success";

/// Alert shown for any failed request.
pub const FAILURE_ALERT: &str = "Multivac session failed - see logs for more information.";

/// Where the user goes once the request resolves, either way.
pub const ROOT_PATH: &str = "/";

/// Status and body of the upstream reply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionReply {
    pub status: u16,
    pub body: String,
}

/// A failed session request. Users only see [`FAILURE_ALERT`]; the detail
/// is for the log.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RequestError {
    #[error("session endpoint replied {status}: {body:?}")]
    Status { status: u16, body: String },

    #[error("session request failed: {0}")]
    Transport(String),
}

/// Carries a multipart session request to the upstream endpoint.
pub trait Transport: Send + Sync {
    fn post_session<'a>(
        &'a self,
        params: &'a LaunchParams,
    ) -> BoxFuture<'a, Result<SessionReply, RequestError>>;
}

/// Production transport backed by a shared `reqwest::Client`.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
    endpoint: String,
}

impl HttpTransport {
    /// Build a transport posting to `{upstream}/session`.
    pub fn new(upstream: &str) -> Result<Self, RequestError> {
        let client = reqwest::Client::builder()
            .build()
            .map_err(|e| RequestError::Transport(e.to_string()))?;
        Ok(Self {
            client,
            endpoint: session_url(upstream),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

/// Join the upstream base URL and [`SESSION_PATH`].
pub fn session_url(upstream: &str) -> String {
    format!("{}{}", upstream.trim_end_matches('/'), SESSION_PATH)
}

impl Transport for HttpTransport {
    fn post_session<'a>(
        &'a self,
        params: &'a LaunchParams,
    ) -> BoxFuture<'a, Result<SessionReply, RequestError>> {
        Box::pin(async move {
            let form = params
                .fields()
                .into_iter()
                .fold(reqwest::multipart::Form::new(), |form, (name, value)| {
                    form.text(name, value)
                });

            let resp = self
                .client
                .post(&self.endpoint)
                .multipart(form)
                .send()
                .await
                .map_err(|e| RequestError::Transport(format!("{}: {}", self.endpoint, e)))?;

            let status = resp.status().as_u16();
            let body = resp
                .text()
                .await
                .map_err(|e| RequestError::Transport(format!("reading reply: {}", e)))?;

            Ok(SessionReply { status, body })
        })
    }
}

/// Progress of a single session request. A submission that never sends
/// stays `Idle`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestState {
    Idle,
    Requesting,
    Succeeded,
    Failed,
}

impl RequestState {
    /// The terminal state a finished request settles in.
    pub fn settled(result: &Result<(), RequestError>) -> Self {
        match result {
            Ok(()) => RequestState::Succeeded,
            Err(_) => RequestState::Failed,
        }
    }

    pub fn is_terminal(self) -> bool {
        matches!(self, RequestState::Succeeded | RequestState::Failed)
    }
}

/// Decide the outcome of an upstream reply. Only `200` with a body of
/// exactly `success` counts.
pub fn classify(reply: SessionReply) -> Result<(), RequestError> {
    if reply.status == 200 && reply.body == SUCCESS_BODY {
        Ok(())
    } else {
        Err(RequestError::Status {
            status: reply.status,
            body: reply.body,
        })
    }
}

pub struct SessionDispatcher {
    transport: Box<dyn Transport>,
}

impl SessionDispatcher {
    pub fn new(transport: impl Transport + 'static) -> Self {
        Self {
            transport: Box::new(transport),
        }
    }

    /// Send one session request, then drive `surface`: on failure one
    /// alert, and in every case navigation to [`ROOT_PATH`].
    pub async fn dispatch<S: Surface + ?Sized>(
        &self,
        params: &LaunchParams,
        surface: &mut S,
    ) -> Result<(), RequestError> {
        tracing::info!(
            environment = %params.environment_name,
            agent = %params.agent_name,
            num_steps = params.num_steps,
            observation_delta = params.observation_delta.as_str(),
            video_fps = params.video_fps,
            state = ?RequestState::Requesting,
            "launching session"
        );

        let result = self
            .transport
            .post_session(params)
            .await
            .and_then(classify);

        let state = RequestState::settled(&result);
        match &result {
            Ok(()) => tracing::info!(?state, "session succeeded"),
            Err(e) => {
                tracing::warn!(?state, error = %e, "session failed");
                surface.alert(FAILURE_ALERT);
            }
        }

        surface.navigate(ROOT_PATH);
        result
    }
}
