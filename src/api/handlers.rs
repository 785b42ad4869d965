use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
    Form, Json,
};
use serde::{Deserialize, Serialize};

use crate::dispatch::{RequestState, FAILURE_ALERT, ROOT_PATH};
use crate::form::RawLaunchForm;
use crate::launcher::{submit, SubmitOutcome};
use crate::surface::RecordingSurface;

use super::page::{render_form, PageAlert};
use super::{AppState, ALERT_FAILED};

#[derive(Serialize)]
pub(super) struct HealthResponse {
    status: &'static str,
}

pub(super) async fn health() -> Json<HealthResponse> {
    Json(HealthResponse { status: "ok" })
}

#[derive(Debug, Default, Deserialize)]
pub(super) struct IndexQuery {
    alert: Option<String>,
}

pub(super) async fn index(
    State(state): State<AppState>,
    Query(query): Query<IndexQuery>,
) -> Html<String> {
    let alert = match query.alert.as_deref() {
        Some(ALERT_FAILED) => Some(PageAlert::Failure(FAILURE_ALERT.to_string())),
        _ => None,
    };
    let defaults = &state.config.defaults;
    let form = RawLaunchForm {
        environment_name: String::new(),
        agent_name: String::new(),
        num_steps: defaults.num_steps.clone(),
        observation_delta: defaults.observation_delta.clone(),
        video_fps: defaults.video_fps.clone(),
    };
    Html(render_form(&state.config, &form, alert.as_ref()))
}

pub(super) async fn launch(
    State(state): State<AppState>,
    Form(form): Form<RawLaunchForm>,
) -> Response {
    let mut surface = RecordingSurface::new();
    let outcome = submit(&form, &state.dispatcher, &mut surface).await;

    match outcome {
        SubmitOutcome::Rejected(e) => {
            let alert = PageAlert::Invalid(e.to_string());
            (
                StatusCode::UNPROCESSABLE_ENTITY,
                Html(render_form(&state.config, &form, Some(&alert))),
            )
                .into_response()
        }
        settled => {
            let destination = surface.destination().unwrap_or(ROOT_PATH);
            let target = if settled.state() == RequestState::Failed {
                format!("{}?alert={}", destination, ALERT_FAILED)
            } else {
                destination.to_string()
            };
            tracing::debug!(%target, "redirecting after launch");
            Redirect::to(&target).into_response()
        }
    }
}
