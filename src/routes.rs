use airdrop::api::Client;
use airdrop::{CheckError, EligibilityChecker, EligibilityResult, Identity, ViewState};
use axum::extract::{Path, State};
use axum::http::{HeaderMap, HeaderName, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Form, Json, Router};
use chrono::Utc;
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;

pub struct AppState<CLIENT>
where
    CLIENT: Client,
{
    checker: Arc<EligibilityChecker<CLIENT>>,
    identity_header: HeaderName,
}

impl<CLIENT> AppState<CLIENT>
where
    CLIENT: Client,
{
    pub fn new(checker: EligibilityChecker<CLIENT>, identity_header: HeaderName) -> Self {
        AppState {
            checker: Arc::new(checker),
            identity_header,
        }
    }

    /// Login of the signed-in user, as forwarded by the authenticating proxy.
    fn identity(&self, headers: &HeaderMap) -> Identity {
        headers
            .get(&self.identity_header)
            .and_then(|value| value.to_str().ok())
            .map(str::trim)
            .filter(|login| !login.is_empty())
            .map(Identity::signed_in)
            .unwrap_or_default()
    }
}

impl<CLIENT> Clone for AppState<CLIENT>
where
    CLIENT: Client,
{
    fn clone(&self) -> Self {
        AppState {
            checker: self.checker.clone(),
            identity_header: self.identity_header.clone(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct CheckForm {
    #[serde(default)]
    username: String,
}

pub fn router<CLIENT>(state: AppState<CLIENT>) -> Router
where
    CLIENT: 'static + Client,
{
    Router::new()
        .route("/health", get(healthcheck))
        .route("/api/check", post(check_handler::<CLIENT>))
        .route("/api/me", get(me_handler::<CLIENT>))
        .route("/api/me/check", post(check_me_handler::<CLIENT>))
        .route("/api/users/:username/activity", get(activity_handler::<CLIENT>))
        .with_state(state)
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn check_handler<CLIENT>(
    State(state): State<AppState<CLIENT>>,
    Form(form): Form<CheckForm>,
) -> Response
where
    CLIENT: 'static + Client,
{
    let result = state.checker.check(&form.username, Utc::now()).await;
    view_response(result)
}

pub(crate) async fn me_handler<CLIENT>(State(state): State<AppState<CLIENT>>, headers: HeaderMap) -> Json<serde_json::Value>
where
    CLIENT: 'static + Client,
{
    let identity = state.identity(&headers);
    Json(json!({ "username": identity.login() }))
}

pub(crate) async fn check_me_handler<CLIENT>(State(state): State<AppState<CLIENT>>, headers: HeaderMap) -> Response
where
    CLIENT: 'static + Client,
{
    let identity = state.identity(&headers);
    let result = state.checker.check_signed_in(&identity, Utc::now()).await;
    view_response(result)
}

pub(crate) async fn activity_handler<CLIENT>(
    State(state): State<AppState<CLIENT>>,
    Path(username): Path<String>,
) -> Response
where
    CLIENT: 'static + Client,
{
    match state.checker.recent_activity(&username).await {
        Ok(events) => (StatusCode::OK, Json(events)).into_response(),
        Err(err) => view_response(Err(err)),
    }
}

fn view_response(result: Result<EligibilityResult, CheckError>) -> Response {
    let status = match &result {
        Ok(_) => StatusCode::OK,
        Err(CheckError::Validation) => StatusCode::UNPROCESSABLE_ENTITY,
        Err(CheckError::NotSignedIn) => StatusCode::UNAUTHORIZED,
        Err(CheckError::NotFound(_)) => StatusCode::NOT_FOUND,
        Err(CheckError::Retrieval) => StatusCode::BAD_GATEWAY,
        Err(CheckError::Unexpected) => StatusCode::INTERNAL_SERVER_ERROR,
    };
    (status, Json(ViewState::from(result))).into_response()
}
