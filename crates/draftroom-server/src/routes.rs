// HTTP handlers for the draft API.
//
// Paths, query parameter names and response bodies match what the browser
// client already sends and reads.

use std::sync::Arc;

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use draftroom_core::{CreateOutcome, Draft, DraftError, DraftService, DraftView, ErrorKind, NewDraft};
use serde::{Deserialize, Serialize};

use crate::params;

pub type SharedService = Arc<DraftService>;

pub const DRAFT_CREATED: &str = "Draft created successfully";
pub const DRAFT_EXISTS: &str = "Draft already exists";
pub const PICK_ACCEPTED: &str = "Draft edited successfully";

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// A rejected request, rendered as `{"error": ..., "code": ...}`.
#[derive(Debug)]
pub struct ApiError(pub DraftError);

impl From<DraftError> for ApiError {
    fn from(err: DraftError) -> Self {
        ApiError(err)
    }
}

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match self.0.kind() {
            ErrorKind::Validation | ErrorKind::Invariant => StatusCode::BAD_REQUEST,
            ErrorKind::NotFound => StatusCode::NOT_FOUND,
            ErrorKind::Conflict
            | ErrorKind::TurnViolation
            | ErrorKind::Completion
            | ErrorKind::OptionUnavailable => StatusCode::CONFLICT,
            ErrorKind::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: u16,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = Json(ErrorResponse {
            error: self.0.to_string(),
            code: status.as_u16(),
        });
        (status, body).into_response()
    }
}

// ---------------------------------------------------------------------------
// Request/response types
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
pub struct RetrieveQuery {
    #[serde(rename = "draftID")]
    pub draft_id: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct CheckIdQuery {
    #[serde(rename = "checkID")]
    pub check_id: Option<String>,
}

/// `options` and `drafters` are JSON-encoded string arrays.
#[derive(Debug, Deserialize)]
pub struct CreateQuery {
    pub id: Option<String>,
    pub options: Option<String>,
    pub drafters: Option<String>,
    pub rounds: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct PickQuery {
    pub picker: Option<String>,
    pub id: Option<String>,
    pub selection: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ViewQuery {
    #[serde(rename = "draftID")]
    pub draft_id: Option<String>,
    pub username: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct RetrieveResponse {
    #[serde(rename = "requestedDraft")]
    pub requested_draft: Draft,
}

#[derive(Debug, Serialize)]
pub struct CheckIdResponse {
    #[serde(rename = "isANewID")]
    pub is_a_new_id: bool,
}

#[derive(Debug, Serialize)]
pub struct PickResponse {
    pub draft: Draft,
    pub message: &'static str,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub drafts: usize,
}

// ---------------------------------------------------------------------------
// Router
// ---------------------------------------------------------------------------

/// Draft endpoints, to be nested under `/api`.
pub fn draft_routes(service: SharedService) -> Router {
    Router::new()
        .route("/retrieveDraft", get(retrieve_draft))
        .route("/isNewID", get(is_new_id))
        .route("/createDraft", post(create_draft))
        .route("/makePick", post(make_pick))
        .route("/draftView", get(draft_view))
        .with_state(service)
}

pub fn health_routes(service: SharedService) -> Router {
    Router::new()
        .route("/health", get(health))
        .with_state(service)
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

async fn retrieve_draft(
    State(service): State<SharedService>,
    Query(query): Query<RetrieveQuery>,
) -> Result<Json<RetrieveResponse>, ApiError> {
    let id = params::required(query.draft_id.as_deref(), "draftID")?;
    let draft = service.retrieve_draft(id)?;
    Ok(Json(RetrieveResponse {
        requested_draft: draft,
    }))
}

async fn is_new_id(
    State(service): State<SharedService>,
    Query(query): Query<CheckIdQuery>,
) -> Result<Json<CheckIdResponse>, ApiError> {
    let id = params::required(query.check_id.as_deref(), "checkID")?;
    Ok(Json(CheckIdResponse {
        is_a_new_id: service.check_id_available(id),
    }))
}

/// Fields are checked in the order the client has always seen errors for:
/// id, id already taken, options, drafters, rounds, then the draft itself.
async fn create_draft(
    State(service): State<SharedService>,
    Query(query): Query<CreateQuery>,
) -> Result<&'static str, ApiError> {
    let id = params::required(query.id.as_deref(), "id")?;
    if !service.check_id_available(id) {
        return Ok(DRAFT_EXISTS);
    }

    let options = params::entry_list(
        params::required(query.options.as_deref(), "options")?,
        "options",
    )?;
    let drafters = params::entry_list(
        params::required(query.drafters.as_deref(), "drafters")?,
        "drafters",
    )?;
    let rounds_per_drafter = params::rounds(params::required(query.rounds.as_deref(), "rounds")?)?;

    let outcome = service.create_draft(NewDraft {
        id: id.to_string(),
        options,
        drafters,
        rounds_per_drafter,
    })?;

    Ok(match outcome {
        CreateOutcome::Created(_) => DRAFT_CREATED,
        CreateOutcome::AlreadyExists => DRAFT_EXISTS,
    })
}

async fn make_pick(
    State(service): State<SharedService>,
    Query(query): Query<PickQuery>,
) -> Result<Json<PickResponse>, ApiError> {
    let picker = params::required(query.picker.as_deref(), "picker")?;
    let id = params::required(query.id.as_deref(), "id")?;
    let selection = params::required(query.selection.as_deref(), "selection")?;

    let draft = service.make_pick(id, picker, selection)?;
    Ok(Json(PickResponse {
        draft,
        message: PICK_ACCEPTED,
    }))
}

async fn draft_view(
    State(service): State<SharedService>,
    Query(query): Query<ViewQuery>,
) -> Result<Json<DraftView>, ApiError> {
    let id = params::required(query.draft_id.as_deref(), "draftID")?;
    let username = params::required(query.username.as_deref(), "username")?;
    Ok(Json(service.view_draft(id, username)?))
}

async fn health(State(service): State<SharedService>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        drafts: service.registry().len(),
    })
}
