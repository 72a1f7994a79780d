use axum::{
	Json, Router,
	extract::{State, rejection::JsonRejection},
	http::StatusCode,
	response::{IntoResponse, Response},
	routing::{get, post},
};
use serde::Serialize;

use jamtown_domain::ResultCard;
use jamtown_service::{Error, MatchRequest};

use crate::state::AppState;

pub fn router(state: AppState) -> Router {
	Router::new()
		.route("/health", get(health))
		.route("/v1/match", post(match_cause))
		.route("/v1/catalog/count", get(catalog_count))
		.with_state(state)
}

async fn health() -> StatusCode {
	StatusCode::OK
}

#[derive(Debug, Serialize)]
pub struct MatchResponse {
	pub query: String,
	pub results: Vec<ResultCard>,
	pub prompt: String,
	pub preview: String,
	pub recommendation: Option<String>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub error: Option<ErrorBody>,
}

#[derive(Debug, Serialize)]
pub struct CountResponse {
	pub profiles: u64,
}

/// Retrieval failures are errors. A generation failure still returns the retrieved profiles, with
/// status 502 and a null recommendation.
async fn match_cause(
	State(state): State<AppState>,
	payload: Result<Json<MatchRequest>, JsonRejection>,
) -> Result<Response, ApiError> {
	let Json(payload) = payload?;
	let outcome = state.service.match_cause(payload).await?;
	let prepared = outcome.prepared;
	let (status, recommendation, error) = match outcome.recommendation {
		Ok(text) => (StatusCode::OK, Some(text), None),
		Err(err) => {
			let api_error = ApiError::from(err);

			(api_error.status, None, Some(api_error.body()))
		},
	};
	let body = MatchResponse {
		query: prepared.query,
		results: prepared.cards,
		prompt: prepared.prompt.into_text(),
		preview: prepared.preview,
		recommendation,
		error,
	};

	Ok((status, Json(body)).into_response())
}

async fn catalog_count(State(state): State<AppState>) -> Result<Json<CountResponse>, ApiError> {
	let profiles = state.service.catalog_count().await?;

	Ok(Json(CountResponse { profiles }))
}

#[derive(Debug, Serialize)]
pub struct ErrorBody {
	pub error_code: String,
	pub message: String,
	pub fields: Option<Vec<String>>,
}

#[derive(Debug)]
pub struct ApiError {
	status: StatusCode,
	error_code: String,
	message: String,
	fields: Option<Vec<String>>,
}
impl ApiError {
	fn new(
		status: StatusCode,
		error_code: impl Into<String>,
		message: impl Into<String>,
		fields: Option<Vec<String>>,
	) -> Self {
		Self { status, error_code: error_code.into(), message: message.into(), fields }
	}

	fn body(self) -> ErrorBody {
		ErrorBody { error_code: self.error_code, message: self.message, fields: self.fields }
	}
}

impl From<Error> for ApiError {
	fn from(err: Error) -> Self {
		match err {
			Error::InvalidRequest { field, message } => Self::new(
				StatusCode::BAD_REQUEST,
				"invalid_request",
				message,
				field.map(|field| vec![field]),
			),
			Error::Encoding { message } =>
				Self::new(StatusCode::BAD_GATEWAY, "encoding", message, None),
			Error::UpstreamGeneration { message } =>
				Self::new(StatusCode::BAD_GATEWAY, "upstream_generation", message, None),
			Error::Retrieval { message } => {
				tracing::error!(error = %message, "Catalog retrieval failed.");

				Self::new(StatusCode::SERVICE_UNAVAILABLE, "retrieval", message, None)
			},
			Error::Ingestion { message } =>
				Self::new(StatusCode::INTERNAL_SERVER_ERROR, "ingestion", message, None),
		}
	}
}

impl From<JsonRejection> for ApiError {
	fn from(rejection: JsonRejection) -> Self {
		Self::new(StatusCode::BAD_REQUEST, "invalid_request", rejection.body_text(), None)
	}
}

impl IntoResponse for ApiError {
	fn into_response(self) -> Response {
		let status = self.status;

		(status, Json(self.body())).into_response()
	}
}
