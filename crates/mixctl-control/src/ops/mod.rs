//! Operational HTTP endpoints.
//!
//! - `/healthz`     : liveness
//! - `/v1/services` : registered services and their config versions
//! - `/v1/evaluate` : dry-run of the attribute/quota pipeline for one request

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

use mixctl_core::error::{ErrorCode, MixctlError};
use mixctl_core::{Attributes, QuotaRequirement};

use crate::app_state::AppState;
use crate::request::RequestHeaders;

pub async fn healthz() -> impl IntoResponse {
    (StatusCode::OK, "ok")
}

#[derive(Debug, Serialize)]
pub struct ServiceSummary {
    pub name: String,
    pub version: u64,
}

pub async fn services(State(state): State<AppState>) -> Json<Vec<ServiceSummary>> {
    let controller = state.controller();
    let out = controller
        .service_names()
        .into_iter()
        .filter_map(|name| {
            let ctx = controller.service_context(Some(name.as_str())).ok()?;
            Some(ServiceSummary {
                version: ctx.version(),
                name,
            })
        })
        .collect();
    Json(out)
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EvaluateRequest {
    #[serde(default)]
    pub service: Option<String>,
    #[serde(default)]
    pub method: Option<String>,
    #[serde(default)]
    pub path: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct EvaluateResponse {
    pub service: String,
    pub version: u64,
    pub check: bool,
    pub report: bool,
    pub attributes: Attributes,
    pub quotas: Vec<QuotaRequirement>,
}

pub async fn evaluate(
    State(state): State<AppState>,
    Json(req): Json<EvaluateRequest>,
) -> Result<Json<EvaluateResponse>, ApiError> {
    let headers = RequestHeaders {
        method: req.method,
        path: req.path,
    };
    let (ctx, request) = state
        .controller()
        .evaluate(req.service.as_deref(), &headers)?;

    tracing::debug!(
        service = ctx.name(),
        attributes = request.attributes.len(),
        quotas = request.quotas.len(),
        "evaluated"
    );

    Ok(Json(EvaluateResponse {
        service: ctx.name().to_string(),
        version: ctx.version(),
        check: ctx.enable_check(),
        report: ctx.enable_report(),
        attributes: request.attributes,
        quotas: request.quotas,
    }))
}

/// JSON error body: `{ "code": "...", "message": "..." }`.
#[derive(Debug)]
pub struct ApiError(pub MixctlError);

impl From<MixctlError> for ApiError {
    fn from(e: MixctlError) -> Self {
        Self(e)
    }
}

#[derive(Serialize)]
struct ErrorBody {
    code: &'static str,
    message: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let code = self.0.code();
        let status = match code {
            ErrorCode::UnknownService => StatusCode::NOT_FOUND,
            ErrorCode::Internal => StatusCode::INTERNAL_SERVER_ERROR,
            _ => StatusCode::BAD_REQUEST,
        };
        let body = ErrorBody {
            code: code.as_str(),
            message: self.0.to_string(),
        };
        (status, Json(body)).into_response()
    }
}
