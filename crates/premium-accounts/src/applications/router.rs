use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
    Router,
};
use serde::{Deserialize, Serialize};
use serde_json::json;

use super::domain::{Application, ApplicationDecision};
use super::evaluation::{ApplicationEvaluator, EntryPoint};
use super::validator::{AccountValidator, ValidatorError};

/// Router builder exposing the evaluator over HTTP.
pub fn evaluation_router<V>(evaluator: Arc<ApplicationEvaluator<V>>) -> Router
where
    V: AccountValidator + 'static,
{
    Router::new()
        .route(
            "/api/v1/premium/applications/evaluate",
            post(evaluate_handler::<V>),
        )
        .with_state(evaluator)
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct EvaluateQuery {
    #[serde(default)]
    pub(crate) entry_point: EntryPoint,
}

/// Response body for an evaluated application.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecisionView {
    pub decision: ApplicationDecision,
    pub summary: String,
    pub entry_point: EntryPoint,
}

impl DecisionView {
    pub fn new(decision: ApplicationDecision, entry_point: EntryPoint) -> Self {
        Self {
            decision,
            summary: decision.summary().to_string(),
            entry_point,
        }
    }
}

pub(crate) async fn evaluate_handler<V>(
    State(evaluator): State<Arc<ApplicationEvaluator<V>>>,
    Query(query): Query<EvaluateQuery>,
    axum::Json(application): axum::Json<Application>,
) -> Response
where
    V: AccountValidator + 'static,
{
    match evaluator.evaluate_with(query.entry_point, &application) {
        Ok(decision) => {
            let view = DecisionView::new(decision, query.entry_point);
            (StatusCode::OK, axum::Json(view)).into_response()
        }
        Err(error @ ValidatorError::Unavailable(_)) => {
            let payload = json!({
                "error": error.to_string(),
            });
            (StatusCode::SERVICE_UNAVAILABLE, axum::Json(payload)).into_response()
        }
        Err(other) => {
            let payload = json!({
                "error": other.to_string(),
            });
            (StatusCode::BAD_GATEWAY, axum::Json(payload)).into_response()
        }
    }
}
