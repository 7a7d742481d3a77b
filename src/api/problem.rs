//! Problem-detail error bodies (`application/problem+json`).

use axum::{
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::models::FieldViolation;

pub const PROBLEM_CONTENT_TYPE: &str = "application/problem+json";

/// A problem document: `{type, title, status, detail, ...context}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Problem {
    #[serde(rename = "type")]
    pub problem_type: String,
    pub title: String,
    pub status: u16,
    pub detail: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub entity_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub identifier: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub violations: Vec<FieldViolation>,
}

impl IntoResponse for Problem {
    fn into_response(self) -> Response {
        let status =
            StatusCode::from_u16(self.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        (
            status,
            [(header::CONTENT_TYPE, PROBLEM_CONTENT_TYPE)],
            Json(self),
        )
            .into_response()
    }
}

/// Builds problems whose `type` URIs share a configured base.
#[derive(Debug, Clone)]
pub struct ProblemTypes {
    base_uri: String,
}

impl ProblemTypes {
    pub fn new(base_uri: impl Into<String>) -> Self {
        Self {
            base_uri: base_uri.into(),
        }
    }

    fn problem(&self, kind: &str, title: &str, status: StatusCode, detail: String) -> Problem {
        Problem {
            problem_type: format!("{}{}", self.base_uri, kind),
            title: title.to_string(),
            status: status.as_u16(),
            detail,
            entity_type: None,
            identifier: None,
            violations: Vec::new(),
        }
    }

    /// 404 naming the missing entity. `detail` defaults to
    /// "{entity_type} not found with identifier: {identifier}".
    pub fn not_found(
        &self,
        entity_type: &str,
        identifier: impl Into<String>,
        detail: Option<String>,
    ) -> Problem {
        let identifier = identifier.into();
        let detail = detail.unwrap_or_else(|| {
            format!("{} not found with identifier: {}", entity_type, identifier)
        });
        Problem {
            entity_type: Some(entity_type.to_string()),
            identifier: Some(identifier),
            ..self.problem("not-found", "Not Found", StatusCode::NOT_FOUND, detail)
        }
    }

    /// 404 for a path that matches no route.
    pub fn no_route(&self, path: &str) -> Problem {
        self.problem(
            "not-found",
            "Not Found",
            StatusCode::NOT_FOUND,
            format!("No endpoint {}", path),
        )
    }

    pub fn method_not_allowed(&self, method: &str, path: &str) -> Problem {
        self.problem(
            "method-not-allowed",
            "Method Not Allowed",
            StatusCode::METHOD_NOT_ALLOWED,
            format!("Method {} is not supported on {}", method, path),
        )
    }

    pub fn bad_request(&self, detail: impl Into<String>) -> Problem {
        self.problem(
            "bad-request",
            "Bad Request",
            StatusCode::BAD_REQUEST,
            detail.into(),
        )
    }

    pub fn constraint_violation(&self, violations: Vec<FieldViolation>) -> Problem {
        Problem {
            violations,
            ..self.problem(
                "constraint-violation",
                "Bad Request",
                StatusCode::BAD_REQUEST,
                "Check to ensure the provided data is correct".to_string(),
            )
        }
    }

    pub fn internal_error(&self) -> Problem {
        self.problem(
            "internal-error",
            "Internal Server Error",
            StatusCode::INTERNAL_SERVER_ERROR,
            "An unexpected error occurred".to_string(),
        )
    }
}
